use crate::rank::{Division, Rank, RankValue, Tier};

fn tier_base(tier: Tier) -> u32 {
    match tier {
        Tier::Iron => 0,
        Tier::Bronze => 400,
        Tier::Silver => 800,
        Tier::Gold => 1200,
        Tier::Platinum => 1600,
        Tier::Emerald => 2000,
        Tier::Diamond => 2400,
        Tier::Master => 2800,
        Tier::Grandmaster => 3000,
        Tier::Challenger => 3300,
    }
}

pub fn league_to_numeric(rank: &RankValue) -> u32 {
    let rank_addition = match rank.division() {
        Some(division) => (4 - u32::from(division.number())) * 100,
        None => 0,
    };
    tier_base(rank.tier()) + rank_addition + rank.league_points()
}

/// Score of a resolved rank. Unranked players score 0.
pub fn to_score(rank: &Rank) -> u32 {
    match rank {
        Rank::Unranked => 0,
        Rank::Ranked(rank) => league_to_numeric(rank),
    }
}

/// Places a score back on the ladder. Apex scores are split by the
/// Grandmaster and Challenger bases, so a Master player past 200LP reads
/// back as Grandmaster.
pub fn numeric_to_league(x: u32) -> RankValue {
    let tier = Tier::ALL
        .iter()
        .copied()
        .rev()
        .find(|tier| tier_base(*tier) <= x)
        .unwrap_or(Tier::Iron);
    let mut lp = x - tier_base(tier);

    let division = if tier.is_apex() {
        None
    } else {
        let steps = (lp / 100).min(3);
        lp -= steps * 100;
        Some(Division::ALL[steps as usize])
    };

    match RankValue::new(tier, division, lp) {
        Ok(rank) => rank,
        // lp < 100 below Master by construction
        Err(_) => unreachable!("numeric_to_league built an invalid rank from {}", x),
    }
}

pub fn elo_to_str(x: u32) -> String {
    numeric_to_league(x).to_string()
}

// Given a roster, return the average rank of its ranked players, in string form
pub fn team_avg_rank_str(ranks: &[Rank]) -> String {
    let scores: Vec<u32> = ranks.iter().filter(|rank| rank.is_ranked()).map(to_score).collect();
    if scores.is_empty() {
        return Rank::Unranked.to_string();
    }
    let sum: u32 = scores.iter().sum();
    elo_to_str(sum / scores.len() as u32)
}
