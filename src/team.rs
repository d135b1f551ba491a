use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::numeric_league_util::to_score;
use crate::rank::{Observations, Rank};
use crate::region::Region;
use crate::riot_id::{RiotId, RiotIdError};

pub const ROSTER_SIZE: usize = 7;
/// Slots counted by the regular score, and the number of "main" slots.
pub const MAIN_SLOTS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSlot {
    #[serde(default)]
    pub discord: String,
    #[serde(default)]
    pub tournament_account: String,
    #[serde(default)]
    pub main_account: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRegistration {
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub description: String,
    pub players: Vec<PlayerSlot>,
}

impl TeamRegistration {
    pub fn check_roster(&self) -> Result<(), ResolveError> {
        if self.players.len() != ROSTER_SIZE {
            return Err(ResolveError::InvalidRosterSize {
                team: self.name.clone(),
                found: self.players.len(),
                expected: ROSTER_SIZE,
            });
        }
        Ok(())
    }
}

/// A cleaned-up `Name#Tag` and its op.gg profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountLink {
    pub riot_id: String,
    pub profile_url: String,
}

impl AccountLink {
    pub fn new(id: &RiotId, region: Region) -> Self {
        AccountLink { riot_id: id.to_string(), profile_url: id.profile_url(region) }
    }
}

/// One player's standing for this pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    #[serde(flatten)]
    pub slot: PlayerSlot,
    pub region: Option<Region>,
    /// Main account, linked in the region it was found in.
    pub main: Option<AccountLink>,
    /// Tournament account, linked in its own hinted region or the main account's.
    pub tournament: Option<AccountLink>,
    pub observations: Observations,
    pub current_rank: Rank,
    pub peak_rank: Rank,
}

impl PlayerRecord {
    pub fn resolved(slot: PlayerSlot, main: &RiotId, region: Region, observations: Observations) -> Self {
        let tournament = match RiotId::parse(&slot.tournament_account) {
            Ok(id) => Some(AccountLink::new(&id, id.region_hint.unwrap_or(region))),
            Err(RiotIdError::Empty) => None,
            Err(e) => {
                debug!("tournament account of {}: {}", main, e);
                None
            }
        };
        PlayerRecord {
            slot,
            region: Some(region),
            main: Some(AccountLink::new(main, region)),
            tournament,
            current_rank: observations.current_rank(),
            peak_rank: observations.peak_rank(),
            observations,
        }
    }

    pub fn unranked(slot: PlayerSlot) -> Self {
        PlayerRecord {
            slot,
            region: None,
            main: None,
            tournament: None,
            observations: Observations::default(),
            current_rank: Rank::Unranked,
            peak_rank: Rank::Unranked,
        }
    }

    pub fn score(self) -> ScoredPlayer {
        ScoredPlayer { score: to_score(&self.current_rank), record: self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredPlayer {
    #[serde(flatten)]
    pub record: PlayerRecord,
    pub score: u32,
}

impl ScoredPlayer {
    pub fn peak_score(&self) -> u32 {
        to_score(&self.record.peak_rank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredTeam {
    pub name: String,
    pub tag: String,
    pub logo: String,
    pub description: String,
    pub players: Vec<ScoredPlayer>,
    pub regular_score: u32,
    pub total_score: u32,
}

impl ScoredTeam {
    pub fn new(registration: TeamRegistration, players: Vec<ScoredPlayer>) -> Result<Self, ResolveError> {
        let (regular_score, total_score) = aggregate(&registration.name, &players)?;
        Ok(ScoredTeam {
            name: registration.name,
            tag: registration.tag,
            logo: registration.logo,
            description: registration.description,
            players,
            regular_score,
            total_score,
        })
    }
}

/// `(regular, total)`: the best `MAIN_SLOTS` scores and all of them.
pub fn aggregate(team: &str, players: &[ScoredPlayer]) -> Result<(u32, u32), ResolveError> {
    if players.len() != ROSTER_SIZE {
        return Err(ResolveError::InvalidRosterSize {
            team: team.to_string(),
            found: players.len(),
            expected: ROSTER_SIZE,
        });
    }
    let mut scores: Vec<u32> = players.iter().map(|player| player.score).collect();
    scores.sort_by(|a, b| b.cmp(a));
    let regular = scores.iter().take(MAIN_SLOTS).sum();
    let total = scores.iter().sum();
    Ok((regular, total))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::rank::{Division, RankValue, Tier};

    pub(crate) fn scored(score: u32) -> ScoredPlayer {
        let mut record = PlayerRecord::unranked(PlayerSlot::default());
        record.current_rank = Rank::Ranked(crate::numeric_league_util::numeric_to_league(score));
        let player = record.score();
        assert_eq!(player.score, score);
        player
    }

    fn roster(scores: &[u32]) -> Vec<ScoredPlayer> {
        scores.iter().copied().map(scored).collect()
    }

    #[test]
    fn test_aggregate_example() {
        let players = roster(&[3300, 3000, 2800, 2400, 2000, 1600, 0]);
        assert_eq!(aggregate("t", &players).unwrap(), (13500, 15100));
    }

    #[test]
    fn test_aggregate_ignores_slot_order() {
        let players = roster(&[0, 1600, 2000, 3300, 2400, 2800, 3000]);
        assert_eq!(aggregate("t", &players).unwrap(), (13500, 15100));
    }

    #[test]
    fn test_regular_never_exceeds_total() {
        let rosters: [[u32; 7]; 4] = [
            [1200, 1200, 1200, 1200, 1200, 1200, 1200],
            [2850, 1320, 0, 0, 0, 0, 0],
            [900, 800, 700, 600, 500, 0, 0],
            [100, 200, 300, 400, 500, 600, 700],
        ];
        for scores in rosters.iter() {
            let (regular, total) = aggregate("t", &roster(scores)).unwrap();
            assert!(regular <= total);
            let mut sorted = scores.to_vec();
            sorted.sort();
            assert_eq!(regular == total, sorted[0] == 0 && sorted[1] == 0);
        }
    }

    #[test]
    fn test_aggregate_rejects_short_roster() {
        let players = roster(&[1200, 1200, 1200, 1200, 1200, 1200]);
        assert!(matches!(
            aggregate("Short", &players),
            Err(ResolveError::InvalidRosterSize { found: 6, expected: 7, .. })
        ));
    }

    #[test]
    fn test_player_record_scores_current_rank() {
        let observations = Observations {
            current: Some(RankValue::new(Tier::Gold, Some(Division::IV), 10).unwrap()),
            split_peak: Some(RankValue::new(Tier::Platinum, Some(Division::II), 0).unwrap()),
            historical: vec![RankValue::new(Tier::Silver, Some(Division::I), 0).unwrap()],
        };
        let main = RiotId::parse("Main#EUW").unwrap();
        let player = PlayerRecord::resolved(PlayerSlot::default(), &main, Region::Euw, observations).score();
        assert_eq!(player.score, 1210);
        assert_eq!(player.peak_score(), 1800);
        assert_eq!(player.record.peak_rank.to_string(), "PLATINUM II 0LP");
    }

    fn slot(main_account: &str, tournament_account: &str) -> PlayerSlot {
        PlayerSlot {
            main_account: main_account.to_string(),
            tournament_account: tournament_account.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_accounts_are_cleaned_and_linked() {
        let slot = slot("  Spoon #loh (euwest) ", " Spoon Alt #TRN ");
        let main = RiotId::parse(&slot.main_account).unwrap();
        let record = PlayerRecord::resolved(slot, &main, Region::Euw, Observations::default());

        let main = record.main.unwrap();
        assert_eq!(main.riot_id, "Spoon#loh");
        assert_eq!(main.profile_url, "https://op.gg/lol/summoners/euw/Spoon-loh");

        // plain Riot ID follows the main account's region
        let tournament = record.tournament.unwrap();
        assert_eq!(tournament.riot_id, "Spoon Alt#TRN");
        assert_eq!(tournament.profile_url, "https://op.gg/lol/summoners/euw/Spoon%20Alt-TRN");
        assert_eq!(record.slot.tournament_account, " Spoon Alt #TRN ");
    }

    #[test]
    fn test_tournament_url_keeps_its_region() {
        let slot = slot("Main#1", "https://op.gg/lol/summoners/kr/Hide+on+bush-KR1");
        let main = RiotId::parse(&slot.main_account).unwrap();
        let record = PlayerRecord::resolved(slot, &main, Region::Eune, Observations::default());

        let tournament = record.tournament.unwrap();
        assert_eq!(tournament.riot_id, "Hide on bush#KR1");
        assert_eq!(tournament.profile_url, "https://op.gg/lol/summoners/kr/Hide%20on%20bush-KR1");
        assert_eq!(record.main.unwrap().profile_url, "https://op.gg/lol/summoners/eune/Main-1");
    }

    #[test]
    fn test_missing_or_bad_tournament_account() {
        let main = RiotId::parse("Main#1").unwrap();
        let record = PlayerRecord::resolved(slot("Main#1", ""), &main, Region::Tr, Observations::default());
        assert_eq!(record.tournament, None);
        let record = PlayerRecord::resolved(slot("Main#1", "no tag"), &main, Region::Tr, Observations::default());
        assert_eq!(record.tournament, None);
        assert!(PlayerRecord::unranked(slot("Main#1", "Alt#1")).tournament.is_none());
    }

    #[test]
    fn test_aggregate_highest_apex_scores() {
        let top = 3300 + crate::rank::MAX_APEX_LP;
        assert_eq!(aggregate("t", &roster(&[top; 7])).unwrap(), (top * 5, top * 7));
    }

    #[test]
    fn test_check_roster() {
        let team = TeamRegistration { name: "Full".into(), players: vec![PlayerSlot::default(); 7], ..Default::default() };
        assert!(team.check_roster().is_ok());
        let team = TeamRegistration { name: "Big".into(), players: vec![PlayerSlot::default(); 8], ..Default::default() };
        assert!(team.check_roster().is_err());
    }
}
