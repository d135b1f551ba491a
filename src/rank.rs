use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    pub const ALL: [Tier; 10] = [
        Tier::Iron,
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Emerald,
        Tier::Diamond,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Challenger,
    ];

    /// Master and above have no divisions.
    pub fn is_apex(self) -> bool {
        self >= Tier::Master
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Iron => "IRON",
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
            Tier::Emerald => "EMERALD",
            Tier::Diamond => "DIAMOND",
            Tier::Master => "MASTER",
            Tier::Grandmaster => "GRANDMASTER",
            Tier::Challenger => "CHALLENGER",
        }
    }
}

impl FromStr for Tier {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Tier::ALL
            .iter()
            .copied()
            .find(|tier| tier.as_str() == upper)
            .ok_or_else(|| ResolveError::InvalidRankData(format!("unknown tier {:?}", s)))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared lowest first, so the derived order puts IV below I.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Division {
    IV,
    III,
    II,
    I,
}

impl Division {
    pub const ALL: [Division; 4] = [Division::IV, Division::III, Division::II, Division::I];

    /// Division as the ranking service numbers it (1 = I, 4 = IV).
    pub fn number(self) -> u8 {
        match self {
            Division::I => 1,
            Division::II => 2,
            Division::III => 3,
            Division::IV => 4,
        }
    }

    pub fn from_number(n: u8) -> Result<Self, ResolveError> {
        match n {
            1 => Ok(Division::I),
            2 => Ok(Division::II),
            3 => Ok(Division::III),
            4 => Ok(Division::IV),
            _ => Err(ResolveError::InvalidRankData(format!("division number {} out of range", n))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Division::I => "I",
            Division::II => "II",
            Division::III => "III",
            Division::IV => "IV",
        }
    }
}

impl FromStr for Division {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" | "1" => Ok(Division::I),
            "II" | "2" => Ok(Division::II),
            "III" | "3" => Ok(Division::III),
            "IV" | "4" => Ok(Division::IV),
            _ => Err(ResolveError::InvalidRankData(format!("unknown division {:?}", s))),
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest LP a divisional tier can hold. 100 LP promotes.
pub const MAX_DIVISION_LP: u32 = 99;
/// Upper bound on apex LP, far above any real ladder. Keeps team sums in `u32`.
pub const MAX_APEX_LP: u32 = 100_000;

/// A validated (tier, division, LP) triple.
///
/// Field order matters: the derived `Ord` compares tier, then division, then
/// LP. Within one tier the division is either always present or always
/// absent, so the `Option` never decides an ordering across tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RankValue {
    tier: Tier,
    division: Option<Division>,
    league_points: u32,
}

impl RankValue {
    pub fn new(tier: Tier, division: Option<Division>, league_points: u32) -> Result<Self, ResolveError> {
        match (tier.is_apex(), division) {
            (true, Some(division)) => {
                return Err(ResolveError::InvalidRankData(format!("{} cannot have division {}", tier, division)))
            }
            (false, None) => return Err(ResolveError::InvalidRankData(format!("{} requires a division", tier))),
            _ => {}
        }
        let max_lp = if tier.is_apex() { MAX_APEX_LP } else { MAX_DIVISION_LP };
        if league_points > max_lp {
            return Err(ResolveError::InvalidRankData(format!(
                "{} cannot hold {} LP",
                tier, league_points
            )));
        }
        Ok(RankValue { tier, division, league_points })
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn division(&self) -> Option<Division> {
        self.division
    }

    pub fn league_points(&self) -> u32 {
        self.league_points
    }

    /// "GOLD III" or "MASTER", without LP.
    pub fn label(&self) -> String {
        match self.division {
            Some(division) => format!("{} {}", self.tier, division),
            None => self.tier.to_string(),
        }
    }
}

impl fmt::Display for RankValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}LP", self.label(), self.league_points)
    }
}

/// A resolved standing. `Unranked` sorts below every real rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rank {
    Unranked,
    Ranked(RankValue),
}

impl Rank {
    pub fn is_ranked(&self) -> bool {
        matches!(self, Rank::Ranked(_))
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::Unranked
    }
}

impl From<Option<RankValue>> for Rank {
    fn from(rank: Option<RankValue>) -> Self {
        rank.map_or(Rank::Unranked, Rank::Ranked)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Unranked => f.write_str("UNRANKED"),
            Rank::Ranked(rank) => rank.fmt(f),
        }
    }
}

/// Highest of the present observations, `Unranked` when there are none.
///
/// The historical list may be in any order.
pub fn merge_peak(current: Option<RankValue>, split_peak: Option<RankValue>, historical: &[RankValue]) -> Rank {
    current
        .into_iter()
        .chain(split_peak)
        .chain(historical.iter().copied())
        .max()
        .into()
}

/// The validated rank observations gathered for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Observations {
    pub current: Option<RankValue>,
    pub split_peak: Option<RankValue>,
    pub historical: Vec<RankValue>,
}

impl Observations {
    pub fn current_rank(&self) -> Rank {
        self.current.into()
    }

    pub fn peak_rank(&self) -> Rank {
        merge_peak(self.current, self.split_peak, &self.historical)
    }
}
