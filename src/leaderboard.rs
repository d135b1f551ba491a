use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::team::ScoredTeam;

/// Which team score orders the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSelector {
    Regular,
    Total,
}

impl ScoreSelector {
    pub fn pick(self, team: &ScoredTeam) -> u32 {
        match self {
            ScoreSelector::Regular => team.regular_score,
            ScoreSelector::Total => team.total_score,
        }
    }
}

impl Default for ScoreSelector {
    fn default() -> Self {
        ScoreSelector::Regular
    }
}

impl FromStr for ScoreSelector {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(ScoreSelector::Regular),
            "total" => Ok(ScoreSelector::Total),
            _ => anyhow::bail!("unknown score selector {:?}, expected \"regular\" or \"total\"", s),
        }
    }
}

impl fmt::Display for ScoreSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScoreSelector::Regular => "regular",
            ScoreSelector::Total => "total",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Leaderboard {
    pub selector: ScoreSelector,
    pub generated_at: DateTime<Utc>,
    pub teams: Vec<ScoredTeam>,
}

impl Leaderboard {
    /// Sorts best first. Equal scores keep registration order.
    pub fn rank(mut teams: Vec<ScoredTeam>, selector: ScoreSelector) -> Self {
        teams.sort_by_key(|team| Reverse(selector.pick(team)));
        Leaderboard { selector, generated_at: Utc::now(), teams }
    }
}
