use std::time::Duration;

/// Errors that stop a player, a team or the whole resolution pass.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Every region was scanned without a hit. `failed_regions` counts the
    /// regions that errored at transport level rather than answering "no".
    #[error("{player} not found in any region ({failed_regions} region lookups failed)")]
    PlayerNotFound { player: String, failed_regions: usize },
    #[error("team {team:?} has {found} roster slots, expected {expected}")]
    InvalidRosterSize { team: String, found: usize, expected: usize },
    #[error("invalid rank data: {0}")]
    InvalidRankData(String),
    #[error("resolution pass cancelled before team {0:?}")]
    Cancelled(String),
}

/// A single region lookup that failed. The locator logs it and moves on to
/// the next region.
#[derive(Debug, thiserror::Error)]
pub enum RegionLookupError {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("ranking service answered {0}")]
    Status(reqwest::StatusCode),
    #[error("no answer within {0:?}")]
    TimedOut(Duration),
}
