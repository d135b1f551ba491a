use async_trait::async_trait;

use crate::error::{RegionLookupError, ResolveError};
use crate::rank::{Division, Observations, RankValue, Tier};
use crate::region::Region;
use crate::riot_id::RiotId;

/// A rank as the ranking service reported it, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRank {
    pub tier: String,
    pub division: Option<u8>,
    /// `None` when the service sent LP that is not a `u32`.
    pub league_points: Option<u32>,
}

impl RawRank {
    pub fn new(tier: &str, division: Option<u8>, league_points: u32) -> Self {
        RawRank { tier: tier.to_string(), division, league_points: Some(league_points) }
    }

    pub fn validate(&self) -> Result<RankValue, ResolveError> {
        let tier: Tier = self.tier.parse()?;
        let division = self.division.map(Division::from_number).transpose()?;
        let league_points = self
            .league_points
            .ok_or_else(|| ResolveError::InvalidRankData(format!("{} with unreadable LP", tier)))?;
        RankValue::new(tier, division, league_points)
    }
}

/// Everything one region knows about a player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPlayerData {
    pub current: Option<RawRank>,
    pub split_peak: Option<RawRank>,
    pub historical: Vec<RawRank>,
}

impl RawPlayerData {
    pub fn has_ranks(&self) -> bool {
        self.current.is_some() || self.split_peak.is_some() || !self.historical.is_empty()
    }

    /// Fails on the first malformed rank; nothing is coerced.
    pub fn validate(&self) -> Result<Observations, ResolveError> {
        Ok(Observations {
            current: self.current.as_ref().map(RawRank::validate).transpose()?,
            split_peak: self.split_peak.as_ref().map(RawRank::validate).transpose()?,
            historical: self.historical.iter().map(RawRank::validate).collect::<Result<_, _>>()?,
        })
    }
}

/// Read side of the ranking service.
#[async_trait]
pub trait RankingSource: Send + Sync {
    /// `Ok(None)` when the region has no such player.
    async fn lookup(&self, region: Region, player: &RiotId) -> Result<Option<RawPlayerData>, RegionLookupError>;
}
