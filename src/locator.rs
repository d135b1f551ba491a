use std::time::Duration;

use crate::error::{RegionLookupError, ResolveError};
use crate::region::Region;
use crate::riot_id::RiotId;
use crate::source::{RankingSource, RawPlayerData};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub region: Region,
    pub data: RawPlayerData,
}

/// Finds the first region in the player's search order that knows them.
///
/// A region that errors or does not answer within `timeout` counts as a miss.
/// Only running out of regions is an error.
pub async fn locate<S>(source: &S, player: &RiotId, timeout: Duration) -> Result<Located, ResolveError>
where
    S: RankingSource + ?Sized,
{
    let mut failed_regions = 0;
    for region in player.search_order() {
        let result = match tokio::time::timeout(timeout, source.lookup(region, player)).await {
            Ok(result) => result,
            Err(_) => Err(RegionLookupError::TimedOut(timeout)),
        };
        match result {
            Ok(Some(data)) => {
                debug!("{} found in {}", player, region);
                return Ok(Located { region, data });
            }
            Ok(None) => debug!("{} not in {}", player, region),
            Err(e) => {
                warn!("{} lookup in {} failed: {}", player, region, e);
                failed_regions += 1;
            }
        }
    }
    Err(ResolveError::PlayerNotFound { player: player.to_string(), failed_regions })
}
