use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Eune,
    Euw,
    Tr,
    Ru,
    Na,
    Kr,
}

/// Search priority, first hit wins.
pub const PRIORITY: [Region; 6] = [Region::Eune, Region::Euw, Region::Tr, Region::Ru, Region::Na, Region::Kr];

impl Region {
    /// Region path segment used by op.gg.
    pub fn slug(self) -> &'static str {
        match self {
            Region::Eune => "eune",
            Region::Euw => "euw",
            Region::Tr => "tr",
            Region::Ru => "ru",
            Region::Na => "na",
            Region::Kr => "kr",
        }
    }

    /// Order in which to query regions for a player.
    ///
    /// An explicit hint goes first, then a tag line that names a region,
    /// then the fixed priority list. Each region appears once.
    pub fn search_order(hint: Option<Region>, tag_line: &str) -> Vec<Region> {
        let mut order = Vec::with_capacity(PRIORITY.len());
        let from_tag = tag_line.parse::<Region>().ok().filter(|_| is_slug(tag_line));
        for region in hint.into_iter().chain(from_tag).chain(PRIORITY) {
            if !order.contains(&region) {
                order.push(region);
            }
        }
        order
    }
}

// Tags are matched against slugs only, "#WEST" is a tag and not a hint.
fn is_slug(s: &str) -> bool {
    PRIORITY.iter().any(|region| region.slug().eq_ignore_ascii_case(s))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown region {0:?}")]
pub struct UnknownRegion(String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eune" | "eueast" | "east" => Ok(Region::Eune),
            "euw" | "euwest" | "euwe" | "west" => Ok(Region::Euw),
            "tr" => Ok(Region::Tr),
            "ru" => Ok(Region::Ru),
            "na" => Ok(Region::Na),
            "kr" => Ok(Region::Kr),
            _ => Err(UnknownRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug().to_ascii_uppercase())
    }
}
