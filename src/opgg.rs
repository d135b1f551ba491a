use std::time::Duration;

use async_trait::async_trait;
use lazy_regex::regex;
use serde::Deserialize;
use serde_json::json;

use crate::error::RegionLookupError;
use crate::rank::Tier;
use crate::region::Region;
use crate::riot_id::RiotId;
use crate::source::{RankingSource, RawPlayerData, RawRank};

pub const DEFAULT_ENDPOINT: &str = "https://mcp-api.op.gg/mcp";

/// Ranking source backed by op.gg's MCP endpoint.
pub struct OpggClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct McpResponse {
    result: Option<McpResult>,
}

#[derive(Debug, Deserialize)]
struct McpResult {
    #[serde(default)]
    content: Vec<McpContent>,
}

#[derive(Debug, Deserialize)]
struct McpContent {
    #[serde(default)]
    text: String,
}

impl OpggClient {
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(OpggClient { client, endpoint: endpoint.to_string() })
    }

    async fn fetch_profile(&self, region: Region, player: &RiotId) -> Result<Option<String>, RegionLookupError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {
                "name": "lol_get_summoner_profile",
                "arguments": {
                    "game_name": player.game_name,
                    "tag_line": player.tag_line,
                    "region": region.slug(),
                    "desired_output_fields": ["data.summoner"],
                }
            }
        });
        let response = self.client.post(&self.endpoint).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(RegionLookupError::Status(response.status()));
        }
        let body: McpResponse = response.json().await?;
        Ok(body.result.and_then(|result| result.content.into_iter().next()).map(|content| content.text))
    }
}

#[async_trait]
impl RankingSource for OpggClient {
    async fn lookup(&self, region: Region, player: &RiotId) -> Result<Option<RawPlayerData>, RegionLookupError> {
        let text = match self.fetch_profile(region, player).await? {
            Some(text) => text,
            None => return Ok(None),
        };
        let data = parse_profile(&text);
        // An empty profile only counts if it is actually about this player.
        if !data.has_ranks() && !text.to_lowercase().contains(&player.game_name.to_lowercase()) {
            return Ok(None);
        }
        Ok(Some(data))
    }
}

/// Pulls the solo queue rank, its split peak and past season ends out of the
/// profile text.
pub fn parse_profile(text: &str) -> RawPlayerData {
    let text = text.replace(['\n', '\r'], "");

    let current = regex!(r#"LeagueStat\("SOLORANKED",TierInfo\("([A-Z]+)",(\d+),(\d+)"#)
        .captures(&text)
        .and_then(|c| raw_rank(&c[1], &c[2], Some(&c[3])));

    let split_peak = regex!(r#"RankEntrie1\("SOLORANKED",RankInfo\("([A-Z]+)",(\d+)(?:,(\d+))?"#)
        .captures(&text)
        .and_then(|c| raw_rank(&c[1], &c[2], c.get(3).map(|m| m.as_str())));

    let historical = regex!(r#"PreviousSeason\(\d+,TierInfo\d*\("([A-Z]+)",(\d+)(?:,(\d+))?"#)
        .captures_iter(&text)
        .filter_map(|c| raw_rank(&c[1], &c[2], c.get(3).map(|m| m.as_str())))
        .collect();

    RawPlayerData { current, split_peak, historical }
}

fn raw_rank(tier: &str, division: &str, league_points: Option<&str>) -> Option<RawRank> {
    if tier == "UNRANKED" || tier == "NULL" {
        return None;
    }
    // op.gg numbers apex tiers as division 1
    let apex = tier.parse::<Tier>().map_or(false, Tier::is_apex);
    let division = if apex { None } else { Some(division.parse().unwrap_or(u8::MAX)) };
    // absent LP is 0, unparseable LP is left for validation to reject
    let league_points = match league_points {
        Some(lp) => lp.parse().ok(),
        None => Some(0),
    };
    Some(RawRank { tier: tier.to_string(), division, league_points })
}
