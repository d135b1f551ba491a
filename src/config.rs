use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

use crate::leaderboard::ScoreSelector;
use crate::opgg;
use crate::pipeline::{MissPolicy, PipelineOptions};

#[derive(Debug, Clone)]
pub struct Config {
    pub registrations_path: PathBuf,
    pub opgg_endpoint: String,
    pub selector: ScoreSelector,
    pub pipeline: PipelineOptions,
    pub output: Output,
}

/// Where the finished leaderboard goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Mongo { uri: String, database: String },
    JsonFile(PathBuf),
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        let registrations_path: PathBuf = var("REGISTRATIONS_PATH").context("Missing REGISTRATIONS_PATH")?.into();
        let opgg_endpoint = var("OPGG_MCP_URL").unwrap_or_else(|| opgg::DEFAULT_ENDPOINT.to_string());
        let selector = parse_or(var("SCORE_SELECTOR"), "SCORE_SELECTOR", ScoreSelector::default())?;

        let timeout_secs: u64 = parse_or(var("LOOKUP_TIMEOUT_SECS"), "LOOKUP_TIMEOUT_SECS", 20)?;
        let concurrency: usize = parse_or(var("LOOKUP_CONCURRENCY"), "LOOKUP_CONCURRENCY", 1)?;
        if concurrency == 0 {
            anyhow::bail!("Invalid LOOKUP_CONCURRENCY (must be at least 1)");
        }
        let miss_policy = parse_or(var("MISS_POLICY"), "MISS_POLICY", MissPolicy::default())?;

        let output = match var("MONGODB_URI") {
            Some(uri) => Output::Mongo {
                uri,
                database: var("MONGODB_DATABASE").unwrap_or_else(|| "tournament".to_string()),
            },
            None => Output::JsonFile(var("LEADERBOARD_PATH").unwrap_or_else(|| "leaderboard.json".to_string()).into()),
        };

        Ok(Config {
            registrations_path,
            opgg_endpoint,
            selector,
            pipeline: PipelineOptions {
                lookup_timeout: Duration::from_secs(timeout_secs),
                concurrency,
                miss_policy,
            },
            output,
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(value) => value.parse().map_err(|e| anyhow::anyhow!("Invalid {} {:?}: {}", key, value, e)),
        None => Ok(default),
    }
}
