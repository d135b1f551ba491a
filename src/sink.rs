use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use mongodb::{Client, Collection};

use crate::leaderboard::Leaderboard;

/// Write side. Receives only complete leaderboards.
#[async_trait]
pub trait LeaderboardSink: Send + Sync {
    async fn write(&self, leaderboard: &Leaderboard) -> anyhow::Result<()>;
}

/// Stores one document per pass in the `leaderboards` collection.
pub struct MongoSink {
    collection: Collection<bson::Document>,
}

impl MongoSink {
    pub async fn connect(uri: &str, database: &str) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(uri).await.context("connecting to MongoDB")?;
        let collection = client.database(database).collection("leaderboards");
        Ok(MongoSink { collection })
    }
}

#[async_trait]
impl LeaderboardSink for MongoSink {
    async fn write(&self, leaderboard: &Leaderboard) -> anyhow::Result<()> {
        let document = bson::to_document(leaderboard)?;
        let result = self.collection.insert_one(document, None).await?;
        info!("Leaderboard stored as {}.", result.inserted_id);
        Ok(())
    }
}

pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSink { path: path.into() }
    }
}

#[async_trait]
impl LeaderboardSink for JsonFileSink {
    async fn write(&self, leaderboard: &Leaderboard) -> anyhow::Result<()> {
        let file = File::create(&self.path).with_context(|| format!("creating {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, leaderboard)
            .with_context(|| format!("writing {}", self.path.display()))?;
        writer.flush().with_context(|| format!("flushing {}", self.path.display()))?;
        info!("Leaderboard written to {}.", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::ScoreSelector;
    use crate::team::tests::scored;
    use crate::team::ScoredTeam;

    fn leaderboard() -> Leaderboard {
        let players = [3300, 3000, 2800, 2400, 2000, 1600, 0].iter().copied().map(scored).collect();
        let team = ScoredTeam {
            name: "Team".into(),
            tag: "TM".into(),
            logo: String::new(),
            description: String::new(),
            players,
            regular_score: 13500,
            total_score: 15100,
        };
        Leaderboard::rank(vec![team], ScoreSelector::Total)
    }

    #[tokio::test]
    async fn test_json_file_sink() {
        let path = std::env::temp_dir().join(format!("leaderboard-{}.json", std::process::id()));
        JsonFileSink::new(&path).write(&leaderboard()).await.unwrap();

        let written: serde_json::Value = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(written["selector"], "total");
        assert_eq!(written["teams"][0]["total_score"], 15100);
        assert_eq!(written["teams"][0]["players"][0]["score"], 3300);
        assert_eq!(written["teams"][0]["players"][0]["current_rank"]["Ranked"]["tier"], "CHALLENGER");
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_json_file_sink_reports_full_disk() {
        let empty = Leaderboard::rank(vec![], ScoreSelector::Regular);
        assert!(JsonFileSink::new("/dev/full").write(&empty).await.is_err());
    }

    #[test]
    fn test_leaderboard_converts_to_bson() {
        let document = bson::to_document(&leaderboard()).unwrap();
        assert_eq!(document.get_str("selector").unwrap(), "total");
        assert_eq!(document.get_array("teams").unwrap().len(), 1);
    }
}
