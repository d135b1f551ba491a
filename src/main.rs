#[macro_use] extern crate log;

use config::{Config, Output};
use opgg::OpggClient;
use pipeline::Pipeline;
use registrations::read_registrations;
use sink::{JsonFileSink, LeaderboardSink, MongoSink};

mod config;
mod error;
mod leaderboard;
mod locator;
mod numeric_league_util;
mod opgg;
mod pipeline;
mod promise_buffer;
mod rank;
mod region;
mod registrations;
mod riot_id;
mod sink;
mod source;
mod team;

#[tokio::main]
async fn main() {
    env_logger::init();

    let result = match Config::from_env() {
        Ok(config) => Main { config }.do_cycle().await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

struct Main {
    config: Config,
}

impl Main {
    async fn do_cycle(&self) -> anyhow::Result<()> {
        info!("Main begin.");
        let registrations = read_registrations(&self.config.registrations_path)?;
        info!("Read {} team registrations from {}.", registrations.len(), self.config.registrations_path.display());

        let source = OpggClient::new(&self.config.opgg_endpoint, self.config.pipeline.lookup_timeout)?;
        let pipeline = Pipeline::new(source, self.config.pipeline.clone());

        let cancel = pipeline.cancel_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping before the next team.");
                cancel.cancel();
            }
        });

        let leaderboard = pipeline.run(registrations, self.config.selector).await?;

        let sink: Box<dyn LeaderboardSink> = match &self.config.output {
            Output::Mongo { uri, database } => Box::new(MongoSink::connect(uri, database).await?),
            Output::JsonFile(path) => Box::new(JsonFileSink::new(path.clone())),
        };
        sink.write(&leaderboard).await?;

        info!("Main Done.");
        Ok(())
    }
}
