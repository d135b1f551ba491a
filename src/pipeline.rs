use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::FutureExt;

use crate::error::ResolveError;
use crate::leaderboard::{Leaderboard, ScoreSelector};
use crate::locator::{locate, Located};
use crate::numeric_league_util::team_avg_rank_str;
use crate::promise_buffer::promise_buffer;
use crate::riot_id::{RiotId, RiotIdError};
use crate::source::RankingSource;
use crate::team::{PlayerRecord, PlayerSlot, ScoredPlayer, ScoredTeam, TeamRegistration};

/// What a player nobody can find does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissPolicy {
    /// Score the player as unranked and keep going.
    Unranked,
    /// Fail the whole pass.
    Abort,
}

impl Default for MissPolicy {
    fn default() -> Self {
        MissPolicy::Unranked
    }
}

impl FromStr for MissPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unranked" => Ok(MissPolicy::Unranked),
            "abort" => Ok(MissPolicy::Abort),
            _ => anyhow::bail!("unknown miss policy {:?}, expected \"unranked\" or \"abort\"", s),
        }
    }
}

impl fmt::Display for MissPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissPolicy::Unranked => "unranked",
            MissPolicy::Abort => "abort",
        })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Per region lookup.
    pub lookup_timeout: Duration,
    /// Player lookups in flight at once within a team.
    pub concurrency: usize,
    pub miss_policy: MissPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions { lookup_timeout: Duration::from_secs(20), concurrency: 1, miss_policy: MissPolicy::Unranked }
    }
}

/// Stops a running pass before its next team.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Pipeline<S> {
    source: S,
    options: PipelineOptions,
    cancel: CancelHandle,
}

impl<S: RankingSource> Pipeline<S> {
    pub fn new(source: S, options: PipelineOptions) -> Self {
        Pipeline { source, options, cancel: CancelHandle::default() }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// One full resolution pass. Either every team is scored or nothing is
    /// returned.
    pub async fn run(
        &self,
        registrations: Vec<TeamRegistration>,
        selector: ScoreSelector,
    ) -> Result<Leaderboard, ResolveError> {
        info!(
            "Resolution pass begin: {} teams, miss policy {}.",
            registrations.len(),
            self.options.miss_policy
        );
        for team in &registrations {
            team.check_roster()?;
        }

        let mut scored = Vec::with_capacity(registrations.len());
        for team in registrations {
            if self.cancel.is_cancelled() {
                return Err(ResolveError::Cancelled(team.name));
            }
            let team = self.score_team(team).await?;
            let ranks: Vec<_> = team.players.iter().map(|player| player.record.current_rank).collect();
            info!(
                "{} [{}]: regular {} total {} avg {}",
                team.name,
                team.tag,
                team.regular_score,
                team.total_score,
                team_avg_rank_str(&ranks)
            );
            scored.push(team);
        }

        let leaderboard = Leaderboard::rank(scored, selector);
        info!("Resolution pass done, ranked by {} score.", selector);
        Ok(leaderboard)
    }

    async fn score_team(&self, team: TeamRegistration) -> Result<ScoredTeam, ResolveError> {
        debug!("Scoring {}.", team.name);
        let q: VecDeque<_> = team
            .players
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, slot)| async move { (index, self.resolve_player(slot).await) }.boxed_local())
            .collect();

        let mut resolved: Vec<Option<Result<ScoredPlayer, ResolveError>>> = (0..q.len()).map(|_| None).collect();
        promise_buffer(q, self.options.concurrency, |(index, result)| resolved[index] = Some(result)).await;

        let players = resolved.into_iter().flatten().collect::<Result<Vec<_>, _>>()?;
        ScoredTeam::new(team, players)
    }

    async fn resolve_player(&self, slot: PlayerSlot) -> Result<ScoredPlayer, ResolveError> {
        let player = match RiotId::parse(&slot.main_account) {
            Ok(player) => player,
            Err(RiotIdError::Empty) => return Ok(PlayerRecord::unranked(slot).score()),
            Err(e) => {
                warn!("{}", e);
                let missing = ResolveError::PlayerNotFound { player: slot.main_account.clone(), failed_regions: 0 };
                return self.missed(slot, missing);
            }
        };

        match locate(&self.source, &player, self.options.lookup_timeout).await {
            Ok(Located { region, data }) => {
                let observations = data.validate().map_err(|e| match e {
                    ResolveError::InvalidRankData(msg) => {
                        ResolveError::InvalidRankData(format!("{} in {}: {}", player, region, msg))
                    }
                    other => other,
                })?;
                let scored = PlayerRecord::resolved(slot, &player, region, observations).score();
                debug!(
                    "{} ({}): {} | Peak: {} ({})",
                    player,
                    region,
                    scored.record.current_rank,
                    scored.record.peak_rank,
                    scored.peak_score()
                );
                Ok(scored)
            }
            Err(e) => self.missed(slot, e),
        }
    }

    fn missed(&self, slot: PlayerSlot, e: ResolveError) -> Result<ScoredPlayer, ResolveError> {
        match (self.options.miss_policy, e) {
            (MissPolicy::Unranked, ResolveError::PlayerNotFound { player, failed_regions }) => {
                warn!("{} not found ({} region lookups failed), scoring as unranked.", player, failed_regions);
                Ok(PlayerRecord::unranked(slot).score())
            }
            (_, e) => Err(e),
        }
    }
}
