use async_trait::async_trait;
use common::api::MemberCreated;
use common::{BoardEntry, Game, PlayerKey, PlayerScoreRow, RankedRow};
use sqlx::PgPool;
use std::sync::Arc;

use super::Database;
use crate::error::Result;
use crate::membership::MembershipCoordinator;
use crate::ranking::RankingEngine;
use crate::registry::GameRegistry;
use crate::score_update::ScoreUpdateResolver;

/// PostgreSQL-backed scoreboard with one table per game.
pub struct PgDatabase {
    registry: Arc<GameRegistry>,
    membership: MembershipCoordinator,
    resolver: ScoreUpdateResolver,
    ranking: RankingEngine,
}

impl PgDatabase {
    /// The tables named by `registry` must already exist.
    pub fn new(pool: PgPool, registry: Arc<GameRegistry>) -> Self {
        Self {
            membership: MembershipCoordinator::new(pool.clone(), registry.clone()),
            resolver: ScoreUpdateResolver::new(pool.clone(), registry.clone()),
            ranking: RankingEngine::new(pool, registry.clone()),
            registry,
        }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }
}

#[async_trait]
impl Database for PgDatabase {
    fn games(&self) -> Vec<Game> {
        self.registry.list_games().cloned().collect()
    }

    async fn add_member(&self, name: &str, nickname: Option<&str>) -> Result<Vec<MemberCreated>> {
        self.membership.add_member(name, nickname).await
    }

    async fn update_score(
        &self,
        game_id: &str,
        key: &PlayerKey,
        new_score: i32,
    ) -> Result<PlayerScoreRow> {
        self.resolver.update_score(game_id, key, new_score).await
    }

    async fn top_n(&self, game_id: &str, n: usize) -> Result<Vec<RankedRow>> {
        self.ranking.top_n(game_id, n).await
    }

    async fn full_board(&self, game_id: &str) -> Result<Vec<BoardEntry>> {
        self.ranking.full_board(game_id).await
    }
}
