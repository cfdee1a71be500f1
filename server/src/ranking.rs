use common::{BoardEntry, RankedRow, full_board, top_n};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::db::store::ScoreStore;
use crate::error::Result;
use crate::registry::GameRegistry;

/// Read-only ranked views over the game tables.
///
/// Each view is ranked from one ordered read, so the three rank numbers of a
/// row always agree with each other.
pub struct RankingEngine {
    pool: PgPool,
    registry: Arc<GameRegistry>,
}

impl RankingEngine {
    pub fn new(pool: PgPool, registry: Arc<GameRegistry>) -> Self {
        Self { pool, registry }
    }

    /// The first `n` rows of a game with dense rank, competition rank and row number.
    pub async fn top_n(&self, game_id: &str, n: usize) -> Result<Vec<RankedRow>> {
        let table = self.registry.resolve_table(game_id)?;
        let mut conn = self.pool.acquire().await?;

        // Ranks of the first n rows depend only on the rows above them
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        let rows = ScoreStore::new(table)
            .rows_by_score(&mut *conn, Some(limit))
            .await?;

        debug!("Ranked top {} of {} ({} rows)", n, game_id, rows.len());
        Ok(top_n(rows, n))
    }

    /// Every row of a game in rank order; zero scores carry no rank.
    pub async fn full_board(&self, game_id: &str) -> Result<Vec<BoardEntry>> {
        let table = self.registry.resolve_table(game_id)?;
        let mut conn = self.pool.acquire().await?;

        let rows = ScoreStore::new(table).rows_by_score(&mut *conn, None).await?;

        debug!("Loaded full board of {} ({} rows)", game_id, rows.len());
        Ok(full_board(rows))
    }
}
