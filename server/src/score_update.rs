use common::{PlayerKey, PlayerScoreRow};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::store::ScoreStore;
use crate::error::{Result, ScoreboardError};
use crate::registry::GameRegistry;

/// Applies a new score to the single row an identifier resolves to.
pub struct ScoreUpdateResolver {
    pool: PgPool,
    registry: Arc<GameRegistry>,
}

impl ScoreUpdateResolver {
    pub fn new(pool: PgPool, registry: Arc<GameRegistry>) -> Self {
        Self { pool, registry }
    }

    /// Set the score of the row matching `key` in `game_id`.
    ///
    /// Only the column named by `key` is searched. When several rows share a
    /// nickname the lowest id wins; no more than one row is ever changed.
    /// Other games are not touched.
    pub async fn update_score(
        &self,
        game_id: &str,
        key: &PlayerKey,
        new_score: i32,
    ) -> Result<PlayerScoreRow> {
        let table = self.registry.resolve_table(game_id)?;
        let store = ScoreStore::new(table);

        // Dropping the transaction on an early return rolls it back
        let mut tx = self.pool.begin().await?;

        let matches = store.lock_matching(&mut *tx, key).await?;
        let Some(&target) = matches.first() else {
            return Err(ScoreboardError::PlayerNotFound {
                game: table.game().clone(),
                key: key.clone(),
            });
        };
        if matches.len() > 1 {
            warn!(
                "{} rows in {} match {}; updating the earliest (id {})",
                matches.len(),
                table.game(),
                key,
                target
            );
        }

        let updated = store.set_score(&mut *tx, target, new_score).await?;
        tx.commit().await?;

        info!(
            "Score of {} in {} set to {}",
            updated.name,
            table.game(),
            updated.score
        );
        Ok(updated)
    }
}
