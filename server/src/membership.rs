use common::NewMember;
use common::api::MemberCreated;
use sqlx::{PgConnection, PgPool};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::db::store::ScoreStore;
use crate::error::{Result, ScoreboardError};
use crate::registry::GameRegistry;

/// Advisory lock namespace for add-member calls (first key of the two-key form).
const MEMBERSHIP_LOCK_CLASS: i32 = 7301;

/// Registers a member in every game table, or in none of them.
pub struct MembershipCoordinator {
    pool: PgPool,
    registry: Arc<GameRegistry>,
}

impl MembershipCoordinator {
    pub fn new(pool: PgPool, registry: Arc<GameRegistry>) -> Self {
        Self { pool, registry }
    }

    /// Add `name` to every configured game with a score of zero.
    ///
    /// The duplicate check and all inserts share one transaction. Concurrent
    /// calls for the same name are serialised by a transaction-scoped advisory
    /// lock, so exactly one of them can pass the check.
    pub async fn add_member(
        &self,
        name: &str,
        nickname: Option<&str>,
    ) -> Result<Vec<MemberCreated>> {
        let member = NewMember::new(name, nickname)?;

        let mut tx = self.pool.begin().await?;
        match self.register(&mut *tx, &member).await {
            Ok(created) => {
                tx.commit().await?;
                info!(
                    "Member {} added to {} games",
                    member.name(),
                    created.len()
                );
                Ok(created)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(
                        "Failed to roll back add-member for {}: {}",
                        member.name(),
                        rollback_err
                    );
                }
                match &e {
                    ScoreboardError::DuplicateMember { game, .. } => {
                        warn!("Rejected member {}: already in {}", member.name(), game)
                    }
                    other => error!("Add-member for {} rolled back: {}", member.name(), other),
                }
                Err(e)
            }
        }
    }

    async fn register(
        &self,
        conn: &mut PgConnection,
        member: &NewMember,
    ) -> Result<Vec<MemberCreated>> {
        // Statements after the lock see anything a competing call committed
        sqlx::query("SELECT pg_advisory_xact_lock($1, hashtext($2))")
            .bind(MEMBERSHIP_LOCK_CLASS)
            .bind(member.name())
            .execute(&mut *conn)
            .await?;

        for table in self.registry.tables() {
            if ScoreStore::new(table).name_exists(conn, member.name()).await? {
                return Err(ScoreboardError::DuplicateMember {
                    name: member.name().to_string(),
                    game: table.game().clone(),
                });
            }
        }

        let mut created = Vec::with_capacity(self.registry.len());
        for table in self.registry.tables() {
            let player = match ScoreStore::new(table).insert(conn, member).await {
                Ok(player) => player,
                Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                    return Err(ScoreboardError::DuplicateMember {
                        name: member.name().to_string(),
                        game: table.game().clone(),
                    });
                }
                Err(e) => return Err(e.into()),
            };
            created.push(MemberCreated {
                game: table.game().clone(),
                player,
            });
        }

        Ok(created)
    }
}
