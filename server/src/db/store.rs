use common::{NewMember, PlayerKey, PlayerScoreRow};
use sqlx::PgConnection;

use super::models::ScoreRecord;
use crate::registry::GameTable;

/// Data access for one game table.
///
/// Every call runs on the connection it is given, so the caller decides the
/// transaction boundary. Table names come from [`GameTable`] only; values are
/// always bound parameters.
#[derive(Debug, Clone, Copy)]
pub struct ScoreStore<'a> {
    table: &'a GameTable,
}

impl<'a> ScoreStore<'a> {
    pub fn new(table: &'a GameTable) -> Self {
        Self { table }
    }

    pub async fn name_exists(&self, conn: &mut PgConnection, name: &str) -> sqlx::Result<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE name = $1)",
            self.table.ident()
        );
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(name)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        member: &NewMember,
    ) -> sqlx::Result<PlayerScoreRow> {
        let sql = format!(
            r#"
            INSERT INTO {} (name, score, nickname)
            VALUES ($1, 0, $2)
            RETURNING id, name, score, nickname
            "#,
            self.table.ident()
        );
        let record = sqlx::query_as::<_, ScoreRecord>(&sql)
            .bind(member.name())
            .bind(member.nickname())
            .fetch_one(&mut *conn)
            .await?;
        Ok(record.into())
    }

    /// Ids of the rows matching `key`, lowest first, locked until the
    /// surrounding transaction ends.
    pub async fn lock_matching(
        &self,
        conn: &mut PgConnection,
        key: &PlayerKey,
    ) -> sqlx::Result<Vec<i32>> {
        let sql = format!(
            "SELECT id FROM {} WHERE {} = $1 ORDER BY id FOR UPDATE",
            self.table.ident(),
            key.column()
        );
        sqlx::query_scalar::<_, i32>(&sql)
            .bind(key.value())
            .fetch_all(&mut *conn)
            .await
    }

    pub async fn set_score(
        &self,
        conn: &mut PgConnection,
        id: i32,
        score: i32,
    ) -> sqlx::Result<PlayerScoreRow> {
        let sql = format!(
            r#"
            UPDATE {}
            SET score = $1
            WHERE id = $2
            RETURNING id, name, score, nickname
            "#,
            self.table.ident()
        );
        let record = sqlx::query_as::<_, ScoreRecord>(&sql)
            .bind(score)
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(record.into())
    }

    /// Rows ordered by score, highest first; equal scores by id.
    pub async fn rows_by_score(
        &self,
        conn: &mut PgConnection,
        limit: Option<i64>,
    ) -> sqlx::Result<Vec<PlayerScoreRow>> {
        let sql = format!(
            r#"
            SELECT id, name, score, nickname
            FROM {}
            ORDER BY score DESC, id ASC
            LIMIT $1
            "#,
            self.table.ident()
        );
        // LIMIT NULL is LIMIT ALL in PostgreSQL
        let records = sqlx::query_as::<_, ScoreRecord>(&sql)
            .bind(limit)
            .fetch_all(&mut *conn)
            .await?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}
