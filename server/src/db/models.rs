use common::PlayerScoreRow;

/// Row as selected from a game table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ScoreRecord {
    pub id: i32,
    pub name: String,
    pub score: i32,
    pub nickname: Option<String>,
}

impl From<ScoreRecord> for PlayerScoreRow {
    fn from(record: ScoreRecord) -> Self {
        PlayerScoreRow {
            id: record.id,
            name: record.name,
            score: record.score,
            nickname: record.nickname,
        }
    }
}
