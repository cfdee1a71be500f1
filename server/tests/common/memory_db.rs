use async_trait::async_trait;
use ::common::api::MemberCreated;
use ::common::{
    BoardEntry, Game, GameId, NewMember, PlayerKey, PlayerScoreRow, RankedRow, full_board, top_n,
};
use server::db::Database;
use server::error::{Result, ScoreboardError};
use server::registry::GameRegistry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// In-process stand-in for the PostgreSQL scoreboard, used to drive the HTTP layer.
pub struct MemoryDatabase {
    registry: GameRegistry,
    tables: Mutex<HashMap<GameId, Vec<PlayerScoreRow>>>,
    next_id: Mutex<i32>,
    unavailable: AtomicBool,
}

impl MemoryDatabase {
    pub fn with_games(ids: &[(&str, &str)]) -> Self {
        let games = ids
            .iter()
            .map(|(id, name)| Game::new(GameId::parse(id).unwrap(), *name))
            .collect();
        let registry = GameRegistry::new(games).unwrap();
        let tables = registry
            .tables()
            .map(|t| (t.game().clone(), Vec::new()))
            .collect();
        Self {
            registry,
            tables: Mutex::new(tables),
            next_id: Mutex::new(1),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every following call fail as if the store went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn rows(&self, game: &str) -> Vec<PlayerScoreRow> {
        let tables = self.tables.lock().await;
        tables
            .iter()
            .find(|(id, _)| id.as_str() == game)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ScoreboardError::StoreUnavailable(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    fn games(&self) -> Vec<Game> {
        self.registry.list_games().cloned().collect()
    }

    async fn add_member(&self, name: &str, nickname: Option<&str>) -> Result<Vec<MemberCreated>> {
        let member = NewMember::new(name, nickname)?;
        self.check_available()?;

        let mut tables = self.tables.lock().await;
        for table in self.registry.tables() {
            if tables[table.game()].iter().any(|r| r.name == member.name()) {
                return Err(ScoreboardError::DuplicateMember {
                    name: member.name().to_string(),
                    game: table.game().clone(),
                });
            }
        }

        let mut next_id = self.next_id.lock().await;
        let mut created = Vec::new();
        for table in self.registry.tables() {
            let player = PlayerScoreRow {
                id: *next_id,
                name: member.name().to_string(),
                score: 0,
                nickname: member.nickname().map(str::to_string),
            };
            *next_id += 1;
            tables.get_mut(table.game()).unwrap().push(player.clone());
            created.push(MemberCreated {
                game: table.game().clone(),
                player,
            });
        }
        Ok(created)
    }

    async fn update_score(
        &self,
        game_id: &str,
        key: &PlayerKey,
        new_score: i32,
    ) -> Result<PlayerScoreRow> {
        let table = self.registry.resolve_table(game_id)?;
        self.check_available()?;

        let mut tables = self.tables.lock().await;
        let rows = tables.get_mut(table.game()).unwrap();
        let target = rows
            .iter_mut()
            .filter(|r| match key {
                PlayerKey::ByName(name) => &r.name == name,
                PlayerKey::ByNickname(nick) => r.nickname.as_deref() == Some(nick.as_str()),
            })
            .min_by_key(|r| r.id)
            .ok_or_else(|| ScoreboardError::PlayerNotFound {
                game: table.game().clone(),
                key: key.clone(),
            })?;
        target.score = new_score;
        Ok(target.clone())
    }

    async fn top_n(&self, game_id: &str, n: usize) -> Result<Vec<RankedRow>> {
        let table = self.registry.resolve_table(game_id)?;
        self.check_available()?;
        let mut rows = self.tables.lock().await[table.game()].clone();
        rows.sort_by_key(|r| r.id);
        Ok(top_n(rows, n))
    }

    async fn full_board(&self, game_id: &str) -> Result<Vec<BoardEntry>> {
        let table = self.registry.resolve_table(game_id)?;
        self.check_available()?;
        let mut rows = self.tables.lock().await[table.game()].clone();
        rows.sort_by_key(|r| r.id);
        Ok(full_board(rows))
    }
}
