pub mod models;
pub mod postgres;
pub mod store;

use async_trait::async_trait;
use common::api::MemberCreated;
use common::{BoardEntry, Game, PlayerKey, PlayerScoreRow, RankedRow};

use crate::error::Result;

pub use postgres::PgDatabase;

#[async_trait]
pub trait Database: Send + Sync {
    // Game registry
    fn games(&self) -> Vec<Game>;

    // Membership
    async fn add_member(&self, name: &str, nickname: Option<&str>) -> Result<Vec<MemberCreated>>;

    // Score updates
    async fn update_score(
        &self,
        game_id: &str,
        key: &PlayerKey,
        new_score: i32,
    ) -> Result<PlayerScoreRow>;

    // Leaderboards
    async fn top_n(&self, game_id: &str, n: usize) -> Result<Vec<RankedRow>>;
    async fn full_board(&self, game_id: &str) -> Result<Vec<BoardEntry>>;
}
