use serde::{Deserialize, Serialize};

use crate::player::PlayerScoreRow;

/// A row with all three rank flavours computed over the same ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedRow {
    /// Ties share a rank; the next distinct score is exactly one lower.
    pub dense_rank: u32,
    /// Ties share a rank and consume the positions after them (1, 1, 3).
    #[serde(rename = "rank")]
    pub competition_rank: u32,
    /// Strict 1..K position.
    pub row_number: u32,
    #[serde(flatten)]
    pub player: PlayerScoreRow,
}

/// A row as shown on the whole leaderboard.
///
/// `rank` is `None` for players whose score is exactly zero: they have a row
/// but have not scored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub rank: Option<u32>,
    #[serde(flatten)]
    pub player: PlayerScoreRow,
}

/// Sorts rows by score (highest first) and assigns dense rank, competition
/// rank and row number in a single pass.
///
/// The sort is stable, so rows with equal scores keep the order they were
/// given in.
pub fn rank_rows(mut rows: Vec<PlayerScoreRow>) -> Vec<RankedRow> {
    rows.sort_by(|a, b| b.score.cmp(&a.score));

    let mut ranked = Vec::with_capacity(rows.len());
    let mut previous_score: Option<i32> = None;
    let mut dense_rank = 0u32;
    let mut competition_rank = 0u32;

    for (idx, player) in rows.into_iter().enumerate() {
        let row_number = idx as u32 + 1;
        if previous_score != Some(player.score) {
            dense_rank += 1;
            competition_rank = row_number;
            previous_score = Some(player.score);
        }
        ranked.push(RankedRow {
            dense_rank,
            competition_rank,
            row_number,
            player,
        });
    }

    ranked
}

/// The first `n` ranked rows. Boards shorter than `n` are returned whole.
pub fn top_n(rows: Vec<PlayerScoreRow>, n: usize) -> Vec<RankedRow> {
    let mut ranked = rank_rows(rows);
    ranked.truncate(n);
    ranked
}

/// The whole leaderboard in display order.
pub fn full_board(rows: Vec<PlayerScoreRow>) -> Vec<BoardEntry> {
    rank_rows(rows)
        .into_iter()
        .map(|ranked| BoardEntry {
            rank: (ranked.player.score != 0).then_some(ranked.row_number),
            player: ranked.player,
        })
        .collect()
}
