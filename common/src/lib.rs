pub mod api;
mod constants;
mod game;
mod player;
mod ranking;

pub use constants::*;
pub use game::*;
pub use player::*;
pub use ranking::{BoardEntry, RankedRow, full_board, rank_rows, top_n};
