use common::api::{GameLeaders, MemberCreated};
use common::{BoardEntry, Game, PlayerScoreRow};
use std::fmt::Write;

const UNRANKED: &str = "-";

fn nickname(player: &PlayerScoreRow) -> &str {
    player.nickname.as_deref().unwrap_or("")
}

pub fn games_table(games: &[Game]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} NAME", "ID");
    for game in games {
        let _ = writeln!(out, "{:<20} {}", game.id, game.display_name);
    }
    out
}

/// Whole board, unranked rows shown as `-`
pub fn board_table(game: &str, rows: &[BoardEntry], total: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", game);
    let _ = writeln!(out, "{:>5}  {:<24} {:>8}  NICKNAME", "RANK", "NAME", "SCORE");
    for entry in rows {
        let rank = entry
            .rank
            .map_or_else(|| UNRANKED.to_string(), |r| r.to_string());
        let _ = writeln!(
            out,
            "{:>5}  {:<24} {:>8}  {}",
            rank,
            entry.player.name,
            entry.player.score,
            nickname(&entry.player)
        );
    }
    if let Some(total) = total.filter(|t| *t > rows.len()) {
        let _ = writeln!(out, "({} of {} players, use --all to see everyone)", rows.len(), total);
    }
    out
}

pub fn leaders_table(leaders: &GameLeaders) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ({}) ==", leaders.game.display_name, leaders.game.id);
    if leaders.leaders.is_empty() {
        let _ = writeln!(out, "no players yet");
        return out;
    }
    let _ = writeln!(
        out,
        "{:>5} {:>5} {:>5}  {:<24} {:>8}",
        "DENSE", "RANK", "ROW", "NAME", "SCORE"
    );
    for row in &leaders.leaders {
        let _ = writeln!(
            out,
            "{:>5} {:>5} {:>5}  {:<24} {:>8}",
            row.dense_rank, row.competition_rank, row.row_number, row.player.name, row.player.score
        );
    }
    out
}

pub fn member_summary(results: &[MemberCreated]) -> String {
    let mut out = String::new();
    for created in results {
        let _ = writeln!(
            out,
            "{:<20} id={} name={} nickname={}",
            created.game,
            created.player.id,
            created.player.name,
            nickname(&created.player)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{GameId, RankedRow};

    fn player(id: i32, name: &str, score: i32) -> PlayerScoreRow {
        PlayerScoreRow {
            id,
            name: name.to_string(),
            score,
            nickname: None,
        }
    }

    #[test]
    fn test_board_prints_dash_for_unranked() {
        let rows = vec![
            BoardEntry {
                rank: Some(1),
                player: player(1, "Alice", 10),
            },
            BoardEntry {
                rank: None,
                player: player(2, "Bob", 0),
            },
        ];
        let text = board_table("game1", &rows, None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].trim_start().starts_with("1  Alice"));
        assert!(lines[3].trim_start().starts_with("-  Bob"));
    }

    #[test]
    fn test_board_notes_truncation() {
        let rows = vec![BoardEntry {
            rank: Some(1),
            player: player(1, "Alice", 10),
        }];
        assert!(board_table("game1", &rows, Some(12)).contains("1 of 12 players"));
        assert!(!board_table("game1", &rows, Some(1)).contains("players"));
    }

    #[test]
    fn test_leaders_show_every_rank_column() {
        let leaders = GameLeaders {
            game: Game::new(GameId::parse("darts").unwrap(), "Darts"),
            leaders: vec![RankedRow {
                dense_rank: 1,
                competition_rank: 1,
                row_number: 2,
                player: player(7, "Cara", 55),
            }],
        };
        let text = leaders_table(&leaders);
        assert!(text.starts_with("== Darts (darts) =="));
        let last = text.lines().last().unwrap();
        let cols: Vec<&str> = last.split_whitespace().collect();
        assert_eq!(cols, vec!["1", "1", "2", "Cara", "55"]);
    }

    #[test]
    fn test_empty_leaders() {
        let leaders = GameLeaders {
            game: Game::new(GameId::parse("darts").unwrap(), "Darts"),
            leaders: Vec::new(),
        };
        assert!(leaders_table(&leaders).contains("no players yet"));
    }
}
