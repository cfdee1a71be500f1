use common::{Game, GameId};
use std::collections::HashSet;

use crate::error::{ConfigError, Result, ScoreboardError};

/// Handle to one game's score table.
///
/// Only the registry creates these, always from a validated [`GameId`], so the
/// quoted identifier can be placed into SQL text directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTable {
    game: GameId,
    ident: String,
}

impl GameTable {
    fn new(game: GameId) -> Self {
        let ident = format!("\"{}\"", game.as_str());
        Self { game, ident }
    }

    pub fn game(&self) -> &GameId {
        &self.game
    }

    /// Quoted SQL identifier of the table.
    pub fn ident(&self) -> &str {
        &self.ident
    }
}

#[derive(Debug)]
struct Entry {
    game: Game,
    table: GameTable,
}

/// The fixed set of games, loaded once at startup.
#[derive(Debug)]
pub struct GameRegistry {
    entries: Vec<Entry>,
}

impl GameRegistry {
    pub fn new(games: Vec<Game>) -> Result<Self, ConfigError> {
        if games.is_empty() {
            return Err(ConfigError::NoGames);
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(games.len());
        for game in games {
            if !seen.insert(game.id.clone()) {
                return Err(ConfigError::DuplicateGame(game.id));
            }
            let table = GameTable::new(game.id.clone());
            entries.push(Entry { game, table });
        }

        Ok(Self { entries })
    }

    /// Games in configuration order.
    pub fn list_games(&self) -> impl ExactSizeIterator<Item = &Game> {
        self.entries.iter().map(|e| &e.game)
    }

    /// Tables in configuration order.
    pub fn tables(&self) -> impl ExactSizeIterator<Item = &GameTable> {
        self.entries.iter().map(|e| &e.table)
    }

    pub fn resolve_table(&self, game_id: &str) -> Result<&GameTable> {
        self.entries
            .iter()
            .find(|e| e.game.id.as_str() == game_id)
            .map(|e| &e.table)
            .ok_or_else(|| ScoreboardError::GameNotFound {
                game: game_id.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str, name: &str) -> Game {
        Game::new(GameId::parse(id).unwrap(), name)
    }

    #[test]
    fn test_lists_games_in_configuration_order() {
        let registry =
            GameRegistry::new(vec![game("game2", "Darts"), game("game1", "Ring Toss")]).unwrap();
        let ids: Vec<&str> = registry.list_games().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["game2", "game1"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_resolves_known_game_to_quoted_table() {
        let registry = GameRegistry::new(vec![game("game1", "Ring Toss")]).unwrap();
        let table = registry.resolve_table("game1").unwrap();
        assert_eq!(table.ident(), "\"game1\"");
        assert_eq!(table.game().as_str(), "game1");
    }

    #[test]
    fn test_unknown_game_is_not_found() {
        let registry = GameRegistry::new(vec![game("game1", "Ring Toss")]).unwrap();
        for unknown in ["game9", "GAME1", "game1; DROP TABLE game1", ""] {
            match registry.resolve_table(unknown) {
                Err(ScoreboardError::GameNotFound { game }) => assert_eq!(game, unknown),
                other => panic!("expected GameNotFound for {:?}, got {:?}", unknown, other),
            }
        }
    }

    #[test]
    fn test_rejects_empty_and_duplicate_configuration() {
        assert_eq!(GameRegistry::new(Vec::new()).unwrap_err(), ConfigError::NoGames);

        let err = GameRegistry::new(vec![game("game1", "A"), game("game1", "B")]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateGame(GameId::parse("game1").unwrap()));
    }
}
