/// Maximum length of a player name or nickname, matching the VARCHAR(100) columns
pub const MAX_PLAYER_TEXT_LEN: usize = 100;

/// Maximum length of a game identifier (PostgreSQL identifier limit)
pub const MAX_GAME_ID_LEN: usize = 63;

/// Number of leaders shown per game on the award summary
pub const AWARD_PODIUM_SIZE: usize = 3;

/// Default number of rows returned by a top-N query when none is requested
pub const DEFAULT_TOP_N: usize = 10;

/// Rows shown on a leaderboard page before "show all" is requested
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound on a single top-N request
pub const MAX_TOP_N: usize = 1000;

/// Default refresh interval for live ranking views in seconds
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;
