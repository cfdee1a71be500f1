mod client;
mod format;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use common::{DEFAULT_PAGE_SIZE, DEFAULT_REFRESH_INTERVAL_SECS, PlayerKey};
use tokio::time::{Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::client::{ScoreboardClient, normalize_base_url};

#[derive(Parser, Debug)]
#[command(
    name = "scoreboard-cli",
    about = "Manage members and view leaderboards on a scoreboard server"
)]
struct Args {
    /// Base HTTP URL of the scoreboard server (e.g. http://localhost:5000)
    #[arg(long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List configured games
    Games,
    /// Register a member in every game with score 0
    AddMember {
        name: String,
        #[arg(long)]
        nickname: Option<String>,
    },
    /// Set a player's score in one game
    UpdateScore {
        game: String,
        #[arg(allow_negative_numbers = true)]
        score: i32,
        #[arg(long, conflicts_with = "nickname", required_unless_present = "nickname")]
        name: Option<String>,
        #[arg(long)]
        nickname: Option<String>,
    },
    /// Show the leaderboard of one game
    Board {
        game: String,
        /// Show every player instead of the first page
        #[arg(long)]
        all: bool,
    },
    /// Show the top players of every game
    Top {
        #[arg(long, default_value_t = 3)]
        n: usize,
    },
    /// Keep refreshing the top players of every game
    Watch {
        /// Seconds between refreshes
        #[arg(long, default_value_t = DEFAULT_REFRESH_INTERVAL_SECS)]
        interval: u64,
        #[arg(long, default_value_t = 3)]
        n: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = ScoreboardClient::new(normalize_base_url(&args.url)?);

    run(&client, args.command).await
}

async fn run(client: &ScoreboardClient, command: Command) -> Result<()> {
    match command {
        Command::Games => {
            let games = client.games().await?;
            print!("{}", format::games_table(&games));
        }
        Command::AddMember { name, nickname } => {
            let response = client.add_member(&name, nickname.as_deref()).await?;
            println!("{}", response.message);
            print!("{}", format::member_summary(&response.results));
        }
        Command::UpdateScore {
            game,
            score,
            name,
            nickname,
        } => {
            let key = PlayerKey::from_parts(name.as_deref(), nickname.as_deref())?;
            let response = client.update_score(&game, &key, score).await?;
            println!(
                "{}: {} now has {} in {}",
                response.message, response.updated_player.name, response.updated_player.score, game
            );
        }
        Command::Board { game, all } => {
            let rows = client.board(&game, None).await?;
            let total = rows.len();
            let shown = if all {
                &rows[..]
            } else {
                &rows[..total.min(DEFAULT_PAGE_SIZE)]
            };
            print!("{}", format::board_table(&game, shown, Some(total)));
        }
        Command::Top { n } => {
            for leaders in client.top(n).await? {
                print!("{}", format::leaders_table(&leaders));
            }
        }
        Command::Watch { interval, n } => watch(client, interval, n).await?,
    }
    Ok(())
}

async fn watch(client: &ScoreboardClient, interval_secs: u64, n: usize) -> Result<()> {
    if interval_secs == 0 {
        bail!("--interval must be at least 1 second");
    }

    info!(
        "Watching {} every {}s (Ctrl+C to stop)",
        client.base_url(),
        interval_secs
    );
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match client.top(n).await {
                    Ok(games) => {
                        // Clear screen and home the cursor
                        print!("\x1b[2J\x1b[H");
                        for leaders in &games {
                            print!("{}", format::leaders_table(leaders));
                        }
                    }
                    Err(err) => warn!("Refresh failed: {:#}", err),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopped watching");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        let mut full = vec!["scoreboard-cli"];
        full.extend_from_slice(args);
        Args::try_parse_from(full).map(|a| a.command)
    }

    #[test]
    fn test_update_score_by_name_or_nickname() {
        assert_eq!(
            parse(&["update-score", "game1", "40", "--name", "Alice"]).unwrap(),
            Command::UpdateScore {
                game: "game1".to_string(),
                score: 40,
                name: Some("Alice".to_string()),
                nickname: None,
            }
        );
        assert_eq!(
            parse(&["update-score", "game1", "-5", "--nickname", "ace"]).unwrap(),
            Command::UpdateScore {
                game: "game1".to_string(),
                score: -5,
                name: None,
                nickname: Some("ace".to_string()),
            }
        );
    }

    #[test]
    fn test_update_score_needs_exactly_one_key() {
        assert!(parse(&["update-score", "game1", "40"]).is_err());
        assert!(parse(&["update-score", "game1", "40", "--name", "a", "--nickname", "b"]).is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&["top"]).unwrap(), Command::Top { n: 3 });
        assert_eq!(
            parse(&["watch"]).unwrap(),
            Command::Watch { interval: 5, n: 3 }
        );
        assert_eq!(
            parse(&["board", "game2"]).unwrap(),
            Command::Board {
                game: "game2".to_string(),
                all: false
            }
        );
    }

    #[test]
    fn test_url_flag() {
        let args =
            Args::try_parse_from(["scoreboard-cli", "--url", "scores:8080", "games"]).unwrap();
        assert_eq!(args.url, "scores:8080");
        assert_eq!(args.command, Command::Games);
    }
}
