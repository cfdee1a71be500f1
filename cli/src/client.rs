use anyhow::{Context, Result, anyhow};
use common::api::{
    AddMemberRequest, AddMemberResponse, ErrorResponse, GameLeaders, SearchRequest, TopResponse,
    UpdateScoreRequest, UpdateScoreResponse,
};
use common::{BoardEntry, Game, PlayerKey};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Thin HTTP client for the scoreboard API
#[derive(Clone)]
pub struct ScoreboardClient {
    http: Client,
    base_url: Url,
}

impl ScoreboardClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Failed to build URL for {path}"))
    }

    pub async fn games(&self) -> Result<Vec<Game>> {
        let endpoint = self.endpoint("/api/games")?;
        debug!("GET {}", endpoint);
        let response = self
            .http
            .get(endpoint)
            .send()
            .await
            .context("Failed to fetch games")?;
        decode(response).await
    }

    pub async fn add_member(&self, name: &str, nickname: Option<&str>) -> Result<AddMemberResponse> {
        let endpoint = self.endpoint("/api/players/add-member")?;
        debug!("POST {}", endpoint);
        let response = self
            .http
            .post(endpoint)
            .json(&AddMemberRequest {
                name: name.to_string(),
                nickname: nickname.map(str::to_string),
            })
            .send()
            .await
            .context("Failed to send add-member request")?;
        decode(response).await
    }

    pub async fn update_score(
        &self,
        game: &str,
        key: &PlayerKey,
        new_score: i32,
    ) -> Result<UpdateScoreResponse> {
        let (player_name, nickname) = match key {
            PlayerKey::ByName(name) => (Some(name.clone()), None),
            PlayerKey::ByNickname(nickname) => (None, Some(nickname.clone())),
        };
        let endpoint = self.endpoint("/api/players/update-score")?;
        debug!("PUT {}", endpoint);
        let response = self
            .http
            .put(endpoint)
            .json(&UpdateScoreRequest {
                game_name: game.to_string(),
                player_name,
                nickname,
                new_score,
            })
            .send()
            .await
            .context("Failed to send update-score request")?;
        decode(response).await
    }

    pub async fn board(&self, game: &str, limit: Option<usize>) -> Result<Vec<BoardEntry>> {
        let endpoint = self.endpoint("/api/players/search")?;
        debug!("POST {}", endpoint);
        let response = self
            .http
            .post(endpoint)
            .json(&SearchRequest {
                game_name: game.to_string(),
                limit,
            })
            .send()
            .await
            .context("Failed to fetch leaderboard")?;
        decode(response).await
    }

    /// Podium of every game, or the top `n` of every game when `n` is not 3
    pub async fn top(&self, n: usize) -> Result<Vec<GameLeaders>> {
        if n == common::AWARD_PODIUM_SIZE {
            let endpoint = self.endpoint("/api/players/top3")?;
            debug!("GET {}", endpoint);
            let response = self
                .http
                .get(endpoint)
                .send()
                .await
                .context("Failed to fetch podiums")?;
            let top: TopResponse = decode(response).await?;
            return Ok(top.games);
        }

        let mut games = Vec::new();
        for game in self.games().await? {
            games.push(self.top_for_game(game.id.as_str(), n).await?);
        }
        Ok(games)
    }

    pub async fn top_for_game(&self, game: &str, n: usize) -> Result<GameLeaders> {
        let mut endpoint = self.endpoint(&format!("/api/players/top/{game}"))?;
        endpoint.query_pairs_mut().append_pair("n", &n.to_string());
        debug!("GET {}", endpoint);
        let response = self
            .http
            .get(endpoint)
            .send()
            .await
            .with_context(|| format!("Failed to fetch top of {game}"))?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => err.error,
            Err(_) => body,
        };
        return Err(anyhow!("Request failed with status {}: {}", status, message));
    }

    response
        .json::<T>()
        .await
        .context("Failed to parse response")
}

/// Accept `host:port` as well as full URLs
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .ok()
        .filter(|url| url.has_host())
        .map_or_else(|| Url::parse(&format!("http://{raw}")), Ok)
        .context("Invalid base URL")?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("Unsupported URL scheme: {other}")),
    }
}
