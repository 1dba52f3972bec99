// HTTP client for the betting backend.
//
// `BetsApi` is the seam the app orchestrator talks to; `HttpBetsApi` is the
// reqwest implementation used in production. One client is built at start-up
// and shared behind an `Arc`.

use async_trait::async_trait;
use demari_core::bet::{Bet, BetId, DrawResult, NewBet};
use demari_core::config::ApiConfig;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base URL {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

// ---------------------------------------------------------------------------
// BetsApi
// ---------------------------------------------------------------------------

/// Operations the client needs from the betting backend.
#[async_trait]
pub trait BetsApi: Send + Sync {
    /// `GET /bets`: bets registered since the last draw.
    async fn list_bets(&self) -> Result<Vec<Bet>, ApiError>;

    /// `POST /bets`: register a bet, returning the backend-assigned id.
    async fn create_bet(&self, bet: &NewBet) -> Result<BetId, ApiError>;

    /// `POST /numbers-draw`: run the draw.
    async fn draw_numbers(&self) -> Result<DrawResult, ApiError>;
}

/// Body of a successful `POST /bets`.
#[derive(Debug, Deserialize)]
struct CreatedBet {
    #[serde(alias = "idUnico")]
    id: BetId,
}

// ---------------------------------------------------------------------------
// HttpBetsApi
// ---------------------------------------------------------------------------

/// reqwest-backed `BetsApi`.
pub struct HttpBetsApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpBetsApi {
    /// Create a client for the backend rooted at `base_url`.
    ///
    /// A missing trailing slash is added so endpoint paths are joined below
    /// the base path rather than replacing its last segment.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base_url = Url::parse(&normalized).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: e.to_string(),
            })
    }

    /// Send a request and turn transport failures and non-2xx statuses into
    /// `ApiError`s.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        let status = response.status();
        debug!(endpoint, %status, "backend responded");
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl BetsApi for HttpBetsApi {
    async fn list_bets(&self) -> Result<Vec<Bet>, ApiError> {
        const ENDPOINT: &str = "GET /bets";
        let url = self.endpoint("bets")?;
        let response = self.send(self.http.get(url), ENDPOINT).await?;
        let bets: Vec<Bet> = response.json().await.map_err(|e| ApiError::Decode {
            endpoint: ENDPOINT.to_string(),
            source: e,
        })?;
        info!("Fetched {} valid bets", bets.len());
        Ok(bets)
    }

    async fn create_bet(&self, bet: &NewBet) -> Result<BetId, ApiError> {
        const ENDPOINT: &str = "POST /bets";
        let url = self.endpoint("bets")?;
        let response = self.send(self.http.post(url).json(bet), ENDPOINT).await?;
        if response.status() != StatusCode::CREATED {
            debug!(status = %response.status(), "bet accepted without 201 Created");
        }
        let created: CreatedBet = response.json().await.map_err(|e| ApiError::Decode {
            endpoint: ENDPOINT.to_string(),
            source: e,
        })?;
        info!("Bet for {} registered with id {}", bet.bettor_name, created.id);
        Ok(created.id)
    }

    async fn draw_numbers(&self) -> Result<DrawResult, ApiError> {
        const ENDPOINT: &str = "POST /numbers-draw";
        let url = self.endpoint("numbers-draw")?;
        let response = self.send(self.http.post(url), ENDPOINT).await?;
        let draw: DrawResult = response.json().await.map_err(|e| ApiError::Decode {
            endpoint: ENDPOINT.to_string(),
            source: e,
        })?;
        info!(
            "Draw returned {} numbers and {} winners",
            draw.drawn_numbers.len(),
            draw.winners.len()
        );
        Ok(draw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let api = HttpBetsApi::new("https://example.com/api").unwrap();
        assert_eq!(api.base_url().as_str(), "https://example.com/api/");
        assert_eq!(
            api.endpoint("bets").unwrap().as_str(),
            "https://example.com/api/bets"
        );
    }

    #[test]
    fn endpoints_join_under_root() {
        let api = HttpBetsApi::new("https://demari-bets-back.vercel.app/").unwrap();
        assert_eq!(
            api.endpoint("numbers-draw").unwrap().as_str(),
            "https://demari-bets-back.vercel.app/numbers-draw"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        match HttpBetsApi::new("not a url") {
            Err(ApiError::InvalidBaseUrl { url, .. }) => assert_eq!(url, "not a url"),
            Err(other) => panic!("expected InvalidBaseUrl, got: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn created_bet_accepts_legacy_id() {
        let created: CreatedBet = serde_json::from_str(r#"{"idUnico": 9}"#).unwrap();
        assert_eq!(created.id, 9);
        let created: CreatedBet = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(created.id, 42);
    }
}
