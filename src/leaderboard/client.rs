//! HTTP client for the leaderboard endpoints.
//!
//! Every call returns an explicit `Result` so a failed submission is an
//! observable value the UI can surface, not a swallowed side effect.

use crate::constants::{DEFAULT_SERVER_URL, SERVER_URL_ENV};
use crate::leaderboard::store::ScoreRecord;
use serde::Deserialize;
use serde_json::json;
use std::error::Error;

/// Envelope the mutation endpoints wrap their payload in.
#[derive(Deserialize)]
struct ApiEnvelope {
    data: ScoreRecord,
}

#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    base_url: String,
}

impl LeaderboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Server URL from `SKYFLAP_SERVER`, falling back to localhost.
    pub fn from_env() -> Self {
        let url =
            std::env::var(SERVER_URL_ENV).unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self::new(url)
    }

    /// Register a player name, returning the created record (id included).
    pub fn add_player(&self, name: &str) -> Result<ScoreRecord, Box<dyn Error>> {
        let envelope: ApiEnvelope = ureq::post(&format!("{}/addPlayer", self.base_url))
            .send_json(json!({ "name": name.trim() }))?
            .into_json()?;
        Ok(envelope.data)
    }

    /// Submit a run's final score for the given player id.
    pub fn submit_score(&self, id: &str, score: u32) -> Result<ScoreRecord, Box<dyn Error>> {
        let envelope: ApiEnvelope = ureq::post(&format!("{}/addScore", self.base_url))
            .send_json(json!({ "id": id, "currScore": score }))?
            .into_json()?;
        Ok(envelope.data)
    }

    /// Fetch the full leaderboard, highest score first.
    pub fn fetch_scores(&self) -> Result<Vec<ScoreRecord>, Box<dyn Error>> {
        let scores: Vec<ScoreRecord> = ureq::get(&format!("{}/getScore", self.base_url))
            .call()?
            .into_json()?;
        Ok(scores)
    }
}
