//! Local player identity, the cookie analog of the browser version.
//!
//! The id/name pair gates the game screen and attributes score submissions.
//! Stored as JSON under ~/.skyflap/; logout deletes the file.

use crate::persistence;
use serde::{Deserialize, Serialize};
use std::io;

pub const PROFILE_FILE: &str = "profile.json";

/// Registered player identity. The id comes from the leaderboard server's
/// `POST /addPlayer` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
}

pub fn load() -> Option<PlayerProfile> {
    persistence::load_json(PROFILE_FILE)
}

pub fn save(profile: &PlayerProfile) -> io::Result<()> {
    persistence::save_json(PROFILE_FILE, profile)
}

/// Logout: forget the stored identity.
pub fn clear() -> io::Result<()> {
    persistence::remove(PROFILE_FILE)
}
