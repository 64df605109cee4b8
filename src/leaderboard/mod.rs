//! Score-tracking backend: a JSON-file document store, the HTTP server that
//! exposes it, and the ureq client the game uses to talk to it.

pub mod client;
pub mod server;
pub mod store;

pub use client::LeaderboardClient;
pub use store::{ScoreRecord, ScoreStore};
