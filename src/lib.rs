//! Skyflap - Terminal Flappy-Bird Arcade Game
//!
//! Exposes the run loop and leaderboard backend for testing and external use.

pub mod build_info;
pub mod constants;
pub mod game;
pub mod leaderboard;
pub mod persistence;
pub mod profile;
pub mod ui;
