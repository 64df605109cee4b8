//! Terminal rendering: ratatui scenes for name entry, the home screen with
//! the leaderboard, and the game itself. World coordinates are scaled to the
//! cell grid here; nothing in this module feeds back into the run loop.

pub mod game_scene;
pub mod home_scene;
pub mod name_entry;
