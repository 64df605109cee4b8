// World dimensions in world units. The UI scales these to terminal cells;
// all physics and collision math stays in world units.
pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;

// Bird geometry. Horizontal position is fixed for the whole run.
pub const BIRD_SIZE: f64 = 40.0;
pub const BIRD_X: f64 = 100.0;
pub const INITIAL_BIRD_Y: f64 = 200.0;

// Pipe geometry
pub const PIPE_WIDTH: f64 = 60.0;
pub const PIPE_GAP: f64 = 300.0;

// Spawner margins: top segment height is uniform in
// [SPAWN_TOP_MIN, height - PIPE_GAP - SPAWN_BOTTOM_MARGIN]
pub const SPAWN_TOP_MIN: f64 = 50.0;
pub const SPAWN_BOTTOM_MARGIN: f64 = 100.0;

// Physics tick cadence. One tick advances one step of the run loop.
pub const TICK_INTERVAL_MS: u64 = 16;

// Initial difficulty vector (per 16ms tick)
pub const INITIAL_GRAVITY: f64 = 0.15;
pub const INITIAL_JUMP_IMPULSE: f64 = -4.5;
pub const INITIAL_SCROLL_SPEED: f64 = 2.0;
pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 2000;

// Difficulty ramp: applied once every RAMP_SCORE_STEP points
pub const RAMP_SCORE_STEP: u32 = 10;
pub const GRAVITY_INCREMENT: f64 = 0.001;
pub const JUMP_IMPULSE_INCREMENT: f64 = 0.5;
pub const SCROLL_SPEED_INCREMENT: f64 = 0.5;
pub const SPAWN_INTERVAL_DECREMENT_MS: u64 = 200;
pub const MIN_SPAWN_INTERVAL_MS: u64 = 800;

// Leaderboard server defaults
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";
pub const SERVER_URL_ENV: &str = "SKYFLAP_SERVER";
