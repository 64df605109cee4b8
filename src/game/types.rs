//! Data structures for a single run: the bird, pipes, and the difficulty
//! vector that the score-triggered ramp replaces wholesale.

use crate::constants::*;
use rand::Rng;

/// The tuning parameters in effect for the current stretch of a run.
///
/// Immutable by convention: the ramp builds a new value with [`RunConfig::ramped`]
/// and the run swaps it in whole, so the animation tick and the spawn timer can
/// never observe a half-updated vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Downward acceleration per tick (world units/tick²).
    pub gravity: f64,
    /// Velocity assigned on flap (negative = upward).
    pub jump_impulse: f64,
    /// Leftward pipe movement per tick.
    pub scroll_speed: f64,
    /// Milliseconds between pipe spawns.
    pub spawn_interval_ms: u64,
}

impl RunConfig {
    pub fn initial() -> Self {
        Self {
            gravity: INITIAL_GRAVITY,
            jump_impulse: INITIAL_JUMP_IMPULSE,
            scroll_speed: INITIAL_SCROLL_SPEED,
            spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
        }
    }

    /// The next difficulty step: faster scroll, heavier gravity, stronger flap,
    /// shorter spawn interval (floored). Returns a new config; `self` is untouched.
    pub fn ramped(&self) -> Self {
        Self {
            gravity: self.gravity + GRAVITY_INCREMENT,
            jump_impulse: self.jump_impulse - JUMP_IMPULSE_INCREMENT,
            scroll_speed: self.scroll_speed + SCROLL_SPEED_INCREMENT,
            spawn_interval_ms: self
                .spawn_interval_ms
                .saturating_sub(SPAWN_INTERVAL_DECREMENT_MS)
                .max(MIN_SPAWN_INTERVAL_MS),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::initial()
    }
}

/// Lifecycle of a run. NotStarted → Running on start, Running → Over on
/// collision, Over → Running on restart. No other transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    NotStarted,
    Running,
    Over,
}

/// The player-controlled entity. Horizontal position and size are fixed
/// (`BIRD_X`, `BIRD_SIZE`); only vertical state changes.
#[derive(Debug, Clone, Copy)]
pub struct Bird {
    /// Vertical position of the top edge (0 = ceiling, grows downward).
    pub y: f64,
    /// Vertical velocity per tick (positive = falling).
    pub velocity: f64,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            y: INITIAL_BIRD_Y,
            velocity: 0.0,
        }
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// A paired obstacle: a top segment and a bottom segment with a fixed gap
/// between them. Destroyed once fully off the left edge.
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Unique, monotonically increasing per run sequence.
    pub id: u64,
    /// Horizontal position of the left edge, decreasing each tick.
    pub x: f64,
    pub top_height: f64,
    pub bottom_height: f64,
    /// Set once when the pipe scrolls past the bird; never re-scored.
    pub passed: bool,
}

/// Full state of one run.
#[derive(Debug, Clone)]
pub struct RunState {
    pub phase: RunPhase,
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub config: RunConfig,
    /// Milliseconds until the next pipe spawns. Restarted whenever the ramp
    /// changes the spawn interval.
    pub spawn_timer_ms: u64,
    /// Playfield size in world units.
    pub width: f64,
    pub height: f64,
    /// Source of pipe ids; survives resets so ids stay unique across runs.
    pub next_pipe_id: u64,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            phase: RunPhase::NotStarted,
            bird: Bird::new(),
            pipes: Vec::new(),
            score: 0,
            config: RunConfig::initial(),
            spawn_timer_ms: INITIAL_SPAWN_INTERVAL_MS,
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            next_pipe_id: 0,
        }
    }

    /// Reset all run state and the difficulty vector to initial constants and
    /// begin the run. Used for both start and restart.
    pub fn start(&mut self) {
        self.phase = RunPhase::Running;
        self.bird = Bird::new();
        self.pipes.clear();
        self.score = 0;
        self.config = RunConfig::initial();
        self.spawn_timer_ms = self.config.spawn_interval_ms;
    }

    /// Spawn a pipe pair at the right edge with a randomized gap placement.
    /// Top height is uniform in [SPAWN_TOP_MIN, height - gap - SPAWN_BOTTOM_MARGIN];
    /// the bottom segment fills the rest so top + gap + bottom = height.
    pub fn spawn_pipe<R: Rng>(&mut self, rng: &mut R) {
        let max_top = self.height - PIPE_GAP - SPAWN_BOTTOM_MARGIN;
        let top_height = if max_top > SPAWN_TOP_MIN {
            rng.gen_range(SPAWN_TOP_MIN..=max_top)
        } else {
            SPAWN_TOP_MIN
        };
        let bottom_height = self.height - top_height - PIPE_GAP;

        let id = self.next_pipe_id;
        self.next_pipe_id += 1;

        self.pipes.push(Pipe {
            id,
            x: self.width,
            top_height,
            bottom_height,
            passed: false,
        });
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_defaults() {
        let run = RunState::new();
        assert_eq!(run.phase, RunPhase::NotStarted);
        assert_eq!(run.score, 0);
        assert!(run.pipes.is_empty());
        assert_eq!(run.config, RunConfig::initial());
        assert_eq!(run.spawn_timer_ms, INITIAL_SPAWN_INTERVAL_MS);
        assert!((run.bird.y - INITIAL_BIRD_Y).abs() < f64::EPSILON);
        assert_eq!(run.bird.velocity, 0.0);
    }

    #[test]
    fn test_ramped_adjusts_every_parameter() {
        let config = RunConfig::initial();
        let next = config.ramped();
        assert!((next.scroll_speed - (config.scroll_speed + SCROLL_SPEED_INCREMENT)).abs() < 1e-9);
        assert!((next.gravity - (config.gravity + GRAVITY_INCREMENT)).abs() < 1e-9);
        assert!(
            (next.jump_impulse - (config.jump_impulse - JUMP_IMPULSE_INCREMENT)).abs() < 1e-9
        );
        assert_eq!(
            next.spawn_interval_ms,
            config.spawn_interval_ms - SPAWN_INTERVAL_DECREMENT_MS
        );
        // Original is untouched
        assert_eq!(config, RunConfig::initial());
    }

    #[test]
    fn test_ramped_floors_spawn_interval() {
        let mut config = RunConfig::initial();
        for _ in 0..20 {
            config = config.ramped();
        }
        assert_eq!(config.spawn_interval_ms, MIN_SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_spawn_pipe_geometry() {
        let mut run = RunState::new();
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            run.spawn_pipe(&mut rng);
        }
        for pipe in &run.pipes {
            assert!((pipe.x - run.width).abs() < f64::EPSILON);
            assert!(!pipe.passed);
            assert!(pipe.top_height >= SPAWN_TOP_MIN);
            assert!(pipe.top_height <= run.height - PIPE_GAP - SPAWN_BOTTOM_MARGIN);
            // Segments plus the gap always fill the playfield exactly
            assert!(
                (pipe.top_height + PIPE_GAP + pipe.bottom_height - run.height).abs() < 1e-9
            );
        }
    }

    #[test]
    fn test_pipe_ids_monotonic_across_resets() {
        let mut run = RunState::new();
        let mut rng = rand::thread_rng();
        run.spawn_pipe(&mut rng);
        run.spawn_pipe(&mut rng);
        assert!(run.pipes[0].id < run.pipes[1].id);

        run.start();
        run.spawn_pipe(&mut rng);
        assert_eq!(run.pipes[0].id, 2);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut run = RunState::new();
        run.score = 37;
        run.bird.y = 550.0;
        run.bird.velocity = 9.0;
        run.config = run.config.ramped();
        run.phase = RunPhase::Over;
        let mut rng = rand::thread_rng();
        run.spawn_pipe(&mut rng);

        run.start();

        assert_eq!(run.phase, RunPhase::Running);
        assert_eq!(run.score, 0);
        assert!(run.pipes.is_empty());
        assert_eq!(run.config, RunConfig::initial());
        assert_eq!(run.spawn_timer_ms, INITIAL_SPAWN_INTERVAL_MS);
        assert!((run.bird.y - INITIAL_BIRD_Y).abs() < f64::EPSILON);
    }
}
