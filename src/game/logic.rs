//! The authoritative step function for a run.
//!
//! One call to [`tick`] advances exactly one physics tick: gravity, the spawn
//! timer, pipe scrolling and culling, scoring, the difficulty ramp, and
//! collision detection, in that order. Input is applied separately through
//! [`apply_input`] so the loop itself stays a pure function of state.

use super::types::{RunPhase, RunState};
use crate::constants::*;
use rand::Rng;

/// Player actions, already reduced to game terms by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunInput {
    /// Apply the jump impulse.
    Flap,
    /// Begin a run from the NotStarted phase.
    Start,
    /// Begin a fresh run from the Over phase.
    Restart,
}

/// An axis-aligned box in world units.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Strict AABB overlap test: both axes' intervals must overlap strictly, so
/// rectangles touching edge-to-edge do not collide.
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Apply a single input action. Flap only has effect while Running;
/// Start/Restart only fire from their respective phases.
pub fn apply_input(run: &mut RunState, input: RunInput) {
    match input {
        RunInput::Flap => {
            if run.phase == RunPhase::Running {
                run.bird.velocity = run.config.jump_impulse;
            }
        }
        RunInput::Start => {
            if run.phase == RunPhase::NotStarted {
                run.start();
            }
        }
        RunInput::Restart => {
            if run.phase == RunPhase::Over {
                run.start();
            }
        }
    }
}

/// Advance the run by one tick. No-op unless Running.
pub fn tick<R: Rng>(run: &mut RunState, rng: &mut R) {
    if run.phase != RunPhase::Running {
        return;
    }

    // Physics: accumulate gravity into velocity, integrate position.
    // Ceiling contact clamps and kills upward velocity; it is not lethal.
    run.bird.velocity += run.config.gravity;
    run.bird.y += run.bird.velocity;
    if run.bird.y < 0.0 {
        run.bird.y = 0.0;
        run.bird.velocity = 0.0;
    }

    // Spawn timer: counts down in wall-clock milliseconds, fires a pipe at
    // the right edge, then rearms with the configured interval.
    if run.spawn_timer_ms <= TICK_INTERVAL_MS {
        run.spawn_pipe(rng);
        run.spawn_timer_ms = run.config.spawn_interval_ms;
    } else {
        run.spawn_timer_ms -= TICK_INTERVAL_MS;
    }

    // Scroll pipes left and drop the ones fully off-screen
    for pipe in &mut run.pipes {
        pipe.x -= run.config.scroll_speed;
    }
    run.pipes.retain(|p| p.x > -PIPE_WIDTH);

    // Scoring: a pipe scores exactly once, the first tick its x drops below
    // the bird's fixed column. Every multiple-of-RAMP_SCORE_STEP crossing
    // swaps in the next difficulty vector and restarts the spawn timer.
    for pipe in &mut run.pipes {
        if !pipe.passed && pipe.x < BIRD_X {
            pipe.passed = true;
            run.score += 1;
            if run.score % RAMP_SCORE_STEP == 0 {
                run.config = run.config.ramped();
                run.spawn_timer_ms = run.config.spawn_interval_ms;
            }
        }
    }

    // Collision ends the run; final, no grace period
    if check_collision(run) {
        run.phase = RunPhase::Over;
    }
}

/// Terminal-collision predicate: floor contact, or strict AABB overlap with
/// any pipe segment. The ceiling is handled by the physics clamp above.
pub fn check_collision(run: &RunState) -> bool {
    if run.bird.y > run.height - BIRD_SIZE {
        return true;
    }

    let bird = Aabb {
        x: BIRD_X,
        y: run.bird.y,
        w: BIRD_SIZE,
        h: BIRD_SIZE,
    };

    for pipe in &run.pipes {
        let top = Aabb {
            x: pipe.x,
            y: 0.0,
            w: PIPE_WIDTH,
            h: pipe.top_height,
        };
        let bottom = Aabb {
            x: pipe.x,
            y: pipe.top_height + PIPE_GAP,
            w: PIPE_WIDTH,
            h: pipe.bottom_height,
        };
        if aabb_overlap(&bird, &top) || aabb_overlap(&bird, &bottom) {
            return true;
        }
    }

    false
}
