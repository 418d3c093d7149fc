//! Motion Lab - kinematics lesson demos and an obstacle-course quiz game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics model, game state, collisions)
//! - `renderer`: Canvas 2D scene painting (wasm32 only)
//! - `settings`: Tunable demo parameters, persisted to LocalStorage
//! - `progress`: Progress/XP reporting boundary and best-score table

pub mod progress;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use progress::{BestScores, ProgressSink};
pub use settings::Settings;

/// Tuning constants
pub mod consts {
    /// Render surface dimensions (CSS pixels)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 400.0;

    // === Lesson demos ===

    /// Gravitational acceleration for the demos (units/s²)
    pub const GRAVITY: f32 = 9.8;
    /// Presentation scale converting simulated units·s into pixels.
    /// One constant for all three demos; visual speed only, not physics.
    pub const RENDER_SCALE: f32 = 6.0;
    /// Ground line of the demo scene (render-space y)
    pub const DEMO_GROUND_Y: f32 = 340.0;
    /// Free-fall release point
    pub const FREE_FALL_X: f32 = 400.0;
    pub const FREE_FALL_START_Y: f32 = 60.0;
    /// Projectile launch point (on the ground, left side)
    pub const PROJECTILE_START_X: f32 = 60.0;
    pub const PROJECTILE_START_Y: f32 = DEMO_GROUND_Y;
    /// Uniform-motion track height
    pub const UNIFORM_Y: f32 = 300.0;

    /// Simulated seconds added per demo time step
    pub const DEMO_TIME_STEP: f32 = 0.05;
    /// Minimum wall-clock gap between time steps (ms). The loop redraws
    /// every frame but only advances time once this gate opens, so the
    /// demo speed is independent of display refresh rate.
    pub const DEMO_ADVANCE_INTERVAL_MS: f64 = 100.0;
    /// Progress reward for watching a demo through to landing
    pub const LESSON_REWARD: u32 = 20;

    /// Slider ranges for the projectile parameters
    pub const ANGLE_MIN_DEGREES: f32 = 10.0;
    pub const ANGLE_MAX_DEGREES: f32 = 80.0;
    pub const LAUNCH_SPEED_MIN: f32 = 10.0;
    pub const LAUNCH_SPEED_MAX: f32 = 100.0;

    // === Obstacle course ===

    /// Vertical acceleration per tick (px/tick²)
    pub const RUN_GRAVITY: f32 = 0.8;
    /// Jump impulse (negative = upward)
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// Ground line the player's feet rest on
    pub const RUN_GROUND_Y: f32 = 300.0;

    /// Number of discrete lanes
    pub const LANE_COUNT: u8 = 3;
    /// Player's fixed horizontal slot
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Obstacles enter at the far right edge, never near the player slot
    pub const SPAWN_X: f32 = 800.0;
    /// Obstacles are dropped once fully past the viewport exit
    pub const DESPAWN_X: f32 = -50.0;
    pub const OBSTACLE_WIDTH: f32 = 30.0;
    pub const BARRIER_HEIGHT: f32 = 60.0;
    pub const LOW_BARRIER_HEIGHT: f32 = 30.0;
    pub const HIGH_BARRIER_HEIGHT: f32 = 90.0;

    /// Per-tick spawn probability
    pub const SPAWN_CHANCE: f32 = 0.03;
    /// Chance of a second spawn in the same tick (only while sparse)
    pub const SECOND_SPAWN_CHANCE: f32 = 0.01;
    pub const SECOND_SPAWN_MAX: usize = 3;
    /// Hard cap on live obstacles
    pub const MAX_LIVE_OBSTACLES: usize = 8;

    /// Scroll speed at run start (px/tick)
    pub const START_SPEED: f32 = 2.0;
    /// Speed ramp: +SPEED_INCREMENT every SPEED_RAMP_INTERVAL ticks, unbounded
    pub const SPEED_RAMP_INTERVAL: u64 = 300;
    pub const SPEED_INCREMENT: f32 = 0.2;

    /// Score/progress reward for a correct answer
    pub const ANSWER_REWARD: u32 = 10;
}
