//! Sidescroller - deterministic core of a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, collisions, per-tick world step)
//! - `level`: Seeded procedural level generation
//! - `session`: Game session orchestration (phases, scoring, restart)
//! - `renderer`: Render host contract and GPU-ready instance data
//! - `settings`: Session configuration

pub mod level;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use level::{ConfigError, GeneratedLevel, LevelGenerationParams, generate_level};
pub use session::{GamePhase, Session, SessionEvent, SessionState};
pub use settings::{PlayerColor, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Largest delta time a single tick may consume (seconds).
    /// Longer stalls are clamped so bodies cannot tunnel through platforms.
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_JUMP_FORCE: f32 = 10.0;
    pub const PLAYER_GRAVITY: f32 = 20.0;
    pub const PLAYER_WIDTH: f32 = 0.8;
    pub const PLAYER_HEIGHT: f32 = 1.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 0.8;
    pub const ENEMY_HEIGHT: f32 = 0.8;
    pub const ENEMY_GRAVITY: f32 = 20.0;

    /// Collectible defaults
    pub const COLLECTIBLE_RADIUS: f32 = 0.3;
    /// Height of a collectible's center above the surface it floats over
    pub const COLLECTIBLE_HOVER: f32 = 1.0;

    /// Players below this height have fallen out of the level
    pub const FALL_THRESHOLD_Y: f32 = -10.0;

    /// Clearance kept between floating platforms during generation
    pub const OVERLAP_BUFFER: f32 = 1.0;
    /// Fraction of the jump height the first elevated row may rise above ground
    pub const FIRST_ROW_JUMP_MARGIN: f32 = 0.7;
    /// Widest ground gap the generator may open
    pub const MAX_GROUND_GAP: f32 = 3.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
