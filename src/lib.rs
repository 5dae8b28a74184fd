//! Sidescroller - a small 2D side-scrolling game simulation
//!
//! Core modules:
//! - `sim`: Simulation step (integration, collisions, player/level state)
//! - `driver`: Frame-driven loop around the simulation step
//! - `renderer`: Snapshot of drawable rectangles plus a WebGPU pipeline
//! - `input`: Key/pointer events to input flags
//! - `highscores`: Best-score persistence
//! - `config`: Variant presets and tuning

pub mod config;
pub mod driver;
pub mod error;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::{SimulationConfig, Variant};
pub use driver::{Driver, FrameOutcome};
pub use error::{SimError, SimResult};
pub use highscores::{BestScore, MemoryStore, ScoreStore};
pub use input::{InputState, KeyMap};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 9.8;
    /// Frames closer together than this are skipped (80 Hz cap)
    pub const MIN_TICK_INTERVAL: f32 = 1.0 / 80.0;
    /// Longest step a single tick integrates
    pub const MAX_STEP: f32 = 0.1;
    /// Render scale
    pub const PIXELS_PER_UNIT: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 1.0;
    pub const PLAYER_START_Y: f32 = 1.0;
    pub const PLAYER_SIZE: f32 = 0.52;
    pub const PLAYER_MASS: f32 = 64.0;
    pub const PLAYER_MAX_SPEED: f32 = 6.0;
    pub const PLAYER_MIN_SPEED: f32 = -6.0;
    pub const PLAYER_JUMP_FORCE: f32 = -5.0;
    pub const PLAYER_FORWARD_FORCE: f32 = 0.2;
    pub const PLAYER_BACKWARD_FORCE: f32 = -0.2;
    pub const PLAYER_HEALTH: f32 = 100.0;

    /// Flappy tuning
    pub const FLAP_FORCE: f32 = -6.5;
    pub const FLAP_MAX_FALL_SPEED: f32 = 6.0;

    /// Level geometry
    pub const LEVEL_WIDTH: f32 = 100.0;
    pub const LEVEL_HEIGHT: f32 = 7.0;
    pub const GROUND_THICKNESS: f32 = 0.2;
    pub const PLATFORM_THICKNESS: f32 = 0.1;
    /// Visible width used by the flappy and endless presets
    pub const VIEW_WIDTH: f32 = 12.0;

    /// Endless scrolling
    pub const SCROLL_SPEED: f32 = 0.5;
    pub const ENDLESS_PLATFORM_WIDTH: f32 = 2.0;
    pub const ENDLESS_PLATFORM_SPACING: f32 = 3.0;
    /// Endless ledges are caught only if one step never falls further than
    /// a ledge is thick: `ENDLESS_MAX_FALL_SPEED * ENDLESS_MAX_STEP <= thickness`
    pub const ENDLESS_PLATFORM_THICKNESS: f32 = 0.25;
    pub const ENDLESS_MAX_FALL_SPEED: f32 = 6.0;
    pub const ENDLESS_MAX_STEP: f32 = 1.0 / 30.0;
    pub const PIPE_WIDTH: f32 = 0.8;
    pub const PIPE_SPACING: f32 = 3.5;
    pub const PIPE_GAP_HEIGHT: f32 = 1.8;
}
