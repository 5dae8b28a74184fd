//! Simulation module
//!
//! All gameplay logic lives here:
//! - Gated time steps
//! - Seeded RNG only
//! - Insertion-order iteration
//! - No rendering or platform dependencies

pub mod actor;
pub mod clock;
pub mod collision;
pub mod levels;
pub mod rect;
pub mod state;
pub mod tick;
pub mod world;

pub use actor::{Actor, Harm, MAX_HEALTH, Role};
pub use clock::StepGate;
pub use collision::{Contacts, confine, resolve};
pub use rect::{Color, Rect};
pub use state::{DeathCause, GameEvent, GamePhase, GameState};
pub use tick::{InputState, tick};
pub use world::{Bounds, Pipe, ScoringGate, World};
