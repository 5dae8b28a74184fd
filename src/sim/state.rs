//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::levels;
use super::world::World;
use crate::config::SimulationConfig;
use crate::error::SimResult;

/// Current phase of a run. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Damage or contact from a hazard
    Hazard,
    /// Hit a pipe half
    Pipe,
    /// Reached a lethal floor
    Fall,
}

/// Things that happened during the last tick, for HUD and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    Damaged { amount: f32, health: f32 },
    Scored { score: u64 },
    Recycled { count: usize },
    Died { cause: DeathCause },
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for obstacle generation
    pub seed: u64,
    pub player: Actor,
    pub world: World,
    pub score: u64,
    pub phase: GamePhase,
    /// Set once, when the phase turns `GameOver`
    pub death: Option<DeathCause>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds
    pub elapsed: f32,
    /// Player landed on a surface during the most recent tick
    pub grounded: bool,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build the level for `config.variant` and place the player
    pub fn new(config: &SimulationConfig, seed: u64) -> SimResult<Self> {
        config.validate()?;
        let (player, world) = levels::build(config, seed)?;
        Ok(Self::from_parts(player, world, seed))
    }

    /// Assemble a state from a hand-built player and world
    pub fn from_parts(player: Actor, world: World, seed: u64) -> Self {
        Self {
            seed,
            player,
            world,
            score: 0,
            phase: GamePhase::Running,
            death: None,
            time_ticks: 0,
            elapsed: 0.0,
            grounded: false,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
