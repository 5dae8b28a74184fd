//! Simulation tick
//!
//! Advances the player and the world by one gated time step. Order matters:
//! gravity and the jump impulse land in `dy` before collision resolution
//! inspects its sign, and the speed clamp runs after resolution so it never
//! reintroduces speed that resolution removed.

use serde::{Deserialize, Serialize};

use super::collision;
use super::state::{DeathCause, GameEvent, GamePhase, GameState};
use crate::config::{ControlScheme, SimulationConfig};

/// Current-state input flags, read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// Jump / flap
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by `dt` seconds.
///
/// Does nothing once the run is over.
pub fn tick(state: &mut GameState, input: &InputState, config: &SimulationConfig, dt: f32) {
    debug_assert!(dt >= 0.0, "negative dt: {dt}");
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;
    state.elapsed += dt;

    let player = &mut state.player;

    // Gravity
    player.body.vel.y += config.gravity * dt;

    // Horizontal intent; opposing keys cancel during resolution
    if config.controls == ControlScheme::Directional {
        if input.left {
            player.body.vel.x += player.backward_force;
        }
        if input.right {
            player.body.vel.x += player.forward_force;
        }
    }

    // Edge-triggered jump
    if config.controls == ControlScheme::FlapOnly && !input.up {
        player.has_jumped = false;
    }
    if input.up && !player.has_jumped {
        player.body.vel.y += player.jump_force;
        player.has_jumped = true;
        state.events.push(GameEvent::Jumped);
    }

    let contacts = collision::resolve(
        player,
        &mut state.world,
        input,
        config.controls,
        &mut state.events,
    );

    state.grounded = contacts.grounded;
    player.clamp_speed();
    player.integrate(dt);

    let fall = collision::confine(player, &state.world.bounds, config.floor);

    if contacts.scored > 0 {
        state.score += u64::from(contacts.scored);
        state.events.push(GameEvent::Scored { score: state.score });
    }

    state.world.advance(dt);
    match state.world.recycle() {
        Ok(0) => {}
        Ok(count) => state.events.push(GameEvent::Recycled { count }),
        Err(e) => log::warn!("Obstacle recycling failed: {}", e),
    }

    if !state.player.alive {
        let cause = contacts.fatal.or(fall).unwrap_or(DeathCause::Hazard);
        state.phase = GamePhase::GameOver;
        state.death = Some(cause);
        state.events.push(GameEvent::Died { cause });
        log::info!(
            "Player died ({:?}) at tick {} with score {}",
            cause,
            state.time_ticks,
            state.score
        );
    }
}
