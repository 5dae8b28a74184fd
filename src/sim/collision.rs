//! Collision classification and response for the player
//!
//! Only the player reacts to contact. Platforms catch it from above, hazards
//! and pipes hurt it, gates score. Side and underside contact with a platform
//! is left unresolved, so the player can pass through a platform from below.

use super::actor::{Actor, Harm};
use super::state::{DeathCause, GameEvent};
use super::tick::InputState;
use super::world::{Bounds, World};
use crate::config::{ControlScheme, FloorRule};

/// What resolution found this tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contacts {
    /// Landed on a surface this tick
    pub grounded: bool,
    /// Gates newly passed
    pub scored: u32,
    /// Set if a contact killed the player
    pub fatal: Option<DeathCause>,
}

/// Resolve the player against every surface, hazard, pipe, and gate.
///
/// Must run after gravity and the jump impulse are applied (landing reads the
/// sign of `dy`) and before the speed clamp.
pub fn resolve(
    player: &mut Actor,
    world: &mut World,
    input: &InputState,
    controls: ControlScheme,
    events: &mut Vec<GameEvent>,
) -> Contacts {
    let mut contacts = Contacts::default();

    // First matching surface wins; level data keeps surfaces apart vertically
    if player.body.vel.y > 0.0 {
        if let Some(surface) = world.surfaces().find(|s| player.body.rests_on(&s.body)) {
            player.body.pos.y = surface.body.top() - player.body.height();
            player.body.vel.y = 0.0;
            if !input.up {
                player.has_jumped = false;
            }
            contacts.grounded = true;
            events.push(GameEvent::Landed);
        }
    }

    // Opposing or absent directional keys cancel horizontal motion outright
    if controls == ControlScheme::Directional && input.left == input.right {
        player.body.vel.x = 0.0;
    }

    let was_alive = player.alive;

    for hazard in world.live_hazards() {
        if !player.body.overlaps(&hazard.body) {
            continue;
        }
        // Each overlapping hazard applies independently
        match hazard.harm() {
            Some(Harm::Damage(amount)) => {
                player.apply_damage(amount);
                events.push(GameEvent::Damaged {
                    amount,
                    health: player.health,
                });
            }
            Some(Harm::Lethal) => player.kill(),
            None => {}
        }
    }
    if was_alive && !player.alive {
        contacts.fatal = Some(DeathCause::Hazard);
    }

    if player.alive
        && world
            .pipes
            .iter()
            .any(|pipe| pipe.halves().iter().any(|half| player.body.overlaps(half)))
    {
        player.kill();
        contacts.fatal = Some(DeathCause::Pipe);
    }

    if player.alive {
        for gate in world.gates_mut() {
            if gate.try_score(&player.body) {
                contacts.scored += 1;
            }
        }
    }

    contacts
}

/// Keep the player inside the level.
///
/// Horizontal and ceiling contact clamp. The floor clamps or kills depending
/// on `floor`. Returns the cause if the floor was fatal.
pub fn confine(player: &mut Actor, bounds: &Bounds, floor: FloorRule) -> Option<DeathCause> {
    let body = &mut player.body;

    let max_x = bounds.right() - body.width();
    body.pos.x = body.pos.x.min(max_x).max(bounds.x);
    if body.pos.y < bounds.y {
        body.pos.y = bounds.y;
    }

    let max_y = bounds.floor() - body.height();
    if body.pos.y < max_y {
        return None;
    }
    match floor {
        FloorRule::Clamped => {
            body.pos.y = max_y;
            body.vel.y = body.vel.y.min(0.0);
            None
        }
        FloorRule::Lethal => {
            if !player.alive {
                return None;
            }
            player.kill();
            Some(DeathCause::Fall)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActorParams;
    use crate::sim::rect::Rect;
    use crate::sim::world::Pipe;
    use glam::Vec2;

    fn bounds() -> Bounds {
        Bounds::new(0.0, 0.0, 100.0, 7.0).unwrap()
    }

    fn player_at(x: f32, y: f32, size: f32) -> Actor {
        let params = ActorParams {
            width: size,
            height: size,
            ..ActorParams::default()
        };
        Actor::player(x, y, &params).unwrap()
    }

    fn resolve_once(player: &mut Actor, world: &mut World, input: InputState) -> Contacts {
        let mut events = Vec::new();
        resolve(player, world, &input, ControlScheme::Directional, &mut events)
    }

    #[test]
    fn test_landing_snaps_and_grounds() {
        let mut world = World::new(bounds(), 0);
        world.add_platform(Rect::new(0.0, 6.0, 10.0, 0.2).unwrap());

        let mut player = player_at(1.0, 5.9, 0.2);
        player.body.vel.y = 3.0;
        player.has_jumped = true;

        let contacts = resolve_once(&mut player, &mut world, InputState::default());

        assert!(contacts.grounded);
        assert!((player.body.pos.y - 5.8).abs() < 1e-6);
        assert_eq!(player.body.vel.y, 0.0);
        assert!(!player.has_jumped);
    }

    #[test]
    fn test_landing_keeps_latch_while_up_held() {
        let mut world = World::new(bounds(), 0);
        world.add_platform(Rect::new(0.0, 6.0, 10.0, 0.2).unwrap());

        let mut player = player_at(1.0, 5.9, 0.2);
        player.body.vel.y = 1.0;
        player.has_jumped = true;

        let input = InputState {
            up: true,
            ..Default::default()
        };
        assert!(resolve_once(&mut player, &mut world, input).grounded);
        assert!(player.has_jumped);
    }

    #[test]
    fn test_rising_player_passes_through() {
        let mut world = World::new(bounds(), 0);
        world.add_platform(Rect::new(0.0, 6.0, 10.0, 0.2).unwrap());

        let mut player = player_at(1.0, 5.9, 0.2);
        player.body.vel.y = -3.0;

        let contacts = resolve_once(&mut player, &mut world, InputState::default());
        assert!(!contacts.grounded);
        assert_eq!(player.body.pos.y, 5.9);
        assert_eq!(player.body.vel.y, -3.0);
    }

    #[test]
    fn test_first_surface_wins() {
        let mut world = World::new(bounds(), 0)
            .with_ground(Rect::new(0.0, 6.0, 10.0, 0.5).unwrap());
        world.add_platform(Rect::new(0.0, 6.1, 10.0, 0.1).unwrap());

        let mut player = player_at(1.0, 5.9, 0.2);
        player.body.vel.y = 1.0;
        resolve_once(&mut player, &mut world, InputState::default());
        // Snapped onto the ground (listed first), not the platform
        assert!((player.body.pos.y - 5.8).abs() < 1e-6);
    }

    #[test]
    fn test_lateral_cancel() {
        let mut world = World::new(bounds(), 0);
        let mut player = player_at(1.0, 1.0, 0.52);

        player.body.vel.x = 2.0;
        let contacts = resolve_once(&mut player, &mut world, InputState::default());
        assert!(!contacts.grounded);
        assert_eq!(player.body.vel.x, 0.0);

        player.body.vel.x = 2.0;
        let both = InputState {
            left: true,
            right: true,
            ..Default::default()
        };
        resolve_once(&mut player, &mut world, both);
        assert_eq!(player.body.vel.x, 0.0);

        player.body.vel.x = 2.0;
        let right = InputState {
            right: true,
            ..Default::default()
        };
        resolve_once(&mut player, &mut world, right);
        assert_eq!(player.body.vel.x, 2.0);
    }

    #[test]
    fn test_hazard_damage_kills_at_zero() {
        let mut world = World::new(bounds(), 0);
        world.add_hazard(Actor::hazard(
            Rect::new(1.0, 1.0, 0.52, 0.3).unwrap(),
            Harm::Damage(100.0),
        ));
        let mut player = player_at(1.0, 1.0, 0.52);
        let mut events = Vec::new();

        let contacts = resolve(
            &mut player,
            &mut world,
            &InputState::default(),
            ControlScheme::Directional,
            &mut events,
        );

        assert_eq!(player.health, 0.0);
        assert!(!player.alive);
        assert_eq!(contacts.fatal, Some(DeathCause::Hazard));
        assert!(events.iter().any(|e| matches!(e, GameEvent::Damaged { .. })));
    }

    #[test]
    fn test_overlapping_hazards_each_apply() {
        let mut world = World::new(bounds(), 0);
        for _ in 0..2 {
            world.add_hazard(Actor::hazard(
                Rect::new(1.0, 1.0, 0.5, 0.5).unwrap(),
                Harm::Damage(30.0),
            ));
        }
        let mut player = player_at(1.0, 1.0, 0.52);
        let contacts = resolve_once(&mut player, &mut world, InputState::default());
        assert_eq!(player.health, 40.0);
        assert!(player.alive);
        assert_eq!(contacts.fatal, None);
    }

    #[test]
    fn test_lethal_hazard_ignores_health() {
        let mut world = World::new(bounds(), 0);
        world.add_hazard(Actor::hazard(
            Rect::new(1.2, 1.2, 0.2, 0.2).unwrap(),
            Harm::Lethal,
        ));
        let mut player = player_at(1.0, 1.0, 0.52);
        resolve_once(&mut player, &mut world, InputState::default());
        assert!(!player.alive);
    }

    #[test]
    fn test_pipe_kills_gap_scores() {
        let mut world = World::new(Bounds::new(0.0, 0.0, 12.0, 7.0).unwrap(), 0);
        world.add_pipe(Pipe::new(2.0, 0.8, 2.0, 1.8, &world.bounds, 1.0).unwrap());

        // Inside the gap: scores once
        let mut player = player_at(2.1, 2.5, 0.52);
        let first = resolve_once(&mut player, &mut world, InputState::default());
        assert_eq!(first.scored, 1);
        let second = resolve_once(&mut player, &mut world, InputState::default());
        assert_eq!(second.scored, 0);
        assert!(player.alive);

        // Touching the upper half
        let mut player = player_at(2.1, 1.6, 0.52);
        let contacts = resolve_once(&mut player, &mut world, InputState::default());
        assert!(!player.alive);
        assert_eq!(contacts.fatal, Some(DeathCause::Pipe));
    }

    #[test]
    fn test_dead_player_does_not_score() {
        let mut world = World::new(bounds(), 0);
        world.add_gate(Rect::new(1.0, 1.0, 1.0, 1.0).unwrap());
        world.add_hazard(Actor::hazard(
            Rect::new(1.0, 1.0, 1.0, 1.0).unwrap(),
            Harm::Lethal,
        ));
        let mut player = player_at(1.0, 1.0, 0.52);
        let contacts = resolve_once(&mut player, &mut world, InputState::default());
        assert_eq!(contacts.scored, 0);
        assert!(!world.gates[0].scored);
    }

    #[test]
    fn test_confine_clamped_floor() {
        let mut player = player_at(-3.0, 9.0, 0.52);
        player.body.vel = Vec2::new(0.0, 4.0);
        assert_eq!(confine(&mut player, &bounds(), FloorRule::Clamped), None);
        assert_eq!(player.body.pos.x, 0.0);
        assert!((player.body.pos.y - (7.0 - 0.52)).abs() < 1e-6);
        assert_eq!(player.body.vel.y, 0.0);
        assert!(player.alive);
    }

    #[test]
    fn test_confine_right_edge_and_ceiling() {
        let mut player = player_at(150.0, -2.0, 0.52);
        confine(&mut player, &bounds(), FloorRule::Clamped);
        assert!((player.body.pos.x - (100.0 - 0.52)).abs() < 1e-4);
        assert_eq!(player.body.pos.y, 0.0);
    }

    #[test]
    fn test_confine_lethal_floor() {
        let mut player = player_at(1.0, 6.6, 0.52);
        assert_eq!(
            confine(&mut player, &bounds(), FloorRule::Lethal),
            Some(DeathCause::Fall)
        );
        assert!(!player.alive);

        let mut safe = player_at(1.0, 3.0, 0.52);
        assert_eq!(confine(&mut safe, &bounds(), FloorRule::Lethal), None);
        assert!(safe.alive);
    }
}
