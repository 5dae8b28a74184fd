//! Stateful physical bodies: the player, hazards, and moving platforms
//!
//! An `Actor` is a `Rect` plus speed limits, health, and a liveness flag.
//! Behavior differences are selected by `Role` rather than by separate types.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::ActorParams;
use crate::error::SimResult;

/// Upper bound for health
pub const MAX_HEALTH: f32 = 100.0;

/// What touching a hazard does to the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Harm {
    /// Subtract this much health per overlapping tick
    Damage(f32),
    /// Instant death
    Lethal,
}

/// Actor behavior tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Hazard { harm: Harm },
    /// Something to stand on
    Platform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub body: Rect,
    pub role: Role,
    /// Carried for completeness; movement is mass-independent
    pub mass: f32,
    /// Horizontal velocity upper bound
    pub max_speed: f32,
    /// Horizontal velocity lower bound (usually negative)
    pub min_speed: f32,
    /// Optional cap on downward velocity
    pub max_fall_speed: Option<f32>,
    /// Vertical impulse applied on jump (negative = up)
    pub jump_force: f32,
    /// Horizontal velocity added per tick while moving right
    pub forward_force: f32,
    /// Horizontal velocity added per tick while moving left
    pub backward_force: f32,
    /// Jump latch; set when the impulse fires
    pub has_jumped: bool,
    pub alive: bool,
    pub health: f32,
}

impl Actor {
    fn from_params(body: Rect, role: Role, params: &ActorParams) -> Self {
        Self {
            body,
            role,
            mass: params.mass,
            max_speed: params.max_speed,
            min_speed: params.min_speed,
            max_fall_speed: params.max_fall_speed,
            jump_force: params.jump_force,
            forward_force: params.forward_force,
            backward_force: params.backward_force,
            has_jumped: false,
            alive: true,
            health: params.health.clamp(0.0, MAX_HEALTH),
        }
    }

    /// Build the player at `(x, y)` with the configured size and forces
    pub fn player(x: f32, y: f32, params: &ActorParams) -> SimResult<Self> {
        let body = Rect::new(x, y, params.width, params.height)?;
        Ok(Self::from_params(body, Role::Player, params))
    }

    /// Wrap a rectangle as a hazard. Hazards never steer, so forces are zero.
    pub fn hazard(body: Rect, harm: Harm) -> Self {
        Self::inert(body, Role::Hazard { harm })
    }

    pub fn platform(body: Rect) -> Self {
        Self::inert(body, Role::Platform)
    }

    fn inert(body: Rect, role: Role) -> Self {
        Self {
            body,
            role,
            mass: 0.0,
            max_speed: f32::INFINITY,
            min_speed: f32::NEG_INFINITY,
            max_fall_speed: None,
            jump_force: 0.0,
            forward_force: 0.0,
            backward_force: 0.0,
            has_jumped: false,
            alive: true,
            health: MAX_HEALTH,
        }
    }

    /// Harm dealt on contact, if this actor is a hazard
    pub fn harm(&self) -> Option<Harm> {
        match self.role {
            Role::Hazard { harm } => Some(harm),
            _ => None,
        }
    }

    /// Clamp horizontal velocity into `[min_speed, max_speed]`, and vertical
    /// velocity to `max_fall_speed` if one is set.
    pub fn clamp_speed(&mut self) {
        // min applied last so an inverted pair still yields min_speed
        self.body.vel.x = self.body.vel.x.min(self.max_speed).max(self.min_speed);
        if let Some(max_fall) = self.max_fall_speed {
            self.body.vel.y = self.body.vel.y.min(max_fall);
        }
    }

    /// Subtract health; at or below zero the actor dies for good
    pub fn apply_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).min(MAX_HEALTH);
        if self.health <= 0.0 {
            self.health = 0.0;
            self.alive = false;
        }
    }

    /// Instant death, independent of health
    pub fn kill(&mut self) {
        self.health = 0.0;
        self.alive = false;
    }

    /// Restore health up to `MAX_HEALTH`. Does not revive.
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(MAX_HEALTH);
    }

    /// Move by velocity; dead actors stay where they died
    pub fn integrate(&mut self, dt: f32) {
        if self.alive {
            self.body.integrate(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player() -> Actor {
        Actor::player(1.0, 1.0, &ActorParams::default()).unwrap()
    }

    #[test]
    fn test_clamp_speed_asymmetric_bounds() {
        let mut p = player();
        p.min_speed = -2.0;
        p.max_speed = 6.0;

        p.body.vel.x = 9.0;
        p.clamp_speed();
        assert_eq!(p.body.vel.x, 6.0);

        p.body.vel.x = -9.0;
        p.clamp_speed();
        assert_eq!(p.body.vel.x, -2.0);

        p.body.vel.x = 1.5;
        p.clamp_speed();
        assert_eq!(p.body.vel.x, 1.5);
    }

    #[test]
    fn test_clamp_fall_speed_upper_only() {
        let mut p = player();
        p.max_fall_speed = Some(4.0);
        p.body.vel.y = 10.0;
        p.clamp_speed();
        assert_eq!(p.body.vel.y, 4.0);

        // Upward speed is untouched
        p.body.vel.y = -25.0;
        p.clamp_speed();
        assert_eq!(p.body.vel.y, -25.0);
    }

    #[test]
    fn test_damage_to_zero_kills() {
        let mut p = player();
        p.apply_damage(40.0);
        assert!(p.alive);
        assert_eq!(p.health, 60.0);

        p.apply_damage(60.0);
        assert!(!p.alive);
        assert_eq!(p.health, 0.0);

        // No resurrection
        p.heal(100.0);
        assert!(!p.alive);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = player();
        p.apply_damage(30.0);
        p.heal(50.0);
        assert_eq!(p.health, MAX_HEALTH);
    }

    #[test]
    fn test_dead_actor_does_not_move() {
        let mut p = player();
        p.body.vel = glam::Vec2::new(3.0, 3.0);
        p.kill();
        let before = p.body.pos;
        p.integrate(1.0);
        assert_eq!(p.body.pos, before);
    }

    #[test]
    fn test_roles() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(Actor::hazard(r, Harm::Lethal).harm(), Some(Harm::Lethal));
        assert_eq!(Actor::platform(r).harm(), None);
        assert_eq!(player().harm(), None);
    }

    proptest! {
        #[test]
        fn prop_clamp_idempotent(
            vx in -100.0f32..100.0,
            vy in -100.0f32..100.0,
            lo in -10.0f32..0.0,
            hi in 0.0f32..10.0,
            fall in proptest::option::of(0.0f32..20.0),
        ) {
            let mut p = player();
            p.min_speed = lo;
            p.max_speed = hi;
            p.max_fall_speed = fall;
            p.body.vel = glam::Vec2::new(vx, vy);
            p.clamp_speed();
            let once = p.body.vel;
            p.clamp_speed();
            prop_assert_eq!(once, p.body.vel);
            prop_assert!(p.body.vel.x >= lo && p.body.vel.x <= hi);
        }

        #[test]
        fn prop_health_monotonic_death(start in 1.0f32..100.0, dmg in 0.0f32..200.0) {
            let mut p = player();
            p.health = start;
            p.apply_damage(dmg);
            if start - dmg <= 0.0 {
                prop_assert!(!p.alive);
            } else {
                prop_assert!(p.alive);
            }
            prop_assert!(p.health >= 0.0 && p.health <= MAX_HEALTH);
        }
    }
}
