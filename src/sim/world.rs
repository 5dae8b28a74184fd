//! Level geometry and the obstacles that live in it
//!
//! The world owns every non-player body by value. Sequences only change
//! through `recycle`, which keeps a constant number of scrolling obstacles
//! ahead of the player.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::rect::{Color, Rect};
use crate::config::{RecycleConfig, SpawnKind};
use crate::error::{SimError, SimResult};

pub mod colors {
    use super::Color;

    pub const GROUND: Color = [0.85, 0.2, 0.2, 1.0];
    pub const PLATFORM: Color = [0.9, 0.3, 0.3, 1.0];
    pub const HAZARD: Color = [0.05, 0.05, 0.05, 1.0];
    pub const PIPE: Color = [0.2, 0.7, 0.25, 1.0];
    pub const GATE: Color = [1.0, 0.85, 0.2, 0.25];
    pub const PLAYER: Color = [0.2, 0.35, 0.95, 1.0];
}

/// Playable area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> SimResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(SimError::NonPositiveSize { width, height });
        }
        Ok(Self { x, y, width, height })
    }

    /// Lowest y a body's bottom edge may reach
    #[inline]
    pub fn floor(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Awards one point the first time the player touches it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringGate {
    pub body: Rect,
    pub scored: bool,
}

impl ScoringGate {
    pub fn new(body: Rect) -> Self {
        Self {
            body,
            scored: false,
        }
    }

    /// Fire if unscored and overlapping. Never re-arms.
    pub fn try_score(&mut self, player: &Rect) -> bool {
        if self.scored || !player.overlaps(&self.body) {
            return false;
        }
        self.scored = true;
        true
    }
}

/// Two lethal halves around a vertical gap, with a scoring gate in the gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub top: Rect,
    pub bottom: Rect,
    pub gate: ScoringGate,
}

impl Pipe {
    /// Build a pipe whose gap spans `gap_y..gap_y + gap_height`, with the
    /// halves extending to the top and bottom of `bounds`.
    pub fn new(
        x: f32,
        width: f32,
        gap_y: f32,
        gap_height: f32,
        bounds: &Bounds,
        speed: f32,
    ) -> SimResult<Self> {
        let gap_bottom = gap_y + gap_height;
        let top = Rect::new(x, bounds.y, width, gap_y - bounds.y)?
            .with_velocity(-speed, 0.0)
            .with_color(colors::PIPE);
        let bottom = Rect::new(x, gap_bottom, width, bounds.floor() - gap_bottom)?
            .with_velocity(-speed, 0.0)
            .with_color(colors::PIPE);
        let gate = Rect::new(x, gap_y, width, gap_height)?
            .with_velocity(-speed, 0.0)
            .with_color(colors::GATE);
        Ok(Self {
            top,
            bottom,
            gate: ScoringGate::new(gate),
        })
    }

    /// Leading edge
    #[inline]
    pub fn x(&self) -> f32 {
        self.top.pos.x
    }

    /// The pipe has scrolled out and should be recycled
    pub fn expired(&self) -> bool {
        self.x() <= 0.0
    }

    /// Both lethal halves
    pub fn halves(&self) -> [&Rect; 2] {
        [&self.top, &self.bottom]
    }

    pub fn integrate(&mut self, dt: f32) {
        self.top.integrate(dt);
        self.bottom.integrate(dt);
        self.gate.body.integrate(dt);
    }
}

/// Level state: bounds, ground, and every obstacle
#[derive(Debug, Clone)]
pub struct World {
    pub bounds: Bounds,
    /// Base platform; never moves
    pub ground: Option<Actor>,
    pub platforms: VecDeque<Actor>,
    pub hazards: Vec<Actor>,
    /// Free-standing gates (pipes carry their own)
    pub gates: Vec<ScoringGate>,
    pub pipes: VecDeque<Pipe>,
    pub recycle: Option<RecycleConfig>,
    rng: Pcg32,
}

impl World {
    pub fn new(bounds: Bounds, seed: u64) -> Self {
        Self {
            bounds,
            ground: None,
            platforms: VecDeque::new(),
            hazards: Vec::new(),
            gates: Vec::new(),
            pipes: VecDeque::new(),
            recycle: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn with_ground(mut self, ground: Rect) -> Self {
        self.ground = Some(Actor::platform(ground));
        self
    }

    pub fn add_platform(&mut self, platform: Rect) {
        self.platforms.push_back(Actor::platform(platform));
    }

    pub fn add_hazard(&mut self, hazard: Actor) {
        self.hazards.push(hazard);
    }

    pub fn add_gate(&mut self, gate: Rect) {
        self.gates.push(ScoringGate::new(gate));
    }

    pub fn add_pipe(&mut self, pipe: Pipe) {
        self.pipes.push_back(pipe);
    }

    /// Ground first, then platforms in insertion order
    pub fn surfaces(&self) -> impl Iterator<Item = &Actor> {
        self.ground
            .iter()
            .chain(self.platforms.iter())
            .filter(|a| a.alive)
    }

    /// Hazards still in play
    pub fn live_hazards(&self) -> impl Iterator<Item = &Actor> {
        self.hazards.iter().filter(|h| h.alive)
    }

    /// Every gate, free-standing first, then one per pipe
    pub fn gates_mut(&mut self) -> impl Iterator<Item = &mut ScoringGate> {
        self.gates
            .iter_mut()
            .chain(self.pipes.iter_mut().map(|p| &mut p.gate))
    }

    /// Drift every owned body by its own velocity. The ground stays put.
    pub fn advance(&mut self, dt: f32) {
        for platform in &mut self.platforms {
            platform.integrate(dt);
        }
        for hazard in &mut self.hazards {
            hazard.integrate(dt);
        }
        for gate in &mut self.gates {
            gate.body.integrate(dt);
        }
        for pipe in &mut self.pipes {
            pipe.integrate(dt);
        }
    }

    /// Replace expired leading obstacles with fresh ones at the back.
    ///
    /// Returns how many were replaced. Each entity is visited at most once per
    /// call, and the replacement is built before the expired one is removed,
    /// so the sequence length never changes, even on error.
    pub fn recycle(&mut self) -> SimResult<usize> {
        let Some(cfg) = self.recycle else {
            return Ok(0);
        };

        let mut replaced = 0;
        match cfg.kind {
            SpawnKind::Pipe { gap_height } => {
                for _ in 0..self.pipes.len() {
                    let Some(last_x) = self.pipes.back().map(Pipe::x) else {
                        break;
                    };
                    if !self.pipes.front().is_some_and(Pipe::expired) {
                        break;
                    }
                    let gap_y = self.sample_y(&cfg);
                    let pipe = Pipe::new(
                        last_x + cfg.spacing,
                        cfg.width,
                        gap_y,
                        gap_height,
                        &self.bounds,
                        cfg.scroll_speed,
                    )?;
                    self.pipes.pop_front();
                    self.pipes.push_back(pipe);
                    replaced += 1;
                }
            }
            SpawnKind::Platform { thickness } => {
                for _ in 0..self.platforms.len() {
                    let Some(last_x) = self.platforms.back().map(|p| p.body.left()) else {
                        break;
                    };
                    // Platforms expire once fully off-screen, pipes by their leading edge
                    if !self.platforms.front().is_some_and(|p| p.body.right() <= 0.0) {
                        break;
                    }
                    let y = self.sample_y(&cfg);
                    let body = Rect::new(last_x + cfg.spacing, y, cfg.width, thickness)?
                        .with_velocity(-cfg.scroll_speed, 0.0)
                        .with_color(colors::PLATFORM);
                    self.platforms.pop_front();
                    self.platforms.push_back(Actor::platform(body));
                    replaced += 1;
                }
            }
        }

        if replaced > 0 {
            log::debug!("Recycled {} obstacle(s)", replaced);
        }
        Ok(replaced)
    }

    /// Draw a spawn height from the world's seeded RNG
    pub(crate) fn sample_y(&mut self, cfg: &RecycleConfig) -> f32 {
        if cfg.max_y > cfg.min_y {
            self.rng.random_range(cfg.min_y..=cfg.max_y)
        } else {
            cfg.min_y
        }
    }
}
