//! Axis-aligned rectangle geometry
//!
//! World units, y grows downward. Every body in the simulation (player,
//! hazards, platforms, pipe halves, scoring gates) embeds one of these.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// RGBA color, presentation only
pub type Color = [f32; 4];

/// A moving axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height, both strictly positive
    pub size: Vec2,
    /// Units per second
    pub vel: Vec2,
    /// Ignored by the simulation
    pub color: Color,
}

impl Rect {
    /// Create a stationary rectangle, rejecting non-positive sizes
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> SimResult<Self> {
        // Written as negated `>` so NaN sizes are rejected too
        if !(width > 0.0 && height > 0.0) {
            return Err(SimError::NonPositiveSize { width, height });
        }
        Ok(Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            vel: Vec2::ZERO,
            color: [1.0; 4],
        })
    }

    pub fn with_velocity(mut self, dx: f32, dy: f32) -> Self {
        self.vel = Vec2::new(dx, dy);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Inclusive AABB test: touching edges count as overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    /// Overlapping while our bottom edge is at or above the other's bottom edge.
    ///
    /// Distinguishes "standing on" from hitting a side or the underside.
    pub fn rests_on(&self, other: &Rect) -> bool {
        self.overlaps(other) && self.bottom() <= other.bottom()
    }

    /// Advance position by velocity over `dt` seconds
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}
