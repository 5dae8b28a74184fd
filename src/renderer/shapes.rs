//! Tessellation of snapshots into triangle lists

use glam::Vec2;

use super::snapshot::{DrawKind, Snapshot};
use super::vertex::{Vertex, colors};
use crate::sim::{Bounds, Color, MAX_HEALTH};

/// Maps world units to normalized device coordinates.
///
/// The camera scrolls horizontally to keep the player centred and never
/// shows anything left of or right of the level bounds. World y grows
/// downward, NDC y grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Visible area in world units
    pub size: Vec2,
    /// World position of the top-left corner
    pub origin: Vec2,
}

impl Viewport {
    /// Viewport for a `width` x `height` pixel surface
    pub fn new(width: u32, height: u32, pixels_per_unit: f32) -> Self {
        let ppu = pixels_per_unit.max(f32::EPSILON);
        Self {
            size: Vec2::new(width.max(1) as f32 / ppu, height.max(1) as f32 / ppu),
            origin: Vec2::ZERO,
        }
    }

    /// Centre horizontally on `focus_x`, clamped to the level
    pub fn follow(&mut self, focus_x: f32, bounds: &Bounds) {
        let max_x = bounds.right() - self.size.x;
        self.origin.x = if max_x <= bounds.x {
            bounds.x
        } else {
            (focus_x - self.size.x * 0.5).clamp(bounds.x, max_x)
        };
        self.origin.y = bounds.y;
    }

    pub fn to_ndc(&self, x: f32, y: f32) -> [f32; 2] {
        let local = (Vec2::new(x, y) - self.origin) / self.size;
        [local.x * 2.0 - 1.0, 1.0 - local.y * 2.0]
    }
}

/// Two triangles covering the world-space rectangle
pub fn quad(
    vertices: &mut Vec<Vertex>,
    view: &Viewport,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: Color,
) {
    let [x0, y0] = view.to_ndc(x, y);
    let [x1, y1] = view.to_ndc(x + width, y + height);
    vertices.extend_from_slice(&[
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x0, y1, color),
    ]);
}

/// Quad directly in NDC, for overlays that ignore the camera
fn screen_quad(vertices: &mut Vec<Vertex>, min: [f32; 2], max: [f32; 2], color: Color) {
    let [x0, y0] = min;
    let [x1, y1] = max;
    vertices.extend_from_slice(&[
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x0, y1, color),
    ]);
}

/// Build the full frame: world rectangles, health bar, and a dark tint once
/// the run is over
pub fn build_vertices(snapshot: &Snapshot, view: &mut Viewport) -> Vec<Vertex> {
    if let Some(player) = snapshot.rects.iter().rfind(|r| r.kind == DrawKind::Player) {
        view.follow(player.x + player.width * 0.5, &snapshot.bounds);
    }

    let mut vertices = Vec::with_capacity((snapshot.rects.len() + 3) * 6);
    for rect in &snapshot.rects {
        quad(
            &mut vertices,
            view,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            rect.color,
        );
    }

    // Health bar, top-left
    let fill = (snapshot.health / MAX_HEALTH).clamp(0.0, 1.0);
    screen_quad(&mut vertices, [-0.95, 0.95], [-0.45, 0.9], colors::HEALTH_BAR_BACK);
    if fill > 0.0 {
        screen_quad(
            &mut vertices,
            [-0.95, 0.95],
            [-0.95 + 0.5 * fill, 0.9],
            colors::HEALTH_BAR,
        );
    }

    if !snapshot.alive {
        screen_quad(&mut vertices, [-1.0, 1.0], [1.0, -1.0], colors::GAME_OVER_TINT);
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SimulationConfig, Variant};
    use crate::renderer::snapshot;
    use crate::sim::GameState;
    use proptest::prelude::*;

    fn bounds() -> Bounds {
        Bounds::new(0.0, 0.0, 100.0, 7.0).unwrap()
    }

    #[test]
    fn test_viewport_corners() {
        let mut view = Viewport::new(1200, 700, 100.0);
        view.follow(0.0, &bounds());
        assert_eq!(view.to_ndc(0.0, 0.0), [-1.0, 1.0]);
        assert_eq!(view.to_ndc(12.0, 7.0), [1.0, -1.0]);
    }

    #[test]
    fn test_camera_clamps_to_level() {
        let mut view = Viewport::new(1200, 700, 100.0);
        view.follow(2.0, &bounds());
        assert_eq!(view.origin.x, 0.0);
        view.follow(50.0, &bounds());
        assert_eq!(view.origin.x, 44.0);
        view.follow(99.0, &bounds());
        assert_eq!(view.origin.x, 88.0);
    }

    #[test]
    fn test_narrow_level_pins_camera() {
        let narrow = Bounds::new(0.0, 0.0, 5.0, 7.0).unwrap();
        let mut view = Viewport::new(1200, 700, 100.0);
        view.follow(4.0, &narrow);
        assert_eq!(view.origin.x, 0.0);
    }

    #[test]
    fn test_frame_vertex_count() {
        let config = SimulationConfig::for_variant(Variant::Platformer);
        let state = GameState::new(&config, 3).unwrap();
        let snap = snapshot(&state, 0);
        let mut view = Viewport::new(1200, 700, config.pixels_per_unit);
        let vertices = build_vertices(&snap, &mut view);
        // Every rect plus health bar background and fill
        assert_eq!(vertices.len(), (snap.rects.len() + 2) * 6);
    }

    #[test]
    fn test_dead_frame_adds_tint() {
        let config = SimulationConfig::default();
        let mut state = GameState::new(&config, 3).unwrap();
        state.player.kill();
        let snap = snapshot(&state, 0);
        let mut view = Viewport::new(800, 600, 100.0);
        let vertices = build_vertices(&snap, &mut view);
        // Zero health skips the fill quad
        assert_eq!(vertices.len(), (snap.rects.len() + 2) * 6);
        assert_eq!(vertices.last().unwrap().color, colors::GAME_OVER_TINT);
    }

    proptest! {
        #[test]
        fn prop_quad_preserves_color(
            x in 0.0f32..90.0,
            y in 0.0f32..6.0,
            w in 0.1f32..5.0,
            h in 0.1f32..1.0,
        ) {
            let view = Viewport::new(1200, 700, 100.0);
            let mut vertices = Vec::new();
            quad(&mut vertices, &view, x, y, w, h, [0.1, 0.2, 0.3, 1.0]);
            prop_assert_eq!(vertices.len(), 6);
            prop_assert!(vertices.iter().all(|v| v.color == [0.1, 0.2, 0.3, 1.0]));
            // Downward in the world is downward on screen
            prop_assert!(vertices[2].position[1] < vertices[0].position[1]);
        }
    }
}
