//! Read-only projection of simulation state into drawable rectangles

use serde::{Deserialize, Serialize};

use crate::sim::{Bounds, Color, GameState, Rect};

/// What a rectangle represents, for renderers that style by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawKind {
    Ground,
    Platform,
    Hazard,
    Pipe,
    Gate,
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub kind: DrawKind,
}

impl DrawRect {
    fn from_rect(rect: &Rect, kind: DrawKind) -> Self {
        Self {
            x: rect.pos.x,
            y: rect.pos.y,
            width: rect.size.x,
            height: rect.size.y,
            color: rect.color,
            kind,
        }
    }
}

/// Everything a frame needs, detached from the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Back to front
    pub rects: Vec<DrawRect>,
    pub bounds: Bounds,
    pub score: u64,
    pub best: u64,
    pub health: f32,
    pub alive: bool,
}

/// Collect drawables: ground, platforms, hazards, pipes, unscored gates,
/// then the player on top. Dead actors keep their last pose.
pub fn snapshot(state: &GameState, best: u64) -> Snapshot {
    let world = &state.world;
    let mut rects = Vec::with_capacity(
        2 + world.platforms.len() + world.hazards.len() + world.gates.len() + world.pipes.len() * 3,
    );

    if let Some(ground) = &world.ground {
        rects.push(DrawRect::from_rect(&ground.body, DrawKind::Ground));
    }
    rects.extend(
        world
            .platforms
            .iter()
            .map(|p| DrawRect::from_rect(&p.body, DrawKind::Platform)),
    );
    rects.extend(
        world
            .hazards
            .iter()
            .map(|h| DrawRect::from_rect(&h.body, DrawKind::Hazard)),
    );
    for pipe in &world.pipes {
        rects.push(DrawRect::from_rect(&pipe.top, DrawKind::Pipe));
        rects.push(DrawRect::from_rect(&pipe.bottom, DrawKind::Pipe));
    }
    let gates = world.gates.iter().chain(world.pipes.iter().map(|p| &p.gate));
    rects.extend(
        gates
            .filter(|g| !g.scored)
            .map(|g| DrawRect::from_rect(&g.body, DrawKind::Gate)),
    );
    rects.push(DrawRect::from_rect(&state.player.body, DrawKind::Player));

    Snapshot {
        rects,
        bounds: world.bounds,
        score: state.score,
        best: best.max(state.score),
        health: state.player.health,
        alive: state.player.alive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SimulationConfig, Variant};

    #[test]
    fn test_platformer_snapshot_order() {
        let config = SimulationConfig::for_variant(Variant::Platformer);
        let state = GameState::new(&config, 1).unwrap();
        let snap = snapshot(&state, 10);

        let kinds: Vec<DrawKind> = snap.rects.iter().map(|r| r.kind).collect();
        assert_eq!(kinds.first(), Some(&DrawKind::Ground));
        assert_eq!(kinds.last(), Some(&DrawKind::Player));
        assert_eq!(kinds.iter().filter(|k| **k == DrawKind::Gate).count(), 3);
        assert_eq!(snap.best, 10);
        assert!(snap.alive);
    }

    #[test]
    fn test_scored_gates_hidden() {
        let config = SimulationConfig::for_variant(Variant::Flappy);
        let mut state = GameState::new(&config, 1).unwrap();
        let pipes = state.world.pipes.len();
        state.world.pipes[0].gate.scored = true;
        state.score = 1;

        let snap = snapshot(&state, 0);
        let gates = snap.rects.iter().filter(|r| r.kind == DrawKind::Gate).count();
        assert_eq!(gates, pipes - 1);
        assert_eq!(snap.best, 1);
    }

    #[test]
    fn test_snapshot_does_not_alias_state() {
        let config = SimulationConfig::default();
        let mut state = GameState::new(&config, 1).unwrap();
        let snap = snapshot(&state, 0);
        state.player.body.pos.x += 5.0;
        let player = snap.rects.last().unwrap();
        assert_eq!(player.x, 1.0);
    }
}
