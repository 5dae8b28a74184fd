//! Starting layouts for each variant

use super::actor::{Actor, Harm};
use super::rect::Rect;
use super::world::{Bounds, Pipe, World, colors};
use crate::config::{RecycleConfig, SimulationConfig, SpawnKind, Variant};
use crate::consts::*;
use crate::error::SimResult;

/// Build the player and world for `config.variant`
pub fn build(config: &SimulationConfig, seed: u64) -> SimResult<(Actor, World)> {
    match config.variant {
        Variant::Platformer => platformer(config, seed),
        Variant::EndlessPlatformer => endless(config, seed),
        Variant::Flappy => flappy(config, seed),
    }
}

/// The hand-made level: long ground, one drifting ledge, one drifting enemy
fn platformer(config: &SimulationConfig, seed: u64) -> SimResult<(Actor, World)> {
    let bounds = Bounds::new(0.0, 0.0, LEVEL_WIDTH, LEVEL_HEIGHT)?;
    let ground = Rect::new(0.0, LEVEL_HEIGHT, LEVEL_WIDTH, GROUND_THICKNESS)?
        .with_color(colors::GROUND);

    let mut world = World::new(bounds, seed).with_ground(ground);
    world.add_platform(
        Rect::new(4.0, 6.0, 2.0, PLATFORM_THICKNESS)?
            .with_velocity(-0.5, 0.0)
            .with_color(colors::PLATFORM),
    );
    world.add_hazard(Actor::hazard(
        Rect::new(2.0, 6.7, PLAYER_SIZE, 0.3)?
            .with_velocity(-0.25, 0.0)
            .with_color(colors::HAZARD),
        Harm::Damage(100.0),
    ));
    for x in [3.0, 5.5, 9.0] {
        world.add_gate(Rect::new(x, 5.2, 0.3, 0.3)?.with_color(colors::GATE));
    }

    let player = player(config, PLAYER_START_X, PLAYER_START_Y)?;
    Ok((player, world))
}

/// Floating ledges scrolling left, no ground
fn endless(config: &SimulationConfig, seed: u64) -> SimResult<(Actor, World)> {
    let bounds = Bounds::new(0.0, 0.0, VIEW_WIDTH, LEVEL_HEIGHT)?;
    let mut world = World::new(bounds, seed);
    let Some(recycle) = scroller(config, &mut world) else {
        return Ok((player(config, PLAYER_START_X, PLAYER_START_Y)?, world));
    };
    let thickness = match recycle.kind {
        SpawnKind::Platform { thickness } => thickness,
        SpawnKind::Pipe { .. } => PLATFORM_THICKNESS,
    };

    // The first ledge sits under the player at a fixed height
    let start_y = recycle.max_y;
    for i in 0..recycle.count {
        let x = 0.5 + i as f32 * recycle.spacing;
        let y = if i == 0 {
            start_y
        } else {
            world.sample_y(&recycle)
        };
        world.add_platform(
            Rect::new(x, y, recycle.width, thickness)?
                .with_velocity(-recycle.scroll_speed, 0.0)
                .with_color(colors::PLATFORM),
        );
    }

    let player = player(config, PLAYER_START_X, start_y - config.player.height)?;
    Ok((player, world))
}

/// Pipes scrolling left, no ground
fn flappy(config: &SimulationConfig, seed: u64) -> SimResult<(Actor, World)> {
    let bounds = Bounds::new(0.0, 0.0, VIEW_WIDTH, LEVEL_HEIGHT)?;
    let mut world = World::new(bounds, seed);
    let player = player(config, 2.0, LEVEL_HEIGHT / 2.0 - config.player.height)?;

    let Some(recycle) = scroller(config, &mut world) else {
        return Ok((player, world));
    };
    let gap_height = match recycle.kind {
        SpawnKind::Pipe { gap_height } => gap_height,
        SpawnKind::Platform { .. } => PIPE_GAP_HEIGHT,
    };

    for i in 0..recycle.count {
        let x = VIEW_WIDTH / 2.0 + i as f32 * recycle.spacing;
        let gap_y = world.sample_y(&recycle);
        let pipe = Pipe::new(
            x,
            recycle.width,
            gap_y,
            gap_height,
            &world.bounds,
            recycle.scroll_speed,
        )?;
        world.add_pipe(pipe);
    }

    Ok((player, world))
}

fn player(config: &SimulationConfig, x: f32, y: f32) -> SimResult<Actor> {
    let mut player = Actor::player(x, y, &config.player)?;
    player.body.color = colors::PLAYER;
    Ok(player)
}

fn scroller(config: &SimulationConfig, world: &mut World) -> Option<RecycleConfig> {
    world.recycle = config.recycle;
    config.recycle
}
