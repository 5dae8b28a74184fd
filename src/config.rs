//! Simulation configuration
//!
//! Built once at startup and passed by reference into the simulation. The
//! defaults come from `crate::consts`; a JSON document can override any
//! subset of fields for tuning.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Game variant presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Keyboard platformer on a fixed level, clamped floor
    #[default]
    Platformer,
    /// Platforms scroll in forever; falling off the bottom is fatal
    EndlessPlatformer,
    /// Single-key flapping through scrolling pipes
    Flappy,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Platformer, Variant::EndlessPlatformer, Variant::Flappy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Platformer => "platformer",
            Variant::EndlessPlatformer => "endless",
            Variant::Flappy => "flappy",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "platformer" | "level" => Some(Variant::Platformer),
            "endless" | "endless-platformer" | "runner" => Some(Variant::EndlessPlatformer),
            "flappy" | "bird" => Some(Variant::Flappy),
            _ => None,
        }
    }
}

/// What happens at the bottom of the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorRule {
    /// Position is clamped, the player survives
    Clamped,
    /// Reaching the floor kills
    Lethal,
}

/// How input flags map to forces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Left/right steer, up jumps; the jump latch clears on landing
    Directional,
    /// Only up (flap) matters; the latch clears on release
    FlapOnly,
}

/// Size and force constants for a controllable actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorParams {
    pub width: f32,
    pub height: f32,
    pub mass: f32,
    pub max_speed: f32,
    pub min_speed: f32,
    pub max_fall_speed: Option<f32>,
    pub jump_force: f32,
    pub forward_force: f32,
    pub backward_force: f32,
    pub health: f32,
}

impl Default for ActorParams {
    fn default() -> Self {
        Self {
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            mass: PLAYER_MASS,
            max_speed: PLAYER_MAX_SPEED,
            min_speed: PLAYER_MIN_SPEED,
            max_fall_speed: None,
            jump_force: PLAYER_JUMP_FORCE,
            forward_force: PLAYER_FORWARD_FORCE,
            backward_force: PLAYER_BACKWARD_FORCE,
            health: PLAYER_HEALTH,
        }
    }
}

/// What the recycler appends when the leading entity expires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnKind {
    /// A pipe pair; `min_y..=max_y` bounds the gap's top edge
    Pipe { gap_height: f32 },
    /// A floating platform; `min_y..=max_y` bounds its top edge
    Platform { thickness: f32 },
}

/// Endless-mode obstacle generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecycleConfig {
    /// Entities kept alive ahead of the player
    pub count: usize,
    /// Horizontal distance between consecutive entities
    pub spacing: f32,
    /// Entity width
    pub width: f32,
    /// Leftward drift in units/second
    pub scroll_speed: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub kind: SpawnKind,
}

/// Everything the simulation needs that is fixed for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub variant: Variant,
    /// Downward acceleration, units/s²
    pub gravity: f32,
    /// A frame is simulated only if more than this many seconds have passed
    pub min_tick_interval: f32,
    /// Longest `dt` a single tick may integrate
    pub max_step: f32,
    /// Render-only scale
    pub pixels_per_unit: f32,
    pub floor: FloorRule,
    pub controls: ControlScheme,
    pub player: ActorParams,
    pub recycle: Option<RecycleConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Platformer)
    }
}

impl SimulationConfig {
    /// Preset rules for a variant
    pub fn for_variant(variant: Variant) -> Self {
        let base = Self {
            variant,
            gravity: GRAVITY,
            min_tick_interval: MIN_TICK_INTERVAL,
            max_step: MAX_STEP,
            pixels_per_unit: PIXELS_PER_UNIT,
            floor: FloorRule::Clamped,
            controls: ControlScheme::Directional,
            player: ActorParams::default(),
            recycle: None,
        };

        match variant {
            Variant::Platformer => base,
            Variant::EndlessPlatformer => Self {
                max_step: ENDLESS_MAX_STEP,
                floor: FloorRule::Lethal,
                player: ActorParams {
                    max_fall_speed: Some(ENDLESS_MAX_FALL_SPEED),
                    ..ActorParams::default()
                },
                recycle: Some(RecycleConfig {
                    count: 6,
                    spacing: ENDLESS_PLATFORM_SPACING,
                    width: ENDLESS_PLATFORM_WIDTH,
                    scroll_speed: SCROLL_SPEED,
                    min_y: 4.5,
                    max_y: 6.5,
                    kind: SpawnKind::Platform {
                        thickness: ENDLESS_PLATFORM_THICKNESS,
                    },
                }),
                ..base
            },
            Variant::Flappy => Self {
                floor: FloorRule::Lethal,
                controls: ControlScheme::FlapOnly,
                player: ActorParams {
                    jump_force: FLAP_FORCE,
                    max_fall_speed: Some(FLAP_MAX_FALL_SPEED),
                    forward_force: 0.0,
                    backward_force: 0.0,
                    ..ActorParams::default()
                },
                recycle: Some(RecycleConfig {
                    count: 4,
                    spacing: PIPE_SPACING,
                    width: PIPE_WIDTH,
                    scroll_speed: SCROLL_SPEED * 2.0,
                    min_y: 1.0,
                    max_y: LEVEL_HEIGHT - PIPE_GAP_HEIGHT - 1.0,
                    kind: SpawnKind::Pipe {
                        gap_height: PIPE_GAP_HEIGHT,
                    },
                }),
                ..base
            },
        }
    }

    /// Parse JSON overrides on top of the preset for the `variant` the
    /// document names (platformer if absent) and validate the result
    pub fn from_json(json: &str) -> SimResult<Self> {
        let overrides: Value = serde_json::from_str(json)?;
        let variant = match overrides.get("variant") {
            Some(v) => Variant::deserialize(v)?,
            None => Variant::default(),
        };

        let mut merged = serde_json::to_value(Self::for_variant(variant))?;
        merge(&mut merged, overrides);
        let config = Self::deserialize(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        let invalid = |msg: String| Err(SimError::InvalidConfig(msg));

        if !self.gravity.is_finite() {
            return invalid(format!("gravity must be finite, got {}", self.gravity));
        }
        if !(self.min_tick_interval > 0.0) {
            return invalid(format!(
                "min_tick_interval must be positive, got {}",
                self.min_tick_interval
            ));
        }
        if self.max_step < self.min_tick_interval {
            return invalid(format!(
                "max_step {} is shorter than min_tick_interval {}",
                self.max_step, self.min_tick_interval
            ));
        }
        if !(self.pixels_per_unit > 0.0) {
            return invalid("pixels_per_unit must be positive".to_string());
        }
        let p = &self.player;
        if !(p.width > 0.0 && p.height > 0.0) {
            return Err(SimError::NonPositiveSize {
                width: p.width,
                height: p.height,
            });
        }
        if p.min_speed > p.max_speed {
            return invalid(format!(
                "player min_speed {} exceeds max_speed {}",
                p.min_speed, p.max_speed
            ));
        }
        if let Some(r) = &self.recycle {
            if r.count == 0 {
                return invalid("recycle.count must be at least 1".to_string());
            }
            if !(r.spacing > 0.0 && r.width > 0.0) {
                return invalid("recycle spacing and width must be positive".to_string());
            }
            if r.min_y > r.max_y {
                return invalid(format!("recycle min_y {} exceeds max_y {}", r.min_y, r.max_y));
            }
            let extent = match r.kind {
                SpawnKind::Pipe { gap_height } => gap_height,
                SpawnKind::Platform { thickness } => thickness,
            };
            if !(extent > 0.0) {
                return invalid("recycled gap/thickness must be positive".to_string());
            }
            // Landing is sampled once per tick, so a step may not fall past a ledge
            if let SpawnKind::Platform { thickness } = r.kind {
                let Some(max_fall) = p.max_fall_speed else {
                    return invalid("recycled platforms need player.max_fall_speed".to_string());
                };
                if max_fall * self.max_step > thickness {
                    return invalid(format!(
                        "max_fall_speed {} over max_step {} falls further than platform thickness {}",
                        max_fall, self.max_step, thickness
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Overlay `overrides` onto `base`: objects merge key by key, anything else
/// replaces
fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for variant in Variant::ALL {
            let config = SimulationConfig::for_variant(variant);
            assert!(config.validate().is_ok(), "{:?}", variant);
            assert_eq!(config.variant, variant);
        }
    }

    #[test]
    fn test_variant_names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_str(variant.as_str()), Some(variant));
        }
        assert_eq!(Variant::from_str("FLAPPY"), Some(Variant::Flappy));
        assert_eq!(Variant::from_str("tetris"), None);
    }

    #[test]
    fn test_flappy_rules() {
        let config = SimulationConfig::for_variant(Variant::Flappy);
        assert_eq!(config.floor, FloorRule::Lethal);
        assert_eq!(config.controls, ControlScheme::FlapOnly);
        assert!(config.player.max_fall_speed.is_some());
        assert!(matches!(
            config.recycle.map(|r| r.kind),
            Some(SpawnKind::Pipe { .. })
        ));
    }

    #[test]
    fn test_partial_json_override() {
        let config = SimulationConfig::from_json(r#"{ "gravity": 20.0 }"#).unwrap();
        assert_eq!(config.gravity, 20.0);
        assert_eq!(config.min_tick_interval, MIN_TICK_INTERVAL);
        assert_eq!(config.variant, Variant::Platformer);
    }

    #[test]
    fn test_json_rejects_bad_values() {
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "min_tick_interval": 0.0 }"#),
            Err(SimError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "player": { "width": 0.0 } }"#),
            Err(SimError::NonPositiveSize { .. })
        ));
        assert!(matches!(
            SimulationConfig::from_json("not json"),
            Err(SimError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_preset() {
        let config = SimulationConfig::for_variant(Variant::EndlessPlatformer);
        let json = config.to_json().unwrap();
        assert_eq!(SimulationConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_variant_selects_its_preset() {
        for variant in Variant::ALL {
            let json = format!(r#"{{ "variant": "{:?}" }}"#, variant);
            let config = SimulationConfig::from_json(&json).unwrap();
            assert_eq!(config, SimulationConfig::for_variant(variant));
        }
    }

    #[test]
    fn test_json_overrides_nested_fields_of_variant() {
        let config = SimulationConfig::from_json(
            r#"{ "variant": "Flappy", "player": { "jump_force": -7.0 }, "recycle": { "count": 2 } }"#,
        )
        .unwrap();
        let preset = SimulationConfig::for_variant(Variant::Flappy);
        assert_eq!(config.controls, ControlScheme::FlapOnly);
        assert_eq!(config.floor, FloorRule::Lethal);
        assert_eq!(config.player.jump_force, -7.0);
        assert_eq!(config.player.max_fall_speed, preset.player.max_fall_speed);
        let recycle = config.recycle.unwrap();
        assert_eq!(recycle.count, 2);
        assert_eq!(recycle.kind, preset.recycle.unwrap().kind);
    }

    #[test]
    fn test_platform_thickness_bounds_fall_step() {
        let preset = SimulationConfig::for_variant(Variant::EndlessPlatformer);
        let Some(SpawnKind::Platform { thickness }) = preset.recycle.map(|r| r.kind) else {
            panic!("endless preset recycles platforms");
        };
        let max_fall = preset.player.max_fall_speed.unwrap();
        assert!(max_fall * preset.max_step <= thickness);

        let mut fast = preset.clone();
        fast.max_step = MAX_STEP;
        assert!(matches!(fast.validate(), Err(SimError::InvalidConfig(_))));

        let mut unbounded = preset;
        unbounded.player.max_fall_speed = None;
        assert!(matches!(unbounded.validate(), Err(SimError::InvalidConfig(_))));
    }
}
