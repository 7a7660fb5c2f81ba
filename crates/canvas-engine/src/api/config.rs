use serde::{Deserialize, Serialize};

use crate::api::error::Result;

/// Gravity added to a falling body each tick unless the body overrides it.
pub const DEFAULT_GRAVITY: f32 = 0.1;
/// Velocity clamp applied to both axes unless the body overrides it.
pub const DEFAULT_TERMINAL_VELOCITY: f32 = 2.0;
/// Tick period of the update/draw loop in milliseconds (~60 Hz).
pub const DEFAULT_TICK_MS: u32 = 16;

/// How a blocked per-axis move is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Shrink the blocked delta toward zero in fixed steps and commit the
    /// largest step that is free. Velocity is zeroed only if no step fits.
    #[default]
    IncrementalSlide,
    /// Either the full delta fits, or the axis velocity is zeroed and the
    /// body does not move on that axis this tick.
    Binary,
}

/// Where gravity sits relative to the terminal-velocity clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GravityOrder {
    /// Clamp, then add gravity. A falling body may exceed terminal velocity
    /// by one gravity step for the tick's movement.
    #[default]
    ClampThenGravity,
    /// Add gravity, then clamp. Velocity never exceeds terminal velocity.
    GravityThenClamp,
}

/// Configuration for the world, usually provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Fixed tick period in milliseconds (default: 16).
    pub tick_ms: u32,
    /// World width in canvas units.
    pub width: f32,
    /// World height in canvas units.
    pub height: f32,
    /// Default per-tick gravity injected into entities on spawn.
    pub gravity: f32,
    /// Default terminal velocity injected into entities on spawn.
    pub terminal_velocity: f32,
    /// Default horizontal displacement per tick for player controllers.
    pub player_speed: f32,
    /// Default upward force applied by a player jump.
    pub jump_velocity: f32,
    pub collision_policy: CollisionPolicy,
    pub gravity_order: GravityOrder,
    /// Cap on ticks run by a single `World::advance` call.
    pub max_ticks_per_advance: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            width: 800.0,
            height: 600.0,
            gravity: DEFAULT_GRAVITY,
            terminal_velocity: DEFAULT_TERMINAL_VELOCITY,
            player_speed: 5.0,
            jump_velocity: 2.0,
            collision_policy: CollisionPolicy::IncrementalSlide,
            gravity_order: GravityOrder::ClampThenGravity,
            max_ticks_per_advance: 10,
        }
    }
}

impl WorldConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        log::debug!("loaded world config: {:?}", config);
        Ok(config)
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_terminal_velocity(mut self, terminal_velocity: f32) -> Self {
        self.terminal_velocity = terminal_velocity;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    pub fn with_gravity_order(mut self, order: GravityOrder) -> Self {
        self.gravity_order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::EngineError;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WorldConfig::from_json(r#"{ "width": 1024, "gravity": 0.2 }"#).unwrap();
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.gravity, 0.2);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.tick_ms, 16);
        assert_eq!(config.collision_policy, CollisionPolicy::IncrementalSlide);
    }

    #[test]
    fn policies_parse_snake_case() {
        let config = WorldConfig::from_json(
            r#"{ "collision_policy": "binary", "gravity_order": "gravity_then_clamp" }"#,
        )
        .unwrap();
        assert_eq!(config.collision_policy, CollisionPolicy::Binary);
        assert_eq!(config.gravity_order, GravityOrder::GravityThenClamp);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = WorldConfig::from_json("{ width: }").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
