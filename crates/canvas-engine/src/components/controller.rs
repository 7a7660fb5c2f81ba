use crate::api::config::WorldConfig;
use crate::api::types::Axis;
use crate::core::body::{Body, PhysicsEnv};
use crate::core::collider::CollisionQuery;
use crate::input::intents::Intents;

/// Maps held intents onto a body before its physics step.
///
/// Horizontal and downward movement are direct displacements resolved
/// against collisions; jumping is a one-tick upward force.
#[derive(Debug, Clone)]
pub struct PlayerController {
    speed: Option<f32>,
    jump_velocity: Option<f32>,
    /// Latched false by a jump, re-armed once the body is grounded again.
    can_jump: bool,
}

impl PlayerController {
    pub fn new() -> Self {
        Self {
            speed: None,
            jump_velocity: None,
            can_jump: true,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_jump_velocity(mut self, jump_velocity: f32) -> Self {
        self.jump_velocity = Some(jump_velocity);
        self
    }

    pub(crate) fn inherit_defaults(&mut self, config: &WorldConfig) {
        self.speed.get_or_insert(config.player_speed);
        self.jump_velocity.get_or_insert(config.jump_velocity);
    }

    pub fn speed(&self) -> f32 {
        self.speed.unwrap_or(WorldConfig::default().player_speed)
    }

    pub fn jump_velocity(&self) -> f32 {
        self.jump_velocity
            .unwrap_or(WorldConfig::default().jump_velocity)
    }

    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Apply this tick's intents. Runs before `Body::update`.
    pub fn apply(
        &mut self,
        body: &mut Body,
        intents: &Intents,
        env: &PhysicsEnv,
        world: &(impl CollisionQuery + ?Sized),
    ) {
        let speed = self.speed();
        let max = env.bounds - body.size();

        if intents.left || intents.right {
            body.set_x_velocity(0.0);
        }
        if intents.right && body.position().x < max.x {
            displace(body, Axis::X, speed, env, world);
        }
        if intents.left && body.position().x > 0.0 {
            displace(body, Axis::X, -speed, env, world);
        }
        // on_ground still reflects the previous tick here
        if intents.up && body.position().y > 0.0 && self.can_jump && body.on_ground() {
            body.add_y_force(-self.jump_velocity());
            self.can_jump = false;
        }
        if intents.down && body.position().y < max.y {
            displace(body, Axis::Y, speed, env, world);
        }
    }

    /// Re-arm the jump once the body has settled on something.
    pub fn after_update(&mut self, body: &Body) {
        if body.on_ground() && body.velocity().y >= 0.0 {
            self.can_jump = true;
        }
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

fn displace(
    body: &mut Body,
    axis: Axis,
    delta: f32,
    env: &PhysicsEnv,
    world: &(impl CollisionQuery + ?Sized),
) {
    if let Some(step) = body.displacement(axis, delta, env, world) {
        body.translate(axis, step);
    }
}
