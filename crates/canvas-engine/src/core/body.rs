use glam::Vec2;

use crate::api::config::{CollisionPolicy, GravityOrder, WorldConfig};
use crate::api::error::{EngineError, Result};
use crate::api::types::{Axis, EntityId};
use crate::core::bounds::BoundingBox;
use crate::core::collider::{Collider, CollisionQuery};
use crate::core::resolve::resolve_step;

/// World-wide values a body needs for one update.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsEnv {
    /// World width and height. Bodies are clamped inside.
    pub bounds: Vec2,
    pub policy: CollisionPolicy,
    pub gravity_order: GravityOrder,
}

impl PhysicsEnv {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            bounds: Vec2::new(config.width, config.height),
            policy: config.collision_policy,
            gravity_order: config.gravity_order,
        }
    }
}

/// Physics state of an entity: position, velocity, pending force and the
/// collider that tracks it.
#[derive(Debug, Clone)]
pub struct Body {
    pos: Vec2,
    size: Vec2,
    /// Velocity (dx, dy).
    vel: Vec2,
    /// Force accumulated for the current tick (ddx, ddy). Cleared every update.
    force: Vec2,
    /// `None` means "take the world default on spawn".
    gravity: Option<f32>,
    terminal_velocity: Option<f32>,
    has_gravity: bool,
    on_ground: bool,
    collider: Collider,
}

impl Body {
    /// Create a body. Rejects negative or non-finite sizes.
    pub fn new(owner: EntityId, x: f32, y: f32, width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !valid(width) || !valid(height) {
            return Err(EngineError::InvalidDimension { width, height });
        }
        let pos = Vec2::new(x, y);
        let size = Vec2::new(width, height);
        Ok(Self {
            pos,
            size,
            vel: Vec2::ZERO,
            force: Vec2::ZERO,
            gravity: None,
            terminal_velocity: None,
            has_gravity: true,
            on_ground: false,
            collider: Collider::new(owner, pos, size),
        })
    }

    /// Fill unset gravity and terminal velocity from the world config.
    pub(crate) fn inherit_defaults(&mut self, config: &WorldConfig) {
        self.gravity.get_or_insert(config.gravity);
        self.terminal_velocity.get_or_insert(config.terminal_velocity);
    }

    pub(crate) fn set_owner(&mut self, owner: EntityId) {
        self.collider.owner = owner;
    }

    pub(crate) fn sync_collider(&mut self) {
        self.collider.sync(self.pos);
    }

    // -- Queries --

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn pending_force(&self) -> Vec2 {
        self.force
    }

    pub fn gravity(&self) -> f32 {
        self.gravity.unwrap_or(crate::api::config::DEFAULT_GRAVITY)
    }

    pub fn terminal_velocity(&self) -> f32 {
        self.terminal_velocity
            .unwrap_or(crate::api::config::DEFAULT_TERMINAL_VELOCITY)
    }

    pub fn has_gravity(&self) -> bool {
        self.has_gravity
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.bounding_box().center()
    }

    /// Would this body collide with someone if it stood at (x, y)?
    pub fn collides_at(&self, x: f32, y: f32, world: &(impl CollisionQuery + ?Sized)) -> bool {
        world.collides(&self.collider.hypothetical(x, y))
    }

    // -- Fluent mutators --

    pub fn set_velocity(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.vel = Vec2::new(dx, dy);
        self
    }

    pub fn set_x_velocity(&mut self, dx: f32) -> &mut Self {
        self.vel.x = dx;
        self
    }

    pub fn set_y_velocity(&mut self, dy: f32) -> &mut Self {
        self.vel.y = dy;
        self
    }

    pub fn set_x(&mut self, x: f32) -> &mut Self {
        self.pos.x = x;
        self
    }

    pub fn set_y(&mut self, y: f32) -> &mut Self {
        self.pos.y = y;
        self
    }

    /// Add a one-tick force. Forces are consumed by the next update.
    pub fn add_forces(&mut self, ddx: f32, ddy: f32) -> &mut Self {
        self.force += Vec2::new(ddx, ddy);
        self
    }

    pub fn add_x_force(&mut self, ddx: f32) -> &mut Self {
        self.force.x += ddx;
        self
    }

    pub fn add_y_force(&mut self, ddy: f32) -> &mut Self {
        self.force.y += ddy;
        self
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) -> &mut Self {
        self.has_gravity = enabled;
        self
    }

    pub fn set_gravity(&mut self, gravity: f32) -> &mut Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn set_terminal_velocity(&mut self, terminal_velocity: f32) -> &mut Self {
        self.terminal_velocity = Some(terminal_velocity.abs());
        self
    }

    // -- Physics step --

    /// Run one tick of physics. Order matters:
    /// sync collider, clamp to bounds, integrate forces, gravity, then
    /// collision-constrained movement on X and then Y.
    pub fn update(&mut self, env: &PhysicsEnv, world: &(impl CollisionQuery + ?Sized)) {
        self.collider.sync(self.pos);
        self.on_ground = false;
        self.clamp_to_bounds(env.bounds);
        self.integrate(env.gravity_order);
        self.move_axis(Axis::X, env, world);
        self.move_axis(Axis::Y, env, world);
    }

    /// Keep the body inside the world. Velocity pointing into a wall the
    /// body is pressed against is dropped so resting bodies stay put.
    fn clamp_to_bounds(&mut self, bounds: Vec2) {
        let max = (bounds - self.size).max(Vec2::ZERO);

        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.max(0.0);
        } else if self.pos.x >= max.x {
            self.pos.x = max.x;
            self.vel.x = self.vel.x.min(0.0);
        }

        if self.pos.y >= max.y {
            self.pos.y = max.y;
            self.vel.y = self.vel.y.min(0.0);
            self.on_ground = true;
        } else if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.vel.y = self.vel.y.max(0.0);
        }
    }

    fn integrate(&mut self, order: GravityOrder) {
        let limit = self.terminal_velocity().abs();
        self.vel += self.force;
        self.force = Vec2::ZERO;

        let falling = self.has_gravity && !self.on_ground;
        match order {
            GravityOrder::ClampThenGravity => {
                self.vel = self.vel.clamp(Vec2::splat(-limit), Vec2::splat(limit));
                if falling {
                    self.vel.y += self.gravity();
                }
            }
            GravityOrder::GravityThenClamp => {
                if falling {
                    self.vel.y += self.gravity();
                }
                self.vel = self.vel.clamp(Vec2::splat(-limit), Vec2::splat(limit));
            }
        }
    }

    /// Move along one axis by the current velocity, constrained by collisions.
    fn move_axis(&mut self, axis: Axis, env: &PhysicsEnv, world: &(impl CollisionQuery + ?Sized)) {
        let delta = match axis {
            Axis::X => self.vel.x,
            Axis::Y => self.vel.y,
        };
        if delta == 0.0 {
            return;
        }

        match self.displacement(axis, delta, env, world) {
            Some(step) => self.translate(axis, step),
            None => {
                log::trace!("{} blocked on {:?} (delta {})", self.collider.owner, axis, delta);
                match axis {
                    Axis::X => self.vel.x = 0.0,
                    Axis::Y => {
                        self.vel.y = 0.0;
                        if delta > 0.0 {
                            self.on_ground = true;
                        }
                    }
                }
            }
        }
    }

    /// Largest allowed step toward `delta` on `axis`, or `None` if blocked.
    /// The search never reaches past the world's extent on that axis.
    /// Does not mutate the body.
    pub fn displacement(
        &self,
        axis: Axis,
        delta: f32,
        env: &PhysicsEnv,
        world: &(impl CollisionQuery + ?Sized),
    ) -> Option<f32> {
        let extent = match axis {
            Axis::X => env.bounds.x,
            Axis::Y => env.bounds.y,
        };
        let delta = delta.clamp(-extent.max(0.0), extent.max(0.0));
        resolve_step(env.policy, delta, |step| {
            let (x, y) = match axis {
                Axis::X => (self.pos.x + step, self.pos.y),
                Axis::Y => (self.pos.x, self.pos.y + step),
            };
            !self.collides_at(x, y, world)
        })
    }

    pub(crate) fn translate(&mut self, axis: Axis, step: f32) {
        match axis {
            Axis::X => self.pos.x += step,
            Axis::Y => self.pos.y += step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collider::NoCollisions;

    fn env() -> PhysicsEnv {
        PhysicsEnv::from_config(&WorldConfig::default())
    }

    fn body(x: f32, y: f32, w: f32, h: f32) -> Body {
        let mut b = Body::new(EntityId(1), x, y, w, h).unwrap();
        b.inherit_defaults(&WorldConfig::default());
        b
    }

    fn wall(x: f32, y: f32, w: f32, h: f32) -> Collider {
        Collider::new(EntityId(99), Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn rejects_negative_dimensions() {
        let err = Body::new(EntityId(1), 0.0, 0.0, -1.0, 10.0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimension { .. }));
        assert!(Body::new(EntityId(1), 0.0, 0.0, 5.0, f32::NAN).is_err());
        assert!(Body::new(EntityId(1), 0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn velocity_is_clamped_to_terminal() {
        let mut b = body(100.0, 100.0, 10.0, 10.0);
        b.set_gravity_enabled(false);
        b.add_forces(50.0, -50.0);
        b.update(&env(), &NoCollisions);
        assert_eq!(b.velocity(), Vec2::new(2.0, -2.0));
    }

    #[test]
    fn forces_last_one_tick() {
        let mut b = body(100.0, 100.0, 10.0, 10.0);
        b.set_gravity_enabled(false);
        b.add_x_force(1.0);
        b.update(&env(), &NoCollisions);
        assert_eq!(b.pending_force(), Vec2::ZERO);
        assert_eq!(b.velocity().x, 1.0);
        b.update(&env(), &NoCollisions);
        assert_eq!(b.velocity().x, 1.0, "force must not be applied twice");
    }

    #[test]
    fn add_x_force_uses_its_argument() {
        let mut b = body(0.0, 0.0, 1.0, 1.0);
        b.add_x_force(0.5).add_x_force(0.25);
        assert_eq!(b.pending_force(), Vec2::new(0.75, 0.0));
    }

    #[test]
    fn clamp_then_gravity_can_overshoot_for_one_tick() {
        let mut b = body(100.0, 100.0, 10.0, 10.0);
        b.set_velocity(0.0, 2.0);
        b.update(&env(), &NoCollisions);
        let expected = 2.0 + b.gravity();
        assert!((b.velocity().y - expected).abs() < 1e-6, "dy={}", b.velocity().y);
    }

    #[test]
    fn gravity_then_clamp_stays_within_terminal() {
        let env = PhysicsEnv {
            gravity_order: GravityOrder::GravityThenClamp,
            ..env()
        };
        let mut b = body(100.0, 0.0, 10.0, 10.0);
        for _ in 0..200 {
            b.update(&env, &NoCollisions);
            let v = b.velocity();
            assert!(v.x.abs() <= 2.0 && v.y.abs() <= 2.0, "v={:?}", v);
        }
    }

    #[test]
    fn no_gravity_at_top_never_falls() {
        let mut b = body(10.0, 0.0, 10.0, 10.0);
        b.set_gravity_enabled(false);
        for _ in 0..100 {
            b.update(&env(), &NoCollisions);
            assert_eq!(b.velocity().y, 0.0);
        }
        assert_eq!(b.position().y, 0.0);
    }

    #[test]
    fn falls_to_floor_and_rests_exactly() {
        let mut b = body(10.0, 0.0, 20.0, 20.0);
        let floor = 600.0 - 20.0;
        for _ in 0..1000 {
            b.update(&env(), &NoCollisions);
        }
        assert_eq!(b.position().y, floor);
        assert!(b.on_ground());
        assert_eq!(b.velocity().y, 0.0);
    }

    #[test]
    fn landing_tick_clamps_and_grounds() {
        let mut b = body(10.0, 579.0, 20.0, 20.0);
        b.set_velocity(0.0, 2.0);
        b.update(&env(), &NoCollisions); // moves past the floor
        assert!(!b.on_ground());
        b.update(&env(), &NoCollisions); // clamped back
        assert_eq!(b.position().y, 580.0);
        assert!(b.on_ground());
    }

    #[test]
    fn clamps_inside_world() {
        let mut b = body(-30.0, -30.0, 10.0, 10.0);
        b.set_gravity_enabled(false);
        b.update(&env(), &NoCollisions);
        assert_eq!(b.position(), Vec2::ZERO);

        let mut b = body(900.0, 100.0, 10.0, 10.0);
        b.set_gravity_enabled(false);
        b.update(&env(), &NoCollisions);
        assert_eq!(b.position().x, 790.0);
    }

    #[test]
    fn slide_stops_at_obstacle_without_tunnelling() {
        // Obstacle 2 units to the right of the body's right edge.
        let obstacle = [wall(12.0, 0.0, 10.0, 10.0)];
        let mut b = body(0.0, 0.0, 10.0, 10.0);
        b.set_gravity_enabled(false).set_terminal_velocity(10.0).set_velocity(5.0, 0.0);

        b.update(&env(), &obstacle[..]);
        let advanced = b.position().x;
        assert!(advanced <= 2.0 + 1e-4, "tunnelled: x={}", advanced);
        assert!(advanced > 1.9, "x={}", advanced);
        assert_eq!(b.velocity().x, 5.0, "a nonzero step fit, velocity kept");

        b.update(&env(), &obstacle[..]);
        assert_eq!(b.velocity().x, 0.0, "flush against obstacle, no step fits");
        assert!(b.position().x <= 2.0 + 1e-4);
    }

    #[test]
    fn binary_policy_cancels_axis() {
        let env = PhysicsEnv {
            policy: CollisionPolicy::Binary,
            ..env()
        };
        let obstacle = [wall(12.0, 0.0, 10.0, 10.0)];
        let mut b = body(0.0, 0.0, 10.0, 10.0);
        b.set_gravity_enabled(false).set_velocity(2.0, 0.0);
        b.set_x(1.0);
        b.update(&env, &obstacle[..]);
        assert_eq!(b.position().x, 1.0);
        assert_eq!(b.velocity().x, 0.0);
    }

    #[test]
    fn blocked_downward_sets_on_ground() {
        let floor = [wall(0.0, 20.0, 100.0, 10.0)];
        let mut b = body(10.0, 10.0, 10.0, 10.0);
        b.update(&env(), &floor[..]);
        assert!(b.on_ground());
        assert_eq!(b.velocity().y, 0.0);
        assert_eq!(b.position().y, 10.0);
    }

    #[test]
    fn blocked_upward_does_not_ground() {
        let ceiling = [wall(0.0, 0.0, 100.0, 10.0)];
        let mut b = body(10.0, 10.0, 10.0, 10.0);
        b.set_gravity_enabled(false).set_velocity(0.0, -1.0);
        b.update(&env(), &ceiling[..]);
        assert!(!b.on_ground());
        assert_eq!(b.velocity().y, 0.0);
    }

    #[test]
    fn own_collider_is_ignored() {
        let mut b = body(10.0, 10.0, 10.0, 10.0);
        b.set_gravity_enabled(false).set_velocity(1.0, 0.0);
        let me = [*b.collider()];
        b.update(&env(), &me[..]);
        assert_eq!(b.position().x, 11.0);
    }

    /// Counts queries against a fixed set of colliders.
    struct Counting<'a> {
        colliders: &'a [Collider],
        queries: std::cell::Cell<u32>,
    }

    impl CollisionQuery for Counting<'_> {
        fn collides(&self, candidate: &Collider) -> bool {
            self.queries.set(self.queries.get() + 1);
            self.colliders.collides(candidate)
        }
    }

    #[test]
    fn huge_delta_search_limited_to_world_extent() {
        let walls = [wall(12.0, 0.0, 10.0, 10.0)];
        let world = Counting { colliders: &walls, queries: std::cell::Cell::new(0) };
        let b = body(0.0, 0.0, 10.0, 10.0);

        let step = b.displacement(Axis::X, 1.0e9, &env(), &world).unwrap();
        assert!(step <= 2.0 && step > 1.8, "step={}", step);
        // 800 wide world: at most 8000 candidates
        assert!(world.queries.get() <= 8001, "queries={}", world.queries.get());
    }

    #[test]
    fn center_of_body() {
        let b = body(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.center(), Vec2::new(25.0, 40.0));
    }
}
