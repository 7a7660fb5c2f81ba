use crate::api::config::WorldConfig;
use crate::api::error::Result;
use crate::api::types::EntityId;
use crate::components::controller::PlayerController;
use crate::components::shape::{Color, ImageId, Shape};
use crate::core::body::{Body, PhysicsEnv};
use crate::core::collider::CollisionQuery;
use crate::input::intents::Intents;

/// An entity is a physics body plus optional render data and an optional
/// input controller. Capabilities are combined per instance.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    pub body: Body,
    /// Render data. Entities without a shape are invisible.
    pub shape: Option<Shape>,
    /// Input-to-movement mapping. Only players have one.
    pub controller: Option<PlayerController>,
}

impl Entity {
    /// Create a bare entity. Fails on negative or non-finite size.
    pub fn new(id: EntityId, x: f32, y: f32, width: f32, height: f32) -> Result<Self> {
        Ok(Self {
            id,
            tag: String::new(),
            body: Body::new(id, x, y, width, height)?,
            shape: None,
            controller: None,
        })
    }

    pub fn rectangle(
        id: EntityId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    ) -> Result<Self> {
        Ok(Self::new(id, x, y, width, height)?.with_shape(Shape::Rectangle { color }))
    }

    pub fn sprite(
        id: EntityId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: ImageId,
    ) -> Result<Self> {
        Ok(Self::new(id, x, y, width, height)?.with_shape(Shape::Sprite { image }))
    }

    /// `(x, y)` is the top-left of the circle's bounding box.
    pub fn circle(id: EntityId, x: f32, y: f32, radius: f32, color: Color) -> Result<Self> {
        let diameter = radius * 2.0;
        Ok(Self::new(id, x, y, diameter, diameter)?.with_shape(Shape::Circle { radius, color }))
    }

    /// A sprite driven by a `PlayerController`.
    pub fn player(
        id: EntityId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: ImageId,
    ) -> Result<Self> {
        let sprite = Self::sprite(id, x, y, width, height, image)?;
        Ok(sprite.with_controller(PlayerController::new()))
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn with_controller(mut self, controller: PlayerController) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_velocity(mut self, dx: f32, dy: f32) -> Self {
        self.body.set_velocity(dx, dy);
        self
    }

    pub fn with_gravity(mut self, enabled: bool) -> Self {
        self.body.set_gravity_enabled(enabled);
        self
    }

    pub(crate) fn on_spawn(&mut self, config: &WorldConfig) {
        self.body.set_owner(self.id);
        self.body.inherit_defaults(config);
        self.body.sync_collider();
        if let Some(controller) = &mut self.controller {
            controller.inherit_defaults(config);
        }
    }

    /// Controls (if any), then physics.
    pub fn update(
        &mut self,
        intents: &Intents,
        env: &PhysicsEnv,
        world: &(impl CollisionQuery + ?Sized),
    ) {
        if let Some(controller) = &mut self.controller {
            controller.apply(&mut self.body, intents, env, world);
        }
        self.body.update(env, world);
        if let Some(controller) = &mut self.controller {
            controller.after_update(&self.body);
        }
    }
}
