pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use crate::api::config::{CollisionPolicy, GravityOrder, WorldConfig};
pub use crate::api::error::{EngineError, Result};
pub use crate::api::types::{Axis, EntityId};
pub use crate::components::controller::PlayerController;
pub use crate::components::entity::Entity;
pub use crate::components::shape::{Color, ImageId, Shape};
pub use crate::core::body::{Body, PhysicsEnv};
pub use crate::core::bounds::BoundingBox;
pub use crate::core::collider::{Collider, CollisionQuery, NoCollisions};
pub use crate::core::resolve::SLIDE_STEP;
pub use crate::core::time::FixedTimestep;
pub use crate::core::world::World;
pub use crate::input::intents::{Intent, Intents, KeyBindings};
pub use crate::input::queue::{InputEvent, InputQueue};
pub use crate::renderer::command::{DrawCommand, DrawKind};
pub use crate::renderer::traits::{DrawBuffer, NullRenderer, Renderer};
pub use crate::systems::render::{draw_command, render_frame};
