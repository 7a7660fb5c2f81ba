use glam::Vec2;

use crate::api::config::WorldConfig;
use crate::api::error::{EngineError, Result};
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::body::PhysicsEnv;
use crate::core::collider::{Collider, CollisionQuery};
use crate::core::time::FixedTimestep;
use crate::input::intents::Intents;
use crate::renderer::traits::Renderer;
use crate::systems::render::render_frame;

/// Owns the entities and runs the update/draw loop.
///
/// Entities live in a flat Vec; insertion order is update and draw order.
/// Within a tick an entity sees the others through their colliders, which
/// each entity resyncs at the start of its own update. Entities earlier in
/// the list have therefore already resynced when later ones query them.
pub struct World {
    config: WorldConfig,
    entities: Vec<Entity>,
    timestep: FixedTimestep,
    running: bool,
    next_id: u32,
    ticks: u64,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        let timestep = FixedTimestep::new(config.tick_ms, config.max_ticks_per_advance);
        Self {
            config,
            entities: Vec::with_capacity(64),
            timestep,
            running: false,
            next_id: 1,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Width and height of the world.
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.config.width, self.config.height)
    }

    /// Generate the next unused entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // -- Entity management --

    /// Register an entity, injecting world defaults for gravity, terminal
    /// velocity and controller tuning. Returns the stored entity so it can be
    /// configured further.
    pub fn add_entity(&mut self, mut entity: Entity) -> Result<&mut Entity> {
        if self.entities.iter().any(|e| e.id == entity.id) {
            log::debug!("rejected duplicate entity {}", entity.id);
            return Err(EngineError::DuplicateEntity(entity.id));
        }
        self.next_id = self.next_id.max(entity.id.0.saturating_add(1));
        entity.on_spawn(&self.config);
        log::debug!("spawned entity {} {:?}", entity.id, entity.tag);

        let idx = self.entities.len();
        self.entities.push(entity);
        Ok(&mut self.entities[idx])
    }

    /// Remove an entity by ID, keeping the order of the rest.
    /// Unknown IDs are a no-op.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        match self.entities.iter().position(|e| e.id == id) {
            Some(idx) => {
                log::debug!("despawned entity {}", id);
                Some(self.entities.remove(idx))
            }
            None => {
                log::warn!("remove_entity: {} is not in the world", id);
                None
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// True iff `candidate` overlaps any other entity's synced collider.
    pub fn query_collision(&self, candidate: &Collider) -> bool {
        self.collides(candidate)
    }

    // -- Loop --

    /// Update every entity in insertion order.
    pub fn update(&mut self, intents: &Intents) {
        let env = PhysicsEnv::from_config(&self.config);
        for idx in 0..self.entities.len() {
            let (before, rest) = self.entities.split_at_mut(idx);
            let Some((entity, after)) = rest.split_first_mut() else {
                break;
            };
            let others = Others { before, after };
            entity.update(intents, &env, &others);
        }
    }

    /// Clear the surface and draw every entity in insertion order.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        render_frame(self.entities.iter(), self.config.width, self.config.height, renderer);
    }

    /// One full tick: update all, then clear and redraw.
    pub fn tick<R: Renderer + ?Sized>(&mut self, intents: &Intents, renderer: &mut R) {
        self.update(intents);
        self.draw(renderer);
        self.ticks += 1;
    }

    /// Run the ticks due after `elapsed_ms` of wall time. Nothing runs while
    /// stopped. Each tick is a full fixed step; elapsed time never scales
    /// physics. Returns the number of ticks run.
    pub fn advance<R: Renderer + ?Sized>(
        &mut self,
        elapsed_ms: f32,
        intents: &Intents,
        renderer: &mut R,
    ) -> u32 {
        if !self.running {
            return 0;
        }
        let steps = self.timestep.accumulate(elapsed_ms);
        for _ in 0..steps {
            self.tick(intents, renderer);
        }
        steps
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!("world started ({} ms ticks, {} entities)", self.config.tick_ms, self.len());
            self.timestep.reset();
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("world stopped after {} ticks", self.ticks);
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Change the world bounds. Entities are not moved here; each one is
    /// clamped into the new bounds on its next update.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width < 0.0 || height < 0.0 {
            log::warn!("resize to {}x{} clamped to non-negative", width, height);
        }
        self.config.width = width.max(0.0);
        self.config.height = height.max(0.0);
        log::info!("world resized to {}x{}", self.config.width, self.config.height);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl CollisionQuery for World {
    fn collides(&self, candidate: &Collider) -> bool {
        self.entities
            .iter()
            .any(|e| e.id != candidate.owner && e.body.collider().overlaps(candidate))
    }
}

/// Every entity except the one being updated.
struct Others<'a> {
    before: &'a [Entity],
    after: &'a [Entity],
}

impl CollisionQuery for Others<'_> {
    fn collides(&self, candidate: &Collider) -> bool {
        self.before
            .iter()
            .chain(self.after.iter())
            .any(|e| e.id != candidate.owner && e.body.collider().overlaps(candidate))
    }
}
