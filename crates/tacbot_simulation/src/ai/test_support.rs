//! Test harness: владеет всем, на что ссылается BotContext

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::context::{ActorSnapshot, BotContext, WorldSnapshot, WorldView};
use crate::ai::core::BotCore;
use crate::ai::timing::TimingPolicy;
use crate::config::{BotCvars, BotProfile};
use crate::nav::StaticNavMesh;

pub struct TestWorld {
    pub now: f32,
    pub nav: StaticNavMesh,
    pub world: WorldSnapshot,
    pub timing: TimingPolicy,
    pub cvars: BotCvars,
    pub rng: ChaCha8Rng,
}

impl TestWorld {
    /// Коридор 10×1 areas по 100 units
    pub fn corridor() -> Self {
        Self::with_nav(StaticNavMesh::grid(10, 1, 100.0))
    }

    pub fn with_nav(nav: StaticNavMesh) -> Self {
        Self {
            now: 0.0,
            nav,
            world: WorldSnapshot::new(),
            timing: TimingPolicy::default(),
            cvars: BotCvars::default(),
            rng: ChaCha8Rng::seed_from_u64(42),
        }
    }

    pub fn ctx(&mut self) -> BotContext<'_> {
        BotContext {
            now: self.now,
            nav: &self.nav,
            world: &self.world,
            timing: &self.timing,
            cvars: &self.cvars,
            rng: &mut self.rng,
        }
    }

    pub fn spawn_actor(&mut self, index: u32, position: Vec3, team: u8) -> Entity {
        let entity = Entity::from_raw(index);
        self.world.insert(
            entity,
            ActorSnapshot {
                position,
                alive: true,
                team,
            },
        );
        entity
    }

    pub fn kill_actor(&mut self, entity: Entity) {
        if let Some(mut actor) = self.world.actor(entity) {
            actor.alive = false;
            self.world.insert(entity, actor);
        }
    }
}

/// Бот команды 1 в центре первой area коридора
pub fn test_core() -> BotCore {
    let mut core = BotCore::new(BotProfile::with_skill("Tester", 0.8), 1);
    core.position = Vec3::new(50.0, 0.0, 50.0);
    core
}
