//! TACBOT Simulation Core
//!
//! Decision core тактических ботов на Bevy 0.16 (headless ECS).
//!
//! - ai: FSM бота (states, controller, hiding spots, timing)
//! - nav / signals: внешние сервисы, которые видит бот
//! - killfeed: лента смертей + multi-kill callouts
//!
//! Рендер, физика, perception, pathfinding — снаружи (host).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod components;
pub mod config;
pub mod killfeed;
pub mod logger;
pub mod nav;
pub mod signals;

// Re-export базовых типов для удобства
pub use ai::{Bot, BotClock, BotCore, BotPerceptionEvent, BotPlugin, BotStateKind, BotTask, TimingPolicy};
pub use components::*;
pub use config::{BotCvars, BotProfile, ConfigError, SimulationConfig};
pub use killfeed::{DeathMessage, KillCallout, KillFeed};
pub use nav::{NavAreaId, NavMesh, NavMeshResource, RouteType, StaticNavMesh};
pub use signals::ZoneSignals;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для decision tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .add_plugins(BotPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Применить загруженный конфиг к App (timing, cvars, seed)
pub fn apply_config(app: &mut App, config: &SimulationConfig) {
    app.insert_resource(config.timing.clone())
        .insert_resource(config.cvars.clone())
        .insert_resource(DeterministicRng::new(config.seed));
}

/// Прогнать `ticks` fixed-тиков напрямую (без wall-clock накопления)
pub fn run_fixed_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T>(world: &mut World) -> Vec<u8>
where
    T: Component + std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
