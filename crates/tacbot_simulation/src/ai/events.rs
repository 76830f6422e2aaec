//! Bot events — вход perception слоя в decision core
//!
//! Perception (vision cone, звук) живёт снаружи: host шлёт события,
//! `apply_perception_events` пишет их в `BotCore::perception`.
//! Реакция (Attack, InvestigateNoise) — на следующем decision tick.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, PartialEq)]
pub enum BotPerceptionEvent {
    /// Враг вошёл в поле зрения
    EnemySpotted {
        /// Бот, который видит
        observer: Entity,
        target: Entity,
    },

    /// Враг пропал из поля зрения (или despawned)
    EnemyLost {
        observer: Entity,
        target: Entity,
    },

    /// Бот услышал шум (шаги, выстрел)
    NoiseHeard {
        listener: Entity,
        position: Vec3,
    },
}
