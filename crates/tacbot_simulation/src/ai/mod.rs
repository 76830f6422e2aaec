//! AI decision-making module
//!
//! Иерархический FSM бота: controller (`Bot`) владеет всеми states,
//! активен ровно один. States возвращают `BotCommand`, переходы делает
//! только controller (`set_state`: exit старого → enter нового).
//!
//! Perception и навигация — внешние сервисы (события + `NavMesh` trait).

use bevy::prelude::*;

pub mod bot;
#[cfg(test)]
mod bot_tests;
pub mod context;
pub mod core;
pub mod events;
pub mod hiding;
pub mod states;
pub mod systems;
#[cfg(test)]
pub(crate) mod test_support;
pub mod timing;
pub mod trace;

// Re-export основных типов
pub use bot::Bot;
pub use context::{ActorSnapshot, BotContext, WorldSnapshot, WorldView};
pub use self::core::{BotCore, BotTask};
pub use events::BotPerceptionEvent;
pub use hiding::{HidingSpot, HidingSpotQuery};
pub use states::{BotCommand, BotState, BotStateKind, StateOutcome};
pub use systems::BotClock;
pub use timing::TimingPolicy;
pub use trace::{StateHook, StateTrace};

use crate::config::BotCvars;
use crate::killfeed::{self, DeathMessage, KillCallout, KillFeed};

/// Bot Plugin
///
/// Регистрирует bot системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. advance_bot_clock — decision clock += fixed timestep
/// 2. sync_bot_positions — Transform → BotCore
/// 3. apply_perception_events — EnemySpotted/EnemyLost/NoiseHeard
/// 4. update_bots — decision tick (state update + commands)
/// 5. apply_bot_movement — шаг вдоль пути
/// 6. process_death_messages / expire_kill_feed — kill feed
///
/// `NavMeshResource` вставляет host (без неё боты не думают).
pub struct BotPlugin;

impl Plugin for BotPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BotPerceptionEvent>()
            .add_event::<DeathMessage>()
            .add_event::<KillCallout>()
            .init_resource::<BotClock>()
            .init_resource::<KillFeed>()
            .init_resource::<TimingPolicy>()
            .init_resource::<BotCvars>();

        app.add_systems(
            FixedUpdate,
            (
                systems::advance_bot_clock,
                systems::sync_bot_positions,
                systems::apply_perception_events,
                systems::update_bots,
                systems::apply_bot_movement,
                killfeed::process_death_messages,
                killfeed::expire_kill_feed,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}
