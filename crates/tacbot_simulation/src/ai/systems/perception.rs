//! Perception systems: Transform → BotCore, события → BotCore::perception

use bevy::prelude::*;

use super::clock::BotClock;
use crate::ai::bot::Bot;
use crate::ai::core::Noise;
use crate::ai::events::BotPerceptionEvent;

/// Система: позиция из Transform + привязка entity (для watched-логов)
pub fn sync_bot_positions(mut bots: Query<(Entity, &Transform, &mut Bot)>) {
    for (entity, transform, mut bot) in bots.iter_mut() {
        bot.core.entity = Some(entity);
        bot.core.position = transform.translation;
    }
}

/// Система: BotPerceptionEvent → perception поля бота
pub fn apply_perception_events(
    mut events: EventReader<BotPerceptionEvent>,
    mut bots: Query<&mut Bot>,
    clock: Res<BotClock>,
) {
    for event in events.read() {
        match event {
            BotPerceptionEvent::EnemySpotted { observer, target } => {
                let Ok(mut bot) = bots.get_mut(*observer) else {
                    continue;
                };
                bot.core.perception.visible_enemy = Some(*target);
            }

            BotPerceptionEvent::EnemyLost { observer, target } => {
                let Ok(mut bot) = bots.get_mut(*observer) else {
                    continue;
                };
                if bot.core.perception.visible_enemy == Some(*target) {
                    bot.core.perception.visible_enemy = None;
                }
            }

            BotPerceptionEvent::NoiseHeard { listener, position } => {
                let Ok(mut bot) = bots.get_mut(*listener) else {
                    continue;
                };
                bot.core.perception.noise = Some(Noise {
                    position: *position,
                    heard_at: clock.now(),
                });
            }
        }
    }
}
