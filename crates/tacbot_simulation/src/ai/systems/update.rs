//! Decision tick: по одному BotContext на бота

use bevy::prelude::*;

use super::clock::BotClock;
use crate::ai::bot::Bot;
use crate::ai::context::{ActorSnapshot, BotContext, WorldSnapshot};
use crate::ai::timing::TimingPolicy;
use crate::components::{Actor, Health};
use crate::config::BotCvars;
use crate::nav::NavMeshResource;
use crate::DeterministicRng;

/// Snapshot всех акторов (позиция, живость, команда) на начало тика
pub fn build_world_snapshot<'a>(
    actors: impl Iterator<Item = (Entity, &'a Transform, &'a Actor, &'a Health)>,
) -> WorldSnapshot {
    let mut snapshot = WorldSnapshot::new();
    for (entity, transform, actor, health) in actors {
        snapshot.insert(
            entity,
            ActorSnapshot {
                position: transform.translation,
                alive: health.is_alive(),
                team: actor.team,
            },
        );
    }
    snapshot
}

/// Система: decision tick всех живых ботов
///
/// Порядок обхода — по Entity index (детерминизм RNG между прогонами).
/// Без NavMeshResource боты не думают (host ещё не загрузил карту).
pub fn update_bots(
    mut bots: Query<(Entity, &mut Bot)>,
    actors: Query<(Entity, &Transform, &Actor, &Health)>,
    nav: Option<Res<NavMeshResource>>,
    clock: Res<BotClock>,
    timing: Res<TimingPolicy>,
    cvars: Res<BotCvars>,
    mut rng: ResMut<DeterministicRng>,
) {
    let Some(nav) = nav else {
        return;
    };
    if cvars.stop {
        return;
    }

    let snapshot = build_world_snapshot(actors.iter());

    let mut ordered: Vec<(Entity, Mut<Bot>)> = bots.iter_mut().collect();
    ordered.sort_by_key(|(entity, _)| entity.index());

    for (entity, mut bot) in ordered {
        // Мёртвые не думают (бот без Actor/Health считается живым)
        if snapshot.get(entity).is_some_and(|actor| !actor.alive) {
            continue;
        }

        let mut ctx = BotContext {
            now: clock.now(),
            nav: nav.0.as_ref(),
            world: &snapshot,
            timing: &*timing,
            cvars: &*cvars,
            rng: &mut rng.rng,
        };
        bot.update(&mut ctx);
    }
}
