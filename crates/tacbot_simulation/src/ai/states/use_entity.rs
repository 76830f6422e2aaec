//! UseEntity — подойти к entity и "использовать" её (hostage, кнопка, ...)

use bevy::prelude::*;

use super::{BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::BotCore;
use crate::nav::RouteType;

/// Дистанция "use" (world units, плоскость XZ)
pub const USE_RANGE: f32 = 50.0;

#[derive(Debug, Default)]
pub struct UseEntityState {
    entity: Option<Entity>,
}

impl UseEntityState {
    pub fn set_entity(&mut self, entity: Entity) {
        self.entity = Some(entity);
    }

    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }
}

impl BotState for UseEntityState {
    fn name(&self) -> &'static str {
        "UseEntity"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        bot.run();
        if let Some(target) = self.entity.and_then(|e| ctx.world.actor(e)) {
            ctx.compute_path(bot, None, target.position, RouteType::Fastest);
        }
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        let Some((entity, target)) = self
            .entity
            .and_then(|e| ctx.world.actor(e).map(|actor| (e, actor)))
        else {
            return StateOutcome::Command(BotCommand::Idle);
        };

        if bot.is_near(target.position, USE_RANGE) {
            bot.used_entity = Some(entity);
            return StateOutcome::Command(BotCommand::Idle);
        }

        if !bot.has_path() && !ctx.compute_path(bot, None, target.position, RouteType::Fastest) {
            return StateOutcome::Command(BotCommand::Idle);
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.destroy_path();
    }
}
