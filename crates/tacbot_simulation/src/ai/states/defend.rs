//! Defend — занять area и держать её до появления врага

use bevy::prelude::*;

use super::{react_to_enemy, BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::{BotCore, ARRIVE_TOLERANCE};
use crate::nav::{NavAreaId, RouteType};

#[derive(Debug, Default)]
pub struct DefendState {
    area: Option<NavAreaId>,
    post: Option<Vec3>,
    holding: bool,
}

impl DefendState {
    pub fn set_defend_area(&mut self, area: NavAreaId) {
        self.area = Some(area);
    }

    pub fn defend_area(&self) -> Option<NavAreaId> {
        self.area
    }

    pub fn is_holding(&self) -> bool {
        self.holding
    }
}

impl BotState for DefendState {
    fn name(&self) -> &'static str {
        "Defend"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        self.holding = false;
        self.post = self.area.and_then(|area| ctx.nav.area_center(area));
        bot.stand_up();
        bot.run();

        if let (Some(area), Some(post)) = (self.area, self.post) {
            ctx.compute_path(bot, Some(area), post, RouteType::Safest);
        }
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        if let Some(attack) = react_to_enemy(bot, ctx) {
            return StateOutcome::Command(attack);
        }

        let Some(post) = self.post else {
            return StateOutcome::Command(BotCommand::Idle);
        };

        if self.holding {
            return StateOutcome::Continue;
        }

        if bot.is_near(post, ARRIVE_TOLERANCE) {
            self.holding = true;
            bot.destroy_path();
            bot.crouch();
        } else if !bot.has_path() && !ctx.compute_path(bot, self.area, post, RouteType::Safest) {
            return StateOutcome::Command(BotCommand::Idle);
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.stand_up();
        bot.destroy_path();
        self.holding = false;
    }
}
