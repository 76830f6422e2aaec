//! RushToSupplyBox — к ближайшему supply box (по прямой дистанции)

use bevy::prelude::*;

use super::{react_to_enemy, BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::{BotCore, ARRIVE_TOLERANCE};
use crate::nav::RouteType;

#[derive(Debug, Default)]
pub struct RushToSupplyBoxState {
    target: Option<Vec3>,
}

impl RushToSupplyBoxState {
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }
}

impl BotState for RushToSupplyBoxState {
    fn name(&self) -> &'static str {
        "RushToSupplyBox"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        self.target = None;
        bot.stand_up();
        bot.run();

        let nearest = ctx
            .nav
            .supply_box_areas()
            .into_iter()
            .filter_map(|area| ctx.nav.area_center(area).map(|center| (area, center)))
            .min_by(|(_, a), (_, b)| {
                a.distance_squared(bot.position)
                    .total_cmp(&b.distance_squared(bot.position))
            });

        if let Some((area, center)) = nearest {
            if ctx.compute_path(bot, Some(area), center, RouteType::Fastest) {
                self.target = Some(center);
            }
        }
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        if let Some(attack) = react_to_enemy(bot, ctx) {
            return StateOutcome::Command(attack);
        }

        match self.target {
            Some(target) if !bot.is_near(target, ARRIVE_TOLERANCE) && bot.has_path() => {
                StateOutcome::Continue
            }
            _ => StateOutcome::Command(BotCommand::Idle),
        }
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.destroy_path();
        self.target = None;
    }
}
