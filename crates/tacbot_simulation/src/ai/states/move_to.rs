//! MoveTo — дойти до точки и вернуться в Idle

use bevy::prelude::*;

use super::{react_to_enemy, BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::{BotCore, ARRIVE_TOLERANCE};
use crate::nav::RouteType;

#[derive(Debug, Default)]
pub struct MoveToState {
    goal: Vec3,
    route: RouteType,
}

impl MoveToState {
    pub fn set_goal_position(&mut self, goal: Vec3) {
        self.goal = goal;
    }

    pub fn set_route_type(&mut self, route: RouteType) {
        self.route = route;
    }

    pub fn goal(&self) -> Vec3 {
        self.goal
    }

    pub fn route(&self) -> RouteType {
        self.route
    }
}

impl BotState for MoveToState {
    fn name(&self) -> &'static str {
        "MoveTo"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        bot.stand_up();
        bot.run();
        // Неудача видна в on_update как отсутствие пути
        ctx.compute_path(bot, None, self.goal, self.route);
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        if let Some(attack) = react_to_enemy(bot, ctx) {
            return StateOutcome::Command(attack);
        }

        if bot.is_near(self.goal, ARRIVE_TOLERANCE) || !bot.has_path() {
            return StateOutcome::Command(BotCommand::Idle);
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.destroy_path();
    }
}
