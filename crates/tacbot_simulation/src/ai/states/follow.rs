//! Follow — держаться рядом с лидером

use bevy::prelude::*;

use super::{react_to_enemy, BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::BotCore;
use crate::nav::RouteType;

/// Лидер ушёл дальше этого от последней цели пути — перестраиваем
pub const FOLLOW_REPATH_RANGE: f32 = 100.0;
/// Дальше — бежим, ближе — идём шагом
pub const FOLLOW_RUN_RANGE: f32 = 300.0;
/// Ближе — стоим
pub const FOLLOW_STOP_RANGE: f32 = 75.0;

#[derive(Debug, Default)]
pub struct FollowState {
    leader: Option<Entity>,
    last_goal: Option<Vec3>,
}

impl FollowState {
    pub fn set_leader(&mut self, leader: Option<Entity>) {
        self.leader = leader;
    }

    pub fn leader(&self) -> Option<Entity> {
        self.leader
    }
}

impl BotState for FollowState {
    fn name(&self) -> &'static str {
        "Follow"
    }

    fn on_enter(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        self.last_goal = None;
        bot.stand_up();
        bot.run();
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        let Some(leader) = ctx
            .living_actor(self.leader)
            .filter(|leader| leader.team == bot.team)
        else {
            return StateOutcome::Command(BotCommand::StopFollowing);
        };

        if let Some(attack) = react_to_enemy(bot, ctx) {
            return StateOutcome::Command(attack);
        }

        let distance = bot.position.distance(leader.position);
        if distance <= FOLLOW_STOP_RANGE {
            bot.destroy_path();
            self.last_goal = None;
            return StateOutcome::Continue;
        }

        if distance > FOLLOW_RUN_RANGE {
            bot.run();
        } else {
            bot.walk();
        }

        let drifted = self
            .last_goal
            .map_or(true, |goal| goal.distance(leader.position) > FOLLOW_REPATH_RANGE);
        if (drifted || !bot.has_path())
            && ctx.compute_path(bot, None, leader.position, RouteType::Fastest)
        {
            self.last_goal = Some(leader.position);
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.destroy_path();
        bot.run();
        self.last_goal = None;
    }
}
