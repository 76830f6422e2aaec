//! Hide — дойти до укрытия и сидеть там
//!
//! Путь до укрытия строит контроллер ДО активации (hide / hide_at),
//! поэтому on_enter путь не трогает.

use bevy::prelude::*;

use super::{react_to_enemy, BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::{BotCore, ARRIVE_TOLERANCE};
use crate::nav::{NavAreaId, RouteType};

#[derive(Debug, Default)]
pub struct HideState {
    search_area: Option<NavAreaId>,
    range: f32,
    /// None — прятаться бессрочно
    duration: Option<f32>,
    hold_position: bool,
    spot: Vec3,
    is_at_spot: bool,
    hide_timestamp: f32,
}

impl HideState {
    pub fn set_search_area(&mut self, area: Option<NavAreaId>) {
        self.search_area = area;
    }

    pub fn set_search_range(&mut self, range: f32) {
        self.range = range;
    }

    pub fn set_duration(&mut self, duration: Option<f32>) {
        self.duration = duration;
    }

    pub fn set_hold_position(&mut self, hold: bool) {
        self.hold_position = hold;
    }

    pub fn set_hiding_spot(&mut self, spot: Vec3) {
        self.spot = spot;
    }

    pub fn search_area(&self) -> Option<NavAreaId> {
        self.search_area
    }

    pub fn search_range(&self) -> f32 {
        self.range
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    pub fn hold_position(&self) -> bool {
        self.hold_position
    }

    pub fn hiding_spot(&self) -> Vec3 {
        self.spot
    }

    pub fn is_at_spot(&self) -> bool {
        self.is_at_spot
    }

    pub fn hide_timestamp(&self) -> f32 {
        self.hide_timestamp
    }
}

impl BotState for HideState {
    fn name(&self) -> &'static str {
        "Hide"
    }

    fn on_enter(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        self.is_at_spot = false;
        bot.run();
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        if let Some(attack) = react_to_enemy(bot, ctx) {
            return StateOutcome::Command(attack);
        }

        if !self.is_at_spot {
            if bot.is_near(self.spot, ARRIVE_TOLERANCE) {
                self.is_at_spot = true;
                self.hide_timestamp = ctx.now;
                bot.destroy_path();
                bot.crouch();
            } else if !bot.has_path() && !ctx.compute_path(bot, None, self.spot, RouteType::Fastest) {
                return StateOutcome::Command(BotCommand::Idle);
            }
            return StateOutcome::Continue;
        }

        if !self.hold_position && bot.recent_noise(ctx.now, ctx.timing.noise_memory).is_some() {
            return StateOutcome::Command(BotCommand::InvestigateNoise);
        }

        if let Some(duration) = self.duration {
            if !self.hold_position && ctx.now - self.hide_timestamp >= duration {
                return StateOutcome::Command(BotCommand::Idle);
            }
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.stand_up();
        bot.destroy_path();
        self.is_at_spot = false;
    }
}
