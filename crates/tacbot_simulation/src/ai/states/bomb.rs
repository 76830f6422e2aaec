//! Bomb scenario states: PlantBomb, DefuseBomb, FetchBomb, EscapeFromBomb
//!
//! Где бомба — решает task слой (`BotCore::loose_bomb` / `planted_bomb`),
//! states только идут туда и выдерживают таймеры.

use bevy::prelude::*;

use super::{react_to_enemy, BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::{BotCore, BotTask, ARRIVE_TOLERANCE};
use crate::ai::hiding::find_nearby_retreat_spot;
use crate::nav::RouteType;

// ============================================================================
// PlantBomb
// ============================================================================

#[derive(Debug, Default)]
pub struct PlantBombState {
    started_at: f32,
}

impl BotState for PlantBombState {
    fn name(&self) -> &'static str {
        "PlantBomb"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        self.started_at = ctx.now;
        bot.destroy_path();
        bot.crouch();
    }

    /// Закладка не прерывается врагом: либо доводим, либо зона/бомба потеряны
    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        if !bot.has_bomb || !bot.signals.in_bomb_zone() {
            return StateOutcome::Command(BotCommand::Idle);
        }

        if ctx.now - self.started_at < ctx.timing.plant_duration {
            return StateOutcome::Continue;
        }

        bot.has_bomb = false;
        bot.planted_bomb = Some(bot.position);
        bot.set_task(BotTask::GuardTickingBomb);
        StateOutcome::Command(BotCommand::Hide {
            search_from: None,
            duration: None,
            range: ctx.timing.hide_at_spot_range,
            hold_position: true,
        })
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.stand_up();
    }
}

// ============================================================================
// DefuseBomb
// ============================================================================

#[derive(Debug, Default)]
pub struct DefuseBombState {
    /// Момент начала разминирования (после прихода к бомбе)
    started_at: Option<f32>,
}

impl DefuseBombState {
    pub fn is_defusing(&self) -> bool {
        self.started_at.is_some()
    }
}

impl BotState for DefuseBombState {
    fn name(&self) -> &'static str {
        "DefuseBomb"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        self.started_at = None;
        bot.run();
        if let Some(bomb) = bot.planted_bomb {
            ctx.compute_path(bot, None, bomb, RouteType::Fastest);
        }
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        let Some(bomb) = bot.planted_bomb else {
            return StateOutcome::Command(BotCommand::Idle);
        };

        if let Some(attack) = react_to_enemy(bot, ctx) {
            return StateOutcome::Command(attack);
        }

        match self.started_at {
            None => {
                if bot.is_near(bomb, ARRIVE_TOLERANCE) {
                    self.started_at = Some(ctx.now);
                    bot.destroy_path();
                    bot.crouch();
                } else if !bot.has_path() && !ctx.compute_path(bot, None, bomb, RouteType::Fastest) {
                    return StateOutcome::Command(BotCommand::Idle);
                }
            }
            Some(started_at) => {
                if ctx.now - started_at >= ctx.timing.defuse_duration {
                    bot.planted_bomb = None;
                    return StateOutcome::Command(BotCommand::Idle);
                }
            }
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.stand_up();
        bot.destroy_path();
        self.started_at = None;
    }
}

// ============================================================================
// FetchBomb
// ============================================================================

#[derive(Debug, Default)]
pub struct FetchBombState;

impl BotState for FetchBombState {
    fn name(&self) -> &'static str {
        "FetchBomb"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        bot.run();
        if let Some(bomb) = bot.loose_bomb {
            ctx.compute_path(bot, None, bomb, RouteType::Fastest);
        }
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        let Some(bomb) = bot.loose_bomb else {
            return StateOutcome::Command(BotCommand::Idle);
        };

        if let Some(attack) = react_to_enemy(bot, ctx) {
            return StateOutcome::Command(attack);
        }

        if bot.is_near(bomb, ARRIVE_TOLERANCE) {
            bot.loose_bomb = None;
            bot.has_bomb = true;
            return StateOutcome::Command(BotCommand::Idle);
        }

        if !bot.has_path() && !ctx.compute_path(bot, None, bomb, RouteType::Fastest) {
            return StateOutcome::Command(BotCommand::Idle);
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.destroy_path();
    }
}

// ============================================================================
// EscapeFromBomb
// ============================================================================

#[derive(Debug, Default)]
pub struct EscapeFromBombState {
    spot: Option<Vec3>,
    started_at: f32,
}

impl EscapeFromBombState {
    pub fn escape_spot(&self) -> Option<Vec3> {
        self.spot
    }
}

impl BotState for EscapeFromBombState {
    fn name(&self) -> &'static str {
        "EscapeFromBomb"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        self.started_at = ctx.now;
        self.spot = None;
        bot.stand_up();
        bot.run();

        let Some(area) = ctx.current_area(bot) else {
            return;
        };
        let spot = find_nearby_retreat_spot(
            ctx.nav,
            bot.position,
            area,
            bot.planted_bomb,
            ctx.timing.retreat_search_range,
        );
        if let Some(spot) = spot {
            if ctx.compute_path(bot, Some(spot.area), spot.position, RouteType::Retreat) {
                self.spot = Some(spot.position);
            }
        }
    }

    /// Бегство не прерывается врагом
    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        let Some(spot) = self.spot else {
            return StateOutcome::Command(BotCommand::Idle);
        };

        let timed_out = ctx.now - self.started_at >= ctx.timing.escape_timeout;
        if timed_out || bot.is_near(spot, ARRIVE_TOLERANCE) || !bot.has_path() {
            return StateOutcome::Command(BotCommand::Idle);
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.destroy_path();
        self.spot = None;
    }
}
