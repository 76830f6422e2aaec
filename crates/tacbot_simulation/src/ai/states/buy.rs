//! Buy — закупка в buy zone (стоим на месте `buy_duration`)

use super::{BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::BotCore;

#[derive(Debug, Default)]
pub struct BuyState {
    started_at: f32,
}

impl BotState for BuyState {
    fn name(&self) -> &'static str {
        "Buy"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        self.started_at = ctx.now;
        bot.destroy_path();
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        if !bot.signals.in_buy_zone() || ctx.now - self.started_at >= ctx.timing.buy_duration {
            return StateOutcome::Command(BotCommand::Idle);
        }
        StateOutcome::Continue
    }
}
