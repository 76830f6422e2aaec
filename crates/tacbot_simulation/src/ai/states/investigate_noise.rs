//! InvestigateNoise — проверить, откуда шум

use bevy::prelude::*;

use super::{react_to_enemy, BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::{BotCore, ARRIVE_TOLERANCE};
use crate::nav::RouteType;

#[derive(Debug, Default)]
pub struct InvestigateNoiseState {
    target: Option<Vec3>,
}

impl InvestigateNoiseState {
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }
}

impl BotState for InvestigateNoiseState {
    fn name(&self) -> &'static str {
        "InvestigateNoise"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        self.target = bot.perception.noise.map(|noise| noise.position);
        // Крадёмся
        bot.walk();
        if let Some(target) = self.target {
            ctx.compute_path(bot, None, target, RouteType::Fastest);
        }
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        if let Some(attack) = react_to_enemy(bot, ctx) {
            return StateOutcome::Command(attack);
        }

        let done = match self.target {
            Some(target) => bot.is_near(target, ARRIVE_TOLERANCE) || !bot.has_path(),
            None => true,
        };
        if done {
            bot.forget_noise();
            return StateOutcome::Command(BotCommand::Idle);
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.destroy_path();
        bot.run();
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::core::Noise;
    use crate::ai::test_support::{test_core, TestWorld};

    #[test]
    fn test_noise_forgotten_on_arrival() {
        let mut tw = TestWorld::corridor();
        let mut bot = test_core();
        bot.perception.noise = Some(Noise {
            position: Vec3::new(350.0, 0.0, 50.0),
            heard_at: 0.0,
        });

        let mut state = InvestigateNoiseState::default();
        state.on_enter(&mut bot, &mut tw.ctx());
        assert_eq!(state.target(), Some(Vec3::new(350.0, 0.0, 50.0)));
        assert!(!bot.posture.running);
        assert_eq!(state.on_update(&mut bot, &mut tw.ctx()), StateOutcome::Continue);

        bot.position = Vec3::new(340.0, 0.0, 50.0);
        assert_eq!(
            state.on_update(&mut bot, &mut tw.ctx()),
            StateOutcome::Command(BotCommand::Idle)
        );
        assert!(bot.perception.noise.is_none());
    }
}
