//! Idle — "что дальше?": перебирает приоритеты и сразу уходит в другой state

use super::{react_to_enemy, BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::BotCore;

#[derive(Debug, Default)]
pub struct IdleState;

impl BotState for IdleState {
    fn name(&self) -> &'static str {
        "Idle"
    }

    fn on_enter(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.destroy_path();
        bot.run();
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        if let Some(attack) = react_to_enemy(bot, ctx) {
            return StateOutcome::Command(attack);
        }

        // Follow продолжается через Idle (после атаки, после потери пути)
        if bot.is_following() {
            let leader_valid = ctx
                .living_actor(bot.leader)
                .is_some_and(|leader| leader.team == bot.team);
            return StateOutcome::Command(if leader_valid {
                BotCommand::ContinueFollowing
            } else {
                BotCommand::StopFollowing
            });
        }

        if bot.recent_noise(ctx.now, ctx.timing.noise_memory).is_some() {
            return StateOutcome::Command(BotCommand::InvestigateNoise);
        }

        if bot.has_bomb && bot.signals.in_bomb_zone() {
            return StateOutcome::Command(BotCommand::PlantBomb);
        }

        if !bot.has_bomb && bot.loose_bomb.is_some() {
            return StateOutcome::Command(BotCommand::FetchBomb);
        }

        StateOutcome::Command(BotCommand::Hunt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::core::Noise;
    use crate::ai::test_support::{test_core, TestWorld};
    use crate::signals::SIGNAL_BOMB;
    use bevy::prelude::*;

    fn decide(bot: &mut BotCore, tw: &mut TestWorld) -> StateOutcome {
        IdleState.on_update(bot, &mut tw.ctx())
    }

    #[test]
    fn test_idle_defaults_to_hunt() {
        let mut tw = TestWorld::corridor();
        let mut bot = test_core();
        assert_eq!(decide(&mut bot, &mut tw), StateOutcome::Command(BotCommand::Hunt));
    }

    #[test]
    fn test_idle_priorities() {
        let mut tw = TestWorld::corridor();
        let mut bot = test_core();

        bot.has_bomb = true;
        bot.signals.signal(SIGNAL_BOMB);
        bot.signals.update();
        assert_eq!(decide(&mut bot, &mut tw), StateOutcome::Command(BotCommand::PlantBomb));

        // Шум важнее бомбы
        bot.perception.noise = Some(Noise {
            position: Vec3::new(450.0, 0.0, 50.0),
            heard_at: 0.0,
        });
        assert_eq!(
            decide(&mut bot, &mut tw),
            StateOutcome::Command(BotCommand::InvestigateNoise)
        );

        // Враг важнее всего
        let enemy = tw.spawn_actor(10, Vec3::new(350.0, 0.0, 50.0), 2);
        bot.perception.visible_enemy = Some(enemy);
        assert_eq!(
            decide(&mut bot, &mut tw),
            StateOutcome::Command(BotCommand::Attack(enemy))
        );
    }

    #[test]
    fn test_idle_resumes_or_drops_follow() {
        let mut tw = TestWorld::corridor();
        let mut bot = test_core();
        let leader = tw.spawn_actor(5, Vec3::new(250.0, 0.0, 50.0), 1);
        bot.is_following = true;
        bot.leader = Some(leader);

        assert_eq!(
            decide(&mut bot, &mut tw),
            StateOutcome::Command(BotCommand::ContinueFollowing)
        );

        tw.kill_actor(leader);
        assert_eq!(
            decide(&mut bot, &mut tw),
            StateOutcome::Command(BotCommand::StopFollowing)
        );
    }
}
