//! Hunt — прочёсывание карты в поисках врага

use bevy::prelude::*;
use rand::Rng;

use super::{react_to_enemy, BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::BotCore;
use crate::nav::RouteType;

#[derive(Debug, Default)]
pub struct HuntState {
    target: Option<Vec3>,
    /// Sighting, который уже "отработан" (не бежим туда второй раз)
    checked_sighting: Option<f32>,
}

impl HuntState {
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    /// Свежий sighting врага → туда; иначе случайная area
    fn pick_target(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        self.target = None;

        let sighting = bot.last_saw_enemy_timestamp;
        let fresh = ctx.now - sighting <= ctx.timing.hunt_enemy_memory;
        if fresh && self.checked_sighting != Some(sighting) {
            self.checked_sighting = Some(sighting);
            let goal = bot.last_enemy_position;
            if ctx.compute_path(bot, None, goal, RouteType::Fastest) {
                self.target = Some(goal);
                return;
            }
        }

        let count = ctx.nav.area_count();
        if count == 0 {
            return;
        }
        let index = ctx.rng.gen_range(0..count);
        let Some(area) = ctx.nav.area_by_index(index) else {
            return;
        };
        let Some(center) = ctx.nav.area_center(area) else {
            return;
        };
        if ctx.compute_path(bot, Some(area), center, RouteType::Fastest) {
            self.target = Some(center);
        }
    }
}

impl BotState for HuntState {
    fn name(&self) -> &'static str {
        "Hunt"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        bot.stand_up();
        bot.run();
        self.pick_target(bot, ctx);
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        if let Some(attack) = react_to_enemy(bot, ctx) {
            return StateOutcome::Command(attack);
        }

        if bot.recent_noise(ctx.now, ctx.timing.noise_memory).is_some() {
            return StateOutcome::Command(BotCommand::InvestigateNoise);
        }

        // Дошли или путь потерян — следующая цель
        if !bot.has_path() {
            self.pick_target(bot, ctx);
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        bot.destroy_path();
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::test_support::{test_core, TestWorld};
    use crate::nav::NavMesh;

    #[test]
    fn test_hunt_prefers_recent_sighting() {
        let mut tw = TestWorld::corridor();
        tw.now = 20.0;
        let mut bot = test_core();
        bot.last_enemy_position = Vec3::new(750.0, 0.0, 50.0);
        bot.last_saw_enemy_timestamp = 15.0;

        let mut hunt = HuntState::default();
        hunt.on_enter(&mut bot, &mut tw.ctx());
        assert_eq!(hunt.target(), Some(Vec3::new(750.0, 0.0, 50.0)));
        assert!(bot.has_path());
    }

    #[test]
    fn test_hunt_random_area_when_sighting_stale() {
        let mut tw = TestWorld::corridor();
        tw.now = 100.0;
        let mut bot = test_core();
        bot.last_saw_enemy_timestamp = 1.0;

        let mut hunt = HuntState::default();
        hunt.on_enter(&mut bot, &mut tw.ctx());

        let target = hunt.target().expect("corridor is fully connected");
        assert!(tw.nav.area_at(target).is_some());
    }
}
