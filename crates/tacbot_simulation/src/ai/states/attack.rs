//! Attack — бой с текущим врагом
//!
//! Единственный state, который выставляет `is_attacking` (в on_enter).
//! Снимает флаг контроллер (`Bot::end_attack`), ровно один раз на выход.
//! on_exit идемпотентен: повторный вызов после выхода ничего не меняет.

use super::{BotCommand, BotState, StateOutcome};
use crate::ai::context::BotContext;
use crate::ai::core::{BotCore, BotTask};
use crate::ai::timing::yaw_to;
use crate::nav::RouteType;

#[derive(Debug, Default)]
pub struct AttackState {
    crouch_and_hold: bool,
    /// Между on_enter и on_exit
    engaged: bool,
    /// Присели мы сами (значит и встаём сами)
    crouched: bool,
    entered_at: f32,
}

impl AttackState {
    pub fn set_crouch_and_hold(&mut self, crouch_and_hold: bool) {
        self.crouch_and_hold = crouch_and_hold;
    }

    pub fn crouch_and_hold(&self) -> bool {
        self.crouch_and_hold
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn entered_at(&self) -> f32 {
        self.entered_at
    }
}

impl BotState for AttackState {
    fn name(&self) -> &'static str {
        "Attack"
    }

    fn on_enter(&mut self, bot: &mut BotCore, ctx: &mut BotContext) {
        bot.is_attacking = true;
        bot.destroy_path();
        self.engaged = true;
        self.entered_at = ctx.now;
        self.crouched = false;

        if self.crouch_and_hold {
            bot.crouch();
            self.crouched = true;
        }
    }

    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome {
        let Some(enemy) = bot.enemy else {
            return StateOutcome::Command(BotCommand::StopAttacking);
        };
        let Some(actor) = ctx.living_actor(Some(enemy)) else {
            return StateOutcome::Command(BotCommand::StopAttacking);
        };

        // Perception показывает другого врага — переключаемся (attack() только сменит enemy)
        if let Some(seen) = ctx.sensed_enemy(bot) {
            if seen != enemy {
                return StateOutcome::Command(BotCommand::Attack(seen));
            }

            bot.last_enemy_position = actor.position;
            bot.last_saw_enemy_timestamp = ctx.now;
            bot.look_yaw = yaw_to(bot.position, actor.position);

            if ctx.now >= bot.aim_offset_timestamp {
                let skill = bot.profile.skill;
                bot.set_aim_offset(skill, &mut *ctx.rng);
                bot.aim_offset_timestamp = ctx.now + ctx.timing.aim_refresh_delay(0.0, &mut *ctx.rng);
            }
            return StateOutcome::Continue;
        }

        if ctx.now - bot.last_saw_enemy_timestamp > ctx.timing.lost_enemy_timeout {
            bot.set_task(BotTask::MoveToLastKnownEnemyPosition);
            return StateOutcome::Command(BotCommand::MoveTo {
                position: bot.last_enemy_position,
                route: RouteType::Fastest,
            });
        }

        StateOutcome::Continue
    }

    fn on_exit(&mut self, bot: &mut BotCore, _ctx: &mut BotContext) {
        if !self.engaged {
            return;
        }
        if self.crouched {
            bot.stand_up();
            self.crouched = false;
        }
        self.engaged = false;
    }
}
