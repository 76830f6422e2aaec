//! Kinematic движение бота вдоль установленного пути
//!
//! Decision core только ставит path и posture. Здесь — простейший
//! kinematic step (без физики): один waypoint за раз, XZ + высота waypoint'а.

use bevy::prelude::*;

use crate::ai::bot::Bot;

/// Скорость бега (units/sec)
pub const RUN_SPEED: f32 = 250.0;
/// Скорость шага (units/sec)
pub const WALK_SPEED: f32 = 130.0;

/// Waypoint считается достигнутым ближе этого
const WAYPOINT_TOLERANCE: f32 = 1.0;

/// Скорость для позы: присед — вдвое медленнее
pub fn movement_speed(running: bool, crouching: bool) -> f32 {
    let base = if running { RUN_SPEED } else { WALK_SPEED };
    if crouching {
        base * 0.5
    } else {
        base
    }
}

/// Система: Transform бота шагает к следующему waypoint'у
pub fn apply_bot_movement(mut bots: Query<(&mut Bot, &mut Transform)>, time: Res<Time<Fixed>>) {
    let delta = time.timestep().as_secs_f32();

    for (mut bot, mut transform) in bots.iter_mut() {
        let bot = &mut *bot;
        let speed = movement_speed(bot.core.posture.running, bot.core.posture.crouching);

        let Some(path) = bot.core.path.as_mut() else {
            continue;
        };
        let Some(waypoint) = path.next_waypoint() else {
            continue;
        };

        let to_waypoint = waypoint - transform.translation;
        let distance = to_waypoint.length();
        let step = speed * delta;

        if distance <= step || distance <= WAYPOINT_TOLERANCE {
            transform.translation = waypoint;
            path.advance();
        } else {
            transform.translation += to_waypoint / distance * step;
        }

        bot.core.position = transform.translation;
    }
}
