//! BotClock — время decision core (секунды симуляции)

use bevy::prelude::*;

/// Resource: накопленное fixed-время; все timestamps ботов в этой шкале
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct BotClock {
    pub elapsed: f32,
}

impl BotClock {
    pub fn now(&self) -> f32 {
        self.elapsed
    }
}

/// Система: +fixed timestep за каждый прогон FixedUpdate
pub fn advance_bot_clock(mut clock: ResMut<BotClock>, time: Res<Time<Fixed>>) {
    clock.elapsed += time.timestep().as_secs_f32();
}
