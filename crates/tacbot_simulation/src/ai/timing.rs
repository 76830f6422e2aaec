//! TimingPolicy — все cooldown/duration константы decision core
//!
//! Случайные длительности — uniform в заявленных границах. Источник случайности
//! передаётся снаружи (`R: Rng + ?Sized`), поэтому в тестах подставляется
//! seeded ChaCha8Rng или `rand::rngs::mock::StepRng`.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// После StopFollowing авто-follow запрещён столько секунд
pub const AUTO_FOLLOW_SUPPRESSION: f32 = 10.0;
/// Радиус поиска retreat spot'а (world units)
pub const RETREAT_SEARCH_RANGE: f32 = 1000.0;
/// Игнорируем врагов пока бежим в укрытие
pub const RETREAT_IGNORE_ENEMIES: f32 = 10.0;
pub const RETREAT_HOLD_MIN: f32 = 3.0;
pub const RETREAT_HOLD_MAX: f32 = 15.0;
/// Aim offset refresh: U[base + turn·per_turn, max]
pub const AIM_REFRESH_BASE: f32 = 0.25;
pub const AIM_REFRESH_PER_TURN: f32 = 1.0;
pub const AIM_REFRESH_MAX: f32 = 1.5;
/// Шанс "присесть и держать" при атаке из укрытия
pub const CROUCH_AND_HOLD_CHANCE: f32 = 0.6;
/// Search range Hide при явно заданной точке
pub const HIDE_AT_SPOT_RANGE: f32 = 750.0;
pub const LOST_ENEMY_TIMEOUT: f32 = 3.0;
pub const NOISE_MEMORY: f32 = 5.0;
pub const HUNT_ENEMY_MEMORY: f32 = 10.0;
pub const PLANT_DURATION: f32 = 3.0;
pub const DEFUSE_DURATION: f32 = 10.0;
pub const BUY_DURATION: f32 = 2.0;
pub const ESCAPE_TIMEOUT: f32 = 20.0;

#[derive(Resource, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct TimingPolicy {
    pub auto_follow_suppression: f32,
    pub retreat_search_range: f32,
    pub retreat_ignore_enemies: f32,
    pub retreat_hold_min: f32,
    pub retreat_hold_max: f32,
    pub aim_refresh_base: f32,
    pub aim_refresh_per_turn: f32,
    pub aim_refresh_max: f32,
    pub crouch_and_hold_chance: f32,
    pub hide_at_spot_range: f32,
    pub lost_enemy_timeout: f32,
    pub noise_memory: f32,
    pub hunt_enemy_memory: f32,
    pub plant_duration: f32,
    pub defuse_duration: f32,
    pub buy_duration: f32,
    pub escape_timeout: f32,
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            auto_follow_suppression: AUTO_FOLLOW_SUPPRESSION,
            retreat_search_range: RETREAT_SEARCH_RANGE,
            retreat_ignore_enemies: RETREAT_IGNORE_ENEMIES,
            retreat_hold_min: RETREAT_HOLD_MIN,
            retreat_hold_max: RETREAT_HOLD_MAX,
            aim_refresh_base: AIM_REFRESH_BASE,
            aim_refresh_per_turn: AIM_REFRESH_PER_TURN,
            aim_refresh_max: AIM_REFRESH_MAX,
            crouch_and_hold_chance: CROUCH_AND_HOLD_CHANCE,
            hide_at_spot_range: HIDE_AT_SPOT_RANGE,
            lost_enemy_timeout: LOST_ENEMY_TIMEOUT,
            noise_memory: NOISE_MEMORY,
            hunt_enemy_memory: HUNT_ENEMY_MEMORY,
            plant_duration: PLANT_DURATION,
            defuse_duration: DEFUSE_DURATION,
            buy_duration: BUY_DURATION,
            escape_timeout: ESCAPE_TIMEOUT,
        }
    }
}

impl TimingPolicy {
    /// Uniform длительность в [min, max]
    pub fn random_duration<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        rng.gen_range(min..=max)
    }

    /// Когда разрешён авто-follow после StopFollowing в момент `now`
    pub fn auto_follow_allowed_at(&self, now: f32) -> f32 {
        now + self.auto_follow_suppression
    }

    pub fn retreat_hold_time<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        Self::random_duration(rng, self.retreat_hold_min, self.retreat_hold_max)
    }

    /// Угол поворота (0..=180°) → нормализованный "turn" 0..=1
    pub fn turn_fraction(delta_yaw_degrees: f32) -> f32 {
        (delta_yaw_degrees / 180.0).clamp(0.0, 1.0)
    }

    /// Начальная точность: skill ослабляется поворотом (180° → половина)
    pub fn initial_accuracy(skill: f32, turn: f32) -> f32 {
        skill / (1.0 + turn)
    }

    /// Через сколько обновить aim offset (чем больше поворот — тем дольше "surprise")
    pub fn aim_refresh_delay<R: Rng + ?Sized>(&self, turn: f32, rng: &mut R) -> f32 {
        let min = self.aim_refresh_base + turn * self.aim_refresh_per_turn;
        Self::random_duration(rng, min.min(self.aim_refresh_max), self.aim_refresh_max)
    }

    pub fn roll_crouch_and_hold<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen::<f32>() < self.crouch_and_hold_chance
    }
}

/// Угловая разница двух yaw (градусы) в [0, 180]
pub fn yaw_delta(from: f32, to: f32) -> f32 {
    let mut delta = (from - to).abs() % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta.abs()
}

/// Yaw направления `from → to` в плоскости XZ (0° = +X, 90° = +Z)
pub fn yaw_to(from: Vec3, to: Vec3) -> f32 {
    let dir = to - from;
    dir.z.atan2(dir.x).to_degrees()
}
