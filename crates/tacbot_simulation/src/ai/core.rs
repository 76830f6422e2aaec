//! BotCore — attribute block бота
//!
//! Decision core пишет сюда намерения (path, posture, aim), perception/combat
//! слой пишет непересекающийся набор полей (`perception`, `weapon`, `signals`).

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::BotProfile;
use crate::nav::{NavAreaId, NavPath};
use crate::signals::ZoneSignals;

/// Грубое намерение бота (ортогонально активному state)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum BotTask {
    #[default]
    SeekAndDestroy,
    PlantBomb,
    FindTickingBomb,
    DefuseBomb,
    GuardTickingBomb,
    GuardBombDefuser,
    GuardLooseBomb,
    GuardBombZone,
    EscapeFromBomb,
    HoldPosition,
    Follow,
    VipEscape,
    GuardVipEscapeZone,
    CollectHostages,
    RescueHostages,
    GuardHostages,
    GuardHostageRescueZone,
    MoveToLastKnownEnemyPosition,
    MoveToSniperSpot,
    Sniping,
}

/// Поза/темп движения
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Posture {
    pub crouching: bool,
    pub running: bool,
}

impl Default for Posture {
    fn default() -> Self {
        Self {
            crouching: false,
            running: true,
        }
    }
}

/// Смещение прицела (градусы): чем ниже accuracy, тем больше разброс
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct AimOffset {
    pub yaw: f32,
    pub pitch: f32,
}

/// Максимальная ошибка прицела при accuracy = 0 (градусы)
pub const AIM_MAX_ERROR_DEGREES: f32 = 10.0;

/// Услышанный шум
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Noise {
    pub position: Vec3,
    pub heard_at: f32,
}

/// То, что пишет perception слой
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Perception {
    /// Враг в поле зрения прямо сейчас
    pub visible_enemy: Option<Entity>,
    /// Последний услышанный шум
    pub noise: Option<Noise>,
}

/// То, что пишет combat слой
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct WeaponStatus {
    pub is_reloading: bool,
}

/// Attribute block бота
#[derive(Debug, Clone)]
pub struct BotCore {
    /// Entity бота (для watched-логов); None в unit-тестах
    pub entity: Option<Entity>,
    pub team: u8,
    pub profile: BotProfile,

    pub position: Vec3,
    /// Yaw взгляда (градусы, плоскость XZ)
    pub look_yaw: f32,
    pub last_known_area: Option<NavAreaId>,

    pub task: BotTask,

    /// Weak ref — валидируется через WorldView при каждом запросе
    pub enemy: Option<Entity>,
    pub last_enemy_position: Vec3,
    pub last_saw_enemy_timestamp: f32,
    pub is_attacking: bool,

    pub is_following: bool,
    pub leader: Option<Entity>,
    pub follow_timestamp: f32,
    pub allow_auto_follow_time: f32,

    pub aim_accuracy: f32,
    pub aim_offset: AimOffset,
    pub aim_offset_timestamp: f32,
    pub aim_spread_timestamp: f32,
    pub ignore_enemies_until: f32,

    pub posture: Posture,
    pub path: Option<NavPath>,

    pub perception: Perception,
    pub weapon: WeaponStatus,
    pub signals: ZoneSignals,

    pub has_bomb: bool,
    /// Позиция лежащей бомбы (выставляет task слой)
    pub loose_bomb: Option<Vec3>,
    /// Позиция тикающей бомбы (для EscapeFromBomb)
    pub planted_bomb: Option<Vec3>,
    /// Последняя entity, которую бот "использовал"
    pub used_entity: Option<Entity>,
}

impl BotCore {
    pub fn new(profile: BotProfile, team: u8) -> Self {
        Self {
            entity: None,
            team,
            profile,
            position: Vec3::ZERO,
            look_yaw: 0.0,
            last_known_area: None,
            task: BotTask::default(),
            enemy: None,
            last_enemy_position: Vec3::ZERO,
            last_saw_enemy_timestamp: f32::NEG_INFINITY,
            is_attacking: false,
            is_following: false,
            leader: None,
            follow_timestamp: 0.0,
            allow_auto_follow_time: 0.0,
            aim_accuracy: 1.0,
            aim_offset: AimOffset::default(),
            aim_offset_timestamp: 0.0,
            aim_spread_timestamp: 0.0,
            ignore_enemies_until: 0.0,
            posture: Posture::default(),
            path: None,
            perception: Perception::default(),
            weapon: WeaponStatus::default(),
            signals: ZoneSignals::default(),
            has_bomb: false,
            loose_bomb: None,
            planted_bomb: None,
            used_entity: None,
        }
    }

    pub fn set_task(&mut self, task: BotTask) {
        self.task = task;
    }

    pub fn is_sniper(&self) -> bool {
        self.profile.is_sniper
    }

    pub fn stand_up(&mut self) {
        self.posture.crouching = false;
    }

    pub fn crouch(&mut self) {
        self.posture.crouching = true;
    }

    pub fn run(&mut self) {
        self.posture.running = true;
    }

    pub fn walk(&mut self) {
        self.posture.running = false;
    }

    /// Новая точность + случайный разброс прицела в её пределах
    pub fn set_aim_offset<R: Rng + ?Sized>(&mut self, accuracy: f32, rng: &mut R) {
        let accuracy = accuracy.clamp(0.0, 1.0);
        self.aim_accuracy = accuracy;

        let error = (1.0 - accuracy) * AIM_MAX_ERROR_DEGREES;
        self.aim_offset = if error > 0.0 {
            AimOffset {
                yaw: rng.gen_range(-error..=error),
                pitch: rng.gen_range(-error..=error) * 0.5,
            }
        } else {
            AimOffset::default()
        };
    }

    pub fn destroy_path(&mut self) {
        self.path = None;
    }

    pub fn has_path(&self) -> bool {
        self.path.as_ref().is_some_and(|p| !p.is_finished())
    }

    pub fn ignore_enemies(&mut self, now: f32, duration: f32) {
        self.ignore_enemies_until = now + duration;
    }

    pub fn is_ignoring_enemies(&self, now: f32) -> bool {
        now < self.ignore_enemies_until
    }

    pub fn is_following(&self) -> bool {
        self.is_following
    }

    pub fn follow_duration(&self, now: f32) -> f32 {
        if self.is_following {
            now - self.follow_timestamp
        } else {
            0.0
        }
    }

    /// Авто-follow не должен срабатывать внутри окна подавления
    pub fn is_auto_follow_allowed(&self, now: f32) -> bool {
        now >= self.allow_auto_follow_time
    }

    /// Шум, который ещё не "забыт"
    pub fn recent_noise(&self, now: f32, memory: f32) -> Option<Noise> {
        self.perception
            .noise
            .filter(|noise| now - noise.heard_at <= memory)
    }

    pub fn forget_noise(&mut self) {
        self.perception.noise = None;
    }

    /// Дошли ли до точки (плоскость XZ)
    pub fn is_near(&self, target: Vec3, tolerance: f32) -> bool {
        let d = Vec2::new(self.position.x - target.x, self.position.z - target.z);
        d.length_squared() <= tolerance * tolerance
    }
}

/// Радиус "дошёл до точки" (world units)
pub const ARRIVE_TOLERANCE: f32 = 25.0;
