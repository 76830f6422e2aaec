//! Конфигурация ботов: cvars, профили, timing policy
//!
//! Всё имеет Default (работает без файла). JSON — опциональный override
//! для headless прогонов и балансировки.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ai::timing::TimingPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Глобальные переключатели ботов (аналог bot_* cvars)
#[derive(Resource, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct BotCvars {
    /// Боты никогда не атакуют
    pub zombie: bool,
    /// Decision update полностью остановлен
    pub stop: bool,
    /// Разрешён ли авто-follow за живыми игроками
    pub allow_auto_follow: bool,
}

impl Default for BotCvars {
    fn default() -> Self {
        Self {
            zombie: false,
            stop: false,
            allow_auto_follow: true,
        }
    }
}

/// Профиль бота (сложность, реакция, снайпер)
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct BotProfile {
    pub name: String,
    /// 0.0..=1.0
    pub skill: f32,
    /// Секунды до реакции на увиденного врага
    pub reaction_time: f32,
    /// Секунды между обнаружением и первым выстрелом
    pub attack_delay: f32,
    pub is_sniper: bool,
}

impl Default for BotProfile {
    fn default() -> Self {
        Self {
            name: "Bot".to_string(),
            skill: 0.5,
            reaction_time: 0.3,
            attack_delay: 0.0,
            is_sniper: false,
        }
    }
}

impl BotProfile {
    pub fn with_skill(name: impl Into<String>, skill: f32) -> Self {
        Self {
            name: name.into(),
            skill,
            ..Default::default()
        }
    }

    /// Decision-лог начала атаки: реакция, surprise (задержка уточнения прицела), attack delay
    pub fn attack_begin_summary(&self, surprise: f32) -> String {
        format!(
            "ATTACK BEGIN (reaction time = {}, surprise time = {}, attack delay = {})",
            self.reaction_time, surprise, self.attack_delay
        )
    }
}

/// Полный конфиг headless симуляции
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub timing: TimingPolicy,
    pub cvars: BotCvars,
    pub profiles: Vec<BotProfile>,
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;

        if t.retreat_hold_min < 0.0 || t.retreat_hold_min > t.retreat_hold_max {
            return Err(ConfigError::Invalid(format!(
                "retreat hold range [{}, {}] is empty",
                t.retreat_hold_min, t.retreat_hold_max
            )));
        }
        if t.aim_refresh_base < 0.0 || t.aim_refresh_base + t.aim_refresh_per_turn > t.aim_refresh_max {
            return Err(ConfigError::Invalid(format!(
                "aim refresh window [{} + {}, {}] is empty for a full turn",
                t.aim_refresh_base, t.aim_refresh_per_turn, t.aim_refresh_max
            )));
        }
        if !(0.0..=1.0).contains(&t.crouch_and_hold_chance) {
            return Err(ConfigError::Invalid(format!(
                "crouch_and_hold_chance {} outside [0, 1]",
                t.crouch_and_hold_chance
            )));
        }
        for (name, value) in [
            ("auto_follow_suppression", t.auto_follow_suppression),
            ("retreat_search_range", t.retreat_search_range),
            ("retreat_ignore_enemies", t.retreat_ignore_enemies),
            ("hide_at_spot_range", t.hide_at_spot_range),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be >= 0 (got {})", name, value)));
            }
        }

        if let Some(profile) = self.profiles.iter().find(|p| !(0.0..=1.0).contains(&p.skill)) {
            return Err(ConfigError::Invalid(format!(
                "profile '{}' skill {} outside [0, 1]",
                profile.name, profile.skill
            )));
        }

        Ok(())
    }
}
