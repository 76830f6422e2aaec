//! Базовые компоненты акторов: Actor, Health

use bevy::prelude::*;

/// Команда "никто" (зрители, объекты)
pub const TEAM_UNASSIGNED: u8 = 0;
pub const TEAM_TERRORIST: u8 = 1;
pub const TEAM_CT: u8 = 2;

/// Актор (бот или игрок) — всё, что попадает в world snapshot ботов
///
/// Health добавляется через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health)]
pub struct Actor {
    pub team: u8,
}

impl Actor {
    pub fn new(team: u8) -> Self {
        Self { team }
    }

    pub fn is_teammate(&self, other: &Actor) -> bool {
        self.team != TEAM_UNASSIGNED && self.team == other.team
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }
}
