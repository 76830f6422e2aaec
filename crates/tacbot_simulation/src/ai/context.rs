//! BotContext — внешние сервисы, доступные боту на один decision tick

use bevy::prelude::*;
use rand::RngCore;
use std::collections::HashMap;

use crate::ai::core::BotCore;
use crate::ai::timing::TimingPolicy;
use crate::config::BotCvars;
use crate::nav::{NavAreaId, NavMesh, NavPath, RouteType};

/// Что decision core знает о другой entity (враг, лидер)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    pub position: Vec3,
    pub alive: bool,
    pub team: u8,
}

/// Read-only взгляд на мир (позиции и живость акторов)
pub trait WorldView {
    fn actor(&self, entity: Entity) -> Option<ActorSnapshot>;
}

/// Snapshot акторов на начало тика (строится системой из ECS)
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    actors: HashMap<Entity, ActorSnapshot>,
}

impl WorldSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity, actor: ActorSnapshot) {
        self.actors.insert(entity, actor);
    }

    pub fn get(&self, entity: Entity) -> Option<&ActorSnapshot> {
        self.actors.get(&entity)
    }

    pub fn remove(&mut self, entity: Entity) {
        self.actors.remove(&entity);
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

impl WorldView for WorldSnapshot {
    fn actor(&self, entity: Entity) -> Option<ActorSnapshot> {
        self.actors.get(&entity).copied()
    }
}

/// Сервисы на один decision tick
pub struct BotContext<'a> {
    /// Время симуляции (секунды)
    pub now: f32,
    pub nav: &'a dyn NavMesh,
    pub world: &'a dyn WorldView,
    pub timing: &'a TimingPolicy,
    pub cvars: &'a BotCvars,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> BotContext<'a> {
    /// Живой актор или None (weak ref revalidation)
    pub fn living_actor(&self, entity: Option<Entity>) -> Option<ActorSnapshot> {
        entity
            .and_then(|e| self.world.actor(e))
            .filter(|actor| actor.alive)
    }

    /// Враг, которого perception видит прямо сейчас и на которого можно реагировать
    pub fn sensed_enemy(&self, bot: &BotCore) -> Option<Entity> {
        if bot.is_ignoring_enemies(self.now) {
            return None;
        }
        let enemy = bot.perception.visible_enemy?;
        self.living_actor(Some(enemy))
            .filter(|actor| actor.team != bot.team)
            .map(|_| enemy)
    }

    /// Area, в которой бот сейчас (или последняя известная)
    pub fn current_area(&self, bot: &BotCore) -> Option<NavAreaId> {
        self.nav.area_at(bot.position).or(bot.last_known_area)
    }

    /// Построить путь, ничего не устанавливая
    pub fn plan_path(
        &self,
        from: Vec3,
        goal_area: Option<NavAreaId>,
        goal: Vec3,
        route: RouteType,
    ) -> Option<NavPath> {
        let area = goal_area
            .or_else(|| self.nav.area_at(goal))
            .or_else(|| self.nav.nearest_area(goal))?;
        self.nav.compute_path(from, area, goal, route)
    }

    /// Построить путь и установить его боту. При неудаче текущий path не трогаем.
    pub fn compute_path(
        &self,
        bot: &mut BotCore,
        goal_area: Option<NavAreaId>,
        goal: Vec3,
        route: RouteType,
    ) -> bool {
        match self.plan_path(bot.position, goal_area, goal, route) {
            Some(path) => {
                bot.path = Some(path);
                true
            }
            None => false,
        }
    }
}
