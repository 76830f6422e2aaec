//! Navigation service boundary
//!
//! Decision core НЕ ищет пути сам — это capability внешнего nav mesh.
//! Все запросы синхронные и без side effects при неудаче.
//!
//! `StaticNavMesh` — in-memory реализация для headless прогона и тестов.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod static_mesh;

pub use static_mesh::{StaticNavArea, StaticNavMesh};

/// Stable ID nav area (узел navigation-mesh графа)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect, Serialize, Deserialize)]
pub struct NavAreaId(pub u32);

/// Предпочтение при построении маршрута
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum RouteType {
    #[default]
    Fastest,
    Safest,
    Retreat,
}

/// Установленный путь: последовательность waypoint'ов + целевая area
#[derive(Debug, Clone, PartialEq)]
pub struct NavPath {
    pub waypoints: Vec<Vec3>,
    pub goal_area: NavAreaId,
    pub route: RouteType,
    /// Индекс следующего waypoint'а (двигает movement система)
    pub cursor: usize,
}

impl NavPath {
    pub fn new(waypoints: Vec<Vec3>, goal_area: NavAreaId, route: RouteType) -> Self {
        Self {
            waypoints,
            goal_area,
            route,
            cursor: 0,
        }
    }

    pub fn goal(&self) -> Option<Vec3> {
        self.waypoints.last().copied()
    }

    pub fn next_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.cursor).copied()
    }

    pub fn advance(&mut self) {
        if self.cursor < self.waypoints.len() {
            self.cursor += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.waypoints.len()
    }
}

/// Флаги hiding spot'а (как их размечает nav mesh)
pub mod spot_flags {
    pub const IN_COVER: u8 = 1 << 0;
    pub const GOOD_SNIPER_SPOT: u8 = 1 << 1;
    pub const IDEAL_SNIPER_SPOT: u8 = 1 << 2;
    pub const EXPOSED: u8 = 1 << 3;
}

/// Кандидат в укрытие, который отдаёт nav mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HidingSpotCandidate {
    pub position: Vec3,
    pub area: NavAreaId,
    pub flags: u8,
}

impl HidingSpotCandidate {
    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }
}

/// Навигационный сервис (nav graph), потребляемый decision core
pub trait NavMesh: Send + Sync {
    /// Area, содержащая позицию (GetNavArea)
    fn area_at(&self, position: Vec3) -> Option<NavAreaId>;

    /// Ближайшая area к позиции (даже если позиция вне mesh)
    fn nearest_area(&self, position: Vec3) -> Option<NavAreaId>;

    fn area_center(&self, area: NavAreaId) -> Option<Vec3>;

    fn area_count(&self) -> usize;

    fn area_by_index(&self, index: usize) -> Option<NavAreaId>;

    /// Путь от позиции до `goal` внутри `goal_area`. `None` — недостижимо.
    fn compute_path(
        &self,
        from: Vec3,
        goal_area: NavAreaId,
        goal: Vec3,
        route: RouteType,
    ) -> Option<NavPath>;

    /// Укрытия вокруг area в радиусе `range` (порядок стабильный)
    fn hiding_spots(&self, area: NavAreaId, range: f32) -> Vec<HidingSpotCandidate>;

    /// Areas с supply box'ами
    fn supply_box_areas(&self) -> Vec<NavAreaId>;
}

/// Resource: nav mesh, который вставляет host (engine bridge / headless main)
#[derive(Resource, Clone)]
pub struct NavMeshResource(pub Arc<dyn NavMesh>);

impl NavMeshResource {
    pub fn new(mesh: impl NavMesh + 'static) -> Self {
        Self(Arc::new(mesh))
    }
}
