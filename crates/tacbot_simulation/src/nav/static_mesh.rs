//! In-memory nav mesh: прямоугольные areas в плоскости XZ + adjacency list
//!
//! Маршрут — breadth-first по графу areas (центры areas как waypoints).
//! Достаточно для headless симуляции и тестов; production mesh приходит от host'а.

use bevy::prelude::*;
use std::collections::VecDeque;

use super::{HidingSpotCandidate, NavAreaId, NavMesh, NavPath, RouteType};

/// Прямоугольная area (XZ), высота y общая для всей area
#[derive(Debug, Clone)]
pub struct StaticNavArea {
    pub id: NavAreaId,
    pub min: Vec2,
    pub max: Vec2,
    pub height: f32,
    pub neighbors: Vec<NavAreaId>,
}

impl StaticNavArea {
    pub fn contains(&self, position: Vec3) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.z >= self.min.y
            && position.z <= self.max.y
    }

    pub fn center(&self) -> Vec3 {
        let c = (self.min + self.max) * 0.5;
        Vec3::new(c.x, self.height, c.y)
    }

    fn distance_squared_xz(&self, position: Vec3) -> f32 {
        let clamped = Vec2::new(
            position.x.clamp(self.min.x, self.max.x),
            position.z.clamp(self.min.y, self.max.y),
        );
        clamped.distance_squared(Vec2::new(position.x, position.z))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticNavMesh {
    areas: Vec<StaticNavArea>,
    spots: Vec<HidingSpotCandidate>,
    supply_boxes: Vec<NavAreaId>,
}

impl StaticNavMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сетка `cols × rows` квадратных areas со стороной `cell`, 4-связность
    ///
    /// Area (col, row) покрывает x ∈ [col·cell, (col+1)·cell], z ∈ [row·cell, (row+1)·cell].
    pub fn grid(cols: u32, rows: u32, cell: f32) -> Self {
        let mut mesh = Self::new();
        for row in 0..rows {
            for col in 0..cols {
                let min = Vec2::new(col as f32 * cell, row as f32 * cell);
                mesh.add_area(min, min + Vec2::splat(cell));
            }
        }
        for row in 0..rows {
            for col in 0..cols {
                let id = NavAreaId(row * cols + col);
                if col + 1 < cols {
                    mesh.connect(id, NavAreaId(row * cols + col + 1));
                }
                if row + 1 < rows {
                    mesh.connect(id, NavAreaId((row + 1) * cols + col));
                }
            }
        }
        mesh
    }

    pub fn add_area(&mut self, min: Vec2, max: Vec2) -> NavAreaId {
        let id = NavAreaId(self.areas.len() as u32);
        self.areas.push(StaticNavArea {
            id,
            min,
            max,
            height: 0.0,
            neighbors: Vec::new(),
        });
        id
    }

    /// Двусторонняя связь между areas
    pub fn connect(&mut self, a: NavAreaId, b: NavAreaId) {
        if a == b {
            return;
        }
        if let Some(area) = self.areas.get_mut(a.0 as usize) {
            if !area.neighbors.contains(&b) {
                area.neighbors.push(b);
            }
        }
        if let Some(area) = self.areas.get_mut(b.0 as usize) {
            if !area.neighbors.contains(&a) {
                area.neighbors.push(a);
            }
        }
    }

    /// Удалить связь (для тестов "нет пути")
    pub fn disconnect(&mut self, a: NavAreaId, b: NavAreaId) {
        if let Some(area) = self.areas.get_mut(a.0 as usize) {
            area.neighbors.retain(|n| *n != b);
        }
        if let Some(area) = self.areas.get_mut(b.0 as usize) {
            area.neighbors.retain(|n| *n != a);
        }
    }

    /// Добавить hiding spot; area определяется по позиции (или ближайшая)
    pub fn add_hiding_spot(&mut self, position: Vec3, flags: u8) -> Option<NavAreaId> {
        let area = self.area_at(position).or_else(|| self.nearest_area(position))?;
        self.spots.push(HidingSpotCandidate {
            position,
            area,
            flags,
        });
        Some(area)
    }

    pub fn add_supply_box(&mut self, area: NavAreaId) {
        if !self.supply_boxes.contains(&area) {
            self.supply_boxes.push(area);
        }
    }

    pub fn area(&self, id: NavAreaId) -> Option<&StaticNavArea> {
        self.areas.get(id.0 as usize)
    }

    /// BFS по adjacency: цепочка areas от `start` до `goal` включительно
    fn area_route(&self, start: NavAreaId, goal: NavAreaId) -> Option<Vec<NavAreaId>> {
        if start == goal {
            return Some(vec![goal]);
        }

        let mut came_from: Vec<Option<NavAreaId>> = vec![None; self.areas.len()];
        let mut queue = VecDeque::new();
        queue.push_back(start);
        came_from[start.0 as usize] = Some(start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                break;
            }
            let Some(area) = self.area(current) else {
                continue;
            };
            for &next in &area.neighbors {
                let slot = came_from.get_mut(next.0 as usize)?;
                if slot.is_none() {
                    *slot = Some(current);
                    queue.push_back(next);
                }
            }
        }

        came_from.get(goal.0 as usize).copied().flatten()?;

        let mut route = vec![goal];
        let mut current = goal;
        while current != start {
            current = came_from[current.0 as usize]?;
            route.push(current);
        }
        route.reverse();
        Some(route)
    }
}

impl NavMesh for StaticNavMesh {
    fn area_at(&self, position: Vec3) -> Option<NavAreaId> {
        self.areas.iter().find(|a| a.contains(position)).map(|a| a.id)
    }

    fn nearest_area(&self, position: Vec3) -> Option<NavAreaId> {
        self.areas
            .iter()
            .map(|a| (a.id, a.distance_squared_xz(position)))
            .min_by(|(_, da), (_, db)| da.total_cmp(db))
            .map(|(id, _)| id)
    }

    fn area_center(&self, area: NavAreaId) -> Option<Vec3> {
        self.area(area).map(StaticNavArea::center)
    }

    fn area_count(&self) -> usize {
        self.areas.len()
    }

    fn area_by_index(&self, index: usize) -> Option<NavAreaId> {
        self.areas.get(index).map(|a| a.id)
    }

    fn compute_path(
        &self,
        from: Vec3,
        goal_area: NavAreaId,
        goal: Vec3,
        route: RouteType,
    ) -> Option<NavPath> {
        let start = self.area_at(from).or_else(|| self.nearest_area(from))?;
        self.area(goal_area)?;

        let areas = self.area_route(start, goal_area)?;

        // Центры промежуточных areas, затем сама цель
        let mut waypoints: Vec<Vec3> = areas
            .iter()
            .skip(1)
            .take(areas.len().saturating_sub(2))
            .filter_map(|id| self.area_center(*id))
            .collect();
        waypoints.push(goal);

        Some(NavPath::new(waypoints, goal_area, route))
    }

    fn hiding_spots(&self, area: NavAreaId, range: f32) -> Vec<HidingSpotCandidate> {
        let Some(center) = self.area_center(area) else {
            return Vec::new();
        };
        self.spots
            .iter()
            .filter(|s| s.position.distance(center) <= range)
            .copied()
            .collect()
    }

    fn supply_box_areas(&self) -> Vec<NavAreaId> {
        self.supply_boxes.clone()
    }
}
