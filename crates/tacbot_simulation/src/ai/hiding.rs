//! HidingSpotSelector — выбор укрытия / точки отступления
//!
//! Кандидатов отдаёт nav mesh, здесь только фильтрация и scoring.
//! Детерминизм: никакой случайности, tie-break по дистанции, затем по порядку
//! кандидатов — повторный запрос на том же мире даёт ту же точку.

use bevy::prelude::*;

use crate::nav::{spot_flags, HidingSpotCandidate, NavAreaId, NavMesh};

/// Выбранное укрытие (эфемерное, пересчитывается на каждый запрос)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HidingSpot {
    pub position: Vec3,
    pub area: NavAreaId,
}

impl From<HidingSpotCandidate> for HidingSpot {
    fn from(candidate: HidingSpotCandidate) -> Self {
        Self {
            position: candidate.position,
            area: candidate.area,
        }
    }
}

/// Параметры поиска укрытия
#[derive(Debug, Clone, Copy)]
pub struct HidingSpotQuery {
    /// Где сейчас бот (для nearest режима и tie-break)
    pub agent_position: Vec3,
    /// Откуда ищем (центр search area или позиция бота)
    pub source_position: Vec3,
    pub source_area: NavAreaId,
    pub range: f32,
    pub prefer_sniping: bool,
    /// Ближайшее укрытие вместо лучшего (когда важнее успеть, чем спрятаться хорошо)
    pub use_nearest: bool,
}

const COVER_SCORE: f32 = 1.0;
const GOOD_SNIPER_SCORE: f32 = 1.0;
const IDEAL_SNIPER_SCORE: f32 = 2.0;
const EXPOSED_PENALTY: f32 = 1.0;
const PROXIMITY_WEIGHT: f32 = 0.5;
const SCORE_EPSILON: f32 = 1e-4;

pub fn score_spot(candidate: &HidingSpotCandidate, source_distance: f32, range: f32, prefer_sniping: bool) -> f32 {
    let mut score = 0.0;

    if candidate.has_flag(spot_flags::IN_COVER) {
        score += COVER_SCORE;
    }
    if prefer_sniping {
        if candidate.has_flag(spot_flags::IDEAL_SNIPER_SPOT) {
            score += IDEAL_SNIPER_SCORE;
        } else if candidate.has_flag(spot_flags::GOOD_SNIPER_SPOT) {
            score += GOOD_SNIPER_SCORE;
        }
    }
    if candidate.has_flag(spot_flags::EXPOSED) {
        score -= EXPOSED_PENALTY;
    }
    if range > 0.0 {
        score += PROXIMITY_WEIGHT * (1.0 - (source_distance / range).clamp(0.0, 1.0));
    }

    score
}

/// Лучшее (или ближайшее) укрытие вокруг source area
pub fn find_nearby_hiding_spot(nav: &dyn NavMesh, query: &HidingSpotQuery) -> Option<HidingSpot> {
    let candidates: Vec<HidingSpotCandidate> = nav
        .hiding_spots(query.source_area, query.range)
        .into_iter()
        .filter(|c| c.position.distance(query.source_position) <= query.range)
        .collect();

    if query.use_nearest {
        return nearest_to(&candidates, query.agent_position).map(HidingSpot::from);
    }

    let mut best: Option<(f32, f32, &HidingSpotCandidate)> = None;
    for candidate in &candidates {
        let score = score_spot(
            candidate,
            candidate.position.distance(query.source_position),
            query.range,
            query.prefer_sniping,
        );
        let agent_distance = candidate.position.distance(query.agent_position);

        let better = match best {
            None => true,
            Some((best_score, best_distance, _)) => {
                score > best_score + SCORE_EPSILON
                    || ((score - best_score).abs() <= SCORE_EPSILON && agent_distance < best_distance)
            }
        };
        if better {
            best = Some((score, agent_distance, candidate));
        }
    }

    best.map(|(_, _, candidate)| HidingSpot::from(*candidate))
}

/// Точка отступления: не exposed, дальше от угрозы, чем бот; ближайшая к боту
pub fn find_nearby_retreat_spot(
    nav: &dyn NavMesh,
    agent_position: Vec3,
    agent_area: NavAreaId,
    threat: Option<Vec3>,
    max_range: f32,
) -> Option<HidingSpot> {
    let agent_threat_distance = threat.map(|t| agent_position.distance(t));

    let candidates: Vec<HidingSpotCandidate> = nav
        .hiding_spots(agent_area, max_range)
        .into_iter()
        .filter(|c| c.position.distance(agent_position) <= max_range)
        .filter(|c| !c.has_flag(spot_flags::EXPOSED))
        .filter(|c| match (threat, agent_threat_distance) {
            (Some(t), Some(current)) => c.position.distance(t) > current,
            _ => true,
        })
        .collect();

    nearest_to(&candidates, agent_position).map(HidingSpot::from)
}

/// Первый из равноудалённых выигрывает (min_by стабилен)
fn nearest_to(candidates: &[HidingSpotCandidate], position: Vec3) -> Option<HidingSpotCandidate> {
    candidates
        .iter()
        .min_by(|a, b| {
            a.position
                .distance_squared(position)
                .total_cmp(&b.position.distance_squared(position))
        })
        .copied()
}
