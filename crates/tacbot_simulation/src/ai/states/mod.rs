//! Bot states — по одному struct'у на тактический режим
//!
//! Все instances живут внутри `BotStates` (одно поле на вариант, создаются
//! один раз, перенастраиваются при активации). Активный state выбирается
//! тегом `BotStateKind`; `BotStates::get_mut` — dispatch table.
//!
//! State НЕ вызывает переходы сам: `on_update` возвращает `BotCommand`,
//! контроллер применяет его после выхода из hook'а.

use bevy::prelude::*;

use crate::ai::context::BotContext;
use crate::ai::core::BotCore;
use crate::nav::{NavAreaId, RouteType};

pub mod attack;
pub mod bomb;
pub mod buy;
pub mod defend;
pub mod follow;
pub mod hide;
pub mod hunt;
pub mod idle;
pub mod investigate_noise;
pub mod move_to;
pub mod supply_box;
pub mod use_entity;

pub use attack::AttackState;
pub use bomb::{DefuseBombState, EscapeFromBombState, FetchBombState, PlantBombState};
pub use buy::BuyState;
pub use defend::DefendState;
pub use follow::FollowState;
pub use hide::HideState;
pub use hunt::HuntState;
pub use idle::IdleState;
pub use investigate_noise::InvestigateNoiseState;
pub use move_to::MoveToState;
pub use supply_box::RushToSupplyBoxState;
pub use use_entity::UseEntityState;

/// Тег активного state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum BotStateKind {
    Idle,
    Hunt,
    Attack,
    MoveTo,
    Hide,
    Follow,
    InvestigateNoise,
    PlantBomb,
    DefuseBomb,
    FetchBomb,
    EscapeFromBomb,
    Defend,
    UseEntity,
    RushToSupplyBox,
    Buy,
}

/// Переход, который state запрашивает у контроллера
#[derive(Debug, Clone, PartialEq)]
pub enum BotCommand {
    Idle,
    Hunt,
    Attack(Entity),
    StopAttacking,
    MoveTo {
        position: Vec3,
        route: RouteType,
    },
    Hide {
        search_from: Option<NavAreaId>,
        duration: Option<f32>,
        range: f32,
        hold_position: bool,
    },
    HideAt {
        spot: Vec3,
        duration: Option<f32>,
        hold_position: bool,
    },
    Retreat,
    ContinueFollowing,
    StopFollowing,
    InvestigateNoise,
    PlantBomb,
    DefuseBomb,
    FetchBomb,
    EscapeFromBomb,
    Defend(NavAreaId),
    UseEntity(Entity),
    RushToSupplyBox,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateOutcome {
    Continue,
    Command(BotCommand),
}

/// Контракт тактического поведения
pub trait BotState {
    fn name(&self) -> &'static str;

    /// Одноразовая настройка при активации
    fn on_enter(&mut self, _bot: &mut BotCore, _ctx: &mut BotContext) {}

    /// Per-tick update активного state
    fn on_update(&mut self, bot: &mut BotCore, ctx: &mut BotContext) -> StateOutcome;

    /// Teardown: обязан освободить всё, что state захватил (path и т.п.)
    fn on_exit(&mut self, _bot: &mut BotCore, _ctx: &mut BotContext) {}
}

/// Все state instances бота
#[derive(Debug, Default)]
pub struct BotStates {
    pub idle: IdleState,
    pub hunt: HuntState,
    pub attack: AttackState,
    pub move_to: MoveToState,
    pub hide: HideState,
    pub follow: FollowState,
    pub investigate_noise: InvestigateNoiseState,
    pub plant_bomb: PlantBombState,
    pub defuse_bomb: DefuseBombState,
    pub fetch_bomb: FetchBombState,
    pub escape_from_bomb: EscapeFromBombState,
    pub defend: DefendState,
    pub use_entity: UseEntityState,
    pub supply_box_rush: RushToSupplyBoxState,
    pub buy: BuyState,
}

impl BotStates {
    pub fn get(&self, kind: BotStateKind) -> &dyn BotState {
        match kind {
            BotStateKind::Idle => &self.idle,
            BotStateKind::Hunt => &self.hunt,
            BotStateKind::Attack => &self.attack,
            BotStateKind::MoveTo => &self.move_to,
            BotStateKind::Hide => &self.hide,
            BotStateKind::Follow => &self.follow,
            BotStateKind::InvestigateNoise => &self.investigate_noise,
            BotStateKind::PlantBomb => &self.plant_bomb,
            BotStateKind::DefuseBomb => &self.defuse_bomb,
            BotStateKind::FetchBomb => &self.fetch_bomb,
            BotStateKind::EscapeFromBomb => &self.escape_from_bomb,
            BotStateKind::Defend => &self.defend,
            BotStateKind::UseEntity => &self.use_entity,
            BotStateKind::RushToSupplyBox => &self.supply_box_rush,
            BotStateKind::Buy => &self.buy,
        }
    }

    pub fn get_mut(&mut self, kind: BotStateKind) -> &mut dyn BotState {
        match kind {
            BotStateKind::Idle => &mut self.idle,
            BotStateKind::Hunt => &mut self.hunt,
            BotStateKind::Attack => &mut self.attack,
            BotStateKind::MoveTo => &mut self.move_to,
            BotStateKind::Hide => &mut self.hide,
            BotStateKind::Follow => &mut self.follow,
            BotStateKind::InvestigateNoise => &mut self.investigate_noise,
            BotStateKind::PlantBomb => &mut self.plant_bomb,
            BotStateKind::DefuseBomb => &mut self.defuse_bomb,
            BotStateKind::FetchBomb => &mut self.fetch_bomb,
            BotStateKind::EscapeFromBomb => &mut self.escape_from_bomb,
            BotStateKind::Defend => &mut self.defend,
            BotStateKind::UseEntity => &mut self.use_entity,
            BotStateKind::RushToSupplyBox => &mut self.supply_box_rush,
            BotStateKind::Buy => &mut self.buy,
        }
    }
}

/// Видимый враг, на которого бот должен реагировать (или None)
pub(crate) fn react_to_enemy(bot: &BotCore, ctx: &BotContext) -> Option<BotCommand> {
    ctx.sensed_enemy(bot).map(BotCommand::Attack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names_match_tags() {
        let states = BotStates::default();
        let names = [
            (BotStateKind::Idle, "Idle"),
            (BotStateKind::Hunt, "Hunt"),
            (BotStateKind::Attack, "Attack"),
            (BotStateKind::MoveTo, "MoveTo"),
            (BotStateKind::Hide, "Hide"),
            (BotStateKind::Follow, "Follow"),
            (BotStateKind::InvestigateNoise, "InvestigateNoise"),
            (BotStateKind::PlantBomb, "PlantBomb"),
            (BotStateKind::DefuseBomb, "DefuseBomb"),
            (BotStateKind::FetchBomb, "FetchBomb"),
            (BotStateKind::EscapeFromBomb, "EscapeFromBomb"),
            (BotStateKind::Defend, "Defend"),
            (BotStateKind::UseEntity, "UseEntity"),
            (BotStateKind::RushToSupplyBox, "RushToSupplyBox"),
            (BotStateKind::Buy, "Buy"),
        ];

        for (kind, name) in names {
            assert_eq!(states.get(kind).name(), name);
        }
    }
}
