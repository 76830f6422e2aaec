//! Bot — StateMachineController (aggregate root decision core)
//!
//! Владеет attribute block (`BotCore`), всеми state instances и тегом
//! активного state. `set_state` — единственный путь смены state.
//!
//! Порядок `set_state`:
//! 1. бот атакует → принудительный выход из Attack (`end_attack`)
//! 2. exit hook текущего state
//! 3. enter hook нового state
//! 4. новый тег + `state_timestamp`

use bevy::prelude::*;

use crate::ai::context::{ActorSnapshot, BotContext};
use crate::ai::core::{BotCore, BotTask};
use crate::ai::hiding::{find_nearby_hiding_spot, find_nearby_retreat_spot, HidingSpotQuery};
use crate::ai::states::{
    AttackState, BotCommand, BotState, BotStateKind, BotStates, HideState, StateOutcome,
};
use crate::ai::timing::{yaw_delta, yaw_to, TimingPolicy};
use crate::ai::trace::{StateHook, StateTrace};
use crate::config::BotProfile;
use crate::logger::print_if_watched;
use crate::nav::{NavAreaId, NavPath, RouteType};

/// Component: бот с иерархическим FSM
#[derive(Component, Debug)]
pub struct Bot {
    pub core: BotCore,
    states: BotStates,
    active: Option<BotStateKind>,
    state_timestamp: f32,
    trace: StateTrace,
}

impl Bot {
    pub fn new(profile: BotProfile, team: u8) -> Self {
        Self::from_core(BotCore::new(profile, team))
    }

    pub fn from_core(core: BotCore) -> Self {
        Self {
            core,
            states: BotStates::default(),
            active: None,
            state_timestamp: 0.0,
            trace: StateTrace::default(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn active_state(&self) -> Option<BotStateKind> {
        self.active
    }

    pub fn state_name(&self) -> &'static str {
        self.active.map_or("None", |kind| self.states.get(kind).name())
    }

    pub fn state_timestamp(&self) -> f32 {
        self.state_timestamp
    }

    pub fn task(&self) -> BotTask {
        self.core.task
    }

    pub fn trace(&self) -> &StateTrace {
        &self.trace
    }

    pub fn trace_mut(&mut self) -> &mut StateTrace {
        &mut self.trace
    }

    pub fn hide_state(&self) -> &HideState {
        &self.states.hide
    }

    pub fn attack_state(&self) -> &AttackState {
        &self.states.attack
    }

    pub fn states(&self) -> &BotStates {
        &self.states
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub fn set_state(&mut self, kind: BotStateKind, ctx: &mut BotContext) {
        let old_name = self.state_name();

        if self.core.is_attacking {
            self.end_attack(ctx);
        }

        if let Some(current) = self.active {
            self.states.get_mut(current).on_exit(&mut self.core, ctx);
            self.trace.record(StateHook::Exit(current));
        }

        self.states.get_mut(kind).on_enter(&mut self.core, ctx);
        self.trace.record(StateHook::Enter(kind));

        self.active = Some(kind);
        self.state_timestamp = ctx.now;

        print_if_watched(
            self.core.entity,
            &format!("SetState: {} -> {}", old_name, self.state_name()),
        );
    }

    /// Выход из Attack: exit hook (идемпотентный), снятие флага, освобождение слота
    fn end_attack(&mut self, ctx: &mut BotContext) {
        let engaged = self.states.attack.is_engaged();
        self.states.attack.on_exit(&mut self.core, ctx);
        if engaged {
            self.trace.record(StateHook::Exit(BotStateKind::Attack));
        }

        self.core.is_attacking = false;
        if self.active == Some(BotStateKind::Attack) {
            self.active = None;
        }
    }

    /// Установить заранее построенный путь ПОСЛЕ смены state (exit старого state чистит path)
    fn enter_with_path(&mut self, kind: BotStateKind, path: NavPath, ctx: &mut BotContext) {
        self.set_state(kind, ctx);
        self.core.path = Some(path);
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    pub fn idle(&mut self, ctx: &mut BotContext) {
        self.core.set_task(BotTask::SeekAndDestroy);
        self.set_state(BotStateKind::Idle, ctx);
    }

    pub fn hunt(&mut self, ctx: &mut BotContext) {
        self.set_state(BotStateKind::Hunt, ctx);
    }

    pub fn move_to(&mut self, position: Vec3, route: RouteType, ctx: &mut BotContext) {
        self.states.move_to.set_goal_position(position);
        self.states.move_to.set_route_type(route);
        self.set_state(BotStateKind::MoveTo, ctx);
    }

    pub fn escape_from_bomb(&mut self, ctx: &mut BotContext) {
        self.core.set_task(BotTask::EscapeFromBomb);
        self.set_state(BotStateKind::EscapeFromBomb, ctx);
    }

    pub fn plant_bomb(&mut self, ctx: &mut BotContext) {
        self.set_state(BotStateKind::PlantBomb, ctx);
    }

    pub fn defuse_bomb(&mut self, ctx: &mut BotContext) {
        self.set_state(BotStateKind::DefuseBomb, ctx);
    }

    pub fn fetch_bomb(&mut self, ctx: &mut BotContext) {
        self.set_state(BotStateKind::FetchBomb, ctx);
    }

    pub fn investigate_noise(&mut self, ctx: &mut BotContext) {
        self.set_state(BotStateKind::InvestigateNoise, ctx);
    }

    pub fn rush_to_supply_box(&mut self, ctx: &mut BotContext) {
        self.set_state(BotStateKind::RushToSupplyBox, ctx);
    }

    pub fn defend(&mut self, area: NavAreaId, ctx: &mut BotContext) {
        self.states.defend.set_defend_area(area);
        self.set_state(BotStateKind::Defend, ctx);
    }

    pub fn buy(&mut self, ctx: &mut BotContext) {
        self.set_state(BotStateKind::Buy, ctx);
    }

    pub fn use_entity(&mut self, entity: Entity, ctx: &mut BotContext) {
        self.states.use_entity.set_entity(entity);
        self.set_state(BotStateKind::UseEntity, ctx);
    }

    /// Task меняется, state — нет
    pub fn rescue_hostages(&mut self) {
        self.core.set_task(BotTask::RescueHostages);
    }

    // ------------------------------------------------------------------------
    // Follow
    // ------------------------------------------------------------------------

    pub fn follow(&mut self, leader: Option<Entity>, ctx: &mut BotContext) {
        let Some(leader) = leader else {
            print_if_watched(self.core.entity, "Follow: no leader, ignored");
            return;
        };

        // Новый follow timestamp только при смене лидера
        if !self.core.is_following || self.core.leader != Some(leader) {
            self.core.follow_timestamp = ctx.now;
        }

        self.core.is_following = true;
        self.core.leader = Some(leader);
        self.core.set_task(BotTask::Follow);
        self.states.follow.set_leader(Some(leader));
        self.set_state(BotStateKind::Follow, ctx);
    }

    pub fn continue_following(&mut self, ctx: &mut BotContext) {
        self.core.set_task(BotTask::Follow);
        self.states.follow.set_leader(self.core.leader);
        self.set_state(BotStateKind::Follow, ctx);
    }

    pub fn stop_following(&mut self, ctx: &mut BotContext) {
        self.core.is_following = false;
        self.core.leader = None;
        self.core.allow_auto_follow_time = ctx.timing.auto_follow_allowed_at(ctx.now);
    }

    pub fn is_auto_follow_allowed(&self, now: f32) -> bool {
        self.core.is_auto_follow_allowed(now)
    }

    pub fn follow_duration(&self, now: f32) -> f32 {
        self.core.follow_duration(now)
    }

    /// Авто-follow за союзником: cvar, окно подавления, бот ещё ни за кем не идёт
    pub fn try_auto_follow(&mut self, leader: Entity, ctx: &mut BotContext) -> bool {
        if !ctx.cvars.allow_auto_follow
            || self.core.is_following
            || !self.is_auto_follow_allowed(ctx.now)
            || self.core.is_attacking
        {
            return false;
        }
        let ally = ctx
            .living_actor(Some(leader))
            .is_some_and(|actor| actor.team == self.core.team);
        if !ally {
            return false;
        }

        self.follow(Some(leader), ctx);
        true
    }

    // ------------------------------------------------------------------------
    // Hide / retreat
    // ------------------------------------------------------------------------

    /// Откуда искать укрытие: центр явной area или своя позиция в last known area
    fn hide_source(&self, search_from: Option<NavAreaId>, ctx: &BotContext) -> Option<(NavAreaId, Vec3)> {
        match search_from {
            Some(area) => ctx.nav.area_center(area).map(|center| (area, center)),
            None => self.core.last_known_area.map(|area| (area, self.core.position)),
        }
    }

    fn configure_hide(
        &mut self,
        search_area: Option<NavAreaId>,
        range: f32,
        duration: Option<f32>,
        hold_position: bool,
        spot: Vec3,
    ) {
        let hide = &mut self.states.hide;
        hide.set_search_area(search_area);
        hide.set_search_range(range);
        hide.set_duration(duration);
        hide.set_hold_position(hold_position);
        hide.set_hiding_spot(spot);
    }

    /// Спрятаться в укрытии вокруг area. Нет source area или пути → Idle.
    /// Нет укрытий → прячемся там, где стоим.
    pub fn hide(
        &mut self,
        search_from: Option<NavAreaId>,
        duration: Option<f32>,
        hide_range: f32,
        hold_position: bool,
        ctx: &mut BotContext,
    ) {
        self.core.destroy_path();

        let Some((source_area, source_position)) = self.hide_source(search_from, ctx) else {
            print_if_watched(self.core.entity, "Hide: no source area, going idle");
            self.idle(ctx);
            return;
        };

        let query = HidingSpotQuery {
            agent_position: self.core.position,
            source_position,
            source_area,
            range: hide_range,
            prefer_sniping: self.core.is_sniper(),
            use_nearest: false,
        };
        let (spot, spot_area) = match find_nearby_hiding_spot(ctx.nav, &query) {
            Some(spot) => (spot.position, Some(spot.area)),
            None => (self.core.position, None),
        };

        self.configure_hide(Some(source_area), hide_range, duration, hold_position, spot);

        let Some(path) = ctx.plan_path(self.core.position, spot_area, spot, RouteType::Fastest) else {
            print_if_watched(self.core.entity, "Hide: no path to hiding spot, going idle");
            self.idle(ctx);
            return;
        };

        self.enter_with_path(BotStateKind::Hide, path, ctx);
    }

    /// Спрятаться в известной точке
    pub fn hide_at(
        &mut self,
        spot: Vec3,
        duration: Option<f32>,
        hold_position: bool,
        ctx: &mut BotContext,
    ) {
        let Some(area) = ctx.nav.nearest_area(spot) else {
            print_if_watched(self.core.entity, "HideAt: spot outside nav mesh, going idle");
            self.idle(ctx);
            return;
        };

        self.core.destroy_path();
        self.configure_hide(Some(area), ctx.timing.hide_at_spot_range, duration, hold_position, spot);

        let Some(path) = ctx.plan_path(self.core.position, Some(area), spot, RouteType::Fastest) else {
            print_if_watched(self.core.entity, "HideAt: no path to spot, going idle");
            self.idle(ctx);
            return;
        };

        self.enter_with_path(BotStateKind::Hide, path, ctx);
    }

    /// Как `hide`, но без fallback'ов: false и никаких изменений, если спрятаться некуда
    pub fn try_to_hide(
        &mut self,
        search_from: Option<NavAreaId>,
        duration: Option<f32>,
        hide_range: f32,
        hold_position: bool,
        use_nearest: bool,
        ctx: &mut BotContext,
    ) -> bool {
        let Some((source_area, source_position)) = self.hide_source(search_from, ctx) else {
            return false;
        };

        let query = HidingSpotQuery {
            agent_position: self.core.position,
            source_position,
            source_area,
            range: hide_range,
            prefer_sniping: self.core.is_sniper(),
            use_nearest,
        };
        let Some(spot) = find_nearby_hiding_spot(ctx.nav, &query) else {
            return false;
        };
        let Some(path) = ctx.plan_path(self.core.position, Some(spot.area), spot.position, RouteType::Fastest) else {
            return false;
        };

        self.configure_hide(Some(source_area), hide_range, duration, hold_position, spot.position);
        self.enter_with_path(BotStateKind::Hide, path, ctx);
        true
    }

    /// Отступить в ближайшее укрытие подальше от врага
    pub fn try_to_retreat(&mut self, ctx: &mut BotContext) -> bool {
        let Some(area) = ctx.current_area(&self.core) else {
            return false;
        };
        let threat = self.enemy_snapshot(ctx).map(|enemy| enemy.position);

        let Some(spot) = find_nearby_retreat_spot(
            ctx.nav,
            self.core.position,
            area,
            threat,
            ctx.timing.retreat_search_range,
        ) else {
            return false;
        };

        self.core.ignore_enemies(ctx.now, ctx.timing.retreat_ignore_enemies);
        let hold_time = ctx.timing.retreat_hold_time(&mut *ctx.rng);
        self.core.stand_up();
        self.core.run();
        self.hide_at(spot.position, Some(hold_time), false, ctx);

        print_if_watched(
            self.core.entity,
            &format!("Retreating to {:?} for {:.1}s", spot.position, hold_time),
        );
        true
    }

    // ------------------------------------------------------------------------
    // Attack
    // ------------------------------------------------------------------------

    pub fn attack(&mut self, victim: Option<Entity>, ctx: &mut BotContext) {
        let Some(victim) = victim else {
            return;
        };
        if ctx.cvars.zombie || self.core.weapon.is_reloading {
            return;
        }

        // Враг обновляется всегда, даже при повторном attack() во время атаки
        self.core.enemy = Some(victim);
        if self.core.is_attacking {
            return;
        }

        // Входим только на живую цель
        let Some(target) = ctx.living_actor(Some(victim)) else {
            print_if_watched(self.core.entity, "Attack: victim is gone, not engaging");
            return;
        };

        let crouch_and_hold = self.is_at_hiding_spot() && ctx.timing.roll_crouch_and_hold(&mut *ctx.rng);
        self.states.attack.set_crouch_and_hold(crouch_and_hold);

        self.set_state(BotStateKind::Attack, ctx);

        let now = ctx.now;
        self.core.last_enemy_position = target.position;
        self.core.last_saw_enemy_timestamp = now;
        self.core.aim_spread_timestamp = now;

        // Резкий поворот на врага — хуже начальная точность и дольше до уточнения
        let bearing = yaw_to(self.core.position, target.position);
        let turn = TimingPolicy::turn_fraction(yaw_delta(self.core.look_yaw, bearing));
        let accuracy = TimingPolicy::initial_accuracy(self.core.profile.skill, turn);
        self.core.set_aim_offset(accuracy, &mut *ctx.rng);
        let surprise = ctx.timing.aim_refresh_delay(turn, &mut *ctx.rng);
        self.core.aim_offset_timestamp = now + surprise;

        print_if_watched(
            self.core.entity,
            &self.core.profile.attack_begin_summary(surprise),
        );
    }

    /// Всегда легально. Атаковал → Idle (Task не трогаем), иначе ничего не меняется.
    pub fn stop_attacking(&mut self, ctx: &mut BotContext) {
        let was_attacking = self.core.is_attacking;
        self.end_attack(ctx);

        if was_attacking {
            self.set_state(BotStateKind::Idle, ctx);
        }
    }

    /// Живой враг (weak ref revalidation)
    pub fn enemy_snapshot(&self, ctx: &BotContext) -> Option<ActorSnapshot> {
        ctx.living_actor(self.core.enemy)
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    fn is_in(&self, kind: BotStateKind) -> bool {
        self.active == Some(kind)
    }

    pub fn is_idle(&self) -> bool {
        self.is_in(BotStateKind::Idle)
    }

    pub fn is_hiding(&self) -> bool {
        self.is_in(BotStateKind::Hide)
    }

    pub fn is_at_hiding_spot(&self) -> bool {
        self.is_hiding() && self.states.hide.is_at_spot()
    }

    pub fn is_attacking(&self) -> bool {
        self.core.is_attacking
    }

    pub fn is_escaping_from_bomb(&self) -> bool {
        self.is_in(BotStateKind::EscapeFromBomb)
    }

    pub fn is_defusing_bomb(&self) -> bool {
        self.is_in(BotStateKind::DefuseBomb)
    }

    pub fn is_hunting(&self) -> bool {
        self.is_in(BotStateKind::Hunt)
    }

    pub fn is_moving_to(&self) -> bool {
        self.is_in(BotStateKind::MoveTo)
    }

    pub fn is_buying(&self) -> bool {
        self.is_in(BotStateKind::Buy)
    }

    pub fn is_rushing_for_supply_box(&self) -> bool {
        self.is_in(BotStateKind::RushToSupplyBox)
    }

    pub fn is_defending(&self) -> bool {
        self.is_in(BotStateKind::Defend)
    }

    pub fn is_following(&self) -> bool {
        self.core.is_following()
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Decision tick: latch сигналов, area, update активного state, применение команды
    pub fn update(&mut self, ctx: &mut BotContext) {
        self.core.signals.update();
        if let Some(area) = ctx.nav.area_at(self.core.position) {
            self.core.last_known_area = Some(area);
        }

        let Some(kind) = self.active else {
            self.idle(ctx);
            return;
        };

        let outcome = self.states.get_mut(kind).on_update(&mut self.core, ctx);
        if let StateOutcome::Command(command) = outcome {
            self.execute(command, ctx);
        }
    }

    /// Применить переход, запрошенный state'ом
    pub fn execute(&mut self, command: BotCommand, ctx: &mut BotContext) {
        match command {
            BotCommand::Idle => self.idle(ctx),
            BotCommand::Hunt => self.hunt(ctx),
            BotCommand::Attack(victim) => self.attack(Some(victim), ctx),
            BotCommand::StopAttacking => self.stop_attacking(ctx),
            BotCommand::MoveTo { position, route } => self.move_to(position, route, ctx),
            BotCommand::Hide {
                search_from,
                duration,
                range,
                hold_position,
            } => self.hide(search_from, duration, range, hold_position, ctx),
            BotCommand::HideAt {
                spot,
                duration,
                hold_position,
            } => self.hide_at(spot, duration, hold_position, ctx),
            BotCommand::Retreat => {
                if !self.try_to_retreat(ctx) {
                    self.idle(ctx);
                }
            }
            BotCommand::ContinueFollowing => self.continue_following(ctx),
            BotCommand::StopFollowing => {
                self.stop_following(ctx);
                if !self.is_idle() {
                    self.idle(ctx);
                }
            }
            BotCommand::InvestigateNoise => self.investigate_noise(ctx),
            BotCommand::PlantBomb => self.plant_bomb(ctx),
            BotCommand::DefuseBomb => self.defuse_bomb(ctx),
            BotCommand::FetchBomb => self.fetch_bomb(ctx),
            BotCommand::EscapeFromBomb => self.escape_from_bomb(ctx),
            BotCommand::Defend(area) => self.defend(area, ctx),
            BotCommand::UseEntity(entity) => self.use_entity(entity, ctx),
            BotCommand::RushToSupplyBox => self.rush_to_supply_box(ctx),
        }
    }
}
