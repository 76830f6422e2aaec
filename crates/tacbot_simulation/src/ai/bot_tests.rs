//! Tests for Bot controller (transitions, attack overlay, hide/retreat, follow).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::super::bot::Bot;
    use super::super::core::BotTask;
    use super::super::states::{BotCommand, BotStateKind};
    use super::super::test_support::{test_core, TestWorld};
    use super::super::trace::StateHook;
    use crate::nav::{spot_flags, NavAreaId, RouteType};

    fn bot() -> Bot {
        let mut bot = Bot::from_core(test_core());
        bot.core.last_known_area = Some(NavAreaId(0));
        bot
    }

    fn hooks(bot: &Bot) -> Vec<StateHook> {
        bot.trace().events().copied().collect()
    }

    // ========================================================================
    // SetState
    // ========================================================================

    #[test]
    fn test_set_state_runs_exit_then_enter_once() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();

        let sequence = [
            BotStateKind::Idle,
            BotStateKind::Hunt,
            BotStateKind::Hide,
            BotStateKind::Hide,
            BotStateKind::MoveTo,
            BotStateKind::Buy,
            BotStateKind::Defend,
            BotStateKind::Idle,
        ];

        let mut previous: Option<BotStateKind> = None;
        for kind in sequence {
            bot.trace_mut().clear();
            bot.set_state(kind, &mut tw.ctx());

            let expected: Vec<StateHook> = match previous {
                Some(prev) => vec![StateHook::Exit(prev), StateHook::Enter(kind)],
                None => vec![StateHook::Enter(kind)],
            };
            assert_eq!(hooks(&bot), expected, "transition into {:?}", kind);
            assert_eq!(bot.active_state(), Some(kind));
            previous = Some(kind);
        }
    }

    #[test]
    fn test_set_state_stamps_timestamp() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();

        tw.now = 12.5;
        bot.hunt(&mut tw.ctx());
        assert_eq!(bot.state_timestamp(), 12.5);
        assert_eq!(bot.state_name(), "Hunt");
    }

    #[test]
    fn test_leaving_attack_exits_it_exactly_once() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let enemy = tw.spawn_actor(20, Vec3::new(450.0, 0.0, 50.0), 2);

        bot.hunt(&mut tw.ctx());
        bot.attack(Some(enemy), &mut tw.ctx());
        assert!(bot.is_attacking());
        assert_eq!(bot.active_state(), Some(BotStateKind::Attack));

        bot.trace_mut().clear();
        bot.move_to(Vec3::new(850.0, 0.0, 50.0), RouteType::Fastest, &mut tw.ctx());

        assert_eq!(
            hooks(&bot),
            vec![
                StateHook::Exit(BotStateKind::Attack),
                StateHook::Enter(BotStateKind::MoveTo)
            ]
        );
        assert!(!bot.is_attacking());
    }

    #[test]
    fn test_update_without_state_starts_idle() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        assert_eq!(bot.active_state(), None);
        assert_eq!(bot.state_name(), "None");

        bot.update(&mut tw.ctx());
        assert_eq!(bot.active_state(), Some(BotStateKind::Idle));

        // Следующий тик: Idle без целей уходит в Hunt
        bot.update(&mut tw.ctx());
        assert!(bot.is_hunting());
    }

    // ========================================================================
    // Attack
    // ========================================================================

    #[test]
    fn test_attack_reentry_only_swaps_enemy() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let first = tw.spawn_actor(20, Vec3::new(450.0, 0.0, 50.0), 2);
        let second = tw.spawn_actor(21, Vec3::new(650.0, 0.0, 50.0), 2);

        bot.attack(Some(first), &mut tw.ctx());
        bot.attack(Some(first), &mut tw.ctx());
        bot.attack(Some(second), &mut tw.ctx());

        assert_eq!(bot.core.enemy, Some(second));
        assert!(bot.is_attacking());
        assert_eq!(bot.trace().count(StateHook::Enter(BotStateKind::Attack)), 1);
        assert_eq!(bot.trace().count(StateHook::Exit(BotStateKind::Attack)), 0);
    }

    #[test]
    fn test_attack_ignored_when_invalid_or_suppressed() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let enemy = tw.spawn_actor(20, Vec3::new(450.0, 0.0, 50.0), 2);
        bot.hunt(&mut tw.ctx());

        bot.attack(None, &mut tw.ctx());
        assert!(!bot.is_attacking());

        // Не резолвится в мире: враг запомнен, но в Attack не входим
        bot.attack(Some(Entity::from_raw(999)), &mut tw.ctx());
        assert!(!bot.is_attacking());
        assert!(bot.is_hunting());
        assert_eq!(bot.core.enemy, Some(Entity::from_raw(999)));

        bot.core.weapon.is_reloading = true;
        bot.attack(Some(enemy), &mut tw.ctx());
        assert!(!bot.is_attacking());
        bot.core.weapon.is_reloading = false;

        tw.cvars.zombie = true;
        bot.attack(Some(enemy), &mut tw.ctx());
        assert!(!bot.is_attacking());
        assert!(bot.is_hunting());
    }

    #[test]
    fn test_attack_retarget_to_unresolved_victim_keeps_new_enemy() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let first = tw.spawn_actor(20, Vec3::new(450.0, 0.0, 50.0), 2);
        let ghost = Entity::from_raw(555);

        bot.attack(Some(first), &mut tw.ctx());
        bot.attack(Some(ghost), &mut tw.ctx());

        assert_eq!(bot.core.enemy, Some(ghost));
        assert!(bot.is_attacking());
        assert_eq!(bot.trace().count(StateHook::Enter(BotStateKind::Attack)), 1);
    }

    #[test]
    fn test_attack_on_dead_victim_does_not_engage() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let victim = tw.spawn_actor(20, Vec3::new(450.0, 0.0, 50.0), 2);
        tw.kill_actor(victim);
        bot.hunt(&mut tw.ctx());

        bot.attack(Some(victim), &mut tw.ctx());

        assert!(!bot.is_attacking());
        assert!(!bot.core.is_attacking);
        assert!(bot.is_hunting());
        assert_eq!(bot.trace().count(StateHook::Enter(BotStateKind::Attack)), 0);

        bot.update(&mut tw.ctx());
        assert_eq!(bot.trace().count(StateHook::Enter(BotStateKind::Attack)), 0);
    }

    #[test]
    fn test_initial_accuracy_after_full_turn() {
        let mut tw = TestWorld::corridor();
        tw.now = 3.0;
        let mut bot = bot();
        bot.core.look_yaw = 0.0;
        // Строго за спиной (yaw 180°)
        let victim = tw.spawn_actor(20, Vec3::new(-150.0, 0.0, 50.0), 2);

        bot.attack(Some(victim), &mut tw.ctx());

        assert!((bot.core.aim_accuracy - 0.4).abs() < 1e-5);
        assert!(bot.core.aim_offset_timestamp >= 3.0 + 1.25);
        assert!(bot.core.aim_offset_timestamp <= 3.0 + 1.5);
        assert_eq!(bot.core.last_saw_enemy_timestamp, 3.0);
        assert_eq!(bot.core.aim_spread_timestamp, 3.0);
        assert_eq!(bot.core.last_enemy_position, Vec3::new(-150.0, 0.0, 50.0));
    }

    #[test]
    fn test_crouch_and_hold_only_from_hiding_spot() {
        let mut seen_hold = false;
        let mut seen_stand = false;

        for seed in 0..64 {
            let mut tw = TestWorld::corridor();
            tw.rng = ChaCha8Rng::seed_from_u64(seed);
            let enemy = tw.spawn_actor(20, Vec3::new(650.0, 0.0, 50.0), 2);

            // Не в укрытии — никогда не приседает
            let mut walker = bot();
            walker.hunt(&mut tw.ctx());
            walker.attack(Some(enemy), &mut tw.ctx());
            assert!(!walker.attack_state().crouch_and_hold());

            // В укрытии — 60/40
            let mut hider = bot();
            let here = hider.core.position;
            hider.hide_at(here, None, false, &mut tw.ctx());
            hider.update(&mut tw.ctx());
            assert!(hider.is_at_hiding_spot());

            hider.attack(Some(enemy), &mut tw.ctx());
            if hider.attack_state().crouch_and_hold() {
                seen_hold = true;
                assert!(hider.core.posture.crouching);
            } else {
                seen_stand = true;
            }
        }

        assert!(seen_hold && seen_stand);
    }

    #[test]
    fn test_stop_attacking_returns_to_idle_not_hide() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let enemy = tw.spawn_actor(20, Vec3::new(650.0, 0.0, 50.0), 2);
        tw.nav.add_hiding_spot(Vec3::new(250.0, 0.0, 50.0), spot_flags::IN_COVER);

        bot.hide(None, Some(30.0), 500.0, false, &mut tw.ctx());
        assert!(bot.is_hiding());
        let task_before = bot.task();

        bot.attack(Some(enemy), &mut tw.ctx());
        assert!(bot.is_attacking());
        assert!(!bot.is_hiding());

        bot.stop_attacking(&mut tw.ctx());
        assert!(!bot.is_attacking());
        assert!(bot.is_idle());
        assert_eq!(bot.task(), task_before);
        assert_eq!(bot.trace().count(StateHook::Exit(BotStateKind::Attack)), 1);
    }

    #[test]
    fn test_stop_attacking_when_not_attacking_is_noop() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        bot.hunt(&mut tw.ctx());
        bot.core.set_task(BotTask::GuardBombZone);
        let trace_before = hooks(&bot);
        let timestamp_before = bot.state_timestamp();

        tw.now = 4.0;
        bot.stop_attacking(&mut tw.ctx());

        assert!(!bot.is_attacking());
        assert!(bot.is_hunting());
        assert_eq!(bot.task(), BotTask::GuardBombZone);
        assert_eq!(hooks(&bot), trace_before);
        assert_eq!(bot.state_timestamp(), timestamp_before);
    }

    #[test]
    fn test_lost_enemy_dead_stops_attack_on_update() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let enemy = tw.spawn_actor(20, Vec3::new(650.0, 0.0, 50.0), 2);

        bot.attack(Some(enemy), &mut tw.ctx());
        assert!(bot.is_attacking());
        tw.kill_actor(enemy);
        bot.trace_mut().clear();

        bot.update(&mut tw.ctx());

        assert!(!bot.is_attacking());
        assert!(!bot.core.is_attacking);
        assert!(bot.is_idle());
        assert!(bot.enemy_snapshot(&tw.ctx()).is_none());
        assert_eq!(
            hooks(&bot),
            vec![
                StateHook::Exit(BotStateKind::Attack),
                StateHook::Enter(BotStateKind::Idle)
            ]
        );
    }

    // ========================================================================
    // Hide / retreat
    // ========================================================================

    #[test]
    fn test_hide_picks_spot_and_installs_path() {
        let mut tw = TestWorld::corridor();
        tw.nav.add_hiding_spot(Vec3::new(350.0, 0.0, 50.0), spot_flags::IN_COVER);
        let mut bot = bot();
        bot.hunt(&mut tw.ctx());

        bot.hide(None, Some(10.0), 600.0, true, &mut tw.ctx());

        assert!(bot.is_hiding());
        assert!(!bot.is_at_hiding_spot());
        assert_eq!(bot.hide_state().hiding_spot(), Vec3::new(350.0, 0.0, 50.0));
        assert_eq!(bot.hide_state().duration(), Some(10.0));
        assert!(bot.hide_state().hold_position());
        assert!(bot.core.has_path());
    }

    #[test]
    fn test_hide_without_spots_hides_in_place() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let here = bot.core.position;

        bot.hide(Some(NavAreaId(0)), None, 500.0, false, &mut tw.ctx());
        assert!(bot.is_hiding());
        assert_eq!(bot.hide_state().hiding_spot(), here);
    }

    #[test]
    fn test_hide_without_source_area_goes_idle() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        bot.core.last_known_area = None;
        bot.core.set_task(BotTask::Sniping);

        bot.hide(None, None, 500.0, false, &mut tw.ctx());
        assert!(bot.is_idle());
        assert_eq!(bot.task(), BotTask::SeekAndDestroy);
    }

    #[test]
    fn test_hide_at_unreachable_goes_idle() {
        let mut tw = TestWorld::corridor();
        tw.nav.disconnect(NavAreaId(0), NavAreaId(1));
        let mut bot = bot();

        bot.hide_at(Vec3::new(850.0, 0.0, 50.0), Some(5.0), false, &mut tw.ctx());
        assert!(bot.is_idle());
        assert!(!bot.core.has_path());
    }

    #[test]
    fn test_try_to_hide_unreachable_leaves_state_unchanged() {
        let mut tw = TestWorld::corridor();
        tw.nav.add_hiding_spot(Vec3::new(450.0, 0.0, 50.0), spot_flags::IN_COVER);
        tw.nav.disconnect(NavAreaId(1), NavAreaId(2));
        let mut bot = bot();
        bot.hunt(&mut tw.ctx());
        let trace_before = hooks(&bot);

        let hidden = bot.try_to_hide(None, None, 800.0, false, false, &mut tw.ctx());

        assert!(!hidden);
        assert!(bot.is_hunting());
        assert_eq!(hooks(&bot), trace_before);
    }

    #[test]
    fn test_try_to_hide_nearest_mode() {
        let mut tw = TestWorld::corridor();
        tw.nav.add_hiding_spot(Vec3::new(150.0, 0.0, 50.0), 0);
        tw.nav.add_hiding_spot(Vec3::new(550.0, 0.0, 50.0), spot_flags::IN_COVER);
        let mut bot = bot();

        assert!(bot.try_to_hide(None, None, 800.0, false, true, &mut tw.ctx()));
        assert_eq!(bot.hide_state().hiding_spot(), Vec3::new(150.0, 0.0, 50.0));

        assert!(bot.try_to_hide(None, None, 800.0, false, false, &mut tw.ctx()));
        assert_eq!(bot.hide_state().hiding_spot(), Vec3::new(550.0, 0.0, 50.0));
    }

    #[test]
    fn test_retreat_hold_and_ignore_window_within_bounds() {
        for seed in 0..32 {
            let mut tw = TestWorld::corridor();
            tw.rng = ChaCha8Rng::seed_from_u64(seed);
            tw.now = 7.0;
            tw.nav.add_hiding_spot(Vec3::new(250.0, 0.0, 50.0), spot_flags::IN_COVER);
            tw.nav.add_hiding_spot(Vec3::new(750.0, 0.0, 50.0), spot_flags::IN_COVER);
            let enemy = tw.spawn_actor(20, Vec3::new(150.0, 0.0, 50.0), 2);

            let mut bot = bot();
            bot.core.position = Vec3::new(450.0, 0.0, 50.0);
            bot.core.enemy = Some(enemy);
            bot.core.crouch();

            assert!(bot.try_to_retreat(&mut tw.ctx()));

            assert!(bot.is_hiding());
            assert_eq!(bot.hide_state().hiding_spot(), Vec3::new(750.0, 0.0, 50.0));
            let hold = bot.hide_state().duration().expect("retreat always sets hold time");
            assert!((3.0..=15.0).contains(&hold), "hold {}", hold);
            assert!(!bot.hide_state().hold_position());
            assert_eq!(bot.core.ignore_enemies_until, 17.0);
            assert!(!bot.core.posture.crouching);
            assert!(bot.core.posture.running);
        }
    }

    #[test]
    fn test_retreat_without_spot_fails() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        bot.hunt(&mut tw.ctx());

        assert!(!bot.try_to_retreat(&mut tw.ctx()));
        assert!(bot.is_hunting());
        assert!(!bot.core.is_ignoring_enemies(tw.now));
    }

    // ========================================================================
    // Follow
    // ========================================================================

    #[test]
    fn test_follow_timestamp_resets_only_on_new_leader() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let a = tw.spawn_actor(30, Vec3::new(650.0, 0.0, 50.0), 1);
        let b = tw.spawn_actor(31, Vec3::new(850.0, 0.0, 50.0), 1);

        tw.now = 1.0;
        bot.follow(Some(a), &mut tw.ctx());
        assert_eq!(bot.core.follow_timestamp, 1.0);
        assert_eq!(bot.task(), BotTask::Follow);

        tw.now = 4.0;
        bot.follow(Some(a), &mut tw.ctx());
        assert_eq!(bot.core.follow_timestamp, 1.0);
        assert_eq!(bot.follow_duration(4.0), 3.0);

        tw.now = 6.0;
        bot.follow(Some(b), &mut tw.ctx());
        assert_eq!(bot.core.follow_timestamp, 6.0);
        assert_eq!(bot.core.leader, Some(b));
    }

    #[test]
    fn test_follow_none_is_ignored() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        bot.hunt(&mut tw.ctx());

        bot.follow(None, &mut tw.ctx());
        assert!(!bot.is_following());
        assert!(bot.is_hunting());
    }

    #[test]
    fn test_stop_following_suppresses_auto_follow() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let leader = tw.spawn_actor(30, Vec3::new(650.0, 0.0, 50.0), 1);

        bot.follow(Some(leader), &mut tw.ctx());
        tw.now = 5.0;
        bot.stop_following(&mut tw.ctx());

        assert!(!bot.is_following());
        assert!(!bot.is_auto_follow_allowed(5.0));
        assert!(!bot.is_auto_follow_allowed(14.99));
        assert!(bot.is_auto_follow_allowed(15.0));

        tw.now = 10.0;
        assert!(!bot.try_auto_follow(leader, &mut tw.ctx()));
        tw.now = 15.0;
        assert!(bot.try_auto_follow(leader, &mut tw.ctx()));
        assert!(bot.is_following());
    }

    #[test]
    fn test_auto_follow_respects_cvar_and_team() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let enemy = tw.spawn_actor(30, Vec3::new(650.0, 0.0, 50.0), 2);
        let ally = tw.spawn_actor(31, Vec3::new(850.0, 0.0, 50.0), 1);

        assert!(!bot.try_auto_follow(enemy, &mut tw.ctx()));

        tw.cvars.allow_auto_follow = false;
        assert!(!bot.try_auto_follow(ally, &mut tw.ctx()));
        assert!(!bot.is_following());
    }

    #[test]
    fn test_follow_resumes_through_idle_after_attack() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let leader = tw.spawn_actor(30, Vec3::new(650.0, 0.0, 50.0), 1);
        let enemy = tw.spawn_actor(31, Vec3::new(850.0, 0.0, 50.0), 2);

        bot.follow(Some(leader), &mut tw.ctx());
        bot.attack(Some(enemy), &mut tw.ctx());
        bot.stop_attacking(&mut tw.ctx());

        // Прямого возврата в Follow нет — только через Idle
        assert!(bot.is_idle());
        assert!(bot.is_following());

        bot.update(&mut tw.ctx());
        assert_eq!(bot.active_state(), Some(BotStateKind::Follow));
        assert_eq!(bot.task(), BotTask::Follow);
    }

    #[test]
    fn test_dead_leader_stops_following() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let leader = tw.spawn_actor(30, Vec3::new(650.0, 0.0, 50.0), 1);

        bot.follow(Some(leader), &mut tw.ctx());
        tw.kill_actor(leader);
        tw.now = 2.0;
        bot.update(&mut tw.ctx());

        assert!(!bot.is_following());
        assert!(bot.is_idle());
        assert!(!bot.is_auto_follow_allowed(11.0));
    }

    // ========================================================================
    // Misc entry points / predicates
    // ========================================================================

    #[test]
    fn test_rescue_hostages_changes_task_only() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        bot.hunt(&mut tw.ctx());

        bot.rescue_hostages();
        assert_eq!(bot.task(), BotTask::RescueHostages);
        assert!(bot.is_hunting());
    }

    #[test]
    fn test_predicates_follow_active_tag() {
        let mut tw = TestWorld::corridor();
        tw.nav.add_supply_box(NavAreaId(5));
        let mut bot = bot();

        bot.escape_from_bomb(&mut tw.ctx());
        assert!(bot.is_escaping_from_bomb());
        assert_eq!(bot.task(), BotTask::EscapeFromBomb);

        bot.defuse_bomb(&mut tw.ctx());
        assert!(bot.is_defusing_bomb());

        bot.buy(&mut tw.ctx());
        assert!(bot.is_buying());

        bot.rush_to_supply_box(&mut tw.ctx());
        assert!(bot.is_rushing_for_supply_box());

        bot.defend(NavAreaId(3), &mut tw.ctx());
        assert!(bot.is_defending());

        bot.move_to(Vec3::new(450.0, 0.0, 50.0), RouteType::Safest, &mut tw.ctx());
        assert!(bot.is_moving_to());
        assert!(!bot.is_hiding());
        assert!(!bot.is_at_hiding_spot());
    }

    #[test]
    fn test_use_entity_records_usage() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        let hostage = tw.spawn_actor(40, Vec3::new(80.0, 0.0, 50.0), 0);

        bot.use_entity(hostage, &mut tw.ctx());
        assert_eq!(bot.active_state(), Some(BotStateKind::UseEntity));

        bot.update(&mut tw.ctx());
        assert_eq!(bot.core.used_entity, Some(hostage));
        assert!(bot.is_idle());
    }

    // ========================================================================
    // Command dispatch
    // ========================================================================

    #[test]
    fn test_execute_retreat_hides_or_falls_back_to_idle() {
        let mut tw = TestWorld::corridor();
        let mut bot = bot();
        bot.hunt(&mut tw.ctx());

        // Укрытий нет → Idle
        bot.execute(BotCommand::Retreat, &mut tw.ctx());
        assert!(bot.is_idle());

        tw.nav.add_hiding_spot(Vec3::new(350.0, 0.0, 50.0), spot_flags::IN_COVER);
        bot.execute(BotCommand::Retreat, &mut tw.ctx());
        assert!(bot.is_hiding());
        assert_eq!(bot.hide_state().hiding_spot(), Vec3::new(350.0, 0.0, 50.0));
        assert!(bot.core.is_ignoring_enemies(tw.now));
    }

    #[test]
    fn test_execute_dispatches_task_commands() {
        let mut tw = TestWorld::corridor();
        tw.nav.add_supply_box(NavAreaId(5));
        let mut bot = bot();
        let hostage = tw.spawn_actor(40, Vec3::new(250.0, 0.0, 50.0), 0);

        let spot = Vec3::new(450.0, 0.0, 50.0);
        bot.execute(
            BotCommand::HideAt {
                spot,
                duration: Some(4.0),
                hold_position: true,
            },
            &mut tw.ctx(),
        );
        assert!(bot.is_hiding());
        assert_eq!(bot.hide_state().hiding_spot(), spot);
        assert_eq!(bot.hide_state().duration(), Some(4.0));
        assert!(bot.hide_state().hold_position());

        bot.execute(BotCommand::Defend(NavAreaId(3)), &mut tw.ctx());
        assert!(bot.is_defending());
        assert_eq!(bot.states().defend.defend_area(), Some(NavAreaId(3)));

        bot.execute(BotCommand::UseEntity(hostage), &mut tw.ctx());
        assert_eq!(bot.active_state(), Some(BotStateKind::UseEntity));
        assert_eq!(bot.states().use_entity.entity(), Some(hostage));

        bot.execute(BotCommand::RushToSupplyBox, &mut tw.ctx());
        assert!(bot.is_rushing_for_supply_box());

        bot.core.planted_bomb = Some(Vec3::new(650.0, 0.0, 50.0));
        bot.execute(BotCommand::DefuseBomb, &mut tw.ctx());
        assert_eq!(bot.active_state(), Some(BotStateKind::DefuseBomb));
        assert!(bot.core.has_path());

        bot.execute(BotCommand::EscapeFromBomb, &mut tw.ctx());
        assert!(bot.is_escaping_from_bomb());
        assert_eq!(bot.task(), BotTask::EscapeFromBomb);
    }
}
