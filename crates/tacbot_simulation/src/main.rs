//! Headless симуляция TACBOT
//!
//! Две команды ботов на сетке 12×6, примитивное зрение (дистанция) и
//! примитивная стрельба (урон за тик), чтобы прогнать FSM + kill feed.
//!
//! `tacbot_simulation [config.json]`

use bevy::prelude::*;
use tacbot_simulation::logger::{log_error, log_info, watch_all};
use tacbot_simulation::nav::spot_flags;
use tacbot_simulation::*;

const TICKS: usize = 3600;
const SIGHT_RANGE: f32 = 600.0;
const DAMAGE_PER_TICK: u32 = 2;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("{}", err));
                std::process::exit(1);
            }
        },
        None => SimulationConfig {
            seed: 42,
            ..Default::default()
        },
    };

    let mut app = create_headless_app(config.seed);
    app.add_plugins(BotPlugin)
        .insert_resource(NavMeshResource::new(demo_map()))
        .add_systems(FixedUpdate, (demo_vision, demo_fire).chain().before(ai::systems::update_bots));
    apply_config(&mut app, &config);

    if std::env::var_os("TACBOT_WATCH_ALL").is_some() {
        watch_all(true);
    }

    log_info(&format!("Starting TACBOT headless simulation (seed: {})", config.seed));

    for (i, team) in [TEAM_TERRORIST, TEAM_TERRORIST, TEAM_CT, TEAM_CT].into_iter().enumerate() {
        let profile = config
            .profiles
            .get(i)
            .cloned()
            .unwrap_or_else(|| BotProfile::with_skill(format!("Bot{}", i), 0.5 + i as f32 * 0.1));
        let x = if team == TEAM_TERRORIST { 100.0 } else { 2300.0 };
        let z = 100.0 + i as f32 * 300.0;

        app.world_mut().spawn((
            Transform::from_translation(Vec3::new(x, 0.0, z)),
            Actor::new(team),
            Bot::new(profile, team),
        ));
    }

    for tick in 0..TICKS {
        run_fixed_ticks(&mut app, 1);

        if tick % 600 == 0 {
            let world = app.world_mut();
            let mut bots = world.query::<(Entity, &Bot, &Health)>();
            for (entity, bot, health) in bots.iter(world) {
                log_info(&format!(
                    "Tick {}: {:?} [{}] {} hp={} task={:?}",
                    tick,
                    entity,
                    bot.core.profile.name,
                    bot.state_name(),
                    health.current,
                    bot.task()
                ));
            }
        }
    }

    let kills = app.world().resource::<KillFeed>().len();
    log_info(&format!("Simulation complete! ({} notices in feed)", kills));
}

/// 12×6 areas по 200, несколько укрытий посередине
fn demo_map() -> StaticNavMesh {
    let mut mesh = StaticNavMesh::grid(12, 6, 200.0);
    for (x, z) in [(700.0, 300.0), (1100.0, 700.0), (1300.0, 500.0), (1700.0, 900.0)] {
        mesh.add_hiding_spot(Vec3::new(x, 0.0, z), spot_flags::IN_COVER);
    }
    mesh.add_hiding_spot(Vec3::new(1200.0, 0.0, 1100.0), spot_flags::IDEAL_SNIPER_SPOT);
    mesh
}

/// Зрение = ближайший живой враг в SIGHT_RANGE
fn demo_vision(
    bots: Query<(Entity, &Transform, &Bot)>,
    actors: Query<(Entity, &Transform, &Actor, &Health)>,
    mut events: EventWriter<BotPerceptionEvent>,
) {
    for (entity, transform, bot) in bots.iter() {
        let nearest = actors
            .iter()
            .filter(|(other, _, actor, health)| *other != entity && actor.team != bot.core.team && health.is_alive())
            .map(|(other, t, _, _)| (other, t.translation.distance(transform.translation)))
            .filter(|(_, distance)| *distance <= SIGHT_RANGE)
            .min_by(|(_, a), (_, b)| a.total_cmp(b));

        match (nearest, bot.core.perception.visible_enemy) {
            (Some((target, _)), current) if current != Some(target) => {
                events.write(BotPerceptionEvent::EnemySpotted { observer: entity, target });
            }
            (None, Some(target)) => {
                events.write(BotPerceptionEvent::EnemyLost { observer: entity, target });
            }
            _ => {}
        }
    }
}

/// Атакующий бот с видимым врагом наносит урон; смерть → DeathMessage
fn demo_fire(
    bots: Query<(Entity, &Bot)>,
    mut health: Query<&mut Health>,
    mut deaths: EventWriter<DeathMessage>,
) {
    for (entity, bot) in bots.iter() {
        if !bot.is_attacking() {
            continue;
        }
        let Some(target) = bot.core.perception.visible_enemy.filter(|t| Some(*t) == bot.core.enemy) else {
            continue;
        };
        let Ok(mut target_health) = health.get_mut(target) else {
            continue;
        };
        if !target_health.is_alive() {
            continue;
        }

        target_health.take_damage(DAMAGE_PER_TICK);
        if !target_health.is_alive() {
            let victim_name = bots
                .get(target)
                .map(|(_, victim)| victim.core.profile.name.clone())
                .unwrap_or_default();
            deaths.write(
                DeathMessage::new(Some(entity), Some(target), "ak47")
                    .with_names(bot.core.profile.name.clone(), victim_name),
            );
        }
    }
}
