//! Kill feed + multi-kill / streak callouts для одного локального наблюдателя
//!
//! Ring из MAX_DEATH_NOTICES записей (старая вытесняется), каждая живёт
//! DEATH_NOTICE_DISPLAY_TIME. Multi-kill tier = сколько живых "своих"
//! убийств (background Kill) уже висит в ленте на момент нового.
//!
//! Callout'ы — это события (KillCallout), озвучка/HUD снаружи.

use bevy::prelude::*;
use std::collections::VecDeque;

pub mod systems;

pub use systems::*;

pub const MAX_DEATH_NOTICES: usize = 4;
/// Сколько висит запись в ленте (секунды)
pub const DEATH_NOTICE_DISPLAY_TIME: f32 = 6.0;
/// Окно kill effect (multi-kill подсветка)
pub const KILL_EFFECT_DISPLAY_TIME: f32 = 3.0;
/// Иконка headshot/knife/grenade
pub const KILL_ICON_DISPLAY_TIME: f32 = 0.75;

/// Weapon tags с особой семантикой
pub const WEAPON_GRENADE: &str = "grenade";
pub const WEAPON_KNIFE: &str = "knife";
pub const WEAPON_TEAMMATE: &str = "teammate";
pub const WEAPON_WORLD: &str = "world";

/// Событие смерти (от combat слоя / сервера)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DeathMessage {
    /// None — убил мир (падение, triggers)
    pub killer: Option<Entity>,
    /// None — убит не игрок (турель, объект); имя объекта = weapon tag
    pub victim: Option<Entity>,
    pub killer_name: String,
    pub victim_name: String,
    pub weapon: String,
    pub headshot: bool,
    /// Убийца — зомби (нож зомби не считается humiliation)
    pub killer_is_zombie: bool,
}

impl DeathMessage {
    pub fn new(killer: Option<Entity>, victim: Option<Entity>, weapon: impl Into<String>) -> Self {
        Self {
            killer,
            victim,
            killer_name: String::new(),
            victim_name: String::new(),
            weapon: weapon.into(),
            headshot: false,
            killer_is_zombie: false,
        }
    }

    pub fn with_names(mut self, killer: impl Into<String>, victim: impl Into<String>) -> Self {
        self.killer_name = killer.into();
        self.victim_name = victim.into();
        self
    }

    pub fn with_headshot(mut self, headshot: bool) -> Self {
        self.headshot = headshot;
        self
    }
}

/// Озвучка/объявление, которое заслужил локальный игрок
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillCallout {
    HeadShot,
    GotIt,
    Humiliation,
    OhNo,
    DoubleKill,
    TripleKill,
    MultiKill,
    Excellent,
    Incredible,
    Crazy,
    CantBelieve,
    OutOfWorld,
}

impl KillCallout {
    /// Имя звука
    pub fn sound(&self) -> &'static str {
        match self {
            KillCallout::HeadShot => "HeadShot",
            KillCallout::GotIt => "GotIt",
            KillCallout::Humiliation => "Humiliation",
            KillCallout::OhNo => "OhNo",
            KillCallout::DoubleKill => "DoubleKill",
            KillCallout::TripleKill => "TripleKill",
            KillCallout::MultiKill => "MultiKill",
            KillCallout::Excellent => "Excellent",
            KillCallout::Incredible => "Incredible",
            KillCallout::Crazy => "Crazy",
            KillCallout::CantBelieve => "CantBelieve",
            KillCallout::OutOfWorld => "OutOfWorld",
        }
    }

    /// Streak callout за N-е убийство подряд
    pub fn for_streak(kills: u32) -> Option<Self> {
        match kills {
            5 => Some(KillCallout::Excellent),
            10 => Some(KillCallout::Incredible),
            15 => Some(KillCallout::Crazy),
            20 => Some(KillCallout::CantBelieve),
            25 => Some(KillCallout::OutOfWorld),
            _ => None,
        }
    }
}

/// Подложка записи относительно локального игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeBackground {
    None,
    /// Локальный игрок убил
    Kill,
    /// Локальный игрок умер
    Death,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillIcon {
    HeadShot,
    Knife,
    Grenade,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeathNotice {
    pub killer: String,
    pub victim: String,
    pub weapon: String,
    pub headshot: bool,
    pub suicide: bool,
    pub team_kill: bool,
    pub non_player_kill: bool,
    pub background: NoticeBackground,
    /// Время, после которого запись удаляется
    pub expires_at: f32,
}

impl DeathNotice {
    /// Строка для консоли
    pub fn describe(&self) -> String {
        if self.non_player_kill {
            return format!("{} killed a {}", self.killer, self.victim);
        }

        let mut line = String::new();
        if self.suicide {
            line.push_str(&self.victim);
            if self.weapon == WEAPON_WORLD {
                line.push_str(" died");
            } else {
                line.push_str(" killed self");
            }
        } else if self.team_kill {
            line.push_str(&format!("{} killed his teammate {}", self.killer, self.victim));
        } else {
            if self.headshot {
                line.push_str("*** ");
            }
            line.push_str(&format!("{} killed {}", self.killer, self.victim));
        }

        if !self.weapon.is_empty() && self.weapon != WEAPON_WORLD && !self.team_kill {
            if self.headshot {
                line.push_str(" with a headshot from ");
            } else {
                line.push_str(" with ");
            }
            line.push_str(&self.weapon);
        }

        if self.headshot {
            line.push_str(" ***");
        }
        line
    }
}

/// Resource: лента смертей локального наблюдателя
#[derive(Resource, Debug, Clone, Default)]
pub struct KillFeed {
    /// Чьими глазами смотрим (None — только лента, без callout'ов)
    pub local_player: Option<Entity>,
    notices: VecDeque<DeathNotice>,
    kill_count: u32,
    multi_kills: u8,
    kill_effect_until: Option<f32>,
    kill_icon: Option<(KillIcon, f32)>,
}

impl KillFeed {
    pub fn new(local_player: Option<Entity>) -> Self {
        Self {
            local_player,
            ..Default::default()
        }
    }

    pub fn notices(&self) -> impl Iterator<Item = &DeathNotice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Убийств локального игрока с последнего reset
    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    /// Текущий multi-kill tier (1 = одиночное, 4 = MultiKill)
    pub fn multi_kills(&self) -> u8 {
        self.multi_kills
    }

    pub fn is_kill_effect_active(&self) -> bool {
        self.kill_effect_until.is_some()
    }

    pub fn kill_icon(&self) -> Option<KillIcon> {
        self.kill_icon.map(|(icon, _)| icon)
    }

    /// Новая смерть → запись в ленту + callout'ы для локального игрока
    pub fn push(&mut self, msg: &DeathMessage, now: f32) -> Vec<KillCallout> {
        let mut callouts = Vec::new();
        let local = self.local_player;
        let is_local = |entity: Option<Entity>| local.is_some() && entity == local;

        let multi_kills = self
            .notices
            .iter()
            .filter(|n| n.background == NoticeBackground::Kill)
            .count();

        let local_kill = is_local(msg.killer) && !is_local(msg.victim);

        if local_kill {
            self.kill_count += 1;
            self.kill_icon = None;

            if msg.headshot {
                if multi_kills == 0 {
                    callouts.push(KillCallout::HeadShot);
                }
                self.kill_icon = Some((KillIcon::HeadShot, now + KILL_ICON_DISPLAY_TIME));
            }

            if msg.weapon == WEAPON_GRENADE {
                if multi_kills == 0 {
                    callouts.push(KillCallout::GotIt);
                }
                self.kill_icon = Some((KillIcon::Grenade, now + KILL_ICON_DISPLAY_TIME));
            }
        }

        if msg.weapon == WEAPON_KNIFE && !msg.killer_is_zombie {
            if is_local(msg.killer) {
                if multi_kills == 0 {
                    callouts.push(KillCallout::Humiliation);
                }
                self.kill_icon = Some((KillIcon::Knife, now + KILL_ICON_DISPLAY_TIME));
            }
            if is_local(msg.victim) {
                callouts.push(KillCallout::OhNo);
                self.kill_icon = Some((KillIcon::Knife, now + KILL_ICON_DISPLAY_TIME));
            }
        }

        if local_kill {
            let (tier, callout) = match multi_kills {
                0 => (1, None),
                1 => (2, Some(KillCallout::DoubleKill)),
                2 => (3, Some(KillCallout::TripleKill)),
                _ => (4, Some(KillCallout::MultiKill)),
            };
            self.multi_kills = tier;
            self.kill_effect_until = Some(now + KILL_EFFECT_DISPLAY_TIME);
            callouts.extend(callout);
            callouts.extend(KillCallout::for_streak(self.kill_count));
        }

        self.record(msg, now);
        callouts
    }

    fn record(&mut self, msg: &DeathMessage, now: f32) {
        if self.notices.len() == MAX_DEATH_NOTICES {
            self.notices.pop_front();
        }

        let non_player_kill = msg.victim.is_none();
        let suicide = !non_player_kill && (msg.killer.is_none() || msg.killer == msg.victim);
        let team_kill = !non_player_kill && msg.weapon == WEAPON_TEAMMATE;

        let victim = if non_player_kill {
            msg.weapon.clone()
        } else {
            msg.victim_name.clone()
        };

        let local = self.local_player;
        let background = if local.is_some() && msg.victim == local {
            NoticeBackground::Death
        } else if local.is_some() && msg.killer == local {
            NoticeBackground::Kill
        } else {
            NoticeBackground::None
        };

        self.notices.push_back(DeathNotice {
            killer: msg.killer_name.clone(),
            victim,
            weapon: msg.weapon.clone(),
            headshot: msg.headshot,
            suicide,
            team_kill,
            non_player_kill,
            background,
            expires_at: now + DEATH_NOTICE_DISPLAY_TIME,
        });
    }

    /// Удалить истёкшие записи, погасить kill effect / иконку
    pub fn expire(&mut self, now: f32) {
        self.notices.retain(|n| n.expires_at >= now);

        if self.kill_effect_until.is_some_and(|until| now > until) {
            self.kill_effect_until = None;
            self.multi_kills = 0;
        }
        if self.kill_icon.is_some_and(|(_, until)| now > until) {
            self.kill_icon = None;
        }
    }

    /// Начало раунда
    pub fn reset(&mut self) {
        self.notices.clear();
        self.kill_count = 0;
        self.multi_kills = 0;
        self.kill_effect_until = None;
        self.kill_icon = None;
    }
}
