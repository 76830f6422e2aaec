//! Kill feed systems

use bevy::prelude::*;

use super::{DeathMessage, KillCallout, KillFeed};
use crate::ai::systems::BotClock;
use crate::logger::log_info;

/// Система: DeathMessage → лента + KillCallout события
pub fn process_death_messages(
    mut deaths: EventReader<DeathMessage>,
    mut callouts: EventWriter<KillCallout>,
    mut feed: ResMut<KillFeed>,
    clock: Res<BotClock>,
) {
    for death in deaths.read() {
        for callout in feed.push(death, clock.now()) {
            callouts.write(callout);
        }
        if let Some(notice) = feed.notices().last() {
            log_info(&notice.describe());
        }
    }
}

/// Система: истёкшие записи / kill effect
pub fn expire_kill_feed(mut feed: ResMut<KillFeed>, clock: Res<BotClock>) {
    feed.expire(clock.now());
}
