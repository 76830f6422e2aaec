//! Zone signals (buy zone, bomb zone, rescue zone, ...)
//!
//! World-sim в течение кадра выставляет сигналы (`signal`), в конце кадра
//! `update()` фиксирует их в `state`. Боты читают только `state` —
//! значение стабильно на весь decision tick.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const SIGNAL_BUY: u8 = 1 << 0;
pub const SIGNAL_BOMB: u8 = 1 << 1;
pub const SIGNAL_RESCUE: u8 = 1 << 2;
pub const SIGNAL_ESCAPE: u8 = 1 << 3;
pub const SIGNAL_VIP_SAFETY: u8 = 1 << 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub struct ZoneSignals {
    signal: u8,
    state: u8,
}

impl ZoneSignals {
    /// Latch: текущие сигналы → state, сигналы сбрасываются
    pub fn update(&mut self) {
        self.state = self.signal;
        self.signal = 0;
    }

    pub fn signal(&mut self, flags: u8) {
        self.signal |= flags;
    }

    pub fn pending(&self) -> u8 {
        self.signal
    }

    pub fn state(&self) -> u8 {
        self.state
    }

    pub fn in_buy_zone(&self) -> bool {
        self.state & SIGNAL_BUY != 0
    }

    pub fn in_bomb_zone(&self) -> bool {
        self.state & SIGNAL_BOMB != 0
    }

    pub fn in_rescue_zone(&self) -> bool {
        self.state & SIGNAL_RESCUE != 0
    }
}
