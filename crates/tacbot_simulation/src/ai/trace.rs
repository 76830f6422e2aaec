//! StateTrace — bounded журнал вызовов enter/exit hooks
//!
//! Диагностика (кто куда переключался) + наблюдаемость порядка hooks в тестах.

use std::collections::VecDeque;

use super::states::BotStateKind;

pub const TRACE_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateHook {
    Enter(BotStateKind),
    Exit(BotStateKind),
}

#[derive(Debug, Clone, Default)]
pub struct StateTrace {
    events: VecDeque<StateHook>,
}

impl StateTrace {
    pub fn record(&mut self, hook: StateHook) {
        if self.events.len() == TRACE_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(hook);
    }

    pub fn events(&self) -> impl Iterator<Item = &StateHook> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<StateHook> {
        self.events.back().copied()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count(&self, hook: StateHook) -> usize {
        self.events.iter().filter(|h| **h == hook).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
