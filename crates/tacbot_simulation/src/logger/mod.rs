//! Глобальный logger симуляции + watched bots (PrintIfWatched)
//!
//! - LogPrinter за Mutex (Console по умолчанию, host может подменить)
//! - Уровень фильтрации LOGGER_LEVEL реально применяется в log_with_level
//! - Decision-логи бота пишутся только для "наблюдаемых" ботов,
//!   иначе 20 ботов × 60Hz заспамят вывод

use bevy::prelude::Entity;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Mutex;

static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

pub static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

static WATCHED: Lazy<Mutex<WatchList>> = Lazy::new(|| Mutex::new(WatchList::default()));

#[derive(Default)]
struct WatchList {
    all: bool,
    bots: HashSet<Entity>,
}

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = LOGGER.lock() {
        *slot = Some(logger);
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current) = LOGGER_LEVEL.lock() {
        *current = level;
    }
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let Ok(mut slot) = LOGGER.lock() else {
        return;
    };
    if slot.is_none() {
        *slot = Some(logger);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    let min_level = LOGGER_LEVEL.lock().map(|l| *l).unwrap_or(LogLevel::Debug);
    if level < min_level {
        return;
    }

    // Timestamp добавляем здесь, не в printer'е
    if let Ok(slot) = LOGGER.lock() {
        if let Some(logger) = slot.as_ref() {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            logger.log(level, &format!("[{}] {}", timestamp, message));
        }
    }
}

/// Начать наблюдение за ботом (его decision-логи попадут в вывод)
pub fn watch_bot(bot: Entity) {
    if let Ok(mut watched) = WATCHED.lock() {
        watched.bots.insert(bot);
    }
}

/// Наблюдать за всеми ботами сразу (headless отладка)
pub fn watch_all(enabled: bool) {
    if let Ok(mut watched) = WATCHED.lock() {
        watched.all = enabled;
    }
}

pub fn unwatch_all() {
    if let Ok(mut watched) = WATCHED.lock() {
        watched.all = false;
        watched.bots.clear();
    }
}

pub fn is_watched(bot: Entity) -> bool {
    WATCHED
        .lock()
        .map(|w| w.all || w.bots.contains(&bot))
        .unwrap_or(false)
}

/// Decision-лог конкретного бота (только если бот наблюдаемый)
///
/// `bot == None` — бот ещё не привязан к entity (unit-тесты), пишем как есть.
pub fn print_if_watched(bot: Option<Entity>, message: &str) {
    match bot {
        Some(entity) if is_watched(entity) => log(&format!("{:?}: {}", entity, message)),
        Some(_) => {}
        None => log(message),
    }
}

pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}
