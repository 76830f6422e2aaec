//! ECS Components акторов, которых видят боты
//!
//! - actor: команда + здоровье (snapshot для decision tick)

pub mod actor;

pub use actor::*;
