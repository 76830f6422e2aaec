//! Bot systems (FixedUpdate, chained)

pub mod clock;
pub mod movement;
pub mod perception;
pub mod update;

// Re-export all systems
pub use clock::*;
pub use movement::*;
pub use perception::*;
pub use update::*;
