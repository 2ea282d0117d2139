//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, storage or platform dependencies

pub mod clock;
pub mod collision;
pub mod evaluate;
pub mod generate;
pub mod physics;
pub mod state;
pub mod tick;

pub use clock::FixedStep;
pub use collision::Aabb;
pub use evaluate::{Evaluation, Signal, evaluate};
pub use generate::{generate_items, generate_obstacles};
pub use physics::{apply_jump, integrate_player, scroll};
pub use state::{
    GameEvent, Item, ItemKind, Obstacle, ObstacleKind, Player, World, attempt_rng,
};
pub use tick::{TickInput, autopilot_jump, tick};
