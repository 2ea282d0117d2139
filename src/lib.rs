//! Dash Runner - A side-scrolling jump-and-collect runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generation, physics, collisions)
//! - `game`: Session state machine and level progression
//! - `persistence`: Progress record storage (max level + score)
//! - `tuning`: Data-driven game balance
//! - `feedback`: Spoken/audible feedback subscriber for game events

pub mod error;
pub mod feedback;
pub mod game;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use game::{Game, Snapshot};
pub use tuning::Tuning;

/// Browser module init: panic messages and log output go to the console
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Dash Runner module loaded");
}

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area width in pixels
    pub const SCREEN_WIDTH: f32 = 400.0;
    /// The line everything stands on (y grows downward)
    pub const GROUND_LINE: f32 = 340.0;

    /// Player box (x is fixed for the whole session)
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Player top edge when standing on the ground
    pub const PLAYER_GROUND_Y: f32 = GROUND_LINE - PLAYER_HEIGHT;

    pub const OBSTACLE_WIDTH: f32 = 30.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;
    pub const ITEM_SIZE: f32 = 25.0;

    /// Number of levels; clearing the last one wins the game
    pub const FINAL_LEVEL: u32 = 10;
    /// Obstacles generated (and to be passed) per level
    pub const OBSTACLES_PER_LEVEL: u32 = 8;
    /// Upper bound on items per level
    pub const MAX_ITEMS_PER_LEVEL: u32 = 12;
    /// Score awarded per collected item
    pub const ITEM_REWARD: u64 = 10;
}
