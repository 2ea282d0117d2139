//! Simulation entities and per-attempt world state
//!
//! Everything a tick reads or writes lives in [`World`]. Cumulative progress
//! (score, max level) belongs to the session, not the world.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::generate::{generate_items, generate_obstacles};
use crate::consts::*;
use crate::tuning::Tuning;

/// Obstacle categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock,
    Spike,
    Barrel,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] =
        [ObstacleKind::Rock, ObstacleKind::Spike, ObstacleKind::Barrel];
}

/// Collectible categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Coin,
    Star,
    Heart,
    Gem,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Coin,
        ItemKind::Star,
        ItemKind::Heart,
        ItemKind::Gem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Coin => "coin",
            ItemKind::Star => "star",
            ItemKind::Heart => "heart",
            ItemKind::Gem => "gem",
        }
    }
}

/// The runner. `pos` is the top-left corner of its box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick (negative = up)
    pub vel_y: f32,
    pub airborne: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_GROUND_Y),
            vel_y: 0.0,
            airborne: false,
        }
    }
}

impl Player {
    pub fn size(&self) -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size())
    }
}

/// A ground obstacle. Only `pos.x` changes after creation (and `passed`, once).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Set the first tick the obstacle is fully behind the player
    pub passed: bool,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// A floating collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Flips to true exactly once
    pub collected: bool,
}

impl Item {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Things that happened during a tick, for presentation collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ItemCollected { id: u32, kind: ItemKind, reward: u64 },
    ObstaclePassed { id: u32, passed: u32 },
    ObstacleHit { id: u32 },
    LevelComplete { level: u32 },
    GameWon,
}

/// RNG for one attempt, derived from the session seed
pub fn attempt_rng(seed: u64, level: u32, attempt: u32) -> Pcg32 {
    let mix = ((level as u64) << 32) | attempt as u64;
    Pcg32::seed_from_u64(seed ^ mix.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Everything one attempt at a level mutates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Level being played (1-based)
    pub level: u32,
    pub player: Player,
    /// Active obstacles, in id order (created sorted, only ever `retain`ed)
    pub obstacles: Vec<Obstacle>,
    /// Active items, in id order
    pub items: Vec<Item>,
    /// Obstacles passed this attempt
    pub obstacles_passed: u32,
    /// Items collected this attempt
    pub items_collected: u32,
    /// Ticks simulated this attempt
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl World {
    /// Empty world with a grounded player and no entities
    pub fn empty(level: u32) -> Self {
        Self {
            level,
            player: Player::default(),
            obstacles: Vec::new(),
            items: Vec::new(),
            obstacles_passed: 0,
            items_collected: 0,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Fresh attempt at `level`: counters zeroed, entities generated once
    pub fn generate(level: u32, rng: &mut Pcg32, tuning: &Tuning) -> Self {
        let mut world = Self::empty(level);
        world.obstacles = generate_obstacles(level, rng, tuning, world.next_id);
        world.next_id += world.obstacles.len() as u32;
        world.items = generate_items(level, rng, tuning, world.next_id);
        world.next_id += world.items.len() as u32;
        log::info!(
            "Level {}: {} obstacles, {} items, speed {:.1}",
            level,
            world.obstacles.len(),
            world.items.len(),
            tuning.scroll_speed(level)
        );
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop both entity sets (level finished)
    pub fn clear_entities(&mut self) {
        self.obstacles.clear();
        self.items.clear();
    }
}
