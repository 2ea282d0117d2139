//! Level layout generation
//!
//! Obstacles sit on the ground at evenly spaced positions that tighten as
//! levels go up. Items float above the ground on a fixed grid with a little
//! jitter so they don't line up perfectly.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Item, ItemKind, Obstacle, ObstacleKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Generate the obstacle row for a level, ids starting at `first_id`
pub fn generate_obstacles(
    level: u32,
    rng: &mut Pcg32,
    tuning: &Tuning,
    first_id: u32,
) -> Vec<Obstacle> {
    let spacing = tuning.obstacle_spacing(level);
    let y = GROUND_LINE - OBSTACLE_HEIGHT;

    (0..OBSTACLES_PER_LEVEL)
        .map(|i| {
            let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
            Obstacle {
                id: first_id + i,
                kind,
                pos: Vec2::new(tuning.first_obstacle_x + i as f32 * spacing, y),
                size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
                passed: false,
            }
        })
        .collect()
}

/// Generate the items for a level, ids starting at `first_id`
pub fn generate_items(
    level: u32,
    rng: &mut Pcg32,
    tuning: &Tuning,
    first_id: u32,
) -> Vec<Item> {
    let count = tuning.item_count(level);

    (0..count)
        .map(|i| {
            let kind = ItemKind::ALL[rng.random_range(0..ItemKind::ALL.len())];
            let x = tuning.first_item_x
                + i as f32 * tuning.item_spacing
                + jitter(rng, tuning.item_x_jitter);
            // Height of the item's bottom edge above the ground line
            let height = (tuning.item_base_height + jitter(rng, tuning.item_y_jitter))
                .clamp(tuning.item_min_height, tuning.item_max_height);
            Item {
                id: first_id + i,
                kind,
                pos: Vec2::new(x, GROUND_LINE - height - ITEM_SIZE),
                size: Vec2::splat(ITEM_SIZE),
                collected: false,
            }
        })
        .collect()
}

/// Uniform value in [-amount, amount]
fn jitter(rng: &mut Pcg32, amount: f32) -> f32 {
    if amount <= 0.0 {
        return 0.0;
    }
    rng.random_range(-amount..=amount)
}
