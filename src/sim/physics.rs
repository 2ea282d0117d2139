//! Player integration and horizontal scroll
//!
//! One call = one tick. No substeps: the runner's speeds are small enough
//! that nothing tunnels through a 30px obstacle.

use super::state::{Player, World};
use crate::consts::PLAYER_GROUND_Y;
use crate::tuning::Tuning;

/// Start a jump if grounded. Returns whether the jump was taken.
///
/// Requests while airborne are dropped, not buffered.
pub fn apply_jump(player: &mut Player, tuning: &Tuning) -> bool {
    if player.airborne {
        return false;
    }
    player.airborne = true;
    player.vel_y = tuning.jump_velocity;
    true
}

/// Semi-implicit Euler step under gravity, clamped to the ground
pub fn integrate_player(player: &mut Player, tuning: &Tuning) {
    if !player.airborne {
        return;
    }

    player.vel_y += tuning.gravity;
    player.pos.y += player.vel_y;

    if player.pos.y >= PLAYER_GROUND_Y {
        player.pos.y = PLAYER_GROUND_Y;
        player.vel_y = 0.0;
        player.airborne = false;
    }
}

/// Move every obstacle and item left by `speed`, dropping whatever is fully
/// off-screen (right edge past x = 0)
pub fn scroll(world: &mut World, speed: f32) {
    for obstacle in &mut world.obstacles {
        obstacle.pos.x -= speed;
    }
    for item in &mut world.items {
        item.pos.x -= speed;
    }

    world.obstacles.retain(|o| o.right_edge() >= 0.0);
    world.items.retain(|i| i.right_edge() >= 0.0);
}
