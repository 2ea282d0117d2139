//! Fixed timestep simulation tick
//!
//! Core game loop step: apply input, integrate, scroll, evaluate.

use super::evaluate::{Evaluation, evaluate};
use super::physics::{apply_jump, integrate_player, scroll};
use super::state::World;
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested since the previous tick (tap/click/space)
    pub jump: bool,
}

/// Advance the world by one fixed timestep and return what happened
pub fn tick(world: &mut World, input: &TickInput, tuning: &Tuning) -> Evaluation {
    world.time_ticks += 1;

    // Input lands at the start of the tick
    if input.jump && apply_jump(&mut world.player, tuning) {
        log::trace!("Jump at tick {}", world.time_ticks);
    }

    integrate_player(&mut world.player, tuning);
    scroll(world, tuning.scroll_speed(world.level));

    let eval = evaluate(world);
    eval.apply(world);

    eval
}

/// Demo/idle pilot: jump when the nearest obstacle ahead is a few ticks away
pub fn autopilot_jump(world: &World, tuning: &Tuning) -> bool {
    /// Ticks between takeoff and the obstacle reaching the player
    const LEAD_TICKS: f32 = 5.0;

    if world.player.airborne {
        return false;
    }
    let front = world.player.pos.x + world.player.size().x;
    let reach = tuning.scroll_speed(world.level) * LEAD_TICKS;

    world
        .obstacles
        .iter()
        .filter(|o| !o.passed)
        .map(|o| o.pos.x - front)
        .any(|gap| (0.0..=reach).contains(&gap))
}
