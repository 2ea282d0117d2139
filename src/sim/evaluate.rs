//! Per-tick collision and progress evaluation
//!
//! [`evaluate`] only reads the world. Everything it decides comes back as one
//! [`Evaluation`] record, and [`Evaluation::apply`] writes it in a single
//! step so counters, flags and the signal never disagree.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, World};
use crate::consts::{ITEM_REWARD, OBSTACLES_PER_LEVEL};

/// Outcome of a tick for the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Signal {
    #[default]
    None,
    /// Player touched an obstacle; the attempt is over
    ObstacleHit,
    /// Enough obstacles passed to clear the level
    LevelComplete,
}

/// Complete result of one tick's evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub signal: Signal,
    /// Obstacles to flag as passed
    pub passed_ids: Vec<u32>,
    /// Items to flag as collected
    pub collected_ids: Vec<u32>,
    /// Attempt counters after this tick
    pub obstacles_passed: u32,
    pub items_collected: u32,
    /// Score earned this tick
    pub score_gained: u64,
    pub events: Vec<GameEvent>,
}

/// Evaluate collisions and progress for the current world state
pub fn evaluate(world: &World) -> Evaluation {
    let player_box = world.player.aabb();

    // Any obstacle contact ends the attempt; nothing else counts this tick
    if let Some(hit) = world.obstacles.iter().find(|o| o.aabb().overlaps(&player_box)) {
        return Evaluation {
            signal: Signal::ObstacleHit,
            obstacles_passed: world.obstacles_passed,
            items_collected: world.items_collected,
            events: vec![GameEvent::ObstacleHit { id: hit.id }],
            ..Default::default()
        };
    }

    let mut eval = Evaluation {
        obstacles_passed: world.obstacles_passed,
        items_collected: world.items_collected,
        ..Default::default()
    };

    // Passed = fully behind the player's back edge, counted once
    for obstacle in &world.obstacles {
        if !obstacle.passed && obstacle.right_edge() < world.player.pos.x {
            eval.passed_ids.push(obstacle.id);
            eval.obstacles_passed += 1;
            eval.events.push(GameEvent::ObstaclePassed {
                id: obstacle.id,
                passed: eval.obstacles_passed,
            });
        }
    }

    for item in &world.items {
        if !item.collected && item.aabb().overlaps(&player_box) {
            eval.collected_ids.push(item.id);
            eval.items_collected += 1;
            eval.score_gained += ITEM_REWARD;
            eval.events.push(GameEvent::ItemCollected {
                id: item.id,
                kind: item.kind,
                reward: ITEM_REWARD,
            });
        }
    }

    if eval.obstacles_passed >= OBSTACLES_PER_LEVEL {
        eval.signal = Signal::LevelComplete;
    }

    eval
}

impl Evaluation {
    /// Write this evaluation into the world it was computed from
    pub fn apply(&self, world: &mut World) {
        for obstacle in &mut world.obstacles {
            if self.passed_ids.contains(&obstacle.id) {
                obstacle.passed = true;
            }
        }
        for item in &mut world.items {
            if self.collected_ids.contains(&item.id) {
                item.collected = true;
            }
        }
        world.obstacles_passed = self.obstacles_passed;
        world.items_collected = self.items_collected;

        if self.signal == Signal::LevelComplete {
            world.clear_entities();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Item, ItemKind, Obstacle, ObstacleKind};
    use glam::Vec2;

    fn push_obstacle(world: &mut World, x: f32) -> u32 {
        let id = world.next_entity_id();
        world.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Spike,
            pos: Vec2::new(x, GROUND_LINE - OBSTACLE_HEIGHT),
            size: Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            passed: false,
        });
        id
    }

    fn push_item(world: &mut World, x: f32, y: f32) -> u32 {
        let id = world.next_entity_id();
        world.items.push(Item {
            id,
            kind: ItemKind::Star,
            pos: Vec2::new(x, y),
            size: Vec2::splat(ITEM_SIZE),
            collected: false,
        });
        id
    }

    #[test]
    fn test_empty_world_is_quiet() {
        let world = World::empty(1);
        let eval = evaluate(&world);
        assert_eq!(eval.signal, Signal::None);
        assert!(eval.events.is_empty());
    }

    #[test]
    fn test_obstacle_hit_short_circuits_items() {
        let mut world = World::empty(1);
        let hit_id = push_obstacle(&mut world, PLAYER_X + 10.0);
        push_item(&mut world, PLAYER_X, PLAYER_GROUND_Y);

        let eval = evaluate(&world);
        assert_eq!(eval.signal, Signal::ObstacleHit);
        assert_eq!(eval.events, vec![GameEvent::ObstacleHit { id: hit_id }]);
        assert!(eval.collected_ids.is_empty());
        assert_eq!(eval.score_gained, 0);

        eval.apply(&mut world);
        assert!(!world.items[0].collected);
        assert_eq!(world.items_collected, 0);
    }

    #[test]
    fn test_jumping_player_clears_obstacle() {
        let mut world = World::empty(1);
        push_obstacle(&mut world, PLAYER_X + 10.0);
        world.player.pos.y = PLAYER_GROUND_Y - OBSTACLE_HEIGHT - 1.0;
        world.player.airborne = true;
        assert_eq!(evaluate(&world).signal, Signal::None);
    }

    #[test]
    fn test_pass_counted_once() {
        let mut world = World::empty(1);
        let id = push_obstacle(&mut world, PLAYER_X - OBSTACLE_WIDTH - 1.0);

        let eval = evaluate(&world);
        assert_eq!(eval.passed_ids, vec![id]);
        assert_eq!(eval.obstacles_passed, 1);
        eval.apply(&mut world);
        assert!(world.obstacles[0].passed);

        // Still behind the player next tick: not counted again
        world.obstacles[0].pos.x -= 5.0;
        let eval = evaluate(&world);
        assert!(eval.passed_ids.is_empty());
        assert_eq!(eval.obstacles_passed, 1);
    }

    #[test]
    fn test_obstacle_touching_back_edge_not_yet_passed() {
        let mut world = World::empty(1);
        push_obstacle(&mut world, PLAYER_X - OBSTACLE_WIDTH);
        let eval = evaluate(&world);
        assert_eq!(eval.signal, Signal::None);
        assert!(eval.passed_ids.is_empty());
    }

    #[test]
    fn test_item_collected_once() {
        let mut world = World::empty(1);
        let id = push_item(&mut world, PLAYER_X + 5.0, PLAYER_GROUND_Y + 5.0);

        let eval = evaluate(&world);
        assert_eq!(eval.collected_ids, vec![id]);
        assert_eq!(eval.score_gained, ITEM_REWARD);
        assert_eq!(
            eval.events,
            vec![GameEvent::ItemCollected {
                id,
                kind: ItemKind::Star,
                reward: ITEM_REWARD
            }]
        );
        eval.apply(&mut world);
        assert!(world.items[0].collected);
        assert_eq!(world.items_collected, 1);

        // Still overlapping: nothing more to gain
        let eval = evaluate(&world);
        assert!(eval.collected_ids.is_empty());
        assert_eq!(eval.score_gained, 0);
        assert_eq!(eval.items_collected, 1);
    }

    #[test]
    fn test_final_pass_completes_level_and_discards_entities() {
        let mut world = World::empty(1);
        world.obstacles_passed = OBSTACLES_PER_LEVEL - 1;
        push_obstacle(&mut world, 0.0);
        push_item(&mut world, PLAYER_X, PLAYER_GROUND_Y);
        push_item(&mut world, 300.0, 200.0);

        let eval = evaluate(&world);
        assert_eq!(eval.signal, Signal::LevelComplete);
        assert_eq!(eval.obstacles_passed, OBSTACLES_PER_LEVEL);
        // Same-tick collection still counts
        assert_eq!(eval.items_collected, 1);

        eval.apply(&mut world);
        assert!(world.obstacles.is_empty());
        assert!(world.items.is_empty());
        assert_eq!(world.obstacles_passed, OBSTACLES_PER_LEVEL);
    }
}
