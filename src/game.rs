//! Session state machine
//!
//! Owns the coarse game state, level/score progression, the running tick
//! loop and the progress store. Hosts drive it with [`Game::advance`] once
//! per frame, forward taps with [`Game::jump`], and read [`Game::snapshot`]
//! plus [`Game::drain_events`] to render and give feedback.

use serde::{Deserialize, Serialize};

use crate::consts::{FINAL_LEVEL, OBSTACLES_PER_LEVEL};
use crate::error::GameError;
use crate::persistence::{ProgressRecord, ProgressStore, load_progress, save_progress};
use crate::sim::{
    FixedStep, GameEvent, Item, Obstacle, Player, Signal, TickInput, World, attempt_rng, tick,
};
use crate::tuning::Tuning;

/// Coarse session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// Title/menu screen (initial)
    #[default]
    Menu,
    /// Tick loop running
    Playing,
    /// Tick loop suspended, world kept as-is
    Paused,
    /// Hit an obstacle
    GameOver,
    /// Cleared a level below the last one
    LevelComplete,
    /// Cleared the last level
    GameWon,
}

/// Level and score progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Level currently selected or being played (1-based)
    pub level: u32,
    /// Cumulative score, never decreases
    pub score: u64,
    /// Highest level unlocked, never decreases
    pub max_level: u32,
}

/// In-memory statistics for this process (not persisted)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Attempts started (every entry into a freshly generated level)
    pub attempts: u32,
    /// Items collected across all attempts
    pub items_collected_total: u64,
}

/// Read-only view of everything a renderer needs
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub state: SessionState,
    pub level: u32,
    pub score: u64,
    pub max_level: u32,
    pub obstacles_passed: u32,
    pub obstacles_total: u32,
    pub items_collected: u32,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub items: Vec<Item>,
    pub stats: SessionStats,
}

/// One game session
pub struct Game<S: ProgressStore> {
    state: SessionState,
    progress: LevelProgress,
    stats: SessionStats,
    world: World,
    tuning: Tuning,
    seed: u64,
    /// The running tick loop, if any
    ticker: Option<FixedStep>,
    /// Jump requested since the last tick
    pending_jump: bool,
    events: Vec<GameEvent>,
    store: S,
}

impl<S: ProgressStore> Game<S> {
    /// Create a session in the menu, loading saved progress from `store`.
    /// Tuning that fails validation is replaced by the defaults.
    pub fn new(store: S, tuning: Tuning, seed: u64) -> Self {
        let saved = load_progress(&store);
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Using default tuning: {}", e);
                Tuning::default()
            }
        };
        Self {
            state: SessionState::Menu,
            progress: LevelProgress {
                level: 1,
                score: saved.score,
                max_level: saved.max_level,
            },
            stats: SessionStats::default(),
            world: World::empty(1),
            tuning,
            seed,
            ticker: None,
            pending_jump: false,
            events: Vec::new(),
            store,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn progress(&self) -> LevelProgress {
        self.progress
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether a tick loop is currently running
    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    // === Transitions ===

    /// Menu -> Playing at the current level
    pub fn start(&mut self) -> Result<(), GameError> {
        self.expect_state(&[SessionState::Menu], "start")?;
        self.begin_attempt();
        Ok(())
    }

    /// Menu -> Playing at any unlocked level
    pub fn start_at(&mut self, level: u32) -> Result<(), GameError> {
        self.expect_state(&[SessionState::Menu], "start")?;
        if !(1..=self.progress.max_level).contains(&level) {
            log::warn!("Level {} is locked (max {})", level, self.progress.max_level);
            return Err(self.invalid("start a locked level"));
        }
        self.progress.level = level;
        self.begin_attempt();
        Ok(())
    }

    /// LevelComplete -> Playing at the next level
    pub fn next_level(&mut self) -> Result<(), GameError> {
        self.expect_state(&[SessionState::LevelComplete], "advance to the next level")?;
        self.progress.level += 1;
        self.begin_attempt();
        Ok(())
    }

    /// GameOver -> Playing at the same level
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.expect_state(&[SessionState::GameOver], "restart")?;
        self.begin_attempt();
        Ok(())
    }

    /// Playing -> Paused. The world is kept exactly as it is.
    pub fn pause(&mut self) -> Result<(), GameError> {
        self.expect_state(&[SessionState::Playing], "pause")?;
        self.stop_loop();
        self.pending_jump = false;
        self.state = SessionState::Paused;
        log::info!("Paused at tick {}", self.world.time_ticks);
        Ok(())
    }

    /// Paused -> Playing without regenerating anything
    pub fn resume(&mut self) -> Result<(), GameError> {
        self.expect_state(&[SessionState::Paused], "resume")?;
        self.start_loop();
        self.state = SessionState::Playing;
        log::info!("Resumed at tick {}", self.world.time_ticks);
        Ok(())
    }

    /// Any non-playing screen -> Menu, back at level 1
    pub fn to_menu(&mut self) -> Result<(), GameError> {
        self.expect_state(
            &[
                SessionState::Menu,
                SessionState::Paused,
                SessionState::GameOver,
                SessionState::LevelComplete,
                SessionState::GameWon,
            ],
            "return to the menu",
        )?;
        self.stop_loop();
        self.pending_jump = false;
        self.progress.level = 1;
        self.world = World::empty(1);
        self.state = SessionState::Menu;
        Ok(())
    }

    // === Input ===

    /// Queue a jump for the next tick. Ignored outside `Playing`.
    pub fn jump(&mut self) {
        if self.state == SessionState::Playing {
            self.pending_jump = true;
        }
    }

    // === Loop ===

    /// Feed elapsed wall time to the running loop; returns ticks simulated
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        let due = match self.ticker.as_mut() {
            Some(ticker) => ticker.accumulate(elapsed),
            None => return 0,
        };

        let mut ran = 0;
        for _ in 0..due {
            // A terminal tick stops the loop; drop the rest of the batch
            if self.ticker.is_none() {
                break;
            }
            self.tick();
            ran += 1;
        }
        ran
    }

    /// Run exactly one tick. No effect unless the loop is running.
    pub fn tick(&mut self) -> Signal {
        if self.state != SessionState::Playing || self.ticker.is_none() {
            return Signal::None;
        }

        let input = TickInput {
            jump: std::mem::take(&mut self.pending_jump),
        };
        let eval = tick(&mut self.world, &input, &self.tuning);

        self.progress.score += eval.score_gained;
        self.stats.items_collected_total += eval.collected_ids.len() as u64;
        for event in &eval.events {
            match event {
                GameEvent::ItemCollected { kind, .. } => {
                    log::debug!("Collected {} (score {})", kind.as_str(), self.progress.score)
                }
                GameEvent::ObstaclePassed { passed, .. } => {
                    log::debug!("Passed obstacle {}/{}", passed, OBSTACLES_PER_LEVEL)
                }
                _ => {}
            }
        }
        self.events.extend_from_slice(&eval.events);

        match eval.signal {
            Signal::None => {}
            Signal::ObstacleHit => self.on_obstacle_hit(),
            Signal::LevelComplete => self.on_level_complete(),
        }
        eval.signal
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Renderer view of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            level: self.progress.level,
            score: self.progress.score,
            max_level: self.progress.max_level,
            obstacles_passed: self.world.obstacles_passed,
            obstacles_total: OBSTACLES_PER_LEVEL,
            items_collected: self.world.items_collected,
            player: self.world.player,
            obstacles: self.world.obstacles.clone(),
            items: self.world.items.clone(),
            stats: self.stats,
        }
    }

    // === Internals ===

    /// Fresh attempt at the current level: counters zeroed, entities
    /// generated, player reset, loop (re)started
    fn begin_attempt(&mut self) {
        self.stop_loop();
        self.pending_jump = false;

        let level = self.progress.level;
        let mut rng = attempt_rng(self.seed, level, self.stats.attempts);
        self.world = World::generate(level, &mut rng, &self.tuning);
        self.stats.attempts += 1;

        self.state = SessionState::Playing;
        self.start_loop();
        log::info!("Attempt {} started at level {}", self.stats.attempts, level);
    }

    fn start_loop(&mut self) {
        // Only one loop may exist
        self.stop_loop();
        self.ticker = Some(FixedStep::default());
    }

    /// Idempotent
    fn stop_loop(&mut self) {
        self.ticker = None;
    }

    fn on_obstacle_hit(&mut self) {
        self.stop_loop();
        self.state = SessionState::GameOver;
        log::info!(
            "Game over at level {} ({}/{} passed)",
            self.progress.level,
            self.world.obstacles_passed,
            OBSTACLES_PER_LEVEL
        );
    }

    fn on_level_complete(&mut self) {
        self.stop_loop();
        let level = self.progress.level;

        if level >= FINAL_LEVEL {
            self.progress.max_level = self.progress.max_level.max(level);
            self.state = SessionState::GameWon;
            self.events.push(GameEvent::GameWon);
            log::info!("All {} levels cleared! Score {}", FINAL_LEVEL, self.progress.score);
        } else {
            self.progress.max_level = self.progress.max_level.max(level + 1);
            self.state = SessionState::LevelComplete;
            self.events.push(GameEvent::LevelComplete { level });
            log::info!("Level {} complete, score {}", level, self.progress.score);
        }

        self.persist();
    }

    fn persist(&mut self) {
        let record = ProgressRecord {
            max_level: self.progress.max_level,
            score: self.progress.score,
        };
        save_progress(&mut self.store, &record);
    }

    fn expect_state(
        &self,
        allowed: &[SessionState],
        action: &'static str,
    ) -> Result<(), GameError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> GameError {
        GameError::InvalidTransition {
            from: self.state,
            action,
        }
    }
}
