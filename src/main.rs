//! Dash Runner headless entry point
//!
//! Plays through the levels with a simple auto-jump pilot, the way a
//! renderer-less host would drive the simulation: advance once per frame,
//! forward "taps", hand events to the feedback speaker.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use dash_runner::consts::SIM_DT;
    use dash_runner::feedback::{FeedbackSink, SpokenFeedback};
    use dash_runner::game::SessionState;
    use dash_runner::persistence::FileStore;
    use dash_runner::sim::autopilot_jump;
    use dash_runner::{Game, Tuning};

    /// Give up on a level after this many failed attempts
    const MAX_RETRIES: u32 = 5;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    log::info!("Dash Runner starting with seed {}", seed);

    let tuning = Tuning::load_from("tuning.json");
    let mut game = Game::new(FileStore::new("."), tuning, seed);
    let mut speaker = SpokenFeedback::new();

    if let Err(e) = game.start() {
        log::error!("Could not start: {}", e);
        return;
    }

    let mut retries = 0;
    loop {
        while game.state() == SessionState::Playing {
            if autopilot_jump(game.world(), game.tuning()) {
                game.jump();
            }
            game.advance(SIM_DT);
            for event in game.drain_events() {
                speaker.on_event(&event);
            }
        }

        let result = match game.state() {
            SessionState::LevelComplete => {
                retries = 0;
                game.next_level()
            }
            SessionState::GameOver if retries < MAX_RETRIES => {
                retries += 1;
                game.restart()
            }
            _ => break,
        };
        if let Err(e) = result {
            log::error!("{}", e);
            break;
        }
    }

    let progress = game.progress();
    let stats = game.stats();
    log::info!(
        "Finished in state {:?}: level {}, max level {}, score {}, {} attempts, {} items",
        game.state(),
        progress.level,
        progress.max_level,
        progress.score,
        stats.attempts,
        stats.items_collected_total
    );
    if let Err(e) = game.to_menu() {
        log::warn!("{}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts link the library and drive `Game` from their frame loop
}
