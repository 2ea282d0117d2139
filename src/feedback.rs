//! Spoken feedback for game events
//!
//! The simulation only emits [`GameEvent`]s. A [`FeedbackSink`] subscribes to
//! them and turns the interesting ones into short lines for a speech or
//! audio backend. Nothing here feeds back into the simulation.

use crate::sim::{GameEvent, ItemKind};

/// Receives game events after each frame
pub trait FeedbackSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Line to speak for an event, if any
pub fn feedback_line(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::ItemCollected { kind, reward, .. } => {
            let line = match kind {
                ItemKind::Coin => "Coin!",
                ItemKind::Star => "A star!",
                ItemKind::Heart => "Got a heart!",
                ItemKind::Gem => "Shiny gem!",
            };
            Some(format!("{} Plus {}", line, reward))
        }
        GameEvent::ObstacleHit { .. } => Some("Ouch! Try again.".to_string()),
        GameEvent::LevelComplete { level } => Some(format!("Level {} complete!", level)),
        GameEvent::GameWon => Some("You beat every level!".to_string()),
        GameEvent::ObstaclePassed { .. } => None,
    }
}

/// Speaker that routes lines to the log (stand-in for a TTS engine)
#[derive(Debug, Clone)]
pub struct SpokenFeedback {
    volume: f32,
    muted: bool,
    lines_spoken: u32,
}

impl Default for SpokenFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl SpokenFeedback {
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            muted: false,
            lines_spoken: 0,
        }
    }

    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn lines_spoken(&self) -> u32 {
        self.lines_spoken
    }

    fn speak(&mut self, line: &str) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        self.lines_spoken += 1;
        log::info!("🔊 {} (vol {:.1})", line, self.volume);
    }
}

impl FeedbackSink for SpokenFeedback {
    fn on_event(&mut self, event: &GameEvent) {
        if let Some(line) = feedback_line(event) {
            self.speak(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_has_a_line() {
        let event = GameEvent::ItemCollected {
            id: 3,
            kind: ItemKind::Gem,
            reward: 10,
        };
        let line = feedback_line(&event).unwrap();
        assert!(line.contains("gem"));
        assert!(line.contains("10"));
    }

    #[test]
    fn test_pass_is_silent() {
        let event = GameEvent::ObstaclePassed { id: 1, passed: 1 };
        assert!(feedback_line(&event).is_none());
    }

    #[test]
    fn test_muted_speaker_says_nothing() {
        let mut speaker = SpokenFeedback::new();
        speaker.set_muted(true);
        speaker.on_event(&GameEvent::GameWon);
        assert_eq!(speaker.lines_spoken(), 0);

        speaker.set_muted(false);
        speaker.on_event(&GameEvent::GameWon);
        speaker.on_event(&GameEvent::ObstaclePassed { id: 1, passed: 1 });
        assert_eq!(speaker.lines_spoken(), 1);
    }
}
