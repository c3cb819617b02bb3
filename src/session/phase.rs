//! Session phase state machine

use serde::{Deserialize, Serialize};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level loaded, waiting for the player to start
    #[default]
    MainMenu,
    /// Active gameplay
    Playing,
    /// Simulation halted, input still captured
    Paused,
    /// Player fell out of the level
    GameOver,
}

/// Requests that move a session between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Pause,
    Resume,
    FallOutOfBounds,
    Restart,
    NewLevel,
}

impl GamePhase {
    /// Phase after `transition`, or None when it does not apply here
    pub fn apply(self, transition: Transition) -> Option<GamePhase> {
        use GamePhase::*;
        use Transition::*;

        match (self, transition) {
            (MainMenu, Start) => Some(Playing),
            (Playing, Pause) => Some(Paused),
            (Paused, Resume) => Some(Playing),
            (Playing, FallOutOfBounds) => Some(GameOver),
            (GameOver | Paused | Playing, Restart) => Some(Playing),
            (Playing, NewLevel) => Some(Playing),
            _ => None,
        }
    }

    #[inline]
    pub fn is_playing(self) -> bool {
        self == GamePhase::Playing
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::MainMenu => "MainMenu",
            GamePhase::Playing => "Playing",
            GamePhase::Paused => "Paused",
            GamePhase::GameOver => "GameOver",
        }
    }
}
