//! Notifications for the UI collaborator

use super::arena::EntityHandle;
use super::phase::GamePhase;

/// Something the UI may want to react to, queued until drained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Paused,
    Resumed,
    GameOver { score: i64 },
    Restarted { seed: u32, new_level: bool },
    ScoreChanged { score: i64 },
    Collected { handle: EntityHandle },
    /// Player started touching an enemy (no gameplay effect)
    EnemyContact { handle: EntityHandle },
}

/// Values the HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: i64,
    pub phase: GamePhase,
    pub seed: u32,
    pub collectibles_remaining: usize,
}
