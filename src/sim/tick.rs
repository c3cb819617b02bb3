//! Per-frame simulation step
//!
//! Advances every body in a level by one tick: the player from held input,
//! each enemy autonomously, then the collectible and enemy overlap queries the
//! session turns into score and events.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::EnemyBody;
use super::player::PlayerBody;
use super::state::{Collectible, Platform};
use crate::consts::MAX_FRAME_DT;

/// Physical keys the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    KeyA,
    KeyD,
    KeyW,
    Space,
}

/// Logical actions a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl KeyCode {
    /// Parse a DOM-style `code` ("ArrowLeft", "KeyA", "Space") or a `key`
    /// value ("a", " ", "ArrowUp"). Unknown keys return None.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ArrowLeft" => Some(KeyCode::ArrowLeft),
            "ArrowRight" => Some(KeyCode::ArrowRight),
            "ArrowUp" => Some(KeyCode::ArrowUp),
            "KeyA" | "a" | "A" => Some(KeyCode::KeyA),
            "KeyD" | "d" | "D" => Some(KeyCode::KeyD),
            "KeyW" | "w" | "W" => Some(KeyCode::KeyW),
            "Space" | " " | "Spacebar" => Some(KeyCode::Space),
            _ => None,
        }
    }

    pub fn action(self) -> Action {
        match self {
            KeyCode::ArrowLeft | KeyCode::KeyA => Action::Left,
            KeyCode::ArrowRight | KeyCode::KeyD => Action::Right,
            KeyCode::ArrowUp | KeyCode::KeyW | KeyCode::Space => Action::Jump,
        }
    }
}

/// Snapshot of currently held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: BTreeSet<KeyCode>,
}

impl InputState {
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Any key mapped to `action` is held
    pub fn is_held(&self, action: Action) -> bool {
        self.held.iter().any(|key| key.action() == action)
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}

/// Clamp a frame delta into `[0, MAX_FRAME_DT]` (NaN becomes 0)
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}

/// Wall-clock to tick delta conversion
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    /// Delta since the previous call, clamped. The first call returns 0.
    pub fn advance(&mut self, now_secs: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => (now_secs - last) as f32,
            None => 0.0,
        };
        self.last_time = Some(now_secs);
        clamp_frame_dt(dt)
    }

    /// Forget the previous timestamp (after a pause or restart)
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}

/// Every entity of one level instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: PlayerBody,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<EnemyBody>,
    pub collectibles: Vec<Collectible>,
    /// Player falls below this height → out of bounds
    pub fall_threshold_y: f32,
}

/// What happened during one world step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Indices into `World::collectibles` collected this tick
    pub collected: Vec<usize>,
    /// Indices into `World::enemies` overlapping the player
    pub touching_enemies: Vec<usize>,
    pub out_of_bounds: bool,
}

impl World {
    pub fn new(spawn: Vec2, fall_threshold_y: f32) -> Self {
        Self {
            player: PlayerBody::new(spawn),
            platforms: Vec::new(),
            enemies: Vec::new(),
            collectibles: Vec::new(),
            fall_threshold_y,
        }
    }

    /// Advance one tick. `dt` is clamped to `MAX_FRAME_DT`.
    pub fn step(&mut self, input: &InputState, dt: f32) -> StepReport {
        let dt = clamp_frame_dt(dt);

        self.player.update(input, &self.platforms, dt);
        for enemy in &mut self.enemies {
            enemy.update(&self.platforms, dt);
        }

        StepReport {
            collected: self.player.collect(&mut self.collectibles),
            touching_enemies: self.player.touching_enemies(&self.enemies),
            out_of_bounds: self.player.is_out_of_bounds(self.fall_threshold_y),
        }
    }

    pub fn collectibles_remaining(&self) -> usize {
        self.collectibles.iter().filter(|c| !c.is_collected).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_HEIGHT;
    use crate::sim::state::PlatformTier;

    fn flat_world() -> World {
        let mut world = World::new(Vec2::new(0.0, PLAYER_HEIGHT / 2.0), -10.0);
        world.player.body.is_grounded = true;
        world
            .platforms
            .push(Platform::from_top(0.0, 0.0, 30.0, 1.0, PlatformTier::Ground));
        world
    }

    #[test]
    fn test_key_parsing_and_synonyms() {
        assert_eq!(KeyCode::parse("ArrowLeft"), Some(KeyCode::ArrowLeft));
        assert_eq!(KeyCode::parse("a"), Some(KeyCode::KeyA));
        assert_eq!(KeyCode::parse(" "), Some(KeyCode::Space));
        assert_eq!(KeyCode::parse("Escape"), None);

        assert_eq!(KeyCode::KeyA.action(), Action::Left);
        assert_eq!(KeyCode::KeyD.action(), Action::Right);
        assert_eq!(KeyCode::KeyW.action(), Action::Jump);
        assert_eq!(KeyCode::Space.action(), Action::Jump);
    }

    #[test]
    fn test_input_press_release() {
        let mut input = InputState::default();
        input.press(KeyCode::KeyA);
        input.press(KeyCode::ArrowLeft);
        assert!(input.is_held(Action::Left));

        input.release(KeyCode::KeyA);
        assert!(input.is_held(Action::Left));
        input.release(KeyCode::ArrowLeft);
        assert!(!input.is_held(Action::Left));

        input.press(KeyCode::Space);
        input.release_all();
        assert!(!input.is_key_held(KeyCode::Space));
    }

    #[test]
    fn test_frame_dt_clamp() {
        assert_eq!(clamp_frame_dt(0.016), 0.016);
        assert_eq!(clamp_frame_dt(5.0), MAX_FRAME_DT);
        assert_eq!(clamp_frame_dt(-1.0), 0.0);
        assert_eq!(clamp_frame_dt(f32::NAN), 0.0);
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(10.0), 0.0);
        assert!((clock.advance(10.5) - MAX_FRAME_DT).abs() < 1e-6);
        assert!((clock.advance(10.52) - 0.02).abs() < 1e-4);

        clock.reset();
        assert_eq!(clock.advance(100.0), 0.0);
    }

    #[test]
    fn test_long_stall_does_not_tunnel() {
        // A body falling fast onto a thin platform after a multi-second stall
        let mut world = World::new(Vec2::new(0.0, 1.0), -10.0);
        world
            .platforms
            .push(Platform::from_top(0.0, 0.0, 10.0, 0.5, PlatformTier::Elevated { row: 0 }));
        world.player.body.velocity.y = -4.0;

        let report = world.step(&InputState::default(), 3.0);
        assert!(!report.out_of_bounds);
        assert!(world.player.is_grounded());
        assert_eq!(world.player.position().y, PLAYER_HEIGHT / 2.0);
    }

    #[test]
    fn test_step_collects_and_reports() {
        let mut world = flat_world();
        world
            .collectibles
            .push(Collectible::new(Vec2::new(0.0, PLAYER_HEIGHT / 2.0)));
        world
            .enemies
            .push(EnemyBody::new(Vec2::new(0.3, 0.4), crate::sim::MoveType::Stationary, 0.0, 0.0));

        let report = world.step(&InputState::default(), 1.0 / 60.0);
        assert_eq!(report.collected, vec![0]);
        assert_eq!(report.touching_enemies, vec![0]);
        assert!(!report.out_of_bounds);
        assert_eq!(world.collectibles_remaining(), 0);

        let report = world.step(&InputState::default(), 1.0 / 60.0);
        assert!(report.collected.is_empty());
    }

    #[test]
    fn test_step_reports_fall() {
        let mut world = World::new(Vec2::new(0.0, -9.99), -10.0);
        let report = world.step(&InputState::default(), 0.1);
        assert!(report.out_of_bounds);
    }
}
