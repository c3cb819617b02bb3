//! Input-driven player body

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Contacts};
use super::collision::circle_intersects_aabb;
use super::enemy::EnemyBody;
use super::state::{Collectible, Platform};
use super::tick::{Action, InputState};
use crate::consts::*;

/// The player's body and movement tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub body: Body,
    /// Horizontal run speed (units/s)
    pub speed: f32,
    /// Vertical velocity set by a jump (units/s)
    pub jump_force: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Horizontal input was applied this tick
    pub is_moving: bool,
    /// Last horizontal direction (kept while idle for animation continuity)
    pub facing_left: bool,
}

impl PlayerBody {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: Body::new(spawn, PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            jump_force: PLAYER_JUMP_FORCE,
            gravity: PLAYER_GRAVITY,
            is_moving: false,
            facing_left: false,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.body.is_grounded
    }

    /// Advance one tick from the held keys.
    ///
    /// Right beats left when both are held. A jump only starts from a body
    /// that was grounded when the tick began, so there is no mid-air jump.
    /// The jump impulse is applied after gravity, so the launch tick keeps the
    /// full `jump_force`.
    pub fn update(&mut self, input: &InputState, platforms: &[Platform], dt: f32) -> Contacts {
        let was_grounded = self.body.is_grounded;

        let right = input.is_held(Action::Right);
        let left = input.is_held(Action::Left);
        self.body.velocity.x = if right {
            self.speed
        } else if left {
            -self.speed
        } else {
            0.0
        };
        self.is_moving = right || left;
        if right {
            self.facing_left = false;
        } else if left {
            self.facing_left = true;
        }

        self.body.apply_gravity(self.gravity, dt);

        if input.is_held(Action::Jump) && was_grounded {
            self.body.velocity.y = self.jump_force;
            self.body.is_grounded = false;
        }

        self.body.integrate(dt);
        self.body.resolve_platform_collisions(platforms)
    }

    /// Collect every untouched collectible overlapping the player.
    ///
    /// Returns the indices collected this tick; already collected items are
    /// skipped, so nothing is ever counted twice.
    pub fn collect(&self, collectibles: &mut [Collectible]) -> Vec<usize> {
        let aabb = self.body.aabb();
        let mut collected = Vec::new();
        for (idx, item) in collectibles.iter_mut().enumerate() {
            if item.is_collected {
                continue;
            }
            if circle_intersects_aabb(item.position, item.radius, &aabb) && item.collect() {
                collected.push(idx);
            }
        }
        collected
    }

    /// Indices of enemies whose boxes overlap the player
    pub fn touching_enemies(&self, enemies: &[EnemyBody]) -> Vec<usize> {
        let aabb = self.body.aabb();
        enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.body.aabb().intersects(&aabb))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn is_touching_enemy(&self, enemies: &[EnemyBody]) -> bool {
        let aabb = self.body.aabb();
        enemies.iter().any(|enemy| enemy.body.aabb().intersects(&aabb))
    }

    #[inline]
    pub fn is_out_of_bounds(&self, threshold_y: f32) -> bool {
        self.body.is_out_of_bounds(threshold_y)
    }
}
