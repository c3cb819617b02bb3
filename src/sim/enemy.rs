//! Autonomous enemy bodies
//!
//! Enemies either stand still or patrol a fixed range around the x position
//! they spawned at. A patrolling enemy turns around when it reaches the end of
//! its range or walks into a wall.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Contacts};
use super::state::Platform;
use crate::consts::{ENEMY_GRAVITY, ENEMY_HEIGHT, ENEMY_WIDTH};

/// Enemy behavior, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveType {
    Stationary,
    /// Patrol back and forth around the spawn anchor
    Horizontal,
}

/// An enemy's body and patrol state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyBody {
    pub body: Body,
    pub move_type: MoveType,
    /// Total patrol width, centered on `initial_x`
    pub move_range: f32,
    /// Patrol anchor
    initial_x: f32,
    /// +1 (right) or -1 (left)
    pub direction: f32,
    /// Patrol speed (units/s)
    pub speed: f32,
    pub gravity: f32,
}

impl EnemyBody {
    pub fn new(position: Vec2, move_type: MoveType, move_range: f32, speed: f32) -> Self {
        Self {
            body: Body::new(position, ENEMY_WIDTH, ENEMY_HEIGHT),
            move_type,
            move_range: move_range.max(0.0),
            initial_x: position.x,
            direction: 1.0,
            speed,
            gravity: ENEMY_GRAVITY,
        }
    }

    /// Start patrolling toward the left instead of the right
    pub fn facing_left(mut self) -> Self {
        self.direction = -1.0;
        self
    }

    #[inline]
    pub fn initial_x(&self) -> f32 {
        self.initial_x
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Patrol bounds `(min_x, max_x)`
    pub fn patrol_bounds(&self) -> (f32, f32) {
        let half = self.move_range / 2.0;
        (self.initial_x - half, self.initial_x + half)
    }

    /// Advance one tick.
    ///
    /// Range limits are checked before platform collisions; a wall hit then
    /// points the enemy away from the wall, so both triggers firing in the
    /// same tick still leave one direction.
    pub fn update(&mut self, platforms: &[Platform], dt: f32) -> Contacts {
        let patrolling = self.move_type == MoveType::Horizontal;

        self.body.velocity.x = if patrolling && self.body.is_grounded {
            self.direction * self.speed
        } else {
            0.0
        };

        self.body.apply_gravity_and_integrate(self.gravity, dt);

        if patrolling {
            let (min_x, max_x) = self.patrol_bounds();
            if self.body.position.x < min_x {
                self.body.position.x = min_x;
                self.turn(1.0);
            } else if self.body.position.x > max_x {
                self.body.position.x = max_x;
                self.turn(-1.0);
            }
        }

        let contacts = self.body.resolve_platform_collisions(platforms);

        if patrolling {
            if contacts.wall_right {
                self.turn(-1.0);
            } else if contacts.wall_left {
                self.turn(1.0);
            }

            // A wall push-out must not carry the enemy past its range
            let (min_x, max_x) = self.patrol_bounds();
            self.body.position.x = self.body.position.x.clamp(min_x, max_x);
        }

        contacts
    }

    fn turn(&mut self, direction: f32) {
        self.direction = direction;
        self.body.velocity.x = if self.body.is_grounded || self.body.velocity.x != 0.0 {
            direction * self.speed
        } else {
            0.0
        };
    }
}
