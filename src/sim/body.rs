//! Shared physics primitive for moving bodies
//!
//! Players and enemies both embed a [`Body`] and drive it through the same
//! steps: gravity, integration, then push-out against static platforms.
//! Platform overlaps are resolved one at a time in input order, which is
//! deterministic and sufficient because generated platforms are spaced apart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, ResolveAxis};
use super::state::Platform;

/// A moving axis-aligned body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center of the box
    pub position: Vec2,
    pub velocity: Vec2,
    /// Extents, fixed for the lifetime of the entity
    width: f32,
    height: f32,
    pub is_grounded: bool,
}

/// What the body touched while being resolved this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub landed: bool,
    pub ceiling: bool,
    /// Blocked by a wall on the body's left side
    pub wall_left: bool,
    /// Blocked by a wall on the body's right side
    pub wall_right: bool,
}

impl Contacts {
    #[inline]
    pub fn hit_wall(&self) -> bool {
        self.wall_left || self.wall_right
    }
}

impl Body {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            width: width.max(0.0),
            height: height.max(0.0),
            is_grounded: false,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.width, self.height)
    }

    /// Accelerate downward
    #[inline]
    pub fn apply_gravity(&mut self, gravity: f32, dt: f32) {
        self.velocity.y -= gravity * dt;
    }

    /// Move by the current velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    pub fn apply_gravity_and_integrate(&mut self, gravity: f32, dt: f32) {
        self.apply_gravity(gravity, dt);
        self.integrate(dt);
    }

    /// Push the body out of every platform it overlaps.
    ///
    /// Each overlap resolves along its axis of minimum penetration, and only
    /// when the body is moving into that face: landing needs `vy <= 0`, a
    /// ceiling hit needs `vy > 0`, side hits need horizontal motion toward
    /// the wall (or none).
    pub fn resolve_platform_collisions(&mut self, platforms: &[Platform]) -> Contacts {
        self.is_grounded = false;
        let mut contacts = Contacts::default();

        for platform in platforms {
            let body_box = self.aabb();
            let platform_box = platform.aabb();
            if !body_box.intersects(&platform_box) {
                continue;
            }

            match body_box.penetration(&platform_box).min_axis() {
                ResolveAxis::Landing => {
                    if self.velocity.y <= 0.0 {
                        self.position.y = platform_box.max.y + self.height / 2.0;
                        self.velocity.y = 0.0;
                        self.is_grounded = true;
                        contacts.landed = true;
                    }
                }
                ResolveAxis::Ceiling => {
                    if self.velocity.y > 0.0 {
                        self.position.y = platform_box.min.y - self.height / 2.0;
                        self.velocity.y = 0.0;
                        contacts.ceiling = true;
                    }
                }
                ResolveAxis::Left => {
                    if self.velocity.x >= 0.0 {
                        self.position.x = platform_box.min.x - self.width / 2.0;
                        self.velocity.x = 0.0;
                        contacts.wall_right = true;
                    }
                }
                ResolveAxis::Right => {
                    if self.velocity.x <= 0.0 {
                        self.position.x = platform_box.max.x + self.width / 2.0;
                        self.velocity.x = 0.0;
                        contacts.wall_left = true;
                    }
                }
            }
        }

        contacts
    }

    #[inline]
    pub fn is_out_of_bounds(&self, threshold_y: f32) -> bool {
        is_out_of_bounds(self.position, threshold_y)
    }
}

/// True once a position has fallen below the level's kill height
#[inline]
pub fn is_out_of_bounds(position: Vec2, threshold_y: f32) -> bool {
    position.y < threshold_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlatformTier;

    const DT: f32 = 1.0 / 60.0;
    const GRAVITY: f32 = 20.0;

    fn floor() -> Platform {
        // Top surface at y = 0
        Platform::from_top(0.0, 0.0, 20.0, 1.0, PlatformTier::Ground)
    }

    #[test]
    fn test_gravity_then_integrate() {
        let mut body = Body::new(Vec2::new(0.0, 10.0), 1.0, 1.0);
        body.apply_gravity_and_integrate(GRAVITY, 0.1);
        assert!((body.velocity.y + 2.0).abs() < 1e-6);
        assert!((body.position.y - 9.8).abs() < 1e-5);
    }

    #[test]
    fn test_negative_extents_clamp() {
        let body = Body::new(Vec2::ZERO, -1.0, 2.0);
        assert_eq!(body.width(), 0.0);
        assert_eq!(body.height(), 2.0);
    }

    #[test]
    fn test_resting_body_does_not_sink() {
        let platforms = [floor()];
        let mut body = Body::new(Vec2::new(0.0, 0.5), 1.0, 1.0);
        body.is_grounded = true;

        for _ in 0..600 {
            body.apply_gravity_and_integrate(GRAVITY, DT);
            body.resolve_platform_collisions(&platforms);
            assert!(body.is_grounded);
            assert_eq!(body.velocity.y, 0.0);
            assert_eq!(body.position.y, 0.5);
        }
    }

    #[test]
    fn test_falling_body_lands() {
        let platforms = [floor()];
        let mut body = Body::new(Vec2::new(0.0, 3.0), 1.0, 1.0);

        let mut landed = false;
        for _ in 0..120 {
            body.apply_gravity_and_integrate(GRAVITY, DT);
            landed |= body.resolve_platform_collisions(&platforms).landed;
        }
        assert!(landed);
        assert!(body.is_grounded);
        assert_eq!(body.position.y, 0.5);
    }

    #[test]
    fn test_rising_body_is_not_snapped_onto_platform() {
        // Body overlapping the top face while moving up must pass through
        let platforms = [floor()];
        let mut body = Body::new(Vec2::new(0.0, 0.45), 1.0, 1.0);
        body.velocity.y = 5.0;
        let contacts = body.resolve_platform_collisions(&platforms);
        assert!(!contacts.landed);
        assert!(!body.is_grounded);
        assert_eq!(body.position.y, 0.45);
    }

    #[test]
    fn test_ceiling_hit_stops_upward_motion() {
        let ceiling = Platform::from_top(0.0, 3.0, 4.0, 0.5, PlatformTier::Elevated { row: 0 });
        // Body top at 2.6, platform bottom at 2.5
        let mut body = Body::new(Vec2::new(0.0, 2.1), 1.0, 1.0);
        body.velocity.y = 8.0;
        let contacts = body.resolve_platform_collisions(&[ceiling]);
        assert!(contacts.ceiling);
        assert_eq!(body.velocity.y, 0.0);
        assert!((body.position.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_wall_hit_zeroes_horizontal_velocity() {
        let wall = Platform::from_top(3.0, 4.0, 2.0, 4.0, PlatformTier::Elevated { row: 0 });
        // Body right edge at 2.1, wall left face at 2.0
        let mut body = Body::new(Vec2::new(1.7, 1.0), 0.8, 1.0);
        body.velocity.x = 5.0;
        let contacts = body.resolve_platform_collisions(&[wall]);
        assert!(contacts.wall_right);
        assert!(contacts.hit_wall());
        assert_eq!(body.velocity.x, 0.0);
        assert!((body.position.x - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_side_hit_ignored_when_moving_away() {
        let wall = Platform::from_top(3.0, 4.0, 2.0, 4.0, PlatformTier::Elevated { row: 0 });
        let mut body = Body::new(Vec2::new(1.7, 1.0), 0.8, 1.0);
        body.velocity.x = -5.0;
        let contacts = body.resolve_platform_collisions(&[wall]);
        assert!(!contacts.hit_wall());
        assert_eq!(body.velocity.x, -5.0);
    }

    #[test]
    fn test_out_of_bounds_predicate() {
        assert!(is_out_of_bounds(Vec2::new(0.0, -15.0), -10.0));
        assert!(!is_out_of_bounds(Vec2::new(0.0, -5.0), -10.0));
        assert!(!is_out_of_bounds(Vec2::new(0.0, -10.0), -10.0));
    }
}
