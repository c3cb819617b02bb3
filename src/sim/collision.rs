//! Axis-aligned collision primitives
//!
//! Every shape in the game is either an axis-aligned box (bodies, platforms)
//! or a circle (collectibles). Boxes are stored as min/max corners so overlap
//! and penetration tests are plain comparisons.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build a box from its center and full extents (negative extents clamp to zero)
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        let half = Vec2::new(width.max(0.0), height.max(0.0)) / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Strict overlap test: boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Grow the box by `buffer` on every side
    pub fn expanded(&self, buffer: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(buffer),
            max: self.max + Vec2::splat(buffer),
        }
    }

    /// Horizontal distance between the closest edges (0 when the boxes overlap on x)
    pub fn edge_gap_x(&self, other: &Aabb) -> f32 {
        (other.min.x - self.max.x).max(self.min.x - other.max.x).max(0.0)
    }

    /// Penetration depths of `self` (the moving box) into `other`
    pub fn penetration(&self, other: &Aabb) -> Penetration {
        Penetration {
            landing: other.max.y - self.min.y,
            ceiling: self.max.y - other.min.y,
            left: self.max.x - other.min.x,
            right: other.max.x - self.min.x,
        }
    }
}

/// Which face of a platform a body is pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAxis {
    /// Out through the top face (the body lands)
    Landing,
    /// Out through the bottom face (the body bumps its head)
    Ceiling,
    /// Out through the left face (the body hit a wall on its right)
    Left,
    /// Out through the right face (the body hit a wall on its left)
    Right,
}

/// Overlap depth along each of the four push-out directions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub landing: f32,
    pub ceiling: f32,
    pub left: f32,
    pub right: f32,
}

impl Penetration {
    /// Axis of minimum penetration.
    ///
    /// Ties break by fixed priority: landing, ceiling, left, right.
    pub fn min_axis(&self) -> ResolveAxis {
        let mut axis = ResolveAxis::Landing;
        let mut depth = self.landing;
        for (candidate, d) in [
            (ResolveAxis::Ceiling, self.ceiling),
            (ResolveAxis::Left, self.left),
            (ResolveAxis::Right, self.right),
        ] {
            if d < depth {
                axis = candidate;
                depth = d;
            }
        }
        axis
    }
}

/// Circle vs box overlap using the closest point on the box.
///
/// Compares squared distances, so no square root is taken. Touching counts.
#[inline]
pub fn circle_intersects_aabb(center: Vec2, radius: f32, aabb: &Aabb) -> bool {
    let closest = center.clamp(aabb.min, aabb.max);
    center.distance_squared(closest) <= radius * radius
}
