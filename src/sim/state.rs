//! Static world entities
//!
//! Platforms, collectibles and ground gaps are created by the level generator
//! and owned by the session for the lifetime of one level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::COLLECTIBLE_RADIUS;

/// Which layer of the level a platform belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformTier {
    /// Ground segment (walkable floor)
    Ground,
    /// Floating platform. Row 0 is the first elevated row (and gap bridges),
    /// reached straight from the ground.
    Elevated { row: u32 },
}

/// A static, axis-aligned platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Center of the box
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub tier: PlatformTier,
    /// Cosmetic tint (RGBA), never used by gameplay
    #[serde(default = "default_platform_color")]
    pub color: [f32; 4],
}

fn default_platform_color() -> [f32; 4] {
    crate::renderer::colors::PLATFORM
}

impl Platform {
    pub fn new(position: Vec2, width: f32, height: f32, tier: PlatformTier) -> Self {
        let color = match tier {
            PlatformTier::Ground => crate::renderer::colors::GROUND,
            PlatformTier::Elevated { .. } => crate::renderer::colors::PLATFORM,
        };
        Self {
            position,
            width: width.max(0.0),
            height: height.max(0.0),
            tier,
            color,
        }
    }

    /// Build a platform from its top surface instead of its center
    pub fn from_top(center_x: f32, top: f32, width: f32, height: f32, tier: PlatformTier) -> Self {
        Self::new(Vec2::new(center_x, top - height / 2.0), width, height, tier)
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.position, self.width, self.height)
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y + self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y - self.height / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.width / 2.0
    }

    #[inline]
    pub fn is_ground(&self) -> bool {
        self.tier == PlatformTier::Ground
    }

    /// Elevated row index (None for ground)
    pub fn row(&self) -> Option<u32> {
        match self.tier {
            PlatformTier::Ground => None,
            PlatformTier::Elevated { row } => Some(row),
        }
    }
}

/// A pickup floating above the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub position: Vec2,
    pub radius: f32,
    /// Monotonic: once collected, never collectible again in this level
    pub is_collected: bool,
}

impl Collectible {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            radius: COLLECTIBLE_RADIUS,
            is_collected: false,
        }
    }

    /// Mark collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.is_collected {
            return false;
        }
        self.is_collected = true;
        true
    }
}

/// Open span between two ground segments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundGap {
    pub left: f32,
    pub right: f32,
}

impl GroundGap {
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn center(&self) -> f32 {
        (self.left + self.right) / 2.0
    }
}
