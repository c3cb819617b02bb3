//! Render host contract
//!
//! The core never draws. Each frame it hands the host a flat list of
//! GPU-ready instances, and it tells the host when entities come and go so the
//! host can manage whatever resources back them.

pub mod instance;

pub use instance::{RenderInstance, colors};

use glam::Vec2;

use crate::session::{EntityHandle, HudSnapshot};
use crate::sim::enemy::MoveType;
use crate::sim::tick::World;
use instance::{FLAG_FACING_LEFT, FLAG_GROUNDED, FLAG_MOVING, FLAG_ROUND};

/// What an entity handle refers to
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Player = 0,
    Platform = 1,
    Enemy = 2,
    Collectible = 3,
}

/// A collaborator the host could not provide
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A required UI element (score display, overlay) is missing
    MissingElement(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::MissingElement(name) => write!(f, "missing UI element: {}", name),
        }
    }
}

impl std::error::Error for HostError {}

/// Everything a host needs to draw one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    /// Platforms, then live collectibles, then enemies, then the player
    pub instances: Vec<RenderInstance>,
    /// World-space point the camera should center on
    pub camera: [f32; 2],
}

impl RenderFrame {
    /// Snapshot the drawable state of `world`
    pub fn capture(world: &World, player_color: [f32; 4]) -> Self {
        let mut instances = Vec::with_capacity(
            world.platforms.len() + world.collectibles.len() + world.enemies.len() + 1,
        );

        instances.extend(world.platforms.iter().map(|platform| {
            RenderInstance::new(
                EntityKind::Platform,
                platform.position,
                Vec2::new(platform.width, platform.height),
                platform.color,
            )
        }));

        instances.extend(world.collectibles.iter().filter(|c| !c.is_collected).map(|item| {
            RenderInstance::new(
                EntityKind::Collectible,
                item.position,
                Vec2::splat(item.radius * 2.0),
                colors::COLLECTIBLE,
            )
            .with_flags(FLAG_ROUND)
        }));

        instances.extend(world.enemies.iter().map(|enemy| {
            let body = &enemy.body;
            let (color, moving) = match enemy.move_type {
                MoveType::Stationary => (colors::ENEMY, 0),
                MoveType::Horizontal => (colors::ENEMY_PATROL, FLAG_MOVING),
            };
            let facing = if enemy.direction < 0.0 { FLAG_FACING_LEFT } else { 0 };
            let grounded = if body.is_grounded { FLAG_GROUNDED } else { 0 };
            RenderInstance::new(
                EntityKind::Enemy,
                body.position,
                Vec2::new(body.width(), body.height()),
                color,
            )
            .with_flags(moving | facing | grounded)
        }));

        let player = &world.player;
        let mut flags = 0;
        if player.facing_left {
            flags |= FLAG_FACING_LEFT;
        }
        if player.is_moving {
            flags |= FLAG_MOVING;
        }
        if player.is_grounded() {
            flags |= FLAG_GROUNDED;
        }
        instances.push(
            RenderInstance::new(
                EntityKind::Player,
                player.position(),
                Vec2::new(player.body.width(), player.body.height()),
                player_color,
            )
            .with_flags(flags),
        );

        Self {
            instances,
            camera: player.position().to_array(),
        }
    }
}

/// Host-side rendering and UI collaborator
pub trait RenderHost {
    /// An entity now exists and will appear in frames
    fn spawn(&mut self, handle: EntityHandle, kind: EntityKind);

    /// An entity is gone for good. Called exactly once per spawned handle.
    fn dispose(&mut self, handle: EntityHandle);

    /// Draw one frame
    fn present(&mut self, frame: &RenderFrame);

    /// Refresh score and status display
    fn update_hud(&mut self, hud: &HudSnapshot) -> Result<(), HostError>;
}

/// Headless host: accepts everything, draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl RenderHost for NullHost {
    fn spawn(&mut self, _handle: EntityHandle, _kind: EntityKind) {}

    fn dispose(&mut self, _handle: EntityHandle) {}

    fn present(&mut self, _frame: &RenderFrame) {}

    fn update_hud(&mut self, _hud: &HudSnapshot) -> Result<(), HostError> {
        Ok(())
    }
}
