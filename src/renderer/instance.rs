//! Per-entity instance data for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::EntityKind;

/// Instance flag bits
pub const FLAG_FACING_LEFT: u32 = 1 << 0;
pub const FLAG_MOVING: u32 = 1 << 1;
pub const FLAG_GROUNDED: u32 = 1 << 2;
/// Draw as a circle inscribed in `size` instead of a rectangle
pub const FLAG_ROUND: u32 = 1 << 3;

/// One drawable entity, laid out for direct GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    pub center: [f32; 2], // offset 0
    pub size: [f32; 2],   // offset 8
    pub color: [f32; 4],  // offset 16
    pub kind: u32,        // offset 32 - EntityKind as u32
    pub flags: u32,       // offset 36
    _pad: [u32; 2],       // pad to 48 bytes
}

impl RenderInstance {
    pub fn new(kind: EntityKind, center: Vec2, size: Vec2, color: [f32; 4]) -> Self {
        Self {
            center: center.to_array(),
            size: size.to_array(),
            color,
            kind: kind as u32,
            flags: 0,
            _pad: [0; 2],
        }
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags |= flags;
        self
    }

    #[inline]
    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

/// Colors for game elements
pub mod colors {
    pub const GROUND: [f32; 4] = [0.35, 0.25, 0.15, 1.0];
    pub const PLATFORM: [f32; 4] = [0.3, 0.6, 0.3, 1.0];
    pub const ENEMY: [f32; 4] = [0.8, 0.2, 0.2, 1.0];
    pub const ENEMY_PATROL: [f32; 4] = [0.9, 0.45, 0.1, 1.0];
    pub const COLLECTIBLE: [f32; 4] = [1.0, 0.85, 0.2, 1.0]; // Gold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 48);
        let instance = RenderInstance::new(
            EntityKind::Player,
            Vec2::new(1.0, 2.0),
            Vec2::new(0.8, 1.0),
            colors::PLATFORM,
        )
        .with_flags(FLAG_FACING_LEFT | FLAG_MOVING);

        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 48);
        let floats: &[f32] = bytemuck::cast_slice(&bytes[..32]);
        assert_eq!(&floats[..4], &[1.0, 2.0, 0.8, 1.0]);

        assert!(instance.has_flag(FLAG_MOVING));
        assert!(!instance.has_flag(FLAG_GROUNDED));
    }
}
