//! Hand-authored level used when procedural generation is turned off
//!
//! Layout is relative to `params.ground_top`; the other generation params do
//! not apply. It follows the same rules as generated levels (buffered
//! spacing, every platform reachable) so the same tests hold for it.

use glam::Vec2;

use super::GeneratedLevel;
use super::params::LevelGenerationParams;
use crate::consts::{COLLECTIBLE_HOVER, ENEMY_HEIGHT, PLAYER_HEIGHT};
use crate::sim::enemy::{EnemyBody, MoveType};
use crate::sim::state::{Collectible, GroundGap, Platform, PlatformTier};

const GROUND_HEIGHT: f32 = 1.0;
const PLATFORM_HEIGHT: f32 = 0.5;

/// Ground spans `(left, right)`
const GROUND: [(f32, f32); 2] = [(-20.0, 8.0), (10.5, 30.0)];

/// Floating platforms `(center_x, rise above ground, width, row)`
const FLOATING: [(f32, f32, f32, u32); 7] = [
    (-12.0, 1.6, 3.0, 0),
    (18.0, 1.6, 3.0, 0),
    // Bridge over the gap
    (9.25, 1.5, 2.0, 0),
    (-7.0, 3.6, 3.0, 1),
    (14.0, 3.6, 3.0, 1),
    (-2.0, 5.6, 4.0, 2),
    (19.0, 5.6, 3.0, 2),
];

/// Build the classic level
pub fn classic_level(params: &LevelGenerationParams) -> GeneratedLevel {
    let ground_top = params.ground_top;

    let mut platforms: Vec<Platform> = GROUND
        .iter()
        .map(|&(left, right)| {
            Platform::from_top(
                (left + right) / 2.0,
                ground_top,
                right - left,
                GROUND_HEIGHT,
                PlatformTier::Ground,
            )
        })
        .collect();
    platforms.extend(FLOATING.iter().map(|&(x, rise, width, row)| {
        Platform::from_top(
            x,
            ground_top + rise,
            width,
            PLATFORM_HEIGHT,
            PlatformTier::Elevated { row },
        )
    }));

    let gaps = vec![GroundGap {
        left: GROUND[0].1,
        right: GROUND[1].0,
    }];

    let enemies = vec![
        EnemyBody::new(
            Vec2::new(20.0, ground_top + ENEMY_HEIGHT / 2.0),
            MoveType::Horizontal,
            6.0,
            2.0,
        ),
        EnemyBody::new(
            Vec2::new(-7.0, ground_top + 3.6 + ENEMY_HEIGHT / 2.0),
            MoveType::Stationary,
            0.0,
            0.0,
        ),
    ];

    let mut collectibles: Vec<Collectible> = FLOATING
        .iter()
        .map(|&(x, rise, _, _)| Collectible::new(Vec2::new(x, ground_top + rise + COLLECTIBLE_HOVER)))
        .collect();
    collectibles.extend(
        [4.0_f32, 24.0]
            .iter()
            .map(|&x| Collectible::new(Vec2::new(x, ground_top + COLLECTIBLE_HOVER))),
    );

    GeneratedLevel {
        platforms,
        enemies,
        collectibles,
        gaps,
        spawn_point: Vec2::new(0.0, ground_top + PLAYER_HEIGHT / 2.0),
        spawn_platform: 0,
        seed: 0,
    }
}
