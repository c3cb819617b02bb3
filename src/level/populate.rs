//! Enemies and collectibles
//!
//! Population runs after the platform layout is final, so it never changes
//! which platforms exist. Enemies are spread over equal sub-segments of their
//! platform with a patrol range that keeps them on it. Collectibles hover
//! above platforms, arch over ground gaps, and occasionally trail between
//! two floating platforms.

use std::f32::consts::PI;

use glam::Vec2;

use super::params::LevelGenerationParams;
use super::rng::LevelRng;
use crate::consts::{COLLECTIBLE_HOVER, ENEMY_HEIGHT, ENEMY_WIDTH};
use crate::lerp;
use crate::sim::enemy::{EnemyBody, MoveType};
use crate::sim::state::{Collectible, GroundGap, Platform};

/// Narrower platforms never get an enemy
const MIN_ENEMY_PLATFORM_WIDTH: f32 = 2.0;
/// Room each enemy needs on its platform
const ENEMY_SPACING: f32 = 2.0;
/// Sub-segments at least this wide let their enemy patrol
const MIN_PATROL_SEGMENT: f32 = 2.0;
const FLOATING_SPEED_MIN: f32 = 0.8;
const FLOATING_SPEED_MAX: f32 = 1.8;
const GROUND_SPEED_MIN: f32 = 1.5;
const GROUND_SPEED_MAX: f32 = 3.0;
/// Share of ground enemies that patrol
const GROUND_PATROL_CHANCE: f32 = 0.6;

/// Collectible capacity: one per this many units of platform width
const COLLECTIBLE_SPACING_MIN: f32 = 1.2;
const COLLECTIBLE_SPACING_MAX: f32 = 1.5;
const COLLECTIBLE_JITTER: f32 = 0.15;
/// Gaps wider than this get an arch of collectibles
const MIN_ARCH_GAP: f32 = 1.5;
const GAP_ARCH_HEIGHT: f32 = 1.0;
const TRAIL_CHANCE: f32 = 0.3;
const TRAIL_MIN_EDGE_GAP: f32 = 3.0;
/// Longest trail, as a multiple of the jump distance
const TRAIL_MAX_REACH: f32 = 1.2;
/// Trails only join platforms within this fraction of the jump height
const TRAIL_MAX_RISE: f32 = 0.8;
const TRAIL_ARCH_HEIGHT: f32 = 0.6;

/// Spread `count` enemies across `platform`
fn spawn_on_platform(
    rng: &mut LevelRng,
    platform: &Platform,
    count: u32,
    speed: (f32, f32),
    patrol_chance: f32,
    out: &mut Vec<EnemyBody>,
) {
    let segment_width = platform.width / count as f32;
    for i in 0..count {
        let center = platform.left() + (i as f32 + 0.5) * segment_width;
        let patrols = segment_width >= MIN_PATROL_SEGMENT && rng.chance(patrol_chance);
        let (move_type, range) = if patrols {
            (MoveType::Horizontal, (segment_width - ENEMY_WIDTH).max(0.0))
        } else {
            (MoveType::Stationary, 0.0)
        };
        let speed = rng.range(speed.0, speed.1);
        let position = Vec2::new(center, platform.top() + ENEMY_HEIGHT / 2.0);

        let mut enemy = EnemyBody::new(position, move_type, range, speed);
        if rng.sign() < 0.0 {
            enemy = enemy.facing_left();
        }
        enemy.body.is_grounded = true;
        out.push(enemy);
    }
}

/// Place enemies on floating platforms, then on every ground segment except
/// the spawn platform
pub fn place_enemies(
    rng: &mut LevelRng,
    params: &LevelGenerationParams,
    platforms: &[Platform],
    spawn_platform: usize,
) -> Vec<EnemyBody> {
    let mut enemies = Vec::new();

    for platform in platforms.iter().filter(|p| !p.is_ground()) {
        if !rng.chance(params.enemy_density) || platform.width < MIN_ENEMY_PLATFORM_WIDTH {
            continue;
        }
        let capacity = (platform.width / ENEMY_SPACING).floor() as u32;
        let count = rng.int_inclusive(1, 2).min(capacity);
        spawn_on_platform(
            rng,
            platform,
            count,
            (FLOATING_SPEED_MIN, FLOATING_SPEED_MAX),
            1.0,
            &mut enemies,
        );
    }

    for (index, segment) in platforms.iter().enumerate() {
        if !segment.is_ground() || index == spawn_platform {
            continue;
        }
        let capacity = (segment.width / ENEMY_SPACING).floor() as u32;
        if capacity == 0 {
            continue;
        }
        let count = rng.int_inclusive(1, 2).min(capacity);
        spawn_on_platform(
            rng,
            segment,
            count,
            (GROUND_SPEED_MIN, GROUND_SPEED_MAX),
            GROUND_PATROL_CHANCE,
            &mut enemies,
        );
    }

    enemies
}

/// Collectibles hovering above platforms, arched over gaps and trailing
/// between nearby floating platforms
pub fn place_collectibles(
    rng: &mut LevelRng,
    params: &LevelGenerationParams,
    platforms: &[Platform],
    gaps: &[GroundGap],
) -> Vec<Collectible> {
    let mut collectibles = Vec::new();

    for platform in platforms {
        if !rng.chance(params.collectible_density) {
            continue;
        }
        let spacing = rng.range(COLLECTIBLE_SPACING_MIN, COLLECTIBLE_SPACING_MAX);
        let capacity = (platform.width / spacing).floor() as u32;
        if capacity == 0 {
            continue;
        }
        let count = rng.int_inclusive(1, 3).min(capacity);
        for i in 0..count {
            let t = (i + 1) as f32 / (count + 1) as f32;
            let jitter = rng.range(-COLLECTIBLE_JITTER, COLLECTIBLE_JITTER);
            let x = platform.left() + platform.width * t + jitter;
            collectibles.push(Collectible::new(Vec2::new(
                x,
                platform.top() + COLLECTIBLE_HOVER,
            )));
        }
    }

    for gap in gaps.iter().filter(|gap| gap.width() > MIN_ARCH_GAP) {
        let count = if gap.width() > 2.5 { 4 } else { 3 };
        for i in 0..count {
            let t = i as f32 / (count - 1) as f32;
            let x = lerp(gap.left, gap.right, t);
            let y = params.ground_top + COLLECTIBLE_HOVER + (t * PI).sin() * GAP_ARCH_HEIGHT;
            collectibles.push(Collectible::new(Vec2::new(x, y)));
        }
    }

    collectibles.extend(place_trails(rng, params, platforms));
    collectibles
}

/// At most one trail per floating platform, toward the first later platform
/// in range
fn place_trails(
    rng: &mut LevelRng,
    params: &LevelGenerationParams,
    platforms: &[Platform],
) -> Vec<Collectible> {
    let floating: Vec<&Platform> = platforms.iter().filter(|p| !p.is_ground()).collect();
    let max_reach = params.player_jump_distance * TRAIL_MAX_REACH;
    let max_rise = params.player_jump_height * TRAIL_MAX_RISE;
    let mut trail = Vec::new();

    for (i, from) in floating.iter().enumerate() {
        let target = floating[i + 1..].iter().find(|to| {
            let edge_gap = from.aabb().edge_gap_x(&to.aabb());
            (TRAIL_MIN_EDGE_GAP..=max_reach).contains(&edge_gap)
                && (to.top() - from.top()).abs() < max_rise
        });
        let Some(to) = target else {
            continue;
        };
        if !rng.chance(TRAIL_CHANCE) {
            continue;
        }

        let start = Vec2::new(from.position.x, from.top());
        let end = Vec2::new(to.position.x, to.top());
        let count = rng.int_inclusive(2, 3);
        for k in 1..=count {
            let t = k as f32 / (count + 1) as f32;
            let arc = (t * PI).sin() * TRAIL_ARCH_HEIGHT;
            let point = start.lerp(end, t) + Vec2::new(0.0, COLLECTIBLE_HOVER + arc);
            trail.push(Collectible::new(point));
        }
    }
    trail
}
