//! Ground layout: spawn platform, segments and jumpable gaps
//!
//! The spawn platform is laid down around the origin first, then the ground
//! is extended outward toward each level boundary one step at a time. A step
//! is a segment, or (with `ground_gap_chance`) a gap. Two gaps never follow
//! each other and the ground never ends in a gap. Segments that touch are
//! merged, so the final ground is a list of disjoint spans with gaps between.

use super::params::LevelGenerationParams;
use super::rng::LevelRng;
use crate::sim::state::{GroundGap, Platform, PlatformTier};

/// Extensions shorter than this are absorbed by the previous segment
const MIN_SEGMENT_REMAINDER: f32 = 1e-3;

/// Laid-out ground, ordered left to right
#[derive(Debug, Clone)]
pub struct GroundLayout {
    pub segments: Vec<Platform>,
    pub gaps: Vec<GroundGap>,
    /// Index into `segments` of the span holding the origin
    pub spawn_index: usize,
}

/// Walk outward from a spawn edge. Returns the gaps as distances from the
/// edge, in walk order.
fn walk_outward(rng: &mut LevelRng, params: &LevelGenerationParams, room: f32) -> Vec<(f32, f32)> {
    let mut gaps = Vec::new();
    let mut cursor = 0.0;
    let mut last_was_gap = false;

    while room - cursor > MIN_SEGMENT_REMAINDER {
        if !last_was_gap && rng.chance(params.ground_gap_chance) {
            let gap = rng.range(params.ground_gap_min_width, params.ground_gap_max_width);
            // Only open a gap if a full segment still fits behind it
            if cursor + gap + params.ground_segment_min_width <= room {
                gaps.push((cursor, cursor + gap));
                cursor += gap;
                last_was_gap = true;
                continue;
            }
        }

        let width = rng.range(
            params.ground_segment_min_width,
            params.ground_segment_max_width,
        );
        cursor = (cursor + width).min(room);
        last_was_gap = false;
    }

    gaps
}

/// Lay out the ground for one level
pub fn generate_ground(rng: &mut LevelRng, params: &LevelGenerationParams) -> GroundLayout {
    let half = params.spawn_platform_width / 2.0;
    let spawn_left = (-half).max(params.level_min_x);
    let spawn_right = half.min(params.level_max_x);

    let mut gaps: Vec<GroundGap> = Vec::new();

    for (near, far) in walk_outward(rng, params, params.level_max_x - spawn_right) {
        gaps.push(GroundGap {
            left: spawn_right + near,
            right: spawn_right + far,
        });
    }
    for (near, far) in walk_outward(rng, params, spawn_left - params.level_min_x) {
        gaps.push(GroundGap {
            left: spawn_left - far,
            right: spawn_left - near,
        });
    }
    gaps.sort_by(|a, b| a.left.total_cmp(&b.left));

    // Ground is the complement of the gaps over the whole level. Every run
    // between two gaps is one merged segment.
    let mut spans = Vec::with_capacity(gaps.len() + 1);
    let mut start = params.level_min_x;
    for gap in &gaps {
        spans.push((start, gap.left));
        start = gap.right;
    }
    spans.push((start, params.level_max_x));

    let spawn_index = spans
        .iter()
        .position(|&(left, right)| left <= 0.0 && 0.0 <= right)
        .unwrap_or(0);

    let segments = spans
        .into_iter()
        .map(|(left, right)| {
            Platform::from_top(
                (left + right) / 2.0,
                params.ground_top,
                right - left,
                params.ground_height,
                PlatformTier::Ground,
            )
        })
        .collect();

    GroundLayout {
        segments,
        gaps,
        spawn_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_for(seed: u32) -> (GroundLayout, LevelGenerationParams) {
        let params = LevelGenerationParams::default();
        let mut rng = LevelRng::new(seed);
        (generate_ground(&mut rng, &params), params)
    }

    #[test]
    fn test_ground_covers_level_without_overlap() {
        for seed in 0..50 {
            let (ground, params) = layout_for(seed);
            let first = &ground.segments[0];
            let last = &ground.segments[ground.segments.len() - 1];
            assert!((first.left() - params.level_min_x).abs() < 1e-4);
            assert!((last.right() - params.level_max_x).abs() < 1e-4);

            for pair in ground.segments.windows(2) {
                // Disjoint, separated by a real gap
                assert!(pair[0].right() < pair[1].left(), "seed {}", seed);
            }
            assert_eq!(ground.gaps.len(), ground.segments.len() - 1);
        }
    }

    #[test]
    fn test_gaps_are_jumpable() {
        for seed in 0..50 {
            let (ground, params) = layout_for(seed);
            for gap in &ground.gaps {
                assert!(gap.width() >= params.ground_gap_min_width - 1e-4);
                assert!(gap.width() <= params.ground_gap_max_width + 1e-4);
            }
        }
    }

    #[test]
    fn test_spawn_platform_holds_origin() {
        for seed in 0..50 {
            let (ground, params) = layout_for(seed);
            let spawn = &ground.segments[ground.spawn_index];
            assert!(spawn.left() <= -params.spawn_platform_width / 2.0 + 1e-4);
            assert!(spawn.right() >= params.spawn_platform_width / 2.0 - 1e-4);
            assert_eq!(spawn.top(), params.ground_top);
        }
    }

    #[test]
    fn test_no_gaps_when_chance_is_zero() {
        let params = LevelGenerationParams {
            ground_gap_chance: 0.0,
            ..Default::default()
        };
        let ground = generate_ground(&mut LevelRng::new(3), &params);
        assert_eq!(ground.segments.len(), 1);
        assert!(ground.gaps.is_empty());
        assert_eq!(ground.spawn_index, 0);
    }

    #[test]
    fn test_always_gap_never_doubles_up() {
        let params = LevelGenerationParams {
            ground_gap_chance: 1.0,
            ..Default::default()
        };
        let ground = generate_ground(&mut LevelRng::new(5), &params);
        assert!(!ground.gaps.is_empty());
        // Every segment has some width, so no two gaps are adjacent
        for segment in &ground.segments {
            assert!(segment.width > 0.0);
        }
    }
}
