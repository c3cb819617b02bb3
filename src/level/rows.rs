//! Floating platform rows
//!
//! Rows are placed bottom-up. The first row hangs low enough to reach from
//! the ground, bridges cover the ground gaps, and every later row is either a
//! standard row (slots across the level, anchored near reachable platforms
//! below) or a zig-zag row. Connectors fill tall gaps between adjacent rows.

use super::params::LevelGenerationParams;
use super::placement::Layout;
use super::rng::LevelRng;
use crate::lerp;
use crate::sim::state::{Platform, PlatformTier};

/// First-row rise, as fractions of the jump height
const FIRST_ROW_MIN_RISE: f32 = 0.6;
/// Placement attempts per requested platform
const ATTEMPTS_PER_PLATFORM: u32 = 4;
/// Gaps at least this wide get a bridge
const MIN_BRIDGE_GAP: f32 = 1.0;
const BRIDGE_MIN_WIDTH: f32 = 1.5;
const BRIDGE_MAX_WIDTH: f32 = 2.5;
/// Bridges may sit this far below the first row
const BRIDGE_DROP: f32 = 0.25;
const ZIGZAG_SEGMENTS: u32 = 5;
/// Zig-zag offset, as a fraction of the segment width
const ZIGZAG_OFFSET: f32 = 0.25;
/// Vertical swing of zig-zag platforms around the row height
const ZIGZAG_SWING: f32 = 0.3;
/// Rows farther apart than this get connectors
const CONNECTOR_MIN_SPACING: f32 = 1.5;
const MAX_CONNECTORS_PER_PAIR: u32 = 3;
const CONNECTOR_MIN_WIDTH: f32 = 1.2;
const CONNECTOR_MAX_WIDTH: f32 = 2.0;
/// Platform pairs with edges closer than this need no connector
const CONNECTOR_MIN_EDGE_GAP: f32 = 2.5;

/// One placed row: index and base top height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBand {
    pub row: u32,
    pub top: f32,
}

fn row_platform(params: &LevelGenerationParams, x: f32, top: f32, width: f32, row: u32) -> Platform {
    Platform::from_top(x, top, width, params.platform_height, PlatformTier::Elevated { row })
}

/// Place row 0 left to right with randomized spacing. Returns its band.
pub fn place_first_row(layout: &mut Layout, rng: &mut LevelRng) -> RowBand {
    let params = layout.params().clone();
    let rise = rng.range(
        params.player_jump_height * FIRST_ROW_MIN_RISE,
        params.first_row_max_rise(),
    );
    let top = params.ground_top + rise;

    // Stretch spacing so the target count spreads across the level
    let avg_width = (params.platform_min_width + params.platform_max_width) / 2.0;
    let avg_gap = (params.min_horizontal_gap + params.max_horizontal_gap) / 2.0;
    let slot = params.level_width() / params.platforms_per_row as f32;
    let spread = (slot - avg_width - avg_gap).max(0.0);

    let mut cursor = params.level_min_x + rng.range(0.0, params.max_horizontal_gap);
    let mut placed = 0;
    let mut attempts = 0;
    while placed < params.platforms_per_row
        && attempts < params.platforms_per_row.saturating_mul(ATTEMPTS_PER_PLATFORM)
    {
        attempts += 1;
        let width = rng.range(params.platform_min_width, params.platform_max_width);
        let gap = rng.range(params.min_horizontal_gap, params.max_horizontal_gap)
            + rng.range(0.0, 2.0 * spread);
        let left = cursor + gap;
        if left + width > params.level_max_x {
            break;
        }
        if layout.try_place(row_platform(&params, left + width / 2.0, top, width, 0)) {
            placed += 1;
            cursor = left + width;
        } else {
            cursor = left;
        }
    }

    log::debug!("First row at {:.2}: {} platforms", top, placed);
    RowBand { row: 0, top }
}

/// Bridge every viable ground gap near first-row height
pub fn place_bridges(layout: &mut Layout, rng: &mut LevelRng, first_row: RowBand) {
    let params = layout.params().clone();
    let gaps: Vec<_> = layout
        .gaps
        .iter()
        .copied()
        .filter(|gap| gap.width() >= MIN_BRIDGE_GAP)
        .collect();

    for gap in gaps {
        let width = rng.range(BRIDGE_MIN_WIDTH, BRIDGE_MAX_WIDTH);
        let top = first_row.top - rng.range(0.0, BRIDGE_DROP);
        let bridge = row_platform(&params, gap.center(), top, width, first_row.row);
        if !layout.try_place(bridge) {
            log::debug!("No bridge over gap at {:.2}", gap.center());
        }
    }
}

/// Horizontal position near a reachable platform below, kept inside the slot
fn anchored_x(
    layout: &Layout,
    rng: &mut LevelRng,
    slot: (f32, f32),
    top: f32,
    width: f32,
) -> f32 {
    let params = layout.params();
    let reach = params.player_jump_distance;
    let lo = slot.0 + width / 2.0;
    let hi = (slot.1 - width / 2.0).max(lo);

    let anchors: Vec<f32> = layout
        .floating()
        .filter(|p| {
            let rise = top - p.top();
            rise > 0.0
                && rise <= params.player_jump_height
                && p.position.x >= slot.0 - reach
                && p.position.x <= slot.1 + reach
        })
        .map(|p| p.position.x)
        .collect();

    if anchors.is_empty() {
        return rng.range(lo, hi);
    }
    let pick = rng.int_inclusive(0, anchors.len() as u32 - 1) as usize;
    let x = anchors[pick] + rng.range(-reach, reach) * 0.8;
    x.clamp(lo, hi)
}

/// Slots across the level, one platform per slot
fn place_standard_row(layout: &mut Layout, rng: &mut LevelRng, band: RowBand) -> u32 {
    let params = layout.params().clone();
    let slot_width = params.level_width() / params.platforms_per_row as f32;
    let mut placed = 0;

    for slot in 0..params.platforms_per_row {
        let slot_left = params.level_min_x + slot as f32 * slot_width;
        let bounds = (slot_left, slot_left + slot_width);
        for _ in 0..ATTEMPTS_PER_PLATFORM {
            let width = rng
                .range(params.platform_min_width, params.platform_max_width)
                .min(slot_width);
            let x = anchored_x(layout, rng, bounds, band.top, width);
            if layout.try_place(row_platform(&params, x, band.top, width, band.row)) {
                placed += 1;
                break;
            }
        }
    }
    placed
}

/// Five segments with alternating offsets and a vertical swing
fn place_zigzag_row(layout: &mut Layout, rng: &mut LevelRng, band: RowBand) -> u32 {
    let params = layout.params().clone();
    let segment_width = params.level_width() / ZIGZAG_SEGMENTS as f32;
    let first_sign = rng.sign();
    let mut placed = 0;

    for segment in 0..ZIGZAG_SEGMENTS {
        let sign = if segment % 2 == 0 { first_sign } else { -first_sign };
        let base_x = params.level_min_x + (segment as f32 + 0.5) * segment_width;
        for attempt in 0..ATTEMPTS_PER_PLATFORM {
            // Each retry pulls the offset back toward the segment center
            let falloff = 1.0 - attempt as f32 / ATTEMPTS_PER_PLATFORM as f32;
            let width = rng.range(params.platform_min_width, params.platform_max_width);
            let x = base_x + sign * segment_width * ZIGZAG_OFFSET * falloff;
            let top = band.top + sign * ZIGZAG_SWING * falloff;
            if layout.try_place(row_platform(&params, x, top, width, band.row)) {
                placed += 1;
                break;
            }
        }
    }
    placed
}

/// Rows above the first. Returns every band that received a platform.
pub fn place_upper_rows(layout: &mut Layout, rng: &mut LevelRng, first_row: RowBand) -> Vec<RowBand> {
    let params = layout.params().clone();
    let avg_spacing = (params.min_vertical_spacing + params.max_vertical_spacing) / 2.0;
    let available = (params.level_max_y - first_row.top).max(0.0);
    let row_count = (available / avg_spacing).floor() as u32;

    let mut bands = vec![first_row];
    let mut top = first_row.top;
    for row in 1..=row_count {
        top += rng.range(params.min_vertical_spacing, params.max_vertical_spacing);
        if top > params.level_max_y {
            break;
        }
        let band = RowBand { row, top };
        let placed = if rng.chance(0.5) {
            place_zigzag_row(layout, rng, band)
        } else {
            place_standard_row(layout, rng, band)
        };
        log::debug!("Row {} at {:.2}: {} platforms", row, top, placed);
        if placed > 0 {
            bands.push(band);
        }
    }
    bands
}

/// Connectors between adjacent bands spaced more than
/// `CONNECTOR_MIN_SPACING` apart
pub fn place_connectors(layout: &mut Layout, rng: &mut LevelRng, bands: &[RowBand]) -> u32 {
    let params = layout.params().clone();
    let mut total = 0;

    for pair in bands.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if upper.top - lower.top <= CONNECTOR_MIN_SPACING {
            continue;
        }

        let in_row = |row: u32| -> Vec<Platform> {
            layout
                .floating()
                .filter(|p| p.row() == Some(row))
                .cloned()
                .collect()
        };
        let lows = in_row(lower.row);
        let highs = in_row(upper.row);
        let candidates: Vec<(Platform, Platform)> = lows
            .iter()
            .flat_map(|low| highs.iter().map(move |high| (low.clone(), high.clone())))
            .filter(|(low, high)| {
                let edge_gap = low.aabb().edge_gap_x(&high.aabb());
                (CONNECTOR_MIN_EDGE_GAP..=2.0 * params.player_jump_distance).contains(&edge_gap)
            })
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let mut placed = 0;
        for _ in 0..MAX_CONNECTORS_PER_PAIR * ATTEMPTS_PER_PLATFORM {
            if placed == MAX_CONNECTORS_PER_PAIR {
                break;
            }
            let pick = rng.int_inclusive(0, candidates.len() as u32 - 1) as usize;
            let (low, high) = &candidates[pick];
            let t = rng.range(0.35, 0.65);
            let x = lerp(low.position.x, high.position.x, t);
            let top = lerp(low.top(), high.top(), t);
            let width = rng.range(CONNECTOR_MIN_WIDTH, CONNECTOR_MAX_WIDTH);
            if layout.try_place(row_platform(&params, x, top, width, upper.row)) {
                placed += 1;
            }
        }
        total += placed;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::ground::generate_ground;

    fn layout_with_ground<'a>(params: &'a LevelGenerationParams, rng: &mut LevelRng) -> Layout<'a> {
        let ground = generate_ground(rng, params);
        Layout::new(params, ground.segments, ground.gaps, ground.spawn_index)
    }

    #[test]
    fn test_first_row_height_window() {
        let params = LevelGenerationParams::default();
        for seed in 0..20 {
            let mut rng = LevelRng::new(seed);
            let mut layout = layout_with_ground(&params, &mut rng);
            let band = place_first_row(&mut layout, &mut rng);

            assert!(band.top - params.ground_top >= params.player_jump_height * FIRST_ROW_MIN_RISE);
            assert!(band.top - params.ground_top <= params.first_row_max_rise());
            let row0 = layout.floating().filter(|p| p.row() == Some(0)).count();
            assert!(row0 > 0, "seed {}", seed);
            assert!(row0 as u32 <= params.platforms_per_row);
        }
    }

    #[test]
    fn test_first_row_clears_player_on_ground() {
        // Walking under the first row never snags the player's head
        let params = LevelGenerationParams::default();
        let mut rng = LevelRng::new(11);
        let mut layout = layout_with_ground(&params, &mut rng);
        place_first_row(&mut layout, &mut rng);
        for platform in layout.floating() {
            assert!(platform.bottom() >= params.ground_top + crate::consts::PLAYER_HEIGHT - 1e-4);
        }
    }

    #[test]
    fn test_bridges_sit_over_gaps() {
        let params = LevelGenerationParams {
            ground_gap_chance: 1.0,
            platforms_per_row: 1,
            ..Default::default()
        };
        let mut rng = LevelRng::new(8);
        let mut layout = layout_with_ground(&params, &mut rng);
        let band = place_first_row(&mut layout, &mut rng);
        let before = layout.floating().count();
        place_bridges(&mut layout, &mut rng, band);

        let bridges: Vec<_> = layout.floating().skip(before).collect();
        assert!(!bridges.is_empty());
        for bridge in bridges {
            assert!(layout
                .gaps
                .iter()
                .any(|gap| (gap.center() - bridge.position.x).abs() < 1e-4));
        }
    }

    fn flat_layout(params: &LevelGenerationParams) -> Layout<'_> {
        let ground = Platform::from_top(
            0.0,
            params.ground_top,
            params.level_width(),
            params.ground_height,
            PlatformTier::Ground,
        );
        Layout::new(params, vec![ground], Vec::new(), 0)
    }

    #[test]
    fn test_zigzag_row_alternates() {
        let params = LevelGenerationParams::default();
        let segment_width = params.level_width() / ZIGZAG_SEGMENTS as f32;
        for seed in 0..10 {
            let mut layout = flat_layout(&params);
            let mut rng = LevelRng::new(seed);
            let band = RowBand { row: 0, top: 1.2 };

            // Nothing else on the row, so every segment lands on its first try
            assert_eq!(place_zigzag_row(&mut layout, &mut rng, band), ZIGZAG_SEGMENTS);

            let offsets: Vec<(f32, f32)> = layout
                .floating()
                .enumerate()
                .map(|(i, p)| {
                    let base_x = params.level_min_x + (i as f32 + 0.5) * segment_width;
                    (p.position.x - base_x, p.top() - band.top)
                })
                .collect();
            for &(dx, dy) in &offsets {
                assert!((dx.abs() - segment_width * ZIGZAG_OFFSET).abs() < 1e-3);
                assert!((dy.abs() - ZIGZAG_SWING).abs() < 1e-4);
                // Shifted right means shifted up
                assert_eq!(dx > 0.0, dy > 0.0);
            }
            for pair in offsets.windows(2) {
                assert!(pair[0].0 * pair[1].0 < 0.0, "seed {}: {:?}", seed, offsets);
            }
        }
    }

    /// Row 1 at top 4.0 and row 2 at `upper_top`, alternating 10 apart
    fn two_band_layout(params: &LevelGenerationParams, upper_top: f32) -> (Layout<'_>, [RowBand; 2]) {
        let mut layout = flat_layout(params);
        for i in 0..11 {
            let x = -50.0 + i as f32 * 10.0;
            let (row, top) = if i % 2 == 0 { (1, 4.0) } else { (2, upper_top) };
            layout
                .platforms
                .push(row_platform(params, x, top, 2.0, row));
        }
        let bands = [RowBand { row: 1, top: 4.0 }, RowBand { row: 2, top: upper_top }];
        (layout, bands)
    }

    #[test]
    fn test_connectors_bridge_spread_bands() {
        let params = LevelGenerationParams::default();
        let mut total = 0;
        for seed in 0..10 {
            let (mut layout, bands) = two_band_layout(&params, 6.2);
            let before = layout.platforms.len();
            let mut rng = LevelRng::new(seed);

            let placed = place_connectors(&mut layout, &mut rng, &bands);
            assert!(placed <= MAX_CONNECTORS_PER_PAIR);
            assert_eq!(layout.platforms.len() - before, placed as usize);

            for connector in &layout.platforms[before..] {
                assert_eq!(connector.row(), Some(2));
                assert!(connector.top() > 4.0 && connector.top() < 6.2);
                assert!(connector.width >= CONNECTOR_MIN_WIDTH);
                assert!(connector.width <= CONNECTOR_MAX_WIDTH);
            }
            total += placed;
        }
        assert!(total > 0);
    }

    #[test]
    fn test_close_bands_get_no_connectors() {
        let params = LevelGenerationParams::default();
        let (mut layout, bands) = two_band_layout(&params, 5.2);
        let before = layout.platforms.len();
        let placed = place_connectors(&mut layout, &mut LevelRng::new(1), &bands);
        assert_eq!(placed, 0);
        assert_eq!(layout.platforms.len(), before);
    }

    #[test]
    fn test_upper_rows_stay_below_ceiling() {
        let params = LevelGenerationParams::default();
        let mut rng = LevelRng::new(21);
        let mut layout = layout_with_ground(&params, &mut rng);
        let first = place_first_row(&mut layout, &mut rng);
        let bands = place_upper_rows(&mut layout, &mut rng, first);

        assert!(bands.len() > 1);
        for pair in bands.windows(2) {
            assert!(pair[1].top > pair[0].top);
        }
        for platform in layout.floating() {
            assert!(platform.top() <= params.level_max_y);
        }
    }
}
