//! Placement validation for generated platforms
//!
//! Every floating platform must (a) keep clear of the other floating
//! platforms by `OVERLAP_BUFFER` and (b) be reachable under the jump
//! envelope from something already placed. Ground and floating platforms are
//! exempt from the overlap test against each other: one sits far below the
//! other, so overlapping in projection is expected.

use super::params::LevelGenerationParams;
use crate::consts::OVERLAP_BUFFER;
use crate::sim::state::{GroundGap, Platform};

/// Relaxed reachability: edges this close (as a fraction of the jump distance)...
const EDGE_REACH_FACTOR: f32 = 0.5;
/// ...with a rise of at most this fraction of the jump height
const EDGE_REACH_RISE: f32 = 0.8;
/// Minimum clearance between a floating platform's bottom and the ground top
const GROUND_CLEARANCE: f32 = 0.25;

/// Buffered overlap between two platforms.
///
/// Ground/floating pairs never count as overlapping.
pub fn overlaps_buffered(a: &Platform, b: &Platform, buffer: f32) -> bool {
    if a.is_ground() != b.is_ground() {
        return false;
    }
    a.aabb().expanded(buffer).intersects(&b.aabb())
}

/// Can a player standing on `from` jump onto `to`?
///
/// Primary envelope: centers at most `player_jump_distance` apart
/// horizontally, and `to` between `2h` below and `h` above `from`.
/// Relaxed envelope for edge-adjacent platforms: edges at most half a jump
/// apart with a modest vertical offset.
pub fn is_reachable(from: &Platform, to: &Platform, params: &LevelGenerationParams) -> bool {
    let h = params.player_jump_height;
    let dx = (to.position.x - from.position.x).abs();
    let dy = to.top() - from.top();

    if dx <= params.player_jump_distance && (-2.0 * h..=h).contains(&dy) {
        return true;
    }

    let edge_gap = from.aabb().edge_gap_x(&to.aabb());
    edge_gap <= params.player_jump_distance * EDGE_REACH_FACTOR
        && (-h..=h * EDGE_REACH_RISE).contains(&dy)
}

/// First-row check: a row-0 platform rises at most `0.7h` above the ground
/// and lies within a jump of some ground segment.
pub fn reachable_from_ground<'a>(
    candidate: &Platform,
    ground: impl IntoIterator<Item = &'a Platform>,
    params: &LevelGenerationParams,
) -> bool {
    let rise = candidate.top() - params.ground_top;
    if rise <= 0.0 || rise > params.first_row_max_rise() + f32::EPSILON {
        return false;
    }
    ground.into_iter().any(|segment| {
        segment.aabb().edge_gap_x(&candidate.aabb()) <= params.player_jump_distance
    })
}

/// The platform layout being built, with its validation rules
#[derive(Debug)]
pub struct Layout<'a> {
    params: &'a LevelGenerationParams,
    /// Accepted platforms, in placement order
    pub platforms: Vec<Platform>,
    pub gaps: Vec<GroundGap>,
    pub spawn_platform: usize,
    /// Candidates rejected so far
    pub rejected: u32,
}

impl<'a> Layout<'a> {
    pub fn new(
        params: &'a LevelGenerationParams,
        ground: Vec<Platform>,
        gaps: Vec<GroundGap>,
        spawn_platform: usize,
    ) -> Self {
        Self {
            params,
            platforms: ground,
            gaps,
            spawn_platform,
            rejected: 0,
        }
    }

    pub fn params(&self) -> &LevelGenerationParams {
        self.params
    }

    pub fn ground(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| p.is_ground())
    }

    pub fn floating(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| !p.is_ground())
    }

    /// Geometry checks: inside the level, above the ground, clear of every
    /// other floating platform
    pub fn fits(&self, candidate: &Platform) -> bool {
        let params = self.params;
        if candidate.left() < params.level_min_x
            || candidate.right() > params.level_max_x
            || candidate.top() > params.level_max_y
            || candidate.bottom() < params.ground_top + GROUND_CLEARANCE
        {
            return false;
        }
        !self
            .floating()
            .any(|placed| overlaps_buffered(placed, candidate, OVERLAP_BUFFER))
    }

    /// Reachability check matching the candidate's row
    pub fn is_reachable(&self, candidate: &Platform) -> bool {
        match candidate.row() {
            None => true,
            Some(0) => reachable_from_ground(candidate, self.ground(), self.params),
            Some(_) => self
                .floating()
                .any(|placed| is_reachable(placed, candidate, self.params)),
        }
    }

    /// Accept `candidate` if it passes every check. Rejections are soft.
    pub fn try_place(&mut self, candidate: Platform) -> bool {
        if candidate.is_ground() {
            log::debug!("Ground segments are laid out directly, not placed");
            return false;
        }
        if self.fits(&candidate) && self.is_reachable(&candidate) {
            self.platforms.push(candidate);
            true
        } else {
            self.rejected += 1;
            log::debug!(
                "Rejected platform at ({:.2}, {:.2}) width {:.2}",
                candidate.position.x,
                candidate.top(),
                candidate.width
            );
            false
        }
    }
}
