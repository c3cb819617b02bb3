//! Level generation parameters and their validation

use serde::{Deserialize, Serialize};

use crate::consts::{FALL_THRESHOLD_Y, FIRST_ROW_JUMP_MARGIN, MAX_GROUND_GAP};

/// Inputs to the procedural generator.
///
/// Every field has a default, so configuration can override any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelGenerationParams {
    /// Fixed seed; `None` picks a fresh one
    pub seed: Option<u32>,

    // === Bounds ===
    pub level_min_x: f32,
    pub level_max_x: f32,
    /// Highest platform top the generator may place
    pub level_max_y: f32,
    /// Height of the ground's walkable surface
    pub ground_top: f32,
    /// Players below this height are out of bounds
    pub fall_threshold_y: f32,

    // === Ground ===
    pub ground_height: f32,
    pub spawn_platform_width: f32,
    pub ground_segment_min_width: f32,
    pub ground_segment_max_width: f32,
    /// Chance (0-1) that a step along the ground opens a gap
    pub ground_gap_chance: f32,
    pub ground_gap_min_width: f32,
    pub ground_gap_max_width: f32,

    // === Floating platforms ===
    pub platform_min_width: f32,
    pub platform_max_width: f32,
    pub platform_height: f32,
    pub min_horizontal_gap: f32,
    pub max_horizontal_gap: f32,
    pub min_vertical_spacing: f32,
    pub max_vertical_spacing: f32,
    /// Target platform count per row
    pub platforms_per_row: u32,

    // === Jump envelope ===
    /// Highest rise a jump can clear
    pub player_jump_height: f32,
    /// Farthest horizontal distance a jump can cover
    pub player_jump_distance: f32,

    // === Density (0-1) ===
    pub enemy_density: f32,
    pub collectible_density: f32,
}

impl Default for LevelGenerationParams {
    fn default() -> Self {
        Self {
            seed: None,

            level_min_x: -60.0,
            level_max_x: 60.0,
            level_max_y: 16.0,
            ground_top: 0.0,
            fall_threshold_y: FALL_THRESHOLD_Y,

            ground_height: 1.0,
            spawn_platform_width: 10.0,
            ground_segment_min_width: 4.0,
            ground_segment_max_width: 12.0,
            ground_gap_chance: 0.35,
            ground_gap_min_width: 1.5,
            ground_gap_max_width: MAX_GROUND_GAP,

            platform_min_width: 2.0,
            platform_max_width: 5.0,
            platform_height: 0.5,
            min_horizontal_gap: 1.5,
            max_horizontal_gap: 4.0,
            min_vertical_spacing: 1.8,
            max_vertical_spacing: 2.4,
            platforms_per_row: 10,

            // Matches the default player: v²/2g = 10²/40, v * 2v/g = 5 * 1
            player_jump_height: 2.5,
            player_jump_distance: 5.0,

            enemy_density: 0.35,
            collectible_density: 0.6,
        }
    }
}

/// Malformed generation parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A value that must be finite is NaN or infinite
    NotFinite { field: &'static str },
    /// A size that must be strictly positive is not
    NonPositive { field: &'static str, value: f32 },
    /// A `min` that must stay below its `max` does not
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    /// A probability outside [0, 1]
    InvalidDensity { field: &'static str, value: f32 },
    /// Geometry the player could never traverse
    Unreachable { field: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFinite { field } => write!(f, "{} must be finite", field),
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be positive (got {})", field, value)
            }
            ConfigError::InvalidRange { field, min, max } => {
                write!(f, "{}: min {} must be below max {}", field, min, max)
            }
            ConfigError::InvalidDensity { field, value } => {
                write!(f, "{} must be within [0, 1] (got {})", field, value)
            }
            ConfigError::Unreachable { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn ordered(field: &'static str, min: f32, max: f32, strict: bool) -> Result<(), ConfigError> {
    finite(field, min)?;
    finite(field, max)?;
    let ok = if strict { min < max } else { min <= max };
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, min, max })
    }
}

fn density(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDensity { field, value })
    }
}

impl LevelGenerationParams {
    /// Same parameters with a fixed seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total horizontal extent
    #[inline]
    pub fn level_width(&self) -> f32 {
        self.level_max_x - self.level_min_x
    }

    /// Highest rise of the first elevated row above the ground
    #[inline]
    pub fn first_row_max_rise(&self) -> f32 {
        self.player_jump_height * FIRST_ROW_JUMP_MARGIN
    }

    /// Most platforms of minimum width that fit side by side in one row
    pub fn max_platforms_per_row(&self) -> u32 {
        (self.level_width() / self.platform_min_width).floor() as u32
    }

    /// Reject parameters that would produce a degenerate or unplayable level
    pub fn validate(&self) -> Result<(), ConfigError> {
        ordered("level_x", self.level_min_x, self.level_max_x, true)?;
        finite("ground_top", self.ground_top)?;
        ordered("fall_threshold_y", self.fall_threshold_y, self.ground_top, true)?;
        ordered(
            "level_max_y",
            self.ground_top + self.first_row_max_rise(),
            self.level_max_y,
            false,
        )?;

        positive("ground_height", self.ground_height)?;
        positive("spawn_platform_width", self.spawn_platform_width)?;
        if self.spawn_platform_width > self.level_width() {
            return Err(ConfigError::InvalidRange {
                field: "spawn_platform_width",
                min: self.spawn_platform_width,
                max: self.level_width(),
            });
        }
        if !(self.level_min_x < 0.0 && self.level_max_x > 0.0) {
            return Err(ConfigError::Unreachable {
                field: "level_x",
                reason: "the spawn origin (x = 0) must lie inside the level".to_string(),
            });
        }
        positive("ground_segment_min_width", self.ground_segment_min_width)?;
        ordered(
            "ground_segment_width",
            self.ground_segment_min_width,
            self.ground_segment_max_width,
            false,
        )?;
        density("ground_gap_chance", self.ground_gap_chance)?;
        positive("ground_gap_min_width", self.ground_gap_min_width)?;
        ordered(
            "ground_gap_width",
            self.ground_gap_min_width,
            self.ground_gap_max_width,
            false,
        )?;

        positive("platform_min_width", self.platform_min_width)?;
        ordered(
            "platform_width",
            self.platform_min_width,
            self.platform_max_width,
            false,
        )?;
        positive("platform_height", self.platform_height)?;
        finite("min_horizontal_gap", self.min_horizontal_gap)?;
        if self.min_horizontal_gap < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "min_horizontal_gap",
                value: self.min_horizontal_gap,
            });
        }
        ordered(
            "horizontal_gap",
            self.min_horizontal_gap,
            self.max_horizontal_gap,
            false,
        )?;
        positive("min_vertical_spacing", self.min_vertical_spacing)?;
        ordered(
            "vertical_spacing",
            self.min_vertical_spacing,
            self.max_vertical_spacing,
            false,
        )?;
        if self.platforms_per_row == 0 {
            return Err(ConfigError::NonPositive {
                field: "platforms_per_row",
                value: 0.0,
            });
        }
        let max_per_row = self.max_platforms_per_row();
        if self.platforms_per_row > max_per_row {
            return Err(ConfigError::InvalidRange {
                field: "platforms_per_row",
                min: self.platforms_per_row as f32,
                max: max_per_row as f32,
            });
        }

        positive("player_jump_height", self.player_jump_height)?;
        positive("player_jump_distance", self.player_jump_distance)?;
        if self.ground_gap_max_width > MAX_GROUND_GAP.min(self.player_jump_distance) {
            return Err(ConfigError::Unreachable {
                field: "ground_gap_max_width",
                reason: format!(
                    "gaps up to {} cannot be jumped (limit {})",
                    self.ground_gap_max_width,
                    MAX_GROUND_GAP.min(self.player_jump_distance)
                ),
            });
        }
        if self.max_vertical_spacing > self.player_jump_height {
            return Err(ConfigError::Unreachable {
                field: "max_vertical_spacing",
                reason: format!(
                    "rows {} apart exceed the jump height {}",
                    self.max_vertical_spacing, self.player_jump_height
                ),
            });
        }

        density("enemy_density", self.enemy_density)?;
        density("collectible_density", self.collectible_density)?;
        Ok(())
    }
}
