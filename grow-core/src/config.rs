use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{GrowError, Result},
    growth::ColorSpan,
    types::Days,
};

/// Deepest branch recursion accepted from configuration.
///
/// Each side branch emits `2^depth - 1` segments.
pub const MAX_BRANCH_DEPTH: u32 = 12;

/// Tunable constants of the growth and geometry model.
///
/// Every field has a default matching the reference visualizer, and
/// missing keys in a YAML file fall back to those defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Age (days) at which the colour reaches the genome's end colour.
    pub color_span_days: f32,
    /// Clamp the colour fraction into `[0, 1]` instead of extrapolating.
    pub clamp_color: bool,

    /// Maximum absolute angular jitter per branch segment, in degrees.
    pub jitter_deg: f32,
    /// Angle between a parent segment and each of its two children.
    pub branch_spread_deg: f32,
    /// Length multiplier from a segment to its children.
    pub length_decay: f32,
    pub leaves_per_segment: u32,
    pub leaf_radius: f32,
    /// Bud radius is `genome.bud_density * bud_radius_scale`.
    pub bud_radius_scale: f32,

    /// Recursion depth of each side branch off the main stem.
    pub branch_depth: u32,
    /// Tilt of side branches away from vertical, in degrees.
    pub branch_tilt_deg: f32,
    /// Side branch length as a fraction of the stem still above it.
    pub side_branch_length_ratio: f32,
    /// Stem distance between side branches at `plant_density == 1`.
    pub base_spacing: f32,

    /// Hydration or nutrient level below which the plant is stressed.
    pub stress_threshold: f32,
    /// Stress added for each depleted resource.
    pub stress_penalty: f32,

    /// Upper bound of the age slider.
    pub max_age: Days,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            color_span_days: 90.0,
            clamp_color: false,
            jitter_deg: 10.0,
            branch_spread_deg: 20.0,
            length_decay: 0.7,
            leaves_per_segment: 3,
            leaf_radius: 2.0,
            bud_radius_scale: 5.0,
            branch_depth: 3,
            branch_tilt_deg: 35.0,
            side_branch_length_ratio: 0.4,
            base_spacing: 20.0,
            stress_threshold: 0.5,
            stress_penalty: 0.2,
            max_age: 90,
        }
    }
}

impl GrowthConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::parse(text, Path::new("<inline>"))
    }

    /// Reads, parses and validates a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GrowError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::parse(&text, path)?;
        log::info!("Loaded growth config from {}", path.display());
        Ok(cfg)
    }

    fn parse(text: &str, origin: &Path) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text).map_err(|source| GrowError::Yaml {
            path: origin.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects values that would make geometry degenerate or unbounded.
    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, msg: &str) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(GrowError::InvalidConfig(msg.to_string()))
            }
        }

        check(
            self.color_span_days.is_finite() && self.color_span_days > 0.0,
            "color_span_days must be positive",
        )?;
        check(
            self.jitter_deg.is_finite() && self.jitter_deg >= 0.0,
            "jitter_deg must be non-negative",
        )?;
        check(self.branch_spread_deg.is_finite(), "branch_spread_deg must be finite")?;
        check(
            self.length_decay > 0.0 && self.length_decay <= 1.0,
            "length_decay must be in (0, 1]",
        )?;
        check(
            self.leaf_radius.is_finite() && self.leaf_radius >= 0.0,
            "leaf_radius must be non-negative",
        )?;
        check(
            self.bud_radius_scale.is_finite() && self.bud_radius_scale >= 0.0,
            "bud_radius_scale must be non-negative",
        )?;
        check(
            self.branch_depth <= MAX_BRANCH_DEPTH,
            "branch_depth exceeds the supported maximum",
        )?;
        check(self.branch_tilt_deg.is_finite(), "branch_tilt_deg must be finite")?;
        check(
            self.side_branch_length_ratio.is_finite() && self.side_branch_length_ratio >= 0.0,
            "side_branch_length_ratio must be non-negative",
        )?;
        check(
            self.base_spacing.is_finite() && self.base_spacing > 0.0,
            "base_spacing must be positive",
        )?;
        check(
            (0.0..=1.0).contains(&self.stress_threshold),
            "stress_threshold must be in [0, 1]",
        )?;
        check(
            self.stress_penalty.is_finite() && self.stress_penalty >= 0.0,
            "stress_penalty must be non-negative",
        )?;
        check(self.max_age > 0, "max_age must be positive")
    }

    pub fn color_span(&self) -> ColorSpan {
        ColorSpan {
            days: self.color_span_days,
            clamp: self.clamp_color,
        }
    }
}
