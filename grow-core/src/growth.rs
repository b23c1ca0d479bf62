//! Closed-form growth curves: stem height, colour over age, and the
//! layout rules for side branches along the main stem.

use crate::{
    genome::Genome,
    types::{Days, Rgb},
};

/// How colour progresses with age.
///
/// `days` is the age at which the end colour is reached. With `clamp`
/// unset, older plants keep moving past the end colour (the reference
/// visualizer's behaviour).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorSpan {
    pub days: f32,
    pub clamp: bool,
}

impl Default for ColorSpan {
    fn default() -> Self {
        Self {
            days: 90.0,
            clamp: false,
        }
    }
}

/// Stem height after `age` days: `min(age * tip_speed, max_height)`.
///
/// The result never drops below zero, even for a negative `tip_speed`
/// or `max_height`.
pub fn stem_height(genome: &Genome, age: Days) -> f32 {
    (age as f32 * genome.tip_speed)
        .min(genome.max_height)
        .max(0.0)
}

/// Colour of the plant at `age`, interpolated from start to end colour.
pub fn interpolate_color(genome: &Genome, age: Days, span: ColorSpan) -> Rgb {
    let mut t = age as f32 / span.days;
    if span.clamp {
        t = t.clamp(0.0, 1.0);
    }
    // Pin the endpoints so exact ages reproduce the genome colours bit for bit.
    if t == 0.0 {
        genome.start_color
    } else if t == 1.0 {
        genome.end_color
    } else {
        Rgb::lerp(genome.start_color, genome.end_color, t)
    }
}

/// Stem distance between consecutive side branches.
///
/// Returns `None` when the genome's density yields no usable spacing
/// (zero, negative or non-finite density).
pub fn branch_spacing(genome: &Genome, base_spacing: f32) -> Option<f32> {
    let spacing = (base_spacing / genome.plant_density).round();
    if spacing.is_finite() && genome.plant_density > 0.0 {
        Some(spacing.max(1.0))
    } else {
        None
    }
}

/// Launch angle (degrees, counter-clockwise from +x) of the side branch
/// at `index` along the stem.
///
/// Even indices lean right, odd indices mirror them to the left.
pub fn side_branch_angle(index: usize, tilt_deg: f32) -> f32 {
    if index % 2 == 0 {
        90.0 - tilt_deg
    } else {
        90.0 + tilt_deg
    }
}
