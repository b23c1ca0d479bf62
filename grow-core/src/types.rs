use serde::{Deserialize, Serialize};

/// Number of simulated days.
///
/// Ages are driven from outside (a slider, a loaded record); the model
/// never advances them on its own.
pub type Days = u32;

/// An RGB colour with `f32` channels on a `0..=255` scale.
///
/// Channels are deliberately not clamped: colour interpolation past the
/// reference span extrapolates beyond the endpoints, and callers decide
/// whether to keep that. Use [`Rgb::to_rgb8`] when handing the colour to a
/// renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const GREEN: Rgb = Rgb::new(0.0, 255.0, 0.0);
    pub const DARK_GREEN: Rgb = Rgb::new(0.0, 128.0, 0.0);
    pub const CYAN: Rgb = Rgb::new(0.0, 255.0, 255.0);
    pub const YELLOW: Rgb = Rgb::new(255.0, 255.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear interpolation from `a` (at `t = 0`) to `b` (at `t = 1`).
    ///
    /// `t` is used as given; values outside `[0, 1]` extrapolate.
    pub fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
        Rgb {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
        }
    }

    /// Rounds and saturates every channel into `u8`.
    pub fn to_rgb8(self) -> [u8; 3] {
        let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}
