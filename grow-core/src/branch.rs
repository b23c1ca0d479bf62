//! Recursive binary branch geometry, produced lazily from a work-list.
//!
//! A branch of depth `N` is a segment followed by two child branches of
//! depth `N - 1`, each rotated by the configured spread and shortened by
//! the configured decay. Depth 0 draws nothing; depth 1 segments carry a
//! bud at their tip.
//!
//! Primitives come out in pre-order:
//! 1. the segment itself,
//! 2. its evenly spaced leaf markers,
//! 3. the bud, for depth 1 only,
//! 4. the whole first child subtree (rotated clockwise),
//! 5. the whole second child subtree (rotated counter-clockwise).
//!
//! That order is also the paint order, so deeper and later branches are
//! layered over earlier ones.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use crate::{
    config::GrowthConfig,
    draw::{MarkerKind, Primitive},
    genome::Genome,
    types::Rgb,
};

/// Starting state of one branch (or sub-branch) in the work-list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchSeed {
    pub origin: Vec2,
    /// Direction in degrees, counter-clockwise from +x.
    pub angle_deg: f32,
    pub depth: u32,
    pub length: f32,
}

/// Colours used for one branch tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BranchStyle {
    /// Segment and leaf colour.
    pub color: Rgb,
    pub bud_color: Rgb,
}

/// Lazy, single-pass producer of branch primitives.
///
/// Random jitter is drawn only when a branch is expanded, so pulling the
/// iterator partially consumes only part of the random stream. Once
/// exhausted the iterator cannot be restarted; build a new one with
/// [`generate_branch`].
pub struct BranchIter<'a, R: Rng + ?Sized> {
    stack: Vec<BranchSeed>,
    pending: VecDeque<Primitive>,
    genome: &'a Genome,
    style: BranchStyle,
    cfg: &'a GrowthConfig,
    rng: &'a mut R,
}

/// Starts producing the primitives of the branch described by `seed`.
///
/// ### Parameters
/// - `seed` - Origin, direction, recursion depth and length of the root segment.
/// - `genome` - Supplies `bud_density`, which sizes the buds.
/// - `style` - Segment, leaf and bud colours.
/// - `cfg` - Jitter, spread, decay and marker sizes.
/// - `rng` - Uniform source for the per-segment angular jitter.
///
/// ### Returns
/// A [`BranchIter`] yielding `2^depth - 1` segments (plus markers).
pub fn generate_branch<'a, R: Rng + ?Sized>(
    seed: BranchSeed,
    genome: &'a Genome,
    style: BranchStyle,
    cfg: &'a GrowthConfig,
    rng: &'a mut R,
) -> BranchIter<'a, R> {
    let mut stack = Vec::with_capacity(seed.depth as usize + 1);
    stack.push(seed);

    BranchIter {
        stack,
        pending: VecDeque::with_capacity(cfg.leaves_per_segment as usize + 2),
        genome,
        style,
        cfg,
        rng,
    }
}

impl<R: Rng + ?Sized> BranchIter<'_, R> {
    /// Emits one segment with its markers and schedules its two children.
    fn expand(&mut self, seed: BranchSeed) {
        if seed.depth == 0 {
            return;
        }

        // Uniform in [-jitter, jitter).
        let jitter = (self.rng.random::<f32>() * 2.0 - 1.0) * self.cfg.jitter_deg;
        let angle = seed.angle_deg + jitter;
        let end = seed.origin + Vec2::from_angle(angle.to_radians()) * seed.length;

        self.pending.push_back(Primitive::Segment {
            from: seed.origin,
            to: end,
            width: seed.depth as f32,
            color: self.style.color,
        });

        let leaves = self.cfg.leaves_per_segment;
        let leaf_radii = Vec2::new(self.cfg.leaf_radius * 1.5, self.cfg.leaf_radius);
        for i in 1..=leaves {
            let t = i as f32 / (leaves + 1) as f32;
            self.pending.push_back(Primitive::Ellipse {
                center: seed.origin.lerp(end, t),
                radii: leaf_radii,
                color: self.style.color,
                kind: MarkerKind::Leaf,
            });
        }

        if seed.depth == 1 {
            let r = self.genome.bud_density * self.cfg.bud_radius_scale;
            self.pending.push_back(Primitive::Ellipse {
                center: end,
                radii: Vec2::splat(r),
                color: self.style.bud_color,
                kind: MarkerKind::Bud,
            });
        }

        let length = seed.length * self.cfg.length_decay;
        let child = |angle_deg| BranchSeed {
            origin: end,
            angle_deg,
            depth: seed.depth - 1,
            length,
        };
        // Second child goes in first so the first child is expanded next.
        let spread = self.cfg.branch_spread_deg;
        self.stack.push(child(angle + spread));
        self.stack.push(child(angle - spread));
    }
}

impl<R: Rng + ?Sized> Iterator for BranchIter<'_, R> {
    type Item = Primitive;

    fn next(&mut self) -> Option<Primitive> {
        loop {
            if let Some(p) = self.pending.pop_front() {
                return Some(p);
            }
            let seed = self.stack.pop()?;
            self.expand(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const STYLE: BranchStyle = BranchStyle {
        color: Rgb::GREEN,
        bud_color: Rgb::WHITE,
    };

    fn still_config() -> GrowthConfig {
        GrowthConfig {
            jitter_deg: 0.0,
            ..GrowthConfig::default()
        }
    }

    fn seed(depth: u32) -> BranchSeed {
        BranchSeed {
            origin: Vec2::ZERO,
            angle_deg: 90.0,
            depth,
            length: 40.0,
        }
    }

    fn collect(seed: BranchSeed, cfg: &GrowthConfig, rng_seed: u64) -> Vec<Primitive> {
        let genome = Genome::default();
        let mut rng = StdRng::seed_from_u64(rng_seed);
        generate_branch(seed, &genome, STYLE, cfg, &mut rng).collect()
    }

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-3, "expected {b:?}, got {a:?}");
    }

    #[test]
    fn depth_zero_emits_nothing() {
        let cfg = GrowthConfig::default();
        for rng_seed in 0..8 {
            assert!(collect(seed(0), &cfg, rng_seed).is_empty());
        }
    }

    #[test]
    fn depth_n_emits_full_binary_segment_count() {
        let cfg = still_config();
        for depth in 1..=8 {
            let prims = collect(seed(depth), &cfg, 3);
            let segments = prims.iter().filter(|p| p.is_segment()).count();
            assert_eq!(segments, (1 << depth) - 1, "depth {depth}");
        }
    }

    #[test]
    fn markers_follow_segment_counts() {
        let cfg = still_config();
        let prims = collect(seed(4), &cfg, 3);

        let segments = prims.iter().filter(|p| p.is_segment()).count();
        let leaves = prims.iter().filter(|p| p.is_marker(MarkerKind::Leaf)).count();
        let buds = prims.iter().filter(|p| p.is_marker(MarkerKind::Bud)).count();

        assert_eq!(leaves, segments * cfg.leaves_per_segment as usize);
        // One bud per depth-1 segment: the leaves of the binary tree.
        assert_eq!(buds, 8);
    }

    #[test]
    fn emission_is_pre_order() {
        let cfg = still_config();
        let prims = collect(seed(2), &cfg, 0);

        let kinds: Vec<&str> = prims
            .iter()
            .map(|p| match p {
                Primitive::Segment { .. } => "S",
                Primitive::Ellipse {
                    kind: MarkerKind::Leaf,
                    ..
                } => "L",
                Primitive::Ellipse {
                    kind: MarkerKind::Bud,
                    ..
                } => "B",
                Primitive::Label { .. } => "T",
            })
            .collect();

        assert_eq!(
            kinds,
            ["S", "L", "L", "L", "S", "L", "L", "L", "B", "S", "L", "L", "L", "B"]
        );

        // Root goes straight up; first child is rotated clockwise by the spread.
        let Primitive::Segment { to: root_end, .. } = prims[0] else {
            panic!("first primitive must be the root segment");
        };
        assert_close(root_end, Vec2::new(0.0, 40.0));

        let Primitive::Segment { from, to, .. } = prims[4] else {
            panic!("fifth primitive must be the first child segment");
        };
        assert_close(from, root_end);
        let expected = root_end + Vec2::from_angle(70f32.to_radians()) * 28.0;
        assert_close(to, expected);

        let Primitive::Segment { to, .. } = prims[9] else {
            panic!("tenth primitive must be the second child segment");
        };
        let expected = root_end + Vec2::from_angle(110f32.to_radians()) * 28.0;
        assert_close(to, expected);
    }

    #[test]
    fn leaves_are_evenly_spaced_along_segment() {
        let cfg = still_config();
        let prims = collect(seed(1), &cfg, 0);

        let centers: Vec<Vec2> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Ellipse {
                    center,
                    kind: MarkerKind::Leaf,
                    ..
                } => Some(*center),
                _ => None,
            })
            .collect();

        assert_eq!(centers.len(), 3);
        assert_close(centers[0], Vec2::new(0.0, 10.0));
        assert_close(centers[1], Vec2::new(0.0, 20.0));
        assert_close(centers[2], Vec2::new(0.0, 30.0));
    }

    #[test]
    fn bud_radius_scales_with_bud_density() {
        let cfg = still_config();
        let mut genome = Genome::default();
        genome.bud_density = 1.2;
        let mut rng = StdRng::seed_from_u64(0);

        let bud = generate_branch(seed(1), &genome, STYLE, &cfg, &mut rng)
            .find(|p| p.is_marker(MarkerKind::Bud))
            .expect("depth 1 branch must carry a bud");

        let Primitive::Ellipse { center, radii, color, .. } = bud else {
            unreachable!();
        };
        assert_close(center, Vec2::new(0.0, 40.0));
        assert_close(radii, Vec2::splat(6.0));
        assert_eq!(color, Rgb::WHITE);
    }

    #[test]
    fn same_seed_reproduces_geometry() {
        let cfg = GrowthConfig::default();
        assert_eq!(collect(seed(5), &cfg, 42), collect(seed(5), &cfg, 42));
    }

    #[test]
    fn jitter_stays_within_bound() {
        let cfg = GrowthConfig::default();
        let prims = collect(seed(1), &cfg, 9);

        let Primitive::Segment { from, to, .. } = prims[0] else {
            panic!("expected a segment");
        };
        let angle = (to - from).to_angle().to_degrees();
        assert!(
            (angle - 90.0).abs() <= cfg.jitter_deg + 1e-3,
            "angle {angle} outside jitter bound"
        );
    }

    #[test]
    fn deep_branches_do_not_recurse() {
        let cfg = still_config();
        let genome = Genome::default();
        let mut rng = StdRng::seed_from_u64(0);

        let segments = generate_branch(seed(18), &genome, STYLE, &cfg, &mut rng)
            .filter(Primitive::is_segment)
            .count();
        assert_eq!(segments, (1 << 18) - 1);
    }
}
