//! Turns a [`Plant`] into an ordered stream of drawing primitives.

use glam::Vec2;
use rand::Rng;

use crate::{
    branch::{BranchSeed, BranchStyle, generate_branch},
    config::GrowthConfig,
    draw::{DrawSink, Primitive},
    growth,
    plant::Plant,
    types::Rgb,
};

const BUD_COLOR: Rgb = Rgb::new(235.0, 235.0, 210.0);
const HERMIE_BUD_COLOR: Rgb = Rgb::new(240.0, 220.0, 60.0);
const STEM_WIDTH: f32 = 4.0;
const LABEL_GAP: f32 = 12.0;

/// Upper bound on side branches along one stem.
pub const MAX_SIDE_BRANCHES: usize = 4096;

/// Text shown under a plant, e.g. `"AK-47 (30d) [Seed]"`.
pub fn plant_label(plant: &Plant) -> String {
    let origin = if plant.is_clone { "Clone" } else { "Seed" };
    let mut label = format!("{} ({}d) [{}]", plant.genome.strain, plant.age, origin);
    if plant.is_hermie {
        label.push_str(" [Hermie]");
    }
    label
}

/// STS conversion takes precedence over clone status.
fn label_color(plant: &Plant) -> Rgb {
    if plant.genome.was_sts_converted {
        Rgb::YELLOW
    } else if plant.is_clone {
        Rgb::CYAN
    } else {
        plant.genome.start_color
    }
}

/// Draws `plant` standing at `base` into `sink`.
///
/// Paint order is: main stem, side branches from the bottom up (each in
/// branch pre-order), then the label below the base.
///
/// ### Parameters
/// - `plant` - The specimen; its age drives stem height and colour.
/// - `base` - World position of the stem foot.
/// - `cfg` - Geometry constants and colour span.
/// - `rng` - Jitter source, threaded through every side branch in order.
/// - `sink` - Receives the primitives.
pub fn render_plant<R: Rng + ?Sized, S: DrawSink + ?Sized>(
    plant: &Plant,
    base: Vec2,
    cfg: &GrowthConfig,
    rng: &mut R,
    sink: &mut S,
) {
    let genome = &plant.genome;
    let height = plant.stem_height();
    let color = growth::interpolate_color(genome, plant.age, cfg.color_span());
    let top = base + Vec2::new(0.0, height);

    if height > 0.0 {
        sink.draw(Primitive::Segment {
            from: base,
            to: top,
            width: STEM_WIDTH,
            color,
        });
    }

    let style = BranchStyle {
        color,
        bud_color: if plant.is_hermie {
            HERMIE_BUD_COLOR
        } else {
            BUD_COLOR
        },
    };

    match growth::branch_spacing(genome, cfg.base_spacing) {
        Some(spacing) => {
            // Attachment points y = k * spacing for k = 1..=count, all below the tip.
            let mut count = ((height / spacing).ceil() as usize).saturating_sub(1);
            if count > MAX_SIDE_BRANCHES {
                log::warn!(
                    "{} would grow {} side branches, capping at {}",
                    genome.strain,
                    count,
                    MAX_SIDE_BRANCHES
                );
                count = MAX_SIDE_BRANCHES;
            }
            for index in 0..count {
                let y = spacing * (index + 1) as f32;
                let seed = BranchSeed {
                    origin: base + Vec2::new(0.0, y),
                    angle_deg: growth::side_branch_angle(index, cfg.branch_tilt_deg),
                    depth: cfg.branch_depth,
                    length: (height - y).max(0.0) * cfg.side_branch_length_ratio,
                };
                for prim in generate_branch(seed, genome, style, cfg, rng) {
                    sink.draw(prim);
                }
            }
            log::debug!(
                "Rendered {} at day {}: height {:.1}, {} side branches",
                genome.strain,
                plant.age,
                height,
                count
            );
        }
        None => log::warn!(
            "{} has unusable plant_density {}, skipping side branches",
            genome.strain,
            genome.plant_density
        ),
    }

    sink.draw(Primitive::Label {
        pos: base - Vec2::new(0.0, LABEL_GAP),
        text: plant_label(plant),
        color: label_color(plant),
    });
}

/// Collects [`render_plant`] output into a vector.
pub fn plant_primitives<R: Rng + ?Sized>(
    plant: &Plant,
    base: Vec2,
    cfg: &GrowthConfig,
    rng: &mut R,
) -> Vec<Primitive> {
    let mut out = Vec::new();
    render_plant(plant, base, cfg, rng, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::MarkerKind, genome::Genome};
    use rand::{SeedableRng, rngs::StdRng};

    fn still_config() -> GrowthConfig {
        GrowthConfig {
            jitter_deg: 0.0,
            ..GrowthConfig::default()
        }
    }

    fn plant_at(age: u32) -> Plant {
        let mut p = Plant::new(Genome::with_strain("AK-47"));
        p.age = age;
        p
    }

    #[test]
    fn seedling_draws_only_its_label() {
        let prims = plant_primitives(
            &plant_at(0),
            Vec2::ZERO,
            &GrowthConfig::default(),
            &mut StdRng::seed_from_u64(0),
        );

        assert_eq!(prims.len(), 1);
        assert_eq!(
            prims[0],
            Primitive::Label {
                pos: Vec2::new(0.0, -LABEL_GAP),
                text: "AK-47 (0d) [Seed]".to_string(),
                color: Rgb::GREEN,
            }
        );
    }

    #[test]
    fn stem_comes_first_and_label_last() {
        let cfg = still_config();
        let prims = plant_primitives(&plant_at(30), Vec2::ZERO, &cfg, &mut StdRng::seed_from_u64(0));

        assert_eq!(
            prims[0],
            Primitive::Segment {
                from: Vec2::ZERO,
                to: Vec2::new(0.0, 30.0),
                width: STEM_WIDTH,
                color: growth::interpolate_color(&Genome::default(), 30, cfg.color_span()),
            }
        );
        assert!(matches!(prims.last(), Some(Primitive::Label { .. })));
    }

    #[test]
    fn side_branch_count_follows_spacing() {
        let cfg = still_config();
        let per_branch = (1 << cfg.branch_depth) - 1;

        // Height 70, spacing 20: branches at y = 20, 40, 60.
        let prims = plant_primitives(&plant_at(70), Vec2::ZERO, &cfg, &mut StdRng::seed_from_u64(0));
        let segments = prims.iter().filter(|p| p.is_segment()).count();
        assert_eq!(segments, 1 + 3 * per_branch);

        // Doubling density halves spacing: y = 10, 20, ..., 60.
        let mut dense = plant_at(70);
        dense.genome.plant_density = 2.0;
        let prims = plant_primitives(&dense, Vec2::ZERO, &cfg, &mut StdRng::seed_from_u64(0));
        let segments = prims.iter().filter(|p| p.is_segment()).count();
        assert_eq!(segments, 1 + 6 * per_branch);
    }

    #[test]
    fn side_branches_alternate_sides() {
        let cfg = still_config();
        let prims = plant_primitives(&plant_at(70), Vec2::ZERO, &cfg, &mut StdRng::seed_from_u64(0));

        // Roots of each side branch start on the stem (x == 0) above the base.
        let roots: Vec<(Vec2, Vec2)> = prims
            .iter()
            .skip(1)
            .filter_map(|p| match p {
                Primitive::Segment { from, to, .. } if from.x.abs() < 1e-4 => Some((*from, *to)),
                _ => None,
            })
            .collect();

        assert_eq!(roots.len(), 3);
        assert!(roots[0].1.x > 0.0, "first side branch leans right");
        assert!(roots[1].1.x < 0.0, "second side branch leans left");
        assert!(roots[2].1.x > 0.0, "third side branch leans right");
    }

    #[test]
    fn zero_density_skips_side_branches() {
        let mut p = plant_at(70);
        p.genome.plant_density = 0.0;
        let prims = plant_primitives(&p, Vec2::ZERO, &still_config(), &mut StdRng::seed_from_u64(0));

        assert_eq!(prims.len(), 2);
        assert!(prims[0].is_segment());
    }

    #[test]
    fn hermie_buds_change_colour() {
        let cfg = still_config();
        let mut p = plant_at(50);
        p.is_hermie = true;

        let prims = plant_primitives(&p, Vec2::ZERO, &cfg, &mut StdRng::seed_from_u64(0));
        let bud_colors: Vec<Rgb> = prims
            .iter()
            .filter_map(|prim| match prim {
                Primitive::Ellipse {
                    color,
                    kind: MarkerKind::Bud,
                    ..
                } => Some(*color),
                _ => None,
            })
            .collect();

        assert!(!bud_colors.is_empty());
        assert!(bud_colors.iter().all(|&c| c == HERMIE_BUD_COLOR));
    }

    #[test]
    fn label_reflects_state_flags() {
        let mut p = plant_at(12);
        p.is_clone = true;
        p.is_hermie = true;
        assert_eq!(plant_label(&p), "AK-47 (12d) [Clone] [Hermie]");
        assert_eq!(label_color(&p), Rgb::CYAN);

        p.is_clone = false;
        p.genome.was_sts_converted = true;
        assert_eq!(label_color(&p), Rgb::YELLOW);
    }

    #[test]
    fn clone_of_sts_mother_is_labelled_yellow() {
        let mut mother = plant_at(40);
        mother.apply_sts();
        mother.genome.clone_success_rate = 1.0;

        let cutting = mother
            .take_clone(&mut StdRng::seed_from_u64(0))
            .expect("certain clone must root");

        assert!(cutting.is_clone && cutting.genome.was_sts_converted);
        assert_eq!(label_color(&cutting), Rgb::YELLOW);
    }

    #[test]
    fn stem_on_exact_spacing_multiple_gets_no_branch_at_tip() {
        let cfg = still_config();
        let per_branch = (1 << cfg.branch_depth) - 1;

        // Height 60, spacing 20: branches at y = 20 and 40 only.
        let prims = plant_primitives(&plant_at(60), Vec2::ZERO, &cfg, &mut StdRng::seed_from_u64(0));
        let segments = prims.iter().filter(|p| p.is_segment()).count();
        assert_eq!(segments, 1 + 2 * per_branch);
    }

    #[test]
    fn very_tall_stem_terminates_with_capped_branches() {
        let cfg = GrowthConfig {
            branch_depth: 1,
            ..still_config()
        };
        let mut p = plant_at(30);
        p.genome.tip_speed = 1.0e6;
        p.genome.max_height = 3.0e7;
        p.genome.plant_density = 20.0;

        let prims = plant_primitives(&p, Vec2::ZERO, &cfg, &mut StdRng::seed_from_u64(0));
        let segments = prims.iter().filter(|p| p.is_segment()).count();
        assert_eq!(segments, 1 + MAX_SIDE_BRANCHES);
    }
}
