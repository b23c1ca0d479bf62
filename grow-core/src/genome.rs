use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::Rgb;

/// Heritable trait bundle of a single plant.
///
/// A genome is owned by its plant and only changes through explicit
/// operations such as STS conversion or breeding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genome {
    pub strain: String,
    /// Colour of a freshly sprouted plant.
    pub start_color: Rgb,
    /// Colour reached at the end of the colour span.
    pub end_color: Rgb,

    pub bud_density: f32,
    pub root_priority: f32,
    /// Stem growth per day.
    pub tip_speed: f32,
    pub recovery_rate: f32,

    pub clone_success_rate: f32,
    pub nutrient_use_rate: f32,
    pub water_use_rate: f32,

    pub fox_tailing_chance: f32,
    /// Per-day hermaphrodism probability at full stress weight.
    pub hermie_chance: f32,
    pub cold_shock_threshold: f32,

    pub seed_yield: u32,
    /// 0 is pure indica, 1 is pure sativa.
    pub sativa_ratio: f32,
    /// Higher density packs side branches closer together.
    pub plant_density: f32,
    pub max_height: f32,

    pub twin_node: bool,
    pub triploid: bool,
    pub was_sts_converted: bool,
}

impl Default for Genome {
    fn default() -> Self {
        Self {
            strain: "Unnamed".to_string(),
            start_color: Rgb::GREEN,
            end_color: Rgb::DARK_GREEN,
            bud_density: 0.8,
            root_priority: 0.5,
            tip_speed: 1.0,
            recovery_rate: 0.5,
            clone_success_rate: 0.85,
            nutrient_use_rate: 0.5,
            water_use_rate: 0.5,
            fox_tailing_chance: 0.05,
            hermie_chance: 0.1,
            cold_shock_threshold: 10.0,
            seed_yield: 50,
            sativa_ratio: 0.5,
            plant_density: 1.0,
            max_height: 300.0,
            twin_node: false,
            triploid: false,
            was_sts_converted: false,
        }
    }
}

fn pick<T, R: Rng + ?Sized>(rng: &mut R, a: T, b: T) -> T {
    if rng.random_bool(0.5) { a } else { b }
}

impl Genome {
    pub fn with_strain(strain: impl Into<String>) -> Self {
        Self {
            strain: strain.into(),
            ..Self::default()
        }
    }

    /// Uniform crossover of two parent genomes.
    ///
    /// Every trait is inherited from one parent or the other with equal
    /// probability; colours are inherited as whole pairs so a child never
    /// mixes one parent's start colour with the other's end colour. The
    /// child's strain is named `"<a> x <b>"`. STS conversion is a treatment,
    /// not a trait, so the child starts unconverted.
    pub fn cross<R: Rng + ?Sized>(a: &Genome, b: &Genome, rng: &mut R) -> Genome {
        let (start_color, end_color) =
            pick(rng, (a.start_color, a.end_color), (b.start_color, b.end_color));

        Genome {
            strain: format!("{} x {}", a.strain, b.strain),
            start_color,
            end_color,
            bud_density: pick(rng, a.bud_density, b.bud_density),
            root_priority: pick(rng, a.root_priority, b.root_priority),
            tip_speed: pick(rng, a.tip_speed, b.tip_speed),
            recovery_rate: pick(rng, a.recovery_rate, b.recovery_rate),
            clone_success_rate: pick(rng, a.clone_success_rate, b.clone_success_rate),
            nutrient_use_rate: pick(rng, a.nutrient_use_rate, b.nutrient_use_rate),
            water_use_rate: pick(rng, a.water_use_rate, b.water_use_rate),
            fox_tailing_chance: pick(rng, a.fox_tailing_chance, b.fox_tailing_chance),
            hermie_chance: pick(rng, a.hermie_chance, b.hermie_chance),
            cold_shock_threshold: pick(rng, a.cold_shock_threshold, b.cold_shock_threshold),
            seed_yield: pick(rng, a.seed_yield, b.seed_yield),
            sativa_ratio: pick(rng, a.sativa_ratio, b.sativa_ratio),
            plant_density: pick(rng, a.plant_density, b.plant_density),
            max_height: pick(rng, a.max_height, b.max_height),
            twin_node: pick(rng, a.twin_node, b.twin_node),
            triploid: pick(rng, a.triploid, b.triploid),
            was_sts_converted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn default_matches_reference_visualizer() {
        let g = Genome::default();
        assert_eq!(g.strain, "Unnamed");
        assert_eq!(g.start_color, Rgb::GREEN);
        assert_eq!(g.end_color, Rgb::DARK_GREEN);
        assert_eq!(g.bud_density, 0.8);
        assert_eq!(g.clone_success_rate, 0.85);
        assert_eq!(g.tip_speed, 1.0);
        assert_eq!(g.seed_yield, 50);
        assert!(!g.twin_node && !g.triploid && !g.was_sts_converted);
    }

    #[test]
    fn cross_takes_every_trait_from_a_parent() {
        let mut a = Genome::with_strain("AK-47");
        a.tip_speed = 2.0;
        a.max_height = 150.0;
        a.twin_node = true;
        a.start_color = Rgb::YELLOW;

        let mut b = Genome::with_strain("Haze");
        b.tip_speed = 0.5;
        b.max_height = 400.0;
        b.was_sts_converted = true;

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let child = Genome::cross(&a, &b, &mut rng);
            assert_eq!(child.strain, "AK-47 x Haze");
            assert!(child.tip_speed == 2.0 || child.tip_speed == 0.5);
            assert!(child.max_height == 150.0 || child.max_height == 400.0);
            assert!(
                (child.start_color, child.end_color) == (a.start_color, a.end_color)
                    || (child.start_color, child.end_color) == (b.start_color, b.end_color)
            );
            assert!(!child.was_sts_converted);
        }
    }

    #[test]
    fn cross_of_identical_parents_is_identity_except_name() {
        let a = Genome::with_strain("Skunk");
        let mut rng = StdRng::seed_from_u64(1);
        let child = Genome::cross(&a, &a, &mut rng);

        let mut expected = a.clone();
        expected.strain = "Skunk x Skunk".to_string();
        assert_eq!(child, expected);
    }
}
