use rand::Rng;

use crate::{config::GrowthConfig, genome::Genome, growth, types::Days};

/// One simulated specimen.
///
/// The age is set from outside (typically a day slider); the plant never
/// ages by itself. `is_hermie` only ever moves from `false` to `true`.
#[derive(Clone, Debug, PartialEq)]
pub struct Plant {
    pub genome: Genome,
    pub age: Days,
    pub hydration: f32,
    pub nutrients: f32,
    pub health: f32,
    pub is_clone: bool,
    pub is_female: bool,
    pub is_hermie: bool,
}

impl Default for Plant {
    fn default() -> Self {
        Self::new(Genome::default())
    }
}

impl Plant {
    /// A fresh seedling: age 0, fully watered and fed, female.
    pub fn new(genome: Genome) -> Self {
        Self {
            genome,
            age: 0,
            hydration: 1.0,
            nutrients: 1.0,
            health: 1.0,
            is_clone: false,
            is_female: true,
            is_hermie: false,
        }
    }

    pub fn water(&mut self) {
        self.hydration = 1.0;
    }

    pub fn feed(&mut self) {
        self.nutrients = 1.0;
    }

    pub fn stem_height(&self) -> f32 {
        growth::stem_height(&self.genome, self.age)
    }

    /// Additive stress from depleted resources, one penalty per resource
    /// below the threshold.
    pub fn growth_stress(&self, cfg: &GrowthConfig) -> f32 {
        let mut stress = 0.0;
        if self.hydration < cfg.stress_threshold {
            stress += cfg.stress_penalty;
        }
        if self.nutrients < cfg.stress_threshold {
            stress += cfg.stress_penalty;
        }
        stress
    }

    /// Moves the plant to `new_age` and runs one hermaphrodism trial.
    ///
    /// Exactly one uniform sample is drawn per call. The plant turns hermie
    /// when the sample falls below `hermie_chance * stress`, so an
    /// unstressed plant never flips. Returns `true` only on the call that
    /// performed the flip.
    pub fn advance_day<R: Rng + ?Sized>(
        &mut self,
        new_age: Days,
        cfg: &GrowthConfig,
        rng: &mut R,
    ) -> bool {
        self.age = new_age;

        let stress = self.growth_stress(cfg);
        let sample: f32 = rng.random();
        if self.is_hermie || sample >= self.genome.hermie_chance * stress {
            return false;
        }

        self.is_hermie = true;
        log::info!(
            "{} turned hermie on day {} (stress {:.1})",
            self.genome.strain,
            self.age,
            stress
        );
        true
    }

    /// Silver thiosulfate treatment. One-way.
    pub fn apply_sts(&mut self) {
        if !self.genome.was_sts_converted {
            self.genome.was_sts_converted = true;
            log::info!("Applied STS to {}", self.genome.strain);
        }
    }

    /// Tries to root a cutting, succeeding with the genome's clone success rate.
    ///
    /// A rooted cutting shares the parent's genome and starts at age 0.
    pub fn take_clone<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Plant> {
        let sample: f32 = rng.random();
        if sample >= self.genome.clone_success_rate {
            log::info!("Cutting of {} failed to root", self.genome.strain);
            return None;
        }

        let mut clone = Plant::new(self.genome.clone());
        clone.is_clone = true;
        clone.is_female = self.is_female;
        log::info!("Cloned {}", self.genome.strain);
        Some(clone)
    }

    /// Pollinates `mother` with `father` and grows one seed.
    ///
    /// Pollen from an STS-converted plant yields feminized seed; otherwise
    /// the seed's sex is a fair coin.
    pub fn breed<R: Rng + ?Sized>(mother: &Plant, father: &Plant, rng: &mut R) -> Plant {
        let genome = Genome::cross(&mother.genome, &father.genome, rng);
        let mut seed = Plant::new(genome);
        seed.is_female = father.genome.was_sts_converted || rng.random_bool(0.5);
        log::info!(
            "Bred {} ({})",
            seed.genome.strain,
            if seed.is_female { "female" } else { "male" }
        );
        seed
    }
}
