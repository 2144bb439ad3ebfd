//! Day-by-day disease and drug simulation.
//!
//! A run advances organ health, viral load and symptom severity once per
//! day for `days + 1` days (day 0 through `days` inclusive), recording a
//! snapshot after every step. The only nondeterminism is Gaussian noise drawn
//! from the caller's RNG, so a seeded RNG gives a reproducible run.
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use vtwin_logic::drug::Drug;
//! use vtwin_logic::patient::Patient;
//! use vtwin_logic::simulation::run_simulation;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let timeline = run_simulation(&Patient::default(), "Influenza", &[Drug::named("Oseltamivir")], 10, &mut rng);
//! assert_eq!(timeline.records.len(), 11);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::disease::{disease_profile, DiseaseProfile};
use crate::drug::{combined_effect, Drug};
use crate::organs::{clamp_score, OrganState};
use crate::patient::Patient;

/// Standard deviation of the daily biological noise.
pub const NOISE_STD: f64 = 1.0;

/// Per-day viral growth, scaled by disease strength.
const VIRAL_GROWTH_RATE: f64 = 0.05;
/// Viral load removed per unit of drug effect.
const DRUG_SUPPRESSION: f64 = 4.5;
/// Viral load removed at full immune strength.
const IMMUNE_SUPPRESSION: f64 = 2.0;
/// Symptom share of viral load.
const SYMPTOM_VIRAL_WEIGHT: f64 = 0.85;
/// Symptom share of drug effect.
const SYMPTOM_EFFECT_WEIGHT: f64 = 0.5;
/// Symptoms before day 0, as a fraction of the initial viral load.
const INITIAL_SYMPTOM_RATIO: f64 = 0.7;

/// Build an RNG for a run: seeded when given, otherwise from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    z * NOISE_STD
}

/// Viral load and symptom severity, both in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiseaseState {
    pub viral_load: f64,
    pub symptom_severity: f64,
}

impl DiseaseState {
    pub fn initial(profile: &DiseaseProfile) -> Self {
        let viral_load = profile.initial_viral_load();
        Self {
            viral_load,
            symptom_severity: viral_load * INITIAL_SYMPTOM_RATIO,
        }
    }

    /// Advance one day. Viral load grows with disease strength and is
    /// suppressed by drug effect and immunity; symptoms are recomputed from
    /// the new viral load and the drug effect.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        drug_effect: f64,
        immune_factor: f64,
        disease_strength: f64,
        rng: &mut R,
    ) {
        let mut viral = self.viral_load;
        viral += viral * VIRAL_GROWTH_RATE * disease_strength
            - drug_effect * DRUG_SUPPRESSION
            - immune_factor * IMMUNE_SUPPRESSION;
        viral += noise(rng);
        self.viral_load = clamp_score(viral);

        // NOTE: a stronger drug effect raises same-day symptoms.
        let symptom = clamp_score(
            self.viral_load * SYMPTOM_VIRAL_WEIGHT + drug_effect * SYMPTOM_EFFECT_WEIGHT,
        );
        self.symptom_severity = clamp_score(symptom + noise(rng));
    }
}

/// Snapshot of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub day: u32,
    pub viral_load: f64,
    pub symptom_severity: f64,
    pub drug_effect_total: f64,
    pub drug_toxicity: f64,
    pub immune_strength: f64,
    pub heart: f64,
    pub liver: f64,
    pub kidney: f64,
    pub lungs: f64,
    pub avg_organ_health: f64,
}

/// Result of one run: the resolved disease and one record per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub disease: String,
    pub records: Vec<SimulationRecord>,
}

impl Timeline {
    /// Horizon of the run, i.e. the `days` argument that produced it.
    pub fn days(&self) -> u32 {
        self.records.len().saturating_sub(1) as u32
    }

    pub fn final_record(&self) -> Option<&SimulationRecord> {
        self.records.last()
    }

    pub fn peak_viral_load(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.viral_load)
            .fold(0.0, f64::max)
    }

    pub fn lowest_avg_organ_health(&self) -> Option<f64> {
        self.records
            .iter()
            .map(|r| r.avg_organ_health)
            .reduce(f64::min)
    }
}

/// Simulate `days + 1` days of `disease_name` in `patient` under `drugs`.
///
/// The disease name is resolved against the parameter table, falling back
/// to the generic profile. Input is assumed validated; nothing here fails.
pub fn run_simulation<R: Rng + ?Sized>(
    patient: &Patient,
    disease_name: &str,
    drugs: &[Drug],
    days: u32,
    rng: &mut R,
) -> Timeline {
    let profile = disease_profile(disease_name);
    let mut organs = OrganState::new(patient.immune);
    let mut disease = DiseaseState::initial(&profile);
    let mut records = Vec::with_capacity(days as usize + 1);

    for day in 0..=days {
        let effect = combined_effect(drugs, day);

        organs.apply_daily_damage(
            effect.toxicity,
            profile.organ_weights,
            disease.symptom_severity,
        );

        disease.step(
            effect.efficacy,
            organs.immune_factor(),
            profile.strength,
            rng,
        );

        records.push(SimulationRecord {
            day,
            viral_load: disease.viral_load,
            symptom_severity: disease.symptom_severity,
            drug_effect_total: effect.efficacy,
            drug_toxicity: effect.toxicity,
            immune_strength: organs.immune,
            heart: organs.heart,
            liver: organs.liver,
            kidney: organs.kidney,
            lungs: organs.lungs,
            avg_organ_health: organs.average_vital(),
        });
    }

    log::debug!(
        "Simulated {} for {} days with {} drug(s): final viral={:.2}",
        profile.name,
        days,
        drugs.len(),
        disease.viral_load
    );

    Timeline {
        disease: profile.name.to_string(),
        records,
    }
}
