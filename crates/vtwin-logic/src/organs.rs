//! Organ health state and the per-day damage rules.
//!
//! Every organ is a health score in [0, 100] where 100 is fully healthy.
//! Drug toxicity and disease-specific stress are applied once per simulated
//! day, then every value is clamped back into range.

use serde::{Deserialize, Serialize};

/// Upper bound of every organ, viral-load and symptom score.
pub const MAX_SCORE: f64 = 100.0;

/// Toxicity multipliers. Liver is the most sensitive.
const LIVER_TOXICITY: f64 = 1.2;
const KIDNEY_TOXICITY: f64 = 1.0;
const HEART_TOXICITY: f64 = 0.5;

/// Scale applied to `symptom * weight` when a disease stresses an organ.
const DISEASE_STRESS_SCALE: f64 = 0.1;

/// Clamp a score into [0, 100].
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, MAX_SCORE)
}

/// Organs tracked by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Organ {
    Heart,
    Liver,
    Kidney,
    Lungs,
    Immune,
}

impl Organ {
    /// The four organs averaged into `avg_organ_health`.
    pub const VITAL: [Organ; 4] = [Organ::Heart, Organ::Liver, Organ::Kidney, Organ::Lungs];

    pub fn name(self) -> &'static str {
        match self {
            Organ::Heart => "heart",
            Organ::Liver => "liver",
            Organ::Kidney => "kidney",
            Organ::Lungs => "lungs",
            Organ::Immune => "immune",
        }
    }
}

/// Health of each organ during one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrganState {
    pub heart: f64,
    pub liver: f64,
    pub kidney: f64,
    pub lungs: f64,
    /// Copy of the patient's baseline immune strength. Never damaged.
    pub immune: f64,
}

impl OrganState {
    /// Fresh organs: vital organs at 100, immune at the patient's baseline.
    pub fn new(baseline_immune: f64) -> Self {
        Self {
            heart: MAX_SCORE,
            liver: MAX_SCORE,
            kidney: MAX_SCORE,
            lungs: MAX_SCORE,
            immune: clamp_score(baseline_immune),
        }
    }

    pub fn get(&self, organ: Organ) -> f64 {
        match organ {
            Organ::Heart => self.heart,
            Organ::Liver => self.liver,
            Organ::Kidney => self.kidney,
            Organ::Lungs => self.lungs,
            Organ::Immune => self.immune,
        }
    }

    pub fn get_mut(&mut self, organ: Organ) -> &mut f64 {
        match organ {
            Organ::Heart => &mut self.heart,
            Organ::Liver => &mut self.liver,
            Organ::Kidney => &mut self.kidney,
            Organ::Lungs => &mut self.lungs,
            Organ::Immune => &mut self.immune,
        }
    }

    /// Apply one day of damage: drug toxicity first, then disease stress
    /// proportional to the current symptom level. Clamps afterwards.
    pub fn apply_daily_damage(
        &mut self,
        drug_toxicity: f64,
        organ_weights: &[(Organ, f64)],
        symptom_severity: f64,
    ) {
        self.liver -= drug_toxicity * LIVER_TOXICITY;
        self.kidney -= drug_toxicity * KIDNEY_TOXICITY;
        self.heart -= drug_toxicity * HEART_TOXICITY;

        for &(organ, weight) in organ_weights {
            *self.get_mut(organ) -= symptom_severity * weight * DISEASE_STRESS_SCALE;
        }

        self.clamp();
    }

    /// Clamp every organ into [0, 100].
    pub fn clamp(&mut self) {
        self.heart = clamp_score(self.heart);
        self.liver = clamp_score(self.liver);
        self.kidney = clamp_score(self.kidney);
        self.lungs = clamp_score(self.lungs);
        self.immune = clamp_score(self.immune);
    }

    /// Immune strength as a 0..1 factor.
    pub fn immune_factor(&self) -> f64 {
        self.immune / MAX_SCORE
    }

    /// Unweighted mean of heart, liver, kidney and lungs.
    pub fn average_vital(&self) -> f64 {
        Organ::VITAL.iter().map(|o| self.get(*o)).sum::<f64>() / Organ::VITAL.len() as f64
    }
}
