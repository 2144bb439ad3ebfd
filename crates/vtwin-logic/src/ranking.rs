//! Treatment ranking: scores each candidate drug on its own.
//!
//! Every drug is simulated alone (no interaction with co-administered drugs)
//! under the generic disease profile for the same horizon as the combined
//! run, and its final day is scored:
//!
//! ```text
//! score = (100 - viral) * 0.5 + (100 - symptoms) * 0.3 + avg_organ_health * 0.2 - toxicity * 2
//! ```
//!
//! All candidates share one noise stream seed drawn from the caller's RNG,
//! so score differences come from the drugs and not from the noise.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::disease::GENERIC_DISEASE;
use crate::drug::Drug;
use crate::patient::Patient;
use crate::simulation::{run_simulation, SimulationRecord};

/// Weight of the residual viral load term.
const VIRAL_WEIGHT: f64 = 0.5;
/// Weight of the residual symptom term.
const SYMPTOM_WEIGHT: f64 = 0.3;
/// Weight of average organ health.
const ORGAN_WEIGHT: f64 = 0.2;
/// Penalty per unit of final-day toxicity.
const TOXICITY_PENALTY: f64 = 2.0;

pub const EXPLAIN_NOTE: &str = "Synthetic ranking logic (educational only)";
pub const EXPLAIN_LOGIC: &str =
    "Higher avg organ health + lower viral load/symptoms + lower toxicity increases score";

/// One scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub score: f64,
    pub final_viral: f64,
    pub final_symptoms: f64,
    pub avg_organ_health: f64,
    pub drug_toxicity: f64,
}

/// Static description of how scores are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Explainability {
    pub note: &'static str,
    pub logic: &'static str,
}

pub const EXPLAINABILITY: Explainability = Explainability {
    note: EXPLAIN_NOTE,
    logic: EXPLAIN_LOGIC,
};

/// Candidates best-first, plus the scoring note (absent for no candidates).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreatmentRanking {
    pub entries: Vec<RankingEntry>,
    pub explainability: Option<Explainability>,
}

impl TreatmentRanking {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            explainability: None,
        }
    }

    pub fn best(&self) -> Option<&RankingEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Composite score of a final-day record. Higher is better.
pub fn score_record(record: &SimulationRecord) -> f64 {
    (100.0 - record.viral_load) * VIRAL_WEIGHT
        + (100.0 - record.symptom_severity) * SYMPTOM_WEIGHT
        + record.avg_organ_health * ORGAN_WEIGHT
        - record.drug_toxicity * TOXICITY_PENALTY
}

/// Rank `drugs` for `patient` over `reference_days`, under the generic
/// disease profile.
pub fn rank_treatments<R: Rng + ?Sized>(
    reference_days: u32,
    drugs: &[Drug],
    patient: &Patient,
    rng: &mut R,
) -> TreatmentRanking {
    rank_treatments_for_disease(reference_days, drugs, patient, GENERIC_DISEASE, rng)
}

/// Same as [`rank_treatments`] with an explicit disease.
pub fn rank_treatments_for_disease<R: Rng + ?Sized>(
    reference_days: u32,
    drugs: &[Drug],
    patient: &Patient,
    disease_name: &str,
    rng: &mut R,
) -> TreatmentRanking {
    if drugs.is_empty() {
        return TreatmentRanking::empty();
    }

    let noise_seed: u64 = rng.gen();

    let mut entries: Vec<RankingEntry> = drugs
        .iter()
        .filter_map(|drug| {
            let mut candidate_rng = StdRng::seed_from_u64(noise_seed);
            let timeline = run_simulation(
                patient,
                disease_name,
                std::slice::from_ref(drug),
                reference_days,
                &mut candidate_rng,
            );
            let last = timeline.final_record()?;
            Some(RankingEntry {
                name: drug.name.clone(),
                score: score_record(last),
                final_viral: last.viral_load,
                final_symptoms: last.symptom_severity,
                avg_organ_health: last.avg_organ_health,
                drug_toxicity: last.drug_toxicity,
            })
        })
        .collect();

    // Stable: exact ties keep input order.
    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    if let Some(best) = entries.first() {
        log::info!(
            "Ranked {} drug(s) over {} days, best: {} ({:.2})",
            entries.len(),
            reference_days,
            best.name,
            best.score
        );
    }

    TreatmentRanking {
        entries,
        explainability: Some(EXPLAINABILITY),
    }
}
