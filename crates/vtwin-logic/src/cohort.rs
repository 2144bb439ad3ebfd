//! Cohort runs: the same scenario applied to a batch of patients.
//!
//! Each patient gets a combined run with all drugs plus a per-drug ranking
//! over the same horizon, summarized into one row.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::drug::Drug;
use crate::patient::{Patient, Sex, DEFAULT_IMMUNE};
use crate::ranking::rank_treatments;
use crate::simulation::run_simulation;

/// One row of a cohort table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortPatient {
    pub name: String,
    pub age: u8,
    pub sex: Sex,
    pub weight: f64,
    #[serde(default = "default_immune")]
    pub immune: f64,
}

fn default_immune() -> f64 {
    DEFAULT_IMMUNE
}

impl From<&CohortPatient> for Patient {
    fn from(row: &CohortPatient) -> Self {
        Patient {
            name: row.name.clone(),
            age: row.age,
            sex: row.sex,
            weight: row.weight,
            immune: row.immune,
            ..Patient::default()
        }
    }
}

/// Per-patient outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSummary {
    pub patient: String,
    pub final_viral: f64,
    pub final_symptoms: f64,
    pub final_avg_organ_health: f64,
    /// `None` when no drugs were given.
    pub best_drug: Option<String>,
    pub best_score: Option<f64>,
}

/// Small two-patient sample cohort.
pub fn example_cohort() -> Vec<CohortPatient> {
    vec![
        CohortPatient {
            name: "Patient 1".to_string(),
            age: 30,
            sex: Sex::Male,
            weight: 70.0,
            immune: 65.0,
        },
        CohortPatient {
            name: "Patient 2".to_string(),
            age: 65,
            sex: Sex::Female,
            weight: 60.0,
            immune: 40.0,
        },
    ]
}

/// Run the scenario for every patient, in input order.
pub fn run_cohort<R: Rng + ?Sized>(
    patients: &[Patient],
    disease: &str,
    drugs: &[Drug],
    days: u32,
    rng: &mut R,
) -> Vec<CohortSummary> {
    let summaries: Vec<CohortSummary> = patients
        .iter()
        .map(|patient| {
            let timeline = run_simulation(patient, disease, drugs, days, rng);
            let ranking = rank_treatments(timeline.days(), drugs, patient, rng);
            let last = timeline.final_record();
            let best = ranking.best();

            CohortSummary {
                patient: patient.name.clone(),
                final_viral: last.map_or(0.0, |r| r.viral_load),
                final_symptoms: last.map_or(0.0, |r| r.symptom_severity),
                final_avg_organ_health: last.map_or(0.0, |r| r.avg_organ_health),
                best_drug: best.map(|e| e.name.clone()),
                best_score: best.map(|e| e.score),
            }
        })
        .collect();

    log::info!(
        "Cohort of {} patient(s) simulated for {} on {} drug(s)",
        summaries.len(),
        disease,
        drugs.len()
    );

    summaries
}
