//! Input validation for patients and drugs.
//!
//! The simulation engine trusts its inputs. Callers run these checks first;
//! each returns every problem found, so an empty list means valid.

use crate::drug::{Drug, MIN_HALF_LIFE};
use crate::patient::Patient;

pub const MAX_AGE: u8 = 100;
pub const MIN_WEIGHT_KG: f64 = 2.0;
pub const MAX_HALF_LIFE: f64 = 48.0;
pub const MAX_DOSE: f64 = 10.0;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyPatientName,
    AgeOutOfRange(u8),
    WeightTooLow(f64),
    ImmuneOutOfRange(f64),
    EmptyDrugName,
    EfficacyOutOfRange { drug: String, value: f64 },
    ToxicityOutOfRange { drug: String, value: f64 },
    HalfLifeOutOfRange { drug: String, value: f64 },
    DoseOutOfRange { drug: String, value: f64 },
    /// Simulation horizon outside the allowed day range.
    DaysOutOfRange(u32),
    NoDrugs,
    TooManyDrugs(usize),
    EmptyDiseaseName,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyPatientName => write!(f, "patient name is empty"),
            ValidationError::AgeOutOfRange(age) => {
                write!(f, "age {} outside 0..={}", age, MAX_AGE)
            }
            ValidationError::WeightTooLow(w) => {
                write!(f, "weight {} kg below minimum {} kg", w, MIN_WEIGHT_KG)
            }
            ValidationError::ImmuneOutOfRange(v) => write!(f, "immune {} outside 0..=100", v),
            ValidationError::EmptyDrugName => write!(f, "drug name is empty"),
            ValidationError::EfficacyOutOfRange { drug, value } => {
                write!(f, "{}: efficacy {} outside 0..=1", drug, value)
            }
            ValidationError::ToxicityOutOfRange { drug, value } => {
                write!(f, "{}: toxicity {} outside 0..=1", drug, value)
            }
            ValidationError::HalfLifeOutOfRange { drug, value } => write!(
                f,
                "{}: half-life {} h outside {}..={}",
                drug, value, MIN_HALF_LIFE, MAX_HALF_LIFE
            ),
            ValidationError::DoseOutOfRange { drug, value } => {
                write!(f, "{}: dose {} outside 0..={}", drug, value, MAX_DOSE)
            }
            ValidationError::DaysOutOfRange(d) => write!(f, "{} days outside allowed range", d),
            ValidationError::NoDrugs => write!(f, "no drugs selected"),
            ValidationError::TooManyDrugs(n) => write!(f, "{} drugs selected, too many", n),
            ValidationError::EmptyDiseaseName => write!(f, "disease name is empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

fn in_range(value: f64, lo: f64, hi: f64) -> bool {
    value.is_finite() && (lo..=hi).contains(&value)
}

pub fn validate_patient(patient: &Patient) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if patient.name.trim().is_empty() {
        errors.push(ValidationError::EmptyPatientName);
    }
    if patient.age > MAX_AGE {
        errors.push(ValidationError::AgeOutOfRange(patient.age));
    }
    if !(patient.weight.is_finite() && patient.weight >= MIN_WEIGHT_KG) {
        errors.push(ValidationError::WeightTooLow(patient.weight));
    }
    if !in_range(patient.immune, 0.0, 100.0) {
        errors.push(ValidationError::ImmuneOutOfRange(patient.immune));
    }

    errors
}

pub fn validate_drug(drug: &Drug) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let name = || drug.name.clone();

    if drug.name.trim().is_empty() {
        errors.push(ValidationError::EmptyDrugName);
    }
    if !in_range(drug.efficacy, 0.0, 1.0) {
        errors.push(ValidationError::EfficacyOutOfRange {
            drug: name(),
            value: drug.efficacy,
        });
    }
    if !in_range(drug.toxicity, 0.0, 1.0) {
        errors.push(ValidationError::ToxicityOutOfRange {
            drug: name(),
            value: drug.toxicity,
        });
    }
    if !in_range(drug.half_life, MIN_HALF_LIFE, MAX_HALF_LIFE) {
        errors.push(ValidationError::HalfLifeOutOfRange {
            drug: name(),
            value: drug.half_life,
        });
    }
    if !in_range(drug.dose, 0.0, MAX_DOSE) {
        errors.push(ValidationError::DoseOutOfRange {
            drug: name(),
            value: drug.dose,
        });
    }

    errors
}
