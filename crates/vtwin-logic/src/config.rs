//! Scenario configuration: everything one simulation session needs.
//!
//! A `Scenario` bundles the patient, disease, drug selection, horizon and
//! optional noise seed. It deserializes from JSON with every field optional,
//! so a scenario file only lists what differs from the defaults.
//!
//! ```
//! use vtwin_logic::config::{validate_scenario, Scenario};
//!
//! let scenario = Scenario::default();
//! assert!(validate_scenario(&scenario).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::drug::{suggested_drugs, Drug};
use crate::patient::Patient;
use crate::validation::{validate_drug, validate_patient, ValidationError};

pub const DEFAULT_DAYS: u32 = 20;
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 60;
pub const MAX_DRUGS: usize = 3;
pub const DEFAULT_DISEASE: &str = "Influenza";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub patient: Patient,
    pub disease: String,
    pub drugs: Vec<Drug>,
    pub days: u32,
    /// Noise seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            patient: Patient::default(),
            disease: DEFAULT_DISEASE.to_string(),
            drugs: default_drugs(DEFAULT_DISEASE),
            days: DEFAULT_DAYS,
            seed: None,
        }
    }
}

impl Scenario {
    /// Default scenario for a disease, with its first suggested drug.
    pub fn for_disease(disease: &str) -> Self {
        Self {
            disease: disease.to_string(),
            drugs: default_drugs(disease),
            ..Self::default()
        }
    }
}

fn default_drugs(disease: &str) -> Vec<Drug> {
    suggested_drugs(disease)
        .iter()
        .take(1)
        .map(|name| Drug::named(*name))
        .collect()
}

/// Validate a scenario, returning all errors found.
pub fn validate_scenario(scenario: &Scenario) -> Vec<ValidationError> {
    let mut errors = validate_patient(&scenario.patient);

    if scenario.disease.trim().is_empty() {
        errors.push(ValidationError::EmptyDiseaseName);
    }
    if !(MIN_DAYS..=MAX_DAYS).contains(&scenario.days) {
        errors.push(ValidationError::DaysOutOfRange(scenario.days));
    }
    if scenario.drugs.is_empty() {
        errors.push(ValidationError::NoDrugs);
    }
    if scenario.drugs.len() > MAX_DRUGS {
        errors.push(ValidationError::TooManyDrugs(scenario.drugs.len()));
    }
    for drug in &scenario.drugs {
        errors.extend(validate_drug(drug));
    }

    errors
}
