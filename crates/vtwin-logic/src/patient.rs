//! Virtual patient description.
//!
//! Only `immune` feeds the numeric model. The other fields describe the
//! patient for display and cohort reports.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Urban,
    Rural,
    Tropical,
    Temperate,
}

/// Comorbidities the patient form offers.
pub const COMMON_COMORBIDITIES: [&str; 3] = ["diabetes", "hypertension", "asthma"];

/// Immune strength used when none is given.
pub const DEFAULT_IMMUNE: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub name: String,
    /// Years, 0–100.
    pub age: u8,
    pub sex: Sex,
    /// Kilograms, at least 2.0.
    pub weight: f64,
    /// Baseline immune strength, 0–100.
    pub immune: f64,
    pub comorbidities: BTreeSet<String>,
    pub environment: Environment,
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            name: "Patient A".to_string(),
            age: 35,
            sex: Sex::Male,
            weight: 70.0,
            immune: DEFAULT_IMMUNE,
            comorbidities: BTreeSet::new(),
            environment: Environment::Urban,
        }
    }
}

impl Patient {
    pub fn with_immune(immune: f64) -> Self {
        Self {
            immune,
            ..Self::default()
        }
    }

    pub fn has_comorbidity(&self, condition: &str) -> bool {
        self.comorbidities.contains(condition)
    }
}
