//! Drug parameters and first-order concentration decay.
//!
//! The dose acts as the initial concentration. Each day the concentration
//! decays exponentially with the drug's half-life, and both the therapeutic
//! effect and the toxicity scale linearly with it.

use serde::{Deserialize, Serialize};

/// Half-life floor, keeps the decay constant finite.
pub const MIN_HALF_LIFE: f64 = 0.1;

/// A candidate drug. Missing fields deserialize to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Drug {
    pub name: String,
    /// 0.0..=1.0
    pub efficacy: f64,
    /// Hours for the concentration to halve.
    pub half_life: f64,
    /// 0.0..=1.0
    pub toxicity: f64,
    /// Initial concentration, 0.0..=10.0
    pub dose: f64,
}

impl Default for Drug {
    fn default() -> Self {
        Self {
            name: "drug".to_string(),
            efficacy: 0.5,
            half_life: 12.0,
            toxicity: 0.1,
            dose: 1.0,
        }
    }
}

/// One drug's contribution on a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugEffect {
    pub efficacy: f64,
    pub toxicity: f64,
}

impl std::ops::AddAssign for DrugEffect {
    fn add_assign(&mut self, rhs: Self) {
        self.efficacy += rhs.efficacy;
        self.toxicity += rhs.toxicity;
    }
}

impl Drug {
    /// Drug with default parameters and the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Half-life with the floor applied.
    pub fn effective_half_life(&self) -> f64 {
        self.half_life.max(MIN_HALF_LIFE)
    }

    /// `dose * exp(-ln2 / half_life * day)`.
    pub fn concentration(&self, day: u32) -> f64 {
        let k = std::f64::consts::LN_2 / self.effective_half_life();
        self.dose * (-k * day as f64).exp()
    }

    pub fn daily_effect(&self, day: u32) -> DrugEffect {
        let concentration = self.concentration(day);
        DrugEffect {
            efficacy: self.efficacy * concentration,
            toxicity: self.toxicity * concentration,
        }
    }
}

/// Summed effect and toxicity of every drug on `day`. Zero for no drugs.
pub fn combined_effect(drugs: &[Drug], day: u32) -> DrugEffect {
    let mut total = DrugEffect::default();
    for drug in drugs {
        total += drug.daily_effect(day);
    }
    total
}

/// Drug names offered for a disease.
pub fn suggested_drugs(disease: &str) -> &'static [&'static str] {
    match disease {
        "Influenza" => &["Oseltamivir (Tamiflu)", "Zanamivir (Relenza)"],
        "Malaria" => &["Artemether-Lumefantrine", "Chloroquine"],
        "Common Cold" => &["Paracetamol", "Ibuprofen"],
        "COVID-19" => &["Remdesivir", "Molnupiravir"],
        "Dengue" => &["Supportive Therapy"],
        "Synthetic Pathogen" => &["Experimental Drug A", "Experimental Drug B"],
        _ => &["Drug"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_drug() -> Drug {
        Drug {
            name: "A".into(),
            efficacy: 0.5,
            half_life: 12.0,
            toxicity: 0.0,
            dose: 1.0,
        }
    }

    #[test]
    fn test_day_zero_concentration_is_dose() {
        let d = Drug {
            dose: 3.0,
            ..test_drug()
        };
        assert!((d.concentration(0) - 3.0).abs() < 1e-12);
        let e = d.daily_effect(0);
        assert!((e.efficacy - 1.5).abs() < 1e-12);
        assert_eq!(e.toxicity, 0.0);
    }

    #[test]
    fn test_one_half_life_halves_effect() {
        let d = test_drug();
        let at_12 = d.daily_effect(12).efficacy;
        let at_24 = d.daily_effect(24).efficacy;
        assert!((at_24 / at_12 - 0.5).abs() < 1e-9, "ratio={}", at_24 / at_12);
    }

    #[test]
    fn test_half_life_floor() {
        let zero = Drug {
            half_life: 0.0,
            ..test_drug()
        };
        let negative = Drug {
            half_life: -4.0,
            ..test_drug()
        };
        assert_eq!(zero.effective_half_life(), MIN_HALF_LIFE);
        assert_eq!(negative.effective_half_life(), MIN_HALF_LIFE);
        let c = zero.concentration(1);
        assert!(c.is_finite());
        assert!(c >= 0.0 && c < 1e-2);
    }

    #[test]
    fn test_combined_effect_sums() {
        let a = test_drug();
        let b = Drug {
            efficacy: 0.2,
            toxicity: 0.4,
            ..test_drug()
        };
        let total = combined_effect(&[a.clone(), b.clone()], 3);
        let ea = a.daily_effect(3);
        let eb = b.daily_effect(3);
        assert!((total.efficacy - (ea.efficacy + eb.efficacy)).abs() < 1e-12);
        assert!((total.toxicity - (ea.toxicity + eb.toxicity)).abs() < 1e-12);
    }

    #[test]
    fn test_no_drugs_no_effect() {
        assert_eq!(combined_effect(&[], 0), DrugEffect::default());
    }

    #[test]
    fn test_default_fields() {
        let d = Drug::named("X");
        assert_eq!(d.name, "X");
        assert_eq!(d.efficacy, 0.5);
        assert_eq!(d.half_life, 12.0);
        assert_eq!(d.toxicity, 0.1);
        assert_eq!(d.dose, 1.0);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let d: Drug = serde_json::from_str(r#"{"name":"Chloroquine","toxicity":0.3}"#).unwrap();
        assert_eq!(d.name, "Chloroquine");
        assert_eq!(d.toxicity, 0.3);
        assert_eq!(d.half_life, 12.0);
    }

    #[test]
    fn test_suggested_drugs() {
        assert_eq!(suggested_drugs("Dengue"), &["Supportive Therapy"]);
        assert_eq!(suggested_drugs("Malaria").len(), 2);
        assert_eq!(suggested_drugs("Unknown"), &["Drug"]);
    }
}
