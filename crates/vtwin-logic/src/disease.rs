//! Disease parameter table.
//!
//! Each known disease has a progression `strength` (multiplier on viral
//! growth) and a set of organ stress weights. Lookups are by exact name;
//! anything unknown resolves to the generic profile.

use serde::Serialize;

use crate::organs::Organ;

/// Name the treatment ranker simulates under. Not in the table, so it
/// resolves to the generic profile.
pub const GENERIC_DISEASE: &str = "Generic";

/// Static parameters for one disease.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiseaseProfile {
    pub name: &'static str,
    /// Positive multiplier on viral growth speed.
    pub strength: f64,
    /// Per-organ stress coefficients.
    pub organ_weights: &'static [(Organ, f64)],
}

impl DiseaseProfile {
    /// Stress coefficient for an organ, 0.0 when the disease ignores it.
    pub fn organ_weight(&self, organ: Organ) -> f64 {
        self.organ_weights
            .iter()
            .find(|(o, _)| *o == organ)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    /// Viral load before the first simulated day.
    pub fn initial_viral_load(&self) -> f64 {
        50.0 * self.strength
    }
}

/// Profile used for unknown disease names.
pub const GENERIC_PROFILE: DiseaseProfile = DiseaseProfile {
    name: GENERIC_DISEASE,
    strength: 1.0,
    organ_weights: &[],
};

const KNOWN_DISEASES: [DiseaseProfile; 6] = [
    DiseaseProfile {
        name: "Influenza",
        strength: 0.8,
        organ_weights: &[
            (Organ::Lungs, 0.3),
            (Organ::Heart, 0.1),
            (Organ::Liver, 0.1),
            (Organ::Kidney, 0.05),
        ],
    },
    DiseaseProfile {
        name: "Malaria",
        strength: 1.2,
        organ_weights: &[(Organ::Liver, 0.4), (Organ::Kidney, 0.2)],
    },
    DiseaseProfile {
        name: "Common Cold",
        strength: 0.5,
        organ_weights: &[(Organ::Lungs, 0.2)],
    },
    DiseaseProfile {
        name: "COVID-19",
        strength: 1.3,
        organ_weights: &[(Organ::Lungs, 0.5), (Organ::Heart, 0.2)],
    },
    DiseaseProfile {
        name: "Dengue",
        strength: 1.1,
        organ_weights: &[(Organ::Liver, 0.3), (Organ::Kidney, 0.2)],
    },
    DiseaseProfile {
        name: "Synthetic Pathogen",
        strength: 1.5,
        organ_weights: &[
            (Organ::Lungs, 0.2),
            (Organ::Liver, 0.2),
            (Organ::Heart, 0.2),
            (Organ::Kidney, 0.2),
        ],
    },
];

/// All diseases with dedicated parameters, in display order.
pub fn known_diseases() -> &'static [DiseaseProfile] {
    &KNOWN_DISEASES
}

/// Resolve a disease name. Unknown names get strength 1.0 and no organ stress.
pub fn disease_profile(name: &str) -> DiseaseProfile {
    match KNOWN_DISEASES.iter().find(|d| d.name == name) {
        Some(profile) => *profile,
        None => {
            log::debug!("Unknown disease {:?}, using generic profile", name);
            GENERIC_PROFILE
        }
    }
}

/// Whether the name has dedicated parameters.
pub fn is_known_disease(name: &str) -> bool {
    KNOWN_DISEASES.iter().any(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_disease_lookup() {
        let cold = disease_profile("Common Cold");
        assert_eq!(cold.name, "Common Cold");
        assert!((cold.strength - 0.5).abs() < f64::EPSILON);
        assert!((cold.organ_weight(Organ::Lungs) - 0.2).abs() < f64::EPSILON);
        assert_eq!(cold.organ_weight(Organ::Liver), 0.0);
    }

    #[test]
    fn test_unknown_falls_back_to_generic() {
        let p = disease_profile("Space Flu");
        assert_eq!(p, GENERIC_PROFILE);
        assert!((p.strength - 1.0).abs() < f64::EPSILON);
        assert!(p.organ_weights.is_empty());
        assert!(!is_known_disease("Space Flu"));
    }

    #[test]
    fn test_generic_name_is_not_in_table() {
        assert!(!is_known_disease(GENERIC_DISEASE));
        assert_eq!(disease_profile(GENERIC_DISEASE), GENERIC_PROFILE);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(is_known_disease("Malaria"));
        assert!(!is_known_disease("malaria"));
    }

    #[test]
    fn test_table_order_and_size() {
        let names: Vec<_> = known_diseases().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            [
                "Influenza",
                "Malaria",
                "Common Cold",
                "COVID-19",
                "Dengue",
                "Synthetic Pathogen"
            ]
        );
    }

    #[test]
    fn test_no_disease_stresses_immune() {
        for d in known_diseases() {
            assert_eq!(d.organ_weight(Organ::Immune), 0.0, "{}", d.name);
            assert!(d.strength > 0.0);
        }
    }

    #[test]
    fn test_initial_viral_load() {
        assert!((disease_profile("Common Cold").initial_viral_load() - 25.0).abs() < 1e-9);
        assert!((GENERIC_PROFILE.initial_viral_load() - 50.0).abs() < 1e-9);
    }
}
