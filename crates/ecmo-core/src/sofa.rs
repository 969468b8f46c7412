//! Sequential Organ Failure Assessment.

use ecmo_model::{ClinicalObservations, OrganScoreResult, ScoreComponent};
use tracing::debug;

use crate::bands::{at_least, at_most, below};

const RESPIRATORY: [(f64, u8); 4] = [(400.0, 0), (300.0, 1), (200.0, 2), (100.0, 3)];
const COAGULATION: [(f64, u8); 4] = [(150.0, 0), (100.0, 1), (50.0, 2), (20.0, 3)];
const LIVER: [(f64, u8); 4] = [(1.2, 0), (2.0, 1), (6.0, 2), (12.0, 3)];
const CNS: [(f64, u8); 4] = [(15.0, 0), (13.0, 1), (10.0, 2), (6.0, 3)];
const WORST: u8 = 4;

const MORTALITY: [(f64, &str); 4] = [(6.0, "~10%"), (9.0, "~15%"), (12.0, "~40%"), (15.0, "~60%")];
const MORTALITY_OTHERWISE: &str = "~80%";

/// PaO2/FiO2 ratio points.
pub fn respiratory_points(pao2_fio2: f64) -> u8 {
    at_least(pao2_fio2, &RESPIRATORY, WORST)
}

/// Platelet count points.
pub fn coagulation_points(platelets: f64) -> u8 {
    at_least(platelets, &COAGULATION, WORST)
}

/// Bilirubin points.
pub fn liver_points(bilirubin: f64) -> u8 {
    below(bilirubin, &LIVER, WORST)
}

/// Glasgow Coma Scale points.
pub fn cns_points(glasgow_coma_scale: f64) -> u8 {
    at_least(glasgow_coma_scale, &CNS, WORST)
}

/// Creatinine and urine output points.
///
/// Bands 2 and 3 both accept urine output below 200 mL/day, so a
/// urine-only trigger never reaches band 3. Any urine output below 500
/// already lands in band 1 before that, whatever the creatinine.
pub fn renal_points(creatinine: f64, urine_output: f64) -> u8 {
    if creatinine < 1.2 && urine_output >= 500.0 {
        0
    } else if creatinine < 2.0 || urine_output < 500.0 {
        1
    } else if creatinine < 3.5 || urine_output < 200.0 {
        2
    } else if creatinine < 5.0 || urine_output < 200.0 {
        3
    } else {
        4
    }
}

/// Mortality band for a SOFA total.
pub fn mortality_band(sofa_total: u8) -> &'static str {
    at_most(f64::from(sofa_total), &MORTALITY, MORTALITY_OTHERWISE)
}

/// Sums the six organ sub-scores. Mean arterial pressure is not scored;
/// the cardiovascular points come from the vasopressor category alone.
pub fn compute_sofa(observations: &ClinicalObservations) -> OrganScoreResult {
    let parts = [
        ("Respiratory", respiratory_points(observations.pao2_fio2)),
        ("Coagulation", coagulation_points(observations.platelets)),
        ("Liver", liver_points(observations.bilirubin)),
        ("Cardiovascular", observations.vasopressor.sofa_points()),
        ("CNS", cns_points(observations.glasgow_coma_scale)),
        (
            "Renal",
            renal_points(observations.creatinine, observations.urine_output),
        ),
    ];
    let sofa_total: u8 = parts.iter().map(|(_, points)| points).sum();
    let mortality = mortality_band(sofa_total);
    debug!(sofa_total, mortality, "SOFA computed");
    OrganScoreResult {
        sofa_total,
        mortality_band: mortality.to_string(),
        components: parts
            .iter()
            .map(|(name, points)| ScoreComponent::new(*name, i32::from(*points)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respiratory_boundaries() {
        assert_eq!(respiratory_points(400.0), 0);
        assert_eq!(respiratory_points(399.9), 1);
        assert_eq!(respiratory_points(300.0), 1);
        assert_eq!(respiratory_points(299.9), 2);
        assert_eq!(respiratory_points(200.0), 2);
        assert_eq!(respiratory_points(199.9), 3);
        assert_eq!(respiratory_points(100.0), 3);
        assert_eq!(respiratory_points(99.9), 4);
    }

    #[test]
    fn coagulation_boundaries() {
        for (value, expected) in [
            (150.0, 0),
            (149.9, 1),
            (100.0, 1),
            (99.9, 2),
            (50.0, 2),
            (49.9, 3),
            (20.0, 3),
            (19.9, 4),
        ] {
            assert_eq!(coagulation_points(value), expected, "platelets {value}");
        }
    }

    #[test]
    fn liver_boundaries() {
        for (value, expected) in [
            (1.19, 0),
            (1.2, 1),
            (1.99, 1),
            (2.0, 2),
            (5.99, 2),
            (6.0, 3),
            (11.99, 3),
            (12.0, 4),
        ] {
            assert_eq!(liver_points(value), expected, "bilirubin {value}");
        }
    }

    #[test]
    fn cns_boundaries() {
        for (value, expected) in [
            (15.0, 0),
            (14.0, 1),
            (13.0, 1),
            (12.0, 2),
            (10.0, 2),
            (9.0, 3),
            (6.0, 3),
            (5.0, 4),
            (3.0, 4),
        ] {
            assert_eq!(cns_points(value), expected, "GCS {value}");
        }
    }

    #[test]
    fn renal_bands() {
        assert_eq!(renal_points(1.0, 500.0), 0);
        assert_eq!(renal_points(1.2, 500.0), 1);
        assert_eq!(renal_points(1.0, 499.0), 1);
        assert_eq!(renal_points(2.0, 500.0), 2);
        assert_eq!(renal_points(3.4, 600.0), 2);
        assert_eq!(renal_points(3.5, 600.0), 3);
        assert_eq!(renal_points(4.9, 600.0), 3);
        assert_eq!(renal_points(5.0, 600.0), 4);
    }

    #[test]
    fn renal_low_urine_stops_at_band_one() {
        // Urine below 500 short-circuits band 1 regardless of creatinine.
        assert_eq!(renal_points(6.0, 100.0), 1);
        assert_eq!(renal_points(6.0, 499.0), 1);
    }

    #[test]
    fn mortality_bands() {
        assert_eq!(mortality_band(0), "~10%");
        assert_eq!(mortality_band(6), "~10%");
        assert_eq!(mortality_band(7), "~15%");
        assert_eq!(mortality_band(9), "~15%");
        assert_eq!(mortality_band(10), "~40%");
        assert_eq!(mortality_band(12), "~40%");
        assert_eq!(mortality_band(13), "~60%");
        assert_eq!(mortality_band(15), "~60%");
        assert_eq!(mortality_band(16), "~80%");
        assert_eq!(mortality_band(24), "~80%");
    }

    #[test]
    fn nan_inputs_score_worst() {
        assert_eq!(respiratory_points(f64::NAN), 4);
        assert_eq!(liver_points(f64::NAN), 4);
        assert_eq!(renal_points(f64::NAN, f64::NAN), 4);
    }
}
