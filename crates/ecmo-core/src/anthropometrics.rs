//! Body measurements.

use ecmo_model::{Anthropometrics, PatientProfile, Sex};

/// Computes BMI, Du Bois BSA and Devine ideal body weight.
///
/// A non-positive height reports BMI and BSA as 0 instead of dividing by
/// zero; a non-positive weight reports BSA as 0.
pub fn compute_anthropometrics(weight_kg: f64, height_cm: f64, sex: Sex) -> Anthropometrics {
    let bmi = if height_cm > 0.0 {
        let height_m = height_cm / 100.0;
        weight_kg / (height_m * height_m)
    } else {
        0.0
    };
    let bsa = if height_cm > 0.0 && weight_kg > 0.0 {
        0.007184 * height_cm.powf(0.725) * weight_kg.powf(0.425)
    } else {
        0.0
    };
    let base = match sex {
        Sex::Male => 50.0,
        Sex::Female => 45.5,
    };
    let ideal_weight_kg = base + 2.3 * ((height_cm - 152.4) / 2.54);
    Anthropometrics {
        bmi,
        bsa,
        ideal_weight_kg,
    }
}

/// Measurements for a profile. Every stage goes through here.
pub fn anthropometrics_for(profile: &PatientProfile) -> Anthropometrics {
    compute_anthropometrics(profile.weight_kg, profile.height_cm, profile.sex)
}
