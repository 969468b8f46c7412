//! Inclusion, exclusion and ECPR criteria.

use ecmo_model::{CriteriaFlags, CriteriaResult, CriterionCheck, EcprInputs, PatientProfile};
use tracing::debug;

use crate::anthropometrics::anthropometrics_for;

const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 75;
const MIN_BMI: f64 = 18.0;
const MAX_BMI: f64 = 50.0;
const ECPR_MIN_PH: f64 = 6.8;
const ECPR_MAX_LACTATE: f64 = 15.0;

/// Counts met inclusion criteria and present exclusion criteria.
///
/// ECPR criteria are evaluated only when `ecpr` is given; the result then
/// reports the count as applicable.
pub fn evaluate_criteria(
    profile: &PatientProfile,
    flags: &CriteriaFlags,
    ecpr: Option<&EcprInputs>,
) -> CriteriaResult {
    let bmi = anthropometrics_for(profile).bmi;
    let age = profile.age_years;

    let inclusion = vec![
        CriterionCheck::new("Reversible underlying condition", flags.reversible_condition),
        CriterionCheck::new("Age 18-75", (MIN_AGE..=MAX_AGE).contains(&age)),
        CriterionCheck::new("BMI 18-50", (MIN_BMI..=MAX_BMI).contains(&bmi)),
        CriterionCheck::new(
            "No absolute contraindications",
            flags.no_absolute_contraindications,
        ),
        CriterionCheck::new("Informed consent obtained", flags.informed_consent),
        CriterionCheck::new(
            "Failure of conventional therapy",
            flags.conventional_therapy_failed,
        ),
    ];
    let exclusion = vec![
        CriterionCheck::new("Irreversible brain damage", flags.irreversible_brain_damage),
        CriterionCheck::new("Terminal illness", flags.terminal_illness),
        CriterionCheck::new("Severe bleeding/coagulopathy", flags.severe_bleeding),
        CriterionCheck::new("Severe immunosuppression", flags.severe_immunosuppression),
        CriterionCheck::new("Age over 75", age > MAX_AGE),
        CriterionCheck::new("BMI below 18 or above 50", bmi < MIN_BMI || bmi > MAX_BMI),
    ];
    let ecpr_checks = ecpr.map(ecpr_checks).unwrap_or_default();

    let result = CriteriaResult {
        inclusion_met: count_met(&inclusion),
        exclusion_count: count_met(&exclusion),
        ecpr_criteria_met: ecpr.map(|_| count_met(&ecpr_checks)),
        inclusion,
        exclusion,
        ecpr: ecpr_checks,
    };
    debug!(
        inclusion_met = result.inclusion_met,
        exclusion_count = result.exclusion_count,
        ecpr_criteria_met = ?result.ecpr_criteria_met,
        "criteria evaluated"
    );
    result
}

fn ecpr_checks(inputs: &EcprInputs) -> Vec<CriterionCheck> {
    vec![
        CriterionCheck::new("Witnessed arrest", inputs.witnessed_arrest),
        CriterionCheck::new("Bystander CPR", inputs.bystander_cpr),
        CriterionCheck::new("No ROSC within 60 minutes", inputs.no_rosc_within_60_min),
        CriterionCheck::new("pH >= 6.8", inputs.ph >= ECPR_MIN_PH),
        CriterionCheck::new("Lactate <= 15 mmol/L", inputs.lactate <= ECPR_MAX_LACTATE),
    ]
}

fn count_met(checks: &[CriterionCheck]) -> u8 {
    checks.iter().filter(|check| check.met).count() as u8
}
