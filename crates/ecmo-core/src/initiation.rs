//! Initial circuit settings once the timeout has passed.

use ecmo_model::{EcmoError, EcmoMode, EngineConfig, InitiationPlan, PatientProfile, Result};
use tracing::info;

use crate::anthropometrics::anthropometrics_for;
use crate::cannula::recommend_cannulas;

const PRE_CANNULATION: [&str; 3] = [
    "Confirm anticoagulation (ACT > 180s)",
    "Verify cannula sizes available",
    "Prepare for potential complications",
];

/// Target blood flow in L/min for a body surface area and cardiac index.
pub fn target_flow(bsa: f64, target_ci: f64) -> f64 {
    bsa * target_ci
}

fn post_cannulation(mode: EcmoMode) -> Vec<String> {
    let mode_check = match mode {
        EcmoMode::VenoArterial => "Monitor for limb ischemia",
        EcmoMode::VenoVenous => "Check for recirculation",
    };
    vec![
        mode_check.to_string(),
        "Optimize flow and RPM settings".to_string(),
    ]
}

/// Builds the initiation plan for a patient.
///
/// Fails when the patient's measurements give no usable body surface area.
pub fn plan_initiation(profile: &PatientProfile, config: &EngineConfig) -> Result<InitiationPlan> {
    let bsa = anthropometrics_for(profile).bsa;
    if !bsa.is_finite() || bsa <= 0.0 {
        return Err(EcmoError::validation(
            "body surface area",
            format!("{bsa} is not positive; check weight and height"),
        ));
    }
    let target_ci = config.target_ci.for_mode(profile.ecmo_mode);
    let flow = target_flow(bsa, target_ci);
    let cannulas = recommend_cannulas(flow, bsa, profile.ecmo_mode, config);

    let delivered_ci = cannulas.drainage_max_flow / bsa;
    let ci_met = delivered_ci.min(target_ci);
    let ci_excess = (delivered_ci - target_ci).max(0.0);
    info!(
        bsa,
        target_flow = flow,
        drainage = %cannulas.drainage_size,
        r#return = %cannulas.return_size,
        "initiation planned"
    );
    Ok(InitiationPlan {
        bsa,
        target_ci,
        target_flow: flow,
        cannulas,
        delivered_ci,
        ci_met,
        ci_excess,
        initial_rpm: config.initial_rpm,
        pre_cannulation: PRE_CANNULATION.iter().map(ToString::to_string).collect(),
        post_cannulation: post_cannulation(profile.ecmo_mode),
    })
}
