//! SAVE and RESP survival scores.
//!
//! The ECMO mode picks the score: veno-arterial runs use SAVE, veno-venous
//! runs use RESP. Both are sums of independently banded sub-scores.

use ecmo_model::{
    ClinicalObservations, EcmoError, ModeObservations, PatientProfile, RespObservations, Result,
    RiskScoreKind, RiskScoreResult, RiskTier, SaveObservations, ScoreComponent,
};
use tracing::debug;

use crate::bands::{at_least, at_most, below};

// SAVE sub-scores. Upper bounds are exclusive.
const SAVE_AGE: [(f64, i32); 4] = [(18.0, 0), (45.0, 7), (55.0, 12), (65.0, 18)];
const SAVE_AGE_OTHERWISE: i32 = 22;
const SAVE_WEIGHT: [(f64, i32); 3] = [(65.0, 0), (85.0, 1), (95.0, 2)];
const SAVE_WEIGHT_OTHERWISE: i32 = 3;
const SAVE_CARDIAC_ARREST: i32 = 15;
const SAVE_INTUBATION: [(f64, i32); 2] = [(10.0, 0), (29.0, 3)];
const SAVE_INTUBATION_OTHERWISE: i32 = 7;
const SAVE_DIASTOLIC: [(f64, i32); 3] = [(20.0, 11), (40.0, 8), (60.0, 5)];
const SAVE_DIASTOLIC_OTHERWISE: i32 = 0;

// SAVE total → tier. Upper bounds are inclusive.
const SAVE_TIERS: [(f64, (RiskTier, &str)); 3] = [
    (-5.0, (RiskTier::VeryHigh, "~18%")),
    (-1.0, (RiskTier::High, "~33%")),
    (5.0, (RiskTier::Medium, "~50%")),
];
const SAVE_TIER_OTHERWISE: (RiskTier, &str) = (RiskTier::Low, "~75%");

// RESP sub-scores.
const RESP_AGE: [(f64, i32); 3] = [(18.0, 0), (50.0, -2), (65.0, -1)];
const RESP_AGE_OTHERWISE: i32 = 0;
const RESP_IMMUNOCOMPROMISED: i32 = -2;
const RESP_VENTILATION: [(f64, i32); 2] = [(48.0, 3), (168.0, 0)];
const RESP_VENTILATION_OTHERWISE: i32 = -3;
const RESP_PF_RATIO: [(f64, i32); 2] = [(150.0, 0), (100.0, -1)];
const RESP_PF_RATIO_OTHERWISE: i32 = -3;
const RESP_PH: [(f64, i32); 1] = [(7.15, 0)];
const RESP_PH_OTHERWISE: i32 = -2;
const RESP_PEEP: [(f64, i32); 1] = [(10.0, -1)];
const RESP_PLATEAU: [(f64, i32); 1] = [(30.0, -1)];
const RESP_CNS_DYSFUNCTION: i32 = -7;

// RESP total → tier. Lower bounds are inclusive.
const RESP_TIERS: [(f64, (RiskTier, &str)); 4] = [
    (6.0, (RiskTier::VeryLow, "~92%")),
    (3.0, (RiskTier::Low, "~76%")),
    (0.0, (RiskTier::Medium, "~57%")),
    (-3.0, (RiskTier::High, "~33%")),
];
const RESP_TIER_OTHERWISE: (RiskTier, &str) = (RiskTier::VeryHigh, "~18%");

/// Computes the survival score matching the patient's ECMO mode.
///
/// Fails with [`EcmoError::ModeMismatch`] when the mode-specific observations
/// were collected for the other mode.
pub fn compute_risk_score(
    profile: &PatientProfile,
    observations: &ClinicalObservations,
) -> Result<RiskScoreResult> {
    let found = observations.mode.mode();
    if found != profile.ecmo_mode {
        return Err(EcmoError::ModeMismatch {
            expected: profile.ecmo_mode,
            found,
        });
    }
    let result = match &observations.mode {
        ModeObservations::VenoArterial(save) => {
            save_score(profile.age_years, profile.weight_kg, save)
        }
        ModeObservations::VenoVenous(resp) => {
            resp_score(profile.age_years, observations.pao2_fio2, resp)
        }
    };
    debug!(
        score = result.kind.as_str(),
        raw = result.raw_score,
        tier = %result.risk_tier,
        "risk score computed"
    );
    Ok(result)
}

/// SAVE score (veno-arterial).
pub fn save_score(age_years: u32, weight_kg: f64, observations: &SaveObservations) -> RiskScoreResult {
    let components = vec![
        ScoreComponent::new("Age", below(f64::from(age_years), &SAVE_AGE, SAVE_AGE_OTHERWISE)),
        ScoreComponent::new("Weight", below(weight_kg, &SAVE_WEIGHT, SAVE_WEIGHT_OTHERWISE)),
        ScoreComponent::new(
            "Pre-ECMO cardiac arrest",
            if observations.pre_ecmo_cardiac_arrest {
                SAVE_CARDIAC_ARREST
            } else {
                0
            },
        ),
        ScoreComponent::new("Acute etiology", observations.acute_etiology.save_points()),
        ScoreComponent::new(
            "Intubation duration",
            below(
                observations.intubation_hours,
                &SAVE_INTUBATION,
                SAVE_INTUBATION_OTHERWISE,
            ),
        ),
        ScoreComponent::new(
            "Diastolic BP",
            below(
                observations.diastolic_bp,
                &SAVE_DIASTOLIC,
                SAVE_DIASTOLIC_OTHERWISE,
            ),
        ),
    ];
    let raw_score = components.iter().map(|c| c.points).sum();
    let (risk_tier, survival) = save_tier(raw_score);
    RiskScoreResult {
        kind: RiskScoreKind::Save,
        raw_score,
        risk_tier,
        survival_estimate: survival.to_string(),
        components,
    }
}

/// SAVE risk tier and survival band for a total.
pub fn save_tier(score: i32) -> (RiskTier, &'static str) {
    at_most(f64::from(score), &SAVE_TIERS, SAVE_TIER_OTHERWISE)
}

/// RESP score (veno-venous).
pub fn resp_score(age_years: u32, pao2_fio2: f64, observations: &RespObservations) -> RiskScoreResult {
    let components = vec![
        ScoreComponent::new("Age", below(f64::from(age_years), &RESP_AGE, RESP_AGE_OTHERWISE)),
        ScoreComponent::new(
            "Immunocompromised",
            if observations.immunocompromised {
                RESP_IMMUNOCOMPROMISED
            } else {
                0
            },
        ),
        ScoreComponent::new(
            "Mechanical ventilation",
            below(
                observations.ventilation_hours,
                &RESP_VENTILATION,
                RESP_VENTILATION_OTHERWISE,
            ),
        ),
        ScoreComponent::new(
            "PaO2/FiO2",
            at_least(pao2_fio2, &RESP_PF_RATIO, RESP_PF_RATIO_OTHERWISE),
        ),
        ScoreComponent::new("pH", at_least(observations.ph, &RESP_PH, RESP_PH_OTHERWISE)),
        ScoreComponent::new("PEEP", at_least(observations.peep, &RESP_PEEP, 0)),
        ScoreComponent::new(
            "Plateau pressure",
            at_least(observations.plateau_pressure, &RESP_PLATEAU, 0),
        ),
        ScoreComponent::new("Acute diagnosis", observations.acute_diagnosis.resp_points()),
        ScoreComponent::new(
            "CNS dysfunction",
            if observations.cns_dysfunction {
                RESP_CNS_DYSFUNCTION
            } else {
                0
            },
        ),
    ];
    let raw_score = components.iter().map(|c| c.points).sum();
    let (risk_tier, survival) = resp_tier(raw_score);
    RiskScoreResult {
        kind: RiskScoreKind::Resp,
        raw_score,
        risk_tier,
        survival_estimate: survival.to_string(),
        components,
    }
}

/// RESP risk tier and survival band for a total.
pub fn resp_tier(score: i32) -> (RiskTier, &'static str) {
    at_least(f64::from(score), &RESP_TIERS, RESP_TIER_OTHERWISE)
}
