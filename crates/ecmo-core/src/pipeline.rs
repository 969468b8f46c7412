//! Gated assessment pipeline.
//!
//! The stages run in order, each gating the next:
//! 1. **Candidacy**: anthropometrics, risk score, SOFA, criteria, decision
//! 2. **Timeout**: only for candidates with a completed checklist
//! 3. **Initiation**: only when the timeout passed
//!
//! A stage that does not run is reported as `None` together with the
//! reason the pipeline stopped.

use std::time::Instant;

use ecmo_model::{
    Assessment, AssessmentRequest, CandidacyDecision, CriteriaResult, EngineConfig,
    OrganScoreResult, Result, RiskScoreResult, StageSkip,
};
use tracing::{info, info_span, warn};

use crate::anthropometrics::anthropometrics_for;
use crate::candidacy::aggregate_candidacy;
use crate::criteria::evaluate_criteria;
use crate::initiation::plan_initiation;
use crate::risk::compute_risk_score;
use crate::sofa::compute_sofa;
use crate::timeout::evaluate_timeout;

/// Offered when ECMO is not recommended.
pub const ALTERNATIVE_CONSIDERATIONS: [&str; 3] = [
    "Continue conventional therapy",
    "Consider palliative care consultation",
    "Reassess if clinical condition changes",
];

// ============================================================================
// Stage 1: Candidacy
// ============================================================================

/// Output of the candidacy stage.
#[derive(Debug, Clone)]
pub struct CandidacyOutcome {
    pub risk: RiskScoreResult,
    pub sofa: OrganScoreResult,
    pub criteria: CriteriaResult,
    pub decision: CandidacyDecision,
}

/// Scores the patient and decides candidacy.
pub fn run_candidacy(request: &AssessmentRequest) -> Result<CandidacyOutcome> {
    let risk = compute_risk_score(&request.patient, &request.observations)?;
    let sofa = compute_sofa(&request.observations);
    let criteria = evaluate_criteria(&request.patient, &request.criteria, request.ecpr.as_ref());
    let decision = aggregate_candidacy(&risk, &sofa, &criteria);
    Ok(CandidacyOutcome {
        risk,
        sofa,
        criteria,
        decision,
    })
}

// ============================================================================
// Full pipeline
// ============================================================================

/// Runs every stage the inputs allow.
///
/// Fails on invalid configuration, invalid inputs, or observations recorded
/// for the other ECMO mode. Gated-off stages are not errors.
pub fn assess(request: &AssessmentRequest, config: &EngineConfig) -> Result<Assessment> {
    config.validate()?;
    request.validate()?;
    let start = Instant::now();
    let anthropometrics = anthropometrics_for(&request.patient);

    let candidacy_span = info_span!("candidacy", mode = %request.patient.ecmo_mode);
    let CandidacyOutcome {
        risk,
        sofa,
        criteria,
        decision,
    } = candidacy_span.in_scope(|| run_candidacy(request))?;

    let mut assessment = Assessment {
        anthropometrics,
        risk,
        sofa,
        criteria,
        candidacy: decision,
        timeout: None,
        initiation: None,
        stopped: None,
        alternatives: Vec::new(),
    };

    if !assessment.candidacy.tier.is_candidate() {
        warn!(
            score = assessment.candidacy.score,
            "not a candidate, skipping timeout and initiation"
        );
        assessment.stopped = Some(StageSkip::NotCandidate);
        assessment.alternatives = ALTERNATIVE_CONSIDERATIONS
            .iter()
            .map(ToString::to_string)
            .collect();
        return Ok(assessment);
    }

    let Some(checklist) = &request.checklist else {
        warn!("no timeout checklist supplied, skipping initiation");
        assessment.stopped = Some(StageSkip::ChecklistMissing);
        return Ok(assessment);
    };
    let timeout_span = info_span!("timeout");
    let timeout = timeout_span.in_scope(|| evaluate_timeout(checklist, config.timeout_policy));
    let passed = timeout.passed;
    assessment.timeout = Some(timeout);
    if !passed {
        warn!("timeout not passed, skipping initiation");
        assessment.stopped = Some(StageSkip::TimeoutFailed);
        return Ok(assessment);
    }

    let initiation_span = info_span!("initiation");
    let plan = initiation_span.in_scope(|| plan_initiation(&request.patient, config))?;
    assessment.initiation = Some(plan);
    info!(
        duration_us = start.elapsed().as_micros(),
        "assessment complete"
    );
    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecmo_model::{
        AcuteEtiology, ClinicalObservations, CriteriaFlags, EcmoError, EcmoMode, ModeObservations,
        PatientProfile, RespDiagnosis, RespObservations, SaveObservations, Sex, TimeoutChecklist,
        VasopressorSupport,
    };

    fn va_request() -> AssessmentRequest {
        AssessmentRequest {
            patient: PatientProfile::new(40, Sex::Male, 70.0, 170.0, EcmoMode::VenoArterial)
                .expect("valid profile"),
            observations: ClinicalObservations {
                pao2_fio2: 300.0,
                platelets: 150.0,
                bilirubin: 1.0,
                mean_arterial_pressure: 70.0,
                vasopressor: VasopressorSupport::None,
                glasgow_coma_scale: 15.0,
                creatinine: 1.0,
                urine_output: 500.0,
                mode: ModeObservations::VenoArterial(SaveObservations {
                    pre_ecmo_cardiac_arrest: false,
                    acute_etiology: AcuteEtiology::AcuteMyocardialInfarction,
                    intubation_hours: 5.0,
                    diastolic_bp: 80.0,
                }),
            },
            criteria: CriteriaFlags {
                reversible_condition: true,
                no_absolute_contraindications: true,
                informed_consent: true,
                conventional_therapy_failed: true,
                ..CriteriaFlags::default()
            },
            ecpr: None,
            checklist: Some(TimeoutChecklist::all_checked()),
            clinical_notes: None,
        }
    }

    #[test]
    fn candidate_with_checklist_reaches_initiation() {
        let assessment = assess(&va_request(), &EngineConfig::default()).expect("assessment");
        assert_eq!(assessment.risk.raw_score, 14);
        assert_eq!(assessment.sofa.sofa_total, 1);
        assert!(assessment.candidacy.tier.is_candidate());
        assert!(assessment.timeout.as_ref().is_some_and(|t| t.passed));
        assert!(assessment.ready_to_initiate());
        assert_eq!(assessment.stopped, None);
        assert!(assessment.alternatives.is_empty());
    }

    #[test]
    fn missing_checklist_stops_before_timeout() {
        let request = AssessmentRequest {
            checklist: None,
            ..va_request()
        };
        let assessment = assess(&request, &EngineConfig::default()).expect("assessment");
        assert_eq!(assessment.stopped, Some(StageSkip::ChecklistMissing));
        assert!(assessment.timeout.is_none());
        assert!(assessment.initiation.is_none());
    }

    #[test]
    fn failed_timeout_stops_before_initiation() {
        let request = AssessmentRequest {
            checklist: Some(TimeoutChecklist::default()),
            ..va_request()
        };
        let assessment = assess(&request, &EngineConfig::default()).expect("assessment");
        assert_eq!(assessment.stopped, Some(StageSkip::TimeoutFailed));
        assert!(assessment.timeout.is_some());
        assert!(assessment.initiation.is_none());
    }

    #[test]
    fn non_candidate_gets_alternatives() {
        let mut request = va_request();
        request.criteria = CriteriaFlags {
            irreversible_brain_damage: true,
            terminal_illness: true,
            ..CriteriaFlags::default()
        };
        request.observations.platelets = 10.0;
        request.observations.bilirubin = 13.0;
        request.observations.glasgow_coma_scale = 3.0;
        request.observations.vasopressor = VasopressorSupport::MaximalDose;
        let assessment = assess(&request, &EngineConfig::default()).expect("assessment");
        assert!(!assessment.candidacy.tier.is_candidate());
        assert_eq!(assessment.stopped, Some(StageSkip::NotCandidate));
        assert_eq!(assessment.alternatives.len(), 3);
        assert!(assessment.timeout.is_none());
    }

    #[test]
    fn mode_mismatch_is_an_error() {
        let mut request = va_request();
        request.observations.mode = ModeObservations::VenoVenous(RespObservations {
            immunocompromised: false,
            ventilation_hours: 24.0,
            ph: 7.3,
            peep: 8.0,
            plateau_pressure: 25.0,
            acute_diagnosis: RespDiagnosis::ViralPneumonia,
            cns_dysfunction: false,
        });
        let err = assess(&request, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EcmoError::ModeMismatch { .. }));
    }

    #[test]
    fn invalid_patient_is_rejected() {
        let mut request = va_request();
        request.patient.age_years = 130;
        let err = assess(&request, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EcmoError::Validation { field: "age", .. }));
    }
}
