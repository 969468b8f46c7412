pub mod assessment;
pub mod checklist;
pub mod criteria;
pub mod enums;
pub mod error;
pub mod observations;
pub mod options;
pub mod patient;
pub mod results;

pub use assessment::{Assessment, AssessmentRequest, StageSkip};
pub use checklist::{
    Anticoagulation, ChecklistSection, CircuitReadiness, ComplicationPlans, EmergencyEquipment,
    MonitoringReadiness, PatientVerification, SafetyChecks, SitePlanning, TeamPresence,
    TimeoutChecklist,
};
pub use criteria::{CriteriaFlags, EcprInputs};
pub use enums::{
    AcuteEtiology, AnticoagulationPlan, EcmoMode, RespDiagnosis, Sex, VasopressorSupport,
};
pub use error::{EcmoError, Result};
pub use observations::{ClinicalObservations, ModeObservations, RespObservations, SaveObservations};
pub use options::{EngineConfig, RpmRange, TargetCardiacIndex, TimeoutPolicy};
pub use patient::{Anthropometrics, PatientProfile};
pub use results::{
    CandidacyCriterion, CandidacyDecision, CandidacyReason, CandidacyTier, CannulaRecommendation,
    CannulationSite, CriteriaResult, CriterionCheck, InitiationPlan, Judgment, OrganScoreResult,
    RiskScoreKind, RiskScoreResult, RiskTier, ScoreComponent, SectionTally, TimeoutResult,
    TimeoutStatus,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_max_score_counts_steps() {
        let decision = CandidacyDecision {
            score: 5,
            tier: CandidacyTier::Recommended,
            reasons: vec![
                CandidacyReason {
                    criterion: CandidacyCriterion::RiskScore,
                    judgment: Judgment::Favorable,
                    points: 2,
                    summary: "Good SAVE score (low risk)".to_string(),
                },
                CandidacyReason {
                    criterion: CandidacyCriterion::Ecpr,
                    judgment: Judgment::Unfavorable,
                    points: -1,
                    summary: "Few ECPR criteria met".to_string(),
                },
            ],
        };
        assert_eq!(decision.max_score(), 3);
    }

    #[test]
    fn request_serializes() {
        let request = AssessmentRequest {
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
            criteria: CriteriaFlags::default(),
            ecpr: None,
            checklist: None,
            clinical_notes: None,
        };
        let json = serde_json::to_string(&request).expect("serialize request");
        assert!(json.contains("\"ecmo_mode\":\"VA\""));
        assert!(json.contains("\"acute_etiology\":\"Acute MI\""));
        let round: AssessmentRequest = serde_json::from_str(&json).expect("deserialize request");
        assert_eq!(round, request);
    }
}
