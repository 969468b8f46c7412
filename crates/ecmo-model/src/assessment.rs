//! Request and response records for a full assessment.

use serde::{Deserialize, Serialize};

use crate::checklist::TimeoutChecklist;
use crate::criteria::{CriteriaFlags, EcprInputs};
use crate::error::Result;
use crate::observations::ClinicalObservations;
use crate::patient::{Anthropometrics, PatientProfile};
use crate::results::{
    CandidacyDecision, CriteriaResult, InitiationPlan, OrganScoreResult, RiskScoreResult,
    TimeoutResult,
};

/// Everything the engine needs to assess one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub patient: PatientProfile,
    pub observations: ClinicalObservations,
    #[serde(default)]
    pub criteria: CriteriaFlags,
    /// Present only for extracorporeal CPR cases.
    #[serde(default)]
    pub ecpr: Option<EcprInputs>,
    /// Timeout checklist, if the team has run it.
    #[serde(default)]
    pub checklist: Option<TimeoutChecklist>,
    #[serde(default)]
    pub clinical_notes: Option<String>,
}

impl AssessmentRequest {
    pub fn validate(&self) -> Result<()> {
        self.patient.validate()?;
        self.observations.validate()?;
        if let Some(ecpr) = &self.ecpr {
            ecpr.validate()?;
        }
        Ok(())
    }
}

/// Why a later stage did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageSkip {
    /// Candidacy tier was `NotRecommended`.
    NotCandidate,
    /// No checklist was supplied.
    ChecklistMissing,
    /// The timeout did not reach its pass threshold.
    TimeoutFailed,
}

impl StageSkip {
    pub fn as_str(&self) -> &'static str {
        match self {
            StageSkip::NotCandidate => "patient is not an ECMO candidate",
            StageSkip::ChecklistMissing => "pre-cannulation timeout not performed",
            StageSkip::TimeoutFailed => "pre-cannulation timeout not passed",
        }
    }
}

/// Result of the gated pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub anthropometrics: Anthropometrics,
    pub risk: RiskScoreResult,
    pub sofa: OrganScoreResult,
    pub criteria: CriteriaResult,
    pub candidacy: CandidacyDecision,
    pub timeout: Option<TimeoutResult>,
    pub initiation: Option<InitiationPlan>,
    /// Set when the pipeline stopped before initiation.
    pub stopped: Option<StageSkip>,
    /// Suggestions offered when ECMO is not recommended.
    pub alternatives: Vec<String>,
}

impl Assessment {
    /// True when initiation settings were produced.
    pub fn ready_to_initiate(&self) -> bool {
        self.initiation.is_some()
    }
}
