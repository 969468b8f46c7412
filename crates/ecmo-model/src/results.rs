//! Result records produced by each engine stage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::options::RpmRange;

/// Points awarded by one sub-score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    pub points: i32,
}

impl ScoreComponent {
    pub fn new(name: impl Into<String>, points: i32) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }
}

/// Which published survival score was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskScoreKind {
    /// Survival After Veno-arterial ECMO.
    #[serde(rename = "SAVE")]
    Save,
    /// Respiratory ECMO Survival Prediction.
    #[serde(rename = "RESP")]
    Resp,
}

impl RiskScoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskScoreKind::Save => "SAVE",
            RiskScoreKind::Resp => "RESP",
        }
    }
}

impl fmt::Display for RiskScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk class, ordered from lowest to highest risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::VeryLow => "Very Low Risk",
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
            RiskTier::VeryHigh => "Very High Risk",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScoreResult {
    pub kind: RiskScoreKind,
    pub raw_score: i32,
    pub risk_tier: RiskTier,
    /// Published survival band, e.g. `"~75%"`.
    pub survival_estimate: String,
    pub components: Vec<ScoreComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganScoreResult {
    /// SOFA total, 0-24.
    pub sofa_total: u8,
    /// Mortality band, e.g. `"~10%"`.
    pub mortality_band: String,
    pub components: Vec<ScoreComponent>,
}

/// One evaluated yes/no criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionCheck {
    pub name: String,
    pub met: bool,
}

impl CriterionCheck {
    pub fn new(name: impl Into<String>, met: bool) -> Self {
        Self {
            name: name.into(),
            met,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaResult {
    /// Inclusion criteria met, 0-6.
    pub inclusion_met: u8,
    /// Exclusion criteria present, 0-6.
    pub exclusion_count: u8,
    /// ECPR criteria met, 0-5. `None` when the case is not an ECPR case.
    pub ecpr_criteria_met: Option<u8>,
    pub inclusion: Vec<CriterionCheck>,
    pub exclusion: Vec<CriterionCheck>,
    pub ecpr: Vec<CriterionCheck>,
}

impl CriteriaResult {
    pub fn ecpr_applicable(&self) -> bool {
        self.ecpr_criteria_met.is_some()
    }

    /// Summary wording for the inclusion count.
    pub fn inclusion_assessment(&self) -> &'static str {
        if self.inclusion_met >= 4 {
            "Appropriate"
        } else {
            "Limited"
        }
    }

    /// Summary wording for the exclusion count.
    pub fn exclusion_assessment(&self) -> &'static str {
        if self.exclusion_count <= 1 {
            "Acceptable"
        } else {
            "Concerning"
        }
    }
}

/// How a candidacy step judged its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgment {
    Favorable,
    Borderline,
    Unfavorable,
}

impl Judgment {
    pub fn symbol(&self) -> &'static str {
        match self {
            Judgment::Favorable => "✅",
            Judgment::Borderline => "⚠️",
            Judgment::Unfavorable => "❌",
        }
    }
}

/// The input a candidacy step scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidacyCriterion {
    RiskScore,
    Sofa,
    Ecpr,
    Inclusion,
    Exclusion,
}

impl CandidacyCriterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidacyCriterion::RiskScore => "Risk score",
            CandidacyCriterion::Sofa => "SOFA score",
            CandidacyCriterion::Ecpr => "ECPR criteria",
            CandidacyCriterion::Inclusion => "Inclusion criteria",
            CandidacyCriterion::Exclusion => "Exclusion criteria",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidacyReason {
    pub criterion: CandidacyCriterion,
    pub judgment: Judgment,
    pub points: i32,
    pub summary: String,
}

/// Final recommendation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CandidacyTier {
    NotRecommended,
    Consider,
    Recommended,
}

impl CandidacyTier {
    /// Fixed cutoffs: 4 and above recommends, 1 and above considers.
    pub fn from_score(score: i32) -> Self {
        if score >= 4 {
            CandidacyTier::Recommended
        } else if score >= 1 {
            CandidacyTier::Consider
        } else {
            CandidacyTier::NotRecommended
        }
    }

    /// Both `Recommended` and `Consider` open the timeout stage.
    pub fn is_candidate(&self) -> bool {
        matches!(self, CandidacyTier::Recommended | CandidacyTier::Consider)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidacyTier::Recommended => "RECOMMENDED for ECMO",
            CandidacyTier::Consider => "CONSIDER ECMO (case-by-case)",
            CandidacyTier::NotRecommended => "NOT RECOMMENDED for ECMO",
        }
    }
}

impl fmt::Display for CandidacyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidacyDecision {
    pub score: i32,
    pub tier: CandidacyTier,
    /// Reasons in evaluation order.
    pub reasons: Vec<CandidacyReason>,
}

impl CandidacyDecision {
    /// Best achievable score for the steps that ran.
    pub fn max_score(&self) -> i32 {
        self.reasons
            .iter()
            .map(|reason| match reason.criterion {
                CandidacyCriterion::Ecpr => 1,
                _ => 2,
            })
            .sum()
    }
}

/// Outcome of the timeout gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeoutStatus {
    Proceed,
    ProceedWithCaution,
    DoNotProceed,
}

impl TimeoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeoutStatus::Proceed => "PROCEED WITH CANNULATION",
            TimeoutStatus::ProceedWithCaution => "PROCEED WITH CAUTION",
            TimeoutStatus::DoNotProceed => "DO NOT PROCEED",
        }
    }
}

impl fmt::Display for TimeoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTally {
    pub label: String,
    pub checked: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutResult {
    pub checks_passed: u32,
    pub checks_total: u32,
    pub passed: bool,
    pub status: TimeoutStatus,
    pub completion_percent: f64,
    pub sections: Vec<SectionTally>,
    /// One line per incomplete section.
    pub missing_items: Vec<String>,
    /// Unscored reminders, e.g. a low baseline ACT.
    pub advisories: Vec<String>,
}

/// Vessel used for a cannula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CannulationSite {
    FemoralVein,
    InternalJugularVein,
    FemoralArtery,
}

impl CannulationSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            CannulationSite::FemoralVein => "Femoral vein",
            CannulationSite::InternalJugularVein => "Internal jugular vein",
            CannulationSite::FemoralArtery => "Femoral artery",
        }
    }
}

impl fmt::Display for CannulationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CannulaRecommendation {
    pub drainage_size: String,
    pub return_size: String,
    /// Rated capacity of the drainage cannula, L/min.
    pub drainage_max_flow: f64,
    /// Rated capacity of the return cannula, L/min.
    pub return_max_flow: f64,
    /// Target blood flow, L/min.
    pub target_flow: f64,
    /// Target flow with the safety margin applied, L/min.
    pub required_flow: f64,
    pub drainage_site: CannulationSite,
    pub return_site: CannulationSite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiationPlan {
    /// Du Bois BSA, m².
    pub bsa: f64,
    /// Target cardiac index, L/min/m².
    pub target_ci: f64,
    /// Target blood flow, L/min.
    pub target_flow: f64,
    pub cannulas: CannulaRecommendation,
    /// Cardiac index the drainage cannula can deliver.
    pub delivered_ci: f64,
    /// Part of the target covered by the circuit.
    pub ci_met: f64,
    /// Delivered capacity above the target.
    pub ci_excess: f64,
    pub initial_rpm: RpmRange,
    pub pre_cannulation: Vec<String>,
    pub post_cannulation: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_cutoffs() {
        assert_eq!(CandidacyTier::from_score(4), CandidacyTier::Recommended);
        assert_eq!(CandidacyTier::from_score(3), CandidacyTier::Consider);
        assert_eq!(CandidacyTier::from_score(1), CandidacyTier::Consider);
        assert_eq!(CandidacyTier::from_score(0), CandidacyTier::NotRecommended);
        assert_eq!(CandidacyTier::from_score(-7), CandidacyTier::NotRecommended);
    }

    #[test]
    fn test_risk_tier_order() {
        assert!(RiskTier::VeryLow < RiskTier::Low);
        assert!(RiskTier::High < RiskTier::VeryHigh);
    }

    #[test]
    fn test_criteria_assessment_wording() {
        let result = CriteriaResult {
            inclusion_met: 4,
            exclusion_count: 2,
            ecpr_criteria_met: None,
            inclusion: vec![],
            exclusion: vec![],
            ecpr: vec![],
        };
        assert_eq!(result.inclusion_assessment(), "Appropriate");
        assert_eq!(result.exclusion_assessment(), "Concerning");
        assert!(!result.ecpr_applicable());
    }
}
