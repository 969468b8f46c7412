//! Candidacy aggregation.
//!
//! Each step judges one earlier result, adds its points and appends a
//! reason. Reasons keep evaluation order: mode score, SOFA, ECPR when
//! applicable, inclusion, exclusion.

use ecmo_model::{
    CandidacyCriterion, CandidacyDecision, CandidacyReason, CandidacyTier, CriteriaResult,
    Judgment, OrganScoreResult, RiskScoreKind, RiskScoreResult,
};
use tracing::{debug, info};

/// Minimum ECPR criteria for the ECPR step to count in favor.
const ECPR_FAVORABLE: u8 = 4;

/// Combines the risk score, SOFA and criteria into a recommendation.
pub fn aggregate_candidacy(
    risk: &RiskScoreResult,
    sofa: &OrganScoreResult,
    criteria: &CriteriaResult,
) -> CandidacyDecision {
    let mut reasons = vec![risk_reason(risk), sofa_reason(sofa.sofa_total)];
    if let Some(met) = criteria.ecpr_criteria_met {
        reasons.push(ecpr_reason(met));
    }
    reasons.push(inclusion_reason(criteria.inclusion_met));
    reasons.push(exclusion_reason(criteria.exclusion_count));

    let score = reasons.iter().map(|reason| reason.points).sum();
    let tier = CandidacyTier::from_score(score);
    for reason in &reasons {
        debug!(
            criterion = reason.criterion.as_str(),
            points = reason.points,
            "{}",
            reason.summary
        );
    }
    info!(score, tier = %tier, "candidacy decided");
    CandidacyDecision {
        score,
        tier,
        reasons,
    }
}

fn reason(
    criterion: CandidacyCriterion,
    judgment: Judgment,
    points: i32,
    summary: impl Into<String>,
) -> CandidacyReason {
    CandidacyReason {
        criterion,
        judgment,
        points,
        summary: summary.into(),
    }
}

fn risk_reason(risk: &RiskScoreResult) -> CandidacyReason {
    let (favorable, borderline) = match risk.kind {
        RiskScoreKind::Save => (5, -1),
        RiskScoreKind::Resp => (3, 0),
    };
    let kind = risk.kind.as_str();
    let criterion = CandidacyCriterion::RiskScore;
    if risk.raw_score >= favorable {
        reason(criterion, Judgment::Favorable, 2, format!("Good {kind} score (low risk)"))
    } else if risk.raw_score >= borderline {
        reason(criterion, Judgment::Borderline, 1, format!("Moderate {kind} score"))
    } else {
        reason(criterion, Judgment::Unfavorable, -1, format!("Poor {kind} score (high risk)"))
    }
}

fn sofa_reason(sofa_total: u8) -> CandidacyReason {
    let criterion = CandidacyCriterion::Sofa;
    match sofa_total {
        0..=9 => reason(criterion, Judgment::Favorable, 2, "Acceptable SOFA score"),
        10..=12 => reason(criterion, Judgment::Borderline, 1, "Elevated SOFA score"),
        _ => reason(criterion, Judgment::Unfavorable, -1, "High SOFA score"),
    }
}

fn ecpr_reason(met: u8) -> CandidacyReason {
    let criterion = CandidacyCriterion::Ecpr;
    if met >= ECPR_FAVORABLE {
        reason(criterion, Judgment::Favorable, 1, format!("ECPR criteria met ({met}/5)"))
    } else {
        reason(
            criterion,
            Judgment::Unfavorable,
            -1,
            format!("Insufficient ECPR criteria ({met}/5)"),
        )
    }
}

fn inclusion_reason(met: u8) -> CandidacyReason {
    let criterion = CandidacyCriterion::Inclusion;
    match met {
        5.. => reason(criterion, Judgment::Favorable, 2, "Most inclusion criteria met"),
        3..=4 => reason(criterion, Judgment::Borderline, 1, "Some inclusion criteria met"),
        _ => reason(criterion, Judgment::Unfavorable, -2, "Few inclusion criteria met"),
    }
}

fn exclusion_reason(count: u8) -> CandidacyReason {
    let criterion = CandidacyCriterion::Exclusion;
    match count {
        0 => reason(criterion, Judgment::Favorable, 2, "No exclusion criteria"),
        1 => reason(criterion, Judgment::Borderline, 0, "Minor exclusion criteria"),
        _ => reason(criterion, Judgment::Unfavorable, -2, "Multiple exclusion criteria"),
    }
}
