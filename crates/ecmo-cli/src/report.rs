//! Plain-text SOAP note for the chart.

use chrono::NaiveDateTime;
use ecmo_model::{Assessment, AssessmentRequest};

use crate::logging::REDACTED_VALUE;

/// Renders the assessment as a Subjective/Objective/Assessment/Plan note.
///
/// The patient name is replaced by [`REDACTED_VALUE`] unless `show_name`
/// is set.
pub fn render_soap_note(
    request: &AssessmentRequest,
    assessment: &Assessment,
    generated_at: NaiveDateTime,
    show_name: bool,
) -> String {
    let patient = &request.patient;
    let name = match patient.name.as_deref() {
        Some(name) if show_name => name,
        Some(_) => REDACTED_VALUE,
        None => "Unknown",
    };
    let risk = &assessment.risk;
    let sofa = &assessment.sofa;
    let candidacy = &assessment.candidacy;

    let mut lines = vec![
        "ECMO Assessment Note".to_string(),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M")),
        String::new(),
        "Subjective:".to_string(),
        format!("Patient: {name}"),
        format!("Age: {} years, Sex: {}", patient.age_years, patient.sex),
        format!(
            "Weight: {} kg, Height: {} cm, BMI: {:.1}",
            patient.weight_kg, patient.height_cm, assessment.anthropometrics.bmi
        ),
        format!(
            "ECMO Mode: {} ({})",
            patient.ecmo_mode,
            patient.ecmo_mode.description()
        ),
        String::new(),
        "Objective:".to_string(),
        format!(
            "{} Score: {} ({}, {} predicted survival)",
            risk.kind, risk.raw_score, risk.risk_tier, risk.survival_estimate
        ),
        format!(
            "SOFA Score: {} ({} predicted mortality)",
            sofa.sofa_total, sofa.mortality_band
        ),
        format!(
            "ECMO Candidacy Score: {}/{}",
            candidacy.score,
            candidacy.max_score()
        ),
        String::new(),
        "Assessment:".to_string(),
        candidacy.tier.to_string(),
    ];
    lines.extend(
        candidacy
            .reasons
            .iter()
            .map(|reason| format!("{} {}", reason.judgment.symbol(), reason.summary)),
    );
    lines.push(String::new());
    lines.push("Plan:".to_string());

    if candidacy.tier.is_candidate() {
        lines.push("ECMO Initiation Recommended:".to_string());
        if let Some(timeout) = &assessment.timeout {
            lines.push(format!(
                "• Pre-Cannulation Timeout: {:.1}% completion ({})",
                timeout.completion_percent, timeout.status
            ));
            lines.extend(timeout.advisories.iter().map(|line| format!("• {line}")));
        }
        if let Some(stopped) = assessment.stopped {
            lines.push(format!("• Initiation on hold: {}", stopped.as_str()));
        }
        if let Some(plan) = &assessment.initiation {
            let cannulas = &plan.cannulas;
            lines.push(format!("• BSA: {:.2} m²", plan.bsa));
            lines.push(format!("• Target CI: {:.1} L/min/m²", plan.target_ci));
            lines.push(format!("• Target Flow: {:.1} L/min", plan.target_flow));
            lines.push(format!(
                "• Drainage Cannula: {} ({})",
                cannulas.drainage_size, cannulas.drainage_site
            ));
            lines.push(format!(
                "• Return Cannula: {} ({})",
                cannulas.return_size, cannulas.return_site
            ));
            lines.push(format!(
                "• Initial RPM: {}-{}",
                plan.initial_rpm.low, plan.initial_rpm.high
            ));
        }
    } else {
        lines.push("ECMO Not Recommended:".to_string());
        lines.extend(assessment.alternatives.iter().map(|line| format!("• {line}")));
    }

    lines.push(String::new());
    let notes = request
        .clinical_notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty());
    lines.push(notes.unwrap_or("No additional notes provided.").to_string());
    lines.join("\n")
}
