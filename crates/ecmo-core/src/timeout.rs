//! Pre-cannulation timeout scoring.

use ecmo_model::{
    Anticoagulation, AnticoagulationPlan, SectionTally, TimeoutChecklist, TimeoutPolicy,
    TimeoutResult, TimeoutStatus,
};
use tracing::{debug, info, warn};

/// Baseline ACT at or below this needs anticoagulation before cannulation.
pub const TARGET_ACT_SECONDS: f64 = 180.0;

/// Scores the checklist against the configured pass policy.
pub fn evaluate_timeout(checklist: &TimeoutChecklist, policy: TimeoutPolicy) -> TimeoutResult {
    let mut sections = Vec::new();
    let mut missing_items = Vec::new();
    for section in checklist.sections() {
        let (checked, total) = (section.checked(), section.total());
        debug!(section = section.label(), checked, total, "timeout section");
        if !section.is_complete() {
            missing_items.push(section.missing_message().to_string());
        }
        sections.push(SectionTally {
            label: section.label().to_string(),
            checked,
            total,
        });
    }
    let checks_passed: u32 = sections.iter().map(|s| s.checked).sum();
    let checks_total: u32 = sections.iter().map(|s| s.total).sum();
    let completion_percent = if checks_total == 0 {
        0.0
    } else {
        f64::from(checks_passed) * 100.0 / f64::from(checks_total)
    };

    // Integer comparison keeps exact thresholds exact.
    let reaches = |percent: u32| {
        u64::from(checks_passed) * 100 >= u64::from(percent) * u64::from(checks_total)
    };
    let status = match policy {
        TimeoutPolicy::Single { pass_percent } => {
            if reaches(pass_percent) {
                TimeoutStatus::Proceed
            } else {
                TimeoutStatus::DoNotProceed
            }
        }
        TimeoutPolicy::Tiered {
            proceed_percent,
            caution_percent,
        } => {
            if reaches(proceed_percent) {
                TimeoutStatus::Proceed
            } else if reaches(caution_percent) {
                TimeoutStatus::ProceedWithCaution
            } else {
                TimeoutStatus::DoNotProceed
            }
        }
    };
    let passed = status != TimeoutStatus::DoNotProceed;
    let advisories = anticoagulation_advisories(&checklist.anticoagulation);

    if passed {
        info!(checks_passed, checks_total, status = %status, "timeout passed");
    } else {
        warn!(
            checks_passed,
            checks_total,
            missing = missing_items.len(),
            "timeout not passed"
        );
    }
    TimeoutResult {
        checks_passed,
        checks_total,
        passed,
        status,
        completion_percent,
        sections,
        missing_items,
        advisories,
    }
}

fn anticoagulation_advisories(anticoagulation: &Anticoagulation) -> Vec<String> {
    let mut advisories = Vec::new();
    if !anticoagulation.heparin_available {
        advisories.push("Heparin not confirmed available".to_string());
    }
    if anticoagulation.plan == AnticoagulationPlan::None {
        advisories.push("No anticoagulation plan selected".to_string());
    }
    if let Some(act) = anticoagulation.baseline_act_seconds
        && act <= TARGET_ACT_SECONDS
    {
        advisories.push(format!(
            "Baseline ACT {act:.0} s: confirm anticoagulation reaches ACT > 180 s before cannulation"
        ));
    }
    advisories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_unchecked(count: usize) -> TimeoutChecklist {
        let mut checklist = TimeoutChecklist::all_checked();
        let mut flags = [
            &mut checklist.team.surgeon,
            &mut checklist.team.anesthesiologist,
            &mut checklist.patient.allergies_confirmed,
            &mut checklist.circuit.pump_tested,
            &mut checklist.monitoring.cvp_line,
            &mut checklist.emergency.backup_equipment,
            &mut checklist.site.site_marked,
            &mut checklist.safety.imaging_reviewed,
            &mut checklist.complications.weaning,
            &mut checklist.complications.recirculation,
        ];
        for flag in flags.iter_mut().take(count) {
            **flag = false;
        }
        checklist
    }

    #[test]
    fn full_checklist_proceeds() {
        let result = evaluate_timeout(&TimeoutChecklist::all_checked(), TimeoutPolicy::default());
        assert_eq!(result.checks_passed, 33);
        assert_eq!(result.checks_total, 33);
        assert!(result.passed);
        assert_eq!(result.status, TimeoutStatus::Proceed);
        assert!(result.missing_items.is_empty());
        assert_eq!(result.sections.len(), 8);
    }

    #[test]
    fn single_policy_threshold() {
        // 27/33 = 81.8%, 26/33 = 78.8%.
        let policy = TimeoutPolicy::default();
        assert!(evaluate_timeout(&with_unchecked(6), policy).passed);
        let failed = evaluate_timeout(&with_unchecked(7), policy);
        assert!(!failed.passed);
        assert_eq!(failed.status, TimeoutStatus::DoNotProceed);
    }

    #[test]
    fn tiered_policy_bands() {
        // 30/33 = 90.9%, 29/33 = 87.9%, 25/33 = 75.8%, 24/33 = 72.7%.
        let policy = TimeoutPolicy::tiered();
        assert_eq!(evaluate_timeout(&with_unchecked(3), policy).status, TimeoutStatus::Proceed);
        assert_eq!(
            evaluate_timeout(&with_unchecked(4), policy).status,
            TimeoutStatus::ProceedWithCaution
        );
        let caution = evaluate_timeout(&with_unchecked(8), policy);
        assert_eq!(caution.status, TimeoutStatus::ProceedWithCaution);
        assert!(caution.passed);
        let stop = evaluate_timeout(&with_unchecked(9), policy);
        assert_eq!(stop.status, TimeoutStatus::DoNotProceed);
        assert!(!stop.passed);
    }

    #[test]
    fn exact_percentage_passes() {
        let policy = TimeoutPolicy::Single { pass_percent: 100 };
        assert!(evaluate_timeout(&TimeoutChecklist::all_checked(), policy).passed);
        assert!(!evaluate_timeout(&with_unchecked(1), policy).passed);
    }

    #[test]
    fn missing_items_name_incomplete_sections() {
        let result = evaluate_timeout(&with_unchecked(2), TimeoutPolicy::default());
        assert_eq!(result.missing_items, vec!["Team members not present".to_string()]);
        let empty = evaluate_timeout(&TimeoutChecklist::default(), TimeoutPolicy::default());
        assert_eq!(empty.checks_passed, 0);
        assert_eq!(empty.missing_items.len(), 8);
        assert_eq!(empty.completion_percent, 0.0);
    }

    #[test]
    fn anticoagulation_is_advisory_only() {
        let mut checklist = TimeoutChecklist::all_checked();
        checklist.anticoagulation = Anticoagulation {
            heparin_available: false,
            baseline_act_seconds: Some(120.0),
            plan: AnticoagulationPlan::None,
        };
        let result = evaluate_timeout(&checklist, TimeoutPolicy::default());
        assert!(result.passed);
        assert_eq!(result.checks_passed, 33);
        assert_eq!(result.advisories.len(), 3);
        assert!(result.advisories[2].starts_with("Baseline ACT 120 s"));
    }
}
