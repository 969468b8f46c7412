//! Pre-cannulation timeout checklist.
//!
//! The checklist is grouped into fixed sections. Every section contributes
//! its checked items to the completion total; the anticoagulation block is
//! recorded for the note but is not scored.

use serde::{Deserialize, Serialize};

use crate::enums::AnticoagulationPlan;

/// A scored group of timeout checks.
pub trait ChecklistSection {
    /// Section heading.
    fn label(&self) -> &'static str;

    /// Line reported when the section is incomplete.
    fn missing_message(&self) -> &'static str;

    /// Check states in display order.
    fn items(&self) -> Vec<bool>;

    fn checked(&self) -> u32 {
        self.items().into_iter().map(u32::from).sum()
    }

    fn total(&self) -> u32 {
        self.items().len() as u32
    }

    fn is_complete(&self) -> bool {
        self.checked() == self.total()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamPresence {
    pub surgeon: bool,
    pub anesthesiologist: bool,
    pub perfusionist: bool,
    pub ecmo_specialist_nurse: bool,
    pub respiratory_therapist: bool,
}

impl ChecklistSection for TeamPresence {
    fn label(&self) -> &'static str {
        "Team Members"
    }

    fn missing_message(&self) -> &'static str {
        "Team members not present"
    }

    fn items(&self) -> Vec<bool> {
        vec![
            self.surgeon,
            self.anesthesiologist,
            self.perfusionist,
            self.ecmo_specialist_nurse,
            self.respiratory_therapist,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientVerification {
    pub identity_confirmed: bool,
    pub consent_verified: bool,
    pub allergies_confirmed: bool,
    /// Negative, or not applicable.
    pub pregnancy_test_negative: bool,
}

impl ChecklistSection for PatientVerification {
    fn label(&self) -> &'static str {
        "Patient Checks"
    }

    fn missing_message(&self) -> &'static str {
        "Patient verification incomplete"
    }

    fn items(&self) -> Vec<bool> {
        vec![
            self.identity_confirmed,
            self.consent_verified,
            self.allergies_confirmed,
            self.pregnancy_test_negative,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitReadiness {
    pub circuit_primed: bool,
    pub cannulas_available: bool,
    pub pump_tested: bool,
    pub oxygenator_ready: bool,
}

impl ChecklistSection for CircuitReadiness {
    fn label(&self) -> &'static str {
        "Circuit Ready"
    }

    fn missing_message(&self) -> &'static str {
        "ECMO circuit not ready"
    }

    fn items(&self) -> Vec<bool> {
        vec![
            self.circuit_primed,
            self.cannulas_available,
            self.pump_tested,
            self.oxygenator_ready,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringReadiness {
    pub arterial_line: bool,
    pub cvp_line: bool,
    pub saturation_monitor: bool,
    pub ecg_monitor: bool,
}

impl ChecklistSection for MonitoringReadiness {
    fn label(&self) -> &'static str {
        "Monitoring Ready"
    }

    fn missing_message(&self) -> &'static str {
        "Monitoring equipment not ready"
    }

    fn items(&self) -> Vec<bool> {
        vec![
            self.arterial_line,
            self.cvp_line,
            self.saturation_monitor,
            self.ecg_monitor,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyEquipment {
    pub crash_cart: bool,
    pub defibrillator: bool,
    pub emergency_drugs: bool,
    pub backup_equipment: bool,
}

impl ChecklistSection for EmergencyEquipment {
    fn label(&self) -> &'static str {
        "Emergency Ready"
    }

    fn missing_message(&self) -> &'static str {
        "Emergency equipment not ready"
    }

    fn items(&self) -> Vec<bool> {
        vec![
            self.crash_cart,
            self.defibrillator,
            self.emergency_drugs,
            self.backup_equipment,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitePlanning {
    pub site_marked: bool,
    pub approach_confirmed: bool,
    pub landmarks_identified: bool,
    pub sterile_field: bool,
}

impl ChecklistSection for SitePlanning {
    fn label(&self) -> &'static str {
        "Site Ready"
    }

    fn missing_message(&self) -> &'static str {
        "Surgical site not ready"
    }

    fn items(&self) -> Vec<bool> {
        vec![
            self.site_marked,
            self.approach_confirmed,
            self.landmarks_identified,
            self.sterile_field,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyChecks {
    pub airway_secure: bool,
    pub iv_access: bool,
    pub blood_products: bool,
    pub imaging_reviewed: bool,
}

impl ChecklistSection for SafetyChecks {
    fn label(&self) -> &'static str {
        "Safety Checks"
    }

    fn missing_message(&self) -> &'static str {
        "Safety checks incomplete"
    }

    fn items(&self) -> Vec<bool> {
        vec![
            self.airway_secure,
            self.iv_access,
            self.blood_products,
            self.imaging_reviewed,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplicationPlans {
    pub bleeding: bool,
    pub limb_ischemia: bool,
    /// Recirculation monitoring (VV).
    pub recirculation: bool,
    pub weaning: bool,
}

impl ChecklistSection for ComplicationPlans {
    fn label(&self) -> &'static str {
        "Complication Plans"
    }

    fn missing_message(&self) -> &'static str {
        "Complication plans incomplete"
    }

    fn items(&self) -> Vec<bool> {
        vec![
            self.bleeding,
            self.limb_ischemia,
            self.recirculation,
            self.weaning,
        ]
    }
}

/// Anticoagulation readiness. Reported only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Anticoagulation {
    pub heparin_available: bool,
    /// Baseline activated clotting time in seconds.
    pub baseline_act_seconds: Option<f64>,
    pub plan: AnticoagulationPlan,
}

/// The full pre-cannulation timeout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutChecklist {
    pub team: TeamPresence,
    pub patient: PatientVerification,
    pub circuit: CircuitReadiness,
    pub monitoring: MonitoringReadiness,
    pub emergency: EmergencyEquipment,
    pub site: SitePlanning,
    pub safety: SafetyChecks,
    pub complications: ComplicationPlans,
    pub anticoagulation: Anticoagulation,
}

impl TimeoutChecklist {
    /// Scored sections in report order.
    pub fn sections(&self) -> [&dyn ChecklistSection; 8] {
        [
            &self.team,
            &self.patient,
            &self.circuit,
            &self.monitoring,
            &self.emergency,
            &self.site,
            &self.safety,
            &self.complications,
        ]
    }

    /// A checklist with every scored item ticked.
    pub fn all_checked() -> Self {
        Self {
            team: TeamPresence {
                surgeon: true,
                anesthesiologist: true,
                perfusionist: true,
                ecmo_specialist_nurse: true,
                respiratory_therapist: true,
            },
            patient: PatientVerification {
                identity_confirmed: true,
                consent_verified: true,
                allergies_confirmed: true,
                pregnancy_test_negative: true,
            },
            circuit: CircuitReadiness {
                circuit_primed: true,
                cannulas_available: true,
                pump_tested: true,
                oxygenator_ready: true,
            },
            monitoring: MonitoringReadiness {
                arterial_line: true,
                cvp_line: true,
                saturation_monitor: true,
                ecg_monitor: true,
            },
            emergency: EmergencyEquipment {
                crash_cart: true,
                defibrillator: true,
                emergency_drugs: true,
                backup_equipment: true,
            },
            site: SitePlanning {
                site_marked: true,
                approach_confirmed: true,
                landmarks_identified: true,
                sterile_field: true,
            },
            safety: SafetyChecks {
                airway_secure: true,
                iv_access: true,
                blood_products: true,
                imaging_reviewed: true,
            },
            complications: ComplicationPlans {
                bleeding: true,
                limb_ischemia: true,
                recirculation: true,
                weaning: true,
            },
            anticoagulation: Anticoagulation {
                heparin_available: true,
                ..Anticoagulation::default()
            },
        }
    }
}
