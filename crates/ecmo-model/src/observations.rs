//! Bedside measurements consumed by the scorers.
//!
//! The SOFA inputs are shared by both ECMO modes. Inputs that only one risk
//! score uses live in [`ModeObservations`], a tagged union whose variant has
//! to agree with the patient's [`EcmoMode`].

use serde::{Deserialize, Serialize};

use crate::enums::{AcuteEtiology, EcmoMode, RespDiagnosis, VasopressorSupport};
use crate::error::{EcmoError, Result};

/// Lowest Glasgow Coma Scale value.
pub const GCS_MIN: f64 = 3.0;
/// Highest Glasgow Coma Scale value.
pub const GCS_MAX: f64 = 15.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalObservations {
    /// PaO2/FiO2 ratio in mmHg.
    pub pao2_fio2: f64,
    /// Platelet count, ×10³/µL.
    pub platelets: f64,
    /// Total bilirubin, mg/dL.
    pub bilirubin: f64,
    /// Mean arterial pressure, mmHg. Reported, not scored.
    pub mean_arterial_pressure: f64,
    pub vasopressor: VasopressorSupport,
    pub glasgow_coma_scale: f64,
    /// Serum creatinine, mg/dL.
    pub creatinine: f64,
    /// Urine output, mL/day.
    pub urine_output: f64,
    /// Inputs specific to the risk score of the selected mode.
    pub mode: ModeObservations,
}

impl ClinicalObservations {
    /// Rejects non-finite values and values below the defined minimums.
    ///
    /// Values above the usual clinical ranges are accepted as-is.
    pub fn validate(&self) -> Result<()> {
        non_negative("PaO2/FiO2", self.pao2_fio2)?;
        non_negative("platelets", self.platelets)?;
        non_negative("bilirubin", self.bilirubin)?;
        non_negative("mean arterial pressure", self.mean_arterial_pressure)?;
        non_negative("creatinine", self.creatinine)?;
        non_negative("urine output", self.urine_output)?;
        let gcs = self.glasgow_coma_scale;
        if !gcs.is_finite() || !(GCS_MIN..=GCS_MAX).contains(&gcs) {
            return Err(EcmoError::validation(
                "Glasgow Coma Scale",
                format!("{gcs} is outside {GCS_MIN}-{GCS_MAX}"),
            ));
        }
        match &self.mode {
            ModeObservations::VenoArterial(save) => {
                non_negative("intubation duration", save.intubation_hours)?;
                non_negative("diastolic blood pressure", save.diastolic_bp)?;
            }
            ModeObservations::VenoVenous(resp) => {
                non_negative("ventilation duration", resp.ventilation_hours)?;
                non_negative("pH", resp.ph)?;
                non_negative("PEEP", resp.peep)?;
                non_negative("plateau pressure", resp.plateau_pressure)?;
            }
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EcmoError::validation(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(EcmoError::validation(
            field,
            format!("{value} is below the minimum of 0"),
        ));
    }
    Ok(())
}

/// Mode-specific risk score inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "ecmo_mode")]
pub enum ModeObservations {
    #[serde(rename = "VA")]
    VenoArterial(SaveObservations),
    #[serde(rename = "VV")]
    VenoVenous(RespObservations),
}

impl ModeObservations {
    pub fn mode(&self) -> EcmoMode {
        match self {
            ModeObservations::VenoArterial(_) => EcmoMode::VenoArterial,
            ModeObservations::VenoVenous(_) => EcmoMode::VenoVenous,
        }
    }
}

/// SAVE score inputs (veno-arterial).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveObservations {
    #[serde(default)]
    pub pre_ecmo_cardiac_arrest: bool,
    pub acute_etiology: AcuteEtiology,
    /// Hours intubated before ECMO.
    pub intubation_hours: f64,
    /// Diastolic blood pressure, mmHg.
    pub diastolic_bp: f64,
}

/// RESP score inputs (veno-venous).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespObservations {
    #[serde(default)]
    pub immunocompromised: bool,
    /// Hours of mechanical ventilation before ECMO.
    pub ventilation_hours: f64,
    pub ph: f64,
    /// PEEP, cmH2O.
    pub peep: f64,
    /// Plateau pressure, cmH2O.
    pub plateau_pressure: f64,
    pub acute_diagnosis: RespDiagnosis,
    #[serde(default)]
    pub cns_dysfunction: bool,
}
