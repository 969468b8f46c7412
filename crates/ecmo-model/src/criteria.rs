//! Clinician-asserted candidacy criteria.

use serde::{Deserialize, Serialize};

use crate::error::{EcmoError, Result};

/// Checkbox criteria that the calculator cannot derive from measurements.
///
/// Age and BMI criteria are derived from the [`PatientProfile`] instead.
///
/// [`PatientProfile`]: crate::PatientProfile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaFlags {
    // Inclusion
    pub reversible_condition: bool,
    pub no_absolute_contraindications: bool,
    pub informed_consent: bool,
    pub conventional_therapy_failed: bool,
    // Exclusion
    pub irreversible_brain_damage: bool,
    pub terminal_illness: bool,
    pub severe_bleeding: bool,
    pub severe_immunosuppression: bool,
}

/// Arrest details for extracorporeal CPR candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EcprInputs {
    #[serde(default)]
    pub witnessed_arrest: bool,
    #[serde(default)]
    pub bystander_cpr: bool,
    /// No return of spontaneous circulation within 60 minutes.
    #[serde(default)]
    pub no_rosc_within_60_min: bool,
    /// Arterial pH at presentation.
    pub ph: f64,
    /// Lactate, mmol/L.
    pub lactate: f64,
}

impl EcprInputs {
    pub fn validate(&self) -> Result<()> {
        if !self.ph.is_finite() || self.ph < 0.0 {
            return Err(EcmoError::validation("ECPR pH", format!("{} is not a valid pH", self.ph)));
        }
        if !self.lactate.is_finite() || self.lactate < 0.0 {
            return Err(EcmoError::validation(
                "ECPR lactate",
                format!("{} is below the minimum of 0", self.lactate),
            ));
        }
        Ok(())
    }
}
