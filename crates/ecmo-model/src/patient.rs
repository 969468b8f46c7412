//! Patient demographics and derived body measurements.

use serde::{Deserialize, Serialize};

use crate::enums::{EcmoMode, Sex};
use crate::error::{EcmoError, Result};

/// Oldest age the calculator accepts.
pub const MAX_AGE_YEARS: u32 = 120;

/// Immutable demographic record for one assessment.
///
/// BMI, BSA and ideal body weight are not stored here; they are derived on
/// demand so every stage sees the same values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Display name. Only used in rendered notes.
    #[serde(default)]
    pub name: Option<String>,
    pub age_years: u32,
    pub sex: Sex,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub ecmo_mode: EcmoMode,
}

impl PatientProfile {
    /// Creates a validated profile.
    pub fn new(
        age_years: u32,
        sex: Sex,
        weight_kg: f64,
        height_cm: f64,
        ecmo_mode: EcmoMode,
    ) -> Result<Self> {
        let profile = Self {
            name: None,
            age_years,
            sex,
            weight_kg,
            height_cm,
            ecmo_mode,
        };
        profile.validate()?;
        Ok(profile)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Checks the boundary rules: age within 0-120, positive finite weight
    /// and height.
    pub fn validate(&self) -> Result<()> {
        if self.age_years > MAX_AGE_YEARS {
            return Err(EcmoError::validation(
                "age",
                format!("{} years is outside 0-{MAX_AGE_YEARS}", self.age_years),
            ));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(EcmoError::validation(
                "weight",
                format!("{} kg must be a positive number", self.weight_kg),
            ));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(EcmoError::validation(
                "height",
                format!("{} cm must be a positive number", self.height_cm),
            ));
        }
        Ok(())
    }
}

/// Body measurements derived from height, weight and sex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anthropometrics {
    /// Body mass index in kg/m².
    pub bmi: f64,
    /// Body surface area (Du Bois) in m².
    pub bsa: f64,
    /// Ideal body weight (Devine) in kg.
    pub ideal_weight_kg: f64,
}
