//! Configuration options for the assessment engine.
//!
//! Two rule sets have circulated for the safety gate and the flow target.
//! The defaults here are the canonical ones; [`EngineConfig::legacy`] selects
//! the older tiered timeout with a flat cardiac index target.

use serde::{Deserialize, Serialize};

use crate::enums::EcmoMode;
use crate::error::{EcmoError, Result};

/// How the timeout completion percentage decides whether to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// Proceed at or above a single completion percentage.
    Single { pass_percent: u32 },
    /// Proceed at `proceed_percent`, proceed with caution at
    /// `caution_percent`, otherwise stop.
    Tiered {
        proceed_percent: u32,
        caution_percent: u32,
    },
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        TimeoutPolicy::Single { pass_percent: 80 }
    }
}

impl TimeoutPolicy {
    pub fn tiered() -> Self {
        TimeoutPolicy::Tiered {
            proceed_percent: 90,
            caution_percent: 75,
        }
    }
}

/// Target cardiac index used to derive the target blood flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum TargetCardiacIndex {
    /// Per-mode target in L/min/m².
    ModeSpecific { vv: f64, va: f64 },
    /// One target for both modes.
    Flat { value: f64 },
}

impl Default for TargetCardiacIndex {
    fn default() -> Self {
        TargetCardiacIndex::ModeSpecific { vv: 3.0, va: 2.5 }
    }
}

impl TargetCardiacIndex {
    pub fn for_mode(&self, mode: EcmoMode) -> f64 {
        match (self, mode) {
            (TargetCardiacIndex::ModeSpecific { vv, .. }, EcmoMode::VenoVenous) => *vv,
            (TargetCardiacIndex::ModeSpecific { va, .. }, EcmoMode::VenoArterial) => *va,
            (TargetCardiacIndex::Flat { value }, _) => *value,
        }
    }
}

/// Initial pump speed range in RPM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpmRange {
    pub low: u32,
    pub high: u32,
}

impl Default for RpmRange {
    fn default() -> Self {
        Self {
            low: 2500,
            high: 3200,
        }
    }
}

/// Options controlling the safety gate and cannula sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timeout_policy: TimeoutPolicy,
    pub target_ci: TargetCardiacIndex,
    /// Multiplier applied to the target flow before picking a drainage
    /// cannula.
    pub safety_margin: f64,
    /// Patients below this BSA (m²) get oversized picks stepped down.
    pub small_patient_bsa: f64,
    /// Patients above this BSA (m²) get undersized picks stepped up.
    pub large_patient_bsa: f64,
    /// Capacity a large patient's pick must reach, as a multiple of the
    /// target flow, before it is no longer considered undersized.
    pub large_patient_headroom: f64,
    pub initial_rpm: RpmRange,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout_policy: TimeoutPolicy::default(),
            target_ci: TargetCardiacIndex::default(),
            safety_margin: 1.3,
            small_patient_bsa: 1.5,
            large_patient_bsa: 2.5,
            large_patient_headroom: 1.5,
            initial_rpm: RpmRange::default(),
        }
    }
}

impl EngineConfig {
    /// The older rule set: tiered 90%/75% timeout and a flat 2.4 L/min/m²
    /// cardiac index target.
    pub fn legacy() -> Self {
        Self {
            timeout_policy: TimeoutPolicy::tiered(),
            target_ci: TargetCardiacIndex::Flat { value: 2.4 },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timeout_policy(mut self, policy: TimeoutPolicy) -> Self {
        self.timeout_policy = policy;
        self
    }

    #[must_use]
    pub fn with_target_ci(mut self, target_ci: TargetCardiacIndex) -> Self {
        self.target_ci = target_ci;
        self
    }

    #[must_use]
    pub fn with_safety_margin(mut self, margin: f64) -> Self {
        self.safety_margin = margin;
        self
    }

    /// Rejects settings the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        match self.timeout_policy {
            TimeoutPolicy::Single { pass_percent } => {
                if pass_percent > 100 {
                    return Err(EcmoError::validation(
                        "timeout_policy.pass_percent",
                        format!("{pass_percent} exceeds 100"),
                    ));
                }
            }
            TimeoutPolicy::Tiered {
                proceed_percent,
                caution_percent,
            } => {
                if proceed_percent > 100 || caution_percent > proceed_percent {
                    return Err(EcmoError::validation(
                        "timeout_policy",
                        format!(
                            "expected caution ({caution_percent}) <= proceed ({proceed_percent}) <= 100"
                        ),
                    ));
                }
            }
        }
        let ci_values = match self.target_ci {
            TargetCardiacIndex::ModeSpecific { vv, va } => vec![vv, va],
            TargetCardiacIndex::Flat { value } => vec![value],
        };
        if ci_values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(EcmoError::validation(
                "target_ci",
                "cardiac index targets must be positive",
            ));
        }
        if !self.safety_margin.is_finite() || self.safety_margin < 1.0 {
            return Err(EcmoError::validation(
                "safety_margin",
                format!("{} must be at least 1.0", self.safety_margin),
            ));
        }
        if !self.large_patient_headroom.is_finite() || self.large_patient_headroom < 1.0 {
            return Err(EcmoError::validation(
                "large_patient_headroom",
                format!("{} must be at least 1.0", self.large_patient_headroom),
            ));
        }
        for (field, bsa) in [
            ("small_patient_bsa", self.small_patient_bsa),
            ("large_patient_bsa", self.large_patient_bsa),
        ] {
            if !bsa.is_finite() || bsa <= 0.0 {
                return Err(EcmoError::validation(
                    field,
                    format!("{bsa} m² must be a positive number"),
                ));
            }
        }
        let bsa_ordered = self.small_patient_bsa < self.large_patient_bsa;
        if !bsa_ordered {
            return Err(EcmoError::validation(
                "small_patient_bsa",
                "must be below large_patient_bsa",
            ));
        }
        if self.initial_rpm.low > self.initial_rpm.high {
            return Err(EcmoError::validation(
                "initial_rpm",
                "low must not exceed high",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_ci_is_mode_specific() {
        let config = EngineConfig::default();
        assert_eq!(config.target_ci.for_mode(EcmoMode::VenoVenous), 3.0);
        assert_eq!(config.target_ci.for_mode(EcmoMode::VenoArterial), 2.5);
    }

    #[test]
    fn test_legacy_preset() {
        let config = EngineConfig::legacy();
        assert_eq!(config.target_ci.for_mode(EcmoMode::VenoArterial), 2.4);
        assert_eq!(config.target_ci.for_mode(EcmoMode::VenoVenous), 2.4);
        assert_eq!(config.timeout_policy, TimeoutPolicy::tiered());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_tiers() {
        let config = EngineConfig::default().with_timeout_policy(TimeoutPolicy::Tiered {
            proceed_percent: 70,
            caution_percent: 80,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_headroom_below_one() {
        let config = EngineConfig {
            large_patient_headroom: -1.0,
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            EcmoError::Validation {
                field: "large_patient_headroom",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_bsa_thresholds() {
        let negative = EngineConfig {
            small_patient_bsa: -5.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            negative.validate().unwrap_err(),
            EcmoError::Validation {
                field: "small_patient_bsa",
                ..
            }
        ));
        let infinite = EngineConfig {
            large_patient_bsa: f64::INFINITY,
            ..EngineConfig::default()
        };
        assert!(matches!(
            infinite.validate().unwrap_err(),
            EcmoError::Validation {
                field: "large_patient_bsa",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_margin_below_one() {
        let config = EngineConfig::default().with_safety_margin(0.9);
        assert!(config.validate().is_err());
    }
}
