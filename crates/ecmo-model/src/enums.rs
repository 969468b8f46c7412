//! Category enumerations used by the scoring tables.
//!
//! Every category is parsed strictly: a label that does not name a table
//! entry is rejected with [`EcmoError::UnknownCategory`] instead of being
//! mapped to a default, since a silent default would change a clinical score.
//!
//! Labels are matched case-insensitively and ignore spaces, underscores,
//! hyphens and slashes, so both the display label (`"Acute MI"`) and a
//! snake-case key (`"acute_mi"`) are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EcmoError;

/// Normalizes a category label for lookup.
fn normalize_label(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace("<=", "≤")
        .replace(">=", "≥")
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-' | '/' | '\t'))
        .collect()
}

/// Biological sex, used for ideal body weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = EcmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(EcmoError::unknown("sex", s)),
        }
    }
}

impl TryFrom<String> for Sex {
    type Error = EcmoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// ECMO circuit configuration.
///
/// The mode selects the risk score (SAVE for VA, RESP for VV), the target
/// cardiac index and the cannulation sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum EcmoMode {
    /// Veno-venous: respiratory support only.
    #[serde(rename = "VV")]
    VenoVenous,
    /// Veno-arterial: respiratory and circulatory support.
    #[serde(rename = "VA")]
    VenoArterial,
}

impl EcmoMode {
    /// Short code as used on the bedside form.
    pub fn as_str(&self) -> &'static str {
        match self {
            EcmoMode::VenoVenous => "VV",
            EcmoMode::VenoArterial => "VA",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EcmoMode::VenoVenous => "Veno-Venous",
            EcmoMode::VenoArterial => "Veno-Arterial",
        }
    }
}

impl fmt::Display for EcmoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EcmoMode {
    type Err = EcmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "vv" | "venovenous" => Ok(EcmoMode::VenoVenous),
            "va" | "venoarterial" => Ok(EcmoMode::VenoArterial),
            _ => Err(EcmoError::unknown("ECMO mode", s)),
        }
    }
}

impl TryFrom<String> for EcmoMode {
    type Error = EcmoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Acute etiology for the SAVE score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AcuteEtiology {
    #[serde(rename = "Post-cardiotomy")]
    PostCardiotomy,
    #[serde(rename = "Acute MI")]
    AcuteMyocardialInfarction,
    #[serde(rename = "Myocarditis")]
    Myocarditis,
    #[serde(rename = "Other")]
    Other,
}

impl AcuteEtiology {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcuteEtiology::PostCardiotomy => "Post-cardiotomy",
            AcuteEtiology::AcuteMyocardialInfarction => "Acute MI",
            AcuteEtiology::Myocarditis => "Myocarditis",
            AcuteEtiology::Other => "Other",
        }
    }

    /// SAVE points for this etiology.
    pub fn save_points(&self) -> i32 {
        match self {
            AcuteEtiology::PostCardiotomy => 0,
            AcuteEtiology::AcuteMyocardialInfarction => 6,
            AcuteEtiology::Myocarditis => 8,
            AcuteEtiology::Other => 4,
        }
    }
}

impl fmt::Display for AcuteEtiology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcuteEtiology {
    type Err = EcmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "postcardiotomy" => Ok(AcuteEtiology::PostCardiotomy),
            "acutemi" | "acutemyocardialinfarction" => {
                Ok(AcuteEtiology::AcuteMyocardialInfarction)
            }
            "myocarditis" => Ok(AcuteEtiology::Myocarditis),
            "other" => Ok(AcuteEtiology::Other),
            _ => Err(EcmoError::unknown("acute etiology", s)),
        }
    }
}

impl TryFrom<String> for AcuteEtiology {
    type Error = EcmoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Acute respiratory diagnosis group for the RESP score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RespDiagnosis {
    #[serde(rename = "Viral pneumonia")]
    ViralPneumonia,
    #[serde(rename = "Bacterial pneumonia")]
    BacterialPneumonia,
    #[serde(rename = "Asthma")]
    Asthma,
    #[serde(rename = "Trauma/surgery")]
    TraumaOrSurgery,
    #[serde(rename = "Other")]
    Other,
}

impl RespDiagnosis {
    pub fn as_str(&self) -> &'static str {
        match self {
            RespDiagnosis::ViralPneumonia => "Viral pneumonia",
            RespDiagnosis::BacterialPneumonia => "Bacterial pneumonia",
            RespDiagnosis::Asthma => "Asthma",
            RespDiagnosis::TraumaOrSurgery => "Trauma/surgery",
            RespDiagnosis::Other => "Other",
        }
    }

    /// RESP points for this diagnosis group.
    pub fn resp_points(&self) -> i32 {
        match self {
            RespDiagnosis::ViralPneumonia => 0,
            RespDiagnosis::BacterialPneumonia => 0,
            RespDiagnosis::Asthma => 6,
            RespDiagnosis::TraumaOrSurgery => 3,
            RespDiagnosis::Other => 0,
        }
    }
}

impl fmt::Display for RespDiagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RespDiagnosis {
    type Err = EcmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "viralpneumonia" => Ok(RespDiagnosis::ViralPneumonia),
            "bacterialpneumonia" => Ok(RespDiagnosis::BacterialPneumonia),
            "asthma" => Ok(RespDiagnosis::Asthma),
            "traumasurgery" | "traumaorsurgery" | "trauma" => Ok(RespDiagnosis::TraumaOrSurgery),
            "other" => Ok(RespDiagnosis::Other),
            _ => Err(EcmoError::unknown("acute diagnosis", s)),
        }
    }
}

impl TryFrom<String> for RespDiagnosis {
    type Error = EcmoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Vasopressor/inotrope support level for the SOFA cardiovascular item.
///
/// Doses are in µg/kg/min.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum VasopressorSupport {
    #[serde(rename = "None")]
    None,
    /// Dopamine ≤5 or any dobutamine.
    #[serde(rename = "Dopamine ≤5 or Dobutamine")]
    LowDoseInotrope,
    /// Dopamine >5 or norepinephrine ≤0.1.
    #[serde(rename = "Dopamine >5 or NE ≤0.1")]
    ModerateDose,
    /// Norepinephrine >0.1 or epinephrine ≤0.1.
    #[serde(rename = "NE >0.1 or Epi ≤0.1")]
    HighDose,
    /// Norepinephrine >0.1 or epinephrine >0.1.
    #[serde(rename = "NE >0.1 or Epi >0.1")]
    MaximalDose,
}

impl VasopressorSupport {
    pub fn as_str(&self) -> &'static str {
        match self {
            VasopressorSupport::None => "None",
            VasopressorSupport::LowDoseInotrope => "Dopamine ≤5 or Dobutamine",
            VasopressorSupport::ModerateDose => "Dopamine >5 or NE ≤0.1",
            VasopressorSupport::HighDose => "NE >0.1 or Epi ≤0.1",
            VasopressorSupport::MaximalDose => "NE >0.1 or Epi >0.1",
        }
    }

    /// SOFA cardiovascular points (0-4).
    pub fn sofa_points(&self) -> u8 {
        match self {
            VasopressorSupport::None => 0,
            VasopressorSupport::LowDoseInotrope => 1,
            VasopressorSupport::ModerateDose => 2,
            VasopressorSupport::HighDose => 3,
            VasopressorSupport::MaximalDose => 4,
        }
    }
}

impl fmt::Display for VasopressorSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VasopressorSupport {
    type Err = EcmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "none" => Ok(VasopressorSupport::None),
            "dopamine≤5ordobutamine" | "lowdoseinotrope" => Ok(VasopressorSupport::LowDoseInotrope),
            "dopamine>5orne≤0.1" | "moderatedose" => Ok(VasopressorSupport::ModerateDose),
            "ne>0.1orepi≤0.1" | "highdose" => Ok(VasopressorSupport::HighDose),
            "ne>0.1orepi>0.1" | "maximaldose" => Ok(VasopressorSupport::MaximalDose),
            _ => Err(EcmoError::unknown("vasopressor", s)),
        }
    }
}

impl TryFrom<String> for VasopressorSupport {
    type Error = EcmoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Planned anticoagulation strategy at cannulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AnticoagulationPlan {
    #[default]
    #[serde(rename = "Heparin bolus + infusion")]
    HeparinBolusInfusion,
    #[serde(rename = "Bivalirudin")]
    Bivalirudin,
    #[serde(rename = "Argatroban")]
    Argatroban,
    #[serde(rename = "None")]
    None,
}

impl AnticoagulationPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnticoagulationPlan::HeparinBolusInfusion => "Heparin bolus + infusion",
            AnticoagulationPlan::Bivalirudin => "Bivalirudin",
            AnticoagulationPlan::Argatroban => "Argatroban",
            AnticoagulationPlan::None => "None",
        }
    }
}

impl fmt::Display for AnticoagulationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnticoagulationPlan {
    type Err = EcmoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "heparinbolus+infusion" | "heparin" => Ok(AnticoagulationPlan::HeparinBolusInfusion),
            "bivalirudin" => Ok(AnticoagulationPlan::Bivalirudin),
            "argatroban" => Ok(AnticoagulationPlan::Argatroban),
            "none" => Ok(AnticoagulationPlan::None),
            _ => Err(EcmoError::unknown("anticoagulation plan", s)),
        }
    }
}

impl TryFrom<String> for AnticoagulationPlan {
    type Error = EcmoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
