//! Cannula sizing against a target blood flow.

use ecmo_model::{CannulaRecommendation, CannulationSite, EcmoMode, EngineConfig};
use tracing::{debug, warn};

/// One entry of the flow-capacity table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannulaSpec {
    /// French size.
    pub french: u8,
    /// Rated maximum flow, L/min.
    pub max_flow: f64,
    /// Typical working flow band.
    pub typical_flow: &'static str,
    /// Usual clinical use.
    pub notes: &'static str,
}

impl CannulaSpec {
    /// Display label, e.g. `"21 Fr"`.
    pub fn label(&self) -> String {
        format!("{} Fr", self.french)
    }
}

/// Cannula sizes in ascending capacity.
pub const CANNULA_TABLE: [CannulaSpec; 8] = [
    CannulaSpec {
        french: 15,
        max_flow: 2.0,
        typical_flow: "1.0-2.0 L/min",
        notes: "Pediatric or very small adult",
    },
    CannulaSpec {
        french: 17,
        max_flow: 2.8,
        typical_flow: "2.0-2.8 L/min",
        notes: "Small adult arterial return",
    },
    CannulaSpec {
        french: 19,
        max_flow: 3.5,
        typical_flow: "2.5-3.5 L/min",
        notes: "Small adult or low-flow support",
    },
    CannulaSpec {
        french: 21,
        max_flow: 4.5,
        typical_flow: "3.5-4.5 L/min",
        notes: "Moderate adult flow",
    },
    CannulaSpec {
        french: 23,
        max_flow: 5.5,
        typical_flow: "4.5-5.5 L/min",
        notes: "Standard drainage for VV ECMO",
    },
    CannulaSpec {
        french: 25,
        max_flow: 6.5,
        typical_flow: "5.5-6.5 L/min",
        notes: "High flow needs",
    },
    CannulaSpec {
        french: 27,
        max_flow: 7.5,
        typical_flow: "6.5-7.5 L/min",
        notes: "Large adult or obese patient",
    },
    CannulaSpec {
        french: 29,
        max_flow: 8.5,
        typical_flow: "7.5+ L/min",
        notes: "Very high flow, VA or VV-VA setups",
    },
];

const LARGEST: usize = CANNULA_TABLE.len() - 1;

/// The reference guide, smallest size first.
pub fn cannula_reference() -> &'static [CannulaSpec] {
    &CANNULA_TABLE
}

/// Looks up a size by its French number.
pub fn cannula_by_french(french: u8) -> Option<&'static CannulaSpec> {
    CANNULA_TABLE.iter().find(|spec| spec.french == french)
}

/// Index of the smallest cannula rated for `flow`, or `None` when even the
/// largest falls short.
fn smallest_for(flow: f64) -> Option<usize> {
    CANNULA_TABLE.iter().position(|spec| spec.max_flow >= flow)
}

/// Shifts a pick one step for patients outside the standard BSA range.
///
/// Small patients step down when the next smaller size still covers the
/// unmargined target. Large patients step up when the pick leaves less
/// than the configured headroom over the target.
fn adjust_for_bsa(index: usize, target_flow: f64, bsa: f64, config: &EngineConfig) -> usize {
    if bsa < config.small_patient_bsa
        && index > 0
        && CANNULA_TABLE[index - 1].max_flow >= target_flow
    {
        index - 1
    } else if bsa > config.large_patient_bsa
        && index < LARGEST
        && CANNULA_TABLE[index].max_flow < target_flow * config.large_patient_headroom
    {
        index + 1
    } else {
        index
    }
}

/// Cannulation sites as (drainage, return) for a mode.
pub fn cannulation_sites(mode: EcmoMode) -> (CannulationSite, CannulationSite) {
    match mode {
        EcmoMode::VenoVenous => (
            CannulationSite::FemoralVein,
            CannulationSite::InternalJugularVein,
        ),
        EcmoMode::VenoArterial => (CannulationSite::FemoralVein, CannulationSite::FemoralArtery),
    }
}

/// Picks drainage and return cannulas for a target flow in L/min.
///
/// Each cannula is the smallest whose capacity covers the target with the
/// safety margin applied. When nothing in the table is large enough the
/// largest size is used. Both picks are then adjusted for body size.
pub fn recommend_cannulas(
    target_flow: f64,
    bsa: f64,
    mode: EcmoMode,
    config: &EngineConfig,
) -> CannulaRecommendation {
    let required_flow = target_flow * config.safety_margin;
    let pick = smallest_for(required_flow).unwrap_or_else(|| {
        warn!(
            required_flow,
            "no cannula covers the required flow, using the largest size"
        );
        LARGEST
    });
    let spec = &CANNULA_TABLE[adjust_for_bsa(pick, target_flow, bsa, config)];
    let (drainage_site, return_site) = cannulation_sites(mode);
    debug!(
        target_flow,
        required_flow,
        french = spec.french,
        "cannulas selected"
    );
    CannulaRecommendation {
        drainage_size: spec.label(),
        return_size: spec.label(),
        drainage_max_flow: spec.max_flow,
        return_max_flow: spec.max_flow,
        target_flow,
        required_flow,
        drainage_site,
        return_site,
    }
}
