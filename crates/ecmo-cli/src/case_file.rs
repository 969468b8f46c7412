//! JSON case files.

use std::path::Path;

use anyhow::{Context, Result};
use ecmo_model::AssessmentRequest;
use tracing::info;

use crate::logging::redact_value;

/// Loads and validates one assessment request.
pub fn load_case(path: &Path) -> Result<AssessmentRequest> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read case file {}", path.display()))?;
    let request: AssessmentRequest = serde_json::from_str(&contents)
        .with_context(|| format!("parse case file {}", path.display()))?;
    request
        .validate()
        .with_context(|| format!("validate case file {}", path.display()))?;
    info!(
        patient = redact_value(request.patient.name.as_deref().unwrap_or("unknown")),
        mode = %request.patient.ecmo_mode,
        "loaded case"
    );
    Ok(request)
}
