use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::{info, info_span};

use ecmo_cli::case_file::load_case;
use ecmo_cli::config::resolve_engine_config;
use ecmo_cli::report::render_soap_note;
use ecmo_core::{assess, cannula_reference, compute_anthropometrics, recommend_cannulas};
use ecmo_model::{Assessment, StageSkip};

use crate::cli::{AnthropometricsArgs, AssessArgs, CannulaArgs, OutputFormatArg};
use crate::summary::{print_anthropometrics, print_assessment, print_cannulas, print_reference};

/// Runs the pipeline for one case file and prints the result.
pub fn run_assess(args: &AssessArgs) -> Result<Assessment> {
    let span = info_span!("assess", case = %args.case.display());
    let _guard = span.enter();
    let config = resolve_engine_config(args.config.as_deref(), args.legacy)?;
    let request = load_case(&args.case)?;
    let assessment = assess(&request, &config)
        .with_context(|| format!("assess {}", args.case.display()))?;
    info!(
        tier = ?assessment.candidacy.tier,
        ready = assessment.ready_to_initiate(),
        "assessment finished"
    );

    match args.format {
        OutputFormatArg::Table => print_assessment(&assessment),
        OutputFormatArg::Json => {
            let json =
                serde_json::to_string_pretty(&assessment).context("serialize assessment")?;
            println!("{json}");
        }
    }
    if args.note {
        let note = render_soap_note(
            &request,
            &assessment,
            Local::now().naive_local(),
            args.show_name,
        );
        println!();
        println!("{note}");
    }
    Ok(assessment)
}

/// Exit status for a finished assessment.
pub fn assessment_exit_code(assessment: &Assessment) -> i32 {
    match assessment.stopped {
        Some(StageSkip::NotCandidate | StageSkip::TimeoutFailed) => 1,
        Some(StageSkip::ChecklistMissing) | None => 0,
    }
}

pub fn run_anthropometrics(args: &AnthropometricsArgs) -> Result<()> {
    if !(args.weight > 0.0 && args.height > 0.0) {
        bail!("weight and height must be positive");
    }
    let values = compute_anthropometrics(args.weight, args.height, args.sex);
    print_anthropometrics(&values);
    Ok(())
}

pub fn run_cannula(args: &CannulaArgs) -> Result<()> {
    if !(args.target_flow > 0.0 && args.bsa > 0.0) {
        bail!("target flow and BSA must be positive");
    }
    let config = resolve_engine_config(args.config.as_deref(), false)?;
    let rec = recommend_cannulas(args.target_flow, args.bsa, args.mode, &config);
    print_cannulas(&rec);
    Ok(())
}

pub fn run_reference() {
    print_reference(cannula_reference());
}
