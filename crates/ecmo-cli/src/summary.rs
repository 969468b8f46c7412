use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ecmo_core::CannulaSpec;
use ecmo_model::{
    Anthropometrics, Assessment, CannulaRecommendation, InitiationPlan, Judgment, ScoreComponent,
    TimeoutResult, TimeoutStatus,
};

pub fn print_assessment(assessment: &Assessment) {
    print_anthropometrics(&assessment.anthropometrics);
    print_scores(assessment);
    print_candidacy(assessment);
    if let Some(timeout) = &assessment.timeout {
        print_timeout(timeout);
    }
    if let Some(plan) = &assessment.initiation {
        print_initiation(plan);
    }
    if let Some(stopped) = assessment.stopped {
        println!("Stopped: {}", stopped.as_str());
    }
    if !assessment.alternatives.is_empty() {
        println!("Alternative considerations:");
        for line in &assessment.alternatives {
            println!("- {line}");
        }
    }
}

pub fn print_anthropometrics(values: &Anthropometrics) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("BMI"),
        Cell::new(format!("{:.1} kg/m²", values.bmi)),
    ]);
    table.add_row(vec![
        Cell::new("BSA (Du Bois)"),
        Cell::new(format!("{:.2} m²", values.bsa)),
    ]);
    table.add_row(vec![
        Cell::new("Ideal body weight"),
        Cell::new(format!("{:.1} kg", values.ideal_weight_kg)),
    ]);
    println!("{table}");
}

fn print_scores(assessment: &Assessment) {
    let risk = &assessment.risk;
    let sofa = &assessment.sofa;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Score"),
        header_cell("Component"),
        header_cell("Points"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    add_components(&mut table, risk.kind.as_str(), &risk.components);
    table.add_row(vec![
        total_cell(risk.kind.as_str()),
        total_cell(&format!("{} ({} survival)", risk.risk_tier, risk.survival_estimate)),
        Cell::new(risk.raw_score).add_attribute(Attribute::Bold),
    ]);
    add_components(&mut table, "SOFA", &sofa.components);
    table.add_row(vec![
        total_cell("SOFA"),
        total_cell(&format!("{} mortality", sofa.mortality_band)),
        Cell::new(sofa.sofa_total).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn add_components(table: &mut Table, score: &str, components: &[ScoreComponent]) {
    for component in components {
        table.add_row(vec![
            dim_cell(score),
            Cell::new(&component.name),
            points_cell(component.points),
        ]);
    }
}

fn print_candidacy(assessment: &Assessment) {
    let candidacy = &assessment.candidacy;
    let criteria = &assessment.criteria;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("Criterion"),
        header_cell("Finding"),
        header_cell("Points"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for reason in &candidacy.reasons {
        table.add_row(vec![
            Cell::new(reason.judgment.symbol()),
            Cell::new(reason.criterion.as_str()),
            judgment_cell(&reason.summary, reason.judgment),
            points_cell(reason.points),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        total_cell("Candidacy"),
        total_cell(candidacy.tier.as_str()),
        Cell::new(format!("{}/{}", candidacy.score, candidacy.max_score()))
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "Inclusion: {} met ({}), exclusion: {} present ({})",
        criteria.inclusion_met,
        criteria.inclusion_assessment(),
        criteria.exclusion_count,
        criteria.exclusion_assessment()
    );
    if let Some(met) = criteria.ecpr_criteria_met {
        println!("ECPR criteria met: {met}/5");
    }
}

fn print_timeout(timeout: &TimeoutResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Checked"),
        header_cell("Total"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for section in &timeout.sections {
        let checked = if section.checked == section.total {
            Cell::new(section.checked)
        } else {
            Cell::new(section.checked).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(&section.label),
            checked,
            dim_cell(section.total),
        ]);
    }
    table.add_row(vec![
        total_cell("Timeout"),
        Cell::new(timeout.checks_passed).add_attribute(Attribute::Bold),
        Cell::new(timeout.checks_total).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!(
        "{:.1}% complete: {}",
        timeout.completion_percent,
        status_label(timeout.status)
    );
    for line in &timeout.missing_items {
        println!("- missing: {line}");
    }
    for line in &timeout.advisories {
        println!("- note: {line}");
    }
}

fn print_initiation(plan: &InitiationPlan) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("BSA"),
        Cell::new(format!("{:.2} m²", plan.bsa)),
    ]);
    table.add_row(vec![
        Cell::new("Target CI"),
        Cell::new(format!("{:.1} L/min/m²", plan.target_ci)),
    ]);
    table.add_row(vec![
        Cell::new("Target flow"),
        Cell::new(format!("{:.2} L/min", plan.target_flow)),
    ]);
    table.add_row(vec![
        Cell::new("Delivered CI"),
        Cell::new(format!("{:.2} L/min/m²", plan.delivered_ci)),
    ]);
    table.add_row(vec![
        Cell::new("Initial RPM"),
        Cell::new(format!("{}-{}", plan.initial_rpm.low, plan.initial_rpm.high)),
    ]);
    println!("{table}");
    print_cannulas(&plan.cannulas);
    println!("Before cannulation:");
    for line in &plan.pre_cannulation {
        println!("- {line}");
    }
    println!("After cannulation:");
    for line in &plan.post_cannulation {
        println!("- {line}");
    }
}

pub fn print_cannulas(rec: &CannulaRecommendation) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Cannula"),
        header_cell("Size"),
        header_cell("Site"),
        header_cell("Max flow"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Drainage"),
        Cell::new(&rec.drainage_size).add_attribute(Attribute::Bold),
        Cell::new(rec.drainage_site.as_str()),
        Cell::new(format!("{:.1} L/min", rec.drainage_max_flow)),
    ]);
    table.add_row(vec![
        Cell::new("Return"),
        Cell::new(&rec.return_size).add_attribute(Attribute::Bold),
        Cell::new(rec.return_site.as_str()),
        Cell::new(format!("{:.1} L/min", rec.return_max_flow)),
    ]);
    println!("{table}");
    println!(
        "Target flow {:.2} L/min, {:.2} L/min with safety margin",
        rec.target_flow, rec.required_flow
    );
}

pub fn print_reference(specs: &[CannulaSpec]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Size"),
        header_cell("Max flow"),
        header_cell("Typical flow"),
        header_cell("Notes"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Right);
    for spec in specs {
        table.add_row(vec![
            Cell::new(spec.label()).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.1} L/min", spec.max_flow)),
            Cell::new(spec.typical_flow),
            dim_cell(spec.notes),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn total_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn points_cell(points: i32) -> Cell {
    match points {
        0 => dim_cell(points),
        p if p < 0 => Cell::new(p).fg(Color::Red),
        p => Cell::new(p),
    }
}

fn judgment_cell(summary: &str, judgment: Judgment) -> Cell {
    let color = match judgment {
        Judgment::Favorable => Color::Green,
        Judgment::Borderline => Color::Yellow,
        Judgment::Unfavorable => Color::Red,
    };
    Cell::new(summary).fg(color)
}

fn status_label(status: TimeoutStatus) -> String {
    match status {
        TimeoutStatus::Proceed => format!("✅ {status}"),
        TimeoutStatus::ProceedWithCaution => format!("⚠️ {status}"),
        TimeoutStatus::DoNotProceed => format!("❌ {status}"),
    }
}
