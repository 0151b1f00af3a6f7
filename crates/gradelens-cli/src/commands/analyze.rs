//! The `gradelens analyze` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradelens_core::config::load_config_from;
use gradelens_core::model::Quarter;
use gradelens_core::parser;
use gradelens_core::report::StudentReport;

use super::OutputFormat;

pub fn execute(
    gradebook_path: PathBuf,
    config_path: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let book = parser::parse_gradebook(&gradebook_path)?;

    for warning in parser::validate_gradebook(&book) {
        tracing::warn!("{}: {}", gradebook_path.display(), warning.message);
    }

    let report = StudentReport::build(&book, &config);

    if let Some(path) = &output {
        report.save_json(path)?;
        tracing::info!("report written to {}", path.display());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }

    Ok(())
}

fn score_cell(score: Option<u32>) -> Cell {
    Cell::new(score.map(|s| s.to_string()).unwrap_or_else(|| "-".into()))
}

fn print_text(report: &StudentReport) {
    println!(
        "{} ({}) {} through {}",
        report.student_name, report.student_id, report.section, report.current_quarter
    );

    let mut table = Table::new();
    table.set_header(vec![
        "Subject",
        "Q1",
        "Q2",
        "Q3",
        "Q4",
        "Grade to date",
        "Status",
    ]);
    for grade in &report.grades {
        let record = &grade.record;
        let mut row = vec![Cell::new(&record.subject)];
        row.extend(Quarter::ALL.into_iter().map(|q| score_cell(record.score(q))));
        row.push(Cell::new(grade.grade_to_date));
        row.push(Cell::new(grade.status));
        table.add_row(row);
    }
    println!("{table}");

    println!(
        "General average: {} ({}, {}) - {}",
        report.general_average, report.letter_grade, report.performance_level, report.overall_status
    );
    println!(
        "Attendance: {:.1}%  Completion: {}%",
        report.attendance_rate, report.completion_rate
    );
    println!(
        "Trend: {}  Predicted: {} ({}% confidence, {})",
        report.trend,
        report.prediction.predicted_grade,
        report.prediction.confidence_level,
        report.prediction.trend
    );
    if report.at_risk && report.required_improvement > 0 {
        println!(
            "Needs +{} points per remaining quarter to pass",
            report.required_improvement
        );
    }

    println!("\nRisk: {}", report.risk.risk_level);
    for (factor, recommendation) in report
        .risk
        .factors
        .iter()
        .zip(&report.risk.recommendations)
    {
        println!("  {factor}: {recommendation}");
    }

    if !report.knowledge_gaps.is_empty() {
        let mut gaps = Table::new();
        gaps.set_header(vec!["Topic", "Proficiency", "Status", "Priority", "Study (min)"]);
        for (gap, plan) in report.knowledge_gaps.iter().zip(&report.study_plan) {
            gaps.add_row(vec![
                Cell::new(&gap.topic),
                Cell::new(format!("{}%", gap.proficiency)),
                Cell::new(gap.status),
                Cell::new(plan.priority),
                Cell::new(plan.estimated_study_time),
            ]);
        }
        println!("\n{gaps}");
    }
}
