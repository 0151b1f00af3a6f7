//! The `gradelens class` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradelens_core::config::load_config_from;
use gradelens_core::parser;
use gradelens_core::report::{ClassReport, StudentReport};

use super::OutputFormat;

pub fn execute(dir: PathBuf, config_path: Option<PathBuf>, format: OutputFormat) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let books = parser::load_gradebook_directory(&dir)?;

    if books.is_empty() {
        anyhow::bail!("no gradebooks found in {}", dir.display());
    }

    let students: Vec<StudentReport> = books
        .iter()
        .map(|book| StudentReport::build(book, &config))
        .collect();
    let class = ClassReport::build(&students);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&class)?),
        OutputFormat::Text => {
            println!(
                "Class of {}: average {:.2}, highest {}, lowest {}",
                class.student_count, class.stats.average, class.stats.highest, class.stats.lowest
            );

            let distribution: Vec<String> = class
                .distribution
                .iter()
                .map(|(bucket, count)| format!("{bucket}={count}"))
                .collect();
            println!("Distribution: {}", distribution.join(" "));

            let mut table = Table::new();
            table.set_header(vec!["Student", "General average", "Percentile", "Status"]);
            for standing in &class.standings {
                table.add_row(vec![
                    Cell::new(format!("{} ({})", standing.student_name, standing.student_id)),
                    Cell::new(standing.general_average),
                    Cell::new(standing.percentile),
                    Cell::new(standing.status),
                ]);
            }
            println!("{table}");

            if class.at_risk.is_empty() {
                println!("No students at risk.");
            } else {
                println!("At risk: {}", class.at_risk.join(", "));
            }
        }
    }

    Ok(())
}
