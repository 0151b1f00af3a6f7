//! The `gradelens init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradelens.toml").exists() {
        println!("gradelens.toml already exists, skipping.");
    } else {
        std::fs::write("gradelens.toml", SAMPLE_CONFIG)?;
        println!("Created gradelens.toml");
    }

    std::fs::create_dir_all("gradebooks")?;
    let sample_path = std::path::Path::new("gradebooks/sample.toml");
    if sample_path.exists() {
        println!("gradebooks/sample.toml already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_GRADEBOOK)?;
        println!("Created gradebooks/sample.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit gradelens.toml to match your school's thresholds");
    println!("  2. Run: gradelens validate --gradebook gradebooks/sample.toml");
    println!("  3. Run: gradelens analyze --gradebook gradebooks/sample.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradelens configuration

passing_grade = 75
risk_threshold = 75
attendance_threshold = 90
completion_threshold = 85
trend_tolerance = 2
learning_style = "visual"
"#;

const SAMPLE_GRADEBOOK: &str = r#"[student]
id = "s-001"
name = "Avery Lee"
section = "10-A"
current_quarter = 2
attendance_rate = 88.0
history = [82.0, 80.0]

[student.factors]
tutoring = 1.5

[[subjects]]
name = "Mathematics"
q1 = 74
q2 = 71

[[subjects]]
name = "Science"
q1 = 85
q2 = 88

[[subjects]]
name = "English"
q1 = 80

[[assessments]]
id = "alg-1"
type = "quiz"
name = "Algebra quiz 1"
score = 12
total = 20
date = "2026-09-04"

[[assessments]]
id = "geo-1"
type = "exam"
name = "Geometry unit exam"
score = 41
total = 50
date = "2026-09-25"

[[assessments]]
id = "stat-hw"
type = "homework"
name = "Statistics worksheet"
score = 0
total = 10
date = "2026-10-02"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn sample_files_parse() {
        let config = gradelens_core::config::EngineConfig::from_toml_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.passing_grade, 75.0);

        let book = gradelens_core::parser::parse_gradebook_str(
            SAMPLE_GRADEBOOK,
            Path::new("sample.toml"),
        )
        .unwrap();
        assert_eq!(book.subjects.len(), 3);
        assert!(gradelens_core::parser::validate_gradebook(&book).is_empty());
    }
}
