//! Custom classifier example — plug a subject-specific topic classifier
//! into the knowledge-gap engine.
//!
//! ```bash
//! cargo run -p gradelens-core --example custom_classifier -- gradebooks/sample.toml
//! ```

use std::env;

use gradelens_core::config::load_config;
use gradelens_core::parser::parse_gradebook;
use gradelens_core::report::StudentReport;
use gradelens_core::traits::TopicClassifier;

/// Groups English assessments by skill instead of math topic.
struct LanguageArtsClassifier;

impl TopicClassifier for LanguageArtsClassifier {
    fn name(&self) -> &str {
        "language-arts"
    }

    fn classify(&self, assessment_name: &str) -> String {
        let name = assessment_name.to_lowercase();
        let topic = if name.contains("essay") || name.contains("composition") {
            "writing"
        } else if name.contains("grammar") || name.contains("usage") {
            "grammar"
        } else if name.contains("novel") || name.contains("reading") {
            "reading"
        } else {
            "general"
        };
        topic.to_string()
    }
}

fn main() -> anyhow::Result<()> {
    let Some(path) = env::args().nth(1) else {
        anyhow::bail!("usage: custom_classifier <gradebook.toml>");
    };

    let config = load_config()?;
    let book = parse_gradebook(path.as_ref())?;

    let report = StudentReport::build_with(&book, &config, &LanguageArtsClassifier);
    println!(
        "{}: general average {} ({})",
        report.student_name, report.general_average, report.overall_status
    );

    for (gap, plan) in report.knowledge_gaps.iter().zip(&report.study_plan) {
        println!(
            "  {:<10} {:>3}%  {:<10} {} min",
            gap.topic, gap.proficiency, gap.status, plan.estimated_study_time
        );
    }

    Ok(())
}
