//! TOML gradebook parser.
//!
//! Loads per-student gradebooks from TOML files and directories, and
//! validates them.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{
    Assessment, AssessmentKind, Gradebook, LearningStyle, Quarter, StudentProfile,
    SubjectScoreRecord,
};

/// Intermediate TOML structure for parsing gradebook files.
#[derive(Debug, Deserialize)]
struct TomlGradebookFile {
    student: TomlStudentHeader,
    #[serde(default)]
    subjects: Vec<TomlSubject>,
    #[serde(default)]
    assessments: Vec<TomlAssessment>,
}

#[derive(Debug, Deserialize)]
struct TomlStudentHeader {
    id: String,
    name: String,
    #[serde(default)]
    section: String,
    #[serde(default)]
    current_quarter: Option<u8>,
    #[serde(default = "default_attendance")]
    attendance_rate: f64,
    #[serde(default)]
    learning_style: Option<String>,
    #[serde(default)]
    history: Vec<f64>,
    #[serde(default)]
    factors: BTreeMap<String, f64>,
}

fn default_attendance() -> f64 {
    100.0
}

#[derive(Debug, Deserialize)]
struct TomlSubject {
    name: String,
    #[serde(default)]
    q1: u32,
    #[serde(default)]
    q2: u32,
    #[serde(default)]
    q3: u32,
    #[serde(default)]
    q4: u32,
    #[serde(default, rename = "final")]
    final_grade: u32,
}

#[derive(Debug, Deserialize)]
struct TomlAssessment {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    name: String,
    #[serde(default)]
    score: f64,
    total: f64,
    date: String,
}

/// Parse a single TOML file into a `Gradebook`.
pub fn parse_gradebook(path: &Path) -> Result<Gradebook> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read gradebook file: {}", path.display()))?;

    parse_gradebook_str(&content, path)
}

/// Parse a TOML string into a `Gradebook` (useful for testing).
///
/// A missing `current_quarter` defaults to the quarter of today's date.
pub fn parse_gradebook_str(content: &str, source_path: &Path) -> Result<Gradebook> {
    let parsed: TomlGradebookFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let header = parsed.student;
    let current_quarter = match header.current_quarter {
        Some(n) => Quarter::try_from(n)?,
        None => Quarter::current(),
    };
    let learning_style = header
        .learning_style
        .as_deref()
        .map(str::parse::<LearningStyle>)
        .transpose()?;

    let subjects = parsed
        .subjects
        .into_iter()
        .map(|s| {
            [s.q1, s.q2, s.q3, s.q4]
                .into_iter()
                .zip(Quarter::ALL)
                .fold(SubjectScoreRecord::new(s.name), |record, (score, q)| {
                    record.with_score(q, score)
                })
                .with_final(s.final_grade)
        })
        .collect();

    let assessments = parsed
        .assessments
        .into_iter()
        .enumerate()
        .map(|(i, a)| {
            let kind: AssessmentKind = a.kind.parse()?;
            let date = NaiveDate::parse_from_str(&a.date, "%Y-%m-%d")
                .with_context(|| format!("invalid date for assessment '{}': {}", a.name, a.date))?;
            Ok(Assessment {
                id: a.id.unwrap_or_else(|| format!("a{}", i + 1)),
                kind,
                name: a.name,
                score: a.score,
                total: a.total,
                date,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Gradebook {
        student: StudentProfile {
            id: header.id,
            name: header.name,
            section: header.section,
            current_quarter,
            attendance_rate: header.attendance_rate,
            learning_style,
            history: header.history,
            factors: header.factors,
        },
        subjects,
        assessments,
    })
}

/// Recursively load all `.toml` gradebook files from a directory.
///
/// Files that fail to parse are skipped with a warning. The result is
/// sorted by file path so output order is stable.
pub fn load_gradebook_directory(dir: &Path) -> Result<Vec<Gradebook>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = Vec::new();
    collect_toml_paths(dir, &mut paths)?;
    paths.sort();

    let mut books = Vec::new();
    for path in paths {
        match parse_gradebook(&path) {
            Ok(book) => books.push(book),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(books)
}

fn collect_toml_paths(dir: &Path, paths: &mut Vec<std::path::PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            collect_toml_paths(&path, paths)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    Ok(())
}

/// A warning from gradebook validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The subject or assessment the warning is about (if applicable).
    pub item: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a gradebook for common data-entry issues.
pub fn validate_gradebook(book: &Gradebook) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if book.subjects.is_empty() {
        warnings.push(ValidationWarning {
            item: None,
            message: "gradebook has no subjects".into(),
        });
    }

    if !(0.0..=100.0).contains(&book.student.attendance_rate) {
        warnings.push(ValidationWarning {
            item: None,
            message: format!(
                "attendance_rate {} is outside 0-100",
                book.student.attendance_rate
            ),
        });
    }

    let mut seen = HashSet::new();
    for subject in &book.subjects {
        if !seen.insert(subject.subject.to_lowercase()) {
            warnings.push(ValidationWarning {
                item: Some(subject.subject.clone()),
                message: format!("duplicate subject: {}", subject.subject),
            });
        }

        for q in Quarter::ALL {
            if let Some(score) = subject.score(q).filter(|&s| s > 100) {
                warnings.push(ValidationWarning {
                    item: Some(subject.subject.clone()),
                    message: format!("{q} score {score} is outside 1-100"),
                });
            }
        }

        if subject.final_grade > 100 {
            warnings.push(ValidationWarning {
                item: Some(subject.subject.clone()),
                message: format!("final grade {} is outside 1-100", subject.final_grade),
            });
        }
    }

    for assessment in &book.assessments {
        if assessment.total <= 0.0 {
            warnings.push(ValidationWarning {
                item: Some(assessment.id.clone()),
                message: "assessment total must be positive".into(),
            });
        } else if assessment.score > assessment.total {
            warnings.push(ValidationWarning {
                item: Some(assessment.id.clone()),
                message: format!(
                    "score {} exceeds total {}",
                    assessment.score, assessment.total
                ),
            });
        }
        if assessment.score < 0.0 {
            warnings.push(ValidationWarning {
                item: Some(assessment.id.clone()),
                message: "assessment score is negative".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[student]
id = "s-001"
name = "Avery Lee"
section = "10-A"
current_quarter = 2
attendance_rate = 92.5
learning_style = "visual"
history = [78.0, 80.0, 84.0]

[student.factors]
tutoring = 2.0

[[subjects]]
name = "Mathematics"
q1 = 78
q2 = 82

[[subjects]]
name = "Science"
q1 = 90
q2 = 0
final = 88

[[assessments]]
id = "alg-1"
type = "quiz"
name = "Algebra quiz 1"
score = 18
total = 20
date = "2026-09-04"

[[assessments]]
type = "exam"
name = "Geometry midterm"
score = 0
total = 50
date = "2026-10-10"
"#;

    #[test]
    fn parse_valid_toml() {
        let book = parse_gradebook_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(book.student.id, "s-001");
        assert_eq!(book.student.current_quarter, Quarter::Q2);
        assert_eq!(book.student.learning_style, Some(LearningStyle::Visual));
        assert_eq!(book.student.factors.get("tutoring"), Some(&2.0));
        assert_eq!(book.subjects.len(), 2);
        assert_eq!(book.subjects[0].q2, Some(82));
        assert_eq!(book.subjects[1].q2, None);
        assert_eq!(book.subjects[1].final_grade, 88);
        assert_eq!(book.assessments.len(), 2);
        assert_eq!(book.assessments[0].id, "alg-1");
        assert_eq!(book.assessments[1].id, "a2");
        assert_eq!(book.assessments[1].kind, AssessmentKind::Exam);
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[student]
id = "s-002"
name = "Jules Moreno"
current_quarter = 1
"#;
        let book = parse_gradebook_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(book.student.attendance_rate, 100.0);
        assert!(book.student.learning_style.is_none());
        assert!(book.subjects.is_empty());
        assert!(book.assessments.is_empty());
    }

    #[test]
    fn invalid_quarter_is_rejected() {
        let toml = r#"
[student]
id = "s"
name = "S"
current_quarter = 5
"#;
        let err = parse_gradebook_str(toml, &PathBuf::from("test.toml")).unwrap_err();
        assert!(err.to_string().contains("invalid quarter"));
    }

    #[test]
    fn unknown_assessment_type_is_rejected() {
        let toml = r#"
[student]
id = "s"
name = "S"
current_quarter = 1

[[assessments]]
type = "lab"
name = "Titration"
score = 8
total = 10
date = "2026-09-01"
"#;
        let err = parse_gradebook_str(toml, &PathBuf::from("test.toml")).unwrap_err();
        assert!(err.to_string().contains("unknown assessment type"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_gradebook_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_flags_data_entry_problems() {
        let toml = r#"
[student]
id = "s"
name = "S"
current_quarter = 1
attendance_rate = 104

[[subjects]]
name = "Math"
q1 = 120

[[subjects]]
name = "math"
q1 = 80

[[assessments]]
type = "quiz"
name = "Quiz"
score = 12
total = 10
date = "2026-09-01"

[[assessments]]
type = "quiz"
name = "Empty quiz"
score = 0
total = 0
date = "2026-09-02"
"#;
        let book = parse_gradebook_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_gradebook(&book);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("attendance_rate")));
        assert!(messages.iter().any(|m| m.contains("Q1 score 120")));
        assert!(messages.iter().any(|m| m.contains("duplicate subject")));
        assert!(messages.iter().any(|m| m.contains("exceeds total")));
        assert!(messages.iter().any(|m| m.contains("must be positive")));
    }

    #[test]
    fn oversized_scores_are_flagged_and_still_analyzable() {
        let toml = r#"
[student]
id = "s"
name = "S"
current_quarter = 4

[[subjects]]
name = "Math"
q1 = 4000000000
q2 = 4000000000
"#;
        let book = parse_gradebook_str(toml, &PathBuf::from("typo.toml")).unwrap();
        assert_eq!(
            crate::aggregation::grade_to_date(&book.subjects[0], Quarter::Q4),
            4_000_000_000
        );

        let warnings = validate_gradebook(&book);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("Q1 score 4000000000"));

        let report =
            crate::report::StudentReport::build(&book, &crate::config::EngineConfig::default());
        assert_eq!(report.general_average, 4_000_000_000);
        assert_eq!(report.required_improvement, 0);
    }

    #[test]
    fn validate_clean_gradebook() {
        let book = parse_gradebook_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert!(validate_gradebook(&book).is_empty());
    }

    #[test]
    fn load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("avery.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let nested = dir.path().join("section-b");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            nested.join("jules.toml"),
            "[student]\nid = \"s-002\"\nname = \"Jules\"\ncurrent_quarter = 1\n",
        )
        .unwrap();

        let books = load_gradebook_directory(dir.path()).unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].student.id, "s-001");
        assert_eq!(books[1].student.id, "s-002");
    }

    #[test]
    fn load_directory_requires_directory() {
        assert!(load_gradebook_directory(Path::new("/nonexistent-gradebooks")).is_err());
    }
}
