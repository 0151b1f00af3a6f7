//! Per-student and per-class analysis bundles with JSON persistence.
//!
//! A report is the full set of engine outputs a renderer needs for one
//! student or one class. Building one is pure; only `save_json` and
//! `load_json` touch the filesystem.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::aggregation::{general_average, process_grades_with};
use crate::config::EngineConfig;
use crate::grading::{classify_status, is_at_risk, letter_grade, performance_level};
use crate::model::{Gradebook, Quarter};
use crate::results::{
    ClassStats, GradeStatus, KnowledgeGap, LetterBucket, PerformanceLevel, Prediction,
    ProcessedGrade, RiskAssessment, StudyRecommendation, TrendDirection,
};
use crate::risk::{knowledge_gaps_with, risk_assessment_with, study_recommendations};
use crate::statistics::{class_stats, completion_rate, grade_distribution, percentile_rank};
use crate::traits::{KeywordClassifier, TopicClassifier};
use crate::trend::{predict_future_performance, required_improvement, trend_with_tolerance};

/// Every engine output for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    pub student_id: String,
    pub student_name: String,
    #[serde(default)]
    pub section: String,
    pub current_quarter: Quarter,
    pub grades: Vec<ProcessedGrade>,
    pub general_average: u32,
    pub overall_status: GradeStatus,
    pub letter_grade: String,
    pub performance_level: PerformanceLevel,
    pub at_risk: bool,
    /// Points per remaining quarter needed to reach the passing grade.
    pub required_improvement: i64,
    pub attendance_rate: f64,
    pub completion_rate: u32,
    pub trend: TrendDirection,
    pub prediction: Prediction,
    pub risk: RiskAssessment,
    pub knowledge_gaps: Vec<KnowledgeGap>,
    pub study_plan: Vec<StudyRecommendation>,
}

impl StudentReport {
    /// Run the engine over one gradebook with the default topic classifier.
    pub fn build(book: &Gradebook, config: &EngineConfig) -> Self {
        Self::build_with(book, config, &KeywordClassifier::default())
    }

    /// Run the engine over one gradebook.
    ///
    /// The grade history used for trend and prediction is the student's
    /// past general averages followed by the current one (when any subject
    /// exists).
    pub fn build_with(
        book: &Gradebook,
        config: &EngineConfig,
        classifier: &dyn TopicClassifier,
    ) -> Self {
        let student = &book.student;
        let quarter = student.current_quarter;

        let grades = process_grades_with(&book.subjects, quarter, config.passing_grade);
        let average = general_average(&grades);
        let average_f = f64::from(average);

        let mut history = student.history.clone();
        if !grades.is_empty() {
            history.push(average_f);
        }

        let completion = completion_rate(&book.assessments);
        let gaps = knowledge_gaps_with(classifier, &book.assessments);
        let style = student.learning_style.unwrap_or(config.learning_style);

        let report = Self {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            section: student.section.clone(),
            current_quarter: quarter,
            general_average: average,
            overall_status: classify_status(average_f, config.passing_grade),
            letter_grade: letter_grade(average_f).to_string(),
            performance_level: performance_level(average_f),
            at_risk: is_at_risk(average_f, config.risk_threshold),
            required_improvement: required_improvement(
                average_f,
                config.passing_grade,
                i32::from(quarter.remaining()),
            ),
            attendance_rate: student.attendance_rate,
            completion_rate: completion,
            trend: trend_with_tolerance(&history, config.trend_tolerance),
            prediction: predict_future_performance(&history, &student.factors),
            risk: risk_assessment_with(
                &config.risk_thresholds(),
                average_f,
                student.attendance_rate,
                f64::from(completion),
            ),
            study_plan: study_recommendations(&gaps, style),
            knowledge_gaps: gaps,
            grades,
        };

        tracing::debug!(
            student = %report.student_id,
            general_average = report.general_average,
            risk = %report.risk.risk_level,
            "built student report"
        );

        report
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

/// One student's place in the class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStanding {
    pub student_id: String,
    pub student_name: String,
    pub general_average: u32,
    pub percentile: u32,
    pub status: GradeStatus,
}

/// Class-wide statistics over students' general averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    pub student_count: usize,
    pub stats: ClassStats,
    pub distribution: BTreeMap<LetterBucket, usize>,
    /// Highest general average first; ties keep input order.
    pub standings: Vec<ClassStanding>,
    /// IDs of students flagged at risk.
    pub at_risk: Vec<String>,
}

impl ClassReport {
    pub fn build(students: &[StudentReport]) -> Self {
        let averages: Vec<f64> = students
            .iter()
            .map(|s| f64::from(s.general_average))
            .collect();

        let mut standings: Vec<ClassStanding> = students
            .iter()
            .map(|s| ClassStanding {
                student_id: s.student_id.clone(),
                student_name: s.student_name.clone(),
                general_average: s.general_average,
                percentile: percentile_rank(f64::from(s.general_average), &averages),
                status: s.overall_status,
            })
            .collect();
        standings.sort_by(|a, b| b.general_average.cmp(&a.general_average));

        let at_risk = students
            .iter()
            .filter(|s| s.at_risk)
            .map(|s| s.student_id.clone())
            .collect();

        Self {
            student_count: students.len(),
            stats: class_stats(&averages),
            distribution: grade_distribution(&averages),
            standings,
            at_risk,
        }
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report from {}", path.display()))?;
    serde_json::from_str(&content).context("failed to parse report JSON")
}
