//! Derived result types produced by the engine.
//!
//! Everything here is computed on demand from caller-supplied input and
//! never stored on its own. The engine emits enumerated levels only; mapping
//! them to colors or badges is the renderer's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::SubjectScoreRecord;

/// Pass/fail classification of a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    Passing,
    Warning,
    Failing,
}

impl fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeStatus::Passing => write!(f, "passing"),
            GradeStatus::Warning => write!(f, "warning"),
            GradeStatus::Failing => write!(f, "failing"),
        }
    }
}

/// A subject record together with its grade-to-date and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedGrade {
    #[serde(flatten)]
    pub record: SubjectScoreRecord,
    /// Rounded average of recorded quarters up to the current one.
    pub grade_to_date: u32,
    pub status: GradeStatus,
}

/// Descriptive band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Excellent,
    VeryGood,
    Satisfactory,
    NeedsImprovement,
    BelowExpectations,
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::VeryGood => "Very Good",
            PerformanceLevel::Satisfactory => "Satisfactory",
            PerformanceLevel::NeedsImprovement => "Needs Improvement",
            PerformanceLevel::BelowExpectations => "Below Expectations",
        };
        f.write_str(label)
    }
}

/// Average, maximum and minimum over a set of scores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassStats {
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
}

/// Coarse letter bucket used by grade distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterBucket {
    A,
    B,
    C,
    D,
    F,
}

impl LetterBucket {
    /// Bucket for a percentage score.
    pub fn for_score(score: f64) -> Self {
        if score >= 90.0 {
            LetterBucket::A
        } else if score >= 80.0 {
            LetterBucket::B
        } else if score >= 70.0 {
            LetterBucket::C
        } else if score >= 60.0 {
            LetterBucket::D
        } else {
            LetterBucket::F
        }
    }
}

impl fmt::Display for LetterBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Direction of a grade history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Trend label attached to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictedTrend {
    Improving,
    Declining,
    Stable,
}

impl From<TrendDirection> for PredictedTrend {
    fn from(direction: TrendDirection) -> Self {
        match direction {
            TrendDirection::Up => PredictedTrend::Improving,
            TrendDirection::Down => PredictedTrend::Declining,
            TrendDirection::Stable => PredictedTrend::Stable,
        }
    }
}

impl fmt::Display for PredictedTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictedTrend::Improving => write!(f, "improving"),
            PredictedTrend::Declining => write!(f, "declining"),
            PredictedTrend::Stable => write!(f, "stable"),
        }
    }
}

/// Heuristic forecast of the next grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_grade: i32,
    /// 0-100.
    pub confidence_level: u32,
    pub trend: PredictedTrend,
}

/// Overall risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Band for the number of triggered risk factors.
    pub fn from_factor_count(count: usize) -> Self {
        match count {
            0 => RiskLevel::Low,
            1 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::Low => write!(f, "low"),
        }
    }
}

/// Composite risk outcome. Factors and recommendations are paired and keep
/// the order the checks ran in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Severity of a topic's knowledge gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapStatus {
    Critical,
    Concerning,
    Adequate,
}

impl GapStatus {
    pub fn for_proficiency(proficiency: u32) -> Self {
        if proficiency < 60 {
            GapStatus::Critical
        } else if proficiency < 75 {
            GapStatus::Concerning
        } else {
            GapStatus::Adequate
        }
    }
}

impl fmt::Display for GapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapStatus::Critical => write!(f, "critical"),
            GapStatus::Concerning => write!(f, "concerning"),
            GapStatus::Adequate => write!(f, "adequate"),
        }
    }
}

/// Proficiency within one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGap {
    pub topic: String,
    /// Percent of possible points earned, 0-100.
    pub proficiency: u32,
    pub status: GapStatus,
}

/// How urgently a topic should be studied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyPriority {
    High,
    Medium,
    Low,
}

impl From<GapStatus> for StudyPriority {
    fn from(status: GapStatus) -> Self {
        match status {
            GapStatus::Critical => StudyPriority::High,
            GapStatus::Concerning => StudyPriority::Medium,
            GapStatus::Adequate => StudyPriority::Low,
        }
    }
}

impl fmt::Display for StudyPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyPriority::High => write!(f, "high"),
            StudyPriority::Medium => write!(f, "medium"),
            StudyPriority::Low => write!(f, "low"),
        }
    }
}

/// A study plan entry for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyRecommendation {
    pub topic: String,
    pub resources: Vec<String>,
    pub priority: StudyPriority,
    /// Suggested minutes of study.
    pub estimated_study_time: u32,
}
