//! Core input data model for gradelens.
//!
//! These are the caller-supplied records the engine consumes: quarterly
//! subject scores, graded assessments, and the per-student gradebook that
//! bundles them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GradeError;

/// An academic sub-period of the school year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quarter {
    Q1 = 1,
    Q2 = 2,
    Q3 = 3,
    Q4 = 4,
}

impl Quarter {
    /// All quarters in calendar order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// The quarter number, 1 through 4.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Quarters still ahead of this one in the school year.
    pub fn remaining(self) -> u8 {
        4 - self.number()
    }

    /// Default quarter for a calendar month.
    ///
    /// The school year starts in August: Aug-Oct is Q1, Nov-Jan is Q2,
    /// Feb-Apr is Q3 and May-Jul is Q4.
    pub fn for_month(month: Month) -> Self {
        match month {
            Month::August | Month::September | Month::October => Quarter::Q1,
            Month::November | Month::December | Month::January => Quarter::Q2,
            Month::February | Month::March | Month::April => Quarter::Q3,
            Month::May | Month::June | Month::July => Quarter::Q4,
        }
    }

    /// Default quarter for today's date in local time.
    pub fn current() -> Self {
        let month = chrono::Local::now().date_naive().month();
        u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(Self::for_month)
            .unwrap_or(Quarter::Q1)
    }
}

impl TryFrom<u8> for Quarter {
    type Error = GradeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Quarter::Q1),
            2 => Ok(Quarter::Q2),
            3 => Ok(Quarter::Q3),
            4 => Ok(Quarter::Q4),
            other => Err(GradeError::InvalidQuarter(other.to_string())),
        }
    }
}

impl From<Quarter> for u8 {
    fn from(q: Quarter) -> Self {
        q.number()
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

impl FromStr for Quarter {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('q')
            .or_else(|| trimmed.strip_prefix('Q'))
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .ok()
            .and_then(|n| Quarter::try_from(n).ok())
            .ok_or_else(|| GradeError::InvalidQuarter(trimmed.to_string()))
    }
}

/// One subject's quarterly scores for a single student.
///
/// A `None` quarter means "not yet recorded". Legacy inputs that use `0` as
/// the missing marker are read as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectScoreRecord {
    /// Subject name.
    pub subject: String,
    #[serde(default, deserialize_with = "recorded_score", skip_serializing_if = "Option::is_none")]
    pub q1: Option<u32>,
    #[serde(default, deserialize_with = "recorded_score", skip_serializing_if = "Option::is_none")]
    pub q2: Option<u32>,
    #[serde(default, deserialize_with = "recorded_score", skip_serializing_if = "Option::is_none")]
    pub q3: Option<u32>,
    #[serde(default, deserialize_with = "recorded_score", skip_serializing_if = "Option::is_none")]
    pub q4: Option<u32>,
    /// Final grade, used when no quarter up to the current one is recorded.
    #[serde(rename = "final", default)]
    pub final_grade: u32,
}

fn recorded_score<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<u32> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|&score| score > 0))
}

impl SubjectScoreRecord {
    /// A record with no quarters recorded yet.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            q1: None,
            q2: None,
            q3: None,
            q4: None,
            final_grade: 0,
        }
    }

    /// Builder-style helper that records one quarter.
    pub fn with_score(mut self, quarter: Quarter, score: u32) -> Self {
        self.set_score(quarter, Some(score).filter(|&s| s > 0));
        self
    }

    /// Builder-style helper that sets the final grade.
    pub fn with_final(mut self, final_grade: u32) -> Self {
        self.final_grade = final_grade;
        self
    }

    /// The recorded score for a quarter, if any.
    pub fn score(&self, quarter: Quarter) -> Option<u32> {
        match quarter {
            Quarter::Q1 => self.q1,
            Quarter::Q2 => self.q2,
            Quarter::Q3 => self.q3,
            Quarter::Q4 => self.q4,
        }
    }

    /// Overwrite one quarter without range checks.
    pub fn set_score(&mut self, quarter: Quarter, score: Option<u32>) {
        let slot = match quarter {
            Quarter::Q1 => &mut self.q1,
            Quarter::Q2 => &mut self.q2,
            Quarter::Q3 => &mut self.q3,
            Quarter::Q4 => &mut self.q4,
        };
        *slot = score;
    }

    /// Record a score for one quarter, rejecting values outside 1-100.
    pub fn record(&mut self, quarter: Quarter, score: u32) -> Result<(), GradeError> {
        if !(1..=100).contains(&score) {
            return Err(GradeError::ScoreOutOfRange {
                subject: self.subject.clone(),
                score,
            });
        }
        self.set_score(quarter, Some(score));
        Ok(())
    }

    /// Recorded scores from Q1 up to and including `current`.
    pub fn scores_through(&self, current: Quarter) -> impl Iterator<Item = u32> + '_ {
        Quarter::ALL
            .into_iter()
            .filter(move |q| *q <= current)
            .filter_map(|q| self.score(q))
    }
}

/// The kind of graded event an assessment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentKind {
    Quiz,
    Exam,
    Homework,
    Project,
    Performance,
    Written,
    Quarterly,
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AssessmentKind::Quiz => "quiz",
            AssessmentKind::Exam => "exam",
            AssessmentKind::Homework => "homework",
            AssessmentKind::Project => "project",
            AssessmentKind::Performance => "performance",
            AssessmentKind::Written => "written",
            AssessmentKind::Quarterly => "quarterly",
        };
        f.write_str(label)
    }
}

impl FromStr for AssessmentKind {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quiz" => Ok(AssessmentKind::Quiz),
            "exam" => Ok(AssessmentKind::Exam),
            "homework" | "hw" => Ok(AssessmentKind::Homework),
            "project" => Ok(AssessmentKind::Project),
            "performance" => Ok(AssessmentKind::Performance),
            "written" => Ok(AssessmentKind::Written),
            "quarterly" => Ok(AssessmentKind::Quarterly),
            other => Err(GradeError::UnknownAssessmentKind(other.to_string())),
        }
    }
}

/// One graded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Identifier unique within a gradebook.
    pub id: String,
    /// Kind of assessment.
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    /// Display name; also the source of topic classification.
    pub name: String,
    /// Points earned. Zero means not yet submitted.
    pub score: f64,
    /// Points possible.
    pub total: f64,
    /// Date the assessment was given.
    pub date: NaiveDate,
}

/// Preferred way of learning, used to pick study resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    #[default]
    Visual,
    Auditory,
    Kinesthetic,
}

impl LearningStyle {
    /// Fixed resource list for this style.
    pub fn resources(self) -> [&'static str; 3] {
        match self {
            LearningStyle::Visual => [
                "Video tutorials",
                "Infographics and diagrams",
                "Mind maps",
            ],
            LearningStyle::Auditory => [
                "Podcasts and audio lectures",
                "Study group discussions",
                "Recorded explanations",
            ],
            LearningStyle::Kinesthetic => [
                "Hands-on practice problems",
                "Interactive simulations",
                "Real-world applications",
            ],
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningStyle::Visual => write!(f, "visual"),
            LearningStyle::Auditory => write!(f, "auditory"),
            LearningStyle::Kinesthetic => write!(f, "kinesthetic"),
        }
    }
}

impl FromStr for LearningStyle {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "visual" => Ok(LearningStyle::Visual),
            "auditory" => Ok(LearningStyle::Auditory),
            "kinesthetic" => Ok(LearningStyle::Kinesthetic),
            other => Err(GradeError::UnknownLearningStyle(other.to_string())),
        }
    }
}

/// Who a gradebook belongs to and the context for evaluating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Student identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Class section.
    #[serde(default)]
    pub section: String,
    /// Quarter the grades are evaluated against.
    pub current_quarter: Quarter,
    /// Attendance percentage, 0-100.
    pub attendance_rate: f64,
    /// Preferred learning style; falls back to the configured default.
    #[serde(default)]
    pub learning_style: Option<LearningStyle>,
    /// Past general averages, earliest first.
    #[serde(default)]
    pub history: Vec<f64>,
    /// Named adjustments added to the predicted grade.
    #[serde(default)]
    pub factors: BTreeMap<String, f64>,
}

/// Everything recorded for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradebook {
    pub student: StudentProfile,
    #[serde(default)]
    pub subjects: Vec<SubjectScoreRecord>,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_parse_and_display() {
        assert_eq!("q3".parse::<Quarter>().unwrap(), Quarter::Q3);
        assert_eq!("Q1".parse::<Quarter>().unwrap(), Quarter::Q1);
        assert_eq!("4".parse::<Quarter>().unwrap(), Quarter::Q4);
        assert_eq!(Quarter::Q2.to_string(), "Q2");
        assert!("5".parse::<Quarter>().is_err());
        assert!("q".parse::<Quarter>().is_err());
        assert_eq!(
            Quarter::try_from(0),
            Err(GradeError::InvalidQuarter("0".into()))
        );
        assert_eq!(
            "qx".parse::<Quarter>(),
            Err(GradeError::InvalidQuarter("qx".into()))
        );
        assert_eq!(
            "300".parse::<Quarter>().unwrap_err().to_string(),
            "invalid quarter: 300 (expected 1-4)"
        );
        assert_eq!(
            "q7".parse::<Quarter>(),
            Err(GradeError::InvalidQuarter("q7".into()))
        );
    }

    #[test]
    fn quarter_for_month_follows_school_calendar() {
        assert_eq!(Quarter::for_month(Month::August), Quarter::Q1);
        assert_eq!(Quarter::for_month(Month::December), Quarter::Q2);
        assert_eq!(Quarter::for_month(Month::January), Quarter::Q2);
        assert_eq!(Quarter::for_month(Month::March), Quarter::Q3);
        assert_eq!(Quarter::for_month(Month::June), Quarter::Q4);
        assert_eq!(Quarter::Q1.remaining(), 3);
        assert_eq!(Quarter::Q4.remaining(), 0);
    }

    #[test]
    fn zero_scores_deserialize_as_missing() {
        let json = r#"{"subject":"Math","q1":80,"q2":0,"q3":0,"q4":0,"final":70}"#;
        let record: SubjectScoreRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.q1, Some(80));
        assert_eq!(record.q2, None);
        assert_eq!(record.final_grade, 70);

        let back = serde_json::to_string(&record).unwrap();
        assert!(!back.contains("q2"));
        assert!(back.contains(r#""final":70"#));
    }

    #[test]
    fn scores_through_stops_at_current_quarter() {
        let record = SubjectScoreRecord::new("Science")
            .with_score(Quarter::Q1, 80)
            .with_score(Quarter::Q3, 90)
            .with_score(Quarter::Q4, 70);
        let through_q2: Vec<u32> = record.scores_through(Quarter::Q2).collect();
        assert_eq!(through_q2, vec![80]);
        let through_q4: Vec<u32> = record.scores_through(Quarter::Q4).collect();
        assert_eq!(through_q4, vec![80, 90, 70]);
    }

    #[test]
    fn record_rejects_out_of_range_scores() {
        let mut record = SubjectScoreRecord::new("English");
        assert!(record.record(Quarter::Q1, 0).is_err());
        assert!(record.record(Quarter::Q1, 101).is_err());
        record.record(Quarter::Q1, 88).unwrap();
        assert_eq!(record.score(Quarter::Q1), Some(88));
    }

    #[test]
    fn assessment_kind_and_style_parse() {
        assert_eq!("Quiz".parse::<AssessmentKind>().unwrap(), AssessmentKind::Quiz);
        assert_eq!("hw".parse::<AssessmentKind>().unwrap(), AssessmentKind::Homework);
        assert!("lab".parse::<AssessmentKind>().is_err());
        assert_eq!(
            "Kinesthetic".parse::<LearningStyle>().unwrap(),
            LearningStyle::Kinesthetic
        );
        assert_eq!(LearningStyle::default(), LearningStyle::Visual);
    }

    #[test]
    fn assessment_serde_uses_type_key() {
        let assessment = Assessment {
            id: "a1".into(),
            kind: AssessmentKind::Exam,
            name: "Algebra midterm".into(),
            score: 42.0,
            total: 50.0,
            date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
        };
        let json = serde_json::to_string(&assessment).unwrap();
        assert!(json.contains(r#""type":"exam""#));
        assert!(json.contains(r#""date":"2026-09-14""#));
        let parsed: Assessment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, assessment);
    }
}
