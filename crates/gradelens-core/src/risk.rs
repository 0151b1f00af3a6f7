//! Risk assessment, knowledge-gap detection and study recommendations.

use crate::grading::DEFAULT_PASSING_GRADE;
use crate::model::{Assessment, LearningStyle};
use crate::results::{
    GapStatus, KnowledgeGap, RiskAssessment, RiskLevel, StudyPriority, StudyRecommendation,
};
use crate::traits::{KeywordClassifier, TopicClassifier};

/// Attendance percentage below which attendance is a risk factor.
pub const ATTENDANCE_THRESHOLD: f64 = 90.0;

/// Completion percentage below which completion is a risk factor.
pub const COMPLETION_THRESHOLD: f64 = 85.0;

const GRADE_FACTOR: (&str, &str) = ("Below grade threshold", "Schedule tutoring sessions");
const ATTENDANCE_FACTOR: (&str, &str) = ("Low attendance rate", "Improve class attendance");
const COMPLETION_FACTOR: (&str, &str) = ("Incomplete assignments", "Complete missing assignments");

/// Cut-offs for the three risk checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub grade: f64,
    pub attendance: f64,
    pub completion: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            grade: DEFAULT_PASSING_GRADE,
            attendance: ATTENDANCE_THRESHOLD,
            completion: COMPLETION_THRESHOLD,
        }
    }
}

/// Risk assessment with a custom grade threshold and the standard
/// attendance and completion cut-offs.
pub fn risk_assessment(
    current_grade: f64,
    attendance_rate: f64,
    completion_rate: f64,
    threshold: f64,
) -> RiskAssessment {
    let thresholds = RiskThresholds {
        grade: threshold,
        ..RiskThresholds::default()
    };
    risk_assessment_with(&thresholds, current_grade, attendance_rate, completion_rate)
}

/// Run the grade, attendance and completion checks in that order. Each
/// triggered check adds one factor and one recommendation.
pub fn risk_assessment_with(
    thresholds: &RiskThresholds,
    current_grade: f64,
    attendance_rate: f64,
    completion_rate: f64,
) -> RiskAssessment {
    let checks = [
        (current_grade < thresholds.grade, GRADE_FACTOR),
        (attendance_rate < thresholds.attendance, ATTENDANCE_FACTOR),
        (completion_rate < thresholds.completion, COMPLETION_FACTOR),
    ];

    let (factors, recommendations): (Vec<String>, Vec<String>) = checks
        .into_iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, (factor, recommendation))| (factor.to_string(), recommendation.to_string()))
        .unzip();

    RiskAssessment {
        risk_level: RiskLevel::from_factor_count(factors.len()),
        factors,
        recommendations,
    }
}

/// Knowledge gaps using the default keyword classifier.
pub fn knowledge_gaps(assessments: &[Assessment]) -> Vec<KnowledgeGap> {
    knowledge_gaps_with(&KeywordClassifier::default(), assessments)
}

/// Group assessments by topic and compute each topic's proficiency.
///
/// Topics appear in the order they are first seen. A topic whose totals sum
/// to zero has proficiency 0.
pub fn knowledge_gaps_with(
    classifier: &dyn TopicClassifier,
    assessments: &[Assessment],
) -> Vec<KnowledgeGap> {
    let mut topics: Vec<(String, f64, f64)> = Vec::new();

    for assessment in assessments {
        let topic = classifier.classify(&assessment.name);
        match topics.iter_mut().find(|(t, _, _)| *t == topic) {
            Some((_, earned, possible)) => {
                *earned += assessment.score;
                *possible += assessment.total;
            }
            None => topics.push((topic, assessment.score, assessment.total)),
        }
    }

    tracing::debug!(
        classifier = classifier.name(),
        topics = topics.len(),
        "grouped assessments by topic"
    );

    topics
        .into_iter()
        .map(|(topic, earned, possible)| {
            let proficiency = if possible > 0.0 {
                (100.0 * earned / possible).round().clamp(0.0, 100.0) as u32
            } else {
                0
            };
            KnowledgeGap {
                topic,
                proficiency,
                status: GapStatus::for_proficiency(proficiency),
            }
        })
        .collect()
}

/// Minutes of study suggested for a proficiency.
pub fn estimated_study_time(proficiency: u32) -> u32 {
    if proficiency < 60 {
        120
    } else if proficiency < 75 {
        90
    } else {
        60
    }
}

/// One study plan entry per gap, in gap order.
pub fn study_recommendations(
    gaps: &[KnowledgeGap],
    learning_style: LearningStyle,
) -> Vec<StudyRecommendation> {
    let resources: Vec<String> = learning_style
        .resources()
        .iter()
        .map(|r| r.to_string())
        .collect();

    gaps.iter()
        .map(|gap| StudyRecommendation {
            topic: gap.topic.clone(),
            resources: resources.clone(),
            priority: StudyPriority::from(GapStatus::for_proficiency(gap.proficiency)),
            estimated_study_time: estimated_study_time(gap.proficiency),
        })
        .collect()
}
