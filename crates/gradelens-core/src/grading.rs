//! Grade arithmetic: percentages, letter grades, status and performance bands.

use crate::results::{GradeStatus, PerformanceLevel};

/// Passing grade used when the caller does not supply one.
pub const DEFAULT_PASSING_GRADE: f64 = 75.0;

/// Width of the warning band below the passing grade.
pub const WARNING_BAND: f64 = 5.0;

/// Letter breakpoints as inclusive lower bounds, highest first.
const LETTER_BREAKPOINTS: [(f64, &str); 12] = [
    (97.0, "A+"),
    (93.0, "A"),
    (90.0, "A-"),
    (87.0, "B+"),
    (83.0, "B"),
    (80.0, "B-"),
    (77.0, "C+"),
    (73.0, "C"),
    (70.0, "C-"),
    (67.0, "D+"),
    (63.0, "D"),
    (60.0, "D-"),
];

const PERFORMANCE_BREAKPOINTS: [(f64, PerformanceLevel); 4] = [
    (90.0, PerformanceLevel::Excellent),
    (80.0, PerformanceLevel::VeryGood),
    (75.0, PerformanceLevel::Satisfactory),
    (70.0, PerformanceLevel::NeedsImprovement),
];

/// `score / total` as a percentage value. A zero total yields 0.
pub fn percentage_value(score: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    score / total * 100.0
}

/// `score / total` formatted to one decimal place with a trailing `%`.
///
/// Callers are expected to pass a non-zero total; a zero total renders as
/// `0.0%` rather than `NaN%`.
pub fn percentage(score: f64, total: f64) -> String {
    format!("{:.1}%", percentage_value(score, total))
}

/// Classify a grade against a passing grade.
///
/// At or above `passing_grade` is passing, within [`WARNING_BAND`] below it
/// is a warning, anything lower fails. Non-finite grades count as 0.
pub fn classify_status(grade: f64, passing_grade: f64) -> GradeStatus {
    let grade = if grade.is_finite() { grade } else { 0.0 };
    if grade >= passing_grade {
        GradeStatus::Passing
    } else if grade >= passing_grade - WARNING_BAND {
        GradeStatus::Warning
    } else {
        GradeStatus::Failing
    }
}

/// [`classify_status`] for a grade that may be absent; absent counts as 0.
pub fn classify_recorded(grade: Option<f64>, passing_grade: f64) -> GradeStatus {
    classify_status(grade.unwrap_or(0.0), passing_grade)
}

pub fn letter_grade(percentage: f64) -> &'static str {
    LETTER_BREAKPOINTS
        .iter()
        .find(|(floor, _)| percentage >= *floor)
        .map(|(_, letter)| *letter)
        .unwrap_or("F")
}

pub fn performance_level(score: f64) -> PerformanceLevel {
    PERFORMANCE_BREAKPOINTS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, level)| *level)
        .unwrap_or(PerformanceLevel::BelowExpectations)
}

/// `true` when `score` is strictly below `threshold`.
pub fn is_at_risk(score: f64, threshold: f64) -> bool {
    score < threshold
}
