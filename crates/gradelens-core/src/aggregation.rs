//! Quarter aggregation: grade-to-date per subject and the general average.
//!
//! Adding, removing, renaming or editing subjects is the caller's business.
//! After any such edit the caller re-runs [`process_grades`] and
//! [`general_average`]; nothing here keeps state between calls.

use crate::grading::{classify_status, DEFAULT_PASSING_GRADE};
use crate::model::{Quarter, SubjectScoreRecord};
use crate::results::{GradeStatus, ProcessedGrade};

/// Rounded average of the recorded quarters from Q1 through `current`.
///
/// Falls back to the record's final grade when none of those quarters has
/// been recorded.
pub fn grade_to_date(record: &SubjectScoreRecord, current: Quarter) -> u32 {
    let (sum, count) = record
        .scores_through(current)
        .fold((0u64, 0u32), |(sum, count), score| {
            (sum + u64::from(score), count + 1)
        });

    if count == 0 {
        return record.final_grade;
    }

    (sum as f64 / f64::from(count)).round() as u32
}

/// Grade-to-date and status for every record, in input order, against the
/// default passing grade.
pub fn process_grades(records: &[SubjectScoreRecord], current: Quarter) -> Vec<ProcessedGrade> {
    process_grades_with(records, current, DEFAULT_PASSING_GRADE)
}

/// [`process_grades`] with an explicit passing grade.
pub fn process_grades_with(
    records: &[SubjectScoreRecord],
    current: Quarter,
    passing_grade: f64,
) -> Vec<ProcessedGrade> {
    let processed: Vec<ProcessedGrade> = records
        .iter()
        .map(|record| {
            let grade_to_date = grade_to_date(record, current);
            ProcessedGrade {
                record: record.clone(),
                grade_to_date,
                status: classify_status(f64::from(grade_to_date), passing_grade),
            }
        })
        .collect();

    tracing::debug!(
        subjects = processed.len(),
        quarter = %current,
        "processed subject grades"
    );

    processed
}

/// Rounded mean of all grades-to-date; 0 when there are no subjects.
pub fn general_average(processed: &[ProcessedGrade]) -> u32 {
    if processed.is_empty() {
        return 0;
    }
    let sum: u64 = processed.iter().map(|p| u64::from(p.grade_to_date)).sum();
    (sum as f64 / processed.len() as f64).round() as u32
}

/// Status of the general average against the default passing grade.
pub fn overall_status(general_average: u32) -> GradeStatus {
    classify_status(f64::from(general_average), DEFAULT_PASSING_GRADE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject: &str, scores: [u32; 4], final_grade: u32) -> SubjectScoreRecord {
        Quarter::ALL
            .into_iter()
            .zip(scores)
            .fold(SubjectScoreRecord::new(subject), |r, (q, s)| r.with_score(q, s))
            .with_final(final_grade)
    }

    #[test]
    fn grade_to_date_counts_only_recorded_quarters() {
        let r = record("Math", [80, 0, 0, 0], 70);
        assert_eq!(grade_to_date(&r, Quarter::Q1), 80);
        assert_eq!(grade_to_date(&r, Quarter::Q3), 80);
    }

    #[test]
    fn grade_to_date_falls_back_to_final() {
        let r = record("Math", [0, 0, 0, 0], 70);
        for q in Quarter::ALL {
            assert_eq!(grade_to_date(&r, q), 70);
        }
    }

    #[test]
    fn grade_to_date_ignores_future_quarters() {
        let r = record("Science", [80, 85, 60, 60], 0);
        assert_eq!(grade_to_date(&r, Quarter::Q2), 83);
        assert_eq!(grade_to_date(&r, Quarter::Q4), 71);
    }

    #[test]
    fn grade_to_date_rounds_half_up() {
        let r = record("English", [80, 81, 0, 0], 0);
        assert_eq!(grade_to_date(&r, Quarter::Q2), 81);
    }

    #[test]
    fn process_grades_preserves_order_and_is_repeatable() {
        let records = vec![
            record("Science", [90, 0, 0, 0], 0),
            record("Art", [72, 0, 0, 0], 0),
            record("Math", [60, 0, 0, 0], 0),
        ];
        let first = process_grades(&records, Quarter::Q1);
        let second = process_grades(&records, Quarter::Q1);
        assert_eq!(first, second);

        let subjects: Vec<&str> = first.iter().map(|p| p.record.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Science", "Art", "Math"]);
        let statuses: Vec<GradeStatus> = first.iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![GradeStatus::Passing, GradeStatus::Warning, GradeStatus::Failing]
        );
    }

    #[test]
    fn process_grades_with_custom_passing_grade() {
        let records = vec![record("Math", [78, 0, 0, 0], 0)];
        let processed = process_grades_with(&records, Quarter::Q1, 80.0);
        assert_eq!(processed[0].status, GradeStatus::Warning);
    }

    #[test]
    fn general_average_handles_empty() {
        assert_eq!(general_average(&[]), 0);
        assert_eq!(overall_status(general_average(&[])), GradeStatus::Failing);
    }

    #[test]
    fn general_average_rounds_mean() {
        let records = vec![
            record("A", [90, 0, 0, 0], 0),
            record("B", [85, 0, 0, 0], 0),
        ];
        let processed = process_grades(&records, Quarter::Q1);
        assert_eq!(general_average(&processed), 88);
        assert_eq!(overall_status(88), GradeStatus::Passing);
    }

    #[test]
    fn oversized_scores_do_not_overflow() {
        let r = record("Math", [u32::MAX, u32::MAX, 4_000_000_000, 0], 0);
        assert_eq!(grade_to_date(&r, Quarter::Q4), 4_196_644_863);

        let records = vec![r.clone(), r];
        let processed = process_grades(&records, Quarter::Q2);
        assert_eq!(processed[0].grade_to_date, u32::MAX);
        assert_eq!(general_average(&processed), u32::MAX);
        assert_eq!(processed[0].status, GradeStatus::Passing);
    }
}
