//! Input error types.
//!
//! Engine computations are total and never fail. These errors only arise
//! when raw input (quarter numbers, assessment types, learning styles,
//! recorded scores) is converted into the typed data model.

use thiserror::Error;

/// Errors raised while building the data model from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// A quarter outside 1..=4, carrying the raw input.
    #[error("invalid quarter: {0} (expected 1-4)")]
    InvalidQuarter(String),

    /// An assessment type that is not one of the known kinds.
    #[error("unknown assessment type: {0}")]
    UnknownAssessmentKind(String),

    /// A learning style other than visual, auditory or kinesthetic.
    #[error("unknown learning style: {0}")]
    UnknownLearningStyle(String),

    /// A recorded score outside the 1-100 grade range.
    #[error("score {score} for {subject} is outside 1-100")]
    ScoreOutOfRange { subject: String, score: u32 },
}

impl GradeError {
    /// Returns `true` if the error comes from a numeric value rather than an
    /// unrecognised label.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            GradeError::InvalidQuarter(_) | GradeError::ScoreOutOfRange { .. }
        )
    }
}
