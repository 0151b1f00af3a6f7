//! Class and cohort statistics over collections of scores.

use std::collections::BTreeMap;

use crate::model::Assessment;
use crate::results::{ClassStats, LetterBucket};

/// Unrounded mean, maximum and minimum. All zero for an empty input.
pub fn class_stats(scores: &[f64]) -> ClassStats {
    if scores.is_empty() {
        return ClassStats::default();
    }

    let average = scores.iter().sum::<f64>() / scores.len() as f64;
    let highest = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = scores.iter().copied().fold(f64::INFINITY, f64::min);

    ClassStats {
        average,
        highest,
        lowest,
    }
}

/// Percent of the class scoring strictly below `score`, rounded.
///
/// An empty class ranks everyone at 0.
pub fn percentile_rank(score: f64, class_scores: &[f64]) -> u32 {
    if class_scores.is_empty() {
        return 0;
    }
    let below = class_scores.iter().filter(|&&s| s < score).count();
    (100.0 * below as f64 / class_scores.len() as f64).round() as u32
}

/// Count of scores per letter bucket. Empty buckets are absent.
pub fn grade_distribution(scores: &[f64]) -> BTreeMap<LetterBucket, usize> {
    let mut distribution = BTreeMap::new();
    for &score in scores {
        *distribution.entry(LetterBucket::for_score(score)).or_insert(0) += 1;
    }
    distribution
}

/// Percent of assessments with a non-zero score, rounded; 0 when empty.
pub fn completion_rate(assessments: &[Assessment]) -> u32 {
    if assessments.is_empty() {
        return 0;
    }
    let completed = assessments.iter().filter(|a| a.score > 0.0).count();
    (100.0 * completed as f64 / assessments.len() as f64).round() as u32
}
