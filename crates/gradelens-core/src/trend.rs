//! Trend direction, required improvement and future-grade prediction.
//!
//! The prediction is a recency-weighted heuristic, not a statistical model.

use std::collections::BTreeMap;

use crate::results::{PredictedTrend, Prediction, TrendDirection};

/// Smallest mean difference that counts as movement.
pub const TREND_TOLERANCE: f64 = 2.0;

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Direction of a grade history, earliest first, using [`TREND_TOLERANCE`].
pub fn trend(grades: &[f64]) -> TrendDirection {
    trend_with_tolerance(grades, TREND_TOLERANCE)
}

/// Compare the mean of the last two grades with the mean of everything
/// before them.
///
/// With fewer than three grades there is nothing before the last two to
/// compare against, so the history is stable.
pub fn trend_with_tolerance(grades: &[f64], tolerance: f64) -> TrendDirection {
    if grades.len() < 2 {
        return TrendDirection::Stable;
    }

    let (previous, recent) = grades.split_at(grades.len() - 2);
    if previous.is_empty() {
        return TrendDirection::Stable;
    }

    let difference = mean(recent) - mean(previous);
    if difference.abs() < tolerance {
        TrendDirection::Stable
    } else if difference > 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    }
}

/// Points needed per remaining assessment to move `current` to `target`,
/// rounded up. Zero when nothing remains.
pub fn required_improvement(current: f64, target: f64, remaining_assessments: i32) -> i64 {
    if remaining_assessments <= 0 {
        return 0;
    }
    ((target - current) / f64::from(remaining_assessments)).ceil() as i64
}

/// Population standard deviation.
fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Forecast the next grade from a history (earliest first) plus named
/// adjustment factors.
///
/// Grade `i` of `n` is weighted by `(i + 1) / n` and the weighted mean is
/// shifted by the sum of the factors. Confidence starts at 100 and loses two
/// points per point of standard deviation and five per point of absolute
/// factor weight, clamped to 0..=100.
pub fn predict_future_performance(
    historical_grades: &[f64],
    weighted_factors: &BTreeMap<String, f64>,
) -> Prediction {
    if historical_grades.is_empty() {
        return Prediction {
            predicted_grade: 0,
            confidence_level: 0,
            trend: PredictedTrend::Stable,
        };
    }

    let direction = trend(historical_grades);

    let n = historical_grades.len() as f64;
    let (weighted_sum, total_weight) = historical_grades.iter().enumerate().fold(
        (0.0, 0.0),
        |(sum, weights), (i, grade)| {
            let weight = (i as f64 + 1.0) / n;
            (sum + grade * weight, weights + weight)
        },
    );
    let weighted_average = weighted_sum / total_weight;

    let factor_sum: f64 = weighted_factors.values().sum();
    let factor_magnitude: f64 = weighted_factors.values().map(|v| v.abs()).sum();

    let stddev = standard_deviation(historical_grades);
    let confidence = (100.0 - 2.0 * stddev - 5.0 * factor_magnitude).clamp(0.0, 100.0);

    let prediction = Prediction {
        predicted_grade: (weighted_average + factor_sum).round() as i32,
        confidence_level: confidence.round() as u32,
        trend: direction.into(),
    };

    tracing::debug!(
        history = historical_grades.len(),
        predicted = prediction.predicted_grade,
        confidence = prediction.confidence_level,
        "predicted future performance"
    );

    prediction
}
