//! Pass/fail decision for a location check.
//!
//! The device's own uncertainty radius is added to the hunt's minimum
//! accuracy: a reading passes when `distance <= accuracy + minimum`. Published
//! hunts are tuned against this rule, so it must not become distance-only.

use crate::models::{Coordinate, HuntError, ReportedPosition, Result};
use crate::spatial::haversine_distance;

/// Used when a hunt has no usable minimum accuracy of its own.
pub const DEFAULT_MINIMUM_ACCURACY_METERS: f64 = 40.0;

/// Outcome of one evaluation. Always carries the numbers so the caller can say
/// "you are X away, need Y".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
    pub passed: bool,
    pub distance_meters: f64,
    pub threshold_meters: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityJudge {
    default_minimum_accuracy: f64,
}

impl Default for ProximityJudge {
    fn default() -> Self {
        Self {
            default_minimum_accuracy: DEFAULT_MINIMUM_ACCURACY_METERS,
        }
    }
}

impl ProximityJudge {
    /// A judge with a different fallback. Non-positive values fall back to
    /// [`DEFAULT_MINIMUM_ACCURACY_METERS`].
    pub fn with_default_minimum_accuracy(meters: f64) -> Self {
        Self {
            default_minimum_accuracy: positive(Some(meters)).unwrap_or(DEFAULT_MINIMUM_ACCURACY_METERS),
        }
    }

    /// The hunt's minimum accuracy if it is a positive number, the default otherwise.
    pub fn effective_minimum_accuracy(&self, configured: Option<f64>) -> f64 {
        positive(configured).unwrap_or(self.default_minimum_accuracy)
    }

    pub fn evaluate(
        &self,
        reported: &ReportedPosition,
        target: Coordinate,
        minimum_accuracy: Option<f64>,
    ) -> Result<Verdict> {
        if !target.is_finite() {
            return Err(HuntError::MalformedHuntData(format!(
                "target ({}, {}) is not a finite coordinate",
                target.latitude(),
                target.longitude()
            )));
        }

        if !reported.coordinate.is_finite() {
            return Err(HuntError::InvalidPosition(format!(
                "reported ({}, {}) is not a finite coordinate",
                reported.coordinate.latitude(),
                reported.coordinate.longitude()
            )));
        }

        if !reported.accuracy_meters.is_finite() || reported.accuracy_meters < 0.0 {
            return Err(HuntError::InvalidPosition(format!(
                "accuracy radius {} is not a non-negative number",
                reported.accuracy_meters
            )));
        }

        let distance_meters = haversine_distance(reported.coordinate, target);
        let threshold_meters =
            reported.accuracy_meters + self.effective_minimum_accuracy(minimum_accuracy);

        let verdict = Verdict {
            passed: distance_meters <= threshold_meters,
            distance_meters,
            threshold_meters,
        };

        tracing::debug!(
            distance_m = verdict.distance_meters,
            threshold_m = verdict.threshold_meters,
            accuracy_m = reported.accuracy_meters,
            passed = verdict.passed,
            "evaluated proximity"
        );

        Ok(verdict)
    }
}

/// Evaluate with the default judge.
pub fn evaluate(
    reported: &ReportedPosition,
    target: Coordinate,
    minimum_accuracy: Option<f64>,
) -> Result<Verdict> {
    ProximityJudge::default().evaluate(reported, target, minimum_accuracy)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
