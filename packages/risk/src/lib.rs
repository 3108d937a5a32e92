#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Blended risk scoring for road segments.
//!
//! A road's current risk combines its static baseline (assigned at
//! classification time) with the worst severity among its reported issues.
//! The computation is a pure recompute-from-scratch over the full issue
//! set, never an incremental delta, so re-running it at any time from
//! the same inputs yields the same stored value.

/// Weight of the static baseline in the blended score.
const BASELINE_WEIGHT: f64 = 0.7;

/// Weight of the reported-severity component in the blended score.
const SEVERITY_WEIGHT: f64 = 0.3;

/// Highest reportable issue severity.
const MAX_SEVERITY: f64 = 5.0;

/// Normalizes a maximum issue severity (0-5) onto the 0-100 risk scale.
///
/// Out-of-range severities are clamped rather than rejected so the blended
/// score can never leave `[0, 100]`; severity validation proper belongs to
/// the reporting boundary.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn severity_component(max_severity: i64) -> f64 {
    ((max_severity as f64 / MAX_SEVERITY) * 100.0).clamp(0.0, 100.0)
}

/// Computes a road's current risk from its baseline and the maximum
/// severity across **all** of its reported issues.
///
/// A road with no issues (`max_severity` absent) keeps its baseline risk
/// exactly, including a legitimate baseline of `0.0` for unmatched road
/// classes, which is a valid, stable value and is never reset. With issues
/// present the score is
/// `min(100, 0.7 * baseline + 0.3 * severity_component)`.
///
/// Pure and idempotent; callers are responsible for serializing
/// "record issue, then recompute" per road so each recomputation observes
/// a consistent snapshot of that road's issues.
#[must_use]
pub fn compute_current_risk(baseline_risk: f64, max_severity: Option<i64>) -> f64 {
    max_severity.map_or(baseline_risk, |severity| {
        let blended =
            BASELINE_WEIGHT * baseline_risk + SEVERITY_WEIGHT * severity_component(severity);
        blended.min(100.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn no_issues_keeps_baseline_exactly() {
        assert!((compute_current_risk(80.0, None) - 80.0).abs() < f64::EPSILON);
        assert!((compute_current_risk(42.5, None) - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_baseline_with_no_issues_stays_zero() {
        // An Other-class road with no reports legitimately scores 0.
        assert!(compute_current_risk(0.0, None).abs() < f64::EPSILON);
    }

    #[test]
    fn worst_severity_blends_into_score() {
        // baseline 70, one issue at severity 5:
        // 0.7 * 70 + 0.3 * 100 = 79
        assert!((compute_current_risk(70.0, Some(5)) - 79.0).abs() < TOLERANCE);
    }

    #[test]
    fn mid_severity_blend() {
        // baseline 25, worst severity 4:
        // 0.7 * 25 + 0.3 * 80 = 41.5
        assert!((compute_current_risk(25.0, Some(4)) - 41.5).abs() < TOLERANCE);
    }

    #[test]
    fn zero_severity_issue_still_blends() {
        // A severity-0 report is a report: the blend applies, not the
        // baseline passthrough.
        assert!((compute_current_risk(80.0, Some(0)) - 56.0).abs() < TOLERANCE);
    }

    #[test]
    fn score_is_capped_at_100() {
        assert!((compute_current_risk(100.0, Some(5)) - 100.0).abs() < TOLERANCE);
    }

    #[test]
    fn out_of_range_severity_is_clamped() {
        assert!((severity_component(9) - 100.0).abs() < TOLERANCE);
        assert!(severity_component(-3).abs() < TOLERANCE);
        assert!((compute_current_risk(70.0, Some(9)) - 79.0).abs() < TOLERANCE);
    }

    #[test]
    fn stays_in_bounds_across_domain() {
        for baseline in [0.0, 15.0, 25.0, 40.0, 55.0, 70.0, 80.0, 100.0] {
            for severity in [None, Some(0), Some(1), Some(2), Some(3), Some(4), Some(5)] {
                let risk = compute_current_risk(baseline, severity);
                assert!(
                    (0.0..=100.0).contains(&risk),
                    "baseline {baseline} severity {severity:?} -> {risk}"
                );
            }
        }
    }

    #[test]
    fn recompute_is_idempotent() {
        let first = compute_current_risk(55.0, Some(3));
        let second = compute_current_risk(55.0, Some(3));
        assert!((first - second).abs() < f64::EPSILON);
    }
}
