//! Founding-cohort progress meter.
//!
//! The landing page shows how full the founding cohort is. The bar starts
//! at a base percentage so it never looks empty on day one, creeps up one
//! point per `per_point` signups, and stops at `cap`. It is display-only.

use crate::error::ProgressError;

pub const DEFAULT_BASE_PERCENT: f64 = 88.0;
pub const DEFAULT_SIGNUPS_PER_POINT: f64 = 50.0;
pub const DEFAULT_CAP_PERCENT: f64 = 98.0;
pub const DEFAULT_COHORT_LIMIT: u32 = 500;

/// Computes `min(base + count / per_point, cap)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CohortMeter {
    base: f64,
    per_point: f64,
    cap: f64,
    cohort_limit: u32,
}

impl Default for CohortMeter {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_PERCENT,
            per_point: DEFAULT_SIGNUPS_PER_POINT,
            cap: DEFAULT_CAP_PERCENT,
            cohort_limit: DEFAULT_COHORT_LIMIT,
        }
    }
}

impl CohortMeter {
    /// Build a meter.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::InvalidConfig`] unless
    /// `per_point > 0` and `0 <= base <= cap <= 100`.
    pub fn new(base: f64, per_point: f64, cap: f64, cohort_limit: u32) -> Result<Self, ProgressError> {
        let invalid = |reason: String| ProgressError::InvalidConfig { reason };

        if !(per_point.is_finite() && per_point > 0.0) {
            return Err(invalid(format!("signups per point must be positive, got {per_point}")));
        }
        if !(base.is_finite() && cap.is_finite()) {
            return Err(invalid("base and cap must be finite".to_owned()));
        }
        if base < 0.0 || base > cap || cap > 100.0 {
            return Err(invalid(format!(
                "expected 0 <= base ({base}) <= cap ({cap}) <= 100"
            )));
        }

        Ok(Self {
            base,
            per_point,
            cap,
            cohort_limit,
        })
    }

    /// Fill percentage for `count` signups. Never exceeds the cap.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self, count: u64) -> f64 {
        (self.base + count as f64 / self.per_point).min(self.cap)
    }

    /// Whole-number percentage shown next to the bar.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn display_percent(&self, count: u64) -> u32 {
        self.percent(count).floor() as u32
    }

    #[must_use]
    pub const fn cap(&self) -> f64 {
        self.cap
    }

    #[must_use]
    pub const fn cohort_limit(&self) -> u32 {
        self.cohort_limit
    }
}
