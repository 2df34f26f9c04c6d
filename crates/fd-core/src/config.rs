//! Dispatch and motion tuning knobs.

use crate::{FdError, FdResult};

/// Top-level engine configuration.
///
/// Typically loaded from a JSON file by the application crate (with the
/// `serde` feature) and handed to the world builder.  Missing fields fall
/// back to [`Default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Passenger limit for vehicles created without an explicit capacity.
    pub capacity: usize,

    /// Distance covered by a vehicle per motion tick.
    pub motion_step: f64,

    /// A vehicle closer than this to its target waypoint snaps onto it.
    pub arrival_threshold: f64,

    /// Minimum real time between resolution passes.  Only drivers read this;
    /// the engine itself never looks at a wall clock.
    pub resolution_interval_ms: u64,

    /// A passenger is over-delayed when `new_eta / old_eta` exceeds this …
    pub delay_ratio_threshold: f64,

    /// … and the absolute delay exceeds this (both must hold).
    pub delay_absolute_threshold: f64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            capacity:                 15,
            motion_step:              5.0,
            arrival_threshold:        5.0,
            resolution_interval_ms:   500,
            delay_ratio_threshold:    1.3,
            delay_absolute_threshold: 10.0,
        }
    }
}

impl DispatchConfig {
    /// Reject values the motion model or delay check cannot work with.
    pub fn validate(&self) -> FdResult<()> {
        if self.capacity == 0 {
            return Err(FdError::Config("capacity must be at least 1".into()));
        }
        if !(self.motion_step.is_finite() && self.motion_step > 0.0) {
            return Err(FdError::Config(format!(
                "motion_step must be positive, got {}",
                self.motion_step
            )));
        }
        if !(self.arrival_threshold.is_finite() && self.arrival_threshold >= 0.0) {
            return Err(FdError::Config(format!(
                "arrival_threshold must be non-negative, got {}",
                self.arrival_threshold
            )));
        }
        if !(self.delay_ratio_threshold.is_finite() && self.delay_ratio_threshold >= 1.0) {
            return Err(FdError::Config(format!(
                "delay_ratio_threshold must be >= 1.0, got {}",
                self.delay_ratio_threshold
            )));
        }
        if !(self.delay_absolute_threshold.is_finite() && self.delay_absolute_threshold >= 0.0) {
            return Err(FdError::Config(format!(
                "delay_absolute_threshold must be non-negative, got {}",
                self.delay_absolute_threshold
            )));
        }
        Ok(())
    }
}
