//! Impact-plus-tilt crash detector

use crate::config::DetectorConfig;
use crate::traits::AccelSample;

/// Tilt from upright in degrees, from the X and Z axes
///
/// `acos(|az| / sqrt(ax² + az²))` with both axes scaled to g. An all-zero
/// X/Z pair has no defined direction and reports 0°.
pub fn tilt_degrees(ax: i16, az: i16, full_scale_lsb_per_g: u16) -> f32 {
    let scale = full_scale_lsb_per_g as f32;
    let ax_g = ax as f32 / scale;
    let az_g = az as f32 / scale;

    let magnitude = libm::sqrtf(ax_g * ax_g + az_g * az_g);
    if magnitude == 0.0 {
        return 0.0;
    }

    let ratio = (libm::fabsf(az_g) / magnitude).min(1.0);
    let degrees = libm::acosf(ratio) * (180.0 / core::f32::consts::PI);
    if degrees.is_nan() {
        0.0
    } else {
        degrees
    }
}

/// Rolling crash detector
///
/// Holds the previous raw sample; every evaluation replaces it.
#[derive(Debug, Clone)]
pub struct CrashDetector {
    config: DetectorConfig,
    previous: AccelSample,
}

impl CrashDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            previous: AccelSample::default(),
        }
    }

    /// Seed the previous sample without evaluating
    pub fn prime(&mut self, sample: AccelSample) {
        self.previous = sample;
    }

    /// Whether any axis moved more than the impact threshold since the
    /// previous sample
    fn impact(&self, sample: &AccelSample) -> bool {
        let threshold = self.config.impact_delta_raw;
        let delta = |now: i16, before: i16| (now as i32 - before as i32).abs();

        delta(sample.x, self.previous.x) > threshold
            || delta(sample.y, self.previous.y) > threshold
            || delta(sample.z, self.previous.z) > threshold
    }

    /// Evaluate a new sample
    ///
    /// Returns true when an impact coincides with a tilt beyond the
    /// threshold.
    pub fn evaluate(&mut self, sample: AccelSample) -> bool {
        let tilt = tilt_degrees(sample.x, sample.z, self.config.full_scale_lsb_per_g);
        let impact = self.impact(&sample);
        self.previous = sample;

        impact && tilt > self.config.tilt_threshold_deg as f32
    }
}
