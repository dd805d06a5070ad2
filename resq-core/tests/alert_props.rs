//! Property tests for the detector, click classifier and config parser.

use proptest::prelude::*;
use resq_core::config::{parse_config, ButtonConfig, DetectorConfig};
use resq_core::detect::{tilt_degrees, CrashDetector};
use resq_core::input::{ClickClassifier, ClickCount};
use resq_core::traits::AccelSample;

fn sample() -> impl Strategy<Value = AccelSample> {
    (any::<i16>(), any::<i16>(), any::<i16>()).prop_map(|(x, y, z)| AccelSample::new(x, y, z))
}

fn nudge(value: i16, delta: i32) -> i16 {
    (value as i32 + delta).clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

proptest! {
    #[test]
    fn small_deltas_never_crash(
        previous in sample(),
        dx in -20_000i32..=20_000,
        dy in -20_000i32..=20_000,
        dz in -20_000i32..=20_000,
    ) {
        let mut detector = CrashDetector::new(DetectorConfig::default());
        detector.prime(previous);
        let next = AccelSample::new(
            nudge(previous.x, dx),
            nudge(previous.y, dy),
            nudge(previous.z, dz),
        );
        prop_assert!(!detector.evaluate(next));
    }

    #[test]
    fn tilt_is_bounded(ax in any::<i16>(), az in any::<i16>()) {
        let tilt = tilt_degrees(ax, az, 16_384);
        prop_assert!((0.0..=90.001).contains(&tilt), "tilt {}", tilt);
    }

    #[test]
    fn clean_clicks_classified(n in 1usize..6) {
        let mut classifier = ClickClassifier::new(ButtonConfig::default());
        let mut reports = Vec::new();
        let mut now = 0u32;
        for _ in 0..n {
            for pressed in [true, true, false, false] {
                if let Some(count) = classifier.poll_clicks(pressed, now) {
                    reports.push(count);
                }
                now += 100;
            }
        }
        for _ in 0..15 {
            if let Some(count) = classifier.poll_clicks(false, now) {
                reports.push(count);
            }
            now += 100;
        }
        let expected = match n {
            2 => vec![ClickCount::Double],
            3 => vec![ClickCount::Triple],
            _ => vec![],
        };
        prop_assert_eq!(reports, expected);
    }

    #[test]
    fn idle_button_never_reports(start in any::<u32>(), ticks in 0usize..200) {
        let mut classifier = ClickClassifier::new(ButtonConfig::default());
        for i in 0..ticks {
            let now = start.wrapping_add(i as u32 * 100);
            prop_assert_eq!(classifier.poll_clicks(false, now), None);
        }
    }

    #[test]
    fn parse_config_never_panics(input in "\\PC{0,400}") {
        let _ = parse_config(&input);
    }
}
