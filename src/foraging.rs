//! Foraging indicator detection
//!
//! Derives prey-capture proxies from one dive window: an echolocation
//! click-rate proxy, feeding-buzz events, rapid maneuvers, and depth
//! variability, combined into a bounded success-probability estimate.

use crate::types::{DiveWindow, ForagingIndicators, SensorFrame};

/// Success probability above which a foraging dive counts as successful
pub const SUCCESS_PROBABILITY_THRESHOLD: f64 = 0.5;

/// Scale from acoustic-activity proportion to a clicks/second proxy
const CLICKS_PER_ACTIVE_SECOND: f64 = 100.0;

/// Acoustic intensity above which a sample belongs to a feeding buzz.
/// The boolean channel acts as a 0/1 intensity proxy here.
const BUZZ_INTENSITY_THRESHOLD: f64 = 0.8;

/// Acceleration-magnitude jump (g) that counts as a rapid maneuver
const RAPID_MANEUVER_DELTA_G: f64 = 2.0;

// Normalization ceilings for the combined probability estimate
const CLICK_RATE_NORM: f64 = 20.0;
const BUZZ_EVENTS_NORM: f64 = 3.0;
const RAPID_MANEUVERS_NORM: f64 = 10.0;
const DEPTH_VARIATION_NORM_M: f64 = 5.0;

/// Detector for per-dive foraging indicators
pub struct ForagingDetector;

impl ForagingDetector {
    /// Derive foraging indicators for one window of a frame
    pub fn detect(frame: &SensorFrame, window: &DiveWindow) -> ForagingIndicators {
        let click_rate = compute_click_rate(frame, window);
        let buzz_events = count_buzz_events(frame, window);
        let rapid_maneuvers = count_rapid_maneuvers(frame, window);
        let depth_variation_m = compute_depth_variation(frame, window);

        let click_norm = (click_rate / CLICK_RATE_NORM).clamp(0.0, 1.0);
        let buzz_norm = (buzz_events as f64 / BUZZ_EVENTS_NORM).clamp(0.0, 1.0);
        let maneuver_norm = (rapid_maneuvers as f64 / RAPID_MANEUVERS_NORM).clamp(0.0, 1.0);
        let depth_norm = (depth_variation_m / DEPTH_VARIATION_NORM_M).clamp(0.0, 1.0);

        let success_probability = (click_norm + buzz_norm + maneuver_norm + depth_norm) / 4.0;
        let foraging_intensity = (click_norm + buzz_norm + maneuver_norm) / 3.0;

        ForagingIndicators {
            click_rate,
            buzz_events,
            rapid_maneuvers,
            depth_variation_m,
            success_probability,
            foraging_intensity,
        }
    }
}

/// Clicks/second proxy: acoustic-activity proportion scaled to a click rate
fn compute_click_rate(frame: &SensorFrame, window: &DiveWindow) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let active = frame.acoustic[window.start..window.end]
        .iter()
        .filter(|&&a| a)
        .count();
    active as f64 / window.len() as f64 * CLICKS_PER_ACTIVE_SECOND
}

/// Count maximal contiguous runs of high acoustic intensity
fn count_buzz_events(frame: &SensorFrame, window: &DiveWindow) -> u32 {
    let mut runs = 0u32;
    let mut in_run = false;
    for &flag in &frame.acoustic[window.start..window.end] {
        let intensity = if flag { 1.0 } else { 0.0 };
        if intensity > BUZZ_INTENSITY_THRESHOLD {
            if !in_run {
                runs += 1;
                in_run = true;
            }
        } else {
            in_run = false;
        }
    }
    runs
}

/// Count consecutive-sample jumps in acceleration magnitude
fn count_rapid_maneuvers(frame: &SensorFrame, window: &DiveWindow) -> u32 {
    if window.len() < 2 {
        return 0;
    }
    let mut count = 0u32;
    let mut previous = frame.acc_magnitude(window.start);
    for i in window.start + 1..window.end {
        let magnitude = frame.acc_magnitude(i);
        if (magnitude - previous).abs() > RAPID_MANEUVER_DELTA_G {
            count += 1;
        }
        previous = magnitude;
    }
    count
}

/// Standard deviation of first differences of the depth sequence
fn compute_depth_variation(frame: &SensorFrame, window: &DiveWindow) -> f64 {
    if window.len() < 2 {
        return 0.0;
    }
    let diffs: Vec<f64> = frame.depth[window.start..window.end]
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .collect();

    let n = diffs.len() as f64;
    let mean = diffs.iter().sum::<f64>() / n;
    let variance = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(depth: Vec<f64>, acc_x: Vec<f64>, acoustic: Vec<bool>) -> SensorFrame {
        let n = depth.len();
        SensorFrame::new(
            (0..n).map(|i| i as f64).collect(),
            depth,
            acc_x,
            vec![0.0; n],
            vec![0.0; n],
            acoustic,
            1.0,
        )
        .unwrap()
    }

    fn full_window(frame: &SensorFrame) -> DiveWindow {
        DiveWindow {
            start: 0,
            end: frame.len(),
        }
    }

    #[test]
    fn test_click_rate_scales_acoustic_proportion() {
        let acoustic: Vec<bool> = (0..10).map(|i| i < 5).collect();
        let frame = make_frame(vec![20.0; 10], vec![0.0; 10], acoustic);

        let indicators = ForagingDetector::detect(&frame, &full_window(&frame));
        assert!((indicators.click_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_buzz_events_count_maximal_runs() {
        // Runs: [t t] [t] [t t t] -> 3 buzz events
        let acoustic = vec![
            true, true, false, true, false, false, true, true, true, false,
        ];
        let frame = make_frame(vec![20.0; 10], vec![0.0; 10], acoustic);

        let indicators = ForagingDetector::detect(&frame, &full_window(&frame));
        assert_eq!(indicators.buzz_events, 3);
    }

    #[test]
    fn test_buzz_run_touching_window_end_is_counted() {
        let acoustic = vec![false, false, true, true];
        let frame = make_frame(vec![20.0; 4], vec![0.0; 4], acoustic);

        let indicators = ForagingDetector::detect(&frame, &full_window(&frame));
        assert_eq!(indicators.buzz_events, 1);
    }

    #[test]
    fn test_rapid_maneuvers_count_large_jumps() {
        // Magnitudes: 0, 3, 3, 0.5, 0.6 -> jumps of 3, 0, 2.5, 0.1
        let acc_x = vec![0.0, 3.0, 3.0, 0.5, 0.6];
        let frame = make_frame(vec![20.0; 5], acc_x, vec![false; 5]);

        let indicators = ForagingDetector::detect(&frame, &full_window(&frame));
        assert_eq!(indicators.rapid_maneuvers, 2);
    }

    #[test]
    fn test_depth_variation_zero_for_constant_descent() {
        // Constant descent rate: all first differences equal, zero deviation
        let depth: Vec<f64> = (0..20).map(|i| i as f64 * 2.0).collect();
        let frame = make_frame(depth, vec![0.0; 20], vec![false; 20]);

        let indicators = ForagingDetector::detect(&frame, &full_window(&frame));
        assert!(indicators.depth_variation_m.abs() < 1e-9);
    }

    #[test]
    fn test_depth_variation_positive_for_irregular_profile() {
        let depth = vec![20.0, 25.0, 18.0, 30.0, 22.0, 35.0];
        let frame = make_frame(depth, vec![0.0; 6], vec![false; 6]);

        let indicators = ForagingDetector::detect(&frame, &full_window(&frame));
        assert!(indicators.depth_variation_m > 1.0);
    }

    #[test]
    fn test_success_probability_bounded() {
        // Saturate every indicator well past its normalization ceiling
        let n = 100;
        let acoustic = vec![true; n];
        let acc_x: Vec<f64> = (0..n).map(|i| if i % 2 == 0 { 0.0 } else { 5.0 }).collect();
        let depth: Vec<f64> = (0..n).map(|i| if i % 2 == 0 { 20.0 } else { 60.0 }).collect();
        let frame = make_frame(depth, acc_x, acoustic);

        let indicators = ForagingDetector::detect(&frame, &full_window(&frame));
        assert!(indicators.success_probability <= 1.0);
        assert!(indicators.success_probability >= 0.0);
        assert!(indicators.foraging_intensity <= 1.0);
    }

    #[test]
    fn test_silent_still_dive_scores_zero() {
        let frame = make_frame(vec![20.0; 50], vec![0.0; 50], vec![false; 50]);

        let indicators = ForagingDetector::detect(&frame, &full_window(&frame));
        assert!(indicators.success_probability.abs() < 1e-9);
        assert!(indicators.foraging_intensity.abs() < 1e-9);
        assert_eq!(indicators.buzz_events, 0);
        assert_eq!(indicators.rapid_maneuvers, 0);
    }

    #[test]
    fn test_intensity_excludes_depth_variation() {
        // Only depth varies: success probability moves, intensity stays zero
        let depth = vec![20.0, 30.0, 15.0, 35.0, 10.0, 40.0];
        let frame = make_frame(depth, vec![0.0; 6], vec![false; 6]);

        let indicators = ForagingDetector::detect(&frame, &full_window(&frame));
        assert!(indicators.success_probability > 0.0);
        assert!(indicators.foraging_intensity.abs() < 1e-9);
    }
}
