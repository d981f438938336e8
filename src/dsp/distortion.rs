//! Guitar Waveshaping
//!
//! Distortion adds harmonics by pushing the signal through a nonlinear
//! transfer function. The overdrive pedal uses the classic "guitar" curve:
//!
//!   f(x) = (3 + k) · x · 20° / (π + k · |x|)
//!
//! where 20° is written in radians (20 · π / 180) and `k` is the drive
//! amount (0-100, straight from the pedal's gain knob).
//!
//! # Shape
//!
//!   k = 0    nearly linear, scaled down (f(1) ≈ 0.33)
//!   k = 50   soft saturation, ~3.5x slope at the origin
//!   k = 100  hard knee, most of the range sits near the rails
//!
//! The curve is odd-symmetric, so it generates odd harmonics like a
//! symmetric clipping stage. Inputs are clamped to [-1, 1] before shaping,
//! matching a curve table that is only defined over that range.

use std::f32::consts::PI;

const TWENTY_DEGREES: f32 = 20.0 * PI / 180.0;

/// Shape one sample with drive amount `k`.
#[inline]
pub fn guitar_curve(sample: f32, k: f32) -> f32 {
    let x = sample.clamp(-1.0, 1.0);
    (3.0 + k) * x * TWENTY_DEGREES / (PI + k * x.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_stays_silent() {
        assert_eq!(guitar_curve(0.0, 50.0), 0.0);
    }

    #[test]
    fn curve_is_odd_symmetric() {
        for x in [0.1, 0.4, 0.9] {
            assert!((guitar_curve(x, 50.0) + guitar_curve(-x, 50.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn curve_is_monotonic() {
        let mut previous = guitar_curve(-1.0, 75.0);
        for i in -99..=100 {
            let value = guitar_curve(i as f32 / 100.0, 75.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn more_drive_saturates_harder() {
        // Relative to full scale, small signals get louder with drive
        let soft = guitar_curve(0.1, 10.0) / guitar_curve(1.0, 10.0);
        let hard = guitar_curve(0.1, 90.0) / guitar_curve(1.0, 90.0);
        assert!(hard > soft);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(guitar_curve(5.0, 50.0), guitar_curve(1.0, 50.0));
    }
}
