//! Level detection and gain computation for the compressor pedal.
//!
//! The compressor splits into two pieces:
//!
//! - [`EnvelopeFollower`] tracks the input level with separate attack and
//!   release smoothing.
//! - [`GainComputer`] maps that level (in dB) to a gain reduction (in dB)
//!   using a threshold, ratio and soft knee.

/// Smallest level converted to dB; keeps silence away from -inf.
const LEVEL_FLOOR: f32 = 1e-6;

#[inline]
pub fn linear_to_db(level: f32) -> f32 {
    20.0 * level.max(LEVEL_FLOOR).log10()
}

#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Peak envelope follower with one-pole attack/release smoothing.
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
}

impl EnvelopeFollower {
    pub fn new(sample_rate: f32, attack_seconds: f32, release_seconds: f32) -> Self {
        Self {
            envelope: 0.0,
            attack_coeff: smoothing_coeff(attack_seconds, sample_rate),
            release_coeff: smoothing_coeff(release_seconds, sample_rate),
        }
    }

    /// Track `input` and return the smoothed level (always positive).
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let rectified = input.abs();
        let coeff = if rectified > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = coeff * self.envelope + (1.0 - coeff) * rectified;
        self.envelope
    }

    pub fn level(&self) -> f32 {
        self.envelope
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

fn smoothing_coeff(seconds: f32, sample_rate: f32) -> f32 {
    let samples = (seconds * sample_rate).max(1.0);
    (-1.0 / samples).exp()
}

/// Static compression curve.
///
/// Below the knee the gain is 0 dB; above it the output rises 1 dB for
/// every `ratio` dB of input. Inside the knee the two lines are joined by a
/// quadratic so the transition has no corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainComputer {
    pub threshold_db: f32,
    pub ratio: f32,
    pub knee_db: f32,
}

impl GainComputer {
    /// Gain change in dB (zero or negative) for an input level in dB.
    #[inline]
    pub fn gain_db(&self, input_db: f32) -> f32 {
        let ratio = self.ratio.max(1.0);
        let slope = 1.0 / ratio - 1.0;
        let overshoot = input_db - self.threshold_db;
        let half_knee = self.knee_db / 2.0;

        if self.knee_db > 0.0 && overshoot.abs() <= half_knee {
            let x = overshoot + half_knee;
            slope * x * x / (2.0 * self.knee_db)
        } else if overshoot > 0.0 {
            slope * overshoot
        } else {
            0.0
        }
    }
}
