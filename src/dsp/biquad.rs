//! Second-order IIR filter with RBJ Audio EQ Cookbook coefficients.
//!
//! Every filter in the rig is one of these: the voice tone filter, the
//! distortion tone control, the wah band-pass, the phaser all-pass stages and
//! the three EQ bands.

use std::f32::consts::PI;

/// Normalized biquad coefficients (a0 divided out).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl Coefficients {
    /// y[n] = x[n]
    pub const PASSTHROUGH: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    fn normalized(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Resonant low-pass.
    pub fn lowpass(frequency: f32, q: f32, sample_rate: f32) -> Self {
        let w = Omega::new(frequency, q, sample_rate);
        Self::normalized(
            (1.0 - w.cos) / 2.0,
            1.0 - w.cos,
            (1.0 - w.cos) / 2.0,
            1.0 + w.alpha,
            -2.0 * w.cos,
            1.0 - w.alpha,
        )
    }

    /// Band-pass with constant 0 dB peak gain.
    pub fn bandpass(frequency: f32, q: f32, sample_rate: f32) -> Self {
        let w = Omega::new(frequency, q, sample_rate);
        Self::normalized(
            w.alpha,
            0.0,
            -w.alpha,
            1.0 + w.alpha,
            -2.0 * w.cos,
            1.0 - w.alpha,
        )
    }

    /// Unity-magnitude all-pass; only the phase turns around `frequency`.
    pub fn allpass(frequency: f32, q: f32, sample_rate: f32) -> Self {
        let w = Omega::new(frequency, q, sample_rate);
        Self::normalized(
            1.0 - w.alpha,
            -2.0 * w.cos,
            1.0 + w.alpha,
            1.0 + w.alpha,
            -2.0 * w.cos,
            1.0 - w.alpha,
        )
    }

    /// Bell boost or cut of `gain_db` around `frequency`.
    pub fn peaking(frequency: f32, q: f32, gain_db: f32, sample_rate: f32) -> Self {
        let a = 10.0_f32.powf(gain_db / 40.0);
        let w = Omega::new(frequency, q, sample_rate);
        Self::normalized(
            1.0 + w.alpha * a,
            -2.0 * w.cos,
            1.0 - w.alpha * a,
            1.0 + w.alpha / a,
            -2.0 * w.cos,
            1.0 - w.alpha / a,
        )
    }

    /// Shelf below `frequency` (shelf slope 1).
    pub fn lowshelf(frequency: f32, gain_db: f32, sample_rate: f32) -> Self {
        let a = 10.0_f32.powf(gain_db / 40.0);
        let w = Omega::new(frequency, std::f32::consts::FRAC_1_SQRT_2, sample_rate);
        let two_sqrt_a_alpha = 2.0 * a.sqrt() * w.alpha;
        Self::normalized(
            a * ((a + 1.0) - (a - 1.0) * w.cos + two_sqrt_a_alpha),
            2.0 * a * ((a - 1.0) - (a + 1.0) * w.cos),
            a * ((a + 1.0) - (a - 1.0) * w.cos - two_sqrt_a_alpha),
            (a + 1.0) + (a - 1.0) * w.cos + two_sqrt_a_alpha,
            -2.0 * ((a - 1.0) + (a + 1.0) * w.cos),
            (a + 1.0) + (a - 1.0) * w.cos - two_sqrt_a_alpha,
        )
    }

    /// Shelf above `frequency` (shelf slope 1).
    pub fn highshelf(frequency: f32, gain_db: f32, sample_rate: f32) -> Self {
        let a = 10.0_f32.powf(gain_db / 40.0);
        let w = Omega::new(frequency, std::f32::consts::FRAC_1_SQRT_2, sample_rate);
        let two_sqrt_a_alpha = 2.0 * a.sqrt() * w.alpha;
        Self::normalized(
            a * ((a + 1.0) + (a - 1.0) * w.cos + two_sqrt_a_alpha),
            -2.0 * a * ((a - 1.0) + (a + 1.0) * w.cos),
            a * ((a + 1.0) + (a - 1.0) * w.cos - two_sqrt_a_alpha),
            (a + 1.0) - (a - 1.0) * w.cos + two_sqrt_a_alpha,
            2.0 * ((a - 1.0) - (a + 1.0) * w.cos),
            (a + 1.0) - (a - 1.0) * w.cos - two_sqrt_a_alpha,
        )
    }
}

/// Shared cookbook intermediates.
struct Omega {
    cos: f32,
    alpha: f32,
}

impl Omega {
    fn new(frequency: f32, q: f32, sample_rate: f32) -> Self {
        // Keep the pole pair inside the unit circle
        let frequency = frequency.clamp(10.0, sample_rate * 0.49);
        let omega = 2.0 * PI * frequency / sample_rate;
        let q = q.max(1e-3);
        Self {
            cos: omega.cos(),
            alpha: omega.sin() / (2.0 * q),
        }
    }
}

/// Direct Form I biquad:
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    coefficients: Coefficients,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl Biquad {
    pub fn new(coefficients: Coefficients) -> Self {
        Self {
            coefficients,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    pub fn passthrough() -> Self {
        Self::new(Coefficients::PASSTHROUGH)
    }

    /// Swap coefficients without clearing state, so sweeps stay click-free.
    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        self.coefficients = coefficients;
    }

    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coefficients;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        // Flush denormals on the decaying tail
        self.y1 = if output.abs() < 1e-20 { 0.0 } else { output };

        output
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::passthrough()
    }
}
