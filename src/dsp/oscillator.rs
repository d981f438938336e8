use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/*
Audio-Rate Oscillators
======================

A phase accumulator walks from 0.0 to 1.0 once per cycle. Each sample the
phase advances by `frequency / sample_rate` and wraps. The waveform is a
function of that phase:

    sine   sin(2π · phase)
    saw    2 · phase - 1

The naive sawtooth has a hard jump at the wrap point. Sampled, that jump
aliases badly at guitar-lead pitches (the upper partials fold back into the
audible band). PolyBLEP smooths the discontinuity with a two-sample
polynomial correction:

    phase near 0  →  t + t - t² - 1   (t = phase / dt)
    phase near 1  →  t² + t + t + 1   (t = (phase - 1) / dt)

where `dt` is the per-sample phase increment. Everywhere else the
correction is zero and the saw is exact.

The frequency is passed per sample so callers can glide or vibrato the
pitch without touching oscillator state.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OscillatorWaveform {
    Sine,
    Saw,
}

#[derive(Debug, Clone, Copy)]
pub struct OscillatorBlock {
    waveform: OscillatorWaveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: OscillatorWaveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorWaveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorWaveform::Saw)
    }

    pub fn waveform(&self) -> OscillatorWaveform {
        self.waveform
    }

    /// Produce one sample at `frequency` and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let dt = (frequency / sample_rate).clamp(0.0, 0.5);
        let out = match self.waveform {
            OscillatorWaveform::Sine => (self.phase * TAU).sin(),
            OscillatorWaveform::Saw => 2.0 * self.phase - 1.0 - poly_blep(self.phase, dt),
        };

        self.phase += dt;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        out
    }

    /// Fill `out` at a constant frequency.
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[inline]
fn poly_blep(phase: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return 0.0;
    }
    if phase < dt {
        let t = phase / dt;
        t + t - t * t - 1.0
    } else if phase > 1.0 - dt {
        let t = (phase - 1.0) / dt;
        t * t + t + t + 1.0
    } else {
        0.0
    }
}
