//! Low frequency oscillator used by the modulation pedals and vibrato.

/*
Low Frequency Oscillators
=========================

An LFO is an oscillator running below the audio band. It is never heard
directly; it moves another parameter back and forth.

  pedal      rate         what it moves
  ─────────  ───────────  ─────────────────────────────
  vibrato    5 Hz         voice pitch (±2% of the note)
  chorus     0.1-5 Hz     delay tap around a 20 ms centre
  flanger    0.05-2 Hz    delay tap around the base delay
  phaser     0.1-2 Hz     all-pass stage frequencies
  wah        0.5 Hz       band-pass centre (auto sweep only)

All of them use a bipolar sine (-1.0 to +1.0) so the parameter swings
equally above and below its resting value.

The LFO is free-running: it is not reset when a note starts, so the
pedals keep moving continuously across notes.
*/

use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy)]
pub struct SineLfo {
    rate: f32,
    phase: f32,
}

impl SineLfo {
    pub fn new(rate: f32) -> Self {
        Self {
            rate: rate.max(0.0),
            phase: 0.0,
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.max(0.0);
    }

    /// Current bipolar value, then advance one sample.
    #[inline]
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        let value = (self.phase * TAU).sin();
        self.phase += self.rate / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }
        value
    }

    /// Advance `samples` at once (control-rate callers).
    #[inline]
    pub fn advance(&mut self, samples: usize, sample_rate: f32) -> f32 {
        let value = (self.phase * TAU).sin();
        self.phase += self.rate * samples as f32 / sample_rate;
        self.phase -= self.phase.floor();
        value
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_one_cycle_per_period() {
        let sample_rate = 48_000.0;
        let mut lfo = SineLfo::new(5.0);
        // Quarter period of 5 Hz is 2400 samples
        for _ in 0..2400 {
            lfo.next_sample(sample_rate);
        }
        assert!((lfo.next_sample(sample_rate) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn stays_bipolar() {
        let mut lfo = SineLfo::new(3.7);
        for _ in 0..48_000 {
            let value = lfo.next_sample(48_000.0);
            assert!((-1.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn block_advance_matches_per_sample() {
        let mut a = SineLfo::new(0.5);
        let mut b = SineLfo::new(0.5);
        for _ in 0..32 {
            a.next_sample(48_000.0);
        }
        b.advance(32, 48_000.0);
        assert!((a.next_sample(48_000.0) - b.next_sample(48_000.0)).abs() < 1e-4);
    }
}
