use super::params::{SynthParams, HARMONIC_COUNT};
use super::technique::TechniqueModulation;
use crate::composition::Technique;
use crate::dsp::{
    biquad::{Biquad, Coefficients},
    oscillator::OscillatorBlock,
    Envelope,
};

/*
Guitar Voice
============

One voice per note. The tone is additive: a sawtooth fundamental plus sine
overtones at whole multiples of the pitch, each at its own relative level.
The sum passes through a resonant lowpass that takes the fizz off the saw,
then through the programmed amplitude envelope.

    saw(f)   · h0 ─┐
    sin(2f)  · h1 ─┤
    sin(3f)  · h2 ─┼─→ lowpass 3 kHz, Q 1 ─→ × envelope ─→ out
       ...         │
    sin(6f)  · h5 ─┘

Lifetime
--------

  start_frame          oscillators start, envelope begins
  + duration           oscillators stop; the filter rings out on silence
  + duration + 100 ms  the voice is finished and can be torn down

Partials at or above Nyquist are dropped when the voice is built.
*/

pub const VOICE_LOWPASS_HZ: f32 = 3000.0;
pub const VOICE_LOWPASS_Q: f32 = 1.0;

/// Time after the note ends before its voice is torn down.
pub const TEARDOWN_TAIL_SECONDS: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
struct Partial {
    oscillator: OscillatorBlock,
    multiple: f32,
    amplitude: f32,
}

pub struct Voice {
    partials: [Partial; HARMONIC_COUNT],
    partial_count: usize,
    frequency: f32,
    duration: f32,
    envelope: Envelope,
    modulation: TechniqueModulation,
    filter: Biquad,
    sample_rate: f32,
    start_frame: u64,
    elapsed: u64,
    end_frame: u64,
    finished: bool,
}

impl Voice {
    pub fn new(
        frequency: f32,
        duration: f32,
        technique: Technique,
        params: &SynthParams,
        sample_rate: f32,
        start_frame: u64,
    ) -> Self {
        let duration = duration.max(0.0);
        let modulation = TechniqueModulation::new(technique, duration);
        let nyquist = sample_rate * 0.5;

        let silent = Partial {
            oscillator: OscillatorBlock::sine(),
            multiple: 0.0,
            amplitude: 0.0,
        };
        let mut partials = [silent; HARMONIC_COUNT];
        let mut partial_count = 0;
        for index in params.audible_partials() {
            let multiple = (index + 1) as f32;
            if frequency * multiple >= nyquist {
                continue;
            }
            partials[partial_count] = Partial {
                oscillator: if index == 0 {
                    OscillatorBlock::sawtooth()
                } else {
                    OscillatorBlock::sine()
                },
                multiple,
                amplitude: params.harmonics[index],
            };
            partial_count += 1;
        }

        let lifetime = duration + TEARDOWN_TAIL_SECONDS;

        Self {
            partials,
            partial_count,
            frequency,
            duration,
            envelope: Envelope::program(
                &params.envelope_shape(),
                duration,
                modulation.initial_level(),
            ),
            modulation,
            filter: Biquad::new(Coefficients::lowpass(
                VOICE_LOWPASS_HZ,
                VOICE_LOWPASS_Q,
                sample_rate,
            )),
            sample_rate,
            start_frame,
            elapsed: 0,
            end_frame: start_frame + (lifetime * sample_rate).ceil() as u64,
            finished: false,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    /// Frame at which the voice has fully rung out.
    pub fn end_frame(&self) -> u64 {
        self.end_frame
    }

    /// Number of partials actually rendered.
    pub fn partial_count(&self) -> usize {
        self.partial_count
    }

    /// Mix this voice into `out`, whose first sample is at `block_start`.
    pub fn render_add(&mut self, out: &mut [f32], block_start: u64) {
        if self.finished {
            return;
        }

        let offset = self.start_frame.saturating_sub(block_start) as usize;
        if offset >= out.len() {
            return;
        }

        let sample_rate = self.sample_rate;
        let partials = &mut self.partials[..self.partial_count];

        for sample in out[offset..].iter_mut() {
            let frame = self.start_frame + self.elapsed;
            if frame >= self.end_frame {
                self.finished = true;
                break;
            }

            let time = self.elapsed as f32 / sample_rate;
            let source = if time < self.duration {
                let ratio = self.modulation.next_pitch_ratio(time, sample_rate);
                let overtone_gain = self.modulation.overtone_gain(time);
                let base = self.frequency * ratio;

                let mut sum = 0.0;
                for (index, partial) in partials.iter_mut().enumerate() {
                    let gain = if index == 0 {
                        partial.amplitude
                    } else {
                        partial.amplitude * overtone_gain
                    };
                    sum += partial
                        .oscillator
                        .next_sample(base * partial.multiple, sample_rate)
                        * gain;
                }
                sum
            } else {
                0.0
            };

            *sample += self.filter.process(source) * self.envelope.level_at(time);
            self.elapsed += 1;
        }
    }

    /// Whether the voice has played out, or was torn down.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Silence the voice. Returns `false` if it was already finished, so
    /// tearing down twice is harmless.
    pub fn teardown(&mut self) -> bool {
        let was_live = !self.finished;
        self.finished = true;
        was_live
    }
}
