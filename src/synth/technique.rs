use crate::composition::Technique;
use crate::dsp::{automation::Automation, lfo::SineLfo};
use crate::MIN_TIME;

/*
Technique Modulation
====================

Each articulation is a small set of automation lanes written when the note
starts:

    bend      pitch ratio 0.9 → 1.0, exponential, over the first 30 %
    slide     pitch ratio 0.8 → 1.0, exponential, over the first 20 %
    vibrato   pitch ratio 1 ± 0.02 · sin(2π · 5 Hz · t)
    hammer    overtone gain 1.5 → 1.0, exponential, over 0.1 s
    pull      envelope starts at 0.5 instead of 0
    normal    nothing

Pitch movement is a ratio applied to every partial, so overtones stay
harmonic while the note glides.
*/

pub const BEND_START_RATIO: f32 = 0.9;
pub const BEND_GLIDE_FRACTION: f32 = 0.3;
pub const SLIDE_START_RATIO: f32 = 0.8;
pub const SLIDE_GLIDE_FRACTION: f32 = 0.2;
pub const VIBRATO_RATE: f32 = 5.0;
pub const VIBRATO_DEPTH: f32 = 0.02;
pub const HAMMER_BOOST: f32 = 1.5;
pub const HAMMER_SETTLE_SECONDS: f32 = 0.1;
pub const PULL_INITIAL_LEVEL: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct TechniqueModulation {
    pitch: Automation,
    overtone_gain: Automation,
    vibrato: Option<SineLfo>,
    initial_level: f32,
}

impl TechniqueModulation {
    pub fn new(technique: Technique, duration: f32) -> Self {
        let mut modulation = Self {
            pitch: Automation::constant(1.0),
            overtone_gain: Automation::constant(1.0),
            vibrato: None,
            initial_level: 0.0,
        };

        let glide = |start: f32, fraction: f32| {
            let mut lane = Automation::new(start);
            lane.set_value_at(start, 0.0)
                .exponential_ramp_to(1.0, (duration * fraction).max(MIN_TIME));
            lane
        };

        match technique {
            Technique::Bend => modulation.pitch = glide(BEND_START_RATIO, BEND_GLIDE_FRACTION),
            Technique::Slide => modulation.pitch = glide(SLIDE_START_RATIO, SLIDE_GLIDE_FRACTION),
            Technique::Vibrato => modulation.vibrato = Some(SineLfo::new(VIBRATO_RATE)),
            Technique::Hammer => {
                let mut lane = Automation::new(HAMMER_BOOST);
                lane.set_value_at(HAMMER_BOOST, 0.0)
                    .exponential_ramp_to(1.0, HAMMER_SETTLE_SECONDS);
                modulation.overtone_gain = lane;
            }
            Technique::Pull => modulation.initial_level = PULL_INITIAL_LEVEL,
            Technique::Normal => {}
        }

        modulation
    }

    /// Level the amplitude envelope starts from.
    pub fn initial_level(&self) -> f32 {
        self.initial_level
    }

    /// Pitch multiplier at `time`, advancing the vibrato LFO one sample.
    #[inline]
    pub fn next_pitch_ratio(&mut self, time: f32, sample_rate: f32) -> f32 {
        let ratio = self.pitch.value_at(time);
        match &mut self.vibrato {
            Some(lfo) => ratio * (1.0 + VIBRATO_DEPTH * lfo.next_sample(sample_rate)),
            None => ratio,
        }
    }

    /// Gain applied to the overtones (not the fundamental) at `time`.
    #[inline]
    pub fn overtone_gain(&self, time: f32) -> f32 {
        self.overtone_gain.value_at(time)
    }
}
