use crate::dsp::delay::DelayLine;
use crate::dsp::lfo::SineLfo;
use crate::dsp::mix::blend_dry_wet;
use crate::graph::node::{Configurable, GraphNode, RenderCtx};
use serde::{Deserialize, Serialize};

/*
Chorus Effect
=============

Chorus thickens a sound by mixing the dry signal with a slightly delayed,
pitch-modulated copy. The modulation creates subtle detuning that makes
one guitar sound like two playing together.

How It Works
------------

1. Input signal passes through unchanged (dry)
2. A copy is sent through a short delay centred on 20 ms
3. A sine LFO swings the delay time, creating pitch variation
4. Dry and wet signals are mixed 50/50

Parameters
----------

Rate (0.1 - 10 Hz):
  LFO speed. Slower = subtle shimmer, faster = vibrato-like wobble.

Depth (0 - 100 %):
  How far the delay swings around its centre: 0.002 · depth/100 seconds,
  so 100% is ±2 ms.
*/

const BASE_DELAY_SECONDS: f32 = 0.020;
const MAX_SWING_SECONDS: f32 = 0.002;
const MAX_DELAY_SECONDS: f32 = 0.050;
const MIX: f32 = 0.5;

/// Parameters that can be set on the chorus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChorusParam {
    /// LFO rate in Hz
    Rate,
    /// Modulation depth, percent
    Depth,
}

impl ChorusParam {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rate => "rate",
            Self::Depth => "depth",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rate" => Some(Self::Rate),
            "depth" => Some(Self::Depth),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChorusSettings {
    pub rate: f32,
    pub depth: f32,
}

impl Default for ChorusSettings {
    fn default() -> Self {
        Self {
            rate: 1.5,
            depth: 50.0,
        }
    }
}

impl ChorusSettings {
    pub fn get(&self, param: ChorusParam) -> f32 {
        match param {
            ChorusParam::Rate => self.rate,
            ChorusParam::Depth => self.depth,
        }
    }

    pub fn set(&mut self, param: ChorusParam, value: f32) {
        match param {
            ChorusParam::Rate => self.rate = value.clamp(0.1, 10.0),
            ChorusParam::Depth => self.depth = value.clamp(0.0, 100.0),
        }
    }

    /// Peak delay deviation in seconds.
    pub fn swing_seconds(&self) -> f32 {
        MAX_SWING_SECONDS * self.depth / 100.0
    }
}

/// Chorus effect - thickens sound with modulated delay
pub struct ChorusNode {
    settings: ChorusSettings,
    delay_line: DelayLine,
    lfo: SineLfo,
}

impl ChorusNode {
    pub fn new(sample_rate: f32) -> Self {
        let settings = ChorusSettings::default();
        Self {
            settings,
            delay_line: DelayLine::with_max_time(MAX_DELAY_SECONDS, sample_rate),
            lfo: SineLfo::new(settings.rate),
        }
    }
}

impl GraphNode for ChorusNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let sample_rate = ctx.sample_rate;
        let swing = self.settings.swing_seconds();

        for sample in out.iter_mut() {
            // Calculate modulated delay time
            let lfo_value = self.lfo.next_sample(sample_rate);
            let delay_seconds = BASE_DELAY_SECONDS + lfo_value * swing;
            let delay_samples = (delay_seconds * sample_rate).max(1.0);

            // Get delayed sample (interpolated for smooth modulation)
            let delayed = self.delay_line.read_interpolated(delay_samples);

            // Write current sample to delay line
            self.delay_line.write(*sample);

            *sample = blend_dry_wet(*sample, delayed, MIX);
        }
    }

    fn reset(&mut self) {
        self.delay_line.reset();
        self.lfo.reset();
    }
}

impl Configurable for ChorusNode {
    type Param = ChorusParam;
    type Settings = ChorusSettings;

    fn set_param(&mut self, param: Self::Param, value: f32) {
        self.settings.set(param, value);
        self.lfo.set_rate(self.settings.rate);
    }

    fn configure(&mut self, settings: &Self::Settings) {
        self.settings.set(ChorusParam::Rate, settings.rate);
        self.settings.set(ChorusParam::Depth, settings.depth);
        self.lfo.set_rate(self.settings.rate);
    }

    fn settings(&self) -> Self::Settings {
        self.settings
    }
}
