use crate::dsp::biquad::{Biquad, Coefficients};
use crate::dsp::distortion::guitar_curve;
use crate::graph::node::{Configurable, GraphNode, RenderCtx};
use serde::{Deserialize, Serialize};

/*
Overdrive Node
==============

The overdrive pedal: boost the signal, shape it through the guitar curve,
round off the fizz with a tone filter and bring the level back down.

Signal Path
-----------

    in ──→ pre-gain ──→ waveshaper ──→ tone low-pass ──→ × 0.3 ──→ out

Pre-gain:    1 + gain/100      (1.0x at gain 0, 2.0x at gain 100)
Waveshaper:  guitar_curve(x, gain), see dsp/distortion.rs
Tone:        resonant low-pass at 500 + tone/100 · 3000 Hz (Q 1)
Post-gain:   fixed 0.3 so engaging the pedal doesn't jump in level

Parameters
----------

Gain (0 - 100):
  Both the input boost and the curve's drive amount.
  25 = light crunch, 50 = blues overdrive, 75+ = lead distortion

Tone (0 - 100):
  Low-pass cutoff. 0 = dark (500 Hz), 100 = bright (3.5 kHz)
*/

const POST_GAIN: f32 = 0.3;
const TONE_Q: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistortionParam {
    /// Drive, 0-100
    Gain,
    /// Tone control, 0-100
    Tone,
}

impl DistortionParam {
    pub fn name(self) -> &'static str {
        match self {
            Self::Gain => "gain",
            Self::Tone => "tone",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gain" => Some(Self::Gain),
            "tone" => Some(Self::Tone),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistortionSettings {
    pub gain: f32,
    pub tone: f32,
}

impl Default for DistortionSettings {
    fn default() -> Self {
        Self {
            gain: 50.0,
            tone: 50.0,
        }
    }
}

impl DistortionSettings {
    pub fn get(&self, param: DistortionParam) -> f32 {
        match param {
            DistortionParam::Gain => self.gain,
            DistortionParam::Tone => self.tone,
        }
    }

    pub fn set(&mut self, param: DistortionParam, value: f32) {
        match param {
            DistortionParam::Gain => self.gain = value.clamp(0.0, 100.0),
            DistortionParam::Tone => self.tone = value.clamp(0.0, 100.0),
        }
    }

    pub fn pre_gain(&self) -> f32 {
        1.0 + self.gain / 100.0
    }

    pub fn tone_frequency(&self) -> f32 {
        500.0 + self.tone / 100.0 * 3000.0
    }
}

/// Guitar overdrive pedal
pub struct DistortionNode {
    settings: DistortionSettings,
    tone_filter: Biquad,
    sample_rate: f32,
}

impl DistortionNode {
    pub fn new(sample_rate: f32) -> Self {
        let settings = DistortionSettings::default();
        Self {
            settings,
            tone_filter: Biquad::new(Coefficients::lowpass(
                settings.tone_frequency(),
                TONE_Q,
                sample_rate,
            )),
            sample_rate,
        }
    }

    fn refresh_tone(&mut self) {
        self.tone_filter.set_coefficients(Coefficients::lowpass(
            self.settings.tone_frequency(),
            TONE_Q,
            self.sample_rate,
        ));
    }
}

impl GraphNode for DistortionNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        let pre_gain = self.settings.pre_gain();
        let amount = self.settings.gain;

        for sample in out.iter_mut() {
            let shaped = guitar_curve(*sample * pre_gain, amount);
            *sample = self.tone_filter.process(shaped) * POST_GAIN;
        }
    }

    fn reset(&mut self) {
        self.tone_filter.clear();
    }
}

impl Configurable for DistortionNode {
    type Param = DistortionParam;
    type Settings = DistortionSettings;

    fn set_param(&mut self, param: Self::Param, value: f32) {
        self.settings.set(param, value);
        if param == DistortionParam::Tone {
            self.refresh_tone();
        }
    }

    fn configure(&mut self, settings: &Self::Settings) {
        self.settings.set(DistortionParam::Gain, settings.gain);
        self.settings.set(DistortionParam::Tone, settings.tone);
        self.refresh_tone();
    }

    fn settings(&self) -> Self::Settings {
        self.settings
    }
}
