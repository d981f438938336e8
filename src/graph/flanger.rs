use crate::dsp::delay::DelayLine;
use crate::dsp::lfo::SineLfo;
use crate::dsp::mix::blend_dry_wet;
use crate::graph::node::{Configurable, GraphNode, RenderCtx};
use serde::{Deserialize, Serialize};

/*
Flanger
=======

A flanger is a chorus with a much shorter delay and a feedback path. Mixing
a signal with a copy delayed by a few milliseconds carves a comb of notches
into the spectrum; sweeping the delay sweeps the comb ("jet plane" whoosh).
Feedback deepens the notches and adds resonant peaks between them.

    in ──┬──────────────────────────────(dry)──→ (+) ──→ out
         │                                        ↑
         └──→ (+) ──→ [ delay ~ LFO ] ──┬──(wet)──┘
               ↑                        │
               └────── × feedback ──────┘

The LFO swings the delay around the base delay by ±delay · depth/100, so
depth 100% sweeps from 0 ms up to twice the base delay. The tap is clamped
to the 20 ms line.

Parameters
----------

Rate (0.01 - 10 Hz):     sweep speed
Depth (0 - 100 %):       sweep width relative to the base delay
Feedback (0 - 95 %):     resonance of the comb
Delay (0.1 - 10 ms):     centre of the sweep
*/

const MAX_DELAY_SECONDS: f32 = 0.020;
const MIX: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlangerParam {
    Rate,
    Depth,
    Feedback,
    Delay,
}

impl FlangerParam {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rate => "rate",
            Self::Depth => "depth",
            Self::Feedback => "feedback",
            Self::Delay => "delay",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rate" => Some(Self::Rate),
            "depth" => Some(Self::Depth),
            "feedback" => Some(Self::Feedback),
            "delay" => Some(Self::Delay),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlangerSettings {
    pub rate: f32,
    pub depth: f32,
    pub feedback: f32,
    pub delay: f32,
}

impl Default for FlangerSettings {
    fn default() -> Self {
        Self {
            rate: 0.3,
            depth: 80.0,
            feedback: 20.0,
            delay: 5.0,
        }
    }
}

impl FlangerSettings {
    pub fn get(&self, param: FlangerParam) -> f32 {
        match param {
            FlangerParam::Rate => self.rate,
            FlangerParam::Depth => self.depth,
            FlangerParam::Feedback => self.feedback,
            FlangerParam::Delay => self.delay,
        }
    }

    pub fn set(&mut self, param: FlangerParam, value: f32) {
        match param {
            FlangerParam::Rate => self.rate = value.clamp(0.01, 10.0),
            FlangerParam::Depth => self.depth = value.clamp(0.0, 100.0),
            FlangerParam::Feedback => self.feedback = value.clamp(0.0, 95.0),
            FlangerParam::Delay => self.delay = value.clamp(0.1, 10.0),
        }
    }

    /// LFO amplitude in seconds.
    pub fn swing_seconds(&self) -> f32 {
        self.delay / 1000.0 * self.depth / 100.0
    }
}

pub struct FlangerNode {
    settings: FlangerSettings,
    delay_line: DelayLine,
    lfo: SineLfo,
}

impl FlangerNode {
    pub fn new(sample_rate: f32) -> Self {
        let settings = FlangerSettings::default();
        Self {
            settings,
            delay_line: DelayLine::with_max_time(MAX_DELAY_SECONDS, sample_rate),
            lfo: SineLfo::new(settings.rate),
        }
    }
}

impl GraphNode for FlangerNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let sample_rate = ctx.sample_rate;
        let base = self.settings.delay / 1000.0;
        let swing = self.settings.swing_seconds();
        let feedback = self.settings.feedback / 100.0;

        for sample in out.iter_mut() {
            let lfo_value = self.lfo.next_sample(sample_rate);
            let delay_samples = ((base + lfo_value * swing) * sample_rate).max(1.0);

            let delayed = self.delay_line.read_interpolated(delay_samples);
            self.delay_line.write(*sample + delayed * feedback);

            *sample = blend_dry_wet(*sample, delayed, MIX);
        }
    }

    fn reset(&mut self) {
        self.delay_line.reset();
        self.lfo.reset();
    }
}

impl Configurable for FlangerNode {
    type Param = FlangerParam;
    type Settings = FlangerSettings;

    fn set_param(&mut self, param: Self::Param, value: f32) {
        self.settings.set(param, value);
        self.lfo.set_rate(self.settings.rate);
    }

    fn configure(&mut self, settings: &Self::Settings) {
        self.settings.set(FlangerParam::Rate, settings.rate);
        self.settings.set(FlangerParam::Depth, settings.depth);
        self.settings.set(FlangerParam::Feedback, settings.feedback);
        self.settings.set(FlangerParam::Delay, settings.delay);
        self.lfo.set_rate(self.settings.rate);
    }

    fn settings(&self) -> Self::Settings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ctx() -> RenderCtx {
        RenderCtx::new(48000.0)
    }

    #[test]
    fn test_swing_scales_with_depth() {
        let settings = FlangerSettings::default();
        // 5 ms base, 80% depth
        assert!((settings.swing_seconds() - 0.004).abs() < 1e-6);
    }

    #[test]
    fn test_flanger_stays_bounded_with_max_feedback() {
        let mut node = FlangerNode::new(48000.0);
        node.configure(&FlangerSettings {
            rate: 2.0,
            depth: 100.0,
            feedback: 95.0,
            delay: 10.0,
        });
        let mut buffer: Vec<f32> = (0..48000).map(|i| (i as f32 * 0.03).sin() * 0.5).collect();

        node.render_block(&mut buffer, &test_ctx());

        assert!(buffer.iter().all(|s| s.is_finite() && s.abs() < 20.0));
    }

    #[test]
    fn test_static_flanger_is_comb() {
        let mut node = FlangerNode::new(48000.0);
        node.configure(&FlangerSettings {
            rate: 0.3,
            depth: 0.0,
            feedback: 0.0,
            delay: 1.0,
        });
        let mut buffer = vec![0.0; 100];
        buffer[0] = 1.0;

        node.render_block(&mut buffer, &test_ctx());

        // 1 ms at 48 kHz is 48 samples
        assert!((buffer[0] - 0.5).abs() < 1e-6);
        assert!((buffer[48] - 0.5).abs() < 1e-3);
    }
}
