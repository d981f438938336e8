use crate::dsp::delay::DelayLine;
use crate::dsp::mix::blend_dry_wet;
use crate::graph::node::{Configurable, GraphNode, RenderCtx};
use serde::{Deserialize, Serialize};

/*
Echo Node
=========

A single feedback delay line. Each repeat is the previous one scaled by the
feedback amount, so repeats fade geometrically:

    in ──┬─────────────────────────────(dry)──→ (+) ──→ out
         │                                       ↑
         └──→ (+) ──→ [ delay ] ──┬──────(wet)───┘
               ↑                  │
               └── × feedback ────┘

Parameters
----------

Time (1 - 1000 ms):     gap between repeats
Feedback (0 - 95 %):    level of each repeat relative to the last
Mix (0 - 100 %):        wet level; dry is 100 - mix
*/

pub const MAX_DELAY_SECONDS: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelayParam {
    /// Delay time in ms
    Time,
    /// Feedback, percent
    Feedback,
    /// Wet level, percent
    Mix,
}

impl DelayParam {
    pub fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Feedback => "feedback",
            Self::Mix => "mix",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "time" => Some(Self::Time),
            "feedback" => Some(Self::Feedback),
            "mix" => Some(Self::Mix),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelaySettings {
    pub time: f32,
    pub feedback: f32,
    pub mix: f32,
}

impl Default for DelaySettings {
    fn default() -> Self {
        Self {
            time: 300.0,
            feedback: 30.0,
            mix: 25.0,
        }
    }
}

impl DelaySettings {
    pub fn get(&self, param: DelayParam) -> f32 {
        match param {
            DelayParam::Time => self.time,
            DelayParam::Feedback => self.feedback,
            DelayParam::Mix => self.mix,
        }
    }

    pub fn set(&mut self, param: DelayParam, value: f32) {
        match param {
            DelayParam::Time => self.time = value.clamp(1.0, MAX_DELAY_SECONDS * 1000.0),
            DelayParam::Feedback => self.feedback = value.clamp(0.0, 95.0),
            DelayParam::Mix => self.mix = value.clamp(0.0, 100.0),
        }
    }
}

/// Feedback echo pedal
pub struct DelayNode {
    settings: DelaySettings,
    delay_line: DelayLine,
}

impl DelayNode {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            settings: DelaySettings::default(),
            delay_line: DelayLine::with_max_time(MAX_DELAY_SECONDS, sample_rate),
        }
    }
}

impl GraphNode for DelayNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let delay_samples = self.settings.time / 1000.0 * ctx.sample_rate;
        let feedback = self.settings.feedback / 100.0;
        let wet = self.settings.mix / 100.0;

        for sample in out.iter_mut() {
            let dry = *sample;
            let delayed = self.delay_line.read_interpolated(delay_samples);
            self.delay_line.write(dry + delayed * feedback);
            *sample = blend_dry_wet(dry, delayed, wet);
        }
    }

    fn reset(&mut self) {
        self.delay_line.reset();
    }
}

impl Configurable for DelayNode {
    type Param = DelayParam;
    type Settings = DelaySettings;

    fn set_param(&mut self, param: Self::Param, value: f32) {
        self.settings.set(param, value);
    }

    fn configure(&mut self, settings: &Self::Settings) {
        self.settings.set(DelayParam::Time, settings.time);
        self.settings.set(DelayParam::Feedback, settings.feedback);
        self.settings.set(DelayParam::Mix, settings.mix);
    }

    fn settings(&self) -> Self::Settings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ctx() -> RenderCtx {
        RenderCtx::new(1000.0)
    }

    #[test]
    fn test_impulse_repeats_at_delay_time() {
        // 1 kHz keeps the sample math readable: 10 ms = 10 samples
        let mut node = DelayNode::new(1000.0);
        node.configure(&DelaySettings {
            time: 10.0,
            feedback: 50.0,
            mix: 100.0,
        });

        let mut buffer = vec![0.0; 40];
        buffer[0] = 1.0;
        node.render_block(&mut buffer, &test_ctx());

        assert_eq!(buffer[0], 0.0);
        assert!((buffer[10] - 1.0).abs() < 1e-6);
        assert!((buffer[20] - 0.5).abs() < 1e-6);
        assert!((buffer[30] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_default_mix_is_mostly_dry() {
        let mut node = DelayNode::new(1000.0);
        let mut buffer = vec![0.0; 4];
        buffer[0] = 1.0;
        node.render_block(&mut buffer, &test_ctx());

        assert!((buffer[0] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_feedback_is_capped() {
        let mut node = DelayNode::new(1000.0);
        node.set_param(DelayParam::Feedback, 150.0);
        assert_eq!(node.settings().feedback, 95.0);
    }

    #[test]
    fn test_reset_clears_repeats() {
        let mut node = DelayNode::new(1000.0);
        node.configure(&DelaySettings {
            time: 5.0,
            feedback: 0.0,
            mix: 100.0,
        });
        let mut buffer = vec![1.0; 4];
        node.render_block(&mut buffer, &test_ctx());
        node.reset();

        let mut silence = vec![0.0; 10];
        node.render_block(&mut silence, &test_ctx());
        assert!(silence.iter().all(|&s| s == 0.0));
    }
}
