use crate::dsp::dynamics::{db_to_linear, linear_to_db, EnvelopeFollower, GainComputer};
use crate::graph::node::{Configurable, GraphNode, RenderCtx};
use serde::{Deserialize, Serialize};

/*
Compressor
==========

A feed-forward compressor evens out picking dynamics before the drive
stage, which is why it sits first in the chain.

    in ──┬──────────────────────────────→ (×) ──→ out
         │                                 ↑
         └──→ follower ──→ dB ──→ curve ───┘
              (3 ms / 250 ms)     (threshold, ratio, 30 dB knee)

Parameters
----------

Threshold (-100 - 0 dB):
  Level where gain reduction starts (softened by the wide knee).

Ratio (1 - 20):
  dB of input above threshold per dB of output. 4 = moderate squash.
*/

const ATTACK_SECONDS: f32 = 0.003;
const RELEASE_SECONDS: f32 = 0.25;
const KNEE_DB: f32 = 30.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompressorParam {
    /// Threshold in dB
    Threshold,
    /// Compression ratio
    Ratio,
}

impl CompressorParam {
    pub fn name(self) -> &'static str {
        match self {
            Self::Threshold => "threshold",
            Self::Ratio => "ratio",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "threshold" => Some(Self::Threshold),
            "ratio" => Some(Self::Ratio),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressorSettings {
    pub threshold: f32,
    pub ratio: f32,
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self {
            threshold: -24.0,
            ratio: 4.0,
        }
    }
}

impl CompressorSettings {
    pub fn get(&self, param: CompressorParam) -> f32 {
        match param {
            CompressorParam::Threshold => self.threshold,
            CompressorParam::Ratio => self.ratio,
        }
    }

    pub fn set(&mut self, param: CompressorParam, value: f32) {
        match param {
            CompressorParam::Threshold => self.threshold = value.clamp(-100.0, 0.0),
            CompressorParam::Ratio => self.ratio = value.clamp(1.0, 20.0),
        }
    }
}

pub struct CompressorNode {
    settings: CompressorSettings,
    follower: EnvelopeFollower,
    curve: GainComputer,
}

impl CompressorNode {
    pub fn new(sample_rate: f32) -> Self {
        let settings = CompressorSettings::default();
        Self {
            settings,
            follower: EnvelopeFollower::new(sample_rate, ATTACK_SECONDS, RELEASE_SECONDS),
            curve: GainComputer {
                threshold_db: settings.threshold,
                ratio: settings.ratio,
                knee_db: KNEE_DB,
            },
        }
    }

    fn refresh_curve(&mut self) {
        self.curve.threshold_db = self.settings.threshold;
        self.curve.ratio = self.settings.ratio;
    }
}

impl GraphNode for CompressorNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            let level = self.follower.process(*sample);
            let reduction_db = self.curve.gain_db(linear_to_db(level));
            *sample *= db_to_linear(reduction_db);
        }
    }

    fn reset(&mut self) {
        self.follower.reset();
    }
}

impl Configurable for CompressorNode {
    type Param = CompressorParam;
    type Settings = CompressorSettings;

    fn set_param(&mut self, param: Self::Param, value: f32) {
        self.settings.set(param, value);
        self.refresh_curve();
    }

    fn configure(&mut self, settings: &Self::Settings) {
        self.settings.set(CompressorParam::Threshold, settings.threshold);
        self.settings.set(CompressorParam::Ratio, settings.ratio);
        self.refresh_curve();
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

    fn steady_peak(node: &mut CompressorNode, amplitude: f32) -> f32 {
        let mut buffer: Vec<f32> = (0..48000)
            .map(|i| (i as f32 * 0.05).sin() * amplitude)
            .collect();
        node.render_block(&mut buffer, &test_ctx());
        buffer[24000..].iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn test_quiet_signal_passes() {
        let mut node = CompressorNode::new(48000.0);
        let peak = steady_peak(&mut node, 0.001);
        assert!((peak - 0.001).abs() < 1e-4);
    }

    #[test]
    fn test_loud_signal_is_reduced() {
        let mut node = CompressorNode::new(48000.0);
        let peak = steady_peak(&mut node, 1.0);
        assert!(peak < 0.5, "peak was {peak}");
    }

    #[test]
    fn test_unity_ratio_is_transparent() {
        let mut node = CompressorNode::new(48000.0);
        node.set_param(CompressorParam::Ratio, 1.0);
        let peak = steady_peak(&mut node, 1.0);
        assert!((peak - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_settings_round_trip_through_configure() {
        let mut node = CompressorNode::new(48000.0);
        let settings = CompressorSettings {
            threshold: -12.0,
            ratio: 8.0,
        };
        node.configure(&settings);
        assert_eq!(node.settings(), settings);
    }
}
