use crate::dsp::biquad::{Biquad, Coefficients};
use crate::dsp::lfo::SineLfo;
use crate::graph::node::{Configurable, GraphNode, RenderCtx};
use serde::{Deserialize, Serialize};

/*
Wah
===

A narrow band-pass filter whose centre frequency is the "pedal position".
With auto sweep engaged a slow LFO rocks the pedal for you:

    centre = frequency + lfo(0.5 Hz) · frequency · 0.5 · sensitivity/100

With auto sweep off the filter sits still at `frequency`.

Coefficients are recomputed every CONTROL_INTERVAL samples while sweeping,
which is fine-grained enough at a 0.5 Hz sweep and keeps the trig off the
per-sample path.

Parameters
----------

Frequency (100 - 5000 Hz):   resting centre
Q (0.5 - 30):                resonance (higher = more vocal "quack")
Sensitivity (0 - 100 %):     sweep width
Auto sweep (on/off):         LFO drives the pedal
*/

const SWEEP_RATE: f32 = 0.5;
const CONTROL_INTERVAL: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WahParam {
    Frequency,
    Q,
    Sensitivity,
    /// 0.0 = off, anything ≥ 0.5 = on
    AutoSweep,
}

impl WahParam {
    pub fn name(self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::Q => "q",
            Self::Sensitivity => "sensitivity",
            Self::AutoSweep => "autoSweep",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "frequency" => Some(Self::Frequency),
            "q" => Some(Self::Q),
            "sensitivity" => Some(Self::Sensitivity),
            "autoSweep" | "auto_sweep" => Some(Self::AutoSweep),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WahSettings {
    pub frequency: f32,
    pub q: f32,
    pub sensitivity: f32,
    pub auto_sweep: bool,
}

impl Default for WahSettings {
    fn default() -> Self {
        Self {
            frequency: 800.0,
            q: 10.0,
            sensitivity: 50.0,
            auto_sweep: false,
        }
    }
}

impl WahSettings {
    pub fn get(&self, param: WahParam) -> f32 {
        match param {
            WahParam::Frequency => self.frequency,
            WahParam::Q => self.q,
            WahParam::Sensitivity => self.sensitivity,
            WahParam::AutoSweep => {
                if self.auto_sweep {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn set(&mut self, param: WahParam, value: f32) {
        match param {
            WahParam::Frequency => self.frequency = value.clamp(100.0, 5000.0),
            WahParam::Q => self.q = value.clamp(0.5, 30.0),
            WahParam::Sensitivity => self.sensitivity = value.clamp(0.0, 100.0),
            WahParam::AutoSweep => self.auto_sweep = value >= 0.5,
        }
    }

    /// Peak centre-frequency deviation in Hz (zero when not sweeping).
    pub fn sweep_depth(&self) -> f32 {
        if self.auto_sweep {
            self.frequency * 0.5 * self.sensitivity / 100.0
        } else {
            0.0
        }
    }
}

pub struct WahNode {
    settings: WahSettings,
    filter: Biquad,
    lfo: SineLfo,
    sample_rate: f32,
    countdown: usize,
}

impl WahNode {
    pub fn new(sample_rate: f32) -> Self {
        let settings = WahSettings::default();
        Self {
            settings,
            filter: Biquad::new(Coefficients::bandpass(
                settings.frequency,
                settings.q,
                sample_rate,
            )),
            lfo: SineLfo::new(SWEEP_RATE),
            sample_rate,
            countdown: 0,
        }
    }

    fn retune(&mut self, centre: f32) {
        self.filter.set_coefficients(Coefficients::bandpass(
            centre,
            self.settings.q,
            self.sample_rate,
        ));
    }
}

impl GraphNode for WahNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let depth = self.settings.sweep_depth();

        for sample in out.iter_mut() {
            if self.countdown == 0 {
                let lfo_value = self.lfo.advance(CONTROL_INTERVAL, ctx.sample_rate);
                if depth > 0.0 {
                    self.retune(self.settings.frequency + lfo_value * depth);
                }
                self.countdown = CONTROL_INTERVAL;
            }
            self.countdown -= 1;

            *sample = self.filter.process(*sample);
        }
    }

    fn reset(&mut self) {
        self.filter.clear();
        self.lfo.reset();
        self.countdown = 0;
    }
}

impl Configurable for WahNode {
    type Param = WahParam;
    type Settings = WahSettings;

    fn set_param(&mut self, param: Self::Param, value: f32) {
        self.settings.set(param, value);
        self.retune(self.settings.frequency);
    }

    fn configure(&mut self, settings: &Self::Settings) {
        self.settings.set(WahParam::Frequency, settings.frequency);
        self.settings.set(WahParam::Q, settings.q);
        self.settings.set(WahParam::Sensitivity, settings.sensitivity);
        self.settings.auto_sweep = settings.auto_sweep;
        self.retune(self.settings.frequency);
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

    fn sine(frequency: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (std::f32::consts::TAU * frequency * i as f32 / 48000.0).sin())
            .collect()
    }

    fn tail_peak(buffer: &[f32]) -> f32 {
        buffer[buffer.len() / 2..]
            .iter()
            .fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn test_static_wah_passes_centre() {
        let mut node = WahNode::new(48000.0);
        let mut buffer = sine(800.0, 9600);
        node.render_block(&mut buffer, &test_ctx());
        assert!((tail_peak(&buffer) - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_static_wah_rejects_far_frequencies() {
        let mut node = WahNode::new(48000.0);
        let mut buffer = sine(4000.0, 9600);
        node.render_block(&mut buffer, &test_ctx());
        assert!(tail_peak(&buffer) < 0.1);
    }

    #[test]
    fn test_sweep_depth_only_when_auto() {
        let mut settings = WahSettings::default();
        assert_eq!(settings.sweep_depth(), 0.0);
        settings.set(WahParam::AutoSweep, 1.0);
        assert_eq!(settings.sweep_depth(), 200.0);
    }

    #[test]
    fn test_auto_sweep_moves_filter() {
        let mut node = WahNode::new(48000.0);
        node.set_param(WahParam::AutoSweep, 1.0);
        let before = node.filter.coefficients();

        // Half a second puts the 0.5 Hz sweep a quarter turn along
        let mut buffer = vec![0.0; 24000];
        node.render_block(&mut buffer, &test_ctx());

        assert_ne!(node.filter.coefficients(), before);
    }

    #[test]
    fn test_auto_sweep_name_accepts_both_spellings() {
        assert_eq!(WahParam::from_name("autoSweep"), Some(WahParam::AutoSweep));
        assert_eq!(WahParam::from_name("auto_sweep"), Some(WahParam::AutoSweep));
    }
}
