use crate::dsp::biquad::{Biquad, Coefficients};
use crate::dsp::lfo::SineLfo;
use crate::dsp::mix::blend_dry_wet;
use crate::graph::node::{Configurable, GraphNode, RenderCtx};
use serde::{Deserialize, Serialize};

/*
Phaser
======

Six all-pass stages in series shift the phase of the signal without
changing its level. Mixed 50/50 with the dry signal, the frequencies that
come out of the cascade 180° turned cancel, leaving a set of notches. The
LFO nudges every stage frequency together, so the notches move.

    in ──┬─────────────────────────────────────(dry)──→ (+) ──→ out
         │                                               ↑
         └─→ (+) ─→ AP₀ ─→ AP₁ ─→ … ─→ AP₅ ──┬─(wet)─────┘
              ↑                               │
              └──────── × feedback ───────────┘

Stage k rests at 200 + 300·k Hz (200, 500, … 1700 Hz) with Q 1. The LFO adds
±depth·2 Hz to every stage. Feedback takes the last stage's previous output
back into the first stage.

Coefficients refresh every CONTROL_INTERVAL samples.

Parameters
----------

Rate (0.01 - 10 Hz):     sweep speed
Depth (0 - 100):         sweep width (Hz/2)
Feedback (0 - 95 %):     notch resonance
*/

const STAGES: usize = 6;
const BASE_FREQUENCY: f32 = 200.0;
const STAGE_SPACING: f32 = 300.0;
const STAGE_Q: f32 = 1.0;
const MIX: f32 = 0.5;
const CONTROL_INTERVAL: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaserParam {
    Rate,
    Depth,
    Feedback,
}

impl PhaserParam {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rate => "rate",
            Self::Depth => "depth",
            Self::Feedback => "feedback",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rate" => Some(Self::Rate),
            "depth" => Some(Self::Depth),
            "feedback" => Some(Self::Feedback),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaserSettings {
    pub rate: f32,
    pub depth: f32,
    pub feedback: f32,
}

impl Default for PhaserSettings {
    fn default() -> Self {
        Self {
            rate: 0.5,
            depth: 70.0,
            feedback: 30.0,
        }
    }
}

impl PhaserSettings {
    pub fn get(&self, param: PhaserParam) -> f32 {
        match param {
            PhaserParam::Rate => self.rate,
            PhaserParam::Depth => self.depth,
            PhaserParam::Feedback => self.feedback,
        }
    }

    pub fn set(&mut self, param: PhaserParam, value: f32) {
        match param {
            PhaserParam::Rate => self.rate = value.clamp(0.01, 10.0),
            PhaserParam::Depth => self.depth = value.clamp(0.0, 100.0),
            PhaserParam::Feedback => self.feedback = value.clamp(0.0, 95.0),
        }
    }

    /// LFO swing applied to every stage, in Hz.
    pub fn sweep_hz(&self) -> f32 {
        self.depth * 2.0
    }
}

fn stage_frequency(stage: usize) -> f32 {
    BASE_FREQUENCY + stage as f32 * STAGE_SPACING
}

pub struct PhaserNode {
    settings: PhaserSettings,
    stages: [Biquad; STAGES],
    lfo: SineLfo,
    last_wet: f32,
    sample_rate: f32,
    countdown: usize,
}

impl PhaserNode {
    pub fn new(sample_rate: f32) -> Self {
        let settings = PhaserSettings::default();
        let stages = std::array::from_fn(|k| {
            Biquad::new(Coefficients::allpass(
                stage_frequency(k),
                STAGE_Q,
                sample_rate,
            ))
        });
        Self {
            settings,
            stages,
            lfo: SineLfo::new(settings.rate),
            last_wet: 0.0,
            sample_rate,
            countdown: 0,
        }
    }

    fn retune(&mut self, offset_hz: f32) {
        for (k, stage) in self.stages.iter_mut().enumerate() {
            let frequency = (stage_frequency(k) + offset_hz).max(20.0);
            stage.set_coefficients(Coefficients::allpass(frequency, STAGE_Q, self.sample_rate));
        }
    }
}

impl GraphNode for PhaserNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let sweep = self.settings.sweep_hz();
        let feedback = self.settings.feedback / 100.0;

        for sample in out.iter_mut() {
            if self.countdown == 0 {
                let lfo_value = self.lfo.advance(CONTROL_INTERVAL, ctx.sample_rate);
                self.retune(lfo_value * sweep);
                self.countdown = CONTROL_INTERVAL;
            }
            self.countdown -= 1;

            let mut wet = *sample + self.last_wet * feedback;
            for stage in self.stages.iter_mut() {
                wet = stage.process(wet);
            }
            self.last_wet = wet;

            *sample = blend_dry_wet(*sample, wet, MIX);
        }
    }

    fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.clear();
        }
        self.lfo.reset();
        self.last_wet = 0.0;
        self.countdown = 0;
    }
}

impl Configurable for PhaserNode {
    type Param = PhaserParam;
    type Settings = PhaserSettings;

    fn set_param(&mut self, param: Self::Param, value: f32) {
        self.settings.set(param, value);
        self.lfo.set_rate(self.settings.rate);
    }

    fn configure(&mut self, settings: &Self::Settings) {
        self.settings.set(PhaserParam::Rate, settings.rate);
        self.settings.set(PhaserParam::Depth, settings.depth);
        self.settings.set(PhaserParam::Feedback, settings.feedback);
        self.lfo.set_rate(self.settings.rate);
    }

    fn settings(&self) -> Self::Settings {
        self.settings
    }
}
