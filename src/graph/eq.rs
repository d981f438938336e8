use crate::dsp::biquad::{Biquad, Coefficients};
use crate::graph::node::{Configurable, GraphNode, RenderCtx};
use serde::{Deserialize, Serialize};

/*
Three-Band EQ
=============

    in ──→ low shelf ──→ peaking ──→ high shelf ──→ out
           320 Hz        1 kHz, Q 1   3.2 kHz

Each band is an independent boost/cut in dB. At 0 dB a band is exactly
transparent, so a flat EQ costs nothing but CPU.
*/

const BASS_FREQUENCY: f32 = 320.0;
const MID_FREQUENCY: f32 = 1000.0;
const MID_Q: f32 = 1.0;
const TREBLE_FREQUENCY: f32 = 3200.0;
const MAX_GAIN_DB: f32 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EqParam {
    Bass,
    Mid,
    Treble,
}

impl EqParam {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bass => "bass",
            Self::Mid => "mid",
            Self::Treble => "treble",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bass" => Some(Self::Bass),
            "mid" => Some(Self::Mid),
            "treble" => Some(Self::Treble),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EqSettings {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

impl EqSettings {
    pub fn get(&self, param: EqParam) -> f32 {
        match param {
            EqParam::Bass => self.bass,
            EqParam::Mid => self.mid,
            EqParam::Treble => self.treble,
        }
    }

    pub fn set(&mut self, param: EqParam, value: f32) {
        let value = value.clamp(-MAX_GAIN_DB, MAX_GAIN_DB);
        match param {
            EqParam::Bass => self.bass = value,
            EqParam::Mid => self.mid = value,
            EqParam::Treble => self.treble = value,
        }
    }
}

pub struct EqNode {
    settings: EqSettings,
    bass: Biquad,
    mid: Biquad,
    treble: Biquad,
    sample_rate: f32,
}

impl EqNode {
    pub fn new(sample_rate: f32) -> Self {
        let mut node = Self {
            settings: EqSettings::default(),
            bass: Biquad::passthrough(),
            mid: Biquad::passthrough(),
            treble: Biquad::passthrough(),
            sample_rate,
        };
        node.refresh(EqParam::Bass);
        node.refresh(EqParam::Mid);
        node.refresh(EqParam::Treble);
        node
    }

    fn refresh(&mut self, band: EqParam) {
        let sr = self.sample_rate;
        match band {
            EqParam::Bass => self.bass.set_coefficients(Coefficients::lowshelf(
                BASS_FREQUENCY,
                self.settings.bass,
                sr,
            )),
            EqParam::Mid => self.mid.set_coefficients(Coefficients::peaking(
                MID_FREQUENCY,
                MID_Q,
                self.settings.mid,
                sr,
            )),
            EqParam::Treble => self.treble.set_coefficients(Coefficients::highshelf(
                TREBLE_FREQUENCY,
                self.settings.treble,
                sr,
            )),
        }
    }
}

impl GraphNode for EqNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            let low = self.bass.process(*sample);
            let mid = self.mid.process(low);
            *sample = self.treble.process(mid);
        }
    }

    fn reset(&mut self) {
        self.bass.clear();
        self.mid.clear();
        self.treble.clear();
    }
}

impl Configurable for EqNode {
    type Param = EqParam;
    type Settings = EqSettings;

    fn set_param(&mut self, param: Self::Param, value: f32) {
        self.settings.set(param, value);
        self.refresh(param);
    }

    fn configure(&mut self, settings: &Self::Settings) {
        for band in [EqParam::Bass, EqParam::Mid, EqParam::Treble] {
            self.set_param(band, settings.get(band));
        }
    }

    fn settings(&self) -> Self::Settings {
        self.settings
    }
}
