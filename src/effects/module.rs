use super::{EffectKind, EffectParam, EffectSettings};
use crate::graph::{
    chorus::ChorusNode, compressor::CompressorNode, delay::DelayNode, distortion::DistortionNode,
    eq::EqNode, flanger::FlangerNode, phaser::PhaserNode, wah::WahNode, Configurable, GraphNode,
    RenderCtx,
};

/// The closed set of pedals the board can hold.
///
/// Dispatch is a `match`, so the render path stays free of vtables and the
/// compiler sees every node's `render_block`.
pub enum EffectModule {
    Compressor(CompressorNode),
    Distortion(DistortionNode),
    Wah(WahNode),
    Phaser(PhaserNode),
    Flanger(FlangerNode),
    Eq(EqNode),
    Chorus(ChorusNode),
    Delay(DelayNode),
}

impl EffectModule {
    /// Build a pedal at factory settings.
    pub fn new(kind: EffectKind, sample_rate: f32) -> Self {
        match kind {
            EffectKind::Compressor => Self::Compressor(CompressorNode::new(sample_rate)),
            EffectKind::Distortion => Self::Distortion(DistortionNode::new(sample_rate)),
            EffectKind::Wah => Self::Wah(WahNode::new(sample_rate)),
            EffectKind::Phaser => Self::Phaser(PhaserNode::new(sample_rate)),
            EffectKind::Flanger => Self::Flanger(FlangerNode::new(sample_rate)),
            EffectKind::Eq => Self::Eq(EqNode::new(sample_rate)),
            EffectKind::Chorus => Self::Chorus(ChorusNode::new(sample_rate)),
            EffectKind::Delay => Self::Delay(DelayNode::new(sample_rate)),
        }
    }

    /// The full board, one pedal per slot, indexed by [`EffectKind::index`].
    pub fn board(sample_rate: f32) -> [EffectModule; EffectKind::COUNT] {
        EffectKind::CHAIN_ORDER.map(|kind| Self::new(kind, sample_rate))
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Self::Compressor(_) => EffectKind::Compressor,
            Self::Distortion(_) => EffectKind::Distortion,
            Self::Wah(_) => EffectKind::Wah,
            Self::Phaser(_) => EffectKind::Phaser,
            Self::Flanger(_) => EffectKind::Flanger,
            Self::Eq(_) => EffectKind::Eq,
            Self::Chorus(_) => EffectKind::Chorus,
            Self::Delay(_) => EffectKind::Delay,
        }
    }

    /// Move one knob. Knobs of other pedals are ignored.
    pub fn set_param(&mut self, param: EffectParam, value: f32) {
        match (self, param) {
            (Self::Compressor(n), EffectParam::Compressor(p)) => n.set_param(p, value),
            (Self::Distortion(n), EffectParam::Distortion(p)) => n.set_param(p, value),
            (Self::Wah(n), EffectParam::Wah(p)) => n.set_param(p, value),
            (Self::Phaser(n), EffectParam::Phaser(p)) => n.set_param(p, value),
            (Self::Flanger(n), EffectParam::Flanger(p)) => n.set_param(p, value),
            (Self::Eq(n), EffectParam::Eq(p)) => n.set_param(p, value),
            (Self::Chorus(n), EffectParam::Chorus(p)) => n.set_param(p, value),
            (Self::Delay(n), EffectParam::Delay(p)) => n.set_param(p, value),
            _ => {}
        }
    }

    /// Load a whole pedal's settings. Settings for other pedals are ignored.
    pub fn configure(&mut self, settings: &EffectSettings) {
        match (self, settings) {
            (Self::Compressor(n), EffectSettings::Compressor(s)) => n.configure(s),
            (Self::Distortion(n), EffectSettings::Distortion(s)) => n.configure(s),
            (Self::Wah(n), EffectSettings::Wah(s)) => n.configure(s),
            (Self::Phaser(n), EffectSettings::Phaser(s)) => n.configure(s),
            (Self::Flanger(n), EffectSettings::Flanger(s)) => n.configure(s),
            (Self::Eq(n), EffectSettings::Eq(s)) => n.configure(s),
            (Self::Chorus(n), EffectSettings::Chorus(s)) => n.configure(s),
            (Self::Delay(n), EffectSettings::Delay(s)) => n.configure(s),
            _ => {}
        }
    }

    pub fn settings(&self) -> EffectSettings {
        match self {
            Self::Compressor(n) => EffectSettings::Compressor(n.settings()),
            Self::Distortion(n) => EffectSettings::Distortion(n.settings()),
            Self::Wah(n) => EffectSettings::Wah(n.settings()),
            Self::Phaser(n) => EffectSettings::Phaser(n.settings()),
            Self::Flanger(n) => EffectSettings::Flanger(n.settings()),
            Self::Eq(n) => EffectSettings::Eq(n.settings()),
            Self::Chorus(n) => EffectSettings::Chorus(n.settings()),
            Self::Delay(n) => EffectSettings::Delay(n.settings()),
        }
    }
}

impl GraphNode for EffectModule {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        match self {
            Self::Compressor(n) => n.render_block(out, ctx),
            Self::Distortion(n) => n.render_block(out, ctx),
            Self::Wah(n) => n.render_block(out, ctx),
            Self::Phaser(n) => n.render_block(out, ctx),
            Self::Flanger(n) => n.render_block(out, ctx),
            Self::Eq(n) => n.render_block(out, ctx),
            Self::Chorus(n) => n.render_block(out, ctx),
            Self::Delay(n) => n.render_block(out, ctx),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Compressor(n) => n.reset(),
            Self::Distortion(n) => n.reset(),
            Self::Wah(n) => n.reset(),
            Self::Phaser(n) => n.reset(),
            Self::Flanger(n) => n.reset(),
            Self::Eq(n) => n.reset(),
            Self::Chorus(n) => n.reset(),
            Self::Delay(n) => n.reset(),
        }
    }
}
