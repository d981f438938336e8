//! The pedalboard: eight effect modules in a fixed order.
//!
//! - [`EffectKind`] names a slot on the board.
//! - [`EffectParam`] / [`EffectSettings`] address one knob or a whole pedal.
//! - [`module::EffectModule`] is the closed set of DSP nodes.
//! - [`chain`] turns the enabled set into a routing order.
//! - [`rack`] is the control-side mirror of every pedal.
//! - [`presets`] holds the named boards.

pub mod chain;
pub mod module;
pub mod presets;
pub mod rack;

pub use chain::{build_chain, EffectChain, EnabledSet};
pub use module::EffectModule;
pub use presets::Preset;
pub use rack::{EffectRack, EffectSettingsSnapshot};

use crate::error::ConfigurationError;
use crate::graph::{
    chorus::{ChorusParam, ChorusSettings},
    compressor::{CompressorParam, CompressorSettings},
    delay::{DelayParam, DelaySettings},
    distortion::{DistortionParam, DistortionSettings},
    eq::{EqParam, EqSettings},
    flanger::{FlangerParam, FlangerSettings},
    phaser::{PhaserParam, PhaserSettings},
    wah::{WahParam, WahSettings},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One slot on the pedalboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Compressor,
    Distortion,
    Wah,
    Phaser,
    Flanger,
    Eq,
    Chorus,
    Delay,
}

impl EffectKind {
    /// Signal order through the board, independent of enable order.
    pub const CHAIN_ORDER: [EffectKind; 8] = [
        EffectKind::Compressor,
        EffectKind::Distortion,
        EffectKind::Wah,
        EffectKind::Phaser,
        EffectKind::Flanger,
        EffectKind::Eq,
        EffectKind::Chorus,
        EffectKind::Delay,
    ];

    pub const COUNT: usize = Self::CHAIN_ORDER.len();

    /// Position in [`Self::CHAIN_ORDER`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Compressor => "compressor",
            Self::Distortion => "distortion",
            Self::Wah => "wah",
            Self::Phaser => "phaser",
            Self::Flanger => "flanger",
            Self::Eq => "eq",
            Self::Chorus => "chorus",
            Self::Delay => "delay",
        }
    }

    /// Parse a knob name for this pedal.
    pub fn param(self, name: &str) -> Option<EffectParam> {
        match self {
            Self::Compressor => CompressorParam::from_name(name).map(EffectParam::Compressor),
            Self::Distortion => DistortionParam::from_name(name).map(EffectParam::Distortion),
            Self::Wah => WahParam::from_name(name).map(EffectParam::Wah),
            Self::Phaser => PhaserParam::from_name(name).map(EffectParam::Phaser),
            Self::Flanger => FlangerParam::from_name(name).map(EffectParam::Flanger),
            Self::Eq => EqParam::from_name(name).map(EffectParam::Eq),
            Self::Chorus => ChorusParam::from_name(name).map(EffectParam::Chorus),
            Self::Delay => DelayParam::from_name(name).map(EffectParam::Delay),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::CHAIN_ORDER
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigurationError::UnknownEffect(s.to_string()))
    }
}

/// One knob on one pedal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectParam {
    Compressor(CompressorParam),
    Distortion(DistortionParam),
    Wah(WahParam),
    Phaser(PhaserParam),
    Flanger(FlangerParam),
    Eq(EqParam),
    Chorus(ChorusParam),
    Delay(DelayParam),
}

impl EffectParam {
    pub fn kind(self) -> EffectKind {
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

    pub fn name(self) -> &'static str {
        match self {
            Self::Compressor(p) => p.name(),
            Self::Distortion(p) => p.name(),
            Self::Wah(p) => p.name(),
            Self::Phaser(p) => p.name(),
            Self::Flanger(p) => p.name(),
            Self::Eq(p) => p.name(),
            Self::Chorus(p) => p.name(),
            Self::Delay(p) => p.name(),
        }
    }
}

/// Every knob of one pedal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EffectSettings {
    Compressor(CompressorSettings),
    Distortion(DistortionSettings),
    Wah(WahSettings),
    Phaser(PhaserSettings),
    Flanger(FlangerSettings),
    Eq(EqSettings),
    Chorus(ChorusSettings),
    Delay(DelaySettings),
}

impl EffectSettings {
    /// Factory settings for a pedal.
    pub fn default_for(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Compressor => Self::Compressor(CompressorSettings::default()),
            EffectKind::Distortion => Self::Distortion(DistortionSettings::default()),
            EffectKind::Wah => Self::Wah(WahSettings::default()),
            EffectKind::Phaser => Self::Phaser(PhaserSettings::default()),
            EffectKind::Flanger => Self::Flanger(FlangerSettings::default()),
            EffectKind::Eq => Self::Eq(EqSettings::default()),
            EffectKind::Chorus => Self::Chorus(ChorusSettings::default()),
            EffectKind::Delay => Self::Delay(DelaySettings::default()),
        }
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

    /// Current value of a knob, or `None` if it belongs to another pedal.
    pub fn get(&self, param: EffectParam) -> Option<f32> {
        match (self, param) {
            (Self::Compressor(s), EffectParam::Compressor(p)) => Some(s.get(p)),
            (Self::Distortion(s), EffectParam::Distortion(p)) => Some(s.get(p)),
            (Self::Wah(s), EffectParam::Wah(p)) => Some(s.get(p)),
            (Self::Phaser(s), EffectParam::Phaser(p)) => Some(s.get(p)),
            (Self::Flanger(s), EffectParam::Flanger(p)) => Some(s.get(p)),
            (Self::Eq(s), EffectParam::Eq(p)) => Some(s.get(p)),
            (Self::Chorus(s), EffectParam::Chorus(p)) => Some(s.get(p)),
            (Self::Delay(s), EffectParam::Delay(p)) => Some(s.get(p)),
            _ => None,
        }
    }

    /// Move a knob; returns `false` if it belongs to another pedal.
    pub fn set(&mut self, param: EffectParam, value: f32) -> bool {
        match (self, param) {
            (Self::Compressor(s), EffectParam::Compressor(p)) => s.set(p, value),
            (Self::Distortion(s), EffectParam::Distortion(p)) => s.set(p, value),
            (Self::Wah(s), EffectParam::Wah(p)) => s.set(p, value),
            (Self::Phaser(s), EffectParam::Phaser(p)) => s.set(p, value),
            (Self::Flanger(s), EffectParam::Flanger(p)) => s.set(p, value),
            (Self::Eq(s), EffectParam::Eq(p)) => s.set(p, value),
            (Self::Chorus(s), EffectParam::Chorus(p)) => s.set(p, value),
            (Self::Delay(s), EffectParam::Delay(p)) => s.set(p, value),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_order_indices_match_positions() {
        for (position, kind) in EffectKind::CHAIN_ORDER.iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
    }

    #[test]
    fn kinds_parse_by_name() {
        for kind in EffectKind::CHAIN_ORDER {
            assert_eq!(kind.name().parse::<EffectKind>(), Ok(kind));
        }
        assert_eq!(
            "fuzz".parse::<EffectKind>(),
            Err(ConfigurationError::UnknownEffect("fuzz".into()))
        );
    }

    #[test]
    fn params_resolve_per_pedal() {
        assert_eq!(
            EffectKind::Delay.param("mix"),
            Some(EffectParam::Delay(DelayParam::Mix))
        );
        assert_eq!(EffectKind::Chorus.param("mix"), None);
        assert_eq!(EffectKind::Wah.param("autoSweep").map(EffectParam::kind), Some(EffectKind::Wah));
    }

    #[test]
    fn settings_reject_foreign_params() {
        let mut settings = EffectSettings::default_for(EffectKind::Eq);
        assert!(!settings.set(EffectParam::Delay(DelayParam::Mix), 10.0));
        assert!(settings.set(EffectParam::Eq(EqParam::Mid), 3.0));
        assert_eq!(settings.get(EffectParam::Eq(EqParam::Mid)), Some(3.0));
    }

    #[test]
    fn every_kind_has_matching_defaults() {
        for kind in EffectKind::CHAIN_ORDER {
            assert_eq!(EffectSettings::default_for(kind).kind(), kind);
        }
    }
}
