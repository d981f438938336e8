use super::{EffectKind, EffectParam};
use crate::error::ConfigurationError;
use crate::graph::{
    chorus::ChorusParam, compressor::CompressorParam, delay::DelayParam,
    distortion::DistortionParam, eq::EqParam, flanger::FlangerParam, phaser::PhaserParam,
    wah::WahParam,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named pedalboard.
///
/// Applying a preset switches on exactly the pedals it lists, turns every
/// other pedal off, and moves the listed knobs. Knobs it does not mention
/// keep their current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Clean,
    Blues,
    Rock,
    Lead,
    Funk,
    Autowah,
    Ambient,
    Reggae,
}

/// One switched-on pedal in a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetPedal {
    pub kind: EffectKind,
    pub knobs: &'static [(EffectParam, f32)],
}

const fn pedal(kind: EffectKind, knobs: &'static [(EffectParam, f32)]) -> PresetPedal {
    PresetPedal { kind, knobs }
}

use EffectParam as P;

const BLUES: &[PresetPedal] = &[
    pedal(
        EffectKind::Distortion,
        &[
            (P::Distortion(DistortionParam::Gain), 35.0),
            (P::Distortion(DistortionParam::Tone), 60.0),
        ],
    ),
    pedal(
        EffectKind::Compressor,
        &[
            (P::Compressor(CompressorParam::Threshold), -18.0),
            (P::Compressor(CompressorParam::Ratio), 3.0),
        ],
    ),
    pedal(
        EffectKind::Eq,
        &[
            (P::Eq(EqParam::Bass), 2.0),
            (P::Eq(EqParam::Mid), 3.0),
            (P::Eq(EqParam::Treble), 1.0),
        ],
    ),
];

const ROCK: &[PresetPedal] = &[
    pedal(
        EffectKind::Distortion,
        &[
            (P::Distortion(DistortionParam::Gain), 65.0),
            (P::Distortion(DistortionParam::Tone), 45.0),
        ],
    ),
    pedal(
        EffectKind::Compressor,
        &[
            (P::Compressor(CompressorParam::Threshold), -15.0),
            (P::Compressor(CompressorParam::Ratio), 6.0),
        ],
    ),
    pedal(
        EffectKind::Eq,
        &[
            (P::Eq(EqParam::Bass), 4.0),
            (P::Eq(EqParam::Mid), 2.0),
            (P::Eq(EqParam::Treble), 3.0),
        ],
    ),
];

const LEAD: &[PresetPedal] = &[
    pedal(
        EffectKind::Distortion,
        &[
            (P::Distortion(DistortionParam::Gain), 75.0),
            (P::Distortion(DistortionParam::Tone), 70.0),
        ],
    ),
    pedal(
        EffectKind::Delay,
        &[
            (P::Delay(DelayParam::Time), 250.0),
            (P::Delay(DelayParam::Feedback), 25.0),
            (P::Delay(DelayParam::Mix), 30.0),
        ],
    ),
    pedal(
        EffectKind::Compressor,
        &[
            (P::Compressor(CompressorParam::Threshold), -12.0),
            (P::Compressor(CompressorParam::Ratio), 8.0),
        ],
    ),
    pedal(
        EffectKind::Eq,
        &[
            (P::Eq(EqParam::Bass), 1.0),
            (P::Eq(EqParam::Mid), 5.0),
            (P::Eq(EqParam::Treble), 4.0),
        ],
    ),
];

const FUNK: &[PresetPedal] = &[
    pedal(
        EffectKind::Compressor,
        &[
            (P::Compressor(CompressorParam::Threshold), -20.0),
            (P::Compressor(CompressorParam::Ratio), 4.0),
        ],
    ),
    pedal(
        EffectKind::Wah,
        &[
            (P::Wah(WahParam::Frequency), 600.0),
            (P::Wah(WahParam::Q), 15.0),
            (P::Wah(WahParam::Sensitivity), 70.0),
            (P::Wah(WahParam::AutoSweep), 1.0),
        ],
    ),
    pedal(
        EffectKind::Phaser,
        &[
            (P::Phaser(PhaserParam::Rate), 0.3),
            (P::Phaser(PhaserParam::Depth), 60.0),
            (P::Phaser(PhaserParam::Feedback), 25.0),
        ],
    ),
    pedal(
        EffectKind::Eq,
        &[
            (P::Eq(EqParam::Bass), 1.0),
            (P::Eq(EqParam::Mid), 2.0),
            (P::Eq(EqParam::Treble), -1.0),
        ],
    ),
];

const AUTOWAH: &[PresetPedal] = &[
    pedal(
        EffectKind::Distortion,
        &[
            (P::Distortion(DistortionParam::Gain), 25.0),
            (P::Distortion(DistortionParam::Tone), 55.0),
        ],
    ),
    pedal(
        EffectKind::Compressor,
        &[
            (P::Compressor(CompressorParam::Threshold), -16.0),
            (P::Compressor(CompressorParam::Ratio), 5.0),
        ],
    ),
    pedal(
        EffectKind::Wah,
        &[
            (P::Wah(WahParam::Frequency), 800.0),
            (P::Wah(WahParam::Q), 20.0),
            (P::Wah(WahParam::Sensitivity), 80.0),
            (P::Wah(WahParam::AutoSweep), 1.0),
        ],
    ),
    pedal(
        EffectKind::Eq,
        &[
            (P::Eq(EqParam::Bass), 0.0),
            (P::Eq(EqParam::Mid), 3.0),
            (P::Eq(EqParam::Treble), 1.0),
        ],
    ),
];

const AMBIENT: &[PresetPedal] = &[
    pedal(
        EffectKind::Delay,
        &[
            (P::Delay(DelayParam::Time), 500.0),
            (P::Delay(DelayParam::Feedback), 45.0),
            (P::Delay(DelayParam::Mix), 50.0),
        ],
    ),
    pedal(
        EffectKind::Chorus,
        &[
            (P::Chorus(ChorusParam::Rate), 0.8),
            (P::Chorus(ChorusParam::Depth), 70.0),
        ],
    ),
    pedal(
        EffectKind::Phaser,
        &[
            (P::Phaser(PhaserParam::Rate), 0.2),
            (P::Phaser(PhaserParam::Depth), 50.0),
            (P::Phaser(PhaserParam::Feedback), 20.0),
        ],
    ),
    pedal(
        EffectKind::Flanger,
        &[
            (P::Flanger(FlangerParam::Rate), 0.15),
            (P::Flanger(FlangerParam::Depth), 60.0),
            (P::Flanger(FlangerParam::Feedback), 15.0),
            (P::Flanger(FlangerParam::Delay), 8.0),
        ],
    ),
    pedal(
        EffectKind::Eq,
        &[
            (P::Eq(EqParam::Bass), -2.0),
            (P::Eq(EqParam::Mid), 0.0),
            (P::Eq(EqParam::Treble), 2.0),
        ],
    ),
];

const REGGAE: &[PresetPedal] = &[
    pedal(
        EffectKind::Delay,
        &[
            (P::Delay(DelayParam::Time), 400.0),
            (P::Delay(DelayParam::Feedback), 35.0),
            (P::Delay(DelayParam::Mix), 40.0),
        ],
    ),
    pedal(
        EffectKind::Compressor,
        &[
            (P::Compressor(CompressorParam::Threshold), -22.0),
            (P::Compressor(CompressorParam::Ratio), 3.0),
        ],
    ),
    pedal(
        EffectKind::Phaser,
        &[
            (P::Phaser(PhaserParam::Rate), 0.4),
            (P::Phaser(PhaserParam::Depth), 45.0),
            (P::Phaser(PhaserParam::Feedback), 15.0),
        ],
    ),
    pedal(
        EffectKind::Eq,
        &[
            (P::Eq(EqParam::Bass), 3.0),
            (P::Eq(EqParam::Mid), -2.0),
            (P::Eq(EqParam::Treble), 1.0),
        ],
    ),
];

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::Clean,
        Preset::Blues,
        Preset::Rock,
        Preset::Lead,
        Preset::Funk,
        Preset::Autowah,
        Preset::Ambient,
        Preset::Reggae,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Blues => "blues",
            Self::Rock => "rock",
            Self::Lead => "lead",
            Self::Funk => "funk",
            Self::Autowah => "autowah",
            Self::Ambient => "ambient",
            Self::Reggae => "reggae",
        }
    }

    /// The pedals this preset switches on, with their knob positions.
    pub fn pedals(self) -> &'static [PresetPedal] {
        match self {
            Self::Clean => &[],
            Self::Blues => BLUES,
            Self::Rock => ROCK,
            Self::Lead => LEAD,
            Self::Funk => FUNK,
            Self::Autowah => AUTOWAH,
            Self::Ambient => AMBIENT,
            Self::Reggae => REGGAE,
        }
    }

    pub fn enables(self, kind: EffectKind) -> bool {
        self.pedals().iter().any(|pedal| pedal.kind == kind)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| ConfigurationError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_parse_by_name() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
        }
        assert!(matches!(
            "metal".parse::<Preset>(),
            Err(ConfigurationError::UnknownPreset(name)) if name == "metal"
        ));
    }

    #[test]
    fn clean_enables_nothing() {
        assert!(Preset::Clean.pedals().is_empty());
    }

    #[test]
    fn knobs_belong_to_their_pedal() {
        for preset in Preset::ALL {
            for pedal in preset.pedals() {
                for (param, _) in pedal.knobs {
                    assert_eq!(param.kind(), pedal.kind, "{preset}: {}", param.name());
                }
            }
        }
    }

    #[test]
    fn no_preset_lists_a_pedal_twice() {
        for preset in Preset::ALL {
            for kind in EffectKind::CHAIN_ORDER {
                let count = preset.pedals().iter().filter(|p| p.kind == kind).count();
                assert!(count <= 1, "{preset} lists {kind} {count} times");
            }
        }
    }

    #[test]
    fn funk_sweeps_the_wah() {
        assert!(Preset::Funk.enables(EffectKind::Wah));
        assert!(!Preset::Funk.enables(EffectKind::Distortion));
    }
}
