use super::{build_chain, EffectChain, EffectKind, EffectParam, EffectSettings, EnabledSet, Preset};
use serde::{Deserialize, Serialize};

/// One pedal as the control side sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PedalState {
    pub enabled: bool,
    pub settings: EffectSettings,
}

/// Control-side mirror of the whole board.
///
/// The render thread owns the DSP nodes. This mirror holds the same switch
/// and knob positions so they can be read back without touching the audio
/// thread, and so a renderer built later starts from the current board.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRack {
    pedals: [PedalState; EffectKind::COUNT],
}

impl Default for EffectRack {
    fn default() -> Self {
        Self {
            pedals: EffectKind::CHAIN_ORDER.map(|kind| PedalState {
                enabled: false,
                settings: EffectSettings::default_for(kind),
            }),
        }
    }
}

impl EffectRack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pedal(&self, kind: EffectKind) -> &PedalState {
        &self.pedals[kind.index()]
    }

    pub fn settings(&self, kind: EffectKind) -> &EffectSettings {
        &self.pedals[kind.index()].settings
    }

    /// Switch a pedal; returns `true` if the chain changed.
    pub fn set_enabled(&mut self, kind: EffectKind, enabled: bool) -> bool {
        let pedal = &mut self.pedals[kind.index()];
        let changed = pedal.enabled != enabled;
        pedal.enabled = enabled;
        changed
    }

    /// Store a knob position. Disabled pedals keep the value for when they
    /// are switched back on.
    pub fn set_param(&mut self, param: EffectParam, value: f32) {
        self.pedals[param.kind().index()]
            .settings
            .set(param, value);
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        for kind in EffectKind::CHAIN_ORDER {
            self.pedals[kind.index()].enabled = preset.enables(kind);
        }
        for pedal in preset.pedals() {
            for &(param, value) in pedal.knobs {
                self.set_param(param, value);
            }
        }
    }

    pub fn enabled_set(&self) -> EnabledSet {
        EffectKind::CHAIN_ORDER
            .into_iter()
            .filter(|kind| self.pedals[kind.index()].enabled)
            .collect()
    }

    pub fn chain(&self) -> EffectChain {
        build_chain(self.enabled_set())
    }

    /// Every pedal's settings, in chain order.
    pub fn all_settings(&self) -> [EffectSettings; EffectKind::COUNT] {
        self.pedals.map(|pedal| pedal.settings)
    }

    pub fn snapshot(&self) -> EffectSettingsSnapshot {
        EffectSettingsSnapshot {
            pedals: self.pedals,
        }
    }
}

/// Serializable read-back of the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSettingsSnapshot {
    pub pedals: [PedalState; EffectKind::COUNT],
}

impl EffectSettingsSnapshot {
    pub fn get(&self, kind: EffectKind) -> &PedalState {
        &self.pedals[kind.index()]
    }

    pub fn is_enabled(&self, kind: EffectKind) -> bool {
        self.pedals[kind.index()].enabled
    }

    pub fn value(&self, param: EffectParam) -> Option<f32> {
        self.pedals[param.kind().index()].settings.get(param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{delay::DelayParam, distortion::DistortionParam, wah::WahParam};

    #[test]
    fn starts_all_bypassed_at_defaults() {
        let rack = EffectRack::new();
        assert!(rack.enabled_set().is_empty());
        for kind in EffectKind::CHAIN_ORDER {
            assert_eq!(*rack.settings(kind), EffectSettings::default_for(kind));
        }
    }

    #[test]
    fn toggle_reports_changes() {
        let mut rack = EffectRack::new();
        assert!(rack.set_enabled(EffectKind::Delay, true));
        assert!(!rack.set_enabled(EffectKind::Delay, true));
        assert_eq!(rack.chain().as_slice(), &[EffectKind::Delay]);
    }

    #[test]
    fn params_stick_on_disabled_pedals() {
        let mut rack = EffectRack::new();
        rack.set_param(EffectParam::Delay(DelayParam::Time), 420.0);
        let snapshot = rack.snapshot();
        assert!(!snapshot.is_enabled(EffectKind::Delay));
        assert_eq!(snapshot.value(EffectParam::Delay(DelayParam::Time)), Some(420.0));
    }

    #[test]
    fn clean_disables_everything() {
        let mut rack = EffectRack::new();
        rack.apply_preset(Preset::Lead);
        rack.apply_preset(Preset::Clean);
        let snapshot = rack.snapshot();
        for kind in EffectKind::CHAIN_ORDER {
            assert!(!snapshot.is_enabled(kind));
        }
    }

    #[test]
    fn preset_moves_listed_knobs_only() {
        let mut rack = EffectRack::new();
        rack.set_param(EffectParam::Delay(DelayParam::Time), 700.0);
        rack.apply_preset(Preset::Blues);

        let snapshot = rack.snapshot();
        assert!(snapshot.is_enabled(EffectKind::Distortion));
        assert!(snapshot.is_enabled(EffectKind::Compressor));
        assert!(snapshot.is_enabled(EffectKind::Eq));
        assert!(!snapshot.is_enabled(EffectKind::Delay));
        assert_eq!(
            snapshot.value(EffectParam::Distortion(DistortionParam::Gain)),
            Some(35.0)
        );
        // Untouched by the preset
        assert_eq!(snapshot.value(EffectParam::Delay(DelayParam::Time)), Some(700.0));
        assert_eq!(
            rack.chain().as_slice(),
            &[EffectKind::Compressor, EffectKind::Distortion, EffectKind::Eq]
        );
    }

    #[test]
    fn autowah_turns_sweep_on() {
        let mut rack = EffectRack::new();
        rack.apply_preset(Preset::Autowah);
        assert_eq!(
            rack.snapshot().value(EffectParam::Wah(WahParam::AutoSweep)),
            Some(1.0)
        );
    }

    #[test]
    fn snapshot_serializes() {
        let mut rack = EffectRack::new();
        rack.apply_preset(Preset::Funk);
        let json = serde_json::to_string(&rack.snapshot()).unwrap();
        let back: EffectSettingsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rack.snapshot());
    }
}
