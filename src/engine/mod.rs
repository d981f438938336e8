//! The audio session.
//!
//! [`AudioEngine`] is the control side: it owns a mirror of every pedal and
//! voice setting, turns solos into timed notes, and sends every write to the
//! render side as an [`EngineCommand`] over a lock-free ring. The
//! [`Renderer`] owns all DSP state and runs either inside the device
//! callback or, in offline mode, wherever the caller drives it.

pub mod config;
pub mod master;
#[cfg(feature = "device")]
pub mod output;
pub mod renderer;
pub mod scheduler;

pub use config::EngineConfig;
pub use renderer::{EngineCommand, Renderer};
pub use scheduler::{PlaybackOptions, Schedule, ScheduledNote};

use self::master::MasterBus;
use self::renderer::RendererParts;
use self::scheduler::{schedule_progression, schedule_solo};
use crate::composition::{Solo, SoloBody};
use crate::effects::{EffectKind, EffectParam, EffectRack, EffectSettingsSnapshot, Preset};
use crate::error::{EngineError, PreconditionError};
use crate::graph::reverb::ReverbNode;
use crate::synth::SynthParams;
use rand::{rngs::StdRng, SeedableRng};
use rtrb::{Producer, RingBuffer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Control-side handle to a running renderer.
struct Session {
    commands: Producer<EngineCommand>,
    clock: Arc<AtomicU64>,
    sample_rate: f32,
    /// Timelines handed to the renderer, freed here once it drops them
    timelines: Vec<Arc<[ScheduledNote]>>,
    #[cfg(feature = "device")]
    _output: Option<output::OutputStream>,
}

impl Session {
    fn now(&self) -> u64 {
        self.clock.load(Ordering::Acquire)
    }

    fn collect_timelines(&mut self) {
        self.timelines
            .retain(|timeline| Arc::strong_count(timeline) > 1);
    }
}

pub struct AudioEngine {
    config: EngineConfig,
    rack: EffectRack,
    synth: SynthParams,
    master_volume: f32,
    session: Option<Session>,
    /// Frame at which the current solo has fully played out
    playing_until: Option<u64>,
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl AudioEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            master_volume: config.master_volume.clamp(0.0, 1.0),
            config,
            rack: EffectRack::new(),
            synth: SynthParams::default(),
            session: None,
            playing_until: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Sample rate of the running session.
    pub fn sample_rate(&self) -> Option<f32> {
        self.session.as_ref().map(|session| session.sample_rate)
    }

    /// Open the default output device and start rendering.
    ///
    /// Does nothing if the engine is already running. On failure the engine
    /// stays uninitialized.
    #[cfg(feature = "device")]
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if self.session.is_some() {
            debug!("audio engine already initialized");
            return Ok(());
        }

        let device = output::OutputDevice::open_default()?;
        let (renderer, mut session) = self.build(device.sample_rate());
        session._output = Some(device.start(renderer)?);

        info!(sample_rate = session.sample_rate, "audio engine initialized");
        self.session = Some(session);
        Ok(())
    }

    #[cfg(not(feature = "device"))]
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        Err(EngineError::AudioDevice(
            "built without the `device` feature; use initialize_offline".into(),
        ))
    }

    /// Build a renderer with no device attached and hand it to the caller,
    /// who drives it with [`Renderer::render`].
    pub fn initialize_offline(&mut self, sample_rate: f32) -> Result<Renderer, EngineError> {
        if self.session.is_some() {
            return Err(PreconditionError::AlreadyInitialized.into());
        }

        let (renderer, session) = self.build(sample_rate);
        info!(sample_rate, "audio engine initialized offline");
        self.session = Some(session);
        Ok(renderer)
    }

    /// Build a renderer from the current mirror, so anything set before
    /// initialization is in effect from the first block.
    fn build(&self, sample_rate: f32) -> (Renderer, Session) {
        let (producer, consumer) = RingBuffer::new(self.config.command_queue.max(1));
        let clock = Arc::new(AtomicU64::new(0));

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let reverb = ReverbNode::synthesized(
            &mut rng,
            sample_rate,
            self.config.reverb_seconds,
            self.config.reverb_decay,
        );
        let master = MasterBus::new(
            reverb,
            self.config.reverb_send,
            self.config.reverb_return,
            self.master_volume,
        );

        let renderer = Renderer::new(RendererParts {
            sample_rate,
            commands: consumer,
            enabled: self.rack.enabled_set(),
            settings: self.rack.all_settings(),
            master,
            synth: self.synth,
            max_voices: self.config.max_voices,
            queue_capacity: self.config.command_queue,
            clock: clock.clone(),
        });

        let session = Session {
            commands: producer,
            clock,
            sample_rate,
            timelines: Vec::new(),
            #[cfg(feature = "device")]
            _output: None,
        };

        (renderer, session)
    }

    /// Play a free solo. Returns its total length in seconds.
    pub fn play_solo(&mut self, solo: &Solo) -> Result<f32, EngineError> {
        self.play_solo_with(solo, &PlaybackOptions::default())
    }

    pub fn play_solo_with(
        &mut self,
        solo: &Solo,
        options: &PlaybackOptions,
    ) -> Result<f32, EngineError> {
        self.ensure_ready()?;
        let schedule = schedule_solo(solo, options)?;
        self.submit(&schedule)
    }

    /// Play a progression solo. Returns its total length in seconds.
    pub fn play_progression(&mut self, solo: &Solo) -> Result<f32, EngineError> {
        self.play_progression_with(solo, &PlaybackOptions::default())
    }

    pub fn play_progression_with(
        &mut self,
        solo: &Solo,
        options: &PlaybackOptions,
    ) -> Result<f32, EngineError> {
        self.ensure_ready()?;
        let schedule = schedule_progression(solo, options)?;
        self.submit(&schedule)
    }

    /// Play either kind of solo.
    pub fn play(&mut self, solo: &Solo) -> Result<f32, EngineError> {
        self.play_with(solo, &PlaybackOptions::default())
    }

    pub fn play_with(&mut self, solo: &Solo, options: &PlaybackOptions) -> Result<f32, EngineError> {
        match solo.body {
            SoloBody::Phrases(_) => self.play_solo_with(solo, options),
            SoloBody::Sections(_) => self.play_progression_with(solo, options),
        }
    }

    fn ensure_ready(&self) -> Result<(), PreconditionError> {
        if self.session.is_none() {
            return Err(PreconditionError::NotInitialized);
        }
        if self.is_playing() {
            return Err(PreconditionError::AlreadyPlaying);
        }
        Ok(())
    }

    fn submit(&mut self, schedule: &Schedule) -> Result<f32, EngineError> {
        let session = self
            .session
            .as_mut()
            .ok_or(PreconditionError::NotInitialized)?;

        session.collect_timelines();

        let notes: Arc<[ScheduledNote]> = schedule.notes.as_slice().into();
        let origin = session.now();
        session
            .commands
            .push(EngineCommand::Play {
                origin,
                notes: notes.clone(),
            })
            .map_err(|_| EngineError::QueueFull)?;
        session.timelines.push(notes);

        let end = origin + (schedule.total_duration * session.sample_rate).ceil() as u64;
        self.playing_until = Some(end);

        debug!(
            notes = schedule.notes.len(),
            seconds = schedule.total_duration,
            "scheduled solo"
        );
        Ok(schedule.total_duration)
    }

    /// Stop scheduling further notes. Notes already sounding ring out.
    pub fn stop(&mut self) {
        self.playing_until = None;
        if let Some(session) = self.session.as_mut() {
            if session.commands.push(EngineCommand::Stop).is_err() {
                warn!("command queue full, stop request dropped");
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        match (&self.session, self.playing_until) {
            (Some(session), Some(end)) => session.now() < end,
            _ => false,
        }
    }

    /// Move a knob by pedal and parameter name. Unknown pedal or parameter
    /// names are ignored.
    pub fn update_effect(&mut self, effect: &str, param: &str, value: f32) -> Result<(), EngineError> {
        let Ok(kind) = effect.parse::<EffectKind>() else {
            debug!(effect, param, "ignoring update for unknown effect");
            return Ok(());
        };
        match kind.param(param) {
            Some(param) => self.set_effect_param(param, value),
            None => {
                debug!(%kind, param, "ignoring unknown effect parameter");
                Ok(())
            }
        }
    }

    pub fn set_effect_param(&mut self, param: EffectParam, value: f32) -> Result<(), EngineError> {
        self.rack.set_param(param, value);
        if !self.rack.pedal(param.kind()).enabled {
            debug!(
                kind = %param.kind(),
                param = param.name(),
                value,
                "stored setting for bypassed pedal"
            );
        }
        self.send(EngineCommand::SetParam(param, value))
    }

    /// Switch a pedal by name. Unknown names are ignored.
    pub fn toggle_effect(&mut self, effect: &str, enabled: bool) -> Result<(), EngineError> {
        let Ok(kind) = effect.parse::<EffectKind>() else {
            debug!(effect, enabled, "ignoring toggle for unknown effect");
            return Ok(());
        };
        self.set_effect_enabled(kind, enabled)
    }

    pub fn set_effect_enabled(&mut self, kind: EffectKind, enabled: bool) -> Result<(), EngineError> {
        if !self.rack.set_enabled(kind, enabled) {
            return Ok(());
        }
        let chain = self.rack.chain();
        debug!(%kind, enabled, chain = ?chain.as_slice(), "effect chain rebuilt");
        self.send(EngineCommand::SetEnabled(kind, enabled))
    }

    /// Apply a named preset.
    pub fn apply_effect_preset(&mut self, name: &str) -> Result<(), EngineError> {
        let preset: Preset = name.parse()?;
        self.apply_preset(preset)
    }

    pub fn apply_preset(&mut self, preset: Preset) -> Result<(), EngineError> {
        self.rack.apply_preset(preset);
        let chain = self.rack.chain();
        info!(%preset, chain = ?chain.as_slice(), "applied effect preset");
        self.send(EngineCommand::ApplyPatch {
            enabled: self.rack.enabled_set(),
            settings: self.rack.all_settings(),
        })
    }

    /// Set the master gain, clamped to 0-1.
    pub fn set_master_volume(&mut self, volume: f32) -> Result<(), EngineError> {
        self.master_volume = volume.clamp(0.0, 1.0);
        self.send(EngineCommand::SetMasterVolume(self.master_volume))
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Replace the voice settings. Applies to notes that start afterwards.
    pub fn update_synth_params(&mut self, params: SynthParams) -> Result<(), EngineError> {
        self.synth = params;
        self.send(EngineCommand::SetSynthParams(params))
    }

    pub fn synth_params(&self) -> &SynthParams {
        &self.synth
    }

    pub fn get_effect_settings(&self) -> EffectSettingsSnapshot {
        self.rack.snapshot()
    }

    /// Tear down the session. Safe to call any number of times.
    pub fn dispose(&mut self) {
        self.playing_until = None;
        if self.session.take().is_some() {
            info!("audio engine disposed");
        }
    }

    fn send(&mut self, command: EngineCommand) -> Result<(), EngineError> {
        // Before initialize the mirror is all there is; the renderer is
        // built from it
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        session
            .commands
            .push(command)
            .map_err(|_| EngineError::QueueFull)
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}
