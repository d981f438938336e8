use super::master::MasterBus;
use super::scheduler::{EventQueue, ScheduledNote};
use crate::effects::{build_chain, EffectChain, EffectKind, EffectModule, EffectParam, EffectSettings, EnabledSet};
use crate::graph::{GraphNode, RenderCtx};
use crate::synth::{SynthParams, Voice};
use crate::MAX_BLOCK_SIZE;
use rtrb::Consumer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/*
Note Feed
=========

A solo arrives as one `Play` command carrying the whole timeline, so its
length is not bounded by the command ring. The renderer walks it with a
cursor and only moves notes into the event heap once they start within the
block being rendered:

    playlist [n0 n1 n2 n3 n4 ...]      shared, read-only
                    ^ cursor
    heap     {n1 n2}                   due this block

The control side keeps its own handle on every timeline it sends and frees
it only after the renderer has let go, so the audio thread never
deallocates one.
*/

/// Control writes, applied by the renderer at the next block boundary.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    SetParam(EffectParam, f32),
    SetEnabled(EffectKind, bool),
    /// Whole-board update (presets): one chain rebuild for all eight pedals
    ApplyPatch {
        enabled: EnabledSet,
        settings: [EffectSettings; EffectKind::COUNT],
    },
    SetMasterVolume(f32),
    SetSynthParams(SynthParams),
    /// Play a timeline sorted by start, measured from absolute frame
    /// `origin`. Replaces any timeline still being fed.
    Play {
        origin: u64,
        notes: Arc<[ScheduledNote]>,
    },
    /// Drop every note that has not started yet
    Stop,
}

/// Owns all DSP state. Runs on the audio thread, or is driven directly in
/// offline mode.
pub struct Renderer {
    ctx: RenderCtx,
    commands: Consumer<EngineCommand>,
    board: [EffectModule; EffectKind::COUNT],
    enabled: EnabledSet,
    chain: EffectChain,
    master: MasterBus,
    synth: SynthParams,
    playlist: Option<Playlist>,
    pending: EventQueue<ScheduledNote>,
    voices: Vec<Voice>,
    max_voices: usize,
    dry: Vec<f32>,
    mono: Vec<f32>,
    frame: u64,
    clock: Arc<AtomicU64>,
}

struct Playlist {
    origin: u64,
    notes: Arc<[ScheduledNote]>,
    cursor: usize,
}

impl Playlist {
    fn remaining(&self) -> usize {
        self.notes.len() - self.cursor
    }
}

/// Everything needed to build a renderer.
pub(crate) struct RendererParts {
    pub sample_rate: f32,
    pub commands: Consumer<EngineCommand>,
    pub enabled: EnabledSet,
    pub settings: [EffectSettings; EffectKind::COUNT],
    pub master: MasterBus,
    pub synth: SynthParams,
    pub max_voices: usize,
    pub queue_capacity: usize,
    pub clock: Arc<AtomicU64>,
}

impl Renderer {
    pub(crate) fn new(parts: RendererParts) -> Self {
        let mut board = EffectModule::board(parts.sample_rate);
        for (module, settings) in board.iter_mut().zip(&parts.settings) {
            module.configure(settings);
        }

        Self {
            ctx: RenderCtx::new(parts.sample_rate),
            commands: parts.commands,
            board,
            enabled: parts.enabled,
            chain: build_chain(parts.enabled),
            master: parts.master,
            synth: parts.synth,
            playlist: None,
            pending: EventQueue::with_capacity(parts.queue_capacity),
            voices: Vec::with_capacity(parts.max_voices),
            max_voices: parts.max_voices,
            dry: vec![0.0; MAX_BLOCK_SIZE],
            mono: vec![0.0; MAX_BLOCK_SIZE],
            frame: 0,
            clock: parts.clock,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate
    }

    /// Frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Notes scheduled but not yet started.
    pub fn pending_notes(&self) -> usize {
        self.pending.len() + self.playlist.as_ref().map_or(0, Playlist::remaining)
    }

    pub fn chain(&self) -> &EffectChain {
        &self.chain
    }

    /// Render mono output of any length.
    pub fn render(&mut self, out: &mut [f32]) {
        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(block);
        }
    }

    /// Render into an interleaved buffer, copying the mono signal to every
    /// channel.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for frames in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
            let len = frames.len() / channels;
            let mut mono = std::mem::take(&mut self.mono);
            self.render_block(&mut mono[..len]);
            for (frame, &sample) in frames.chunks_mut(channels).zip(&mono[..len]) {
                frame.fill(sample);
            }
            self.mono = mono;
        }
    }

    fn render_block(&mut self, out: &mut [f32]) {
        self.drain_commands();

        let len = out.len();
        let block_start = self.frame;
        let block_end = block_start + len as u64;

        self.feed(block_end);
        while let Some((frame, note)) = self.pending.pop_before(block_end) {
            if self.voices.len() < self.max_voices {
                self.voices.push(Voice::new(
                    note.frequency,
                    note.duration,
                    note.technique,
                    &self.synth,
                    self.ctx.sample_rate,
                    frame,
                ));
            }
        }

        let dry = &mut self.dry[..len];
        dry.fill(0.0);
        for voice in &mut self.voices {
            voice.render_add(dry, block_start);
        }
        self.voices.retain(|voice| !voice.is_finished());

        out.copy_from_slice(dry);
        self.chain.route(&mut self.board, out, &self.ctx);
        self.master.process(dry, out, &self.ctx);

        self.frame = block_end;
        self.clock.store(block_end, Ordering::Release);
    }

    /// Move every playlist note that starts before `block_end` onto the heap.
    fn feed(&mut self, block_end: u64) {
        let Some(playlist) = self.playlist.as_mut() else {
            return;
        };

        let sample_rate = self.ctx.sample_rate;
        while let Some(note) = playlist.notes.get(playlist.cursor) {
            let frame = playlist.origin + (note.start * sample_rate).round() as u64;
            if frame >= block_end {
                return;
            }
            self.pending.push(frame, *note);
            playlist.cursor += 1;
        }
        self.playlist = None;
    }

    fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.pop() {
            match command {
                EngineCommand::SetParam(param, value) => {
                    self.board[param.kind().index()].set_param(param, value);
                }
                EngineCommand::SetEnabled(kind, enabled) => {
                    let was_enabled = self.enabled.contains(kind);
                    self.enabled.set(kind, enabled);
                    if enabled && !was_enabled {
                        // Don't replay stale delay lines from before the bypass
                        self.board[kind.index()].reset();
                    }
                    self.chain = build_chain(self.enabled);
                }
                EngineCommand::ApplyPatch { enabled, settings } => {
                    for (module, settings) in self.board.iter_mut().zip(&settings) {
                        module.configure(settings);
                    }
                    self.enabled = enabled;
                    self.chain = build_chain(enabled);
                }
                EngineCommand::SetMasterVolume(volume) => self.master.set_volume(volume),
                EngineCommand::SetSynthParams(params) => self.synth = params,
                EngineCommand::Play { origin, notes } => {
                    self.playlist = Some(Playlist {
                        origin,
                        notes,
                        cursor: 0,
                    });
                }
                EngineCommand::Stop => {
                    self.playlist = None;
                    self.pending.clear();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Technique;
    use crate::graph::reverb::ReverbNode;
    use rtrb::{Producer, RingBuffer};

    const SR: f32 = 48000.0;

    fn renderer() -> (Renderer, Producer<EngineCommand>, Arc<AtomicU64>) {
        let (producer, consumer) = RingBuffer::new(64);
        let clock = Arc::new(AtomicU64::new(0));
        let renderer = Renderer::new(RendererParts {
            sample_rate: SR,
            commands: consumer,
            enabled: EnabledSet::NONE,
            settings: EffectKind::CHAIN_ORDER.map(EffectSettings::default_for),
            master: MasterBus::new(ReverbNode::new(&[1.0]), 0.2, 0.3, 1.0),
            synth: SynthParams::default(),
            max_voices: 4,
            queue_capacity: 64,
            clock: clock.clone(),
        });
        (renderer, producer, clock)
    }

    fn scheduled(start: f32) -> ScheduledNote {
        ScheduledNote {
            start,
            pitch: 57,
            frequency: 220.0,
            duration: 0.2,
            technique: Technique::Normal,
        }
    }

    fn play(origin: u64, starts: &[f32]) -> EngineCommand {
        EngineCommand::Play {
            origin,
            notes: starts.iter().map(|&start| scheduled(start)).collect(),
        }
    }

    #[test]
    fn test_silent_without_notes() {
        let (mut renderer, _tx, clock) = renderer();
        let mut out = vec![1.0; 5000];
        renderer.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(clock.load(Ordering::Acquire), 5000);
    }

    #[test]
    fn test_scheduled_note_sounds_at_its_frame() {
        let (mut renderer, mut tx, _clock) = renderer();
        tx.push(play(1000, &[0.0])).unwrap();

        let mut out = vec![0.0; 4096];
        renderer.render(&mut out);

        assert!(out[..1000].iter().all(|&s| s == 0.0));
        assert!(out[1000..].iter().any(|&s| s.abs() > 1e-3));
        assert_eq!(renderer.active_voices(), 1);

        // 0.2 s note + 0.1 s tail
        let mut rest = vec![0.0; (0.3 * SR) as usize];
        renderer.render(&mut rest);
        assert_eq!(renderer.active_voices(), 0);
    }

    #[test]
    fn test_voice_limit_drops_extra_notes() {
        let (mut renderer, mut tx, _clock) = renderer();
        tx.push(play(0, &[0.0; 6])).unwrap();
        let mut out = vec![0.0; 256];
        renderer.render(&mut out);
        assert_eq!(renderer.active_voices(), 4);
        assert_eq!(renderer.pending_notes(), 0);
    }

    #[test]
    fn test_stop_drops_pending_notes_only() {
        let (mut renderer, mut tx, _clock) = renderer();
        tx.push(play(0, &[0.0, 1.0])).unwrap();

        let mut out = vec![0.0; 512];
        renderer.render(&mut out);
        assert_eq!(renderer.pending_notes(), 1);

        tx.push(EngineCommand::Stop).unwrap();
        renderer.render(&mut out);
        assert_eq!(renderer.pending_notes(), 0);
        assert_eq!(renderer.active_voices(), 1);
    }

    #[test]
    fn test_toggles_rebuild_chain() {
        let (mut renderer, mut tx, _clock) = renderer();
        tx.push(EngineCommand::SetEnabled(EffectKind::Delay, true)).unwrap();
        tx.push(EngineCommand::SetEnabled(EffectKind::Distortion, true)).unwrap();

        let mut out = vec![0.0; 64];
        renderer.render(&mut out);
        assert_eq!(
            renderer.chain().as_slice(),
            &[EffectKind::Distortion, EffectKind::Delay]
        );

        tx.push(EngineCommand::ApplyPatch {
            enabled: EnabledSet::NONE,
            settings: EffectKind::CHAIN_ORDER.map(EffectSettings::default_for),
        })
        .unwrap();
        renderer.render(&mut out);
        assert!(renderer.chain().is_empty());
    }

    #[test]
    fn test_interleaved_copies_to_every_channel() {
        let (mut renderer, mut tx, _clock) = renderer();
        tx.push(play(0, &[0.0])).unwrap();

        let mut data = vec![0.0; 2 * 3000];
        renderer.render_interleaved(&mut data, 2);
        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(data.iter().any(|&s| s != 0.0));
        assert_eq!(renderer.frame(), 3000);
    }

    #[test]
    fn test_timeline_longer_than_the_ring() {
        let (mut renderer, mut tx, _clock) = renderer();
        // Far more notes than the 64-slot ring, a tenth of a second apart
        let starts: Vec<f32> = (0..500).map(|i| i as f32 * 0.1).collect();
        tx.push(play(0, &starts)).unwrap();

        let mut out = vec![0.0; 512];
        renderer.render(&mut out);
        assert_eq!(renderer.pending_notes(), 499);

        let mut rest = vec![0.0; (50.5 * SR) as usize];
        renderer.render(&mut rest);
        assert_eq!(renderer.pending_notes(), 0);
        assert_eq!(renderer.active_voices(), 0);
    }

    #[test]
    fn test_timeline_is_released_when_played_out() {
        let (mut renderer, mut tx, _clock) = renderer();
        let notes: Arc<[ScheduledNote]> = vec![scheduled(0.0), scheduled(0.01)].into();
        tx.push(EngineCommand::Play {
            origin: 0,
            notes: notes.clone(),
        })
        .unwrap();

        let mut out = vec![0.0; 256];
        renderer.render(&mut out);
        assert_eq!(Arc::strong_count(&notes), 2);

        renderer.render(&mut out);
        renderer.render(&mut out);
        assert_eq!(Arc::strong_count(&notes), 1);
    }
}
