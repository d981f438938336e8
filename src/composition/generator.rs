use super::lick::generate_lick;
use super::progression::Progression;
use super::rhythm::{generate_rhythm, RhythmStep};
use super::scale::{generate_scale, midi_to_note_name, Scale, ScaleType};
use super::solo::{Note, Phrase, Section, Solo, SoloBody, SoloMetadata, TechniqueSummary};
use crate::error::ConfigurationError;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highest key whose transposed scales (up to V, +7) stay inside MIDI range.
pub const MAX_KEY: u8 = 110;

/// Progression solos are always laid out at this tempo; override with
/// [`Solo::with_tempo`].
pub const PROGRESSION_TEMPO: f32 = 120.0;

pub const TIME_SIGNATURE: &str = "4/4";

/// Eighth notes: each phrase note sits half a beat after the previous one.
const BEATS_PER_STEP: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoloOptions {
    /// Root, MIDI
    pub key: u8,
    pub scale_type: ScaleType,
    pub num_phrases: usize,
    /// Notes per phrase
    pub phrase_length: usize,
    /// Beats per minute
    pub tempo: f32,
}

impl Default for SoloOptions {
    fn default() -> Self {
        Self {
            key: 60,
            scale_type: ScaleType::Blues,
            num_phrases: 4,
            phrase_length: 8,
            tempo: 120.0,
        }
    }
}

impl SoloOptions {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.tempo.is_finite() && self.tempo > 0.0) {
            return Err(ConfigurationError::InvalidOptions("tempo must be positive"));
        }
        phrase_count(self.num_phrases)?;
        validate_key(self.key)
    }
}

/// Phrases are numbered from 1 in a `u32`.
fn phrase_count(num_phrases: usize) -> Result<u32, ConfigurationError> {
    u32::try_from(num_phrases)
        .map_err(|_| ConfigurationError::InvalidOptions("num_phrases does not fit in u32"))
}

fn validate_key(key: u8) -> Result<(), ConfigurationError> {
    if key > MAX_KEY {
        return Err(ConfigurationError::KeyOutOfRange(key));
    }
    Ok(())
}

/// Generates solos from a random source.
///
/// Seed it with [`SoloGenerator::with_seed`] for reproducible output.
pub struct SoloGenerator<R = StdRng> {
    rng: R,
}

impl SoloGenerator<StdRng> {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for SoloGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SoloGenerator<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate_lick(&mut self, scale: &Scale, length: usize) -> Vec<Note> {
        generate_lick(&mut self.rng, scale, length)
    }

    pub fn generate_rhythm(&mut self, length: usize) -> Vec<RhythmStep> {
        generate_rhythm(&mut self.rng, length)
    }

    /// Free soloing over one scale.
    pub fn generate_solo(&mut self, options: &SoloOptions) -> Result<Solo, ConfigurationError> {
        options.validate()?;
        let scale = generate_scale(options.key, options.scale_type)?;
        let count = phrase_count(options.num_phrases)?;

        let phrases = (1..=count)
            .map(|number| {
                let lick = self.generate_lick(&scale, options.phrase_length);
                let rhythm = self.generate_rhythm(options.phrase_length);

                let notes: Vec<Note> = lick
                    .into_iter()
                    .zip(rhythm)
                    .enumerate()
                    .map(|(i, (note, step))| Note {
                        rhythm: Some(step),
                        beat_position: Some(i as f32 * BEATS_PER_STEP),
                        phrase_number: Some(number),
                        ..note
                    })
                    .collect();

                Phrase {
                    number,
                    techniques: TechniqueSummary::analyze(&notes, scale.root()),
                    notes,
                }
            })
            .collect();

        debug!(
            key = options.key,
            scale = %options.scale_type,
            phrases = options.num_phrases,
            "generated solo"
        );

        Ok(Solo {
            metadata: SoloMetadata {
                key: midi_to_note_name(options.key).to_string(),
                scale_type: Some(options.scale_type),
                progression: None,
                tempo: options.tempo,
                time_signature: TIME_SIGNATURE.to_string(),
            },
            body: SoloBody::Phrases(phrases),
        })
    }

    /// One blues lick per bar, each over the blues scale of the bar's chord.
    pub fn generate_solo_over_progression(
        &mut self,
        progression: Progression,
        key: u8,
    ) -> Result<Solo, ConfigurationError> {
        validate_key(key)?;

        let sections = progression
            .bars()
            .iter()
            .map(|bar| {
                let chord_root = key + bar.chord.offset();
                let scale = generate_scale(chord_root, ScaleType::Blues)?;
                Ok(Section {
                    chord: bar.chord,
                    beats: bar.beats,
                    notes: self.generate_lick(&scale, bar.beats as usize * 2),
                    chord_root,
                })
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;

        debug!(key, %progression, bars = sections.len(), "generated progression solo");

        Ok(Solo {
            metadata: SoloMetadata {
                key: midi_to_note_name(key).to_string(),
                scale_type: None,
                progression: Some(progression),
                tempo: PROGRESSION_TEMPO,
                time_signature: TIME_SIGNATURE.to_string(),
            },
            body: SoloBody::Sections(sections),
        })
    }
}
