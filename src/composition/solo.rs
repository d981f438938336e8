use super::progression::{ChordDegree, Progression};
use super::rhythm::RhythmStep;
use super::scale::{is_blue_note, midi_to_freq, midi_to_note_name, ScaleType};
use super::technique::Technique;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// MIDI note number
    #[serde(rename = "midi")]
    pub pitch: u8,
    /// Hz, derived from `pitch`
    pub frequency: f32,
    #[serde(rename = "noteName")]
    pub name: String,
    pub technique: Technique,
    /// Seconds
    pub duration: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rhythm: Option<RhythmStep>,
    /// Eighth-note offset within the phrase, in beats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beat_position: Option<f32>,
    /// 1-based
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase_number: Option<u32>,
}

impl Note {
    pub fn new(pitch: u8, technique: Technique, duration: f32) -> Self {
        Self {
            pitch,
            frequency: midi_to_freq(f32::from(pitch)),
            name: midi_to_note_name(pitch).to_string(),
            technique,
            duration,
            rhythm: None,
            beat_position: None,
            phrase_number: None,
        }
    }
}

/// What a phrase leans on, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueSummary {
    pub has_bends: bool,
    pub has_slides: bool,
    pub has_vibrato: bool,
    pub uses_blue_notes: bool,
    /// Distinct rhythm subdivisions the phrase lands on
    pub rhythmic_variety: usize,
}

impl TechniqueSummary {
    pub fn analyze(notes: &[Note], root: u8) -> Self {
        let has = |t: Technique| notes.iter().any(|n| n.technique == t);

        let mut subdivisions = 0u8;
        for step in notes.iter().filter_map(|n| n.rhythm) {
            subdivisions |= 1 << step.subdivision;
        }

        Self {
            has_bends: has(Technique::Bend),
            has_slides: has(Technique::Slide),
            has_vibrato: has(Technique::Vibrato),
            uses_blue_notes: notes.iter().any(|n| is_blue_note(root, n.pitch)),
            rhythmic_variety: subdivisions.count_ones() as usize,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    pub number: u32,
    pub notes: Vec<Note>,
    pub techniques: TechniqueSummary,
}

/// One bar of a progression solo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub chord: ChordDegree,
    pub beats: u32,
    pub notes: Vec<Note>,
    /// Root of the bar's chord, MIDI
    #[serde(rename = "chordTone")]
    pub chord_root: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoloMetadata {
    /// Pitch-class name of the key, e.g. "C"
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<ScaleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progression: Option<Progression>,
    /// Beats per minute
    pub tempo: f32,
    pub time_signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoloBody {
    Phrases(Vec<Phrase>),
    Sections(Vec<Section>),
}

/// A generated solo: free phrases over one scale, or one lick per bar of a
/// progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solo {
    pub metadata: SoloMetadata,
    #[serde(flatten)]
    pub body: SoloBody,
}

/// Techniques and colours used anywhere in a solo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueUsage {
    /// In [`Technique::ALL`] order
    pub techniques: Vec<Technique>,
    pub uses_blue_notes: bool,
}

impl Solo {
    pub fn phrases(&self) -> Option<&[Phrase]> {
        match &self.body {
            SoloBody::Phrases(phrases) => Some(phrases),
            SoloBody::Sections(_) => None,
        }
    }

    pub fn sections(&self) -> Option<&[Section]> {
        match &self.body {
            SoloBody::Sections(sections) => Some(sections),
            SoloBody::Phrases(_) => None,
        }
    }

    /// Every note in playing order.
    pub fn notes(&self) -> Box<dyn Iterator<Item = &Note> + '_> {
        match &self.body {
            SoloBody::Phrases(phrases) => Box::new(phrases.iter().flat_map(|p| p.notes.iter())),
            SoloBody::Sections(sections) => {
                Box::new(sections.iter().flat_map(|s| s.notes.iter()))
            }
        }
    }

    pub fn note_count(&self) -> usize {
        self.notes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.notes().next().is_none()
    }

    /// Sum of note durations, ignoring the gaps playback inserts.
    pub fn total_note_duration(&self) -> f32 {
        self.notes().map(|n| n.duration).sum()
    }

    /// Same solo at a different tempo. Only the playback gaps depend on it.
    pub fn with_tempo(mut self, tempo: f32) -> Self {
        self.metadata.tempo = tempo;
        self
    }

    pub fn technique_usage(&self) -> TechniqueUsage {
        let uses_blue_notes = match &self.body {
            SoloBody::Phrases(phrases) => phrases.iter().any(|p| p.techniques.uses_blue_notes),
            SoloBody::Sections(sections) => sections.iter().any(|s| {
                s.notes
                    .iter()
                    .any(|n| is_blue_note(s.chord_root, n.pitch))
            }),
        };

        TechniqueUsage {
            techniques: Technique::ALL
                .into_iter()
                .filter(|&t| self.notes().any(|n| n.technique == t))
                .collect(),
            uses_blue_notes,
        }
    }
}
