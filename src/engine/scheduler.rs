use crate::composition::{Note, Solo, Technique};
use crate::error::PreconditionError;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/*
Playback Scheduling
===================

A solo is laid out on a running time cursor. Each note starts at the cursor
and pushes it forward by its own duration, so notes within a phrase follow
each other back to back. Between groups the cursor also skips a rest that
depends on the tempo:

    beat   = 60 / tempo · speed
    phrase rest    0.5 · beat
    section rest   0.1 · beats · beat

Speed scales only these rests. The final cursor is the solo's total length.

The render thread keeps scheduled notes in a min-heap keyed on start frame.
Each block it pops every note that starts before the block ends and turns
it into a voice; the voice itself handles the sub-block offset. Equal start
frames come out in the order they were pushed.
*/

/// Phrase rest, in beats.
pub const PHRASE_GAP_BEATS: f32 = 0.5;
/// Section rest, as a share of the section's beat count.
pub const SECTION_GAP_SHARE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Multiplies the rests between phrases and sections
    pub speed: f32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

/// One note placed on the playback timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledNote {
    /// Seconds from the start of playback
    pub start: f32,
    pub pitch: u8,
    pub frequency: f32,
    pub duration: f32,
    pub technique: Technique,
}

impl ScheduledNote {
    fn at(start: f32, note: &Note) -> Self {
        Self {
            start,
            pitch: note.pitch,
            frequency: note.frequency,
            duration: note.duration,
            technique: note.technique,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub notes: Vec<ScheduledNote>,
    /// Cursor after the last rest, seconds
    pub total_duration: f32,
}

pub fn beat_duration(tempo: f32, speed: f32) -> f32 {
    60.0 / tempo * speed
}

/// Lay out the phrases of a free solo.
pub fn schedule_solo(solo: &Solo, options: &PlaybackOptions) -> Result<Schedule, PreconditionError> {
    let phrases = solo.phrases().ok_or(PreconditionError::MissingPhrases)?;
    let beat = beat_duration(solo.metadata.tempo, options.speed);

    layout(
        phrases
            .iter()
            .map(|phrase| (phrase.notes.as_slice(), PHRASE_GAP_BEATS * beat)),
    )
}

/// Lay out the sections of a progression solo.
pub fn schedule_progression(
    solo: &Solo,
    options: &PlaybackOptions,
) -> Result<Schedule, PreconditionError> {
    let sections = solo.sections().ok_or(PreconditionError::MissingSections)?;
    let beat = beat_duration(solo.metadata.tempo, options.speed);

    layout(sections.iter().map(|section| {
        let rest = SECTION_GAP_SHARE * section.beats as f32 * beat;
        (section.notes.as_slice(), rest)
    }))
}

fn layout<'a>(
    groups: impl Iterator<Item = (&'a [Note], f32)>,
) -> Result<Schedule, PreconditionError> {
    let mut schedule = Schedule::default();
    let mut cursor = 0.0;

    for (notes, rest) in groups {
        for note in notes {
            schedule.notes.push(ScheduledNote::at(cursor, note));
            cursor += note.duration;
        }
        cursor += rest;
    }

    if schedule.notes.is_empty() {
        return Err(PreconditionError::EmptySolo);
    }
    schedule.total_duration = cursor;
    Ok(schedule)
}

struct Timed<T> {
    frame: u64,
    seq: u64,
    event: T,
}

impl<T> Timed<T> {
    fn key(&self) -> (u64, u64) {
        (self.frame, self.seq)
    }
}

impl<T> PartialEq for Timed<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Timed<T> {}

impl<T> PartialOrd for Timed<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Timed<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-heap of events keyed on start frame, ties broken by push order.
pub struct EventQueue<T> {
    heap: BinaryHeap<Reverse<Timed<T>>>,
    next_seq: u64,
}

impl<T> EventQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, frame: u64, event: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Timed { frame, seq, event }));
    }

    /// Start frame of the earliest event.
    pub fn peek_frame(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(timed)| timed.frame)
    }

    /// Pop the earliest event if it starts before `frame`.
    pub fn pop_before(&mut self, frame: u64) -> Option<(u64, T)> {
        if self.peek_frame()? >= frame {
            return None;
        }
        self.heap
            .pop()
            .map(|Reverse(timed)| (timed.frame, timed.event))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending event. Keeps the allocation.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
