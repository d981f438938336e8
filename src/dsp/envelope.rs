use crate::{dsp::automation::Automation, MIN_TIME};
use serde::{Deserialize, Serialize};

/*
Programmed Note Envelope
========================

Every note the engine plays has a known duration before it starts sounding,
so the amplitude envelope is written out as an automation lane up front
instead of being driven by gate events.

Vocabulary
----------

  attack     Seconds for the level to rise linearly to 1.0.

  decay      Seconds for the level to fall exponentially from 1.0 to the
             sustain level.

  sustain    Level held between the end of the decay and the release.

  release    Seconds before the end of the note at which the level starts
             its exponential fall to the floor (0.001, roughly -60 dB).

  floor      Exponential curves never reach zero, so the release ends at
             RELEASE_FLOOR exactly at the note's duration.


The Shape
---------

  Level
    1.0 ┤   ╱╲
        │  ╱  ╲
    S   ┤ ╱    ╲━━━━━━━━━━━━━━━╲
        │╱                      ╲
  0.001 ┼────────────────────────╲━━→ t
        0  A   A+D         D-R   D

where D is the note duration and R the release time.


Short Notes
-----------

When the note is too short for the full shape, the release start is clamped
to no earlier than the end of the attack:

    release_start = clamp(D - R, A, D)

If the release starts before the decay finishes, the decay is cut short at
the level it reached by then and the release glides down from there. The
envelope therefore always peaks at 1.0 and always ends at the floor at D.
*/

/// Level the release glides to at the end of the note.
pub const RELEASE_FLOOR: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeShape {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.3,
            sustain: 0.7,
            release: 1.0,
        }
    }
}

/// Amplitude envelope for one note of known duration.
#[derive(Debug, Clone, Copy)]
pub struct Envelope {
    lane: Automation,
    duration: f32,
}

impl Envelope {
    /// Write out the envelope for a note of `duration` seconds.
    ///
    /// `initial_level` is where the attack starts (0.0 for a picked note).
    pub fn program(shape: &EnvelopeShape, duration: f32, initial_level: f32) -> Self {
        let attack = shape.attack.max(MIN_TIME);
        let decay = shape.decay.max(MIN_TIME);
        let sustain = shape.sustain.clamp(RELEASE_FLOOR, 1.0);
        let release = shape.release.max(0.0);
        let duration = duration.max(MIN_TIME);

        let peak_at = attack;
        let sustain_at = attack + decay;
        let release_start = (duration - release).max(peak_at).min(duration);

        let mut lane = Automation::new(initial_level);
        lane.set_value_at(initial_level, 0.0)
            .linear_ramp_to(1.0, peak_at);

        if release_start >= sustain_at {
            lane.exponential_ramp_to(sustain, sustain_at)
                .set_value_at(sustain, release_start);
        } else {
            let progress = (release_start - peak_at) / decay;
            let level = sustain.powf(progress);
            lane.exponential_ramp_to(level, release_start);
        }

        let end = duration.max(release_start + MIN_TIME);
        lane.exponential_ramp_to(RELEASE_FLOOR, end);

        Self {
            lane,
            duration: end,
        }
    }

    #[inline]
    pub fn level_at(&self, time: f32) -> f32 {
        if time < 0.0 {
            return 0.0;
        }
        if time >= self.duration {
            return RELEASE_FLOOR;
        }
        self.lane.value_at(time)
    }

    /// Time at which the envelope reaches the floor.
    pub fn duration(&self) -> f32 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape() -> EnvelopeShape {
        EnvelopeShape::default()
    }

    #[test]
    fn starts_silent_and_peaks_after_attack() {
        let env = Envelope::program(&shape(), 2.0, 0.0);

        assert_eq!(env.level_at(0.0), 0.0);
        assert!((env.level_at(0.005) - 0.5).abs() < 1e-3);
        assert!((env.level_at(0.01) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn holds_sustain_on_long_notes() {
        let env = Envelope::program(&shape(), 3.0, 0.0);

        assert!((env.level_at(0.31) - 0.7).abs() < 1e-4);
        assert!((env.level_at(1.0) - 0.7).abs() < 1e-4);
        assert!((env.level_at(1.99) - 0.7).abs() < 1e-4);
    }

    #[test]
    fn releases_to_floor_at_duration() {
        let env = Envelope::program(&shape(), 2.0, 0.0);

        let mid_release = env.level_at(1.75);
        assert!(mid_release < 0.7 && mid_release > RELEASE_FLOOR);
        assert!((env.level_at(1.9999) - RELEASE_FLOOR).abs() < 1e-3);
        assert_eq!(env.level_at(2.5), RELEASE_FLOOR);
    }

    #[test]
    fn short_note_never_rises_after_peak() {
        // Release would start before the attack ends
        let env = Envelope::program(&shape(), 0.25, 0.0);

        assert!((env.level_at(0.01) - 1.0).abs() < 1e-4);
        let mut previous = env.level_at(0.01);
        let mut t = 0.011;
        while t < 0.25 {
            let level = env.level_at(t);
            assert!(level <= previous + 1e-6, "rose at {t}");
            previous = level;
            t += 0.001;
        }
    }

    #[test]
    fn pull_off_starts_half_way_up() {
        let env = Envelope::program(&shape(), 1.0, 0.5);

        assert_eq!(env.level_at(0.0), 0.5);
        assert!(env.level_at(0.005) > 0.5);
    }

    #[test]
    fn negative_time_is_silent() {
        let env = Envelope::program(&shape(), 1.0, 0.0);
        assert_eq!(env.level_at(-0.1), 0.0);
    }
}
