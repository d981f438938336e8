use super::scale::{midi_to_freq, Scale};
use super::solo::Note;
use super::technique::Technique;
use rand::Rng;

/*
Licks
=====

A lick is a bounded random walk over the degrees of a scale. It starts on a
uniformly chosen degree, and every note is the result of one step:

    direction   up or down, 50/50
    size        2 degrees with probability 0.3, otherwise 1

The walk clamps at the ends of the scale instead of wrapping into the next
octave, so a lick that runs into the top or bottom of the scale repeats the
edge note until it turns around.

Each note also gets a random technique and a duration in [0.25, 0.75) s.
*/

pub const MIN_NOTE_DURATION: f32 = 0.25;
pub const NOTE_DURATION_SPREAD: f32 = 0.5;
const LEAP_PROBABILITY: f64 = 0.3;

/// Walk `length` steps over a scale with `degrees` entries.
///
/// Returns the scale index reached after each step.
pub fn walk_degrees<R: Rng + ?Sized>(rng: &mut R, degrees: usize, length: usize) -> Vec<usize> {
    if degrees == 0 {
        return Vec::new();
    }

    let top = degrees as isize - 1;
    let mut index = rng.gen_range(0..degrees) as isize;

    (0..length)
        .map(|_| {
            let direction = if rng.gen_bool(0.5) { 1 } else { -1 };
            let size = if rng.gen_bool(LEAP_PROBABILITY) { 2 } else { 1 };
            index = (index + direction * size).clamp(0, top);
            index as usize
        })
        .collect()
}

pub fn generate_lick<R: Rng + ?Sized>(rng: &mut R, scale: &Scale, length: usize) -> Vec<Note> {
    walk_degrees(rng, scale.len(), length)
        .into_iter()
        .map(|degree| {
            let pitch = scale.pitches()[degree];
            let technique = Technique::ALL[rng.gen_range(0..Technique::ALL.len())];
            let duration = MIN_NOTE_DURATION + rng.gen::<f32>() * NOTE_DURATION_SPREAD;
            Note::new(pitch, technique, duration)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::scale::{generate_scale, ScaleType};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_walk_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(0xB1E5);
        for degrees in 1..=6 {
            for length in 1..64 {
                let walk = walk_degrees(&mut rng, degrees, length);
                assert_eq!(walk.len(), length);
                assert!(walk.iter().all(|&i| i < degrees));
            }
        }
    }

    #[test]
    fn test_walk_steps_are_small() {
        let mut rng = StdRng::seed_from_u64(5);
        let walk = walk_degrees(&mut rng, 6, 500);
        for pair in walk.windows(2) {
            let step = pair[0].abs_diff(pair[1]);
            assert!(step <= 2, "step of {step} degrees");
        }
    }

    #[test]
    fn test_single_degree_scale_repeats() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(walk_degrees(&mut rng, 1, 4), vec![0, 0, 0, 0]);
        assert!(walk_degrees(&mut rng, 0, 4).is_empty());
    }

    #[test]
    fn test_lick_notes_come_from_scale() {
        let mut rng = StdRng::seed_from_u64(42);
        let scale = generate_scale(57, ScaleType::Minor).unwrap();
        let lick = generate_lick(&mut rng, &scale, 16);

        assert_eq!(lick.len(), 16);
        for note in &lick {
            assert!(scale.pitches().contains(&note.pitch));
            assert_eq!(note.frequency, midi_to_freq(f32::from(note.pitch)));
            assert!((MIN_NOTE_DURATION..MIN_NOTE_DURATION + NOTE_DURATION_SPREAD)
                .contains(&note.duration));
        }
    }
}
