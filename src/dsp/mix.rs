//! Signal mixing primitives for the pedal mixes and the master bus.

/*
Signal Mixing
=============

Mixing combines signals by ADDING them, optionally with weights.

Vocabulary
----------

  wet/dry     Effect mixing terms.
                dry = the signal entering the pedal
                wet = the pedal's processed signal
              A "25% wet" delay means mix = 0.25.

  crossfade   Complementary weights that always sum to 1.0:

                output = dry × (1 - mix) + wet × mix

              The chorus, phaser and flanger run a fixed 50/50 crossfade;
              the delay pedal exposes the mix as a knob.

  send        A scaled copy of a bus tapped off to a parallel processor
              (the reverb send takes 20% of the dry voices).

  return      The processed send added back into the main bus at its
              own level (the reverb returns at 30%).

  summing     Adding at equal level. Voices sum onto the dry bus this way,
              which can exceed [-1.0, +1.0] when several notes overlap;
              the master gain brings the total back down.
*/

/// Blend dry and wet samples using a linear crossfade.
///
/// output = (dry × (1-mix)) + (wet × mix)
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Add `source × gain` into `bus` (send/return routing).
#[inline]
pub fn add_scaled(bus: &mut [f32], source: &[f32], gain: f32) {
    debug_assert_eq!(bus.len(), source.len());

    for (out, &s) in bus.iter_mut().zip(source.iter()) {
        *out += s * gain;
    }
}

/// Copy `source × gain` into `out`.
#[inline]
pub fn copy_scaled(out: &mut [f32], source: &[f32], gain: f32) {
    debug_assert_eq!(out.len(), source.len());

    for (o, &s) in out.iter_mut().zip(source.iter()) {
        *o = s * gain;
    }
}

/// Multiply a buffer by a constant gain.
#[inline]
pub fn scale_in_place(buffer: &mut [f32], gain: f32) {
    for sample in buffer.iter_mut() {
        *sample *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_dry_wet() {
        // All dry
        assert_eq!(blend_dry_wet(1.0, 0.5, 0.0), 1.0);
        // All wet
        assert_eq!(blend_dry_wet(1.0, 0.5, 1.0), 0.5);
        // 50/50 mix
        assert_eq!(blend_dry_wet(1.0, 0.0, 0.5), 0.5);
    }

    #[test]
    fn test_send_and_return() {
        let dry = [1.0, -1.0];
        let mut send = [0.0; 2];
        copy_scaled(&mut send, &dry, 0.2);
        assert_eq!(send, [0.2, -0.2]);

        let mut bus = [0.5, 0.5];
        add_scaled(&mut bus, &send, 0.5);
        assert!((bus[0] - 0.6).abs() < 1e-6);
        assert!((bus[1] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_scale_in_place() {
        let mut buffer = [1.0, -0.5];
        scale_in_place(&mut buffer, 0.3);
        assert!((buffer[0] - 0.3).abs() < 1e-6);
        assert!((buffer[1] + 0.15).abs() < 1e-6);
    }
}
