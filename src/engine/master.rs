use crate::dsp::mix::{add_scaled, copy_scaled, scale_in_place};
use crate::graph::{reverb::ReverbNode, GraphNode, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Master Bus
==========

    voices ──┬──→ effect chain ─────────────────────┐
             │                                      ├──→ × master ──→ out
             └──→ × send ──→ reverb ──→ × return ───┘

The reverb is fed from the voices before the pedals, so the room does not
change colour when pedals are switched.
*/

pub struct MasterBus {
    reverb: ReverbNode,
    send: f32,
    wet: f32,
    volume: f32,
    reverb_buffer: Vec<f32>,
}

impl MasterBus {
    pub fn new(reverb: ReverbNode, send: f32, wet: f32, volume: f32) -> Self {
        Self {
            reverb,
            send,
            wet,
            volume: volume.clamp(0.0, 1.0),
            reverb_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Mix one block.
    ///
    /// `dry` is the raw voice sum, `out` arrives holding the effect chain's
    /// output and leaves holding the master signal. Blocks longer than
    /// `MAX_BLOCK_SIZE` must be split by the caller.
    pub fn process(&mut self, dry: &[f32], out: &mut [f32], ctx: &RenderCtx) {
        let len = out.len().min(dry.len()).min(self.reverb_buffer.len());
        let room = &mut self.reverb_buffer[..len];

        copy_scaled(room, &dry[..len], self.send);
        self.reverb.render_block(room, ctx);
        add_scaled(&mut out[..len], room, self.wet);
        scale_in_place(out, self.volume);
    }

    pub fn reset(&mut self) {
        self.reverb.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::reverb::CONVOLUTION_PARTITION;

    fn bus(volume: f32) -> MasterBus {
        // A unit impulse response makes the reverb a plain delay
        let mut ir = vec![0.0; 4];
        ir[0] = 1.0;
        MasterBus::new(ReverbNode::new(&ir), 0.2, 0.3, volume)
    }

    #[test]
    fn test_chain_signal_scaled_by_master() {
        let mut master = bus(0.5);
        let dry = vec![0.0; 256];
        let mut out = vec![1.0; 256];
        master.process(&dry, &mut out, &RenderCtx::new(48000.0));
        assert!(out.iter().all(|&s| (s - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_reverb_return_level() {
        let mut master = bus(1.0);
        let ctx = RenderCtx::new(48000.0);
        let dry = vec![1.0; CONVOLUTION_PARTITION * 2];
        let mut out = vec![0.0; CONVOLUTION_PARTITION * 2];
        master.process(&dry, &mut out, &ctx);

        // send 0.2 · return 0.3, once the convolver's latency has passed
        assert!(out[..CONVOLUTION_PARTITION].iter().all(|&s| s.abs() < 1e-6));
        assert!((out[CONVOLUTION_PARTITION + 10] - 0.06).abs() < 1e-4);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut master = bus(3.0);
        assert_eq!(master.volume(), 1.0);
        master.set_volume(-1.0);
        assert_eq!(master.volume(), 0.0);
    }
}
