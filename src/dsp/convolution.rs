use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/*
Partitioned Convolution
=======================

Convolution reverb filters the signal with a recorded (or, here, synthesized)
impulse response. A two second response at 48 kHz is 96 000 taps, far too
many to convolve directly per sample, so the work moves to the frequency
domain.

Uniformly Partitioned Overlap-Add
---------------------------------

1. Split the impulse response into P partitions of B samples and store the
   FFT (size 2B, zero padded) of each one.
2. Collect B input samples, zero pad to 2B and take their FFT. Keep the
   last P input spectra in a ring (the frequency-domain delay line).
3. Multiply spectrum k ago with partition k and sum over all k:

       Y = Σ  X[n - k] · H[k]      k = 0 .. P-1

4. Inverse FFT Y. The first B samples plus the tail saved from the previous
   block are the next B output samples; the last B samples become the new
   saved tail.

Zero padding to 2B makes every block product a linear (not circular)
convolution, so overlap-add reassembles the exact result.

Latency
-------

Output is produced one partition behind the input: sample n comes out at
n + B. With B = 512 that is ~10 ms, which disappears inside a reverb's
natural pre-delay.

All buffers are allocated in `new`; `process` never touches the heap.
*/

pub struct PartitionedConvolver {
    partition: usize,
    fft: Arc<dyn Fft<f32>>,
    ifft: Arc<dyn Fft<f32>>,
    ir_spectra: Vec<Vec<Complex<f32>>>,
    history: Vec<Vec<Complex<f32>>>,
    history_pos: usize,
    input: Vec<f32>,
    output: Vec<f32>,
    overlap: Vec<f32>,
    fill: usize,
    spectrum: Vec<Complex<f32>>,
    accumulator: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl PartitionedConvolver {
    /// Prepare `impulse_response` for streaming convolution in blocks of
    /// `partition` samples.
    pub fn new(impulse_response: &[f32], partition: usize) -> Self {
        let partition = partition.max(1);
        let fft_size = partition * 2;

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(fft_size);
        let ifft = planner.plan_fft_inverse(fft_size);
        let scratch_len = fft
            .get_inplace_scratch_len()
            .max(ifft.get_inplace_scratch_len());
        let mut scratch = vec![Complex::default(); scratch_len];

        let ir_spectra: Vec<Vec<Complex<f32>>> = impulse_response
            .chunks(partition)
            .map(|chunk| {
                let mut spectrum = vec![Complex::default(); fft_size];
                for (bin, &tap) in spectrum.iter_mut().zip(chunk) {
                    bin.re = tap;
                }
                fft.process_with_scratch(&mut spectrum, &mut scratch);
                spectrum
            })
            .collect();

        let partitions = ir_spectra.len().max(1);

        Self {
            partition,
            fft,
            ifft,
            ir_spectra,
            history: vec![vec![Complex::default(); fft_size]; partitions],
            history_pos: 0,
            input: vec![0.0; partition],
            output: vec![0.0; partition],
            overlap: vec![0.0; partition],
            fill: 0,
            spectrum: vec![Complex::default(); fft_size],
            accumulator: vec![Complex::default(); fft_size],
            scratch,
        }
    }

    /// Block size (and latency) in samples.
    pub fn latency(&self) -> usize {
        self.partition
    }

    /// Push one input sample and pull one output sample.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let out = self.output[self.fill];
        self.input[self.fill] = sample;
        self.fill += 1;

        if self.fill == self.partition {
            self.convolve_partition();
            self.fill = 0;
        }

        out
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        for slot in &mut self.history {
            slot.fill(Complex::default());
        }
        self.input.fill(0.0);
        self.output.fill(0.0);
        self.overlap.fill(0.0);
        self.fill = 0;
        self.history_pos = 0;
    }

    fn convolve_partition(&mut self) {
        let partitions = self.history.len();
        let fft_size = self.partition * 2;

        // Newest input block into the frequency-domain delay line
        for (bin, &s) in self.spectrum.iter_mut().zip(self.input.iter()) {
            *bin = Complex::new(s, 0.0);
        }
        for bin in &mut self.spectrum[self.partition..] {
            *bin = Complex::default();
        }
        self.fft
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);
        self.history[self.history_pos].copy_from_slice(&self.spectrum);

        self.accumulator.fill(Complex::default());
        for (k, ir) in self.ir_spectra.iter().enumerate() {
            let slot = (self.history_pos + partitions - k) % partitions;
            for ((acc, &x), &h) in self
                .accumulator
                .iter_mut()
                .zip(self.history[slot].iter())
                .zip(ir.iter())
            {
                *acc += x * h;
            }
        }

        self.ifft
            .process_with_scratch(&mut self.accumulator, &mut self.scratch);

        let norm = 1.0 / fft_size as f32;
        for i in 0..self.partition {
            self.output[i] = self.accumulator[i].re * norm + self.overlap[i];
            self.overlap[i] = self.accumulator[self.partition + i].re * norm;
        }

        self.history_pos = (self.history_pos + 1) % partitions;
    }
}
