/*
Delay Line
==========

A circular buffer that remembers the last N input samples. The delay,
chorus and flanger pedals all sit on one.

  write_pos ──→ next slot to be written
  read(d)   ──→ the sample written d writes ago (d = 1 is the newest)

Feedback effects read before they write, so the value they feed back is
always from the past:

    delayed = line.read_interpolated(d)
    line.write(input + feedback * delayed)

Fractional delays (modulated chorus/flanger taps) interpolate linearly
between the two neighbouring samples. The buffer is sized once from the
longest delay the effect can ask for and never reallocates.
*/

pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// A line that can delay by up to `max_delay_samples`.
    pub fn new(max_delay_samples: usize) -> Self {
        Self {
            // Two guard samples for interpolation at the maximum delay
            buffer: vec![0.0; max_delay_samples.max(1) + 2],
            write_pos: 0,
        }
    }

    /// A line that can delay by up to `max_seconds` at `sample_rate`.
    pub fn with_max_time(max_seconds: f32, sample_rate: f32) -> Self {
        Self::new((max_seconds * sample_rate).ceil() as usize)
    }

    /// Longest delay this line supports, in samples.
    pub fn max_delay(&self) -> usize {
        self.buffer.len() - 2
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Sample written `delay_samples` writes ago (clamped to `1..=max_delay`).
    #[inline]
    pub fn read(&self, delay_samples: usize) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.clamp(1, self.max_delay());
        self.buffer[(self.write_pos + len - delay) % len]
    }

    /// Linearly interpolated read for fractional delays.
    #[inline]
    pub fn read_interpolated(&self, delay_samples: f32) -> f32 {
        let delay = delay_samples.clamp(1.0, self.max_delay() as f32);
        let whole = delay.floor() as usize;
        let frac = delay - whole as f32;

        let newer = self.read(whole);
        let older = self.read(whole + 1);
        newer + (older - newer) * frac
    }

    /// Write `sample` and return the one from `delay_samples` ago
    /// (0 returns the input unchanged).
    #[inline]
    pub fn next_sample(&mut self, sample: f32, delay_samples: usize) -> f32 {
        let delayed = if delay_samples == 0 {
            sample
        } else {
            self.read(delay_samples)
        };
        self.write(sample);
        delayed
    }

    pub fn render(&mut self, buffer: &mut [f32], delay_samples: usize) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, delay_samples);
        }
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
