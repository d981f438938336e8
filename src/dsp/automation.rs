//! Sample-accurate parameter automation.

/*
Parameter Automation
====================

An automation lane describes how a parameter moves over time as a short list
of control points. Each point carries a time (seconds, relative to the start
of the lane), a target value and the curve used to REACH that value from the
previous point:

    Step         jump to the value at the point's time and hold it
    Linear       straight line from the previous point
    Exponential  constant-ratio glide from the previous point

  Value
   1.0 ┤      ●
       │     ╱ ╲
   0.7 ┤    ╱   ╲____●━━━━━━━━━━━●
       │   ╱                      ╲
   0.0 ●━━╱                        ╲___●
       └──────────────────────────────────→ t
       Step Linear  Exp        Step   Exp

Evaluating at time t finds the last point at or before t and the next point
after it. If the next point is a ramp, the value is interpolated between the
two; otherwise the earlier value holds.

Exponential ramps follow

    v(t) = v0 · (v1 / v0) ^ ((t - t0) / (t1 - t0))

which is only defined when both ends share a sign and neither is zero. In
that case the lane holds v0 until t1 and then jumps, which is also why
envelopes glide toward 0.001 rather than 0.

Lanes are fixed capacity so voices that own them stay off the heap.
*/

/// Maximum number of control points in a lane.
pub const MAX_POINTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Step,
    Linear,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ControlPoint {
    time: f32,
    value: f32,
    curve: Curve,
}

const EMPTY_POINT: ControlPoint = ControlPoint {
    time: 0.0,
    value: 0.0,
    curve: Curve::Step,
};

#[derive(Debug, Clone, Copy)]
pub struct Automation {
    initial: f32,
    points: [ControlPoint; MAX_POINTS],
    len: usize,
}

impl Automation {
    /// An empty lane that reports `initial` until the first point.
    pub fn new(initial: f32) -> Self {
        Self {
            initial,
            points: [EMPTY_POINT; MAX_POINTS],
            len: 0,
        }
    }

    /// A lane that never moves.
    pub fn constant(value: f32) -> Self {
        Self::new(value)
    }

    pub fn set_value_at(&mut self, value: f32, time: f32) -> &mut Self {
        self.insert(ControlPoint {
            time,
            value,
            curve: Curve::Step,
        })
    }

    pub fn linear_ramp_to(&mut self, value: f32, time: f32) -> &mut Self {
        self.insert(ControlPoint {
            time,
            value,
            curve: Curve::Linear,
        })
    }

    pub fn exponential_ramp_to(&mut self, value: f32, time: f32) -> &mut Self {
        self.insert(ControlPoint {
            time,
            value,
            curve: Curve::Exponential,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value of the lane at `time` seconds.
    pub fn value_at(&self, time: f32) -> f32 {
        let points = &self.points[..self.len];
        // Index of the first point strictly after `time`
        let next = points.partition_point(|p| p.time <= time);

        let (t0, v0) = if next == 0 {
            (0.0, self.initial)
        } else {
            let p = points[next - 1];
            (p.time, p.value)
        };

        let Some(target) = points.get(next) else {
            return v0;
        };

        let span = target.time - t0;
        if span <= 0.0 {
            return target.value;
        }
        let progress = ((time - t0) / span).clamp(0.0, 1.0);

        match target.curve {
            Curve::Step => v0,
            Curve::Linear => v0 + (target.value - v0) * progress,
            Curve::Exponential => {
                if v0 * target.value <= 0.0 {
                    v0
                } else {
                    v0 * (target.value / v0).powf(progress)
                }
            }
        }
    }

    fn insert(&mut self, point: ControlPoint) -> &mut Self {
        debug_assert!(self.len < MAX_POINTS, "automation lane is full");
        if self.len == MAX_POINTS {
            return self;
        }

        // Keep points ordered by time; equal times keep insertion order
        let at = self.points[..self.len].partition_point(|p| p.time <= point.time);
        self.points.copy_within(at..self.len, at + 1);
        self.points[at] = point;
        self.len += 1;
        self
    }
}
