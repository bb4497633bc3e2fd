//! Temporal interpolation of timestamped samples.

use crate::context::InterpolationContext;

/// How far past the interpolation window samples are retained, so the
/// bracketing pair at the window edge is still available.
const RETENTION_MARGIN: f64 = 0.1;

/// A value that can be blended: vector-like addition, subtraction, and
/// scaling, plus cyclic wrapping for angle-valued fields.
pub trait InterpValue: Copy {
    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn scale(self, factor: f64) -> Self;

    /// Shifts by whole periods so the result lies within half a period of
    /// `reference`.
    fn wrap_near(self, reference: Self, period: f64) -> Self;

    /// Normalizes into `[0, period)`.
    fn wrap_into(self, period: f64) -> Self;
}

impl InterpValue for f32 {
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn scale(self, factor: f64) -> Self {
        (f64::from(self) * factor) as Self
    }

    fn wrap_near(self, reference: Self, period: f64) -> Self {
        let period = period as Self;
        if period <= 0.0 {
            return self;
        }
        self - ((self - reference) / period).round() * period
    }

    fn wrap_into(self, period: f64) -> Self {
        let period = period as Self;
        if period <= 0.0 {
            return self;
        }
        self.rem_euclid(period)
    }
}

impl InterpValue for f64 {
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    fn sub(self, rhs: Self) -> Self {
        self - rhs
    }

    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    fn wrap_near(self, reference: Self, period: f64) -> Self {
        if period <= 0.0 {
            return self;
        }
        self - ((self - reference) / period).round() * period
    }

    fn wrap_into(self, period: f64) -> Self {
        if period <= 0.0 {
            return self;
        }
        self.rem_euclid(period)
    }
}

impl InterpValue for [f32; 3] {
    fn add(self, rhs: Self) -> Self {
        [self[0] + rhs[0], self[1] + rhs[1], self[2] + rhs[2]]
    }

    fn sub(self, rhs: Self) -> Self {
        [self[0] - rhs[0], self[1] - rhs[1], self[2] - rhs[2]]
    }

    fn scale(self, factor: f64) -> Self {
        [
            self[0].scale(factor),
            self[1].scale(factor),
            self[2].scale(factor),
        ]
    }

    fn wrap_near(self, reference: Self, period: f64) -> Self {
        [
            self[0].wrap_near(reference[0], period),
            self[1].wrap_near(reference[1], period),
            self[2].wrap_near(reference[2], period),
        ]
    }

    fn wrap_into(self, period: f64) -> Self {
        [
            self[0].wrap_into(period),
            self[1].wrap_into(period),
            self[2].wrap_into(period),
        ]
    }
}

/// Linear blend: `from` at `frac = 0`, `to` at `frac = 1`.
pub fn lerp<V: InterpValue>(frac: f64, from: V, to: V) -> V {
    from.add(to.sub(from).scale(frac))
}

/// Cubic Hermite blend between `from` and `to`, with tangents estimated from
/// the neighboring samples (`older` before `from`, `newer` after `to`).
pub fn hermite<V: InterpValue>(frac: f64, older: V, from: V, to: V, newer: V) -> V {
    let tangent_from = to.sub(older).scale(0.5);
    let tangent_to = newer.sub(from).scale(0.5);

    let t2 = frac * frac;
    let t3 = t2 * frac;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + frac;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    from.scale(h00)
        .add(tangent_from.scale(h10))
        .add(to.scale(h01))
        .add(tangent_to.scale(h11))
}

/// One recorded sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<V> {
    pub value: V,
    pub time: f64,
}

/// Blending mode for a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpMode {
    /// Piecewise-linear between the bracketing pair.
    Linear,
    /// Cubic Hermite over the bracketing pair and their neighbors.
    Hermite,
}

/// Outcome of an [`InterpolatedVariable::interpolate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpStatus {
    /// No samples recorded yet; there is no value.
    NoSamples,
    /// Same render time as the previous call with no new data; the cached
    /// value is unchanged.
    Unchanged,
    /// The target time fell inside (or before) the sample history.
    Interpolated,
    /// The target time fell past the newest sample.
    Extrapolated,
}

#[derive(Debug, Clone, Copy)]
struct Cached<V> {
    now: f64,
    value: V,
}

/// Smooths timestamped samples of one replicated field into a continuous
/// value for rendering.
///
/// Samples are buffered newest-first. Rendering asks for the value at
/// `now - interpolation_amount`; the lag keeps the target time inside the
/// sample history under normal jitter, so most queries blend between two
/// received samples instead of predicting ahead.
#[derive(Debug)]
pub struct InterpolatedVariable<V> {
    samples: Vec<Sample<V>>,
    mode: InterpMode,
    looping_period: Option<f64>,
    interpolation_amount: f64,
    max_extrapolation: f64,
    cached: Option<Cached<V>>,
}

impl<V: InterpValue> InterpolatedVariable<V> {
    /// Creates a variable with a 100 ms interpolation lag and a 250 ms
    /// extrapolation bound.
    #[must_use]
    pub fn new(mode: InterpMode) -> Self {
        Self {
            samples: Vec::new(),
            mode,
            looping_period: None,
            interpolation_amount: 0.1,
            max_extrapolation: 0.25,
            cached: None,
        }
    }

    /// Sets the interpolation lag in seconds.
    pub fn set_interpolation_amount(&mut self, seconds: f64) {
        self.interpolation_amount = seconds;
    }

    /// Sets the maximum extrapolation horizon in seconds.
    pub fn set_max_extrapolation(&mut self, seconds: f64) {
        self.max_extrapolation = seconds;
    }

    /// Enables or disables cyclic wrapping with the given period (e.g.
    /// 360.0 for degree-valued angles).
    pub fn set_looping_period(&mut self, period: Option<f64>) {
        self.looping_period = period;
    }

    /// Returns the number of buffered samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Returns the newest buffered sample.
    #[must_use]
    pub fn newest_sample(&self) -> Option<Sample<V>> {
        self.samples.first().copied()
    }

    /// Returns the oldest buffered sample.
    #[must_use]
    pub fn oldest_sample(&self) -> Option<Sample<V>> {
        self.samples.last().copied()
    }

    /// Returns the most recently interpolated value.
    #[must_use]
    pub fn value(&self) -> Option<V> {
        self.cached.map(|cached| cached.value)
    }

    /// Records a sample, keeping the buffer newest-first and pruning samples
    /// that fell out of the retention window.
    ///
    /// A sample sharing a timestamp with an existing one replaces it.
    pub fn record_value(&mut self, value: V, timestamp: f64) {
        self.cached = None;

        let sample = Sample { value, time: timestamp };
        match self.samples.iter().position(|s| s.time <= timestamp) {
            Some(i) if self.samples[i].time == timestamp => self.samples[i] = sample,
            Some(i) => self.samples.insert(i, sample),
            None => self.samples.push(sample),
        }

        let newest_time = self.samples[0].time;
        let cutoff = newest_time - self.interpolation_amount - RETENTION_MARGIN;
        // Keep one sample past the cutoff so the window edge stays bracketed.
        if let Some(first_older) = self.samples.iter().position(|s| s.time < cutoff) {
            self.samples.truncate(first_older + 1);
        }
    }

    /// Discards all buffered samples and the cached value.
    pub fn clear_history(&mut self) {
        self.samples.clear();
        self.cached = None;
    }

    /// Computes the value for render time `now` with default context
    /// settings (extrapolation allowed).
    pub fn interpolate(&mut self, now: f64) -> InterpStatus {
        let ctx = InterpolationContext::new();
        self.interpolate_in(&ctx, now)
    }

    /// Computes and caches the value for render time `now`.
    ///
    /// The target time is `now - interpolation_amount`. Inside the history
    /// the bracketing pair is blended per the mode; past the newest sample
    /// the value extends along the last two samples' velocity up to the
    /// extrapolation bound, beyond which (or with extrapolation disabled)
    /// the newest sample's value is held.
    pub fn interpolate_in(&mut self, ctx: &InterpolationContext, now: f64) -> InterpStatus {
        if self.samples.is_empty() {
            return InterpStatus::NoSamples;
        }
        if let Some(cached) = &self.cached {
            if cached.now == now {
                return InterpStatus::Unchanged;
            }
        }

        let target = now - self.interpolation_amount;
        let newest = self.samples[0];
        let newest_time = ctx.last_timestamp().unwrap_or(newest.time);

        let (value, status) = if target > newest_time {
            (
                self.extrapolate(ctx, target - newest_time),
                InterpStatus::Extrapolated,
            )
        } else {
            (self.blend(target), InterpStatus::Interpolated)
        };

        self.cached = Some(Cached { now, value });
        status
    }

    fn extrapolate(&self, ctx: &InterpolationContext, over: f64) -> V {
        let newest = self.samples[0];
        if !ctx.allow_extrapolation() || over > self.max_extrapolation || self.samples.len() < 2 {
            return newest.value;
        }

        let prev = self.samples[1];
        let dt = newest.time - prev.time;
        if dt <= 0.0 {
            return newest.value;
        }

        let prev_value = match self.looping_period {
            Some(period) => prev.value.wrap_near(newest.value, period),
            None => prev.value,
        };
        let value = newest
            .value
            .add(newest.value.sub(prev_value).scale(over / dt));
        match self.looping_period {
            Some(period) => value.wrap_into(period),
            None => value,
        }
    }

    fn blend(&self, target: f64) -> V {
        let Some(older_idx) = self.samples.iter().position(|s| s.time <= target) else {
            // Everything is newer than the target: clamp to the oldest.
            return self.samples[self.samples.len() - 1].value;
        };
        if older_idx == 0 {
            return self.samples[0].value;
        }

        let older = self.samples[older_idx];
        let newer = self.samples[older_idx - 1];
        let dt = newer.time - older.time;
        let frac = if dt > 0.0 {
            (target - older.time) / dt
        } else {
            1.0
        };

        let older_neighbor = self
            .samples
            .get(older_idx + 1)
            .map_or(older.value, |s| s.value);
        let newer_neighbor = if older_idx >= 2 {
            self.samples[older_idx - 2].value
        } else {
            newer.value
        };

        let (older_v, older_n, newer_n) = match self.looping_period {
            Some(period) => (
                older.value.wrap_near(newer.value, period),
                older_neighbor.wrap_near(newer.value, period),
                newer_neighbor.wrap_near(newer.value, period),
            ),
            None => (older.value, older_neighbor, newer_neighbor),
        };

        let value = match self.mode {
            InterpMode::Linear => lerp(frac, older_v, newer.value),
            InterpMode::Hermite => hermite(frac, older_n, older_v, newer.value, newer_n),
        };
        match self.looping_period {
            Some(period) => value.wrap_into(period),
            None => value,
        }
    }
}
