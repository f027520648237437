//! Animation primitives: linear and spring curves, animated values,
//! range interpolation and a controller that runs parallel batches.
//!
//! Everything here is frame-driven: the host calls `tick`/`update` with the
//! elapsed frame time and reads values back. Nothing spawns threads or timers.

use crate::Color;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

// =============================================================================
// SpringConfig - Spring Physics Parameters
// =============================================================================

/// Spring physics configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Mass of the object (affects inertia)
    pub mass: f64,
    /// Stiffness of the spring (affects speed)
    pub stiffness: f64,
    /// Damping coefficient (affects bounciness)
    pub damping: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::WOBBLY
    }
}

impl SpringConfig {
    /// Wobbly spring (bouncy)
    pub const WOBBLY: Self = Self {
        mass: 1.0,
        stiffness: 180.0,
        damping: 12.0,
    };

    /// Create custom spring config.
    #[must_use]
    pub const fn custom(mass: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            mass,
            stiffness,
            damping,
        }
    }

    /// Undamped natural frequency in rad/s.
    #[must_use]
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Calculate damping ratio.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.mass * self.stiffness).sqrt())
    }

    /// Whether spring is underdamped (will oscillate).
    #[must_use]
    pub fn is_underdamped(&self) -> bool {
        self.damping_ratio() < 1.0
    }

    /// Time for the step response to stay within 2% of the target.
    #[must_use]
    pub fn settling_time(&self) -> f64 {
        let omega = self.natural_frequency();
        let zeta = self.damping_ratio();
        if zeta < 1.0 {
            4.0 / (zeta * omega)
        } else {
            // Critically/over-damped: the slower pole dominates.
            let slow_pole = omega * (zeta - (zeta * zeta - 1.0).sqrt());
            6.0 / slow_pole.max(f64::EPSILON)
        }
    }

    /// Normalized step response: progress from 0 to 1 over one settling time.
    ///
    /// `t` is normalized time in [0, 1]; `1.0` returns exactly `1.0`.
    #[must_use]
    pub fn response(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return 1.0;
        }

        let omega = self.natural_frequency();
        let zeta = self.damping_ratio();
        let tau = t * self.settling_time();

        if zeta < 1.0 {
            let damped = omega * zeta.mul_add(-zeta, 1.0).sqrt();
            let envelope = (-zeta * omega * tau).exp();
            let phase = (zeta / zeta.mul_add(-zeta, 1.0).sqrt())
                .mul_add((damped * tau).sin(), (damped * tau).cos());
            envelope.mul_add(-phase, 1.0)
        } else {
            let slow_pole = omega * (zeta - (zeta * zeta - 1.0).sqrt());
            let x = slow_pole * tau;
            (1.0 + x).mul_add(-(-x).exp(), 1.0)
        }
    }
}

// =============================================================================
// Curve / AnimationSpec
// =============================================================================

/// Shape of a tween's progress over its duration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Curve {
    /// Constant speed
    #[default]
    Linear,
    /// Spring step response compressed into the duration
    Spring(SpringConfig),
}

impl Curve {
    /// Map normalized time to normalized progress.
    #[must_use]
    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Self::Linear => t.clamp(0.0, 1.0),
            Self::Spring(config) => config.response(t),
        }
    }
}

/// How to drive an animated value to a new target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Total duration
    pub duration: Duration,
    /// Progress curve
    pub curve: Curve,
}

impl AnimationSpec {
    /// Time-based animation with linear progress.
    #[must_use]
    pub const fn timing(duration: Duration) -> Self {
        Self {
            duration,
            curve: Curve::Linear,
        }
    }

    /// Spring-shaped animation settling within `duration`.
    #[must_use]
    pub const fn spring(duration: Duration, config: SpringConfig) -> Self {
        Self {
            duration,
            curve: Curve::Spring(config),
        }
    }
}

// =============================================================================
// Tween / AnimatedValue
// =============================================================================

/// A single in-flight transition between two numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Total duration
    pub duration: Duration,
    /// Elapsed time
    pub elapsed: Duration,
    /// Progress curve
    pub curve: Curve,
}

impl Tween {
    /// Create a tween from a spec.
    #[must_use]
    pub fn new(from: f64, to: f64, spec: AnimationSpec) -> Self {
        Self {
            from,
            to,
            duration: spec.duration,
            elapsed: Duration::ZERO,
            curve: spec.curve,
        }
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }

    /// Current value. Exactly `to` once complete.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        (self.to - self.from).mul_add(self.curve.apply(self.progress()), self.from)
    }

    /// Whether the tween has run its full duration.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt`. Any frame length is accepted; time stops at `duration`.
    pub fn update(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }
}

/// A numeric value that can be moved to a target over time.
///
/// Retargeting while in flight starts the new tween from the current
/// position, so the value never jumps.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedValue {
    resting: f64,
    tween: Option<Tween>,
}

impl AnimatedValue {
    /// Create a value at rest.
    #[must_use]
    pub const fn new(initial: f64) -> Self {
        Self {
            resting: initial,
            tween: None,
        }
    }

    /// Current position.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.tween.as_ref().map_or(self.resting, Tween::value)
    }

    /// Where the value is heading (its position when at rest).
    #[must_use]
    pub fn target(&self) -> f64 {
        self.tween.as_ref().map_or(self.resting, |t| t.to)
    }

    /// Whether a tween is in flight.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Jump to a value, dropping any tween.
    pub fn set_immediate(&mut self, value: f64) {
        self.resting = value;
        self.tween = None;
    }

    /// Start (or redirect) a tween toward `target`.
    pub fn animate_to(&mut self, target: f64, spec: AnimationSpec) {
        let from = self.value();
        self.resting = from;
        self.tween = Some(Tween::new(from, target, spec));
    }

    /// Advance by `dt`. Returns true on the frame the tween finishes.
    pub fn update(&mut self, dt: Duration) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };
        tween.update(dt);
        if tween.is_complete() {
            self.resting = tween.to;
            self.tween = None;
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Interpolate Trait / Interpolation
// =============================================================================

/// Trait for types that can be interpolated.
pub trait Interpolate {
    /// Interpolate between two values.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        (to - from).mul_add(t, *from)
    }
}

impl Interpolate for Color {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        from.lerp(to, t as f32)
    }
}

/// Linear map from a numeric input range onto two output values.
///
/// Inputs outside the range are clamped. The range endpoints return the
/// configured outputs unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation<T> {
    input: (f64, f64),
    output: (T, T),
}

impl<T: Interpolate + Clone> Interpolation<T> {
    /// Create a mapping from `input` onto `output`.
    #[must_use]
    pub const fn new(input: (f64, f64), output: (T, T)) -> Self {
        Self { input, output }
    }

    /// Normalized position of `x` inside the input range.
    #[must_use]
    pub fn fraction(&self, x: f64) -> f64 {
        let (lo, hi) = self.input;
        let span = hi - lo;
        if span == 0.0 {
            return 1.0;
        }
        ((x - lo) / span).clamp(0.0, 1.0)
    }

    /// Map an input value to an output value.
    #[must_use]
    pub fn map(&self, x: f64) -> T {
        let t = self.fraction(x);
        if t <= 0.0 {
            self.output.0.clone()
        } else if t >= 1.0 {
            self.output.1.clone()
        } else {
            T::interpolate(&self.output.0, &self.output.1, t)
        }
    }
}

// =============================================================================
// AnimationController - Parallel Batches
// =============================================================================

/// Identifier of a batch started on an [`AnimationController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(u64);

#[derive(Debug, Clone)]
struct Batch<K> {
    id: BatchId,
    keys: Vec<K>,
}

/// Owns keyed animated values and runs them in parallel batches.
///
/// A batch reports completion once, from the `tick` in which its last value
/// settles. Starting a batch takes its keys away from whatever batch was
/// driving them; a batch left with no keys is superseded and never reports.
#[derive(Debug, Clone)]
pub struct AnimationController<K> {
    values: HashMap<K, AnimatedValue>,
    batches: Vec<Batch<K>>,
    next_batch: u64,
}

impl<K> Default for AnimationController<K> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            batches: Vec::new(),
            next_batch: 0,
        }
    }
}

impl<K: Copy + Eq + Hash + Debug> AnimationController<K> {
    /// Create an empty controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or reset) a value at rest.
    pub fn insert(&mut self, key: K, initial: f64) {
        self.release(key);
        self.values.insert(key, AnimatedValue::new(initial));
    }

    /// Current value of a key.
    #[must_use]
    pub fn get(&self, key: K) -> Option<f64> {
        self.values.get(&key).map(AnimatedValue::value)
    }

    /// Target of a key.
    #[must_use]
    pub fn target(&self, key: K) -> Option<f64> {
        self.values.get(&key).map(AnimatedValue::target)
    }

    /// Jump a key to a value, removing it from any batch.
    pub fn set_immediate(&mut self, key: K, value: f64) {
        self.release(key);
        self.values
            .entry(key)
            .or_insert_with(|| AnimatedValue::new(value))
            .set_immediate(value);
    }

    /// Start a batch that drives every listed key to its target together.
    ///
    /// Keys not registered yet start from `0.0`.
    pub fn start_batch(&mut self, targets: impl IntoIterator<Item = (K, f64, AnimationSpec)>) -> BatchId {
        let id = BatchId(self.next_batch);
        self.next_batch += 1;

        let mut keys = Vec::new();
        for (key, target, spec) in targets {
            self.release(key);
            self.values
                .entry(key)
                .or_insert_with(|| AnimatedValue::new(0.0))
                .animate_to(target, spec);
            keys.push(key);
        }

        tracing::trace!(batch = id.0, ?keys, "animation batch started");
        self.batches.push(Batch { id, keys });
        id
    }

    /// Advance every value and return the batches that completed.
    pub fn tick(&mut self, dt: Duration) -> Vec<BatchId> {
        for value in self.values.values_mut() {
            value.update(dt);
        }

        let values = &self.values;
        let (done, running): (Vec<_>, Vec<_>) = self.batches.drain(..).partition(|batch| {
            batch
                .keys
                .iter()
                .all(|key| values.get(key).map_or(true, |v| !v.is_animating()))
        });
        self.batches = running;

        done.into_iter()
            .map(|batch| {
                tracing::trace!(batch = batch.id.0, "animation batch completed");
                batch.id
            })
            .collect()
    }

    /// Whether a batch is still waiting to complete.
    #[must_use]
    pub fn is_running(&self, id: BatchId) -> bool {
        self.batches.iter().any(|b| b.id == id)
    }

    /// Whether any value is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.values.values().any(AnimatedValue::is_animating)
    }

    /// Number of batches in flight.
    #[must_use]
    pub fn active_batches(&self) -> usize {
        self.batches.len()
    }

    fn release(&mut self, key: K) {
        for batch in &mut self.batches {
            batch.keys.retain(|k| *k != key);
        }
        self.batches.retain(|batch| {
            let alive = !batch.keys.is_empty();
            if !alive {
                tracing::trace!(batch = batch.id.0, "animation batch superseded");
            }
            alive
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
