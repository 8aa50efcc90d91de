//! Uniform sampling abstraction shared by every strategy.
//!
//! All stochastic decisions (worker picks, acceptance draws, shuffles,
//! Gaussian perturbations) are routed through [`Sampler`], so a run driven by
//! a [`SeededSampler`] with a fixed seed is fully reproducible.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform values in `[0, 1)`.
///
/// Implementors only provide [`sample`](Sampler::sample) and
/// [`fork`](Sampler::fork); everything else is derived.
pub trait Sampler: Send {
    /// Draws a value that is expected to lie in `[0, 1)`.
    ///
    /// Derived helpers tolerate values `>= 1.0`.
    fn sample(&mut self) -> f64;

    /// Derives an independent sampler for work running on another thread.
    ///
    /// Forking is deterministic: the same parent state yields the same child.
    fn fork(&mut self) -> Self
    where
        Self: Sized;

    /// Draws an integer in `[0, n)` as `floor(sample() * n)`.
    ///
    /// A sample `>= 1.0` falls back to `sample() % n`. Returns 0 when `n == 0`.
    fn int_below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let u = self.sample();
        let n_f = n as f64;
        let raw = if u >= 1.0 { u % n_f } else { u * n_f };
        if raw.is_finite() && raw > 0.0 {
            (raw as usize).min(n - 1)
        } else {
            0
        }
    }

    /// Draws a value in `[-1, 1)`.
    fn signed_unit(&mut self) -> f64 {
        self.sample() * 2.0 - 1.0
    }

    /// Draws a standard normal value (Box-Muller).
    fn gaussian(&mut self) -> f64 {
        let u1 = (1.0 - self.sample()).clamp(f64::MIN_POSITIVE, 1.0);
        let u2 = self.sample();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

/// Fisher-Yates shuffle driven by a [`Sampler`].
pub fn shuffle<T, S: Sampler + ?Sized>(items: &mut [T], sampler: &mut S) {
    for i in (1..items.len()).rev() {
        let j = sampler.int_below(i + 1);
        items.swap(i, j);
    }
}

/// Picks a uniformly random index in `[0, n)` other than `exclude`.
///
/// Returns `exclude` itself when `n < 2`.
pub fn index_other_than<S: Sampler + ?Sized>(sampler: &mut S, n: usize, exclude: usize) -> usize {
    if n < 2 {
        return exclude;
    }
    let pick = sampler.int_below(n - 1);
    if pick >= exclude {
        pick + 1
    } else {
        pick
    }
}

/// ChaCha8-backed sampler; stable across platforms for a given seed.
#[derive(Debug, Clone)]
pub struct SeededSampler {
    rng: ChaCha8Rng,
}

impl SeededSampler {
    /// Creates a sampler from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a sampler from `seed`, or from a random seed when `None`.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::new(rand::random()),
        }
    }
}

impl Sampler for SeededSampler {
    fn sample(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn fork(&mut self) -> Self {
        Self::new(self.rng.next_u64())
    }
}

/// Sampler that always returns the same value.
///
/// Useful for pinning scenarios in tests: `FixedSampler::new(0.0)` makes every
/// index draw select 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSampler {
    value: f64,
}

impl FixedSampler {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Sampler for FixedSampler {
    fn sample(&mut self) -> f64 {
        self.value
    }

    fn fork(&mut self) -> Self {
        *self
    }
}

/// Sampler that cycles through a scripted sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedSampler {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSampler {
    /// Creates a sampler cycling over `values`. An empty script yields 0.0.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl Sampler for ScriptedSampler {
    fn sample(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = (self.cursor + 1) % self.values.len();
        v
    }

    fn fork(&mut self) -> Self {
        self.clone()
    }
}
