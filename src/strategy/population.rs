//! Population helpers shared by every strategy.
//!
//! Worker-id arithmetic, fitness ordering and roulette selection live here so
//! each algorithm applies the same degenerate-case fallbacks.

use std::cmp::Ordering;
use std::sync::Arc;

use super::init::InitScheme;
use crate::model::{Assignment, Problem};
use crate::sampler::Sampler;

/// Wraps a raw (possibly negative) worker id into `[0, n)`.
pub fn wrap_worker(raw: i64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    raw.rem_euclid(n as i64) as usize
}

/// Shifts `candidate` to the next worker when it equals `target`.
pub fn avoid_collision(candidate: usize, target: usize, n: usize) -> usize {
    if candidate == target && n > 0 {
        (candidate + 1) % n
    } else {
        candidate
    }
}

fn by_fitness_desc(a: &Assignment, b: &Assignment) -> Ordering {
    b.fitness().total_cmp(&a.fitness())
}

/// Sorts best-first. Stable for equal fitness.
pub fn sort_by_fitness_desc(population: &mut [Assignment]) {
    population.sort_by(by_fitness_desc);
}

/// Keeps the `size` fittest individuals.
pub fn truncate_by_fitness(population: &mut Vec<Assignment>, size: usize) {
    sort_by_fitness_desc(population);
    population.truncate(size);
}

/// Index of the fittest individual (first one on ties).
pub fn best_index(population: &[Assignment]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, a) in population.iter().enumerate() {
        let f = a.fitness();
        match best {
            Some((_, bf)) if f <= bf => {}
            _ => best = Some((i, f)),
        }
    }
    best.map(|(i, _)| i)
}

/// `(min, max)` fitness of the population, `(0, 0)` when empty.
pub fn fitness_bounds(population: &[Assignment]) -> (f64, f64) {
    if population.is_empty() {
        return (0.0, 0.0);
    }
    population
        .iter()
        .map(Assignment::fitness)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
            (lo.min(f), hi.max(f))
        })
}

/// Fitness-proportionate pick over `weights`.
///
/// Draws `r = sample() · Σw` and returns the first index whose cumulative
/// weight exceeds `r`. Negative weights are shifted by the minimum; a zero or
/// non-finite total falls back to a uniform pick. Returns 0 for an empty slice.
pub fn roulette_index<S: Sampler + ?Sized>(weights: &[f64], sampler: &mut S) -> usize {
    if weights.is_empty() {
        return 0;
    }
    let min = weights.iter().copied().fold(f64::INFINITY, f64::min);
    let shift = if min < 0.0 { -min } else { 0.0 };
    let total: f64 = weights.iter().map(|w| w + shift).sum();
    if !(total > 0.0) || !total.is_finite() {
        return sampler.int_below(weights.len());
    }
    let r = sampler.sample() * total;
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w + shift;
        if r < cumulative {
            return i;
        }
    }
    weights.len() - 1
}

/// Replaces the worst `fraction` of the population with fresh individuals.
///
/// The population is left sorted best-first apart from the new tail.
pub fn inject_diversity<S: Sampler + ?Sized>(
    population: &mut Vec<Assignment>,
    fraction: f64,
    scheme: InitScheme,
    problem: &Arc<Problem>,
    sampler: &mut S,
) -> usize {
    let replace = ((population.len() as f64) * fraction.clamp(0.0, 1.0)) as usize;
    if replace == 0 {
        return 0;
    }
    sort_by_fitness_desc(population);
    let keep = population.len() - replace;
    population.truncate(keep);
    population.extend(scheme.population(problem, replace, sampler));
    replace
}
