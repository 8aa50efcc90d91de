//! Whale moves over worker ids.
//!
//! Both moves work per task on integer worker ids: the continuous update is
//! truncated toward zero, wrapped modulo the worker count, and shifted to
//! the next worker if it lands on the target's worker.

use std::sync::Arc;

use super::config::WoaConfig;
use crate::model::Assignment;
use crate::sampler::Sampler;
use crate::strategy::population::{avoid_collision, best_index, wrap_worker};

/// Per-iteration WOA coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Decays linearly from 2 to 0 over the run.
    pub a: f64,
    /// `2·a·r - a`; `|A| < 1` exploits the best, otherwise a random peer.
    pub coef_a: f64,
    /// `2·r`.
    pub coef_c: f64,
}

/// Draws one `r` and derives `a`, `A` and `C` for `iteration`.
pub fn coefficients<S: Sampler + ?Sized>(
    iteration: usize,
    max_iterations: usize,
    sampler: &mut S,
) -> Coefficients {
    let progress = if max_iterations == 0 {
        1.0
    } else {
        iteration as f64 / max_iterations as f64
    };
    let a = 2.0 * (1.0 - progress);
    let r = sampler.sample();
    Coefficients {
        a,
        coef_a: 2.0 * a * r - a,
        coef_c: 2.0 * r,
    }
}

/// Encircling move: `D = |C·target - whale|`, `new = target - A·D`.
pub fn encircle(whale: &Assignment, target: &Assignment, coef_a: f64, coef_c: f64) -> Vec<usize> {
    let n = whale.problem().worker_count();
    (0..whale.task_count())
        .map(|task| {
            let t = target.worker_of(task);
            let w = whale.worker_of(task) as f64;
            let d = (coef_c * t as f64 - w).abs();
            let raw = (t as f64 - coef_a * d) as i64;
            avoid_collision(wrap_worker(raw, n), t, n)
        })
        .collect()
}

/// Logarithmic spiral move: `D = |target - whale|`,
/// `new = D·e^{b·l}·cos(2πl) + target` for a shared `l ∈ [-1, 1)`.
pub fn spiral(whale: &Assignment, target: &Assignment, l: f64, shape: f64) -> Vec<usize> {
    let n = whale.problem().worker_count();
    let factor = (shape * l).exp() * (2.0 * std::f64::consts::PI * l).cos();
    (0..whale.task_count())
        .map(|task| {
            let t = target.worker_of(task);
            let d = (t as f64 - whale.worker_of(task) as f64).abs();
            let raw = (d * factor + t as f64) as i64;
            avoid_collision(wrap_worker(raw, n), t, n)
        })
        .collect()
}

/// Reassigns any out-of-range worker id to a random worker. Returns how many
/// tasks were repaired.
pub fn repair<S: Sampler + ?Sized>(mapping: &mut [usize], workers: usize, sampler: &mut S) -> usize {
    let mut repaired = 0;
    for w in mapping.iter_mut() {
        if *w >= workers {
            *w = sampler.int_below(workers);
            repaired += 1;
        }
    }
    repaired
}

/// Moves one whale for the iteration described by `coef`.
///
/// With probability `encircle_probability` the whale encircles the best (or
/// a random peer of `population` while `|A| >= 1`); otherwise it spirals
/// toward the best.
pub fn move_whale<S: Sampler + ?Sized>(
    whale: &Assignment,
    population: &[Assignment],
    best: &Assignment,
    coef: Coefficients,
    config: &WoaConfig,
    sampler: &mut S,
) -> Assignment {
    let mut mapping = if sampler.sample() < config.encircle_probability {
        if coef.coef_a.abs() < 1.0 || population.is_empty() {
            encircle(whale, best, coef.coef_a, coef.coef_c)
        } else {
            let peer = &population[sampler.int_below(population.len())];
            encircle(whale, peer, coef.coef_a, coef.coef_c)
        }
    } else {
        let l = sampler.signed_unit();
        spiral(whale, best, l, config.spiral_shape)
    };
    repair(&mut mapping, whale.problem().worker_count(), sampler);
    Assignment::from_mapping(Arc::clone(whale.problem()), mapping)
}

/// One WOA iteration over `population`.
///
/// Every whale is replaced by its moved position; `best` is updated from the
/// new population afterwards.
pub fn evolve<S: Sampler + ?Sized>(
    population: &[Assignment],
    best: &mut Assignment,
    iteration: usize,
    max_iterations: usize,
    config: &WoaConfig,
    sampler: &mut S,
) -> Vec<Assignment> {
    let coef = coefficients(iteration, max_iterations, sampler);
    let mut next = Vec::with_capacity(population.len());
    for whale in population {
        next.push(move_whale(whale, population, best, coef, config, sampler));
    }
    if let Some(i) = best_index(&next) {
        if next[i].fitness() > best.fitness() {
            *best = next[i].clone();
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Problem, Task, Worker};
    use crate::sampler::{FixedSampler, ScriptedSampler, SeededSampler};

    fn problem(tasks: usize, workers: usize) -> Arc<Problem> {
        Arc::new(
            Problem::new(
                (0..tasks)
                    .map(|i| Task::new(i, 1000 + 100 * i as u64))
                    .collect(),
                (0..workers)
                    .map(|i| Worker::new(i, 300.0 * (i as f64 + 1.0), 2))
                    .collect(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_coefficients() {
        let c = coefficients(0, 100, &mut FixedSampler::new(0.5));
        assert!((c.a - 2.0).abs() < 1e-12);
        assert!(c.coef_a.abs() < 1e-12);
        assert!((c.coef_c - 1.0).abs() < 1e-12);

        let c = coefficients(50, 100, &mut FixedSampler::new(1.0 - 1e-12));
        assert!((c.a - 1.0).abs() < 1e-12);
        assert!((c.coef_a - 1.0).abs() < 1e-9);

        let c = coefficients(100, 100, &mut FixedSampler::new(0.3));
        assert_eq!(c.a, 0.0);
        assert_eq!(c.coef_a, 0.0);
    }

    #[test]
    fn test_encircle_zero_a_shifts_off_target() {
        // A = 0 removes the displacement, so every task lands on the target's
        // worker and the collision rule moves it to the next one.
        let p = problem(5, 4);
        let whale = Assignment::new(p.clone(), vec![3, 2, 1, 0, 3]).unwrap();
        let best = Assignment::new(p, vec![0, 1, 2, 3, 0]).unwrap();
        let moved = encircle(&whale, &best, 0.0, 1.0);
        let expected: Vec<usize> = best.mapping().iter().map(|&w| (w + 1) % 4).collect();
        assert_eq!(moved, expected);
    }

    #[test]
    fn test_encircle_wraps_negative() {
        let p = problem(1, 4);
        let whale = Assignment::new(p.clone(), vec![3]).unwrap();
        let target = Assignment::new(p, vec![1]).unwrap();
        // D = |1·1 - 3| = 2, new = 1 - 1.5·2 = -2 → wraps to 2.
        assert_eq!(encircle(&whale, &target, 1.5, 1.0), vec![2]);
    }

    #[test]
    fn test_spiral_zero_l() {
        let p = problem(2, 5);
        let whale = Assignment::new(p.clone(), vec![4, 0]).unwrap();
        let target = Assignment::new(p, vec![1, 0]).unwrap();
        // l = 0: factor = 1, new = D + target.
        assert_eq!(spiral(&whale, &target, 0.0, 2.0), vec![4, 1]);
    }

    #[test]
    fn test_repair_out_of_range() {
        let mut mapping = vec![0, 7, 2, 9];
        let n = repair(&mut mapping, 3, &mut FixedSampler::new(0.5));
        assert_eq!(n, 2);
        assert_eq!(mapping, vec![0, 1, 2, 1]);
    }

    #[test]
    fn test_move_whale_spiral_branch() {
        let p = problem(2, 5);
        let whale = Assignment::new(p.clone(), vec![4, 0]).unwrap();
        let best = Assignment::new(p, vec![1, 0]).unwrap();
        let coef = Coefficients { a: 1.0, coef_a: 0.0, coef_c: 1.0 };
        // p = 0.9 picks the spiral; l = 2·0.5 - 1 = 0.
        let mut s = ScriptedSampler::new(vec![0.9, 0.5]);
        let moved = move_whale(&whale, &[], &best, coef, &WoaConfig::default(), &mut s);
        assert_eq!(moved.mapping(), &[4, 1]);
    }

    #[test]
    fn test_evolve_keeps_ids_in_range_and_best_monotone() {
        let p = problem(12, 5);
        let mut s = SeededSampler::new(17);
        let cfg = WoaConfig::default();
        let mut pop = crate::strategy::InitScheme::Uniform.population(&p, 10, &mut s);
        let mut best = pop[best_index(&pop).unwrap()].clone();
        for it in 0..30 {
            let before = best.fitness();
            pop = evolve(&pop, &mut best, it, 30, &cfg, &mut s);
            assert_eq!(pop.len(), 10);
            assert!(best.fitness() >= before);
            for whale in &pop {
                assert!(whale.mapping().iter().all(|&w| w < 5));
            }
        }
    }
}
