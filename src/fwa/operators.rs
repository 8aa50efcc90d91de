//! Explosion, Gaussian mutation and distance-based selection.
//!
//! These are shared with the hybrid orchestrators, which run one
//! [`explode_generation`] per FWA round.

use tracing::warn;

use super::config::FwaConfig;
use crate::model::Assignment;
use crate::sampler::{shuffle, Sampler};
use crate::strategy::population::{
    avoid_collision, fitness_bounds, roulette_index, sort_by_fitness_desc, wrap_worker,
};

/// Number of sparks for a firework of `fitness`.
///
/// `s = m · (max - f + ε) / (Σ(max - f_i) + ε)`, clamped to
/// `[round(a·m), round(b·m)]` and rounded.
pub fn spark_count(fitness: f64, max_fitness: f64, gap_sum: f64, config: &FwaConfig) -> usize {
    let eps = config.epsilon;
    let m = config.spark_budget;
    let s = m * ((max_fitness - fitness + eps) / (gap_sum + eps));
    if !(s >= config.min_spark_ratio * m) {
        config.min_sparks()
    } else if s > config.max_spark_ratio * m {
        config.max_sparks()
    } else {
        s.round() as usize
    }
}

/// Explosion amplitude for a firework of `fitness`.
///
/// `A · (f - min + ε) / (Σ(f_i - min) + ε)`.
pub fn amplitude(fitness: f64, min_fitness: f64, spread_sum: f64, config: &FwaConfig) -> f64 {
    let eps = config.epsilon;
    let a = config.max_amplitude * ((fitness - min_fitness + eps) / (spread_sum + eps));
    if a.is_finite() {
        a
    } else {
        0.0
    }
}

/// `floor(tasks · sample())` distinct random task indices.
fn pick_dimensions<S: Sampler + ?Sized>(tasks: usize, sampler: &mut S) -> Vec<usize> {
    let z = sampler.int_below(tasks);
    let mut dims: Vec<usize> = (0..tasks).collect();
    shuffle(&mut dims, sampler);
    dims.truncate(z);
    dims
}

/// Copy of `firework` with a random subset of tasks displaced by one shared
/// offset `h = amplitude · U(-1, 1)`, wrapped modulo the worker count.
///
/// A displaced task that lands on its original worker moves to the next one.
pub fn explosion_spark<S: Sampler + ?Sized>(
    firework: &Assignment,
    amplitude: f64,
    sampler: &mut S,
) -> Assignment {
    let n = firework.problem().worker_count();
    let dims = pick_dimensions(firework.task_count(), sampler);
    let h = (amplitude * sampler.signed_unit()) as i64;
    let mut spark = firework.clone();
    for task in dims {
        let original = spark.worker_of(task);
        let moved = wrap_worker(original as i64 + h, n);
        spark.assign(task, avoid_collision(moved, original, n));
    }
    spark
}

/// Copy of `firework` with a random subset of worker ids scaled by one
/// standard-normal factor, wrapped modulo the worker count.
pub fn gaussian_spark<S: Sampler + ?Sized>(firework: &Assignment, sampler: &mut S) -> Assignment {
    let n = firework.problem().worker_count();
    let dims = pick_dimensions(firework.task_count(), sampler);
    let g = sampler.gaussian();
    let mut spark = firework.clone();
    for task in dims {
        let original = spark.worker_of(task);
        let moved = wrap_worker((original as f64 * g) as i64, n);
        spark.assign(task, avoid_collision(moved, original, n));
    }
    spark
}

/// Picks `target` survivors: `best` first, then roulette picks weighted by
/// Euclidean distance from `best`. A zero total distance falls back to
/// uniform picks.
pub fn select_by_distance<S: Sampler + ?Sized>(
    candidates: &[Assignment],
    best: &Assignment,
    target: usize,
    sampler: &mut S,
) -> Vec<Assignment> {
    let mut survivors = Vec::with_capacity(target);
    if target == 0 {
        return survivors;
    }
    survivors.push(best.clone());
    if candidates.is_empty() {
        return survivors;
    }
    let distances: Vec<f64> = candidates.iter().map(|c| c.distance(best)).collect();
    if distances.iter().sum::<f64>() <= 0.0 {
        warn!(
            candidates = candidates.len(),
            "all candidates coincide with best, selecting uniformly"
        );
    }
    while survivors.len() < target {
        let i = roulette_index(&distances, sampler);
        survivors.push(candidates[i].clone());
    }
    survivors
}

/// One full FWA iteration.
///
/// Every firework explodes into [`spark_count`] sparks of its
/// [`amplitude`]; `gaussian_ratio · |population|` Gaussian sparks are drawn
/// from random fireworks. Fireworks and sparks are pooled, `best` is
/// updated from the pool, and [`select_by_distance`] keeps `target` survivors.
pub fn explode_generation<S: Sampler + ?Sized>(
    population: Vec<Assignment>,
    best: &mut Assignment,
    target: usize,
    config: &FwaConfig,
    sampler: &mut S,
) -> Vec<Assignment> {
    let mut pool = population;
    if pool.is_empty() {
        return pool;
    }
    let (min_fitness, max_fitness) = fitness_bounds(&pool);
    let fitness: Vec<f64> = pool.iter().map(Assignment::fitness).collect();
    let gap_sum: f64 = fitness.iter().map(|f| max_fitness - f).sum();
    let spread_sum: f64 = fitness.iter().map(|f| f - min_fitness).sum();

    let mut sparks = Vec::new();
    for (firework, &f) in pool.iter().zip(&fitness) {
        let count = spark_count(f, max_fitness, gap_sum, config);
        let amp = amplitude(f, min_fitness, spread_sum, config);
        for _ in 0..count {
            sparks.push(explosion_spark(firework, amp, sampler));
        }
    }
    let gaussian = (pool.len() as f64 * config.gaussian_ratio) as usize;
    for _ in 0..gaussian {
        let source = sampler.int_below(pool.len());
        sparks.push(gaussian_spark(&pool[source], sampler));
    }
    pool.extend(sparks);

    sort_by_fitness_desc(&mut pool);
    if pool[0].fitness() > best.fitness() {
        *best = pool[0].clone();
    }
    select_by_distance(&pool, best, target, sampler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Problem, Task, Worker};
    use crate::sampler::{FixedSampler, ScriptedSampler, SeededSampler};
    use std::sync::Arc;

    fn problem(tasks: usize, workers: usize) -> Arc<Problem> {
        Arc::new(
            Problem::new(
                (0..tasks)
                    .map(|i| Task::new(i, 1000 + 100 * i as u64))
                    .collect(),
                (0..workers)
                    .map(|i| Worker::new(i, 400.0 * (i as f64 + 1.0), 2))
                    .collect(),
            )
            .unwrap(),
        )
    }

    // ---- Spark count and amplitude ----

    #[test]
    fn test_spark_count_zero_gap_hits_lower_bound() {
        let cfg = FwaConfig::default();
        // The fittest firework in a population with a non-zero spread.
        assert_eq!(spark_count(0.9, 0.9, 0.5, &cfg), 32);
    }

    #[test]
    fn test_spark_count_max_gap_hits_upper_bound() {
        let cfg = FwaConfig::default();
        // The only non-max firework carries the whole gap sum.
        assert_eq!(spark_count(0.4, 0.9, 0.5, &cfg), 640);
    }

    #[test]
    fn test_spark_count_inside_bounds_rounds() {
        let cfg = FwaConfig::default();
        // 800 · (0.25 + ε) / (1.0 + ε) ≈ 200.
        assert_eq!(spark_count(0.65, 0.9, 1.0, &cfg), 200);
    }

    #[test]
    fn test_spark_count_nan_falls_to_lower_bound() {
        let cfg = FwaConfig::default();
        assert_eq!(spark_count(f64::NAN, 0.9, 1.0, &cfg), 32);
    }

    #[test]
    fn test_amplitude() {
        let cfg = FwaConfig::default();
        assert!((amplitude(0.5, 0.5, 0.0, &cfg) - 40.0).abs() < 1e-9);
        let a = amplitude(0.75, 0.5, 1.0, &cfg);
        assert!((a - 10.0).abs() < 1e-3, "a={a}");
        assert!(amplitude(0.5, 0.5, 1.0, &cfg) < 1e-3);
    }

    // ---- Sparks ----

    #[test]
    fn test_explosion_spark_moves_selected_tasks() {
        let p = problem(4, 5);
        let fw = Assignment::new(p, vec![0, 1, 2, 3]).unwrap();
        // int_below(4) = 3 dims; shuffle draws; h = 2 · (2·0.99 - 1) = 1.96 → 1.
        let mut s = FixedSampler::new(0.99);
        let spark = explosion_spark(&fw, 2.0, &mut s);
        let moved = (0..4).filter(|&t| spark.worker_of(t) != fw.worker_of(t)).count();
        assert_eq!(moved, 3);
        for t in 0..4 {
            if spark.worker_of(t) != fw.worker_of(t) {
                assert_eq!(spark.worker_of(t), (fw.worker_of(t) + 1) % 5);
            }
        }
    }

    #[test]
    fn test_explosion_zero_offset_forces_next_worker() {
        let p = problem(2, 3);
        let fw = Assignment::new(p, vec![2, 2]).unwrap();
        // z = floor(2 · 0.75) = 1, identity shuffle, h = 10 · (2·0.5 - 1) = 0.
        let mut s = ScriptedSampler::new(vec![0.75, 0.75, 0.5]);
        let spark = explosion_spark(&fw, 10.0, &mut s);
        // Task 0 collides with its own worker and moves to (2 + 1) % 3.
        assert_eq!(spark.mapping(), &[0, 2]);
    }

    #[test]
    fn test_gaussian_spark_in_range() {
        let p = problem(20, 4);
        let mut s = SeededSampler::new(12);
        let fw = Assignment::new(p, (0..20).map(|i| i % 4).collect()).unwrap();
        for _ in 0..50 {
            let spark = gaussian_spark(&fw, &mut s);
            assert!(spark.mapping().iter().all(|&w| w < 4));
        }
    }

    // ---- Selection ----

    #[test]
    fn test_select_keeps_best_first() {
        let p = problem(3, 3);
        let best = Assignment::new(p.clone(), vec![0, 0, 0]).unwrap();
        let others = vec![
            Assignment::new(p.clone(), vec![2, 2, 2]).unwrap(),
            Assignment::new(p, vec![1, 0, 0]).unwrap(),
        ];
        let mut s = SeededSampler::new(1);
        let out = select_by_distance(&others, &best, 5, &mut s);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], best);
    }

    #[test]
    fn test_select_zero_distance_uniform() {
        let p = problem(3, 3);
        let best = Assignment::new(p, vec![1, 1, 1]).unwrap();
        let clones = vec![best.clone(), best.clone()];
        let out = select_by_distance(&clones, &best, 4, &mut FixedSampler::new(0.7));
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|a| *a == best));
    }

    #[test]
    fn test_select_prefers_distant() {
        let p = problem(3, 3);
        let best = Assignment::new(p.clone(), vec![0, 0, 0]).unwrap();
        let near = Assignment::new(p.clone(), vec![0, 0, 0]).unwrap();
        let far = Assignment::new(p, vec![2, 2, 2]).unwrap();
        let mut s = SeededSampler::new(2);
        let out = select_by_distance(&[near, far.clone()], &best, 20, &mut s);
        assert!(out[1..].iter().all(|a| *a == far));
    }

    // ---- Generation ----

    #[test]
    fn test_explode_generation_updates_best_and_size() {
        let p = problem(6, 3);
        let cfg = FwaConfig::default()
            .with_population_size(6)
            .with_sparks(40.0, 0.05, 0.5);
        let mut s = SeededSampler::new(21);
        let pop = crate::strategy::InitScheme::Uniform.population(&p, 6, &mut s);
        let mut best = pop[0].clone();
        let before = best.fitness();
        let next = explode_generation(pop, &mut best, 6, &cfg, &mut s);
        assert_eq!(next.len(), 6);
        assert!(best.fitness() >= before);
        assert_eq!(next[0], best);
    }
}
