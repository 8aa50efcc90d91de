//! Genetic operators over task → worker mappings.
//!
//! - [`select_parents`]: two distinct roulette picks over raw fitness
//! - [`uniform_crossover`]: per-task parent swap producing two children
//! - [`mutate`]: moves one random task to one random worker

use crate::model::Assignment;
use crate::sampler::Sampler;
use crate::strategy::population::roulette_index;

/// Redraws allowed before the second parent is forced to a neighbor index.
const MAX_PARENT_DRAWS: usize = 64;

/// Picks two distinct parent indices by fitness-proportionate selection.
///
/// If every redraw lands on the first parent (e.g. one individual holds all
/// the fitness mass), the second parent becomes the next index.
///
/// # Panics
/// Panics if `population` has fewer than two individuals.
pub fn select_parents<S: Sampler + ?Sized>(
    population: &[Assignment],
    sampler: &mut S,
) -> (usize, usize) {
    assert!(population.len() >= 2, "need at least two parents");
    let weights: Vec<f64> = population.iter().map(Assignment::fitness).collect();
    let first = roulette_index(&weights, sampler);
    for _ in 0..MAX_PARENT_DRAWS {
        let second = roulette_index(&weights, sampler);
        if second != first {
            return (first, second);
        }
    }
    (first, (first + 1) % population.len())
}

/// Uniform crossover: for each task, with probability `swap_probability`,
/// the son takes the mother's worker and the daughter the father's.
pub fn uniform_crossover<S: Sampler + ?Sized>(
    father: &Assignment,
    mother: &Assignment,
    swap_probability: f64,
    sampler: &mut S,
) -> (Assignment, Assignment) {
    let mut son = father.clone();
    let mut daughter = mother.clone();
    for task in 0..father.task_count() {
        if sampler.sample() < swap_probability {
            son.assign(task, mother.worker_of(task));
            daughter.assign(task, father.worker_of(task));
        }
    }
    (son, daughter)
}

/// Moves one random task to a random worker (possibly its current one).
pub fn mutate<S: Sampler + ?Sized>(child: &mut Assignment, sampler: &mut S) {
    let task = sampler.int_below(child.task_count());
    let worker = sampler.int_below(child.problem().worker_count());
    child.assign(task, worker);
}
