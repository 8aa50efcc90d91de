//! Round bookkeeping shared by the orchestrators: merge, trim, stagnation
//! tracking and diversity injection.

use std::sync::Arc;

use tracing::{debug, trace};

use super::config::HybridConfig;
use crate::model::{Assignment, Problem};
use crate::sampler::Sampler;
use crate::strategy::population::{inject_diversity, truncate_by_fitness};
use crate::strategy::SearchProgress;

#[derive(Debug, Clone, Default)]
pub(crate) struct Rounds {
    pub population: Vec<Assignment>,
    pub fwa_iterations: usize,
    pub woa_iterations: usize,
    stagnant: usize,
    last_best: f64,
    injections: usize,
}

impl Rounds {
    pub fn new(population: Vec<Assignment>, best_fitness: f64) -> Self {
        Self {
            population,
            last_best: best_fitness,
            ..Self::default()
        }
    }

    /// FWA iterations the next round may run.
    pub fn fwa_batch(&self, config: &HybridConfig) -> usize {
        config
            .batch_size
            .min(config.max_fwa_iterations.saturating_sub(self.fwa_iterations))
    }

    /// WOA iterations the next round may run.
    pub fn woa_batch(&self, config: &HybridConfig) -> usize {
        config
            .batch_size
            .min(config.max_woa_iterations.saturating_sub(self.woa_iterations))
    }

    pub fn injections(&self) -> usize {
        self.injections
    }

    /// Closes a round: keeps the fittest `population_size` of `merged`,
    /// offers them to `progress`, and injects fresh individuals once the best
    /// has not improved for `stagnation_rounds` rounds.
    pub fn finish<S: Sampler + ?Sized>(
        &mut self,
        strategy: &'static str,
        mut merged: Vec<Assignment>,
        progress: &mut SearchProgress,
        config: &HybridConfig,
        problem: &Arc<Problem>,
        sampler: &mut S,
    ) {
        truncate_by_fitness(&mut merged, config.population_size);
        progress.offer_best_of(&merged);

        let best = progress.best().map_or(f64::NEG_INFINITY, Assignment::fitness);
        if best > self.last_best {
            self.last_best = best;
            self.stagnant = 0;
        } else {
            self.stagnant += 1;
        }
        trace!(
            strategy,
            population = merged.len(),
            stagnant = self.stagnant,
            best_fitness = best,
            "round merged"
        );

        if config.stagnation_rounds > 0 && self.stagnant >= config.stagnation_rounds {
            let replaced = inject_diversity(
                &mut merged,
                config.diversity_fraction,
                config.init,
                problem,
                sampler,
            );
            self.stagnant = 0;
            self.injections += 1;
            progress.offer_best_of(&merged);
            debug!(strategy, replaced, "best stalled, injected fresh individuals");
        }
        self.population = merged;
    }

    /// Logs the round summary when due.
    pub fn log_if_due(&self, strategy: &'static str, progress: &SearchProgress, every: usize) {
        let round = progress.iterations();
        if every == 0 || round % every != 0 {
            return;
        }
        if let Some(best) = progress.best() {
            debug!(
                strategy,
                round,
                fwa_iterations = self.fwa_iterations,
                woa_iterations = self.woa_iterations,
                best_fitness = best.fitness(),
                "progress"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, Worker};
    use crate::sampler::SeededSampler;
    use crate::strategy::InitScheme;

    fn problem() -> Arc<Problem> {
        Arc::new(
            Problem::new(
                (0..6).map(|i| Task::new(i, 1000 + 200 * i as u64)).collect(),
                (0..3)
                    .map(|i| Worker::new(i, 500.0 * (i as f64 + 1.0), 2))
                    .collect(),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_batches_respect_caps() {
        let cfg = HybridConfig::default().with_iterations(25, 12);
        let mut r = Rounds::new(Vec::new(), 0.0);
        assert_eq!(r.fwa_batch(&cfg), 10);
        r.fwa_iterations = 20;
        r.woa_iterations = 10;
        assert_eq!(r.fwa_batch(&cfg), 5);
        assert_eq!(r.woa_batch(&cfg), 2);
        r.woa_iterations = 12;
        assert_eq!(r.woa_batch(&cfg), 0);
    }

    #[test]
    fn test_finish_trims_and_tracks_best() {
        let p = problem();
        let cfg = HybridConfig::default().with_population_size(4);
        let mut s = SeededSampler::new(3);
        let pop = InitScheme::Uniform.population(&p, 4, &mut s);
        let mut progress = SearchProgress::new();
        progress.populate(&pop);
        let start = progress.best().unwrap().fitness();
        let mut r = Rounds::new(pop.clone(), start);

        let mut merged = pop.clone();
        merged.extend(InitScheme::Uniform.population(&p, 6, &mut s));
        r.finish("TEST", merged, &mut progress, &cfg, &p, &mut s);
        assert_eq!(r.population.len(), 4);
        assert!(progress.best().unwrap().fitness() >= start);
        for w in r.population.windows(2) {
            assert!(w[0].fitness() >= w[1].fitness());
        }
    }

    #[test]
    fn test_stagnation_triggers_injection() {
        let p = problem();
        let cfg = HybridConfig::default()
            .with_population_size(6)
            .with_stagnation_rounds(3);
        let mut s = SeededSampler::new(8);
        let pop = InitScheme::Uniform.population(&p, 6, &mut s);
        let mut progress = SearchProgress::new();
        progress.populate(&pop);
        let best = progress.best().unwrap().clone();
        let mut r = Rounds::new(pop, best.fitness());

        // Offering the same population never improves the best.
        for round in 1..=3 {
            let merged = vec![best.clone(); 6];
            r.finish("TEST", merged, &mut progress, &cfg, &p, &mut s);
            assert_eq!(r.injections(), usize::from(round == 3));
        }
        assert_eq!(r.population.len(), 6);
        assert_eq!(r.population[0], best);
    }
}
