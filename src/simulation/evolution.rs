//! The generational training driver.
//!
//! Runs generation after generation against an [`Optimizer`]: evaluate
//! the current population on the course, report the results, ask the
//! optimizer for the next population, repeat until the generation cap,
//! convergence, or an abort.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use super::controller::Candidate;
use super::generation::GenerationRun;
use super::params::{Params, ParamsError};

/// Breeds populations from evaluation results.
///
/// The driver treats the optimizer as a black box: it hands over the
/// evaluated candidates of the finished generation (an empty slice for
/// the very first population) and takes back the next population to
/// fly. Fitness is the only signal that crosses the boundary.
pub trait Optimizer {
    /// Produces the next population from the evaluated one.
    fn next_population(&mut self, evaluated: &[Candidate]) -> Vec<Candidate>;

    /// Whether the evaluated generation is good enough to stop early.
    fn converged(&self, _evaluated: &[Candidate]) -> bool {
        false
    }
}

/// Shared flag that aborts a training run between ticks.
pub type AbortFlag = Arc<AtomicBool>;

/// Why a training run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The generation cap was reached.
    Completed,
    /// The optimizer reported convergence.
    Converged,
    /// The abort flag was raised.
    Aborted,
}

/// Errors raised before a training run can start.
#[derive(Debug, Error)]
pub enum SetupError {
    /// The parameters failed validation.
    #[error(transparent)]
    Params(#[from] ParamsError),
    /// The optimizer produced no candidates to evaluate.
    #[error("optimizer produced an empty first population")]
    EmptyPopulation,
}

/// Summary of one finished generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport {
    /// 1-based index of the generation.
    pub generation: u32,
    /// Gates passed by the population.
    pub score: u32,
    /// Ticks the generation lasted.
    pub ticks: u64,
    /// Highest fitness in the evaluated population.
    pub best_fitness: f32,
    /// Id of the candidate with the highest fitness.
    pub best_id: u64,
    /// Mean fitness of the evaluated population.
    pub mean_fitness: f32,
}

impl GenerationReport {
    fn summarize(generation: u32, score: u32, ticks: u64, evaluated: &[Candidate]) -> Self {
        let mut best_fitness = f32::NEG_INFINITY;
        let mut best_id = 0;
        let mut sum = 0.0;
        for candidate in evaluated {
            sum += candidate.fitness;
            if candidate.fitness > best_fitness {
                best_fitness = candidate.fitness;
                best_id = candidate.id;
            }
        }
        let mean_fitness = if evaluated.is_empty() {
            0.0
        } else {
            sum / evaluated.len() as f32
        };
        Self {
            generation,
            score,
            ticks,
            best_fitness,
            best_id,
            mean_fitness,
        }
    }
}

/// Drives an optimizer through a whole training run.
pub struct Evolution<O: Optimizer> {
    optimizer: O,
    run: Option<GenerationRun>,
    halted: Option<Halt>,
    /// 1-based index of the generation currently flying.
    pub generation: u32,
    /// Reports of every finished generation, oldest first.
    pub history: Vec<GenerationReport>,
}

impl<O: Optimizer> Evolution<O> {
    /// Validates the parameters, asks the optimizer for its first
    /// population, and puts it on the course.
    pub fn new(mut optimizer: O, params: &Params) -> Result<Self, SetupError> {
        params.validate()?;
        let population = optimizer.next_population(&[]);
        if population.is_empty() {
            return Err(SetupError::EmptyPopulation);
        }
        Ok(Self {
            optimizer,
            run: Some(GenerationRun::new(population, params)),
            halted: None,
            generation: 1,
            history: Vec::new(),
        })
    }

    /// The generation currently flying, if the run has not halted.
    pub fn current_run(&self) -> Option<&GenerationRun> {
        self.run.as_ref()
    }

    /// Why the run stopped, once it has.
    pub fn halted(&self) -> Option<Halt> {
        self.halted
    }

    /// Advances the current generation by one tick, concluding it and
    /// seeding the next one when it completes. Does nothing once the
    /// run has halted.
    pub fn tick(&mut self, params: &Params) {
        if self.halted.is_some() {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        run.tick(params);
        if run.is_complete(params) {
            self.conclude_generation(params);
        }
    }

    fn conclude_generation(&mut self, params: &Params) {
        let Some(run) = self.run.take() else {
            return;
        };
        let score = run.score;
        let ticks = run.ticks;
        let evaluated = run.finish();
        let report = GenerationReport::summarize(self.generation, score, ticks, &evaluated);
        println!(
            "gen {:>3} | score {:>3} | ticks {:>6} | best {:>8.1} (bird {}) | mean {:>8.1}",
            report.generation,
            report.score,
            report.ticks,
            report.best_fitness,
            report.best_id,
            report.mean_fitness
        );
        self.history.push(report);

        if self.generation >= params.max_generations {
            self.halted = Some(Halt::Completed);
            return;
        }
        if self.optimizer.converged(&evaluated) {
            self.halted = Some(Halt::Converged);
            return;
        }
        let next = self.optimizer.next_population(&evaluated);
        if next.is_empty() {
            self.halted = Some(Halt::Completed);
            return;
        }
        self.generation += 1;
        self.run = Some(GenerationRun::new(next, params));
    }

    /// Runs ticks until the run halts, checking the abort flag once per
    /// tick. An abort stops the whole run, mid-generation included.
    pub fn train(&mut self, params: &Params, abort: &AbortFlag) -> Halt {
        loop {
            if abort.load(Ordering::Relaxed) {
                self.halted = Some(Halt::Aborted);
            }
            if let Some(halt) = self.halted {
                return halt;
            }
            self.tick(params);
        }
    }
}
