//! The built-in neuroevolution optimizer.
//!
//! Candidates are steered by small multi-layer perceptrons over the
//! normalized senses. Between generations the population is rebred by
//! truncation selection: the fittest brains survive unchanged, the rest
//! are replaced by mutated clones and crossovers of the top ranks.

use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::controller::{Candidate, Controller, Senses};
use super::evolution::Optimizer;
use super::params::Params;

/// A single layer of a multi-layer perceptron.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mlp {
    /// Weight matrix (`output_size` × `input_size`).
    pub weights: Array2<f32>,
    /// Bias vector (`output_size`).
    pub biases: Array1<f32>,
}

impl Mlp {
    /// Creates a new layer with uniform random weights and biases.
    pub fn new_random(input_size: usize, output_size: usize, scale: f32) -> Self {
        Self {
            weights: Array2::random((output_size, input_size), Uniform::new(-scale, scale)),
            biases: Array1::random(output_size, Uniform::new(-scale, scale)),
        }
    }

    /// Performs a forward pass with tanh activation.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = self.weights.dot(inputs);
        output += &self.biases;
        output.mapv_inplace(f32::tanh);
        output
    }

    /// Mutates weights and biases by adding uniform noise.
    pub fn mutate(&mut self, mutation_scale: f32) {
        self.weights += &Array2::random(
            self.weights.dim(),
            Uniform::new(-mutation_scale, mutation_scale),
        );
        self.biases += &Array1::random(
            self.biases.len(),
            Uniform::new(-mutation_scale, mutation_scale),
        );
    }

    /// Creates a new layer by averaging two parent layers.
    pub fn crossover(parent1: &Mlp, parent2: &Mlp) -> Self {
        Self {
            weights: &parent1.weights * 0.5 + &parent2.weights * 0.5,
            biases: &parent1.biases * 0.5 + &parent2.biases * 0.5,
        }
    }
}

/// A multi-layer perceptron genome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Mlp>,
}

impl Brain {
    /// Creates a brain of random layers for the given dimensions.
    pub fn new(layer_sizes: &[usize], scale: f32) -> Self {
        let layers = (0..layer_sizes.len() - 1)
            .map(|i| Mlp::new_random(layer_sizes[i], layer_sizes[i + 1], scale))
            .collect();

        Self { layers }
    }

    /// Runs a forward pass through all layers.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        output
    }

    /// Creates a new brain by averaging two parent brains layerwise.
    pub fn crossover(parent1: &Brain, parent2: &Brain) -> Self {
        let new_layers = parent1
            .layers
            .iter()
            .zip(&parent2.layers)
            .map(|(layer1, layer2)| Mlp::crossover(layer1, layer2))
            .collect();

        Self { layers: new_layers }
    }

    /// Mutates all layers in the brain.
    pub fn mutate(&mut self, mutation_scale: f32) {
        for layer in &mut self.layers {
            layer.mutate(mutation_scale);
        }
    }
}

/// Steers a bird with a [`Brain`] over senses normalized by the screen
/// height, so inputs stay in a range tanh layers handle well.
#[derive(Debug, Clone)]
pub struct BrainController {
    brain: Brain,
    norm: f32,
}

impl BrainController {
    /// Wraps a brain for flight on the given course.
    pub fn new(brain: Brain, params: &Params) -> Self {
        Self {
            brain,
            norm: params.screen_height,
        }
    }
}

impl Controller for BrainController {
    fn decide(&mut self, senses: &Senses) -> f32 {
        let inputs = Array1::from_vec(vec![
            senses.altitude / self.norm,
            senses.gap_top_distance / self.norm,
            senses.gap_bottom_distance / self.norm,
        ]);
        self.brain.think(&inputs)[0]
    }
}

/// Generational weight evolution over [`Brain`] genomes.
///
/// Keeps the genomes of the generation currently flying keyed by
/// candidate id, so evaluation results can be mapped back to the brains
/// that earned them without the course ever seeing a genome.
pub struct WeightEvolution {
    params: Params,
    genomes: Vec<(u64, Brain)>,
    next_id: u64,
}

impl WeightEvolution {
    /// Creates an optimizer breeding populations for the given params.
    pub fn new(params: &Params) -> Self {
        Self {
            params: params.clone(),
            genomes: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a genome and wraps it as a fresh candidate.
    fn issue(&mut self, brain: Brain) -> Candidate {
        let id = self.next_id;
        self.next_id += 1;
        let controller = BrainController::new(brain.clone(), &self.params);
        self.genomes.push((id, brain));
        Candidate::new(id, Box::new(controller))
    }

    /// Seeds a full population of random brains.
    fn genesis(&mut self) -> Vec<Candidate> {
        let brains: Vec<Brain> = (0..self.params.population_size)
            .map(|_| Brain::new(&self.params.layer_sizes, self.params.weight_init_scale))
            .collect();
        brains.into_iter().map(|brain| self.issue(brain)).collect()
    }
}

impl Optimizer for WeightEvolution {
    fn next_population(&mut self, evaluated: &[Candidate]) -> Vec<Candidate> {
        if evaluated.is_empty() || self.genomes.is_empty() {
            self.genomes.clear();
            return self.genesis();
        }

        // rank the flown genomes by the fitness their candidates earned
        let mut ranked: Vec<(f32, Brain)> = std::mem::take(&mut self.genomes)
            .into_iter()
            .filter_map(|(id, brain)| {
                evaluated
                    .iter()
                    .find(|candidate| candidate.id == id)
                    .map(|candidate| (candidate.fitness, brain))
            })
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        if ranked.is_empty() {
            return self.genesis();
        }

        let parent_count = ((ranked.len() as f32 * self.params.parent_fraction).ceil() as usize)
            .clamp(1, ranked.len());
        let mut population = Vec::with_capacity(self.params.population_size);

        // elites fly again unchanged
        let elites = self.params.elite_count.min(self.params.population_size);
        for (_, brain) in ranked.iter().take(elites) {
            let clone = brain.clone();
            population.push(self.issue(clone));
        }

        while population.len() < self.params.population_size {
            let breed_sexually = parent_count >= 2
                && rand::rng().random::<f32>() < self.params.crossover_prob;
            let mut child = if breed_sexually {
                let first = rand::rng().random_range(0..parent_count);
                let mut second = rand::rng().random_range(0..parent_count);
                while second == first {
                    second = rand::rng().random_range(0..parent_count);
                }
                Brain::crossover(&ranked[first].1, &ranked[second].1)
            } else {
                ranked[rand::rng().random_range(0..parent_count)].1.clone()
            };
            child.mutate(sample_mutation_scale(&self.params));
            population.push(self.issue(child));
        }

        population
    }

    fn converged(&self, evaluated: &[Candidate]) -> bool {
        self.params.fitness_target > 0.0
            && evaluated
                .iter()
                .any(|candidate| candidate.fitness >= self.params.fitness_target)
    }
}

/// Samples a mutation scale log-uniformly from the configured range.
fn sample_mutation_scale(params: &Params) -> f32 {
    let log_min = params.mutation_scale_min.ln();
    let log_max = params.mutation_scale_max.ln();
    rand::rng().random_range(log_min..log_max).exp()
}
