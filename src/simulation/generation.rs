//! One generation's shared flight through the course.
//!
//! Every candidate's bird enters the same scrolling course at the same
//! instant and experiences identical gates. The run keeps birds in
//! lockstep: one tick advances physics, decisions, spawning, scrolling,
//! collisions, scoring, and bounds checks for the whole population.

use geo::Rect;
use rayon::prelude::*;

use super::bird::Bird;
use super::controller::{Candidate, Senses};
use super::gate::Gate;
use super::params::Params;
use super::spawner;

/// One candidate flying the course, tied to its starting slot so the
/// evaluated population can be handed back in the order it arrived.
#[derive(Debug)]
pub struct Entrant {
    /// Index of the candidate in the population the run started with.
    pub slot: usize,
    /// The entrant's flight state.
    pub bird: Bird,
    /// The controller being evaluated, with its running fitness.
    pub candidate: Candidate,
}

/// A single generation's evaluation run.
#[derive(Debug)]
pub struct GenerationRun {
    /// Entrants still flying, in stable slot order.
    pub entrants: Vec<Entrant>,
    /// Entrants removed from the course, in removal order.
    pub retired: Vec<Entrant>,
    /// Gates currently on course, oldest (leftmost) first.
    pub gates: Vec<Gate>,
    /// Gates passed by the population this run.
    pub score: u32,
    /// Ticks elapsed since the run started.
    pub ticks: u64,
    /// Simulated milliseconds elapsed since the run started.
    pub elapsed_ms: f32,
    last_spawn_ms: f32,
}

impl GenerationRun {
    /// Starts a run with every candidate's bird on the midline and an
    /// empty course. Fitness accumulators are reset to zero.
    pub fn new(population: Vec<Candidate>, params: &Params) -> Self {
        let entrants = population
            .into_iter()
            .enumerate()
            .map(|(slot, mut candidate)| {
                candidate.fitness = 0.0;
                Entrant {
                    slot,
                    bird: Bird::new(params),
                    candidate,
                }
            })
            .collect();
        Self {
            entrants,
            retired: Vec::new(),
            gates: Vec::new(),
            score: 0,
            ticks: 0,
            elapsed_ms: 0.0,
            last_spawn_ms: spawner::initial_spawn_deadline(params),
        }
    }

    /// Advances the whole generation by one tick:
    ///
    /// 1. Advance the simulated clock.
    /// 2. Pick the gate controllers steer by.
    /// 3. Per entrant (parallel): physics, survival reward, decision.
    /// 4. Spawn a gate when the interval has elapsed.
    /// 5. Scroll gates, drop the ones fully off screen.
    /// 6. Retire birds that clip a barrier, with a fitness penalty.
    /// 7. Score gates whose trailing edge passed the bird column.
    /// 8. Retire birds outside the flight bounds, without penalty.
    pub fn tick(&mut self, params: &Params) {
        self.ticks += 1;
        self.elapsed_ms += params.tick_ms;

        let steering = self.steering_gate_index(params).map(|index| &self.gates[index]);

        // parallel phase: each entrant only touches its own state
        self.entrants.par_iter_mut().for_each(|entrant| {
            entrant.bird.advance(params);
            entrant.candidate.fitness += params.tick_reward;
            if let Some(gate) = steering {
                let senses = Senses::observe(&entrant.bird, gate, params);
                if entrant.candidate.controller.decide(&senses) > params.flap_threshold {
                    entrant.bird.flap(params);
                }
            }
        });

        if let Some(gate) = spawner::maybe_spawn(self.elapsed_ms, self.last_spawn_ms, params) {
            self.gates.push(gate);
            self.last_spawn_ms = self.elapsed_ms;
        }

        for gate in &mut self.gates {
            gate.advance(params);
        }
        self.gates.retain(|gate| !gate.is_offscreen(params));

        // collision pass: mark first, retire once, penalize once
        let rects: Vec<Rect<f32>> = self.entrants.iter().map(|e| e.bird.rect(params)).collect();
        let mut clipped = vec![false; self.entrants.len()];
        for gate in &self.gates {
            for (index, rect) in rects.iter().enumerate() {
                if !clipped[index] && gate.clips(rect, params) {
                    clipped[index] = true;
                }
            }
        }
        self.retire_marked(&clipped, params.collision_penalty);

        // scoring pass: each gate pays out once, to birds still flying
        for gate in &mut self.gates {
            if !gate.scored && gate.right_edge(params) < params.bird_x {
                gate.scored = true;
                self.score += 1;
                for entrant in &mut self.entrants {
                    entrant.candidate.fitness += params.pass_reward;
                }
            }
        }

        // bounds pass: leaving the flight band carries no penalty
        let out: Vec<bool> = self
            .entrants
            .iter()
            .map(|entrant| entrant.bird.out_of_bounds(params))
            .collect();
        self.retire_marked(&out, 0.0);
    }

    /// Index of the gate controllers steer by. Normally the oldest gate
    /// on course; once the bird column is well past its trailing edge,
    /// the next gate takes over.
    fn steering_gate_index(&self, params: &Params) -> Option<usize> {
        if self.gates.is_empty() {
            return None;
        }
        let first_passed =
            params.bird_x > self.gates[0].right_edge(params) + params.lookahead_margin;
        if self.gates.len() > 1 && first_passed {
            Some(1)
        } else {
            Some(0)
        }
    }

    /// Moves every marked entrant to the retired list, in slot order,
    /// subtracting the penalty once per retired bird.
    fn retire_marked(&mut self, marked: &[bool], penalty: f32) {
        if !marked.contains(&true) {
            return;
        }
        let mut flying = Vec::with_capacity(self.entrants.len());
        for (index, mut entrant) in std::mem::take(&mut self.entrants).into_iter().enumerate() {
            if marked[index] {
                entrant.candidate.fitness -= penalty;
                entrant.bird.kill();
                self.retired.push(entrant);
            } else {
                flying.push(entrant);
            }
        }
        self.entrants = flying;
    }

    /// Whether the generation is over: every bird retired, or the
    /// optional tick limit was reached.
    pub fn is_complete(&self, params: &Params) -> bool {
        self.entrants.is_empty() || (params.tick_limit > 0 && self.ticks >= params.tick_limit)
    }

    /// Ends the run and hands back every candidate, flying or retired,
    /// in the slot order the population arrived in.
    pub fn finish(self) -> Vec<Candidate> {
        let mut all: Vec<Entrant> = self.retired;
        all.extend(self.entrants);
        all.sort_by_key(|entrant| entrant.slot);
        all.into_iter().map(|entrant| entrant.candidate).collect()
    }
}
