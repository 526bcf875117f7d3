//! The boundary between the course and whatever steers a bird.
//!
//! The course only ever hands a controller a fixed sensory snapshot and
//! reads back a single scalar decision. Everything else about the
//! controller (network topology, genome, heuristics) stays opaque, so
//! optimizers can be swapped without touching the course.

use std::fmt;

use super::bird::Bird;
use super::gate::Gate;
use super::params::Params;

/// Number of sensory inputs handed to a controller each tick.
pub const NUM_SENSES: usize = 3;

/// Number of decision outputs read back from a controller.
pub const NUM_DECISIONS: usize = 1;

/// Sensory snapshot of one bird relative to the gate it is steering by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Senses {
    /// The bird's vertical position.
    pub altitude: f32,
    /// Vertical distance from the bird to the gap's top edge.
    pub gap_top_distance: f32,
    /// Vertical distance from the bird to the gap's bottom edge.
    pub gap_bottom_distance: f32,
}

impl Senses {
    /// Reads the three senses off a bird and its active gate.
    pub fn observe(bird: &Bird, gate: &Gate, params: &Params) -> Self {
        Self {
            altitude: bird.y,
            gap_top_distance: (bird.y - gate.gap_top(params)).abs(),
            gap_bottom_distance: (bird.y - gate.gap_bottom(params)).abs(),
        }
    }
}

/// Steers one bird. Called once per tick while a gate is on course.
///
/// A decision above the flap threshold makes the bird flap; anything
/// else glides. Controllers may carry mutable state between calls.
pub trait Controller: Send {
    /// Maps the current senses to a flap decision.
    fn decide(&mut self, senses: &Senses) -> f32;
}

/// One controller under evaluation, with its accumulated fitness.
pub struct Candidate {
    /// Stable identifier assigned by the optimizer.
    pub id: u64,
    /// Fitness accumulated over the current generation.
    pub fitness: f32,
    /// The controller being scored.
    pub controller: Box<dyn Controller>,
}

impl Candidate {
    /// Wraps a controller with zeroed fitness.
    pub fn new(id: u64, controller: Box<dyn Controller>) -> Self {
        Self {
            id,
            fitness: 0.0,
            controller,
        }
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("id", &self.id)
            .field("fitness", &self.fitness)
            .finish_non_exhaustive()
    }
}
