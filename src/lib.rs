//! # Aviary - Neuroevolution Flight Trainer
//!
//! Trains populations of controller-steered birds to fly a scrolling
//! obstacle course. Every generation flies the same course in lockstep,
//! fitness accrues for survival and gate passes, and a pluggable
//! optimizer breeds the next population from the results.
//!
//! ## Features
//!
//! - Flap-or-glide flight physics with gravity and terminal velocity
//! - Timed gate spawning with randomized gap placement
//! - Lockstep generation runs with parallel controller decisions
//! - Built-in weight-evolution optimizer (MLP brains, mutation, crossover)
//! - Real-time visualization with egui/macroquad
//! - JSON parameter persistence
//!
//! ## Core Modules
//!
//! - [`simulation::bird`] - Bird flight state and physics
//! - [`simulation::gate`] - Obstacle pairs and collision boxes
//! - [`simulation::generation`] - One generation's shared course run
//! - [`simulation::evolution`] - Generational training driver
//! - [`simulation::brain`] - Built-in neuroevolution optimizer
//! - [`simulation::controller`] - The course/controller boundary

/// Core simulation logic and data structures.
pub mod simulation {
    /// A single bird's flight state and physics.
    pub mod bird;
    /// Built-in neuroevolution optimizer and its MLP brains.
    pub mod brain;
    /// The boundary between the course and bird controllers.
    pub mod controller;
    /// Generational training driver and the optimizer boundary.
    pub mod evolution;
    /// Gates: paired barriers with a flyable gap.
    pub mod gate;
    /// One generation's shared flight through the course.
    pub mod generation;
    /// Simulation and training parameters.
    pub mod params;
    /// Timed gate spawning.
    pub mod spawner;
}
