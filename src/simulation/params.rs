//! Simulation and training parameters.
//!
//! Every tunable constant of the course, the flight physics, and the
//! training run lives here so the binary can expose them as sliders and
//! persist them as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::controller::{NUM_DECISIONS, NUM_SENSES};

/// Errors raised when loading or validating parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// The params file could not be read or written.
    #[error("params file error: {0}")]
    Io(#[from] std::io::Error),
    /// The params file was not valid JSON for this schema.
    #[error("params parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field (or combination of fields) is out of range.
    #[error("invalid params: {0}")]
    Invalid(&'static str),
}

/// Parameters that control the course, the birds, and the training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Playfield width in course units.
    pub screen_width: f32,
    /// Playfield height in course units.
    pub screen_height: f32,
    /// Vertical position of the ground line (lower flight bound).
    pub ground_y: f32,
    /// Fixed horizontal column all birds fly in.
    pub bird_x: f32,
    /// Bird collision box width.
    pub bird_width: f32,
    /// Bird collision box height.
    pub bird_height: f32,
    /// Downward acceleration added to a bird's velocity each tick.
    pub gravity: f32,
    /// Maximum downward velocity a bird can reach.
    pub terminal_velocity: f32,
    /// Velocity assigned by a flap (negative = upward).
    pub flap_impulse: f32,
    /// Controller output above which the bird flaps.
    pub flap_threshold: f32,
    /// Horizontal distance gates travel per tick.
    pub scroll_speed: f32,
    /// Horizontal thickness of a gate's barriers.
    pub gate_width: f32,
    /// Vertical opening between a gate's two barriers.
    pub gap_height: f32,
    /// Maximum random offset of a gate's gap center from the midline.
    pub gap_jitter: f32,
    /// Simulated milliseconds between gate spawns.
    pub spawn_interval_ms: f32,
    /// Simulated milliseconds per tick.
    pub tick_ms: f32,
    /// How far past a gate's trailing edge the bird column must be
    /// before controllers are steered by the next gate instead.
    pub lookahead_margin: f32,
    /// Fitness granted to each bird for surviving one tick.
    pub tick_reward: f32,
    /// Fitness granted to each living bird when a gate is passed.
    pub pass_reward: f32,
    /// Fitness subtracted from a bird that collides with a gate.
    pub collision_penalty: f32,
    /// Number of candidates per generation.
    pub population_size: usize,
    /// Generation cap for a training run.
    pub max_generations: u32,
    /// Optional cap on a single generation's ticks (0 = unlimited).
    pub tick_limit: u64,
    /// Neural network layer dimensions for the built-in optimizer.
    pub layer_sizes: Vec<usize>,
    /// Weight range used when seeding random brains.
    pub weight_init_scale: f32,
    /// Lower bound of the log-uniform mutation scale.
    pub mutation_scale_min: f32,
    /// Upper bound of the log-uniform mutation scale.
    pub mutation_scale_max: f32,
    /// Top candidates copied unchanged into the next generation.
    pub elite_count: usize,
    /// Fraction of the ranked population eligible as parents.
    pub parent_fraction: f32,
    /// Probability that a new candidate is bred by crossover.
    pub crossover_prob: f32,
    /// Fitness at which the built-in optimizer reports convergence
    /// (0 = never converge, run all generations).
    pub fitness_target: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            screen_width: 864.0,
            screen_height: 936.0,
            ground_y: 768.0,
            bird_x: 100.0,
            bird_width: 34.0,
            bird_height: 24.0,
            gravity: 0.5,
            terminal_velocity: 8.0,
            flap_impulse: -10.0,
            flap_threshold: 0.5,
            scroll_speed: 4.0,
            gate_width: 64.0,
            gap_height: 150.0,
            gap_jitter: 100.0,
            spawn_interval_ms: 1500.0,
            tick_ms: 1000.0 / 60.0,
            lookahead_margin: 70.0,
            tick_reward: 0.1,
            pass_reward: 5.0,
            collision_penalty: 1.0,
            population_size: 50,
            max_generations: 50,
            tick_limit: 0,
            layer_sizes: vec![NUM_SENSES, 5, NUM_DECISIONS],
            weight_init_scale: 1.0,
            mutation_scale_min: 0.002,
            mutation_scale_max: 0.2,
            elite_count: 2,
            parent_fraction: 0.2,
            crossover_prob: 0.5,
            fitness_target: 0.0,
        }
    }
}

impl Params {
    /// Checks that the parameters describe a playable course and a
    /// trainable run. Called once before any generation starts.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ParamsError::Invalid("screen dimensions must be positive"));
        }
        if self.ground_y <= 0.0 || self.ground_y > self.screen_height {
            return Err(ParamsError::Invalid("ground must lie within the screen"));
        }
        if self.bird_x <= 0.0 || self.bird_x >= self.screen_width {
            return Err(ParamsError::Invalid("bird column must lie within the screen"));
        }
        if self.bird_width <= 0.0 || self.bird_height <= 0.0 {
            return Err(ParamsError::Invalid("bird collision box must be positive"));
        }
        if self.scroll_speed <= 0.0 {
            return Err(ParamsError::Invalid("scroll speed must be positive"));
        }
        if self.gate_width <= 0.0 {
            return Err(ParamsError::Invalid("gate width must be positive"));
        }
        if self.spawn_interval_ms <= 0.0 || self.tick_ms <= 0.0 {
            return Err(ParamsError::Invalid("spawn interval and tick must be positive"));
        }
        if self.gap_height <= 0.0 || self.gap_jitter < 0.0 {
            return Err(ParamsError::Invalid("gap height must be positive"));
        }
        // the widest jittered gap must still fit between the flight bounds
        let midline = self.screen_height / 2.0;
        if midline - self.gap_jitter - self.gap_height / 2.0 <= 0.0
            || midline + self.gap_jitter + self.gap_height / 2.0 >= self.ground_y
        {
            return Err(ParamsError::Invalid("gap cannot fit between the flight bounds"));
        }
        if self.population_size == 0 {
            return Err(ParamsError::Invalid("population size must be nonzero"));
        }
        if self.max_generations == 0 {
            return Err(ParamsError::Invalid("generation cap must be nonzero"));
        }
        if self.layer_sizes.len() < 2 {
            return Err(ParamsError::Invalid("network needs an input and an output layer"));
        }
        if self.layer_sizes[0] != NUM_SENSES {
            return Err(ParamsError::Invalid("network input layer must match the senses"));
        }
        if self.layer_sizes[self.layer_sizes.len() - 1] != NUM_DECISIONS {
            return Err(ParamsError::Invalid("network output layer must be a single decision"));
        }
        if !(0.0 < self.parent_fraction && self.parent_fraction <= 1.0) {
            return Err(ParamsError::Invalid("parent fraction must be in (0, 1]"));
        }
        if self.mutation_scale_min <= 0.0 || self.mutation_scale_min >= self.mutation_scale_max {
            return Err(ParamsError::Invalid("mutation scale range must be positive and ordered"));
        }
        Ok(())
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), ParamsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads parameters from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, ParamsError> {
        let json = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&json)?;
        Ok(params)
    }
}
