//! Gates: paired barriers with a flyable gap.
//!
//! A gate is two vertical barriers sharing one x position, one hanging
//! from the ceiling and one rising from the ground, separated by a gap.
//! Gates scroll left at the course speed and are dropped once fully
//! off screen.

use geo::{Intersects, Rect};

use super::params::Params;

/// One obstacle pair.
#[derive(Debug, Clone)]
pub struct Gate {
    /// Leading (left) edge of both barriers.
    pub x: f32,
    /// Vertical center of the gap.
    pub gap_center: f32,
    /// Whether this gate has already paid out its pass bonus.
    pub scored: bool,
}

impl Gate {
    /// Creates an unscored gate at the given leading edge.
    pub fn new(x: f32, gap_center: f32) -> Self {
        Self {
            x,
            gap_center,
            scored: false,
        }
    }

    /// Scrolls the gate left by one tick of course movement.
    pub fn advance(&mut self, params: &Params) {
        self.x -= params.scroll_speed;
    }

    /// Trailing (right) edge of both barriers.
    pub fn right_edge(&self, params: &Params) -> f32 {
        self.x + params.gate_width
    }

    /// Whether the gate has fully scrolled off the left edge.
    pub fn is_offscreen(&self, params: &Params) -> bool {
        self.right_edge(params) < 0.0
    }

    /// Bottom edge of the upper barrier.
    pub fn gap_top(&self, params: &Params) -> f32 {
        self.gap_center - params.gap_height / 2.0
    }

    /// Top edge of the lower barrier.
    pub fn gap_bottom(&self, params: &Params) -> f32 {
        self.gap_center + params.gap_height / 2.0
    }

    /// Collision box of the barrier hanging above the gap.
    pub fn upper_rect(&self, params: &Params) -> Rect<f32> {
        Rect::new(
            (self.x, self.gap_top(params) - params.screen_height),
            (self.right_edge(params), self.gap_top(params)),
        )
    }

    /// Collision box of the barrier rising below the gap.
    pub fn lower_rect(&self, params: &Params) -> Rect<f32> {
        Rect::new(
            (self.x, self.gap_bottom(params)),
            (self.right_edge(params), self.gap_bottom(params) + params.screen_height),
        )
    }

    /// Whether a bird's collision box touches either barrier.
    pub fn clips(&self, bird_rect: &Rect<f32>, params: &Params) -> bool {
        self.upper_rect(params).intersects(bird_rect)
            || self.lower_rect(params).intersects(bird_rect)
    }
}
