//! A single bird's flight state.
//!
//! Birds never move horizontally. The course scrolls past them while
//! gravity and flap impulses move them vertically.

use geo::Rect;

use super::params::Params;

/// Vertical flight state of one bird.
#[derive(Debug, Clone)]
pub struct Bird {
    /// Vertical position of the bird's center.
    pub y: f32,
    /// Vertical velocity (positive = falling).
    pub velocity: f32,
    /// Whether the bird is still in the running generation.
    pub alive: bool,
    /// Ticks since the bird entered the course, drives the wing cycle.
    pub anim_ticks: u64,
}

impl Bird {
    /// Creates a bird at rest on the vertical midline.
    pub fn new(params: &Params) -> Self {
        Self {
            y: params.screen_height / 2.0,
            velocity: 0.0,
            alive: true,
            anim_ticks: 0,
        }
    }

    /// Advances one tick of flight: gravity accelerates the bird up to
    /// terminal velocity, and the position integrates only while the
    /// bird is above the ground line.
    pub fn advance(&mut self, params: &Params) {
        self.velocity += params.gravity;
        if self.velocity > params.terminal_velocity {
            self.velocity = params.terminal_velocity;
        }
        if self.bottom(params) < params.ground_y {
            self.y += self.velocity;
        }
        self.anim_ticks += 1;
    }

    /// Replaces the current velocity with the upward flap impulse.
    pub fn flap(&mut self, params: &Params) {
        self.velocity = params.flap_impulse;
    }

    /// Marks the bird as out of the running generation.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Top edge of the collision box.
    pub fn top(&self, params: &Params) -> f32 {
        self.y - params.bird_height / 2.0
    }

    /// Bottom edge of the collision box.
    pub fn bottom(&self, params: &Params) -> f32 {
        self.y + params.bird_height / 2.0
    }

    /// Collision box centered on the shared bird column.
    pub fn rect(&self, params: &Params) -> Rect<f32> {
        Rect::new(
            (params.bird_x - params.bird_width / 2.0, self.top(params)),
            (params.bird_x + params.bird_width / 2.0, self.bottom(params)),
        )
    }

    /// Whether the bird has left the playable band between the ceiling
    /// and the ground line.
    pub fn out_of_bounds(&self, params: &Params) -> bool {
        self.top(params) <= 0.0 || self.bottom(params) >= params.ground_y
    }

    /// Current wing sprite frame (0..3), cycling every few ticks.
    pub fn wing_frame(&self) -> usize {
        (self.anim_ticks / 5) as usize % 3
    }

    /// Nose tilt in degrees, pitched by the current velocity.
    pub fn tilt_degrees(&self) -> f32 {
        self.velocity * -2.0
    }
}
