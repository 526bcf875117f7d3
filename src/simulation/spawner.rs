//! Timed gate spawning.

use rand::Rng;

use super::gate::Gate;
use super::params::Params;

/// Spawn deadline that makes the first gate appear on the first tick.
pub fn initial_spawn_deadline(params: &Params) -> f32 {
    -params.spawn_interval_ms
}

/// Emits a fresh gate at the right screen edge once the spawn interval
/// has elapsed since the last spawn. The gap center is jittered
/// uniformly around the vertical midline.
pub fn maybe_spawn(elapsed_ms: f32, last_spawn_ms: f32, params: &Params) -> Option<Gate> {
    if elapsed_ms - last_spawn_ms <= params.spawn_interval_ms {
        return None;
    }
    let jitter = rand::rng().random_range(-params.gap_jitter..=params.gap_jitter);
    Some(Gate::new(params.screen_width, params.screen_height / 2.0 + jitter))
}
