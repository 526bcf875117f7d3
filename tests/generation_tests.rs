#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::sync::{Arc, Mutex};

use aviary::simulation::controller::{Candidate, Controller, Senses};
use aviary::simulation::gate::Gate;
use aviary::simulation::generation::GenerationRun;
use aviary::simulation::params::Params;

fn create_test_params() -> Params {
    Params {
        gap_jitter: 0.0,
        ..Params::default()
    }
}

/// Never flaps, just rides gravity down.
struct Glider;

impl Controller for Glider {
    fn decide(&mut self, _senses: &Senses) -> f32 {
        0.0
    }
}

/// Flaps on every decision and climbs straight out of the course.
struct Rocket;

impl Controller for Rocket {
    fn decide(&mut self, _senses: &Senses) -> f32 {
        1.0
    }
}

/// Flaps whenever the gap's bottom edge gets too close underneath.
struct BottomEdgeFlapper {
    margin: f32,
}

impl Controller for BottomEdgeFlapper {
    fn decide(&mut self, senses: &Senses) -> f32 {
        if senses.gap_bottom_distance < self.margin {
            1.0
        } else {
            0.0
        }
    }
}

/// Holds an altitude band high above the gaps, straight into the barriers.
struct HighHover {
    ceiling: f32,
}

impl Controller for HighHover {
    fn decide(&mut self, senses: &Senses) -> f32 {
        if senses.altitude > self.ceiling {
            1.0
        } else {
            0.0
        }
    }
}

/// Records every sense sample it is handed, never flaps.
struct Recorder {
    log: Arc<Mutex<Vec<Senses>>>,
}

impl Controller for Recorder {
    fn decide(&mut self, senses: &Senses) -> f32 {
        self.log.lock().unwrap().push(*senses);
        0.0
    }
}

fn single(controller: impl Controller + 'static) -> Vec<Candidate> {
    vec![Candidate::new(0, Box::new(controller))]
}

#[test]
fn test_run_starts_with_the_full_population_on_the_midline() {
    let params = create_test_params();
    let run = GenerationRun::new(
        vec![
            Candidate::new(0, Box::new(Glider)),
            Candidate::new(1, Box::new(Glider)),
            Candidate::new(2, Box::new(Glider)),
        ],
        &params,
    );

    assert_eq!(run.entrants.len(), 3);
    assert_eq!(run.retired.len(), 0);
    assert_eq!(run.score, 0);
    assert_eq!(run.ticks, 0);
    assert!(run.gates.is_empty());
    for entrant in &run.entrants {
        assert_eq!(entrant.bird.y, params.screen_height / 2.0);
        assert_eq!(entrant.candidate.fitness, 0.0);
    }
}

#[test]
fn test_fitness_accumulators_reset_between_runs() {
    let params = create_test_params();
    let mut stale = Candidate::new(7, Box::new(Glider));
    stale.fitness = 123.0;

    let run = GenerationRun::new(vec![stale], &params);
    assert_eq!(run.entrants[0].candidate.fitness, 0.0);
}

#[test]
fn test_every_entrant_is_accounted_for_each_tick() {
    let params = create_test_params();
    let mut run = GenerationRun::new(
        vec![
            Candidate::new(0, Box::new(Rocket)),
            Candidate::new(1, Box::new(Glider)),
            Candidate::new(2, Box::new(Glider)),
        ],
        &params,
    );

    while !run.is_complete(&params) {
        run.tick(&params);
        assert_eq!(run.entrants.len() + run.retired.len(), 3);
        assert!(run.ticks < 10_000, "course without survivors must end");
    }
    assert!(run.entrants.is_empty());
}

#[test]
fn test_finish_returns_candidates_in_slot_order() {
    let params = create_test_params();
    let mut run = GenerationRun::new(
        vec![
            Candidate::new(10, Box::new(Rocket)),
            Candidate::new(11, Box::new(Glider)),
            Candidate::new(12, Box::new(Rocket)),
        ],
        &params,
    );

    // the glider grounds out first, the rockets leave the top later; the
    // evaluated list must come back in issue order regardless
    while !run.is_complete(&params) {
        run.tick(&params);
    }
    let evaluated = run.finish();

    let ids: Vec<u64> = evaluated.iter().map(|candidate| candidate.id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
}

#[test]
fn test_gliding_bird_earns_survival_reward_until_the_ground() {
    let params = create_test_params();
    let mut run = GenerationRun::new(single(Glider), &params);

    while !run.is_complete(&params) {
        run.tick(&params);
    }

    // falls from the midline and grounds out long before reaching a gate
    assert_eq!(run.score, 0);
    assert!(run.ticks > 30 && run.ticks < 60);

    let ticks = run.ticks;
    let evaluated = run.finish();
    let expected = params.tick_reward * ticks as f32;
    assert!((evaluated[0].fitness - expected).abs() < 1e-3);
    assert!(!evaluated[0].fitness.is_nan());
}

#[test]
fn test_leaving_the_flight_band_carries_no_penalty() {
    let params = create_test_params();
    let mut run = GenerationRun::new(single(Rocket), &params);

    while !run.is_complete(&params) {
        run.tick(&params);
    }

    let ticks = run.ticks;
    let evaluated = run.finish();
    // ceiling exits retire the bird but never subtract fitness
    let expected = params.tick_reward * ticks as f32;
    assert!((evaluated[0].fitness - expected).abs() < 1e-3);
}

#[test]
fn test_bottom_edge_flapper_clears_gates_and_scores() {
    let mut params = create_test_params();
    params.gap_height = 300.0;
    params.tick_limit = 400;

    let mut run = GenerationRun::new(single(BottomEdgeFlapper { margin: 100.0 }), &params);

    while !run.is_complete(&params) {
        run.tick(&params);
    }

    assert_eq!(run.entrants.len(), 1, "the flapper should still be flying");
    assert!(run.score >= 1, "at least one gate must be passed");

    let score = run.score;
    let ticks = run.ticks;
    let evaluated = run.finish();
    let expected = params.tick_reward * ticks as f32 + params.pass_reward * score as f32;
    assert!((evaluated[0].fitness - expected).abs() < 1e-2);
}

#[test]
fn test_score_never_decreases_and_pays_once_per_gate() {
    let mut params = create_test_params();
    params.gap_height = 300.0;
    params.tick_limit = 700;

    let mut run = GenerationRun::new(single(BottomEdgeFlapper { margin: 100.0 }), &params);

    let mut last_score = 0;
    while !run.is_complete(&params) {
        run.tick(&params);
        assert!(run.score >= last_score);
        assert!(run.score - last_score <= 1, "gates pay out one at a time");
        last_score = run.score;
    }

    assert!(run.score >= 2);

    let score = run.score;
    let ticks = run.ticks;
    let evaluated = run.finish();
    let expected = params.tick_reward * ticks as f32 + params.pass_reward * score as f32;
    assert!((evaluated[0].fitness - expected).abs() < 1e-2);
}

#[test]
fn test_collision_and_survival_split_the_rewards() {
    let mut params = create_test_params();
    params.gap_height = 300.0;
    params.tick_limit = 260;

    let mut run = GenerationRun::new(
        vec![
            Candidate::new(0, Box::new(HighHover { ceiling: 250.0 })),
            Candidate::new(1, Box::new(BottomEdgeFlapper { margin: 100.0 })),
        ],
        &params,
    );

    while !run.is_complete(&params) {
        run.tick(&params);
    }

    // the hoverer flies into the first gate's upper barrier, the flapper
    // threads the gap and is still airborne at the limit
    assert_eq!(run.entrants.len(), 1);
    assert_eq!(run.entrants[0].slot, 1);
    assert_eq!(run.retired.len(), 1);
    assert!(!run.retired[0].bird.alive);
    assert_eq!(run.score, 1);

    let ticks = run.ticks;
    let evaluated = run.finish();

    // the survivor collected every tick plus the gate bonus
    let survivor = params.tick_reward * ticks as f32 + params.pass_reward;
    assert!((evaluated[1].fitness - survivor).abs() < 1e-2);

    // the hoverer hits the barrier the first tick the gate reaches the bird
    // column, pays the penalty and misses the bonus
    let collision_tick = 187.0;
    let collider = params.tick_reward * collision_tick - params.collision_penalty;
    assert!((evaluated[0].fitness - collider).abs() < 1e-2);
    assert!(evaluated[0].fitness < evaluated[1].fitness);
}

#[test]
fn test_tick_limit_ends_a_generation_early() {
    let mut params = create_test_params();
    params.tick_limit = 25;

    let mut run = GenerationRun::new(single(Glider), &params);
    while !run.is_complete(&params) {
        run.tick(&params);
    }

    assert_eq!(run.ticks, 25);
    assert_eq!(run.entrants.len(), 1, "the glider is still airborne at the limit");
}

#[test]
fn test_steering_hands_over_to_the_next_gate() {
    let mut params = create_test_params();
    params.spawn_interval_ms = 1e9;
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut run = GenerationRun::new(
        vec![Candidate::new(
            0,
            Box::new(Recorder {
                log: Arc::clone(&log),
            }),
        )],
        &params,
    );
    run.gates.push(Gate::new(300.0, 400.0));
    run.gates.push(Gate::new(600.0, 500.0));

    // first gate still ahead of the bird column, so it does the steering
    run.tick(&params);
    let y = run.entrants[0].bird.y;
    {
        let log = log.lock().unwrap();
        let expected = (y - (400.0 - params.gap_height / 2.0)).abs();
        assert!((log[0].gap_top_distance - expected).abs() < 1e-3);
    }

    // drop the first gate behind the column plus the lookahead margin: the
    // second gate takes over the steering while the first is still on course
    run.gates[0].x = -50.0;
    run.tick(&params);
    let y = run.entrants[0].bird.y;
    let log = log.lock().unwrap();
    let expected = (y - (500.0 - params.gap_height / 2.0)).abs();
    assert!((log[1].gap_top_distance - expected).abs() < 1e-3);
}

#[test]
fn test_colliding_while_grounded_retires_once_with_one_penalty() {
    let mut params = create_test_params();
    params.spawn_interval_ms = 1e9;

    let mut run = GenerationRun::new(single(Glider), &params);
    run.gates.push(Gate::new(params.bird_x, params.screen_height / 2.0));
    run.entrants[0].bird.y = params.ground_y - 5.0;

    // the bird is inside the lower barrier and past the ground line at once
    run.tick(&params);

    assert!(run.entrants.is_empty());
    assert_eq!(run.retired.len(), 1);

    let evaluated = run.finish();
    let expected = params.tick_reward - params.collision_penalty;
    assert!((evaluated[0].fitness - expected).abs() < 1e-4);
}

#[test]
fn test_overlapping_gates_still_cost_one_penalty() {
    let mut params = create_test_params();
    params.spawn_interval_ms = 1e9;

    let mut run = GenerationRun::new(single(Glider), &params);
    run.gates.push(Gate::new(params.bird_x - 10.0, 300.0));
    run.gates.push(Gate::new(params.bird_x, 300.0));
    run.entrants[0].bird.y = 700.0;

    run.tick(&params);

    assert_eq!(run.retired.len(), 1);
    let evaluated = run.finish();
    let expected = params.tick_reward - params.collision_penalty;
    assert!((evaluated[0].fitness - expected).abs() < 1e-4);
}

#[test]
fn test_pass_bonus_skips_birds_that_died_this_tick() {
    let mut params = create_test_params();
    params.spawn_interval_ms = 1e9;

    let mut run = GenerationRun::new(single(Glider), &params);
    // one more advance and this gate clears the column, but its lower barrier
    // still catches the bird on the way out
    run.gates.push(Gate::new(39.0, 300.0));
    run.entrants[0].bird.y = 700.0;

    run.tick(&params);

    assert_eq!(run.score, 1);
    assert!(run.entrants.is_empty());

    let evaluated = run.finish();
    let expected = params.tick_reward - params.collision_penalty;
    assert!((evaluated[0].fitness - expected).abs() < 1e-4);
}
