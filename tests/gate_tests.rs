#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use aviary::simulation::bird::Bird;
use aviary::simulation::gate::Gate;
use aviary::simulation::params::Params;
use aviary::simulation::spawner;

fn create_test_params() -> Params {
    Params {
        gap_jitter: 0.0,
        ..Params::default()
    }
}

#[test]
fn test_gap_geometry() {
    let params = create_test_params();
    let gate = Gate::new(params.screen_width, 400.0);

    assert_eq!(
        gate.gap_bottom(&params) - gate.gap_top(&params),
        params.gap_height
    );
    assert_eq!(gate.gap_top(&params), 400.0 - params.gap_height / 2.0);
    assert_eq!(
        gate.right_edge(&params),
        params.screen_width + params.gate_width
    );
    assert!(!gate.scored);
}

#[test]
fn test_barriers_frame_the_gap() {
    let params = create_test_params();
    let gate = Gate::new(300.0, 400.0);

    let upper = gate.upper_rect(&params);
    let lower = gate.lower_rect(&params);

    assert_eq!(upper.max().y, gate.gap_top(&params));
    assert_eq!(lower.min().y, gate.gap_bottom(&params));
    assert_eq!(upper.min().x, gate.x);
    assert_eq!(upper.width(), params.gate_width);
    assert_eq!(lower.width(), params.gate_width);
}

#[test]
fn test_advance_scrolls_left() {
    let params = create_test_params();
    let mut gate = Gate::new(100.0, 400.0);

    gate.advance(&params);
    assert_eq!(gate.x, 100.0 - params.scroll_speed);
    assert!(!gate.is_offscreen(&params));

    gate.x = -params.gate_width - 0.5;
    assert!(gate.is_offscreen(&params));
}

#[test]
fn test_clips_misses_a_bird_inside_the_gap() {
    let params = create_test_params();
    let mut bird = Bird::new(&params);
    // gate spanning the bird column, gap centered on the bird
    let gate = Gate::new(params.bird_x - params.gate_width / 2.0, bird.y);

    assert!(!gate.clips(&bird.rect(&params), &params));

    // nudge into the upper barrier
    bird.y = gate.gap_top(&params) - 5.0;
    assert!(gate.clips(&bird.rect(&params), &params));

    // nudge into the lower barrier
    bird.y = gate.gap_bottom(&params) + 5.0;
    assert!(gate.clips(&bird.rect(&params), &params));
}

#[test]
fn test_clips_misses_a_gate_elsewhere_on_the_course() {
    let params = create_test_params();
    let bird = Bird::new(&params);
    // barrier heights would catch the bird, but the gate is far to the right
    let gate = Gate::new(params.screen_width, 200.0);

    assert!(!gate.clips(&bird.rect(&params), &params));
}

#[test]
fn test_spawner_respects_the_interval() {
    let params = create_test_params();

    // midway through the interval nothing spawns
    assert!(spawner::maybe_spawn(500.0, 0.0, &params).is_none());

    // past the interval a gate appears at the right edge of the screen
    let gate = spawner::maybe_spawn(params.spawn_interval_ms + 1.0, 0.0, &params)
        .expect("gate should spawn after the interval");
    assert_eq!(gate.x, params.screen_width);
}

#[test]
fn test_first_spawn_deadline_is_already_due() {
    let params = create_test_params();
    let deadline = spawner::initial_spawn_deadline(&params);

    // one tick into a fresh run the first gate is due
    assert!(spawner::maybe_spawn(params.tick_ms, deadline, &params).is_some());
}

#[test]
fn test_spawned_gaps_stay_within_the_jitter_range() {
    let mut params = create_test_params();
    params.gap_jitter = 100.0;
    let midline = params.screen_height / 2.0;

    for _ in 0..50 {
        let gate = spawner::maybe_spawn(params.spawn_interval_ms * 2.0, 0.0, &params)
            .expect("gate should spawn after the interval");
        assert!(gate.gap_center >= midline - params.gap_jitter);
        assert!(gate.gap_center <= midline + params.gap_jitter);
    }
}

#[test]
fn test_zero_jitter_centers_every_gap() {
    let params = create_test_params();

    for _ in 0..10 {
        let gate = spawner::maybe_spawn(params.spawn_interval_ms * 2.0, 0.0, &params)
            .expect("gate should spawn after the interval");
        assert_eq!(gate.gap_center, params.screen_height / 2.0);
    }
}
