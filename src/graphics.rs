use aviary::simulation::generation::GenerationRun;
use aviary::simulation::params::Params;
use geo::Rect;
use macroquad::prelude::*;

pub const GROUND_TILE: f32 = 35.0;

const BARRIER: Color = Color::new(0.25, 0.62, 0.25, 1.0);
const BARRIER_LIP: Color = Color::new(0.18, 0.48, 0.18, 1.0);
const BODY: Color = Color::new(1.0, 0.78, 0.24, 1.0);
const WING: Color = Color::new(0.92, 0.66, 0.16, 1.0);
const BEAK: Color = Color::new(0.90, 0.43, 0.12, 1.0);
const SAND: Color = Color::new(0.87, 0.84, 0.58, 1.0);
const SAND_STRIPE: Color = Color::new(0.76, 0.70, 0.42, 1.0);

fn draw_barrier(rect: &Rect<f32>) {
    draw_rectangle(
        rect.min().x,
        rect.min().y,
        rect.width(),
        rect.height(),
        BARRIER,
    );
}

pub fn draw_gates(run: &GenerationRun, params: &Params) {
    for gate in &run.gates {
        draw_barrier(&gate.upper_rect(params));
        draw_barrier(&gate.lower_rect(params));

        // lips framing the gap
        let lip_w = params.gate_width + 8.0;
        let lip_x = gate.x - 4.0;
        draw_rectangle(lip_x, gate.gap_top(params) - 24.0, lip_w, 24.0, BARRIER_LIP);
        draw_rectangle(lip_x, gate.gap_bottom(params), lip_w, 24.0, BARRIER_LIP);
    }
}

pub fn draw_birds(run: &GenerationRun, params: &Params) {
    for entrant in &run.entrants {
        let bird = &entrant.bird;
        let x = params.bird_x;
        let body = params.bird_height / 2.0;

        draw_circle(x, bird.y, body, BODY);

        // wing cycles through three positions
        let wing_offset = match bird.wing_frame() {
            0 => -4.0,
            1 => 0.0,
            _ => 4.0,
        };
        draw_rectangle(x - 11.0, bird.y + wing_offset - 2.0, 12.0, 5.0, WING);

        // beak pitches with the current velocity
        let tilt = bird.tilt_degrees().to_radians();
        draw_line(
            x + body - 2.0,
            bird.y,
            x + body - 2.0 + 9.0 * tilt.cos(),
            bird.y - 9.0 * tilt.sin(),
            3.0,
            BEAK,
        );

        draw_circle(x + 4.0, bird.y - 4.0, 2.0, BLACK);
    }
}

pub fn draw_ground(scroll: f32, params: &Params) {
    draw_rectangle(
        0.0,
        params.ground_y,
        params.screen_width,
        params.screen_height - params.ground_y,
        SAND,
    );

    // stripes scroll with the course
    let mut x = scroll;
    while x < params.screen_width {
        draw_line(
            x,
            params.ground_y,
            x + 14.0,
            params.screen_height,
            4.0,
            SAND_STRIPE,
        );
        x += GROUND_TILE;
    }

    draw_line(
        0.0,
        params.ground_y,
        params.screen_width,
        params.ground_y,
        3.0,
        DARKBROWN,
    );
}

pub fn draw_hud(score: u32, generation: u32, alive: usize) {
    draw_text(&format!("Score: {score}"), 10.0, 50.0, 48.0, WHITE);
    draw_text(&format!("Gen: {generation}"), 10.0, 100.0, 48.0, WHITE);
    draw_text(&format!("Alive: {alive}"), 10.0, 150.0, 48.0, WHITE);
}

pub fn draw_banner(text: &str) {
    let size = measure_text(text, None, 56, 1.0);
    draw_text(
        text,
        screen_width() / 2.0 - size.width / 2.0,
        screen_height() / 2.0,
        56.0,
        WHITE,
    );
}
