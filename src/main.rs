use macroquad::prelude::*;

use aviary::simulation::brain::WeightEvolution;
use aviary::simulation::evolution::{Evolution, Halt};
use aviary::simulation::params::Params;

mod graphics;
mod ui;

const PARAMS_FILE: &str = "aviary_params.json";

fn window_conf() -> Conf {
    let params = Params::default();
    Conf {
        window_title: "Aviary - Flight Trainer".to_owned(),
        window_width: params.screen_width as i32,
        window_height: params.screen_height as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut params = if std::path::Path::new(PARAMS_FILE).exists() {
        match Params::load_from_file(PARAMS_FILE) {
            Ok(params) => {
                println!("loaded params from {PARAMS_FILE}");
                params
            }
            Err(err) => {
                println!("could not load {PARAMS_FILE}: {err}");
                Params::default()
            }
        }
    } else {
        Params::default()
    };

    let mut genesis = true;
    let mut setup_error: Option<String> = None;
    let mut evolution: Option<Evolution<WeightEvolution>> = None;
    let mut ui_state = ui::UIState::new();
    let mut ground_scroll = 0.0f32;

    println!("Starting flight trainer");

    loop {
        // closing the window or pressing Escape ends the whole run
        if is_key_down(KeyCode::Escape) {
            break;
        }

        if genesis {
            if ui::draw_genesis_screen(&mut params, setup_error.as_deref()) {
                match Evolution::new(WeightEvolution::new(&params), &params) {
                    Ok(fresh) => {
                        evolution = Some(fresh);
                        setup_error = None;
                        genesis = false;
                    }
                    Err(err) => {
                        println!("setup failed: {err}");
                        setup_error = Some(err.to_string());
                    }
                }
            }
            next_frame().await;
            continue;
        }

        clear_background(SKYBLUE);

        if let Some(ref mut evolution) = evolution {
            if !ui_state.paused {
                for _ in 0..ui_state.ticks_per_frame {
                    if evolution.halted().is_some() {
                        break;
                    }
                    evolution.tick(&params);
                }
                ground_scroll -= params.scroll_speed * ui_state.ticks_per_frame as f32;
                if ground_scroll.abs() > graphics::GROUND_TILE {
                    ground_scroll = 0.0;
                }
            }

            if let Some(run) = evolution.current_run() {
                graphics::draw_gates(run, &params);
                graphics::draw_ground(ground_scroll, &params);
                graphics::draw_birds(run, &params);
                graphics::draw_hud(run.score, evolution.generation, run.entrants.len());
            } else {
                graphics::draw_ground(ground_scroll, &params);
                let banner = match evolution.halted() {
                    Some(Halt::Converged) => "Converged - press Escape to quit",
                    Some(Halt::Aborted) => "Aborted - press Escape to quit",
                    _ => "Training complete - press Escape to quit",
                };
                graphics::draw_banner(banner);
            }

            ui::draw_ui(&mut ui_state, evolution, &mut params);

            if ui_state.save_requested {
                ui_state.save_requested = false;
                let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                let path = format!("aviary_params_{stamp}.json");
                match params.save_to_file(&path) {
                    Ok(()) => ui_state.status_message = Some(format!("Saved {path}")),
                    Err(err) => ui_state.status_message = Some(format!("Save failed: {err}")),
                }
            }
        }

        ui::process_egui();

        next_frame().await;
    }
}
