use aviary::simulation::brain::WeightEvolution;
use aviary::simulation::evolution::{Evolution, GenerationReport};
use aviary::simulation::params::Params;
use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};

use super::ui::UIState;

pub(super) fn draw_stats_panel(
    egui_ctx: &egui::Context,
    state: &mut UIState,
    evolution: &Evolution<WeightEvolution>,
    params: &mut Params,
) {
    egui::SidePanel::right("stats_panel")
        .default_width(state.stats_panel_width)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.heading("Training Stats");
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("💾 Save Params").clicked() {
                    state.save_requested = true;
                }
                let pause_text = if state.paused { "▶ Resume" } else { "⏸ Pause" };
                if ui.button(pause_text).clicked() {
                    state.paused = !state.paused;
                }
            });

            // Show status message if any
            if let Some(ref msg) = state.status_message {
                ui.label(msg);
            }

            ui.separator();

            ui.label("Speed");
            ui.add(
                egui::Slider::new(&mut state.ticks_per_frame, 1..=200)
                    .text("ticks/frame")
                    .logarithmic(true),
            );

            ui.separator();

            ui.label(format!(
                "Generation: {}/{}",
                evolution.generation, params.max_generations
            ));
            if let Some(run) = evolution.current_run() {
                ui.label(format!("Score: {}", run.score));
                ui.label(format!(
                    "Alive: {}/{}",
                    run.entrants.len(),
                    params.population_size
                ));
                ui.label(format!("Ticks: {}", run.ticks));
                ui.label(format!("Gates on course: {}", run.gates.len()));
            }
            if let Some(last) = evolution.history.last() {
                ui.label(format!(
                    "Last gen: score {} | best {:.1} | mean {:.1}",
                    last.score, last.best_fitness, last.mean_fitness
                ));
            }

            ui.separator();

            // Runtime parameters; course changes apply to gates spawned from now on
            ui.collapsing("⚙ Course Parameters", |ui| {
                ui.add(egui::Slider::new(&mut params.scroll_speed, 1.0..=12.0).text("Scroll Speed"));
                ui.add(
                    egui::Slider::new(&mut params.spawn_interval_ms, 500.0..=4000.0)
                        .text("Spawn Interval (ms)"),
                );
                ui.add(egui::Slider::new(&mut params.gap_height, 80.0..=300.0).text("Gap Height"));
                ui.add(egui::Slider::new(&mut params.gap_jitter, 0.0..=200.0).text("Gap Jitter"));

                ui.separator();
                ui.add(egui::Slider::new(&mut params.gravity, 0.1..=1.5).text("Gravity"));
                ui.add(
                    egui::Slider::new(&mut params.terminal_velocity, 2.0..=16.0)
                        .text("Terminal Velocity"),
                );
                ui.add(
                    egui::Slider::new(&mut params.flap_impulse, -16.0..=-4.0).text("Flap Impulse"),
                );
            });

            ui.collapsing("⚙ Reward Parameters", |ui| {
                ui.add(egui::Slider::new(&mut params.tick_reward, 0.0..=1.0).text("Survival / tick"));
                ui.add(egui::Slider::new(&mut params.pass_reward, 0.0..=20.0).text("Gate Pass"));
                ui.add(
                    egui::Slider::new(&mut params.collision_penalty, 0.0..=5.0)
                        .text("Collision Penalty"),
                );
            });

            ui.separator();

            ui.heading("Score Per Generation");
            draw_score_plot(ui, &evolution.history);

            ui.separator();

            ui.heading("Fitness Per Generation");
            draw_fitness_plot(ui, &evolution.history);
        });
}

fn draw_score_plot(ui: &mut egui::Ui, history: &[GenerationReport]) {
    if history.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    let points: PlotPoints = history
        .iter()
        .map(|report| [f64::from(report.generation), f64::from(report.score)])
        .collect();
    let line = Line::new(points).color(egui::Color32::from_rgb(255, 200, 60));

    Plot::new("score_plot")
        .height(150.0)
        .show_axes([true, true])
        .label_formatter(|_name, value| format!("Gen: {:.0}\nScore: {:.0}", value.x, value.y))
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}

fn draw_fitness_plot(ui: &mut egui::Ui, history: &[GenerationReport]) {
    if history.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    Plot::new("fitness_plot")
        .height(150.0)
        .show_axes([true, true])
        .legend(egui_plot::Legend::default())
        .label_formatter(|name, value| {
            format!("{}\nGen: {:.0}\nFitness: {:.1}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            let best: PlotPoints = history
                .iter()
                .map(|report| [f64::from(report.generation), f64::from(report.best_fitness)])
                .collect();
            plot_ui.line(
                Line::new(best)
                    .color(egui::Color32::from_rgb(100, 150, 255))
                    .name("Best"),
            );

            let mean: PlotPoints = history
                .iter()
                .map(|report| [f64::from(report.generation), f64::from(report.mean_fitness)])
                .collect();
            plot_ui.line(
                Line::new(mean)
                    .color(egui::Color32::from_rgb(100, 200, 100))
                    .name("Mean"),
            );
        });
}
