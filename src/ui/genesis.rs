use aviary::simulation::params::Params;
use egui_macroquad::egui;
use macroquad::prelude::*;

pub fn draw_genesis_screen(params: &mut Params, error: Option<&str>) -> bool {
    clear_background(LIGHTGRAY);

    let mut start_training = false;

    egui_macroquad::ui(|egui_ctx| {
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Aviary - Flight Training Configuration");
                ui.add_space(10.0);

                ui.collapsing("Flight Physics", |ui| {
                    ui.add(egui::Slider::new(&mut params.gravity, 0.1..=1.5).text("Gravity"));
                    ui.add(
                        egui::Slider::new(&mut params.terminal_velocity, 2.0..=16.0)
                            .text("Terminal Velocity"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.flap_impulse, -16.0..=-4.0)
                            .text("Flap Impulse"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.flap_threshold, -1.0..=1.0)
                            .text("Flap Threshold"),
                    );
                });

                ui.collapsing("Course", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.scroll_speed, 1.0..=12.0)
                            .text("Scroll Speed"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.gate_width, 24.0..=120.0).text("Gate Width"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.gap_height, 80.0..=300.0).text("Gap Height"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.gap_jitter, 0.0..=200.0).text("Gap Jitter"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.spawn_interval_ms, 500.0..=4000.0)
                            .text("Spawn Interval (ms)"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.lookahead_margin, 0.0..=200.0)
                            .text("Lookahead Margin"),
                    );
                });

                ui.collapsing("Rewards", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.tick_reward, 0.0..=1.0)
                            .text("Survival / tick"),
                    );
                    ui.add(egui::Slider::new(&mut params.pass_reward, 0.0..=20.0).text("Gate Pass"));
                    ui.add(
                        egui::Slider::new(&mut params.collision_penalty, 0.0..=5.0)
                            .text("Collision Penalty"),
                    );
                });

                ui.collapsing("Training", |ui| {
                    ui.add(
                        egui::Slider::new(&mut params.population_size, 1..=200)
                            .text("Population Size"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.max_generations, 1..=500)
                            .text("Max Generations"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.tick_limit, 0..=100_000)
                            .text("Tick Limit (0 = unlimited)"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.fitness_target, 0.0..=500.0)
                            .text("Fitness Target (0 = off)"),
                    );

                    ui.separator();
                    ui.add(egui::Slider::new(&mut params.elite_count, 0..=10).text("Elites"));
                    ui.add(
                        egui::Slider::new(&mut params.parent_fraction, 0.05..=1.0)
                            .text("Parent Fraction"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.crossover_prob, 0.0..=1.0)
                            .text("Crossover Probability"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.weight_init_scale, 0.1..=3.0)
                            .text("Weight Init Scale"),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.mutation_scale_min, 0.0005..=0.1)
                            .text("Mutation Scale Min")
                            .logarithmic(true),
                    );
                    ui.add(
                        egui::Slider::new(&mut params.mutation_scale_max, 0.01..=1.0)
                            .text("Mutation Scale Max")
                            .logarithmic(true),
                    );
                });

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Start Training").clicked() {
                        start_training = true;
                    }
                    ui.label("Configure parameters above, then click to start");
                });

                if let Some(error) = error {
                    ui.add_space(5.0);
                    ui.colored_label(egui::Color32::from_rgb(255, 120, 120), error);
                }
            });
        });
    });

    egui_macroquad::draw();

    start_training
}
