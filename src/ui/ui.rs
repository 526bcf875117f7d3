use aviary::simulation::brain::WeightEvolution;
use aviary::simulation::evolution::Evolution;
use aviary::simulation::params::Params;
use egui_macroquad::egui;

pub struct UIState {
    pub stats_panel_width: f32,
    pub ticks_per_frame: u32,
    pub paused: bool,
    pub save_requested: bool,
    pub status_message: Option<String>,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            stats_panel_width: 300.0,
            ticks_per_frame: 1,
            paused: false,
            save_requested: false,
            status_message: None,
        }
    }
}

pub fn draw_ui(state: &mut UIState, evolution: &Evolution<WeightEvolution>, params: &mut Params) {
    egui_macroquad::ui(|egui_ctx| {
        // Configure brighter text and UI
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        visuals.widgets.noninteractive.fg_stroke.color = egui::Color32::from_rgb(220, 220, 220);
        visuals.widgets.inactive.fg_stroke.color = egui::Color32::from_rgb(200, 200, 200);
        visuals.widgets.hovered.fg_stroke.color = egui::Color32::WHITE;
        visuals.widgets.active.fg_stroke.color = egui::Color32::WHITE;
        egui_ctx.set_visuals(visuals);

        // Right-side stats panel
        super::stats::draw_stats_panel(egui_ctx, state, evolution, params);
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
