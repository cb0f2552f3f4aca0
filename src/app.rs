use std::time::Duration;

use eframe::egui;

use crate::color;
use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{background, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaptopDashApp {
    pub state: AppState,
}

impl LaptopDashApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = egui::Color32::TRANSPARENT;
        visuals.override_text_color = Some(color::TEXT);
        cc.egui_ctx.set_visuals(visuals);

        let now = cc.egui_ctx.input(|i| i.time);
        Self {
            state: AppState::new(config, now),
        }
    }
}

impl eframe::App for LaptopDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.state.tick(now, ctx);

        // ---- Background: drifting bubbles ----
        background::paint(ctx, &self.state.bubbles);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar")
            .frame(egui::Frame::NONE.fill(color::CARD).inner_margin(6.0))
            .show(ctx, |ui| {
                panels::top_bar(ui, &mut self.state, now);
            });

        // ---- Central panel: chart grid ----
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.inner_margin(12.0))
            .show(ctx, |ui| {
                panels::dashboard(ui, &self.state, now);
            });

        if self.state.is_animating(now) {
            ctx.request_repaint();
        } else if let Some(secs) = self.state.next_wakeup(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(secs));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.teardown();
    }
}
