use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::charts::ChartStyle;
use crate::color;
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, now: f64) {
    let ctx = ui.ctx().clone();
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_file_dialog(state, now, &ctx);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(RichText::new("Laptop Pulse").strong().color(color::CYAN));
        ui.label(RichText::new(format!("source: {}", state.source_label)).color(color::TEXT_MUTED));

        ui.separator();

        if ui.button("⟳ Refresh").clicked() {
            state.refresh(now, &ctx);
        }
        if state.spinner_visible() {
            ui.spinner();
        }

        ui.separator();
        for style in ChartStyle::ALL {
            if ui
                .selectable_label(state.chart_style() == style, style.name())
                .clicked()
            {
                state.set_style(style, now, &ctx);
            }
        }

        if state.refreshes > 0 {
            ui.label(
                RichText::new(format!("{} refreshes", state.refreshes)).color(color::TEXT_MUTED),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Dashboard grid
// ---------------------------------------------------------------------------

/// A titled chart card. `glow` in `[0, 1]` brightens and widens the border.
fn card(ui: &mut Ui, title: &str, glow: f32, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style())
        .fill(color::CARD)
        .stroke(egui::Stroke::new(
            1.0 + 2.0 * glow,
            color::faded(color::CYAN, 0.35 + 0.65 * glow),
        ))
        .corner_radius(10.0)
        .inner_margin(10.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).strong().color(color::TEXT));
            ui.add_space(4.0);
            add_contents(ui);
        });
}

/// Render every chart card in a two-column grid.
pub fn dashboard(ui: &mut Ui, state: &AppState, now: f64) {
    let board = &state.board;
    let style = board.style;
    let glow = board.glow(now) as f32;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Laptop market at a glance").color(Color32::WHITE));
            ui.add_space(8.0);

            ui.columns(2, |cols| {
                card(&mut cols[0], "Brands", glow, |ui| match style {
                    ChartStyle::Neon => plot::brand_pie(ui, &board.brands, board.pie_rotation, now),
                    ChartStyle::Pulse => plot::brand_donut(ui, &board.brands, now),
                });
                card(&mut cols[1], "Memory sizes", glow, |ui| {
                    plot::ram_bars(ui, &board.ram, now)
                });
            });
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                card(&mut cols[0], "Processors", glow, |ui| {
                    plot::cpu_bars(ui, &board.cpu, now)
                });
                card(&mut cols[1], "Storage", glow, |ui| match style {
                    ChartStyle::Neon => plot::storage_doughnut(ui, board, now),
                    ChartStyle::Pulse => plot::storage_gauge(ui, board, now),
                });
            });
            ui.add_space(8.0);
            ui.columns(2, |cols| {
                card(&mut cols[0], "Screen resolutions", glow, |ui| {
                    plot::resolution_line(ui, &board.resolution, now)
                });
                card(&mut cols[1], "RAM vs inches", glow, |ui| {
                    plot::ram_vs_inches(ui, board, now)
                });
            });

            let split = &state.dataset.storage;
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!(
                    "{} laptops · {}% SSD",
                    split.total(),
                    split.ssd_percent()
                ))
                .color(color::TEXT_MUTED),
            );
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, now: f64, ctx: &egui::Context) {
    let file = rfd::FileDialog::new()
        .set_title("Open laptop dataset")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening dataset {}", path.display());
        state.load_dataset(&path, now, ctx);
    }
}
