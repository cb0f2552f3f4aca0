use std::f32::consts::TAU;

use eframe::egui::{vec2, Align2, Color32, FontId, Mesh, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::charts::{CategoryChart, ChartBoard};
use crate::data::model::SplitPair;
use crate::color;

const CHART_HEIGHT: f32 = 220.0;

fn static_plot(id: &'static str) -> Plot<'static> {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_background(false)
}

/// Axis tick formatter that prints category labels at integer positions.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark: egui_plot::GridMark, _range: &std::ops::RangeInclusive<f64>| {
        let v = mark.value;
        if v < 0.0 || (v - v.round()).abs() > 1e-6 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Pie / doughnut (painter-drawn; egui_plot has no pie)
// ---------------------------------------------------------------------------

/// Append an annular sector `[a0, a1]` between radii `r0` and `r1`.
/// With `r0 == 0` this is a plain pie slice.
fn add_sector(mesh: &mut Mesh, center: Pos2, r0: f32, r1: f32, a0: f32, a1: f32, fill: Color32) {
    let steps = (((a1 - a0).abs() / TAU) * 96.0).ceil().max(1.0) as usize;
    for s in 0..steps {
        let t0 = a0 + (a1 - a0) * s as f32 / steps as f32;
        let t1 = a0 + (a1 - a0) * (s + 1) as f32 / steps as f32;
        let base = mesh.vertices.len() as u32;
        for (r, t) in [(r0, t0), (r1, t0), (r1, t1), (r0, t1)] {
            mesh.colored_vertex(center + vec2(t.cos(), t.sin()) * r, fill);
        }
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }
}

/// Slices narrower than this get no text.
const MIN_LABELLED_SWEEP: f32 = 0.3;

/// Draw `values` as slices starting at `rotation`. `cutout` is the inner
/// radius as a fraction of the outer one (0 for a pie). With `labels`, each
/// wide enough slice is captioned with its label and share.
fn ring_chart(
    ui: &mut Ui,
    values: &[f64],
    colors: &[Color32],
    rotation: f32,
    cutout: f32,
    labels: Option<&[String]>,
) {
    let size = CHART_HEIGHT.min(ui.available_width());
    let (response, painter) = ui.allocate_painter(vec2(size, size), Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let r1 = size * 0.45;
    let r0 = r1 * cutout;

    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        painter.circle_stroke(center, r1, Stroke::new(1.0, color::faded(color::TEXT, 0.2)));
        return;
    }

    let mut mesh = Mesh::default();
    let mut angle = rotation;
    let mut edges = Vec::with_capacity(values.len());
    let mut captions = Vec::new();
    for (i, &v) in values.iter().enumerate() {
        let sweep = (v / total) as f32 * TAU;
        add_sector(&mut mesh, center, r0, r1, angle, angle + sweep, colors[i % colors.len()]);
        if let Some(label) = labels.and_then(|l| l.get(i)) {
            if sweep >= MIN_LABELLED_SWEEP {
                let mid = angle + sweep / 2.0;
                let at = center + vec2(mid.cos(), mid.sin()) * (r0 + r1) / 2.0;
                captions.push((at, format!("{label}\n{:.0}%", v / total * 100.0)));
            }
        }
        angle += sweep;
        edges.push(angle);
    }
    painter.add(Shape::mesh(mesh));

    let border = Stroke::new(2.0, color::faded(Color32::WHITE, 0.25));
    for a in edges {
        let dir = vec2(a.cos(), a.sin());
        painter.line_segment([center + dir * r0, center + dir * r1], border);
    }
    for (at, text) in captions {
        painter.text(at, Align2::CENTER_CENTER, text, FontId::proportional(11.0), color::BACKDROP);
    }
}

fn legend(ui: &mut Ui, labels: &[String], values: &[f64], colors: &[Color32]) {
    let total: f64 = values.iter().sum();
    for (i, label) in labels.iter().enumerate() {
        let v = values.get(i).copied().unwrap_or(0.0);
        let pct = if total > 0.0 { v / total * 100.0 } else { 0.0 };
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(vec2(10.0, 10.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, colors[i % colors.len()]);
            ui.label(RichText::new(format!("{label}  {v:.0}  ({pct:.0}%)")).color(color::TEXT));
        });
    }
}

/// Rotating brand pie with legend.
pub fn brand_pie(ui: &mut Ui, chart: &CategoryChart, rotation: f64, now: f64) {
    let values = chart.values.sample(now);
    let colors: Vec<Color32> = (0..values.len())
        .map(|i| color::slice_color(i, values.len()))
        .collect();
    ui.horizontal(|ui: &mut Ui| {
        ring_chart(ui, &values, &colors, rotation as f32, 0.0, None);
        ui.vertical(|ui: &mut Ui| legend(ui, &chart.labels, &values, &colors));
    });
}

/// SSD/HDD doughnut.
pub fn storage_doughnut(ui: &mut Ui, board: &ChartBoard, now: f64) {
    let values = board.storage.sample(now);
    let colors = [color::LIME, color::CORAL];
    let labels = ["SSD".to_string(), "HDD".to_string()];
    ui.horizontal(|ui: &mut Ui| {
        ring_chart(ui, &values, &colors, -std::f32::consts::FRAC_PI_2, 0.62, None);
        ui.vertical(|ui: &mut Ui| legend(ui, &labels, &values, &colors));
    });
}

/// Brand donut with every slice captioned by label and share.
pub fn brand_donut(ui: &mut Ui, chart: &CategoryChart, now: f64) {
    let values = chart.values.sample(now);
    let colors: Vec<Color32> = (0..values.len())
        .map(|i| color::slice_color(i, values.len()))
        .collect();
    ring_chart(
        ui,
        &values,
        &colors,
        -std::f32::consts::FRAC_PI_2,
        0.45,
        Some(&chart.labels),
    );
}

/// SSD/HDD gauge in whole percent.
pub fn storage_gauge(ui: &mut Ui, board: &ChartBoard, now: f64) {
    let shown = board.storage.sample(now);
    let [ssd, hdd] = SplitPair {
        ssd: shown[0],
        hdd: shown[1],
    }
    .percent_split();
    let values = [f64::from(ssd), f64::from(hdd)];
    let labels = ["SSD".to_string(), "HDD".to_string()];
    ring_chart(
        ui,
        &values,
        &[color::LIME, color::CORAL],
        -std::f32::consts::FRAC_PI_2,
        0.6,
        Some(&labels),
    );
}

// ---------------------------------------------------------------------------
// egui_plot charts
// ---------------------------------------------------------------------------

fn bars(chart: &CategoryChart, now: f64, fill: Color32) -> Vec<Bar> {
    chart
        .values
        .sample(now)
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            Bar::new(i as f64, v)
                .name(chart.labels.get(i).cloned().unwrap_or_default())
                .fill(fill)
                .width(0.7)
        })
        .collect()
}

/// Memory sizes as vertical bars.
pub fn ram_bars(ui: &mut Ui, chart: &CategoryChart, now: f64) {
    let bar_chart = BarChart::new(bars(chart, now, color::faded(color::CYAN, 0.85)))
        .color(color::PURPLE);
    static_plot("ram_bars")
        .x_axis_formatter(category_formatter(chart.labels.clone()))
        .include_y(0.0)
        .show(ui, |plot_ui| plot_ui.bar_chart(bar_chart));
}

/// Processor families as horizontal bars; bars animate in one after another.
pub fn cpu_bars(ui: &mut Ui, chart: &CategoryChart, now: f64) {
    let bar_chart = BarChart::new(bars(chart, now, color::faded(color::PURPLE, 0.85)))
        .color(color::CYAN)
        .horizontal();
    static_plot("cpu_bars")
        .y_axis_formatter(category_formatter(chart.labels.clone()))
        .include_x(0.0)
        .show(ui, |plot_ui| plot_ui.bar_chart(bar_chart));
}

/// Resolution popularity as a filled line.
pub fn resolution_line(ui: &mut Ui, chart: &CategoryChart, now: f64) {
    let points: Vec<[f64; 2]> = chart
        .values
        .sample(now)
        .into_iter()
        .enumerate()
        .map(|(i, v)| [i as f64, v])
        .collect();
    let line = Line::new(PlotPoints::from(points.clone()))
        .color(color::CYAN)
        .width(3.0)
        .fill(0.0);
    let markers = Points::new(PlotPoints::from(points))
        .color(color::CYAN)
        .radius(3.0)
        .filled(true);
    static_plot("resolution_line")
        .x_axis_formatter(category_formatter(chart.labels.clone()))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(line);
            plot_ui.points(markers);
        });
}

/// Screen size against memory.
pub fn ram_vs_inches(ui: &mut Ui, board: &ChartBoard, now: f64) {
    let points: PlotPoints = board
        .scatter_x
        .iter()
        .zip(board.scatter_y.sample(now))
        .map(|(&x, y)| [x, y])
        .collect();
    let scatter = Points::new(points)
        .name("RAM vs Inches")
        .color(color::MAGENTA)
        .radius(5.0)
        .filled(true);
    static_plot("ram_vs_inches")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Inches")
        .y_axis_label("RAM (GB)")
        .include_y(0.0)
        .show(ui, |plot_ui| plot_ui.points(scatter));
}
