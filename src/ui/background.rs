use eframe::egui::{self, pos2, Color32, LayerId, Stroke};

use crate::background::{BubbleField, Camera};
use crate::color;

const BUBBLE_ALPHA: f32 = 0.22;
/// Depth at which bubbles fade fully into the fog.
const FOG_DEPTH: f64 = 180.0;

/// Paint the backdrop and the bubble field behind every panel.
pub fn paint(ctx: &egui::Context, field: &BubbleField) {
    let painter = ctx.layer_painter(LayerId::background());
    let rect = ctx.screen_rect();
    painter.rect_filled(rect, 0.0, color::BACKDROP);

    let camera = Camera::default();
    let (w, h) = (rect.width() as f64, rect.height() as f64);

    // Far bubbles first so near ones overlap them.
    let mut visible: Vec<(f64, f64, f64, f64, f64, f32)> = field
        .bubbles
        .iter()
        .filter_map(|b| {
            let (x, y, k) = camera.project(b.pos, w, h)?;
            let depth = camera.z - b.pos[2];
            let fog = (1.0 - depth / FOG_DEPTH).clamp(0.15, 1.0) as f32;
            Some((depth, x, y, b.scale * k, b.hue, BUBBLE_ALPHA * fog))
        })
        .collect();
    visible.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, x, y, radius, hue, alpha) in visible {
        let center = pos2(rect.left() + x as f32, rect.top() + y as f32);
        let radius = radius as f32;
        let fill = color::bubble_color(hue, alpha);
        let rim = color::bubble_color(hue, (alpha * 1.6).min(1.0));
        painter.circle(center, radius, fill, Stroke::new(1.0, rim));
        // Specular glint, offset towards the key light.
        painter.circle_filled(
            center + egui::vec2(-0.35, -0.35) * radius,
            radius * 0.18,
            Color32::WHITE.gamma_multiply(0.12),
        );
    }
}
