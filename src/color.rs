use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Neon palette
// ---------------------------------------------------------------------------

pub const CYAN: Color32 = Color32::from_rgb(0x7c, 0xf0, 0xff);
pub const PURPLE: Color32 = Color32::from_rgb(0xa7, 0x8b, 0xfa);
pub const LIME: Color32 = Color32::from_rgb(0x00, 0xff, 0xa3);
pub const MAGENTA: Color32 = Color32::from_rgb(0xff, 0x7c, 0xe5);
pub const YELLOW: Color32 = Color32::from_rgb(0xff, 0xd1, 0x66);
pub const CORAL: Color32 = Color32::from_rgb(0xff, 0x7c, 0x7c);
pub const TEXT: Color32 = Color32::from_rgb(0xe6, 0xe9, 0xf0);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xcd, 0xd3, 0xdf);
pub const BACKDROP: Color32 = Color32::from_rgb(0x0f, 0x10, 0x20);
pub const CARD: Color32 = Color32::from_rgba_premultiplied(10, 12, 28, 200);

/// Slice colours for the brand pie, in label order.
pub const BRAND_SLICES: [Color32; 7] = [
    CYAN,
    PURPLE,
    LIME,
    MAGENTA,
    YELLOW,
    Color32::from_rgb(0x06, 0xd6, 0xa0),
    Color32::from_rgb(0x11, 0x8a, 0xb2),
];

/// Colour for slice `i`, cycling through [`BRAND_SLICES`] and then falling
/// back to generated hues for long series.
pub fn slice_color(i: usize, n: usize) -> Color32 {
    if n <= BRAND_SLICES.len() {
        BRAND_SLICES[i % BRAND_SLICES.len()]
    } else {
        generate_palette(n)[i % n]
    }
}

// ---------------------------------------------------------------------------
// Colour generation
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue_deg: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue_deg, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

/// Bubble tint: saturated, light, mostly transparent.
pub fn bubble_color(hue_turns: f64, alpha: f32) -> Color32 {
    hsl_to_color32((hue_turns * 360.0) as f32, 0.9, 0.6).gamma_multiply(alpha)
}

/// Fade a colour to `alpha` of its opacity.
pub fn faded(c: Color32, alpha: f32) -> Color32 {
    c.gamma_multiply(alpha)
}
