use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct pastel colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.65, 0.72))
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Continuous scales
// ---------------------------------------------------------------------------

/// Red → yellow → green scale. `value` is placed within `[min, max]`.
pub fn diverging(value: f64, min: f64, max: f64) -> Color32 {
    let t = unit(value, min, max);
    hsl_to_color32(Hsl::new(t * 120.0, 0.70, 0.50))
}

/// Light → dark blue scale; larger values are darker.
pub fn sequential_blue(value: f64, min: f64, max: f64) -> Color32 {
    let t = unit(value, min, max);
    hsl_to_color32(Hsl::new(210.0, 0.75, 0.80 - 0.45 * t))
}

fn unit(value: f64, min: f64, max: f64) -> f32 {
    let range = max - min;
    if !range.is_finite() || range.abs() < f64::EPSILON {
        return 1.0;
    }
    ((value - min) / range).clamp(0.0, 1.0) as f32
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct labels of one dimension to distinct colours, so a region
/// keeps its colour when the filter changes.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: HashMap<String, Color32>,
}

impl ColorMap {
    /// Build a colour map from a dimension's distinct labels.
    pub fn new(labels: &[String]) -> Self {
        let palette = generate_palette(labels.len());
        let mapping = labels.iter().cloned().zip(palette).collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}
