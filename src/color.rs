use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: series name → Color32
// ---------------------------------------------------------------------------

/// Maps series names (years, user types, clusters) to distinct colours so the
/// same series keeps its colour across filter changes.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map assigning palette colours to `names` in order.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let palette = generate_palette(names.len());
        let mapping = names
            .iter()
            .zip(palette)
            .map(|(name, c)| (name.as_ref().to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::from_rgb(0x4C, 0x72, 0xB0),
        }
    }

    /// Pin a name to a fixed colour.
    pub fn with_override(mut self, name: &str, color: Color32) -> Self {
        self.mapping.insert(name.to_string(), color);
        self
    }

    /// Look up the colour for a series name.
    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping
            .get(name)
            .copied()
            .unwrap_or(self.default_color)
    }
}
