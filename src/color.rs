use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn to_color32(rgb: Srgb) -> Color32 {
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
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            to_color32(hsl.into_color())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category colours: label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (e.g. remote-work modes) to distinct colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Assign colours to `labels` in the order given.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let mapping = labels
            .iter()
            .zip(generate_palette(labels.len()))
            .map(|(label, c)| (label.to_string(), c))
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for numeric values
// ---------------------------------------------------------------------------

/// Red → yellow → green scale; `t` is clamped to `0.0..=1.0`.
pub fn red_yellow_green(t: f64) -> Color32 {
    let red: LinSrgb = Srgb::new(0.84_f32, 0.19, 0.15).into_linear();
    let yellow: LinSrgb = Srgb::new(1.0_f32, 1.0, 0.75).into_linear();
    let green: LinSrgb = Srgb::new(0.10_f32, 0.60, 0.31).into_linear();

    let t = t.clamp(0.0, 1.0) as f32;
    let rgb = if t < 0.5 {
        red.mix(yellow, t * 2.0)
    } else {
        yellow.mix(green, (t - 0.5) * 2.0)
    };
    to_color32(Srgb::from_linear(rgb))
}

/// Position of `value` within `min..=max`, 0.5 when the range is empty.
pub fn normalise(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        0.5
    } else {
        (value - min) / range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn unknown_category_gets_default() {
        let colors = CategoryColors::new(["Remote", "Hybrid"]);
        assert_ne!(colors.color_for("Remote"), colors.color_for("Hybrid"));
        assert_eq!(colors.color_for("On-site"), Color32::GRAY);
    }

    #[test]
    fn diverging_scale_endpoints() {
        let low = red_yellow_green(0.0);
        let high = red_yellow_green(1.0);
        assert!(low.r() > low.g());
        assert!(high.g() > high.r());
        assert_eq!(red_yellow_green(-3.0), low);
        assert_eq!(normalise(5.0, 5.0, 5.0), 0.5);
        assert_eq!(normalise(7.5, 5.0, 10.0), 0.5);
    }
}
