use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Category;

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Single accent colour for the per-department ranking bars.
pub const DEPARTMENT_BAR: Color32 = Color32::from_rgb(0, 139, 139);

/// Positive growth bars.
pub const GROWTH_UP: Color32 = Color32::from_rgb(46, 139, 87);
/// Negative growth bars.
pub const GROWTH_DOWN: Color32 = Color32::from_rgb(205, 92, 92);

/// Fixed colour per waste category for the department+year breakdown.
pub fn category_color(category: Category) -> Color32 {
    match category {
        Category::Household => Color32::from_rgb(70, 130, 180),
        Category::NonHousehold => Color32::from_rgb(205, 92, 92),
        Category::Municipal => Color32::from_rgb(0, 100, 0),
    }
}

/// Generates `n` visually distinct colours using evenly spaced hues, used
/// to tell districts apart in the per-capita chart.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn palette_colours_are_distinct_for_small_n() {
        let colors = generate_palette(12);
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
