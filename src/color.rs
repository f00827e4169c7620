use std::collections::{BTreeMap, BTreeSet};

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Color mapping: department → Color32
// ---------------------------------------------------------------------------

/// Maps each department to a distinct colour so every chart series for a
/// department reads the same across tabs.
#[derive(Debug, Clone)]
pub struct DepartmentColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl DepartmentColors {
    /// Build the mapping from the dataset's sorted department universe.
    pub fn new(departments: &BTreeSet<String>) -> Self {
        let palette = generate_palette(departments.len());
        let mapping: BTreeMap<String, Color32> = departments
            .iter()
            .zip(palette.into_iter())
            .map(|(d, c): (&String, Color32)| (d.clone(), c))
            .collect();

        DepartmentColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a department.
    pub fn color_for(&self, department: &str) -> Color32 {
        self.mapping
            .get(department)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_sizes() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn departments_get_stable_distinct_colors() {
        let departments: BTreeSet<String> =
            ["Engineering", "Sales"].iter().map(|s| s.to_string()).collect();
        let colors = DepartmentColors::new(&departments);
        assert_ne!(colors.color_for("Engineering"), colors.color_for("Sales"));
        assert_eq!(colors.color_for("Unknown"), Color32::GRAY);
    }
}
