use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CorrSign;

// ---------------------------------------------------------------------------
// Palettes
// ---------------------------------------------------------------------------

/// Fixed bright palette. With more categories than entries, colours repeat
/// cyclically; that reuse is accepted behaviour, not a defect.
pub const BRIGHT_PALETTE: [&str; 4] = ["#FF6F61", "#6B5B95", "#88B04B", "#F7CAC9"];

/// Edge colour for a positive correlation.
pub const POSITIVE_EDGE_COLOR: &str = "#1f77b4";
/// Edge colour for a negative correlation.
pub const NEGATIVE_EDGE_COLOR: &str = "#d62728";

/// Generates `n` visually distinct hex colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            format!(
                "#{:02x}{:02x}{:02x}",
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Which palette feeds the category colour assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteMode {
    /// The fixed four-colour bright palette, reused cyclically.
    #[default]
    Bright,
    /// An evenly-spaced-hue palette sized to the category count, so every
    /// category gets a distinct colour regardless of cardinality.
    Hue,
}

// ---------------------------------------------------------------------------
// Category colour mapping
// ---------------------------------------------------------------------------

/// Maps category labels to hex colours.
///
/// Rebuilt from the current filtered category set on every run; the
/// assignment depends only on the ordered category list, so identical
/// inputs always produce identical colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, String>,
    default_color: String,
}

impl CategoryColors {
    /// Assign `palette[i % len]` per category index `i` in the given order.
    pub fn new(categories: &[String], mode: PaletteMode) -> Self {
        let palette: Vec<String> = match mode {
            PaletteMode::Bright => BRIGHT_PALETTE.iter().map(|c| c.to_string()).collect(),
            PaletteMode::Hue => generate_palette(categories.len()),
        };
        let mapping = categories
            .iter()
            .enumerate()
            .map(|(i, cat)| (cat.clone(), palette[i % palette.len().max(1)].clone()))
            .collect();

        CategoryColors {
            mapping,
            default_color: "#808080".to_string(),
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, category: &str) -> &str {
        self.mapping
            .get(category)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }

    /// Return the legend entries (category → colour) for the adapter.
    pub fn legend_entries(&self) -> Vec<(String, String)> {
        self.mapping
            .iter()
            .map(|(cat, color)| (cat.clone(), color.clone()))
            .collect()
    }
}

/// The fixed two-colour mapping for edge signs.
pub fn sign_color(sign: CorrSign) -> &'static str {
    match sign {
        CorrSign::Positive => POSITIVE_EDGE_COLOR,
        CorrSign::Negative => NEGATIVE_EDGE_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bright_palette_repeats_cyclically() {
        let categories = cats(&["a", "b", "c", "d", "e"]);
        let colors = CategoryColors::new(&categories, PaletteMode::Bright);
        assert_eq!(colors.color_for("a"), BRIGHT_PALETTE[0]);
        assert_eq!(colors.color_for("e"), BRIGHT_PALETTE[0]);
        assert_eq!(colors.color_for("d"), BRIGHT_PALETTE[3]);
    }

    #[test]
    fn hue_palette_is_distinct_per_category() {
        let categories = cats(&["a", "b", "c", "d", "e", "f"]);
        let colors = CategoryColors::new(&categories, PaletteMode::Hue);
        let mut seen: Vec<&str> = categories.iter().map(|c| colors.color_for(c)).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), categories.len());
    }

    #[test]
    fn same_ordered_list_yields_same_colors() {
        let categories = cats(&["econ", "edu", "health"]);
        let a = CategoryColors::new(&categories, PaletteMode::Bright);
        let b = CategoryColors::new(&categories, PaletteMode::Bright);
        assert_eq!(a.legend_entries(), b.legend_entries());
    }

    #[test]
    fn legend_lists_every_category_with_its_color() {
        let colors = CategoryColors::new(&cats(&["edu", "econ"]), PaletteMode::Bright);
        let legend = colors.legend_entries();
        assert_eq!(legend.len(), 2);
        for (category, color) in &legend {
            assert_eq!(colors.color_for(category), color);
        }
    }

    #[test]
    fn unknown_category_falls_back_to_gray() {
        let colors = CategoryColors::new(&cats(&["a"]), PaletteMode::Bright);
        assert_eq!(colors.color_for("nope"), "#808080");
    }

    #[test]
    fn sign_colors_are_fixed() {
        assert_eq!(sign_color(CorrSign::Positive), "#1f77b4");
        assert_eq!(sign_color(CorrSign::Negative), "#d62728");
    }
}
