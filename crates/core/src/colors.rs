//! Badge colors assigned to categories created without an explicit color.

/// Palette used for auto-created categories.
pub const CATEGORY_PALETTE: &[&str] = &[
    "#ab339f", "#0dec5d", "#efa578", "#cbf3e5", "#2c4569", "#e2c40e", "#5a4fcf", "#f44336",
    "#03a9f4", "#8bc34a",
];

/// Pick a palette color for a category name.
///
/// The choice is a pure function of the name so that every worker racing to
/// create the same category writes the same color.
pub fn category_color(name: &str) -> &'static str {
    let hash = name
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    CATEGORY_PALETTE[hash % CATEGORY_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_color() {
        assert_eq!(category_color("Electronics"), category_color("Electronics"));
    }

    #[test]
    fn color_comes_from_palette() {
        for name in ["", "Furniture", "Vehicles", "ünïcødé"] {
            assert!(CATEGORY_PALETTE.contains(&category_color(name)));
        }
    }
}
