//! Font catalog offered by the font selector, grouped by category

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FontCategory {
    pub name: &'static str,
    pub fonts: &'static [FontOption],
}

const fn font(label: &'static str, value: &'static str) -> FontOption {
    FontOption { label, value }
}

pub static FONT_CATEGORIES: &[FontCategory] = &[
    FontCategory {
        name: "System",
        fonts: &[
            font("Sans Serif", "sans-serif"),
            font("Serif", "serif"),
            font("Monospace", "monospace"),
        ],
    },
    FontCategory {
        name: "Sans-Serif",
        fonts: &[
            font("Arial", "Arial"),
            font("Helvetica", "Helvetica"),
            font("Verdana", "Verdana"),
            font("Trebuchet MS", "Trebuchet MS"),
            font("Gill Sans", "Gill Sans"),
        ],
    },
    FontCategory {
        name: "Serif",
        fonts: &[
            font("Times New Roman", "Times New Roman"),
            font("Georgia", "Georgia"),
            font("Garamond", "Garamond"),
            font("Palatino", "Palatino"),
        ],
    },
    FontCategory {
        name: "Display",
        fonts: &[
            font("Impact", "Impact"),
            font("Comic Sans MS", "Comic Sans MS"),
            font("Copperplate", "Copperplate"),
            font("Papyrus", "Papyrus"),
        ],
    },
];

/// Catalog entry for a font value
pub fn find_font(value: &str) -> Option<&'static FontOption> {
    FONT_CATEGORIES
        .iter()
        .flat_map(|category| category.fonts.iter())
        .find(|option| option.value == value)
}

/// Label shown for a font value, or "Select font" when it is not in the catalog
pub fn label_for(value: &str) -> &'static str {
    find_font(value).map(|option| option.label).unwrap_or("Select font")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_across_categories() {
        assert_eq!(label_for("sans-serif"), "Sans Serif");
        assert_eq!(label_for("Georgia"), "Georgia");
        assert_eq!(label_for("Wingdings"), "Select font");
    }

    #[test]
    fn catalog_has_unique_values() {
        let mut values: Vec<_> = FONT_CATEGORIES
            .iter()
            .flat_map(|category| category.fonts.iter().map(|f| f.value))
            .collect();
        let total = values.len();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), total);
    }
}
