//! Rendering options.

use crate::locale::LocaleTable;

/// Options for rendering structured records.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Append the attribution footer block
    pub include_footer: bool,

    /// Attribution line written in the footer block
    pub footer: String,

    /// Separator written after top-level headings and before the footer
    pub horizontal_rule: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the footer wording of a locale table.
    pub fn for_table(table: &LocaleTable) -> Self {
        Self::default().with_footer(table.footer.clone())
    }

    /// Enable or disable the footer block.
    pub fn with_include_footer(mut self, include: bool) -> Self {
        self.include_footer = include;
        self
    }

    /// Set the attribution line.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Set the horizontal rule token.
    pub fn with_horizontal_rule(mut self, rule: impl Into<String>) -> Self {
        self.horizontal_rule = rule.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_footer: true,
            footer: LocaleTable::default().footer,
            horizontal_rule: "---".to_string(),
        }
    }
}
