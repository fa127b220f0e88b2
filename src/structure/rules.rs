//! Ordered structure rules.
//!
//! One rule table drives both classification and the "is this a heading"
//! question asked by the structuring pass, so the two can never disagree.

use regex::Regex;

use super::patterns;
use crate::error::Result;
use crate::locale::{Locale, LocaleTable};
use crate::model::{StructureLabel, StructuredRecord};

/// Dotted decimal section numbers ("1.1 Overview", "2.3.4　Details").
const DOTTED_SECTION: &str = r"^[0-9]+\.[0-9.]+[\s.．]+";

/// A single compiled rule.
#[derive(Debug, Clone)]
struct Rule {
    label: StructureLabel,
    pattern: Regex,
}

/// Labels lines by their leading pattern. Pure: no state changes on use.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Compile the rule table for a locale table.
    ///
    /// Rule order (first match wins): TOC header, front matter, bare chapter,
    /// titled chapter, dotted section, marked section, appendix, references.
    pub fn from_table(table: &LocaleTable) -> Result<Self> {
        let numerals = patterns::char_class(&table.numerals);
        let separators = patterns::separator_class(&table.title_separators);
        let chapter = patterns::alternation(
            table
                .chapter_markers
                .iter()
                .map(|m| patterns::marker(m, &numerals)),
        );
        let section = patterns::alternation(
            table
                .section_markers
                .iter()
                .map(|m| patterns::marker(m, &numerals)),
        );

        let sources = [
            (
                StructureLabel::TocHeader,
                phrases(&table.toc_headers).map(|p| format!("^{}$", p)),
            ),
            (
                StructureLabel::Preface,
                phrases(&table.preface).map(|p| format!("^{}$", p)),
            ),
            (
                StructureLabel::Chapter,
                chapter.as_ref().map(|p| format!("^{}$", p)),
            ),
            (
                StructureLabel::Chapter,
                chapter.as_ref().map(|p| format!("^{}{}+", p, separators)),
            ),
            (StructureLabel::Section, Some(DOTTED_SECTION.to_string())),
            (StructureLabel::Section, section.map(|p| format!("^{}", p))),
            (
                StructureLabel::Appendix,
                phrases(&table.appendix).map(|p| format!("^{}", p)),
            ),
            (
                StructureLabel::References,
                phrases(&table.references).map(|p| format!("^{}$", p)),
            ),
        ];

        let mut rules = Vec::with_capacity(sources.len());
        for (label, source) in sources {
            if let Some(source) = source {
                rules.push(Rule {
                    label,
                    pattern: Regex::new(&format!("(?i){}", source))?,
                });
            }
        }

        Ok(Self { rules })
    }

    /// Create the classifier for a built-in locale.
    pub fn for_locale(locale: Locale) -> Self {
        Self::from_table(&locale.table()).expect("built-in locale tables compile")
    }

    /// Label a line. Falls back to [`StructureLabel::Content`].
    pub fn label(&self, line: &str) -> StructureLabel {
        let text = line.trim();
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(text))
            .map_or(StructureLabel::Content, |rule| rule.label)
    }

    /// Label a line and pair it with its verbatim text.
    pub fn classify(&self, line: &str) -> StructuredRecord {
        StructuredRecord::new(self.label(line), line)
    }

    /// Check whether a line is a heading (never merged with neighbours).
    pub fn is_heading(&self, line: &str) -> bool {
        self.label(line).is_heading()
    }
}

fn phrases(words: &[String]) -> Option<String> {
    patterns::alternation(words.iter().map(|w| patterns::phrase(w)))
}

impl Default for Classifier {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}
