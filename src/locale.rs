//! Locale rule tables.
//!
//! Every literal the filter and classifier look for (numeral vocabulary,
//! chapter markers, synonym sets, page-number wording) lives in a
//! [`LocaleTable`]. The matchers in [`crate::structure`] are generic over the
//! table, so a new locale is a new table, not new control flow.
//!
//! Tables are plain serde structs and can be loaded from JSON:
//!
//! ```
//! use pdf2md::locale::{Locale, LocaleTable};
//!
//! let json = serde_json::to_string(&Locale::En.table()).unwrap();
//! let table = LocaleTable::from_json_str(&json).unwrap();
//! assert_eq!(table.name, "en");
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Built-in locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Simplified Chinese wording, plus the Latin synonyms common in
    /// Chinese technical books ("CONTENTS", "Preface", "Page N of M")
    #[default]
    Zh,
    /// English wording ("Chapter 3 Title", "Section 2", "Page 4 of 9")
    En,
}

impl Locale {
    /// The rule table for this locale.
    pub fn table(self) -> LocaleTable {
        match self {
            Locale::Zh => LocaleTable::chinese(),
            Locale::En => LocaleTable::english(),
        }
    }

    /// Short locale code.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "zh-cn" | "zh_cn" | "chinese" => Ok(Locale::Zh),
            "en" | "en-us" | "en_us" | "english" => Ok(Locale::En),
            other => Err(Error::InvalidRules(format!("unknown locale: {}", other))),
        }
    }
}

/// A heading marker wrapped around a numeral, e.g. `第` + N + `章`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Text before the numeral
    pub prefix: String,
    /// Text after the numeral (may be empty)
    #[serde(default)]
    pub suffix: String,
}

impl Marker {
    /// Create a marker.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

/// Wording of a page number, e.g. `第` N `页` or `Page` N `of` M.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageForm {
    /// Text before the page number
    pub prefix: String,
    /// Text after the page number (may be empty)
    #[serde(default)]
    pub suffix: String,
    /// Connector before an optional page total ("of")
    #[serde(default)]
    pub total: Option<String>,
}

impl PageForm {
    /// Create a page form without a total.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            total: None,
        }
    }

    /// Delimiter wordings written by the built-in tables.
    pub fn builtin_delimiters() -> Vec<PageForm> {
        vec![PageForm::new("第", "页"), PageForm::new("page", "")]
    }

    /// Allow an optional "<connector> M" after the number.
    pub fn with_total(mut self, connector: impl Into<String>) -> Self {
        self.total = Some(connector.into());
        self
    }

    /// Render the form for a page number, words separated by single spaces.
    pub fn render(&self, page: u32) -> String {
        let number = page.to_string();
        [self.prefix.as_str(), number.as_str(), self.suffix.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Literal pattern sets for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTable {
    /// Locale name, recorded in document metadata
    pub name: String,

    /// Characters that may form a chapter/section numeral
    pub numerals: String,

    /// Chapter markers ("第…章")
    pub chapter_markers: Vec<Marker>,

    /// Section markers ("第…节")
    pub section_markers: Vec<Marker>,

    /// Characters separating a chapter marker from its title
    pub title_separators: String,

    /// Table-of-contents header phrases
    pub toc_headers: Vec<String>,

    /// Front-matter phrases (preface, foreword, acknowledgements)
    pub preface: Vec<String>,

    /// Appendix markers (prefix match)
    pub appendix: Vec<String>,

    /// References/bibliography phrases
    pub references: Vec<String>,

    /// Page delimiter wordings; the first is used when writing raw text
    pub page_delimiters: Vec<PageForm>,

    /// Running page-number wordings
    pub page_numbers: Vec<PageForm>,

    /// Bare page words dropped on their own
    pub page_words: Vec<String>,

    /// Substrings that mark a line as header/footer boilerplate
    pub denylist: Vec<String>,

    /// Attribution line appended to rendered output
    pub footer: String,
}

const CJK_NUMERALS: &str = "0123456789一二三四五六七八九十百千万零";
const LATIN_NUMERALS: &str = "0123456789";

impl LocaleTable {
    /// The Chinese table.
    pub fn chinese() -> Self {
        Self {
            name: "zh".to_string(),
            numerals: CJK_NUMERALS.to_string(),
            chapter_markers: vec![Marker::new("第", "章")],
            section_markers: vec![Marker::new("第", "节")],
            title_separators: " \u{3000}".to_string(),
            toc_headers: strings(&["目录", "目次", "contents", "table of contents"]),
            preface: strings(&[
                "前言",
                "序言",
                "引言",
                "致谢",
                "序",
                "preface",
                "introduction",
                "acknowledgement",
            ]),
            appendix: strings(&["附录", "appendix"]),
            references: strings(&["参考文献", "references"]),
            page_delimiters: vec![PageForm::new("第", "页"), PageForm::new("page", "")],
            page_numbers: vec![
                PageForm::new("第", "页"),
                PageForm::new("page", "").with_total("of"),
            ],
            page_words: strings(&["页", "page"]),
            denylist: strings(&["©", "版权所有"]),
            footer: "*由PDF2MD自动转换生成*".to_string(),
        }
    }

    /// The English table.
    pub fn english() -> Self {
        Self {
            name: "en".to_string(),
            numerals: LATIN_NUMERALS.to_string(),
            chapter_markers: vec![Marker::new("chapter", "")],
            section_markers: vec![Marker::new("section", "")],
            title_separators: " :.\u{3000}".to_string(),
            toc_headers: strings(&["contents", "table of contents"]),
            preface: strings(&[
                "preface",
                "foreword",
                "introduction",
                "acknowledgement",
                "acknowledgements",
                "acknowledgments",
            ]),
            appendix: strings(&["appendix"]),
            references: strings(&["references", "bibliography"]),
            page_delimiters: vec![PageForm::new("page", "")],
            page_numbers: vec![PageForm::new("page", "").with_total("of")],
            page_words: strings(&["page"]),
            denylist: strings(&["©", "All rights reserved"]),
            footer: "*Converted automatically by PDF2MD*".to_string(),
        }
    }

    /// Parse a table from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: LocaleTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ResourceNotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The page delimiter line written before page `page`.
    pub fn page_delimiter(&self, page: u32) -> String {
        match self.page_delimiters.first() {
            Some(form) => format!("--- {} ---", form.render(page)),
            None => format!("--- page {} ---", page),
        }
    }

    /// Check the table for values that would produce degenerate rules.
    pub fn validate(&self) -> Result<()> {
        if self.numerals.trim().is_empty() {
            return Err(Error::InvalidRules("numeral vocabulary is empty".into()));
        }
        let markers = self.chapter_markers.iter().chain(&self.section_markers);
        if markers.clone().any(|m| m.prefix.trim().is_empty()) {
            return Err(Error::InvalidRules("heading marker without prefix".into()));
        }
        let phrases = self
            .toc_headers
            .iter()
            .chain(&self.preface)
            .chain(&self.appendix)
            .chain(&self.references)
            .chain(&self.page_words)
            .chain(&self.denylist);
        if phrases.clone().any(|p| p.trim().is_empty()) {
            return Err(Error::InvalidRules("empty phrase in synonym set".into()));
        }
        Ok(())
    }
}

impl Default for LocaleTable {
    fn default() -> Self {
        Locale::default().table()
    }
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_str() {
        assert_eq!("zh".parse::<Locale>().unwrap(), Locale::Zh);
        assert_eq!("English".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_page_delimiter_wording() {
        assert_eq!(Locale::Zh.table().page_delimiter(15), "--- 第 15 页 ---");
        assert_eq!(Locale::En.table().page_delimiter(3), "--- page 3 ---");
    }

    #[test]
    fn test_builtin_tables_validate() {
        assert!(Locale::Zh.table().validate().is_ok());
        assert!(Locale::En.table().validate().is_ok());
    }

    #[test]
    fn test_json_round_trip_keeps_table() {
        let table = Locale::Zh.table();
        let json = serde_json::to_string_pretty(&table).unwrap();
        assert_eq!(LocaleTable::from_json_str(&json).unwrap(), table);
    }

    #[test]
    fn test_rejects_empty_numerals() {
        let mut table = Locale::En.table();
        table.numerals.clear();
        let json = serde_json::to_string(&table).unwrap();
        assert!(matches!(
            LocaleTable::from_json_str(&json),
            Err(Error::InvalidRules(_))
        ));
    }

    #[test]
    fn test_missing_rules_file() {
        let result = LocaleTable::from_json_file("/nonexistent/rules.json");
        assert!(matches!(result, Err(Error::ResourceNotFound(_))));
    }
}
