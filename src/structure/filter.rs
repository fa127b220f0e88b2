//! Header/footer and page-number filtering.

use regex::Regex;

use super::patterns;
use crate::error::Result;
use crate::locale::{Locale, LocaleTable, PageForm};

/// Decides whether a raw line is boilerplate rather than content.
#[derive(Debug, Clone)]
pub struct LineFilter {
    page_delimiter: Option<Regex>,
    page_number: Option<Regex>,
    page_words: Vec<String>,
    denylist: Vec<String>,
}

impl LineFilter {
    /// Compile a filter from a locale table.
    pub fn from_table(table: &LocaleTable) -> Result<Self> {
        // Raw caches may come from another locale, so the built-in
        // delimiter wordings are always recognised.
        let page_delimiter = patterns::alternation(
            table
                .page_delimiters
                .iter()
                .chain(&PageForm::builtin_delimiters())
                .map(patterns::page_form),
        )
        .map(|alt| Regex::new(&format!(r"(?i)^---\s*{}\s*---$", alt)))
        .transpose()?;

        let page_number = patterns::alternation(table.page_numbers.iter().map(patterns::page_form))
            .map(|alt| Regex::new(&format!("(?i)^{}$", alt)))
            .transpose()?;

        Ok(Self {
            page_delimiter,
            page_number,
            page_words: table
                .page_words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .collect(),
            denylist: table.denylist.clone(),
        })
    }

    /// Create the filter for a built-in locale.
    pub fn for_locale(locale: Locale) -> Self {
        Self::from_table(&locale.table()).expect("built-in locale tables compile")
    }

    /// Check whether a line is noise.
    ///
    /// Rules, first match wins: blank, all-numeric, page delimiter,
    /// "page N (of M)", bare page word, denylisted substring.
    pub fn is_noise(&self, line: &str) -> bool {
        let text = line.trim();

        if text.is_empty() {
            return true;
        }

        if text.chars().all(char::is_numeric) {
            return true;
        }

        if self.is_page_delimiter(text) {
            return true;
        }

        if let Some(ref re) = self.page_number {
            if re.is_match(text) {
                return true;
            }
        }

        let lower = text.to_lowercase();
        if self.page_words.iter().any(|w| *w == lower) {
            return true;
        }

        self.denylist.iter().any(|keyword| text.contains(keyword.as_str()))
    }

    /// Check whether a line is a synthetic page delimiter.
    pub fn is_page_delimiter(&self, line: &str) -> bool {
        self.page_delimiter
            .as_ref()
            .is_some_and(|re| re.is_match(line.trim()))
    }

    /// Page number carried by a delimiter line, if the line is one.
    pub fn page_delimiter(&self, line: &str) -> Option<u32> {
        if !self.is_page_delimiter(line) {
            return None;
        }
        let number = line
            .chars()
            .filter_map(|c| c.to_digit(10))
            .fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(d));
        Some(number)
    }
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_numeric_lines() {
        let filter = LineFilter::default();
        assert!(filter.is_noise(""));
        assert!(filter.is_noise("   \t"));
        assert!(filter.is_noise("42"));
        assert!(filter.is_noise("  7  "));
        assert!(!filter.is_noise("42 apples"));
    }

    #[test]
    fn test_page_delimiters() {
        let filter = LineFilter::default();
        assert!(filter.is_noise("--- 第 15 页 ---"));
        assert!(filter.is_noise("--- page 1 ---"));
        assert_eq!(filter.page_delimiter("--- 第 15 页 ---"), Some(15));
        assert_eq!(filter.page_delimiter("--- Page 3 ---"), Some(3));
        assert_eq!(filter.page_delimiter("第一章 引言"), None);
    }

    #[test]
    fn test_page_number_patterns() {
        let filter = LineFilter::default();
        assert!(filter.is_noise("第 3 页"));
        assert!(filter.is_noise("第12页"));
        assert!(filter.is_noise("Page 3 of 10"));
        assert!(!filter.is_noise("第三章 总结"));
    }

    #[test]
    fn test_bare_page_words() {
        let filter = LineFilter::default();
        assert!(filter.is_noise("页"));
        assert!(filter.is_noise("Page"));
        assert!(!filter.is_noise("Page layout matters"));
        assert!(!filter.is_noise("页面设计"));
    }

    #[test]
    fn test_denylist() {
        let filter = LineFilter::default();
        assert!(filter.is_noise("© 2021 某某出版社"));
        assert!(filter.is_noise("版权所有 翻印必究"));
        assert!(!filter.is_noise("本书讨论版权问题。"));
    }

    #[test]
    fn test_english_table() {
        let filter = LineFilter::for_locale(Locale::En);
        assert!(filter.is_noise("--- Page 9 ---"));
        assert!(filter.is_noise("page 9"));
        assert!(filter.is_noise("All rights reserved."));
        assert_eq!(filter.page_delimiter("--- 第 9 页 ---"), Some(9));
        assert!(filter.is_noise("--- 第 9 页 ---"));
    }

    #[test]
    fn test_custom_table_keeps_builtin_delimiters() {
        let mut table = Locale::En.table();
        table.page_delimiters = vec![PageForm::new("folio", "")];
        let filter = LineFilter::from_table(&table).unwrap();
        assert_eq!(filter.page_delimiter("--- folio 4 ---"), Some(4));
        assert_eq!(filter.page_delimiter("--- 第 4 页 ---"), Some(4));
        assert_eq!(filter.page_delimiter("--- page 4 ---"), Some(4));
    }
}
