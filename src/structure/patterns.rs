//! Regex builders shared by the filter and the classifier.

use crate::locale::{Marker, PageForm};

/// Pattern for a literal phrase.
///
/// Whitespace runs match any whitespace run; between two adjacent CJK
/// characters optional whitespace is allowed, so "目录" also matches "目 录".
pub(crate) fn phrase(text: &str) -> String {
    let mut out = String::new();
    let mut prev: Option<char> = None;
    let mut in_space = false;

    for c in text.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push_str(r"\s+");
                in_space = true;
            }
            prev = None;
            continue;
        }
        in_space = false;
        if let Some(p) = prev {
            if !p.is_ascii() && !c.is_ascii() {
                out.push_str(r"\s*");
            }
        }
        out.push_str(&regex::escape(&c.to_string()));
        prev = Some(c);
    }
    out
}

/// Character class of the given characters, e.g. `[0-9一二]` style.
pub(crate) fn char_class(chars: &str) -> String {
    let mut out = String::from("[");
    for c in chars.chars().filter(|c| !c.is_whitespace()) {
        out.push_str(&regex::escape(&c.to_string()));
    }
    out.push(']');
    out
}

/// Class of title separators; whitespace when the table lists none.
pub(crate) fn separator_class(chars: &str) -> String {
    if chars.is_empty() {
        return r"\s".to_string();
    }
    let mut out = String::from("[");
    for c in chars.chars() {
        if c == ' ' {
            out.push(' ');
        } else {
            out.push_str(&regex::escape(&c.to_string()));
        }
    }
    out.push(']');
    out
}

/// Marker around a numeral run: `prefix N+ suffix`.
///
/// Whitespace around the numerals is only allowed next to Latin words
/// ("Chapter 3"); CJK markers are written solid ("第3章", not "第 3 章").
pub(crate) fn marker(marker: &Marker, numerals: &str) -> String {
    let prefix = marker.prefix.trim();
    let suffix = marker.suffix.trim();
    let mut out = phrase(prefix);
    if prefix.chars().last().is_some_and(|c| c.is_ascii()) {
        out.push_str(r"\s*");
    }
    out.push_str(&format!("{}+", numerals));
    if !suffix.is_empty() {
        if suffix.chars().next().is_some_and(|c| c.is_ascii()) {
            out.push_str(r"\s*");
        }
        out.push_str(&phrase(suffix));
    }
    out
}

/// Page form around a decimal number, with an optional "of M" tail.
pub(crate) fn page_form(form: &PageForm) -> String {
    let mut out = String::new();
    if !form.prefix.trim().is_empty() {
        out.push_str(&phrase(&form.prefix));
        out.push_str(r"\s*");
    }
    out.push_str(r"\d+");
    if !form.suffix.trim().is_empty() {
        out.push_str(r"\s*");
        out.push_str(&phrase(&form.suffix));
    }
    if let Some(ref connector) = form.total {
        out.push_str(&format!(r"(?:\s*{}\s*\d+)?", phrase(connector)));
    }
    out
}

/// Join alternatives into `(?:a|b)`, or `None` when there are none.
pub(crate) fn alternation<I>(parts: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let parts: Vec<String> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        None
    } else {
        Some(format!("(?:{})", parts.join("|")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_phrase_allows_space_between_cjk() {
        let re = Regex::new(&format!("^{}$", phrase("目录"))).unwrap();
        assert!(re.is_match("目录"));
        assert!(re.is_match("目 录"));
        assert!(!re.is_match("目录页"));
    }

    #[test]
    fn test_phrase_latin_words() {
        let re = Regex::new(&format!("(?i)^{}$", phrase("table of contents"))).unwrap();
        assert!(re.is_match("TABLE OF  CONTENTS"));
        assert!(!re.is_match("tableofcontents"));
    }

    #[test]
    fn test_page_form_with_total() {
        let form = PageForm::new("Page", "").with_total("of");
        let re = Regex::new(&format!("(?i)^{}$", page_form(&form))).unwrap();
        assert!(re.is_match("Page 3 of 10"));
        assert!(re.is_match("page 3"));
        assert!(!re.is_match("Page three"));
    }

    #[test]
    fn test_cjk_marker_is_solid() {
        let pattern = marker(&Marker::new("第", "章"), &char_class("0123一二三"));
        let re = Regex::new(&format!("^{}$", pattern)).unwrap();
        assert!(re.is_match("第3章"));
        assert!(re.is_match("第一二章"));
        assert!(!re.is_match("第 3 章"));
        assert!(!re.is_match("第 三章"));
    }

    #[test]
    fn test_latin_marker_allows_space() {
        let pattern = marker(&Marker::new("chapter", ""), &char_class("0123"));
        let re = Regex::new(&format!("(?i)^{}$", pattern)).unwrap();
        assert!(re.is_match("Chapter 3"));
        assert!(re.is_match("chapter3"));
    }

    #[test]
    fn test_alternation_empty() {
        assert_eq!(alternation(Vec::new()), None);
        assert_eq!(
            alternation(vec!["a".to_string(), "b".to_string()]),
            Some("(?:a|b)".to_string())
        );
    }
}
