//! Rejoining line-wrapped paragraph fragments.

/// Marks that end a sentence (and must not start a continuation).
pub const TERMINAL_PUNCTUATION: [char; 10] = ['。', '！', '？', '；', '：', '.', '!', '?', ';', ':'];

/// Lines shorter than this (in characters) are only merged with a longer line.
pub const SHORT_LINE_CHARS: usize = 10;

/// Decide whether `next` continues the logical line `current`.
pub fn should_merge(current: &str, next: &str) -> bool {
    if current.is_empty() || next.is_empty() {
        return false;
    }

    if current.ends_with(TERMINAL_PUNCTUATION) {
        return false;
    }

    if next.starts_with(TERMINAL_PUNCTUATION) {
        return false;
    }

    // Two short fragments are more likely separate items than a wrapped line
    let short = |s: &str| s.chars().count() < SHORT_LINE_CHARS;
    if short(current) && short(next) {
        return false;
    }

    true
}

/// Merge wrapped lines into logical lines.
///
/// Single left fold: the accumulator absorbs each following line while
/// [`should_merge`] holds (concatenated with no separator), otherwise it is
/// flushed. Apply once per run of body text; never across a heading.
pub fn merge(lines: Vec<String>) -> Vec<String> {
    let mut iter = lines.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    for next in iter {
        if should_merge(&current, &next) {
            current.push_str(&next);
        } else {
            merged.push(std::mem::replace(&mut current, next));
        }
    }
    merged.push(current);
    merged
}
