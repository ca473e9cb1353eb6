//! Text helpers shared by note validation and reconstruction.
//!
//! [`strip_markup`] removes every substring matching `<[^>]*>`. It is not an
//! HTML sanitizer: there is no nesting awareness and no entity decoding, so
//! `&lt;b&gt;` passes through untouched and a lone `<` without a closing `>`
//! is kept.

use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"))
}

pub fn strip_markup(text: &str) -> String {
    tag_pattern().replace_all(text, "").into_owned()
}

/// Separator set of a JavaScript `\s` class. Unicode `White_Space` minus NEL,
/// plus the zero-width no-break space.
fn is_word_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Number of whitespace-separated words; runs of whitespace count once.
pub fn word_count(text: &str) -> usize {
    text.split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count()
}

/// Length in UTF-16 code units, the unit browsers measure text in.
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_keeps_content() {
        assert_eq!(
            strip_markup(r#"<b>bold</b> <script>alert("xss")</script>text"#),
            r#"bold alert("xss")text"#
        );
    }

    #[test]
    fn tags_may_span_lines_and_carry_attributes() {
        assert_eq!(strip_markup("a<img\nsrc=x onerror=alert(1)>b"), "ab");
    }

    #[test]
    fn unclosed_bracket_survives() {
        assert_eq!(strip_markup("1 < 2"), "1 < 2");
        assert_eq!(strip_markup("x <y"), "x <y");
    }

    #[test]
    fn entities_are_not_decoded() {
        assert_eq!(strip_markup("&lt;b&gt;"), "&lt;b&gt;");
    }

    #[test]
    fn word_count_ignores_empty_tokens() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("  happy \n\t birthday  "), 2);
    }

    #[test]
    fn zero_width_no_break_space_separates_words() {
        assert_eq!(word_count("a\u{feff}b\u{feff}c"), 3);
        assert_eq!(word_count(&vec!["w"; 51].join("\u{feff}")), 51);
        assert_eq!(word_count("\u{feff}"), 0);
    }

    #[test]
    fn next_line_does_not_separate_words() {
        assert_eq!(word_count("a\u{85}b"), 1);
        assert_eq!(word_count(&vec!["w"; 51].join("\u{85}")), 1);
    }

    #[test]
    fn unicode_spaces_separate_words() {
        for sep in ['\u{a0}', '\u{2003}', '\u{2028}', '\u{3000}', '\u{b}', '\u{c}'] {
            assert_eq!(word_count(&format!("a{sep}b")), 2, "{sep:?}");
        }
    }

    #[test]
    fn text_len_counts_utf16_units() {
        assert_eq!(text_len("abc"), 3);
        assert_eq!(text_len("é"), 1);
        assert_eq!(text_len("🌹"), 2);
    }
}
