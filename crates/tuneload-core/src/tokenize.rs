//! Code-point tokenizing of delimiter-separated export lines

/// Split `line` on every occurrence of `delimiter`.
///
/// Matching is per code point, so multi-byte delimiters split correctly.
/// Always yields `occurrences + 1` fields; `expected` only pre-sizes the
/// result and callers check the returned length themselves.
pub fn split(line: &str, delimiter: char, expected: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(expected);
    fields.extend(line.split(delimiter));
    fields
}

/// Remove exactly one trailing `terminator` from `field`, if present.
pub fn strip_trailing(field: &str, terminator: char) -> &str {
    field.strip_suffix(terminator).unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOH: char = '\u{1}';

    #[test]
    fn split_counts_occurrences_plus_one() {
        assert_eq!(split("a\u{1}b\u{1}c", SOH, 3), vec!["a", "b", "c"]);
        assert_eq!(split("a\u{1}b\u{1}c", SOH, 6).len(), 3);
    }

    #[test]
    fn split_keeps_empty_fields() {
        assert_eq!(split("\u{1}\u{1}", SOH, 3), vec!["", "", ""]);
        assert_eq!(split("", SOH, 0), vec![""]);
    }

    #[test]
    fn split_multibyte_delimiter() {
        assert_eq!(split("añb→c→", '→', 3), vec!["añb", "c", ""]);
        assert_eq!(split("日本|語", '本', 2), vec!["日", "|語"]);
    }

    #[test]
    fn split_then_join_reconstructs_line() {
        for line in [
            "1000\u{1}500\u{1}Primary\u{1}true\u{1}http://x\u{1}300\u{2}",
            "\u{1}",
            "no delimiter here",
            "ü\u{1}ß\u{1}\u{1}",
        ] {
            let fields = split(line, SOH, 4);
            assert_eq!(fields.len(), line.matches(SOH).count() + 1);
            assert_eq!(fields.join("\u{1}"), line);
        }
    }

    #[test]
    fn strip_trailing_removes_one() {
        assert_eq!(strip_trailing("300\u{2}", '\u{2}'), "300");
        assert_eq!(strip_trailing("300\u{2}\u{2}", '\u{2}'), "300\u{2}");
    }

    #[test]
    fn strip_trailing_without_terminator_is_noop() {
        assert_eq!(strip_trailing("300", '\u{2}'), "300");
        assert_eq!(strip_trailing("", '\u{2}'), "");
        assert_eq!(strip_trailing("\u{2}300", '\u{2}'), "\u{2}300");
    }
}
