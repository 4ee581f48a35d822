//! Script classification of single characters.
//!
//! The policy looks at exactly one character (left of the caret) per decision,
//! so classification is a total function over `char` with three outcomes. The
//! foreign set is a fixed table of contiguous Unicode ranges rather than a
//! general script database: the switcher targets one concrete composer family
//! and the table is the contract.

/// Classification of a single character for switching purposes.
///
/// Total and disjoint: every `char` maps to exactly one class.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScriptClass {
    /// ASCII letter or digit: evidence for Latin mode.
    Alnum,
    /// Inside one of [`FOREIGN_RANGES`]: evidence for Foreign mode.
    Foreign,
    /// Everything else: punctuation, whitespace, other scripts. Neutral.
    Other,
}

/// Inclusive `char` ranges treated as foreign script, ascending and
/// non-overlapping.
pub const FOREIGN_RANGES: &[(char, char)] = &[
    ('\u{3004}', '\u{3007}'), // ideographic iteration/closing marks, zero
    ('\u{3040}', '\u{309F}'), // Hiragana
    ('\u{30A0}', '\u{30FF}'), // Katakana
    ('\u{3400}', '\u{4DBF}'), // CJK Extension A
    ('\u{4E00}', '\u{9FFF}'), // CJK Unified Ideographs
    ('\u{F900}', '\u{FAFF}'), // CJK Compatibility Ideographs
    ('\u{FF66}', '\u{FF9F}'), // Halfwidth Katakana
];

const fn in_foreign_ranges(ch: char) -> bool {
    let c = ch as u32;
    let mut i = 0;
    while i < FOREIGN_RANGES.len() {
        let (lo, hi) = FOREIGN_RANGES[i];
        if c < lo as u32 {
            return false;
        }
        if c <= hi as u32 {
            return true;
        }
        i += 1;
    }
    false
}

/// Classifies a character. Total over `char`.
#[must_use]
pub const fn classify_char(ch: char) -> ScriptClass {
    if ch.is_ascii_alphanumeric() {
        ScriptClass::Alnum
    } else if in_foreign_ranges(ch) {
        ScriptClass::Foreign
    } else {
        ScriptClass::Other
    }
}

/// Line terminators that make the left-of-caret character uninformative.
#[must_use]
pub const fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_alnum_classifies_as_alnum() {
        for ch in ['a', 'z', 'A', 'Z', '0', '9', 'q'] {
            assert_eq!(classify_char(ch), ScriptClass::Alnum, "{ch:?}");
        }
    }

    #[test]
    fn kana_and_ideographs_classify_as_foreign() {
        for ch in ['あ', 'ん', 'ア', 'ヶ', '一', '鷗', '々', '〆', 'ｱ', 'ﾟ'] {
            assert_eq!(classify_char(ch), ScriptClass::Foreign, "{ch:?}");
        }
    }

    #[test]
    fn punctuation_whitespace_and_other_scripts_are_other() {
        for ch in [' ', '.', ',', '!', '\t', 'é', 'ф', 'α', '。', '、'] {
            assert_eq!(classify_char(ch), ScriptClass::Other, "{ch:?}");
        }
    }

    #[test]
    fn range_boundaries_are_inclusive() {
        assert_eq!(classify_char('\u{3040}'), ScriptClass::Foreign);
        assert_eq!(classify_char('\u{309F}'), ScriptClass::Foreign);
        assert_eq!(classify_char('\u{303F}'), ScriptClass::Other);
        assert_eq!(classify_char('\u{4E00}'), ScriptClass::Foreign);
        assert_eq!(classify_char('\u{9FFF}'), ScriptClass::Foreign);
        assert_eq!(classify_char('\u{A000}'), ScriptClass::Other);
        assert_eq!(classify_char('\u{FF65}'), ScriptClass::Other);
        assert_eq!(classify_char('\u{FF66}'), ScriptClass::Foreign);
        assert_eq!(classify_char('\u{FF9F}'), ScriptClass::Foreign);
        assert_eq!(classify_char('\u{FFA0}'), ScriptClass::Other);
    }

    #[test]
    fn line_breaks_are_recognized() {
        assert!(is_line_break('\n'));
        assert!(is_line_break('\r'));
        assert!(is_line_break('\u{2028}'));
        assert!(is_line_break('\u{2029}'));
        assert!(!is_line_break(' '));
        assert!(!is_line_break('\t'));
    }

    #[test]
    fn line_breaks_classify_as_other() {
        for ch in ['\n', '\r', '\u{2028}', '\u{2029}'] {
            assert_eq!(classify_char(ch), ScriptClass::Other, "{ch:?}");
        }
    }
}
