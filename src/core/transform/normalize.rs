//! Transliteration normalization
//!
//! Maps raw ATF sign strings to TEI inline content: ASCII digraphs become
//! their Unicode letters, the result is XML-escaped, then determinative and
//! logogram markup is turned into `<c>` elements.
//!
//! Logogram spans are paired by two independent substitutions, one for the
//! opening `_` and one for the closing `_`, not by a matching parser. A token
//! with an unmatched marker therefore yields an unbalanced `<c>` tag; this
//! never panics, and the resulting document is rejected by the export check.
//! See <http://oracc.org/doc/help/editinginatf/primer/inlinetutorial/>.

use once_cell::sync::Lazy;
use quick_xml::escape::partial_escape;
use regex::Regex;

/// ASCII digraphs and their Unicode letters, applied in this order
pub const DIGRAPHS: [(&str, &str); 12] = [
    ("sz", "\u{0161}"),  // š
    ("SZ", "\u{0160}"),  // Š
    ("s,", "\u{1E63}"),  // ṣ
    ("S,", "\u{1E62}"),  // Ṣ
    ("t,", "\u{1E6D}"),  // ṭ
    ("T,", "\u{1E6C}"),  // Ṭ
    ("s'", "\u{015B}"),  // ś
    ("S'", "\u{015A}"),  // Ś
    ("h,", "\u{1E2B}"),  // ḫ
    ("H,", "\u{1E2A}"),  // Ḫ
    ("j", "\u{014B}"),   // ŋ
    ("J", "\u{014A}"),   // Ŋ
];

static DETERMINATIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("valid determinative regex"));

static LOGOGRAM_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_([\w<\{(\[|.]+)").expect("valid logogram open regex"));

static LOGOGRAM_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\w)\}>|.#?]+)_").expect("valid logogram close regex"));

/// Normalizes one transliterated token
///
/// # Examples
///
/// ```
/// use atf2cts::core::transform::normalize::normalize_word;
///
/// assert_eq!(normalize_word("szarrum"), "šarrum");
/// assert_eq!(
///     normalize_word("{d}utu"),
///     r#"<c type="determinative">d</c>utu"#
/// );
/// ```
pub fn normalize_word(word: &str) -> String {
    let mut word = word.to_string();
    for (digraph, letter) in DIGRAPHS {
        if word.contains(digraph) {
            word = word.replace(digraph, letter);
        }
    }

    let escaped = partial_escape(&word);
    let marked = DETERMINATIVE.replace_all(&escaped, r#"<c type="determinative">${1}</c>"#);
    let marked = LOGOGRAM_OPEN.replace_all(&marked, r#"<c type="sign" subtype="logo">${1}"#);
    let marked = LOGOGRAM_CLOSE.replace_all(&marked, "${1}</c>");
    marked.into_owned()
}

/// Normalizes a line's tokens and joins them with single spaces
pub fn normalize_transliteration<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|word| normalize_word(word.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("sz", "š" ; "sz")]
    #[test_case("SZ", "Š" ; "upper sz")]
    #[test_case("s,", "ṣ" ; "s comma")]
    #[test_case("S,", "Ṣ" ; "upper s comma")]
    #[test_case("t,", "ṭ" ; "t comma")]
    #[test_case("T,", "Ṭ" ; "upper t comma")]
    #[test_case("s'", "ś" ; "s acute")]
    #[test_case("S'", "Ś" ; "upper s acute")]
    #[test_case("h,", "ḫ" ; "h comma")]
    #[test_case("H,", "Ḫ" ; "upper h comma")]
    #[test_case("j", "ŋ" ; "eng")]
    #[test_case("J", "Ŋ" ; "upper eng")]
    fn test_digraphs(input: &str, expected: &str) {
        assert_eq!(normalize_word(input), expected);
    }

    #[test_case("lugal" ; "plain word")]
    #[test_case("a-na" ; "hyphenated")]
    #[test_case("e2-gal-la" ; "with index")]
    #[test_case("x" ; "single sign")]
    fn test_plain_tokens_unchanged(word: &str) {
        assert_eq!(normalize_word(word), word);
    }

    #[test]
    fn test_szarrum() {
        let out = normalize_word("szarrum");
        assert!(out.contains('š'));
        assert!(!out.contains("sz"));
        assert_eq!(out, "šarrum");
    }

    #[test]
    fn test_digraphs_applied_globally() {
        assert_eq!(normalize_word("sza-sza"), "ša-ša");
        assert_eq!(normalize_word("t,e4-h,i"), "ṭe4-ḫi");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(normalize_word("a&b"), "a&amp;b");
        assert_eq!(normalize_word("<x>"), "&lt;x&gt;");
    }

    #[test]
    fn test_determinative() {
        assert_eq!(
            normalize_word("{d}utu"),
            r#"<c type="determinative">d</c>utu"#
        );
        assert_eq!(
            normalize_word("{gesz}tukul"),
            r#"<c type="determinative">geš</c>tukul"#
        );
    }

    #[test]
    fn test_logogram_single_token() {
        assert_eq!(
            normalize_word("_lugal_"),
            r#"<c type="sign" subtype="logo">lugal</c>"#
        );
    }

    #[test]
    fn test_logogram_with_determinative() {
        assert_eq!(
            normalize_word("_{d}utu_"),
            r#"<c type="sign" subtype="logo"><c type="determinative">d</c>utu</c>"#
        );
    }

    #[test]
    fn test_logogram_spanning_tokens() {
        assert_eq!(
            normalize_transliteration(&["_e2", "gal_"]),
            r#"<c type="sign" subtype="logo">e2 gal</c>"#
        );
    }

    #[test]
    fn test_unmatched_marker_does_not_panic() {
        assert_eq!(
            normalize_word("_lugal"),
            r#"<c type="sign" subtype="logo">lugal"#
        );
        assert_eq!(normalize_word("lugal_"), "lugal</c>");
        assert_eq!(normalize_word("_"), "_");
    }

    #[test]
    fn test_join_with_single_space() {
        assert_eq!(normalize_transliteration(&["a-na", "szarrim"]), "a-na šarrim");
        assert_eq!(normalize_transliteration::<&str>(&[]), "");
    }
}
