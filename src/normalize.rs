//! Folds accented text down to the lowercase base letters used in email local-parts.

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Decomposes `s` (NFD), drops combining diacritical marks and lowercases the rest.
///
/// Total over any input: scripts without decomposable diacritics pass through
/// unchanged apart from case folding.
///
/// ```text
/// normalize("José")     == "jose"
/// normalize("François") == "francois"
/// ```
pub(crate) fn normalize(s: &str) -> String {
    let stripped: String = s.nfd().filter(|c| !COMBINING_MARKS.contains(c)).collect();
    stripped.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    /// Name-like text drawn from Latin, accented Latin, Greek and Cyrillic letters.
    #[derive(Debug, Clone)]
    struct NameLike(String);

    const NAME_CHARS: &[char] = &[
        'a', 'B', 'z', 'É', 'é', 'è', 'ç', 'Ç', 'ñ', 'Ñ', 'ü', 'Ö', 'å', 'Ø', 'ß', 'İ', 'ł', 'Ł',
        'Ά', 'ω', 'Ж', 'й', '李', ' ', '-', '\'', '\u{0301}', '\u{0308}',
    ];

    impl Arbitrary for NameLike {
        fn arbitrary(g: &mut Gen) -> Self {
            let len = usize::arbitrary(g) % 24;
            let name = (0..len)
                .map(|_| *g.choose(NAME_CHARS).unwrap_or(&'a'))
                .collect();
            Self(name)
        }
    }

    #[test]
    fn test_normalize_folds_accents() {
        assert_eq!(normalize("José"), "jose");
        assert_eq!(normalize("François"), "francois");
        assert_eq!(normalize("Zoë Ångström"), "zoe angstrom");
        assert_eq!(normalize("MÜLLER"), "muller");
    }

    #[test]
    fn test_normalize_plain_ascii_is_untouched() {
        assert_eq!(normalize("john"), "john");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_keeps_letters_without_decomposition() {
        // Stroke and sharp-s are base letters, not base + mark.
        assert_eq!(normalize("Łukasz"), "łukasz");
        assert_eq!(normalize("Straße"), "straße");
        assert_eq!(normalize("Дмитрий"), "дмитрии");
        assert_eq!(normalize("李"), "李");
    }

    #[test]
    fn test_normalize_drops_loose_combining_marks() {
        assert_eq!(normalize("e\u{0301}"), "e");
        assert_eq!(normalize("\u{0301}\u{0308}"), "");
    }

    #[quickcheck]
    fn normalize_is_idempotent(name: NameLike) -> bool {
        let once = normalize(&name.0);
        normalize(&once) == once
    }

    #[quickcheck]
    fn normalize_leaves_no_combining_marks(name: NameLike) -> bool {
        !normalize(&name.0).chars().any(|c| COMBINING_MARKS.contains(&c))
    }
}
