//! Search-string classification.
//!
//! # Rules
//! - 3 to 7 ASCII digits → `ZipOrCode` (postal code or its prefix)
//! - exactly 7 ASCII word characters `[A-Za-z0-9_]` → `ZipOrCode` (digital address)
//! - anything else, including the empty string → `FreeText`
//!
//! # Design Decisions
//! - Byte-wise checks, no regex: both rules are anchored and ASCII-only
//! - Surrounding whitespace is not trimmed; `" 1020082"` is free text

/// Which upstream search a query is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    ZipOrCode,
    FreeText,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::ZipOrCode => "zip_or_code",
            QueryKind::FreeText => "free_text",
        }
    }
}

/// Classify a raw `search_code` value.
pub fn classify(search_code: &str) -> QueryKind {
    if is_numeric_code(search_code) || is_word_code(search_code) {
        QueryKind::ZipOrCode
    } else {
        QueryKind::FreeText
    }
}

fn is_numeric_code(s: &str) -> bool {
    (3..=7).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_word_code(s: &str) -> bool {
    s.len() == 7 && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_lengths() {
        for len in 1..=12 {
            let code = "1".repeat(len);
            let expected = if (3..=7).contains(&len) {
                QueryKind::ZipOrCode
            } else {
                QueryKind::FreeText
            };
            assert_eq!(classify(&code), expected, "length {}", len);
        }
    }

    #[test]
    fn test_postal_code() {
        assert_eq!(classify("1020082"), QueryKind::ZipOrCode);
        assert_eq!(classify("102"), QueryKind::ZipOrCode);
    }

    #[test]
    fn test_seven_word_characters() {
        assert_eq!(classify("AB12345"), QueryKind::ZipOrCode);
        assert_eq!(classify("abc_def"), QueryKind::ZipOrCode);
        assert_eq!(classify("_______"), QueryKind::ZipOrCode);

        assert_eq!(classify("AB1234"), QueryKind::FreeText);
        assert_eq!(classify("AB123456"), QueryKind::FreeText);
    }

    #[test]
    fn test_free_text() {
        assert_eq!(classify(""), QueryKind::FreeText);
        assert_eq!(classify("東京都"), QueryKind::FreeText);
        assert_eq!(classify("東京都千代田区"), QueryKind::FreeText);
        assert_eq!(classify("102-0082"), QueryKind::FreeText);
        assert_eq!(classify("AB-1234"), QueryKind::FreeText);
        assert_eq!(classify("1020082\n"), QueryKind::FreeText);
        assert_eq!(classify(" 102008"), QueryKind::FreeText);
    }

    #[test]
    fn test_non_ascii_digits_are_free_text() {
        // Fullwidth and Arabic-Indic digits.
        assert_eq!(classify("１０２００８２"), QueryKind::FreeText);
        assert_eq!(classify("١٢٣"), QueryKind::FreeText);
    }
}
