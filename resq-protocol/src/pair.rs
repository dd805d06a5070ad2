//! Pair-line tokenizer.
//!
//! A pair line is `<left> - <right>`. The first `-` is the delimiter and both
//! halves are trimmed, so `Clinic-555 0101` and `Clinic - 555 0101` read the
//! same. Hyphens after the first stay in the right-hand side.

/// Errors that can occur while tokenizing a pair line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairError {
    /// Line has no `-` delimiter
    MissingDelimiter,
    /// One of the halves does not fit its fixed-capacity field
    FieldTooLong,
}

/// A `left - right` record borrowed from a message line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairLine<'a> {
    pub left: &'a str,
    pub right: &'a str,
}

impl<'a> PairLine<'a> {
    /// Split a line on its first `-`
    pub fn parse(line: &'a str) -> Result<Self, PairError> {
        let (left, right) = line.split_once('-').ok_or(PairError::MissingDelimiter)?;
        Ok(Self {
            left: left.trim(),
            right: right.trim(),
        })
    }
}

/// Iterate over the trimmed, non-empty lines of a message body
pub fn body_lines(body: &str) -> impl Iterator<Item = &str> {
    body.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_spaced() {
        let pair = PairLine::parse("Alice - 5559999").unwrap();
        assert_eq!(pair.left, "Alice");
        assert_eq!(pair.right, "5559999");
    }

    #[test]
    fn test_pair_unspaced() {
        let pair = PairLine::parse("HospitalA-5551234").unwrap();
        assert_eq!(pair.left, "HospitalA");
        assert_eq!(pair.right, "5551234");
    }

    #[test]
    fn test_first_dash_is_delimiter() {
        let pair = PairLine::parse("Clinic - 555-0101").unwrap();
        assert_eq!(pair.left, "Clinic");
        assert_eq!(pair.right, "555-0101");
    }

    #[test]
    fn test_missing_delimiter() {
        assert_eq!(
            PairLine::parse("no delimiter here"),
            Err(PairError::MissingDelimiter)
        );
    }

    #[test]
    fn test_empty_sides() {
        let pair = PairLine::parse(" - ").unwrap();
        assert!(pair.left.is_empty());
        assert!(pair.right.is_empty());
    }

    #[test]
    fn test_body_lines_trim_and_skip_empty() {
        let mut lines = body_lines("  first \r\n\r\n\tsecond\n   \nthird");
        assert_eq!(lines.next(), Some("first"));
        assert_eq!(lines.next(), Some("second"));
        assert_eq!(lines.next(), Some("third"));
        assert_eq!(lines.next(), None);
    }
}
