//! Numeric menu answers.
//!
//! Menus are 1-based. An answer is a whitespace-separated list of numbers;
//! an empty answer means "keep the default".

use crate::domain::error::DomainError;

/// `true` when every token of `input` is an integer in `[1, len]`.
///
/// Empty (or whitespace-only) input is accepted.
pub fn in_range(input: &str, len: usize) -> bool {
    input
        .split_whitespace()
        .all(|token| token.parse::<usize>().is_ok_and(|n| (1..=len).contains(&n)))
}

/// Parse a menu answer into 1-based indices, keeping first occurrences.
pub fn parse(input: &str, len: usize) -> Result<Vec<usize>, DomainError> {
    if !in_range(input, len) {
        return Err(DomainError::InvalidSelection {
            input: input.trim().to_string(),
            max: len,
        });
    }

    let mut picked = Vec::new();
    for token in input.split_whitespace() {
        // in_range already guarantees the parse succeeds.
        if let Ok(n) = token.parse::<usize>() {
            if !picked.contains(&n) {
                picked.push(n);
            }
        }
    }
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_valid() {
        assert!(in_range("", 3));
        assert!(in_range("   ", 0));
    }

    #[test]
    fn numbers_within_bounds_are_valid() {
        assert!(in_range("1", 3));
        assert!(in_range("1 2 3", 3));
        assert!(in_range("  3   1 ", 3));
    }

    #[test]
    fn out_of_range_is_invalid() {
        assert!(!in_range("0", 3));
        assert!(!in_range("4", 3));
        assert!(!in_range("1 4", 3));
        assert!(!in_range("1", 0));
    }

    #[test]
    fn non_numeric_is_invalid() {
        assert!(!in_range("a", 3));
        assert!(!in_range("1,2", 3));
        assert!(!in_range("-1", 3));
        assert!(!in_range("1.5", 3));
    }

    #[test]
    fn parse_deduplicates_in_order() {
        assert_eq!(parse("3 1 3", 3).unwrap(), vec![3, 1]);
        assert_eq!(parse("", 3).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(matches!(
            parse("7", 3),
            Err(DomainError::InvalidSelection { max: 3, .. })
        ));
    }
}
