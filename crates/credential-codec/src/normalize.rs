//! Text normalisation shared by the username and password rules.
//!
//! Every length in this module is measured in `char`s so multi-byte letters
//! such as `ç` count once and truncation never splits a code point.

/// Trims the input and drops everything except letters, digits, and
/// whitespace.
pub(crate) fn clean(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|ch| ch.is_alphanumeric() || ch.is_whitespace())
        .collect()
}

/// Keeps at most `max` characters of `value`.
pub(crate) fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Truncates to `max` characters and drops a separator left dangling at the
/// cut.
pub(crate) fn truncate_at_separator(value: &str, max: usize, separator: char) -> String {
    let mut truncated = truncate_chars(value, max);
    if truncated.ends_with(separator) {
        truncated.pop();
    }
    truncated
}

/// Uppercases the first character and lowercases the rest.
pub(crate) fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Right-pads `value` with `filler` up to `min` characters.
pub(crate) fn pad_chars(value: &str, min: usize, filler: char) -> String {
    let missing = min.saturating_sub(value.chars().count());
    value
        .chars()
        .chain(std::iter::repeat_n(filler, missing))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::punctuation("  A. V. B. Pinheiro!  ", "A V B Pinheiro")]
    #[case::unicode_letters("Refeições & Cia", "Refeições  Cia")]
    #[case::underscores("snake_case", "snakecase")]
    #[case::only_symbols("!!! ---", " ")]
    fn clean_keeps_letters_digits_and_whitespace(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(clean(raw), expected);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("ÇÃOÇÃO", 3), "ÇÃO");
    }

    #[rstest]
    #[case("ABC.DEF", 4, "ABC")]
    #[case("ABC.DEF", 5, "ABC.D")]
    #[case("ABC", 10, "ABC")]
    fn truncation_drops_dangling_separator(
        #[case] raw: &str,
        #[case] max: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(truncate_at_separator(raw, max, '.'), expected);
    }

    #[rstest]
    #[case("acme", "Acme")]
    #[case("ACME", "Acme")]
    #[case("éCOLE", "École")]
    #[case("", "")]
    fn title_case_capitalises_first_letter_only(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(title_case(raw), expected);
    }

    #[test]
    fn pad_fills_up_to_minimum() {
        assert_eq!(pad_chars("A", 4, 'x'), "Axxx");
        assert_eq!(pad_chars("Acme", 4, 'x'), "Acme");
    }
}
