//! Digit extraction shared by the CPF and phone rules

/// Remove every character that is not an ASCII digit
///
/// Masks, spaces and letters are all dropped; `"529.982.247-25"` becomes
/// `"52998224725"`. Non-ASCII digits (e.g. Arabic-Indic) are dropped too.
#[must_use]
pub fn strip_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Numeric values of the ASCII digits in `input`, at most `limit` of them
pub(crate) fn digit_values(input: &str, limit: usize) -> Vec<u8> {
    input
        .bytes()
        .filter(u8::is_ascii_digit)
        .take(limit)
        .map(|b| b - b'0')
        .collect()
}
