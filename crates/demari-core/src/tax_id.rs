// Tax id (CPF) input mask: `DDD.DDD.DDD-DD`.

/// Number of digits in a complete tax id.
pub const TAX_ID_DIGITS: usize = 11;

/// Length of a fully formatted tax id, punctuation included.
pub const TAX_ID_LEN: usize = 14;

/// Format raw input as a (possibly partial) tax id.
///
/// Non-digits are dropped and at most 11 digits are kept. Punctuation is only
/// inserted once the digit that follows it has been typed, so `"123"` stays
/// `"123"` and `"1234"` becomes `"123.4"`.
pub fn mask_tax_id(raw: &str) -> String {
    let mut masked = String::with_capacity(TAX_ID_LEN);
    for (i, digit) in raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(TAX_ID_DIGITS)
        .enumerate()
    {
        match i {
            3 | 6 => masked.push('.'),
            9 => masked.push('-'),
            _ => {}
        }
        masked.push(digit);
    }
    masked
}

/// True when `masked` is a fully formatted tax id.
pub fn is_complete(masked: &str) -> bool {
    masked.len() == TAX_ID_LEN && mask_tax_id(masked) == masked
}
