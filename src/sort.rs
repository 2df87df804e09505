//! Natural ordering for page file names.
//!
//! Scanned page images are usually named `page1.webp`, `page2.webp`, ...
//! `page10.webp`, which lexical ordering shuffles (`page10` before
//! `page2`). The natural key compares by the first embedded run of
//! decimal digits instead, with the lower-cased full name as tiebreak.

use std::cmp::Ordering;

/// Integer key assigned to names with no embedded digits, so they sort
/// after every plausibly-numbered page. Stays at 999999 rather than
/// `u64::MAX` to match the ordering existing galleries were built with.
pub const NO_DIGITS_SENTINEL: u64 = 999_999;

/// Compute the natural sort key for a file name: the first run of
/// decimal digits parsed as an integer, paired with the lower-cased
/// full name. Names without digits (or with a digit run too long for
/// `u64`) get [`NO_DIGITS_SENTINEL`].
pub fn natural_key(name: &str) -> (u64, String) {
    let bytes = name.as_bytes();
    let mut number = NO_DIGITS_SENTINEL;

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            number = name[start..i].parse().unwrap_or(NO_DIGITS_SENTINEL);
            break;
        }
        i += 1;
    }

    (number, name.to_lowercase())
}

/// Compare two names by their natural keys.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b))
}

/// Sort names in place by natural key. Stable and independent of file
/// timestamps or OS enumeration order.
pub fn natural_sort<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by_cached_key(|n| natural_key(n.as_ref()));
}
