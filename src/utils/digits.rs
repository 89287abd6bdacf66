// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Digit filtering for segmented numeric inputs.

/// Keep the ASCII digits of `raw`, in order, capped at `max` characters.
///
/// Letters, symbols, whitespace and non-ASCII digits are discarded.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(cardpack::utils::keep_digits("12-3a4 5", 4), "1234");
/// ```
pub fn keep_digits(raw: &str, max: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// True when `value` is exactly `len` ASCII digits.
pub fn is_exact_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}
