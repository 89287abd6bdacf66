// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Normalize card owner names into the embossable character set.

/// Produce an owner name made of uppercase Latin letters and single spaces.
///
/// # Steps
/// - Transliterate Unicode to ASCII with `deunicode` (e.g., "José" → "Jose").
/// - Uppercase; drop everything that is not `A-Z` or a space.
/// - Drop leading spaces and collapse runs of spaces into one.
/// - Stop once `max_len` characters have been kept.
///
/// Trailing spaces are preserved so the user can keep typing the next word.
/// Applying the function to its own output returns the same string.
pub fn sanitize_owner_name(value: &str, max_len: usize) -> String {
    // Step 1: transliterate to ASCII to avoid multi-byte surprises.
    let transliterated = deunicode::deunicode(value);
    let mut out = String::with_capacity(transliterated.len().min(max_len));

    // Step 2: map characters into the allowed set and collapse runs of spaces.
    for ch in transliterated.chars() {
        if out.len() >= max_len {
            break;
        }

        match ch.to_ascii_uppercase() {
            ' ' => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            c if c.is_ascii_uppercase() => out.push(c),
            _ => {}
        }
    }

    out
}
