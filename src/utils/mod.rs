// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by the validator and the UI.

pub mod digits;
pub mod sanitize_owner;

/// Filter raw input down to ASCII digits with a length cap.
pub use digits::{is_exact_digits, keep_digits};
/// Normalize owner names into uppercase Latin letters and spaces.
pub use sanitize_owner::sanitize_owner_name;
