// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Startup configuration: where the card list lives and how long free-text fields may be.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::models::card_entry::EntryPolicy;

/// Environment variable overriding the card store location.
pub const STORE_ENV: &str = "CARDPACK_STORE";

const STORE_DIR: &str = ".cardpack";
const STORE_FILE: &str = "cards.json";

/// Settings resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file holding the card list.
    pub store_path: PathBuf,
    /// Field bounds applied by the entry form.
    pub policy: EntryPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(STORE_FILE),
            policy: EntryPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Self {
        let store_path = resolve_store_path(
            std::env::var_os(STORE_ENV),
            std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")),
        );
        Self {
            store_path,
            ..Self::default()
        }
    }
}

/// Pick the store path: explicit override, then `~/.cardpack/cards.json`,
/// then `cards.json` in the working directory.
fn resolve_store_path(override_path: Option<OsString>, home: Option<OsString>) -> PathBuf {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    match home.filter(|h| !h.is_empty()) {
        Some(home) => PathBuf::from(home).join(STORE_DIR).join(STORE_FILE),
        None => PathBuf::from(STORE_FILE),
    }
}
