// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Card list ownership and JSON persistence.
//!
//! Responsibilities:
//! - Keep submitted cards in append order.
//! - Apply nickname edits and removals by card id.
//! - Load and save the list as a JSON array of card records.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::card::CardRecord;

/// Cards owned by the running session, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardList {
    cards: Vec<CardRecord>,
}

impl CardList {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self { cards }
    }

    /// Append a freshly submitted card.
    pub fn push(&mut self, card: CardRecord) {
        self.cards.push(card);
    }

    pub fn get(&self, id: &str) -> Option<&CardRecord> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.iter()
    }

    pub fn as_slice(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Set a nickname, trimmed and truncated to `max_len` characters.
    ///
    /// Returns `false` when no card has the given id.
    pub fn set_nickname(&mut self, id: &str, nickname: &str, max_len: usize) -> bool {
        match self.cards.iter_mut().find(|c| c.id == id) {
            Some(card) => {
                let truncated: String = nickname.trim().chars().take(max_len).collect();
                card.nickname = truncated.trim_end().to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a card by id, returning it when present.
    pub fn remove(&mut self, id: &str) -> Option<CardRecord> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(index))
    }
}

/// Load the card list from `path`.
///
/// A missing file yields an empty list so first launches start clean.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read or is not a
/// JSON array of card records.
pub fn load_cards(path: &Path) -> Result<CardList> {
    if !path.exists() {
        log::debug!("no card store at {:?}; starting empty", path);
        return Ok(CardList::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read card store {:?}", path))?;
    let cards: Vec<CardRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Card store {:?} is not valid card JSON", path))?;
    Ok(CardList::new(cards))
}

/// Write the card list to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error when the parent directory cannot be created or the file
/// cannot be written.
pub fn save_cards(path: &Path, cards: &[CardRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create store directory {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(cards).context("Failed to serialize cards")?;
    fs::write(path, json).with_context(|| format!("Failed to write card store {:?}", path))?;
    Ok(())
}
