// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Card record domain model and assembly from validated entry fields (UI-agnostic).

use serde::{Deserialize, Serialize};

use crate::models::card_entry::CardEntry;

/// Shown instead of an empty owner name.
pub const OWNER_PLACEHOLDER: &str = "NAME";
/// Shown instead of an empty expiry date.
pub const EXPIRE_PLACEHOLDER: &str = "MM/YY";

/// Display name and color offered by the brand picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardBrand {
    pub name: &'static str,
    pub color: [u8; 3],
}

/// Brands the user can choose from, in picker order.
pub const CARD_BRANDS: [CardBrand; 8] = [
    CardBrand {
        name: "Poco Card",
        color: [0xE2, 0x4A, 0x4A],
    },
    CardBrand {
        name: "Jun Card",
        color: [0x54, 0x7C, 0xE3],
    },
    CardBrand {
        name: "Park Card",
        color: [0x73, 0xBC, 0x6D],
    },
    CardBrand {
        name: "Brandy Card",
        color: [0xDE, 0x59, 0xB9],
    },
    CardBrand {
        name: "Lloyd Card",
        color: [0x04, 0xC0, 0x9E],
    },
    CardBrand {
        name: "Dobby Card",
        color: [0xE7, 0x6E, 0x9A],
    },
    CardBrand {
        name: "Colin Card",
        color: [0xF3, 0x7D, 0x3B],
    },
    CardBrand {
        name: "Sun Card",
        color: [0xFB, 0xCD, 0x58],
    },
];

impl Default for CardBrand {
    fn default() -> Self {
        CARD_BRANDS[0]
    }
}

/// A submitted card as stored in the card list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    pub card_name: String,
    /// Dash-joined number segments, e.g. `1111-2222-3333-4444`.
    pub card_number: String,
    pub owner_name: String,
    /// Slash-joined expiry, e.g. `01/29`.
    pub expire_date: String,
    pub color: [u8; 3],
    /// Optional alias set on the completion or edit page.
    #[serde(default)]
    pub nickname: String,
}

/// What a card face shows while the form is still being filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardPreview {
    pub card_name: String,
    pub card_number: String,
    pub owner_name: String,
    pub expire_date: String,
}

impl CardPreview {
    /// Project entry fields onto the card face, filling placeholders.
    pub fn from_entry(entry: &CardEntry, brand: &CardBrand) -> Self {
        let owner = entry.owner_name.owner_name.trim_end();
        let expire = entry.expire_date.slashed();
        Self {
            card_name: brand.name.to_string(),
            card_number: entry.card_number.dashed(),
            owner_name: if owner.is_empty() {
                OWNER_PLACEHOLDER.to_string()
            } else {
                owner.to_string()
            },
            expire_date: if expire.is_empty() {
                EXPIRE_PLACEHOLDER.to_string()
            } else {
                expire
            },
        }
    }
}

impl From<&CardRecord> for CardPreview {
    fn from(record: &CardRecord) -> Self {
        Self {
            card_name: record.card_name.clone(),
            card_number: record.card_number.clone(),
            owner_name: record.owner_name.clone(),
            expire_date: record.expire_date.clone(),
        }
    }
}

/// Assemble a card record from already-normalized entry fields.
///
/// Pure assembly: no validation happens here, callers check
/// [`crate::models::card_entry::is_submittable`] first.
///
/// # Examples
///
/// ```rust,ignore
/// let record = build_record("id-1", &entry, &CARD_BRANDS[0]);
/// assert_eq!(record.card_number, "1111-2222-3333-4444");
/// ```
pub fn build_record(id: impl Into<String>, entry: &CardEntry, brand: &CardBrand) -> CardRecord {
    let preview = CardPreview::from_entry(entry, brand);
    CardRecord {
        id: id.into(),
        card_name: preview.card_name,
        card_number: preview.card_number,
        owner_name: preview.owner_name,
        expire_date: preview.expire_date,
        color: brand.color,
        nickname: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card_entry::{CardNumberFields, ExpireDateFields, OwnerNameField};

    fn entry_with_number() -> CardEntry {
        CardEntry {
            card_number: CardNumberFields {
                segments: [
                    "1111".into(),
                    "2222".into(),
                    "3333".into(),
                    "4444".into(),
                ],
            },
            ..CardEntry::default()
        }
    }

    #[test]
    fn build_record_dash_joins_card_number() {
        let record = build_record("card-1", &entry_with_number(), &CARD_BRANDS[2]);

        assert_eq!(record.id, "card-1");
        assert_eq!(record.card_number, "1111-2222-3333-4444");
        assert_eq!(record.card_name, "Park Card");
        assert_eq!(record.color, CARD_BRANDS[2].color);
        assert!(record.nickname.is_empty());
    }

    #[test]
    fn build_record_uses_placeholders_for_empty_fields() {
        let record = build_record("card-2", &CardEntry::default(), &CardBrand::default());

        assert_eq!(record.owner_name, OWNER_PLACEHOLDER);
        assert_eq!(record.expire_date, EXPIRE_PLACEHOLDER);
        assert_eq!(record.card_number, "");
    }

    #[test]
    fn build_record_skips_empty_segments_and_parts() {
        let mut entry = entry_with_number();
        entry.card_number.segments[1].clear();
        entry.expire_date = ExpireDateFields {
            month: "07".into(),
            year: String::new(),
        };
        entry.owner_name = OwnerNameField {
            owner_name: "ADA ".into(),
        };

        let record = build_record("card-3", &entry, &CardBrand::default());

        assert_eq!(record.card_number, "1111-3333-4444");
        assert_eq!(record.expire_date, "07");
        assert_eq!(record.owner_name, "ADA");
    }

    #[test]
    fn record_without_nickname_deserializes() {
        let json = r#"{"id":"a","card_name":"Sun Card","card_number":"1111","owner_name":"NAME","expire_date":"MM/YY","color":[1,2,3]}"#;
        let record: CardRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.color, [1, 2, 3]);
        assert!(record.nickname.is_empty());
    }
}
