// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Card entry validation: per-field normalization and validity rules.
//!
//! Every update is a pure function taking the previous field group plus the
//! raw keystroke text and returning the normalized group together with its
//! validity flag. Invalid or partial input never raises an error; it simply
//! reports `false`.

use crate::utils::{is_exact_digits, keep_digits, sanitize_owner_name};

/// Digits per card-number segment.
pub const CARD_SEGMENT_LEN: usize = 4;
/// Number of card-number segments.
pub const CARD_SEGMENT_COUNT: usize = 4;
/// Digits in each expiry part (month, year).
pub const EXPIRE_PART_LEN: usize = 2;
/// Digits in a CVC.
pub const CVC_LEN: usize = 3;
/// Digits in each password segment.
pub const PASSWORD_SEGMENT_LEN: usize = 2;

/// Tunable bounds for free-text fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryPolicy {
    /// Maximum owner name length after normalization.
    pub owner_name_max_len: usize,
    /// Maximum card nickname length.
    pub nickname_max_len: usize,
}

impl Default for EntryPolicy {
    fn default() -> Self {
        Self {
            owner_name_max_len: 30,
            nickname_max_len: 10,
        }
    }
}

/// Four card-number segments of up to four digits each.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardNumberFields {
    pub segments: [String; CARD_SEGMENT_COUNT],
}

impl CardNumberFields {
    /// Every segment holds exactly four digits.
    pub fn is_valid(&self) -> bool {
        self.segments
            .iter()
            .all(|s| is_exact_digits(s, CARD_SEGMENT_LEN))
    }

    /// Non-empty segments joined with dashes.
    pub fn dashed(&self) -> String {
        join_non_empty(self.segments.iter(), "-")
    }
}

/// Which half of the expiry date a keystroke targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpirePart {
    Month,
    Year,
}

/// Expiry month and year, two digits each.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpireDateFields {
    pub month: String,
    pub year: String,
}

impl ExpireDateFields {
    /// Month is `01`..=`12` and year has two digits.
    pub fn is_valid(&self) -> bool {
        let month_ok = is_exact_digits(&self.month, EXPIRE_PART_LEN)
            && self
                .month
                .parse::<u8>()
                .is_ok_and(|m| (1..=12).contains(&m));
        month_ok && is_exact_digits(&self.year, EXPIRE_PART_LEN)
    }

    /// Non-empty parts joined with a slash.
    pub fn slashed(&self) -> String {
        join_non_empty([&self.month, &self.year], "/")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnerNameField {
    pub owner_name: String,
}

impl OwnerNameField {
    pub fn is_valid(&self) -> bool {
        !self.owner_name.trim().is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CvcField {
    pub cvc: String,
}

impl CvcField {
    pub fn is_valid(&self) -> bool {
        is_exact_digits(&self.cvc, CVC_LEN)
    }
}

/// Password entry plus its confirmation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordFields {
    pub segments: [String; 2],
}

impl PasswordFields {
    /// Both segments complete and identical.
    pub fn is_valid(&self) -> bool {
        let [first, second] = &self.segments;
        is_exact_digits(first, PASSWORD_SEGMENT_LEN)
            && is_exact_digits(second, PASSWORD_SEGMENT_LEN)
            && first == second
    }
}

/// Validity flags of the five field groups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldFlags {
    pub card_number: bool,
    pub expire_date: bool,
    pub owner_name: bool,
    pub cvc: bool,
    pub password: bool,
}

/// All field groups of one card entry, as normalized by the update functions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardEntry {
    pub card_number: CardNumberFields,
    pub expire_date: ExpireDateFields,
    pub owner_name: OwnerNameField,
    pub cvc: CvcField,
    pub password: PasswordFields,
}

impl CardEntry {
    /// Recompute every validity flag from the current field values.
    pub fn flags(&self) -> FieldFlags {
        FieldFlags {
            card_number: self.card_number.is_valid(),
            expire_date: self.expire_date.is_valid(),
            owner_name: self.owner_name.is_valid(),
            cvc: self.cvc.is_valid(),
            password: self.password.is_valid(),
        }
    }
}

/// Replace one card-number segment with the digits of `raw`.
///
/// An `index` outside `0..4` returns the segments unchanged.
pub fn update_card_number_segment(
    fields: &CardNumberFields,
    index: usize,
    raw: &str,
) -> (CardNumberFields, bool) {
    let mut next = fields.clone();
    if let Some(slot) = next.segments.get_mut(index) {
        *slot = keep_digits(raw, CARD_SEGMENT_LEN);
    }
    let valid = next.is_valid();
    (next, valid)
}

/// Replace the month or year with the digits of `raw`.
///
/// Out-of-range months such as `13` are kept so the user sees what they
/// typed; they only fail validation.
pub fn update_expire_date(
    fields: &ExpireDateFields,
    part: ExpirePart,
    raw: &str,
) -> (ExpireDateFields, bool) {
    let mut next = fields.clone();
    let digits = keep_digits(raw, EXPIRE_PART_LEN);
    match part {
        ExpirePart::Month => next.month = digits,
        ExpirePart::Year => next.year = digits,
    }
    let valid = next.is_valid();
    (next, valid)
}

/// Replace the owner name with the normalized form of `raw`.
pub fn update_owner_name(
    _fields: &OwnerNameField,
    raw: &str,
    policy: &EntryPolicy,
) -> (OwnerNameField, bool) {
    let next = OwnerNameField {
        owner_name: sanitize_owner_name(raw, policy.owner_name_max_len),
    };
    let valid = next.is_valid();
    (next, valid)
}

pub fn update_cvc(_fields: &CvcField, raw: &str) -> (CvcField, bool) {
    let next = CvcField {
        cvc: keep_digits(raw, CVC_LEN),
    };
    let valid = next.is_valid();
    (next, valid)
}

/// Replace password segment `index` (0 = entry, 1 = confirmation).
///
/// While either segment is incomplete the result is invalid, even when the
/// typed prefixes agree.
pub fn update_password(
    fields: &PasswordFields,
    index: usize,
    raw: &str,
) -> (PasswordFields, bool) {
    let mut next = fields.clone();
    if let Some(slot) = next.segments.get_mut(index) {
        *slot = keep_digits(raw, PASSWORD_SEGMENT_LEN);
    }
    let valid = next.is_valid();
    (next, valid)
}

/// All five field groups are valid.
pub fn is_submittable(flags: &FieldFlags) -> bool {
    [
        flags.card_number,
        flags.expire_date,
        flags.owner_name,
        flags.cvc,
        flags.password,
    ]
    .iter()
    .all(|ok| *ok)
}

fn join_non_empty<'a, I>(parts: I, sep: &str) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_card_number() -> CardNumberFields {
        CardNumberFields {
            segments: [
                "1111".into(),
                "2222".into(),
                "3333".into(),
                "4444".into(),
            ],
        }
    }

    #[test]
    fn card_number_segment_strips_noise_and_truncates() {
        let (fields, valid) =
            update_card_number_segment(&CardNumberFields::default(), 1, "12a-34 56");

        assert_eq!(fields.segments[1], "1234");
        assert!(!valid, "three empty segments remain");
    }

    #[test]
    fn card_number_becomes_valid_only_when_all_segments_full() {
        let mut fields = full_card_number();
        fields.segments[3] = "44".into();

        let (fields, valid) = update_card_number_segment(&fields, 3, "4444");
        assert!(valid);

        let (_, valid) = update_card_number_segment(&fields, 0, "111");
        assert!(!valid, "valid field reverts when a segment shrinks");
    }

    #[test]
    fn card_number_ignores_out_of_range_index() {
        let fields = full_card_number();
        let (next, valid) = update_card_number_segment(&fields, 7, "9999");

        assert_eq!(next, fields);
        assert!(valid);
    }

    #[test]
    fn expire_date_rejects_month_thirteen() {
        let fields = ExpireDateFields {
            month: String::new(),
            year: "29".into(),
        };
        let (fields, valid) = update_expire_date(&fields, ExpirePart::Month, "13");

        assert_eq!(fields.month, "13");
        assert!(!valid);
    }

    #[test]
    fn expire_date_accepts_january_twenty_nine() {
        let (fields, _) =
            update_expire_date(&ExpireDateFields::default(), ExpirePart::Month, "01");
        let (fields, valid) = update_expire_date(&fields, ExpirePart::Year, "29");

        assert_eq!(fields.slashed(), "01/29");
        assert!(valid);
    }

    #[test]
    fn expire_date_rejects_zero_and_single_digit_month() {
        let year = ExpireDateFields {
            month: String::new(),
            year: "30".into(),
        };
        assert!(!update_expire_date(&year, ExpirePart::Month, "00").1);
        assert!(!update_expire_date(&year, ExpirePart::Month, "1").1);
    }

    #[test]
    fn owner_name_valid_when_non_blank() {
        let policy = EntryPolicy::default();
        let (fields, valid) = update_owner_name(&OwnerNameField::default(), "sun 42", &policy);

        assert_eq!(fields.owner_name, "SUN ");
        assert!(valid);

        let (fields, valid) = update_owner_name(&fields, "1234", &policy);
        assert_eq!(fields.owner_name, "");
        assert!(!valid);
    }

    #[test]
    fn owner_name_update_is_idempotent() {
        let policy = EntryPolicy::default();
        let (first, first_valid) =
            update_owner_name(&OwnerNameField::default(), "GRACE HOPPER", &policy);
        let (second, second_valid) = update_owner_name(&first, &first.owner_name, &policy);

        assert_eq!(first, second);
        assert_eq!(first_valid, second_valid);
    }

    #[test]
    fn owner_name_respects_configured_bound() {
        let policy = EntryPolicy {
            owner_name_max_len: 5,
            ..EntryPolicy::default()
        };
        let (fields, _) = update_owner_name(&OwnerNameField::default(), "ALEXANDRA", &policy);

        assert_eq!(fields.owner_name, "ALEXA");
    }

    #[test]
    fn cvc_requires_exactly_three_digits() {
        let (fields, valid) = update_cvc(&CvcField::default(), "12");
        assert_eq!(fields.cvc, "12");
        assert!(!valid);

        let (fields, valid) = update_cvc(&fields, "1x234");
        assert_eq!(fields.cvc, "123");
        assert!(valid);
    }

    #[test]
    fn password_matching_pair_is_valid() {
        let (fields, _) = update_password(&PasswordFields::default(), 0, "12");
        let (_, valid) = update_password(&fields, 1, "12");
        assert!(valid);
    }

    #[test]
    fn password_mismatch_is_invalid() {
        let (fields, _) = update_password(&PasswordFields::default(), 0, "12");
        let (_, valid) = update_password(&fields, 1, "13");
        assert!(!valid);
    }

    #[test]
    fn password_incomplete_match_is_invalid() {
        let (fields, _) = update_password(&PasswordFields::default(), 0, "1");
        let (fields, valid) = update_password(&fields, 1, "1");

        assert_eq!(fields.segments, ["1".to_string(), "1".to_string()]);
        assert!(!valid);
    }

    #[test]
    fn submittable_truth_table() {
        for mask in 0u8..32 {
            let flags = FieldFlags {
                card_number: mask & 1 != 0,
                expire_date: mask & 2 != 0,
                owner_name: mask & 4 != 0,
                cvc: mask & 8 != 0,
                password: mask & 16 != 0,
            };
            assert_eq!(is_submittable(&flags), mask == 31, "mask {mask:05b}");
        }
    }

    proptest! {
        #[test]
        fn card_number_segment_is_always_short_digits(raw in ".*", index in 0usize..4) {
            let (fields, _) = update_card_number_segment(&CardNumberFields::default(), index, &raw);
            let segment = &fields.segments[index];

            prop_assert!(segment.len() <= CARD_SEGMENT_LEN);
            prop_assert!(segment.bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
