// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Add-card form in MVU shape: raw keystrokes go through the entry validator.

use eframe::egui;

use crate::models::card::{CARD_BRANDS, CardBrand, CardPreview};
use crate::models::card_entry::{
    self, CARD_SEGMENT_COUNT, CardEntry, EntryPolicy, ExpirePart, FieldFlags,
};
use crate::ui::components::card_face::{self, CardSize};

/// UI model for the add-card form, kept free of side effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardFormModel {
    entry: CardEntry,
    flags: FieldFlags,
    brand: CardBrand,
    brand_modal_open: bool,
    policy: EntryPolicy,
}

/// Messages emitted by the form view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardFormMsg {
    CardNumberChanged { index: usize, raw: String },
    ExpireDateChanged { part: ExpirePart, raw: String },
    OwnerNameChanged(String),
    CvcChanged(String),
    PasswordChanged { index: usize, raw: String },
    OpenBrandModal,
    SelectBrand(usize),
    CloseBrandModal,
}

impl CardFormModel {
    /// Fresh, empty form. The brand picker opens first so a color is chosen up front.
    pub fn new(policy: EntryPolicy) -> Self {
        Self {
            brand_modal_open: true,
            policy,
            ..Self::default()
        }
    }

    pub fn entry(&self) -> &CardEntry {
        &self.entry
    }

    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    pub fn brand(&self) -> &CardBrand {
        &self.brand
    }

    pub fn is_submittable(&self) -> bool {
        card_entry::is_submittable(&self.flags)
    }

    /// Card face for the fields typed so far.
    pub fn preview(&self) -> CardPreview {
        CardPreview::from_entry(&self.entry, &self.brand)
    }
}

/// Apply a message to the form model.
pub fn update(model: &mut CardFormModel, msg: CardFormMsg) {
    match msg {
        CardFormMsg::CardNumberChanged { index, raw } => {
            let (fields, valid) =
                card_entry::update_card_number_segment(&model.entry.card_number, index, &raw);
            model.entry.card_number = fields;
            model.flags.card_number = valid;
        }
        CardFormMsg::ExpireDateChanged { part, raw } => {
            let (fields, valid) =
                card_entry::update_expire_date(&model.entry.expire_date, part, &raw);
            model.entry.expire_date = fields;
            model.flags.expire_date = valid;
        }
        CardFormMsg::OwnerNameChanged(raw) => {
            let (fields, valid) =
                card_entry::update_owner_name(&model.entry.owner_name, &raw, &model.policy);
            model.entry.owner_name = fields;
            model.flags.owner_name = valid;
        }
        CardFormMsg::CvcChanged(raw) => {
            let (fields, valid) = card_entry::update_cvc(&model.entry.cvc, &raw);
            model.entry.cvc = fields;
            model.flags.cvc = valid;
        }
        CardFormMsg::PasswordChanged { index, raw } => {
            let (fields, valid) = card_entry::update_password(&model.entry.password, index, &raw);
            model.entry.password = fields;
            model.flags.password = valid;
        }
        CardFormMsg::OpenBrandModal => model.brand_modal_open = true,
        CardFormMsg::SelectBrand(index) => {
            if let Some(brand) = CARD_BRANDS.get(index) {
                model.brand = *brand;
            }
            model.brand_modal_open = false;
        }
        CardFormMsg::CloseBrandModal => model.brand_modal_open = false,
    }
    debug_assert_eq!(model.flags, model.entry.flags());
}

/// Render the form and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, ctx: &egui::Context, model: &CardFormModel) -> Vec<CardFormMsg> {
    let mut msgs = Vec::new();

    ui.vertical_centered(|ui| {
        let resp = card_face::card_face(
            ui,
            &model.preview(),
            model.brand.color,
            None,
            CardSize::Small,
        );
        if resp.on_hover_text("Choose card brand").clicked() {
            msgs.push(CardFormMsg::OpenBrandModal);
        }
    });
    ui.add_space(12.0);

    render_card_number(ui, model, &mut msgs);
    ui.add_space(8.0);
    render_expire_date(ui, model, &mut msgs);
    ui.add_space(8.0);
    render_owner_name(ui, model, &mut msgs);
    ui.add_space(8.0);
    render_cvc(ui, model, &mut msgs);
    ui.add_space(8.0);
    render_password(ui, model, &mut msgs);

    if model.brand_modal_open {
        render_brand_modal(ctx, model, &mut msgs);
    }

    msgs
}

fn render_card_number(ui: &mut egui::Ui, model: &CardFormModel, msgs: &mut Vec<CardFormMsg>) {
    ui.label("Card number");
    ui.horizontal(|ui| {
        for index in 0..CARD_SEGMENT_COUNT {
            let mut buffer = model.entry.card_number.segments[index].clone();
            let edit = egui::TextEdit::singleline(&mut buffer)
                .hint_text("0000")
                .desired_width(48.0)
                .password(index >= 2);
            if ui.add(edit).changed() {
                msgs.push(CardFormMsg::CardNumberChanged { index, raw: buffer });
            }
            if index + 1 < CARD_SEGMENT_COUNT {
                ui.label("-");
            }
        }
    });
    let touched = model
        .entry
        .card_number
        .segments
        .iter()
        .any(|s| !s.is_empty());
    invalid_hint(ui, touched && !model.flags.card_number, "Enter all 16 digits.");
}

fn render_expire_date(ui: &mut egui::Ui, model: &CardFormModel, msgs: &mut Vec<CardFormMsg>) {
    let fields = &model.entry.expire_date;
    ui.label("Expiry date");
    ui.horizontal(|ui| {
        let mut month = fields.month.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut month)
                    .hint_text("MM")
                    .desired_width(32.0),
            )
            .changed()
        {
            msgs.push(CardFormMsg::ExpireDateChanged {
                part: ExpirePart::Month,
                raw: month,
            });
        }
        ui.label("/");
        let mut year = fields.year.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut year)
                    .hint_text("YY")
                    .desired_width(32.0),
            )
            .changed()
        {
            msgs.push(CardFormMsg::ExpireDateChanged {
                part: ExpirePart::Year,
                raw: year,
            });
        }
    });
    let touched = !fields.month.is_empty() || !fields.year.is_empty();
    invalid_hint(
        ui,
        touched && !model.flags.expire_date,
        "Use a month between 01 and 12 and a two-digit year.",
    );
}

fn render_owner_name(ui: &mut egui::Ui, model: &CardFormModel, msgs: &mut Vec<CardFormMsg>) {
    let owner = &model.entry.owner_name.owner_name;
    ui.horizontal(|ui| {
        ui.label("Card owner");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{}/{}",
                    owner.len(),
                    model.policy.owner_name_max_len
                ))
                .small()
                .color(egui::Color32::from_gray(110)),
            );
        });
    });
    let mut buffer = owner.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut buffer).hint_text("Name as printed on the card"))
        .changed()
    {
        msgs.push(CardFormMsg::OwnerNameChanged(buffer));
    }
}

fn render_cvc(ui: &mut egui::Ui, model: &CardFormModel, msgs: &mut Vec<CardFormMsg>) {
    ui.label("Security code (CVC/CVV)");
    let mut buffer = model.entry.cvc.cvc.clone();
    if ui
        .add(
            egui::TextEdit::singleline(&mut buffer)
                .password(true)
                .desired_width(48.0),
        )
        .changed()
    {
        msgs.push(CardFormMsg::CvcChanged(buffer));
    }
    let touched = !model.entry.cvc.cvc.is_empty();
    invalid_hint(ui, touched && !model.flags.cvc, "The CVC has three digits.");
}

fn render_password(ui: &mut egui::Ui, model: &CardFormModel, msgs: &mut Vec<CardFormMsg>) {
    ui.label("Card password (first two digits, twice)");
    ui.horizontal(|ui| {
        for (index, segment) in model.entry.password.segments.iter().enumerate() {
            let mut buffer = segment.clone();
            let hint = if index == 0 { "••" } else { "confirm" };
            if ui
                .add(
                    egui::TextEdit::singleline(&mut buffer)
                        .password(true)
                        .hint_text(hint)
                        .desired_width(48.0),
                )
                .changed()
            {
                msgs.push(CardFormMsg::PasswordChanged { index, raw: buffer });
            }
        }
    });
    let touched = model.entry.password.segments.iter().any(|s| !s.is_empty());
    invalid_hint(
        ui,
        touched && !model.flags.password,
        "Enter the same two digits in both boxes.",
    );
}

/// Small red note under a field group that is filled in but invalid.
fn invalid_hint(ui: &mut egui::Ui, show: bool, text: &str) {
    if show {
        ui.label(
            egui::RichText::new(text)
                .small()
                .color(egui::Color32::from_rgb(200, 60, 60)),
        );
    }
}

/// Show the brand picker as a centered modal grid.
fn render_brand_modal(ctx: &egui::Context, model: &CardFormModel, msgs: &mut Vec<CardFormMsg>) {
    egui::Window::new("Choose card brand")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .show(ctx, |ui| {
            egui::Grid::new("brand_grid")
                .num_columns(4)
                .spacing(egui::vec2(10.0, 10.0))
                .show(ui, |ui| {
                    for (index, brand) in CARD_BRANDS.iter().enumerate() {
                        let [r, g, b] = brand.color;
                        let label = if brand.name == model.brand.name {
                            format!("{} {}", egui_phosphor::regular::CHECK_CIRCLE, brand.name)
                        } else {
                            format!("{} {}", egui_phosphor::regular::CIRCLE, brand.name)
                        };
                        let button = egui::Button::new(
                            egui::RichText::new(label).color(egui::Color32::from_rgb(r, g, b)),
                        );
                        if ui.add(button).clicked() {
                            msgs.push(CardFormMsg::SelectBrand(index));
                        }
                        if (index + 1) % 4 == 0 {
                            ui.end_row();
                        }
                    }
                });

            ui.add_space(8.0);
            if ui.button("Close").clicked() {
                msgs.push(CardFormMsg::CloseBrandModal);
            }
        });
}
