// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Stored cards rendered as a column of card faces.

use eframe::egui;

use crate::logic::store::CardList;
use crate::models::card::CardPreview;
use crate::ui::components::card_face::{self, CardSize};

/// Messages emitted by the card list view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CardListMsg {
    /// A stored card was clicked.
    Open(String),
    /// The empty "add" tile was clicked.
    Add,
}

/// Render every stored card plus the add tile.
pub fn view(ui: &mut egui::Ui, cards: &CardList) -> Vec<CardListMsg> {
    let mut msgs = Vec::new();

    ui.vertical_centered(|ui| {
        if cards.is_empty() {
            ui.label(
                egui::RichText::new("No cards yet. Add your first card below.")
                    .italics()
                    .color(egui::Color32::from_gray(110)),
            );
            ui.add_space(8.0);
        }

        for card in cards.iter() {
            let resp = card_face::card_face(
                ui,
                &CardPreview::from(card),
                card.color,
                Some(&card.nickname),
                CardSize::Small,
            );
            if resp.on_hover_text("Edit card").clicked() {
                msgs.push(CardListMsg::Open(card.id.clone()));
            }
            ui.add_space(10.0);
        }

        if card_face::empty_card(ui, CardSize::Small)
            .on_hover_text("Add card")
            .clicked()
        {
            msgs.push(CardListMsg::Add);
        }
    });

    msgs
}
