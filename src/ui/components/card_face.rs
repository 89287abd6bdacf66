// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Painted card face widget used by the form preview, the list and the detail page.

use eframe::egui;

use crate::models::card::CardPreview;

/// Rendered card dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSize {
    Small,
    Large,
}

impl CardSize {
    fn dimensions(self) -> egui::Vec2 {
        match self {
            CardSize::Small => egui::vec2(208.0, 130.0),
            CardSize::Large => egui::vec2(296.0, 184.0),
        }
    }

    fn font_scale(self) -> f32 {
        match self {
            CardSize::Small => 1.0,
            CardSize::Large => 1.35,
        }
    }
}

/// Draw a clickable card face. Returns the response so callers can react to clicks.
pub fn card_face(
    ui: &mut egui::Ui,
    preview: &CardPreview,
    color: [u8; 3],
    nickname: Option<&str>,
    size: CardSize,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size.dimensions(), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);
        let [r, g, b] = color;
        let fill = egui::Color32::from_rgb(r, g, b);
        let ink = egui::Color32::from_gray(30);
        let scale = size.font_scale();
        let pad = 12.0 * scale;
        let painter = ui.painter();

        painter.rect_filled(rect.expand(visuals.expansion), 6.0 * scale, fill);

        painter.text(
            rect.left_top() + egui::vec2(pad, pad),
            egui::Align2::LEFT_TOP,
            &preview.card_name,
            egui::FontId::proportional(11.0 * scale),
            ink,
        );

        // Chip.
        let chip = egui::Rect::from_min_size(
            rect.left_top() + egui::vec2(pad, rect.height() * 0.36),
            egui::vec2(34.0 * scale, 24.0 * scale),
        );
        painter.rect_filled(chip, 3.0 * scale, egui::Color32::from_rgb(0xCB, 0xBA, 0x64));

        painter.text(
            egui::pos2(rect.center().x, rect.top() + rect.height() * 0.70),
            egui::Align2::CENTER_CENTER,
            &preview.card_number,
            egui::FontId::monospace(12.0 * scale),
            ink,
        );

        let bottom = rect.bottom() - pad;
        painter.text(
            egui::pos2(rect.left() + pad, bottom),
            egui::Align2::LEFT_BOTTOM,
            &preview.owner_name,
            egui::FontId::proportional(11.0 * scale),
            ink,
        );
        painter.text(
            egui::pos2(rect.right() - pad, bottom),
            egui::Align2::RIGHT_BOTTOM,
            &preview.expire_date,
            egui::FontId::proportional(11.0 * scale),
            ink,
        );

        if let Some(nickname) = nickname.filter(|n| !n.is_empty()) {
            painter.text(
                rect.right_top() + egui::vec2(-pad, pad),
                egui::Align2::RIGHT_TOP,
                nickname,
                egui::FontId::proportional(11.0 * scale),
                ink,
            );
        }
    }

    response
}

/// Draw the dashed "add a card" placeholder tile.
pub fn empty_card(ui: &mut egui::Ui, size: CardSize) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size.dimensions(), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);
        ui.painter()
            .rect_filled(rect.expand(visuals.expansion), 6.0, visuals.weak_bg_fill);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            egui_phosphor::regular::PLUS,
            egui::FontId::proportional(28.0 * size.font_scale()),
            visuals.fg_stroke.color,
        );
    }

    response
}
