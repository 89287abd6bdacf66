// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the card wallet.
//! Handles page layout, navigation controls, and wiring to the card store.

pub mod components;

use eframe::egui;

use crate::app::config::AppConfig;
use crate::models::card::CardPreview;
use crate::mvu::{self, AppModel, Command, Msg, Page};
use crate::ui::components::card_face::{self, CardSize};
use crate::ui::components::{card_form, card_list};

/// Stateful egui application for adding and browsing cards.
pub struct CardPackApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl CardPackApp {
    pub fn new(config: AppConfig) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        // One worker: saves must reach the disk in the order they were queued.
        std::thread::spawn(move || {
            for cmd in cmd_rx.iter() {
                let msg = mvu::run_command(cmd);
                if msg_tx.send(msg).is_err() {
                    break;
                }
            }
        });

        let mut app = Self {
            model: AppModel::new(config),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        };
        let startup = mvu::init(&app.model);
        app.dispatch(startup);
        app
    }

    /// Hand commands to the worker and count them as pending.
    fn dispatch(&mut self, commands: Vec<Command>) {
        for cmd in commands {
            if self.cmd_tx.send(cmd).is_ok() {
                self.model.pending_commands += 1;
            } else {
                log::error!("command worker is gone; dropping command");
            }
        }
    }
}

impl eframe::App for CardPackApp {
    /// Drives a single UI frame: drains worker results, applies queued messages to the
    /// MVU model, then renders the top bar, error modal, status bar, and the active page.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });

        // Pull messages produced by the command worker.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages in arrival order.
        let msgs = std::mem::take(&mut self.inbox);
        for msg in msgs {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            self.dispatch(commands);
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                self.render_back_button(ui);
                ui.heading(page_title(&self.model.page));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| match self.model.page.clone() {
                Page::CardList => {
                    let msgs = card_list::view(ui, &self.model.cards);
                    self.inbox.extend(msgs.into_iter().map(Msg::CardList));
                }
                Page::AddCard => self.render_add_card(ui, ctx),
                Page::Complete { id } => self.render_card_detail(ui, &id, false),
                Page::Edit { id } => self.render_card_detail(ui, &id, true),
            });
        });

        // Worker results and view messages are applied on the next frame.
        if self.model.pending_commands > 0 || !self.inbox.is_empty() {
            ctx.request_repaint();
        }
    }

    /// Required by eframe 0.34; all rendering happens in `update`, which eframe still calls.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}
}

impl CardPackApp {
    /// Arrow back to the card list on every page except the list itself.
    fn render_back_button(&mut self, ui: &mut egui::Ui) {
        if matches!(self.model.page, Page::AddCard | Page::Edit { .. })
            && ui
                .button(egui_phosphor::regular::CARET_LEFT)
                .on_hover_text("Back to my cards")
                .clicked()
        {
            self.inbox.push(Msg::OpenCardList);
        }
    }

    /// Render the add-card form and the "Next" button.
    ///
    /// The button is enabled only when every field group is valid; the kernel
    /// ignores submissions otherwise.
    fn render_add_card(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let msgs = card_form::view(ui, ctx, &self.model.form);
        self.inbox.extend(msgs.into_iter().map(Msg::Form));

        ui.add_space(12.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let button = egui::Button::new(format!(
                "Next {}",
                egui_phosphor::regular::ARROW_RIGHT
            ));
            if ui
                .add_enabled(self.model.form.is_submittable(), button)
                .on_disabled_hover_text("Please fill in every field correctly")
                .clicked()
            {
                self.inbox.push(Msg::SubmitCard);
            }
        });
    }

    /// Completion and edit page: the card, a nickname input and confirm/remove actions.
    fn render_card_detail(&mut self, ui: &mut egui::Ui, id: &str, editing: bool) {
        let Some(card) = self.model.cards.get(id).cloned() else {
            ui.label("This card no longer exists.");
            if ui.button("Back to my cards").clicked() {
                self.inbox.push(Msg::OpenCardList);
            }
            return;
        };

        ui.vertical_centered(|ui| {
            if !editing {
                ui.heading("Your card has been added.");
                ui.add_space(12.0);
            }
            card_face::card_face(
                ui,
                &CardPreview::from(&card),
                card.color,
                Some(&card.nickname),
                CardSize::Large,
            );
            ui.add_space(16.0);

            let mut nickname = self.model.nickname_input.clone();
            let resp = ui.add(
                egui::TextEdit::singleline(&mut nickname)
                    .hint_text("Card nickname (optional)")
                    .desired_width(200.0),
            );
            if resp.changed() {
                self.inbox.push(Msg::NicknameChanged(nickname));
            }
            if resp.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter)) {
                self.inbox.push(Msg::CommitNickname);
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui
                    .button(format!("{} Confirm", egui_phosphor::regular::CHECK))
                    .clicked()
                {
                    self.inbox.push(Msg::CommitNickname);
                }
                if editing
                    && ui
                        .button(format!("{} Remove card", egui_phosphor::regular::TRASH_SIMPLE))
                        .clicked()
                {
                    self.inbox.push(Msg::RemoveCard(card.id.clone()));
                }
            });
        });
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Something went wrong")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        if let Some(text) = &self.model.status {
            let display = if self.model.pending_commands > 0 {
                format!("{}  ({} working…)", text, self.model.pending_commands)
            } else {
                text.to_string()
            };
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
                if self.model.pending_commands > 0 {
                    ui.add(egui::Spinner::new().size(14.0));
                }
            });
        }
    }
}

fn page_title(page: &Page) -> &'static str {
    match page {
        Page::CardList => "My cards",
        Page::AddCard => "Add card",
        Page::Complete { .. } => "Card added",
        Page::Edit { .. } => "Edit card",
    }
}
