// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring page state, messages, and commands.

use std::path::PathBuf;

use uuid::Uuid;

use crate::app::config::AppConfig;
use crate::logic::store::{CardList, load_cards, save_cards};
use crate::models::card::{CardRecord, build_record};
use crate::models::card_entry::EntryPolicy;
use crate::ui::components::card_form::{self, CardFormModel, CardFormMsg};
use crate::ui::components::card_list::CardListMsg;

/// Page currently shown in the central panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    CardList,
    AddCard,
    /// Shown right after a card was added.
    Complete { id: String },
    Edit { id: String },
}

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Active page.
    pub page: Page,
    /// Add-card form state; reset every time the form opens.
    pub form: CardFormModel,
    /// Cards owned by this session.
    pub cards: CardList,
    /// Nickname being typed on the completion/edit page.
    pub nickname_input: String,
    /// Field bounds for the form and nickname.
    pub policy: EntryPolicy,
    /// Where the card list is persisted.
    pub store_path: PathBuf,
    /// Set when the store could not be loaded; saving would overwrite it.
    pub store_locked: bool,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(config: AppConfig) -> Self {
        Self {
            form: CardFormModel::new(config.policy),
            policy: config.policy,
            store_path: config.store_path,
            ..Default::default()
        }
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    OpenCardList,
    CardList(CardListMsg),
    Form(CardFormMsg),
    SubmitCard,
    NicknameChanged(String),
    CommitNickname,
    RemoveCard(String),
    CardsLoaded(Result<CardList, String>),
    CardsSaved(Result<PathBuf, String>),
    DismissError,
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    LoadCards(PathBuf),
    SaveCards(SavePayload),
}

/// Snapshot of the card list to write.
pub struct SavePayload {
    /// Target JSON file.
    pub path: PathBuf,
    /// Cards in list order.
    pub cards: Vec<CardRecord>,
}

/// Commands to run once when the app starts.
pub fn init(model: &AppModel) -> Vec<Command> {
    vec![Command::LoadCards(model.store_path.clone())]
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::OpenCardList => model.page = Page::CardList,
        Msg::CardList(CardListMsg::Add) => open_add_card(model),
        Msg::CardList(CardListMsg::Open(id)) => open_card(model, id),
        Msg::Form(m) => card_form::update(&mut model.form, m),
        Msg::SubmitCard => submit_card(model, cmds),
        Msg::NicknameChanged(text) => {
            model.nickname_input = text
                .trim_start()
                .chars()
                .take(model.policy.nickname_max_len)
                .collect();
        }
        Msg::CommitNickname => {
            let Some(id) = current_card_id(&model.page).map(str::to_owned) else {
                return;
            };
            if model
                .cards
                .set_nickname(&id, &model.nickname_input, model.policy.nickname_max_len)
            {
                queue_save(model, cmds);
            }
            model.nickname_input.clear();
            model.page = Page::CardList;
        }
        Msg::RemoveCard(id) => {
            if model.cards.remove(&id).is_some() {
                log::info!("card removed ({} stored)", model.cards.len());
                queue_save(model, cmds);
                surface_event(model, "Card removed.".to_string(), false);
            }
            model.page = Page::CardList;
        }
        Msg::CardsLoaded(result) => match result {
            Ok(loaded) => merge_loaded(model, loaded, cmds),
            Err(err) => {
                model.store_locked = true;
                surface_event(
                    model,
                    format!(
                        "Failed to load cards:\n\n{err}\n\nChanges will not be saved until the card store is fixed."
                    ),
                    true,
                );
            }
        },
        Msg::CardsSaved(result) => match result {
            Ok(path) => surface_event(model, format!("Cards saved: {}", path.display()), false),
            Err(err) => surface_event(model, format!("Failed to save cards:\n\n{err}"), true),
        },
        Msg::DismissError => model.error = None,
    }
}

/// Execute a command synchronously and return a resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::LoadCards(path) => {
            Msg::CardsLoaded(load_cards(&path).map_err(|e| format!("{e:#}")))
        }
        Command::SaveCards(payload) => {
            let res = save_cards(&payload.path, &payload.cards).map(|_| payload.path.clone());
            Msg::CardsSaved(res.map_err(|e| format!("{e:#}")))
        }
    }
}

fn open_add_card(model: &mut AppModel) {
    model.form = CardFormModel::new(model.policy);
    model.page = Page::AddCard;
}

fn open_card(model: &mut AppModel, id: String) {
    match model.cards.get(&id) {
        Some(card) => {
            model.nickname_input = card.nickname.clone();
            model.page = Page::Edit { id };
        }
        None => log::warn!("ignoring request to open unknown card {id}"),
    }
}

/// Validate, append and navigate in one step; invalid forms are a silent no-op.
fn submit_card(model: &mut AppModel, cmds: &mut Vec<Command>) {
    if !model.form.is_submittable() {
        log::debug!("submit ignored; field flags {:?}", model.form.flags());
        return;
    }

    let id = Uuid::new_v4().to_string();
    let record = build_record(id.clone(), model.form.entry(), model.form.brand());
    model.cards.push(record);
    log::info!("card added ({} stored)", model.cards.len());

    queue_save(model, cmds);
    model.form = CardFormModel::new(model.policy);
    model.nickname_input.clear();
    model.page = Page::Complete { id };
}

/// Put loaded cards first, keeping any added before the load finished.
///
/// Saves queued before the load only held session cards, so a merged list is saved again.
fn merge_loaded(model: &mut AppModel, loaded: CardList, cmds: &mut Vec<Command>) {
    let session = std::mem::replace(&mut model.cards, loaded);
    let mut added_during_load = false;
    for card in session.iter() {
        if model.cards.get(&card.id).is_none() {
            model.cards.push(card.clone());
            added_during_load = true;
        }
    }
    log::info!("loaded {} card(s)", model.cards.len());
    if added_during_load {
        log::debug!("session cards appended after load");
        queue_save(model, cmds);
    }
}

fn current_card_id(page: &Page) -> Option<&str> {
    match page {
        Page::Complete { id } | Page::Edit { id } => Some(id),
        Page::CardList | Page::AddCard => None,
    }
}

/// Queue a snapshot save unless the store on disk could not be read.
fn queue_save(model: &AppModel, cmds: &mut Vec<Command>) {
    if model.store_locked {
        log::warn!("card store {:?} unreadable; not saving", model.store_path);
        return;
    }
    cmds.push(Command::SaveCards(SavePayload {
        path: model.store_path.clone(),
        cards: model.cards.as_slice().to_vec(),
    }));
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        log::error!("{message}");
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::{CARD_BRANDS, EXPIRE_PLACEHOLDER};
    use crate::models::card_entry::ExpirePart;
    use std::fs;
    use tempfile::TempDir;

    fn model_with_store(path: PathBuf) -> AppModel {
        AppModel::new(AppConfig {
            store_path: path,
            policy: EntryPolicy::default(),
        })
    }

    fn form(model: &mut AppModel, msg: CardFormMsg) {
        let mut cmds = Vec::new();
        update(model, Msg::Form(msg), &mut cmds);
        assert!(cmds.is_empty(), "form edits should not enqueue commands");
    }

    fn fill_valid_form(model: &mut AppModel) {
        for (index, raw) in ["1111", "2222", "3333", "4444"].into_iter().enumerate() {
            form(
                model,
                CardFormMsg::CardNumberChanged {
                    index,
                    raw: raw.into(),
                },
            );
        }
        form(
            model,
            CardFormMsg::ExpireDateChanged {
                part: ExpirePart::Month,
                raw: "01".into(),
            },
        );
        form(
            model,
            CardFormMsg::ExpireDateChanged {
                part: ExpirePart::Year,
                raw: "29".into(),
            },
        );
        form(model, CardFormMsg::OwnerNameChanged("ada lovelace".into()));
        form(model, CardFormMsg::CvcChanged("123".into()));
        form(
            model,
            CardFormMsg::PasswordChanged {
                index: 0,
                raw: "12".into(),
            },
        );
        form(
            model,
            CardFormMsg::PasswordChanged {
                index: 1,
                raw: "12".into(),
            },
        );
        form(model, CardFormMsg::SelectBrand(1));
    }

    #[test]
    fn init_requests_card_load() {
        let model = model_with_store(PathBuf::from("/tmp/cards.json"));
        let cmds = init(&model);

        assert_eq!(cmds.len(), 1);
        match &cmds[0] {
            Command::LoadCards(path) => assert_eq!(path, &PathBuf::from("/tmp/cards.json")),
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn submit_with_invalid_form_is_silent_noop() {
        let mut model = model_with_store(PathBuf::from("cards.json"));
        update(&mut model, Msg::CardList(CardListMsg::Add), &mut Vec::new());
        fill_valid_form(&mut model);
        form(&mut model, CardFormMsg::CvcChanged("12".into()));

        let mut cmds = Vec::new();
        update(&mut model, Msg::SubmitCard, &mut cmds);

        assert!(cmds.is_empty());
        assert!(model.cards.is_empty());
        assert_eq!(model.page, Page::AddCard);
        assert!(model.error.is_none());
        assert!(model.status.is_none());
    }

    #[test]
    fn submit_with_valid_form_appends_saves_and_navigates() {
        let mut model = model_with_store(PathBuf::from("cards.json"));
        update(&mut model, Msg::CardList(CardListMsg::Add), &mut Vec::new());
        fill_valid_form(&mut model);

        let mut cmds = Vec::new();
        update(&mut model, Msg::SubmitCard, &mut cmds);

        assert_eq!(model.cards.len(), 1);
        let card = model.cards.iter().next().unwrap();
        assert_eq!(card.card_number, "1111-2222-3333-4444");
        assert_eq!(card.expire_date, "01/29");
        assert_eq!(card.owner_name, "ADA LOVELACE");
        assert_eq!(card.card_name, CARD_BRANDS[1].name);
        assert_eq!(card.color, CARD_BRANDS[1].color);
        assert_eq!(
            model.page,
            Page::Complete {
                id: card.id.clone()
            }
        );

        assert_eq!(cmds.len(), 1, "submit should enqueue a save");
        match &cmds[0] {
            Command::SaveCards(payload) => assert_eq!(payload.cards.len(), 1),
            _ => panic!("unexpected command"),
        }
        assert!(!model.form.is_submittable(), "form resets after submit");
    }

    #[test]
    fn submitted_cards_get_distinct_ids() {
        let mut model = model_with_store(PathBuf::from("cards.json"));
        for _ in 0..2 {
            update(&mut model, Msg::CardList(CardListMsg::Add), &mut Vec::new());
            fill_valid_form(&mut model);
            update(&mut model, Msg::SubmitCard, &mut Vec::new());
        }

        let ids: Vec<_> = model.cards.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn open_add_card_resets_previous_input() {
        let mut model = model_with_store(PathBuf::from("cards.json"));
        update(&mut model, Msg::CardList(CardListMsg::Add), &mut Vec::new());
        form(&mut model, CardFormMsg::CvcChanged("999".into()));

        update(&mut model, Msg::OpenCardList, &mut Vec::new());
        update(
            &mut model,
            Msg::CardList(CardListMsg::Add),
            &mut Vec::new(),
        );

        assert_eq!(model.page, Page::AddCard);
        assert!(model.form.entry().cvc.cvc.is_empty());
        assert_eq!(model.form.preview().expire_date, EXPIRE_PLACEHOLDER);
    }

    #[test]
    fn commit_nickname_on_completion_page_saves_and_returns_to_list() {
        let mut model = model_with_store(PathBuf::from("cards.json"));
        update(&mut model, Msg::CardList(CardListMsg::Add), &mut Vec::new());
        fill_valid_form(&mut model);
        update(&mut model, Msg::SubmitCard, &mut Vec::new());

        update(
            &mut model,
            Msg::NicknameChanged("  travel card for trips".into()),
            &mut Vec::new(),
        );
        let mut cmds = Vec::new();
        update(&mut model, Msg::CommitNickname, &mut cmds);

        assert_eq!(cmds.len(), 1);
        assert_eq!(model.page, Page::CardList);
        assert_eq!(model.cards.iter().next().unwrap().nickname, "travel car");
    }

    #[test]
    fn open_card_loads_nickname_and_remove_deletes_it() {
        let mut model = model_with_store(PathBuf::from("cards.json"));
        update(&mut model, Msg::CardList(CardListMsg::Add), &mut Vec::new());
        fill_valid_form(&mut model);
        update(&mut model, Msg::SubmitCard, &mut Vec::new());
        let id = model.cards.iter().next().unwrap().id.clone();
        model.cards.set_nickname(&id, "work", 10);

        update(
            &mut model,
            Msg::CardList(CardListMsg::Open(id.clone())),
            &mut Vec::new(),
        );
        assert_eq!(model.page, Page::Edit { id: id.clone() });
        assert_eq!(model.nickname_input, "work");

        let mut cmds = Vec::new();
        update(&mut model, Msg::RemoveCard(id), &mut cmds);

        assert!(model.cards.is_empty());
        assert_eq!(cmds.len(), 1);
        assert_eq!(model.page, Page::CardList);
        assert_eq!(model.status.as_deref(), Some("Card removed."));
    }

    #[test]
    fn opening_unknown_card_keeps_page() {
        let mut model = model_with_store(PathBuf::from("cards.json"));

        update(
            &mut model,
            Msg::CardList(CardListMsg::Open("nope".into())),
            &mut Vec::new(),
        );

        assert_eq!(model.page, Page::CardList);
    }

    #[test]
    fn save_and_load_round_trip_through_commands() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cards.json");

        let mut model = model_with_store(path.clone());
        update(&mut model, Msg::CardList(CardListMsg::Add), &mut Vec::new());
        fill_valid_form(&mut model);
        let mut cmds = Vec::new();
        update(&mut model, Msg::SubmitCard, &mut cmds);

        let msg = run_command(cmds.pop().unwrap());
        update(&mut model, msg, &mut Vec::new());
        assert!(model.error.is_none());
        assert!(
            model
                .status
                .as_deref()
                .map(|s| s.contains("Cards saved"))
                .unwrap_or(false)
        );

        let mut fresh = model_with_store(path);
        let load = init(&fresh).pop().unwrap();
        let msg = run_command(load);
        update(&mut fresh, msg, &mut Vec::new());

        assert_eq!(fresh.cards, model.cards);
    }

    #[test]
    fn load_failure_sets_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cards.json");
        fs::write(&path, "[{]").unwrap();

        let mut model = model_with_store(path.clone());
        let msg = run_command(Command::LoadCards(path));
        update(&mut model, msg, &mut Vec::new());

        assert!(
            model
                .error
                .as_deref()
                .map(|e| e.contains("Failed to load cards"))
                .unwrap_or(false)
        );

        update(&mut model, Msg::DismissError, &mut Vec::new());
        assert!(model.error.is_none());
    }

    #[test]
    fn unreadable_store_is_never_overwritten() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cards.json");
        let broken = r#"[{"id":"a","card_name":"Sun Card","card_number":"1111","owner_name":"NAME","expire_date":"MM/YY","color":[1,2,3]},]"#;
        fs::write(&path, broken).unwrap();

        let mut model = model_with_store(path.clone());
        let msg = run_command(init(&model).pop().unwrap());
        update(&mut model, msg, &mut Vec::new());
        assert!(model.store_locked);

        update(&mut model, Msg::CardList(CardListMsg::Add), &mut Vec::new());
        fill_valid_form(&mut model);
        let mut cmds = Vec::new();
        update(&mut model, Msg::SubmitCard, &mut cmds);
        let id = model.cards.iter().next().unwrap().id.clone();
        update(&mut model, Msg::CommitNickname, &mut cmds);
        update(&mut model, Msg::RemoveCard(id), &mut cmds);

        assert!(cmds.is_empty(), "no save may be queued after a failed load");
        assert_eq!(fs::read_to_string(&path).unwrap(), broken);
    }

    #[test]
    fn cards_added_before_load_completes_are_kept() {
        let mut model = model_with_store(PathBuf::from("cards.json"));
        update(&mut model, Msg::CardList(CardListMsg::Add), &mut Vec::new());
        fill_valid_form(&mut model);
        update(&mut model, Msg::SubmitCard, &mut Vec::new());
        let session_card = model.cards.iter().next().unwrap().clone();

        let mut stored = session_card.clone();
        stored.id = "stored".into();
        let mut cmds = Vec::new();
        update(
            &mut model,
            Msg::CardsLoaded(Ok(CardList::new(vec![stored]))),
            &mut cmds,
        );

        let ids: Vec<_> = model.cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["stored", session_card.id.as_str()]);
        match cmds.as_slice() {
            [Command::SaveCards(payload)] => assert_eq!(payload.cards.len(), 2),
            _ => panic!("merged list should be saved once"),
        }
    }
}
