//! The admin conversation engine.
//!
//! An explicit state machine drives every admin dialog: each input moves
//! the actor's session through [`AdminState`] and produces the replies to
//! render. Every failure an admin can cause comes back as a reply, never
//! a crash, and `/cancel` works from anywhere.
//!
//! Catalog commits happen exactly once per flow, at the end: a comic when
//! the cover arrives, the merged chapter map when an archive finishes,
//! the removal when a delete is confirmed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use inkpost_core::{
    ActorId, AdminInput, Button, CatalogError, CatalogStore, Comic, FileRef, ImageRelay, Reply,
    slugify,
};
use inkpost_import::{LogProgress, import_into_catalog};

use crate::gatekeeper::Gatekeeper;
use crate::state::AdminState;

// Menu callback tokens. Slug-carrying tokens are only read in the states
// whose menus issued them, so a slug like "yes" cannot collide with the
// confirmation tokens.
const CB_ADD_COMIC: &str = "add_comic";
const CB_MANAGE: &str = "manage";
const CB_BACK: &str = "back";
const CB_CANCEL: &str = "cancel";
const CB_CONFIRM_YES: &str = "confirm_yes";
const CB_CONFIRM_NO: &str = "confirm_no";
const COMIC_PREFIX: &str = "comic_";
const CHAPTERS_PREFIX: &str = "chapters_";
const DELETE_PREFIX: &str = "delete_";

pub struct Engine {
    store: Arc<CatalogStore>,
    relay: Arc<dyn ImageRelay>,
    gatekeeper: Gatekeeper,
    sessions: Mutex<HashMap<ActorId, AdminState>>,
}

impl Engine {
    pub fn new(store: Arc<CatalogStore>, relay: Arc<dyn ImageRelay>, gatekeeper: Gatekeeper) -> Self {
        Self {
            store,
            relay,
            gatekeeper,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Feed one input through the gatekeeper and the state machine.
    ///
    /// Unauthorized actors are refused and lose any session they had;
    /// `/cancel` discards the session from any state.
    pub async fn handle(&self, actor: ActorId, input: AdminInput) -> Vec<Reply> {
        if !self.gatekeeper.allows(actor) {
            self.sessions.lock().await.remove(&actor);
            log::warn!("rejected input from unauthorized account {actor}");
            return vec![Reply::text(
                "Sorry, you are not authorized to use this command.",
            )];
        }

        if is_cancel(&input) {
            self.sessions.lock().await.remove(&actor);
            return vec![Reply::text("Operation cancelled.")];
        }

        let state = self
            .sessions
            .lock()
            .await
            .get(&actor)
            .cloned()
            .unwrap_or_default();
        let before = state.name();
        let (next, replies) = self.step(state, input).await;
        if next.name() != before {
            log::debug!("session {actor}: {before} -> {}", next.name());
        }

        let mut sessions = self.sessions.lock().await;
        if next == AdminState::Idle {
            sessions.remove(&actor);
        } else {
            sessions.insert(actor, next);
        }
        replies
    }

    async fn step(&self, state: AdminState, input: AdminInput) -> (AdminState, Vec<Reply>) {
        match (state, input) {
            // Idle: only the menu command and its buttons do anything
            (AdminState::Idle, AdminInput::Text(text)) if is_menu_command(&text) => {
                (AdminState::Idle, vec![main_menu()])
            }
            (AdminState::Idle, AdminInput::Callback(token)) if token == CB_ADD_COMIC => (
                AdminState::CollectTitle,
                vec![Reply::text("Please send me the title of the new comic.")],
            ),
            (AdminState::Idle, AdminInput::Callback(token)) if token == CB_MANAGE => {
                self.enter_select_comic().await
            }

            // Creation: title, description, cover, then a single commit
            (AdminState::CollectTitle, AdminInput::Text(title)) => {
                let title = title.trim().to_string();
                if slugify(&title).is_empty() {
                    (
                        AdminState::CollectTitle,
                        vec![Reply::text(
                            "❌ I can't make a link out of that title. Please send one with letters or digits.",
                        )],
                    )
                } else {
                    (
                        AdminState::CollectDescription { title },
                        vec![Reply::text(
                            "Got it. Now, send me a short description for the comic.",
                        )],
                    )
                }
            }
            (AdminState::CollectDescription { title }, AdminInput::Text(description)) => (
                AdminState::CollectCover { title, description },
                vec![Reply::text(
                    "Great. Please send the cover image for this comic.",
                )],
            ),
            (AdminState::CollectCover { title, description }, AdminInput::Image(cover)) => {
                self.commit_new_comic(title, description, cover).await
            }

            // Management: pick a comic, then an action on it
            (AdminState::SelectComic, AdminInput::Callback(token))
                if token.starts_with(COMIC_PREFIX) =>
            {
                let slug = token[COMIC_PREFIX.len()..].to_string();
                self.enter_action_menu(slug).await
            }
            (AdminState::ActionMenu { slug }, AdminInput::Callback(token)) => {
                self.action_menu_choice(slug, token).await
            }
            (AdminState::CollectArchive { slug }, AdminInput::Document { file, name }) => {
                self.commit_archive(slug, file, name).await
            }
            (AdminState::ConfirmDelete { slug }, AdminInput::Callback(token))
                if token == CB_CONFIRM_YES =>
            {
                self.commit_delete(slug).await
            }
            (AdminState::ConfirmDelete { slug }, AdminInput::Callback(token))
                if token == CB_CONFIRM_NO =>
            {
                self.enter_action_menu(slug).await
            }

            // Anything else re-prompts in place; collected fields survive
            (state, _) => {
                log::debug!("unexpected input in state {}", state.name());
                let reply = reprompt(&state);
                (state, vec![reply])
            }
        }
    }

    async fn enter_select_comic(&self) -> (AdminState, Vec<Reply>) {
        let comics = self.store.get_all().await;
        if comics.is_empty() {
            return (
                AdminState::Idle,
                vec![Reply::text(
                    "No comics found. Please add a comic first via the 'Add New Comic' option.",
                )],
            );
        }
        let buttons: Vec<Vec<Button>> = comics
            .iter()
            .map(|comic| {
                vec![Button::new(
                    comic.title.clone(),
                    format!("{COMIC_PREFIX}{}", comic.slug),
                )]
            })
            .collect();
        (
            AdminState::SelectComic,
            vec![Reply::menu("Which comic do you want to manage?", buttons)],
        )
    }

    async fn enter_action_menu(&self, slug: String) -> (AdminState, Vec<Reply>) {
        match self.store.get(&slug).await {
            Some(comic) => {
                let buttons = vec![
                    vec![Button::new(
                        "Add Chapters (.zip)",
                        format!("{CHAPTERS_PREFIX}{slug}"),
                    )],
                    vec![Button::new("Delete Comic", format!("{DELETE_PREFIX}{slug}"))],
                    vec![Button::new("« Back to list", CB_BACK)],
                ];
                (
                    AdminState::ActionMenu { slug },
                    vec![Reply::menu(
                        format!(
                            "'{}' has {} chapter(s). What would you like to do?",
                            comic.title,
                            comic.chapter_count()
                        ),
                        buttons,
                    )],
                )
            }
            None => self.missing_comic(&slug).await,
        }
    }

    async fn action_menu_choice(&self, slug: String, token: String) -> (AdminState, Vec<Reply>) {
        if token == CB_BACK {
            return self.enter_select_comic().await;
        }
        if let Some(target) = token.strip_prefix(CHAPTERS_PREFIX) {
            return self.enter_collect_archive(target.to_string()).await;
        }
        if let Some(target) = token.strip_prefix(DELETE_PREFIX) {
            return self.enter_confirm_delete(target.to_string()).await;
        }
        let state = AdminState::ActionMenu { slug };
        let reply = reprompt(&state);
        (state, vec![reply])
    }

    async fn enter_collect_archive(&self, slug: String) -> (AdminState, Vec<Reply>) {
        match self.store.get(&slug).await {
            Some(comic) => (
                AdminState::CollectArchive { slug },
                vec![Reply::text(format!(
                    "OK. Send me the chapter archive for '{}' as a .zip file.\n\
                     Each folder inside becomes one chapter; the folder name carries \
                     the chapter number (e.g., 'Chapter 1', 'Chapter 25.5').\n\
                     Send /cancel to abort.",
                    comic.title
                ))],
            ),
            None => self.missing_comic(&slug).await,
        }
    }

    async fn enter_confirm_delete(&self, slug: String) -> (AdminState, Vec<Reply>) {
        match self.store.get(&slug).await {
            Some(comic) => (
                AdminState::ConfirmDelete { slug },
                vec![Reply::menu(
                    format!(
                        "Delete '{}' and its {} chapter(s)? This cannot be undone.",
                        comic.title,
                        comic.chapter_count()
                    ),
                    vec![vec![
                        Button::new("Yes, delete it", CB_CONFIRM_YES),
                        Button::new("No, keep it", CB_CONFIRM_NO),
                    ]],
                )],
            ),
            None => self.missing_comic(&slug).await,
        }
    }

    async fn commit_new_comic(
        &self,
        title: String,
        description: String,
        cover: FileRef,
    ) -> (AdminState, Vec<Reply>) {
        let comic = match Comic::new(title, description, cover) {
            Ok(comic) => comic,
            Err(e) => return (AdminState::Idle, vec![Reply::text(format!("❌ {e}"))]),
        };
        let title = comic.title.clone();
        match self.store.insert_new(comic).await {
            Ok(()) => {
                log::info!("added comic '{title}'");
                (
                    AdminState::Idle,
                    vec![Reply::text(format!("✅ Successfully added comic: {title}"))],
                )
            }
            Err(CatalogError::Conflict { .. }) => (
                AdminState::Idle,
                vec![Reply::text("❌ A comic with this title already exists.")],
            ),
            Err(e) => {
                log::error!("failed to save new comic '{title}': {e}");
                (
                    AdminState::Idle,
                    vec![Reply::text(format!("❌ Error saving comic: {e}"))],
                )
            }
        }
    }

    async fn commit_archive(
        &self,
        slug: String,
        file: FileRef,
        name: String,
    ) -> (AdminState, Vec<Reply>) {
        log::info!("importing archive '{name}' into '{slug}'");
        let archive = match self.relay.fetch_file(&file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("could not download archive '{name}': {e}");
                return (
                    AdminState::Idle,
                    vec![Reply::text(format!("❌ Could not download the archive: {e}"))],
                );
            }
        };
        match import_into_catalog(
            &self.store,
            self.relay.as_ref(),
            &slug,
            &archive,
            Some(&LogProgress),
        )
        .await
        {
            Ok(report) => (AdminState::Idle, vec![Reply::text(report.summary())]),
            Err(e) => {
                log::error!("import into '{slug}' failed: {e}");
                (
                    AdminState::Idle,
                    vec![Reply::text(format!("❌ Import failed: {e}"))],
                )
            }
        }
    }

    async fn commit_delete(&self, slug: String) -> (AdminState, Vec<Reply>) {
        let title = self.store.get(&slug).await.map(|comic| comic.title);
        match self.store.delete(&slug).await {
            Ok(true) => {
                let label = title.unwrap_or_else(|| slug.clone());
                log::info!("deleted comic '{label}'");
                let mut replies = vec![Reply::text(format!("🗑 Deleted '{label}'."))];
                let (state, list) = self.enter_select_comic().await;
                replies.extend(list);
                (state, replies)
            }
            Ok(false) => self.missing_comic(&slug).await,
            Err(e) => {
                log::error!("failed to delete '{slug}': {e}");
                (
                    AdminState::Idle,
                    vec![Reply::text(format!("❌ Error deleting comic: {e}"))],
                )
            }
        }
    }

    /// A comic vanished between menus. Report it and re-list.
    async fn missing_comic(&self, slug: &str) -> (AdminState, Vec<Reply>) {
        let mut replies = vec![Reply::text(format!("❌ Comic '{slug}' no longer exists."))];
        let (state, list) = self.enter_select_comic().await;
        replies.extend(list);
        (state, replies)
    }
}

fn is_menu_command(text: &str) -> bool {
    matches!(text.trim(), "/start" | "/menu")
}

fn is_cancel(input: &AdminInput) -> bool {
    match input {
        AdminInput::Text(text) => text.trim().eq_ignore_ascii_case("/cancel"),
        AdminInput::Callback(token) => token == CB_CANCEL,
        _ => false,
    }
}

fn main_menu() -> Reply {
    Reply::menu(
        "What would you like to do?",
        vec![
            vec![Button::new("Add New Comic", CB_ADD_COMIC)],
            vec![Button::new("Manage Comics", CB_MANAGE)],
        ],
    )
}

/// Re-prompt for the input a state is waiting on, without moving.
fn reprompt(state: &AdminState) -> Reply {
    let text = match state {
        AdminState::Idle => "Send /menu to manage the catalog.",
        AdminState::CollectTitle => "I need a text title. Please send the title of the new comic.",
        AdminState::CollectDescription { .. } => "I need a text description. Please send one.",
        AdminState::CollectCover { .. } => "That doesn't look like an image. Please send a photo.",
        AdminState::SelectComic => "Please pick a comic from the list, or send /cancel.",
        AdminState::ActionMenu { .. } => {
            "Please use the buttons to choose an action, or send /cancel."
        }
        AdminState::CollectArchive { .. } => {
            "That is not a file. Please send the chapter archive as a .zip document, or send /cancel."
        }
        AdminState::ConfirmDelete { .. } => "Please answer with the buttons: delete or keep.",
    };
    Reply::text(text)
}
