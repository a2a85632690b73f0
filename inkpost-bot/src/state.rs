//! Conversation states for the admin dialog.

/// Where the admin's conversation currently stands.
///
/// Everything collected so far rides inside the variant, so an unexpected
/// input can re-prompt without losing a single field, and a state that
/// needs a title cannot exist without one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdminState {
    /// No conversation in progress
    #[default]
    Idle,
    /// Waiting for the new comic's title
    CollectTitle,
    /// Waiting for the description; the title is already in hand
    CollectDescription { title: String },
    /// Waiting for the cover photo
    CollectCover { title: String, description: String },
    /// Waiting for the admin to pick a comic from the menu
    SelectComic,
    /// Waiting for an action choice on one comic
    ActionMenu { slug: String },
    /// Waiting for a chapter archive upload
    CollectArchive { slug: String },
    /// Waiting for a yes/no answer before deleting
    ConfirmDelete { slug: String },
}

impl AdminState {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CollectTitle => "collect-title",
            Self::CollectDescription { .. } => "collect-description",
            Self::CollectCover { .. } => "collect-cover",
            Self::SelectComic => "select-comic",
            Self::ActionMenu { .. } => "action-menu",
            Self::CollectArchive { .. } => "collect-archive",
            Self::ConfirmDelete { .. } => "confirm-delete",
        }
    }
}
