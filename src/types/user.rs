use chrono::{DateTime, Utc};

use crate::types::Id;

/// Full user row, including credential fields. Never serialized directly;
/// responses go through the projections in `types::response`.
#[derive(Clone, Debug)]
pub(crate) struct User {
    pub(crate) id: Id,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) display_name: String,
    pub(crate) password_hash: String,
    pub(crate) refresh_token: Option<String>,
    pub(crate) avatar: Option<String>,
    pub(crate) cover_image: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}
