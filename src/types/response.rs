use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::Id;
use crate::types::user::User;

/// Self view returned from login and registration. Credential and token
/// fields never cross this boundary.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserProfile {
    pub(crate) id: Id,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) display_name: String,
    pub(crate) avatar: Option<String>,
    pub(crate) cover_image: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            avatar: user.avatar.clone(),
            cover_image: user.cover_image.clone(),
            created_at: user.created_at,
        }
    }
}

/// Restricted projection used everywhere another user is surfaced.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PublicUser {
    pub(crate) id: Id,
    pub(crate) username: String,
    pub(crate) display_name: String,
    pub(crate) avatar: Option<String>,
    pub(crate) cover_image: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            avatar: user.avatar.clone(),
            cover_image: user.cover_image.clone(),
        }
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenPair {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Login {
    pub(crate) access_token: String,
    pub(crate) refresh_token: String,
    pub(crate) user: UserProfile,
}

impl Login {
    pub(crate) fn new(pair: TokenPair, user: &User) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            user: UserProfile::from(user),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Toggle {
    pub(crate) is_active: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoSummary {
    pub(crate) id: Id,
    pub(crate) title: String,
    pub(crate) thumbnail: String,
    pub(crate) duration: i32,
    pub(crate) views: i64,
    pub(crate) owner: PublicUser,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Video {
    pub(crate) id: Id,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) video_file: String,
    pub(crate) thumbnail: String,
    pub(crate) duration: i32,
    pub(crate) views: i64,
    pub(crate) is_published: bool,
    pub(crate) owner: PublicUser,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Tweet {
    pub(crate) id: Id,
    pub(crate) owner_id: Id,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) modified_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubscriberPage {
    pub(crate) total: i64,
    pub(crate) page: i64,
    pub(crate) limit: i64,
    pub(crate) subscribers: Vec<PublicUser>,
}
