use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::response::IntoResponse;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::Id;
use crate::types::relation::RelationKind;
use crate::types::{request, response};
use crate::utils::auth::CurrentUser;

pub(crate) async fn toggle(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(channel_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let channel_id: Id = channel_id.parse()?;

    let is_active = state
        .relation_controller
        .toggle(&user.id, &channel_id, RelationKind::Channel)
        .await?;

    Ok(Json(response::Toggle { is_active }))
}

pub(crate) async fn subscribed(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    let channels = state
        .relation_controller
        .subscribed_channels(&user.id)
        .await?;

    Ok(Json(channels))
}

pub(crate) async fn subscribers(
    State(state): State<AppState>,
    Path(channel_id): Path<String>,
    Query(query): Query<request::PageQuery>,
) -> Result<impl IntoResponse, Error> {
    let channel_id: Id = channel_id.parse()?;
    let (page, limit) = query.resolve()?;

    let (total, subscribers) = state
        .relation_controller
        .channel_subscribers(&channel_id, page, limit)
        .await?;

    Ok(Json(response::SubscriberPage {
        total,
        page,
        limit,
        subscribers,
    }))
}
