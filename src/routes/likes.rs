use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::response::IntoResponse;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::Id;
use crate::types::relation::RelationKind;
use crate::types::response;
use crate::utils::auth::CurrentUser;

pub(crate) async fn toggle(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((kind, target_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, Error> {
    let Some(kind) = RelationKind::from_like_param(&kind) else {
        return Err(Error::InvalidLikeTarget(kind));
    };

    let target_id: Id = target_id.parse()?;

    let is_active = state
        .relation_controller
        .toggle(&user.id, &target_id, kind)
        .await?;

    Ok(Json(response::Toggle { is_active }))
}

pub(crate) async fn videos(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    let videos = state.relation_controller.liked_videos(&user.id).await?;

    Ok(Json(videos))
}
