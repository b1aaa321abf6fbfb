use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_macros::debug_handler;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::Id;
use crate::types::request;
use crate::utils::auth::CurrentUser;

#[debug_handler]
pub(crate) async fn publish(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(params): Json<request::PublishVideoData>,
) -> Result<impl IntoResponse, Error> {
    let video = state
        .video_controller
        .publish(
            &user.id,
            &params.title,
            &params.description,
            &params.video_file,
            &params.thumbnail,
            params.duration,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(video)))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    Extension(viewer): Extension<Option<CurrentUser>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let id: Id = id.parse()?;

    let video = state
        .video_controller
        .get(&id, viewer.as_ref().map(|user| &user.id))
        .await?
        .ok_or(Error::VideoNotFound)?;

    Ok(Json(video))
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<request::OwnedPageQuery>,
) -> Result<impl IntoResponse, Error> {
    let owner_id: Id = query.owner.parse()?;
    let (page, limit) = request::PageQuery {
        page: query.page,
        limit: query.limit,
    }
    .resolve()?;

    let videos = state
        .video_controller
        .list_by_owner(&owner_id, page, limit)
        .await?;

    Ok(Json(videos))
}
