use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::Id;
use crate::types::{request, response};
use crate::utils::auth::CurrentUser;

pub(crate) async fn register(
    State(state): State<AppState>,
    Json(params): Json<request::RegisterData>,
) -> Result<impl IntoResponse, Error> {
    let user = state
        .user_controller
        .register(
            &params.username,
            &params.email,
            &params.display_name,
            &params.password,
            params.avatar.as_deref(),
            params.cover_image.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(response::UserProfile::from(&user)),
    ))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let id: Id = id.parse()?;

    let user = state
        .user_controller
        .get_by_id(&id)
        .await?
        .ok_or(Error::UserNotFound)?;

    Ok(Json(response::PublicUser::from(&user)))
}

pub(crate) async fn update_password(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(params): Json<request::UpdatePasswordData>,
) -> Result<impl IntoResponse, Error> {
    state
        .session_controller
        .change_password(&user.id, &params.old_password, &params.new_password)
        .await?;

    Ok(Json(json!({})))
}
