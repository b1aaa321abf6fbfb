use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::Id;
use crate::types::request;
use crate::utils::auth::CurrentUser;

pub(crate) async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(params): Json<request::TweetData>,
) -> Result<impl IntoResponse, Error> {
    let tweet = state
        .tweet_controller
        .create(&user.id, &params.content)
        .await?;

    Ok((StatusCode::CREATED, Json(tweet)))
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Query(query): Query<request::OwnerQuery>,
) -> Result<impl IntoResponse, Error> {
    let owner_id: Id = query.owner.parse()?;

    let tweets = state.tweet_controller.list_by_owner(&owner_id).await?;

    Ok(Json(tweets))
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(params): Json<request::UpdateTweetData>,
) -> Result<impl IntoResponse, Error> {
    let id: Id = id.parse()?;

    let tweet = state
        .tweet_controller
        .update(&id, &user.id, &params.new_content)
        .await?;

    Ok(Json(tweet))
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let id: Id = id.parse()?;

    state.tweet_controller.delete(&id, &user.id).await?;

    Ok(Json(json!({})))
}
