use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;
use tracing::info_span;

use crate::core::state::AppState;
use crate::routes::{likes, sessions, subscriptions, tweets, users, videos};
use crate::utils;

pub(crate) fn routes(state: AppState) -> Router {
    // /sessions/...
    let session_router = Router::new()
        .route("/", post(sessions::login))
        .route(
            "/",
            delete(sessions::logout).layer(middleware::from_fn_with_state(
                state.clone(),
                utils::auth::authorize,
            )),
        )
        .route("/refresh", post(sessions::refresh));

    // /users/...
    let user_router = Router::new()
        .route("/", post(users::register))
        .route("/{id}", get(users::get));

    // /likes/...
    let like_router = Router::new()
        .route("/videos", get(likes::videos))
        .route("/{kind}/{target_id}", post(likes::toggle))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::authorize,
        ));

    // /subscriptions/...
    let subscription_router = Router::new()
        .route("/", get(subscriptions::subscribed))
        .route("/{channel_id}", post(subscriptions::toggle))
        .route("/{channel_id}/subscribers", get(subscriptions::subscribers))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::authorize,
        ));

    // /videos/...
    let video_router = Router::new()
        .route("/", get(videos::list))
        .route(
            "/",
            post(videos::publish).layer(middleware::from_fn_with_state(
                state.clone(),
                utils::auth::authorize,
            )),
        )
        .route(
            "/{id}",
            get(videos::get).layer(middleware::from_fn_with_state(
                state.clone(),
                utils::auth::identify,
            )),
        );

    // /tweets/...
    let tweet_router = Router::new()
        .route("/", get(tweets::list))
        .route(
            "/",
            post(tweets::create).layer(middleware::from_fn_with_state(
                state.clone(),
                utils::auth::authorize,
            )),
        )
        .route(
            "/{id}",
            patch(tweets::update)
                .delete(tweets::delete)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    utils::auth::authorize,
                )),
        );

    Router::new()
        .route("/", get(|| async { "Hello, World!" }))
        .route(
            "/password",
            patch(users::update_password).layer(middleware::from_fn_with_state(
                state.clone(),
                utils::auth::authorize,
            )),
        )
        .nest("/sessions", session_router)
        .nest("/users", user_router)
        .nest("/likes", like_router)
        .nest("/subscriptions", subscription_router)
        .nest("/videos", video_router)
        .nest("/tweets", tweet_router)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);

                info_span!(
                    "request",
                    method = ?request.method(),
                    matched_path,
                )
            }),
        )
}
