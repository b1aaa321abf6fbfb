use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use axum_extra::extract::cookie::CookieJar;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::Id;

pub(crate) const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub(crate) const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Authenticated caller, inserted into request extensions by `authorize`.
#[derive(Clone, Debug)]
pub(crate) struct CurrentUser {
    pub(crate) id: Id,
    pub(crate) username: String,
}

fn bearer_token(request: &Request) -> Result<Option<String>, Error> {
    let auth_header = match request.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header,
        None => return Ok(None),
    };

    let mut header = auth_header.to_str()?.split_whitespace();
    let (_bearer, token) = (header.next(), header.next());

    Ok(Some(token.unwrap_or_default().to_owned()))
}

async fn current_user(
    state: &AppState,
    jar: &CookieJar,
    bearer: Option<String>,
) -> Result<Option<CurrentUser>, Error> {
    let token = match bearer {
        Some(token) => token,
        None => match jar.get(ACCESS_TOKEN_COOKIE) {
            Some(cookie) => cookie.value().to_owned(),
            None => return Ok(None),
        },
    };

    let user_id = state.session_controller.verify_access(&token)?;

    let user = state
        .user_controller
        .get_by_id(&user_id)
        .await?
        .ok_or(Error::Unauthorized)?;

    Ok(Some(CurrentUser {
        id: user.id,
        username: user.username,
    }))
}

/// Requires a valid access token, from the Authorization header or the
/// `access_token` cookie.
pub(crate) async fn authorize(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let bearer = bearer_token(&request)?;
    let user = current_user(&state, &jar, bearer)
        .await?
        .ok_or(Error::NoCredentials)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Like `authorize`, but absent credentials yield `None` instead of a
/// rejection. Presented-but-invalid credentials are still rejected.
pub(crate) async fn identify(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let bearer = bearer_token(&request)?;
    let user = current_user(&state, &jar, bearer).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
