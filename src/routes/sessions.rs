use axum::Json;
use axum::extract::{Extension, State};
use axum::response::IntoResponse;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::{request, response};
use crate::utils::auth::{ACCESS_TOKEN_COOKIE, CurrentUser, REFRESH_TOKEN_COOKIE};

/// Same-site, http-only, secure-transport cookie; scripts never see the
/// token values.
fn token_cookie(name: &'static str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);

    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");

    cookie
}

pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(params): Json<request::LoginData>,
) -> Result<impl IntoResponse, Error> {
    let (pair, user) = state
        .session_controller
        .login(&params.identifier, &params.password)
        .await?;

    let jar = jar
        .add(token_cookie(ACCESS_TOKEN_COOKIE, pair.access_token.clone()))
        .add(token_cookie(
            REFRESH_TOKEN_COOKIE,
            pair.refresh_token.clone(),
        ));

    Ok((jar, Json(response::Login::new(pair, &user))))
}

pub(crate) async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    jar: CookieJar,
) -> Result<impl IntoResponse, Error> {
    state.session_controller.logout(&user.id).await?;

    let jar = jar
        .remove(token_cookie(ACCESS_TOKEN_COOKIE, String::new()))
        .remove(token_cookie(REFRESH_TOKEN_COOKIE, String::new()));

    Ok((jar, Json(json!({}))))
}

pub(crate) async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<request::RefreshData>>,
) -> Result<impl IntoResponse, Error> {
    let presented = body
        .and_then(|Json(params)| params.refresh_token)
        .or_else(|| {
            jar.get(REFRESH_TOKEN_COOKIE)
                .map(|cookie| cookie.value().to_owned())
        })
        .ok_or(Error::NoCredentials)?;

    let pair = state.session_controller.refresh(&presented).await?;

    let jar = jar
        .add(token_cookie(ACCESS_TOKEN_COOKIE, pair.access_token.clone()))
        .add(token_cookie(
            REFRESH_TOKEN_COOKIE,
            pair.refresh_token.clone(),
        ));

    Ok((jar, Json(pair)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_cookies_are_locked_down() {
        let cookie = token_cookie(ACCESS_TOKEN_COOKIE, "value".to_owned());

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }
}
