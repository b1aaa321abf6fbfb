use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Expired token")]
    ExpiredToken,
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("Header decode error: {0}")]
    HeaderDecode(#[from] axum::http::header::ToStrError),
    #[error("No credentials provided")]
    NoCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("User not found")]
    UserNotFound,
    #[error("Video not found")]
    VideoNotFound,
    #[error("Tweet not found")]
    TweetNotFound,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Invalid id")]
    InvalidId,
    #[error("Invalid username")]
    InvalidUsername,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Invalid password: {0}")]
    InvalidPassword(String),
    #[error("Missing field: {0}")]
    EmptyField(&'static str),
    #[error("Invalid like target: {0}")]
    InvalidLikeTarget(String),
    #[error("Invalid pagination parameters")]
    InvalidPage,
    #[error("Channels cannot subscribe to themselves")]
    SelfSubscription,
    #[error("Forbidden")]
    Forbidden,
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);

        // every token verification failure collapses to the same response so
        // clients cannot distinguish expired, forged, and rotated-out tokens
        let (status, message) = match self {
            Error::Sql(_) | Error::Bcrypt(_) | Error::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned(),
            ),
            Error::Jwt(_) | Error::ExpiredToken | Error::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_owned())
            }
            Error::HeaderDecode(_) | Error::NoCredentials => (
                StatusCode::UNAUTHORIZED,
                "No credentials provided".to_owned(),
            ),
            Error::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_owned()),
            Error::VideoNotFound => (StatusCode::NOT_FOUND, "Video not found".to_owned()),
            Error::TweetNotFound => (StatusCode::NOT_FOUND, "Tweet not found".to_owned()),
            Error::UserAlreadyExists => (StatusCode::CONFLICT, "User already exists".to_owned()),
            Error::InvalidId => (StatusCode::BAD_REQUEST, "Invalid id".to_owned()),
            Error::InvalidUsername => (StatusCode::BAD_REQUEST, "Invalid username".to_owned()),
            Error::InvalidEmail => (StatusCode::BAD_REQUEST, "Invalid email".to_owned()),
            Error::InvalidPassword(message) => (StatusCode::BAD_REQUEST, message),
            Error::EmptyField(field) => {
                (StatusCode::BAD_REQUEST, format!("Missing field: {field}"))
            }
            Error::InvalidLikeTarget(kind) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid like target: {kind}"),
            ),
            Error::InvalidPage => (
                StatusCode::BAD_REQUEST,
                "Invalid pagination parameters".to_owned(),
            ),
            Error::SelfSubscription => (
                StatusCode::BAD_REQUEST,
                "Channels cannot subscribe to themselves".to_owned(),
            ),
            Error::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_owned()),
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use jsonwebtoken::{DecodingKey, Validation};

    async fn envelope(error: Error) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn token_failures_are_indistinguishable() {
        let jwt_error = jsonwebtoken::decode::<serde_json::Value>(
            "not-a-token",
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap_err();

        for error in [Error::Unauthorized, Error::ExpiredToken, Error::Jwt(jwt_error)] {
            let (status, body) = envelope(error).await;

            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Unauthorized");
        }
    }

    #[tokio::test]
    async fn storage_failures_never_leak_detail() {
        let (status, body) = envelope(Error::Sql(sqlx::Error::PoolClosed)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn validation_failures_map_to_bad_request() {
        for error in [Error::InvalidId, Error::SelfSubscription, Error::InvalidPage] {
            let (status, body) = envelope(error).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
        }
    }

    #[tokio::test]
    async fn missing_entities_map_to_not_found() {
        let (status, _) = envelope(Error::UserNotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
