use regex::Regex;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::core::error::{self, Error};
use crate::types::Id;
use crate::types::user::User;

/// Credential store: owns the users table, password hashing, and the
/// single-slot refresh token.
#[derive(Clone)]
pub(crate) struct UserController {
    pool: PgPool,
    username_pattern: Regex,
}

impl std::fmt::Debug for UserController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("username_pattern", &self.username_pattern.as_str())
            .finish()
    }
}

impl UserController {
    pub(crate) fn new(pool: PgPool) -> Result<Self, error::ConfigError> {
        Ok(Self {
            pool,
            username_pattern: Regex::new(r"^[a-zA-Z0-9_-]{3,20}$")?,
        })
    }

    pub(crate) async fn register(
        &self,
        username: &str,
        email: &str,
        display_name: &str,
        password: &str,
        avatar: Option<&str>,
        cover_image: Option<&str>,
    ) -> Result<User, Error> {
        if !self.username_pattern.is_match(username) {
            return Err(Error::InvalidUsername);
        }

        if !email.contains('@') {
            return Err(Error::InvalidEmail);
        }

        if display_name.trim().is_empty() {
            return Err(Error::EmptyField("displayName"));
        }

        if password.len() < 8 {
            return Err(Error::InvalidPassword(
                "Password must be at least 8 characters".to_owned(),
            ));
        }

        let password_hash = self.hash(password)?;
        let id = Id::generate();

        let user = match sqlx::query(
            "INSERT INTO users (id, username, email, display_name, password_hash, avatar, cover_image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id,
                username,
                email,
                display_name,
                password_hash,
                refresh_token,
                avatar,
                cover_image,
                created_at;",
        )
        .bind(&id)
        .bind(username.to_lowercase())
        .bind(email)
        .bind(display_name)
        .bind(&password_hash)
        .bind(avatar)
        .bind(cover_image)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => user,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(Error::UserAlreadyExists);
            }
            Err(e) => return Err(Error::Sql(e)),
        };

        Ok(user)
    }

    /// Looks a user up by username or email.
    pub(crate) async fn get_by_credential(&self, identifier: &str) -> Result<Option<User>, Error> {
        match sqlx::query(
            "SELECT
                id,
                username,
                email,
                display_name,
                password_hash,
                refresh_token,
                avatar,
                cover_image,
                created_at
            FROM users
            WHERE username = lower($1) OR email = $1;",
        )
        .bind(identifier)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    pub(crate) async fn get_by_id(&self, id: &Id) -> Result<Option<User>, Error> {
        match sqlx::query(
            "SELECT
                id,
                username,
                email,
                display_name,
                password_hash,
                refresh_token,
                avatar,
                cover_image,
                created_at
            FROM users
            WHERE id = $1;",
        )
        .bind(id)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(Error::Sql(e)),
        }
    }

    pub(crate) fn verify_password(&self, user: &User, password: &str) -> Result<bool, Error> {
        Ok(bcrypt::verify(password, &user.password_hash)?)
    }

    /// Single-slot overwrite; `None` revokes every outstanding refresh token
    /// for the account at once.
    pub(crate) async fn set_refresh_token(
        &self,
        id: &Id,
        token: Option<&str>,
    ) -> Result<(), Error> {
        sqlx::query("UPDATE users SET refresh_token = $2 WHERE id = $1;")
            .bind(id)
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_password(&self, id: &Id, new_password: &str) -> Result<(), Error> {
        if new_password.len() < 8 {
            return Err(Error::InvalidPassword(
                "Password must be at least 8 characters".to_owned(),
            ));
        }

        let password_hash = self.hash(new_password)?;

        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1;")
            .bind(id)
            .bind(&password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    fn hash(&self, value: &str) -> Result<String, Error> {
        bcrypt::hash(value, 12).map_err(Error::Bcrypt)
    }
}

fn map_user(row: PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        display_name: row.get("display_name"),
        password_hash: row.get("password_hash"),
        refresh_token: row.get("refresh_token"),
        avatar: row.get("avatar"),
        cover_image: row.get("cover_image"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn controller() -> UserController {
        UserController::new(PgPool::connect_lazy("postgresql://localhost/vidcore").unwrap())
            .unwrap()
    }

    fn user_with_hash(password_hash: String) -> User {
        User {
            id: Id::generate(),
            username: "viewer".to_owned(),
            email: "viewer@example.com".to_owned(),
            display_name: "Viewer".to_owned(),
            password_hash,
            refresh_token: None,
            avatar: None,
            cover_image: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn password_round_trips_through_hash_and_verify() {
        let controller = controller();
        let user = user_with_hash(controller.hash("correct horse battery").unwrap());

        assert!(
            controller
                .verify_password(&user, "correct horse battery")
                .unwrap()
        );
        assert!(!controller.verify_password(&user, "wrong password").unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted_per_record() {
        let controller = controller();

        assert_ne!(
            controller.hash("swordfish1").unwrap(),
            controller.hash("swordfish1").unwrap()
        );
    }

    // the lazy pool never connects: any of these reaching storage would
    // surface a connection error instead of a validation error
    #[tokio::test]
    async fn registration_validates_before_touching_storage() {
        let controller = controller();

        assert!(matches!(
            controller
                .register("x", "a@b.c", "X", "long-enough-pw", None, None)
                .await,
            Err(Error::InvalidUsername)
        ));
        assert!(matches!(
            controller
                .register("viewer", "not-an-email", "Viewer", "long-enough-pw", None, None)
                .await,
            Err(Error::InvalidEmail)
        ));
        assert!(matches!(
            controller
                .register("viewer", "a@b.c", "   ", "long-enough-pw", None, None)
                .await,
            Err(Error::EmptyField("displayName"))
        ));
        assert!(matches!(
            controller
                .register("viewer", "a@b.c", "Viewer", "short", None, None)
                .await,
            Err(Error::InvalidPassword(_))
        ));
    }

    #[tokio::test]
    async fn short_replacement_passwords_are_rejected() {
        let controller = controller();

        assert!(matches!(
            controller.update_password(&Id::generate(), "short").await,
            Err(Error::InvalidPassword(_))
        ));
    }
}
