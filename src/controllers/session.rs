use crate::controllers::token::TokenService;
use crate::controllers::user::UserController;
use crate::core::error::Error;
use crate::types::Id;
use crate::types::response::TokenPair;
use crate::types::user::User;

/// Session lifecycle per account: LoggedOut (empty slot) -> Active (slot
/// holds the latest refresh token) -> Active (rotated slot) -> LoggedOut.
#[derive(Clone, Debug)]
pub(crate) struct SessionController {
    users: UserController,
    tokens: TokenService,
}

impl SessionController {
    pub(crate) fn new(users: UserController, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Overwriting the slot on login invalidates any previous session chain
    /// for the account.
    pub(crate) async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<(TokenPair, User), Error> {
        let user = self
            .users
            .get_by_credential(identifier)
            .await?
            .ok_or(Error::UserNotFound)?;

        if !self.users.verify_password(&user, password)? {
            return Err(Error::Unauthorized);
        }

        let pair = self.tokens.issue_pair(&user.id)?;

        self.users
            .set_refresh_token(&user.id, Some(&pair.refresh_token))
            .await?;

        Ok((pair, user))
    }

    /// Rotation on use. A presented token must exactly equal the stored
    /// slot: a rotated-out or revoked token is still cryptographically valid
    /// but no longer matches, and is rejected as a replay.
    pub(crate) async fn refresh(&self, presented: &str) -> Result<TokenPair, Error> {
        let user_id = self.tokens.verify_refresh(presented)?;

        let user = self
            .users
            .get_by_id(&user_id)
            .await?
            .ok_or(Error::Unauthorized)?;

        match user.refresh_token.as_deref() {
            Some(stored) if stored == presented => (),
            _ => return Err(Error::Unauthorized),
        }

        let pair = self.tokens.issue_pair(&user.id)?;

        self.users
            .set_refresh_token(&user.id, Some(&pair.refresh_token))
            .await?;

        Ok(pair)
    }

    pub(crate) async fn logout(&self, user_id: &Id) -> Result<(), Error> {
        self.users.set_refresh_token(user_id, None).await
    }

    /// Outstanding refresh tokens deliberately survive a password change.
    pub(crate) async fn change_password(
        &self,
        user_id: &Id,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), Error> {
        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(Error::UserNotFound)?;

        if !self.users.verify_password(&user, old_password)? {
            return Err(Error::Unauthorized);
        }

        self.users.update_password(user_id, new_password).await
    }

    pub(crate) fn verify_access(&self, token: &str) -> Result<Id, Error> {
        self.tokens.verify_access(token)
    }
}
