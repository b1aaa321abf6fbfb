use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::types::Id;
use crate::types::response::TokenPair;

const ISSUER: &str = "https://api.vidcore.dev";

const ACCESS_TTL_MINUTES: i64 = 15;
const REFRESH_TTL_DAYS: i64 = 10;

#[derive(Deserialize, Serialize, Debug)]
pub(crate) struct Claims {
    pub(crate) exp: usize,
    pub(crate) iat: usize,
    pub(crate) sub: String,
    pub(crate) iss: String,
}

/// Issues and verifies access/refresh token pairs. The two kinds are signed
/// with distinct secrets, so a leaked access secret cannot forge refresh
/// tokens and vice versa.
#[derive(Clone)]
pub(crate) struct TokenService {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService").finish()
    }
}

impl TokenService {
    pub(crate) fn new(access_secret: &str, refresh_secret: &str) -> Self {
        Self {
            access_encoding_key: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding_key: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding_key: DecodingKey::from_secret(refresh_secret.as_bytes()),
        }
    }

    pub(crate) fn issue_pair(&self, user_id: &Id) -> Result<TokenPair, Error> {
        let access_token = self.encode(
            user_id,
            Duration::minutes(ACCESS_TTL_MINUTES),
            &self.access_encoding_key,
        )?;
        let refresh_token = self.encode(
            user_id,
            Duration::days(REFRESH_TTL_DAYS),
            &self.refresh_encoding_key,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    pub(crate) fn verify_access(&self, token: &str) -> Result<Id, Error> {
        self.decode(token, &self.access_decoding_key)
    }

    pub(crate) fn verify_refresh(&self, token: &str) -> Result<Id, Error> {
        self.decode(token, &self.refresh_decoding_key)
    }

    fn encode(&self, user_id: &Id, ttl: Duration, key: &EncodingKey) -> Result<String, Error> {
        let current_time = Utc::now();
        let expiration_time = current_time + ttl;

        let claims = Claims {
            exp: expiration_time.timestamp() as usize,
            iat: current_time.timestamp() as usize,
            sub: user_id.to_string(),
            iss: ISSUER.into(),
        };

        Ok(jsonwebtoken::encode(&Header::default(), &claims, key)?)
    }

    fn decode(&self, token: &str, key: &DecodingKey) -> Result<Id, Error> {
        let token_data = match jsonwebtoken::decode::<Claims>(token, key, &Validation::default()) {
            Ok(token_data) => token_data,
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    return Err(Error::ExpiredToken);
                }
                _ => return Err(Error::Jwt(e)),
            },
        };

        token_data.claims.sub.parse().map_err(|_| Error::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("access-secret", "refresh-secret")
    }

    #[test]
    fn issued_pair_verifies_with_matching_keys() {
        let service = service();
        let user_id = Id::generate();

        let pair = service.issue_pair(&user_id).unwrap();

        assert_eq!(service.verify_access(&pair.access_token).unwrap(), user_id);
        assert_eq!(
            service.verify_refresh(&pair.refresh_token).unwrap(),
            user_id
        );
    }

    #[test]
    fn token_kinds_do_not_cross_verify() {
        let service = service();
        let pair = service.issue_pair(&Id::generate()).unwrap();

        assert!(service.verify_refresh(&pair.access_token).is_err());
        assert!(service.verify_access(&pair.refresh_token).is_err());
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let pair = TokenService::new("other-access", "other-refresh")
            .issue_pair(&Id::generate())
            .unwrap();

        assert!(service().verify_access(&pair.access_token).is_err());
        assert!(service().verify_refresh(&pair.refresh_token).is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let service = service();

        // beyond the default validation leeway
        let token = service
            .encode(
                &Id::generate(),
                Duration::seconds(-120),
                &service.access_encoding_key,
            )
            .unwrap();

        assert!(matches!(
            service.verify_access(&token),
            Err(Error::ExpiredToken)
        ));
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let service = service();
        let pair = service.issue_pair(&Id::generate()).unwrap();

        let mut tampered = pair.access_token;
        let last = if tampered.ends_with('A') { 'B' } else { 'A' };
        tampered.pop();
        tampered.push(last);

        assert!(service.verify_access(&tampered).is_err());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert!(service().verify_access("not-a-token").is_err());
        assert!(service().verify_refresh("").is_err());
    }
}
