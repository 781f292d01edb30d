//! Signed identity tokens.
//!
//! A token is an HS256 JWT over `{id, email, iat}`. There is no expiry claim:
//! a token stays valid for as long as the signing secret does. Verification
//! is pure and never consults the credential store.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::{EmailAddress, User, UserId};

/// Identity asserted by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: UserId,
    email: EmailAddress,
}

impl Identity {
    pub fn new(id: UserId, email: EmailAddress) -> Self {
        Self { id, email }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(user.id().clone(), user.email().clone())
    }
}

/// Why a request carries no usable identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    /// No token was presented, or it was empty.
    #[error("authentication token is missing")]
    Missing,
    /// The token failed signature or payload checks.
    #[error("authentication token is invalid")]
    Invalid,
}

/// Failure to sign a token.
#[derive(Debug, thiserror::Error)]
#[error("failed to sign identity token: {0}")]
pub struct TokenIssueError(#[from] jsonwebtoken::errors::Error);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
    email: String,
    iat: i64,
}

/// Issues and verifies identity tokens with one shared secret.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use mockable::DefaultClock;
/// use staybook::domain::{EmailAddress, Identity, TokenService, UserId};
///
/// let tokens = TokenService::new(b"0123456789abcdef0123456789abcdef", Arc::new(DefaultClock));
/// let identity = Identity::new(UserId::random(), EmailAddress::new("ada@example.com").unwrap());
/// let token = tokens.issue(&identity).unwrap();
/// assert_eq!(tokens.verify(Some(&token)), Ok(identity));
/// ```
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Build a service around `secret`. The bytes are copied into the keys.
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }

    /// Sign a token asserting `identity`.
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenIssueError> {
        let claims = Claims {
            id: identity.id().to_string(),
            email: identity.email().to_string(),
            iat: self.clock.utc().timestamp(),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Verify `token` and return the identity it asserts.
    pub fn verify(&self, token: Option<&str>) -> Result<Identity, AuthFailure> {
        let token = token.filter(|raw| !raw.is_empty()).ok_or(AuthFailure::Missing)?;
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| AuthFailure::Invalid)?;
        let id = UserId::new(&data.claims.id).map_err(|_| AuthFailure::Invalid)?;
        let email = EmailAddress::new(&data.claims.email).map_err(|_| AuthFailure::Invalid)?;
        Ok(Identity::new(id, email))
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}
