//! Ownership checks for mutating place operations.

use super::{Identity, UserId};

/// Outcome of an ownership check.
#[must_use = "an authorization decision must be acted upon"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied,
}

/// Reason an authenticated caller may not act on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationFailure {
    #[error("only the owner may modify this resource")]
    NotOwner,
}

impl Authorization {
    /// Convert the decision into a `Result` for `?` propagation.
    pub fn into_result(self) -> Result<(), AuthorizationFailure> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied => Err(AuthorizationFailure::NotOwner),
        }
    }
}

/// Allow the action only when `identity` owns the resource.
///
/// # Examples
/// ```
/// use staybook::domain::{authorize_owner_action, Authorization, EmailAddress, Identity, UserId};
///
/// let owner = UserId::random();
/// let identity = Identity::new(owner.clone(), EmailAddress::new("a@b.io").unwrap());
/// assert_eq!(authorize_owner_action(&identity, &owner), Authorization::Allowed);
/// ```
pub fn authorize_owner_action(identity: &Identity, resource_owner: &UserId) -> Authorization {
    if identity.id() == resource_owner {
        Authorization::Allowed
    } else {
        Authorization::Denied
    }
}
