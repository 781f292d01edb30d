//! Credential payloads for registration and login.
//!
//! Handlers convert request bodies into these types before calling the
//! account service, so the service only ever sees validated input.

use zeroize::Zeroizing;

use super::{EmailAddress, UserName, UserValidationError};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN: usize = 6;

/// Errors raised while validating a login payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
        }
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty. Its shape is not checked:
///   an address that cannot exist simply finds no account.
/// - `password` is non-empty and kept verbatim.
///
/// # Examples
/// ```
/// use staybook::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.com", "secret").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw request values.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Errors raised while validating a registration payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationValidationError {
    #[error("{0}")]
    Name(UserValidationError),
    #[error("{0}")]
    Email(UserValidationError),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl RegistrationValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Email(_) => "email",
            Self::PasswordTooShort { .. } => "password",
        }
    }

    /// Machine-readable reason, stable for clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Name(UserValidationError::NameTooLong { .. }) => "too_long",
            Self::Name(_) | Self::Email(UserValidationError::EmptyEmail) => "missing_field",
            Self::Email(_) => "invalid_format",
            Self::PasswordTooShort { .. } => "too_short",
        }
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate name, email and password in that order.
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let name = UserName::new(name).map_err(RegistrationValidationError::Name)?;
        let email = EmailAddress::new(email).map_err(RegistrationValidationError::Email)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
