//! Authentication primitives: credentials, registrations and stored accounts.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a service.

use std::fmt;

use zeroize::Zeroizing;

/// Longest accepted display name, in characters.
pub const MAX_NAME_CHARS: usize = 80;
/// Shortest accepted password on registration, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Domain error returned when login or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// Name was missing or blank once trimmed.
    EmptyName,
    /// Name exceeded [`MAX_NAME_CHARS`].
    NameTooLong,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email did not look like `local@domain.tld`.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
    /// Password shorter than [`MIN_PASSWORD_CHARS`].
    PasswordTooShort,
}

impl AuthValidationError {
    /// Form field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword | Self::PasswordTooShort => "password",
        }
    }

    /// Machine-readable validation code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NameTooLong => "name_too_long",
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmptyPassword => "empty_password",
            Self::PasswordTooShort => "password_too_short",
        }
    }
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong => write!(f, "name must be at most {MAX_NAME_CHARS} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordTooShort => {
                write!(f, "password must be at least {MIN_PASSWORD_CHARS} characters")
            }
        }
    }
}

impl std::error::Error for AuthValidationError {}

/// Store-generated user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalised email address used as the login key.
///
/// ## Invariants
/// - Trimmed and lower-cased.
/// - Exactly one `@`, a non-empty local part, and a domain with at least one
///   interior dot.
///
/// # Examples
/// ```
/// use inventory_backend::domain::Email;
///
/// let email = Email::parse(" Ada@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// assert!(Email::parse("ada@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalise a raw email address.
    pub fn parse(raw: &str) -> Result<Self, AuthValidationError> {
        let normalized = Self::normalize(raw)?;
        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AuthValidationError::InvalidEmail);
        };
        let dotted = domain
            .split('.')
            .collect::<Vec<_>>();
        if local.is_empty()
            || domain.contains('@')
            || dotted.len() < 2
            || dotted.iter().any(|label| label.is_empty())
            || normalized.chars().any(char::is_whitespace)
        {
            return Err(AuthValidationError::InvalidEmail);
        }
        Ok(Self(normalized))
    }

    /// Trim and lower-case without checking the address shape.
    ///
    /// Login lookups use this so that malformed addresses simply fail to
    /// match rather than revealing which part of the credentials was wrong.
    pub fn normalize(raw: &str) -> Result<String, AuthValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AuthValidationError::EmptyEmail);
        }
        Ok(trimmed.to_lowercase())
    }

    /// Wrap an address read back from storage.
    #[must_use]
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated login credentials used by the authentication service.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty.
/// - `password` is non-empty but retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use inventory_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ana@mail.com", "password", true).unwrap();
/// assert_eq!(creds.email(), "ana@mail.com");
/// assert!(creds.remember());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
    remember: bool,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<Self, AuthValidationError> {
        let email = Email::normalize(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
            remember,
        })
    }

    /// Normalised email used for the credential lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Whether the caller asked for a long-lived session.
    pub fn remember(&self) -> bool {
        self.remember
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: Email,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate the raw registration form values.
    ///
    /// # Examples
    /// ```
    /// use inventory_backend::domain::{AuthValidationError, Registration};
    ///
    /// let err = Registration::try_from_parts("Ana", "ana@mail.com", "short").unwrap_err();
    /// assert_eq!(err, AuthValidationError::PasswordTooShort);
    /// ```
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthValidationError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(AuthValidationError::NameTooLong);
        }
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthValidationError::PasswordTooShort);
        }
        Ok(Self {
            name: name.to_owned(),
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Salted one-way password hash in PHC string form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    #[must_use]
    pub fn new(phc: String) -> Self {
        Self(phc)
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Stored credential row.
///
/// `password_hash` is absent for legacy rows which can never log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password_hash: Option<PasswordHash>,
}

impl Credential {
    /// Public view without the hash.
    #[must_use]
    pub fn account(&self) -> UserAccount {
        UserAccount {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Credential values for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub name: String,
    pub email: Email,
    pub password_hash: PasswordHash,
}

/// Authenticated user as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}
