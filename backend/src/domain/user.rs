//! User data model.
//!
//! A user owns an ordered, duplicate-free list of place identifiers. That
//! list is the back-reference the linkage coordinator keeps in step with
//! each place's `creator`.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::PlaceId;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyName,
    NameTooShort { min: usize },
    EmptyEmail,
    InvalidEmail,
    PasswordTooShort { min: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from textual input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Minimum allowed length for a user name.
pub const USER_NAME_MIN: usize = 3;

/// Human readable user name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`]. The name is kept as given and
    /// its length counts any surrounding whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if name.chars().count() < USER_NAME_MIN {
            return Err(UserValidationError::NameTooShort {
                min: USER_NAME_MIN,
            });
        }
        Ok(Self(name.to_owned()))
    }
}

impl UserName {
    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Deliberately permissive: one @, no whitespace, a dotted domain.
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address.
///
/// Input is trimmed and lower-cased before validation, so two spellings of
/// the same mailbox compare equal.
///
/// # Examples
/// ```
/// use places_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new(" A@x.com ").expect("valid email");
/// assert_eq!(email.as_str(), "a@x.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl EmailAddress {
    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimum allowed password length.
pub const PASSWORD_MIN: usize = 6;

/// Stored account password.
///
/// Held as given and compared verbatim. The buffer is zeroed on drop and
/// never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a new password chosen at signup.
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = Zeroizing::new(password.into());
        if password.chars().count() < PASSWORD_MIN {
            return Err(UserValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(password))
    }

    /// Rehydrate a password read back from storage without re-validating it.
    #[must_use]
    pub fn from_stored(password: impl Into<String>) -> Self {
        Self(Zeroizing::new(password.into()))
    }

    /// Compare a login attempt against the stored password.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_str() == candidate
    }

    /// Expose the raw password for persistence adapters.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Image assigned to users who sign up without one.
pub const DEFAULT_USER_IMAGE: &str =
    "https://upload.wikimedia.org/wikipedia/commons/8/89/Portrait_Placeholder.png";

/// Application user.
///
/// ## Invariants
/// - `places` never contains the same id twice.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    password: Password,
    image: String,
    places: Vec<PlaceId>,
}

impl User {
    /// Build a user from validated components. Duplicate place ids are
    /// collapsed, keeping the first occurrence.
    #[must_use]
    pub fn new(
        id: UserId,
        name: UserName,
        email: EmailAddress,
        password: Password,
        image: impl Into<String>,
        places: Vec<PlaceId>,
    ) -> Self {
        let mut user = Self {
            id,
            name,
            email,
            password,
            image: image.into(),
            places: Vec::with_capacity(places.len()),
        };
        for place in places {
            user.attach_place(place);
        }
        user
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Normalised email address.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Avatar image URL.
    #[must_use]
    pub fn image(&self) -> &str {
        self.image.as_str()
    }

    /// Identifiers of the places this user owns, in attachment order.
    #[must_use]
    pub fn places(&self) -> &[PlaceId] {
        self.places.as_slice()
    }

    /// Whether `place` is listed as owned by this user.
    #[must_use]
    pub fn owns(&self, place: &PlaceId) -> bool {
        self.places.contains(place)
    }

    /// Append `place` unless it is already listed. Returns `true` when the
    /// list changed.
    pub fn attach_place(&mut self, place: PlaceId) -> bool {
        if self.owns(&place) {
            return false;
        }
        self.places.push(place);
        true
    }

    /// Remove `place` from the list. Returns `true` when the list changed.
    pub fn detach_place(&mut self, place: &PlaceId) -> bool {
        let before = self.places.len();
        self.places.retain(|owned| owned != place);
        self.places.len() != before
    }
}
