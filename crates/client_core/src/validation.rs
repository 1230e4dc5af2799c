//! Field rules for the sign-up and sign-in forms.

use std::{collections::BTreeMap, fmt, sync::OnceLock};

use regex::Regex;

/// Minimum number of characters accepted for a password.
pub const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    Confirm,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Confirm => "confirm",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Required(Field),
    InvalidFormat,
    TooWeak { min: usize },
    Mismatch,
}

impl ValidationError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{field} is a required field"),
            Self::InvalidFormat => f.write_str("enter a valid email"),
            Self::TooWeak { .. } => f.write_str("choose a stronger password"),
            Self::Mismatch => f.write_str("passwords must match"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Form contents while the user is typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl Credentials {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Password => self.password = value,
            Field::Confirm => self.confirm = value,
        }
    }

    /// Display name to apply after account creation, if one was entered.
    pub fn display_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }
}

pub type FieldErrors = BTreeMap<Field, ValidationError>;

/// Which set of rules a form is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    SignUp,
    SignIn,
}

impl Schema {
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::SignUp => &[Field::Name, Field::Email, Field::Password, Field::Confirm],
            Self::SignIn => &[Field::Email, Field::Password],
        }
    }

    pub fn validate(self, credentials: &Credentials) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Err(err) = check_email(&credentials.email) {
            errors.insert(Field::Email, err);
        }
        if let Err(err) = check_password(&credentials.password) {
            errors.insert(Field::Password, err);
        }
        if self == Self::SignUp {
            if let Err(err) = check_confirm(&credentials.password, &credentials.confirm) {
                errors.insert(Field::Confirm, err);
            }
        }
        errors
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // local@domain.tld, no whitespace, exactly one '@'.
        let pattern = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::Required(Field::Email));
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidFormat);
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required(Field::Password));
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError::TooWeak {
            min: PASSWORD_MIN_LEN,
        });
    }
    Ok(())
}

fn check_confirm(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Ok(());
    }
    if confirm != password {
        return Err(ValidationError::Mismatch);
    }
    Ok(())
}
