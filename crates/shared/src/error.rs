use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client-facing auth error codes, in the provider's `auth/<kind>` form.
pub mod auth_codes {
    pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
    pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";
    pub const USER_DISABLED: &str = "auth/user-disabled";
    pub const TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
    pub const OPERATION_NOT_ALLOWED: &str = "auth/operation-not-allowed";
    pub const REQUIRES_RECENT_LOGIN: &str = "auth/requires-recent-login";
    pub const NO_CURRENT_USER: &str = "auth/no-current-user";
    pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";
    pub const INTERNAL_ERROR: &str = "auth/internal-error";
}

/// Failure payload of an auth capability call.
///
/// `Display` renders the banner text shown to the user:
/// `"<message> (<code>)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message} ({code})")]
pub struct AuthFailure {
    pub code: String,
    pub message: String,
}

impl AuthFailure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(auth_codes::NETWORK_REQUEST_FAILED, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(auth_codes::INTERNAL_ERROR, message)
    }

    /// Banner text for this failure.
    pub fn banner(&self) -> String {
        self.to_string()
    }
}

/// Reasons a recipe fetch can fail. All are shown the same way to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("recipe request failed: {0}")]
    Transport(String),
    #[error("recipe request returned HTTP {status}")]
    Status { status: u16 },
    #[error("recipe payload could not be decoded: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_places_code_after_message() {
        let failure = AuthFailure::new(auth_codes::EMAIL_ALREADY_IN_USE, "Email already in use");
        assert_eq!(
            failure.banner(),
            "Email already in use (auth/email-already-in-use)"
        );
    }

    #[test]
    fn fetch_failure_reports_status() {
        assert_eq!(
            FetchFailure::Status { status: 404 }.to_string(),
            "recipe request returned HTTP 404"
        );
    }
}
