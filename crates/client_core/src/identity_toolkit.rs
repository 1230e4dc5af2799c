//! [`AuthCapability`] over the Identity Toolkit REST API
//! (`accounts:signUp`, `accounts:update`, `accounts:signInWithPassword`).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use shared::{
    domain::UserIdentity,
    error::{auth_codes, AuthFailure},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};
use url::Url;

use crate::{
    capability::{AuthCapability, AuthResult},
    config::base_url,
    error::ClientError,
};

const LOCALE_HEADER: &str = "X-Firebase-Locale";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

struct Session {
    id_token: String,
    identity: UserIdentity,
}

pub struct IdentityToolkitAuth {
    http: Client,
    base: Url,
    api_key: String,
    locale: Option<String>,
    session: Mutex<Option<Session>>,
    events: broadcast::Sender<Option<UserIdentity>>,
}

impl IdentityToolkitAuth {
    pub fn new(
        http: Client,
        base: &str,
        api_key: impl Into<String>,
        locale: Option<String>,
    ) -> Result<Self, ClientError> {
        let (events, _) = broadcast::channel(16);
        Ok(Self {
            http,
            base: base_url(base)?,
            api_key: api_key.into(),
            locale,
            session: Mutex::new(None),
            events,
        })
    }

    /// Receives the signed-in user after every sign-in, profile update or
    /// sign-out (`None`).
    pub fn subscribe_auth_state(&self) -> broadcast::Receiver<Option<UserIdentity>> {
        self.events.subscribe()
    }

    fn endpoint(&self, method: &str) -> Result<Url, AuthFailure> {
        let mut url = self
            .base
            // "./" keeps "accounts:" from being read as a URL scheme.
            .join(&format!("./accounts:{method}"))
            .map_err(|err| AuthFailure::internal(format!("invalid auth endpoint: {err}")))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<AccountResponse, AuthFailure> {
        let url = self.endpoint(method)?;
        let mut request = self.http.post(url).json(body);
        if let Some(locale) = &self.locale {
            request = request.header(LOCALE_HEADER, locale);
        }

        let response = request.send().await.map_err(|err| {
            debug!(method, error = %err, "auth transport failure");
            AuthFailure::network(
                "A network error (such as timeout, interrupted connection or unreachable host) has occurred.",
            )
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| {
            AuthFailure::network(format!("failed to read auth response: {err}"))
        })?;

        if !status.is_success() {
            return Err(failure_from_response(status, &bytes));
        }
        serde_json::from_slice(&bytes)
            .map_err(|err| AuthFailure::internal(format!("malformed auth response: {err}")))
    }

    async fn store_session(&self, account: AccountResponse, fallback_email: &str) -> UserIdentity {
        let mut session = self.session.lock().await;
        let previous = session.take();
        let identity = UserIdentity {
            uid: account.local_id,
            display_name: account
                .display_name
                .or_else(|| previous.as_ref().and_then(|s| s.identity.display_name.clone())),
            email: account.email.unwrap_or_else(|| fallback_email.to_string()),
        };
        let id_token = account
            .id_token
            .or_else(|| previous.map(|s| s.id_token))
            .unwrap_or_default();
        *session = Some(Session {
            id_token,
            identity: identity.clone(),
        });
        drop(session);

        let _ = self.events.send(Some(identity.clone()));
        identity
    }
}

#[async_trait]
impl AuthCapability for IdentityToolkitAuth {
    async fn create_account(&self, email: &str, password: &str) -> AuthResult {
        let account = self
            .call(
                "signUp",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        info!(email, "account created");
        Ok(self.store_session(account, email).await)
    }

    async fn update_display_name(&self, name: &str) -> AuthResult {
        let (id_token, email) = {
            let session = self.session.lock().await;
            let current = session.as_ref().ok_or_else(|| {
                AuthFailure::new(auth_codes::NO_CURRENT_USER, "No user is currently signed in.")
            })?;
            (current.id_token.clone(), current.identity.email.clone())
        };
        let account = self
            .call(
                "update",
                &UpdateProfileRequest {
                    id_token: &id_token,
                    display_name: name,
                    return_secure_token: true,
                },
            )
            .await?;
        Ok(self.store_session(account, &email).await)
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult {
        let account = self
            .call(
                "signInWithPassword",
                &PasswordRequest {
                    email,
                    password,
                    return_secure_token: true,
                },
            )
            .await?;
        Ok(self.store_session(account, email).await)
    }

    async fn sign_out(&self) -> Result<(), AuthFailure> {
        let previous = self.session.lock().await.take();
        if previous.is_some() {
            let _ = self.events.send(None);
        }
        Ok(())
    }

    async fn current_user(&self) -> Option<UserIdentity> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(|session| session.identity.clone())
    }
}

fn failure_from_response(status: StatusCode, body: &[u8]) -> AuthFailure {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => map_provider_error(&envelope.error.message),
        Err(_) => AuthFailure::internal(format!("auth request failed with HTTP {}", status.as_u16())),
    }
}

/// Maps a provider error string such as `WEAK_PASSWORD : Password should be
/// at least 6 characters` onto a client code and message.
pub fn map_provider_error(raw: &str) -> AuthFailure {
    let reason = raw.split(':').next().unwrap_or_default().trim();
    let (code, message) = match reason {
        "EMAIL_EXISTS" => (
            auth_codes::EMAIL_ALREADY_IN_USE,
            "The email address is already in use by another account.",
        ),
        "INVALID_EMAIL" => (
            auth_codes::INVALID_EMAIL,
            "The email address is badly formatted.",
        ),
        "WEAK_PASSWORD" => (
            auth_codes::WEAK_PASSWORD,
            "The password must be 6 characters long or more.",
        ),
        "EMAIL_NOT_FOUND" => (
            auth_codes::USER_NOT_FOUND,
            "There is no user record corresponding to this identifier. The user may have been deleted.",
        ),
        "INVALID_PASSWORD" => (
            auth_codes::WRONG_PASSWORD,
            "The password is invalid or the user does not have a password.",
        ),
        "INVALID_LOGIN_CREDENTIALS" => (
            auth_codes::INVALID_CREDENTIAL,
            "The supplied auth credential is incorrect, malformed or has expired.",
        ),
        "USER_DISABLED" => (
            auth_codes::USER_DISABLED,
            "The user account has been disabled by an administrator.",
        ),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => (
            auth_codes::TOO_MANY_REQUESTS,
            "We have blocked all requests from this device due to unusual activity. Try again later.",
        ),
        "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => (
            auth_codes::OPERATION_NOT_ALLOWED,
            "The given sign-in provider is disabled for this project.",
        ),
        "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" | "TOKEN_EXPIRED" | "INVALID_ID_TOKEN" => (
            auth_codes::REQUIRES_RECENT_LOGIN,
            "This operation is sensitive and requires recent authentication. Log in again before retrying this request.",
        ),
        _ => return AuthFailure::internal(raw.trim()),
    };
    AuthFailure::new(code, message)
}
