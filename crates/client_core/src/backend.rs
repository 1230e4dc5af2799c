//! Process-wide backend setup.
//!
//! [`initialize`] registers the backend once per process; later calls hand
//! back the same instance. Capability handles come from [`Backend::ready`],
//! which builds the HTTP adapters on first use.

use std::sync::{Arc, OnceLock};

use reqwest::Client;
use shared::domain::UserIdentity;
use tokio::sync::{broadcast, OnceCell};
use tracing::{info, warn};

use crate::{
    capability::{AuthCapability, RecipeFetchCapability},
    config::Settings,
    error::ClientError,
    identity_toolkit::IdentityToolkitAuth,
    recipe_api::HttpRecipeFetcher,
};

static PROCESS_BACKEND: OnceLock<Backend> = OnceLock::new();

pub fn initialize(settings: Settings) -> &'static Backend {
    let mut fresh = false;
    let backend = PROCESS_BACKEND.get_or_init(|| {
        fresh = true;
        Backend::new(settings.clone())
    });
    if !fresh && backend.settings != settings {
        warn!("backend already initialized; ignoring new settings");
    }
    backend
}

/// The backend registered by [`initialize`], if any.
pub fn get() -> Option<&'static Backend> {
    PROCESS_BACKEND.get()
}

pub struct Backend {
    settings: Settings,
    services: OnceCell<BackendServices>,
}

pub struct BackendServices {
    auth: Arc<IdentityToolkitAuth>,
    recipes: Arc<HttpRecipeFetcher>,
}

impl BackendServices {
    pub fn auth(&self) -> Arc<dyn AuthCapability> {
        self.auth.clone()
    }

    pub fn recipes(&self) -> Arc<dyn RecipeFetchCapability> {
        self.recipes.clone()
    }

    pub fn subscribe_auth_state(&self) -> broadcast::Receiver<Option<UserIdentity>> {
        self.auth.subscribe_auth_state()
    }
}

impl Backend {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            services: OnceCell::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.services.initialized()
    }

    /// Waits until the capability adapters are built. Must be awaited before
    /// issuing any capability call.
    pub async fn ready(&self) -> Result<&BackendServices, ClientError> {
        self.services
            .get_or_try_init(|| async { self.build_services() })
            .await
    }

    fn build_services(&self) -> Result<BackendServices, ClientError> {
        let settings = &self.settings;
        if settings.api_key.is_empty() {
            warn!("no api key configured; auth requests will be rejected");
        }

        let http = Client::builder()
            .user_agent(concat!("foodie/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ClientError::BackendInit(err.to_string()))?;
        let auth = Arc::new(IdentityToolkitAuth::new(
            http.clone(),
            &settings.auth_api_base,
            settings.api_key.clone(),
            settings.locale.clone(),
        )?);
        let recipes = Arc::new(HttpRecipeFetcher::new(http, &settings.recipe_api_base)?);

        tokio::spawn(log_auth_state(auth.subscribe_auth_state()));

        info!(
            project_id = %settings.project_id,
            recipe_api = %settings.recipe_api_base,
            locale = settings.locale.as_deref().unwrap_or("default"),
            "backend ready"
        );
        Ok(BackendServices { auth, recipes })
    }
}

async fn log_auth_state(mut events: broadcast::Receiver<Option<UserIdentity>>) {
    loop {
        match events.recv().await {
            Ok(Some(user)) => info!(
                display_name = user.display_name.as_deref().unwrap_or(""),
                email = %user.email,
                "authenticated"
            ),
            Ok(None) => info!("signed out"),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "auth state observer lagged")
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_builds_services_once() {
        let backend = Backend::new(Settings::default());
        assert!(!backend.is_ready());

        let first = backend.ready().await.expect("ready") as *const BackendServices;
        let second = backend.ready().await.expect("ready") as *const BackendServices;
        assert!(backend.is_ready());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn ready_rejects_invalid_endpoint() {
        let backend = Backend::new(Settings {
            recipe_api_base: "not a url".into(),
            ..Settings::default()
        });
        let err = backend.ready().await.err().expect("invalid endpoint");
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
        assert!(!backend.is_ready());
    }

    #[test]
    fn initialize_returns_the_same_instance() {
        let first = initialize(Settings::default()) as *const Backend;
        let second = initialize(Settings {
            project_id: "other".into(),
            ..Settings::default()
        }) as *const Backend;
        assert_eq!(first, second);
        assert!(get().is_some());
    }
}
