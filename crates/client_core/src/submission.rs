//! Sign-up / sign-in submission state machine.
//!
//! State changes go through [`reduce`]; [`SubmissionController`] owns the
//! form and the state, issues at most one auth call at a time and applies
//! only the settlement of the call it is waiting on.

use std::sync::Arc;

use shared::domain::UserIdentity;
use tracing::{debug, info, warn};

use crate::{
    capability::{AuthCapability, AuthResult, NavigationHost},
    form::FormState,
    navigation::{Route, RouteParams},
    validation::{Credentials, Field, Schema},
    RequestId, Settle,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Waiting for input. `banner` keeps the last failure visible after the
    /// user resumed editing.
    Idle { banner: Option<String> },
    Submitting { request: RequestId },
    Succeeded(UserIdentity),
    Failed(String),
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::Idle { banner: None }
    }
}

#[derive(Debug, Clone)]
pub enum SubmissionEvent {
    /// A validated submit was requested.
    Submit { request: RequestId },
    Settled {
        request: RequestId,
        outcome: AuthResult,
    },
    FieldEdited,
    BannerDismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEffect {
    CallAuth { request: RequestId },
    NavigateToMain,
}

pub fn reduce(
    state: &SubmissionState,
    event: SubmissionEvent,
) -> (SubmissionState, Option<SubmissionEffect>) {
    use SubmissionState::*;

    match (state, event) {
        (Submitting { .. } | Succeeded(_), SubmissionEvent::Submit { .. }) => (state.clone(), None),
        (_, SubmissionEvent::Submit { request }) => (
            Submitting { request },
            Some(SubmissionEffect::CallAuth { request }),
        ),
        (Submitting { request: current }, SubmissionEvent::Settled { request, outcome })
            if *current == request =>
        {
            match outcome {
                Ok(identity) => (
                    Succeeded(identity),
                    Some(SubmissionEffect::NavigateToMain),
                ),
                Err(failure) => (Failed(failure.banner()), None),
            }
        }
        (_, SubmissionEvent::Settled { .. }) => (state.clone(), None),
        (Failed(banner), SubmissionEvent::FieldEdited) => (
            Idle {
                banner: Some(banner.clone()),
            },
            None,
        ),
        (_, SubmissionEvent::FieldEdited) => (state.clone(), None),
        (Failed(_) | Idle { .. }, SubmissionEvent::BannerDismissed) => (Idle { banner: None }, None),
        (_, SubmissionEvent::BannerDismissed) => (state.clone(), None),
    }
}

/// Auth call issued by [`SubmissionController::submit`], to be run and fed
/// back through [`SubmissionController::settle`].
pub struct PendingSubmission {
    request: RequestId,
    schema: Schema,
    credentials: Credentials,
    auth: Arc<dyn AuthCapability>,
}

#[derive(Debug, Clone)]
pub struct SubmissionSettled {
    pub request: RequestId,
    pub outcome: AuthResult,
}

impl PendingSubmission {
    pub fn request(&self) -> RequestId {
        self.request
    }

    pub async fn run(self) -> SubmissionSettled {
        let outcome = match self.schema {
            Schema::SignUp => register(self.auth.as_ref(), &self.credentials).await,
            Schema::SignIn => {
                self.auth
                    .sign_in(&self.credentials.email, &self.credentials.password)
                    .await
            }
        };
        SubmissionSettled {
            request: self.request,
            outcome,
        }
    }
}

async fn register(auth: &dyn AuthCapability, credentials: &Credentials) -> AuthResult {
    let identity = auth
        .create_account(&credentials.email, &credentials.password)
        .await?;
    match credentials.display_name() {
        Some(name) => auth.update_display_name(name).await,
        None => Ok(identity),
    }
}

pub struct SubmissionController {
    form: FormState,
    state: SubmissionState,
    auth: Arc<dyn AuthCapability>,
    navigation: Arc<dyn NavigationHost>,
    next_request: RequestId,
    mounted: bool,
}

impl SubmissionController {
    pub fn new(
        schema: Schema,
        auth: Arc<dyn AuthCapability>,
        navigation: Arc<dyn NavigationHost>,
    ) -> Self {
        Self {
            form: FormState::new(schema),
            state: SubmissionState::default(),
            auth,
            navigation,
            next_request: 1,
            mounted: true,
        }
    }

    pub fn sign_up(auth: Arc<dyn AuthCapability>, navigation: Arc<dyn NavigationHost>) -> Self {
        Self::new(Schema::SignUp, auth, navigation)
    }

    pub fn sign_in(auth: Arc<dyn AuthCapability>, navigation: Arc<dyn NavigationHost>) -> Self {
        Self::new(Schema::SignIn, auth, navigation)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.mounted
            && !matches!(
                self.state,
                SubmissionState::Submitting { .. } | SubmissionState::Succeeded(_)
            )
    }

    pub fn banner(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Failed(banner) => Some(banner),
            SubmissionState::Idle { banner } => banner.as_deref(),
            _ => None,
        }
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        if !self.mounted {
            return;
        }
        self.form.set_field(field, value);
        self.dispatch(SubmissionEvent::FieldEdited);
    }

    pub fn blur(&mut self, field: Field) {
        if self.mounted {
            self.form.blur(field);
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.dispatch(SubmissionEvent::BannerDismissed);
    }

    /// Handles the submit action.
    ///
    /// Returns the call to run when the form is valid and nothing is in
    /// flight. An invalid form still counts as an attempt so every field's
    /// error becomes visible.
    pub fn submit(&mut self) -> Option<PendingSubmission> {
        if !self.is_submit_enabled() {
            debug!("submit ignored while disabled");
            return None;
        }
        if !self.form.attempt_submit().is_empty() {
            debug!(
                errors = self.form.errors().len(),
                "submit blocked by validation errors"
            );
            // A blocked attempt still counts as a retry for the banner.
            self.dispatch(SubmissionEvent::BannerDismissed);
            return None;
        }

        let request = self.next_request;
        self.next_request += 1;
        match self.dispatch(SubmissionEvent::Submit { request }) {
            Some(SubmissionEffect::CallAuth { request }) => Some(PendingSubmission {
                request,
                schema: self.form.schema(),
                credentials: self.form.values().clone(),
                auth: Arc::clone(&self.auth),
            }),
            _ => None,
        }
    }

    pub fn settle(&mut self, settled: SubmissionSettled) -> Settle {
        let outstanding = match self.state {
            SubmissionState::Submitting { request } => Some(request),
            _ => None,
        };
        if !self.mounted || outstanding != Some(settled.request) {
            debug!(
                request = settled.request,
                mounted = self.mounted,
                "ignoring stale auth settlement"
            );
            return Settle::Ignored;
        }

        if let Err(failure) = &settled.outcome {
            warn!(code = %failure.code, message = %failure.message, "auth request failed");
        }

        let effect = self.dispatch(SubmissionEvent::Settled {
            request: settled.request,
            outcome: settled.outcome,
        });
        if effect == Some(SubmissionEffect::NavigateToMain) {
            if let SubmissionState::Succeeded(identity) = &self.state {
                info!(email = %identity.email, "authenticated; entering main screen");
            }
            self.form.reset();
            self.navigation.navigate_to(Route::Main, RouteParams::None);
        }
        Settle::Applied
    }

    /// Submits and waits for the outcome in place.
    pub async fn submit_and_settle(&mut self) -> Option<Settle> {
        let pending = self.submit()?;
        let settled = pending.run().await;
        Some(self.settle(settled))
    }

    /// Tears the form down; any settlement arriving later is ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.form.reset();
    }

    fn dispatch(&mut self, event: SubmissionEvent) -> Option<SubmissionEffect> {
        let (next, effect) = reduce(&self.state, event);
        self.state = next;
        effect
    }
}
