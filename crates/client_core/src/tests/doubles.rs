//! Test doubles for the capability ports.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use shared::{
    domain::{RecipeId, RecipeRecord, UserIdentity},
    error::{AuthFailure, FetchFailure},
};

use crate::{
    capability::{AuthCapability, AuthResult, NavigationHost, RecipeFetchCapability},
    navigation::{Route, RouteParams},
};

pub fn identity(email: &str, display_name: Option<&str>) -> UserIdentity {
    UserIdentity {
        uid: "uid-1".to_string(),
        display_name: display_name.map(str::to_string),
        email: email.to_string(),
    }
}

/// Auth double that records calls and answers from a script. An empty
/// script answers with a successful identity.
#[derive(Default)]
pub struct ScriptedAuth {
    pub calls: Mutex<Vec<String>>,
    script: Mutex<VecDeque<AuthResult>>,
}

impl ScriptedAuth {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn answering(outcomes: Vec<AuthResult>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(outcomes.into()),
        })
    }

    pub fn rejecting(code: &str, message: &str) -> Arc<Self> {
        Self::answering(vec![Err(AuthFailure::new(code, message))])
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls").clone()
    }

    fn answer(&self, call: String, email: &str, name: Option<&str>) -> AuthResult {
        self.calls.lock().expect("calls").push(call);
        self.script
            .lock()
            .expect("script")
            .pop_front()
            .unwrap_or_else(|| Ok(identity(email, name)))
    }
}

#[async_trait]
impl AuthCapability for ScriptedAuth {
    async fn create_account(&self, email: &str, _password: &str) -> AuthResult {
        self.answer(format!("create_account:{email}"), email, None)
    }

    async fn update_display_name(&self, name: &str) -> AuthResult {
        self.answer(format!("update_display_name:{name}"), "a@b.com", Some(name))
    }

    async fn sign_in(&self, email: &str, _password: &str) -> AuthResult {
        self.answer(format!("sign_in:{email}"), email, None)
    }

    async fn sign_out(&self) -> Result<(), AuthFailure> {
        self.calls.lock().expect("calls").push("sign_out".to_string());
        Ok(())
    }

    async fn current_user(&self) -> Option<UserIdentity> {
        None
    }
}

#[derive(Default)]
pub struct RecordingNavigation {
    pub requests: Mutex<Vec<(Route, RouteParams)>>,
    pub backs: Mutex<u32>,
}

impl RecordingNavigation {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn routes(&self) -> Vec<Route> {
        self.requests
            .lock()
            .expect("requests")
            .iter()
            .map(|(route, _)| *route)
            .collect()
    }
}

impl NavigationHost for RecordingNavigation {
    fn navigate_to(&self, route: Route, params: RouteParams) {
        self.requests.lock().expect("requests").push((route, params));
    }

    fn go_back(&self) -> bool {
        *self.backs.lock().expect("backs") += 1;
        true
    }
}

pub struct StubFetcher {
    outcome: Result<RecipeRecord, FetchFailure>,
    pub requested: Mutex<Vec<RecipeId>>,
}

impl StubFetcher {
    pub fn returning(outcome: Result<RecipeRecord, FetchFailure>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            requested: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl RecipeFetchCapability for StubFetcher {
    async fn fetch_recipe(&self, id: RecipeId) -> Result<RecipeRecord, FetchFailure> {
        self.requested.lock().expect("requested").push(id);
        self.outcome.clone()
    }
}

pub fn sample_recipe(id: i64) -> RecipeRecord {
    RecipeRecord {
        id: RecipeId(id),
        title: "Pasta al pomodoro".to_string(),
        picture: Some("https://img.example/pasta.webp".to_string()),
        description: None,
        ingredients: vec![shared::domain::Ingredient {
            name: "tomato".to_string(),
            quantity: Some("4".to_string()),
        }],
        steps: vec!["Boil water".to_string()],
    }
}
