//! Ports to the services the controllers depend on.
//!
//! Controllers only see these traits, so the HTTP adapters can be swapped
//! for test doubles.

use async_trait::async_trait;
use shared::{
    domain::{RecipeId, RecipeRecord, UserIdentity},
    error::{AuthFailure, FetchFailure},
};

use crate::navigation::{Route, RouteParams};

pub type AuthResult = Result<UserIdentity, AuthFailure>;

#[async_trait]
pub trait AuthCapability: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> AuthResult;
    /// Sets the display name of the currently signed-in user.
    async fn update_display_name(&self, name: &str) -> AuthResult;
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult;
    async fn sign_out(&self) -> Result<(), AuthFailure>;
    async fn current_user(&self) -> Option<UserIdentity>;
}

#[async_trait]
pub trait RecipeFetchCapability: Send + Sync {
    async fn fetch_recipe(&self, id: RecipeId) -> Result<RecipeRecord, FetchFailure>;
}

pub trait NavigationHost: Send + Sync {
    fn navigate_to(&self, route: Route, params: RouteParams);
    /// Returns `false` when there is nothing to go back to.
    fn go_back(&self) -> bool;
}
