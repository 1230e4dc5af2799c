//! Headless client core for the Foodie recipe app: form validation, the
//! sign-up / sign-in submission flow, the recipe detail screen and the
//! capability adapters they talk to.

pub mod backend;
pub mod capability;
pub mod config;
pub mod error;
pub mod form;
pub mod identity_toolkit;
pub mod navigation;
pub mod recipe;
pub mod recipe_api;
pub mod submission;
pub mod validation;

pub use capability::{AuthCapability, AuthResult, NavigationHost, RecipeFetchCapability};
pub use error::ClientError;
pub use navigation::{NavigationStack, Route, RouteParams};
pub use recipe::{RecipeScreenController, RecipeView, RecipeViewState};
pub use submission::{SubmissionController, SubmissionState};
pub use validation::{Credentials, Field, Schema, ValidationError};

/// Identifies one issued capability call within a controller.
pub type RequestId = u64;

/// Whether a settlement was applied to controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    Applied,
    /// Stale, superseded, or arrived after unmount.
    Ignored,
}

#[cfg(test)]
#[path = "tests/doubles.rs"]
mod test_doubles;

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod validation_tests;

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod submission_tests;

#[cfg(test)]
#[path = "tests/recipe_tests.rs"]
mod recipe_tests;

#[cfg(test)]
#[path = "tests/adapter_tests.rs"]
mod adapter_tests;

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod navigation_tests;
