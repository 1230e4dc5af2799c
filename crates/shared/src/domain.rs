use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(RecipeId);

/// Identity returned by the auth provider once an account is created or
/// signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: String,
}

/// Partial recipe data a caller already holds (e.g. from a listing) and
/// hands to the detail screen as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePreview {
    pub id: RecipeId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl RecipePreview {
    pub fn bare(id: RecipeId) -> Self {
        Self {
            id,
            title: None,
            picture: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
}

/// Full recipe document served by the recipe API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: RecipeId,
    pub title: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
}
