//! In-memory screen stack implementing [`NavigationHost`].

use std::sync::{Mutex, MutexGuard};

use shared::domain::{Ingredient, RecipeId, RecipePreview};

use crate::capability::NavigationHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Welcome,
    SignIn,
    SignUp,
    Main,
    Recipe,
    Ingredients,
}

impl Route {
    pub fn name(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::SignIn => "SignIn",
            Self::SignUp => "SignUp",
            Self::Main => "Main",
            Self::Recipe => "Recipe",
            Self::Ingredients => "Ingredients",
        }
    }

    /// Whether the host draws its own header for this screen.
    pub fn shows_header(self) -> bool {
        matches!(self, Self::Main | Self::Ingredients)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RouteParams {
    #[default]
    None,
    Recipe(RecipePreview),
    Ingredients {
        recipe_id: RecipeId,
        ingredients: Vec<Ingredient>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub route: Route,
    pub params: RouteParams,
}

pub struct NavigationStack {
    entries: Mutex<Vec<NavEntry>>,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::Welcome)
    }
}

impl NavigationStack {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: Mutex::new(vec![NavEntry {
                route: initial,
                params: RouteParams::None,
            }]),
        }
    }

    pub fn current(&self) -> NavEntry {
        let entries = self.lock();
        entries.last().cloned().unwrap_or(NavEntry {
            route: Route::Welcome,
            params: RouteParams::None,
        })
    }

    pub fn depth(&self) -> usize {
        self.lock().len()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.lock().iter().map(|entry| entry.route).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<NavEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NavigationHost for NavigationStack {
    /// Pushes `route`, or pops back to it when it is already on the stack.
    fn navigate_to(&self, route: Route, params: RouteParams) {
        let mut entries = self.lock();
        if let Some(index) = entries.iter().position(|entry| entry.route == route) {
            entries.truncate(index + 1);
            if let Some(entry) = entries.last_mut() {
                entry.params = params;
            }
        } else {
            entries.push(NavEntry { route, params });
        }
        tracing::debug!(route = route.name(), depth = entries.len(), "navigated");
    }

    fn go_back(&self) -> bool {
        let mut entries = self.lock();
        if entries.len() <= 1 {
            return false;
        }
        entries.pop();
        tracing::debug!(depth = entries.len(), "navigated back");
        true
    }
}
