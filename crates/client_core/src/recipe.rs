//! Recipe detail screen: fetch lifecycle, like toggle and render selection.

use std::sync::Arc;

use shared::{
    domain::{RecipeId, RecipePreview, RecipeRecord},
    error::FetchFailure,
};
use tracing::{debug, error};

use crate::{
    capability::{NavigationHost, RecipeFetchCapability},
    error::ClientError,
    navigation::{Route, RouteParams},
    RequestId, Settle,
};

pub const RECIPE_ERROR_TEXT: &str = "Error loading the recipe. Try again later.";
pub const START_COOKING_LABEL: &str = "START COOKING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipePhase {
    Loading,
    Ready(RecipeRecord),
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeViewState {
    preview: RecipePreview,
    phase: RecipePhase,
    liked: bool,
}

impl RecipeViewState {
    pub fn loading(preview: RecipePreview) -> Self {
        Self {
            preview,
            phase: RecipePhase::Loading,
            liked: false,
        }
    }

    pub fn id(&self) -> RecipeId {
        self.preview.id
    }

    pub fn preview(&self) -> &RecipePreview {
        &self.preview
    }

    pub fn phase(&self) -> &RecipePhase {
        &self.phase
    }

    pub fn detail(&self) -> Option<&RecipeRecord> {
        match &self.phase {
            RecipePhase::Ready(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RecipePhase::Loading
    }

    pub fn has_error(&self) -> bool {
        self.phase == RecipePhase::Error
    }

    pub fn liked(&self) -> bool {
        self.liked
    }

    /// Title from the loaded record, falling back to the preview.
    pub fn title(&self) -> Option<&str> {
        self.detail()
            .map(|record| record.title.as_str())
            .or(self.preview.title.as_deref())
    }

    pub fn picture(&self) -> Option<&str> {
        self.detail()
            .and_then(|record| record.picture.as_deref())
            .or(self.preview.picture.as_deref())
    }
}

#[derive(Debug, Clone)]
pub enum RecipeEvent {
    Loaded(RecipeRecord),
    Failed,
    LikeToggled,
}

pub fn reduce(mut state: RecipeViewState, event: RecipeEvent) -> RecipeViewState {
    match event {
        RecipeEvent::Loaded(record) if state.is_loading() => state.phase = RecipePhase::Ready(record),
        RecipeEvent::Failed if state.is_loading() => state.phase = RecipePhase::Error,
        RecipeEvent::LikeToggled => state.liked = !state.liked,
        RecipeEvent::Loaded(_) | RecipeEvent::Failed => {}
    }
    state
}

/// Screen chrome drawn regardless of the load phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeHeader<'a> {
    pub title: Option<&'a str>,
    pub picture: Option<&'a str>,
    pub liked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeBody<'a> {
    Progress,
    Error(&'static str),
    Content {
        recipe: &'a RecipeRecord,
        start_label: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView<'a> {
    pub header: RecipeHeader<'a>,
    pub body: RecipeBody<'a>,
}

pub fn render(state: &RecipeViewState) -> RecipeView<'_> {
    let body = match &state.phase {
        RecipePhase::Loading => RecipeBody::Progress,
        RecipePhase::Error => RecipeBody::Error(RECIPE_ERROR_TEXT),
        RecipePhase::Ready(recipe) => RecipeBody::Content {
            recipe,
            start_label: START_COOKING_LABEL,
        },
    };
    RecipeView {
        header: RecipeHeader {
            title: state.title(),
            picture: state.picture(),
            liked: state.liked,
        },
        body,
    }
}

pub struct PendingFetch {
    request: RequestId,
    id: RecipeId,
    fetcher: Arc<dyn RecipeFetchCapability>,
}

#[derive(Debug, Clone)]
pub struct FetchSettled {
    pub request: RequestId,
    pub id: RecipeId,
    pub outcome: Result<RecipeRecord, FetchFailure>,
}

impl PendingFetch {
    pub fn request(&self) -> RequestId {
        self.request
    }

    pub async fn run(self) -> FetchSettled {
        let outcome = self.fetcher.fetch_recipe(self.id).await;
        FetchSettled {
            request: self.request,
            id: self.id,
            outcome,
        }
    }
}

pub struct RecipeScreenController {
    state: RecipeViewState,
    navigation: Arc<dyn NavigationHost>,
    outstanding: Option<RequestId>,
    mounted: bool,
}

impl RecipeScreenController {
    /// Mounts the screen in the loading phase and returns the fetch to run.
    pub fn mount(
        preview: RecipePreview,
        fetcher: Arc<dyn RecipeFetchCapability>,
        navigation: Arc<dyn NavigationHost>,
    ) -> (Self, PendingFetch) {
        let request = 1;
        let pending = PendingFetch {
            request,
            id: preview.id,
            fetcher,
        };
        let controller = Self {
            state: RecipeViewState::loading(preview),
            navigation,
            outstanding: Some(request),
            mounted: true,
        };
        (controller, pending)
    }

    pub fn state(&self) -> &RecipeViewState {
        &self.state
    }

    pub fn render(&self) -> RecipeView<'_> {
        render(&self.state)
    }

    pub fn settle(&mut self, settled: FetchSettled) -> Settle {
        if !self.mounted || self.outstanding != Some(settled.request) {
            debug!(recipe_id = %settled.id, "ignoring stale recipe fetch settlement");
            return Settle::Ignored;
        }
        self.outstanding = None;

        let event = match settled.outcome {
            Ok(record) => RecipeEvent::Loaded(record),
            Err(failure) => {
                error!(recipe_id = %settled.id, error = %failure, "error while fetching recipe");
                RecipeEvent::Failed
            }
        };
        self.dispatch(event);
        Settle::Applied
    }

    pub fn toggle_like(&mut self) -> bool {
        if self.mounted {
            self.dispatch(RecipeEvent::LikeToggled);
        }
        self.state.liked
    }

    pub fn start_cooking(&self) -> Result<(), ClientError> {
        Err(ClientError::NotImplemented("start cooking"))
    }

    pub fn show_ingredients(&self) -> Result<(), ClientError> {
        let record = self
            .state
            .detail()
            .ok_or(ClientError::RecipeNotLoaded(self.state.id()))?;
        self.navigation.navigate_to(
            Route::Ingredients,
            RouteParams::Ingredients {
                recipe_id: record.id,
                ingredients: record.ingredients.clone(),
            },
        );
        Ok(())
    }

    pub fn go_back(&self) -> bool {
        self.navigation.go_back()
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.outstanding = None;
    }

    fn dispatch(&mut self, event: RecipeEvent) {
        let placeholder = RecipeViewState::loading(RecipePreview::bare(self.state.id()));
        let state = std::mem::replace(&mut self.state, placeholder);
        self.state = reduce(state, event);
    }
}
