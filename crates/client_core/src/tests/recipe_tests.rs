use shared::{
    domain::{RecipeId, RecipePreview},
    error::FetchFailure,
};

use crate::{
    error::ClientError,
    navigation::{Route, RouteParams},
    recipe::{
        reduce, RecipeBody, RecipeEvent, RecipePhase, RecipeScreenController, RecipeViewState,
        RECIPE_ERROR_TEXT, START_COOKING_LABEL,
    },
    test_doubles::{sample_recipe, RecordingNavigation, StubFetcher},
    Settle,
};

fn preview(id: i64) -> RecipePreview {
    RecipePreview {
        id: RecipeId(id),
        title: Some("Preview title".to_string()),
        picture: Some("https://img.example/preview.webp".to_string()),
    }
}

#[tokio::test]
async fn mount_starts_loading_and_fetches_by_id() {
    let fetcher = StubFetcher::returning(Ok(sample_recipe(7)));
    let (controller, pending) =
        RecipeScreenController::mount(preview(7), fetcher.clone(), RecordingNavigation::new());

    assert!(controller.state().is_loading());
    let view = controller.render();
    assert_eq!(view.body, RecipeBody::Progress);
    assert_eq!(view.header.title, Some("Preview title"));

    pending.run().await;
    assert_eq!(*fetcher.requested.lock().expect("requested"), vec![RecipeId(7)]);
}

#[tokio::test]
async fn successful_fetch_shows_detail_and_start_action() {
    let fetcher = StubFetcher::returning(Ok(sample_recipe(7)));
    let (mut controller, pending) =
        RecipeScreenController::mount(preview(7), fetcher, RecordingNavigation::new());

    assert_eq!(controller.settle(pending.run().await), Settle::Applied);

    let state = controller.state();
    assert!(!state.is_loading());
    assert!(!state.has_error());
    assert_eq!(state.detail(), Some(&sample_recipe(7)));
    let view = controller.render();
    assert_eq!(view.header.title, Some("Pasta al pomodoro"));
    assert_eq!(view.header.picture, Some("https://img.example/pasta.webp"));
    match view.body {
        RecipeBody::Content {
            recipe,
            start_label,
        } => {
            assert_eq!(recipe.id, RecipeId(7));
            assert_eq!(start_label, START_COOKING_LABEL);
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[tokio::test]
async fn not_found_renders_error_even_with_preview() {
    let fetcher = StubFetcher::returning(Err(FetchFailure::Status { status: 404 }));
    let (mut controller, pending) =
        RecipeScreenController::mount(preview(42), fetcher, RecordingNavigation::new());

    controller.settle(pending.run().await);

    assert!(controller.state().has_error());
    assert!(controller.state().detail().is_none());
    let view = controller.render();
    assert_eq!(view.body, RecipeBody::Error(RECIPE_ERROR_TEXT));
    assert_eq!(view.header.title, Some("Preview title"));
}

#[tokio::test]
async fn unmount_during_fetch_discards_result() {
    let fetcher = StubFetcher::returning(Ok(sample_recipe(5)));
    let (mut controller, pending) =
        RecipeScreenController::mount(preview(5), fetcher, RecordingNavigation::new());
    let before = controller.state().clone();

    controller.unmount();
    let settled = pending.run().await;

    assert_eq!(controller.settle(settled), Settle::Ignored);
    assert_eq!(controller.state(), &before);
    assert!(!controller.toggle_like());
}

#[tokio::test]
async fn duplicate_settlement_is_ignored() {
    let fetcher = StubFetcher::returning(Ok(sample_recipe(5)));
    let (mut controller, pending) =
        RecipeScreenController::mount(preview(5), fetcher, RecordingNavigation::new());
    let settled = pending.run().await;

    assert_eq!(controller.settle(settled.clone()), Settle::Applied);
    assert_eq!(controller.settle(settled), Settle::Ignored);
}

#[test]
fn like_toggle_does_not_change_phase() {
    let fetcher = StubFetcher::returning(Ok(sample_recipe(1)));
    let (mut controller, _pending) =
        RecipeScreenController::mount(preview(1), fetcher, RecordingNavigation::new());

    assert!(controller.toggle_like());
    assert!(controller.state().is_loading());
    assert!(controller.render().header.liked);
    assert!(!controller.toggle_like());
}

#[test]
fn start_cooking_is_not_implemented() {
    let fetcher = StubFetcher::returning(Ok(sample_recipe(1)));
    let (controller, _pending) =
        RecipeScreenController::mount(preview(1), fetcher, RecordingNavigation::new());
    assert!(matches!(
        controller.start_cooking(),
        Err(ClientError::NotImplemented("start cooking"))
    ));
}

#[tokio::test]
async fn ingredients_require_loaded_recipe() {
    let nav = RecordingNavigation::new();
    let fetcher = StubFetcher::returning(Ok(sample_recipe(3)));
    let (mut controller, pending) =
        RecipeScreenController::mount(preview(3), fetcher, nav.clone());

    assert!(matches!(
        controller.show_ingredients(),
        Err(ClientError::RecipeNotLoaded(RecipeId(3)))
    ));

    controller.settle(pending.run().await);
    controller.show_ingredients().expect("ingredients");

    let requests = nav.requests.lock().expect("requests");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, Route::Ingredients);
    assert!(matches!(
        &requests[0].1,
        RouteParams::Ingredients { recipe_id, ingredients }
            if *recipe_id == RecipeId(3) && ingredients.len() == 1
    ));
}

#[test]
fn back_gesture_reaches_navigation_host() {
    let nav = RecordingNavigation::new();
    let fetcher = StubFetcher::returning(Ok(sample_recipe(1)));
    let (controller, _pending) = RecipeScreenController::mount(preview(1), fetcher, nav.clone());

    assert!(controller.go_back());
    assert_eq!(*nav.backs.lock().expect("backs"), 1);
}

#[test]
fn reducer_only_leaves_loading_once() {
    let state = RecipeViewState::loading(preview(9));
    let state = reduce(state, RecipeEvent::Failed);
    assert_eq!(state.phase(), &RecipePhase::Error);

    let state = reduce(state, RecipeEvent::Loaded(sample_recipe(9)));
    assert_eq!(state.phase(), &RecipePhase::Error);
    assert!(state.detail().is_none());
}
