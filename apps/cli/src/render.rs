//! Plain-text rendering of controller state.

use client_core::{
    recipe::RecipeBody, Field, NavigationStack, RecipeView, RouteParams, SubmissionController,
    SubmissionState,
};

/// Types `values` into the form's fields in order, leaving each one as a
/// user tabbing through would.
pub fn fill_form(controller: &mut SubmissionController, values: &[&str]) {
    let fields = controller.form().schema().fields();
    for (field, value) in fields.iter().zip(values) {
        controller.edit(*field, *value);
        controller.blur(*field);
    }
}

pub fn print_form(controller: &SubmissionController) {
    for field in controller.form().schema().fields() {
        if let Some(err) = controller.form().visible_error(*field) {
            println!("  {}: {err}", label(*field));
        }
    }
    if let Some(banner) = controller.banner() {
        println!("! {banner}");
    }
    if let SubmissionState::Succeeded(user) = controller.state() {
        match &user.display_name {
            Some(name) => println!("Signed in as {name} <{}>", user.email),
            None => println!("Signed in as {}", user.email),
        }
    }
}

fn label(field: Field) -> &'static str {
    match field {
        Field::Name => "Full name",
        Field::Email => "Email",
        Field::Password => "Password",
        Field::Confirm => "Confirm password",
    }
}

pub fn print_recipe(view: &RecipeView<'_>) {
    let heart = if view.header.liked { "♥" } else { "♡" };
    println!("{} {heart}", view.header.title.unwrap_or("Recipe"));
    if let Some(picture) = view.header.picture {
        println!("  {picture}");
    }

    match &view.body {
        RecipeBody::Progress => println!("  loading..."),
        RecipeBody::Error(text) => println!("  {text}"),
        RecipeBody::Content {
            recipe,
            start_label,
        } => {
            if let Some(description) = &recipe.description {
                println!("  {description}");
            }
            for (n, step) in recipe.steps.iter().enumerate() {
                println!("  {}. {step}", n + 1);
            }
            println!("  [{start_label}]");
        }
    }
}

pub fn print_ingredients(params: &RouteParams) {
    if let RouteParams::Ingredients { ingredients, .. } = params {
        for ingredient in ingredients {
            match &ingredient.quantity {
                Some(quantity) => println!("  - {quantity} {}", ingredient.name),
                None => println!("  - {}", ingredient.name),
            }
        }
    }
}

pub fn print_location(navigation: &NavigationStack) {
    let current = navigation.current().route;
    if current.shows_header() {
        println!("== {} ==", current.name());
    } else {
        println!("(screen: {})", current.name());
    }
}
