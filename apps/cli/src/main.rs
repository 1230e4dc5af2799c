use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    backend::{self, BackendServices},
    config::load_settings,
    NavigationHost, NavigationStack, RecipeScreenController, Route, RouteParams, Schema,
    SubmissionController,
};
use shared::domain::{RecipeId, RecipePreview};
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "foodie", about = "Foodie recipes from the terminal")]
struct Cli {
    /// Settings file; defaults to ./foodie.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account.
    SignUp(SignUpArgs),
    /// Sign in with email and password.
    SignIn(SignInArgs),
    /// Show a recipe.
    Recipe(RecipeArgs),
}

#[derive(Args, Debug)]
struct SignUpArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    password: String,
    /// Defaults to the password.
    #[arg(long)]
    confirm: Option<String>,
}

#[derive(Args, Debug)]
struct SignInArgs {
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    password: String,
}

#[derive(Args, Debug)]
struct RecipeArgs {
    id: i64,
    /// Title to show while the recipe loads.
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    like: bool,
    /// Open the ingredient list once loaded.
    #[arg(long)]
    ingredients: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    install_panic_reporter();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref());
    let services = backend::initialize(settings)
        .ready()
        .await
        .context("backend failed to start")?;
    let navigation = Arc::new(NavigationStack::default());

    match cli.command {
        Command::SignUp(args) => sign_up(services, navigation, args).await,
        Command::SignIn(args) => sign_in(services, navigation, args).await,
        Command::Recipe(args) => show_recipe(services, navigation, args).await,
    }
}

async fn sign_up(
    services: &BackendServices,
    navigation: Arc<NavigationStack>,
    args: SignUpArgs,
) -> Result<()> {
    navigation.navigate_to(Route::SignUp, RouteParams::None);
    let mut controller = SubmissionController::new(Schema::SignUp, services.auth(), navigation.clone());
    let confirm = args.confirm.unwrap_or_else(|| args.password.clone());
    let values = [
        args.name.as_str(),
        args.email.as_str(),
        args.password.as_str(),
        confirm.as_str(),
    ];
    render::fill_form(&mut controller, &values);

    controller.submit_and_settle().await;
    render::print_form(&controller);
    render::print_location(&navigation);
    Ok(())
}

async fn sign_in(
    services: &BackendServices,
    navigation: Arc<NavigationStack>,
    args: SignInArgs,
) -> Result<()> {
    navigation.navigate_to(Route::SignIn, RouteParams::None);
    let mut controller = SubmissionController::new(Schema::SignIn, services.auth(), navigation.clone());
    render::fill_form(&mut controller, &[args.email.as_str(), args.password.as_str()]);

    controller.submit_and_settle().await;
    render::print_form(&controller);
    render::print_location(&navigation);
    Ok(())
}

async fn show_recipe(
    services: &BackendServices,
    navigation: Arc<NavigationStack>,
    args: RecipeArgs,
) -> Result<()> {
    let preview = RecipePreview {
        id: RecipeId(args.id),
        title: args.title,
        picture: None,
    };
    navigation.navigate_to(Route::Main, RouteParams::None);
    navigation.navigate_to(Route::Recipe, RouteParams::Recipe(preview.clone()));

    let (mut screen, pending) =
        RecipeScreenController::mount(preview, services.recipes(), navigation.clone());
    render::print_recipe(&screen.render());

    screen.settle(pending.run().await);
    if args.like {
        screen.toggle_like();
    }
    render::print_recipe(&screen.render());

    if args.ingredients {
        match screen.show_ingredients() {
            Ok(()) => render::print_ingredients(&navigation.current().params),
            Err(err) => println!("{err}"),
        }
    }
    render::print_location(&navigation);
    screen.unmount();
    Ok(())
}

/// Routes panics through the log before the default hook prints them.
fn install_panic_reporter() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "unhandled panic");
        default_hook(info);
    }));
}
