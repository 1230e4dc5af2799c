use shared::domain::RecipeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0} is not implemented yet")]
    NotImplemented(&'static str),
    #[error("recipe {0} has not finished loading")]
    RecipeNotLoaded(RecipeId),
    #[error("invalid endpoint url '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("backend initialization failed: {0}")]
    BackendInit(String),
}
