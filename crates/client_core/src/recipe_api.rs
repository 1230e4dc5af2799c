//! [`RecipeFetchCapability`] over the recipe HTTP API: `GET <base>/<id>`.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{RecipeId, RecipeRecord},
    error::FetchFailure,
};
use url::Url;

use crate::{capability::RecipeFetchCapability, config::base_url, error::ClientError};

pub struct HttpRecipeFetcher {
    http: Client,
    base: Url,
}

impl HttpRecipeFetcher {
    pub fn new(http: Client, base: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base: base_url(base)?,
        })
    }

    pub fn recipe_url(&self, id: RecipeId) -> Result<Url, FetchFailure> {
        self.base
            .join(&id.to_string())
            .map_err(|err| FetchFailure::Transport(format!("invalid recipe url: {err}")))
    }
}

#[async_trait]
impl RecipeFetchCapability for HttpRecipeFetcher {
    async fn fetch_recipe(&self, id: RecipeId) -> Result<RecipeRecord, FetchFailure> {
        let url = self.recipe_url(id)?;
        tracing::debug!(%url, "fetching recipe");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchFailure::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchFailure::Transport(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| FetchFailure::Decode(err.to_string()))
    }
}
