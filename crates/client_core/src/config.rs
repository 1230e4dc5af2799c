use std::{collections::HashMap, env, fs, path::Path};

use serde::Deserialize;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_CONFIG_FILE: &str = "foodie.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub recipe_api_base: String,
    pub auth_api_base: String,
    pub api_key: String,
    pub project_id: String,
    pub locale: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recipe_api_base: "https://foodie.sandrohc.net/recipes/".into(),
            auth_api_base: "https://identitytoolkit.googleapis.com/v1/".into(),
            api_key: String::new(),
            project_id: "foodie-daam".into(),
            locale: None,
        }
    }
}

/// Loads settings from `path` (or `foodie.toml` in the working directory)
/// and then the process environment.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let file = fs::read_to_string(path).ok();
    let vars: HashMap<String, String> = env::vars().collect();
    resolve_settings(file.as_deref(), &vars)
}

/// Layers defaults, a flat TOML table and environment variables, in that
/// order of increasing precedence.
pub fn resolve_settings(file: Option<&str>, vars: &HashMap<String, String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("recipe_api_base") {
                    settings.recipe_api_base = v.clone();
                }
                if let Some(v) = file_cfg.get("auth_api_base") {
                    settings.auth_api_base = v.clone();
                }
                if let Some(v) = file_cfg.get("api_key") {
                    settings.api_key = v.clone();
                }
                if let Some(v) = file_cfg.get("project_id") {
                    settings.project_id = v.clone();
                }
                if let Some(v) = file_cfg.get("locale") {
                    settings.locale = Some(v.clone());
                }
            }
            Err(error) => tracing::warn!(%error, "ignoring unreadable settings file"),
        }
    }

    let var = |names: &[&str]| names.iter().find_map(|name| vars.get(*name).cloned());

    if let Some(v) = var(&["APP__RECIPE_API_BASE", "FOODIE_RECIPE_API_BASE"]) {
        settings.recipe_api_base = v;
    }
    if let Some(v) = var(&["APP__AUTH_API_BASE", "FOODIE_AUTH_API_BASE"]) {
        settings.auth_api_base = v;
    }
    if let Some(v) = var(&["APP__API_KEY", "FOODIE_API_KEY"]) {
        settings.api_key = v;
    }
    if let Some(v) = var(&["APP__PROJECT_ID", "FOODIE_PROJECT_ID"]) {
        settings.project_id = v;
    }
    if let Some(v) = var(&["APP__LOCALE", "FOODIE_LOCALE"]) {
        settings.locale = Some(v);
    }

    if settings.locale.is_none() {
        settings.locale = vars.get("LANG").and_then(|lang| device_locale(lang));
    }

    settings
}

/// Converts a POSIX locale such as `pt_BR.UTF-8` into a language tag.
fn device_locale(lang: &str) -> Option<String> {
    let tag = lang.split(['.', '@']).next().unwrap_or_default();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag.replace('_', "-"))
}

/// Parses an API base URL, forcing a trailing slash so relative joins
/// append to the path instead of replacing its last segment.
pub fn base_url(raw: &str) -> Result<Url, ClientError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|err| ClientError::InvalidEndpoint {
        url: raw.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
