use super::*;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn defaults_point_at_public_endpoints() {
    let settings = resolve_settings(None, &HashMap::new());
    assert_eq!(settings.recipe_api_base, "https://foodie.sandrohc.net/recipes/");
    assert_eq!(settings.project_id, "foodie-daam");
    assert!(settings.api_key.is_empty());
    assert_eq!(settings.locale, None);
}

#[test]
fn file_values_override_defaults() {
    let file = r#"
recipe_api_base = "http://127.0.0.1:9000/recipes/"
api_key = "file-key"
"#;
    let settings = resolve_settings(Some(file), &HashMap::new());
    assert_eq!(settings.recipe_api_base, "http://127.0.0.1:9000/recipes/");
    assert_eq!(settings.api_key, "file-key");
}

#[test]
fn environment_overrides_file() {
    let file = r#"api_key = "file-key""#;
    let settings = resolve_settings(Some(file), &vars(&[("FOODIE_API_KEY", "env-key")]));
    assert_eq!(settings.api_key, "env-key");
}

#[test]
fn app_prefixed_variables_take_precedence() {
    let settings = resolve_settings(
        None,
        &vars(&[("FOODIE_LOCALE", "fr"), ("APP__LOCALE", "de")]),
    );
    assert_eq!(settings.locale.as_deref(), Some("de"));
}

#[test]
fn locale_falls_back_to_device_language() {
    let settings = resolve_settings(None, &vars(&[("LANG", "pt_BR.UTF-8")]));
    assert_eq!(settings.locale.as_deref(), Some("pt-BR"));

    let settings = resolve_settings(None, &vars(&[("LANG", "C")]));
    assert_eq!(settings.locale, None);
}

#[test]
fn malformed_file_is_ignored() {
    let settings = resolve_settings(Some("api_key = ["), &HashMap::new());
    assert_eq!(settings, Settings::default());
}
