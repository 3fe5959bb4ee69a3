use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub scraper: ScraperSettings,
    pub search: SearchSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    pub base_url: String,
    pub client_id: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SearchSettings {
    pub default_query: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub default_num_pages: u32,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        ScraperSettings {
            base_url: "https://www.google.com/search".to_string(),
            client_id: "firefox-b-1-d".to_string(),
        }
    }
}

/// Defaults, then `configuration/base.yaml` if present, then `APP_` env vars
/// (`APP_SCRAPER__BASE_URL`, `APP_SEARCH__DEFAULT_NUM_PAGES`, ...).
pub fn get_configuration() -> Result<Settings, ConfigError> {
    build_configuration(Some("configuration/base"), app_environment())
}

fn app_environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
}

fn build_configuration(
    file_name: Option<&str>,
    environment: Environment,
) -> Result<Settings, ConfigError> {
    let defaults = ScraperSettings::default();

    let mut builder = Config::builder()
        .set_default("scraper.base_url", defaults.base_url)?
        .set_default("scraper.client_id", defaults.client_id)?
        .set_default("search.default_query", "hello world")?
        .set_default("search.default_num_pages", 10)?;

    if let Some(file_name) = file_name {
        builder = builder.add_source(File::with_name(file_name).required(false));
    }

    builder
        .add_source(environment)
        .build()?
        .try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use config::Map;

    use super::{app_environment, build_configuration};

    fn env(vars: &[(&str, &str)]) -> Map<String, String> {
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_without_any_sources() {
        let environment = app_environment().source(Some(env(&[])));
        let settings = build_configuration(None, environment).unwrap();

        assert_eq!(settings.scraper.base_url, "https://www.google.com/search");
        assert_eq!(settings.scraper.client_id, "firefox-b-1-d");
        assert_eq!(settings.search.default_query, "hello world");
        assert_eq!(settings.search.default_num_pages, 10);
    }

    #[test]
    fn app_env_vars_override_defaults() {
        let environment = app_environment().source(Some(env(&[
            ("APP_SEARCH__DEFAULT_NUM_PAGES", "3"),
            ("APP_SCRAPER__CLIENT_ID", "other"),
            ("UNRELATED__DEFAULT_QUERY", "ignored"),
        ])));
        let settings = build_configuration(None, environment).unwrap();

        assert_eq!(settings.search.default_num_pages, 3);
        assert_eq!(settings.scraper.client_id, "other");
        assert_eq!(settings.search.default_query, "hello world");
    }

    #[test]
    fn non_numeric_page_count_is_rejected() {
        let environment =
            app_environment().source(Some(env(&[("APP_SEARCH__DEFAULT_NUM_PAGES", "many")])));

        assert!(build_configuration(None, environment).is_err());
    }
}
