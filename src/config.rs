use serde::Deserialize;
use std::sync::OnceLock;

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(x) if x.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn global() -> &'static Config {
        CONFIG.get_or_init(Config::from_env)
    }

    fn build(api_url: Option<&str>, environment: Option<&str>) -> Config {
        let api_url = api_url
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Config {
            api_url,
            environment: Environment::parse(environment),
        }
    }

    /// The browser bundle has no process environment, so it takes the
    /// values baked in at compile time.
    #[cfg(feature = "hydrate")]
    pub fn from_env() -> Config {
        Config::build(option_env!("API_URL"), option_env!("ENVIRONMENT"))
    }

    #[cfg(not(feature = "hydrate"))]
    pub fn from_env() -> Config {
        let api_url = std::env::var("API_URL").ok();
        let environment = std::env::var("ENVIRONMENT").ok();
        Config::build(api_url.as_deref(), environment.as_deref())
    }

    #[inline]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
