use std::{env, path::PathBuf, str::FromStr};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "app.json";

pub static SETTINGS: Lazy<App> = Lazy::new(|| App::get().expect("Config error"));

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct App {
    pub system: System,
    pub screener: Screener,
}

const SYSTEM_OUTPUT_FILE: &str = "SYSTEM_OUTPUT_FILE";
const SYSTEM_MAX_YEARS: &str = "SYSTEM_MAX_YEARS";
const SYSTEM_REQUEST_DELAY_MS: &str = "SYSTEM_REQUEST_DELAY_MS";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct System {
    /// Path the normalized record CSV is written to.
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// How many of the most recent year columns to keep per table.
    #[serde(default = "default_max_years")]
    pub max_years: usize,
    /// Delay inserted before rate-limited remote calls.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
}

const SCREENER_CSRF_TOKEN: &str = "SCREENER_CSRF_TOKEN";
const SCREENER_SESSION_ID: &str = "SCREENER_SESSION_ID";

/// Optional static cookies for Screener endpoints that want a session.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Screener {
    #[serde(default)]
    pub csrf_token: String,
    #[serde(default)]
    pub session_id: String,
}

fn default_output_file() -> String {
    "screener_normalized_data.csv".to_string()
}

fn default_max_years() -> usize {
    6
}

fn default_request_delay_ms() -> u64 {
    1000
}

impl Default for System {
    fn default() -> Self {
        System {
            output_file: default_output_file(),
            max_years: default_max_years(),
            request_delay_ms: default_request_delay_ms(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        App {
            system: Default::default(),
            screener: Default::default(),
        }
    }
}

impl App {
    fn get() -> Result<Self> {
        let config_path = config_path();
        if config_path.exists() {
            let config: App = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(config.override_with_env());
        }

        Ok(App::default().override_with_env())
    }

    /// Environment variables win over values read from app.json.
    fn override_with_env(mut self) -> Self {
        if let Ok(output_file) = env::var(SYSTEM_OUTPUT_FILE) {
            self.system.output_file = output_file;
        }

        if let Ok(max_years) = env::var(SYSTEM_MAX_YEARS) {
            self.system.max_years = usize::from_str(&max_years).unwrap_or(default_max_years());
        }

        if let Ok(delay) = env::var(SYSTEM_REQUEST_DELAY_MS) {
            self.system.request_delay_ms =
                u64::from_str(&delay).unwrap_or(default_request_delay_ms());
        }

        if let Ok(csrf_token) = env::var(SCREENER_CSRF_TOKEN) {
            self.screener.csrf_token = csrf_token;
        }

        if let Ok(session_id) = env::var(SCREENER_SESSION_ID) {
            self.screener.session_id = session_id;
        }

        self
    }
}

/// Returns the path of the configuration file.
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let app = App::default();
        assert_eq!(app.system.output_file, "screener_normalized_data.csv");
        assert_eq!(app.system.max_years, 6);
        assert_eq!(app.system.request_delay_ms, 1000);
        assert!(app.screener.csrf_token.is_empty());
    }
}
