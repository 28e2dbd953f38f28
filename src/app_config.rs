use config::{Config, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    api: Api,
    session: Session,
    branding: Branding,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from(name: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name(name).required(true))
            .add_source(config::File::with_name(&format!("{}_local", name)).required(false))
            .add_source(config::Environment::with_prefix("ASSETDESK").prefix_separator("_").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }
}

#[derive(Debug, Deserialize)]
pub struct Api {
    base_url: String,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
    read_retries: usize,
    retry_base_ms: u64,
    #[serde(with = "humantime_serde")]
    retry_max_delay: Duration,
}

impl Api {
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn read_retries(&self) -> usize {
        self.read_retries
    }

    pub fn retry_base_ms(&self) -> u64 {
        self.retry_base_ms
    }

    pub fn retry_max_delay(&self) -> Duration {
        self.retry_max_delay
    }
}

#[derive(Debug, Deserialize)]
pub struct Session {
    path: PathBuf,
}

impl Session {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Deserialize)]
pub struct Branding {
    default_name: String,
    default_accent_color: String,
}

impl Branding {
    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn default_accent_color(&self) -> &str {
        &self.default_accent_color
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                api: Api {
                    base_url: "http://assetdesk.test".to_string(),
                    timeout: Duration::from_secs(5),
                    read_retries: 0,
                    retry_base_ms: 1,
                    retry_max_delay: Duration::from_millis(5),
                },
                session: Session {
                    path: std::env::temp_dir().join("assetdesk-session.json"),
                },
                branding: Branding {
                    default_name: "assetdesk".to_string(),
                    default_accent_color: "#2563eb".to_string(),
                },
            },
        }
    }

    pub fn base_url(mut self, url: String) -> Self {
        self.config.api.base_url = url;
        self
    }

    pub fn read_retries(mut self, retries: usize) -> Self {
        self.config.api.read_retries = retries;
        self
    }

    pub fn session_path(mut self, path: PathBuf) -> Self {
        self.config.session.path = path;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
