use crate::generator::ListingShape;
use crate::redirect_checker::{CheckOptions, Normalization, RedirectMode};
use crate::report::FailedReportFormat;
use config::{Config, File, FileFormat};
use secrecy::SecretString;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const BASE_CONFIG: &str = include_str!("../configuration/base.yaml");
const LOCAL_CONFIG: &str = include_str!("../configuration/local.yaml");
const PRODUCTION_CONFIG: &str = include_str!("../configuration/production.yaml");

/// Environment variable holding the CMS credential.
pub const CMS_API_KEY_ENV: &str = "CMS_API_KEY";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub checker: CheckerSettings,
    pub report: ReportSettings,
    pub cms: CmsSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CheckerSettings {
    pub redirect_mode: RedirectMode,
    pub normalization: Normalization,
    pub wildcard_token: String,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
    pub estimate_sample_size: usize,
}

impl CheckerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            mode: self.redirect_mode,
            normalization: self.normalization,
            wildcard_token: self.wildcard_token.clone(),
            timeout: self.timeout(),
            max_redirects: self.max_redirects,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportSettings {
    pub directory: PathBuf,
    pub failed_format: FailedReportFormat,
}

#[derive(Debug, Deserialize)]
pub struct CmsSettings {
    pub base_url: String,
    pub content_path: String,
    pub page_size: usize,
    pub timeout_seconds: u64,
    pub listing_shape: ListingShape,
    pub output_path: PathBuf,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub api_key: Option<SecretString>,
}

impl CmsSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()).map(SecretString::from))
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    dotenvy::dotenv().ok();

    let environment = get_environment()?;
    debug!(environment = environment.as_str(), "loading configuration");
    build_configuration(environment)
}

fn get_environment() -> Result<Environment, config::ConfigError> {
    let env_var = env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string());

    env_var
        .try_into()
        .map_err(|_| config::ConfigError::NotFound("Failed to parse APP_ENVIRONMENT".to_string()))
}

fn build_configuration(environment: Environment) -> Result<Settings, config::ConfigError> {
    let environment_config = match environment {
        Environment::Local => LOCAL_CONFIG,
        Environment::Production => PRODUCTION_CONFIG,
    };

    let config = Config::builder()
        .add_source(File::from_str(BASE_CONFIG, FileFormat::Yaml))
        .add_source(File::from_str(environment_config, FileFormat::Yaml))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .set_override_option("cms.api_key", env::var(CMS_API_KEY_ENV).ok())?
        .build()?;

    config.try_deserialize::<Settings>()
}

#[derive(Debug, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
