use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};
use url::Url;
use zeroize::Zeroizing;

use crate::constants::EMAIL_ADDRESS_RE;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Key rate limits on the first X-Forwarded-For hop instead of the peer address.
    #[serde(default)]
    pub trust_x_forwarded_for: bool,

    /// Shown in outgoing email subjects.
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// Portfolio content document; the built-in one is used when unset.
    #[serde(default)]
    pub content_path: Option<PathBuf>,

    #[serde(default)]
    pub mail: MailConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Deserialize, Clone)]
pub struct MailConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_mail_api_base")]
    pub api_base_url: Url,

    #[serde(default = "default_mail_from")]
    pub from: String,

    #[serde(default = "default_mail_to")]
    pub to: String,

    #[serde(default = "default_mail_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

#[derive(Deserialize, Clone, Default)]
pub struct MapConfig {
    #[serde(default)]
    pub style_id: String,

    #[serde(default)]
    pub api_key: String,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Site".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_site_name() -> String {
    "Portfolio".to_string()
}
fn default_mail_api_base() -> Url {
    Url::parse("https://api.sendgrid.com").expect("static URL is valid")
}
fn default_mail_from() -> String {
    "no-reply@example.com".to_string()
}
fn default_mail_to() -> String {
    "hello@example.com".to_string()
}
fn default_mail_timeout() -> u64 {
    10
}
fn default_max_requests() -> u32 {
    5
}
fn default_window_secs() -> u64 {
    3600
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            api_key: String::new(),
            api_base_url: default_mail_api_base(),
            from: default_mail_from(),
            to: default_mail_to(),
            timeout_secs: default_mail_timeout(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl MailConfig {
    pub fn api_key(&self) -> Option<Zeroizing<String>> {
        let key = self.api_key.trim();
        (!key.is_empty()).then(|| Zeroizing::new(key.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL with a trailing slash, so relative joins keep its last path segment.
    pub fn api_base(&self) -> Url {
        let mut base = self.api_base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .try_parsing(true)
                    .ignore_empty(true)
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Provider keys are commonly exported under their vendor names
        if config.mail.api_key.trim().is_empty() {
            config.mail.api_key = env::var("SENDGRID_API_KEY").unwrap_or_default();
        }
        if config.map.api_key.trim().is_empty() {
            config.map.api_key = env::var("MAPTILER_KEY").unwrap_or_default();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.rate_limit.max_requests == 0 {
            errors.push("APP_RATE_LIMIT__MAX_REQUESTS must be at least 1");
        }
        if self.rate_limit.window_secs == 0 {
            errors.push("APP_RATE_LIMIT__WINDOW_SECS must be at least 1");
        }
        if !EMAIL_ADDRESS_RE.is_match(&self.mail.from) {
            errors.push("APP_MAIL__FROM must be a valid email address");
        }
        if !EMAIL_ADDRESS_RE.is_match(&self.mail.to) {
            errors.push("APP_MAIL__TO must be a valid email address");
        }
        if self.mail.timeout_secs == 0 {
            errors.push("APP_MAIL__TIMEOUT_SECS must be at least 1");
        }
        if self.is_production() && self.mail.api_key().is_none() {
            errors.push("APP_MAIL__API_KEY must be set in production");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.trim().is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("trust_x_forwarded_for", &self.trust_x_forwarded_for)
            .field("site_name", &self.site_name)
            .field("content_path", &self.content_path)
            .field("mail", &self.mail)
            .field("rate_limit", &self.rate_limit)
            .field("map", &self.map)
            .finish()
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_key", &self.api_key.redact())
            .field("api_base_url", &self.api_base_url.as_str())
            .field("from", &self.from)
            .field("to", &self.to)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl fmt::Debug for MapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapConfig")
            .field("style_id", &self.style_id)
            .field("api_key", &self.api_key.redact())
            .finish()
    }
}
