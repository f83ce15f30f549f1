//! Environment-driven configuration.
//!
//! All settings come from environment variables with explicit defaults;
//! a missing variable is never an error. The only values that can abort
//! startup are malformed numeric ports. `Config::load` merges a local
//! `.env` secrets file into the environment first (a missing file is
//! fine), then builds the record in one pass. The record is immutable
//! after construction and handed to the application as `Arc<Config>` —
//! nothing reads the environment at request time.
//!
//! Compatibility notes, preserved deliberately:
//! - `DEBUG` and `EMAIL_USE_TLS` are true only for the exact literal
//!   `"True"`; `"true"`, `"1"`, and everything else mean false.
//! - `ALLOWED_HOSTS` is split on commas verbatim, with no trimming or
//!   hostname validation.
//! - The default secret key is insecure by design and must be overridden
//!   in any deployed environment; this layer does not detect the
//!   operator forgetting to do so.

use persistence::db::DatabaseConfig;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Fixed site name.
pub const SITE_NAME: &str = "artist_portfolio";

/// Placeholder secret used when DJANGO_SECRET_KEY is unset.
pub const INSECURE_DEFAULT_SECRET: &str = "insecure-dev-key-change-me";

/// HSTS duration applied in production: 30 days.
pub const HSTS_SECONDS: u64 = 60 * 60 * 24 * 30;

/// Errors constructing the configuration record.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} is not a valid port number")]
    InvalidPort { var: &'static str, value: String },
}

/// Process-wide configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_dir: PathBuf,
    pub secret_key: String,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub database: DatabaseConfig,
    pub static_files: StaticFilesConfig,
    pub email: EmailConfig,
    pub i18n: LocaleConfig,
    pub site: SiteConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Production-only transport security settings.
    ///
    /// Present exactly when `debug` is false.
    pub security: Option<SecurityConfig>,
}

/// Static and media file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFilesConfig {
    pub static_root: PathBuf,
    pub static_url: String,
    pub media_root: PathBuf,
    pub media_url: String,
}

/// Outbound email transport parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    /// Transport backend: `smtp` or `console`.
    pub backend: String,
    pub host: String,
    pub port: u16,
    pub host_user: String,
    pub host_password: String,
    pub use_tls: bool,
    pub default_from: String,
}

/// Localisation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_code: String,
    pub time_zone: String,
}

/// Site identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub site_name: String,
    pub admin_base_url: String,
}

/// HTTP bind address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Transport-security settings applied when debug mode is off.
///
/// The values are fixed; the struct exists so the production posture is
/// a single typed record rather than scattered conditionals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    pub ssl_redirect: bool,
    pub session_cookie_secure: bool,
    pub csrf_cookie_secure: bool,
    pub hsts_seconds: u64,
    pub hsts_include_subdomains: bool,
    pub hsts_preload: bool,
    /// Header (name, value) pair the TLS-terminating proxy sets on
    /// forwarded HTTPS requests.
    pub proxy_ssl_header: (&'static str, &'static str),
}

impl SecurityConfig {
    fn production() -> Self {
        Self {
            ssl_redirect: true,
            session_cookie_secure: true,
            csrf_cookie_secure: true,
            hsts_seconds: HSTS_SECONDS,
            hsts_include_subdomains: true,
            hsts_preload: true,
            proxy_ssl_header: ("x-forwarded-proto", "https"),
        }
    }

    /// The Strict-Transport-Security header value for this posture.
    pub fn hsts_header_value(&self) -> String {
        let mut value = format!("max-age={}", self.hsts_seconds);
        if self.hsts_include_subdomains {
            value.push_str("; includeSubDomains");
        }
        if self.hsts_preload {
            value.push_str("; preload");
        }
        value
    }
}

fn get(env: &HashMap<String, String>, key: &str, default: &str) -> String {
    env.get(key).cloned().unwrap_or_else(|| default.to_string())
}

/// Exact-literal boolean: true only for the string `"True"`.
fn true_literal(env: &HashMap<String, String>, key: &str, default: bool) -> bool {
    match env.get(key) {
        Some(value) => value == "True",
        None => default,
    }
}

fn port(
    env: &HashMap<String, String>,
    key: &'static str,
    default: u16,
) -> Result<u16, ConfigError> {
    match env.get(key) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
            var: key,
            value: value.clone(),
        }),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Merges `{base_dir}/.env` into the environment first; a missing
    /// file is not an error.
    pub fn load(base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let base_dir = base_dir.into();
        dotenvy::from_path(base_dir.join(".env")).ok();
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::from_env_map(&env, base_dir)
    }

    /// Build the configuration record from an environment mapping.
    ///
    /// Pure: reads nothing but its arguments.
    pub fn from_env_map(
        env: &HashMap<String, String>,
        base_dir: PathBuf,
    ) -> Result<Self, ConfigError> {
        let debug = true_literal(env, "DEBUG", true);

        let default_db_path = base_dir.join("db.sqlite3");
        let database = DatabaseConfig {
            engine: get(env, "DB_ENGINE", "sqlite"),
            name: get(env, "DB_NAME", &default_db_path.to_string_lossy()),
            user: get(env, "DB_USER", ""),
            password: get(env, "DB_PASSWORD", ""),
            host: get(env, "DB_HOST", ""),
            // Carried verbatim; only the email and server ports are numeric.
            port: get(env, "DB_PORT", ""),
            max_connections: 5,
        };

        let email = EmailConfig {
            backend: get(env, "EMAIL_BACKEND", "smtp"),
            host: get(env, "EMAIL_HOST", "smtp.resend.com"),
            port: port(env, "EMAIL_PORT", 587)?,
            host_user: get(env, "EMAIL_HOST_USER", "apikey"),
            host_password: get(env, "EMAIL_HOST_PASSWORD", ""),
            use_tls: true_literal(env, "EMAIL_USE_TLS", true),
            default_from: get(env, "DEFAULT_FROM_EMAIL", "noreply@example.com"),
        };

        Ok(Self {
            secret_key: get(env, "DJANGO_SECRET_KEY", INSECURE_DEFAULT_SECRET),
            debug,
            allowed_hosts: get(env, "ALLOWED_HOSTS", "localhost,127.0.0.1")
                .split(',')
                .map(|s| s.to_string())
                .collect(),
            database,
            static_files: StaticFilesConfig {
                static_root: base_dir.join("staticfiles"),
                static_url: "/static/".to_string(),
                media_root: base_dir.join("media"),
                media_url: "/media/".to_string(),
            },
            email,
            i18n: LocaleConfig {
                language_code: get(env, "LANGUAGE_CODE", "de-ch"),
                time_zone: get(env, "TIME_ZONE", "Europe/Zurich"),
            },
            site: SiteConfig {
                site_name: SITE_NAME.to_string(),
                admin_base_url: get(env, "WAGTAILADMIN_BASE_URL", "http://localhost:8000"),
            },
            server: ServerConfig {
                host: get(env, "SERVER_HOST", "0.0.0.0"),
                port: port(env, "SERVER_PORT", 8000)?,
            },
            logging: LoggingConfig {
                level: get(env, "LOG_LEVEL", "info"),
                format: get(env, "LOG_FORMAT", "pretty"),
            },
            security: if debug {
                None
            } else {
                Some(SecurityConfig::production())
            },
            base_dir,
        })
    }
}
