use crate::scoring::{ImportanceScale, NetBanding, ScoringSession, WeightingScheme};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Defaults applied when a request does not pick its own conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    pub scheme: WeightingScheme,
    pub scale: ImportanceScale,
    pub banding: NetBanding,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let scheme = WeightingScheme::default();
        Self {
            scheme,
            scale: scheme.default_scale(),
            banding: NetBanding::default(),
        }
    }
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let scheme = match env::var("NB_WEIGHTING_SCHEME") {
            Ok(value) => {
                WeightingScheme::parse(&value).ok_or(ConfigError::InvalidScheme { value })?
            }
            Err(_) => WeightingScheme::default(),
        };

        let scale = match env::var("NB_IMPORTANCE_SCALE") {
            Ok(value) => ImportanceScale::parse(&value).ok_or(ConfigError::InvalidScale { value })?,
            Err(_) => scheme.default_scale(),
        };

        let banding = match env::var("NB_NET_BANDING") {
            Ok(value) => NetBanding::parse(&value).ok_or(ConfigError::InvalidBanding { value })?,
            Err(_) => NetBanding::default(),
        };

        Ok(Self {
            scheme,
            scale,
            banding,
        })
    }

    pub fn session(&self) -> ScoringSession {
        ScoringSession::new(self.scheme)
            .with_scale(self.scale)
            .with_banding(self.banding)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidScheme { value: String },
    InvalidScale { value: String },
    InvalidBanding { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidScheme { value } => write!(
                f,
                "NB_WEIGHTING_SCHEME '{value}' is not one of sum, max or ordinal"
            ),
            ConfigError::InvalidScale { value } => write!(
                f,
                "NB_IMPORTANCE_SCALE '{value}' is not one of unit, percent or ordinal"
            ),
            ConfigError::InvalidBanding { value } => write!(
                f,
                "NB_NET_BANDING '{value}' is not one of directional or magnitude"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidScheme { .. }
            | ConfigError::InvalidScale { .. }
            | ConfigError::InvalidBanding { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "NB_WEIGHTING_SCHEME",
            "NB_IMPORTANCE_SCALE",
            "NB_NET_BANDING",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn scale_follows_scheme_unless_overridden() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NB_WEIGHTING_SCHEME", "ordinal");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.scoring.scheme, WeightingScheme::Ordinal);
        assert_eq!(config.scoring.scale, ImportanceScale::Ordinal);

        env::set_var("NB_WEIGHTING_SCHEME", "sum");
        env::set_var("NB_IMPORTANCE_SCALE", "unit");
        env::set_var("NB_NET_BANDING", "magnitude");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.scoring.scale, ImportanceScale::Unit);
        assert_eq!(config.scoring.banding, NetBanding::Magnitude);
        assert_eq!(config.scoring.session().scale(), ImportanceScale::Unit);
        reset_env();
    }

    #[test]
    fn rejects_unknown_scheme() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NB_WEIGHTING_SCHEME", "geometric");
        let err = AppConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScheme { .. }));
        reset_env();
    }
}
