use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::board::domain::ActorId;
use crate::board::lifecycle::{BoardSettings, SAMPLE_EMPLOYER_ID};

const DEFAULT_OUTBOX_CAPACITY: usize = 100;

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

/// Top-level configuration for the job board service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub board: BoardConfig,
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
            board: BoardConfig::from_env()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Board behaviour: who owns the sample vacancies, whether they are loaded at
/// startup, and how many undelivered notifications an actor may accumulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub sample_employer: ActorId,
    pub seed_samples: bool,
    pub outbox_capacity: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            sample_employer: SAMPLE_EMPLOYER_ID,
            seed_samples: false,
            outbox_capacity: DEFAULT_OUTBOX_CAPACITY,
        }
    }
}

impl BoardConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let sample_employer = match env::var("BOARD_SAMPLE_EMPLOYER_ID") {
            Ok(raw) => ActorId(
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| ConfigError::InvalidSampleEmployer { value: raw.clone() })?,
            ),
            Err(_) => defaults.sample_employer,
        };

        let seed_samples = match env::var("BOARD_SEED_SAMPLES") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "BOARD_SEED_SAMPLES",
                value: raw,
            })?,
            Err(_) => defaults.seed_samples,
        };

        let outbox_capacity = match env::var("BOARD_OUTBOX_CAPACITY") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|capacity| *capacity > 0)
                .ok_or(ConfigError::InvalidOutboxCapacity { value: raw })?,
            Err(_) => defaults.outbox_capacity,
        };

        Ok(Self {
            sample_employer,
            seed_samples,
            outbox_capacity,
        })
    }

    pub fn settings(&self) -> BoardSettings {
        BoardSettings {
            sample_employer: self.sample_employer,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSampleEmployer { value: String },
    InvalidFlag { name: &'static str, value: String },
    InvalidOutboxCapacity { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSampleEmployer { value } => write!(
                f,
                "BOARD_SAMPLE_EMPLOYER_ID must be an integer actor id, got '{value}'"
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false, got '{value}'")
            }
            ConfigError::InvalidOutboxCapacity { value } => write!(
                f,
                "BOARD_OUTBOX_CAPACITY must be a positive integer, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSampleEmployer { .. }
            | ConfigError::InvalidFlag { .. }
            | ConfigError::InvalidOutboxCapacity { .. } => None,
        }
    }
}
