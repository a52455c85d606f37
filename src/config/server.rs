//! Server configuration

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Cap on unregistration, and on draining connections, at shutdown
    #[serde(default = "default_graceful_shutdown")]
    pub graceful_shutdown_secs: u64,

    /// Delay between startup and subscription registration
    #[serde(default = "default_registration_delay")]
    pub registration_delay_secs: u64,

    /// PEM certificate chain for TLS
    pub tls_cert_file: Option<PathBuf>,

    /// PEM private key for TLS
    pub tls_key_file: Option<PathBuf>,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Certificate and key paths for the TLS listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsFiles {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl ServerConfig {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidAddress(addr))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn graceful_shutdown(&self) -> Duration {
        Duration::from_secs(self.graceful_shutdown_secs)
    }

    pub fn registration_delay(&self) -> Duration {
        Duration::from_secs(self.registration_delay_secs)
    }

    /// TLS files, when both are configured.
    pub fn tls_files(&self) -> Option<TlsFiles> {
        match (&self.tls_cert_file, &self.tls_key_file) {
            (Some(cert), Some(key)) => Some(TlsFiles {
                cert: cert.clone(),
                key: key.clone(),
            }),
            _ => None,
        }
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.socket_addr()?;
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.graceful_shutdown_secs == 0 {
            return Err(ValidationError::InvalidShutdownTimeout);
        }
        if self.tls_cert_file.is_some() != self.tls_key_file.is_some() {
            return Err(ValidationError::IncompleteTls);
        }
        if self.is_production() && self.tls_files().is_none() {
            return Err(ValidationError::TlsRequiredInProduction);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            graceful_shutdown_secs: default_graceful_shutdown(),
            registration_delay_secs: default_registration_delay(),
            tls_cert_file: None,
            tls_key_file: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    443
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,pb_webhook_relay=debug".to_string()
}

fn default_request_timeout() -> u64 {
    5
}

fn default_graceful_shutdown() -> u64 {
    10
}

fn default_registration_delay() -> u64 {
    10
}
