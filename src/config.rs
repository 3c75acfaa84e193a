//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;

/// Default HTTPS port
pub const DEFAULT_PORT: u16 = 9527;

/// Default bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Directory holding the managed text files
pub const DEFAULT_FILES_DIR: &str = "_managed_files";

/// Certificate supplied by the certificate provisioning step
pub const DEFAULT_TLS_CERT_PATH: &str = "certs/localhost.pem";

/// Private key matching [`DEFAULT_TLS_CERT_PATH`]
pub const DEFAULT_TLS_KEY_PATH: &str = "certs/localhost-key.pem";

/// The browser editor allowed to call this server
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://text-editor-client.vercel.app";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Storage configuration
    pub storage: StorageConfig,
    /// TLS key/certificate locations
    pub tls: TlsConfig,
    /// Cross-origin policy
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the managed files
    pub files_dir: PathBuf,
}

/// TLS configuration
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// PEM certificate chain
    pub cert_path: PathBuf,
    /// PEM private key
    pub key_path: PathBuf,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Single origin allowed to make cross-origin requests
    pub allowed_origin: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: DEFAULT_PORT,
                host: DEFAULT_HOST.to_string(),
            },
            storage: StorageConfig {
                files_dir: PathBuf::from(DEFAULT_FILES_DIR),
            },
            tls: TlsConfig {
                cert_path: PathBuf::from(DEFAULT_TLS_CERT_PATH),
                key_path: PathBuf::from(DEFAULT_TLS_KEY_PATH),
            },
            cors: CorsConfig {
                allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
                host: env::var("HOST").unwrap_or(defaults.server.host),
            },
            storage: StorageConfig {
                files_dir: env::var_os("FILES_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.files_dir),
            },
            tls: TlsConfig {
                cert_path: env::var_os("TLS_CERT_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.tls.cert_path),
                key_path: env::var_os("TLS_KEY_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.tls.key_path),
            },
            cors: CorsConfig {
                allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                    .unwrap_or(defaults.cors.allowed_origin),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
