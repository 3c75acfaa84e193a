//! TLS setup
//!
//! The key/certificate pair is produced outside this program; here it is only
//! loaded and handed to the HTTPS listener.

use crate::config::TlsConfig;
use anyhow::Context;
use axum_server::tls_rustls::RustlsConfig;
use tracing::info;

/// Load the PEM certificate chain and private key into a rustls config
pub async fn load_rustls_config(config: &TlsConfig) -> anyhow::Result<RustlsConfig> {
    info!(
        cert = %config.cert_path.display(),
        key = %config.key_path.display(),
        "Loading TLS certificate"
    );

    RustlsConfig::from_pem_file(&config.cert_path, &config.key_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load TLS certificate {} and key {}",
                config.cert_path.display(),
                config.key_path.display()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_certificate_fails() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = TlsConfig {
            cert_path: temp_dir.path().join("missing.pem"),
            key_path: temp_dir.path().join("missing-key.pem"),
        };

        match load_rustls_config(&config).await {
            Ok(_) => panic!("Loading missing files should fail"),
            Err(err) => assert!(err.to_string().contains("missing.pem")),
        }
    }

    #[tokio::test]
    async fn test_garbage_certificate_fails() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let cert_path = temp_dir.path().join("cert.pem");
        let key_path = temp_dir.path().join("key.pem");
        std::fs::write(&cert_path, "not a certificate").unwrap();
        std::fs::write(&key_path, "not a key").unwrap();

        let config = TlsConfig {
            cert_path,
            key_path,
        };
        assert!(load_rustls_config(&config).await.is_err());
    }
}
