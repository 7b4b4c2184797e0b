//! Server settings loaded via OrthoConfig.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values controlling the HTTP server at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PDS")]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// Set the `Secure` flag on session cookies.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Populate the store with the fixture data at startup.
    #[ortho_config(default = true)]
    pub seed_enabled: bool,
    /// File holding at least 64 bytes of session key material. Absent, an
    /// ephemeral key is generated and sessions do not survive restarts.
    pub session_key_file: Option<PathBuf>,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|e| std::io::Error::other(format!("invalid bind address {raw:?}: {e}")))
    }

    /// Derive the session signing/encryption key from the configured file,
    /// or generate an ephemeral one.
    pub fn session_key(&self) -> std::io::Result<Key> {
        match &self.session_key_file {
            Some(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    std::io::Error::other(format!(
                        "failed to read session key at {}: {e}",
                        path.display()
                    ))
                })?;
                if bytes.len() < 64 {
                    return Err(std::io::Error::other(format!(
                        "session key at {} must hold at least 64 bytes",
                        path.display()
                    )));
                }
                Ok(Key::derive_from(&bytes))
            }
            None => {
                warn!("no session key file configured; using an ephemeral key");
                Ok(Key::generate())
            }
        }
    }
}
