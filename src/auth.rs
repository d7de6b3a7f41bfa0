//! # Credentials Module
//!
//! Caricamento dell'access token OAuth2 per il servizio remoto.
//!
//! ## Responsabilità:
//! - Risolve il bearer token da variabile d'ambiente o da file
//! - Contratto volutamente stretto: nessun login interattivo, nessun
//!   refresh; il token viene ottenuto fuori da questo processo
//!
//! ## Ordine di risoluzione:
//! 1. `GPHOTOS_ACCESS_TOKEN`
//! 2. File passato con `--token-file`
//! 3. File indicato da `GPHOTOS_TOKEN_FILE`

use anyhow::{Context, Result};
use std::path::Path;

/// Env var holding the bearer token directly.
pub const ACCESS_TOKEN_ENV: &str = "GPHOTOS_ACCESS_TOKEN";
/// Env var pointing at a file whose contents are the bearer token.
pub const TOKEN_FILE_ENV: &str = "GPHOTOS_TOKEN_FILE";

/// Bearer credentials for the Photos Library API.
#[derive(Clone)]
pub struct Credentials {
    pub access_token: String,
}

impl Credentials {
    /// Resolve credentials from the environment, falling back to a token
    /// file when the direct env var is not set.
    pub async fn resolve(token_file: Option<&Path>) -> Result<Self> {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            let token = token.trim().to_string();
            if !token.is_empty() {
                return Ok(Self {
                    access_token: token,
                });
            }
        }

        if let Some(path) = token_file {
            return Self::from_token_file(path).await;
        }

        if let Ok(path) = std::env::var(TOKEN_FILE_ENV) {
            return Self::from_token_file(Path::new(&path)).await;
        }

        Err(anyhow::anyhow!(
            "Missing access token. Set {}, {}, or pass --token-file",
            ACCESS_TOKEN_ENV,
            TOKEN_FILE_ENV
        ))
    }

    /// Read the token from a file, trimming surrounding whitespace.
    pub async fn from_token_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read token file: {}", path.display()))?;

        let token = content.trim().to_string();
        if token.is_empty() {
            return Err(anyhow::anyhow!("Token file is empty: {}", path.display()));
        }

        Ok(Self {
            access_token: token,
        })
    }

    /// Placeholder credentials for dry runs, where no network call is made.
    pub fn anonymous() -> Self {
        Self {
            access_token: String::new(),
        }
    }
}
