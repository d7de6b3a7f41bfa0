//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di upload
//! - Fornisce validazione robusta dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `workers`: Numero di worker paralleli (default: 10)
//! - `queue_capacity`: Capacità della coda dei job (default: 10)
//! - `max_attach_attempts`: Tentativi totali di attach per job (default: 4)
//! - `retry_delay_ms`: Attesa tra tentativi di attach (default: 0)
//! - `dry_run`: Elenca i file senza caricarli (default: false)
//! - `upload_base_url` / `api_base_url`: Endpoint del servizio remoto
//!   (default: https://photoslibrary.googleapis.com, sovrascrivibili nei test)
//!
//! ## Validazione:
//! - Controlla che workers sia > 0
//! - Controlla che queue_capacity sia > 0
//! - Controlla che max_attach_attempts sia > 0
//! - Controlla che i base URL non siano vuoti

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default base URL of the Google Photos Library API.
pub const DEFAULT_BASE_URL: &str = "https://photoslibrary.googleapis.com";

/// Configuration for a bulk upload run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of parallel upload workers
    pub workers: usize,
    /// Capacity of the bounded job queue (producer blocks when full)
    pub queue_capacity: usize,
    /// Total attach attempts per job (1 initial + retries)
    pub max_attach_attempts: u32,
    /// Delay between attach attempts in milliseconds (0 = immediate retry)
    pub retry_delay_ms: u64,
    /// List candidate files without uploading anything
    pub dry_run: bool,
    /// Base URL for the raw-bytes upload endpoint
    pub upload_base_url: String,
    /// Base URL for the library API (batchCreate)
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: 10,
            queue_capacity: 10,
            max_attach_attempts: 4,
            retry_delay_ms: 0,
            dry_run: false,
            upload_base_url: DEFAULT_BASE_URL.to_string(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(anyhow::anyhow!("Number of workers must be greater than 0"));
        }

        if self.queue_capacity == 0 {
            return Err(anyhow::anyhow!("Queue capacity must be greater than 0"));
        }

        if self.max_attach_attempts == 0 {
            return Err(anyhow::anyhow!(
                "Max attach attempts must be greater than 0"
            ));
        }

        if self.upload_base_url.is_empty() {
            return Err(anyhow::anyhow!("Upload base URL must not be empty"));
        }

        if self.api_base_url.is_empty() {
            return Err(anyhow::anyhow!("API base URL must not be empty"));
        }

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
