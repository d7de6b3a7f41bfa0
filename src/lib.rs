//! # Google Photos Bulk Uploader Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per i test di integrazione
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore per le due fasi del protocollo (upload/attach)
//! - `job`: Modello dati (MediaJob, UploadToken, AttachResult, JobOutcome)
//! - `queue`: Coda bounded produttore/consumatore dei job
//! - `client`: Client HTTP per il protocollo a due fasi di Google Photos
//! - `uploader`: Orchestratore principale e worker pool
//! - `media_finder`: Discovery dei file media supportati
//! - `auth`: Caricamento credenziali (access token)
//! - `progress`: Progress tracking e statistiche
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use std::sync::Arc;
//! use gphotos_bulk_uploader::{BulkUploader, Config, PhotosClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::default();
//! let client = PhotosClient::new("access-token".to_string(), &config)?;
//! let uploader = BulkUploader::new(config, Arc::new(client))?;
//! let stats = uploader.run(std::path::Path::new("/photos")).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod job;
pub mod media_finder;
pub mod progress;
pub mod queue;
pub mod uploader;

pub use auth::Credentials;
pub use client::{MediaLibrary, PhotosClient};
pub use config::Config;
pub use error::{AttachError, UploadError};
pub use job::{AttachResult, JobOutcome, MediaJob, UploadToken};
pub use progress::UploadStats;
pub use uploader::{BulkUploader, RetryPolicy};
