//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore delle due fasi del protocollo.
//!
//! ## Responsabilità:
//! - Definisce `UploadError` per la fase 1 (upload dei byte grezzi)
//! - Definisce `AttachError` per la fase 2 (batchCreate dell'item)
//! - Integra con `thiserror` per automatic error conversion
//! - Supporta error chaining per mantenere il contesto degli errori
//!
//! ## Categorie di errori:
//! - `UploadError::Io`: Errore di lettura del file locale
//! - `UploadError::Transport`: Errore di rete durante l'upload
//! - `UploadError::Rejected`: Status HTTP non-success dall'endpoint di upload
//! - `UploadError::EmptyToken`: Il body di risposta non conteneva un token
//! - `AttachError::Transport`: Errore di rete durante la batchCreate
//! - `AttachError::Rejected`: Status HTTP non-success dalla batchCreate
//! - `AttachError::EmptyBatch`: Risposta senza result entry
//!
//! ## Semantica:
//! - Un `UploadError` è terminale per il job: il body della richiesta
//!   consuma lo stream del file, quindi la fase 1 non viene ritentata
//! - Un `AttachError` è ritentabile fino al tetto configurato; oltre
//!   il tetto il job termina come `AttachExhausted`
//! - Entrambi vengono recuperati a livello di worker e non abortiscono
//!   mai il pool

/// Errors raised while uploading raw bytes (phase 1). Terminal for the job.
#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upload rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("upload response contained no token")]
    EmptyToken,
}

/// Errors raised while attaching an upload token (phase 2). Retried up to
/// the configured ceiling before the job terminates as exhausted.
#[derive(thiserror::Error, Debug)]
pub enum AttachError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("batchCreate rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("batchCreate response contained no result entries")]
    EmptyBatch,

    #[error("batchCreate result carried no media item: {message}")]
    MissingItem { message: String },
}
