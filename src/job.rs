//! # Job Data Model Module
//!
//! Definisce il modello dati di un job di upload e dei suoi esiti.
//!
//! ## Ciclo di vita:
//! - `MediaJob`: creato all'enqueue, posseduto dalla coda finché un worker
//!   non lo consuma nella fase di upload
//! - `UploadToken`: prodotto dalla fase 1, consumato esattamente una volta
//!   da una attach riuscita; se i retry si esauriscono il token viene
//!   scartato (il servizio remoto garbage-collecta i token mai attaccati)
//! - `AttachResult`: prodotto da una attach riuscita, immutabile
//! - `JobOutcome`: record terminale per il report di fine run

use crate::error::{AttachError, UploadError};
use crate::media_finder::MediaFinder;
use std::path::{Path, PathBuf};

/// One local file waiting to be uploaded and attached.
#[derive(Debug, Clone)]
pub struct MediaJob {
    /// Full path of the local file
    pub path: PathBuf,
    /// Display name sent to the remote library (basename of the path)
    pub display_name: String,
    /// File size in bytes, best effort (0 when the stat failed)
    pub size_bytes: u64,
}

impl MediaJob {
    pub fn new(path: PathBuf, size_bytes: u64) -> Self {
        let display_name = MediaFinder::display_name(&path);
        Self {
            path,
            display_name,
            size_bytes,
        }
    }
}

/// Opaque token returned by the upload endpoint. Represents bytes staged
/// on the remote service but not yet visible in the library.
#[derive(Debug, Clone)]
pub struct UploadToken {
    pub value: String,
    pub display_name: String,
}

/// Outcome of a successful attach call.
#[derive(Debug, Clone)]
pub struct AttachResult {
    /// Remote media item identifier
    pub item_id: String,
    /// Display name echoed back by the service
    pub display_name: String,
    /// HTTP status of the batchCreate call
    pub http_status: u16,
}

/// Terminal record for one job. Exactly one of these is produced per
/// dequeued job, success or failure.
#[derive(Debug)]
pub enum JobOutcome {
    /// Upload and attach both succeeded
    Attached {
        path: PathBuf,
        result: AttachResult,
        /// Number of failed attach attempts before the one that succeeded
        retries: u32,
        size_bytes: u64,
    },
    /// Phase 1 failed; attach was never attempted
    UploadFailed { path: PathBuf, error: UploadError },
    /// Phase 2 failed on every attempt up to the ceiling
    AttachExhausted {
        path: PathBuf,
        attempts: u32,
        error: AttachError,
    },
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Attached { .. })
    }

    /// Path of the file this outcome refers to
    pub fn path(&self) -> &Path {
        match self {
            JobOutcome::Attached { path, .. } => path,
            JobOutcome::UploadFailed { path, .. } => path,
            JobOutcome::AttachExhausted { path, .. } => path,
        }
    }
}
