//! # Uploader Module
//!
//! Modulo che separa le responsabilità dell'upload in sottomoduli:
//! - `bulk_uploader`: Orchestratore principale (discovery, coda, pool)
//! - `worker`: Worker per singoli job (upload -> attach con retry)

pub mod bulk_uploader;
pub mod worker;

pub use bulk_uploader::BulkUploader;
pub use worker::{RetryPolicy, UploadWorker};
