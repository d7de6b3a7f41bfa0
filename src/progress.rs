//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche di upload.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Tracking statistiche di upload (file caricati, falliti, byte spediti)
//! - Report finale con elenco nominativo dei file falliti, così che un
//!   secondo passaggio possa essere limitato a quelli
//!
//! ## Statistiche tracciate:
//! - **files_processed**: Totale job arrivati a un esito terminale
//! - **files_uploaded**: Upload + attach riusciti
//! - **upload_failures**: Falliti in fase 1 (mai ritentati)
//! - **attach_exhausted**: Falliti in fase 2 dopo tutti i tentativi
//! - **total_bytes_uploaded**: Byte spediti con successo
//! - **failed_files**: Nomi dei file falliti, per il report finale
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:01:12] [====================>-------------------] 52/100 (52%) [OK] photo.jpg -> AIbE…
//! ```

use crate::job::{AttachResult, JobOutcome};
use crate::media_finder::MediaFinder;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for the upload run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Statistics tracker for upload results
#[derive(Debug, Default)]
pub struct UploadStats {
    pub files_processed: usize,
    pub files_uploaded: usize,
    pub upload_failures: usize,
    pub attach_exhausted: usize,
    pub total_bytes_uploaded: u64,
    pub failed_files: Vec<String>,
    /// Attach results of the successful jobs, for the end-of-run report
    pub attached: Vec<AttachResult>,
}

impl UploadStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one terminal job outcome into the counters
    pub fn record(&mut self, outcome: &JobOutcome) {
        self.files_processed += 1;

        match outcome {
            JobOutcome::Attached {
                result, size_bytes, ..
            } => {
                self.files_uploaded += 1;
                self.total_bytes_uploaded += size_bytes;
                self.attached.push(result.clone());
            }
            JobOutcome::UploadFailed { path, .. } => {
                self.upload_failures += 1;
                self.failed_files.push(MediaFinder::display_name(path));
            }
            JobOutcome::AttachExhausted { path, .. } => {
                self.attach_exhausted += 1;
                self.failed_files.push(MediaFinder::display_name(path));
            }
        }
    }

    pub fn failures(&self) -> usize {
        self.upload_failures + self.attach_exhausted
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Uploaded: {} | Failed: {} | Shipped: {}",
            self.files_processed,
            self.files_uploaded,
            self.failures(),
            MediaFinder::format_size(self.total_bytes_uploaded)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AttachError, UploadError};
    use crate::job::AttachResult;
    use std::path::PathBuf;

    #[test]
    fn test_stats_record_outcomes() {
        let mut stats = UploadStats::new();

        stats.record(&JobOutcome::Attached {
            path: PathBuf::from("/photos/a.jpg"),
            result: AttachResult {
                item_id: "id-1".to_string(),
                display_name: "a.jpg".to_string(),
                http_status: 200,
            },
            retries: 0,
            size_bytes: 2048,
        });
        stats.record(&JobOutcome::UploadFailed {
            path: PathBuf::from("/photos/b.jpg"),
            error: UploadError::EmptyToken,
        });
        stats.record(&JobOutcome::AttachExhausted {
            path: PathBuf::from("/photos/c.jpg"),
            attempts: 4,
            error: AttachError::EmptyBatch,
        });

        assert_eq!(stats.files_processed, 3);
        assert_eq!(stats.files_uploaded, 1);
        assert_eq!(stats.upload_failures, 1);
        assert_eq!(stats.attach_exhausted, 1);
        assert_eq!(stats.failures(), 2);
        assert_eq!(stats.total_bytes_uploaded, 2048);
        assert_eq!(stats.failed_files, vec!["b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_summary_mentions_counts() {
        let mut stats = UploadStats::new();
        stats.record(&JobOutcome::Attached {
            path: PathBuf::from("a.jpg"),
            result: AttachResult {
                item_id: "id-1".to_string(),
                display_name: "a.jpg".to_string(),
                http_status: 200,
            },
            retries: 1,
            size_bytes: 1024,
        });

        let summary = stats.format_summary();
        assert!(summary.contains("Processed: 1 files"));
        assert!(summary.contains("Uploaded: 1"));
        assert!(summary.contains("Failed: 0"));
    }
}
