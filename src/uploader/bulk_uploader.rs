//! # Bulk Uploader Main Orchestrator
//!
//! Orchestratore principale che delega responsabilità ai moduli
//! specializzati: discovery dei file, coda bounded, worker pool,
//! aggregazione degli esiti e report finale.
//!
//! ## Flusso:
//! 1. Discovery dei file media nella directory indicata
//! 2. Avvio di N worker che condividono la coda e il client
//! 3. Enqueue di tutti i job (bloccante quando la coda è piena)
//! 4. Chiusura della coda e join di tutti i worker
//! 5. Report finale con i conteggi e l'elenco dei file falliti

use crate::client::MediaLibrary;
use crate::config::Config;
use crate::job::MediaJob;
use crate::media_finder::MediaFinder;
use crate::progress::{ProgressManager, UploadStats};
use crate::queue::JobQueue;
use crate::uploader::worker::{RetryPolicy, UploadWorker};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main orchestrator for a bulk upload run
pub struct BulkUploader {
    config: Config,
    library: Arc<dyn MediaLibrary>,
}

impl BulkUploader {
    /// Create a new uploader. The library handle is shared read-only by
    /// every worker.
    pub fn new(config: Config, library: Arc<dyn MediaLibrary>) -> Result<Self> {
        config.validate()?;

        Ok(Self { config, library })
    }

    /// Run the upload process over every supported media file under
    /// `media_dir`. Job-level failures are folded into the returned
    /// statistics; only orchestrator-level failures (queue collapse,
    /// worker panic) abort the run.
    pub async fn run(&self, media_dir: &Path) -> Result<UploadStats> {
        let start_time = std::time::Instant::now();

        let files = MediaFinder::find_media_files(media_dir)?;

        info!("Starting media upload from: {}", media_dir.display());
        self.log_configuration(&files);

        if files.is_empty() {
            info!("No media files found to upload");
            return Ok(UploadStats::new());
        }

        if self.config.dry_run {
            for file in &files {
                info!("[DRY RUN] would upload {}", file.display());
            }
            info!("[DRY RUN] {} files, nothing uploaded", files.len());
            return Ok(UploadStats::new());
        }

        let (producer, consumer) = JobQueue::bounded(self.config.queue_capacity);
        let progress = ProgressManager::new(files.len() as u64);
        let retry = RetryPolicy::from_config(&self.config);

        let mut handles = Vec::with_capacity(self.config.workers);
        for worker_id in 0..self.config.workers {
            let worker = UploadWorker::new(worker_id, Arc::clone(&self.library), retry);
            let consumer = consumer.clone();
            let progress = progress.clone();

            handles.push(tokio::spawn(
                async move { worker.run(consumer, progress).await },
            ));
        }
        drop(consumer);

        // Single producer: feed every discovered file, then close the
        // queue so workers terminate once it drains.
        for path in files {
            let size_bytes = tokio::fs::metadata(&path).await.map(|m| m.len()).unwrap_or(0);
            producer.enqueue(MediaJob::new(path, size_bytes)).await?;
        }
        producer.close();

        let mut stats = UploadStats::new();
        for handle in handles {
            let outcomes = handle.await?;
            for outcome in &outcomes {
                stats.record(outcome);
            }
        }

        progress.finish(&stats.format_summary());
        self.report(&stats, start_time.elapsed().as_secs_f64());

        Ok(stats)
    }

    /// Logga configurazione della run
    fn log_configuration(&self, files: &[std::path::PathBuf]) {
        info!("Found {} media files to upload", files.len());
        info!(
            "Workers: {} | Queue capacity: {} | Attach attempts: {} | Retry delay: {}ms",
            self.config.workers,
            self.config.queue_capacity,
            self.config.max_attach_attempts,
            self.config.retry_delay_ms
        );

        if self.config.dry_run {
            info!("Dry run mode: no files will be uploaded");
        }
    }

    /// Stampa il report finale
    fn report(&self, stats: &UploadStats, duration: f64) {
        info!("=== Upload Complete ===");
        info!("Files processed: {}", stats.files_processed);
        info!("Files uploaded: {}", stats.files_uploaded);
        info!("Upload failures: {}", stats.upload_failures);
        info!("Attach failures: {}", stats.attach_exhausted);
        info!(
            "Bytes shipped: {}",
            MediaFinder::format_size(stats.total_bytes_uploaded)
        );
        info!("Elapsed: {:.1}s", duration);

        for result in &stats.attached {
            debug!("Added {} as {}", result.display_name, result.item_id);
        }

        if !stats.failed_files.is_empty() {
            warn!("Failed files (retry with a run scoped to these):");
            for name in &stats.failed_files {
                warn!("  - {}", name);
            }
        }
    }
}
