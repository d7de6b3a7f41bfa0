//! # Upload Worker Module
//!
//! Worker per l'elaborazione di singoli job: fase di upload seguita,
//! solo in caso di successo, dalla fase di attach con retry limitato.
//! Separato dall'orchestratore principale per maggiore modularità.

use crate::client::MediaLibrary;
use crate::config::Config;
use crate::job::{JobOutcome, MediaJob, UploadToken};
use crate::progress::ProgressManager;
use crate::queue::JobConsumer;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry policy for the attach phase. The upload phase is never retried:
/// its request body consumes the file stream.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attach attempts per job (1 initial + retries)
    pub max_attempts: u32,
    /// Wait between attempts. Zero means an immediate retry, which can
    /// hammer the remote service on sustained failure; deployments that
    /// care should configure a real delay.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attach_attempts,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

/// One worker of the pool. Workers share nothing mutable beyond the job
/// queue; the library handle is read-only and safe for concurrent use.
pub struct UploadWorker {
    id: usize,
    library: Arc<dyn MediaLibrary>,
    retry: RetryPolicy,
}

impl UploadWorker {
    pub fn new(id: usize, library: Arc<dyn MediaLibrary>, retry: RetryPolicy) -> Self {
        Self { id, library, retry }
    }

    /// Pull jobs until the queue is closed and drained, recording one
    /// terminal outcome per job. Job-level failures never escape this
    /// loop; they become outcomes and the worker moves on.
    pub async fn run(&self, consumer: JobConsumer, progress: ProgressManager) -> Vec<JobOutcome> {
        let mut outcomes = Vec::new();

        while let Some(job) = consumer.next_job().await {
            let outcome = self.process_job(&job).await;

            let message = match &outcome {
                JobOutcome::Attached {
                    result, retries, ..
                } => {
                    debug!(
                        "Worker {}: added {} as {}",
                        self.id, result.display_name, result.item_id
                    );
                    if *retries > 0 {
                        format!("[OK] {} (after {} retries)", job.display_name, retries)
                    } else {
                        format!("[OK] {}", job.display_name)
                    }
                }
                JobOutcome::UploadFailed { error, .. } => {
                    warn!(
                        "Worker {}: upload failed for {}: {}",
                        self.id, job.display_name, error
                    );
                    format!("[ERROR] {}: upload failed", job.display_name)
                }
                JobOutcome::AttachExhausted {
                    attempts, error, ..
                } => {
                    warn!(
                        "Worker {}: attach failed for {} after {} attempts: {}",
                        self.id, job.display_name, attempts, error
                    );
                    format!(
                        "[ERROR] {}: attach failed after {} attempts",
                        job.display_name, attempts
                    )
                }
            };
            progress.update(&message);

            outcomes.push(outcome);
        }

        debug!("Worker {}: queue closed and drained, exiting", self.id);
        outcomes
    }

    /// Run one job through both phases. The attach phase is only entered
    /// when the upload phase produced a token.
    pub async fn process_job(&self, job: &MediaJob) -> JobOutcome {
        let token = match self.library.upload_media(job).await {
            Ok(token) => token,
            Err(error) => {
                return JobOutcome::UploadFailed {
                    path: job.path.clone(),
                    error,
                };
            }
        };

        self.attach_with_retry(job, token).await
    }

    /// Attach with a bounded number of attempts, re-using the same token
    /// each time. Tokens stay valid across attach calls within the remote
    /// service's TTL.
    async fn attach_with_retry(&self, job: &MediaJob, token: UploadToken) -> JobOutcome {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.library.attach_media(&token).await {
                Ok(result) => {
                    return JobOutcome::Attached {
                        path: job.path.clone(),
                        result,
                        retries: attempt - 1,
                        size_bytes: job.size_bytes,
                    };
                }
                Err(error) => {
                    if attempt >= self.retry.max_attempts {
                        return JobOutcome::AttachExhausted {
                            path: job.path.clone(),
                            attempts: attempt,
                            error,
                        };
                    }

                    debug!(
                        "Worker {}: attach attempt {}/{} failed for {}: {}, retrying",
                        self.id, attempt, self.retry.max_attempts, job.display_name, error
                    );

                    if !self.retry.delay.is_zero() {
                        tokio::time::sleep(self.retry.delay).await;
                    }
                }
            }
        }
    }
}
