//! # Job Queue Module
//!
//! Coda bounded produttore/consumatore dei job di upload.
//!
//! ## Disciplina:
//! - Un solo produttore (l'orchestratore), N consumatori (i worker)
//! - Capacità fissa: l'enqueue si blocca quando la coda è piena,
//!   fornendo backpressure naturale verso il produttore
//! - Chiusura una volta sola: `JobProducer::close` consuma l'handle,
//!   quindi un enqueue dopo la chiusura non può nemmeno compilare
//! - Coda chiusa e drenata: `next_job` restituisce `None` e il worker
//!   termina in modo pulito

use crate::job::MediaJob;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Factory for the bounded job channel
pub struct JobQueue;

impl JobQueue {
    /// Create a bounded queue with the given capacity. Capacity must be
    /// greater than zero (enforced by `Config::validate`).
    pub fn bounded(capacity: usize) -> (JobProducer, JobConsumer) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            JobProducer { tx },
            JobConsumer {
                rx: Arc::new(Mutex::new(rx)),
            },
        )
    }
}

/// Producing side of the queue. Held only by the orchestrator.
pub struct JobProducer {
    tx: mpsc::Sender<MediaJob>,
}

impl JobProducer {
    /// Enqueue one job, waiting while the queue is full. Fails only when
    /// every consumer is gone, which means the worker pool collapsed and
    /// the run cannot continue.
    pub async fn enqueue(&self, job: MediaJob) -> Result<()> {
        self.tx
            .send(job)
            .await
            .map_err(|e| anyhow::anyhow!("job queue has no consumers left: {}", e.0.display_name))
    }

    /// Close the queue. Consumes the producer so no further enqueue is
    /// possible; workers observe the closure once the queue drains.
    pub fn close(self) {}
}

/// Consuming side of the queue, shared by all workers.
#[derive(Clone)]
pub struct JobConsumer {
    rx: Arc<Mutex<mpsc::Receiver<MediaJob>>>,
}

impl JobConsumer {
    /// Pull the next job, waiting while the queue is empty but open.
    /// Returns `None` once the queue is closed and drained.
    pub async fn next_job(&self) -> Option<MediaJob> {
        self.rx.lock().await.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn job(name: &str) -> MediaJob {
        MediaJob::new(PathBuf::from(name), 0)
    }

    #[tokio::test]
    async fn test_enqueue_blocks_when_full() {
        let (producer, _consumer) = JobQueue::bounded(2);

        producer.enqueue(job("a.jpg")).await.unwrap();
        producer.enqueue(job("b.jpg")).await.unwrap();

        // Third enqueue must park until a consumer drains an entry
        let blocked =
            tokio::time::timeout(Duration::from_millis(50), producer.enqueue(job("c.jpg"))).await;
        assert!(blocked.is_err());
    }

    #[tokio::test]
    async fn test_enqueue_resumes_after_drain() {
        let (producer, consumer) = JobQueue::bounded(1);

        producer.enqueue(job("a.jpg")).await.unwrap();

        let drained = consumer.next_job().await.unwrap();
        assert_eq!(drained.display_name, "a.jpg");

        // Room again: this enqueue completes immediately
        tokio::time::timeout(Duration::from_millis(50), producer.enqueue(job("b.jpg")))
            .await
            .expect("enqueue should not block after drain")
            .unwrap();
    }

    #[tokio::test]
    async fn test_closed_and_drained_queue_yields_none() {
        let (producer, consumer) = JobQueue::bounded(4);

        producer.enqueue(job("a.jpg")).await.unwrap();
        producer.close();

        assert!(consumer.next_job().await.is_some());
        assert!(consumer.next_job().await.is_none());

        // Every cloned consumer observes the closure
        let other = consumer.clone();
        assert!(other.next_job().await.is_none());
    }

    #[tokio::test]
    async fn test_enqueue_fails_when_consumers_are_gone() {
        let (producer, consumer) = JobQueue::bounded(1);
        drop(consumer);

        assert!(producer.enqueue(job("a.jpg")).await.is_err());
    }
}
