//! # Google Photos Bulk Uploader - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Risoluzione delle credenziali (access token)
//! - Creazione della configurazione e avvio dell'uploader
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (directory, workers, retry, etc.)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Valida che la directory media esista
//! 4. Risolve l'access token (env, file, oppure anonimo in dry-run)
//! 5. Istanzia BulkUploader e avvia il processo di upload
//!
//! ## Esempio di utilizzo:
//! ```bash
//! GPHOTOS_ACCESS_TOKEN=ya29.… gphotos-uploader /path/to/media --workers 10 --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use gphotos_bulk_uploader::{BulkUploader, Config, Credentials, PhotosClient};

#[derive(Parser)]
#[command(name = "gphotos-uploader")]
#[command(about = "Bulk upload local media to Google Photos with parallel workers")]
struct Args {
    /// Directory containing media files to upload
    media_directory: PathBuf,

    /// Number of parallel upload workers
    #[arg(short, long, default_value = "10")]
    workers: usize,

    /// Capacity of the pending-job queue
    #[arg(short, long, default_value = "10")]
    queue_capacity: usize,

    /// Total attach attempts per file (1 initial + retries)
    #[arg(long, default_value = "4")]
    attach_attempts: u32,

    /// Delay between attach attempts in milliseconds
    #[arg(long, default_value = "0")]
    retry_delay_ms: u64,

    /// File containing the OAuth2 access token
    #[arg(short, long)]
    token_file: Option<PathBuf>,

    /// Dry run - list candidate files without uploading
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    dotenvy::dotenv().ok();

    // Validate arguments
    if !args.media_directory.exists() {
        return Err(anyhow::anyhow!(
            "Media directory does not exist: {}",
            args.media_directory.display()
        ));
    }
    if !args.media_directory.is_dir() {
        return Err(anyhow::anyhow!(
            "Media path is not a directory: {}",
            args.media_directory.display()
        ));
    }

    let config = Config {
        workers: args.workers,
        queue_capacity: args.queue_capacity,
        max_attach_attempts: args.attach_attempts,
        retry_delay_ms: args.retry_delay_ms,
        dry_run: args.dry_run,
        ..Default::default()
    };

    // Dry runs never touch the network, so no token is required
    let credentials = if args.dry_run {
        Credentials::anonymous()
    } else {
        Credentials::resolve(args.token_file.as_deref()).await?
    };

    let client = PhotosClient::new(credentials.access_token, &config)?;
    let uploader = BulkUploader::new(config, Arc::new(client))?;
    let stats = uploader.run(&args.media_directory).await?;

    if stats.failures() > 0 {
        std::process::exit(1);
    }

    Ok(())
}
