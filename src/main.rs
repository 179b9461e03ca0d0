use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::task::JoinSet;
use tracing::{info, Level};

use clinicgate::admission::AdmissionLimiter;
use clinicgate::config::GateConfig;

#[derive(Parser, Debug)]
#[command(name = "clinicgate", about = "Drive the admission limiter with synthetic traffic")]
struct Args {
    /// Path to a YAML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Endpoint keys to drive
    #[arg(long, value_delimiter = ',', default_value = "owners,pets,vets")]
    keys: Vec<String>,

    /// Concurrent workers per key
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Requests each worker issues
    #[arg(long, default_value_t = 50)]
    requests: usize,

    /// Pause between requests, in milliseconds
    #[arg(long, default_value_t = 10)]
    pace_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    info!("Starting Clinicgate Admission Control");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => GateConfig::from_file(path)?,
        None => GateConfig::default(),
    };
    info!(
        max_requests = config.admission.max_requests,
        window_length_ms = config.admission.window_length_ms,
        "Configuration loaded"
    );

    let limiter = Arc::new(AdmissionLimiter::new(&config.admission));
    info!("Admission limiter initialized");

    let mut tasks = JoinSet::new();
    for key in &args.keys {
        for _ in 0..args.workers {
            let limiter = Arc::clone(&limiter);
            let key = key.clone();
            let requests = args.requests;
            let pace = Duration::from_millis(args.pace_ms);

            tasks.spawn(async move {
                let mut admitted = 0u64;
                let mut rejected = 0u64;
                for _ in 0..requests {
                    if limiter.check_limit(&key).is_admitted() {
                        admitted += 1;
                    } else {
                        rejected += 1;
                    }
                    tokio::time::sleep(pace).await;
                }
                (key, admitted, rejected)
            });
        }
    }

    let mut totals: std::collections::BTreeMap<String, (u64, u64)> = Default::default();
    while let Some(result) = tasks.join_next().await {
        let (key, admitted, rejected) = result?;
        let entry = totals.entry(key).or_default();
        entry.0 += admitted;
        entry.1 += rejected;
    }

    for (key, (admitted, rejected)) in &totals {
        info!(key = %key, admitted, rejected, "Workload complete");
    }

    info!("Clinicgate Admission Control stopped");
    Ok(())
}
