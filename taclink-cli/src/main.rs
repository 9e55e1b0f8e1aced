//! TacLink CLI - listens for datalink traffic and reports the live picture.
//!
//! Binds the configured UDP port, feeds every decoded datagram into the
//! reconciliation engine, and prints a periodic status summary until
//! interrupted.

mod error;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

use taclink::config::{load_config, Config, DEFAULT_CONFIG_FILE};
use taclink::ingest::{DatalinkReceiver, ReceiverConfig};
use taclink::logging::init_logging;
use taclink::picture::{PictureProvider, SharedPicture};

use error::CliError;

#[derive(Parser)]
#[command(name = "taclink")]
#[command(about = "Decode tactical datalink traffic into a live picture", long_about = None)]
#[command(version = taclink::VERSION)]
struct Args {
    /// Config file path (default: taclink.ini in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// UDP port to listen on (overrides the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides the config file)
    #[arg(long)]
    bind_address: Option<String>,

    /// Seconds between status summaries
    #[arg(long, default_value = "5")]
    status_interval: u64,
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        e.exit();
    }
}

#[tokio::main]
async fn run(args: Args) -> Result<(), CliError> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = load_config(&config_path)?;
    apply_overrides(&mut config, &args);

    let _logging_guard = init_logging(&config.logging.directory, &config.logging.file)
        .map_err(CliError::LoggingInit)?;

    info!(version = taclink::VERSION, "TacLink starting");

    let (broadcast_tx, _) = broadcast::channel(16);
    let picture = SharedPicture::new(broadcast_tx);

    let (batch_tx, mut batch_rx) = mpsc::channel(64);
    let receiver = DatalinkReceiver::new(
        ReceiverConfig {
            bind_address: config.receiver.bind_address.clone(),
            port: config.receiver.port,
            recv_timeout: config.receiver.recv_timeout,
        },
        batch_tx,
    );
    let receiver_port = receiver.port();
    let mut receiver_handle = receiver.start();

    println!("Listening for datalink traffic on port {}", receiver_port);
    println!("Press Ctrl-C to stop");

    let mut status_interval = tokio::time::interval(Duration::from_secs(args.status_interval));
    status_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            batch = batch_rx.recv() => {
                match batch {
                    Some(batch) => {
                        picture.ingest(&batch.records);
                    }
                    None => {
                        warn!("Receiver channel closed");
                        break;
                    }
                }
            }
            result = &mut receiver_handle => {
                // The receiver only returns early on a bind failure.
                match result {
                    Ok(Ok(())) => break,
                    Ok(Err(e)) => return Err(e.into()),
                    Err(e) => {
                        warn!(error = %e, "Receiver task panicked");
                        break;
                    }
                }
            }
            _ = status_interval.tick() => {
                print_status(&picture);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    print_status(&picture);
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(port) = args.port {
        config.receiver.port = port;
    }
    if let Some(bind_address) = &args.bind_address {
        config.receiver.bind_address = bind_address.clone();
    }
}

fn print_status(picture: &SharedPicture) {
    let snapshot = picture.snapshot();
    println!(
        "datagrams={} entities={} threats={} engagements={} tracks={} geo={}",
        snapshot.datagrams_ingested,
        snapshot.entity_count(),
        snapshot.threat_count(),
        snapshot.engagements.len(),
        snapshot.target_tracks.len(),
        snapshot.geo_messages.len(),
    );
}
