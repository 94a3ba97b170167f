//! VitalRoute CLI - Command-line demo runner
//!
//! This binary drives the dispatch pipeline with a scripted drive: fixes
//! flow through the significance gate, facility searches track the moving
//! position, and the nearest facility is targeted at the end of the run.

mod error;
mod sim;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use vitalroute::config::ConfigFile;
use vitalroute::facility::{FetchStatus, PlacesClient, StaticCatalog};
use vitalroute::geo::GeoPoint;
use vitalroute::logging::init_logging;
use vitalroute::route::{directions_url, DeepLinkHandoff};
use vitalroute::service::{DispatchService, ServiceConfig};

use error::CliError;
use sim::ScriptedDrive;

#[derive(Parser)]
#[command(name = "vitalroute")]
#[command(about = "Run the ambulance dispatch pipeline on a scripted drive", long_about = None)]
struct Args {
    /// Path to an INI config file (default: ~/.vitalroute/config.ini)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting latitude in decimal degrees
    #[arg(long, default_value = "17.385044")]
    lat: f64,

    /// Starting longitude in decimal degrees
    #[arg(long, default_value = "78.486671")]
    lon: f64,

    /// Significance threshold override in meters
    #[arg(long)]
    threshold_meters: Option<f64>,

    /// Facility search radius override in meters
    #[arg(long)]
    radius_meters: Option<f64>,

    /// Places API key (without one, the built-in demo catalog is searched)
    #[arg(long)]
    api_key: Option<String>,

    /// Number of significant hops in the scripted drive
    #[arg(long, default_value = "8")]
    steps: u32,

    /// Length of each hop in meters
    #[arg(long, default_value = "120")]
    step_meters: f64,

    /// Time per hop in milliseconds
    #[arg(long, default_value = "500")]
    interval_ms: u64,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        e.exit();
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let start = GeoPoint::new(args.lat, args.lon)
        .map_err(|e| CliError::InvalidArgument(e.to_string()))?;
    if !args.step_meters.is_finite() || args.step_meters <= 0.0 {
        return Err(CliError::InvalidArgument(
            "step-meters must be a positive number".to_string(),
        ));
    }

    let mut config = match &args.config {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };

    // Command-line overrides beat the config file
    if let Some(threshold) = args.threshold_meters {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(CliError::InvalidArgument(
                "threshold-meters must be a non-negative number".to_string(),
            ));
        }
        config.sampler.threshold_meters = threshold;
    }
    if let Some(radius) = args.radius_meters {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CliError::InvalidArgument(
                "radius-meters must be a positive number".to_string(),
            ));
        }
        config.search.radius_meters = radius;
    }
    if args.api_key.is_some() {
        config.search.api_key = args.api_key.clone();
    }

    let _logging_guard = init_logging(&config.logging.file).map_err(CliError::LoggingInit)?;
    info!(version = vitalroute::VERSION, "VitalRoute CLI starting");

    let service_config = ServiceConfig::from_config_file(&config);
    let interval = Duration::from_millis(args.interval_ms);
    let source = Arc::new(ScriptedDrive::new(
        start,
        args.steps,
        args.step_meters,
        interval,
    ));
    let handoff = Arc::new(DeepLinkHandoff);

    println!("VitalRoute dispatch demo");
    println!("  Start: {:.6}, {:.6}", args.lat, args.lon);
    println!(
        "  Drive: {} hops of {:.0} m every {} ms",
        args.steps, args.step_meters, args.interval_ms
    );
    println!(
        "  Gate: {:.0} m threshold, {:.0} m search radius",
        config.sampler.threshold_meters, config.search.radius_meters
    );

    let service = match config.search.api_key.clone() {
        Some(key) => {
            println!("  Provider: Places API");
            let places = PlacesClient::new(
                config.search.endpoint.clone(),
                Some(key),
                Duration::from_secs(config.search.timeout_secs),
            );
            DispatchService::start(service_config, source, places, handoff)
        }
        None => {
            let catalog = StaticCatalog::demo();
            println!(
                "  Provider: built-in demo catalog ({} facilities)",
                catalog.len()
            );
            DispatchService::start(service_config, source, catalog, handoff)
        }
    };

    println!();
    println!("Driving...");

    // Print accepted fixes until the drive stays quiet
    let mut locations = service.subscribe_locations();
    let idle_limit = interval * 4 + Duration::from_millis(200);
    loop {
        match tokio::time::timeout(idle_limit, locations.recv()).await {
            Ok(Ok(sample)) => {
                println!(
                    "  {} fix accepted: {:.5}, {:.5}",
                    chrono::Local::now().format("%H:%M:%S"),
                    sample.point.latitude,
                    sample.point.longitude
                );
            }
            Ok(Err(_)) | Err(_) => break,
        }
    }

    // Give the final search a moment to land
    let board = service.facility_board();
    for _ in 0..50 {
        if board.snapshot().status != FetchStatus::Loading {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let snap = board.snapshot();
    println!();
    println!("{}", snap.status_line());
    for (index, facility) in snap.facilities.iter().enumerate() {
        println!("  {}. {}", index + 1, facility);
    }

    if let Some(nearest) = snap.facilities.first() {
        match service.select_facility(&nearest.id).await {
            Ok(selected) => {
                println!();
                println!("Selected nearest facility: {}", selected.name);
                if let Some(last) = service.position_status().snapshot().last_accepted {
                    println!("  Route: {}", directions_url(last.point, selected.location));
                }
            }
            Err(e) => eprintln!("Could not select a facility: {}", e),
        }
    }

    let fixes = service.sampler_stats().snapshot();
    let searches = service.refresh_stats().snapshot();
    println!();
    println!("Session stats:");
    println!(
        "  Fixes: {} received, {} accepted, {} rejected",
        fixes.fixes_received, fixes.fixes_accepted, fixes.fixes_rejected
    );
    println!(
        "  Searches: {} issued, {} applied, {} superseded, {} failed",
        searches.searches_issued,
        searches.results_applied,
        searches.stale_discarded,
        searches.searches_failed
    );

    service.shutdown().await;
    info!("VitalRoute CLI finished");
    println!();
    println!("✓ Done");
    Ok(())
}
