use anyhow::Result;
use log::{debug, error, info};
use rand::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use percolation_engine::{ConnectivityEngine, EdgeGrid, PercolationConfig, Snapshot};

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();

    info!("Starting Percolation Engine...");

    // --- Load Configuration ---
    let config = PercolationConfig::load("config.toml")?;
    debug!("Configuration: {:#?}", config);

    // --- Build Grid and Engine ---
    let mut rng = match config.grid.seed {
        Some(seed) => {
            info!("Using seed {}.", seed);
            StdRng::seed_from_u64(seed)
        }
        None => {
            info!("No seed configured, using OS entropy.");
            StdRng::from_os_rng()
        }
    };

    info!(
        "Building {}x{} edge grid ({} cells)...",
        config.grid.width,
        config.grid.height,
        config.grid.width as u64 * config.grid.height as u64
    );
    let build_start = Instant::now();
    let grid = EdgeGrid::new(config.grid.width, config.grid.height, &mut rng)?;
    let mut engine = ConnectivityEngine::new(grid, config.grid.initial_probability, &mut rng)?;
    info!(
        "Grid and initial labeling ready in {:.2} ms.",
        build_start.elapsed().as_secs_f64() * 1000.0
    );

    // --- Threshold Sweep ---
    let steps = config.sweep.steps;
    info!("Sweeping threshold over {} steps...", steps);
    let sweep_start = Instant::now();
    let mut snapshots = Vec::with_capacity(steps as usize + 1);

    for step in 0..=steps {
        let probability = step as f64 / steps as f64;
        let step_start = Instant::now();
        engine.set_probability(probability)?;
        let snapshot = Snapshot::measure(&engine);
        info!(
            "Step [{}/{}] p = {:.4} | Groups: {} | Largest: {} | Spans: {}/{} | Recompute: {:6.2} ms",
            step,
            steps,
            probability,
            snapshot.group_count,
            snapshot.largest_group,
            snapshot.spans_horizontal,
            snapshot.spans_vertical,
            step_start.elapsed().as_secs_f64() * 1000.0
        );
        snapshots.push(snapshot);
    }
    info!(
        "Sweep finished in {:.3} seconds.",
        sweep_start.elapsed().as_secs_f64()
    );

    // --- Save Recorded Data ---
    if config.output.save_snapshots {
        let output_format = config.output.format.as_deref().unwrap_or("json");
        match output_format {
            "csv" => write_csv(&config.output.base_filename, &snapshots),
            "json" => write_json(&config.output.base_filename, &snapshots),
            _ => {
                error!("Unknown output format: {}. Using JSON instead.", output_format);
                write_json(&config.output.base_filename, &snapshots);
            }
        }
    } else {
        info!("Skipping saving snapshots as per config (save_snapshots is false).");
    }

    info!("Sweep Complete.");
    Ok(())
}

fn write_json(base_filename: &str, snapshots: &[Snapshot]) {
    let filename = format!("{}_snapshots.json", base_filename);
    match File::create(&filename) {
        Ok(mut file) => match serde_json::to_string(snapshots) {
            Ok(json_string) => {
                if let Err(e) = file.write_all(json_string.as_bytes()) {
                    error!("Error writing snapshot JSON to file '{}': {}", filename, e);
                } else {
                    info!("All snapshots saved to {}", filename);
                }
            }
            Err(e) => error!("Error serializing snapshots to JSON: {}", e),
        },
        Err(e) => error!("Error creating snapshot file '{}': {}", filename, e),
    }
}

fn write_csv(base_filename: &str, snapshots: &[Snapshot]) {
    let filename = format!("{}_snapshots.csv", base_filename);
    match csv::Writer::from_path(&filename) {
        Ok(mut writer) => {
            let mut failed = false;
            for snapshot in snapshots {
                if let Err(e) = writer.serialize(snapshot) {
                    error!("Error writing snapshot CSV row: {}", e);
                    failed = true;
                    break;
                }
            }
            if !failed {
                if let Err(e) = writer.flush() {
                    error!("Error flushing CSV file '{}': {}", filename, e);
                } else {
                    info!("All snapshots saved to {}", filename);
                }
            }
        }
        Err(e) => error!("Error saving CSV file '{}': {}", filename, e),
    }
}
