//! Confidence ellipses and DBSCAN over a simulated stationary receiver.
//!
//! Run with `RUST_LOG=fixspread=debug` to see the intermediate statistics.

use fixspread::{points_from_fixes, AnalysisConfig, AnalysisRunner, Dbscan, Fix, PointMultiset};
use rand::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Reference location the offsets are measured from.
    let origin = Fix::new(55.653_42, 37.551_96);

    let mut rng = StdRng::seed_from_u64(7);
    let mut fixes = Vec::new();
    for _ in 0..200 {
        // Receivers report on a 1e-6 degree grid, so repeats are common.
        let dlat = (rng.random::<f64>() * 4.0).round() * 1e-6;
        let dlon = (rng.random::<f64>() * 3.0).round() * 1e-6;
        fixes.push(Fix::new(origin.latitude + dlat, origin.longitude + dlon + 0.5 * dlat));
    }
    for _ in 0..6 {
        let dlat = (rng.random::<f64>() - 0.5) * 4e-5;
        let dlon = (rng.random::<f64>() - 0.5) * 4e-5;
        fixes.push(Fix::new(origin.latitude + dlat, origin.longitude + dlon));
    }
    let points = points_from_fixes(&fixes, origin);

    let config = AnalysisConfig {
        confidence_levels: vec![0.9, 0.99, 0.999_999, 0.999_999_999_999],
        clustering: vec![Dbscan::new(1.5e-6, 5), Dbscan::new(5e-6, 3)],
    };
    let runner = match AnalysisRunner::new(config) {
        Ok(runner) => runner,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(2);
        }
    };
    let report = runner.run(&points);

    println!("{} fixes", report.n_points);
    if let Some(mean) = report.mean {
        println!("mean offset: ({:.3e}, {:.3e}) deg", mean.x, mean.y);
    }

    println!("\n=== Confidence ellipses ===");
    for record in &report.ellipses {
        match &record.outcome {
            Ok(result) => {
                let tally = PointMultiset::with_flags(&points, &result.inside)
                    .expect("one flag per point");
                let reliable = tally.entries().iter().filter(|e| e.all_flagged()).count();
                println!(
                    "  {:<16} alpha {:+.4} rad  a {:.3e}  b {:.3e}  inside {:3}/{}  ({} of {} locations)",
                    record.confidence,
                    result.alpha,
                    result.ellipse.a,
                    result.ellipse.b,
                    result.inside_count(),
                    points.len(),
                    reliable,
                    tally.len(),
                );
            }
            Err(err) => println!("  {:<16} failed: {}", record.confidence, err),
        }
    }

    println!("\n=== DBSCAN ===");
    for record in &report.clusterings {
        match &record.outcome {
            Ok(result) => {
                let largest = result.largest().map_or(0, |c| c.len());
                println!(
                    "  eps {:.1e}  min_pts {}  => {} clusters (largest {}), {} noise",
                    record.params.epsilon(),
                    record.params.min_pts(),
                    result.n_clusters(),
                    largest,
                    result.noise.len(),
                );
            }
            Err(err) => println!("  failed: {}", err),
        }
    }

    let json = serde_json::to_string_pretty(runner.config()).expect("config serializes");
    println!("\nconfiguration:\n{json}");
}
