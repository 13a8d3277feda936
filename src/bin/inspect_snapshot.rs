//! Reader for frame snapshots
//!
//! Loads a JSON file written with the S key and prints the map, the pose and
//! a per-column breakdown of the cast.

use log::error;
use rustcaster::snapshot::FrameSnapshot;
use std::env;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <frame_snapshot.json> [column ...]", args[0]);
        eprintln!("Prints a summary of a saved frame and the rays for the given columns");
        std::process::exit(1);
    }

    let filename = &args[1];
    let snapshot = match FrameSnapshot::load_from_file(filename) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("{}: {}", filename, e);
            std::process::exit(1);
        }
    };

    println!("=== Frame Snapshot: {} ===", filename);
    print!("{}", snapshot.map);
    println!();
    print!("{}", snapshot.summary());

    let columns: Vec<usize> = args[2..].iter().filter_map(|a| a.parse().ok()).collect();
    if columns.is_empty() {
        return;
    }

    println!("\n{:>6} {:>9} {:>10} {:>10} {:>10} {:>9} {}", "column", "angle", "hit_x", "hit_y", "distance", "height", "line");
    for column in columns {
        let (Some(ray), Some(projection)) = (snapshot.rays.get(column), snapshot.columns.get(column)) else {
            println!("{:>6} out of range (0..{})", column, snapshot.rays.len());
            continue;
        };
        let line = if !ray.struck_wall {
            "none"
        } else if ray.hit_on_vertical_line {
            "vertical"
        } else {
            "horizontal"
        };
        println!(
            "{:>6} {:>9.3} {:>10.2} {:>10.2} {:>10.2} {:>9.2} {}",
            column,
            ray.angle.to_degrees(),
            ray.hit_x,
            ray.hit_y,
            ray.distance,
            projection.height,
            line
        );
    }
}
