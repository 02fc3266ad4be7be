//! Count the regions of a puzzle file that can hold their presents.
//! Usage:
//!
//! ```bash
//! RUST_LOG=info cargo run --release --example present_packing puzzle.txt
//! ```
//!
//! Pass `--verbose` after the path to print the verdict of every region.

use present_packing::{parse_puzzle, Evaluator};
use std::{error::Error, fs};

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("puzzle file needed");
        std::process::exit(1);
    }
    let verbose = args[2..].iter().any(|arg| arg == "--verbose");

    let input = fs::read_to_string(&args[1])?;
    let puzzle = parse_puzzle(&input)?;
    let evaluator = Evaluator::new(&puzzle.shapes);

    if verbose {
        for (index, region) in puzzle.regions.iter().enumerate() {
            let evaluation = evaluator.evaluate(region)?;
            println!(
                "{index}: {}x{} {:?} via {:?}",
                region.width(),
                region.height(),
                evaluation.verdict,
                evaluation.tier
            );
        }
    }

    let count = evaluator.count_fitting_parallel(&puzzle.regions)?;
    log::info!("{count} of {} regions fit", puzzle.regions.len());
    println!("{count}");

    Ok(())
}
