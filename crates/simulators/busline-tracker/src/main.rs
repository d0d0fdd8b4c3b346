use clap::Parser;
use log::error;

use busline_runner::runner::{run_headless, run_map};

use crate::simulation::builder::SimulationBuilder;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

pub(crate) mod simulation;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct CliArgs {
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: String,
    /// Moves the buses for the given number of ticks without opening the map.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

fn main() {
    let args = CliArgs::parse();
    let start = std::time::Instant::now();
    let mut builder = SimulationBuilder::new(&args.config);
    let mut context = builder.build();

    let result = match args.headless {
        Some(ticks) => run_headless(&mut context, ticks),
        None => run_map(
            context,
            builder.metadata(),
            builder.renderer(),
            builder.tick_interval(),
        ),
    };
    if let Err(e) = result {
        error!("Tracker stopped with an error: {}", e);
        eprintln!("Tracker stopped with an error: {}", e);
        std::process::exit(1);
    }
    let elapsed = start.elapsed();
    println!("Tracker finished in {} ms.", elapsed.as_millis());
}
