use buoy_processor::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(buoy_processor::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Buoy Processor - Ocean Buoy ASCII Time Series Loader");
    println!("====================================================");
    println!();
    println!("Load loosely structured ASCII exports from buoy networks (CEFAS .csv,");
    println!("WCO .txt) into per-variable series with a reconstructed time axis.");
    println!();
    println!("USAGE:");
    println!("    buoy-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    inspect        Load buoy files and summarize variables and time axes");
    println!("    stations       List station metadata from a buoy database");
    println!("    observations   Extract observation fields for one site table");
    println!("    help           Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Inspect a directory of exports for site L4:");
    println!("    buoy-processor inspect data/wco --site L4 --locations sites.txt");
    println!();
    println!("    # Inspect a CEFAS export and print JSON:");
    println!("    buoy-processor inspect west_gabbard.csv --output-format json");
    println!();
    println!("    # Station metadata and observations from a buoy database:");
    println!("    buoy-processor stations --db buoys.db");
    println!("    buoy-processor observations --db buoys.db --table hastings_wavenet_site \\");
    println!("                                --fields Depth,Temperature");
    println!();
    println!("For detailed help on any command, use:");
    println!("    buoy-processor <COMMAND> --help");
}
