//! Eventide CLI
//!
//! Entry point for the demonstration runner. Parses CLI arguments and
//! delegates to the DemoRuntime for execution.

use clap::Parser as ClapParser;
use demo_cli::{Cli, CliError, DemoOptions, DemoRuntime};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.list {
        for name in DemoRuntime::demos() {
            println!("{name}");
        }
        return Ok(());
    }

    let options = DemoOptions {
        file: cli.file,
        url: cli.url,
    };
    let mut runtime = DemoRuntime::new(options)?;

    if let Some(demo) = cli.demo {
        match runtime.run_demo(&demo) {
            Ok(()) => runtime.finish(),
            Err(CliError::UnknownDemo(name)) => {
                eprintln!("Error: unknown demonstration '{}'", name);
                eprintln!("Run 'eventide --list' to see what is available.");
                std::process::exit(2);
            }
            Err(CliError::Runtime(e)) => {
                runtime.finish();
                eprintln!("Runtime Error: {}", e);
                std::process::exit(1);
            }
        }
    } else if cli.all {
        match runtime.run_all() {
            Ok(()) => runtime.finish(),
            Err(e) => {
                runtime.finish();
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        // Default: show usage
        println!("Eventide v0.1.0");
        println!();
        println!("Usage:");
        println!("  eventide --demo <NAME>      Run one demonstration");
        println!("  eventide --all              Run every demonstration");
        println!("  eventide --list             List demonstrations");
        println!();
        println!("Run 'eventide --help' for more options.");
    }

    Ok(())
}
