use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use cell_monitor::config::DashboardConfig;
use cell_monitor::console::{execute, parse_command, render, Command, HELP};
use cell_monitor::session::Session;
use cell_monitor::temperature::SeededTemperature;

/// Console front end for the battery cell monitor.
#[derive(Parser, Debug)]
#[command(name = "cell_monitor_console", version)]
struct Args {
    /// Seed for the simulated cell temperatures (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the dashboard limits
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            DashboardConfig::from_json(&text)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => DashboardConfig::default(),
    };

    let seed = match args.seed {
        Some(seed) => seed,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64,
    };
    let temperature = SeededTemperature::new(seed, config.temperature_range_c);
    let mut session = Session::new(config, temperature);

    println!("Battery Cell Monitor (seed {})", seed);
    println!("{}", HELP);
    println!("{}", render(&session));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => println!("{}", execute(&mut session, &command)),
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}
