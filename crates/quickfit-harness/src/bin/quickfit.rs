//! CLI entrypoint for the quick-fit allocator simulator.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use quickfit_harness::Script;
use quickfit_harness::session;

/// Quick-fit allocator simulator.
#[derive(Debug, Parser)]
#[command(name = "quickfit")]
#[command(about = "Simulates a quick-fit memory allocator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run an interactive session on stdin/stdout.
    Run {
        /// Initial size classes; prompted for when omitted.
        #[arg(long, value_name = "SIZE", num_args = 1..)]
        sizes: Option<Vec<usize>>,
    },
    /// Replay a JSON operation script and emit a JSON outcome report.
    Replay {
        /// Script path.
        #[arg(long)]
        script: PathBuf,
        /// Report output path; printed to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { sizes } => {
            let mut stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            session::run_session(&mut stdin, &mut stdout, sizes)?;
        }
        Command::Replay { script, output } => {
            let report = Script::from_file(&script)?.run();
            let json = report.to_json()?;
            match output {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}
