//! `jq-json` — query or rewrite a JSON object read from stdin.
//!
//! Usage:
//!   jq-json [--indent <S>] [--prefix <S>] [--escape-html] <get|keys|has|set|append|clear> ...
//!
//! Log verbosity follows `RUST_LOG` (default `warn`), written to stderr.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use jq_json_cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(&buf, &cli.command, &cli.encode_options()) {
        Ok(result) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
