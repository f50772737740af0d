use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use minphp_interpreter::{run_source, ErrorKind, InterpreterError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minphp", version, about = "Run a minphp program")]
struct Cli {
    /// Program to run
    #[arg(default_value = "a.php")]
    file: PathBuf,
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only program output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let source = match fs::read_to_string(&cli.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "error[{}]: cannot read '{}': {}",
                ErrorKind::Io,
                cli.file.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run_source(&source, &mut out);
    let flushed = out.flush().map_err(InterpreterError::from);

    match result.and(flushed) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error[{}]: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}
