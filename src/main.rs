use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tapevm::loader::read_program;
use tapevm::{DEFAULT_MEMORY_SIZE, EofPolicy, Error, Machine, MachineConfig, Outcome, StreamIo};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tapevm", about = "Run a program on a byte tape machine")]
struct Cli {
    /// Instruction file to run.
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Number of memory cells on the tape.
    #[arg(short = 'm', long = "memory", default_value_t = DEFAULT_MEMORY_SIZE, value_parser = parse_memory_size)]
    memory_size: usize,

    /// Value stored by ',' once input is exhausted.
    #[arg(long, value_enum, default_value_t = EofPolicy::MinusOne)]
    eof: EofPolicy,

    /// Stop with an error after this many steps.
    #[arg(long)]
    step_limit: Option<usize>,
}

/// Parse a positive cell count.
fn parse_memory_size(s: &str) -> Result<usize, String> {
    let n = s.parse::<usize>().map_err(|e| format!("Invalid memory size: {e}"))?;
    if n == 0 {
        return Err("Memory size must be positive".to_string());
    }
    Ok(n)
}

/// Render an error with its chain of causes.
fn report(e: &Error) -> String {
    let mut out = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        out.push_str(&format!(": {cause}"));
        source = std::error::Error::source(cause);
    }
    out
}

/// Report a fatal error on `out` regardless of the log filter, and pick the exit code.
fn fail(e: &Error, out: &mut impl Write) -> ExitCode {
    let message = report(e);
    debug!(error = %message, "fatal");
    let _ = writeln!(out, "error: {message}");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tapevm=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e, &mut std::io::stderr()),
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let program = read_program(&cli.file)?;
    let config = MachineConfig {
        memory_size: cli.memory_size,
        eof: cli.eof,
    };
    let mut machine = Machine::new(&program, config, StreamIo::console())?;
    info!(file = %cli.file.display(), memory_size = cli.memory_size, "running");

    match cli.step_limit {
        None => {
            machine.run()?;
        }
        Some(limit) => {
            if let Outcome::StepLimit { steps } = machine.run_for(limit)? {
                return Err(Error::StepLimit { steps, pc: machine.pc() });
            }
        }
    }
    Ok(())
}
