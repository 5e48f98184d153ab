use std::fmt::Display;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Args, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[inline(always)]
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    let end = Instant::now();
    (result, end - start)
}

pub trait ReadString: Read {
    fn read_string(&mut self) -> io::Result<String> {
        let mut data = String::new();
        self.read_to_string(&mut data).map(|_| data)
    }
}

impl<T: Read> ReadString for T {}

#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Puzzle input file; standard input is read when omitted
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

impl InputArgs {
    pub fn read(&self) -> anyhow::Result<String> {
        let data = match &self.input {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Error reading input from {}", path.display()))?,
            None => io::stdin()
                .read_string()
                .context("Error reading input from stdin")?,
        };

        Ok(trim_input(data))
    }
}

/// Leading whitespace is significant for some inputs, so only the end is
/// trimmed.
fn trim_input(mut data: String) -> String {
    data.truncate(data.trim_end().len());
    data
}

#[derive(Debug, Parser)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,
}

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second call (several solvers in one process) keeps the first subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

/// Entry point for days that take no options beyond the input path.
pub fn run<T, F>(solve: F) -> anyhow::Result<()>
where
    T: Display,
    F: FnOnce(&str) -> anyhow::Result<T>,
{
    let cli = Cli::parse();
    run_with(&cli.input, solve)
}

pub fn run_with<T, F>(args: &InputArgs, solve: F) -> anyhow::Result<()>
where
    T: Display,
    F: FnOnce(&str) -> anyhow::Result<T>,
{
    init_logging();

    let (result, total_duration) = timed(move || -> anyhow::Result<()> {
        let input = args.read()?;

        let (solution, duration) = timed(|| solve(&input));
        println!("{}", solution?);

        info!(?duration, "algorithm finished");
        Ok(())
    });
    info!(duration = ?total_duration, "total");

    result
}
