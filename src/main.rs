//! `word-progress`: counts the words in one file while drawing a progress bar.

use std::{io, path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use word_progress::{Error, RenderConfig, count_file};

/// Count the words in a file, drawing a progress bar while reading.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// File to count. Exactly one is expected.
    #[arg(num_args = 0..)]
    paths: Vec<PathBuf>,

    /// Longest pause between progress bar samples, in milliseconds.
    #[arg(long, default_value_t = 1)]
    poll_interval_ms: u64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config =
        RenderConfig::default().with_poll_interval(Duration::from_millis(cli.poll_interval_ms));

    let result = match cli.paths.as_slice() {
        [path] => count_file(path, &config, io::stdout()),
        _ => Err(Error::Usage),
    };

    match result {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        // Misuse and unopenable files are reported on stdout and still exit 0.
        Err(err @ (Error::Usage | Error::Open { .. })) => {
            log::debug!("{err:?}");
            println!("{err}");
            ExitCode::SUCCESS
        }
        Err(err @ Error::Read { .. }) => {
            log::error!("{err:?}");
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}
