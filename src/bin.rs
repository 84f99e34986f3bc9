use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{ArgAction, Parser};
use pperm::{
    batch::read_batch,
    format::{render, write_output, FormatOptions},
};

const LOG_ENV: &str = "PPERM_LOG";

fn main() {
    let cli = Cli::parse();
    cli.logging.initialize_logging();

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "parse-pperm",
    version,
    about = "Reconstructs valid GAP partial permutation construction statements from their string representations."
)]
struct Cli {
    /// Read from IN_FILE instead of stdin.
    #[arg(short = 'f', long = "infile", value_name = "IN_FILE")]
    infile: Option<PathBuf>,
    /// Together with --infile, overwrite the input file with the result.
    #[arg(short = 'i', long, action = ArgAction::SetTrue)]
    in_place: bool,
    /// Write to OUT_FILE instead of stdout (the file is truncated first).
    #[arg(short = 'o', long = "outfile", value_name = "OUT_FILE")]
    outfile: Option<PathBuf>,
    /// Sort the result alphabetically.
    #[arg(short, long, action = ArgAction::SetTrue)]
    sort: bool,
    #[command(flatten)]
    logging: LoggingArgs,
}

#[derive(clap::Args, Debug)]
struct LoggingArgs {
    /// Increase log verbosity (multiple uses increase verbosity further)
    #[arg(short, long, action = ArgAction::Count, group = "verbosity")]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, group = "verbosity")]
    quiet: bool,
}

impl LoggingArgs {
    /// Level is `Warn` unless overridden by `PPERM_LOG`, `-q` or repeated `-v`.
    fn initialize_logging(&self) {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Warn);
        builder.parse_env(LOG_ENV);

        if self.quiet {
            builder.filter_level(log::LevelFilter::Error);
        } else if self.verbose > 0 {
            builder.filter_level(match self.verbose {
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            });
        }
        builder.init();
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.in_place {
        ensure!(
            cli.infile.is_some(),
            "--in-place may only be used in combination with --infile"
        );
        ensure!(
            cli.outfile.is_none(),
            "--in-place may not be used in combination with --outfile"
        );
    }

    let reader: Box<dyn BufRead> = match &cli.infile {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let output = read_batch(reader)?;
    log::info!(
        "reconstructed {} statements in {:?} mode",
        output.statements.len(),
        output.mode
    );
    let rendered = render(&output, FormatOptions { sort: cli.sort });

    let target = if cli.in_place {
        cli.infile.as_ref()
    } else {
        cli.outfile.as_ref()
    };

    match target {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("failed to open {} for writing", path.display()))?;
            write_output(&mut file, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_output(&mut stdout, &rendered).context("failed to write to stdout")?;
        }
    }

    Ok(())
}
