//! eac2json - Employee Awards Center history to JSON

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use eac2json::{Error, Options, SaleHandling, convert_bytes};

#[derive(Parser)]
#[command(name = "eac2json")]
#[command(version, about = "Convert a saved Employee Awards Center history page to JSON", long_about = None)]
#[command(after_help = "EXAMPLES:
    eac2json history.html > history.json     Convert a saved page
    eac2json < history.html                  Read the page from standard input
    eac2json --skip-sales history.html       Leave out option and ESPP sales")]
struct Cli {
    /// Saved history page (standard input when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Drop "Sale" rows instead of emitting one entry per sold lot
    #[arg(long)]
    skip_sales: bool,

    /// Log extraction progress to standard error
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("eac2json: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "eac2json=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries the JSON; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> eac2json::Result<()> {
    let page = match &cli.input {
        Some(path) => fs::read(path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?,
        None => {
            let mut page = Vec::new();
            io::stdin().lock().read_to_end(&mut page)?;
            page
        }
    };
    tracing::debug!(bytes = page.len(), "read input");

    let sales = if cli.skip_sales {
        SaleHandling::Skip
    } else {
        SaleHandling::FanOut
    };
    let entries = convert_bytes(&page, &Options::default().with_sales(sales))?;

    let mut out = BufWriter::new(io::stdout().lock());
    serde_json::to_writer(&mut out, &entries).map_err(io::Error::from)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
