//! Build the thread reference table from the pkm.edu.pl dimension pages.
//!
//! # Usage
//!
//! ```bash
//! cargo run --features cli --bin scrape-threads -- --output data/threads.csv
//! cargo run --features cli --bin scrape-threads -- --thousands , --sep . https://example.org/threads.html
//! ```
//!
//! With no URLs the default pkm.edu.pl pages are used.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use bolt_core::table_builder::{
    self, NumberFormat, DEFAULT_DECIMAL_SEPARATOR, DEFAULT_SOURCES, DEFAULT_THOUSANDS_SEPARATOR,
};

#[derive(Parser, Debug)]
#[command(name = "scrape-threads", version, about = "Scrape thread dimension tables into a CSV reference table")]
struct Args {
    /// Source pages, in output order
    urls: Vec<String>,

    /// Decimal separator used on the source pages
    #[arg(long, default_value_t = DEFAULT_DECIMAL_SEPARATOR)]
    sep: char,

    /// Thousands separator used on the source pages
    #[arg(long, default_value_t = DEFAULT_THOUSANDS_SEPARATOR)]
    thousands: char,

    /// Where to write the table
    #[arg(short, long, default_value = "threads.csv")]
    output: PathBuf,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let sources: Vec<&str> = if args.urls.is_empty() {
        DEFAULT_SOURCES.to_vec()
    } else {
        args.urls.iter().map(String::as_str).collect()
    };

    let format = NumberFormat::new(args.thousands, args.sep);
    match table_builder::run(&sources, format, &args.output) {
        Ok(table) => {
            println!("Wrote {} threads to {}", table.len(), args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
