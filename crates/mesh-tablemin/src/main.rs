//! Routing table minimiser entry point.
//!
//! Reads a stream of per-chip routing tables, minimises each with the
//! Ordered Covering algorithm and writes the results back out in the
//! same format, printing one progress line per table.

use clap::Parser;
use mesh_tablemin::{covering, default_routes, stream, StreamError};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

/// Ordered Covering routing table minimiser
#[derive(Parser, Debug)]
#[command(name = "tablemin")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input routing table stream
    in_file: PathBuf,

    /// Output routing table stream
    out_file: PathBuf,

    /// Target table length (0 minimises as far as possible)
    #[arg(default_value_t = 0)]
    target_length: usize,

    /// Drop default-routable entries before minimising
    #[arg(long)]
    remove_default_entries: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt().with_target(false).init();

    info!("Starting tablemin");
    info!("Input: {}", args.in_file.display());
    info!("Output: {}", args.out_file.display());
    info!("Target length: {}", args.target_length);

    let input = match File::open(&args.in_file) {
        Ok(file) => BufReader::new(file),
        Err(err) => {
            error!("Failed to open {}: {}", args.in_file.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let output = match File::create(&args.out_file) {
        Ok(file) => BufWriter::new(file),
        Err(err) => {
            error!("Failed to create {}: {}", args.out_file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    match minimise_stream(input, output, &args) {
        Ok(tables) => {
            info!("Minimised {} tables", tables);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Minimises every record in `input`, writing each result to `output` as
/// soon as it is done.
fn minimise_stream<R, W>(mut input: R, mut output: W, args: &Args) -> Result<usize, StreamError>
where
    R: std::io::Read,
    W: Write,
{
    let mut tables = 0;

    while let Some(mut record) = stream::read_record(&mut input)? {
        let length_in = record.table.len();
        let start = Instant::now();

        if args.remove_default_entries {
            default_routes::remove_default_entries(&mut record.table);
        }
        covering::minimise(&mut record.table, args.target_length);

        println!(
            "({:3}, {:3})\t{:5}\t{:5}\t{:.6} s",
            record.x,
            record.y,
            length_in,
            record.table.len(),
            start.elapsed().as_secs_f64()
        );

        stream::write_record(&mut output, &record)?;
        tables += 1;
    }

    output.flush()?;
    Ok(tables)
}
