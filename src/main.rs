// cpre: C precompiler with include inlining, comment stripping, identifier linting

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use cpre::errors::PrecompileError;
use cpre::pipeline;
use cpre::source;
use cpre::stats::ProcessingStats;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Input C source file.
    input: PathBuf,

    /// Output file path; stdout if omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the full processing-statistics report to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let input = args.input.to_string_lossy().into_owned();

    let mut stats = ProcessingStats::new();
    let result = run(&args, &input, &mut stats);

    // The report is printed even after a failure, to show what was done up
    // to the point of the error.
    if args.verbose {
        let stderr = io::stderr();
        let _ = stats.report(&mut stderr.lock());
    }

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args, input: &str, stats: &mut ProcessingStats) -> Result<(), PrecompileError> {
    let outcome = pipeline::run(input, stats)?;

    for warning in &outcome.warnings {
        eprintln!("warning: {}", warning);
    }

    source::write_output(&outcome.text, args.output.as_deref(), stats)?;

    // Findings are diagnostics, never intermixed with the transformed text.
    for finding in &stats.findings {
        eprintln!("error: {}", finding);
    }

    Ok(())
}
