use anyhow::Context;
use bench_collate::space::STRUCTURES;
use bench_collate::{BenchmarkSpace, OutputFormat, Pipeline, PipelineOptions};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bench-collate")]
#[command(about = "Collect criterion set-benchmark reports into one table (CSV or JSON)")]
struct Args {
    /// Root of criterion's output tree.
    #[arg(long, value_name = "DIR", default_value = "target/criterion")]
    criterion_dir: PathBuf,

    /// Where to write the table. If omitted, prints to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Only collect these structures. Can be provided multiple times.
    #[arg(
        long,
        value_name = "NAME",
        value_parser = clap::builder::PossibleValuesParser::new(STRUCTURES)
    )]
    structure: Vec<String>,

    /// Extraction threads. Output order does not depend on this.
    #[arg(long, default_value_t = 1)]
    jobs: usize,

    /// Abort when a report's Mean row is followed by an unexpected layout.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Log skipped directories and other details.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let level = if args.quiet {
        "warn"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let mut space = BenchmarkSpace::new(&args.criterion_dir);
    if !args.structure.is_empty() {
        space.retain_structures(&args.structure);
    }

    let pipeline = Pipeline::new(
        space,
        PipelineOptions {
            strict: args.strict,
            jobs: args.jobs,
        },
    );

    if let Some(out) = &args.out {
        let file = File::create(out)
            .with_context(|| format!("failed to create {}", out.display()))?;
        pipeline.write(args.format, BufWriter::new(file))?;
    } else {
        pipeline.write(args.format, io::stdout().lock())?;
    }

    Ok(())
}
