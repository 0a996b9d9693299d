use clap::Parser;
use csv_extract::{execute, parse_request, writer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV file to read.
    #[arg(long)]
    input: std::path::PathBuf,
    /// File the rendered results are appended to.
    #[arg(long)]
    output: std::path::PathBuf,
    /// Operation to run: "column <name>", "columns <a>, <b>",
    /// "rows <n>, <m>", "find <keyword>", or "all".
    #[arg(long)]
    command: String,
    /// Also write a whole-file dump through the CSV writer to this path.
    #[arg(long)]
    export: Option<std::path::PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let request = parse_request(&args.command)?;
    let outcome = execute(&args.input, &request);

    // Echo to the console and append the same block to the output file.
    let lines = outcome.render();
    for line in &lines {
        println!("{line}");
    }
    writer::append_to_output(&args.output, &lines.join("\n"));

    if let Some(export) = args.export {
        match outcome.table() {
            Some((headers, rows)) => {
                if writer::write_csv(&export, headers, rows) {
                    info!("exported {} rows to {}", rows.len(), export.display());
                }
            }
            None => anyhow::bail!("nothing to export: only a non-empty \"all\" result carries a table"),
        }
    }
    Ok(())
}
