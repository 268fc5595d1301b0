use clap::Parser;
use flareplot_rs::fingerprint::load_fingerprint;
use flareplot_rs::html::render_standalone_page;
use flareplot_rs::{build_flareplot, render_html, FlareplotError, FlareplotOptions};
use log::info;
use std::fs;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Flareplot(#[from] FlareplotError),
}

#[derive(Parser)]
#[command(
    name = "flareplot",
    about = "Renders a protein-ligand interaction fingerprint as an interactive flareplot",
    long_about = "Reads an interaction fingerprint table, keeps the interactions present in at least \
                  a threshold fraction of frames, and writes an HTML snippet that draws them as a \
                  flareplot. Edges are colored by interaction type and residues by chain.",
    version,
    after_help = "Example usage:\n    \
                  flareplot fingerprint.csv plot.html --threshold 0.3 --page\n    \
                  flareplot fingerprint.parquet plot.html --json plot.json",
    color = clap::ColorChoice::Always
)]
#[derive(Debug)]
struct Args {
    /// Path to the fingerprint table
    /// (.csv pandas export with ligand/protein/interaction header rows, or .parquet)
    #[arg(value_name = "FINGERPRINT")]
    fingerprint: String,

    /// Path for the HTML output
    /// Will create output directory if it doesn't exist
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: String,

    /// Minimum fraction of frames an interaction must be present in
    #[arg(long, default_value = "0.5")]
    threshold: f64,

    /// Plot width in pixels
    #[arg(long, default_value = "500")]
    width: u32,

    /// Plot height in pixels
    #[arg(long, default_value = "500")]
    height: u32,

    /// Emit one track/tree entry per residue instead of one per edge endpoint
    #[arg(long)]
    dedupe_nodes: bool,

    /// Also write the flareplot JSON document to this path
    #[arg(long, value_name = "JSON_FILE")]
    json: Option<String>,

    /// Write a complete HTML page (loads require.js) instead of a notebook fragment
    #[arg(long)]
    page: bool,
}

fn create_parent_dir(path: &str) -> Result<(), CliError> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let start_time = std::time::Instant::now();

    let args = Args::parse();
    let options = FlareplotOptions::default()
        .with_threshold(args.threshold)
        .with_size(args.width, args.height)
        .with_dedupe_nodes(args.dedupe_nodes);
    options.validate()?;

    let table = load_fingerprint(&args.fingerprint)?;
    info!(
        "{} interactions over {} frames",
        table.n_interactions(),
        table.n_frames()
    );

    let document = build_flareplot(&table, &options)?;
    info!(
        "{} edges at threshold {}",
        document.edges.len(),
        options.threshold
    );

    if let Some(json_path) = &args.json {
        create_parent_dir(json_path)?;
        document.write_json(json_path)?;
        info!("wrote JSON document to {}", json_path);
    }

    let mut html = render_html(&document, options.width, options.height)?;
    if args.page {
        html = render_standalone_page(&html, "Flareplot");
    }
    create_parent_dir(&args.output_file)?;
    html.write_to(&args.output_file)?;
    info!("wrote flareplot to {}", args.output_file);

    let elapsed = start_time.elapsed();
    info!("Total execution time: {:.4} seconds", elapsed.as_secs_f64());

    Ok(())
}
