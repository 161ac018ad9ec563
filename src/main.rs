use anyhow::Result;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use std::{io, path::PathBuf, time::Duration};

use swagger_slice::fetcher::{DocumentFetcher, DEFAULT_URL};
use swagger_slice::filter::{DocumentFilter, InfoMode};
use swagger_slice::output::{self, OutputFormat};
use swagger_slice::selection::Selection;
use swagger_slice::slice_document;

/// Fetch a Swagger/OpenAPI JSON document and keep only the routes of the given modules or paths
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL of the Swagger JSON document
    #[arg(short, long, env = "SWAGGER_SLICE_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Module (tag) names, comma separated
    #[arg(short, long)]
    modules: Option<String>,

    /// Exact route paths, comma separated
    #[arg(short, long)]
    paths: Option<String>,

    /// Save the result to this file instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output serialization
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// How to build the info block of the result
    #[arg(long, value_enum, default_value_t = InfoArg::Preserve)]
    info: InfoArg,

    /// Title of the rebuilt info block (implies --info override)
    #[arg(long)]
    title: Option<String>,

    /// Description of the rebuilt info block (implies --info override)
    #[arg(long)]
    description: Option<String>,

    /// Give up on the request after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InfoArg {
    Preserve,
    Override,
}

impl Cli {
    fn info_mode(&self) -> InfoMode {
        let overridden = self.title.is_some() || self.description.is_some();
        match (self.info, overridden) {
            (InfoArg::Preserve, false) => InfoMode::Preserve,
            _ => InfoMode::Override {
                title: self.title.clone(),
                description: self.description.clone(),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only ever carries the document
    let env = Env::default().filter_or("RUST_LOG", if cli.verbose { "debug" } else { "info" });
    env_logger::init_from_env(env);

    debug!("Starting swagger-slice...");

    let selection = Selection::from_lists(cli.modules.as_deref(), cli.paths.as_deref())?;
    let fetcher = DocumentFetcher::new(&cli.url, cli.timeout.map(Duration::from_secs))?;
    let filter = DocumentFilter::new(cli.info_mode());

    let document = fetcher.fetch().await?;
    debug!("Fetched document with {} paths", document.paths.len());

    let filtered = slice_document(&document, &selection, &filter)?;
    info!(
        "Selected {} paths and {} schemas by {}",
        filtered.paths.len(),
        filtered.components.schemas.len(),
        selection.kind()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::emit(&filtered, cli.format, cli.output.as_deref(), &mut out)?;

    Ok(())
}
