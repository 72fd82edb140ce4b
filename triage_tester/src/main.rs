use anyhow::Context;
use clap::{Parser, ValueEnum};
use color_triage::acquisition::FileSource;
use color_triage::parallel_pipeline::ParallelTriage;
use color_triage::pipeline::{Report, TriageConfig};
use color_triage::presentation::render_text;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "triage_tester")]
#[command(about = "Color composition triage: white/yellow/orange/brown/black shares of an image")]
struct Cli {
    /// Image file to analyze (PNG, JPEG, WebP, ...)
    input: PathBuf,

    /// JSON file with a TriageConfig; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cap for the longer image edge before analysis
    #[arg(long, env = "TRIAGE_MAX_DIMENSION")]
    max_dimension: Option<u32>,

    /// Analyze the image at its original size (overrides --max-dimension)
    #[arg(long)]
    no_resize: bool,

    /// Number of classification workers (defaults to the CPU count)
    #[arg(long, env = "TRIAGE_WORKERS")]
    workers: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn triage_config(&self) -> anyhow::Result<TriageConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => TriageConfig::default(),
        };
        if let Some(max_dimension) = self.max_dimension {
            config.max_dimension = max_dimension;
        }
        if self.no_resize {
            config.max_dimension = 0;
        }
        if let Some(workers) = self.workers {
            config.workers = workers.max(1);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "color_triage=info,triage_tester=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let pipeline = ParallelTriage::new(cli.triage_config()?);
    tracing::debug!(config = ?pipeline.config(), "Resolved configuration");

    let report = pipeline
        .analyze_source(FileSource::new(&cli.input))
        .await
        .with_context(|| format!("analyzing {}", cli.input.display()))?;

    if let Report::NoClassifiablePixels { counts } = &report {
        tracing::warn!(pixels = counts.total_pixels(), "No classifiable pixels");
    }

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
