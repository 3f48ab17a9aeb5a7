use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf_nup::{CombineOptions, ImposeError, LayoutMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfnup", about = "Combine PDF slides N-up onto A4 pages", version)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine PDF pages 2-up or 8-up onto A4 portrait pages
    Combine {
        /// Input PDF file(s), pages are taken in the order given
        #[arg(short, long, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file [default: combined-slides-<layout>.pdf]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Layout: 2in1 (two pages stacked) or 8in1 (2x4 grid)
        #[arg(short, long, value_parser = parse_layout)]
        layout: Option<LayoutMode>,

        /// Load options from a JSON file (command line flags take precedence)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Write uncompressed content streams
        #[arg(long)]
        no_compress: bool,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },
}

fn parse_layout(value: &str) -> std::result::Result<LayoutMode, String> {
    value.parse().map_err(|e: ImposeError| e.to_string())
}

/// Attach the offending file name to a parse error
fn input_error(err: ImposeError, inputs: &[PathBuf]) -> anyhow::Error {
    match &err {
        ImposeError::Parse { index, .. } => {
            let name = inputs
                .get(*index)
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| format!("input #{}", index));
            anyhow::Error::new(err).context(format!("Failed to load {}", name))
        }
        _ => err.into(),
    }
}

/// Logger with a level from the `-v` count; `RUST_LOG` overrides it
fn logger_builder(verbose: u8, env: env_logger::Env) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .parse_env(env);
    builder
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger_builder(cli.verbose, env_logger::Env::default()).init();

    match cli.command {
        Commands::Combine {
            input,
            output,
            layout,
            config,
            save_config,
            no_compress,
            stats_only,
        } => {
            let mut options = match config {
                Some(path) => CombineOptions::load(&path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => CombineOptions::default(),
            };
            if !input.is_empty() {
                options.input_files = input;
            }
            if let Some(layout) = layout {
                options.layout = layout;
            }
            if output.is_some() {
                options.output_file = output;
            }
            if no_compress {
                options.compress_output = false;
            }
            options.validate()?;

            if let Some(path) = save_config {
                options
                    .save(&path)
                    .await
                    .with_context(|| format!("Failed to save config {}", path.display()))?;
                log::info!("Saved options to {}", path.display());
            }

            let pages = pdf_nup::load_pages(&options.input_files)
                .await
                .map_err(|e| input_error(e, &options.input_files))?;

            let stats = pdf_nup::calculate_statistics(&pages, options.layout)?;
            println!("Imposition Statistics:");
            println!("  Layout: {}", options.layout);
            println!("  Source pages: {}", stats.source_pages);
            for (path, count) in options.input_files.iter().zip(&stats.pages_per_document) {
                println!("    {}: {}", path.display(), count);
            }
            println!("  Output pages: {}", stats.output_pages);
            println!("  Empty cells on last page: {}", stats.empty_cells);

            if stats_only {
                return Ok(());
            }

            let output = options.output_path();
            let imposed = pdf_nup::impose_pages(pages, options.layout).await?;
            pdf_nup::save_pdf(imposed, &output, options.compress_output)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Combined → {}", output.display());
        }
    }

    Ok(())
}
