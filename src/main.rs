use chrono::Local;
use clap::{Parser, Subcommand};
use geninfo::{Config, ConsolePrompt, MatchError, PipelineBuilder, PipelineError, RunOptions};
use geninfo_source::TranslationCatalog;
use geninfo_webdriver::{ChromeOptions, WebDriverClient};
use log::{error, info};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(version, about = "Generate per-entity infographics as HTML, PNG and PDF")]
struct Cli {
    /// Configuration file (TOML).
    #[arg(long, global = true, env = "GENINFO_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render and export the infographics of every configured data file.
    Run {
        /// Only generate the entity whose name best matches this.
        #[arg(long)]
        name: Option<String>,

        /// Regenerate documents that already exist.
        #[arg(short, long)]
        regenerate: bool,

        /// Output directory, overriding the configuration.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write into a timestamped subdirectory of the output directory.
        #[arg(long)]
        stamp: bool,

        /// Stop after rendering HTML.
        #[arg(long)]
        skip_export: bool,

        #[arg(long)]
        selenium_host: Option<String>,

        #[arg(long)]
        selenium_port: Option<u16>,
    },
    /// Write one JSON file of translations per language.
    Translations {
        #[arg(long, default_value = "translations")]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(PipelineError::Match(e @ MatchError::Ambiguous { .. })) => {
            error!("{}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Translations { out } => {
            TranslationCatalog::from_path(&config.translations_file)?.write_json(&out)?;
            Ok(())
        }
        Command::Run {
            name,
            regenerate,
            output,
            stamp,
            skip_export,
            selenium_host,
            selenium_port,
        } => {
            let mut output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            if stamp {
                output_dir = output_dir.join(Local::now().format("%Y-%m-%d_%H-%M-%S").to_string());
            }
            config = config.with_output_dir(output_dir);
            if let Some(host) = selenium_host {
                config.webdriver.host = host;
            }
            if let Some(port) = selenium_port {
                config.webdriver.port = port;
            }
            info!("Writing to {}", config.output_dir.display());

            let client = WebDriverClient::for_host(
                &config.webdriver.host,
                config.webdriver.port,
                ChromeOptions::default().headless(config.webdriver.headless),
            )?;

            let mut builder = PipelineBuilder::new(config);
            if std::io::stdin().is_terminal() {
                builder = builder.with_disambiguator(Box::new(ConsolePrompt::stdio()));
            }
            let mut pipeline = builder.build(client)?;

            let summaries = pipeline.run_all(&RunOptions {
                entity_name: name,
                regenerate,
                skip_export,
            })?;
            for summary in &summaries {
                info!(
                    "{}: {} entities, {} documents rendered{}",
                    summary.data_file.display(),
                    summary.entities,
                    summary.render.rendered.len(),
                    summary
                        .export
                        .as_ref()
                        .map(|e| format!(", {} captured, {} PDFs", e.captured, e.pdfs_written))
                        .unwrap_or_default()
                );
            }
            Ok(())
        }
    }
}
