use super::orchestrator::Pipeline;
use super::progress::LogProgress;
use super::quantize::Quantizer;
use crate::config::Config;
use crate::error::PipelineError;
use crate::matcher::{AbortOnAmbiguity, Disambiguator};
use geninfo_source::{TerritoryTable, TranslationCatalog};
use geninfo_template::{RendererOptions, TemplateRenderer};
use geninfo_traits::{BrowserConnector, ProgressSink};
use log::{info, warn};

/// A builder for creating a [`Pipeline`].
pub struct PipelineBuilder {
    config: Config,
    progress: Box<dyn ProgressSink>,
    disambiguator: Box<dyn Disambiguator>,
}

impl PipelineBuilder {
    /// Starts from a configuration, logging progress and aborting on ambiguous names.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            progress: Box::new(LogProgress::new("exported")),
            disambiguator: Box::new(AbortOnAmbiguity),
        }
    }

    /// Replaces the export progress sink.
    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Replaces how ambiguous entity names are resolved.
    pub fn with_disambiguator(mut self, disambiguator: Box<dyn Disambiguator>) -> Self {
        self.disambiguator = disambiguator;
        self
    }

    /// Loads the shared inputs and creates the pipeline.
    pub fn build<C: BrowserConnector>(self, connector: C) -> Result<Pipeline<C>, PipelineError> {
        let config = self.config;

        let territories = TerritoryTable::from_path(&config.territories_file)?;
        info!(
            "Loaded {} territories from {}",
            territories.len(),
            config.territories_file.display()
        );
        let catalog = TranslationCatalog::from_path(&config.translations_file)?;

        let renderer = TemplateRenderer::new(
            &config.template_dir,
            config.globals.clone(),
            RendererOptions {
                autoescape: config.autoescape,
            },
        );

        let quantizer = config.pngquant_path.as_ref().map(Quantizer::new);
        if quantizer.is_none() {
            warn!("pngquant_path is not set, captures will not be compressed (https://pngquant.org/)");
        }

        Ok(Pipeline {
            config,
            connector,
            territories,
            catalog,
            renderer,
            quantizer,
            progress: self.progress,
            disambiguator: self.disambiguator,
        })
    }
}
