use super::export::{ExportOptions, ExportReport, ExportRequest, Exporter};
use super::quantize::Quantizer;
use crate::config::Config;
use crate::error::PipelineError;
use crate::matcher::{self, Disambiguator};
use geninfo_resource::{OutputLayout, copy_tree, sanitize_filename};
use geninfo_source::{DatasetParser, TerritoryTable, TranslationCatalog};
use geninfo_template::{OutputClaims, RenderReport, RenderRequest, TemplateRenderer};
use geninfo_traits::{BrowserConnector, ProgressSink};
use geninfo_types::Mode;
use log::{info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Restrict the run to the entity whose name best matches this.
    pub entity_name: Option<String>,
    /// Regenerate artifacts that already exist.
    pub regenerate: bool,
    /// Stop after rendering HTML.
    pub skip_export: bool,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub data_file: PathBuf,
    pub mode: Mode,
    pub entities: usize,
    pub selected: Option<String>,
    pub render: RenderReport,
    pub export: Option<ExportReport>,
}

/// A configured generation run. Built with [`PipelineBuilder`](super::PipelineBuilder).
pub struct Pipeline<C: BrowserConnector> {
    pub(super) config: Config,
    pub(super) connector: C,
    pub(super) territories: TerritoryTable,
    pub(super) catalog: TranslationCatalog,
    pub(super) renderer: TemplateRenderer,
    pub(super) quantizer: Option<Quantizer>,
    pub(super) progress: Box<dyn ProgressSink>,
    pub(super) disambiguator: Box<dyn Disambiguator>,
}

impl<C: BrowserConnector> Pipeline<C> {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.config.output_dir)
    }

    /// Processes every configured data file in order. Missing files are skipped.
    ///
    /// Output paths claimed by an earlier data file are reported as
    /// collisions in later ones instead of being overwritten.
    pub fn run_all(&mut self, options: &RunOptions) -> Result<Vec<RunSummary>, PipelineError> {
        let mut claims = OutputClaims::new();
        let mut summaries = Vec::new();
        for path in self.config.data_file_paths() {
            if !path.is_file() {
                warn!("Data file {} not found, skipping", path.display());
                continue;
            }
            summaries.push(self.process(&path, options, &mut claims)?);
        }
        Ok(summaries)
    }

    /// Processes a single data file on its own.
    pub fn run_data_file(
        &mut self,
        path: &Path,
        options: &RunOptions,
    ) -> Result<RunSummary, PipelineError> {
        self.process(path, options, &mut OutputClaims::new())
    }

    fn process(
        &mut self,
        path: &Path,
        options: &RunOptions,
        claims: &mut OutputClaims,
    ) -> Result<RunSummary, PipelineError> {
        let mode = Mode::from_data_file(path)?;
        info!("Processing {} (mode '{}')", path.display(), mode);

        let entities = DatasetParser::new(self.config.property_table())
            .parse_path(path, &self.territories)?;
        info!("{} entities", entities.len());

        let (selected, stem) = match options.entity_name.as_deref() {
            Some(query) => {
                let name = matcher::resolve(
                    query,
                    entities.iter().map(|e| e.name()),
                    self.disambiguator.as_mut(),
                )?;
                let stem = entities
                    .iter()
                    .find(|e| e.name() == name)
                    .map(|e| sanitize_filename(e.nif()));
                (Some(name), stem)
            }
            None => (None, None),
        };

        let layout = self.layout();
        let filters = self.config.filters();
        let render = self.renderer.render_entities(
            &entities,
            &self.catalog,
            &RenderRequest {
                mode: &mode,
                layout: &layout,
                filters: &filters,
                entity_name: selected.as_deref(),
                regenerate: options.regenerate,
            },
            claims,
        )?;
        info!(
            "HTML: {} rendered, {} existing, {} without template, {} collisions",
            render.rendered.len(),
            render.existing,
            render.missing_template,
            render.collisions.len()
        );

        self.copy_static(&layout)?;

        let export = if options.skip_export {
            None
        } else {
            let export_options = ExportOptions::from(&self.config.export);
            let exporter = Exporter::new(&self.connector, &layout, export_options)
                .with_quantizer(self.quantizer.as_ref());
            let request = ExportRequest {
                filters: &filters,
                stem: stem.as_deref(),
                regenerate: options.regenerate,
            };
            Some(exporter.run(&request, self.progress.as_mut())?)
        };

        Ok(RunSummary {
            data_file: path.to_path_buf(),
            mode,
            entities: entities.len(),
            selected,
            render,
            export,
        })
    }

    fn copy_static(&self, layout: &OutputLayout) -> Result<(), PipelineError> {
        let source = &self.config.static_dir;
        if !source.is_dir() {
            warn!("Static directory {} not found, nothing copied", source.display());
            return Ok(());
        }
        let copied = copy_tree(source, &layout.static_dir())?;
        info!("Copied {} static files to {}", copied, layout.static_dir().display());
        Ok(())
    }
}
