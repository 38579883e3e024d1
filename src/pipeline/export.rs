//! Captures rendered HTML as PNG through a browser and converts it to PDF.
//!
//! Every unit is one `html/{TERR}/{LANG}/{stem}.html` file. Units whose PNG
//! and PDF both exist are skipped unless forced, and the browser session is
//! only opened when at least one unit needs a capture, so a repeated run does
//! no remote work at all.

use super::quantize::Quantizer;
use crate::config::ExportConfig;
use crate::error::PipelineError;
use geninfo_render_lopdf::ImagePdfRenderer;
use geninfo_resource::{ArtifactKind, OutputLayout};
use geninfo_traits::{BrowserConnector, BrowserSession, Progress, ProgressSink};
use geninfo_types::{Filters, TerritoryCode};
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub window_width: u32,
    pub window_height: u32,
    /// CSS class whose presence marks the charts as drawn.
    pub chart_class: String,
    pub chart_wait: Duration,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            window_width: config.window_width,
            window_height: config.window_height,
            chart_class: config.chart_class.clone(),
            chart_wait: config.chart_wait(),
        }
    }
}

/// One document to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportUnit {
    pub territory: String,
    pub language: String,
    pub stem: String,
    pub html: PathBuf,
    pub png: PathBuf,
    pub pdf: PathBuf,
}

impl ExportUnit {
    pub fn needs_capture(&self, force: bool) -> bool {
        force || !self.png.exists()
    }

    pub fn needs_pdf(&self, force: bool) -> bool {
        force || !self.pdf.exists()
    }
}

/// Which documents to export.
#[derive(Debug, Clone, Copy)]
pub struct ExportRequest<'a> {
    pub filters: &'a Filters,
    /// Only export the document with this (sanitized) file stem.
    pub stem: Option<&'a str>,
    pub regenerate: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub planned: usize,
    pub captured: usize,
    pub pdfs_written: usize,
    pub skipped: usize,
    pub chart_timeouts: usize,
}

pub struct Exporter<'a, C: BrowserConnector> {
    connector: &'a C,
    layout: &'a OutputLayout,
    options: ExportOptions,
    quantizer: Option<&'a Quantizer>,
    pdf: ImagePdfRenderer,
}

impl<'a, C: BrowserConnector> Exporter<'a, C> {
    pub fn new(connector: &'a C, layout: &'a OutputLayout, options: ExportOptions) -> Self {
        Self {
            connector,
            layout,
            options,
            quantizer: None,
            pdf: ImagePdfRenderer::default(),
        }
    }

    pub fn with_quantizer(mut self, quantizer: Option<&'a Quantizer>) -> Self {
        self.quantizer = quantizer;
        self
    }

    /// Lists the units selected by `request`, in a stable order.
    pub fn plan(&self, request: &ExportRequest<'_>) -> Result<Vec<ExportUnit>, PipelineError> {
        let units = self
            .layout
            .discover_html()?
            .into_iter()
            .filter(|a| request.filters.allows(&a.territory, &a.language))
            .filter(|a| request.stem.is_none_or(|stem| a.stem == stem))
            .map(|a| {
                let territory = TerritoryCode::new(a.territory.as_str());
                ExportUnit {
                    png: self.layout.artifact_path(
                        ArtifactKind::Png,
                        &territory,
                        &a.language,
                        &a.stem,
                    ),
                    pdf: self.layout.artifact_path(
                        ArtifactKind::Pdf,
                        &territory,
                        &a.language,
                        &a.stem,
                    ),
                    territory: a.territory,
                    language: a.language,
                    stem: a.stem,
                    html: a.path,
                }
            })
            .collect();
        Ok(units)
    }

    pub fn run(
        &self,
        request: &ExportRequest<'_>,
        progress: &mut dyn ProgressSink,
    ) -> Result<ExportReport, PipelineError> {
        let units = self.plan(request)?;
        let total = units.len();
        let force = request.regenerate;
        let mut report = ExportReport {
            planned: total,
            ..Default::default()
        };
        info!("Exporting {} documents", total);

        // Dropping the session on an early return closes it.
        let mut session = if units.iter().any(|u| u.needs_capture(force)) {
            Some(self.connector.connect()?)
        } else {
            debug!("Every capture exists, no browser session needed");
            None
        };

        for (index, unit) in units.iter().enumerate() {
            let percent = Progress::new(index, total).percent();
            let mut done_something = false;

            match session.as_mut() {
                Some(session) if unit.needs_capture(force) => {
                    info!("[{}%] Capturing {}", percent, unit.png.display());
                    if !self.capture(session, unit)? {
                        report.chart_timeouts += 1;
                    }
                    report.captured += 1;
                    done_something = true;
                }
                _ => info!("[{}%] {} already exists", percent, unit.png.display()),
            }

            if unit.needs_pdf(force) {
                info!("[{}%] Writing {}", percent, unit.pdf.display());
                self.pdf.render_file(&unit.png, &unit.pdf)?;
                report.pdfs_written += 1;
                done_something = true;
            } else {
                info!("[{}%] {} already exists", percent, unit.pdf.display());
            }

            if !done_something {
                report.skipped += 1;
            }
            progress.report(Progress::new(index + 1, total));
        }

        if let Some(session) = session.take() {
            session.close()?;
        }
        Ok(report)
    }

    /// Returns `false` when the charts did not appear in time.
    fn capture(&self, session: &mut C::Session, unit: &ExportUnit) -> Result<bool, PipelineError> {
        session.clear_cookies()?;
        let url = file_url(&unit.html)?;
        debug!("Loading {}", url);
        session.navigate(url.as_str())?;

        let ready = session.wait_for_class(&self.options.chart_class, self.options.chart_wait)?;
        if !ready {
            warn!(
                "Timed out after {:?} waiting for '.{}' in {}",
                self.options.chart_wait,
                self.options.chart_class,
                unit.html.display()
            );
        }

        session.set_window_size(self.options.window_width, self.options.window_height)?;
        let png = session.screenshot_png()?;
        if let Some(parent) = unit.png.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&unit.png, png)?;

        if let Some(quantizer) = self.quantizer {
            quantizer.quantize(&unit.png);
        }
        Ok(ready)
    }
}

/// Absolute `file://` URL of a local document.
pub fn file_url(path: &Path) -> Result<Url, PipelineError> {
    let absolute = fs::canonicalize(path)?;
    Url::from_file_path(&absolute).map_err(|()| {
        PipelineError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' cannot be expressed as a file URL", absolute.display()),
        ))
    })
}
