use crate::TemplateError;
use crate::helpers;
use geninfo_resource::{ArtifactKind, OutputLayout, sanitize_filename};
use geninfo_source::{TranslationCatalog, TranslationTable};
use geninfo_types::{EntityRecord, Filters, Mode};
use handlebars::Handlebars;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct RendererOptions {
    /// HTML-escape interpolated values. Off by default: template authors and
    /// the dataset own their markup.
    pub autoescape: bool,
}

/// What to render and where.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub mode: &'a Mode,
    pub layout: &'a OutputLayout,
    pub filters: &'a Filters,
    /// Only render entities whose `Nombre` equals this value.
    pub entity_name: Option<&'a str>,
    /// Overwrite documents that already exist.
    pub regenerate: bool,
}

/// Two entities resolved to the same output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub path: PathBuf,
    pub kept: String,
    pub dropped: String,
}

/// Output files already written in a run, with the NIF that owns each one.
///
/// Document paths do not include the mode, so one set must span every data
/// file of a run for collisions between files to be caught.
#[derive(Debug, Clone, Default)]
pub struct OutputClaims {
    owners: HashMap<PathBuf, String>,
}

impl OutputClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `owner` for `path`, or returns the NIF that claimed it first.
    pub fn claim(&mut self, path: &Path, owner: &str) -> Result<(), &str> {
        match self.owners.entry(path.to_path_buf()) {
            Entry::Occupied(first) => Err(first.into_mut().as_str()),
            Entry::Vacant(slot) => {
                slot.insert(owner.to_string());
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub rendered: Vec<PathBuf>,
    pub existing: usize,
    pub missing_template: usize,
    pub collisions: Vec<Collision>,
}

pub struct TemplateRenderer {
    registry: Handlebars<'static>,
    template_dir: PathBuf,
    globals: Map<String, Value>,
    /// `{mode}_{LANG}` → registered template name, `None` once nothing matched.
    resolved: HashMap<String, Option<String>>,
}

impl TemplateRenderer {
    pub fn new<P: Into<PathBuf>>(
        template_dir: P,
        globals: Map<String, Value>,
        options: RendererOptions,
    ) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        if !options.autoescape {
            registry.register_escape_fn(handlebars::no_escape);
        }
        helpers::register(&mut registry);

        Self {
            registry,
            template_dir: template_dir.into(),
            globals,
            resolved: HashMap::new(),
        }
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Finds, compiles and caches the template for a mode and language.
    pub fn resolve(&mut self, mode: &Mode, language: &str) -> Result<String, TemplateError> {
        let key = format!("{}_{}", mode, language.to_uppercase());
        let candidates = mode.template_candidates(language);

        if let Some(cached) = self.resolved.get(&key) {
            return cached.clone().ok_or_else(|| TemplateError::NotFound {
                mode: mode.to_string(),
                language: language.to_string(),
                tried: candidates.to_vec(),
            });
        }

        let mut found = None;
        for name in &candidates {
            if self.registry.has_template(name) {
                found = Some(name.clone());
                break;
            }
            let path = self.template_dir.join(name);
            if path.is_file() {
                self.registry
                    .register_template_file(name, &path)
                    .map_err(|e| TemplateError::Compile {
                        name: name.clone(),
                        source: Box::new(e),
                    })?;
                debug!("Compiled template {}", path.display());
                found = Some(name.clone());
                break;
            }
        }

        self.resolved.insert(key, found.clone());
        found.ok_or_else(|| TemplateError::NotFound {
            mode: mode.to_string(),
            language: language.to_string(),
            tried: candidates.to_vec(),
        })
    }

    /// Layers globals, translations and entity fields; later layers win.
    pub fn build_context(&self, entity: &EntityRecord, translations: &TranslationTable) -> Value {
        let mut context = self.globals.clone();
        for (key, value) in translations.iter() {
            context.insert(key.to_string(), Value::String(value.to_string()));
        }
        for (key, value) in entity.fields() {
            context.insert(key.to_string(), Value::String(value.to_string()));
        }
        Value::Object(context)
    }

    pub fn render_one(
        &mut self,
        mode: &Mode,
        entity: &EntityRecord,
        language: &str,
        translations: &TranslationTable,
    ) -> Result<String, TemplateError> {
        let name = self.resolve(mode, language)?;
        self.render_with(&name, entity, translations)
    }

    fn render_with(
        &self,
        name: &str,
        entity: &EntityRecord,
        translations: &TranslationTable,
    ) -> Result<String, TemplateError> {
        let context = self.build_context(entity, translations);
        Ok(self.registry.render(name, &context)?)
    }

    /// Writes `html/{TERR}/{LANG}/{nif}.html` for every selected entity and language.
    ///
    /// A path already in `claims` is reported as a collision and left to its
    /// first owner.
    pub fn render_entities(
        &mut self,
        entities: &[EntityRecord],
        catalog: &TranslationCatalog,
        request: &RenderRequest<'_>,
        claims: &mut OutputClaims,
    ) -> Result<RenderReport, TemplateError> {
        let selected: Vec<&EntityRecord> = entities
            .iter()
            .filter(|e| request.entity_name.is_none_or(|name| e.name() == name))
            .collect();
        let total = selected.len();
        info!("Rendering {} entities for mode '{}'", total, request.mode);

        let mut report = RenderReport::default();

        for (index, entity) in selected.into_iter().enumerate() {
            if !request.filters.territories.allows(entity.territory().as_str()) {
                continue;
            }
            info!("[{}/{}] Rendering infographic for '{}'", index + 1, total, entity.name());
            let stem = sanitize_filename(entity.nif());

            for language in entity.languages() {
                if !request.filters.languages.allows(language) {
                    continue;
                }
                let path = request.layout.artifact_path(
                    ArtifactKind::Html,
                    entity.territory(),
                    language,
                    &stem,
                );

                // Documents without a template never claim their path.
                let template = match self.resolve(request.mode, language) {
                    Ok(name) => name,
                    Err(TemplateError::NotFound { tried, .. }) => {
                        warn!("No template found for '{}' (tried {})", language, tried.join(", "));
                        report.missing_template += 1;
                        continue;
                    }
                    Err(e) => return Err(e),
                };

                if let Err(kept) = claims.claim(&path, entity.nif()) {
                    warn!(
                        "'{}' and '{}' both map to {}, keeping the first",
                        kept,
                        entity.nif(),
                        path.display()
                    );
                    let kept = kept.to_string();
                    report.collisions.push(Collision {
                        path,
                        kept,
                        dropped: entity.nif().to_string(),
                    });
                    continue;
                }

                if path.exists() && !request.regenerate {
                    info!("{} already exists", path.display());
                    report.existing += 1;
                    continue;
                }

                let html = self.render_with(&template, entity, catalog.load(language))?;
                write_document(&path, &html)?;
                debug!("Wrote {}", path.display());
                report.rendered.push(path);
            }
        }

        Ok(report)
    }
}

fn write_document(path: &Path, html: &str) -> Result<(), TemplateError> {
    let write_err = |source| TemplateError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, html).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geninfo_types::{AllowList, TerritoryCode};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn entity(territory: &str, nif: &str, name: &str, langs: &str) -> EntityRecord {
        let fields: BTreeMap<String, String> = [
            ("NIF", nif),
            ("Nombre", name),
            ("Idioma", langs),
            ("TXT001", "entity wins"),
            ("ind3d", "1,2<small>{{ TXT059 }}</small>"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        EntityRecord::new(TerritoryCode::new(territory), fields).unwrap()
    }

    fn catalog() -> TranslationCatalog {
        let master = "\
Código,Castellano,Català
TXT001,Hola,Hola
TXT059,mil,mil
TXT100,Empleo,Ocupació
";
        TranslationCatalog::from_reader(master.as_bytes()).unwrap()
    }

    struct Fixture {
        templates: TempDir,
        out: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let templates = tempfile::tempdir().unwrap();
            fs::write(
                templates.path().join("entidades.html"),
                "<h1>{{Nombre}}</h1><p>{{TXT100}}|{{TXT001}}|{{site}}|{{subrender ind3d}}</p>",
            )
            .unwrap();
            fs::write(
                templates.path().join("entidades_CAT.html"),
                "<h1>CAT {{Nombre}}</h1>",
            )
            .unwrap();
            Self {
                templates,
                out: tempfile::tempdir().unwrap(),
            }
        }

        fn renderer(&self) -> TemplateRenderer {
            let mut globals = Map::new();
            globals.insert("site".into(), Value::String("global".into()));
            globals.insert("TXT100".into(), Value::String("shadowed".into()));
            TemplateRenderer::new(self.templates.path(), globals, RendererOptions::default())
        }
    }

    fn request<'a>(
        mode: &'a Mode,
        layout: &'a OutputLayout,
        filters: &'a Filters,
        regenerate: bool,
    ) -> RenderRequest<'a> {
        RenderRequest {
            mode,
            layout,
            filters,
            entity_name: None,
            regenerate,
        }
    }

    #[test]
    fn renders_with_layered_context_and_language_fallback() {
        let fx = Fixture::new();
        let mut renderer = fx.renderer();
        let mode = Mode::new("entidades");
        let layout = OutputLayout::new(fx.out.path());
        let filters = Filters::default();

        let report = renderer
            .render_entities(
                &[entity("mad", "B1", "Coop Uno", "cas;cat")],
                &catalog(),
                &request(&mode, &layout, &filters, false),
                &mut OutputClaims::new(),
            )
            .unwrap();

        assert_eq!(report.rendered.len(), 2);
        let cas = fs::read_to_string(fx.out.path().join("html/MAD/CAS/B1.html")).unwrap();
        assert_eq!(cas, "<h1>Coop Uno</h1><p>Empleo|entity wins|global|1,2<small>mil</small></p>");
        let cat = fs::read_to_string(fx.out.path().join("html/MAD/CAT/B1.html")).unwrap();
        assert_eq!(cat, "<h1>CAT Coop Uno</h1>");
    }

    #[test]
    fn existing_documents_are_kept_unless_regenerating() {
        let fx = Fixture::new();
        let mut renderer = fx.renderer();
        let mode = Mode::new("entidades");
        let layout = OutputLayout::new(fx.out.path());
        let filters = Filters::default();
        let entities = [entity("MAD", "B1", "Coop Uno", "cas")];
        let path = fx.out.path().join("html/MAD/CAS/B1.html");

        let first = request(&mode, &layout, &filters, false);
        renderer
            .render_entities(&entities, &catalog(), &first, &mut OutputClaims::new())
            .unwrap();
        fs::write(&path, "edited").unwrap();

        let second = renderer
            .render_entities(&entities, &catalog(), &first, &mut OutputClaims::new())
            .unwrap();
        assert_eq!(second.existing, 1);
        assert!(second.rendered.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited");

        let forced = renderer
            .render_entities(
                &entities,
                &catalog(),
                &request(&mode, &layout, &filters, true),
                &mut OutputClaims::new(),
            )
            .unwrap();
        assert_eq!(forced.rendered, vec![path.clone()]);
        assert_ne!(fs::read_to_string(&path).unwrap(), "edited");
    }

    #[test]
    fn filters_and_name_narrow_the_output() {
        let fx = Fixture::new();
        let mut renderer = fx.renderer();
        let mode = Mode::new("entidades");
        let layout = OutputLayout::new(fx.out.path());
        let filters = Filters::new(AllowList::new(["mad"]), AllowList::new(["CAS"]));
        let entities = [
            entity("MAD", "B1", "Coop Uno", "cas;cat"),
            entity("MAD", "B2", "Coop Dos", "cas"),
            entity("CAT", "B3", "Coop Tres", "cas"),
        ];

        let mut req = request(&mode, &layout, &filters, false);
        req.entity_name = Some("Coop Dos");
        let report = renderer
            .render_entities(&entities, &catalog(), &req, &mut OutputClaims::new())
            .unwrap();
        assert_eq!(report.rendered, vec![fx.out.path().join("html/MAD/CAS/B2.html")]);

        req.entity_name = None;
        let report = renderer
            .render_entities(&entities, &catalog(), &req, &mut OutputClaims::new())
            .unwrap();
        assert_eq!(report.rendered, vec![fx.out.path().join("html/MAD/CAS/B1.html")]);
        assert_eq!(report.existing, 1);
        assert!(!fx.out.path().join("html/CAT").exists());
        assert!(!fx.out.path().join("html/MAD/CAT").exists());
    }

    #[test]
    fn colliding_identifiers_keep_the_first_entity() {
        let fx = Fixture::new();
        let mut renderer = fx.renderer();
        let mode = Mode::new("entidades");
        let layout = OutputLayout::new(fx.out.path());
        let filters = Filters::default();
        let entities = [
            entity("MAD", "B/1", "Primera", "cas"),
            entity("MAD", "B1", "Segunda", "cas"),
        ];

        let report = renderer
            .render_entities(
                &entities,
                &catalog(),
                &request(&mode, &layout, &filters, true),
                &mut OutputClaims::new(),
            )
            .unwrap();

        assert_eq!(report.rendered.len(), 1);
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].kept, "B/1");
        assert_eq!(report.collisions[0].dropped, "B1");
        let html = fs::read_to_string(fx.out.path().join("html/MAD/CAS/B1.html")).unwrap();
        assert!(html.contains("Primera"));
    }

    #[test]
    fn claims_carry_over_between_modes() {
        let fx = Fixture::new();
        fs::write(fx.templates.path().join("autonomas.html"), "<h1>AUT {{Nombre}}</h1>").unwrap();
        let mut renderer = fx.renderer();
        let layout = OutputLayout::new(fx.out.path());
        let filters = Filters::default();
        let entidades = Mode::new("entidades");
        let autonomas = Mode::new("autonomas");
        let mut claims = OutputClaims::new();

        let first = renderer
            .render_entities(
                &[entity("MAD", "B1", "Coop Uno", "cas")],
                &catalog(),
                &request(&entidades, &layout, &filters, true),
                &mut claims,
            )
            .unwrap();
        let second = renderer
            .render_entities(
                &[entity("MAD", "B1", "Coop Uno Autonoma", "cas")],
                &catalog(),
                &request(&autonomas, &layout, &filters, true),
                &mut claims,
            )
            .unwrap();

        assert_eq!(first.rendered.len(), 1);
        assert!(second.rendered.is_empty());
        assert_eq!(second.collisions.len(), 1);
        assert_eq!(second.collisions[0].kept, "B1");
        assert_eq!(claims.len(), 1);
        let html = fs::read_to_string(fx.out.path().join("html/MAD/CAS/B1.html")).unwrap();
        assert!(html.contains("Coop Uno</h1>"));
        assert!(!html.contains("AUT"));
    }

    #[test]
    fn claim_reports_the_first_owner() {
        let mut claims = OutputClaims::new();
        let path = Path::new("html/MAD/CAS/B1.html");
        assert_eq!(claims.claim(path, "B1"), Ok(()));
        assert_eq!(claims.claim(path, "B/1"), Err("B1"));
        assert_eq!(claims.claim(Path::new("html/MAD/CAT/B1.html"), "B1"), Ok(()));
        assert_eq!(claims.len(), 2);
    }

    #[test]
    fn missing_template_is_skipped_and_cached() {
        let fx = Fixture::new();
        let mut renderer = fx.renderer();
        let mode = Mode::new("desconocido");
        let layout = OutputLayout::new(fx.out.path());
        let filters = Filters::default();

        let report = renderer
            .render_entities(
                &[entity("MAD", "B1", "Uno", "cas;cat")],
                &catalog(),
                &request(&mode, &layout, &filters, false),
                &mut OutputClaims::new(),
            )
            .unwrap();
        assert_eq!(report.missing_template, 2);
        assert!(report.rendered.is_empty());

        // A template appearing later is not picked up within the same renderer.
        fs::write(fx.templates.path().join("desconocido.html"), "x").unwrap();
        assert!(matches!(
            renderer.resolve(&mode, "cas"),
            Err(TemplateError::NotFound { .. })
        ));
    }

    #[test]
    fn autoescape_escapes_plain_interpolation() {
        let fx = Fixture::new();
        fs::write(fx.templates.path().join("esc.html"), "{{Nombre}}").unwrap();
        let mut renderer = TemplateRenderer::new(
            fx.templates.path(),
            Map::new(),
            RendererOptions { autoescape: true },
        );
        let html = renderer
            .render_one(
                &Mode::new("esc"),
                &entity("MAD", "B1", "A & B", "cas"),
                "cas",
                catalog().load("cas"),
            )
            .unwrap();
        assert_eq!(html, "A &amp; B");
    }
}
