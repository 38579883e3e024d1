use geninfo::Config;
use geninfo::config::ExportConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ENTITIES_CSV: &str = "\
id,Codigo Territorio,tipo,notas,MAD,MAD.1,CAT,ZZZ
1,NIF,t,,B11111111,B22222222,B33333333,B44444444
2,Nombre,t,,Cooperativa Uno,Asociación Dos,Fundació Tres,Sin Territorio
3,Idioma,t,,cas;cat,cas,cat,cas
4,ind3d,n,,\"1.234.567,00 €\",950,12000,1
5,ind58,b,,Si,No,Si,No
";

pub const TERRITORIES_CSV: &str = "\
Código,Logo 1 reas,Logo 2 mercado,web territorio,email
MAD,reas_mad.png,mercado_mad.png,https://mad.example,mad@example.org
CAT,reas_cat.png,,https://cat.example,
";

pub const STRINGS_CSV: &str = "\
Código,Castellano,Català,Euskera,Galego
TXT001,Empleo,Ocupació,Enplegua,Emprego
TXT059,mil,mil,mila,mil
";

pub const TEMPLATE: &str = "<html><head><link rel=\"stylesheet\" href=\"../../static/css/site.css\"></head>\
<body><h1>{{Nombre}}</h1><p>{{TXT001}}: {{subrender ind3d}}</p>\
<p>{{#if (eq ind58 \"True\")}}{{year}}{{/if}}</p><img src=\"{{logo_reas}}\"></body></html>";

/// A scratch directory laid out like a production installation.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        write(root, "data/datos_entidades.csv", ENTITIES_CSV);
        write(root, "data/datos_territorios.csv", TERRITORIES_CSV);
        write(root, "translations/strings.csv", STRINGS_CSV);
        write(root, "template/entidades.html", TEMPLATE);
        write(root, "static/css/site.css", "body { margin: 0; }");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn output(&self) -> PathBuf {
        self.root().join("out")
    }

    pub fn config(&self) -> Config {
        let root = self.root();
        let mut config = Config {
            data_dir: root.join("data"),
            data_files: vec!["datos_entidades.csv".to_string()],
            territories_file: root.join("data/datos_territorios.csv"),
            translations_file: root.join("translations/strings.csv"),
            template_dir: root.join("template"),
            static_dir: root.join("static"),
            output_dir: self.output(),
            export: ExportConfig {
                chart_wait_secs: 0,
                ..ExportConfig::default()
            },
            ..Config::default()
        };
        config
            .globals
            .insert("year".to_string(), serde_json::Value::String("2024".to_string()));
        config
    }
}

pub fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture dir");
    }
    fs::write(path, contents).expect("write fixture");
}
