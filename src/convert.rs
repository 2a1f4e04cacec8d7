use std::path::{Path, PathBuf};

use crate::core::mesh::{InterleavedMesh, MeshStats};
use crate::core::shared::{join_decimals, join_display, ConfigType};
use crate::interleave::{self, IndexOutOfRange};
use crate::io::obj;
use crate::io::template::{self, TemplateValues};

#[derive(Debug, Clone)]
pub struct Config {
    input_extension: String,
    output_extension: String,
    template_path: PathBuf,
    list_separator: String,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            input_extension: "obj".to_string(),
            output_extension: "xml".to_string(),
            template_path: PathBuf::from("template"),
            list_separator: ", ".to_string(),
        }
    }
}

impl Config {
    pub fn with_input_extension(mut self, extension: impl Into<String>) -> Self {
        self.input_extension = extension.into();
        self
    }

    pub fn with_output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }

    pub fn with_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = path.into();
        self
    }

    pub fn with_list_separator(mut self, separator: impl Into<String>) -> Self {
        self.list_separator = separator.into();
        self
    }

    pub fn get_template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn get_list_separator(&self) -> &str {
        &self.list_separator
    }

    /// `<name>.<input extension>`
    pub fn input_path(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", name, self.input_extension))
    }

    /// `<name>.<output extension>`
    pub fn output_path(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", name, self.output_extension))
    }
}


#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error(transparent)]
    IndexOutOfRange(IndexOutOfRange),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("File '{}' cannot be found", .0.display())]
    MissingInputFile(PathBuf),
    #[error("Template file '{}' is missing", .0.display())]
    MissingTemplate(PathBuf),
    #[error("Input model lacks UV mapping. Model cannot be correctly created.")]
    MissingUvData,
}

impl From<obj::Err> for Err {
    fn from(err: obj::Err) -> Self {
        match err {
            obj::Err::Io(e) => Self::Io(e),
            obj::Err::MalformedInput { line: 0, reason } => Self::MalformedInput(reason),
            obj::Err::MalformedInput { line, reason } => {
                Self::MalformedInput(format!("line {}: {}", line, reason))
            }
            obj::Err::MissingFile(path) => Self::MissingInputFile(path),
            obj::Err::MissingUvData => Self::MissingUvData,
        }
    }
}

impl From<interleave::Err> for Err {
    fn from(err: interleave::Err) -> Self {
        match err {
            interleave::Err::IndexOutOfRange(e) => Self::IndexOutOfRange(e),
            err @ (interleave::Err::MalformedAttribute { .. } | interleave::Err::MalformedToken { .. }) => {
                Self::MalformedInput(err.to_string())
            }
        }
    }
}

impl From<template::Err> for Err {
    fn from(err: template::Err) -> Self {
        match err {
            template::Err::Io(e) => Self::Io(e),
            template::Err::Missing(path) => Self::MissingTemplate(path),
        }
    }
}


/// Outcome of [convert_file].
#[derive(Debug, Clone)]
pub struct Conversion {
    pub output: PathBuf,
    pub stats: MeshStats,
}


/// Parses and re-indexes `src`, then materializes its interleaved vertex buffer.
pub fn interleave_str(src: &str) -> Result<InterleavedMesh, Err> {
    let parsed = obj::parse_obj(src)?;
    Ok(interleave::interleave_obj(parsed)?)
}

/// Exposes `mode`, `min_extent`, `max_extent`, `indices`, `indices_end` and
/// `vertices`. `mode` is left out when no face had 2, 3 or 4 vertices.
pub fn template_values(mesh: &InterleavedMesh, cfg: &Config) -> Result<TemplateValues, Err> {
    let sep = cfg.get_list_separator();
    let indices_end = mesh.get_indices_end()
        .ok_or_else(|| Err::MalformedInput("the model has no faces".to_string()))?;

    let mut values = TemplateValues::new();
    if let Some(mode) = mesh.get_mode() {
        values.insert("mode", mode.as_str());
    }
    values.insert("min_extent", join_decimals(mesh.get_extent().get_min().into_array(), sep));
    values.insert("max_extent", join_decimals(mesh.get_extent().get_max().into_array(), sep));
    values.insert("indices", join_display(mesh.get_indices(), sep));
    values.insert("indices_end", indices_end.to_string());
    values.insert("vertices", join_decimals(mesh.get_vertices().iter().copied(), sep));
    Ok(values)
}

/// Converts obj text into the filled-in template, entirely in memory.
pub fn convert_str(src: &str, template: &str, cfg: &Config) -> Result<String, Err> {
    let mesh = interleave_str(src)?;
    let values = template_values(&mesh, cfg)?;
    Ok(template::render(template, &values))
}

/// Converts `<name>.obj` and writes `<output_name or name>.xml` next to it,
/// using the template at the configured path.
///
/// The output file is only created once everything else succeeded, so a failed
/// conversion leaves an existing output untouched.
pub fn convert_file(name: &str, output_name: Option<&str>, cfg: &Config) -> Result<Conversion, Err> {
    let parsed = obj::load_obj(cfg.input_path(name))?;
    let mesh = interleave::interleave_obj(parsed)?;
    let values = template_values(&mesh, cfg)?;
    let template = template::load_template(cfg.get_template_path())?;

    let output = cfg.output_path(output_name.unwrap_or(name));
    log::info!("Writing output.");
    std::fs::write(&output, template::render(&template, &values))?;

    Ok(Conversion { output, stats: mesh.get_stats() })
}


#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "\
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1
f 1/1/1 3/3/1 4/4/1
";

    #[test]
    fn values() {
        let mesh = interleave_str(SQUARE).unwrap();
        let values = template_values(&mesh, &Config::default()).unwrap();
        assert_eq!(values.get("mode"), Some("TRIANGLES"));
        assert_eq!(values.get("min_extent"), Some("-1.0, -1.0, 0.0"));
        assert_eq!(values.get("max_extent"), Some("1.0, 1.0, 0.0"));
        assert_eq!(values.get("indices"), Some("0, 1, 2, 0, 2, 3"));
        assert_eq!(values.get("indices_end"), Some("3"));
        assert_eq!(
            values.get("vertices"),
            Some("0.0, 0.0, 0.0, 0.0, 1.0, -1.0, -1.0, 0.0, \
                  1.0, 0.0, 0.0, 0.0, 1.0, 1.0, -1.0, 0.0, \
                  1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, \
                  0.0, 1.0, 0.0, 0.0, 1.0, -1.0, 1.0, 0.0")
        );
    }

    #[test]
    fn separator() {
        let mesh = interleave_str(SQUARE).unwrap();
        let cfg = Config::default().with_list_separator(",");
        let values = template_values(&mesh, &cfg).unwrap();
        assert_eq!(values.get("indices"), Some("0,1,2,0,2,3"));
    }

    #[test]
    fn render_in_memory() {
        let template = "<model mode=\"{{ mode }}\">\n<last>{{ indices_end }}</last>\n</model>\n";
        let out = convert_str(SQUARE, template, &Config::default()).unwrap();
        assert_eq!(out, "<model mode=\"TRIANGLES\">\n<last>3</last>\n</model>\n");
    }

    #[test]
    fn no_faces() {
        let src = "v 0 0 0\nvt 0 0\nvn 0 0 1\n";
        let mesh = interleave_str(src).unwrap();
        assert_eq!(mesh.num_vertices(), 0);
        assert!(matches!(template_values(&mesh, &Config::default()), Err(Err::MalformedInput(_))));
    }

    #[test]
    fn mode_is_not_exposed_without_supported_faces() {
        let src = "v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 1/1/1 1/1/1 1/1/1 1/1/1\n";
        let out = convert_str(src, "{{ mode }}\n{{ indices_end }}\n", &Config::default()).unwrap();
        assert_eq!(out, "{{ mode }}\n0\n");
    }

    #[test]
    fn error_taxonomy() {
        let cfg = Config::default();
        assert!(matches!(convert_str("v 0 0 0\n", "", &cfg), Err(Err::MissingUvData)));
        assert!(matches!(convert_str("vt 0 0\n", "", &cfg), Err(Err::MalformedInput(_))));
        assert!(matches!(
            convert_str("v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/2/1 1/1/1\n", "", &cfg),
            Err(Err::IndexOutOfRange(_))
        ));
        assert!(matches!(
            convert_str("v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1/1 1/1\n", "", &cfg),
            Err(Err::MalformedInput(_))
        ));
    }

    #[test]
    fn malformed_input_messages() {
        let cfg = Config::default();
        let err = convert_str("v 0 zero 0\nvt 0 0\n", "", &cfg).unwrap_err();
        assert_eq!(err.to_string(), "Malformed input: line 1: invalid position component 'zero'");

        let err = convert_str("vt 0 0\n", "", &cfg).unwrap_err();
        assert_eq!(err.to_string(), "Malformed input: the model has no position data");

        let err = convert_str("v 0 0 0\nvt 0.5 bogus\nvn 0 0 1\nf 1/1/1 1/1/1\n", "", &cfg).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed input: Invalid texture coordinate at line 2: invalid texture coordinate component 'bogus'"
        );
    }

    #[test]
    fn unreferenced_malformed_attributes() {
        let src = "v 0 0 0\nvt 0 0\nvt 0.5 bogus\nvn 0 0 1\nvn 0 0\nf 1/1/1 1/1/1 1/1/1\n";
        let out = convert_str(src, "{{ vertices }}\n", &Config::default()).unwrap();
        assert_eq!(out, "0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0\n");
    }

    #[test]
    fn missing_input_file() {
        let cfg = Config::default().with_template_path("no/such/template");
        let err = convert_file("no/such/model", None, &cfg).unwrap_err();
        assert!(matches!(&err, Err::MissingInputFile(path) if path == Path::new("no/such/model.obj")), "{err}");
    }

    #[test]
    fn paths() {
        let cfg = Config::default();
        assert_eq!(cfg.input_path("models/cube"), PathBuf::from("models/cube.obj"));
        assert_eq!(cfg.output_path("models/cube"), PathBuf::from("models/cube.xml"));
        assert_eq!(cfg.get_template_path(), Path::new("template"));

        let cfg = cfg.with_input_extension("txt").with_output_extension("sk");
        assert_eq!(cfg.input_path("a.b"), PathBuf::from("a.b.txt"));
        assert_eq!(cfg.output_path("a.b"), PathBuf::from("a.b.sk"));
    }
}
