use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;

use crate::core::attribute::{parse_components, AttributeTable, AttributeType, RawAttribute};
use crate::core::catalog::VertexCatalog;
use crate::core::extent::{Extent, ExtentBuilder};
use crate::core::mesh::Mode;
use crate::core::shared::CatalogIdx;

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
    #[error("Input file '{}' does not exist", .0.display())]
    MissingFile(PathBuf),
    #[error("Input model lacks UV mapping. Model cannot be correctly created.")]
    MissingUvData,
}

/// Result of the single forward pass over an obj file.
#[derive(Debug, Clone)]
pub struct ParsedObj {
    pub(crate) mode: Option<Mode>,
    pub(crate) catalog: VertexCatalog,
    pub(crate) indices: Vec<CatalogIdx>,
    pub(crate) extent: Extent,
    pub(crate) attributes: AttributeTable,
}

impl ParsedObj {
    pub fn get_mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn get_catalog(&self) -> &VertexCatalog {
        &self.catalog
    }

    pub fn get_indices(&self) -> &[CatalogIdx] {
        &self.indices
    }

    pub fn get_extent(&self) -> &Extent {
        &self.extent
    }

    pub fn get_attributes(&self) -> &AttributeTable {
        &self.attributes
    }
}


pub fn load_obj<P: AsRef<Path> + Debug>(path: P) -> Result<ParsedObj, Err> {
    log::info!("Reading input model file {:?}.", path);
    let path = path.as_ref();
    let src = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Err::MissingFile(path.to_path_buf()),
        _ => Err::Io(e),
    })?;
    parse_obj(&src)
}

/// Reads positions, texture coordinates, normals and faces from `src` and
/// re-indexes the faces over a catalog of distinct `p/t/n` tokens.
///
/// Lines other than `v`, `vt`, `vn` and `f` are ignored. `vt` and `vn` lines
/// are stored as written and only parsed when a face refers to them.
pub fn parse_obj(src: &str) -> Result<ParsedObj, Err> {
    log::info!("Calculating indices...");
    let mut reindexer = Reindexer::new();
    for (i, line) in src.lines().enumerate() {
        reindexer.push_line(i + 1, line)?;
    }
    reindexer.finish()
}


/// Accumulates the state of the forward pass.
struct Reindexer {
    mode: Option<Mode>,
    catalog: VertexCatalog,
    indices: Vec<CatalogIdx>,
    extent: ExtentBuilder,
    attributes: AttributeTable,
}

impl Reindexer {
    fn new() -> Self {
        Self {
            mode: None,
            catalog: VertexCatalog::new(),
            indices: Vec::new(),
            extent: ExtentBuilder::new(),
            attributes: AttributeTable::new(),
        }
    }

    fn push_line(&mut self, line: usize, text: &str) -> Result<(), Err> {
        let mut fields = text.split_whitespace();
        let Some(keyword) = fields.next() else {
            return Ok(());
        };
        match keyword {
            "f" => self.push_face(line, fields),
            "v" => {
                let position = parse_components::<3>(AttributeType::Position, fields)
                    .map_err(|reason| Err::MalformedInput { line, reason })?;
                self.extent.add(position);
                self.attributes.push_position(position);
            }
            "vt" => self.attributes.push_tex_coord(raw(line, fields)),
            "vn" => self.attributes.push_normal(raw(line, fields)),
            _ => {}
        }
        Ok(())
    }

    fn push_face(&mut self, line: usize, fields: SplitWhitespace<'_>) {
        let tokens = fields.collect::<Vec<_>>();

        if self.mode.is_none() {
            self.mode = Mode::from_arity(tokens.len());
            if self.mode.is_none() {
                log::warn!(
                    "Face at line {} has {} vertices; the mode is taken from a later face.",
                    line, tokens.len()
                );
            }
        }

        for token in tokens {
            let idx = self.catalog.get_or_insert(token);
            self.indices.push(idx);
        }
    }

    fn finish(self) -> Result<ParsedObj, Err> {
        let Self { mode, catalog, indices, extent, attributes } = self;

        log::debug!(
            "Read {} positions, {} texture coordinates, {} normals; {} distinct vertices over {} indices.",
            attributes.len(AttributeType::Position),
            attributes.len(AttributeType::TextureCoordinate),
            attributes.len(AttributeType::Normal),
            catalog.len(),
            indices.len(),
        );

        if attributes.len(AttributeType::TextureCoordinate) == 0 {
            return Err(Err::MissingUvData);
        }

        let extent = extent.build()
            .ok_or_else(|| Err::MalformedInput {
                line: 0,
                reason: "the model has no position data".to_string(),
            })?;

        Ok(ParsedObj { mode, catalog, indices, extent, attributes })
    }
}


fn raw(line: usize, fields: SplitWhitespace<'_>) -> RawAttribute {
    RawAttribute::new(line, fields.collect::<Vec<_>>().join(" "))
}
