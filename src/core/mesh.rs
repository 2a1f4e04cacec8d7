use std::fmt;

use serde::Serialize;

use super::attribute::AttributeType;
use super::catalog::VertexCatalog;
use super::extent::Extent;
use super::shared::CatalogIdx;

/// Primitive type of the mesh, derived from the number of vertices on a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    Lines,
    Triangles,
    Quads,
}

impl Mode {
    /// Returns the mode for a face with `arity` vertices, or `None` for arities
    /// other than 2, 3 and 4.
    pub fn from_arity(arity: usize) -> Option<Self> {
        match arity {
            2 => Some(Self::Lines),
            3 => Some(Self::Triangles),
            4 => Some(Self::Quads),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lines => "LINES",
            Self::Triangles => "TRIANGLES",
            Self::Quads => "QUADS",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// A mesh re-indexed into a single index stream over an interleaved vertex buffer.
///
/// Every catalog entry owns one block of [InterleavedMesh::STRIDE] scalars in
/// `vertices`: texture coordinate (2), normal (3), position (3), in that order.
#[derive(Debug, Clone)]
pub struct InterleavedMesh {
    pub(crate) mode: Option<Mode>,
    pub(crate) catalog: VertexCatalog,
    pub(crate) indices: Vec<CatalogIdx>,
    pub(crate) extent: Extent,
    pub(crate) vertices: Vec<f64>,
}

impl InterleavedMesh {
    pub const STRIDE: usize = AttributeType::TextureCoordinate.get_num_components()
        + AttributeType::Normal.get_num_components()
        + AttributeType::Position.get_num_components();

    /// `None` if no face had 2, 3 or 4 vertices.
    pub fn get_mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn get_catalog(&self) -> &VertexCatalog {
        &self.catalog
    }

    pub fn get_indices(&self) -> &[CatalogIdx] {
        &self.indices
    }

    /// The largest value of the index stream, which is `catalog.len() - 1`.
    pub fn get_indices_end(&self) -> Option<CatalogIdx> {
        self.indices.iter().copied().max()
    }

    pub fn get_extent(&self) -> &Extent {
        &self.extent
    }

    pub fn get_vertices(&self) -> &[f64] {
        &self.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / Self::STRIDE
    }

    /// Returns the interleaved block of the `idx`-th catalog entry.
    pub fn get_vertex(&self, idx: CatalogIdx) -> Option<&[f64]> {
        let start = usize::from(idx) * Self::STRIDE;
        self.vertices.get(start..start + Self::STRIDE)
    }

    pub fn get_stats(&self) -> MeshStats {
        MeshStats {
            mode: self.mode,
            num_vertices: self.num_vertices(),
            num_indices: self.indices.len(),
            indices_end: self.get_indices_end().map(usize::from),
            min_extent: self.extent.get_min().into_array(),
            max_extent: self.extent.get_max().into_array(),
        }
    }
}


/// Summary of a conversion, serializable for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshStats {
    pub mode: Option<Mode>,
    pub num_vertices: usize,
    pub num_indices: usize,
    pub indices_end: Option<usize>,
    pub min_extent: [f64; 3],
    pub max_extent: [f64; 3],
}
