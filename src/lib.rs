// lib.rs

/// Contains the native objects: attribute tables, the vertex catalog,
/// extents and the interleaved mesh.
pub mod core;

/// Contains the interface between obj files, text templates and the native objects.
pub mod io;

/// Turns the vertex catalog into the interleaved vertex buffer.
pub mod interleave;

/// Ties parsing, interleaving and template output together.
pub mod convert;


/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::attribute::{AttributeTable, AttributeType};
    pub use crate::core::catalog::VertexCatalog;
    pub use crate::core::extent::Extent;
    pub use crate::core::mesh::{InterleavedMesh, MeshStats, Mode};
    pub use crate::core::shared::{CatalogIdx, ConfigType, NdVector};
    pub use crate::convert::{self, convert_file, convert_str, interleave_str, Config};
    pub use crate::interleave::CompositeKey;
    pub use crate::io::obj::{load_obj, parse_obj, ParsedObj};
    pub use crate::io::template::{render, TemplateValues};
}
