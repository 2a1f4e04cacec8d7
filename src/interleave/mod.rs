use std::num::IntErrorKind;
use std::str::FromStr;

use crate::core::attribute::{AttributeTable, AttributeType, RawAttribute};
use crate::core::catalog::VertexCatalog;
use crate::core::mesh::InterleavedMesh;
use crate::core::shared::{CatalogIdx, NdVector};
use crate::io::obj::ParsedObj;

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error(transparent)]
    IndexOutOfRange(#[from] IndexOutOfRange),
    #[error("Invalid {attribute} at line {line}: {reason}")]
    MalformedAttribute { attribute: AttributeType, line: usize, reason: String },
    #[error("Catalog entry {catalog_idx} '{token}' is not of the form p/t/n")]
    MalformedToken { token: String, catalog_idx: CatalogIdx },
}

/// A face token refers to an attribute value that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Catalog entry {catalog_idx} '{token}' refers to {attribute} {index}, but there are only {len}"
)]
pub struct IndexOutOfRange {
    pub attribute: AttributeType,
    /// The 1-based index as written in the token, saturated to the range of `i64`.
    pub index: i64,
    pub len: usize,
    pub token: String,
    pub catalog_idx: CatalogIdx,
}


/// The three 1-based attribute indices of a `p/t/n` face token.
///
/// Indices too large for `i64` saturate, so they still resolve to an
/// out-of-range attribute rather than a malformed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    pub position: i64,
    pub tex_coord: i64,
    pub normal: i64,
}

impl FromStr for CompositeKey {
    type Err = ();

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut parts = token.split('/');
        let mut next = || -> Result<i64, ()> {
            match parts.next().ok_or(())?.parse::<i64>() {
                Ok(index) => Ok(index),
                Err(e) => match e.kind() {
                    IntErrorKind::PosOverflow => Ok(i64::MAX),
                    IntErrorKind::NegOverflow => Ok(i64::MIN),
                    _ => Err(()),
                },
            }
        };
        let key = Self {
            position: next()?,
            tex_coord: next()?,
            normal: next()?,
        };
        if parts.next().is_some() {
            return Err(());
        }
        Ok(key)
    }
}


/// Materializes the interleaved vertex buffer of `obj` and assembles the final mesh.
pub fn interleave_obj(obj: ParsedObj) -> Result<InterleavedMesh, Err> {
    log::info!("Calculating vertices...");
    let vertices = interleave(&obj.catalog, &obj.attributes)?;
    let ParsedObj { mode, catalog, indices, extent, .. } = obj;
    Ok(InterleavedMesh { mode, catalog, indices, extent, vertices })
}

/// Builds one block per catalog entry, in catalog order: texture coordinate,
/// normal, then position.
///
/// Texture coordinates and normals are parsed here, so only the lines some
/// face refers to have to be well formed.
pub fn interleave(catalog: &VertexCatalog, attributes: &AttributeTable) -> Result<Vec<f64>, Err> {
    let mut vertices = Vec::with_capacity(catalog.len() * InterleavedMesh::STRIDE);
    for (catalog_idx, token) in catalog.iter() {
        let key = token.parse::<CompositeKey>()
            .map_err(|_| Err::MalformedToken { token: token.to_owned(), catalog_idx })?;

        let lookup = Lookup { token, catalog_idx };
        let tex_coord = lookup.parse::<2>(attributes.get_tex_coords(), AttributeType::TextureCoordinate, key.tex_coord)?;
        let normal = lookup.parse::<3>(attributes.get_normals(), AttributeType::Normal, key.normal)?;
        let position = lookup.get(attributes.get_positions(), AttributeType::Position, key.position)?;

        vertices.extend_from_slice(tex_coord.as_slice());
        vertices.extend_from_slice(normal.as_slice());
        vertices.extend_from_slice(position.as_slice());
    }
    log::debug!("Interleaved {} vertices.", catalog.len());
    Ok(vertices)
}

struct Lookup<'a> {
    token: &'a str,
    catalog_idx: CatalogIdx,
}

impl Lookup<'_> {
    fn get<'t, T>(
        &self,
        table: &'t [T],
        attribute: AttributeType,
        index: i64,
    ) -> Result<&'t T, IndexOutOfRange> {
        usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| table.get(i))
            .ok_or_else(|| IndexOutOfRange {
                attribute,
                index,
                len: table.len(),
                token: self.token.to_owned(),
                catalog_idx: self.catalog_idx,
            })
    }

    fn parse<const N: usize>(
        &self,
        table: &[RawAttribute],
        attribute: AttributeType,
        index: i64,
    ) -> Result<NdVector<N, f64>, Err> {
        let raw = self.get(table, attribute, index)?;
        raw.parse::<N>(attribute)
            .map_err(|reason| Err::MalformedAttribute { attribute, line: raw.get_line(), reason })
    }
}
