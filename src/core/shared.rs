use std::fmt;
use std::ops;

use serde::Serialize;

/// Position of an entry in the vertex catalog. The index stream is a sequence of these.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CatalogIdx(usize);

impl fmt::Debug for CatalogIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for CatalogIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<usize> for CatalogIdx {
    fn from(idx: usize) -> Self {
        Self(idx)
    }
}

impl From<CatalogIdx> for usize {
    fn from(idx: CatalogIdx) -> Self {
        idx.0
    }
}


pub trait ConfigType {
    fn default()-> Self;
}


/// An array of `N` components of type `T`. Attribute values (positions, texture
/// coordinates, normals) are stored as `NdVector`s so that their arity is part of
/// the type rather than a property checked at runtime.
#[derive(Clone, Copy, PartialEq)]
pub struct NdVector<const N: usize, T> {
    data: [T; N],
}

impl<const N: usize, T> NdVector<N, T> {
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_array(self) -> [T; N] {
        self.data
    }
}

impl<const N: usize, T> NdVector<N, T>
    where T: Copy + PartialOrd
{
    /// Component-wise minimum.
    pub fn elem_min(self, other: Self) -> Self {
        let mut out = self;
        for (o, x) in out.data.iter_mut().zip(other.data) {
            if x < *o {
                *o = x;
            }
        }
        out
    }

    /// Component-wise maximum.
    pub fn elem_max(self, other: Self) -> Self {
        let mut out = self;
        for (o, x) in out.data.iter_mut().zip(other.data) {
            if x > *o {
                *o = x;
            }
        }
        out
    }
}

impl<const N: usize, T> From<[T; N]> for NdVector<N, T> {
    fn from(data: [T; N]) -> Self {
        NdVector { data }
    }
}

impl<const N: usize, T> ops::Index<usize> for NdVector<N, T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<const N: usize, T> fmt::Debug for NdVector<N, T>
    where T: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.data)
    }
}


/// Formats a scalar with its shortest round-trip representation.
/// Whole values keep a trailing `.0`, e.g. `1.0`, `-0.5`, `0.1`.
pub fn format_decimal(value: f64) -> String {
    format!("{:?}", value)
}

/// Joins the items with `separator` using `Display`.
pub fn join_display<I>(items: I, separator: &str) -> String
    where I: IntoIterator,
          I::Item: fmt::Display,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push_str(&item.to_string());
    }
    out
}

/// Joins the scalars with `separator` using [format_decimal].
pub fn join_decimals<I>(values: I, separator: &str) -> String
    where I: IntoIterator<Item = f64>
{
    join_display(values.into_iter().map(format_decimal), separator)
}
