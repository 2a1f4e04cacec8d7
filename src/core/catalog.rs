use indexmap::IndexSet;

use super::shared::CatalogIdx;

/// The deduplicated, insertion-ordered list of face-vertex tokens (`p/t/n`).
///
/// Tokens are keyed by their verbatim text: `1/1/1` and `01/1/1` are
/// distinct entries even though they refer to the same attribute values.
/// Each entry becomes exactly one vertex of the interleaved buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexCatalog {
    tokens: IndexSet<String>,
}

impl VertexCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the catalog index of `token`, appending it first if it has not
    /// been seen yet.
    pub fn get_or_insert(&mut self, token: &str) -> CatalogIdx {
        if let Some(idx) = self.tokens.get_index_of(token) {
            return CatalogIdx::from(idx);
        }
        let (idx, _) = self.tokens.insert_full(token.to_owned());
        CatalogIdx::from(idx)
    }

    pub fn get(&self, idx: CatalogIdx) -> Option<&str> {
        self.tokens.get_index(usize::from(idx)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over the entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (CatalogIdx, &str)> {
        self.tokens.iter()
            .enumerate()
            .map(|(i, token)| (CatalogIdx::from(i), token.as_str()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_order() {
        let mut catalog = VertexCatalog::new();
        let indices = ["1/1/1", "2/1/1", "3/1/1", "1/1/1", "3/1/1"]
            .iter()
            .map(|t| usize::from(catalog.get_or_insert(t)))
            .collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 1, 2, 0, 2]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.iter().map(|(_, t)| t).collect::<Vec<_>>(),
            vec!["1/1/1", "2/1/1", "3/1/1"]
        );
    }

    #[test]
    fn verbatim_keys() {
        let mut catalog = VertexCatalog::new();
        let a = catalog.get_or_insert("1/1/1");
        let b = catalog.get_or_insert("01/1/1");
        assert_ne!(a, b);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(b), Some("01/1/1"));
        assert_eq!(catalog.get(a), Some("1/1/1"));
        assert_eq!(catalog.get_or_insert("1/1/1"), a);
    }
}
