//! Scan bounds for prefix queries.
//!
//! A prefix query becomes the half-open range `[prefix, next_key(prefix))`.
//! `next_key` appends a single `0xFF` byte instead of computing a true
//! lexicographic successor. The resulting range covers the prefix itself and
//! every extension of it whose first extra byte is below `0xFF`; keys that
//! continue the prefix with `0xFF` fall outside it.

/// Returns the exclusive upper bound used for a prefix scan.
#[must_use]
pub fn next_key(prefix: &[u8]) -> Vec<u8> {
    let mut end = Vec::with_capacity(prefix.len() + 1);
    end.extend_from_slice(prefix);
    end.push(0xFF);
    end
}

/// Half-open key range `[start, end)`; `end == None` means unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start: Vec<u8>,
    pub end: Option<Vec<u8>>,
}

impl KeyRange {
    /// The whole keyspace.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            start: Vec::new(),
            end: None,
        }
    }

    /// All keys sharing `prefix`, bounded with [`next_key`].
    #[must_use]
    pub fn prefix(prefix: &[u8]) -> Self {
        Self {
            start: prefix.to_vec(),
            end: Some(next_key(prefix)),
        }
    }

    /// Range for a search box query: empty text scans everything.
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        if query.is_empty() {
            Self::all()
        } else {
            Self::prefix(query.as_bytes())
        }
    }

    #[must_use]
    pub fn contains(&self, key: &[u8]) -> bool {
        key >= self.start.as_slice() && self.end.as_deref().map_or(true, |end| key < end)
    }
}
