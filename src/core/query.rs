//! Query arguments: pagination normalization and lookup dispatch

use serde::{Deserialize, Serialize};

/// Page size used when the client does not supply `take`
pub const DEFAULT_TAKE: u64 = 100;

/// Concrete offset-based page bounds sent to a backend
///
/// No upper clamp is applied to `take`: capping or rejecting an excessive
/// page size is the backend's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    /// Number of records to skip
    pub skip: u64,

    /// Maximum number of records to return
    pub take: u64,
}

impl PageRange {
    /// Substitute defaults for missing client-supplied bounds
    ///
    /// `skip` defaults to 0 and `take` to [`DEFAULT_TAKE`].
    pub fn normalize(skip: Option<u64>, take: Option<u64>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            take: take.unwrap_or(DEFAULT_TAKE),
        }
    }

    /// `take` as a length bound for in-memory slicing
    pub fn take_len(&self) -> usize {
        usize::try_from(self.take).unwrap_or(usize::MAX)
    }
}

impl Default for PageRange {
    fn default() -> Self {
        Self::normalize(None, None)
    }
}

/// How a collection query reaches its backend
///
/// Chosen once per invocation, before any backend call is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Fetch exactly one record by identifier
    ById(String),

    /// Fetch a bounded page of records
    Page(PageRange),
}

impl Lookup {
    /// Pick the lookup for a query's arguments
    ///
    /// A present, non-empty `id` bypasses pagination entirely.
    pub fn from_args(id: Option<&str>, skip: Option<u64>, take: Option<u64>) -> Self {
        match id {
            Some(id) if !id.is_empty() => Lookup::ById(id.to_string()),
            _ => Lookup::Page(PageRange::normalize(skip, take)),
        }
    }
}

/// Result of a collection query
///
/// Keeps "looked up directly" apart from "a page that happens to hold one
/// record"; both flatten into the sequence the query API declares.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    /// The single record returned by an identifier lookup
    ById(T),

    /// The records of a page lookup, in backend order
    Page(Vec<T>),
}

impl<T> Listing<T> {
    pub fn is_by_id(&self) -> bool {
        matches!(self, Listing::ById(_))
    }

    pub fn len(&self) -> usize {
        match self {
            Listing::ById(_) => 1,
            Listing::Page(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a sequence; an identifier lookup becomes a sequence of one
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::ById(item) => vec![item],
            Listing::Page(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_defaults() {
        let range = PageRange::normalize(None, None);
        assert_eq!(range, PageRange { skip: 0, take: 100 });
        assert_eq!(PageRange::default(), range);
    }

    #[test]
    fn test_normalize_keeps_values_without_clamping() {
        assert_eq!(
            PageRange::normalize(Some(10), Some(5)),
            PageRange { skip: 10, take: 5 }
        );
        assert_eq!(
            PageRange::normalize(Some(0), Some(10_000)),
            PageRange {
                skip: 0,
                take: 10_000
            }
        );
        assert_eq!(PageRange::normalize(None, Some(0)).take, 0);
        assert_eq!(PageRange::normalize(Some(u64::MAX), None).skip, u64::MAX);
    }

    #[test]
    fn test_lookup_by_id_ignores_pagination() {
        assert_eq!(
            Lookup::from_args(Some("42"), Some(10), Some(5)),
            Lookup::ById("42".to_string())
        );
    }

    #[test]
    fn test_lookup_empty_id_falls_back_to_page() {
        assert_eq!(
            Lookup::from_args(Some(""), None, Some(5)),
            Lookup::Page(PageRange { skip: 0, take: 5 })
        );
        assert_eq!(
            Lookup::from_args(None, None, None),
            Lookup::Page(PageRange::default())
        );
    }

    #[test]
    fn test_listing_shapes() {
        let direct = Listing::ById("a");
        assert!(direct.is_by_id());
        assert_eq!(direct.len(), 1);
        assert_eq!(direct.into_vec(), vec!["a"]);

        let page: Listing<&str> = Listing::Page(vec![]);
        assert!(!page.is_by_id());
        assert!(page.is_empty());
        assert!(page.into_vec().is_empty());
    }
}
