//! The vendor searchset bundle envelope
//!
//! List/search endpoints answer with
//! `{ "resourceType": "Bundle", "type": "searchset", "total": N,
//! "entry": [ { "resource": {...} } ] }`. The envelope is deserialized
//! directly into a typed [`Bundle`]; a malformed entry fails the whole
//! parse rather than yielding partial results.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use veyra_domain::{Result, VeyraError};

use crate::http::parse_json;

/// Typed searchset envelope wrapping a counted, ordered list of resources.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Bundle<T> {
    /// Always "Bundle" on the wire; tolerated when absent
    #[serde(default)]
    pub resource_type: Option<String>,

    /// Always "searchset" on the wire; tolerated when absent
    #[serde(rename = "type", default)]
    pub bundle_type: Option<String>,

    /// Number of matches; an absent total counts as zero
    #[serde(default)]
    pub total: u64,

    /// Matched resources in server order
    #[serde(default)]
    pub entry: Vec<BundleEntry<T>>,
}

/// One envelope entry.
#[derive(Debug, Deserialize)]
pub struct BundleEntry<T> {
    pub resource: T,
}

impl<T: DeserializeOwned> Bundle<T> {
    /// Deserialize an envelope from a raw response body.
    ///
    /// # Errors
    /// `VeyraError::InvalidResponse` when the envelope or any entry fails
    /// to deserialize. Never returns the empty-result sentinel.
    pub fn parse(body: &str) -> Result<Self> {
        parse_json(body)
    }
}

impl<T> Bundle<T> {
    /// The matched resources in original order.
    ///
    /// # Errors
    /// `VeyraError::EmptyResult` when the bundle matched nothing - a
    /// sentinel, not a failure, letting callers tell "zero matches" apart
    /// from a broken transport.
    pub fn resources(self) -> Result<Vec<T>> {
        if self.total == 0 {
            return Err(VeyraError::EmptyResult);
        }
        Ok(self.entry.into_iter().map(|e| e.resource).collect())
    }

    /// The matched resources, with zero matches flattened to an empty
    /// vector for callers that treat the two identically.
    #[must_use]
    pub fn resources_or_empty(self) -> Vec<T> {
        self.entry.into_iter().map(|e| e.resource).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Widget {
        id: String,
        name: String,
    }

    #[test]
    fn empty_bundle_yields_sentinel_not_parse_error() {
        let body = r#"{
            "type": "searchset",
            "total": 0,
            "entry": [],
            "resourceType": "Bundle"
        }"#;

        let bundle: Bundle<Widget> = Bundle::parse(body).unwrap();
        assert_eq!(bundle.total, 0);
        assert!(matches!(bundle.resources(), Err(VeyraError::EmptyResult)));

        let bundle: Bundle<Widget> = Bundle::parse(body).unwrap();
        assert!(bundle.resources_or_empty().is_empty());
    }

    #[test]
    fn entries_come_back_in_server_order() {
        let body = r#"{
            "resourceType": "Bundle",
            "type": "searchset",
            "total": 2,
            "entry": [
                { "resource": { "id": "b", "name": "second" } },
                { "resource": { "id": "a", "name": "first" } }
            ]
        }"#;

        let resources = Bundle::<Widget>::parse(body).unwrap().resources().unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].id, "b");
        assert_eq!(resources[1].id, "a");
    }

    #[test]
    fn malformed_entry_aborts_the_whole_parse() {
        let body = r#"{
            "total": 2,
            "entry": [
                { "resource": { "id": "a", "name": "first" } },
                { "resource": { "id": 42 } }
            ]
        }"#;

        let err = Bundle::<Widget>::parse(body).unwrap_err();
        assert!(matches!(err, VeyraError::InvalidResponse(_)));
    }

    #[test]
    fn absent_total_counts_as_zero() {
        let bundle: Bundle<Widget> = Bundle::parse("{}").unwrap();
        assert_eq!(bundle.total, 0);
        assert!(matches!(bundle.resources(), Err(VeyraError::EmptyResult)));
    }
}
