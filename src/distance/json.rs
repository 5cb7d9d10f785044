//! JSON encoding for distance matrices.
//!
//! The format is `{"rows": [[0, 12, null], ...]}`, where `null` stands for a
//! missing edge. JSON has no infinity, so `null` is the only way to write one.

use serde::{Deserialize, Serialize};

use super::DistanceMatrix;
use crate::error::Result;

#[derive(Debug, Serialize, Deserialize)]
struct MatrixDocument {
    rows: Vec<Vec<Option<f64>>>,
}

impl DistanceMatrix {
    /// Parses a matrix from its JSON document form.
    ///
    /// # Examples
    ///
    /// ```
    /// use held_karp::distance::DistanceMatrix;
    ///
    /// let dm = DistanceMatrix::from_json_str(r#"{"rows": [[0, 3], [null, 0]]}"#).unwrap();
    /// assert_eq!(dm.get(0, 1), 3.0);
    /// assert!(!dm.has_edge(1, 0));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: MatrixDocument = serde_json::from_str(json)?;
        let rows = doc
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|d| d.unwrap_or(super::NO_EDGE))
                    .collect::<Vec<f64>>()
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Serializes the matrix, writing missing edges as `null`.
    pub fn to_json_string(&self) -> Result<String> {
        let doc = MatrixDocument {
            rows: self
                .rows()
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|d| d.is_finite().then_some(d))
                        .collect::<Vec<_>>()
                })
                .collect(),
        };
        Ok(serde_json::to_string(&doc)?)
    }
}
