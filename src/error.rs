use thiserror::Error;

/// Fatal load failure. No partial dataset is ever produced alongside it.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    /// The store file could not be opened.
    #[error("data unavailable: cannot open store '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The relation is missing or could not be queried.
    #[error("data unavailable: cannot read relation '{relation}': {source}")]
    Relation {
        relation: String,
        #[source]
        source: rusqlite::Error,
    },

    /// The relation lacks one of the expected columns.
    #[error("data unavailable: relation '{relation}' has no column '{column}'")]
    MissingColumn { relation: String, column: String },

    /// A field did not map to its expected type.
    #[error("data unavailable: row {row}, column '{column}': {detail}")]
    MalformedValue {
        row: usize,
        column: String,
        detail: String,
    },
}

/// A widget label that cannot be turned into a filter constraint.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSelection {
    #[error("year selection '{0}' is not a number")]
    Year(String),
}
