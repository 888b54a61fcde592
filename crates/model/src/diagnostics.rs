use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a dangling reference was encountered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceContext {
    Field,
    Join,
}

/// Recoverable conditions raised while building a schema graph.
///
/// None of these abort extraction: the offending element is dropped (or, for
/// `UnknownDataType`, defaulted) and the diagnostic is attached to the graph
/// so the report layer can surface it to the user.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("{context:?} reference to unknown table alias '{reference}'; element dropped")]
    DanglingReference {
        reference: String,
        context: ReferenceContext,
    },

    #[error("join predicate joins table '{alias}' to itself; edge dropped")]
    SelfJoin { alias: String },

    #[error("data source '{datasource}' has no tables; rendering empty sections")]
    EmptyGraph { datasource: String },

    #[error("field '{field}' has unknown datatype '{raw}'; defaulting to string")]
    UnknownDataType { field: String, raw: String },
}

impl Diagnostic {
    /// All current diagnostics are warnings; the variant exists so the report
    /// layer has a stable label to print.
    pub fn severity(&self) -> &'static str {
        "warning"
    }
}
