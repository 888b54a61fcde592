use serde::{Deserialize, Serialize};

/// Connection attributes of a data source.
///
/// All values are opaque strings lifted straight out of the workbook XML and
/// passed through verbatim to the rendered connection-details block. Nothing
/// here is validated or dialled: there is no database connectivity in this
/// tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConnectionInfo {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub port: Option<String>,
    /// Driver class, e.g. "postgres" or "bigquery".
    #[serde(default)]
    pub class: Option<String>,
}
