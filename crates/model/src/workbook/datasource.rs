use crate::{core::table::TableKind, workbook::connection::ConnectionInfo};
use serde::{Deserialize, Serialize};

/// Parsed metadata for one workbook, as produced by the external
/// workbook-parsing collaborator. This crate never reads workbook files
/// itself; everything below is already in memory when extraction starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkbookMeta {
    pub name: String,
    pub datasources: Vec<DataSourceMeta>,
}

/// One embedded connection definition plus its tables, fields, and join
/// predicates. Field and predicate order is source order from the workbook
/// XML and is significant downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSourceMeta {
    pub name: String,
    #[serde(default)]
    pub connection: ConnectionInfo,
    #[serde(default)]
    pub tables: Vec<TableRef>,
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
    #[serde(default)]
    pub relationships: Vec<JoinPredicate>,
    #[serde(default)]
    pub custom_sql: Vec<CustomSqlQuery>,
}

/// A table reference: the underlying database table (or custom-SQL relation
/// identifier) and the display alias it is used under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableRef {
    pub physical_name: String,
    pub alias: String,
    #[serde(default)]
    pub kind: TableKind,
    /// Marks the data source's designated primary connection; used only as a
    /// main-table tie-breaker.
    #[serde(default)]
    pub primary: bool,
}

/// A raw field record. `datatype` stays a string here; normalization happens
/// during extraction so unknown spellings can be reported, not rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldRecord {
    /// Column name in the physical schema (the workbook's "remote name").
    pub name: String,
    /// Caption shown in the workbook, if any.
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub datatype: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Display alias of the owning table. Absent for parameters.
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub is_calculated: bool,
    #[serde(default)]
    pub is_parameter: bool,
    #[serde(default)]
    pub formula: Option<String>,
}

/// One column-level equality predicate between two aliased tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinPredicate {
    pub left_alias: String,
    pub left_column: String,
    pub right_alias: String,
    pub right_column: String,
}

/// A custom-SQL relation's text, passed through verbatim to the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomSqlQuery {
    pub name: String,
    pub sql: String,
}
