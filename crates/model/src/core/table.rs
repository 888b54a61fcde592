use crate::core::field::Field;
use serde::{Deserialize, Serialize};

/// What backs a table reference in the workbook.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// A plain database table.
    #[default]
    Physical,
    /// A custom-SQL relation; `physical_name` is the relation's identifier
    /// and the SQL text travels with the data source, not the table.
    CustomSql,
}

/// One aliased table of a data source.
///
/// `display_alias` is unique within a data source. `physical_name` is not:
/// role-played tables (e.g. "Home Teams" and "Away Teams" both backed by
/// `nfl_teams`) produce two distinct `Table` entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Table {
    pub physical_name: String,
    /// May contain spaces; preserved verbatim for quoting at render time.
    pub display_alias: String,
    pub kind: TableKind,
    pub fields: Vec<Field>,
}

impl Table {
    pub fn new(physical_name: impl Into<String>, display_alias: impl Into<String>) -> Self {
        Table {
            physical_name: physical_name.into(),
            display_alias: display_alias.into(),
            kind: TableKind::Physical,
            fields: Vec::new(),
        }
    }

    /// Whether the alias is just the physical name again. Such tables render
    /// without an `as` suffix.
    pub fn alias_is_redundant(&self) -> bool {
        self.physical_name == self.display_alias
    }
}
