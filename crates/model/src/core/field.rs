use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};

/// How a field is used in the workbook's analytical model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    Dimension,
    Measure,
}

/// A normalized field record.
///
/// Each variant carries only the attributes meaningful to its kind; the
/// renderer matches exhaustively instead of probing for attribute presence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Field {
    /// A physical column of an owning table.
    Regular {
        /// Column name in the underlying database table.
        original_name: String,
        /// Caption shown in the workbook; falls back to the original name.
        display_name: String,
        datatype: DataType,
        role: Option<FieldRole>,
        /// Display alias of the owning table. A weak reference: the table is
        /// owned by the schema graph, not by the field.
        owning_table: String,
    },
    /// A field derived by a formula. Has no physical column. Calculations
    /// may live on a table or at data-source level.
    Calculated {
        display_name: String,
        datatype: DataType,
        role: Option<FieldRole>,
        formula: String,
        owning_table: Option<String>,
    },
    /// A workbook-level parameter. Not attached to any table.
    Parameter {
        display_name: String,
        datatype: DataType,
        formula: String,
    },
}

impl Field {
    pub fn display_name(&self) -> &str {
        match self {
            Field::Regular { display_name, .. }
            | Field::Calculated { display_name, .. }
            | Field::Parameter { display_name, .. } => display_name,
        }
    }

    pub fn datatype(&self) -> DataType {
        match self {
            Field::Regular { datatype, .. }
            | Field::Calculated { datatype, .. }
            | Field::Parameter { datatype, .. } => *datatype,
        }
    }

    /// The owning table's display alias, if the field belongs to a table.
    pub fn owning_table(&self) -> Option<&str> {
        match self {
            Field::Regular { owning_table, .. } => Some(owning_table),
            Field::Calculated { owning_table, .. } => owning_table.as_deref(),
            Field::Parameter { .. } => None,
        }
    }

    /// True for fields with no physical column behind them.
    pub fn is_calculated(&self) -> bool {
        !matches!(self, Field::Regular { .. })
    }
}
