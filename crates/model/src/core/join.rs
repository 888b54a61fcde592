use serde::{Deserialize, Serialize};

/// Join kinds the workbook relationship model can express. Workbooks only
/// ever emit LEFT joins for relationship predicates today.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JoinType {
    #[default]
    Left,
}

impl JoinType {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            JoinType::Left => "LEFT JOIN",
        }
    }
}

/// Cardinality direction relative to the main table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CardinalityHint {
    #[default]
    ManyToOne,
}

/// One directed join between two aliased tables.
///
/// Aliases are weak references into the schema graph; both are guaranteed to
/// resolve by the time an edge exists (unresolvable predicates never become
/// edges).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinEdge {
    pub left_alias: String,
    pub left_column: String,
    pub right_alias: String,
    pub right_column: String,
    pub join_type: JoinType,
    pub cardinality_hint: CardinalityHint,
}
