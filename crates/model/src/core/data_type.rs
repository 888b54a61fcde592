use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt};

/// The normalized datatypes a workbook field can carry.
///
/// Workbook XML spells these in several ways (`"integer"` vs `"int"`,
/// `"real"` vs `"float"`); the lookup table below folds them into one enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Integer,
    Real,
    Boolean,
    Date,
    DateTime,
}

lazy_static! {
    static ref WORKBOOK_TYPE_MAP: HashMap<&'static str, DataType> = build_workbook_type_map();
}

impl DataType {
    /// Resolves a raw datatype string from the workbook metadata.
    pub fn from_workbook_type(type_name: &str) -> Result<Self, String> {
        let normalized = type_name.trim().to_ascii_lowercase();
        WORKBOOK_TYPE_MAP
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Unknown workbook datatype: {type_name}"))
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Real => "real",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::DateTime => "datetime",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn build_workbook_type_map() -> HashMap<&'static str, DataType> {
    let mut map = HashMap::new();
    map.insert("string", DataType::String);
    map.insert("str", DataType::String);
    map.insert("text", DataType::String);
    map.insert("integer", DataType::Integer);
    map.insert("int", DataType::Integer);
    map.insert("real", DataType::Real);
    map.insert("float", DataType::Real);
    map.insert("double", DataType::Real);
    map.insert("number", DataType::Real);
    map.insert("boolean", DataType::Boolean);
    map.insert("bool", DataType::Boolean);
    map.insert("date", DataType::Date);
    map.insert("datetime", DataType::DateTime);
    map.insert("timestamp", DataType::DateTime);
    map
}
