pub mod data_type;
pub mod field;
pub mod join;
pub mod table;
