pub mod connection;
pub mod datasource;
