//! The structured output handed to the serialization/report layer.

use crate::{
    graph::SchemaGraph,
    render::{columns::ColumnList, joins::JoinInstructions, run_pass, tables::TableList},
};
use model::{diagnostics::Diagnostic, workbook::datasource::DataSourceMeta};
use serde::Serialize;

/// The migration artifacts for one data source: three line sequences, the
/// main-table alias, and everything the builder had to drop on the way. The
/// report layer writes these out unchanged.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SchemaArtifacts {
    pub datasource: String,
    pub table_list: Vec<String>,
    pub join_instructions: Vec<String>,
    pub column_list: Vec<String>,
    pub main_table: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SchemaArtifacts {
    /// Renders all three passes over a built graph.
    pub fn render(graph: &SchemaGraph) -> Self {
        SchemaArtifacts {
            datasource: graph.datasource().to_string(),
            table_list: run_pass(&TableList, graph),
            join_instructions: run_pass(&JoinInstructions, graph),
            column_list: run_pass(&ColumnList, graph),
            main_table: graph.main_table().map(|t| t.display_alias.clone()),
            diagnostics: graph.diagnostics().to_vec(),
        }
    }
}

/// Convenience for callers that do not need the graph afterwards: build,
/// render, discard.
pub fn extract_datasource(meta: &DataSourceMeta) -> SchemaArtifacts {
    let graph = SchemaGraph::build(meta);
    SchemaArtifacts::render(&graph)
}
