use crate::{
    graph::SchemaGraph,
    render::{Render, Renderer, quote_identifier},
};
use model::core::field::Field;
use std::collections::{HashMap, HashSet};

/// The SQL column list, grouped by table in first-seen order.
///
/// Each line reads `<alias>.<original_name> as <display_name>`. When the same
/// display name appears in two different tables (role-played tables make this
/// routine), every occurrence after the first-seen one is suffixed with its
/// table's physical name. The collision index lives on the stack here and is
/// rebuilt per data source; nothing leaks across graphs.
pub struct ColumnList;

impl Render for ColumnList {
    fn render(&self, graph: &SchemaGraph, r: &mut Renderer) {
        let collisions = CollisionIndex::build(graph);

        for (table_idx, table) in graph.tables().iter().enumerate() {
            for field in graph.fields_of(table) {
                let Field::Regular {
                    original_name,
                    display_name,
                    ..
                } = field
                else {
                    continue;
                };

                let rendering_name = if collisions.needs_suffix(display_name, table_idx) {
                    format!("{display_name} ({})", table.physical_name)
                } else {
                    display_name.clone()
                };

                r.push_line(format!(
                    "{}.{} as {}",
                    quote_identifier(&table.display_alias),
                    quote_identifier(original_name),
                    rendering_name,
                ));
            }
        }
    }
}

/// Cross-table display-name collisions, case-insensitive, scoped to one data
/// source. The first-seen table keeps the bare name.
struct CollisionIndex {
    first_table_for: HashMap<String, usize>,
    tables_with: HashMap<String, HashSet<usize>>,
}

impl CollisionIndex {
    fn build(graph: &SchemaGraph) -> Self {
        let mut first_table_for: HashMap<String, usize> = HashMap::new();
        let mut tables_with: HashMap<String, HashSet<usize>> = HashMap::new();

        for (table_idx, table) in graph.tables().iter().enumerate() {
            for field in graph.fields_of(table) {
                let key = field.display_name().to_lowercase();
                first_table_for.entry(key.clone()).or_insert(table_idx);
                tables_with.entry(key).or_default().insert(table_idx);
            }
        }

        CollisionIndex {
            first_table_for,
            tables_with,
        }
    }

    fn needs_suffix(&self, display_name: &str, table_idx: usize) -> bool {
        let key = display_name.to_lowercase();
        let collides = self
            .tables_with
            .get(&key)
            .is_some_and(|tables| tables.len() > 1);
        collides && self.first_table_for.get(&key) != Some(&table_idx)
    }
}
