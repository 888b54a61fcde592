//! Rendering passes over a schema graph.
//!
//! Each pass is pure: it walks the immutable graph and accumulates lines in
//! a [`Renderer`], so rendering twice yields identical output.

use crate::graph::SchemaGraph;
use model::core::table::Table;

pub mod columns;
pub mod joins;
pub mod tables;

/// A rendering pass that can write itself into a [`Renderer`].
pub trait Render {
    fn render(&self, graph: &SchemaGraph, r: &mut Renderer);
}

/// Accumulates the output lines of one rendering pass.
pub struct Renderer {
    pub lines: Vec<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { lines: Vec::new() }
    }

    pub fn push_line(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Consumes the renderer and returns the accumulated lines.
    pub fn finish(self) -> Vec<String> {
        self.lines
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one pass and returns its lines.
pub fn run_pass(pass: &dyn Render, graph: &SchemaGraph) -> Vec<String> {
    let mut renderer = Renderer::new();
    pass.render(graph, &mut renderer);
    renderer.finish()
}

/// Wraps an identifier in double quotes only when it needs them: any
/// character outside `[A-Za-z0-9_]` (spaces, most prominently) forces
/// quoting; plain identifiers are left bare to keep the output readable.
pub fn quote_identifier(ident: &str) -> String {
    if needs_quoting(ident) {
        format!(r#""{ident}""#)
    } else {
        ident.to_string()
    }
}

fn needs_quoting(ident: &str) -> bool {
    ident.is_empty()
        || !ident
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Renders a table the way the import list spells it: the physical name,
/// plus an `as` alias when the alias differs.
pub fn render_table(table: &Table) -> String {
    if table.alias_is_redundant() {
        quote_identifier(&table.physical_name)
    } else {
        format!(
            "{} as {}",
            quote_identifier(&table.physical_name),
            quote_identifier(&table.display_alias)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_only_when_needed() {
        assert_eq!(quote_identifier("orders"), "orders");
        assert_eq!(quote_identifier("order_items_2"), "order_items_2");
        assert_eq!(quote_identifier("Home Teams"), "\"Home Teams\"");
        assert_eq!(quote_identifier("weird-name"), "\"weird-name\"");
        assert_eq!(quote_identifier(""), "\"\"");
    }

    #[test]
    fn test_render_table_omits_redundant_alias() {
        let plain = Table::new("orders", "orders");
        assert_eq!(render_table(&plain), "orders");

        let aliased = Table::new("nfl_teams", "Home Teams");
        assert_eq!(render_table(&aliased), "nfl_teams as \"Home Teams\"");
    }
}
