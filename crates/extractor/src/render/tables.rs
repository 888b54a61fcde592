use crate::{
    graph::SchemaGraph,
    render::{Render, Renderer, render_table},
};

/// The table-import list: one line per table in first-seen order.
pub struct TableList;

impl Render for TableList {
    fn render(&self, graph: &SchemaGraph, r: &mut Renderer) {
        for table in graph.tables() {
            r.push_line(render_table(table));
        }
    }
}
