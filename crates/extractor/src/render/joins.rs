use crate::{
    graph::SchemaGraph,
    render::{Render, Renderer, quote_identifier, render_table},
};

/// The numbered join-instruction list, in builder order.
///
/// Each line reads `N. LEFT JOIN <right table> ON <left>.<col> = <right>.<col>`.
/// Duplicate edges in the source metadata show up as duplicate lines; hiding
/// them would mask an upstream data-quality problem.
pub struct JoinInstructions;

impl Render for JoinInstructions {
    fn render(&self, graph: &SchemaGraph, r: &mut Renderer) {
        for (i, edge) in graph.edges().iter().enumerate() {
            // The right alias always resolves: unresolvable predicates never
            // became edges.
            let right_table = graph
                .table_by_alias(&edge.right_alias)
                .map(render_table)
                .unwrap_or_else(|| quote_identifier(&edge.right_alias));

            r.push_line(format!(
                "{}. {} {} ON {}.{} = {}.{}",
                i + 1,
                edge.join_type.sql_keyword(),
                right_table,
                quote_identifier(&edge.left_alias),
                quote_identifier(&edge.left_column),
                quote_identifier(&edge.right_alias),
                quote_identifier(&edge.right_column),
            ));
        }
    }
}
