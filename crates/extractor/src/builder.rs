//! Builds join edges from relationship predicates, in source order.

use crate::resolver::AliasResolver;
use model::{
    core::join::{CardinalityHint, JoinEdge, JoinType},
    diagnostics::{Diagnostic, ReferenceContext},
    workbook::datasource::JoinPredicate,
};
use tracing::warn;

/// Consumes relationship predicates and emits join edges.
///
/// Predicate order is preserved exactly; ties are never broken by name sort.
/// Semantically identical predicates appearing twice produce two edges: the
/// duplication is in the source metadata and is kept visible downstream.
pub struct JoinGraphBuilder<'a> {
    resolver: &'a AliasResolver,
    edges: Vec<JoinEdge>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> JoinGraphBuilder<'a> {
    pub fn new(resolver: &'a AliasResolver) -> Self {
        JoinGraphBuilder {
            resolver,
            edges: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Appends one edge per resolvable predicate. Predicates referencing an
    /// unknown alias, or joining a table to itself, are dropped with a
    /// diagnostic and processing continues.
    pub fn add_predicate(&mut self, predicate: &JoinPredicate) {
        let left = self.resolver.resolve(&predicate.left_alias);
        let right = self.resolver.resolve(&predicate.right_alias);

        let (left, right) = match (left, right) {
            (Some(left), Some(right)) => (left, right),
            (unresolved_left, _) => {
                let reference = if unresolved_left.is_none() {
                    predicate.left_alias.clone()
                } else {
                    predicate.right_alias.clone()
                };
                warn!("dropping join predicate: unknown table alias '{reference}'");
                self.diagnostics.push(Diagnostic::DanglingReference {
                    reference,
                    context: ReferenceContext::Join,
                });
                return;
            }
        };

        if left == right {
            let alias = self.resolver.table(left).display_alias.clone();
            warn!("dropping self-join on table alias '{alias}'");
            self.diagnostics.push(Diagnostic::SelfJoin { alias });
            return;
        }

        // Aliases are stored with the casing of the table set, not of the
        // predicate, so rendering stays consistent with the table list.
        self.edges.push(JoinEdge {
            left_alias: self.resolver.table(left).display_alias.clone(),
            left_column: predicate.left_column.clone(),
            right_alias: self.resolver.table(right).display_alias.clone(),
            right_column: predicate.right_column.clone(),
            join_type: JoinType::Left,
            cardinality_hint: CardinalityHint::ManyToOne,
        });
    }

    pub fn finish(self) -> (Vec<JoinEdge>, Vec<Diagnostic>) {
        (self.edges, self.diagnostics)
    }
}
