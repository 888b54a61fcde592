//! The schema graph: one data source's tables, fields, and join edges.

use crate::{builder::JoinGraphBuilder, resolver::AliasResolver};
use model::{
    core::{
        data_type::DataType,
        field::{Field, FieldRole},
        join::JoinEdge,
        table::Table,
    },
    diagnostics::{Diagnostic, ReferenceContext},
    workbook::datasource::{DataSourceMeta, FieldRecord},
};
use std::collections::HashMap;
use tracing::warn;

/// All tables, fields, and join edges of exactly one data source.
///
/// Built once from parsed metadata, immutable afterwards, discarded after
/// rendering. First-seen table order is an explicit invariant held by the
/// resolver's `Vec`, not a property of any map's iteration order.
pub struct SchemaGraph {
    datasource: String,
    resolver: AliasResolver,
    edges: Vec<JoinEdge>,
    parameters: Vec<Field>,
    /// Calculated fields with no owning table (data-source level).
    loose_calculated: Vec<Field>,
    diagnostics: Vec<Diagnostic>,
}

impl SchemaGraph {
    /// Builds the graph for one data source. Never fails: malformed elements
    /// are dropped (or defaulted) with diagnostics and extraction continues.
    pub fn build(meta: &DataSourceMeta) -> Self {
        let mut resolver = AliasResolver::from_table_refs(&meta.tables);
        let mut diagnostics = Vec::new();
        let mut parameters = Vec::new();
        let mut loose_calculated = Vec::new();

        if meta.tables.is_empty() {
            diagnostics.push(Diagnostic::EmptyGraph {
                datasource: meta.name.clone(),
            });
        }

        for record in &meta.fields {
            attach_field(
                record,
                &mut resolver,
                &mut parameters,
                &mut loose_calculated,
                &mut diagnostics,
            );
        }

        let mut builder = JoinGraphBuilder::new(&resolver);
        for predicate in &meta.relationships {
            builder.add_predicate(predicate);
        }
        let (edges, join_diagnostics) = builder.finish();
        diagnostics.extend(join_diagnostics);

        SchemaGraph {
            datasource: meta.name.clone(),
            resolver,
            edges,
            parameters,
            loose_calculated,
            diagnostics,
        }
    }

    pub fn datasource(&self) -> &str {
        &self.datasource
    }

    /// Tables in first-seen order from the source metadata.
    pub fn tables(&self) -> &[Table] {
        self.resolver.tables()
    }

    /// Join edges in builder order (== predicate source order).
    pub fn edges(&self) -> &[JoinEdge] {
        &self.edges
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn table_by_alias(&self, alias: &str) -> Option<&Table> {
        self.resolver.resolve(alias).map(|id| self.resolver.table(id))
    }

    /// Physical fields of a table, sorted by original name. Calculated
    /// fields are excluded: they have no column to render. The sort is part
    /// of the contract; output must diff identically across runs.
    pub fn fields_of<'a>(&self, table: &'a Table) -> Vec<&'a Field> {
        let mut fields: Vec<&Field> = table.fields.iter().filter(|f| !f.is_calculated()).collect();
        fields.sort_by(|a, b| {
            let key_a = match a {
                Field::Regular { original_name, .. } => original_name.as_str(),
                _ => a.display_name(),
            };
            let key_b = match b {
                Field::Regular { original_name, .. } => original_name.as_str(),
                _ => b.display_name(),
            };
            key_a.cmp(key_b)
        });
        fields
    }

    /// All calculated fields, table-owned first (in first-seen table order),
    /// then data-source-level ones.
    pub fn calculated_fields(&self) -> Vec<&Field> {
        self.tables()
            .iter()
            .flat_map(|t| t.fields.iter())
            .filter(|f| matches!(f, Field::Calculated { .. }))
            .chain(self.loose_calculated.iter())
            .collect()
    }

    pub fn parameters(&self) -> &[Field] {
        &self.parameters
    }

    /// Aliases sharing a physical table, for informational output only.
    pub fn role_played_groups(&self) -> Vec<Vec<String>> {
        self.resolver.role_played_groups()
    }

    /// The fact-level table used as the rendering anchor.
    ///
    /// The table targeted by the most join edges wins outright. On a tie the
    /// designated primary connection wins if one is marked; otherwise the
    /// first table in first-seen order does.
    pub fn main_table(&self) -> Option<&Table> {
        let tables = self.tables();
        if tables.is_empty() {
            return None;
        }

        let mut inbound: HashMap<String, usize> = HashMap::new();
        for edge in &self.edges {
            *inbound.entry(edge.right_alias.to_lowercase()).or_insert(0) += 1;
        }

        // Inbound edge count per table, aligned to first-seen order.
        let counts: Vec<usize> = tables
            .iter()
            .map(|t| {
                inbound
                    .get(&t.display_alias.to_lowercase())
                    .copied()
                    .unwrap_or(0)
            })
            .collect();

        let max = counts.iter().copied().max().unwrap_or(0);
        let mut at_max = counts.iter().enumerate().filter(|(_, count)| **count == max);

        let (leader, _) = at_max.next()?;
        if at_max.next().is_none() {
            return Some(&tables[leader]);
        }

        if let Some(primary) = self.resolver.primary_alias()
            && let Some(table) = self.table_by_alias(primary)
        {
            return Some(table);
        }
        tables.first()
    }
}

/// Normalizes one raw field record and attaches it to its owner.
fn attach_field(
    record: &FieldRecord,
    resolver: &mut AliasResolver,
    parameters: &mut Vec<Field>,
    loose_calculated: &mut Vec<Field>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let display_name = record
        .caption
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(&record.name)
        .to_string();

    let datatype = match record.datatype.as_deref() {
        None => DataType::String,
        Some(raw) => match DataType::from_workbook_type(raw) {
            Ok(datatype) => datatype,
            Err(_) => {
                diagnostics.push(Diagnostic::UnknownDataType {
                    field: display_name.clone(),
                    raw: raw.to_string(),
                });
                DataType::String
            }
        },
    };

    let role = match record.role.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("dimension") => Some(FieldRole::Dimension),
        Some("measure") => Some(FieldRole::Measure),
        _ => None,
    };

    if record.is_parameter {
        parameters.push(Field::Parameter {
            display_name,
            datatype,
            formula: record.formula.clone().unwrap_or_default(),
        });
        return;
    }

    // Resolve the owning table if one is named. A dangling alias drops the
    // field (calculated fields without a table stay at data-source level).
    let owner = match record.table.as_deref() {
        Some(reference) => match resolver.resolve(reference) {
            Some(id) => Some(id),
            None => {
                warn!("dropping field '{display_name}': unknown table alias '{reference}'");
                diagnostics.push(Diagnostic::DanglingReference {
                    reference: reference.to_string(),
                    context: ReferenceContext::Field,
                });
                return;
            }
        },
        None => None,
    };

    if record.is_calculated {
        let field = Field::Calculated {
            display_name,
            datatype,
            role,
            formula: record.formula.clone().unwrap_or_default(),
            owning_table: owner.map(|id| resolver.table(id).display_alias.clone()),
        };
        match owner {
            Some(id) => resolver.table_mut(id).fields.push(field),
            None => loose_calculated.push(field),
        }
        return;
    }

    match owner {
        Some(id) => {
            let owning_table = resolver.table(id).display_alias.clone();
            resolver.table_mut(id).fields.push(Field::Regular {
                original_name: record.name.clone(),
                display_name,
                datatype,
                role,
                owning_table,
            });
        }
        None => {
            // A physical column with no owning table cannot be placed.
            warn!("dropping field '{display_name}': no owning table reference");
            diagnostics.push(Diagnostic::DanglingReference {
                reference: String::new(),
                context: ReferenceContext::Field,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::workbook::datasource::{JoinPredicate, TableRef};

    fn table_ref(physical: &str, alias: &str) -> TableRef {
        TableRef {
            physical_name: physical.to_string(),
            alias: alias.to_string(),
            kind: Default::default(),
            primary: false,
        }
    }

    fn predicate(left: &str, left_col: &str, right: &str, right_col: &str) -> JoinPredicate {
        JoinPredicate {
            left_alias: left.to_string(),
            left_column: left_col.to_string(),
            right_alias: right.to_string(),
            right_column: right_col.to_string(),
        }
    }

    fn field(name: &str, caption: Option<&str>, table: Option<&str>) -> FieldRecord {
        FieldRecord {
            name: name.to_string(),
            caption: caption.map(str::to_string),
            datatype: Some("string".to_string()),
            role: None,
            table: table.map(str::to_string),
            is_calculated: false,
            is_parameter: false,
            formula: None,
        }
    }

    fn datasource(
        tables: Vec<TableRef>,
        fields: Vec<FieldRecord>,
        relationships: Vec<JoinPredicate>,
    ) -> DataSourceMeta {
        DataSourceMeta {
            name: "ds".to_string(),
            connection: Default::default(),
            tables,
            fields,
            relationships,
            custom_sql: vec![],
        }
    }

    #[test]
    fn test_tables_are_distinct_pairs_in_first_seen_order() {
        let meta = datasource(
            vec![
                table_ref("games", "games"),
                table_ref("nfl_teams", "Home Teams"),
                table_ref("nfl_teams", "Home Teams"),
                table_ref("nfl_teams", "Away Teams"),
            ],
            vec![],
            vec![],
        );
        let graph = SchemaGraph::build(&meta);
        let aliases: Vec<&str> = graph
            .tables()
            .iter()
            .map(|t| t.display_alias.as_str())
            .collect();
        assert_eq!(aliases, vec!["games", "Home Teams", "Away Teams"]);
    }

    #[test]
    fn test_dangling_field_is_dropped_with_diagnostic() {
        let meta = datasource(
            vec![table_ref("games", "games")],
            vec![
                field("game_id", None, Some("games")),
                field("team_name", None, Some("teams")),
            ],
            vec![],
        );
        let graph = SchemaGraph::build(&meta);

        assert_eq!(graph.tables()[0].fields.len(), 1);
        assert_eq!(
            graph.diagnostics(),
            &[Diagnostic::DanglingReference {
                reference: "teams".to_string(),
                context: ReferenceContext::Field,
            }]
        );
    }

    #[test]
    fn test_fields_of_excludes_calculated_and_sorts_by_original_name() {
        let mut meta = datasource(
            vec![table_ref("games", "games")],
            vec![
                field("week", None, Some("games")),
                field("attendance", None, Some("games")),
            ],
            vec![],
        );
        meta.fields.push(FieldRecord {
            name: "Win Rate".to_string(),
            caption: None,
            datatype: Some("real".to_string()),
            role: Some("measure".to_string()),
            table: Some("games".to_string()),
            is_calculated: true,
            is_parameter: false,
            formula: Some("[wins] / [games_played]".to_string()),
        });

        let graph = SchemaGraph::build(&meta);
        let table = &graph.tables()[0];
        let names: Vec<&str> = graph
            .fields_of(table)
            .iter()
            .map(|f| f.display_name())
            .collect();
        assert_eq!(names, vec!["attendance", "week"]);
        assert_eq!(graph.calculated_fields().len(), 1);
    }

    #[test]
    fn test_parameters_are_kept_apart_from_tables() {
        let mut meta = datasource(vec![table_ref("games", "games")], vec![], vec![]);
        meta.fields.push(FieldRecord {
            name: "Season".to_string(),
            caption: None,
            datatype: Some("integer".to_string()),
            role: None,
            table: None,
            is_calculated: false,
            is_parameter: true,
            formula: Some("2023".to_string()),
        });

        let graph = SchemaGraph::build(&meta);
        assert_eq!(graph.parameters().len(), 1);
        assert!(graph.tables()[0].fields.is_empty());
    }

    #[test]
    fn test_unknown_datatype_defaults_to_string_with_diagnostic() {
        let mut meta = datasource(vec![table_ref("games", "games")], vec![], vec![]);
        meta.fields.push(FieldRecord {
            datatype: Some("geometry".to_string()),
            ..field("venue_location", None, Some("games"))
        });

        let graph = SchemaGraph::build(&meta);
        let table = &graph.tables()[0];
        assert_eq!(table.fields[0].datatype(), DataType::String);
        assert_eq!(
            graph.diagnostics(),
            &[Diagnostic::UnknownDataType {
                field: "venue_location".to_string(),
                raw: "geometry".to_string(),
            }]
        );
    }

    #[test]
    fn test_main_table_prefers_most_targeted_table() {
        // B is targeted twice, C once: B wins outright.
        let meta = datasource(
            vec![
                table_ref("a", "A"),
                table_ref("b", "B"),
                table_ref("c", "C"),
            ],
            vec![],
            vec![
                predicate("A", "b_id", "B", "id"),
                predicate("C", "b_id", "B", "id"),
                predicate("A", "c_id", "C", "id"),
            ],
        );
        let graph = SchemaGraph::build(&meta);
        assert_eq!(graph.main_table().unwrap().display_alias, "B");
    }

    #[test]
    fn test_main_table_tie_falls_back_to_first_seen_table() {
        // A→B and A→C: B and C tie on inbound count, no primary mark, so the
        // first table in first-seen order (A) is the anchor.
        let meta = datasource(
            vec![
                table_ref("a", "A"),
                table_ref("b", "B"),
                table_ref("c", "C"),
            ],
            vec![],
            vec![
                predicate("A", "b_id", "B", "id"),
                predicate("A", "c_id", "C", "id"),
            ],
        );
        let graph = SchemaGraph::build(&meta);
        assert_eq!(graph.main_table().unwrap().display_alias, "A");
    }

    #[test]
    fn test_main_table_tie_prefers_designated_primary() {
        let mut tables = vec![
            table_ref("a", "A"),
            table_ref("b", "B"),
            table_ref("c", "C"),
        ];
        tables[2].primary = true;
        let meta = datasource(
            tables,
            vec![],
            vec![
                predicate("A", "b_id", "B", "id"),
                predicate("A", "c_id", "C", "id"),
            ],
        );
        let graph = SchemaGraph::build(&meta);
        assert_eq!(graph.main_table().unwrap().display_alias, "C");
    }

    #[test]
    fn test_empty_datasource_builds_with_warning() {
        let meta = datasource(vec![], vec![], vec![]);
        let graph = SchemaGraph::build(&meta);
        assert!(graph.tables().is_empty());
        assert!(graph.main_table().is_none());
        assert_eq!(
            graph.diagnostics(),
            &[Diagnostic::EmptyGraph {
                datasource: "ds".to_string()
            }]
        );
    }
}
