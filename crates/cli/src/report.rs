//! Plain-text setup guide assembly.
//!
//! Takes the rendered artifacts (and the graph they came from) and lays them
//! out as the sectioned guide a person follows to rebuild the model in the
//! target tool. Lines from the extractor are written unchanged; this module
//! only adds headers and indentation.

use extractor::{artifacts::SchemaArtifacts, graph::SchemaGraph};
use model::{core::field::Field, workbook::datasource::DataSourceMeta};

/// One extracted data source, ready for the guide.
pub struct GuideEntry<'a> {
    pub meta: &'a DataSourceMeta,
    pub graph: SchemaGraph,
    pub artifacts: SchemaArtifacts,
}

pub fn setup_guide(workbook_name: &str, entries: &[GuideEntry]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let title = format!("WORKBOOK SETUP GUIDE: {workbook_name}");
    let rule = "=".repeat(title.len());
    lines.push(rule.clone());
    lines.push(title);
    lines.push(rule);
    lines.push(String::new());

    for entry in entries {
        datasource_section(entry, &mut lines);
    }

    lines.join("\n")
}

fn section_header(title: &str, lines: &mut Vec<String>) {
    lines.push(format!("{title}:"));
    lines.push("-".repeat(title.len() + 1));
}

fn datasource_section(entry: &GuideEntry, lines: &mut Vec<String>) {
    let meta = entry.meta;
    let artifacts = &entry.artifacts;

    lines.push(format!("DATA SOURCE: {}", meta.name));
    lines.push("=".repeat(format!("DATA SOURCE: {}", meta.name).len()));
    lines.push(String::new());

    connection_section(meta, lines);

    if !artifacts.table_list.is_empty() {
        section_header("TABLES TO IMPORT", lines);
        for line in &artifacts.table_list {
            lines.push(format!("  {line}"));
        }
        lines.push(String::new());
    }

    if let Some(main_table) = &artifacts.main_table {
        lines.push(format!("MAIN TABLE: {main_table}"));
        lines.push(String::new());
    }

    if !meta.custom_sql.is_empty() {
        section_header("CUSTOM SQL QUERIES", lines);
        for query in &meta.custom_sql {
            lines.push(format!("{}:", query.name));
            for sql_line in query.sql.lines() {
                lines.push(format!("  {sql_line}"));
            }
            lines.push(String::new());
        }
    }

    if artifacts.join_instructions.is_empty() {
        lines.push("No relationships found".to_string());
        lines.push(String::new());
    } else {
        section_header("CREATE THESE RELATIONSHIPS IN THE TARGET MODEL", lines);
        for line in &artifacts.join_instructions {
            lines.push(line.clone());
        }
        lines.push(String::new());
    }

    let role_played = entry.graph.role_played_groups();
    if !role_played.is_empty() {
        section_header("ROLE-PLAYED TABLES", lines);
        for group in role_played {
            lines.push(format!("  {}", group.join(", ")));
        }
        lines.push(String::new());
    }

    if !artifacts.column_list.is_empty() {
        section_header("SQL COLUMN LIST", lines);
        for line in &artifacts.column_list {
            lines.push(format!("  {line}"));
        }
        lines.push(String::new());
    }

    parameters_section(&entry.graph, lines);
    calculated_section(&entry.graph, lines);

    if !artifacts.diagnostics.is_empty() {
        section_header("WARNINGS", lines);
        for diagnostic in &artifacts.diagnostics {
            lines.push(format!("  {}: {diagnostic}", diagnostic.severity()));
        }
        lines.push(String::new());
    }
}

fn connection_section(meta: &DataSourceMeta, lines: &mut Vec<String>) {
    let conn = &meta.connection;
    let value = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());

    section_header("CONNECTION DETAILS", lines);
    lines.push(format!("  Server: {}", value(&conn.server)));
    lines.push(format!("  Database: {}", value(&conn.database)));
    lines.push(format!("  Username: {}", value(&conn.username)));
    lines.push(format!("  Type: {}", value(&conn.class)));
    lines.push(format!("  Port: {}", value(&conn.port)));
    lines.push(String::new());
}

fn parameters_section(graph: &SchemaGraph, lines: &mut Vec<String>) {
    let mut parameters: Vec<&Field> = graph.parameters().iter().collect();
    if parameters.is_empty() {
        return;
    }
    parameters.sort_by_key(|f| f.display_name().to_string());

    section_header("PARAMETERS", lines);
    for field in parameters {
        if let Field::Parameter {
            display_name,
            datatype,
            formula,
        } = field
        {
            lines.push(format!("{display_name} ({datatype}):"));
            lines.push(format!("  {formula}"));
        }
    }
    lines.push(String::new());
}

fn calculated_section(graph: &SchemaGraph, lines: &mut Vec<String>) {
    let mut calculated = graph.calculated_fields();
    if calculated.is_empty() {
        return;
    }
    calculated.sort_by_key(|f| f.display_name().to_string());

    section_header("CALCULATED FIELDS", lines);
    for field in calculated {
        if let Field::Calculated {
            display_name,
            datatype,
            role,
            formula,
            ..
        } = field
        {
            let role_suffix = match role {
                Some(role) => format!(", {role:?}").to_lowercase(),
                None => String::new(),
            };
            lines.push(format!("{display_name} ({datatype}{role_suffix}):"));
            lines.push(format!("  {formula}"));
        }
    }
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::workbook::datasource::{FieldRecord, JoinPredicate, TableRef};

    fn sample_meta() -> DataSourceMeta {
        DataSourceMeta {
            name: "NFL Stats".to_string(),
            connection: model::workbook::connection::ConnectionInfo {
                server: Some("db.example.com".to_string()),
                database: Some("sports".to_string()),
                username: None,
                port: Some("5432".to_string()),
                class: Some("postgres".to_string()),
            },
            tables: vec![
                TableRef {
                    physical_name: "games".to_string(),
                    alias: "games".to_string(),
                    kind: Default::default(),
                    primary: false,
                },
                TableRef {
                    physical_name: "nfl_teams".to_string(),
                    alias: "Home Teams".to_string(),
                    kind: Default::default(),
                    primary: false,
                },
            ],
            fields: vec![FieldRecord {
                name: "week".to_string(),
                caption: None,
                datatype: Some("integer".to_string()),
                role: None,
                table: Some("games".to_string()),
                is_calculated: false,
                is_parameter: false,
                formula: None,
            }],
            relationships: vec![JoinPredicate {
                left_alias: "games".to_string(),
                left_column: "home_team_id".to_string(),
                right_alias: "Home Teams".to_string(),
                right_column: "team_id".to_string(),
            }],
            custom_sql: vec![],
        }
    }

    #[test]
    fn test_guide_contains_all_sections_in_order() {
        let meta = sample_meta();
        let graph = SchemaGraph::build(&meta);
        let artifacts = SchemaArtifacts::render(&graph);
        let entry = GuideEntry {
            meta: &meta,
            graph,
            artifacts,
        };

        let guide = setup_guide("season_review", &[entry]);

        let connection_at = guide.find("CONNECTION DETAILS:").unwrap();
        let tables_at = guide.find("TABLES TO IMPORT:").unwrap();
        let main_at = guide.find("MAIN TABLE: Home Teams").unwrap();
        let joins_at = guide
            .find("CREATE THESE RELATIONSHIPS IN THE TARGET MODEL:")
            .unwrap();
        let columns_at = guide.find("SQL COLUMN LIST:").unwrap();
        assert!(connection_at < tables_at);
        assert!(tables_at < main_at);
        assert!(main_at < joins_at);
        assert!(joins_at < columns_at);

        assert!(guide.contains("  Server: db.example.com"));
        assert!(guide.contains("  Username: N/A"));
        assert!(guide.contains("  nfl_teams as \"Home Teams\""));
        assert!(guide.contains(
            "1. LEFT JOIN nfl_teams as \"Home Teams\" ON games.home_team_id = \"Home Teams\".team_id"
        ));
        assert!(guide.contains("  games.week as week"));
    }

    #[test]
    fn test_empty_datasource_guide_reports_no_relationships() {
        let meta = DataSourceMeta {
            name: "empty".to_string(),
            connection: Default::default(),
            tables: vec![],
            fields: vec![],
            relationships: vec![],
            custom_sql: vec![],
        };
        let graph = SchemaGraph::build(&meta);
        let artifacts = SchemaArtifacts::render(&graph);
        let entry = GuideEntry {
            meta: &meta,
            graph,
            artifacts,
        };

        let guide = setup_guide("empty_workbook", &[entry]);
        assert!(guide.contains("No relationships found"));
        assert!(guide.contains("WARNINGS:"));
    }
}
