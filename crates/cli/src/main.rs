use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use extractor::{artifacts::SchemaArtifacts, graph::SchemaGraph};
use model::workbook::datasource::WorkbookMeta;
use report::GuideEntry;
use tracing::{Level, info, warn};

mod commands;
mod error;
mod output;
mod report;

#[derive(Parser)]
#[command(
    name = "schemaport",
    version = "0.1.0",
    about = "BI workbook schema migration tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            json,
        } => {
            let workbook = load_workbook(&input)?;
            let entries = extract_all(&workbook);

            if json {
                let artifacts: Vec<SchemaArtifacts> =
                    entries.iter().map(|e| e.artifacts.clone()).collect();
                let json = output::artifacts_json(&artifacts)?;
                output::write_or_print(&json, output.as_deref())?;
            } else {
                let guide = report::setup_guide(&workbook.name, &entries);
                output::write_or_print(&guide, output.as_deref())?;
            }
        }
        Commands::Inspect { input } => {
            let workbook = load_workbook(&input)?;
            for datasource in &workbook.datasources {
                let graph = SchemaGraph::build(datasource);
                print_summary(&graph);
            }
        }
    }

    Ok(())
}

fn load_workbook(path: &str) -> Result<WorkbookMeta, CliError> {
    let source = std::fs::read_to_string(path)?;
    let workbook: WorkbookMeta = serde_json::from_str(&source)?;
    info!(
        "Loaded workbook '{}' with {} data source(s)",
        workbook.name,
        workbook.datasources.len()
    );
    Ok(workbook)
}

fn extract_all(workbook: &WorkbookMeta) -> Vec<GuideEntry<'_>> {
    let mut entries = Vec::new();
    for datasource in &workbook.datasources {
        let graph = SchemaGraph::build(datasource);
        for diagnostic in graph.diagnostics() {
            warn!("{}: {diagnostic}", datasource.name);
        }
        let artifacts = SchemaArtifacts::render(&graph);
        entries.push(GuideEntry {
            meta: datasource,
            graph,
            artifacts,
        });
    }
    entries
}

fn print_summary(graph: &SchemaGraph) {
    println!("Data source '{}':", graph.datasource());
    println!("-----------------------------");
    println!("{:<16} {}", "Tables", graph.tables().len());
    println!("{:<16} {}", "Join edges", graph.edges().len());
    println!("{:<16} {}", "Parameters", graph.parameters().len());
    println!(
        "{:<16} {}",
        "Calculated",
        graph.calculated_fields().len()
    );
    let main_table = graph
        .main_table()
        .map(|t| t.display_alias.clone())
        .unwrap_or_else(|| "n/a".to_string());
    println!("{:<16} {}", "Main table", main_table);
    for diagnostic in graph.diagnostics() {
        println!("{:<16} {}", "Warning", diagnostic);
    }
    println!();
}
