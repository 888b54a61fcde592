use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Extract migration artifacts from parsed workbook metadata
    Extract {
        #[arg(long, help = "Parsed workbook metadata JSON file")]
        input: String,

        #[arg(
            long,
            help = "If specified, writes the output to this file instead of stdout"
        )]
        output: Option<String>,

        #[arg(
            long,
            help = "If set, emits the structured artifacts as JSON instead of a setup guide"
        )]
        json: bool,
    },
    /// Summarize data sources and their diagnostics without writing artifacts
    Inspect {
        #[arg(long, help = "Parsed workbook metadata JSON file")]
        input: String,
    },
}
