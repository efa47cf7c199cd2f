use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod collect;
mod report;

#[derive(Debug, Parser)]
#[command(name = "sovscan")]
#[command(about = "Share-of-voice analytics for brand social data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect fresh records from YouTube and save a timestamped table
    Collect {
        /// Search keyword (repeatable); defaults to the built-in keyword set
        #[arg(long = "keyword", value_name = "KEYWORD")]
        keywords: Vec<String>,

        /// Output CSV path; defaults to a timestamped file in the reports dir
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute the share-of-voice report from a persisted table
    Report {
        /// Table to load; defaults to the newest CSV in the reports dir
        #[arg(long)]
        table: Option<PathBuf>,

        /// Also write the full report as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = sovscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Collect { keywords, output } => {
            collect::run_collect(&config, keywords, output).await
        }
        Commands::Report { table, json } => report::run_report(&config, table.as_deref(), json.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Commands};

    #[test]
    fn parses_collect_defaults() {
        let cli = Cli::try_parse_from(["sovscan", "collect"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Collect {
                ref keywords,
                output: None,
            } if keywords.is_empty()
        ));
    }

    #[test]
    fn parses_collect_with_keywords() {
        let cli = Cli::try_parse_from([
            "sovscan",
            "collect",
            "--keyword",
            "smart fan",
            "--keyword",
            "BLDC fan",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Collect { ref keywords, .. }
                if keywords == &["smart fan".to_string(), "BLDC fan".to_string()]
        ));
    }

    #[test]
    fn parses_collect_with_output() {
        let cli =
            Cli::try_parse_from(["sovscan", "collect", "--output", "out.csv"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Collect { output: Some(ref p), .. } if p.to_string_lossy() == "out.csv"
        ));
    }

    #[test]
    fn parses_report_defaults() {
        let cli = Cli::try_parse_from(["sovscan", "report"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Report {
                table: None,
                json: None,
            }
        ));
    }

    #[test]
    fn parses_report_with_table_and_json() {
        let cli = Cli::try_parse_from([
            "sovscan",
            "report",
            "--table",
            "reports/sov_extracted_20260101_000000.csv",
            "--json",
            "report.json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Report {
                table: Some(_),
                json: Some(_),
            }
        ));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["sovscan", "plot"]).is_err());
    }
}
