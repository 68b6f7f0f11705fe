//! CLI command definitions for the `skillforge` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod config;
pub mod generate;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Generate structured learning skill trees with an LLM.
#[derive(Parser)]
#[command(name = "skillforge", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a skill tree for a domain.
    #[command(alias = "gen")]
    Generate {
        /// Domain to build the tree for (e.g., "前端开发", "Rust").
        domain: String,

        /// Proficiency level: beginner, intermediate or advanced.
        #[arg(long, short, default_value = "beginner")]
        level: String,

        /// Output language code (defaults to the configured language).
        #[arg(long)]
        language: Option<String>,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(long, short, default_value_t = 3001, env = "PORT")]
        port: u16,

        /// Host address to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Show the effective configuration (API keys are never printed).
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_with_globals() {
        let cli = Cli::try_parse_from([
            "skillforge",
            "generate",
            "前端开发",
            "--level",
            "advanced",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate {
                domain,
                level,
                language,
            } => {
                assert_eq!(domain, "前端开发");
                assert_eq!(level, "advanced");
                assert!(language.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_serve_host_default() {
        let cli = Cli::try_parse_from(["skillforge", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { host, .. } => assert_eq!(host, "127.0.0.1"),
            _ => panic!("expected serve"),
        }
    }
}
