use clap::{Parser, Subcommand};
use jar_hell::application::dto::OutputFormat;
use std::path::PathBuf;

/// Inspect Maven packages analyzed by a jar hell server
#[derive(Parser, Debug)]
#[command(name = "jar-hell")]
#[command(version)]
#[command(
    about = "Inspect size, bytecode and license metrics of Maven packages and explore their dependency trees",
    long_about = None
)]
pub struct Args {
    /// Base URL of the jar hell server
    #[arg(long, global = true, env = "JAR_HELL_SERVER", value_name = "URL")]
    pub server: Option<String>,

    /// Path to a config file (defaults to ./jar-hell.config.yml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// File holding the recently viewed packages
    #[arg(long, global = true, env = "JAR_HELL_STATE_FILE", value_name = "FILE")]
    pub state_file: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search Maven Central for packages
    Search {
        /// Free-text query, e.g. "slf4j"
        query: String,
    },
    /// List the versions of an artifact grouped into series
    Versions {
        /// groupId:artifactId, optionally with a version to highlight
        coordinate: String,
    },
    /// Show a package report, analyzing the package first if needed
    Show {
        /// groupId:artifactId:version[:classifier]
        gav: String,
        /// Dependency tree levels to include
        #[arg(short, long)]
        depth: Option<usize>,
    },
    /// Print the dependency tree of a package
    Tree {
        /// groupId:artifactId:version[:classifier]
        gav: String,
        /// Dependency tree levels to expand
        #[arg(short, long)]
        depth: Option<usize>,
    },
    /// Explore the dependency tree interactively
    Explore {
        /// groupId:artifactId:version[:classifier]
        gav: String,
    },
    /// Open a route such as / or /packages/groupId:artifactId[:version]
    Open {
        route: String,
    },
    /// List recently viewed packages
    Recent,
    /// List the most recently analyzed packages
    Latest,
    /// Print the number of analyzed packages
    Count,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_show_with_globals() {
        let args = Args::try_parse_from([
            "jar-hell",
            "show",
            "org.slf4j:slf4j-api:2.0.9",
            "--depth",
            "2",
            "--format",
            "json",
            "--server",
            "http://localhost:9000",
        ])
        .unwrap();
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.server.as_deref(), Some("http://localhost:9000"));
        match args.command {
            Command::Show { gav, depth } => {
                assert_eq!(gav, "org.slf4j:slf4j-api:2.0.9");
                assert_eq!(depth, Some(2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let result = Args::try_parse_from(["jar-hell", "count", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["jar-hell"]).is_err());
    }
}
