//! bom-diff: hierarchical bill-of-materials comparison tool.

use anyhow::Result;
use bom_diff::cli::{self, DeepOptions, DiffOptions, OutputFormat};
use bom_diff::diff::ChangeScope;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bom-diff")]
#[command(version)]
#[command(about = "Hierarchical BOM comparison and diff tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected
    1  Changes detected
    2  Error occurred

EXAMPLES:
    # Compare two BOM versions
    bom-diff diff before.json after.json

    # Material-level changes only, as JSON
    bom-diff diff before.json after.json --scope materials -o json

    # Schema-agnostic comparison of arbitrary JSON exports
    bom-diff deep before.json after.json --exclude modified_datetime")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// CLI-facing scope names, mapped onto the engine's [`ChangeScope`].
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ScopeArg {
    /// Raw-material leaves only
    Materials,
    /// Root and sub-assemblies only
    Assemblies,
    /// Everything
    #[default]
    All,
}

impl From<ScopeArg> for ChangeScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Materials => Self::Materials,
            ScopeArg::Assemblies => Self::Assemblies,
            ScopeArg::All => Self::All,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two BOM documents
    Diff {
        /// The "before" document
        left: PathBuf,
        /// The "after" document
        right: PathBuf,

        /// Node kinds to include in the aggregated listing
        #[arg(long, value_enum, default_value = "all")]
        scope: ScopeArg,

        /// Output format
        #[arg(short = 'o', long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Schema-agnostic deep comparison of two JSON values
    Deep {
        left: PathBuf,
        right: PathBuf,

        /// Field names or dotted paths to skip
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Maximum recursion depth
        #[arg(long, default_value_t = 10)]
        max_depth: usize,

        /// Include unchanged entries in the output
        #[arg(long)]
        show_unchanged: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff {
            left,
            right,
            scope,
            output,
        } => cli::run_diff(&DiffOptions {
            left,
            right,
            scope: scope.into(),
            format: output,
        }),
        Commands::Deep {
            left,
            right,
            exclude,
            max_depth,
            show_unchanged,
        } => cli::run_deep(&DeepOptions {
            left,
            right,
            exclude,
            max_depth,
            show_unchanged,
        }),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(0)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(2);
        }
    }
}
