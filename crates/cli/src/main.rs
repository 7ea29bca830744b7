mod commands;
mod exit_code;
mod input;

use clap::{Parser, Subcommand};
use colored::Colorize;
use exit_code::ExitCode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphql-resources")]
#[command(about = "Show which resources a GraphQL request reads and writes", long_about = None)]
#[command(version)]
struct Cli {
    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the root fields of the queries and mutations in a document
    Extract {
        /// Document to read (stdin if omitted or `-`)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Treat the input as an HTTP request body (JSON envelope or raw GraphQL)
        #[arg(short, long)]
        envelope: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Print the headers the middleware would set for a request body
    Headers {
        /// Request body to read (stdin if omitted or `-`)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Path to config file (searched for upwards from the current directory if omitted)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let result = match cli.command {
        Commands::Extract {
            file,
            envelope,
            format,
        } => commands::extract::run(file.as_deref(), envelope, format),
        Commands::Headers {
            file,
            format,
            config,
        } => commands::headers::run(config.as_deref(), file.as_deref(), format),
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(error) => {
            eprintln!("{} {error:#}", "✗".red().bold());
            ExitCode::for_error(&error)
        }
    };
    tracing::debug!(%code, "Exiting");
    code.exit();
}

/// Initialize tracing from `RUST_LOG`, silent by default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if let Ok(val) = std::env::var("CLICOLOR") {
        if val == "0" {
            control::set_override(false);
        }
    }
}
