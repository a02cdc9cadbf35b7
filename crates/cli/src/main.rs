// railmatch CLI - terminal viewer for railway reconciliation results

mod exit_codes;
mod export;
mod tui;
mod urls;
mod util;
mod view;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use railmatch_client::{
    config_file_path, delete_config, join_base, load_config, save_config, ViewerConfig,
};

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use urls::UrlTemplate;
use view::{SelectArgs, SourceArgs};

#[derive(Parser)]
#[command(name = "railmatch")]
#[command(about = "Terminal viewer for railway route reconciliation results")]
#[command(version)]
#[command(after_help = "\
Examples:
  railmatch view routes --base-url http://localhost:8080
  railmatch view routes --suspicious --sort DbNotFound --desc
  railmatch view stationsofdbwk --file pair.json
  railmatch export routes --kind WikidataNotFoundInDbData -o rows.csv
  railmatch url station-of-infobox 'Bahnstrecke Angermünde–Schwedt'
  railmatch config --set-base-url http://localhost:8080")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load one result table and browse it (TUI) or print it
    #[command(after_help = "\
TABLE is one of: routes, routeinfos, stops, stationsofinfobox,
stationsofroute, dbstationsofroute, stationsofdbwk.

The three list tables fetch from the configured host automatically
(--base-url, RAILMATCH_BASE_URL, or the saved config). The four detail
tables are per-route and need --url or --file.

Examples:
  railmatch view routes
  railmatch view routes --filter 'Title=angerm' --sort Km --desc
  railmatch view routes --kind RouteIsShutdown --plain
  railmatch view stationsofdbwk --url http://localhost:8080/data/Match/6081
  cat saved.json | railmatch view routes --file /dev/stdin")]
    View {
        /// Table name
        table: String,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        select: SelectArgs,

        /// Show this data page first (1-based); plain mode prints it alone
        #[arg(long, value_name = "N")]
        page: Option<usize>,

        /// Print as text instead of the interactive viewer
        #[arg(long)]
        plain: bool,

        /// Cap on printed rows in plain mode (0 = all)
        #[arg(long, value_name = "N", default_value_t = 0)]
        max_rows: usize,
    },

    /// Write a table as CSV (filtered and sorted, all pages)
    #[command(after_help = "\
Examples:
  railmatch export routes -o routes.csv
  railmatch export routes --suspicious -o suspects.csv
  railmatch export stationsofdbwk --file pair.json | column -s, -t")]
    Export {
        /// Table name
        table: String,

        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        select: SelectArgs,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        out: Option<std::path::PathBuf>,

        /// Suppress the stderr row-count note
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// List the table names and their columns
    Tables,

    /// Print the detail page path for a row key
    #[command(after_help = "\
Templates and arguments:
  station-of-db-wk <title> <route>
  station-of-infobox <title>
  wikitext-of-stop <id>
  db-station-of-route <route>
  brouter-of-sol <route> <start> <end>

Examples:
  railmatch url station-of-db-wk 'Bahnstrecke Angermünde–Schwedt' 6081
  railmatch url wikitext-of-stop Q800313")]
    Url {
        /// Link template
        template: UrlTemplate,

        /// Template arguments (arity depends on the template)
        args: Vec<String>,
    },

    /// Show or change the saved results host
    Config {
        /// Save this base URL for future runs
        #[arg(long, value_name = "URL")]
        set_base_url: Option<String>,

        /// Delete the saved config file
        #[arg(long, conflicts_with = "set_base_url")]
        clear: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::View {
            table,
            source,
            select,
            page,
            plain,
            max_rows,
        } => view::cmd_view(&table, &source, &select, page, plain, max_rows),
        Commands::Export {
            table,
            source,
            select,
            out,
            quiet,
        } => export::cmd_export(&table, &source, &select, out, quiet),
        Commands::Tables => view::cmd_tables(),
        Commands::Url { template, args } => urls::cmd_url(template, &args),
        Commands::Config {
            set_base_url,
            clear,
        } => cmd_config(set_base_url, clear),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

// ============================================================================
// config
// ============================================================================

fn cmd_config(set_base_url: Option<String>, clear: bool) -> Result<(), CliError> {
    if clear {
        delete_config().map_err(CliError::io)?;
        eprintln!("config: cleared");
        return Ok(());
    }

    if let Some(base) = set_base_url {
        // Catch typos before they are saved.
        join_base(&base, "/data/Results").map_err(|e| CliError::args(e.to_string()))?;
        save_config(&ViewerConfig {
            base_url: Some(base),
        })
        .map_err(CliError::io)?;
        if let Some(path) = config_file_path() {
            eprintln!("config: saved to {}", path.display());
        }
        return Ok(());
    }

    match load_config().and_then(|c| c.base_url) {
        Some(base) => println!("base_url: {}", base),
        None => println!("base_url: (unset)"),
    }
    Ok(())
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ERROR,
            message: msg.into(),
            hint: None,
        }
    }

    /// Create error from a fetch error with the matching exit code. The
    /// load failure is the message; the transport detail is the hint.
    pub fn fetch(table: &str, url: &str, err: railmatch_client::FetchError) -> Self {
        Self {
            code: exit_codes::fetch_exit_code(&err),
            message: format!("failed to load {} from {}", table, url),
            hint: Some(err.to_string()),
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
