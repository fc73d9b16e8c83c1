//! # ragchat CLI
//!
//! Chat with a small React knowledge base from the terminal.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ragchat chat` | Interactive chat session |
//! | `ragchat ask "<question>"` | Answer one question and exit |
//! | `ragchat search "<query>"` | Show ranked documents for a query |
//! | `ragchat docs` | List the knowledge base |
//! | `ragchat eval` | Run the heuristic evaluation |
//! | `ragchat completions <shell>` | Print a shell completion script |
//!
//! ## Examples
//!
//! ```bash
//! ragchat ask "o que é useMemo?"
//! ragchat search "hooks" --explain
//! ragchat --config ./config/ragchat.toml chat
//! ragchat eval --json
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use ragchat::progress::ProgressMode;
use ragchat::search::SearchOptions;
use ragchat::{chat_cmd, config, eval, logging, search};

/// ragchat: a simulated retrieval-augmented chat over React docs.
///
/// Settings come from an optional TOML file. See
/// `config/ragchat.example.toml` for every option.
#[derive(Parser)]
#[command(
    name = "ragchat",
    about = "ragchat: a simulated retrieval-augmented chat over a small React knowledge base",
    version
)]
struct Cli {
    /// Path to a configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat.
    ///
    /// Reads one question per line from stdin. `/clear`, `/retry`,
    /// `/help` and `/quit` are available.
    Chat {
        /// State indicators: `human`, `json`, or `off`. Defaults to
        /// `human` when stderr is a terminal.
        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// Answer a single question.
    Ask {
        question: String,

        #[arg(long, value_enum)]
        progress: Option<ProgressMode>,
    },

    /// Rank the knowledge base against a query.
    Search {
        query: String,

        /// Maximum number of results.
        #[arg(long)]
        limit: Option<usize>,

        /// Minimum score a document needs.
        #[arg(long)]
        threshold: Option<f64>,

        /// Show the per-bonus score breakdown.
        #[arg(long)]
        explain: bool,

        #[arg(long)]
        json: bool,
    },

    /// List the documents in the knowledge base.
    Docs {
        #[arg(long)]
        json: bool,
    },

    /// Score the ranker against a sample question set.
    Eval {
        /// JSON sample file. The built-in set is used when omitted.
        #[arg(long)]
        samples: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Print a shell completion script.
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "ragchat", &mut std::io::stdout());
        return Ok(());
    }

    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::Config::minimal(),
    };
    if let Some(level) = cli.log_level {
        cfg.logging.level = level;
        cfg.validate()?;
    }
    logging::init_logging(&cfg.logging.level);

    match cli.command {
        Commands::Chat { progress } => {
            chat_cmd::run_chat(&cfg, progress).await?;
        }
        Commands::Ask { question, progress } => {
            chat_cmd::run_ask(&cfg, &question, progress).await?;
        }
        Commands::Search {
            query,
            limit,
            threshold,
            explain,
            json,
        } => {
            let opts = SearchOptions {
                limit,
                threshold,
                explain,
                json,
            };
            search::run_search(&cfg, &query, &opts)?;
        }
        Commands::Docs { json } => {
            search::run_docs(json)?;
        }
        Commands::Eval { samples, json } => {
            eval::run_eval(&cfg, samples.as_deref(), json)?;
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
        }
    }

    Ok(())
}
