use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wellness Companion - guided daily check-ins backed by a local JSON journal.
#[derive(Parser, Debug)]
#[command(name = "wellness")]
#[command(version)]
#[command(about = "Daily wellness check-ins exposed as agent tools.", long_about = None)]
pub struct Cli {
    /// Storage root for history, tasks and snapshots (overrides config and env)
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve the journal tools over stdio (newline-delimited JSON-RPC)
    Serve,

    /// Invoke one tool and print its result
    Call {
        /// Tool name, e.g. `get_current_checkin`
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// List available tools
    Tools,

    /// Show storage paths and journal counts
    Status,
}

impl Cli {
    /// `serve` when no subcommand is given.
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
