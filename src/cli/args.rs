use clap::{Parser, Subcommand};

/// stackview - GitButler workspace tree for terminals and MCP clients
#[derive(Debug, Parser)]
#[command(name = "stackview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as MCP server over stdio
    #[arg(long)]
    pub mcp: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root (auto-detects git root if absent)
    #[arg(short = 'w', long, global = true)]
    pub workspace_root: Option<String>,

    /// Path to the GitButler CLI
    #[arg(long, env = "STACKVIEW_BUT_PATH", global = true)]
    pub but_path: Option<String>,

    /// Quiet window for change notifications, in milliseconds
    #[arg(long, env = "STACKVIEW_DEBOUNCE_MS", global = true)]
    pub debounce_ms: Option<u64>,

    /// Do not ask for per-commit file lists
    #[arg(long, env = "STACKVIEW_NO_FILES", global = true)]
    pub no_files: bool,

    /// Watch the whole worktree, not just the repository metadata
    #[arg(long, env = "STACKVIEW_WATCH_WORKTREE", global = true)]
    pub watch_worktree: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the workspace tree once
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Expand collapsed nodes too
        #[arg(long)]
        expand_all: bool,
    },
    /// Show the tree and keep it up to date
    Watch {
        /// Expand collapsed nodes too
        #[arg(long)]
        expand_all: bool,
    },
    /// Initialize GitButler in the workspace
    Init,
}
