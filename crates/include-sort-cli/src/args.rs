use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "include-sort")]
#[command(about = "Groups and sorts #include directives in C and C++ sources")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.include-sort)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sort the includes of each file in place
    Sort {
        /// Source files to sort
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Path prefix to strip before matching a file's own header
        /// (can be repeated, extends config)
        #[arg(long = "ignore-prefix", value_name = "PREFIX")]
        ignore_prefixes: Vec<String>,

        /// Show which files would change without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., sort.ignored_prefixes)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., sort.ignored_prefixes)
        key: String,

        /// Value to set (e.g., "src/,include/" or "[src/, include/]")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Create config file with defaults
    Init,
}
