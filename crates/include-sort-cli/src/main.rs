use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use include_sort_core::config::Config;
use include_sort_core::{sort_files, FileOutcome, IncludeSortError, Result, SortOptions};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Some(Commands::Sort {
            files,
            ignore_prefixes,
            dry_run,
        }) => {
            let options = build_sort_options(&base_dir, &ignore_prefixes, dry_run);
            handle_sort(&files, &options, cli.quiet);
            Ok(())
        }
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    // per-file status is printed directly; tracing only adds detail
    let default_level = if verbose {
        "include_sort=debug"
    } else if quiet {
        "include_sort=off"
    } else {
        "include_sort=error"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "include-sort", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("INCLUDE_SORT_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".include-sort"))
        .unwrap_or_else(|| PathBuf::from(".include-sort"))
}

fn build_sort_options(base_dir: &Path, ignore_prefixes: &[String], dry_run: bool) -> SortOptions {
    let (options, warning) = merge_sort_options(Config::load(base_dir), ignore_prefixes, dry_run);
    if let Some(e) = warning {
        eprintln!("{} {}", "[WARN]".yellow().bold(), e);
    }
    options
}

/// Config file settings extended by `--ignore-prefix`. An unreadable config
/// falls back to the defaults and is handed back for the caller to report.
fn merge_sort_options(
    loaded: Result<Config>,
    ignore_prefixes: &[String],
    dry_run: bool,
) -> (SortOptions, Option<IncludeSortError>) {
    let (mut options, warning) = match loaded {
        Ok(config) => (config.to_sort_options(), None),
        Err(e) => (SortOptions::default(), Some(e)),
    };

    for prefix in ignore_prefixes {
        if !options.ignored_prefixes.contains(prefix) {
            options.ignored_prefixes.push(prefix.clone());
        }
    }
    options.dry_run = dry_run;

    (options, warning)
}

fn handle_sort(files: &[PathBuf], options: &SortOptions, quiet: bool) {
    if options.dry_run && !quiet {
        println!("{}", "(dry run)".yellow());
    }

    let on_file = |path: &Path, result: &Result<FileOutcome>| match result {
        Ok(outcome) => {
            if quiet {
                return;
            }
            let status = format!("[{}]", outcome.label());
            let status = match outcome {
                FileOutcome::Unchanged => status.green(),
                FileOutcome::Sorted => status.cyan(),
                FileOutcome::WouldSort => status.yellow(),
            };
            println!("  {} {}", status, path.display());
        }
        Err(IncludeSortError::FileNotFound { .. }) => {
            eprintln!("  {} {}", "[MISSING]".yellow().bold(), path.display());
        }
        Err(e) => {
            eprintln!("  {} {}: {}", "[ERROR]".red().bold(), path.display(), e);
        }
    };

    let report = sort_files(files, options, Some(&on_file));

    if quiet {
        return;
    }
    println!();
    println!("Summary:");
    if options.dry_run {
        println!("  Would sort: {}", report.would_sort());
    } else {
        println!("  Sorted: {}", report.sorted());
    }
    println!("  Unchanged: {}", report.unchanged());
    if report.failed() > 0 {
        println!("  Failed: {}", report.failed().to_string().red());
    }
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(IncludeSortError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn prefixes(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_appends_cli_prefixes_after_config() {
        let mut config = Config::default();
        config.sort.ignored_prefixes = prefixes(&["src/", "lib/"]);

        let (options, warning) =
            merge_sort_options(Ok(config), &prefixes(&["lib/", "include/"]), true);

        assert!(warning.is_none());
        assert_eq!(options.ignored_prefixes, vec!["src/", "lib/", "include/"]);
        assert!(options.dry_run);
    }

    #[test]
    fn test_merge_without_cli_prefixes_keeps_config() {
        let mut config = Config::default();
        config.sort.ignored_prefixes = prefixes(&["src/"]);

        let (options, warning) = merge_sort_options(Ok(config), &[], false);

        assert!(warning.is_none());
        assert_eq!(options.ignored_prefixes, vec!["src/"]);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_bad_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(Config::path(temp.path()), "[sort\nignored_prefixes = 3").unwrap();

        let (options, warning) =
            merge_sort_options(Config::load(temp.path()), &prefixes(&["src/"]), false);

        assert!(matches!(warning, Some(IncludeSortError::ConfigParse { .. })));
        assert_eq!(options.ignored_prefixes, vec!["src/"]);
    }

    #[test]
    fn test_build_sort_options_without_config_file() {
        let temp = TempDir::new().unwrap();
        let options = build_sort_options(temp.path(), &prefixes(&["src/", "src/"]), true);

        assert_eq!(options.ignored_prefixes, vec!["src/"]);
        assert!(options.dry_run);
    }
}
