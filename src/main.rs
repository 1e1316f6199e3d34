//! faqview - A terminal FAQ browser with category tabs and live search.
//!
//! # Usage
//!
//! ```bash
//! faqview faq.md
//! faqview --watch --category billing faq.md
//! faqview --print --query refund faq.csv
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use faqview::app::App;
use faqview::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use faqview::faq::{Category, load_entries};
use faqview::list::ListOptions;
use faqview::print::print_entries;
use faqview::search::Highlighter;

/// A terminal FAQ browser with category tabs, live search and accordion answers
#[derive(Parser, Debug)]
#[command(name = "faqview", version, about, long_about = None)]
struct Cli {
    /// FAQ file to view (.md, .csv or .json)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print matching entries to stdout instead of opening the viewer
    #[arg(short, long)]
    print: bool,

    /// Category to show on startup (`all` for every entry)
    #[arg(short, long, value_name = "NAME")]
    category: Option<String>,

    /// Search term to apply in print mode
    #[arg(short, long, value_name = "TERM", requires = "print")]
    query: Option<String>,

    /// Watch file for changes and auto-reload
    #[arg(short, long)]
    watch: bool,

    /// Do not capture the mouse
    #[arg(long)]
    no_mouse: bool,

    /// Hide the search input
    #[arg(long)]
    no_search: bool,

    /// Milliseconds to wait after typing before searching
    #[arg(long, value_name = "MS")]
    search_delay: Option<u64>,

    /// Highlight markers as `open,close`
    #[arg(long, value_name = "OPEN,CLOSE", value_parser = parse_marker_arg)]
    marker: Option<(String, String)>,

    /// Write logs to a file while the viewer is running
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn parse_marker_arg(s: &str) -> Result<(String, String), String> {
    faqview::config::parse_marker(s)
        .ok_or_else(|| format!("expected `open,close` with both halves non-empty, got `{s}`"))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Route logs so they never draw over the viewer.
fn init_logging(print_mode: bool, log_file: Option<&Path>) -> Result<()> {
    if print_mode {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn list_options(flags: &ConfigFlags) -> ListOptions {
    let defaults = ListOptions::default();
    ListOptions {
        search_delay_ms: flags.search_delay_ms.unwrap_or(defaults.search_delay_ms),
        search_enabled: !flags.no_search,
        highlighter: flags
            .marker
            .as_ref()
            .map_or(defaults.highlighter, |(open, close)| {
                Highlighter::new(open.as_str(), close.as_str())
            }),
    }
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(cli.print, effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let faq = load_entries(&cli.file)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;
    tracing::info!(path = %cli.file.display(), entries = faq.len(), "loaded entries");

    let options = list_options(&effective);
    let category = effective.category.as_deref().map(Category::parse);

    if cli.print {
        let mut stdout = std::io::stdout().lock();
        return print_entries(
            faq,
            options,
            category.as_ref(),
            cli.query.as_deref(),
            &mut stdout,
        );
    }

    let mut app = App::new(cli.file, faq)
        .with_options(options)
        .with_initial_category(category)
        .with_watch(effective.watch)
        .with_mouse(!effective.no_mouse)
        .with_config_paths(
            Some(global_path),
            if local_path.exists() {
                Some(local_path)
            } else {
                None
            },
        );

    app.run().context("Application error")
}
