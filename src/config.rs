use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Persistent defaults read from rc files and merged with the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub no_mouse: bool,
    pub no_search: bool,
    pub category: Option<String>,
    pub search_delay_ms: Option<u64>,
    pub marker: Option<(String, String)>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Booleans are OR-ed; options from `other` win over `self`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            no_mouse: self.no_mouse || other.no_mouse,
            no_search: self.no_search || other.no_search,
            category: other.category.clone().or_else(|| self.category.clone()),
            search_delay_ms: other.search_delay_ms.or(self.search_delay_ms),
            marker: other.marker.clone().or_else(|| self.marker.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("faqview").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("faqview")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("faqview").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("faqview")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".faqviewrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# faqview defaults (saved with --save)".to_string()];
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.no_mouse {
        lines.push("--no-mouse".to_string());
    }
    if flags.no_search {
        lines.push("--no-search".to_string());
    }
    if let Some(category) = &flags.category {
        lines.push(format!("--category {category}"));
    }
    if let Some(delay) = flags.search_delay_ms {
        lines.push(format!("--search-delay {delay}"));
    }
    if let Some((open, close)) = &flags.marker {
        lines.push(format!("--marker {open},{close}"));
    }
    if let Some(path) = &flags.log_file {
        lines.push(format!("--log-file {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from a token stream, skipping anything unrecognized.
///
/// Option flags accept both `--flag value` and `--flag=value`. Malformed
/// values are dropped rather than reported.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--watch" => flags.watch = true,
            "--no-mouse" => flags.no_mouse = true,
            "--no-search" => flags.no_search = true,
            "--category" | "--search-delay" | "--marker" | "--log-file" => {
                if let Some(next) = tokens.get(i + 1) {
                    apply_option(&mut flags, token, next);
                    i += 1;
                }
            }
            _ => {
                if let Some((name, value)) = token.split_once('=') {
                    apply_option(&mut flags, name, value);
                }
            }
        }
        i += 1;
    }
    flags
}

fn apply_option(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--category" if !value.trim().is_empty() => {
            flags.category = Some(value.trim().to_string());
        }
        "--search-delay" => {
            if let Ok(ms) = value.parse() {
                flags.search_delay_ms = Some(ms);
            }
        }
        "--marker" => {
            if let Some(marker) = parse_marker(value) {
                flags.marker = Some(marker);
            }
        }
        "--log-file" => flags.log_file = Some(PathBuf::from(value)),
        _ => {}
    }
}

/// Parse an `open,close` marker pair. Both halves must be non-empty.
pub fn parse_marker(s: &str) -> Option<(String, String)> {
    let (open, close) = s.split_once(',')?;
    if open.is_empty() || close.is_empty() {
        return None;
    }
    Some((open.to_string(), close.to_string()))
}
