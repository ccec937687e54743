/// Command line configuration
///
/// Parsed once at startup with clap, then validated into a [`BrowserConfig`]
/// that the application owns for the rest of the process.
use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::Result;
use crate::state::library::Library;
use crate::state::pagination::{PageSize, DEFAULT_PAGE_SIZE};

#[derive(Debug, Parser)]
#[command(name = "book-browser", version, about = "Browse a book catalog page by page")]
pub struct Args {
    /// JSON catalog to import into the library on startup
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Library database file (defaults to the platform data directory)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Previews revealed per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Initial color scheme
    #[arg(long, value_enum, default_value_t = ThemeChoice::Day)]
    pub theme: ThemeChoice,

    /// Log level (RUST_LOG overrides it)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

/// The two color schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeChoice {
    #[default]
    Day,
    Night,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 2] = [ThemeChoice::Day, ThemeChoice::Night];
}

impl fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeChoice::Day => f.write_str("Day"),
            ThemeChoice::Night => f.write_str("Night"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Validated startup configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    pub catalog: Option<PathBuf>,
    /// `None` keeps the library in memory
    pub db_path: Option<PathBuf>,
    pub page_size: PageSize,
    pub theme: ThemeChoice,
    pub log_level: LogLevel,
}

impl BrowserConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        Ok(Self {
            catalog: args.catalog,
            db_path: args.db.or_else(Library::default_path),
            page_size: PageSize::new(args.page_size)?,
            theme: args.theme,
            log_level: args.log_level,
        })
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            db_path: None,
            page_size: PageSize::default(),
            theme: ThemeChoice::Day,
            log_level: LogLevel::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrowserError;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("book-browser").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = BrowserConfig::from_args(parse(&["--db", "lib.db"])).unwrap();
        assert_eq!(config.page_size.get(), 36);
        assert_eq!(config.theme, ThemeChoice::Day);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.db_path, Some(PathBuf::from("lib.db")));
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_explicit_values() {
        let args = parse(&[
            "--catalog",
            "books.json",
            "--page-size",
            "12",
            "--theme",
            "night",
            "--log-level",
            "debug",
        ]);
        let config = BrowserConfig::from_args(args).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("books.json")));
        assert_eq!(config.page_size.get(), 12);
        assert_eq!(config.theme, ThemeChoice::Night);
        assert_eq!(config.log_level.to_filter_directive(), "debug");
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = BrowserConfig::from_args(parse(&["--page-size", "0"])).unwrap_err();
        assert!(matches!(err, BrowserError::InvalidPageSize(0)));
    }

    #[test]
    fn test_unknown_theme_rejected_by_parser() {
        let result = Args::try_parse_from(["book-browser", "--theme", "sepia"]);
        assert!(result.is_err());
    }
}
