//! Command-line argument definitions

use crate::component::path_comparer::CompareOptions;
use crate::config::{Language, UserSettings, validate_workers};
use clap::Parser;
use std::path::PathBuf;

/// Compare two files or directories by content (SHA-256)
#[derive(Parser, Debug)]
#[command(name = "dirhash", version, about, long_about = None)]
pub struct Args {
    /// First file or directory; omit both paths for the interactive menu
    #[arg(requires = "second")]
    pub first: Option<PathBuf>,

    /// Second file or directory
    #[arg(requires = "first")]
    pub second: Option<PathBuf>,

    /// Number of hashing workers (0 = number of logical CPUs)
    #[arg(short, long, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Print the comparison as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// UI language: en-US or zh-TW (overrides settings)
    #[arg(long, value_name = "LOCALE")]
    pub lang: Option<Language>,
}

fn parse_workers(value: &str) -> Result<usize, String> {
    let workers: usize = value.parse().map_err(|e| format!("{e}"))?;
    validate_workers(workers).map_err(|e| e.to_string())
}

impl Args {
    /// 以命令列參數覆寫設定檔中的選項
    #[must_use]
    pub fn compare_options(&self, settings: &UserSettings) -> CompareOptions {
        let mut options = CompareOptions::from_settings(settings);
        if let Some(workers) = self.workers {
            options.workers = workers;
        }
        options.color &= !self.no_color && !self.json;
        options.json = self.json;
        options
    }

    #[must_use]
    pub fn language(&self, settings: &UserSettings) -> Language {
        self.lang.unwrap_or(settings.language)
    }
}
