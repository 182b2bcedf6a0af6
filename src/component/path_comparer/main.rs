use super::comparison::{Comparison, compare_paths};
use super::report::{Palette, Reporter};
use crate::config::save::{add_recent_path, save_settings};
use crate::config::{Config, UserSettings};
use crate::tools::FingerprintBuilder;
use anyhow::{Context, Result};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rust_i18n::t;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// 單次比較的執行選項，由設定檔與命令列參數組合而成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    pub workers: usize,
    pub queue_depth_per_worker: usize,
    pub color: bool,
    pub json: bool,
}

impl CompareOptions {
    #[must_use]
    pub const fn from_settings(settings: &UserSettings) -> Self {
        Self {
            workers: settings.workers,
            queue_depth_per_worker: settings.queue_depth_per_worker,
            color: settings.color,
            json: false,
        }
    }
}

/// 比較兩個檔案或資料夾的內容（SHA-256）
pub struct PathComparer {
    options: CompareOptions,
    shutdown_signal: Arc<AtomicBool>,
}

impl PathComparer {
    pub const fn new(options: CompareOptions, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            options,
            shutdown_signal,
        }
    }

    /// 比較並輸出結果到 stdout
    pub fn run(&self, first: &Path, second: &Path) -> Result<Comparison> {
        let comparison = self.compare(first, second)?;

        let mut reporter = Reporter::new(io::stdout().lock(), Palette::from_flag(self.options.color));
        if self.options.json {
            reporter.report_json(&comparison)?;
        } else {
            reporter.report(&comparison)?;
        }

        info!(
            "比較完成: {} <-> {}，{} 項差異",
            first.display(),
            second.display(),
            comparison.total_differences()
        );
        Ok(comparison)
    }

    pub fn compare(&self, first: &Path, second: &Path) -> Result<Comparison> {
        let progress = self.create_spinner();
        let builder = FingerprintBuilder::new()
            .with_workers(self.options.workers)
            .with_queue_depth_per_worker(self.options.queue_depth_per_worker)
            .with_shutdown_signal(Arc::clone(&self.shutdown_signal))
            .with_progress(progress.clone());

        let result = compare_paths(&builder, first, second);
        progress.finish_and_clear();
        result
    }

    /// 互動模式：從最近路徑或手動輸入選擇兩個路徑
    pub fn run_interactive(&self, config: &mut Config) -> Result<()> {
        println!("{}", style(t!("compare.title")).cyan().bold());

        let Some(first) = prompt_path(&config.settings.recent_paths, &t!("compare.prompt_first"))?
        else {
            return Ok(());
        };
        let Some(second) =
            prompt_path(&config.settings.recent_paths, &t!("compare.prompt_second"))?
        else {
            return Ok(());
        };

        add_recent_path(&mut config.settings, &second);
        add_recent_path(&mut config.settings, &first);
        if let Err(e) = save_settings(&config.settings) {
            warn!("無法儲存路徑歷史: {e}");
        }

        // 前一次比較的中斷不影響這一次
        self.shutdown_signal.store(false, Ordering::SeqCst);

        self.run(&PathBuf::from(first), &PathBuf::from(second))
            .context(t!("compare.failed").to_string())?;
        Ok(())
    }

    fn create_spinner(&self) -> ProgressBar {
        if self.options.json {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] {prefix} {msg} {pos}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        // 每個根路徑開始時由 FingerprintBuilder 重設 {msg} 與 {pos}
        spinner.set_prefix(t!("compare.hashing").to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }
}

fn prompt_path(recent_paths: &[String], prompt: &str) -> Result<Option<String>> {
    if recent_paths.is_empty() {
        let path: String = Input::new().with_prompt(prompt).interact_text()?;
        return Ok(Some(path.trim().to_string()));
    }

    let mut options: Vec<String> = recent_paths
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let indicator = if Path::new(p).exists() { "✓" } else { "✗" };
            format!("{} [{}] {}", i + 1, indicator, p)
        })
        .collect();
    options.push(t!("compare.enter_new_path").to_string());

    println!("{}", style(t!("common.esc_hint")).dim());

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&options)
        .default(0)
        .interact_opt()?;

    match selection {
        None => Ok(None),
        Some(idx) if idx < recent_paths.len() => Ok(Some(recent_paths[idx].clone())),
        Some(_) => {
            let path: String = Input::new().with_prompt(prompt).interact_text()?;
            Ok(Some(path.trim().to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_options() -> CompareOptions {
        CompareOptions {
            workers: 2,
            queue_depth_per_worker: 1,
            color: false,
            json: true,
        }
    }

    #[test]
    fn test_options_from_settings() {
        let mut settings = UserSettings::default();
        settings.workers = 6;
        settings.color = false;

        let options = CompareOptions::from_settings(&settings);
        assert_eq!(options.workers, 6);
        assert!(!options.color);
        assert!(!options.json);
    }

    #[test]
    fn test_compare_identical_directories() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        for dir in [first.path(), second.path()] {
            fs::create_dir_all(dir.join("sub")).unwrap();
            fs::write(dir.join("sub/a.txt"), "same").unwrap();
        }

        let comparer = PathComparer::new(quiet_options(), Arc::new(AtomicBool::new(false)));
        let comparison = comparer.compare(first.path(), second.path()).unwrap();
        assert!(comparison.is_identical());
    }
}
