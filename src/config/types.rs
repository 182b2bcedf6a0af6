use crate::tools::{DEFAULT_QUEUE_DEPTH_PER_WORKER, MAX_QUEUE_DEPTH_PER_WORKER, max_worker_count};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_RECENT_PATHS: usize = 10;
pub const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::EnUs, Self::ZhTw];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported language: {s} (expected en-US or zh-TW)"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub language: Language,
    /// 0 代表使用邏輯 CPU 數量
    pub workers: usize,
    pub queue_depth_per_worker: usize,
    pub color: bool,
    pub recent_paths: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            workers: 0,
            queue_depth_per_worker: DEFAULT_QUEUE_DEPTH_PER_WORKER,
            color: true,
            recent_paths: Vec::new(),
        }
    }
}

/// worker 數量必須介於 0 與 `max_worker_count()` 之間
pub fn validate_workers(workers: usize) -> Result<usize> {
    let max = max_worker_count();
    if workers > max {
        bail!("workers must be between 0 and {max}, got {workers}");
    }
    Ok(workers)
}

pub fn validate_queue_depth(depth: usize) -> Result<usize> {
    if !(1..=MAX_QUEUE_DEPTH_PER_WORKER).contains(&depth) {
        bail!("queue_depth_per_worker must be between 1 and {MAX_QUEUE_DEPTH_PER_WORKER}, got {depth}");
    }
    Ok(depth)
}

impl UserSettings {
    pub fn validate(&self) -> Result<()> {
        validate_workers(self.workers)?;
        validate_queue_depth(self.queue_depth_per_worker)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}
