//! 平行指紋建立器
//!
//! 一個走訪者（producer）把一般檔案的路徑放進有界工作佇列，
//! `workers` 個執行緒計算 SHA-256，單一收集者（collector）彙整結果。
//! 完成與否以「已派送 / 已完成」計數判斷，而非固定次數。

use super::error::{FingerprintError, Result};
use super::file_hasher::calculate_file_hash;
use super::fingerprint::{Fingerprint, FingerprintSet};
use crossbeam_channel::{self as channel, Receiver, Sender};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use walkdir::WalkDir;

pub const DEFAULT_QUEUE_DEPTH_PER_WORKER: usize = 2;
pub const MAX_QUEUE_DEPTH_PER_WORKER: usize = 64;
pub const MAX_WORKERS_PER_CPU: usize = 16;
const MAX_QUEUE_CAPACITY: usize = 4096;

type HashOutcome = Result<Fingerprint>;

/// 邏輯 CPU 數量，取不到時為 1
#[must_use]
pub fn default_worker_count() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// worker 數量上限：邏輯 CPU 數量的 `MAX_WORKERS_PER_CPU` 倍
#[must_use]
pub fn max_worker_count() -> usize {
    default_worker_count().saturating_mul(MAX_WORKERS_PER_CPU)
}

#[derive(Debug, Default)]
struct JobCounts {
    dispatched: usize,
    completed: usize,
}

/// 已派送與已完成工作的計數，`wait_idle` 會等到兩者相等
#[derive(Debug, Default)]
struct JobLedger {
    counts: Mutex<JobCounts>,
    idle: Condvar,
}

impl JobLedger {
    fn lock(&self) -> MutexGuard<'_, JobCounts> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self) {
        self.lock().dispatched += 1;
    }

    fn complete(&self) {
        let mut counts = self.lock();
        counts.completed += 1;
        if counts.completed >= counts.dispatched {
            self.idle.notify_all();
        }
    }

    /// 阻塞直到所有已派送的工作都完成，回傳派送總數
    fn wait_idle(&self) -> usize {
        let mut counts = self.lock();
        while counts.completed < counts.dispatched {
            counts = self
                .idle
                .wait(counts)
                .unwrap_or_else(PoisonError::into_inner);
        }
        counts.dispatched
    }
}

/// 結果送出後才標記完成；worker 中途 panic 也會計入，避免 `wait_idle` 永久等待
struct Completion<'a>(&'a JobLedger);

impl Drop for Completion<'_> {
    fn drop(&mut self) {
        self.0.complete();
    }
}

#[derive(Debug, Default)]
struct Collected {
    set: FingerprintSet,
    first_error: Option<FingerprintError>,
    received: usize,
    dropped_errors: usize,
}

pub struct FingerprintBuilder {
    workers: usize,
    queue_depth_per_worker: usize,
    shutdown_signal: Option<Arc<AtomicBool>>,
    progress: ProgressBar,
}

impl Default for FingerprintBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprintBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            workers: default_worker_count(),
            queue_depth_per_worker: DEFAULT_QUEUE_DEPTH_PER_WORKER,
            shutdown_signal: None,
            progress: ProgressBar::hidden(),
        }
    }

    /// 設定 worker 數量，0 代表使用邏輯 CPU 數量；超過 `max_worker_count` 時取上限
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = if workers == 0 {
            default_worker_count()
        } else {
            workers.min(max_worker_count())
        };
        self
    }

    #[must_use]
    pub fn with_queue_depth_per_worker(mut self, depth: usize) -> Self {
        self.queue_depth_per_worker = depth.clamp(1, MAX_QUEUE_DEPTH_PER_WORKER);
        self
    }

    /// 中斷信號：設為 true 後停止派送，剩餘工作以 `Cancelled` 回應
    #[must_use]
    pub fn with_shutdown_signal(mut self, shutdown_signal: Arc<AtomicBool>) -> Self {
        self.shutdown_signal = Some(shutdown_signal);
        self
    }

    /// 每完成一個檔案呼叫一次 `inc(1)`
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub fn queue_capacity(&self) -> usize {
        self.workers
            .saturating_mul(self.queue_depth_per_worker)
            .clamp(1, MAX_QUEUE_CAPACITY)
    }

    fn is_cancelled(&self) -> bool {
        self.shutdown_signal
            .as_ref()
            .is_some_and(|signal| signal.load(Ordering::SeqCst))
    }

    /// 建立 `root` 底下所有一般檔案的指紋
    ///
    /// `root` 可以是單一檔案，此時唯一的 key 是該檔案的檔名。
    /// 任何錯誤都會讓整次建立失敗，回傳最先收到的錯誤。
    pub fn build(&self, root: &Path) -> Result<FingerprintSet> {
        let metadata = fs::metadata(root).map_err(|source| FingerprintError::Traversal {
            path: root.to_path_buf(),
            source,
        })?;

        info!(
            "開始建立指紋: {} ({}，{} 個 worker)",
            root.display(),
            if metadata.is_dir() { "目錄" } else { "檔案" },
            self.workers
        );

        // 進度只計算目前這個根路徑
        self.progress.set_position(0);
        self.progress.set_message(root.display().to_string());

        let (job_tx, job_rx) = channel::bounded::<PathBuf>(self.queue_capacity());
        let (result_tx, result_rx) = channel::bounded::<HashOutcome>(self.queue_capacity());
        let ledger = JobLedger::default();
        let abort = AtomicBool::new(false);

        let (collected, dispatched) = thread::scope(|scope| {
            let ledger = &ledger;
            let abort = &abort;

            for _ in 0..self.workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || self.run_worker(root, &job_rx, &result_tx, ledger));
            }
            drop(job_rx);

            let collector = scope.spawn(move || self.collect(&result_rx, abort));

            self.produce(root, &job_tx, &result_tx, ledger, abort);

            // 不再派送新工作，worker 處理完佇列後自行結束
            drop(job_tx);
            let dispatched = ledger.wait_idle();
            drop(result_tx);

            let collected = collector
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            (collected, dispatched)
        });

        debug_assert!(collected.received >= dispatched);

        if let Some(error) = collected.first_error {
            warn!(
                "建立指紋失敗: {} ({} 個額外錯誤未回報): {error}",
                root.display(),
                collected.dropped_errors
            );
            return Err(error);
        }

        info!(
            "指紋建立完成: {}，共 {} 個檔案",
            root.display(),
            collected.set.len()
        );
        Ok(collected.set)
    }

    fn produce(
        &self,
        root: &Path,
        job_tx: &Sender<PathBuf>,
        result_tx: &Sender<HashOutcome>,
        ledger: &JobLedger,
        abort: &AtomicBool,
    ) {
        for entry in WalkDir::new(root).follow_links(false) {
            if self.is_cancelled() {
                warn!("收到中斷信號，停止走訪: {}", root.display());
                let _ = result_tx.send(Err(FingerprintError::Cancelled));
                return;
            }
            if abort.load(Ordering::SeqCst) {
                debug!("已有錯誤，停止走訪: {}", root.display());
                return;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    let _ = result_tx.send(Err(FingerprintError::Traversal {
                        path,
                        source: err.into(),
                    }));
                    return;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            ledger.dispatch();
            if job_tx.send(entry.into_path()).is_err() {
                ledger.complete();
                return;
            }
        }
    }

    fn run_worker(
        &self,
        root: &Path,
        job_rx: &Receiver<PathBuf>,
        result_tx: &Sender<HashOutcome>,
        ledger: &JobLedger,
    ) {
        for path in job_rx.iter() {
            let _completion = Completion(ledger);
            let outcome = if self.is_cancelled() {
                Err(FingerprintError::Cancelled)
            } else {
                fingerprint_file(root, &path)
            };
            if result_tx.send(outcome).is_err() {
                break;
            }
        }
    }

    fn collect(&self, result_rx: &Receiver<HashOutcome>, abort: &AtomicBool) -> Collected {
        let mut collected = Collected::default();

        for outcome in result_rx.iter() {
            collected.received += 1;
            match outcome {
                Ok(fingerprint) => {
                    debug!("{} {}", fingerprint.digest, fingerprint.relative_path);
                    let previous = collected.set.insert(fingerprint);
                    debug_assert!(previous.is_none());
                    self.progress.inc(1);
                }
                Err(error) if collected.first_error.is_none() => {
                    abort.store(true, Ordering::SeqCst);
                    collected.first_error = Some(error);
                }
                Err(error) => {
                    debug!("忽略後續錯誤: {error}");
                    collected.dropped_errors += 1;
                }
            }
        }

        collected
    }
}

fn fingerprint_file(root: &Path, path: &Path) -> HashOutcome {
    let relative_path = relative_key(root, path)?;
    let digest = calculate_file_hash(path)?;
    Ok(Fingerprint::new(relative_path, digest))
}

/// 以 `/` 分隔的相對路徑；`path` 即為 `root` 時使用檔名
fn relative_key(root: &Path, path: &Path) -> Result<String> {
    let path_error = || FingerprintError::Path {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    };

    if path == root {
        return path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
            .ok_or_else(path_error);
    }

    let relative = path.strip_prefix(root).map_err(|_| path_error())?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str().ok_or_else(path_error)?),
            _ => return Err(path_error()),
        }
    }

    if parts.is_empty() {
        return Err(path_error());
    }
    Ok(parts.join("/"))
}

/// 以預設設定建立指紋
pub fn build_fingerprint_set(root: &Path) -> Result<FingerprintSet> {
    FingerprintBuilder::new().build(root)
}
