mod error;
mod file_hasher;
mod fingerprint;
mod fingerprint_builder;
mod path_validator;
mod set_differ;

pub use error::FingerprintError;
pub use file_hasher::calculate_file_hash;
pub use fingerprint::{Fingerprint, FingerprintSet};
pub use fingerprint_builder::{
    DEFAULT_QUEUE_DEPTH_PER_WORKER, FingerprintBuilder, MAX_QUEUE_DEPTH_PER_WORKER,
    MAX_WORKERS_PER_CPU, build_fingerprint_set, default_worker_count, max_worker_count,
};
pub use path_validator::{PathKind, classify_path, validate_same_kind};
pub use set_differ::{DiffResult, diff};
