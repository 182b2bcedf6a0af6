pub mod load;
pub mod save;
pub mod types;

pub use types::{
    Config, Language, MAX_RECENT_PATHS, SETTINGS_FILE_NAME, UserSettings, validate_queue_depth,
    validate_workers,
};
