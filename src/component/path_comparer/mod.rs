//! 檔案 / 資料夾內容比較元件
//!
//! 以 SHA-256 為每個檔案建立指紋，比較兩個路徑的內容是否一致

mod comparison;
mod main;
mod report;

pub use comparison::{Comparison, FileDigest, RootSummary, compare_paths};
pub use main::{CompareOptions, PathComparer};
pub use report::{Palette, Reporter};
