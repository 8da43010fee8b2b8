pub mod load;
pub mod types;

pub use load::DEFAULT_SETTINGS_FILE;
pub use types::{DEFAULT_BATCH_SIZE, DEFAULT_VIDEO_EXTENSIONS, RunOptions, Settings};
