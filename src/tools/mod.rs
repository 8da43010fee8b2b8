mod path_validator;
mod process_runner;
mod video_scanner;

pub use path_validator::{
    ensure_directory_exists, prepare_output_directory, resolve_relative_to,
    validate_directory_exists,
};
pub use process_runner::{ProcessError, ProcessOutput, ProcessRunner, SystemProcessRunner};
pub use video_scanner::scan_video_files;
