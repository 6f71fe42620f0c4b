mod media_probe;
mod media_scanner;
mod path_validator;

pub use media_probe::{MediaInfo, probe_duration, probe_media};
pub use media_scanner::{MediaFileInfo, MediaFileKind, scan_media_files};
pub use path_validator::{ensure_directory_exists, validate_directory_exists, validate_file_exists};
