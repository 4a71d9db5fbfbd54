use std::path::PathBuf;

/// Projects saved on Windows store media paths with `\` separators.
pub fn normalize_path_separator(s: &str) -> String {
    s.replace('\\', "/")
}

/// Turn a stored media path into a native path.
pub fn native_media_path(file: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(file)
    } else {
        PathBuf::from(normalize_path_separator(file))
    }
}
