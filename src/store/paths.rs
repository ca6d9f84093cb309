// Store path utilities.
// Resolves the store root and maps logical document names to file names.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Root directory used when none is configured, relative to the working directory.
pub const DEFAULT_ROOT: &str = "data";

/// Document holding the user settings.
pub const SETTINGS_FILE: &str = "saved_data";

/// Document holding the persisted creator directory.
pub const CREATOR_CACHE_FILE: &str = "clist";

/// Platform data directory (~/.local/share/kcnotif on Linux).
pub fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kcnotif").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Sanitize a document name into a single file name.
/// Replaces problematic characters with underscores.
pub fn sanitize_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            _ => c,
        })
        .collect();

    match sanitized.as_str() {
        "" | "." | ".." => "_".repeat(sanitized.len().max(1)),
        _ => sanitized,
    }
}
