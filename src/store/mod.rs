// Local store module.
// Persists named JSON documents under one root directory.

pub mod paths;
pub mod local;

pub use paths::{CREATOR_CACHE_FILE, DEFAULT_ROOT, SETTINGS_FILE, data_dir, sanitize_name};
pub use local::{LocalStore, default_document};
