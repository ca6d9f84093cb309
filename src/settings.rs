// User settings document.
// Bootstraps the recurring check interval without touching other fields.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::{KcError, Result};
use crate::store::{LocalStore, SETTINGS_FILE};

const TIMER_KEY: &str = "timer";

/// Settings object persisted as the first element of `saved_data`.
///
/// Only `timer` is interpreted here, and only when reading it. Every field,
/// `timer` included, is written back exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsDocument {
    pub fields: Map<String, Value>,
}

impl SettingsDocument {
    /// Whether a `timer` key is stored, whatever its value.
    pub fn has_timer(&self) -> bool {
        self.fields.contains_key(TIMER_KEY)
    }

    /// Recurring check interval in seconds, if stored as a non-negative integer.
    pub fn timer(&self) -> Option<u64> {
        self.fields.get(TIMER_KEY).and_then(Value::as_u64)
    }

    pub fn timer_interval(&self) -> Option<Duration> {
        self.timer().map(Duration::from_secs)
    }
}

/// Reads and updates the settings document in a [`LocalStore`].
#[derive(Debug, Clone)]
pub struct SettingsService {
    store: LocalStore,
}

impl SettingsService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Current settings, creating the default document on first use.
    pub fn load(&self) -> Result<SettingsDocument> {
        self.read_document().map(|(settings, _)| settings)
    }

    /// Make sure a check interval is set.
    ///
    /// If the `timer` key is absent it is set to `default_seconds` and the
    /// document is written back. A stored `timer` is never replaced, even
    /// when it is `null` or not an integer. Safe to call on every startup.
    pub fn ensure_timer(&self, default_seconds: u64) -> Result<SettingsDocument> {
        let (mut settings, rest) = self.read_document()?;
        if !settings.has_timer() {
            settings
                .fields
                .insert(TIMER_KEY.to_string(), Value::from(default_seconds));
            self.write_document(&settings, rest)?;
            info!(timer = default_seconds, "initialized check interval");
        }
        Ok(settings)
    }

    /// Split the stored value into the settings object and any trailing
    /// elements, which are kept as-is.
    fn read_document(&self) -> Result<(SettingsDocument, Vec<Value>)> {
        let (first, rest) = match self.store.read(SETTINGS_FILE)? {
            Value::Array(mut items) => {
                if items.is_empty() {
                    (Value::Object(Map::new()), items)
                } else {
                    let first = items.remove(0);
                    (first, items)
                }
            }
            other => (other, Vec::new()),
        };

        let settings = serde_json::from_value(first).map_err(|source| KcError::CorruptStore {
            name: SETTINGS_FILE.to_string(),
            source,
        })?;
        Ok((settings, rest))
    }

    fn write_document(&self, settings: &SettingsDocument, rest: Vec<Value>) -> Result<()> {
        let mut items = Vec::with_capacity(rest.len() + 1);
        items.push(serde_json::to_value(settings)?);
        items.extend(rest);
        self.store.write(SETTINGS_FILE, &Value::Array(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    use crate::error::ErrorKind;

    fn service() -> (TempDir, LocalStore, SettingsService) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path().join("data"));
        let service = SettingsService::new(store.clone());
        (temp_dir, store, service)
    }

    #[test]
    fn test_ensure_timer_on_fresh_store() {
        let (_dir, store, service) = service();

        let settings = service.ensure_timer(300).unwrap();
        assert_eq!(settings.timer(), Some(300));
        assert_eq!(settings.timer_interval(), Some(Duration::from_secs(300)));
        assert_eq!(store.read(SETTINGS_FILE).unwrap(), json!([{"timer": 300}]));
    }

    #[test]
    fn test_ensure_timer_keeps_existing_fields() {
        let (_dir, store, service) = service();
        store.write(SETTINGS_FILE, &json!([{"foo": 1}])).unwrap();

        let settings = service.ensure_timer(60).unwrap();
        assert_eq!(serde_json::to_value(&settings).unwrap(), json!({"foo": 1, "timer": 60}));
        assert_eq!(
            store.read(SETTINGS_FILE).unwrap(),
            json!([{"foo": 1, "timer": 60}])
        );

        // A different default never replaces the stored interval.
        let settings = service.ensure_timer(120).unwrap();
        assert_eq!(settings.timer(), Some(60));
        assert_eq!(
            store.read(SETTINGS_FILE).unwrap(),
            json!([{"foo": 1, "timer": 60}])
        );
    }

    #[test]
    fn test_existing_timer_is_not_rewritten() {
        let (_dir, store, service) = service();
        store
            .write(SETTINGS_FILE, &json!([{"timer": 15, "theme": "dark"}]))
            .unwrap();
        let modified = std::fs::metadata(store.path_for(SETTINGS_FILE))
            .unwrap()
            .modified()
            .unwrap();

        let settings = service.ensure_timer(999).unwrap();
        assert_eq!(settings.timer(), Some(15));
        assert_eq!(settings.fields["theme"], "dark");

        let modified_again = std::fs::metadata(store.path_for(SETTINGS_FILE))
            .unwrap()
            .modified()
            .unwrap();
        assert_eq!(modified, modified_again);
    }

    #[test]
    fn test_bare_object_and_empty_list() {
        let (_dir, store, service) = service();

        store.write(SETTINGS_FILE, &json!({"foo": true})).unwrap();
        service.ensure_timer(30).unwrap();
        assert_eq!(
            store.read(SETTINGS_FILE).unwrap(),
            json!([{"foo": true, "timer": 30}])
        );

        store.write(SETTINGS_FILE, &json!([])).unwrap();
        service.ensure_timer(30).unwrap();
        assert_eq!(store.read(SETTINGS_FILE).unwrap(), json!([{"timer": 30}]));
    }

    #[test]
    fn test_trailing_elements_survive() {
        let (_dir, store, service) = service();
        store
            .write(SETTINGS_FILE, &json!([{}, {"history": [1, 2]}]))
            .unwrap();

        service.ensure_timer(45).unwrap();
        assert_eq!(
            store.read(SETTINGS_FILE).unwrap(),
            json!([{"timer": 45}, {"history": [1, 2]}])
        );
    }

    #[test]
    fn test_stored_timer_of_any_type_is_kept() {
        let (_dir, store, service) = service();

        for document in [
            json!([{"timer": null, "foo": 1}]),
            json!([{"timer": "60"}]),
            json!([{"timer": 60.0}]),
            json!([{"timer": -1}]),
        ] {
            store.write(SETTINGS_FILE, &document).unwrap();
            let settings = service.ensure_timer(300).unwrap();
            assert!(settings.has_timer());
            assert_eq!(settings.timer_interval(), None);
            assert_eq!(store.read(SETTINGS_FILE).unwrap(), document);
        }
    }

    #[test]
    fn test_unexpected_shape_is_corrupt() {
        let (_dir, store, service) = service();

        for document in [json!([5]), json!("text"), json!([[{"timer": 60}]])] {
            store.write(SETTINGS_FILE, &document).unwrap();
            let err = service.ensure_timer(60).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::CorruptStore);
            assert_eq!(store.read(SETTINGS_FILE).unwrap(), document);
        }
    }

    #[test]
    fn test_load_bootstraps_default() {
        let (_dir, store, service) = service();
        let settings = service.load().unwrap();
        assert_eq!(settings, SettingsDocument::default());
        assert_eq!(store.read(SETTINGS_FILE).unwrap(), json!([{}]));
    }
}
