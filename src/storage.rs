use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Current layout of the persisted files. Version 0 is the legacy layout:
/// a bare JSON array with no envelope.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, T> {
    schema_version: u32,
    records: &'a [T],
}

/// File-backed key-value storage: one JSON blob per collection key.
/// The sole I/O boundary of the application.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn open() -> Result<Self> {
        Self::open_at(Self::default_dir())
    }

    pub fn open_at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn default_dir() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "estate") {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from("estate-data")
        }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn file(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Returns the persisted collection, or `None` when the file is absent,
    /// malformed, or written by a newer schema. Corrupt data is recovered by
    /// the caller falling back to seed fixtures, so nothing propagates here.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let path = self.file(key);
        let raw = fs::read_to_string(&path).ok()?;

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(key, error = %e, "discarding malformed collection file");
                return None;
            }
        };

        let records = if value.is_array() {
            // Legacy layout: the collection was stored as a bare array.
            value
        } else if let serde_json::Value::Object(obj) = value {
            match obj.get("schemaVersion").and_then(|v| v.as_u64()) {
                Some(v) if v as u32 <= SCHEMA_VERSION => {
                    obj.get("records").cloned().unwrap_or_default()
                }
                Some(v) => {
                    warn!(key, version = v, "collection written by a newer schema, ignoring");
                    return None;
                }
                None => {
                    warn!(key, "collection envelope missing schemaVersion, ignoring");
                    return None;
                }
            }
        } else {
            warn!(key, "unexpected top-level JSON shape, ignoring");
            return None;
        };

        match serde_json::from_value(records) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(key, error = %e, "discarding undecodable collection");
                None
            }
        }
    }

    /// Serializes and overwrites the whole blob for `key`. No partial updates.
    pub fn save<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            records,
        };
        let json = serde_json::to_string_pretty(&envelope)
            .with_context(|| format!("Failed to serialize collection '{key}'"))?;
        let path = self.file(key);
        fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Rec {
        id: String,
        price: i64,
    }

    fn temp_storage() -> Storage {
        let dir = std::env::temp_dir().join(format!("estate-test-{}", uuid::Uuid::new_v4()));
        Storage::open_at(dir).unwrap()
    }

    fn rec(id: &str, price: i64) -> Rec {
        Rec {
            id: id.to_string(),
            price,
        }
    }

    #[test]
    fn round_trip() {
        let storage = temp_storage();
        let records = vec![rec("a", 100), rec("b", 200)];
        storage.save("things", &records).unwrap();
        let loaded: Vec<Rec> = storage.load("things").unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn missing_file_is_none() {
        let storage = temp_storage();
        assert!(storage.load::<Rec>("nothing").is_none());
    }

    #[test]
    fn malformed_json_is_none() {
        let storage = temp_storage();
        std::fs::write(storage.dir().join("things.json"), "{not json").unwrap();
        assert!(storage.load::<Rec>("things").is_none());
    }

    #[test]
    fn bare_array_migrates_as_legacy_layout() {
        let storage = temp_storage();
        std::fs::write(
            storage.dir().join("things.json"),
            r#"[{"id":"a","price":42}]"#,
        )
        .unwrap();
        let loaded: Vec<Rec> = storage.load("things").unwrap();
        assert_eq!(loaded, vec![rec("a", 42)]);
    }

    #[test]
    fn newer_schema_version_is_rejected() {
        let storage = temp_storage();
        std::fs::write(
            storage.dir().join("things.json"),
            r#"{"schemaVersion":99,"records":[{"id":"a","price":1}]}"#,
        )
        .unwrap();
        assert!(storage.load::<Rec>("things").is_none());
    }

    #[test]
    fn undecodable_records_are_none() {
        let storage = temp_storage();
        std::fs::write(
            storage.dir().join("things.json"),
            r#"{"schemaVersion":1,"records":[{"wrong":"shape"}]}"#,
        )
        .unwrap();
        assert!(storage.load::<Rec>("things").is_none());
    }
}
