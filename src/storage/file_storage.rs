// src/storage/file_storage.rs
// DOCUMENTATION: JSON file-backed storage
// PURPOSE: Keep every record in memory and flush the whole set to one JSON document

use super::{Storage, StorageError};
use crate::models::{Kind, Record};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// In-memory record set plus a parent -> children index
#[derive(Default)]
struct StoreState {
    objects: BTreeMap<(Kind, String), Record>,
    /// (child kind, parent id) -> child ids, oldest first
    children: HashMap<(Kind, String), Vec<String>>,
}

impl StoreState {
    fn insert(&mut self, record: Record) {
        let kind = record.kind();
        let id = record.id().to_string();
        let parent = record.parent_id().map(str::to_string);

        let previous = self.objects.insert((kind, id.clone()), record);
        let previous_parent = previous
            .as_ref()
            .and_then(|r| r.parent_id().map(str::to_string));

        if previous.is_some() && previous_parent == parent {
            return;
        }
        if let Some(old_parent) = previous_parent {
            self.unlink(kind, &old_parent, &id);
        }
        if let Some(parent) = parent {
            self.children.entry((kind, parent)).or_default().push(id);
        }
    }

    fn remove(&mut self, kind: Kind, id: &str) -> Option<Record> {
        let removed = self.objects.remove(&(kind, id.to_string()))?;
        if let Some(parent) = removed.parent_id() {
            self.unlink(kind, parent, id);
        }
        Some(removed)
    }

    fn contains(&self, kind: Kind, id: &str) -> bool {
        self.objects.contains_key(&(kind, id.to_string()))
    }

    fn unlink(&mut self, kind: Kind, parent: &str, id: &str) {
        let key = (kind, parent.to_string());
        if let Some(ids) = self.children.get_mut(&key) {
            ids.retain(|child| child != id);
            if ids.is_empty() {
                self.children.remove(&key);
            }
        }
    }

    /// Restore creation order after a bulk load from an unordered document
    fn sort_children(&mut self) {
        let StoreState { objects, children } = self;
        for ((kind, _), ids) in children.iter_mut() {
            ids.sort_by_cached_key(|id| {
                let created_at = objects
                    .get(&(*kind, id.clone()))
                    .map(Record::created_at);
                (created_at, id.clone())
            });
        }
    }
}

/// Storage engine persisting all records as a single JSON object
/// DOCUMENTATION: The document maps `<Class>.<id>` to the serialized record.
/// Without a file path nothing is written and `save` only logs.
/// Flushes are serialized so two writers never share a temp file.
pub struct FileStorage {
    state: RwLock<StoreState>,
    file_path: Option<PathBuf>,
    flush_lock: Mutex<()>,
}

impl FileStorage {
    /// Storage that never touches the filesystem
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            file_path: None,
            flush_lock: Mutex::new(()),
        }
    }

    /// Load the store from `path`. A missing or empty file starts an empty store.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StorageError> {
        let file_path = path.into();
        let mut state = StoreState::default();

        match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => {}
            Ok(bytes) => {
                let document: HashMap<String, Record> = serde_json::from_slice(&bytes)?;
                for (key, record) in document {
                    if key != record.key() {
                        return Err(StorageError::Corrupt {
                            reason: format!("key does not match record {}", record.key()),
                            key,
                        });
                    }
                    state.insert(record);
                }
                state.sort_children();
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Store file {} not found, starting empty", file_path.display());
            }
            Err(e) => return Err(e.into()),
        }

        log::info!(
            "Loaded {} records from {}",
            state.objects.len(),
            file_path.display()
        );

        Ok(Self {
            state: RwLock::new(state),
            file_path: Some(file_path),
            flush_lock: Mutex::new(()),
        })
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, kind: Kind, id: &str) -> Result<Option<Record>, StorageError> {
        let state = self.state.read().await;
        Ok(state.objects.get(&(kind, id.to_string())).cloned())
    }

    async fn all(&self, kind: Kind) -> Result<Vec<Record>, StorageError> {
        let state = self.state.read().await;
        Ok(state
            .objects
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn children(&self, kind: Kind, parent_id: &str) -> Result<Vec<Record>, StorageError> {
        let state = self.state.read().await;
        let ids = match state.children.get(&(kind, parent_id.to_string())) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };

        Ok(ids
            .iter()
            .filter_map(|id| state.objects.get(&(kind, id.clone())).cloned())
            .collect())
    }

    async fn count(&self, kind: Kind) -> Result<usize, StorageError> {
        let state = self.state.read().await;
        Ok(state.objects.keys().filter(|(k, _)| *k == kind).count())
    }

    async fn new(&self, record: Record) -> Result<(), StorageError> {
        let mut state = self.state.write().await;
        state.insert(record);
        Ok(())
    }

    async fn replace(&self, record: Record) -> Result<bool, StorageError> {
        let mut state = self.state.write().await;
        if !state.contains(record.kind(), record.id()) {
            return Ok(false);
        }
        state.insert(record);
        Ok(true)
    }

    async fn attach(&self, record: Record) -> Result<bool, StorageError> {
        let mut state = self.state.write().await;
        if let (Some(kind), Some(parent_id)) = (record.parent_kind(), record.parent_id()) {
            if !state.contains(kind, parent_id) {
                return Ok(false);
            }
        }
        state.insert(record);
        Ok(true)
    }

    async fn delete(&self, kind: Kind, id: &str) -> Result<bool, StorageError> {
        let mut state = self.state.write().await;
        Ok(state.remove(kind, id).is_some())
    }

    async fn save(&self) -> Result<(), StorageError> {
        let file_path = match &self.file_path {
            Some(path) => path,
            None => {
                log::debug!("In-memory storage: nothing to flush");
                return Ok(());
            }
        };

        // held until the rename lands so the file always matches one snapshot
        let _flush = self.flush_lock.lock().await;

        let data = {
            let state = self.state.read().await;
            let document: BTreeMap<String, &Record> = state
                .objects
                .values()
                .map(|record| (record.key(), record))
                .collect();
            serde_json::to_vec(&document)?
        };

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Atomic replace: write a sibling temp file, then rename over the target
        let tmp_path = file_path.with_extension(format!("json.{}.tmp", Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp_path, &data).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        fs::rename(&tmp_path, file_path).await?;

        log::debug!("Flushed {} bytes to {}", data.len(), file_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{City, CreatePlaceRequest, Place, User};
    use std::sync::Arc;
    use tokio_test::assert_ok;

    fn place_in(city: &City, user: &User, name: &str) -> Place {
        Place::new(
            city.id.clone(),
            CreatePlaceRequest {
                user_id: user.id.clone(),
                name: name.to_string(),
                description: String::new(),
                number_rooms: 1,
                number_bathrooms: 1,
                max_guest: 2,
                price_by_night: 80,
                latitude: 0.0,
                longitude: 0.0,
            },
        )
    }

    #[tokio::test]
    async fn test_get_all_and_delete() -> Result<(), anyhow::Error> {
        let storage = FileStorage::in_memory();
        let city = City::new("s1", "Austin");
        storage.new(Record::City(city.clone())).await?;

        let found = storage.get(Kind::City, &city.id).await?;
        assert_eq!(found, Some(Record::City(city.clone())));
        assert!(storage.get(Kind::User, &city.id).await?.is_none());
        assert_eq!(storage.all(Kind::City).await?.len(), 1);
        assert_eq!(storage.count(Kind::City).await?, 1);

        assert!(storage.delete(Kind::City, &city.id).await?);
        assert!(!storage.delete(Kind::City, &city.id).await?);
        assert!(storage.all(Kind::City).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_children_follow_inserts_and_deletes() -> Result<(), anyhow::Error> {
        let storage = FileStorage::in_memory();
        let city = City::new("s1", "Austin");
        let other = City::new("s1", "Dallas");
        let user = User::new("a@b.c", "Ada", "L");

        let first = place_in(&city, &user, "first");
        let second = place_in(&city, &user, "second");
        let elsewhere = place_in(&other, &user, "elsewhere");
        for place in [&first, &second, &elsewhere] {
            storage.new(Record::Place(place.clone())).await?;
        }

        let names: Vec<String> = storage
            .children(Kind::Place, &city.id)
            .await?
            .into_iter()
            .filter_map(|r| match r {
                Record::Place(p) => Some(p.name),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["first", "second"]);

        // replacing a record keeps a single index entry
        let mut renamed = first.clone();
        renamed.name = "renamed".to_string();
        storage.new(Record::Place(renamed)).await?;
        assert_eq!(storage.children(Kind::Place, &city.id).await?.len(), 2);

        storage.delete(Kind::Place, &first.id).await?;
        let remaining = storage.children(Kind::Place, &city.id).await?;
        assert_eq!(remaining, vec![Record::Place(second)]);
        assert!(storage.children(Kind::Place, "missing").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_persists_across_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("file_storage_{}.json", Uuid::new_v4()));
        let storage = FileStorage::open(&tmp).await?;
        assert_eq!(storage.file_path(), Some(tmp.as_path()));

        let city = City::new("s1", "Austin");
        let user = User::new("a@b.c", "Ada", "L");
        let first = place_in(&city, &user, "first");
        let mut second = place_in(&city, &user, "second");
        second.created_at = first.created_at + chrono::Duration::seconds(1);
        storage.new(Record::City(city.clone())).await?;
        storage.new(Record::User(user.clone())).await?;
        storage.new(Record::Place(first.clone())).await?;
        storage.new(Record::Place(second.clone())).await?;
        storage.save().await?;

        // unsaved changes are not visible after reopening
        storage.delete(Kind::User, &user.id).await?;

        let reopened = FileStorage::open(&tmp).await?;
        assert_eq!(reopened.count(Kind::City).await?, 1);
        assert_eq!(reopened.count(Kind::User).await?, 1);
        assert_eq!(
            reopened.children(Kind::Place, &city.id).await?,
            vec![Record::Place(first), Record::Place(second)]
        );

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_and_attach_respect_deletes() -> Result<(), anyhow::Error> {
        let storage = FileStorage::in_memory();
        let city = City::new("s1", "Austin");
        let user = User::new("a@b.c", "Ada", "L");
        let place = place_in(&city, &user, "first");

        // no city yet, so the place cannot be attached
        assert!(!storage.attach(Record::Place(place.clone())).await?);
        assert!(storage.attach(Record::City(city.clone())).await?);
        assert!(storage.attach(Record::Place(place.clone())).await?);

        let mut renamed = place.clone();
        renamed.name = "renamed".to_string();
        assert!(storage.replace(Record::Place(renamed.clone())).await?);
        assert_eq!(
            storage.get(Kind::Place, &place.id).await?,
            Some(Record::Place(renamed.clone()))
        );

        storage.delete(Kind::Place, &place.id).await?;
        assert!(!storage.replace(Record::Place(renamed)).await?);
        assert!(storage.get(Kind::Place, &place.id).await?.is_none());
        assert!(storage.children(Kind::Place, &city.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_all_succeed() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("file_storage_{}.json", Uuid::new_v4()));
        let storage = Arc::new(FileStorage::open(&tmp).await?);
        for i in 0..2000 {
            storage
                .new(Record::City(City::new("s1", &format!("City {}", i))))
                .await?;
        }

        for _ in 0..10 {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let storage = storage.clone();
                    tokio::spawn(async move { storage.save().await })
                })
                .collect();
            for handle in handles {
                assert_ok!(handle.await?);
            }
        }

        let reopened = FileStorage::open(&tmp).await?;
        assert_eq!(reopened.count(Kind::City).await?, 2000);

        // no temp files are left next to the store
        let stem = tmp.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
        let mut entries = fs::read_dir(std::env::temp_dir()).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            assert!(!(name.starts_with(&stem) && name.ends_with(".tmp")), "{}", name);
        }

        let _ = fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn test_open_rejects_malformed_documents() {
        let tmp = std::env::temp_dir().join(format!("file_storage_{}.json", Uuid::new_v4()));

        fs::write(&tmp, b"not json").await.unwrap();
        assert!(FileStorage::open(&tmp).await.is_err());

        let city = City::new("s1", "Austin");
        let document = serde_json::json!({ "City.wrong-id": Record::City(city) });
        fs::write(&tmp, serde_json::to_vec(&document).unwrap())
            .await
            .unwrap();
        assert!(matches!(
            FileStorage::open(&tmp).await,
            Err(StorageError::Corrupt { .. })
        ));

        fs::write(&tmp, b"").await.unwrap();
        assert_ok!(FileStorage::open(&tmp).await);

        let _ = fs::remove_file(&tmp).await;
    }

    #[tokio::test]
    async fn test_in_memory_save_is_noop() {
        let storage = FileStorage::in_memory();
        assert!(storage.file_path().is_none());
        assert_ok!(storage.save().await);
    }
}
