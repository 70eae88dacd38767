use crate::collection::{Collection, CollectionConfig};
use crate::errors::{ErrorKind, StoreError, StoreResult};
use crate::store::event::{StoreEventInfo, StoreEventListener, StoreEvents};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A named set of collections; the unit of persistence.
///
/// # Characteristics
/// - **Schema-less**: collections hold arbitrary documents, keyed by a
///   configured primary-key field
/// - **Single-writer**: all operations run to completion on the caller's
///   thread; no internal locking
/// - **Event-driven**: injected listeners observe collection lifecycle
///   mutations
/// - **Persistable**: the whole graph dumps to bytes and restores from them
///   (see the persistence methods on this type)
///
/// # Usage
/// ```ignore
/// let mut store = Store::new();
/// let users = store.create_collection("users", CollectionConfig::new("id"))?;
/// users.put(doc! { id: "u1", name: "Alice" })?;
/// store.dump_to_file("data/store.db")?;
/// ```
#[derive(Clone, serde::Deserialize, serde::Serialize)]
pub struct Store {
    collections: BTreeMap<String, Collection>,
    #[serde(skip)]
    listeners: Vec<Arc<dyn StoreEventListener>>,
}

impl Store {
    /// Creates a new empty store.
    pub fn new() -> Store {
        Store {
            collections: BTreeMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Creates a collection under the given name.
    ///
    /// # Errors
    ///
    /// Fails with `ConfigMissing` when the config names no primary key and
    /// `CollectionAlreadyExists` when the name is taken.
    pub fn create_collection(
        &mut self,
        name: &str,
        config: CollectionConfig,
    ) -> StoreResult<&mut Collection> {
        log::info!("create collection '{}' requested", name);

        if self.collections.contains_key(name) {
            log::warn!("create collection '{}' failed: already exists", name);
            return Err(StoreError::new(
                &format!("collection '{}' already exists", name),
                ErrorKind::CollectionAlreadyExists,
            ));
        }

        let collection = Collection::new(name, config)?;
        let primary_key = collection.config().primary_key().to_string();
        self.collections.insert(name.to_string(), collection);
        self.notify(StoreEvents::CollectionCreated, name);

        log::info!(
            "collection '{}' created with primary key '{}'",
            name,
            primary_key
        );

        self.collections.get_mut(name).ok_or_else(|| {
            StoreError::new(
                "collection lookup failed right after insert",
                ErrorKind::InternalError,
            )
        })
    }

    /// Returns the named collection.
    pub fn collection(&self, name: &str) -> StoreResult<&Collection> {
        match self.collections.get(name) {
            Some(collection) => {
                log::debug!("collection '{}' retrieved", name);
                Ok(collection)
            }
            None => {
                log::warn!("get collection '{}' failed: not found", name);
                Err(StoreError::new(
                    &format!("collection '{}' not found", name),
                    ErrorKind::CollectionNotFound,
                ))
            }
        }
    }

    /// Returns the named collection for mutation.
    pub fn collection_mut(&mut self, name: &str) -> StoreResult<&mut Collection> {
        match self.collections.get_mut(name) {
            Some(collection) => Ok(collection),
            None => {
                log::warn!("get collection '{}' failed: not found", name);
                Err(StoreError::new(
                    &format!("collection '{}' not found", name),
                    ErrorKind::CollectionNotFound,
                ))
            }
        }
    }

    /// Deletes the named collection and all its documents.
    pub fn delete_collection(&mut self, name: &str) -> StoreResult<()> {
        log::info!("delete collection '{}' requested", name);

        if self.collections.remove(name).is_none() {
            log::warn!("delete collection '{}' failed: not found", name);
            return Err(StoreError::new(
                &format!("collection '{}' not found", name),
                ErrorKind::CollectionNotFound,
            ));
        }

        self.notify(StoreEvents::CollectionRemoved, name);
        log::info!("collection '{}' deleted", name);
        Ok(())
    }

    /// Checks whether a collection with the given name exists.
    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Returns the names of all collections.
    pub fn collection_names(&self) -> Vec<String> {
        self.collections.keys().cloned().collect()
    }

    /// Returns the number of collections.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Registers an event listener, notified after every store-level
    /// mutation.
    pub fn subscribe(&mut self, listener: Arc<dyn StoreEventListener>) {
        self.listeners.push(listener);
    }

    fn notify(&self, event_type: StoreEvents, collection_name: &str) {
        if self.listeners.is_empty() {
            return;
        }
        let event = StoreEventInfo::new(event_type, collection_name.to_string());
        for listener in &self.listeners {
            listener.on_event(&event);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

impl Debug for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("collections", &self.collections)
            .finish()
    }
}

// Listener registration does not affect store identity
impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.collections == other.collections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use std::sync::Mutex;

    #[test]
    fn test_create_collection() {
        let mut store = Store::new();
        let collection = store
            .create_collection("users", CollectionConfig::new("id"))
            .unwrap();
        assert_eq!(collection.name(), "users");
        assert!(store.has_collection("users"));
        assert_eq!(store.collection_count(), 1);
    }

    #[test]
    fn test_create_collection_twice_fails() {
        let mut store = Store::new();
        store
            .create_collection("users", CollectionConfig::new("id"))
            .unwrap();
        let err = store
            .create_collection("users", CollectionConfig::new("id"))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::CollectionAlreadyExists);
    }

    #[test]
    fn test_create_collection_without_primary_key_fails() {
        let mut store = Store::new();
        let err = store
            .create_collection("users", CollectionConfig::new(""))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ConfigMissing);
        assert!(!store.has_collection("users"));
    }

    #[test]
    fn test_get_missing_collection_fails() {
        let store = Store::new();
        let err = store.collection("ghost").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
    }

    #[test]
    fn test_delete_collection() {
        let mut store = Store::new();
        store
            .create_collection("users", CollectionConfig::new("id"))
            .unwrap();

        store.delete_collection("users").unwrap();
        assert!(!store.has_collection("users"));

        let err = store.delete_collection("users").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
    }

    #[test]
    fn test_collection_round_trip_through_store() {
        let mut store = Store::new();
        store
            .create_collection("users", CollectionConfig::new("id"))
            .unwrap();

        store
            .collection_mut("users")
            .unwrap()
            .put(doc! { id: "u1", name: "Alice" })
            .unwrap();

        let users = store.collection("users").unwrap();
        assert_eq!(users.len(), 1);
        assert!(users.get("u1").is_some());
    }

    #[test]
    fn test_store_events() {
        let mut store = Store::new();
        let seen: Arc<Mutex<Vec<(StoreEvents, String)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(Arc::new(move |event: &StoreEventInfo| {
            sink.lock()
                .unwrap()
                .push((event.event_type(), event.collection_name().to_string()));
        }));

        store
            .create_collection("users", CollectionConfig::new("id"))
            .unwrap();
        store.delete_collection("users").unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (StoreEvents::CollectionCreated, "users".to_string()),
                (StoreEvents::CollectionRemoved, "users".to_string())
            ]
        );
    }
}
