use crate::collection::event::{CollectionEventInfo, CollectionEventListener, CollectionEvents};
use crate::collection::Document;
use crate::common::FieldValue;
use crate::errors::{ErrorKind, StoreError, StoreResult};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Configuration of a collection.
///
/// Names the document field that serves as primary key. That field must be
/// present and string-typed in every document the collection accepts.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct CollectionConfig {
    primary_key: String,
}

impl CollectionConfig {
    /// Creates a config with the given primary-key field name.
    pub fn new(primary_key: impl Into<String>) -> Self {
        CollectionConfig {
            primary_key: primary_key.into(),
        }
    }

    /// Returns the primary-key field name.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    pub(crate) fn validate(&self) -> StoreResult<()> {
        if self.primary_key.is_empty() {
            log::error!("collection config names no primary key");
            return Err(StoreError::new(
                "collection config names no primary key",
                ErrorKind::ConfigMissing,
            ));
        }
        Ok(())
    }
}

/// A keyed set of documents sharing a primary-key configuration.
///
/// Documents are inserted or replaced by their primary-key value. The
/// collection never holds a document whose configured primary-key field is
/// missing or not string-typed.
///
/// Collections are not safe for concurrent mutation; callers that share a
/// collection across threads must serialize access externally.
#[derive(Clone, serde::Deserialize, serde::Serialize)]
pub struct Collection {
    name: String,
    config: CollectionConfig,
    items: BTreeMap<String, Document>,
    #[serde(skip)]
    listeners: Vec<Arc<dyn CollectionEventListener>>,
}

impl Collection {
    /// Creates an empty collection with the given name and config.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidOperation` for an empty name and `ConfigMissing`
    /// when the config names no primary key.
    pub fn new(name: impl Into<String>, config: CollectionConfig) -> StoreResult<Collection> {
        let name = name.into();
        if name.is_empty() {
            log::error!("collection name cannot be empty");
            return Err(StoreError::new(
                "collection name cannot be empty",
                ErrorKind::InvalidOperation,
            ));
        }
        config.validate()?;
        Ok(Collection {
            name,
            config,
            items: BTreeMap::new(),
            listeners: Vec::new(),
        })
    }

    /// Returns the collection's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the collection's configuration.
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Inserts or replaces a document, keyed by its primary-key field.
    ///
    /// # Errors
    ///
    /// Fails with `UnsupportedField`, leaving the collection unchanged, when
    /// the configured primary-key field is missing or not string-typed.
    pub fn put(&mut self, document: Document) -> StoreResult<()> {
        let primary_key = self.config.primary_key();
        let key = match document.get(primary_key) {
            Some(FieldValue::String(key)) => key.clone(),
            Some(other) => {
                log::warn!(
                    "put document failed: primary key field '{}' is {}, not a string",
                    primary_key,
                    other.field_type()
                );
                return Err(StoreError::new(
                    &format!(
                        "primary key field '{}' must be a string, found {}",
                        primary_key,
                        other.field_type()
                    ),
                    ErrorKind::UnsupportedField,
                ));
            }
            None => {
                log::warn!(
                    "put document failed: missing primary key field '{}'",
                    primary_key
                );
                return Err(StoreError::new(
                    &format!("document has no primary key field '{}'", primary_key),
                    ErrorKind::UnsupportedField,
                ));
            }
        };

        let existed = self.items.contains_key(&key);
        let item = (!self.listeners.is_empty()).then(|| document.clone());
        self.items.insert(key.clone(), document);

        if existed {
            log::info!("collection '{}': document '{}' updated", self.name, key);
            self.notify(CollectionEvents::Update, item);
        } else {
            log::info!("collection '{}': document '{}' created", self.name, key);
            self.notify(CollectionEvents::Insert, item);
        }

        Ok(())
    }

    /// Returns the document stored under the given primary-key value.
    pub fn get(&self, key: &str) -> Option<&Document> {
        match self.items.get(key) {
            Some(document) => {
                log::debug!("collection '{}': document '{}' retrieved", self.name, key);
                Some(document)
            }
            None => {
                log::debug!("collection '{}': document '{}' not found", self.name, key);
                None
            }
        }
    }

    /// Removes the document stored under the given primary-key value.
    /// Returns true if a document was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        match self.items.remove(key) {
            Some(removed) => {
                log::info!("collection '{}': document '{}' deleted", self.name, key);
                let item = (!self.listeners.is_empty()).then_some(removed);
                self.notify(CollectionEvents::Remove, item);
                true
            }
            None => {
                log::warn!(
                    "collection '{}': delete failed, document '{}' not found",
                    self.name,
                    key
                );
                false
            }
        }
    }

    /// Returns a snapshot copy of all documents. Order is unspecified.
    pub fn list(&self) -> Vec<Document> {
        log::debug!("collection '{}': list {} documents", self.name, self.items.len());
        self.items.values().cloned().collect()
    }

    /// Returns the number of stored documents.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the collection holds no documents.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Registers an event listener, notified after every mutation.
    pub fn subscribe(&mut self, listener: Arc<dyn CollectionEventListener>) {
        self.listeners.push(listener);
    }

    fn notify(&self, event_type: CollectionEvents, item: Option<Document>) {
        if self.listeners.is_empty() {
            return;
        }
        let event = CollectionEventInfo::new(item, event_type, self.name.clone());
        for listener in &self.listeners {
            listener.on_event(&event);
        }
    }
}

impl Debug for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("items", &self.items.len())
            .finish()
    }
}

// Listener registration does not affect collection identity
impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.config == other.config && self.items == other.items
    }
}
