/// Event types that can occur on a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvents {
    CollectionCreated,
    CollectionRemoved,
}

/// Information about a store event that occurred.
#[derive(Debug, Clone)]
pub struct StoreEventInfo {
    event_type: StoreEvents,
    collection_name: String,
}

impl StoreEventInfo {
    pub fn new(event_type: StoreEvents, collection_name: String) -> Self {
        StoreEventInfo {
            event_type,
            collection_name,
        }
    }

    /// Returns the type of event.
    pub fn event_type(&self) -> StoreEvents {
        self.event_type.clone()
    }

    /// Returns the name of the affected collection.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }
}

/// Observer for store-level mutations, invoked synchronously after the
/// mutation is applied. Any `Fn(&StoreEventInfo) + Send + Sync` closure
/// qualifies.
pub trait StoreEventListener: Send + Sync {
    fn on_event(&self, event: &StoreEventInfo);
}

impl<F> StoreEventListener for F
where
    F: Fn(&StoreEventInfo) + Send + Sync,
{
    fn on_event(&self, event: &StoreEventInfo) {
        self(event)
    }
}
