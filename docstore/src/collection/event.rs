use crate::collection::Document;
use std::fmt::{Debug, Formatter};

/// Event types that can occur on a collection.
///
/// # Variants
/// - `Insert`: a new document was added to the collection
/// - `Update`: an existing document was replaced in the collection
/// - `Remove`: a document was deleted from the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionEvents {
    Insert,
    Update,
    Remove,
}

/// Information about a collection event that occurred.
///
/// Listeners receive the event type, the affected document (captured at event
/// time), and the name of the collection that originated the event.
#[derive(Clone)]
pub struct CollectionEventInfo {
    item: Option<Document>,
    event_type: CollectionEvents,
    originator: String,
}

impl CollectionEventInfo {
    /// Creates a new collection event.
    pub fn new(
        item: Option<Document>,
        event_type: CollectionEvents,
        originator: String,
    ) -> Self {
        CollectionEventInfo {
            item,
            event_type,
            originator,
        }
    }

    /// Returns the type of event.
    pub fn event_type(&self) -> CollectionEvents {
        self.event_type.clone()
    }

    /// Returns the document associated with this event, if captured.
    pub fn item(&self) -> Option<&Document> {
        self.item.as_ref()
    }

    /// Returns the name of the collection that fired this event.
    pub fn originator(&self) -> &str {
        &self.originator
    }
}

impl Debug for CollectionEventInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionEventInfo")
            .field("event_type", &self.event_type)
            .field("originator", &self.originator)
            .finish()
    }
}

/// Observer for collection mutations.
///
/// Listeners are injected with
/// [`Collection::subscribe`](crate::collection::Collection::subscribe) and
/// invoked synchronously, on the mutating thread, after the mutation is
/// applied. Any `Fn(&CollectionEventInfo) + Send + Sync` closure qualifies.
pub trait CollectionEventListener: Send + Sync {
    fn on_event(&self, event: &CollectionEventInfo);
}

impl<F> CollectionEventListener for F
where
    F: Fn(&CollectionEventInfo) + Send + Sync,
{
    fn on_event(&self, event: &CollectionEventInfo) {
        self(event)
    }
}
