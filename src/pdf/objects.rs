//! Object allocation and change staging over a document's object space.

use lopdf::{Document, Object, ObjectId};

/// Allocates references in a document's object space and keeps resolved
/// objects available for immediate lookup.
pub trait ObjectStore {
    /// Allocate a reference no other allocation from this store returns.
    fn allocate_ref(&mut self) -> ObjectId;

    /// Make `object` resolvable at `id` without waiting for persistence.
    fn cache(&mut self, id: ObjectId, object: Object);
}

impl ObjectStore for Document {
    fn allocate_ref(&mut self) -> ObjectId {
        self.new_object_id()
    }

    fn cache(&mut self, id: ObjectId, object: Object) {
        self.objects.insert(id, object);
    }
}

/// Records newly created objects, keyed by reference, for later persistence.
pub trait ChangeSet {
    fn register(&mut self, id: ObjectId, object: Object);
}

/// Ordered buffer of pending object writes. Nothing lands in a document
/// until [`DocumentChanges::apply_to`] runs, so a caller that hits an error
/// mid-operation can drop the buffer and leave the document untouched.
#[derive(Debug, Default)]
pub struct DocumentChanges {
    entries: Vec<(ObjectId, Object)>,
}

impl DocumentChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The pending object registered at `id`, if any.
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, object)| object)
    }

    /// Pending entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.entries.iter().map(|(id, object)| (*id, object))
    }

    /// Write every pending object into the document, consuming the buffer.
    pub fn apply_to(self, document: &mut Document) {
        for (id, object) in self.entries {
            // keep new_object_id monotonic even when the buffer is applied
            // to a document that did not allocate these ids
            if id.0 > document.max_id {
                document.max_id = id.0;
            }
            document.objects.insert(id, object);
        }
    }
}

impl ChangeSet for DocumentChanges {
    fn register(&mut self, id: ObjectId, object: Object) {
        if let Some(entry) = self.entries.iter_mut().find(|(entry_id, _)| *entry_id == id) {
            entry.1 = object;
        } else {
            self.entries.push((id, object));
        }
    }
}
