use indexmap::IndexMap;
use indexmap::map::Values;

use crate::model::user::{UserId, UserRecord};

/// The canonical, ordered list of user records.
///
/// Records are keyed by id so an id can appear at most once. Display order is
/// insertion order; replacing a record keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: IndexMap<UserId, UserRecord>,
    /// Highest id ever held by this store. Never decreases, so removed ids are
    /// not handed out again by `next_id`.
    high_water: UserId,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current contents and install `records` in the given order.
    ///
    /// A duplicated id keeps the position of its first occurrence and the
    /// contents of its last.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = UserRecord>) {
        self.records.clear();
        for record in records {
            self.bump(record.id);
            self.records.insert(record.id, record);
        }
    }

    /// Replace the record with the same id in place, or append it.
    pub fn upsert(&mut self, record: UserRecord) {
        self.bump(record.id);
        self.records.insert(record.id, record);
    }

    /// Remove the record with `id`. Returns false (and changes nothing) when
    /// no such record exists.
    pub fn remove(&mut self, id: UserId) -> bool {
        self.records.shift_remove(&id).is_some()
    }

    /// An id not used by any current or previously removed record.
    ///
    /// `None` once the store has held `UserId::MAX`: every later id would
    /// repeat one already handed out.
    pub fn next_id(&self) -> Option<UserId> {
        self.high_water.checked_add(1)
    }

    pub fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.records.get(&id)
    }

    /// Position of `id` in display order
    pub fn position(&self, id: UserId) -> Option<usize> {
        self.records.get_index_of(&id)
    }

    /// All records in display order
    pub fn all(&self) -> Values<'_, UserId, UserRecord> {
        self.records.values()
    }

    /// Owned copy of all records in display order
    pub fn snapshot(&self) -> Vec<UserRecord> {
        self.records.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn bump(&mut self, id: UserId) {
        self.high_water = self.high_water.max(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn user(id: UserId, name: &str) -> UserRecord {
        UserRecord {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn ids(store: &RecordStore) -> Vec<UserId> {
        store.all().map(|u| u.id).collect()
    }

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.replace_all(vec![user(1, "Leanne"), user(2, "Ervin"), user(3, "Clementine")]);
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = RecordStore::new();
        assert!(store.is_empty());
        assert_eq!(store.next_id(), Some(1));
    }

    #[test]
    fn test_replace_all_installs_in_order() {
        let mut store = sample_store();
        assert_eq!(ids(&store), vec![1, 2, 3]);

        store.replace_all(vec![user(9, "Nine"), user(4, "Four")]);
        assert_eq!(ids(&store), vec![9, 4]);
        assert!(store.get(1).is_none());
    }

    #[test]
    fn test_replace_all_duplicate_ids_keep_first_position() {
        let mut store = RecordStore::new();
        store.replace_all(vec![user(1, "a"), user(2, "b"), user(1, "c")]);
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(store.get(1).unwrap().name, "c");
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut store = sample_store();
        store.upsert(user(2, "Ervin Howell"));
        assert_eq!(ids(&store), vec![1, 2, 3]);
        assert_eq!(store.get(2).unwrap().name, "Ervin Howell");
        assert_eq!(store.position(2), Some(1));
    }

    #[test]
    fn test_upsert_appends_new() {
        let mut store = sample_store();
        store.upsert(user(10, "Ten"));
        assert_eq!(ids(&store), vec![1, 2, 3, 10]);
    }

    #[test]
    fn test_upsert_idempotent() {
        let mut once = sample_store();
        once.upsert(user(4, "Patricia"));
        let mut twice = sample_store();
        twice.upsert(user(4, "Patricia"));
        twice.upsert(user(4, "Patricia"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut store = sample_store();
        assert!(store.remove(2));
        assert_eq!(ids(&store), vec![1, 3]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = sample_store();
        assert!(store.remove(2));
        let after_first = store.clone();
        assert!(!store.remove(2));
        assert_eq!(store, after_first);
        assert!(!store.remove(99));
        assert_eq!(store, after_first);
    }

    #[test]
    fn test_next_id_not_reused_after_remove() {
        let mut store = sample_store();
        assert_eq!(store.next_id(), Some(4));
        store.remove(1);
        // count + 1 would give 3 here, colliding with an existing record
        let id = store.next_id().unwrap();
        assert_eq!(id, 4);
        assert!(store.get(id).is_none());

        store.upsert(user(id, "new"));
        store.remove(id);
        assert_eq!(store.next_id(), Some(5));
    }

    #[test]
    fn test_next_id_skips_sparse_ids() {
        let mut store = RecordStore::new();
        store.replace_all(vec![user(5, "a"), user(2, "b")]);
        assert_eq!(store.next_id(), Some(6));
    }

    #[test]
    fn test_next_id_exhausted_at_max() {
        let mut store = RecordStore::new();
        store.replace_all(vec![user(UserId::MAX, "max"), user(1, "one")]);
        assert_eq!(store.next_id(), None);
        // Still exhausted after the record holding the max id is gone
        store.remove(UserId::MAX);
        assert_eq!(store.next_id(), None);
    }

    #[test]
    fn test_snapshot() {
        let store = sample_store();
        let names: Vec<String> = store.snapshot().into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Leanne", "Ervin", "Clementine"]);
        assert_eq!(store.len(), 3);
    }
}
