use tracing::{debug, info};

use crate::model::user::{UnknownField, UserField, UserId, UserRecord};
use crate::ops::store::RecordStore;

/// Error type for mutation workflows
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
    #[error("no add or edit in progress")]
    NoDraft,
    #[error("no user ids left to assign")]
    IdsExhausted,
}

/// A working copy of a record's fields while an add or edit is open.
///
/// For an add the id is a placeholder; the real id is assigned on commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    record: UserRecord,
}

impl Draft {
    /// Empty template for a new record
    pub fn blank() -> Self {
        Self::default()
    }

    /// Copy of an existing record, keeping its id
    pub fn from_record(record: &UserRecord) -> Self {
        Draft {
            record: record.clone(),
        }
    }

    pub fn field(&self, field: UserField) -> &str {
        self.record.field(field)
    }

    pub fn record(&self) -> &UserRecord {
        &self.record
    }
}

/// What the presentation layer currently has open. Only one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Viewing(UserRecord),
    Adding(Draft),
    Editing { id: UserId, draft: Draft },
}

/// Mediates view/add/edit/delete intents against a [`RecordStore`].
#[derive(Debug, Clone, Default)]
pub struct MutationController {
    selection: Selection,
}

impl MutationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The open draft, if an add or edit is in progress
    pub fn draft(&self) -> Option<&Draft> {
        match &self.selection {
            Selection::Adding(draft) | Selection::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.selection != Selection::None
    }

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------

    /// Open a read-only view of `record`, closing anything else that was open.
    pub fn view(&mut self, record: &UserRecord) {
        self.selection = Selection::Viewing(record.clone());
    }

    /// Close whatever is open. Any draft is discarded.
    pub fn dismiss(&mut self) {
        self.selection = Selection::None;
    }

    // -----------------------------------------------------------------------
    // Add / Edit
    // -----------------------------------------------------------------------

    /// Open an empty draft for a new record.
    pub fn begin_add(&mut self) {
        self.selection = Selection::Adding(Draft::blank());
    }

    /// Open a draft copied from `record`.
    pub fn begin_edit(&mut self, record: &UserRecord) {
        self.selection = Selection::Editing {
            id: record.id,
            draft: Draft::from_record(record),
        };
    }

    /// Set one field of the open draft by name.
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), MutationError> {
        let field: UserField = name.parse()?;
        self.set_field(field, value)
    }

    /// Set one field of the open draft.
    pub fn set_field(&mut self, field: UserField, value: impl Into<String>) -> Result<(), MutationError> {
        let draft = match &mut self.selection {
            Selection::Adding(draft) | Selection::Editing { draft, .. } => draft,
            _ => return Err(MutationError::NoDraft),
        };
        draft.record.set_field(field, value);
        Ok(())
    }

    /// Apply the open draft to `store` and close it. Returns the id written.
    ///
    /// An edit whose record was deleted meanwhile is appended again under its
    /// original id.
    pub fn commit(&mut self, store: &mut RecordStore) -> Result<UserId, MutationError> {
        match std::mem::take(&mut self.selection) {
            Selection::Adding(draft) => {
                let Some(next) = store.next_id() else {
                    self.selection = Selection::Adding(draft);
                    return Err(MutationError::IdsExhausted);
                };
                let mut record = draft.record;
                record.id = next;
                let id = record.id;
                store.upsert(record);
                info!(id, "added user");
                Ok(id)
            }
            Selection::Editing { id, draft } => {
                let mut record = draft.record;
                record.id = id;
                if store.get(id).is_none() {
                    debug!(id, "edited user no longer present, re-inserting");
                }
                store.upsert(record);
                info!(id, "updated user");
                Ok(id)
            }
            other => {
                self.selection = other;
                Err(MutationError::NoDraft)
            }
        }
    }

    /// Discard the open draft without touching the store.
    pub fn cancel(&mut self) {
        if self.draft().is_some() {
            self.selection = Selection::None;
        }
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Remove `id` from the store immediately. Missing ids are ignored.
    ///
    /// A view of the deleted record is closed. An edit draft of it stays
    /// open; committing it re-inserts the record.
    pub fn delete(&mut self, store: &mut RecordStore, id: UserId) -> bool {
        let removed = store.remove(id);
        if removed {
            info!(id, "deleted user");
        }
        if matches!(&self.selection, Selection::Viewing(r) if r.id == id) {
            self.selection = Selection::None;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.replace_all(vec![
            UserRecord {
                id: 1,
                name: "A".into(),
                username: "a1".into(),
                email: "a@example.com".into(),
                phone: "111".into(),
                website: "a.example".into(),
            },
            UserRecord {
                id: 2,
                name: "Bee".into(),
                username: "b2".into(),
                email: "b@example.com".into(),
                phone: "222".into(),
                website: "b.example".into(),
            },
        ]);
        store
    }

    // --- Add ---

    #[test]
    fn test_add_workflow() {
        let mut store = sample_store();
        let mut ctl = MutationController::new();
        ctl.begin_add();
        ctl.update_field("name", "Ann").unwrap();
        let id = ctl.commit(&mut store).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(id, 3);
        assert_eq!(
            store.get(id),
            Some(&UserRecord {
                id: 3,
                name: "Ann".into(),
                ..Default::default()
            })
        );
        assert_eq!(store.position(id), Some(2));
        assert_eq!(ctl.selection(), &Selection::None);
    }

    #[test]
    fn test_add_after_delete_gets_fresh_id() {
        let mut store = sample_store();
        let mut ctl = MutationController::new();
        ctl.delete(&mut store, 1);

        ctl.begin_add();
        ctl.update_field("name", "Ann").unwrap();
        let id = ctl.commit(&mut store).unwrap();

        assert_eq!(id, 3);
        let ids: Vec<_> = store.all().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_add_with_ids_exhausted() {
        let mut store = RecordStore::new();
        store.replace_all(crate::io::source::parse_users(
            br#"[{"id": 18446744073709551615, "name": "max"}]"#,
        )
        .unwrap());
        let before = store.clone();
        let mut ctl = MutationController::new();
        ctl.begin_add();
        ctl.update_field("name", "Ann").unwrap();

        assert_eq!(ctl.commit(&mut store), Err(MutationError::IdsExhausted));
        assert_eq!(store, before);
        // The draft stays open so the operator can cancel
        assert_eq!(ctl.draft().unwrap().field(UserField::Name), "Ann");
        ctl.cancel();
        assert!(!ctl.is_open());
    }

    #[test]
    fn test_update_field_last_write_wins() {
        let mut ctl = MutationController::new();
        ctl.begin_add();
        ctl.update_field("email", "x@y").unwrap();
        ctl.update_field("email", "z@y").unwrap();
        assert_eq!(ctl.draft().unwrap().field(UserField::Email), "z@y");
    }

    #[test]
    fn test_update_unknown_field_rejected() {
        let mut ctl = MutationController::new();
        ctl.begin_add();
        ctl.update_field("name", "Ann").unwrap();
        let before = ctl.draft().cloned();

        let err = ctl.update_field("address", "Kulas Light").unwrap_err();
        assert_eq!(err, MutationError::UnknownField(UnknownField("address".into())));
        assert_eq!(err.to_string(), "unknown field: address");
        assert_eq!(ctl.draft().cloned(), before);
    }

    #[test]
    fn test_update_without_draft() {
        let mut ctl = MutationController::new();
        assert_eq!(ctl.update_field("name", "x"), Err(MutationError::NoDraft));

        let store = sample_store();
        ctl.view(store.get(1).unwrap());
        assert_eq!(ctl.update_field("name", "x"), Err(MutationError::NoDraft));
    }

    // --- Edit ---

    #[test]
    fn test_edit_workflow() {
        let mut store = sample_store();
        let mut ctl = MutationController::new();
        let original = store.get(1).unwrap().clone();

        ctl.begin_edit(&original);
        ctl.update_field("name", "B").unwrap();
        assert_eq!(ctl.commit(&mut store), Ok(1));

        assert_eq!(store.len(), 2);
        assert_eq!(store.position(1), Some(0));
        assert_eq!(
            store.get(1),
            Some(&UserRecord {
                name: "B".into(),
                ..original
            })
        );
    }

    #[test]
    fn test_edit_commit_after_delete_reinserts() {
        let mut store = sample_store();
        let mut ctl = MutationController::new();
        let target = store.get(1).unwrap().clone();

        ctl.begin_edit(&target);
        ctl.update_field("phone", "999").unwrap();
        assert!(ctl.delete(&mut store, 1));
        assert!(ctl.draft().is_some());

        assert_eq!(ctl.commit(&mut store), Ok(1));
        let ids: Vec<_> = store.all().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(store.get(1).unwrap().phone, "999");
    }

    // --- Cancel ---

    #[test]
    fn test_cancel_leaves_store_unchanged() {
        let mut store = sample_store();
        let before = store.clone();
        let mut ctl = MutationController::new();

        ctl.begin_edit(store.get(2).unwrap());
        ctl.update_field("name", "changed").unwrap();
        ctl.cancel();
        assert_eq!(store, before);
        assert!(!ctl.is_open());

        ctl.begin_add();
        ctl.update_field("name", "new").unwrap();
        ctl.cancel();
        assert_eq!(store, before);

        // Nothing open: commit is rejected and the store untouched
        assert_eq!(ctl.commit(&mut store), Err(MutationError::NoDraft));
        assert_eq!(store, before);
    }

    #[test]
    fn test_cancel_does_not_close_view() {
        let store = sample_store();
        let mut ctl = MutationController::new();
        ctl.view(store.get(1).unwrap());
        ctl.cancel();
        assert!(matches!(ctl.selection(), Selection::Viewing(_)));
    }

    // --- Exclusivity ---

    #[test]
    fn test_only_one_selection_open() {
        let mut store = sample_store();
        let before = store.clone();
        let mut ctl = MutationController::new();

        ctl.view(store.get(1).unwrap());
        ctl.begin_edit(store.get(2).unwrap());
        assert!(matches!(ctl.selection(), Selection::Editing { id: 2, .. }));

        ctl.update_field("name", "discarded").unwrap();
        ctl.begin_add();
        assert_eq!(ctl.selection(), &Selection::Adding(Draft::blank()));

        ctl.view(store.get(1).unwrap());
        assert_eq!(ctl.commit(&mut store), Err(MutationError::NoDraft));
        assert!(matches!(ctl.selection(), Selection::Viewing(r) if r.id == 1));
        assert_eq!(store, before);
    }

    // --- View / Delete ---

    #[test]
    fn test_view_and_dismiss() {
        let store = sample_store();
        let mut ctl = MutationController::new();
        ctl.view(store.get(2).unwrap());
        assert!(ctl.is_open());
        assert!(ctl.draft().is_none());
        ctl.dismiss();
        assert_eq!(ctl.selection(), &Selection::None);
    }

    #[test]
    fn test_delete_closes_view_of_deleted_record() {
        let mut store = sample_store();
        let mut ctl = MutationController::new();
        ctl.view(store.get(2).unwrap());
        assert!(ctl.delete(&mut store, 2));
        assert_eq!(ctl.selection(), &Selection::None);
        assert!(store.get(2).is_none());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = sample_store();
        let mut ctl = MutationController::new();
        assert!(ctl.delete(&mut store, 1));
        let before = store.clone();
        assert!(!ctl.delete(&mut store, 1));
        assert_eq!(store, before);
    }
}
