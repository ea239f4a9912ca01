use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{NewNote, Note, NotePatch};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("The note with id \"{0}\" was not found.")]
    NotFound(Uuid),

    #[error("The note ids do not match. param=\"{param}\", note.id=\"{body}\"")]
    ConflictingId { param: Uuid, body: Uuid },
}

/// In-memory note collection. Lives for the whole process and is never persisted.
///
/// `order` keeps ids in insertion order so listings are stable between calls.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: HashMap<Uuid, Note>,
    order: Vec<Uuid>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every note, or only those whose title contains `filter`
    /// (case-sensitive substring match).
    pub fn list(&self, filter: Option<&str>) -> Vec<Note> {
        self.order
            .iter()
            .filter_map(|id| self.notes.get(id))
            .filter(|note| filter.is_none_or(|query| note.title.contains(query)))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Result<Note, StoreError> {
        self.notes.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    pub fn create(&mut self, new_note: NewNote) -> Note {
        let id = Uuid::new_v4();
        let note = Note::from_new(id, new_note);

        self.notes.insert(id, note.clone());
        self.order.push(id);

        tracing::debug!("Stored note {id}, {} notes in store", self.notes.len());

        note
    }

    /// Merges `patch` into the note stored under `id`.
    ///
    /// An unknown id is reported before any id mismatch, and a rejected patch
    /// leaves the store untouched.
    pub fn update(&mut self, id: Uuid, patch: NotePatch) -> Result<Note, StoreError> {
        let note = self.notes.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if let Some(body) = patch.id.filter(|body| *body != id) {
            return Err(StoreError::ConflictingId { param: id, body });
        }

        note.apply(patch);

        Ok(note.clone())
    }

    pub fn delete(&mut self, id: Uuid) -> Result<Note, StoreError> {
        let note = self.notes.remove(&id).ok_or(StoreError::NotFound(id))?;
        self.order.retain(|stored| *stored != id);

        tracing::debug!("Removed note {id}, {} notes in store", self.notes.len());

        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{TimeZone, Utc};

    use super::*;

    fn new_note(title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            schedule: None,
        }
    }

    #[test]
    fn create_assigns_unique_ids() {
        let mut store = NoteStore::new();

        let ids: HashSet<Uuid> = (0..100)
            .map(|i| store.create(new_note(&format!("note {i}"))).id)
            .collect();

        assert_eq!(ids.len(), 100);
        assert_eq!(store.list(None).len(), 100);
    }

    #[test]
    fn create_then_get_returns_same_note() {
        let mut store = NoteStore::new();
        let created = store.create(NewNote {
            title: "Dentist".to_string(),
            schedule: Some(Utc.with_ymd_and_hms(2024, 6, 3, 14, 30, 0).unwrap()),
        });

        assert_eq!(store.get(created.id), Ok(created));
    }

    #[test]
    fn list_without_filter_returns_all_in_insertion_order() {
        let mut store = NoteStore::new();
        let first = store.create(new_note("first"));
        let second = store.create(new_note("second"));
        let third = store.create(new_note("third"));

        assert_eq!(store.list(None), vec![first, second, third]);
    }

    #[test]
    fn list_with_filter_matches_case_sensitive_substring() {
        let mut store = NoteStore::new();
        let milk = store.create(new_note("Buy milk"));
        store.create(new_note("Walk the dog"));
        store.create(new_note("MILK again"));
        let oat = store.create(new_note("oat milk latte"));

        assert_eq!(store.list(Some("milk")), vec![milk, oat]);
        assert!(store.list(Some("cheese")).is_empty());
    }

    #[test]
    fn list_on_empty_store_is_empty() {
        let store = NoteStore::new();

        assert!(store.list(None).is_empty());
        assert!(store.list(Some("a")).is_empty());
    }

    #[test]
    fn update_title_keeps_schedule() {
        let mut store = NoteStore::new();
        let schedule = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let created = store.create(NewNote {
            title: "Buy milk".to_string(),
            schedule: Some(schedule),
        });

        let updated = store
            .update(
                created.id,
                NotePatch {
                    title: Some("Buy oat milk".to_string()),
                    ..NotePatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Buy oat milk");
        assert_eq!(updated.schedule, Some(schedule));
        assert_eq!(store.get(created.id), Ok(updated));
    }

    #[test]
    fn update_with_matching_body_id_succeeds() {
        let mut store = NoteStore::new();
        let created = store.create(new_note("Buy milk"));

        let updated = store
            .update(
                created.id,
                NotePatch {
                    id: Some(created.id),
                    title: Some("Buy bread".to_string()),
                    schedule: None,
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Buy bread");
    }

    #[test]
    fn update_with_conflicting_id_leaves_store_unchanged() {
        let mut store = NoteStore::new();
        let created = store.create(new_note("Buy milk"));
        let other = Uuid::new_v4();

        let err = store
            .update(
                created.id,
                NotePatch {
                    id: Some(other),
                    title: Some("Hijacked".to_string()),
                    schedule: None,
                },
            )
            .unwrap_err();

        assert_eq!(
            err,
            StoreError::ConflictingId {
                param: created.id,
                body: other
            }
        );
        assert_eq!(store.get(created.id), Ok(created));
        assert_eq!(store.list(None).len(), 1);
    }

    #[test]
    fn update_unknown_id_is_not_found_even_with_conflicting_body() {
        let mut store = NoteStore::new();
        let missing = Uuid::new_v4();

        let err = store
            .update(
                missing,
                NotePatch {
                    id: Some(Uuid::new_v4()),
                    ..NotePatch::default()
                },
            )
            .unwrap_err();

        assert_eq!(err, StoreError::NotFound(missing));
    }

    #[test]
    fn update_schedule_keeps_title() {
        let mut store = NoteStore::new();
        let created = store.create(new_note("Dentist"));
        let schedule = Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap();

        let updated = store
            .update(
                created.id,
                NotePatch {
                    schedule: Some(schedule),
                    ..NotePatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Dentist");
        assert_eq!(updated.schedule, Some(schedule));
        assert_eq!(store.get(created.id), Ok(updated));
    }

    #[test]
    fn delete_returns_final_state_and_removes() {
        let mut store = NoteStore::new();
        let keep = store.create(new_note("keep"));
        let created = store.create(new_note("Buy milk"));
        let updated = store
            .update(
                created.id,
                NotePatch {
                    title: Some("Buy oat milk".to_string()),
                    ..NotePatch::default()
                },
            )
            .unwrap();

        assert_eq!(store.delete(created.id), Ok(updated));
        assert_eq!(store.get(created.id), Err(StoreError::NotFound(created.id)));
        assert_eq!(store.list(None), vec![keep]);
    }

    #[test]
    fn operations_on_deleted_id_are_not_found() {
        let mut store = NoteStore::new();
        let created = store.create(new_note("temporary"));
        store.delete(created.id).unwrap();

        let not_found = Err(StoreError::NotFound(created.id));
        assert_eq!(store.get(created.id), not_found);
        assert_eq!(store.update(created.id, NotePatch::default()), not_found);
        assert_eq!(store.delete(created.id), not_found);
    }

    #[test]
    fn error_messages_name_the_ids() {
        let param = Uuid::nil();
        let body = Uuid::new_v4();

        assert_eq!(
            StoreError::NotFound(param).to_string(),
            format!("The note with id \"{param}\" was not found.")
        );
        assert_eq!(
            StoreError::ConflictingId { param, body }.to_string(),
            format!("The note ids do not match. param=\"{param}\", note.id=\"{body}\"")
        );
    }
}
