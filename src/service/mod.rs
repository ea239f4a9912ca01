use crate::{
    dto::NoteResponse,
    models::{NewNote, NotePatch},
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

use uuid::Uuid;

/// Shared entry point for the handlers. Every operation holds the store lock
/// for its whole check-then-mutate sequence.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<tokio::sync::Mutex<NoteStore>>,
}

impl NoteService {
    pub const fn new(store: Arc<tokio::sync::Mutex<NoteStore>>) -> Self {
        Self { store }
    }

    pub async fn create_note(&self, new_note: NewNote) -> NoteResponse {
        let note = self.store.lock().await.create(new_note);
        tracing::info!("Created note {}", note.id);

        note.into()
    }

    pub async fn update_note(&self, id: Uuid, patch: NotePatch) -> Result<NoteResponse, StoreError> {
        let note = self.store.lock().await.update(id, patch)?;
        tracing::info!("Updated note {}", note.id);

        Ok(note.into())
    }

    pub async fn delete_note(&self, id: Uuid) -> Result<NoteResponse, StoreError> {
        let note = self.store.lock().await.delete(id)?;
        tracing::info!("Deleted note {}", note.id);

        Ok(note.into())
    }

    pub async fn get_one_note(&self, id: Uuid) -> Result<NoteResponse, StoreError> {
        self.store.lock().await.get(id).map(NoteResponse::from)
    }

    pub async fn get_all_notes(&self, query: Option<&str>) -> Vec<NoteResponse> {
        self.store
            .lock()
            .await
            .list(query)
            .into_iter()
            .map(NoteResponse::from)
            .collect()
    }
}
