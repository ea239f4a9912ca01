use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub schedule: Option<DateTime<Utc>>,
}

/// Validated input for note creation. The id is always server generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub schedule: Option<DateTime<Utc>>,
}

/// Validated partial update. `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub schedule: Option<DateTime<Utc>>,
}

impl Note {
    pub fn from_new(id: Uuid, new_note: NewNote) -> Self {
        Self {
            id,
            title: new_note.title,
            schedule: new_note.schedule,
        }
    }

    /// Overwrites every field present in `patch`. The id is never touched.
    pub fn apply(&mut self, patch: NotePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(schedule) = patch.schedule {
            self.schedule = Some(schedule);
        }
    }
}
