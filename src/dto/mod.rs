use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{NewNote, Note, NotePatch},
};

const TITLE_MIN_LEN: usize = 1;
const TITLE_MAX_LEN: usize = 200;
const QUERY_MIN_LEN: usize = 1;
const QUERY_MAX_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: Uuid,
    /// Note title
    pub title: String,
    /// Scheduled date, ISO 8601 in UTC
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = DateTime, example = "2024-05-01T09:30:00.000Z")]
    pub schedule: Option<String>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            schedule: note.schedule.map(format_schedule),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateNoteRequest {
    /// Note title, 1 to 200 characters
    pub title: String,
    /// Scheduled date, ISO 8601
    #[serde(default, deserialize_with = "non_null")]
    #[schema(format = DateTime)]
    pub schedule: Option<String>,
}

impl CreateNoteRequest {
    pub fn validate(self) -> Result<NewNote, ApiError> {
        Ok(NewNote {
            title: validate_title(self.title)?,
            schedule: self.schedule.as_deref().map(parse_schedule).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateNoteRequest {
    /// Note ID, must match the ID in the path when present
    #[serde(default, deserialize_with = "non_null")]
    pub id: Option<Uuid>,
    /// Note title, 1 to 200 characters
    #[serde(default, deserialize_with = "non_null")]
    pub title: Option<String>,
    /// Scheduled date, ISO 8601
    #[serde(default, deserialize_with = "non_null")]
    #[schema(format = DateTime)]
    pub schedule: Option<String>,
}

impl UpdateNoteRequest {
    pub fn validate(self) -> Result<NotePatch, ApiError> {
        Ok(NotePatch {
            id: self.id,
            title: self.title.map(validate_title).transpose()?,
            schedule: self.schedule.as_deref().map(parse_schedule).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct ListNotesQuery {
    /// The search string to use. Notes whose titles contain it are returned.
    #[param(min_length = 1, max_length = 10)]
    pub query: Option<String>,
}

impl ListNotesQuery {
    pub fn validate(self) -> Result<Option<String>, ApiError> {
        self.query
            .map(|query| {
                let len = text_len(&query);
                if (QUERY_MIN_LEN..=QUERY_MAX_LEN).contains(&len) {
                    Ok(query)
                } else {
                    Err(ApiError::Validation(format!(
                        "\"query\" length must be between {QUERY_MIN_LEN} and {QUERY_MAX_LEN} characters"
                    )))
                }
            })
            .transpose()
    }
}

/// Optional field that may be omitted but never sent as `null`.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Length as UTF-16 code units, the unit browsers and JSON clients count in.
fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn parse_note_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .map_err(|_| ApiError::Validation(format!("\"id\" must be a valid GUID, got \"{raw}\"")))
}

fn validate_title(title: String) -> Result<String, ApiError> {
    let len = text_len(&title);
    if (TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
        Ok(title)
    } else {
        Err(ApiError::Validation(format!(
            "\"title\" length must be between {TITLE_MIN_LEN} and {TITLE_MAX_LEN} characters"
        )))
    }
}

/// Accepts RFC 3339 timestamps, timestamps with a basic `+hhmm` offset,
/// timestamps without an offset (read as UTC), bare dates and year-months
/// (midnight UTC on the first day).
pub fn parse_schedule(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date_time.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(date_time) = DateTime::parse_from_str(raw, format) {
            return Ok(date_time.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    let date = match raw.len() {
        10 => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
        7 => NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok(),
        _ => None,
    };

    date.and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            ApiError::Validation(format!("\"schedule\" must be in ISO 8601 date format, got \"{raw}\""))
        })
}

pub fn format_schedule(schedule: DateTime<Utc>) -> String {
    schedule.to_rfc3339_opts(SecondsFormat::Millis, true)
}
