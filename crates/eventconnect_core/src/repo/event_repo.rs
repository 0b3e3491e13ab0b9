//! Event repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `events` storage.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Write paths must validate the draft before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Lists are always ordered by `date ASC, id ASC`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::geo::Coordinates;
use crate::model::event::{Event, EventDraft, EventId, EventValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    date,
    location,
    description,
    image_uri,
    category,
    latitude,
    longitude,
    is_participating
FROM events";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for event persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EventValidationError),
    Db(DbError),
    NotFound(EventId),
    InvalidData(String),
    /// Connection was not bootstrapped through `db::open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "event not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EventValidationError> for RepoError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for event CRUD operations.
pub trait EventRepository {
    fn insert_event(&self, draft: &EventDraft) -> RepoResult<Event>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    fn list_events(&self) -> RepoResult<Vec<Event>>;
    /// Returns whether a row was removed.
    fn delete_event(&self, id: EventId) -> RepoResult<bool>;
    /// Returns the number of removed rows.
    fn delete_all_events(&self) -> RepoResult<usize>;
    fn set_participation(&self, id: EventId, participating: bool) -> RepoResult<Event>;
    /// Flips the flag in a single statement.
    fn toggle_participation(&self, id: EventId) -> RepoResult<Event>;
}

/// SQLite-backed event repository.
///
/// Borrows a connection (or a transaction, through deref) owned elsewhere.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Wraps a connection without schema checks.
    ///
    /// Callers must pass a connection opened through `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection after verifying it carries the current schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the latest.
    /// - `MissingRequiredTable` when the `events` table does not exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_events_table: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'events'
            );",
            [],
            |row| row.get(0),
        )?;
        if !has_events_table {
            return Err(RepoError::MissingRequiredTable("events"));
        }

        Ok(Self::new(conn))
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn insert_event(&self, draft: &EventDraft) -> RepoResult<Event> {
        draft.validate()?;

        let category = draft.effective_category().to_string();
        let (latitude, longitude) = match draft.coordinates {
            Some(coordinates) => (Some(coordinates.latitude), Some(coordinates.longitude)),
            None => (None, None),
        };

        self.conn.execute(
            "INSERT INTO events (
                title,
                date,
                location,
                description,
                image_uri,
                category,
                latitude,
                longitude,
                is_participating
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0);",
            params![
                draft.title.as_str(),
                draft.date.as_str(),
                draft.location.as_deref(),
                draft.description.as_deref(),
                draft.image_uri.as_deref(),
                category.as_str(),
                latitude,
                longitude,
            ],
        )?;

        Ok(Event {
            id: self.conn.last_insert_rowid(),
            title: draft.title.clone(),
            date: draft.date.clone(),
            location: draft.location.clone(),
            description: draft.description.clone(),
            image_uri: draft.image_uri.clone(),
            category,
            coordinates: draft.coordinates,
            is_participating: false,
        })
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }
        Ok(None)
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{EVENT_SELECT_SQL} ORDER BY date ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn delete_all_events(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM events;", [])?)
    }

    fn set_participation(&self, id: EventId, participating: bool) -> RepoResult<Event> {
        let changed = self.conn.execute(
            "UPDATE events SET is_participating = ?1 WHERE id = ?2;",
            params![bool_to_int(participating), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.get_event(id)?.ok_or(RepoError::NotFound(id))
    }

    fn toggle_participation(&self, id: EventId) -> RepoResult<Event> {
        let changed = self.conn.execute(
            "UPDATE events SET is_participating = 1 - is_participating WHERE id = ?1;",
            [id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.get_event(id)?.ok_or(RepoError::NotFound(id))
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let id: EventId = row.get("id")?;

    let coordinates = match (
        row.get::<_, Option<f64>>("latitude")?,
        row.get::<_, Option<f64>>("longitude")?,
    ) {
        (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
        (None, None) => None,
        _ => {
            return Err(RepoError::InvalidData(format!(
                "event {id} has only one of events.latitude/events.longitude"
            )));
        }
    };

    let is_participating = match row.get::<_, i64>("is_participating")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_participating value `{other}` in events.is_participating"
            )));
        }
    };

    let event = Event {
        id,
        title: row.get("title")?,
        date: row.get("date")?,
        location: row.get("location")?,
        description: row.get("description")?,
        image_uri: row.get("image_uri")?,
        category: row.get("category")?,
        coordinates,
        is_participating,
    };
    event
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("event {id}: {err}")))?;
    Ok(event)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
