//! Event store: durable event table plus live list feed.
//!
//! # Responsibility
//! - Own the SQLite connection backing the event catalog.
//! - Serialize every mutation and publish the resulting full list.
//!
//! # Invariants
//! - Mutations run one at a time, each inside a single transaction.
//! - A snapshot is published only after its transaction committed.
//! - Snapshots are published in commit order.
//! - Storage failures are surfaced, never retried.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::event::{Event, EventDraft, EventId, EventValidationError};
use crate::repo::event_repo::{EventRepository, RepoError, SqliteEventRepository};
use crate::store::subscription::{EventSnapshot, EventSubscription};
use log::{debug, info, log, Level};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;
use tokio::sync::watch;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error surfaced to callers.
#[derive(Debug)]
pub enum StoreError {
    /// Draft breaks a record invariant; nothing was written.
    Invalid(EventValidationError),
    /// Operation targets an id that does not exist.
    NotFound(EventId),
    /// Durable medium failure (I/O, corruption, schema mismatch).
    Storage(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "event not found: {id}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Invalid(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Storage(RepoError::Db(value))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(RepoError::from(value))
    }
}

/// Single-writer event catalog with a live list feed.
///
/// Construct one per process and share it by reference or `Arc`.
pub struct EventStore {
    conn: Mutex<Connection>,
    feed: watch::Sender<EventSnapshot>,
}

impl EventStore {
    /// Opens (or creates) a store backed by a SQLite file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a store backed by a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Wraps an already-migrated connection.
    ///
    /// # Errors
    /// Returns `Storage` when the connection schema is not current or the
    /// persisted rows cannot be read.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        let initial = SqliteEventRepository::try_new(&conn)?.list_events()?;
        info!(
            "event=store_open module=store status=ok event_count={}",
            initial.len()
        );
        let (feed, _) = watch::channel(EventSnapshot::from(initial));
        Ok(Self {
            conn: Mutex::new(conn),
            feed,
        })
    }

    /// Persists a new event and returns it with its assigned id.
    ///
    /// # Errors
    /// - `Invalid` when the draft breaks a record invariant.
    /// - `Storage` on SQLite failure.
    pub fn create(&self, draft: &EventDraft) -> StoreResult<Event> {
        let event = self.mutate("store_create", |repo| repo.insert_event(draft))?;
        debug!(
            "event=store_create module=store status=ok event_id={}",
            event.id
        );
        Ok(event)
    }

    /// Removes one event; absent ids are a no-op.
    pub fn delete_by_id(&self, id: EventId) -> StoreResult<()> {
        let removed = self.mutate("store_delete", |repo| repo.delete_event(id))?;
        debug!(
            "event=store_delete module=store status=ok event_id={} removed={}",
            id, removed
        );
        Ok(())
    }

    /// Removes every event. Ids handed out before are still never reused.
    pub fn delete_all(&self) -> StoreResult<()> {
        let removed = self.mutate("store_delete_all", |repo| repo.delete_all_events())?;
        debug!(
            "event=store_delete_all module=store status=ok removed={}",
            removed
        );
        Ok(())
    }

    /// Sets the participation flag of one event and returns the new record.
    ///
    /// # Errors
    /// - `NotFound` when `id` does not exist.
    /// - `Storage` on SQLite failure.
    pub fn set_participation(&self, id: EventId, participating: bool) -> StoreResult<Event> {
        self.mutate("store_participation", |repo| {
            repo.set_participation(id, participating)
        })
    }

    /// Flips the participation flag of one event and returns the new record.
    ///
    /// Read and write happen in the same mutation, so concurrent toggles
    /// never lose a flip.
    ///
    /// # Errors
    /// - `NotFound` when `id` does not exist.
    /// - `Storage` on SQLite failure.
    pub fn toggle_participation(&self, id: EventId) -> StoreResult<Event> {
        self.mutate("store_participation_toggle", |repo| {
            repo.toggle_participation(id)
        })
    }

    /// One-shot snapshot ordered by `date ASC, id ASC`.
    pub fn get_all(&self) -> StoreResult<Vec<Event>> {
        let conn = self.conn.lock();
        Ok(SqliteEventRepository::new(&conn).list_events()?)
    }

    /// Looks up a single event.
    pub fn get_by_id(&self, id: EventId) -> StoreResult<Option<Event>> {
        let conn = self.conn.lock();
        Ok(SqliteEventRepository::new(&conn).get_event(id)?)
    }

    /// Subscribes to the live list.
    ///
    /// The subscription first yields the current list, then one list per
    /// later commit (superseded lists are skipped for slow readers).
    pub fn subscribe_all(&self) -> EventSubscription {
        EventSubscription::new(self.feed.subscribe())
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.feed.receiver_count()
    }

    fn mutate<T, F>(&self, op: &'static str, apply: F) -> StoreResult<T>
    where
        F: FnOnce(&SqliteEventRepository<'_>) -> Result<T, RepoError>,
    {
        let started_at = Instant::now();
        let mut conn = self.conn.lock();

        let result = (|| -> StoreResult<(T, Vec<Event>)> {
            let tx = conn.transaction()?;
            let outcome = {
                let repo = SqliteEventRepository::new(&tx);
                let value = apply(&repo)?;
                (value, repo.list_events()?)
            };
            tx.commit()?;
            Ok(outcome)
        })();

        match result {
            Ok((value, events)) => {
                let event_count = events.len();
                // Still under the lock, so publish order equals commit order.
                self.feed.send_replace(EventSnapshot::from(events));
                info!(
                    "event={} module=store status=ok duration_ms={} event_count={} subscribers={}",
                    op,
                    started_at.elapsed().as_millis(),
                    event_count,
                    self.feed.receiver_count()
                );
                Ok(value)
            }
            Err(err) => {
                let level = match err {
                    StoreError::Storage(_) => Level::Error,
                    _ => Level::Warn,
                };
                log!(
                    level,
                    "event={} module=store status=error duration_ms={} error_code={} error={}",
                    op,
                    started_at.elapsed().as_millis(),
                    error_code(&err),
                    err
                );
                Err(err)
            }
        }
    }
}

fn error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::Invalid(_) => "invalid_event",
        StoreError::NotFound(_) => "event_not_found",
        StoreError::Storage(_) => "storage_failed",
    }
}
