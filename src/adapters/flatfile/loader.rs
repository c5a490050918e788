//! Cross-entity loader.
//!
//! Reads every flat file in dependency order and resolves foreign keys:
//!
//! 1. rooms
//! 2. movies
//! 3. sessions (room and movie must exist; duration comes from the movie)
//! 4. clients
//! 5. tickets (client and session must exist; at most `capacity` per session)
//!
//! Records that fail to decode, repeat an id, reference a missing entity or
//! overflow their session are skipped with a warning. A file that exists but
//! cannot be read aborts the load.
//!
//! Tickets are authoritative. After loading, every session's seat counter is
//! rewritten as `capacity - tickets sold` and every client's loyalty ledger is
//! replayed from the tickets in file order.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::hash::Hash;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::codec::{
    decode_client, decode_movie, decode_room, decode_session, decode_ticket, RecordError,
    SessionRecord, StoredEntity,
};
use super::store::FlatFileStore;
use crate::domain::client::Client;
use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::loyalty::LoyaltyRules;
use crate::domain::movie::Movie;
use crate::domain::room::Room;
use crate::domain::session::Session;
use crate::domain::ticket::Ticket;

/// Every store of the box office, loaded and cross-linked.
#[derive(Clone)]
pub struct Catalog {
    pub movies: Arc<FlatFileStore<Movie>>,
    pub rooms: Arc<FlatFileStore<Room>>,
    pub sessions: Arc<FlatFileStore<Session>>,
    pub clients: Arc<FlatFileStore<Client>>,
    pub tickets: Arc<FlatFileStore<Ticket>>,
}

/// Per-file outcome of a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Summary of what a load found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rooms: FileReport,
    pub movies: FileReport,
    pub sessions: FileReport,
    pub clients: FileReport,
    pub tickets: FileReport,
    /// Sessions whose persisted seat counter disagreed with their tickets.
    pub corrected_sessions: usize,
}

impl LoadReport {
    pub fn skipped_total(&self) -> usize {
        self.rooms.skipped
            + self.movies.skipped
            + self.sessions.skipped
            + self.clients.skipped
            + self.tickets.skipped
    }
}

/// Builds a [`Catalog`] from a data directory.
pub struct CatalogLoader {
    data_dir: PathBuf,
    rules: LoyaltyRules,
}

impl CatalogLoader {
    pub fn new(data_dir: impl Into<PathBuf>, rules: LoyaltyRules) -> Self {
        Self {
            data_dir: data_dir.into(),
            rules,
        }
    }

    /// Loads every store.
    ///
    /// The data directory and any missing file are created empty. Sessions
    /// whose seat counter had to be corrected are written back.
    ///
    /// # Errors
    ///
    /// - `PersistenceFailure` if the directory cannot be created, a file
    ///   cannot be read, or a missing file or corrected session cannot be
    ///   written
    pub async fn load(&self) -> Result<(Catalog, LoadReport), DomainError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| {
                DomainError::persistence(
                    self.data_dir.display().to_string(),
                    format!(
                        "Failed to create data directory {}: {}",
                        self.data_dir.display(),
                        e
                    ),
                )
            })?;

        let mut report = LoadReport::default();
        let mut missing: Vec<&'static str> = Vec::new();

        // Rooms and movies have no dependencies.
        let rooms_lines = self.read_lines::<Room>(&mut missing).await?;
        let rooms = decode_all(
            Room::FILE_NAME,
            &rooms_lines,
            decode_room,
            Room::id,
            &mut report.rooms,
        );

        let movies_lines = self.read_lines::<Movie>(&mut missing).await?;
        let movies = decode_all(
            Movie::FILE_NAME,
            &movies_lines,
            decode_movie,
            Movie::id,
            &mut report.movies,
        );

        let capacity: HashMap<_, _> = rooms.iter().map(|r| (r.id(), r.total_seats())).collect();
        let durations: HashMap<_, _> = movies
            .iter()
            .map(|m| (m.id(), m.duration_minutes()))
            .collect();

        // Sessions resolve their room and movie.
        let session_lines = self.read_lines::<Session>(&mut missing).await?;
        let mut session_report = FileReport::default();
        let mut sessions = Vec::new();
        let records = decode_all(
            Session::FILE_NAME,
            &session_lines,
            decode_session,
            |r: &SessionRecord| r.id,
            &mut session_report,
        );
        for record in records {
            if !capacity.contains_key(&record.room_id) {
                tracing::warn!(
                    file = Session::FILE_NAME,
                    session_id = %record.id,
                    room_id = %record.room_id,
                    "Skipping session for unknown room"
                );
                session_report.skip();
                continue;
            }
            let Some(duration) = durations.get(&record.movie_id).copied() else {
                tracing::warn!(
                    file = Session::FILE_NAME,
                    session_id = %record.id,
                    movie_id = %record.movie_id,
                    "Skipping session for unknown movie"
                );
                session_report.skip();
                continue;
            };
            sessions.push(record.into_session(duration));
        }
        report.sessions = session_report;

        let client_lines = self.read_lines::<Client>(&mut missing).await?;
        let mut clients = decode_all(
            Client::FILE_NAME,
            &client_lines,
            decode_client,
            Client::id,
            &mut report.clients,
        );

        // Tickets resolve their client and session and may not overflow it.
        let ticket_lines = self.read_lines::<Ticket>(&mut missing).await?;
        let mut ticket_report = FileReport::default();
        let session_capacity: HashMap<SessionId, u32> = sessions
            .iter()
            .filter_map(|s| capacity.get(&s.room_id()).map(|c| (s.id(), *c)))
            .collect();
        let client_ids: HashSet<_> = clients.iter().map(|c| c.id()).collect();
        let mut sold: HashMap<SessionId, u32> = HashMap::new();
        let mut tickets = Vec::new();
        let decoded = decode_all(
            Ticket::FILE_NAME,
            &ticket_lines,
            decode_ticket,
            Ticket::id,
            &mut ticket_report,
        );
        for ticket in decoded {
            if !client_ids.contains(&ticket.client_id()) {
                tracing::warn!(
                    file = Ticket::FILE_NAME,
                    ticket_id = %ticket.id(),
                    client_id = %ticket.client_id(),
                    "Skipping ticket for unknown client"
                );
                ticket_report.skip();
                continue;
            }
            let Some(limit) = session_capacity.get(&ticket.session_id()).copied() else {
                tracing::warn!(
                    file = Ticket::FILE_NAME,
                    ticket_id = %ticket.id(),
                    session_id = %ticket.session_id(),
                    "Skipping ticket for unknown session"
                );
                ticket_report.skip();
                continue;
            };
            let count = sold.entry(ticket.session_id()).or_insert(0);
            if *count >= limit {
                tracing::warn!(
                    file = Ticket::FILE_NAME,
                    ticket_id = %ticket.id(),
                    session_id = %ticket.session_id(),
                    capacity = limit,
                    "Skipping ticket beyond session capacity"
                );
                ticket_report.skip();
                continue;
            }
            *count += 1;
            tickets.push(ticket);
        }
        report.tickets = ticket_report;

        for session in &mut sessions {
            let room_capacity = capacity.get(&session.room_id()).copied().unwrap_or(0);
            let sold_seats = sold.get(&session.id()).copied().unwrap_or(0);
            if let Some(stored) = session.reconcile_seats(room_capacity, sold_seats) {
                tracing::warn!(
                    session_id = %session.id(),
                    stored,
                    derived = session.available_seats(),
                    "Correcting session seat counter from sold tickets"
                );
                report.corrected_sessions += 1;
            }
        }

        let mut by_client: HashMap<_, usize> = HashMap::new();
        for (index, client) in clients.iter().enumerate() {
            by_client.insert(client.id(), index);
        }
        for ticket in &tickets {
            if let Some(index) = by_client.get(&ticket.client_id()) {
                self.rules.credit(&mut clients[*index], ticket.id());
            }
        }

        let catalog = Catalog {
            rooms: Arc::new(FlatFileStore::with_records(&self.data_dir, rooms)),
            movies: Arc::new(FlatFileStore::with_records(&self.data_dir, movies)),
            sessions: Arc::new(FlatFileStore::with_records(&self.data_dir, sessions)),
            clients: Arc::new(FlatFileStore::with_records(&self.data_dir, clients)),
            tickets: Arc::new(FlatFileStore::with_records(&self.data_dir, tickets)),
        };

        if report.corrected_sessions > 0 || missing.contains(&Session::FILE_NAME) {
            catalog.sessions.persist_all().await?;
        }
        for file in &missing {
            match *file {
                f if f == Room::FILE_NAME => catalog.rooms.persist_all().await?,
                f if f == Movie::FILE_NAME => catalog.movies.persist_all().await?,
                f if f == Client::FILE_NAME => catalog.clients.persist_all().await?,
                f if f == Ticket::FILE_NAME => catalog.tickets.persist_all().await?,
                _ => {}
            }
        }

        tracing::info!(
            data_dir = %self.data_dir.display(),
            rooms = report.rooms.loaded,
            movies = report.movies.loaded,
            sessions = report.sessions.loaded,
            clients = report.clients.loaded,
            tickets = report.tickets.loaded,
            skipped = report.skipped_total(),
            corrected_sessions = report.corrected_sessions,
            "Catalog loaded"
        );

        Ok((catalog, report))
    }

    /// Reads the non-blank lines of `E`'s file, numbered from 1.
    ///
    /// A missing file yields no lines and is recorded in `missing`.
    async fn read_lines<E: StoredEntity>(
        &self,
        missing: &mut Vec<&'static str>,
    ) -> Result<Vec<(usize, String)>, DomainError> {
        let path = self.data_dir.join(E::FILE_NAME);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(numbered_lines(&content)),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                tracing::info!(file = %path.display(), "Data file missing, starting empty");
                missing.push(E::FILE_NAME);
                Ok(Vec::new())
            }
            Err(e) => Err(read_failure(&path, E::FILE_NAME, e)),
        }
    }
}

fn read_failure(path: &Path, file: &str, e: std::io::Error) -> DomainError {
    tracing::error!(file = %path.display(), error = %e, "Failed to read data file");
    DomainError::persistence(file, format!("Failed to read {}: {}", path.display(), e))
}

fn numbered_lines(content: &str) -> Vec<(usize, String)> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end_matches('\r').to_string()))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect()
}

impl FileReport {
    fn skip(&mut self) {
        self.loaded -= 1;
        self.skipped += 1;
    }
}

/// Decodes every line of a file, skipping malformed lines and repeated ids.
///
/// `loaded` counts the records returned; callers that reject a returned
/// record afterwards move it to `skipped`.
fn decode_all<T, K>(
    file: &'static str,
    lines: &[(usize, String)],
    decode: fn(&str) -> Result<T, RecordError>,
    key: fn(&T) -> K,
    report: &mut FileReport,
) -> Vec<T>
where
    K: Eq + Hash + Display,
{
    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for (number, line) in lines {
        match decode(line) {
            Ok(record) => {
                let id = key(&record);
                if seen.contains(&id) {
                    tracing::warn!(
                        file,
                        line = *number,
                        id = %id,
                        "Skipping record with duplicate id"
                    );
                    report.skipped += 1;
                    continue;
                }
                seen.insert(id);
                records.push(record);
            }
            Err(e) => {
                tracing::warn!(
                    file,
                    line = *number,
                    error = %e,
                    "Skipping malformed record"
                );
                report.skipped += 1;
            }
        }
    }
    report.loaded = records.len();
    records
}
