use std::sync::Arc;

use dashmap::DashMap;
use recommend::{BookRecord, ParsedOutcome, ReadingList, Recommender};
use uuid::Uuid;

use crate::error::AppError;

pub type SharedState = Arc<AppState>;

#[derive(Debug, Default)]
pub struct Session {
    pub books: ReadingList,
    pub latest: Option<ParsedOutcome>,
    in_flight: bool,
}

pub struct AppState {
    pub recommender: Recommender,
    sessions: DashMap<Uuid, Session>,
}

impl AppState {
    pub fn new(recommender: Recommender) -> SharedState {
        Arc::new(Self {
            recommender,
            sessions: DashMap::new(),
        })
    }

    /// Open a session whose reading list starts with the example books.
    pub fn create_session(&self) -> (Uuid, ReadingList) {
        let id = Uuid::new_v4();
        let books = ReadingList::seeded();
        self.sessions.insert(
            id,
            Session {
                books: books.clone(),
                ..Session::default()
            },
        );
        (id, books)
    }

    /// Drop a session with its reading list and latest result.
    ///
    /// A recommendation still running for it finishes without writing back.
    pub fn remove_session(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::SessionNotFound(id))
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn books(&self, id: Uuid) -> Result<ReadingList, AppError> {
        self.sessions
            .get(&id)
            .map(|session| session.books.clone())
            .ok_or(AppError::SessionNotFound(id))
    }

    pub fn add_book(&self, id: Uuid, title: &str, author: &str) -> Result<BookRecord, AppError> {
        let mut session = self.sessions.get_mut(&id).ok_or(AppError::SessionNotFound(id))?;
        Ok(session.books.add(title, author).clone())
    }

    pub fn latest(&self, id: Uuid) -> Result<Option<ParsedOutcome>, AppError> {
        self.sessions
            .get(&id)
            .map(|session| session.latest.clone())
            .ok_or(AppError::SessionNotFound(id))
    }

    /// Mark a recommendation as running and snapshot the books to send.
    ///
    /// Only one request per session may be outstanding. The returned guard
    /// clears the flag when dropped, including when the handler future is
    /// cancelled mid-call.
    pub fn begin_recommendation(&self, id: Uuid) -> Result<InFlight<'_>, AppError> {
        let mut session = self.sessions.get_mut(&id).ok_or(AppError::SessionNotFound(id))?;
        if session.in_flight {
            return Err(AppError::RecommendationInFlight(id));
        }
        session.in_flight = true;

        Ok(InFlight {
            state: self,
            id,
            books: session.books.books().to_vec(),
        })
    }
}

pub struct InFlight<'a> {
    state: &'a AppState,
    id: Uuid,
    books: Vec<BookRecord>,
}

impl InFlight<'_> {
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    /// Replace the session's latest result. `None` clears it.
    pub fn finish(self, outcome: Option<ParsedOutcome>) {
        if let Some(mut session) = self.state.sessions.get_mut(&self.id) {
            session.latest = outcome;
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(mut session) = self.state.sessions.get_mut(&self.id) {
            session.in_flight = false;
        }
    }
}
