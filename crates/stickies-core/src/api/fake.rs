//! In-memory `NotesApi` for store tests.
//!
//! Behaves like the real server for paging and label filtering, records every
//! call, and can inject failures and per-query latency.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{TimeZone, Utc};

use super::{ListQuery, NotePage, NotesApi};
use crate::error::{Error, Result};
use crate::models::{Color, NewNote, Note, NoteId, NoteUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(ListQuery),
    Get(NoteId),
    Create(NewNote),
    Update(NoteId, NoteUpdate),
    Delete(NoteId),
    Labels,
}

#[derive(Debug, Clone, Copy)]
pub enum FakeFailure {
    Server(u16),
    NotFound,
}

#[derive(Debug, Default)]
struct FakeState {
    notes: Vec<Note>,
    page_size: usize,
    next_id: u64,
    calls: Vec<Call>,
    failures: VecDeque<FakeFailure>,
    list_delays: HashMap<(Option<String>, u32), Duration>,
    call_delay: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct FakeNotesApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeNotesApi {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                page_size: page_size.max(1),
                next_id: 1,
                ..FakeState::default()
            })),
        }
    }

    /// Seed a note directly, as if another client had created it.
    pub fn seed(&self, title: &str, labels: &[&str]) -> NoteId {
        let mut state = self.lock();
        let id = NoteId::from(state.next_id.to_string().as_str());
        state.next_id += 1;
        let created_at = Utc
            .timestamp_opt(1_700_000_000 + i64::try_from(state.notes.len()).unwrap_or(0), 0)
            .single()
            .unwrap_or_else(Utc::now);
        state.notes.push(Note {
            id: id.clone(),
            title: title.to_string(),
            description: format!("{title} details"),
            labels: labels.iter().map(ToString::to_string).collect(),
            color: Color::Yellow,
            created_at,
            completed_at: None,
        });
        id
    }

    pub fn note(&self, id: &NoteId) -> Option<Note> {
        self.lock().notes.iter().find(|note| &note.id == id).cloned()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List(query) => Some(query),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Fail the next call (of any kind) with the given failure.
    pub fn fail_next(&self, failure: FakeFailure) {
        self.lock().failures.push_back(failure);
    }

    /// Delay list responses for one filter/page combination.
    pub fn delay_list(&self, label: Option<&str>, page: u32, delay: Duration) {
        self.lock()
            .list_delays
            .insert((label.map(ToString::to_string), page), delay);
    }

    /// Delay every call by the same amount.
    pub fn delay_all(&self, delay: Duration) {
        self.lock().call_delay = Some(delay);
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn begin(&self, call: Call) -> Result<()> {
        let delay = {
            let mut state = self.lock();
            let delay = match &call {
                Call::List(query) => state
                    .list_delays
                    .get(&(query.label.clone(), query.page))
                    .copied()
                    .or(state.call_delay),
                _ => state.call_delay,
            };
            state.calls.push(call);
            delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.lock().failures.pop_front() {
            Some(FakeFailure::Server(status)) => Err(Error::Server {
                status,
                message: "injected failure".to_string(),
            }),
            Some(FakeFailure::NotFound) => Err(Error::NotFound("injected".to_string())),
            None => Ok(()),
        }
    }
}

impl NotesApi for FakeNotesApi {
    async fn list_notes(&self, query: &ListQuery) -> Result<NotePage> {
        self.begin(Call::List(query.clone())).await?;
        let state = self.lock();
        let matching = state
            .notes
            .iter()
            .filter(|note| {
                query
                    .label
                    .as_ref()
                    .map_or(true, |label| note.labels.contains(label))
            })
            .cloned()
            .collect::<Vec<_>>();

        let total_pages = matching.len().div_ceil(state.page_size).max(1);
        let start = (query.page.max(1) as usize - 1) * state.page_size;
        let items = matching
            .into_iter()
            .skip(start)
            .take(state.page_size)
            .collect();

        Ok(NotePage {
            items,
            page: query.page,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        })
    }

    async fn get_note(&self, id: &NoteId) -> Result<Note> {
        self.begin(Call::Get(id.clone())).await?;
        self.note(id).ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note> {
        self.begin(Call::Create(note.clone())).await?;
        let mut state = self.lock();
        let id = NoteId::from(state.next_id.to_string().as_str());
        state.next_id += 1;
        let created = Note {
            id,
            title: note.title.clone(),
            description: note.description.clone(),
            labels: note.labels.clone(),
            color: note.color,
            created_at: Utc::now(),
            completed_at: None,
        };
        state.notes.push(created.clone());
        Ok(created)
    }

    async fn update_note(&self, id: &NoteId, update: &NoteUpdate) -> Result<Note> {
        self.begin(Call::Update(id.clone(), update.clone())).await?;
        let mut state = self.lock();
        let note = state
            .notes
            .iter_mut()
            .find(|note| &note.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        if let Some(title) = &update.title {
            note.title.clone_from(title);
        }
        if let Some(description) = &update.description {
            note.description.clone_from(description);
        }
        if let Some(labels) = &update.labels {
            note.labels.clone_from(labels);
        }
        if let Some(color) = update.color {
            note.color = color;
        }
        if let Some(completed_at) = update.completed_at {
            note.completed_at = completed_at;
        }
        Ok(note.clone())
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        self.begin(Call::Delete(id.clone())).await?;
        let mut state = self.lock();
        let before = state.notes.len();
        state.notes.retain(|note| &note.id != id);
        if state.notes.len() == before {
            return Err(Error::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list_labels(&self) -> Result<Vec<String>> {
        self.begin(Call::Labels).await?;
        let labels = self
            .lock()
            .notes
            .iter()
            .flat_map(|note| note.labels.iter().cloned())
            .collect::<BTreeSet<_>>();
        Ok(labels.into_iter().collect())
    }
}
