#![allow(dead_code)]

use async_trait::async_trait;
use jotter_core::api::{NotesApi, Registration, UserId};
use jotter_core::error::{ApiError, JotterError, Result as JotterResult};
use jotter_core::note::{Note, NoteDraft, NoteId};
use jotter_core::session::{BearerToken, Session, TokenStore};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use tokio::sync::{Notify, oneshot};

/// One authenticated call as the backend saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub operation: &'static str,
    pub token: String,
}

/// Holds a single list response until the test releases it.
pub struct ListGate {
    /// Fires once the backend has taken its snapshot of the list.
    pub started: oneshot::Receiver<()>,
    pub release: oneshot::Sender<()>,
}

struct PendingGate {
    started: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

// In-memory notes backend
pub struct MockNotesApi {
    users: Mutex<HashMap<String, String>>,
    issued_tokens: Mutex<HashSet<String>>,
    notes: Mutex<Vec<Note>>,
    next_id: Mutex<i64>,
    seen: Mutex<Vec<SeenRequest>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    list_gates: Mutex<VecDeque<PendingGate>>,
    registrations: Mutex<Vec<Registration>>,
}

impl MockNotesApi {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            issued_tokens: Mutex::new(HashSet::new()),
            notes: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            seen: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            list_gates: Mutex::new(VecDeque::new()),
            registrations: Mutex::new(Vec::new()),
        }
    }

    pub fn with_user(self, username: &str, password: &str) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(username.to_string(), password.to_string());
        self
    }

    pub fn with_note(self, id: i64, title: &str, content: &str) -> Self {
        self.insert_note(Note::new(id, title, content));
        self
    }

    /// Adds a note behind the client's back.
    pub fn insert_note(&self, note: Note) {
        if let NoteId::Number(n) = note.id {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id = (*next_id).max(n + 1);
        }
        self.notes.lock().unwrap().push(note);
    }

    pub fn stored_notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    pub fn seen_requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn registrations(&self) -> Vec<Registration> {
        self.registrations.lock().unwrap().clone()
    }

    /// Makes the next call to `operation` fail with `error`.
    pub fn fail_next(&self, operation: &'static str, error: ApiError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    /// Gates the next `list_notes` call.
    pub fn hold_next_list(&self) -> ListGate {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.list_gates.lock().unwrap().push_back(PendingGate {
            started: started_tx,
            release: release_rx,
        });
        ListGate {
            started: started_rx,
            release: release_tx,
        }
    }

    fn take_failure(&self, operation: &'static str) -> Result<(), ApiError> {
        match self.failures.lock().unwrap().remove(operation) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn authorize(&self, operation: &'static str, token: &BearerToken) -> Result<(), ApiError> {
        self.seen.lock().unwrap().push(SeenRequest {
            operation,
            token: token.as_str().to_string(),
        });
        if !self.issued_tokens.lock().unwrap().contains(token.as_str()) {
            return Err(ApiError::from_status(
                401,
                r#"{"detail":"Could not validate user."}"#,
            ));
        }
        self.take_failure(operation)
    }

    fn not_found() -> ApiError {
        ApiError::from_status(404, r#"{"detail":"Note not found"}"#)
    }
}

#[async_trait]
impl NotesApi for MockNotesApi {
    async fn register(&self, registration: &Registration) -> Result<UserId, ApiError> {
        self.take_failure("register")?;
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&registration.username) {
            return Err(ApiError::from_status(
                400,
                r#"{"detail":"Username already registered"}"#,
            ));
        }
        users.insert(registration.username.clone(), registration.password.clone());
        self.registrations.lock().unwrap().push(registration.clone());
        Ok(users.len() as UserId)
    }

    async fn login(&self, username: &str, password: &str) -> Result<BearerToken, ApiError> {
        self.take_failure("login")?;
        let valid = self
            .users
            .lock()
            .unwrap()
            .get(username)
            .is_some_and(|expected| expected == password);
        if !valid {
            return Err(ApiError::from_status(
                401,
                r#"{"detail":"Invalid credentials"}"#,
            ));
        }

        let token = format!("token-{}", username);
        self.issued_tokens.lock().unwrap().insert(token.clone());
        Ok(BearerToken::new(token))
    }

    async fn list_notes(&self, token: &BearerToken) -> Result<Vec<Note>, ApiError> {
        self.authorize("list", token)?;
        let snapshot = self.stored_notes();

        let gate = self.list_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            let _ = gate.started.send(());
            let _ = gate.release.await;
        }

        Ok(snapshot)
    }

    async fn create_note(&self, token: &BearerToken, draft: &NoteDraft) -> Result<(), ApiError> {
        self.authorize("create", token)?;
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            id
        };
        self.notes
            .lock()
            .unwrap()
            .push(Note::new(id, draft.title.clone(), draft.content.clone()));
        Ok(())
    }

    async fn update_note(
        &self,
        token: &BearerToken,
        id: &NoteId,
        draft: &NoteDraft,
    ) -> Result<(), ApiError> {
        self.authorize("update", token)?;
        let mut notes = self.notes.lock().unwrap();
        let note = notes
            .iter_mut()
            .find(|note| &note.id == id)
            .ok_or_else(Self::not_found)?;
        note.title = draft.title.clone();
        note.content = draft.content.clone();
        Ok(())
    }

    async fn delete_note(&self, token: &BearerToken, id: &NoteId) -> Result<(), ApiError> {
        self.authorize("delete", token)?;
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|note| &note.id != id);
        if notes.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

// Token store whose disk is always broken
pub struct FailingTokenStore;

#[async_trait]
impl TokenStore for FailingTokenStore {
    async fn load(&self) -> JotterResult<Option<Session>> {
        Err(JotterError::storage("disk unavailable"))
    }

    async fn save(&self, _session: &Session) -> JotterResult<()> {
        Err(JotterError::storage("disk unavailable"))
    }

    async fn clear(&self) -> JotterResult<()> {
        Err(JotterError::storage("disk unavailable"))
    }
}

/// Token store whose `save` blocks until the test calls `release_save`.
pub struct SlowSaveTokenStore {
    stored: Mutex<Option<Session>>,
    save_started: Notify,
    save_release: Notify,
}

impl SlowSaveTokenStore {
    pub fn new() -> Self {
        Self {
            stored: Mutex::new(None),
            save_started: Notify::new(),
            save_release: Notify::new(),
        }
    }

    pub async fn wait_for_save(&self) {
        self.save_started.notified().await;
    }

    pub fn release_save(&self) {
        self.save_release.notify_one();
    }

    pub fn stored(&self) -> Option<Session> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenStore for SlowSaveTokenStore {
    async fn load(&self) -> JotterResult<Option<Session>> {
        Ok(self.stored())
    }

    async fn save(&self, session: &Session) -> JotterResult<()> {
        self.save_started.notify_one();
        self.save_release.notified().await;
        *self.stored.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> JotterResult<()> {
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}
