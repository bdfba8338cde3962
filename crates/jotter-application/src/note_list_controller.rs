use crate::session_manager::SessionManager;
use jotter_core::api::NotesApi;
use jotter_core::error::{ApiError, DeleteError, FetchError, SaveError};
use jotter_core::note::{EditContext, Note, NoteDraft, NoteId, SubmitAction, filter_notes};
use jotter_core::session::Credentials;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
struct NoteListState {
    notes: Vec<Note>,
    edit: EditContext,
    query: String,
    /// Ticket of the fetch whose result is currently cached.
    applied_ticket: u64,
}

/// Owns the cached note list, the note form and the search query.
///
/// The cache is only ever replaced wholesale by [`fetch_all`](Self::fetch_all),
/// which every successful mutation triggers. Failures are logged with the
/// backend payload and returned; local state is left as it was.
///
/// Fetch results are applied only if they are the newest fetch issued so far
/// and the session has not changed since the request went out.
pub struct NoteListController {
    api: Arc<dyn NotesApi>,
    session: Arc<SessionManager>,
    state: RwLock<NoteListState>,
    next_ticket: AtomicU64,
}

impl NoteListController {
    pub fn new(api: Arc<dyn NotesApi>, session: Arc<SessionManager>) -> Self {
        Self {
            api,
            session,
            state: RwLock::new(NoteListState::default()),
            next_ticket: AtomicU64::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Backend operations
    // ------------------------------------------------------------------

    /// Replaces the cache with the backend's current list.
    ///
    /// Returns the list received, even when it arrived too late to be cached.
    pub async fn fetch_all(&self) -> Result<Vec<Note>, FetchError> {
        let credentials = self
            .credentials("fetching notes")
            .await
            .map_err(FetchError)?;
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        let notes = match self.api.list_notes(&credentials.token).await {
            Ok(notes) => notes,
            Err(e) => {
                log_failure("fetching notes", &e);
                return Err(FetchError(e));
            }
        };

        // Lock order: note state, then session.
        let mut state = self.state.write().await;
        let current_epoch = self.session.epoch().await;

        if credentials.epoch != current_epoch {
            tracing::debug!("[Notes] Discarding fetch #{}: session changed while in flight", ticket);
        } else if ticket <= state.applied_ticket {
            tracing::debug!(
                "[Notes] Discarding fetch #{}: fetch #{} is newer",
                ticket,
                state.applied_ticket
            );
        } else {
            tracing::debug!("[Notes] Applying fetch #{} ({} notes)", ticket, notes.len());
            state.notes = notes.clone();
            state.applied_ticket = ticket;
        }

        Ok(notes)
    }

    /// Creates a note, then clears the draft and refetches.
    pub async fn create(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), SaveError> {
        let draft = NoteDraft::new(title, content);
        let credentials = self.credentials("saving note").await.map_err(SaveError)?;

        if let Err(e) = self.api.create_note(&credentials.token, &draft).await {
            log_failure("saving note", &e);
            return Err(SaveError(e));
        }

        tracing::info!("[Notes] Created note {:?}", draft.title);
        self.state.write().await.edit.clear_draft();
        self.refresh().await;
        Ok(())
    }

    /// Replaces the note at `id`, then leaves edit mode, clears the draft and
    /// refetches.
    pub async fn update(
        &self,
        id: &NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), SaveError> {
        let draft = NoteDraft::new(title, content);
        let credentials = self.credentials("saving note").await.map_err(SaveError)?;

        if let Err(e) = self.api.update_note(&credentials.token, id, &draft).await {
            log_failure("saving note", &e);
            return Err(SaveError(e));
        }

        tracing::info!("[Notes] Updated note {}", id);
        self.state.write().await.edit.reset();
        self.refresh().await;
        Ok(())
    }

    /// Deletes the note at `id`, then refetches.
    ///
    /// If that note was being edited, edit mode ends as well.
    pub async fn delete(&self, id: &NoteId) -> Result<(), DeleteError> {
        let credentials = self.credentials("deleting note").await.map_err(DeleteError)?;

        if let Err(e) = self.api.delete_note(&credentials.token, id).await {
            log_failure("deleting note", &e);
            return Err(DeleteError(e));
        }

        tracing::info!("[Notes] Deleted note {}", id);
        {
            let mut state = self.state.write().await;
            if state.edit.active_note_id() == Some(id) {
                state.edit.reset();
            }
        }
        self.refresh().await;
        Ok(())
    }

    /// Submits the note form: update when a note is being edited, create
    /// otherwise.
    pub async fn submit(&self) -> Result<(), SaveError> {
        let action = self.state.read().await.edit.submit_action();
        match action {
            SubmitAction::Update(id, draft) => self.update(&id, draft.title, draft.content).await,
            SubmitAction::Create(draft) => self.create(draft.title, draft.content).await,
        }
    }

    // ------------------------------------------------------------------
    // Local state
    // ------------------------------------------------------------------

    /// Loads `note` into the draft and enters edit mode for it. No backend call.
    pub async fn begin_edit(&self, note: &Note) {
        self.state.write().await.edit.begin_edit(note);
    }

    pub async fn cancel_edit(&self) {
        self.state.write().await.edit.reset();
    }

    pub async fn set_draft(&self, title: impl Into<String>, content: impl Into<String>) {
        self.state
            .write()
            .await
            .edit
            .set_draft(NoteDraft::new(title, content));
    }

    pub async fn set_draft_title(&self, title: impl Into<String>) {
        self.state.write().await.edit.set_title(title);
    }

    pub async fn set_draft_content(&self, content: impl Into<String>) {
        self.state.write().await.edit.set_content(content);
    }

    pub async fn draft(&self) -> NoteDraft {
        self.state.read().await.edit.draft().clone()
    }

    pub async fn edit_context(&self) -> EditContext {
        self.state.read().await.edit.clone()
    }

    pub async fn active_note_id(&self) -> Option<NoteId> {
        self.state.read().await.edit.active_note_id().cloned()
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.state.write().await.query = query.into();
    }

    pub async fn query(&self) -> String {
        self.state.read().await.query.clone()
    }

    /// Snapshot of the whole cache, in backend order.
    pub async fn notes(&self) -> Vec<Note> {
        self.state.read().await.notes.clone()
    }

    /// Cached notes matching `query`, case-insensitively.
    pub async fn filter(&self, query: &str) -> Vec<Note> {
        let state = self.state.read().await;
        filter_notes(&state.notes, query).cloned().collect()
    }

    /// Cached notes matching the current search query.
    pub async fn visible_notes(&self) -> Vec<Note> {
        let state = self.state.read().await;
        filter_notes(&state.notes, &state.query).cloned().collect()
    }

    /// Looks a note up in the cache.
    pub async fn find(&self, id: &NoteId) -> Option<Note> {
        self.state
            .read()
            .await
            .notes
            .iter()
            .find(|note| &note.id == id)
            .cloned()
    }

    /// Discards the cache, the form and the query.
    ///
    /// The fetch ticket counter is kept, so fetches issued before the clear
    /// still count as older than any fetch issued after it.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        let applied_ticket = state.applied_ticket;
        *state = NoteListState {
            applied_ticket,
            ..NoteListState::default()
        };
    }

    async fn credentials(&self, action: &str) -> Result<Credentials, ApiError> {
        self.session.credentials().await.inspect_err(|e| log_failure(action, e))
    }

    /// Refetch after a mutation. A failure here is already logged and does
    /// not undo the mutation.
    async fn refresh(&self) {
        let _ = self.fetch_all().await;
    }
}

fn log_failure(action: &str, err: &ApiError) {
    tracing::error!("[Notes] Error {}: {}", action, err.payload());
}
