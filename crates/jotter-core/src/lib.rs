//! Domain layer for Jotter.
//!
//! Models, error types and the traits the other crates implement
//! (`NotesApi` for the backend, `TokenStore` for session persistence).

pub mod api;
pub mod config;
pub mod error;
pub mod note;
pub mod session;

pub use api::{NotesApi, Registration, UserId};
pub use config::ClientConfig;
pub use error::{
    ApiError, AuthError, DeleteError, FetchError, JotterError, RegisterError, Result, SaveError,
};
pub use note::{EditContext, Note, NoteDraft, NoteId, SubmitAction, filter_notes};
pub use session::{BearerToken, Credentials, Session, SessionState, TokenStore};
