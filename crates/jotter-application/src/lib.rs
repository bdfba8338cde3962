//! Application layer for Jotter.
//!
//! Coordinates the session lifecycle and the note list on top of the
//! `NotesApi` and `TokenStore` traits from `jotter-core`.

pub mod note_list_controller;
pub mod notes_client;
pub mod session_manager;

pub use note_list_controller::NoteListController;
pub use notes_client::NotesClient;
pub use session_manager::SessionManager;
