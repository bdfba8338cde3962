//! Note domain module.
//!
//! # Module Structure
//!
//! - `model`: `Note`, `NoteId` and `NoteDraft`
//! - `edit`: the edit-mode/draft state of the note form
//! - `filter`: local case-insensitive search over cached notes

mod edit;
mod filter;
mod model;

pub use edit::{EditContext, SubmitAction};
pub use filter::filter_notes;
pub use model::{Note, NoteDraft, NoteId};
