use super::model::{Note, NoteDraft, NoteId};

/// The note form: a draft plus the id of the note being edited, if any.
///
/// Edit mode is the presence of `active_note_id`, never the truthiness of the
/// id it holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditContext {
    active_note_id: Option<NoteId>,
    draft: NoteDraft,
}

/// What submitting the form will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    Create(NoteDraft),
    Update(NoteId, NoteDraft),
}

impl EditContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `note` into the draft and makes it the note being edited.
    ///
    /// Replaces any edit already in progress.
    pub fn begin_edit(&mut self, note: &Note) {
        self.draft = NoteDraft::from(note);
        self.active_note_id = Some(note.id.clone());
    }

    /// Leaves edit mode and empties the draft.
    pub fn reset(&mut self) {
        self.active_note_id = None;
        self.draft = NoteDraft::default();
    }

    pub fn clear_draft(&mut self) {
        self.draft = NoteDraft::default();
    }

    pub fn set_draft(&mut self, draft: NoteDraft) {
        self.draft = draft;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn active_note_id(&self) -> Option<&NoteId> {
        self.active_note_id.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.active_note_id.is_some()
    }

    pub fn submit_action(&self) -> SubmitAction {
        match &self.active_note_id {
            Some(id) => SubmitAction::Update(id.clone(), self.draft.clone()),
            None => SubmitAction::Create(self.draft.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_creates() {
        let ctx = EditContext::new();
        assert!(!ctx.is_editing());
        assert_eq!(ctx.submit_action(), SubmitAction::Create(NoteDraft::default()));
    }

    #[test]
    fn test_begin_edit_copies_note() {
        let mut ctx = EditContext::new();
        ctx.begin_edit(&Note::new(7, "A", "B"));

        assert_eq!(ctx.active_note_id(), Some(&NoteId::Number(7)));
        assert_eq!(ctx.draft(), &NoteDraft::new("A", "B"));
    }

    #[test]
    fn test_zero_id_is_still_editing() {
        let mut ctx = EditContext::new();
        ctx.begin_edit(&Note::new(0, "zero", ""));

        assert!(ctx.is_editing());
        assert_eq!(
            ctx.submit_action(),
            SubmitAction::Update(NoteId::Number(0), NoteDraft::new("zero", ""))
        );
    }

    #[test]
    fn test_empty_string_id_is_still_editing() {
        let mut ctx = EditContext::new();
        ctx.begin_edit(&Note::new("", "blank id", ""));
        assert!(ctx.is_editing());
    }

    #[test]
    fn test_second_begin_edit_replaces_first() {
        let mut ctx = EditContext::new();
        ctx.begin_edit(&Note::new(1, "one", "1"));
        ctx.begin_edit(&Note::new(2, "two", "2"));

        assert_eq!(ctx.active_note_id(), Some(&NoteId::Number(2)));
        assert_eq!(ctx.draft().title, "two");
    }

    #[test]
    fn test_reset() {
        let mut ctx = EditContext::new();
        ctx.begin_edit(&Note::new(1, "one", "1"));
        ctx.set_content("changed");
        ctx.reset();

        assert!(!ctx.is_editing());
        assert!(ctx.draft().is_empty());
    }
}
