use super::model::Note;

/// Returns the notes whose title or content contains `query`, ignoring case.
///
/// The iterator is lazy and borrows from `notes`; order is preserved. An empty
/// query matches every note.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> impl Iterator<Item = &'a Note> + 'a {
    let needle = query.to_lowercase();
    notes.iter().filter(move |note| matches_query(note, &needle))
}

/// `needle` must already be lowercased.
fn matches_query(note: &Note, needle: &str) -> bool {
    needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
}
