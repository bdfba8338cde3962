pub mod account;
pub mod notes;
pub mod shell;

use colored::Colorize;
use jotter_core::note::{Note, NoteDraft};

pub fn print_note(note: &Note) {
    println!("{} {}", format!("[{}]", note.id).bright_black(), note.title.bold());
    for line in note.content.lines() {
        println!("    {}", line);
    }
}

pub fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("{}", "No notes.".bright_black());
        return;
    }
    for note in notes {
        print_note(note);
    }
}

pub fn print_draft(draft: &NoteDraft) {
    println!("{} {}", "title:".bright_black(), draft.title);
    println!("{} {}", "content:".bright_black(), draft.content);
}
