use anyhow::{Result, anyhow, bail};
use colored::Colorize;
use jotter_application::NotesClient;
use jotter_core::note::NoteId;

use super::print_notes;

/// Reactivates the stored session; one-shot commands cannot prompt for a login.
async fn require_session(client: &NotesClient) -> Result<()> {
    if client.session().restore().await?.is_none() {
        bail!("Not logged in. Run `jotter login <username>` first.");
    }
    Ok(())
}

pub async fn list(client: &NotesClient, search: Option<&str>) -> Result<()> {
    require_session(client).await?;
    client.notes().fetch_all().await?;

    let notes = match search {
        Some(query) => client.notes().filter(query).await,
        None => client.notes().notes().await,
    };
    print_notes(&notes);
    Ok(())
}

pub async fn add(client: &NotesClient, title: &str, content: &str) -> Result<()> {
    require_session(client).await?;
    client.notes().create(title, content).await?;
    println!("{}", format!("Created \"{}\"", title).green());
    Ok(())
}

/// Fields left out keep their current value.
pub async fn edit(
    client: &NotesClient,
    id: &str,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    if title.is_none() && content.is_none() {
        bail!("Nothing to change: pass --title and/or --content");
    }

    require_session(client).await?;
    let notes = client.notes();
    notes.fetch_all().await?;

    let id = parse_id(id);
    let note = notes
        .find(&id)
        .await
        .ok_or_else(|| anyhow!("Note {} not found", id))?;

    notes.begin_edit(&note).await;
    if let Some(title) = title {
        notes.set_draft_title(title).await;
    }
    if let Some(content) = content {
        notes.set_draft_content(content).await;
    }
    notes.submit().await?;

    println!("{}", format!("Updated note {}", id).green());
    Ok(())
}

pub async fn delete(client: &NotesClient, id: &str) -> Result<()> {
    require_session(client).await?;
    let id = parse_id(id);
    client.notes().delete(&id).await?;
    println!("{}", format!("Deleted note {}", id).green());
    Ok(())
}

pub fn parse_id(raw: &str) -> NoteId {
    let Ok(id) = raw.parse::<NoteId>();
    id
}
