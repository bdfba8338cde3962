//! Interactive note shell.
//!
//! The shell keeps one `NotesClient` alive for the whole session, so the note
//! form (draft, edit mode, search query) carries over between commands.
//! Backend failures on notes are already logged by the controller, so the
//! loop only prints login failures and usage mistakes before carrying on.
//! Login lines never reach the history.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use jotter_application::NotesClient;
use jotter_core::config::ClientConfig;
use jotter_core::error::{DeleteError, FetchError, SaveError};
use jotter_core::note::NoteId;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use super::notes::parse_id;
use super::{print_draft, print_notes};

const COMMANDS: &[(&str, &str)] = &[
    ("login", "login <username> <password>   the password is the rest of the line"),
    ("logout", "logout"),
    ("list", "list                 show notes matching the current search"),
    ("search", "search [text]        set the search text (empty clears it)"),
    ("title", "title <text>         set the draft title"),
    ("content", "content <text>       set the draft content"),
    ("edit", "edit <id>            load a note into the draft"),
    ("cancel", "cancel               leave edit mode and clear the draft"),
    ("save", "save                 create the draft, or update the note being edited"),
    ("delete", "delete <id>"),
    ("draft", "draft                show the draft"),
    ("help", "help"),
    ("quit", "quit"),
];

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Login { username: String, password: String },
    Logout,
    List,
    Search(String),
    Title(String),
    Content(String),
    Edit(NoteId),
    Cancel,
    Save,
    Delete(NoteId),
    Draft,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses one input line. Errors are usage messages for the user.
    fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name {
            "login" => match rest.split_once(char::is_whitespace) {
                Some((username, password)) if !password.trim().is_empty() => {
                    ShellCommand::Login {
                        username: username.to_string(),
                        password: password.trim().to_string(),
                    }
                }
                _ => return Err(usage("login")),
            },
            "logout" => ShellCommand::Logout,
            "list" | "ls" => ShellCommand::List,
            "search" => ShellCommand::Search(rest.to_string()),
            "title" => ShellCommand::Title(rest.to_string()),
            "content" => ShellCommand::Content(rest.to_string()),
            "edit" if !rest.is_empty() => ShellCommand::Edit(parse_id(rest)),
            "edit" => return Err(usage("edit")),
            "cancel" => ShellCommand::Cancel,
            "save" => ShellCommand::Save,
            "delete" | "rm" if !rest.is_empty() => ShellCommand::Delete(parse_id(rest)),
            "delete" | "rm" => return Err(usage("delete")),
            "draft" => ShellCommand::Draft,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("Unknown command: {} (try 'help')", other)),
        };
        Ok(command)
    }
}

/// Lines carrying a password stay out of the history.
fn keep_in_history(line: &str) -> bool {
    line.split_whitespace().next() != Some("login")
}

/// Note operation failures were logged where they happened; everything else
/// (bad credentials, local errors) is printed.
fn should_report(err: &anyhow::Error) -> bool {
    !(err.is::<FetchError>() || err.is::<SaveError>() || err.is::<DeleteError>())
}

fn usage(name: &str) -> String {
    let text = COMMANDS
        .iter()
        .find(|(command, _)| *command == name)
        .map(|(_, usage)| *usage)
        .unwrap_or(name);
    format!("Usage: {}", text)
}

/// Rustyline helper: completes and hints command names.
#[derive(Clone)]
struct ShellHelper {
    commands: Vec<String>,
}

impl ShellHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let name = line.split(' ').next().unwrap_or("");
        if self.commands.iter().any(|cmd| cmd == name) {
            Owned(format!("{}{}", name.bright_cyan(), &line[name.len()..]))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ShellHelper {}

pub async fn run(client: &NotesClient, config: &ClientConfig) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(ShellHelper::new()));

    println!("{}", "=== Jotter ===".bright_magenta().bold());
    println!("{}", format!("Backend: {}", config.base_url).bright_black());

    match client.restore().await {
        Ok(Some(session)) => println!(
            "{}",
            format!("Logged in as {}", session.username).green()
        ),
        Ok(None) => println!("{}", "Not logged in. Use 'login <username> <password>'.".yellow()),
        Err(e) => eprintln!("{}", format!("Could not read stored session: {}", e).red()),
    }
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    println!();

    loop {
        let prompt = if client.notes().edit_context().await.is_editing() {
            "jotter (editing)> "
        } else {
            "jotter> "
        };

        match rl.readline(prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if keep_in_history(&line) {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match ShellCommand::parse(&line) {
                    Ok(ShellCommand::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Ok(command) => {
                        if let Err(e) = execute(client, command).await {
                            if should_report(&e) {
                                eprintln!("{}", e.to_string().red());
                            }
                        }
                    }
                    Err(message) => println!("{}", message.yellow()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

async fn execute(client: &NotesClient, command: ShellCommand) -> Result<()> {
    let notes = client.notes();

    match command {
        ShellCommand::Login { username, password } => {
            client.login(&username, &password).await?;
            println!(
                "{}",
                format!("Logged in as {} ({} notes)", username, notes.notes().await.len()).green()
            );
        }
        ShellCommand::Logout => {
            client.logout().await;
            println!("{}", "Logged out".green());
        }
        ShellCommand::List => {
            notes.fetch_all().await?;
            print_notes(&notes.visible_notes().await);
        }
        ShellCommand::Search(query) => {
            notes.set_query(query).await;
            print_notes(&notes.visible_notes().await);
        }
        ShellCommand::Title(title) => notes.set_draft_title(title).await,
        ShellCommand::Content(content) => notes.set_draft_content(content).await,
        ShellCommand::Edit(id) => match notes.find(&id).await {
            Some(note) => {
                notes.begin_edit(&note).await;
                println!("{}", format!("Editing note {}", id).cyan());
                print_draft(&notes.draft().await);
            }
            None => println!("{}", format!("Note {} is not in the list; try 'list'", id).yellow()),
        },
        ShellCommand::Cancel => {
            notes.cancel_edit().await;
            println!("{}", "Edit cancelled".bright_black());
        }
        ShellCommand::Save => {
            let editing = notes.active_note_id().await;
            notes.submit().await?;
            match editing {
                Some(id) => println!("{}", format!("Updated note {}", id).green()),
                None => println!("{}", "Created note".green()),
            }
        }
        ShellCommand::Delete(id) => {
            notes.delete(&id).await?;
            println!("{}", format!("Deleted note {}", id).green());
        }
        ShellCommand::Draft => {
            match notes.active_note_id().await {
                Some(id) => println!("{}", format!("Editing note {}", id).cyan()),
                None => println!("{}", "New note".cyan()),
            }
            print_draft(&notes.draft().await);
        }
        ShellCommand::Help => {
            for (_, usage) in COMMANDS {
                println!("  {}", usage);
            }
        }
        ShellCommand::Quit => {}
    }
    Ok(())
}
