//! Interactive REPL for the document Q&A session.
//!
//! Presentation only: every invariant lives in the layers below. Slash
//! commands manage the session; any other input is a question about the
//! active document.

use anyhow::Result;
use askdoc_application::{ENGINE_UNAVAILABLE_MESSAGE, SessionUseCase};
use askdoc_core::LocalDocument;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::{Path, PathBuf};

const COMMANDS: [&str; 6] = ["/upload", "/info", "/history", "/reprobe", "/help", "/quit"];

/// CLI helper for rustyline that provides completion, highlighting, and
/// hints for the slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
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
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Runs the session REPL until the user quits.
pub async fn run(mut session: SessionUseCase, initial_file: Option<PathBuf>) -> Result<()> {
    if session.initialize().await {
        println!("{}", "Engine ready.".green());
    } else {
        println!("{}", ENGINE_UNAVAILABLE_MESSAGE.red());
        println!("Check your API key, then run {} to retry.", "/reprobe".bright_cyan());
    }

    if let Some(path) = initial_file {
        upload_path(&mut session, &path).await;
    }

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    loop {
        match rl.readline("askdoc> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line.starts_with('/') {
                    if !dispatch_command(&mut session, line).await {
                        break;
                    }
                } else {
                    ask(&mut session, line).await;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Handles one slash command; returns false when the REPL should exit.
async fn dispatch_command(session: &mut SessionUseCase, line: &str) -> bool {
    let (command, argument) = match line.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/upload" => {
            if argument.is_empty() {
                println!("{}", "Usage: /upload <path>".yellow());
            } else {
                upload_path(session, Path::new(argument)).await;
            }
        }
        "/info" => print_info(session),
        "/history" => print_history(session),
        "/reprobe" => {
            if session.reprobe().await {
                println!("{}", "Engine ready.".green());
            } else {
                println!("{}", ENGINE_UNAVAILABLE_MESSAGE.red());
            }
        }
        "/help" => print_help(),
        "/quit" => return false,
        _ => println!("{} (try /help)", format!("Unknown command: {command}").yellow()),
    }
    true
}

async fn upload_path(session: &mut SessionUseCase, path: &Path) {
    let file_name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_string(),
        None => {
            println!("{}", format!("Not a file path: {}", path.display()).red());
            return;
        }
    };

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("{}", format!("Failed to read {}: {e}", path.display()).red());
            return;
        }
    };

    let document = match LocalDocument::new(file_name, bytes) {
        Ok(document) => document,
        Err(e) => {
            println!("{}", e.to_string().red());
            return;
        }
    };

    println!("Uploading {}...", document.file_name());
    match session.upload(&document).await {
        Ok(info) => {
            println!(
                "{} {} ({}, {})",
                "Uploaded:".green(),
                info.display_name,
                info.mime_type,
                info.processing_state
            );
        }
        Err(e) => println!("{}", e.to_string().red()),
    }
}

async fn ask(session: &mut SessionUseCase, question: &str) {
    match session.ask(question).await {
        Ok(answer) => println!("{}", answer),
        Err(e) if e.is_unavailable() => println!("{}", ENGINE_UNAVAILABLE_MESSAGE.red()),
        Err(e) => println!("{}", e.to_string().red()),
    }
}

fn print_info(session: &SessionUseCase) {
    match (session.active_document(), session.document_info()) {
        (Some(handle), Some(info)) => {
            println!("Name:  {}", info.display_name);
            println!("Type:  {}", info.mime_type);
            println!("State: {}", info.processing_state);
            println!("Size:  {} bytes", handle.size_bytes);
        }
        _ => println!("No document uploaded yet."),
    }
}

fn print_history(session: &SessionUseCase) {
    if session.history().is_empty() {
        println!("No questions asked yet.");
        return;
    }
    for (i, turn) in session.history().iter().enumerate() {
        println!("{} {}", format!("Q{}:", i + 1).bright_cyan(), turn.question);
        println!("{} {}", format!("A{}:", i + 1).green(), turn.answer);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /upload <path>  Upload a document (pdf, docx, txt, md, csv, xlsx, png, jpg, jpeg)");
    println!("  /info           Show active document metadata");
    println!("  /history        Show the session transcript");
    println!("  /reprobe        Re-check engine availability");
    println!("  /help           Show this help");
    println!("  /quit           Exit");
    println!("Anything else is asked as a question about the active document.");
}
