//! Command-line frontend for marknote.
//!
//! # Responsibility
//! - Map subcommands onto the core notebook flows.
//! - Present outcomes; all note semantics live in `marknote_core`.

use log::warn;
use marknote_core::{
    default_app_dir, default_config_file, default_log_level, init_logging, span_at,
    GrammarReport, Note, NoteStore, Notebook, NotebookObserver, SaveOutcome, StoreConfig,
    ViewOutcome, DEFAULT_BASE_URL,
};
use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "marknote - Markdown notes

USAGE:
    marknote [OPTIONS] <COMMAND>

COMMANDS:
    list                 List all notes
    show <id>            Print a note's raw Markdown
    save [file]          Save a new note from a file or stdin
    update <id> [file]   Replace a note's content from a file or stdin
    delete <id>          Delete a note
    view <id>            Print a note rendered as HTML
    grammar <id>         Run the backend grammar check over a note
    help                 Show this help

OPTIONS:
    --remote[=URL]       Use the REST backend (default URL when omitted)
    --data <file>        Use a local collection file at this path
    --config <file>      Read backend configuration from this file
    --log-level <level>  trace|debug|info|warn|error
";

struct ConsoleObserver;

impl NotebookObserver for ConsoleObserver {
    fn note_saved(&mut self, note: &Note) {
        println!("Note saved: your note has been saved successfully ({})", note.id);
    }

    fn note_deleted(&mut self, _id: &str) {
        println!("Note deleted: your note has been deleted");
    }

    fn store_failed(&mut self, message: &str) {
        eprintln!("Something went wrong: {message}");
    }

    fn grammar_unavailable(&mut self) {
        println!("Grammar check: grammar checking feature coming soon!");
    }
}

#[derive(Default)]
struct Options {
    remote: bool,
    remote_url: Option<String>,
    data_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
    log_level: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn Error>> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let options = extract_options(&mut args)?;

    let level = options
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(message) = init_logging(&level, default_app_dir().join("logs")) {
        // Logging is advisory; a read-only filesystem must not block the app.
        eprintln!("warning: {message}");
    }

    let config = resolve_config(&options)?;
    let store = config.open_store()?;
    let mut notebook = Notebook::open(store, ConsoleObserver);

    if args.is_empty() {
        print!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    }

    let command = args.remove(0);
    match command.as_str() {
        "list" => cmd_list(&notebook),
        "show" => cmd_show(&notebook, &args),
        "save" => cmd_save(&mut notebook, &args),
        "update" => cmd_update(&mut notebook, &args),
        "delete" => cmd_delete(&mut notebook, &args),
        "view" => cmd_view(&notebook, &args),
        "grammar" => cmd_grammar(&mut notebook, &args),
        "help" | "-h" | "--help" => {
            print!("{USAGE}");
            Ok(ExitCode::SUCCESS)
        }
        other => {
            eprintln!("unknown command `{other}`; see `marknote help`");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn extract_options(args: &mut Vec<String>) -> Result<Options, Box<dyn Error>> {
    let mut options = Options::default();
    let mut index = 0;
    while index < args.len() {
        let arg = args[index].clone();
        if arg == "--remote" {
            options.remote = true;
            args.remove(index);
        } else if let Some(url) = arg.strip_prefix("--remote=") {
            options.remote = true;
            options.remote_url = Some(url.to_string());
            args.remove(index);
        } else if arg == "--data" || arg == "--config" || arg == "--log-level" {
            if index + 1 >= args.len() {
                return Err(format!("{arg} requires a value").into());
            }
            let value = args.remove(index + 1);
            args.remove(index);
            match arg.as_str() {
                "--data" => options.data_file = Some(PathBuf::from(value)),
                "--config" => options.config_file = Some(PathBuf::from(value)),
                _ => options.log_level = Some(value),
            }
        } else {
            index += 1;
        }
    }
    Ok(options)
}

fn resolve_config(options: &Options) -> Result<StoreConfig, Box<dyn Error>> {
    if options.remote {
        return Ok(StoreConfig::Remote {
            base_url: options
                .remote_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        });
    }
    if let Some(data_file) = &options.data_file {
        return Ok(StoreConfig::Local {
            data_file: data_file.clone(),
        });
    }
    let path = options
        .config_file
        .clone()
        .unwrap_or_else(default_config_file);
    Ok(StoreConfig::load(path)?)
}

fn cmd_list<S: NoteStore>(
    notebook: &Notebook<S, ConsoleObserver>,
) -> Result<ExitCode, Box<dyn Error>> {
    let summaries = notebook.summaries();
    if summaries.is_empty() {
        println!("No notes yet");
        return Ok(ExitCode::SUCCESS);
    }
    for summary in summaries {
        println!(
            "{:<24} {:<12} {}",
            summary.id, summary.updated_label, summary.title
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_show<S: NoteStore>(
    notebook: &Notebook<S, ConsoleObserver>,
    args: &[String],
) -> Result<ExitCode, Box<dyn Error>> {
    let id = required(args, "show <id>")?;
    match notebook.store().get(id) {
        Some(note) => {
            println!("{}", note.content);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("Note not found");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_save<S: NoteStore>(
    notebook: &mut Notebook<S, ConsoleObserver>,
    args: &[String],
) -> Result<ExitCode, Box<dyn Error>> {
    let content = read_content(args.first())?;
    notebook.create_new();
    notebook.editor_mut().set_buffer(content);
    save_buffer(notebook)
}

fn cmd_update<S: NoteStore>(
    notebook: &mut Notebook<S, ConsoleObserver>,
    args: &[String],
) -> Result<ExitCode, Box<dyn Error>> {
    let id = required(args, "update <id> [file]")?.to_string();
    if !notebook.select(&id) {
        eprintln!("Note not found");
        return Ok(ExitCode::FAILURE);
    }
    let content = read_content(args.get(1))?;
    notebook.editor_mut().set_buffer(content);
    save_buffer(notebook)
}

fn save_buffer<S: NoteStore>(
    notebook: &mut Notebook<S, ConsoleObserver>,
) -> Result<ExitCode, Box<dyn Error>> {
    match notebook.save()? {
        SaveOutcome::Saved(_) => Ok(ExitCode::SUCCESS),
        SaveOutcome::EmptyBuffer => {
            eprintln!("Nothing to save: note content is empty");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_delete<S: NoteStore>(
    notebook: &mut Notebook<S, ConsoleObserver>,
    args: &[String],
) -> Result<ExitCode, Box<dyn Error>> {
    let id = required(args, "delete <id>")?.to_string();
    notebook.delete(&id)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_view<S: NoteStore>(
    notebook: &Notebook<S, ConsoleObserver>,
    args: &[String],
) -> Result<ExitCode, Box<dyn Error>> {
    let id = required(args, "view <id>")?;
    match notebook.view(id)? {
        ViewOutcome::Rendered(page) => {
            println!("{}", page.html);
            Ok(ExitCode::SUCCESS)
        }
        ViewOutcome::NotFound => {
            // Mirror the app's redirect: fall back to the note list.
            eprintln!("Note not found");
            cmd_list(notebook)
        }
    }
}

fn cmd_grammar<S: NoteStore>(
    notebook: &mut Notebook<S, ConsoleObserver>,
    args: &[String],
) -> Result<ExitCode, Box<dyn Error>> {
    let id = required(args, "grammar <id>")?.to_string();
    if !notebook.select(&id) {
        eprintln!("Note not found");
        return Ok(ExitCode::FAILURE);
    }
    match notebook.check_grammar() {
        Ok(Some(report)) => {
            print_report(&report);
            Ok(ExitCode::SUCCESS)
        }
        // Unavailable-checker notice already went through the observer.
        Ok(None) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            warn!("event=grammar_check module=cli status=error error={err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_report(report: &GrammarReport) {
    if report.errors.is_empty() {
        println!("No issues found");
        return;
    }
    for issue in &report.errors {
        match span_at(&report.text, issue.offset, issue.length) {
            Some(span) => {
                let flagged = &report.text[span.start..span.end];
                println!("{}: `{flagged}` at {}", issue.message, issue.offset);
            }
            None => println!("{}: at {}", issue.message, issue.offset),
        }
    }
}

fn required<'a>(args: &'a [String], usage: &str) -> Result<&'a str, Box<dyn Error>> {
    args.first()
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument; usage: marknote {usage}").into())
}

fn read_content(path: Option<&String>) -> Result<String, Box<dyn Error>> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
