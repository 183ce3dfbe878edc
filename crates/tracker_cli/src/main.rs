use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tracker_cli::cli::{Cli, Command};
use tracker_core::config::load_config_with_fallback;
use tracker_core::error::AppError;
use tracker_core::model::TaskRecord;
use tracker_core::present::TextPresenter;
use tracker_core::storage::{LineStore, store_path};
use tracker_core::store::TaskStore;

struct Session {
    store: TaskStore,
    gateway: LineStore,
}

fn open_session() -> Result<Session, AppError> {
    let config_load = load_config_with_fallback();
    if let Some(err) = config_load.error {
        eprintln!("WARNING: {err}");
    }

    let path = store_path(config_load.config.store_path.as_deref())?;
    let gateway = LineStore::new(path);
    let mut store = TaskStore::new(Box::new(TextPresenter));

    let outcome = store.load(&gateway)?;
    if outcome.skipped > 0 {
        eprintln!(
            "WARNING: skipped {} corrupt record(s) in {}",
            outcome.skipped,
            gateway.path().display()
        );
    }

    Ok(Session { store, gateway })
}

fn record_json(record: &TaskRecord) -> serde_json::Value {
    serde_json::json!({
        "kind": record.kind,
        "done": record.done,
        "description": record.description,
        "field1": record.field1,
        "field2": record.field2,
    })
}

fn print_task_json(store: &TaskStore, index: usize) {
    if let Some(task) = store.tasks().get(index) {
        println!("{}", record_json(&task.to_record()));
    }
}

fn position_to_index(position: usize) -> Result<usize, AppError> {
    position
        .checked_sub(1)
        .ok_or_else(|| AppError::index_out_of_range("positions start at 1"))
}

/// Runs one parsed command against the store. Returns whether the store was
/// mutated, so the caller knows a save is due.
fn run_command(store: &mut TaskStore, cli: Cli) -> Result<bool, AppError> {
    match cli.command {
        Command::Todo { description } => {
            let rendered = store.add_todo(&description)?;
            if cli.json {
                print_task_json(store, store.size() - 1);
            } else {
                println!("{rendered}");
            }
            Ok(true)
        }
        Command::Deadline { description, end } => {
            let rendered = store.add_deadline(&description, &end)?;
            if cli.json {
                print_task_json(store, store.size() - 1);
            } else {
                println!("{rendered}");
            }
            Ok(true)
        }
        Command::Event {
            description,
            start,
            end,
        } => {
            let rendered = store.add_event(&description, &start, &end)?;
            if cli.json {
                print_task_json(store, store.size() - 1);
            } else {
                println!("{rendered}");
            }
            Ok(true)
        }
        Command::List => {
            if cli.json {
                let records: Vec<serde_json::Value> = store
                    .tasks()
                    .iter()
                    .map(|task| record_json(&task.to_record()))
                    .collect();
                println!("{}", serde_json::Value::Array(records));
            } else {
                println!("{}", store.list());
            }
            Ok(false)
        }
        Command::Mark { position } => {
            let index = position_to_index(position)?;
            let rendered = store.mark_done(index)?;
            if cli.json {
                print_task_json(store, index);
            } else {
                println!("{rendered}");
            }
            Ok(true)
        }
        Command::Unmark { position } => {
            let index = position_to_index(position)?;
            let rendered = store.mark_not_done(index)?;
            if cli.json {
                print_task_json(store, index);
            } else {
                println!("{rendered}");
            }
            Ok(true)
        }
        Command::Delete { position } => {
            let index = position_to_index(position)?;
            let record = store.tasks().get(index).map(|task| task.to_record());
            let rendered = store.delete(index)?;
            match record {
                Some(record) if cli.json => println!("{}", record_json(&record)),
                _ => println!("{rendered}"),
            }
            Ok(true)
        }
        Command::Find { keyword } => {
            let rendered = store.find(&keyword)?;
            if cli.json {
                let records: Vec<serde_json::Value> = store
                    .tasks()
                    .iter()
                    .filter(|task| task.description_contains(keyword.trim()))
                    .map(|task| record_json(&task.to_record()))
                    .collect();
                println!("{}", serde_json::Value::Array(records));
            } else {
                println!("{rendered}");
            }
            Ok(false)
        }
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_argument(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        match ch {
            '\\' if in_quotes => escape = true,
            '"' => in_quotes = !in_quotes,
            _ if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_argument("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_one_shot(cli: Cli) -> Result<(), AppError> {
    let mut session = open_session()?;
    let mutated = run_command(&mut session.store, cli)?;
    if mutated {
        session.store.save(&mut session.gateway)?;
    }
    Ok(())
}

fn run_interactive() -> Result<(), AppError> {
    let mut session = open_session()?;
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::persistence(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit")
            || line.eq_ignore_ascii_case("quit")
            || line.eq_ignore_ascii_case("bye")
        {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tracker".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(&mut session.store, cli) {
            eprintln!("ERROR: {err}");
        }
    }

    // ending the session triggers the save
    session.store.save(&mut session.gateway)
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) {
                err.exit();
            }
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_one_shot(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
