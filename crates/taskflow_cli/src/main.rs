use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use taskflow_cli::cli::{Cli, Command, FilterCommand};
use taskflow_core::config::{self, Palette};
use taskflow_core::error::AppError;
use taskflow_core::model::{Filter, Statistics, Task};
use taskflow_core::storage::json_store;
use taskflow_core::store::TaskStore;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "Id")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created_at: String,
    #[tabled(rename = "Completed")]
    completed_at: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn status_label(completed: bool) -> &'static str {
    if completed { "completed" } else { "pending" }
}

fn task_row(task: &Task, palette: &Palette) -> TaskRow {
    let title = if task.completed {
        palette.mutedize(&task.title)
    } else {
        task.title.clone()
    };

    TaskRow {
        id: task.id,
        title,
        status: status_label(task.completed).to_string(),
        created_at: task.created_at.clone(),
        completed_at: task.completed_at.clone().unwrap_or_else(|| "-".to_string()),
        description: task.description.clone(),
    }
}

fn print_tasks_plain(tasks: &[Task], palette: &Palette) {
    if tasks.is_empty() {
        println!("No tasks to show.");
        return;
    }

    let rows: Vec<TaskRow> = tasks.iter().map(|task| task_row(task, palette)).collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{table}");
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), AppError> {
    let payload =
        serde_json::to_string_pretty(tasks).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    let payload =
        serde_json::to_string(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

fn stats_line(stats: &Statistics, palette: &Palette) -> String {
    let percent = palette.accentize(&format!("{}%", stats.percent_complete));
    format!(
        "Total: {} | Pending: {} | Completed: {} | {} complete",
        stats.total, stats.pending, stats.completed, percent
    )
}

fn print_stats_json(stats: &Statistics) {
    let json = serde_json::json!({
        "total": stats.total,
        "pending": stats.pending,
        "completed": stats.completed,
        "percent_complete": stats.percent_complete,
    });
    println!("{json}");
}

fn require_task(store: &TaskStore, id: u64) -> Result<Task, AppError> {
    store
        .get(id)
        .cloned()
        .ok_or_else(|| AppError::invalid_input("task not found"))
}

fn run_command(cli: Cli, store: &mut TaskStore, palette: &Palette) -> Result<(), AppError> {
    match cli.command {
        Command::Add { title, description } => {
            let title = match title {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::invalid_input("title is required")),
            };

            let task = store.create(&title, description.as_deref().unwrap_or(""))?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Added task: {} (#{})", task.title, task.id);
                println!("{}", stats_line(&store.statistics(), palette));
            }
        }
        Command::Done { id } => {
            require_task(store, id)?;
            store.set_completion(id, true)?;
            let task = require_task(store, id)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Completed task: {} (#{})", task.title, task.id);
                println!("{}", stats_line(&store.statistics(), palette));
            }
        }
        Command::Undone { id } => {
            require_task(store, id)?;
            store.set_completion(id, false)?;
            let task = require_task(store, id)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Reopened task: {} (#{})", task.title, task.id);
                println!("{}", stats_line(&store.statistics(), palette));
            }
        }
        Command::Edit {
            id,
            new_title,
            description,
        } => {
            let current = require_task(store, id)?;
            // The edit dialog pre-fills both fields; an omitted flag keeps
            // the current description rather than clearing it.
            let description = description.unwrap_or(current.description);
            store.edit(id, &new_title, &description)?;
            let task = require_task(store, id)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Updated task: {} (#{})", task.title, task.id);
                println!("{}", stats_line(&store.statistics(), palette));
            }
        }
        Command::Delete { id } => {
            let task = require_task(store, id)?;
            store.delete(id)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Deleted task: {} (#{})", task.title, task.id);
                println!("{}", stats_line(&store.statistics(), palette));
            }
        }
        Command::List { filter } => {
            let filter = match filter {
                Some(FilterCommand::Pending) => Filter::Pending,
                Some(FilterCommand::Completed) => Filter::Completed,
                Some(FilterCommand::All) | None => Filter::All,
            };

            let tasks = store.filtered(filter);
            if cli.json {
                print_tasks_json(&tasks)?;
            } else {
                print_tasks_plain(&tasks, palette);
            }
        }
        Command::Stats => {
            let stats = store.statistics();
            if cli.json {
                print_stats_json(&stats);
            } else {
                println!("{}", stats_line(&stats, palette));
            }
        }
    }

    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
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

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
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

fn run_interactive(store: &mut TaskStore, palette: &Palette) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("taskflow".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli, store, palette) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn open_store() -> (TaskStore, Palette) {
    let config_load = config::load_config_with_fallback();
    if let Some(err) = &config_load.error {
        eprintln!("WARNING: {}", err);
    }
    let palette = config::palette_for_theme(config_load.config.theme.as_deref());

    let store_path = json_store::store_path(config_load.config.data_file.as_deref());
    let opened = TaskStore::open_with_fallback(&store_path);
    if let Some(err) = &opened.error {
        eprintln!(
            "WARNING: could not load {}: {} (starting with an empty list; the unreadable file was kept as a .bak copy)",
            store_path.display(),
            err
        );
    }

    (opened.store, palette)
}

fn main() {
    if let Err(err) = taskflow_core::logging::init() {
        eprintln!("WARNING: {}", err);
    }

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        let (mut store, palette) = open_store();
        if let Err(err) = run_interactive(&mut store, &palette) {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let (mut store, palette) = open_store();
    if let Err(err) = run_command(cli, &mut store, &palette) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
