use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::storage::Storage;
use crate::model::config::AppConfig;
use crate::model::task::{Status, SubTask, Task, TaskDraft};
use crate::ops::{export, suggest};
use crate::store::TaskStore;
use crate::sync::codec;
use crate::sync::reconciler::{SyncMode, SyncPreview};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;

    match cli.command {
        // Read commands
        Commands::List(args) => cmd_list(&data_dir, args, json),
        Commands::Show(args) => cmd_show(&data_dir, args, json),
        Commands::History(args) => cmd_history(&data_dir, args, json),
        Commands::Notifications { command } => cmd_notifications(&data_dir, command, json),
        Commands::Categories => cmd_categories(&data_dir, json),

        // Write commands
        Commands::Add(args) => cmd_add(&data_dir, args, json),
        Commands::Cycle(args) => cmd_cycle(&data_dir, args),
        Commands::Delete(args) => cmd_delete(&data_dir, args),
        Commands::Edit(args) => cmd_edit(&data_dir, args),
        Commands::Sub(cmd) => cmd_sub(&data_dir, cmd),

        // Sync and exchange
        Commands::Sync(cmd) => cmd_sync(&data_dir, cmd, json),
        Commands::Export(args) => cmd_export(&data_dir, args),
        Commands::Import(args) => cmd_import(&data_dir, args, json),

        // AI collaborator replies
        Commands::Suggest(args) => cmd_suggest(&data_dir, args, json),
        Commands::Decompose(args) => cmd_decompose(&data_dir, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_data_dir(flag: Option<&str>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(dir) = flag {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var_os("HOME")
        .ok_or("cannot locate home directory (use -C/--data-dir)")?;
    Ok(PathBuf::from(home).join(".taskpad"))
}

fn open_store(data_dir: &Path) -> Result<TaskStore, Box<dyn std::error::Error>> {
    Ok(TaskStore::open(Storage::open(data_dir)?)?)
}

fn load_config(data_dir: &Path) -> Result<AppConfig, Box<dyn std::error::Error>> {
    Ok(config_io::read_config(data_dir)?)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_category(config: &AppConfig) -> String {
    config
        .categories
        .first()
        .cloned()
        .unwrap_or_else(|| "Other".to_string())
}

/// Read an AI reply from a file, or stdin when the path is "-".
fn read_reply(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read reply file '{}': {}", path, e))?)
    }
}

// ---------------------------------------------------------------------------
// Read command handlers
// ---------------------------------------------------------------------------

fn cmd_list(
    data_dir: &Path,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(data_dir)?;
    let now = today();

    let status_filter: Option<Status> = args.status.map(Into::into);
    let matches = |task: &&Task| -> bool {
        if let Some(sf) = status_filter {
            if task.status != sf {
                return false;
            }
        }
        if let Some(ref cf) = args.category {
            if &task.category != cf {
                return false;
            }
        }
        if args.overdue && !task.is_overdue(now) {
            return false;
        }
        true
    };

    let tasks: Vec<&Task> = store.tasks().iter().filter(matches).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        if tasks.is_empty() {
            println!("(no tasks)");
        }
        for task in &tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_show(data_dir: &Path, args: IdArg, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(data_dir)?;
    let task = store
        .find(&args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        for line in format_task_detail(task) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_history(
    data_dir: &Path,
    args: HistoryArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(data_dir)?;

    if args.clear {
        store.clear_history()?;
        println!("history cleared");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(store.history())?);
    } else {
        if store.history().is_empty() {
            println!("(no history)");
        }
        for entry in store.history() {
            println!("{}", format_history_line(entry));
        }
    }
    Ok(())
}

fn cmd_notifications(
    data_dir: &Path,
    command: Option<NotificationsCmd>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(data_dir)?;

    match command {
        None => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.notifications())?);
            } else {
                if store.notifications().is_empty() {
                    println!("(no notifications)");
                }
                for notification in store.notifications() {
                    println!("{}", format_notification_line(notification));
                }
            }
            Ok(())
        }
        Some(NotificationsCmd::Read { id }) => {
            if store.mark_notification_read(&id)? {
                println!("{} read", id);
            } else {
                println!("no such notification: {}", id);
            }
            Ok(())
        }
        Some(NotificationsCmd::Clear) => {
            store.clear_notifications()?;
            println!("notifications cleared");
            Ok(())
        }
    }
}

fn cmd_categories(data_dir: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(data_dir)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&config.categories)?);
    } else {
        for category in &config.categories {
            println!("{}", category);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write command handlers
// ---------------------------------------------------------------------------

fn cmd_add(data_dir: &Path, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(data_dir)?;
    let mut store = open_store(data_dir)?;

    let draft = TaskDraft {
        title: args.title,
        description: args.description.unwrap_or_default(),
        priority: args.priority.into(),
        status: Status::Todo,
        due_date: args.due.unwrap_or_else(today),
        category: args.category.unwrap_or_else(|| default_category(&config)),
        subtasks: Vec::new(),
    };
    let task = store.create(draft)?;

    if json {
        let out = CreatedJson {
            id: task.id,
            title: task.title,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", task.id);
    }
    Ok(())
}

fn cmd_cycle(data_dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(data_dir)?;
    match store.cycle_status(&args.id)? {
        Some(status) => {
            println!("{} → {}", args.id, status);
            Ok(())
        }
        None => Err(format!("task not found: {}", args.id).into()),
    }
}

fn cmd_delete(data_dir: &Path, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(data_dir)?;
    store.delete(&args.id)?;
    println!("{} deleted", args.id);
    Ok(())
}

fn cmd_edit(data_dir: &Path, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(data_dir)?;
    let mut task = store
        .find(&args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?
        .clone();

    if let Some(title) = args.title {
        task.title = title;
    }
    if let Some(description) = args.description {
        task.description = description;
    }
    if let Some(priority) = args.priority {
        task.priority = priority.into();
    }
    if let Some(due) = args.due {
        task.due_date = due;
    }
    if let Some(category) = args.category {
        task.category = category;
    }

    store.update(task)?;
    println!("{} updated", args.id);
    Ok(())
}

fn cmd_sub(data_dir: &Path, cmd: SubCmd) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(data_dir)?;
    match cmd {
        SubCmd::Add { task_id, title } => {
            let mut task = store
                .find(&task_id)
                .ok_or_else(|| format!("task not found: {}", task_id))?
                .clone();
            let sub = SubTask {
                id: Uuid::new_v4().to_string(),
                title,
                completed: false,
            };
            let sub_id = sub.id.clone();
            task.subtasks.push(sub);
            store.update(task)?;
            println!("{}", sub_id);
            Ok(())
        }
        SubCmd::Toggle {
            task_id,
            subtask_id,
        } => {
            if store.toggle_subtask(&task_id, &subtask_id)? {
                println!("{} toggled", subtask_id);
                Ok(())
            } else {
                Err(format!("subtask not found: {} in {}", subtask_id, task_id).into())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Sync handlers
// ---------------------------------------------------------------------------

fn cmd_sync(data_dir: &Path, cmd: SyncCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        SyncCmd::Code => {
            let store = open_store(data_dir)?;
            println!("{}", codec::encode(store.tasks())?);
            Ok(())
        }
        SyncCmd::Preview { code } => {
            let store = open_store(data_dir)?;
            let preview = SyncPreview::new(codec::decode(&code)?);
            print_preview(&preview, &store, json)
        }
        SyncCmd::Apply(args) => {
            let mut store = open_store(data_dir)?;
            let candidates = codec::decode(&args.code)?;
            apply_candidates(&mut store, candidates, args.mode.into(), &args.skip, json)
        }
        SyncCmd::Undo => {
            let mut store = open_store(data_dir)?;
            let restored = store.undo_sync()?;
            if json {
                let out = UndoJson {
                    restored,
                    tasks: store.tasks().len(),
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else if restored {
                println!("restored pre-sync state ({} tasks)", store.tasks().len());
            } else {
                println!("nothing to undo");
            }
            Ok(())
        }
    }
}

fn print_preview(
    preview: &SyncPreview,
    store: &TaskStore,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let classified = preview.classify(store);

    if json {
        let entries: Vec<PreviewEntryJson> = classified
            .iter()
            .map(|(task, change)| PreviewEntryJson {
                id: task.id.clone(),
                title: task.title.clone(),
                change: change_label(*change),
                selected: preview.is_selected(&task.id),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        if classified.is_empty() {
            println!("(empty sync code)");
        }
        for (task, change) in &classified {
            println!("{:<6}  {}  {}", change_label(*change), task.id, task.title);
        }
    }
    Ok(())
}

fn apply_candidates(
    store: &mut TaskStore,
    candidates: Vec<Task>,
    mode: SyncMode,
    skip: &[String],
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut preview = SyncPreview::new(candidates);
    for id in skip {
        if !preview.deselect(id) {
            return Err(format!("skip id is not a candidate: {}", id).into());
        }
    }

    let summary = preview.confirm(store, mode)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "sync applied ({}): {} added, {} updated",
            summary.mode, summary.added, summary.updated
        );
        println!("undo with: tp sync undo");
    }
    Ok(())
}

fn cmd_export(data_dir: &Path, args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(data_dir)?;
    let path = export::export_tasks(Path::new(&args.out), store.tasks(), today())?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_import(
    data_dir: &Path,
    args: ImportArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(data_dir)?;
    let candidates = export::read_candidates(Path::new(&args.file))?;
    apply_candidates(&mut store, candidates, args.mode.into(), &args.skip, json)
}

// ---------------------------------------------------------------------------
// AI reply handlers
// ---------------------------------------------------------------------------

fn cmd_suggest(
    data_dir: &Path,
    args: SuggestArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(data_dir)?;
    let mut store = open_store(data_dir)?;

    let reply = read_reply(&args.reply)?;
    let suggestions = match suggest::parse_suggestions(&reply) {
        Ok(suggestions) => suggestions,
        // An unusable reply is not fatal; it just produces nothing.
        Err(e) => {
            println!("no suggestions produced: {}", e);
            return Ok(());
        }
    };

    let now = today();
    let fallback = default_category(&config);
    let mut created = Vec::new();
    for suggestion in suggestions {
        let draft = suggest::draft_from_suggestion(suggestion, now, &fallback);
        created.push(store.create(draft)?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        for task in &created {
            println!("{}", format_task_line(task));
        }
        println!("{} tasks added", created.len());
    }
    Ok(())
}

fn cmd_decompose(data_dir: &Path, args: DecomposeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(data_dir)?;
    let mut task = store
        .find(&args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?
        .clone();

    let reply = read_reply(&args.reply)?;
    let titles = match suggest::parse_subtask_titles(&reply) {
        Ok(titles) => titles,
        Err(e) => {
            println!("no subtasks produced: {}", e);
            return Ok(());
        }
    };

    let subs = suggest::subtasks_from_titles(titles);
    let count = subs.len();
    task.subtasks.extend(subs);
    store.update(task)?;
    println!("{} subtasks added to {}", count, args.id);
    Ok(())
}
