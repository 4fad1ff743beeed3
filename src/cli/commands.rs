use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::task::{Priority, Status};
use crate::sync::reconciler::SyncMode;

#[derive(Parser)]
#[command(name = "tp", about = concat!("[+] taskpad v", env!("CARGO_PKG_VERSION"), " - tasks that follow you around"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks
    List(ListArgs),
    /// Show task details
    Show(IdArg),
    /// Advance a task's status (todo → in progress → done → todo)
    Cycle(IdArg),
    /// Delete a task
    Delete(IdArg),
    /// Edit task fields
    Edit(EditArgs),
    /// Manage subtasks
    #[command(subcommand)]
    Sub(SubCmd),
    /// Show the action history
    History(HistoryArgs),
    /// Show or manage notifications
    Notifications {
        #[command(subcommand)]
        command: Option<NotificationsCmd>,
    },
    /// Exchange tasks with another device via a sync code
    #[command(subcommand)]
    Sync(SyncCmd),
    /// Export all tasks to a dated JSON file
    Export(ExportArgs),
    /// Import tasks from an exported JSON file
    Import(ImportArgs),
    /// Add tasks from an AI suggestion reply
    Suggest(SuggestArgs),
    /// Add subtasks from an AI decomposition reply
    Decompose(DecomposeArgs),
    /// List category suggestions
    Categories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Merge,
    Replace,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Priority {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Status {
        match arg {
            StatusArg::Todo => Status::Todo,
            StatusArg::InProgress => Status::InProgress,
            StatusArg::Done => Status::Done,
        }
    }
}

impl From<ModeArg> for SyncMode {
    fn from(arg: ModeArg) -> SyncMode {
        match arg {
            ModeArg::Merge => SyncMode::Merge,
            ModeArg::Replace => SyncMode::Replace,
        }
    }
}

#[derive(Args)]
pub struct IdArg {
    /// Task id
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Longer description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
    #[arg(long, value_enum, default_value = "medium")]
    pub priority: PriorityArg,
    /// Due date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub due: Option<NaiveDate>,
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks with this status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    /// Only tasks in this category
    #[arg(long)]
    pub category: Option<String>,
    /// Only overdue tasks
    #[arg(long)]
    pub overdue: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, short = 'd')]
    pub description: Option<String>,
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
    #[arg(long)]
    pub due: Option<NaiveDate>,
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Subcommand)]
pub enum SubCmd {
    /// Add a subtask to a task
    Add {
        /// Parent task id
        task_id: String,
        title: String,
    },
    /// Toggle a subtask's completed flag
    Toggle {
        /// Parent task id
        task_id: String,
        subtask_id: String,
    },
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Empty the history log
    #[arg(long)]
    pub clear: bool,
}

#[derive(Subcommand)]
pub enum NotificationsCmd {
    /// Mark a notification read
    Read {
        /// Notification id
        id: String,
    },
    /// Remove all notifications
    Clear,
}

#[derive(Subcommand)]
pub enum SyncCmd {
    /// Print a sync code for all local tasks
    Code,
    /// Preview what applying a sync code would do
    Preview {
        /// The sync code from the other device
        code: String,
    },
    /// Apply a sync code
    Apply(ApplyArgs),
    /// Restore the collection as it was before the last sync
    Undo,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// The sync code from the other device
    pub code: String,
    #[arg(long, value_enum, default_value = "merge")]
    pub mode: ModeArg,
    /// Candidate task ids to leave out
    #[arg(long = "skip", value_delimiter = ',')]
    pub skip: Vec<String>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Directory to write the export file into
    #[arg(long, default_value = ".")]
    pub out: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// An exported tasks JSON file
    pub file: String,
    #[arg(long, value_enum, default_value = "merge")]
    pub mode: ModeArg,
    /// Candidate task ids to leave out
    #[arg(long = "skip", value_delimiter = ',')]
    pub skip: Vec<String>,
}

#[derive(Args)]
pub struct SuggestArgs {
    /// File holding the AI service's JSON reply ("-" for stdin)
    #[arg(long, default_value = "-")]
    pub reply: String,
}

#[derive(Args)]
pub struct DecomposeArgs {
    /// Task id to attach the subtasks to
    pub id: String,
    /// File holding the AI service's JSON reply ("-" for stdin)
    #[arg(long, default_value = "-")]
    pub reply: String,
}
