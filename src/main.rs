use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Result, eyre};
use std::path::PathBuf;
use tasklist::{SlotStorage, Task, TaskListStore, date};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "To-do list with due dates, importance, and drag-style reordering")]
#[command(version)]
struct Cli {
    /// Storage directory (default: the platform data dir)
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task text
        text: String,
        /// Due date in YYYY-MM-DD form
        #[arg(long)]
        due: Option<String>,
    },

    /// Show all tasks in display order
    List,

    /// Toggle a task's completed state
    Done {
        /// Task id (shown by `list`)
        id: u64,
    },

    /// Toggle a task's importance marker
    Important {
        /// Task id (shown by `list`)
        id: u64,
    },

    /// Remove a task
    Rm {
        /// Task id (shown by `list`)
        id: u64,
    },

    /// Move a task to another position
    Mv {
        /// Current position (1-based, as shown by `list`)
        from: usize,
        /// Target position (1-based)
        to: usize,
    },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let store_dir = match cli.store_path {
        Some(path) => path,
        None => default_store_dir()?,
    };

    let storage = SlotStorage::open(&store_dir)?;
    let mut store = TaskListStore::open(storage)?;

    match cli.command {
        Commands::Add { text, due } => {
            let id = store.add_task(&text, due.as_deref())?;
            println!("Added task #{}", id);
        }
        Commands::List => {
            if store.is_empty() {
                println!("No tasks.");
            }
            for (pos, task) in store.tasks().iter().enumerate() {
                println!("{}", render_task(pos, task));
            }
        }
        Commands::Done { id } => {
            if store.toggle_completed(id)? {
                let state = if store.get(id).map(|t| t.completed).unwrap_or(false) {
                    "completed"
                } else {
                    "open"
                };
                println!("Task #{} is now {}", id, state);
            } else {
                println!("No task with id {}", id);
            }
        }
        Commands::Important { id } => {
            if store.toggle_important(id)? {
                println!("Toggled importance of task #{}", id);
            } else {
                println!("No task with id {}", id);
            }
        }
        Commands::Rm { id } => {
            if store.remove_task(id)? {
                println!("Removed task #{}", id);
            } else {
                println!("No task with id {}", id);
            }
        }
        Commands::Mv { from, to } => {
            let len = store.len();
            if from < 1 || from > len || to < 1 || to > len {
                return Err(eyre!("Positions must be between 1 and {}", len));
            }
            store.reorder(from - 1, Some(to - 1))?;
            println!("Moved task to position {}", to);
        }
    }

    Ok(())
}

fn default_store_dir() -> Result<PathBuf> {
    let data = dirs::data_dir().ok_or_else(|| eyre!("Could not determine the platform data directory"))?;
    Ok(data.join("tasklist"))
}

fn render_task(pos: usize, task: &Task) -> String {
    let marker = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{:>3}. {} #{} {}", pos + 1, marker, task.id, task.text);

    if let Some(due) = &task.due_date {
        line.push_str(&format!("  (due {})", date::format_due_date(due)));
    }

    if task.important_flag {
        line.red().bold().to_string()
    } else if task.completed {
        line.dimmed().to_string()
    } else {
        line
    }
}
