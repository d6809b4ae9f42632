// To-do list state and its mirror in the persistence slot

use crate::date;
use crate::error::ValidationError;
use crate::models::Task;
use crate::slot::SlotStorage;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

/// Name of the storage slot holding the serialized task list.
pub const TASKS_SLOT: &str = "tasks";

/// Owns the ordered task sequence and every operation that transforms it.
///
/// The list is loaded once from the `"tasks"` slot at open. Every successful
/// mutation writes the full serialized list back, except that the very first
/// write of an empty list into a slot that has never held data is suppressed,
/// so opening an empty store cannot stomp on data another session wrote.
pub struct TaskListStore {
    storage: SlotStorage,
    tasks: Vec<Task>,
    next_id: u64,
    /// True once the slot is known to hold data: set at load when the slot
    /// file existed, and after every write. Gates the first-write suppression.
    slot_populated: bool,
}

impl TaskListStore {
    /// Open a store over the given slot storage, loading any persisted list.
    ///
    /// An absent slot yields an empty list. A slot whose contents fail to
    /// parse also yields an empty list (logged, not an error); the next
    /// mutation overwrites the corrupt payload.
    pub fn open(storage: SlotStorage) -> Result<Self> {
        let raw = storage.read(TASKS_SLOT)?;
        let slot_populated = raw.is_some();

        let tasks: Vec<Task> = match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(tasks) => tasks,
                Err(e) => {
                    warn!(error = ?e, "Stored task list is unparseable, starting empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let next_id = tasks.iter().map(|t| t.id).max().map_or(1, |id| id + 1);

        info!(count = tasks.len(), next_id, "Loaded task list");

        Ok(Self {
            storage,
            tasks,
            next_id,
            slot_populated,
        })
    }

    /// Current task sequence in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a new task.
    ///
    /// Fails with [`ValidationError`] (carried inside the report, nothing
    /// mutated) when the trimmed text is empty or a supplied due date is not
    /// a real `YYYY-MM-DD` calendar date. On success the new task starts
    /// uncompleted and unimportant, the list is persisted, and the fresh id
    /// is returned.
    pub fn add_task(&mut self, text: &str, due_date: Option<&str>) -> Result<u64> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let due = match due_date {
            Some(raw) => Some(
                date::parse_due_date(raw)
                    .ok_or_else(|| ValidationError::InvalidDueDate(raw.to_string()))?,
            ),
            None => None,
        };

        let id = self.next_id;
        self.next_id += 1;

        self.tasks.push(Task::new(id, text.to_string(), due));
        self.persist()?;

        debug!(id, "Added task");
        Ok(id)
    }

    /// Remove the task with the given id. Returns false (a no-op, not an
    /// error) when no task matches.
    pub fn remove_task(&mut self, id: u64) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);

        if self.tasks.len() == before {
            return Ok(false);
        }

        self.persist()?;
        debug!(id, "Removed task");
        Ok(true)
    }

    /// Flip `completed` on the matching task. Returns false when no task
    /// matches.
    pub fn toggle_completed(&mut self, id: u64) -> Result<bool> {
        self.toggle(id, |task| task.completed = !task.completed)
    }

    /// Flip `important_flag` on the matching task. Returns false when no task
    /// matches.
    pub fn toggle_important(&mut self, id: u64) -> Result<bool> {
        self.toggle(id, |task| task.important_flag = !task.important_flag)
    }

    fn toggle<F: FnOnce(&mut Task)>(&mut self, id: u64, flip: F) -> Result<bool> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                flip(task);
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Move the task at `source` to `destination`, shifting the tasks in
    /// between. `None` (a cancelled drag) is a no-op.
    ///
    /// Indices are positions in the current display order. Out-of-range
    /// indices are a caller contract violation and panic; callers taking
    /// user input must bounds-check first.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> Result<()> {
        let Some(destination) = destination else {
            return Ok(());
        };

        let task = self.tasks.remove(source);
        self.tasks.insert(destination, task);

        self.persist()?;
        debug!(source, destination, "Reordered task");
        Ok(())
    }

    /// Write the full serialized list to the slot.
    ///
    /// Suppressed when the list is empty and the slot has never held data
    /// this session; an explicit transition to empty still persists `[]`.
    pub fn persist(&mut self) -> Result<()> {
        if self.tasks.is_empty() && !self.slot_populated {
            debug!("Suppressing first write of an empty list");
            return Ok(());
        }

        let json = serde_json::to_string(&self.tasks).context("Failed to serialize task list")?;
        self.storage.write(TASKS_SLOT, &json)?;
        self.slot_populated = true;
        Ok(())
    }
}
