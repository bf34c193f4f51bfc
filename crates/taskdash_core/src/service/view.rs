//! Plain-text dashboard view.

use crate::model::filter::Filter;
use crate::model::task::{Task, TaskId, TaskStats};
use crate::util::time_ago::format_created_at;
use std::fmt::{Display, Formatter};

const EMPTY_STATE_TEXT: &str = "No tasks to show.";
const EMPTY_NOTES_TEXT: &str = "(empty)";

/// One task as displayed in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub description: String,
    pub completed: bool,
    pub created_label: String,
}

impl From<Task> for TaskRow {
    fn from(task: Task) -> Self {
        Self {
            created_label: format_created_at(task.created_at),
            id: task.id,
            description: task.description,
            completed: task.completed,
        }
    }
}

/// Snapshot of everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub filter: Filter,
    pub tasks: Vec<TaskRow>,
    pub stats: TaskStats,
    pub notes_content: String,
    pub notes_status: String,
}

impl DashboardView {
    /// True when the current filter shows no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task list, empty-state line and stats.
    pub fn tasks_section(&self) -> String {
        TasksSection(self).to_string()
    }

    /// Notes text followed by its save status.
    pub fn notes_section(&self) -> String {
        NotesSection(self).to_string()
    }
}

struct TasksSection<'a>(&'a DashboardView);

impl Display for TasksSection<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let view = self.0;
        writeln!(f, "Tasks (filter: {})", view.filter)?;
        if view.is_empty() {
            writeln!(f, "  {EMPTY_STATE_TEXT}")?;
        }
        for row in &view.tasks {
            let check = if row.completed { "✓" } else { " " };
            writeln!(f, "  [{check}] {}", row.description)?;
            writeln!(f, "      id={}  {}", row.id, row.created_label)?;
        }
        write!(
            f,
            "Total: {}  Completed: {}  Pending: {}",
            view.stats.total, view.stats.completed, view.stats.pending
        )
    }
}

struct NotesSection<'a>(&'a DashboardView);

impl Display for NotesSection<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let view = self.0;
        let content = if view.notes_content.is_empty() {
            EMPTY_NOTES_TEXT
        } else {
            view.notes_content.as_str()
        };
        write!(f, "Notes\n{content}\n{}", view.notes_status)
    }
}

impl Display for DashboardView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n\n{}", TasksSection(self), NotesSection(self))
    }
}
