//! Derived views over the task collection
//!
//! Everything here is a pure function of the collection, the status filter
//! and the search text. Nothing is cached; callers recompute on every render.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::task::Task;

/// Status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Filter options in display order
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(Error::UnknownFilter(other.to_string())),
        }
    }
}

/// Case-insensitive substring match on title and description.
/// An empty search matches everything.
pub fn matches_search(task: &Task, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    task.search_haystack().contains(&search.to_lowercase())
}

/// Aggregate counts over the whole collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }

    /// Count shown next to a filter option
    pub fn for_filter(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Active => self.active,
            Filter::Completed => self.completed,
        }
    }
}

/// Message shown when nothing is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
}

impl EmptyState {
    pub const NO_MATCH: EmptyState = EmptyState {
        title: "No tasks match your search",
        subtitle: None,
    };
    pub const CAUGHT_UP: EmptyState = EmptyState {
        title: "All caught up!",
        subtitle: None,
    };
    pub const NONE_COMPLETED: EmptyState = EmptyState {
        title: "No completed tasks yet",
        subtitle: None,
    };
    pub const EMPTY_LIST: EmptyState = EmptyState {
        title: "Your task list is empty",
        subtitle: Some("Add a task above to get started"),
    };

    /// Search text takes priority over the filter.
    pub fn select(filter: Filter, search: &str) -> Self {
        if !search.is_empty() {
            return Self::NO_MATCH;
        }
        match filter {
            Filter::Active => Self::CAUGHT_UP,
            Filter::Completed => Self::NONE_COMPLETED,
            Filter::All => Self::EMPTY_LIST,
        }
    }
}

/// Everything a render needs
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<'a> {
    pub visible: Vec<&'a Task>,
    pub counts: TaskCounts,
    /// Set only when `visible` is empty
    pub empty_state: Option<EmptyState>,
}

/// Tasks passing both the filter and the search, in collection order.
pub fn visible<'a>(tasks: &'a [Task], filter: Filter, search: &str) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| filter.matches(t) && matches_search(t, search))
        .collect()
}

pub fn project<'a>(tasks: &'a [Task], filter: Filter, search: &str) -> Projection<'a> {
    let visible = visible(tasks, filter, search);
    let empty_state = visible
        .is_empty()
        .then(|| EmptyState::select(filter, search));

    Projection {
        visible,
        counts: TaskCounts::of(tasks),
        empty_state,
    }
}
