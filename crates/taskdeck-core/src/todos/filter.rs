//! Pure filtering over a todo list.

use std::str::FromStr;

use crate::api::types::Todo;

/// Which completion states to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    /// Only items not yet completed.
    Active,
    /// Only completed items.
    Completed,
}

impl StatusFilter {
    fn matches(self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!(
                "unknown status filter '{other}' (expected all, active, or completed)"
            )),
        }
    }
}

/// Return the items whose title case-insensitively contains `search` and
/// which match the status predicate, in their original order. The input
/// is left untouched.
pub fn filter_todos(todos: &[Todo], status: StatusFilter, search: &str) -> Vec<Todo> {
    let needle = search.to_lowercase();
    todos
        .iter()
        .filter(|todo| todo.title.to_lowercase().contains(&needle) && status.matches(todo))
        .cloned()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
