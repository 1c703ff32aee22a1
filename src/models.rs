use std::fmt;

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub description: String,
}

impl Task {
    pub fn new(id: i64, description: impl Into<String>) -> Self {
        Task {
            id,
            description: description.into(),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.id, self.description)
    }
}

/// Render tasks as an ordered list of `(id, description)` pairs
pub fn format_listing(tasks: &[Task]) -> String {
    let pairs = tasks
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{pairs}]")
}
