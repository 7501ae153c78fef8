use std::fmt;

/// Why a single branch of a fan-out produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchFailure {
    Transport(String),
    Decode(String),
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchFailure::Transport(msg) => write!(f, "transport: {}", msg),
            BatchFailure::Decode(msg) => write!(f, "decode: {}", msg),
        }
    }
}

/// Outcome of one outbound request in a fan-out group.
///
/// `label` identifies the branch (page number, genre name, feed name) for
/// logging and for grouping rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchBatch<T> {
    pub label: String,
    pub page: Option<u32>,
    pub outcome: Result<Vec<T>, BatchFailure>,
}

impl<T> FetchBatch<T> {
    pub fn ok(label: impl Into<String>, page: Option<u32>, items: Vec<T>) -> Self {
        Self {
            label: label.into(),
            page,
            outcome: Ok(items),
        }
    }

    pub fn failed(label: impl Into<String>, page: Option<u32>, failure: BatchFailure) -> Self {
        Self {
            label: label.into(),
            page,
            outcome: Err(failure),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Items of a successful batch; a failed batch yields none.
    pub fn into_items(self) -> Vec<T> {
        self.outcome.unwrap_or_default()
    }
}
