//! Client-side references to server-resident resources.

use serde::{Deserialize, Serialize};

/// Reference to a dataset (frame) living on the remote service.
///
/// The client never owns the data; the handle only carries the key and,
/// when resolved through the service, the column labels. Deserializes from a
/// bare key string or from `{"key": .., "columns": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "HandleRepr")]
pub struct DatasetHandle {
    /// Frame key on the service
    pub key: String,
    /// Column labels, empty when unknown
    pub columns: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HandleRepr {
    Key(String),
    Full {
        key: String,
        #[serde(default)]
        columns: Vec<String>,
    },
}

impl From<HandleRepr> for DatasetHandle {
    fn from(repr: HandleRepr) -> Self {
        match repr {
            HandleRepr::Key(key) => DatasetHandle::new(key),
            HandleRepr::Full { key, columns } => DatasetHandle::with_columns(key, columns),
        }
    }
}

impl DatasetHandle {
    /// Create a handle from a bare key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            columns: Vec::new(),
        }
    }

    /// Create a handle with known column labels.
    pub fn with_columns(key: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            key: key.into(),
            columns,
        }
    }

    /// Frame key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the column labels were resolved.
    pub fn has_columns(&self) -> bool {
        !self.columns.is_empty()
    }
}

impl From<&str> for DatasetHandle {
    fn from(key: &str) -> Self {
        DatasetHandle::new(key)
    }
}

impl From<String> for DatasetHandle {
    fn from(key: String) -> Self {
        DatasetHandle::new(key)
    }
}

impl std::fmt::Display for DatasetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// Identifier of a model trained on the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelHandle {
    pub id: String,
}

impl ModelHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
