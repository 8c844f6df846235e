use crate::resource::ResourceKind;

/// One resource reported by a backing service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub identifier: String,
    pub state: Option<String>,
}

impl InventoryEntry {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            state: None,
        }
    }

    pub fn with_state(identifier: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            state: Some(state.into()),
        }
    }
}

/// Raw listing returned by a backing service for one kind and scope.
/// An empty listing is a valid answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub kind: ResourceKind,
    pub scope: String,
    pub entries: Vec<InventoryEntry>,
}

impl ProbeResult {
    pub fn new(kind: ResourceKind, scope: impl Into<String>, entries: Vec<InventoryEntry>) -> Self {
        Self {
            kind,
            scope: scope.into(),
            entries,
        }
    }

    pub fn from_identifiers<I, S>(kind: ResourceKind, scope: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(kind, scope, ids.into_iter().map(InventoryEntry::new).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.identifier == identifier)
    }

    pub fn find(&self, identifier: &str) -> Option<&InventoryEntry> {
        self.entries
            .iter()
            .find(|entry| entry.identifier == identifier)
    }

    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a InventoryEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.identifier.starts_with(prefix))
    }
}
