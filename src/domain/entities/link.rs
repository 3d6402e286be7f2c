//! Link entity representing a shortened URL mapping.

/// A short ID mapped to its destination URL.
///
/// Links are created once and never updated or deleted by the service.
/// A destination stored empty is treated as absent on lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub destination: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
        }
    }

    /// Returns true if there is nothing to redirect to.
    pub fn is_empty(&self) -> bool {
        self.destination.is_empty()
    }
}
