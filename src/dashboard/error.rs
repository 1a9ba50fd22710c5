use thiserror::Error;

/// What a [`DashboardError::NotFound`] failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Kind,
    Instance,
}

impl Missing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Missing::Kind => "widget kind",
            Missing::Instance => "widget instance",
        }
    }
}

/// Errors reported by the dashboard engine.
///
/// A failed mutation never leaves the layout partially applied; the caller
/// always sees the state from before the call.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The kind is already registered, or already placed on the grid.
    #[error("widget kind '{0}' already exists")]
    DuplicateKind(String),

    #[error("{} '{id}' not found", .what.as_str())]
    NotFound { what: Missing, id: String },

    #[error("cannot place widget: {0}")]
    Placement(String),

    /// Structural edits are only accepted while customizing.
    #[error("layout can only be changed while customizing")]
    InvalidMode,

    #[error("invalid layout snapshot: {0}")]
    Serialization(String),

    /// Returned by `validate` when live state breaks a layout invariant.
    #[error("layout invariant violated: {0}")]
    Invariant(String),

    #[error("failed to persist layout")]
    Persistence(#[source] anyhow::Error),
}

impl DashboardError {
    pub fn kind_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            what: Missing::Kind,
            id: id.into(),
        }
    }

    pub fn instance_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            what: Missing::Instance,
            id: id.into(),
        }
    }
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_target() {
        let err = DashboardError::instance_not_found("abc");
        assert_eq!(err.to_string(), "widget instance 'abc' not found");
        let err = DashboardError::kind_not_found("weather");
        assert_eq!(err.to_string(), "widget kind 'weather' not found");
    }

    #[test]
    fn persistence_keeps_source() {
        let err = DashboardError::Persistence(anyhow::anyhow!("disk full"));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("disk full"));
    }
}
