//! Error type shared by the layout engine and the editor panels.

use crate::types::InstanceId;
use thiserror::Error;

/// Failures surfaced by layout commands and panel initialization.
///
/// None of these are fatal: callers log them and carry on with the
/// operation turned into a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The catalog has no constructor registered under this type name.
    #[error("unknown component type: {0}")]
    UnknownType(String),
    /// A panel mount point required at startup is absent.
    #[error("missing collaborator: {0} has no mount point")]
    MissingCollaborator(&'static str),
    /// The instance was removed (or never existed).
    #[error("no placed instance with id {0}")]
    UnknownInstance(InstanceId),
    /// Geometry edits are only accepted in edit mode.
    #[error("layout is frozen while in play mode")]
    LayoutFrozen,
}
