//! Interactive template designer.
//!
//! Each designer session holds one in-memory `Layout` owned by the login
//! session that opened it. Edits stay in memory until an explicit save.

pub mod handlers;
pub mod session;
pub mod store;

use thiserror::Error;
use uuid::Uuid;

use crate::layout::LayoutError;

pub use session::{DesignerOp, DesignerSession, DesignerSessionView};
pub use store::DesignerSessions;

/// Name given to a template opened fresh in the designer.
pub const UNTITLED_TEMPLATE: &str = "Untitled Template";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignerError {
    #[error("Designer session {0} not found")]
    SessionNotFound(Uuid),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Template name cannot be empty")]
    EmptyName,

    #[error("Unknown placeholder '{0}'")]
    UnknownPlaceholder(String),
}
