//! Messages exchanged with the resolver worker thread.

use std::path::PathBuf;

use bevy_ecs::message::Message;

use crate::content::ResolveError;

/// Commands sent *to* the resolver thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveCmd {
    /// Resolve a logical results file name to a local path.
    Resolve { name: String },
    Shutdown,
}

/// Replies sent *back* from the resolver thread.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum ResolveMessage {
    Resolved { name: String, path: PathBuf },
    Failed { name: String, error: ResolveError },
}

impl ResolveMessage {
    /// Logical name this reply answers.
    pub fn name(&self) -> &str {
        match self {
            ResolveMessage::Resolved { name, .. } | ResolveMessage::Failed { name, .. } => name,
        }
    }
}
