//! Lifecycle shared by the playback routines.

/// Where a playback routine is in its lifecycle.
///
/// ```text
/// Resolving -> Playing -> Finished
///     \           \
///      +-----------+--> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackPhase {
    /// Waiting for the resolver thread to provide a local path.
    #[default]
    Resolving,
    /// Advancing one data frame per ticker fire.
    Playing,
    /// Every frame was shown.
    Finished,
    /// Stopped on an error; the status text explains why.
    Failed,
}

impl PlaybackPhase {
    /// True once the routine will never advance again.
    pub fn is_done(&self) -> bool {
        matches!(self, PlaybackPhase::Finished | PlaybackPhase::Failed)
    }
}
