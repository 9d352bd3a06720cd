//! Error types for dialog-broker

use thiserror::Error;

/// Errors surfaced by the broker and the prompt interceptor.
///
/// All of these are programmer-sequencing errors: they are reported
/// immediately and are not retried or swallowed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogError {
    #[error("dialog broker is not initialized - handle outlived its provider")]
    NoProvider,

    #[error("ambient prompts are already intercepted - restore before installing again")]
    AlreadyInstalled,

    #[error("ambient prompts are not intercepted - nothing to restore")]
    NotInstalled,
}

/// The request behind an [`Answer`](crate::Answer) was superseded by a newer
/// request before the user answered it. The dialog system never settles a
/// superseded answer with a boolean; it reports abandonment instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("dialog request was superseded before it was answered")]
pub struct Abandoned;
