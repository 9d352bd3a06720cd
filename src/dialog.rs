//! Dialog Types
//!
//! Defines the request/state data model shared by the controller and the host view.

use serde::{Deserialize, Serialize};

/// Semantic dialog variant. Selects icon and button layout on the view side;
/// the controller itself only cares about label presence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    #[default]
    Confirm,
    Alert,
    Warning,
    Info,
}

/// A single dialog request. Immutable once built; a new request replaces the
/// previous one wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogRequest {
    /// Semantic variant (defaults to confirm)
    pub kind: DialogKind,
    /// Dialog title
    pub title: String,
    /// Main prompt/question
    pub message: String,
    /// Label for the affirmative button
    pub confirm_label: String,
    /// Label for the negative button. `None` means a single-button
    /// alert-style dialog with no cancel or dismiss path.
    pub cancel_label: Option<String>,
}

impl DialogRequest {
    /// New confirm-kind request with the default "Confirm" button and no
    /// cancel path. Use the builder setters to add one.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Confirm,
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".to_string(),
            cancel_label: None,
        }
    }

    pub fn kind(mut self, kind: DialogKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }

    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }

    /// Request shape used when intercepting the ambient blocking `confirm`.
    pub fn ambient_confirm(message: impl Into<String>) -> Self {
        Self::new("Confirm", message)
            .confirm_label("OK")
            .cancel_label("Cancel")
    }

    /// Request shape used when intercepting the ambient blocking `alert`:
    /// acknowledge-only, no cancel path.
    pub fn ambient_alert(message: impl Into<String>) -> Self {
        Self::new("Alert", message)
            .kind(DialogKind::Alert)
            .confirm_label("OK")
    }

    /// Whether this dialog has a negative/dismiss path at all.
    pub fn dismissible(&self) -> bool {
        self.cancel_label.is_some()
    }
}

/// View-facing snapshot of the current dialog. Single source of truth for
/// what is rendered; mutated only by the controller.
#[derive(Debug, Clone, Serialize, Default)]
pub struct DialogState {
    /// Whether a dialog is currently displayed
    pub is_open: bool,
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: Option<String>,
}

impl DialogState {
    pub(crate) fn open(request: &DialogRequest) -> Self {
        Self {
            is_open: true,
            kind: request.kind,
            title: request.title.clone(),
            message: request.message.clone(),
            confirm_label: request.confirm_label.clone(),
            cancel_label: request.cancel_label.clone(),
        }
    }

    /// Whether the displayed dialog has a negative/dismiss path.
    pub fn dismissible(&self) -> bool {
        self.cancel_label.is_some()
    }
}
