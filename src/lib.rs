//! Dialog Broker Library
//!
//! Single authority for confirmation/alert/warning/info dialogs: callers request
//! a dialog and await a one-shot boolean answer; the host view reads the current
//! [`DialogState`] and feeds confirm/cancel events back. An installable
//! interceptor can temporarily replace the host's ambient blocking `confirm`/
//! `alert` functions so legacy call sites route through the same mechanism.

pub mod broker;
pub mod dialog;
pub mod error;
pub mod intercept;

pub use broker::{Answer, DialogBroker, DialogController, DialogHandle};
pub use dialog::{DialogKind, DialogRequest, DialogState};
pub use error::{Abandoned, DialogError};
pub use intercept::{AlertFn, AmbientPrompts, ConfirmFn, PromptInterceptor};
