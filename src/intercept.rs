//! Ambient Prompt Interception
//!
//! The host environment owns two ambient prompt functions (`confirm`,
//! `alert`) that legacy call sites invoke directly. [`PromptInterceptor`]
//! temporarily replaces both so those call sites route through the dialog
//! broker, and restores the saved originals verbatim afterwards.
//!
//! The interceptor is plain data injected by the host at startup. It never
//! self-activates, and every `install` must be paired with exactly one
//! `restore` so an intercepted function cannot leak past its owner.

use std::sync::Arc;

use tracing::info;

use crate::broker::{Answer, DialogHandle};
use crate::dialog::DialogRequest;
use crate::error::DialogError;

/// Ambient confirm function slot. Returns a pending [`Answer`] instead of a
/// synchronous boolean; blocking-style callers must await it.
pub type ConfirmFn = Arc<dyn Fn(&str) -> Result<Answer, DialogError> + Send + Sync>;

/// Ambient alert function slot. The answer resolves once acknowledged.
pub type AlertFn = Arc<dyn Fn(&str) -> Result<Answer, DialogError> + Send + Sync>;

/// Host-owned registry of the two ambient prompt functions.
pub struct AmbientPrompts {
    confirm: ConfirmFn,
    alert: AlertFn,
}

impl AmbientPrompts {
    pub fn new(confirm: ConfirmFn, alert: AlertFn) -> Self {
        Self { confirm, alert }
    }

    /// Invoke the current ambient confirm function.
    pub fn confirm(&self, message: &str) -> Result<Answer, DialogError> {
        (self.confirm)(message)
    }

    /// Invoke the current ambient alert function.
    pub fn alert(&self, message: &str) -> Result<Answer, DialogError> {
        (self.alert)(message)
    }
}

/// Saved pre-install function values, held as plain data between the
/// install/restore pair.
struct SavedPrompts {
    confirm: ConfirmFn,
    alert: AlertFn,
}

/// Installable interception strategy over an [`AmbientPrompts`] registry.
#[derive(Default)]
pub struct PromptInterceptor {
    saved: Option<SavedPrompts>,
}

impl PromptInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_installed(&self) -> bool {
        self.saved.is_some()
    }

    /// Save the current ambient functions and swap in interceptors that
    /// route through the broker: confirm becomes a confirm-kind dialog with
    /// "OK"/"Cancel", alert an acknowledge-only dialog with "OK".
    pub fn install(
        &mut self,
        prompts: &mut AmbientPrompts,
        handle: DialogHandle,
    ) -> Result<(), DialogError> {
        if self.saved.is_some() {
            return Err(DialogError::AlreadyInstalled);
        }

        self.saved = Some(SavedPrompts {
            confirm: prompts.confirm.clone(),
            alert: prompts.alert.clone(),
        });

        let confirm_handle = handle.clone();
        prompts.confirm = Arc::new(move |message: &str| {
            confirm_handle.request_confirmation(DialogRequest::ambient_confirm(message))
        });
        prompts.alert = Arc::new(move |message: &str| {
            handle.request_confirmation(DialogRequest::ambient_alert(message))
        });

        info!("ambient prompts intercepted");
        Ok(())
    }

    /// Put the saved originals back verbatim (same function values by
    /// identity), whether or not a dialog is open at the time.
    pub fn restore(&mut self, prompts: &mut AmbientPrompts) -> Result<(), DialogError> {
        let saved = self.saved.take().ok_or(DialogError::NotInstalled)?;
        prompts.confirm = saved.confirm;
        prompts.alert = saved.alert;

        info!("ambient prompts restored");
        Ok(())
    }
}
