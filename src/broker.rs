//! Dialog Broker Core
//!
//! Owns the CLOSED/OPEN dialog state machine, the single pending answer slot,
//! and the provider/handle pair the host tree uses to request dialogs.
//!
//! One dialog is observable at a time. A request arriving while another is
//! still unanswered wins the display; the superseded caller's [`Answer`]
//! reports [`Abandoned`] rather than ever being settled with a boolean.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Weak};
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, warn};

use crate::dialog::{DialogRequest, DialogState};
use crate::error::{Abandoned, DialogError};

/// Caller-held future for one dialog answer.
///
/// Resolves to `Ok(true)` on the affirmative action, `Ok(false)` on the
/// negative/dismiss action (or on provider teardown), and `Err(Abandoned)`
/// if the request was superseded before the user answered.
#[derive(Debug)]
pub struct Answer {
    rx: oneshot::Receiver<bool>,
}

impl Answer {
    /// Non-blocking poll for hosts that pump their own event loop.
    /// `Ok(None)` means still pending.
    pub fn try_recv(&mut self) -> Result<Option<bool>, Abandoned> {
        match self.rx.try_recv() {
            Ok(answer) => Ok(Some(answer)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => Err(Abandoned),
        }
    }

    /// Block the current (non-runtime) thread until the answer arrives.
    pub fn blocking_recv(self) -> Result<bool, Abandoned> {
        self.rx.blocking_recv().map_err(|_| Abandoned)
    }

    /// Already-settled answer, for ambient prompt functions that answer
    /// without showing a dialog (native fallbacks, test doubles).
    pub fn settled(answer: bool) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(answer);
        Self { rx }
    }
}

impl Future for Answer {
    type Output = Result<bool, Abandoned>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(answer)) => Poll::Ready(Ok(answer)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(Abandoned)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Single-use answer slot. At most one armed slot exists per controller.
///
/// `settle` checks presence before acting and clears itself after acting, so
/// duplicate UI events (double-click on Confirm) are silent no-ops.
#[derive(Debug, Default)]
struct PendingAnswer {
    id: u64,
    tx: Option<oneshot::Sender<bool>>,
}

impl PendingAnswer {
    fn armed(id: u64, tx: oneshot::Sender<bool>) -> Self {
        Self { id, tx: Some(tx) }
    }

    fn is_armed(&self) -> bool {
        self.tx.is_some()
    }

    fn id(&self) -> u64 {
        self.id
    }

    /// Settle the outstanding answer exactly once. Returns whether this call
    /// was the one that settled it.
    fn settle(&mut self, answer: bool) -> bool {
        match self.tx.take() {
            Some(tx) => {
                // A receiver dropped by the caller still counts as settled.
                let _ = tx.send(answer);
                true
            }
            None => false,
        }
    }
}

/// The dialog state machine. States: CLOSED, OPEN.
///
/// Invariant: `state.is_open` is true exactly while an armed, unsettled
/// [`PendingAnswer`] exists.
#[derive(Debug, Default)]
pub struct DialogController {
    state: DialogState,
    pending: PendingAnswer,
    next_id: u64,
}

impl DialogController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current view snapshot.
    pub fn state(&self) -> &DialogState {
        &self.state
    }

    /// Issue a new dialog request. CLOSED -> OPEN, or OPEN -> OPEN replacing
    /// the displayed dialog. Last request wins: a still-armed slot is dropped
    /// unsettled and its answer reports [`Abandoned`].
    pub fn request(&mut self, request: DialogRequest) -> Answer {
        let id = self.next_id;
        self.next_id += 1;

        if self.pending.is_armed() {
            warn!(
                "dialog request id={} supersedes unanswered id={}",
                id,
                self.pending.id()
            );
        }

        let (tx, rx) = oneshot::channel();
        self.pending = PendingAnswer::armed(id, tx);
        self.state = DialogState::open(&request);
        debug!("dialog opened id={} kind={:?} title={:?}", id, request.kind, request.title);

        Answer { rx }
    }

    /// Affirmative action: settle `true`, then close. No-op if nothing is
    /// pending (duplicate click after the dialog already closed).
    pub fn confirm(&mut self) {
        if self.pending.settle(true) {
            debug!("dialog id={} confirmed", self.pending.id());
            self.state.is_open = false;
        }
    }

    /// Negative action, covering both the cancel button and backdrop/close
    /// dismissal: settle `false`, then close.
    ///
    /// Inert while the open dialog has no cancel label: single-button dialogs
    /// have no negative path and the answer stays pending until `confirm`.
    pub fn cancel(&mut self) {
        if self.state.is_open && !self.state.dismissible() {
            return;
        }
        if self.pending.settle(false) {
            debug!("dialog id={} cancelled", self.pending.id());
            self.state.is_open = false;
        }
    }
}

impl Drop for DialogController {
    fn drop(&mut self) {
        // A dialog still open at teardown answers negative rather than
        // leaving the caller's future pending forever.
        if self.pending.settle(false) {
            warn!(
                "dialog id={} still open at teardown, answered false",
                self.pending.id()
            );
            self.state.is_open = false;
        }
    }
}

/// Shared provider owned by the host application root.
///
/// Cloning shares the same controller; the controller tears down when the
/// last clone drops.
#[derive(Debug, Clone, Default)]
pub struct DialogBroker {
    inner: Arc<Mutex<DialogController>>,
}

impl DialogBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accessor handed to arbitrary host code. Outlives the provider only in
    /// the failing sense: requests through a stale handle report
    /// [`DialogError::NoProvider`].
    pub fn handle(&self) -> DialogHandle {
        DialogHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Request a dialog and receive the pending [`Answer`].
    pub fn request_confirmation(&self, request: DialogRequest) -> Answer {
        self.inner.lock().unwrap().request(request)
    }

    /// View event: affirmative button activated.
    pub fn confirm(&self) {
        self.inner.lock().unwrap().confirm();
    }

    /// View event: negative button, backdrop, or close icon activated.
    pub fn cancel(&self) {
        self.inner.lock().unwrap().cancel();
    }

    /// Snapshot of the current dialog state for rendering.
    pub fn state(&self) -> DialogState {
        self.inner.lock().unwrap().state().clone()
    }
}

/// Weak accessor yielding `request_confirmation` to the host tree.
#[derive(Debug, Clone)]
pub struct DialogHandle {
    inner: Weak<Mutex<DialogController>>,
}

impl DialogHandle {
    /// Request a dialog through the owning broker. Fails fast with
    /// [`DialogError::NoProvider`] once the provider is gone.
    pub fn request_confirmation(&self, request: DialogRequest) -> Result<Answer, DialogError> {
        let inner = self.inner.upgrade().ok_or(DialogError::NoProvider)?;
        let answer = inner.lock().unwrap().request(request);
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogKind;

    #[test]
    fn test_confirm_resolves_true() {
        let broker = DialogBroker::new();
        let mut answer = broker.request_confirmation(
            DialogRequest::new("Delete item?", "This cannot be undone")
                .confirm_label("Delete")
                .cancel_label("Keep"),
        );

        assert!(broker.state().is_open);
        assert_eq!(answer.try_recv(), Ok(None));

        broker.confirm();
        assert_eq!(answer.try_recv(), Ok(Some(true)));
        assert!(!broker.state().is_open);
    }

    #[test]
    fn test_cancel_resolves_false() {
        let broker = DialogBroker::new();
        let mut answer = broker.request_confirmation(
            DialogRequest::new("Delete item?", "This cannot be undone")
                .confirm_label("Delete")
                .cancel_label("Keep"),
        );

        broker.cancel();
        assert_eq!(answer.try_recv(), Ok(Some(false)));
        assert!(!broker.state().is_open);
    }

    #[test]
    fn test_duplicate_clicks_settle_once() {
        let broker = DialogBroker::new();
        let mut answer = broker.request_confirmation(
            DialogRequest::new("Apply?", "Apply all changes").cancel_label("Cancel"),
        );

        broker.confirm();
        broker.confirm();
        broker.cancel();

        // First settlement wins; the rest are no-ops.
        assert_eq!(answer.try_recv(), Ok(Some(true)));
        assert!(!broker.state().is_open);
    }

    #[test]
    fn test_single_button_dialog_ignores_dismissal() {
        let broker = DialogBroker::new();
        let mut answer = broker.request_confirmation(
            DialogRequest::new("Saved", "Your changes were saved")
                .kind(DialogKind::Info)
                .confirm_label("OK"),
        );

        // Backdrop/close/cancel are all inert without a cancel label.
        broker.cancel();
        assert!(broker.state().is_open);
        assert_eq!(answer.try_recv(), Ok(None));

        broker.confirm();
        assert_eq!(answer.try_recv(), Ok(Some(true)));
    }

    #[test]
    fn test_second_request_abandons_first() {
        let broker = DialogBroker::new();
        let mut first = broker.request_confirmation(
            DialogRequest::new("First", "first message").cancel_label("Cancel"),
        );
        let mut second = broker.request_confirmation(
            DialogRequest::new("Second", "second message").cancel_label("Cancel"),
        );

        // Only the second dialog is observable; the first answer is never
        // settled with a boolean.
        assert_eq!(broker.state().title, "Second");
        assert_eq!(first.try_recv(), Err(Abandoned));

        broker.confirm();
        assert_eq!(second.try_recv(), Ok(Some(true)));
    }

    #[test]
    fn test_teardown_answers_false() {
        let broker = DialogBroker::new();
        let mut answer = broker.request_confirmation(
            DialogRequest::new("Pending", "still open").cancel_label("Cancel"),
        );

        drop(broker);
        assert_eq!(answer.try_recv(), Ok(Some(false)));
    }

    #[test]
    fn test_stale_handle_fails_fast() {
        let broker = DialogBroker::new();
        let handle = broker.handle();
        drop(broker);

        let err = handle
            .request_confirmation(DialogRequest::new("Late", "provider is gone"))
            .unwrap_err();
        assert_eq!(err, DialogError::NoProvider);
    }

    #[test]
    fn test_handle_requests_through_broker() {
        let broker = DialogBroker::new();
        let handle = broker.handle();

        let mut answer = handle
            .request_confirmation(DialogRequest::ambient_confirm("Proceed?"))
            .unwrap();
        assert_eq!(broker.state().confirm_label, "OK");
        assert_eq!(broker.state().cancel_label.as_deref(), Some("Cancel"));

        broker.cancel();
        assert_eq!(answer.try_recv(), Ok(Some(false)));
    }

    #[test]
    fn test_open_iff_pending() {
        let broker = DialogBroker::new();
        assert!(!broker.state().is_open);

        let _answer = broker
            .request_confirmation(DialogRequest::new("A", "a").cancel_label("No"));
        assert!(broker.state().is_open);

        broker.cancel();
        assert!(!broker.state().is_open);

        // Events on a closed controller stay no-ops.
        broker.confirm();
        broker.cancel();
        assert!(!broker.state().is_open);
    }

    #[tokio::test]
    async fn test_answer_awaits_user_event() {
        let broker = DialogBroker::new();
        let answer = broker.request_confirmation(
            DialogRequest::new("Async", "await me").cancel_label("Cancel"),
        );

        let view = broker.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            view.confirm();
        });

        assert_eq!(answer.await, Ok(true));
    }
}
