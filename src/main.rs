//! Dialog Broker Demo
//!
//! Headless driver that exercises every public path of the broker: a direct
//! request, the intercepted ambient confirm/alert calls, and restore. A
//! spawned responder task stands in for the host view: it watches the dialog
//! state and answers after a delay according to the chosen policy.
//!
//! # Usage
//!
//! ```bash
//! dialog-broker
//! dialog-broker --answer cancel --delay-ms 200
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dialog_broker::{AmbientPrompts, Answer, DialogBroker, DialogRequest, PromptInterceptor};

#[derive(Parser, Debug)]
#[command(name = "dialog-broker")]
#[command(about = "Headless demo driver for the dialog broker")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// How the stand-in view answers dismissible dialogs
    #[arg(long, value_enum, default_value_t = AnswerPolicy::Confirm)]
    answer: AnswerPolicy,

    /// Delay before the stand-in view answers, in milliseconds
    #[arg(long, default_value = "50")]
    delay_ms: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AnswerPolicy {
    Confirm,
    Cancel,
}

/// Stand-in for the host view: answers each dialog that opens.
/// Acknowledge-only dialogs are always confirmed; there is no other way to
/// settle them.
fn spawn_responder(broker: DialogBroker, policy: AnswerPolicy, delay: Duration) {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let state = broker.state();
            if !state.is_open {
                continue;
            }
            info!(
                "view: dialog open kind={:?} title={:?} message={:?}",
                state.kind, state.title, state.message
            );
            tokio::time::sleep(delay).await;
            match policy {
                AnswerPolicy::Confirm => broker.confirm(),
                AnswerPolicy::Cancel if state.dismissible() => broker.cancel(),
                AnswerPolicy::Cancel => broker.confirm(),
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting dialog broker demo v{}", env!("CARGO_PKG_VERSION"));

    let broker = DialogBroker::new();
    spawn_responder(broker.clone(), args.answer, Duration::from_millis(args.delay_ms));

    // Direct request path.
    let answer = broker.request_confirmation(
        DialogRequest::new("Delete item?", "This cannot be undone")
            .confirm_label("Delete")
            .cancel_label("Keep"),
    );
    info!("direct request answered: {}", answer.await?);

    // Ambient interception path. The host starts with native fallbacks that
    // answer immediately without showing a dialog.
    let mut prompts = AmbientPrompts::new(
        Arc::new(|msg: &str| {
            info!("native confirm (no dialog): {}", msg);
            Ok(Answer::settled(true))
        }),
        Arc::new(|msg: &str| {
            info!("native alert (no dialog): {}", msg);
            Ok(Answer::settled(true))
        }),
    );

    let mut interceptor = PromptInterceptor::new();
    interceptor.install(&mut prompts, broker.handle())?;

    let confirmed = prompts.confirm("Remove this vehicle from the fleet?")?.await?;
    info!("ambient confirm answered: {}", confirmed);

    let acknowledged = prompts.alert("Your changes were saved")?.await?;
    info!("ambient alert acknowledged: {}", acknowledged);

    println!(
        "{}",
        serde_json::to_string_pretty(&broker.state())?
    );

    interceptor.restore(&mut prompts)?;

    // Back on the native fallback: answers without opening a dialog.
    let native = prompts.confirm("still intercepted?")?.await?;
    info!("post-restore confirm answered: {}", native);

    Ok(())
}
