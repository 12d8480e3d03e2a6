use std::time::Duration;

use avdash_core::{
    ActionChain, ChainEffect, ChainEvent, ChainOutcome, ChainStep, LibrarySnapshot,
};
use dash_logging::{dash_info, dash_warn};
use tokio_util::sync::CancellationToken;

use crate::{ClientError, Controller};

/// Terminal result of a chain run that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("{step:?} failed to start: {message}")]
    StartFailed { step: ChainStep, message: String },
    #[error("chain cancelled")]
    Cancelled,
    /// The success path's library refresh failed; the chain itself completed.
    #[error("library refresh failed: {0}")]
    RefreshFailed(ClientError),
}

/// Drives the strip-tags-then-rescan chain to completion as one task.
///
/// The FSM decides, this loop merely executes its effects: start requests,
/// status polls on a fixed interval, and the final library refresh. A strict
/// sequence; a start failure at either step halts the chain and the operator
/// must re-trigger manually. Cancellation stops polling without touching the
/// remote processes (the chain only ever reads their status).
pub async fn run_chain(
    controller: &dyn Controller,
    poll_interval: Duration,
    cancel: &CancellationToken,
) -> Result<LibrarySnapshot, ChainError> {
    let mut chain = ActionChain::new();
    let mut pending = chain.advance(ChainEvent::Triggered);

    while let Some(effect) = pending.pop() {
        if cancel.is_cancelled() {
            return Err(ChainError::Cancelled);
        }
        let event = match effect {
            ChainEffect::StartAction(step) => {
                dash_info!("chain: starting {}", step.action_name());
                match controller.start_action(step.action_name()).await {
                    Ok(()) => ChainEvent::StartAcked,
                    Err(err) => ChainEvent::StartFailed(err.to_string()),
                }
            }
            ChainEffect::PollAction(step) => {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(ChainError::Cancelled),
                    _ = tokio::time::sleep(poll_interval) => {}
                }
                match controller.action_status(step.action_name()).await {
                    Ok(status) => ChainEvent::Polled {
                        running: status.is_running(),
                    },
                    Err(err) => {
                        // Transient poll failure: treat as still running and
                        // check again next tick.
                        dash_warn!("chain: status poll for {} failed: {err}", step.action_name());
                        ChainEvent::Polled { running: true }
                    }
                }
            }
            ChainEffect::FetchLibrary => {
                dash_info!("chain: completed, refreshing library snapshot");
                return controller
                    .library_snapshot()
                    .await
                    .map_err(ChainError::RefreshFailed);
            }
        };
        pending = chain.advance(event);
    }

    match chain.last_outcome() {
        Some(ChainOutcome::Failed(step, message)) => Err(ChainError::StartFailed {
            step: *step,
            message: message.clone(),
        }),
        // The FSM only runs out of effects with a recorded outcome; treat
        // anything else as cancellation-equivalent.
        _ => Err(ChainError::Cancelled),
    }
}
