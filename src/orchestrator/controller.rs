//! Submission lifecycle controller.
//!
//! Owns start/settle orchestration and emits events for presentation layers.

use crate::engine::{self, SubmitEngine};
use crate::model::{now_rfc3339, AnalysisResult, SubmitConfig, SubmitError, SubmitEvent};
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI layers to control submissions.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    Submit,
    Quit,
}

/// Internal handle for an in-flight submission task.
struct RunCtx {
    handle: Option<tokio::task::JoinHandle<Result<AnalysisResult, SubmitError>>>,
}

/// Spawn a submission task and return its handle.
fn start_submission(cfg: &SubmitConfig, event_tx: UnboundedSender<SubmitEvent>) -> RunCtx {
    let engine = SubmitEngine::new(cfg.clone());
    let handle = tokio::spawn(async move { engine.run(event_tx).await });
    RunCtx {
        handle: Some(handle),
    }
}

/// Validate before touching the network. A validation failure is local and
/// non-fatal: it is surfaced immediately and the lifecycle state never moves.
fn try_start_submission(
    cfg: &SubmitConfig,
    event_tx: &UnboundedSender<SubmitEvent>,
) -> Option<RunCtx> {
    if let Err(e) = engine::validate(&cfg.resume, &cfg.job_description) {
        let _ = event_tx.send(SubmitEvent::Info(e.to_string()));
        return None;
    }
    Some(start_submission(cfg, event_tx.clone()))
}

/// Orchestrate submissions based on UI commands and emit events back to
/// presentation layers.
pub(crate) async fn run_controller(
    cfg: &SubmitConfig,
    submit_on_launch: bool,
    event_tx: UnboundedSender<SubmitEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut run_ctx = if submit_on_launch {
        try_start_submission(cfg, &event_tx)
    } else {
        None
    };
    let mut quit_pending = false;

    let res = loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Submit) => {
                        // At most one request in flight. The affordance is
                        // disabled while Submitting, so an overlapping Submit
                        // should not be reachable; drop it if it is.
                        if run_ctx.is_none() {
                            run_ctx = try_start_submission(cfg, &event_tx);
                        }
                    }
                    Some(UiCommand::Quit) | None => {
                        // No cancellation exists: quit waits for the in-flight
                        // submission to settle before finalizing.
                        if run_ctx.is_none() {
                            break Ok(());
                        }
                        quit_pending = true;
                    }
                }
            }
            // Do not take the JoinHandle before this branch wins; otherwise it
            // can be dropped if another select branch is chosen, and we'll
            // never observe completion.
            maybe_done = async {
                if let Some(ctx) = &mut run_ctx {
                    if let Some(h) = ctx.handle.as_mut() {
                        return Some(h.await);
                    }
                }
                futures::future::pending().await
            } => {
                if let Some(join_res) = maybe_done {
                    if let Some(ctx) = &mut run_ctx {
                        ctx.handle.take();
                    }
                    // Every path settles exactly once, task panics included,
                    // so front-ends always get their affordance back.
                    match join_res {
                        Ok(Ok(result)) => {
                            let _ = event_tx.send(SubmitEvent::Completed {
                                result: Box::new(result),
                                analyzed_at: now_rfc3339(),
                            });
                        }
                        Ok(Err(error)) => {
                            let _ = event_tx.send(SubmitEvent::Failed { error });
                        }
                        Err(e) => {
                            let _ = event_tx.send(SubmitEvent::Failed {
                                error: SubmitError::Network(format!(
                                    "submission task failed: {e}"
                                )),
                            });
                        }
                    }
                    run_ctx = None;
                    if quit_pending {
                        break Ok(());
                    }
                }
            }
        }
    };

    res
}
