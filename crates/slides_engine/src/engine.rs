use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use slides_core::SubmissionRequest;

use crate::submit::{ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{EngineError, EngineEvent, GenerationReceipt, SubmissionFailure, SubmissionId};

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        request: SubmissionRequest,
    },
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: SubmitSettings) -> Result<Self, EngineError> {
        let submitter = Arc::new(ReqwestSubmitter::new(settings)?);
        Self::with_submitter(submitter)
    }

    pub fn with_submitter(submitter: Arc<dyn Submitter>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("slides-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let submitter = submitter.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(submitter.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Fails with `EngineError::Stopped` when the worker thread is gone; no event will follow.
    pub fn submit(
        &self,
        submission_id: SubmissionId,
        request: SubmissionRequest,
    ) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Submit {
                submission_id,
                request,
            })
            .map_err(|_| {
                engine_warn!("Engine stopped; submission #{} not sent", submission_id);
                EngineError::Stopped
            })
    }

    /// `Ok(None)` on timeout, `Err(EngineError::Stopped)` once no event can ever arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Stopped),
        }
    }
}

async fn handle_command(
    submitter: &dyn Submitter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            submission_id,
            request,
        } => {
            let guard = SettlementGuard::new(submission_id, event_tx);
            let result = submitter.submit(submission_id, request).await;
            guard.settle(result);
        }
    }
}

/// Emits exactly one settlement event for an attempt.
///
/// Lives for the whole exchange. If the attempt ends without `settle` (panic,
/// dropped future) the drop emits a transport failure instead, so the UI is
/// always told the exchange is over.
pub(crate) struct SettlementGuard {
    submission_id: SubmissionId,
    event_tx: Option<mpsc::Sender<EngineEvent>>,
}

impl SettlementGuard {
    pub(crate) fn new(submission_id: SubmissionId, event_tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            submission_id,
            event_tx: Some(event_tx),
        }
    }

    pub(crate) fn settle(mut self, result: Result<GenerationReceipt, SubmissionFailure>) {
        match &result {
            Ok(receipt) => engine_info!(
                "Submission #{} settled with file {}",
                self.submission_id,
                receipt.file
            ),
            Err(failure) => engine_warn!("Submission #{} failed: {}", self.submission_id, failure),
        }
        self.emit(result);
    }

    fn emit(&mut self, result: Result<GenerationReceipt, SubmissionFailure>) {
        if let Some(event_tx) = self.event_tx.take() {
            let _ = event_tx.send(EngineEvent::SubmissionSettled {
                submission_id: self.submission_id,
                result,
            });
        }
    }
}

impl Drop for SettlementGuard {
    fn drop(&mut self) {
        if self.event_tx.is_some() {
            engine_warn!(
                "Submission #{} ended without an outcome",
                self.submission_id
            );
            self.emit(Err(SubmissionFailure::transport()));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use std::time::Duration;

    use slides_core::SubmissionRequest;

    use super::{EngineHandle, SettlementGuard};
    use crate::{EngineError, EngineEvent, GenerationReceipt, SubmissionFailure};

    fn stopped_engine() -> EngineHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        drop(cmd_rx);
        drop(event_tx);
        EngineHandle { cmd_tx, event_rx }
    }

    #[test]
    fn submit_to_stopped_engine_reports_error() {
        let engine = stopped_engine();
        assert!(matches!(
            engine.submit(1, SubmissionRequest::default()),
            Err(EngineError::Stopped)
        ));
    }

    #[test]
    fn recv_from_stopped_engine_reports_error() {
        let engine = stopped_engine();
        assert!(matches!(
            engine.recv_timeout(Duration::from_millis(10)),
            Err(EngineError::Stopped)
        ));
    }

    #[test]
    fn recv_times_out_while_engine_is_alive() {
        let (cmd_tx, _cmd_rx) = mpsc::channel();
        let (_event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle { cmd_tx, event_rx };
        assert!(matches!(
            engine.recv_timeout(Duration::from_millis(10)),
            Ok(None)
        ));
    }

    #[test]
    fn settle_emits_once() {
        let (tx, rx) = mpsc::channel();
        let guard = SettlementGuard::new(4, tx);
        guard.settle(Ok(GenerationReceipt {
            file: "t".to_string(),
        }));

        let events: Vec<EngineEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![EngineEvent::SubmissionSettled {
                submission_id: 4,
                result: Ok(GenerationReceipt {
                    file: "t".to_string()
                }),
            }]
        );
    }

    #[test]
    fn drop_without_settle_emits_transport_failure() {
        let (tx, rx) = mpsc::channel();
        drop(SettlementGuard::new(9, tx));

        let events: Vec<EngineEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![EngineEvent::SubmissionSettled {
                submission_id: 9,
                result: Err(SubmissionFailure::transport()),
            }]
        );
    }

    #[test]
    fn guard_emits_during_unwind() {
        let (tx, rx) = mpsc::channel();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = SettlementGuard::new(2, tx);
            panic!("decode blew up");
        }));

        assert!(outcome.is_err());
        assert_eq!(rx.try_iter().count(), 1);
    }
}
