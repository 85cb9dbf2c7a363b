use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use slides_core::{Effect, FailureOrigin, FailureReport, Msg, SubmissionId};
use slides_engine::{EngineEvent, EngineHandle, FailureKind, SubmissionFailure};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Hands effects to the engine. Submissions the engine can no longer accept
    /// come back as immediate transport-failure settlements.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitForm {
                    submission_id,
                    request,
                } => {
                    engine_info!(
                        "SubmitForm submission_id={} attachments={}",
                        submission_id,
                        request.attachments().len()
                    );
                    if self.engine.submit(submission_id, request).is_err() {
                        follow_ups.push(engine_stopped(submission_id));
                    }
                }
            }
        }
        follow_ups
    }

    /// Next engine event translated into a core message, if one arrives in time.
    ///
    /// A stopped engine settles the in-flight attempt instead of leaving it pending.
    pub fn next_msg(&self, timeout: Duration, in_flight: SubmissionId) -> Option<Msg> {
        match self.engine.recv_timeout(timeout) {
            Ok(event) => event.map(map_event),
            Err(err) => {
                engine_warn!("{}; settling #{} as a transport failure", err, in_flight);
                Some(engine_stopped(in_flight))
            }
        }
    }
}

fn engine_stopped(submission_id: SubmissionId) -> Msg {
    Msg::SubmissionSettled {
        submission_id,
        outcome: Err(map_failure(SubmissionFailure::transport())),
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SubmissionSettled {
            submission_id,
            result,
        } => Msg::SubmissionSettled {
            submission_id,
            outcome: result.map(|receipt| receipt.file).map_err(map_failure),
        },
    }
}

fn map_failure(failure: SubmissionFailure) -> FailureReport {
    let origin = match failure.kind {
        FailureKind::Transport => FailureOrigin::Transport,
        FailureKind::HttpStatus(status) => FailureOrigin::Protocol { status },
        FailureKind::Rejected => FailureOrigin::Application,
    };
    FailureReport {
        origin,
        message: failure.message,
        details: failure.details,
    }
}

#[cfg(test)]
mod tests {
    use slides_core::{FailureOrigin, FailureReport, Msg};
    use slides_engine::{EngineEvent, FailureKind, GenerationReceipt, SubmissionFailure};

    use super::{engine_stopped, map_event};

    #[test]
    fn stopped_engine_settles_as_transport_failure() {
        assert_eq!(
            engine_stopped(8),
            Msg::SubmissionSettled {
                submission_id: 8,
                outcome: Err(FailureReport {
                    origin: FailureOrigin::Transport,
                    message: slides_engine::REQUEST_ERROR_MESSAGE.to_string(),
                    details: None,
                }),
            }
        );
    }

    #[test]
    fn receipt_maps_to_token() {
        let msg = map_event(EngineEvent::SubmissionSettled {
            submission_id: 3,
            result: Ok(GenerationReceipt {
                file: "abc123".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::SubmissionSettled {
                submission_id: 3,
                outcome: Ok("abc123".to_string()),
            }
        );
    }

    #[test]
    fn failure_kinds_map_to_origins() {
        let cases = [
            (FailureKind::Transport, FailureOrigin::Transport),
            (FailureKind::HttpStatus(404), FailureOrigin::Protocol { status: 404 }),
            (FailureKind::Rejected, FailureOrigin::Application),
        ];
        for (kind, origin) in cases {
            let msg = map_event(EngineEvent::SubmissionSettled {
                submission_id: 1,
                result: Err(SubmissionFailure {
                    kind,
                    message: "m".to_string(),
                    details: Some("d".to_string()),
                }),
            });
            assert_eq!(
                msg,
                Msg::SubmissionSettled {
                    submission_id: 1,
                    outcome: Err(FailureReport {
                        origin,
                        message: "m".to_string(),
                        details: Some("d".to_string()),
                    }),
                }
            );
        }
    }
}
