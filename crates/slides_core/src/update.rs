use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FormSubmitted(request) => {
            // A disabled trigger cannot fire; anything arriving now is a double submit.
            if !state.trigger_enabled() {
                return (state, Vec::new());
            }
            let submission_id = state.begin_submission();
            vec![Effect::SubmitForm {
                submission_id,
                request,
            }]
        }
        Msg::SubmissionSettled {
            submission_id,
            outcome,
        } => {
            state.settle(submission_id, outcome);
            Vec::new()
        }
        Msg::AttachmentsChanged(names) => {
            state.replace_attachments(&names);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
