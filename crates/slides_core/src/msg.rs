#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User activated the generate trigger; carries the form snapshot taken at that moment.
    FormSubmitted(crate::SubmissionRequest),
    /// The exchange for a submission finished, one way or another.
    SubmissionSettled {
        submission_id: crate::SubmissionId,
        outcome: Result<String, crate::FailureReport>,
    },
    /// The file-attachment input reported a new selection (names in input order).
    AttachmentsChanged(Vec<String>),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
