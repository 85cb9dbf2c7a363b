#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the single POST exchange for this submission attempt.
    SubmitForm {
        submission_id: crate::SubmissionId,
        request: crate::SubmissionRequest,
    },
}
