use engine_logging::{engine_debug, engine_info, engine_warn};
use reqwest::multipart::{Form, Part};
use slides_core::{Attachment, SubmissionRequest};

use crate::{interpret_response, EngineError, GenerationReceipt, SubmissionFailure, SubmissionId};

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    /// Absolute URL of the generation route.
    pub generation_url: String,
}

#[async_trait::async_trait]
pub trait Submitter: Send + Sync {
    /// Performs the single exchange for one attempt. The request is consumed.
    async fn submit(
        &self,
        submission_id: SubmissionId,
        request: SubmissionRequest,
    ) -> Result<GenerationReceipt, SubmissionFailure>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubmitter {
    settings: SubmitSettings,
    client: reqwest::Client,
}

impl ReqwestSubmitter {
    pub fn new(settings: SubmitSettings) -> Result<Self, EngineError> {
        // No timeout: the exchange runs until the server or the network settles it.
        let client = reqwest::Client::builder().build()?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl Submitter for ReqwestSubmitter {
    async fn submit(
        &self,
        submission_id: SubmissionId,
        request: SubmissionRequest,
    ) -> Result<GenerationReceipt, SubmissionFailure> {
        let url = reqwest::Url::parse(&self.settings.generation_url)
            .map_err(|err| transport_failure(submission_id, err))?;

        engine_info!(
            "Submitting #{} fields={} attachments={} url={}",
            submission_id,
            request.fields().len(),
            request.attachments().len(),
            url
        );
        let form = build_form(request).map_err(|err| transport_failure(submission_id, err))?;

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| transport_failure(submission_id, err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| transport_failure(submission_id, err))?;
        engine_debug!(
            "Submission #{} answered status={} body_len={}",
            submission_id,
            status,
            body.len()
        );

        interpret_response(status.as_u16(), &body)
    }
}

fn build_form(request: SubmissionRequest) -> Result<Form, reqwest::Error> {
    let (fields, attachments) = request.into_parts();
    let mut form = Form::new();
    for field in fields {
        form = form.text(field.name, field.value);
    }
    for attachment in attachments {
        let field = attachment.field.clone();
        form = form.part(field, build_part(attachment)?);
    }
    Ok(form)
}

fn build_part(attachment: Attachment) -> Result<Part, reqwest::Error> {
    let content_type = attachment.content_type.unwrap_or_else(|| {
        mime_guess::from_path(&attachment.file_name)
            .first_or_octet_stream()
            .to_string()
    });
    Part::bytes(attachment.bytes)
        .file_name(attachment.file_name)
        .mime_str(&content_type)
}

fn transport_failure(submission_id: SubmissionId, err: impl std::fmt::Display) -> SubmissionFailure {
    engine_warn!("Submission #{} transport failure: {}", submission_id, err);
    SubmissionFailure::transport()
}
