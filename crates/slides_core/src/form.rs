/// Multipart field name under which every selected image is sent.
pub const ATTACHMENT_FIELD: &str = "imagens";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub field: String,
    pub file_name: String,
    /// Content type reported by the selection, if any. The engine guesses one otherwise.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn image(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: ATTACHMENT_FIELD.to_string(),
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }
}

/// Snapshot of the form at the moment the trigger fired.
///
/// Built once per trigger and never mutated afterwards; it is moved into the
/// submit effect and dropped once the exchange settles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionRequest {
    fields: Vec<FormField>,
    attachments: Vec<Attachment>,
}

impl SubmissionRequest {
    pub fn builder() -> SubmissionRequestBuilder {
        SubmissionRequestBuilder::default()
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn attachment_names(&self) -> Vec<String> {
        self.attachments
            .iter()
            .map(|attachment| attachment.file_name.clone())
            .collect()
    }

    /// Consumes the snapshot for encoding.
    pub fn into_parts(self) -> (Vec<FormField>, Vec<Attachment>) {
        (self.fields, self.attachments)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

#[derive(Debug, Default)]
pub struct SubmissionRequestBuilder {
    fields: Vec<FormField>,
    attachments: Vec<Attachment>,
}

impl SubmissionRequestBuilder {
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn attachments(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments.extend(attachments);
        self
    }

    pub fn build(self) -> SubmissionRequest {
        SubmissionRequest {
            fields: self.fields,
            attachments: self.attachments,
        }
    }
}

/// The presentation-request form: four text fields plus the image selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationForm {
    pub title: String,
    pub subtitle: String,
    pub institute: String,
    pub content: String,
}

impl Default for PresentationForm {
    fn default() -> Self {
        Self {
            title: "Título da Apresentação".to_string(),
            subtitle: "Autor".to_string(),
            institute: "Instituto Federal de Sergipe".to_string(),
            content: String::new(),
        }
    }
}

impl PresentationForm {
    pub fn into_request(self, attachments: Vec<Attachment>) -> SubmissionRequest {
        SubmissionRequest::builder()
            .field("titulo", self.title)
            .field("subtitulo", self.subtitle)
            .field("instituto", self.institute)
            .field("conteudo", self.content)
            .attachments(attachments)
            .build()
    }
}
