use std::sync::{Arc, Once};
use std::time::Duration;

use pretty_assertions::assert_eq;
use slides_core::{Attachment, PresentationForm, SubmissionRequest};
use slides_engine::{
    EngineEvent, EngineHandle, FailureKind, GenerationReceipt, ReqwestSubmitter,
    SubmissionFailure, SubmissionId, SubmitSettings, Submitter, REQUEST_ERROR_MESSAGE,
    SERVER_ERROR_MESSAGE,
};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn sample_request() -> SubmissionRequest {
    PresentationForm {
        title: "Meu TCC".to_string(),
        content: "## Intro".to_string(),
        ..PresentationForm::default()
    }
    .into_request(vec![
        Attachment::image("a.png", b"png-bytes".to_vec()),
        Attachment::image("a.png", b"again".to_vec()),
    ])
}

fn submitter_for(server: &MockServer) -> ReqwestSubmitter {
    ReqwestSubmitter::new(SubmitSettings {
        generation_url: format!("{}/gerar", server.uri()),
    })
    .expect("client")
}

#[tokio::test]
async fn posts_multipart_and_returns_token() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gerar"))
        .and(body_string_contains("name=\"titulo\""))
        .and(body_string_contains("Meu TCC"))
        .and(body_string_contains("name=\"imagens\"; filename=\"a.png\""))
        .and(body_string_contains("image/png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "sucesso": true, "arquivo": "abc123" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let receipt = submitter_for(&server)
        .submit(1, sample_request())
        .await
        .expect("submit ok");

    assert_eq!(
        receipt,
        GenerationReceipt {
            file: "abc123".to_string()
        }
    );
}

#[tokio::test]
async fn http_error_with_unreadable_body_uses_fallback() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gerar"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("Internal Server Error", "text/plain"))
        .mount(&server)
        .await;

    let err = submitter_for(&server)
        .submit(2, sample_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.message, SERVER_ERROR_MESSAGE);
    assert_eq!(err.details, None);
}

#[tokio::test]
async fn http_error_with_envelope_keeps_details() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gerar"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "erro": "Comando \"quarto\" não encontrado",
            "detalhes": "Instale o Quarto CLI",
        })))
        .mount(&server)
        .await;

    let err = submitter_for(&server)
        .submit(3, sample_request())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SubmissionFailure {
            kind: FailureKind::HttpStatus(500),
            message: "Comando \"quarto\" não encontrado".to_string(),
            details: Some("Instale o Quarto CLI".to_string()),
        }
    );
}

#[tokio::test]
async fn logical_failure_on_ok_status() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gerar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sucesso": false,
            "erro": "X",
            "detalhes": "Y",
        })))
        .mount(&server)
        .await;

    let err = submitter_for(&server)
        .submit(4, sample_request())
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "X");
    assert_eq!(err.details.as_deref(), Some("Y"));
}

#[tokio::test]
async fn unreachable_server_is_transport_failure() {
    init_logging();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    let submitter = ReqwestSubmitter::new(SubmitSettings {
        generation_url: format!("http://127.0.0.1:{port}/gerar"),
    })
    .expect("client");

    let err = submitter.submit(5, sample_request()).await.unwrap_err();

    assert_eq!(err, SubmissionFailure::transport());
    assert_eq!(err.message, REQUEST_ERROR_MESSAGE);
}

#[tokio::test]
async fn invalid_url_is_transport_failure() {
    init_logging();
    let submitter = ReqwestSubmitter::new(SubmitSettings {
        generation_url: "not a url".to_string(),
    })
    .expect("client");

    let err = submitter.submit(6, sample_request()).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Transport);
}

struct PanickingSubmitter;

#[async_trait::async_trait]
impl Submitter for PanickingSubmitter {
    async fn submit(
        &self,
        _submission_id: SubmissionId,
        _request: SubmissionRequest,
    ) -> Result<GenerationReceipt, SubmissionFailure> {
        panic!("decoder exploded");
    }
}

#[test]
fn engine_settles_even_when_the_exchange_panics() {
    init_logging();
    let engine = EngineHandle::with_submitter(Arc::new(PanickingSubmitter)).expect("engine");
    engine.submit(11, sample_request()).expect("engine running");

    let event = engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine running")
        .expect("settlement event");
    assert_eq!(
        event,
        EngineEvent::SubmissionSettled {
            submission_id: 11,
            result: Err(SubmissionFailure::transport()),
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_forwards_real_outcome() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gerar"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "sucesso": true, "arquivo": "xyz" })),
        )
        .mount(&server)
        .await;

    let engine = EngineHandle::new(SubmitSettings {
        generation_url: format!("{}/gerar", server.uri()),
    })
    .expect("engine");
    engine.submit(12, sample_request()).expect("engine running");

    let event = tokio::task::spawn_blocking(move || engine.recv_timeout(Duration::from_secs(10)))
        .await
        .expect("join")
        .expect("engine running")
        .expect("settlement event");
    assert_eq!(
        event,
        EngineEvent::SubmissionSettled {
            submission_id: 12,
            result: Ok(GenerationReceipt {
                file: "xyz".to_string()
            }),
        }
    );
}
