use ai_llm_service::{
    AiLlmError, LlmModelConfig, LlmProvider, LlmService, TextGenerator,
    error_handler::ProviderErrorKind,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

fn cfg(endpoint: &str, model: &str, api_key: Option<&str>) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::Gemini,
        model: model.to_string(),
        endpoint: endpoint.to_string(),
        api_key: api_key.map(str::to_string),
        max_tokens: None,
        temperature: Some(0.4),
        top_p: None,
        timeout_secs: Some(5),
    }
}

#[tokio::test]
async fn gemini_generate_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "secret"))
        .and(body_partial_json(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "How do I reach Gangtok?" }] }],
            "systemInstruction": { "parts": [{ "text": "You are a Sikkim travel guide." }] },
            "generationConfig": { "temperature": 0.4 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Take a shared jeep from Siliguri." }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let svc = LlmService::new(cfg(&server.uri(), "gemini-1.5-flash", Some("secret"))).unwrap();

    let out = svc
        .generate("How do I reach Gangtok?", Some("You are a Sikkim travel guide."))
        .await
        .unwrap();
    assert_eq!(out, "Take a shared jeep from Siliguri.");
}

#[tokio::test]
async fn gemini_quota_error_is_surfaced_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_string(r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#),
        )
        .mount(&server)
        .await;

    let svc = LlmService::new(cfg(&server.uri(), "gemini-1.5-flash", Some("secret"))).unwrap();

    let err = svc.generate_text("hi", None).await.unwrap_err();
    match &err {
        AiLlmError::Provider(p) => match &p.kind {
            ProviderErrorKind::HttpStatus(http) => assert_eq!(http.status.as_u16(), 429),
            other => panic!("unexpected kind: {other}"),
        },
        other => panic!("unexpected error: {other}"),
    }
    let msg = err.to_string();
    assert!(msg.contains("RESOURCE_EXHAUSTED"));
    assert!(!msg.contains("secret"));
}

#[tokio::test]
async fn gemini_blocked_prompt_is_an_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let svc = LlmService::new(cfg(&server.uri(), "m", Some("k"))).unwrap();
    let err = svc.generate_text("hi", None).await.unwrap_err();
    assert!(err.to_string().contains("SAFETY"));
}

#[test]
fn service_rejects_invalid_endpoint() {
    let err = LlmService::new(cfg("generativelanguage.googleapis.com", "m", Some("k"))).unwrap_err();
    assert!(err.to_string().contains("invalid endpoint"));
}

