//! Tests for the explain pipeline
//!
//! Validation is exercised directly; the staging invariants (credential
//! precheck first, no outbound call on rejected input, fallback on empty
//! upstream text) are exercised against a WireMock upstream.

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::{Provider, ProviderConfig};
    use crate::error::ExplainError;
    use crate::pipeline::{ExplainPipeline, ExplainRequest, FALLBACK_EXPLANATION};

    fn test_config(endpoint: &str, api_key: &str) -> ProviderConfig {
        let mut config = ProviderConfig::for_provider(Provider::Gemini);
        config.endpoint = endpoint.to_string();
        config.api_key = api_key.to_string();
        config.timeout_ms = 2_000;
        config
    }

    #[test]
    fn test_validator_rejects_missing_code() {
        assert!(matches!(
            ExplainRequest::from_body(&json!({})),
            Err(ExplainError::InvalidInput(_))
        ));
        assert!(matches!(
            ExplainRequest::from_body(&Value::Null),
            Err(ExplainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validator_rejects_non_string_code() {
        assert!(matches!(
            ExplainRequest::from_body(&json!({ "code": 42 })),
            Err(ExplainError::InvalidInput(_))
        ));
        assert!(matches!(
            ExplainRequest::from_body(&json!({ "code": ["print"] })),
            Err(ExplainError::InvalidInput(_))
        ));
        assert!(matches!(
            ExplainRequest::from_body(&json!({ "code": null })),
            Err(ExplainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validator_rejects_blank_code() {
        assert!(matches!(
            ExplainRequest::from_body(&json!({ "code": "   \n\t " })),
            Err(ExplainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validator_accepts_code() {
        let request = ExplainRequest::from_body(&json!({ "code": "print(1+1)" })).unwrap();
        assert_eq!(request.code, "print(1+1)");
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_outbound_call() {
        let mock_server = MockServer::start().await;
        let pipeline = ExplainPipeline::new(test_config(&mock_server.uri(), "")).unwrap();

        let err = pipeline
            .explain(&json!({ "code": "print(1+1)" }))
            .await
            .unwrap_err();

        assert!(matches!(err, ExplainError::MissingCredential(ref var) if var == "GEMINI_API_KEY"));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_outbound_call() {
        let mock_server = MockServer::start().await;
        let pipeline = ExplainPipeline::new(test_config(&mock_server.uri(), "test-key")).unwrap();

        let err = pipeline.explain(&json!({})).await.unwrap_err();

        assert!(matches!(err, ExplainError::InvalidInput(_)));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_candidates_yield_fallback_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&mock_server)
            .await;

        let pipeline = ExplainPipeline::new(test_config(&mock_server.uri(), "test-key")).unwrap();

        let explanation = pipeline
            .explain(&json!({ "code": "print(1+1)" }))
            .await
            .unwrap();

        assert_eq!(explanation, FALLBACK_EXPLANATION);
    }

    #[tokio::test]
    async fn test_prompt_truncation_is_an_invoker_option() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            })))
            .mount(&mock_server)
            .await;

        let mut config = test_config(&mock_server.uri(), "test-key");
        config.max_prompt_chars = Some(64);
        let pipeline = ExplainPipeline::new(config).unwrap();

        pipeline
            .explain(&json!({ "code": "x".repeat(10_000) }))
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);

        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let sent_prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert_eq!(sent_prompt.chars().count(), 64);
    }

    #[tokio::test]
    async fn test_exactly_one_outbound_call_per_invocation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "explanation" }] } }]
            })))
            .mount(&mock_server)
            .await;

        let pipeline = ExplainPipeline::new(test_config(&mock_server.uri(), "test-key")).unwrap();

        pipeline
            .explain(&json!({ "code": "print(1+1)" }))
            .await
            .unwrap();

        assert_eq!(mock_server.received_requests().await.unwrap().len(), 1);
    }
}
