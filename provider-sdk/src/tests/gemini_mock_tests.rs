//! Mock tests for the Gemini adapter
//!
//! These tests use WireMock to simulate the Gemini API and verify the
//! adapter's request envelope, extraction path, error normalization, and
//! deadline behavior.

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use serde_json::{json, Value};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::{Provider, ProviderConfig};
    use crate::error::ExplainError;
    use crate::services::gemini::GeminiClient;
    use crate::services::ProviderAdapter;

    fn create_test_client(mock_server: &MockServer, timeout_ms: u64) -> GeminiClient {
        let mut config = ProviderConfig::for_provider(Provider::Gemini);
        config.endpoint = mock_server.uri();
        config.api_key = "mock_api_key_for_testing".to_string();
        config.timeout_ms = timeout_ms;
        GeminiClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_invoke_sends_generate_content_envelope() {
        let mock_server = MockServer::start().await;

        let mock_response = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Summary:\nAdds two numbers." }] } }
            ]
        });

        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-flash:generateContent"))
            .and(query_param("key", "mock_api_key_for_testing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&mock_response))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server, 2_000);
        let payload = client.invoke("explain this: print(1+1)").await.unwrap();

        assert_eq!(payload, mock_response);

        // The envelope carries the prompt verbatim plus sampling config.
        let requests = mock_server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "explain this: print(1+1)"
        );
        assert!(body["generationConfig"]["maxOutputTokens"].is_u64());
        assert!(body["generationConfig"]["temperature"].is_number());
    }

    #[tokio::test]
    async fn test_extract_happy_path() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server, 2_000);

        let payload = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Summary:\nAdds two numbers." }] } }
            ]
        });

        let text = client.extract(&payload).unwrap();
        assert_eq!(text.as_deref(), Some("Summary:\nAdds two numbers."));
    }

    #[tokio::test]
    async fn test_extract_error_payload_is_application_error() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server, 2_000);

        let payload = json!({
            "error": { "code": 429, "message": "Resource has been exhausted" }
        });

        let err = client.extract(&payload).unwrap_err();
        match err {
            ExplainError::UpstreamApplication { provider, message } => {
                assert_eq!(provider, "Gemini");
                assert_eq!(message, "Resource has been exhausted");
            }
            other => panic!("expected UpstreamApplication, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_extract_ignores_null_error_field() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server, 2_000);

        // An explicit `error: null` alongside valid candidates is not an
        // application failure; the text must still come through.
        let payload = json!({
            "error": null,
            "candidates": [{ "content": { "parts": [{ "text": "hi" }] } }]
        });

        assert_eq!(client.extract(&payload).unwrap().as_deref(), Some("hi"));
        assert_eq!(client.extract(&json!({ "error": null })).unwrap(), None);
    }

    #[tokio::test]
    async fn test_extract_tolerates_missing_or_mistyped_text() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server, 2_000);

        // Absent intermediate keys
        assert_eq!(client.extract(&json!({})).unwrap(), None);
        assert_eq!(client.extract(&json!({ "candidates": [] })).unwrap(), None);
        assert_eq!(
            client
                .extract(&json!({ "candidates": [{ "content": {} }] }))
                .unwrap(),
            None
        );

        // Empty text
        assert_eq!(
            client
                .extract(&json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }))
                .unwrap(),
            None
        );

        // Mistyped text
        assert_eq!(
            client
                .extract(&json!({ "candidates": [{ "content": { "parts": [{ "text": 42 }] } }] }))
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_invoke_error_status_with_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "API key not valid" }
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server, 2_000);

        // The body still decodes; extraction surfaces the upstream text.
        let payload = client.invoke("prompt").await.unwrap();
        let err = client.extract(&payload).unwrap_err();
        assert!(matches!(
            err,
            ExplainError::UpstreamApplication { ref message, .. } if message == "API key not valid"
        ));
    }

    #[tokio::test]
    async fn test_invoke_error_status_with_non_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server, 2_000);
        let err = client.invoke("prompt").await.unwrap_err();

        assert!(matches!(
            err,
            ExplainError::UpstreamApplication { ref message, .. }
                if message.contains("502") && message.contains("Bad Gateway")
        ));
    }

    #[tokio::test]
    async fn test_invoke_times_out_within_deadline() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "candidates": [] }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server, 100);

        let started = Instant::now();
        let err = client.invoke("prompt").await.unwrap_err();
        let elapsed = started.elapsed();

        assert!(matches!(
            err,
            ExplainError::UpstreamTimeout { ref provider, timeout_ms }
                if provider == "Gemini" && timeout_ms == 100
        ));
        // Bounded by timeout + small epsilon, never the upstream delay.
        assert!(elapsed < Duration::from_millis(450), "took {:?}", elapsed);
    }
}
