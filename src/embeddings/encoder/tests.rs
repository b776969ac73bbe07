use super::*;
use crate::config::EncoderConfig;

#[test]
fn client_configuration() {
    let config = EncoderConfig {
        protocol: "http".to_string(),
        host: "test-host".to_string(),
        port: 1234,
        model: "test-model".to_string(),
        batch_size: 128,
        timeout_seconds: 30,
    };
    let client = EncoderClient::new(&config).expect("should create client");

    assert_eq!(client.model, "test-model");
    assert_eq!(client.batch_size, 128);
    assert_eq!(client.base_url.host_str(), Some("test-host"));
    assert_eq!(client.base_url.port(), Some(1234));
}

#[test]
fn client_builder_methods() {
    let config = EncoderConfig::default();
    let client = EncoderClient::new(&config)
        .expect("should create client")
        .with_timeout(Duration::from_secs(60));

    assert_eq!(client.model, "nomic-embed-text:latest");
}

#[test]
fn embed_request_serialization() {
    let request = EmbedRequest {
        model: "nomic-embed-text:latest".to_string(),
        inputs: vec!["Cairo - Giza Pyramids".to_string()],
    };
    let json = serde_json::to_value(&request).expect("should serialize");

    assert_eq!(json["model"], "nomic-embed-text:latest");
    assert_eq!(json["input"][0], "Cairo - Giza Pyramids");
}

#[test]
fn embed_response_parsing() {
    let body = r#"{"embeddings": [[0.1, 0.2], [0.3, 0.4]]}"#;
    let response: EmbedResponse = serde_json::from_str(body).expect("should parse");
    assert_eq!(response.embeddings.len(), 2);
    assert_eq!(response.embeddings[0], vec![0.1, 0.2]);
}

#[test]
fn models_response_parsing() {
    let body = r#"{"models": [{"name": "nomic-embed-text:latest", "size": 274302450}]}"#;
    let response: ModelsResponse = serde_json::from_str(body).expect("should parse");
    assert_eq!(response.models.len(), 1);
    assert_eq!(response.models[0].name, "nomic-embed-text:latest");
    assert_eq!(response.models[0].size, Some(274302450));
}

#[test]
fn empty_input_skips_network() {
    let client = EncoderClient::new(&EncoderConfig::default()).expect("should create client");
    let vectors = client.encode(&[]).expect("empty encode should succeed");
    assert!(vectors.is_empty());
}
