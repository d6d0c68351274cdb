use prompt_console::api_client::{
    ApiClient, ApiResult, ChatRequest, Conversation, Page, Prompt,
};
use prompt_console::config::ApiConfig;
use serde_json::json;

#[test]
fn endpoints_are_prefixed_with_the_api_base_path() {
    let client = ApiClient::new("http://localhost:8080");
    assert_eq!(client.api_path("/x"), "/api/v1/x");
    assert_eq!(
        client.endpoint_url("/prompt/42"),
        "http://localhost:8080/api/v1/prompt/42"
    );
}

#[test]
fn base_path_is_configurable() {
    let client = ApiClient::from_config(&ApiConfig {
        base_url: "https://bench.example".to_string(),
        base_path: "/api/v2".to_string(),
    });
    assert_eq!(
        client.endpoint_url("/conversation/"),
        "https://bench.example/api/v2/conversation/"
    );
}

#[test]
fn post_payloads_encode_to_plain_json() {
    // What a POST body decodes back to on the wire.
    let body = serde_json::to_string(&json!({"a": 1})).unwrap();
    let decoded: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(decoded, json!({"a": 1}));

    let chat = ChatRequest {
        prompt_id: 3,
        question: "What is a monad?".to_string(),
        model: String::new(),
    };
    assert_eq!(
        serde_json::to_value(&chat).unwrap(),
        json!({"prompt_id": 3, "question": "What is a monad?", "model": ""})
    );
}

#[test]
fn envelope_decodes_the_server_shape() {
    let raw = r#"{
        "code": 200,
        "message": "success",
        "data": {
            "id": 7,
            "name": "translator",
            "content": "Translate the user's text.",
            "created_at": "2025-03-05T09:02:41+08:00",
            "updated_at": "2025-03-05T09:02:41+08:00"
        },
        "ok": true,
        "time": "2025-03-05 09:02:41"
    }"#;

    let envelope: ApiResult<Prompt> = serde_json::from_str(raw).unwrap();
    assert!(envelope.ok);
    assert_eq!(envelope.code, 200);
    assert_eq!(envelope.time, "2025-03-05 09:02:41");

    let prompt = envelope.into_data().unwrap();
    assert_eq!(prompt.id, 7);
    assert_eq!(prompt.name, "translator");
}

#[test]
fn envelope_failure_surfaces_the_server_message() {
    let raw = r#"{
        "code": 404,
        "message": "record not found",
        "data": null,
        "ok": false,
        "time": "2025-03-05 09:02:41"
    }"#;

    let envelope: ApiResult<Prompt> = serde_json::from_str(raw).unwrap();
    let err = envelope.into_data().unwrap_err();
    assert!(err.to_string().contains("record not found"));
}

#[test]
fn envelope_tolerates_a_missing_data_field() {
    let raw = r#"{"code": 200, "message": "success", "ok": true, "time": ""}"#;
    let envelope: ApiResult<String> = serde_json::from_str(raw).unwrap();
    assert!(envelope.ok);
    assert!(envelope.into_data().is_err());
}

#[test]
fn conversation_page_decodes_with_joined_prompt() {
    let raw = r#"{
        "list": [{
            "id": 12,
            "prompt_id": 7,
            "user_question": "hello",
            "assistant_reply": "hi there",
            "prompt_tokens": 42,
            "completion_tokens": 130,
            "total_tokens": 172,
            "latency": 1500,
            "model": "kimi-k2.5",
            "created_at": "2025-03-05T09:02:41+08:00",
            "trace_id": "abc-123",
            "prompt": {
                "id": 7,
                "name": "translator",
                "content": "Translate the user's text.",
                "created_at": "2025-03-01T08:00:00+08:00",
                "updated_at": "2025-03-01T08:00:00+08:00"
            }
        }],
        "total": 1,
        "page": 1,
        "page_size": 10
    }"#;

    let page: Page<Conversation> = serde_json::from_str(raw).unwrap();
    assert_eq!(page.total, 1);
    let conversation = &page.list[0];
    assert_eq!(conversation.total_tokens, 172);
    assert_eq!(conversation.latency, 1500);
    assert_eq!(conversation.prompt.as_ref().unwrap().name, "translator");
}
