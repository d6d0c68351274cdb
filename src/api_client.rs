//! Client for the workbench's JSON API.
//!
//! Every endpoint lives under a fixed base path and wraps its payload in a
//! `{code, message, data, ok, time}` envelope. The client decodes whatever
//! body comes back regardless of the HTTP status line; callers check the
//! envelope for application-level failure.

use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;

/// Response envelope every endpoint wraps its payload in.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResult<T> {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
    pub ok: bool,
    #[serde(default)]
    pub time: String,
}

impl<T> ApiResult<T> {
    /// Unwrap the payload, surfacing the server's message when the
    /// envelope reports failure.
    pub fn into_data(self) -> Result<T> {
        if !self.ok {
            return Err(anyhow!("API error {}: {}", self.code, self.message));
        }
        self.data
            .ok_or_else(|| anyhow!("API response carried no data (code {})", self.code))
    }
}

/// A reusable prompt template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: u64,
    pub name: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One stored question/answer exchange with its token and latency stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: u64,
    pub prompt_id: u64,
    pub user_question: String,
    pub assistant_reply: String,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
    pub latency: i64,
    pub model: String,
    pub created_at: String,
    pub trace_id: String,
    /// Present when the server joins the prompt in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Prompt>,
}

/// A score given to a prompt in a named scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRating {
    pub id: u64,
    pub prompt_id: u64,
    pub scene_name: String,
    pub score: f32,
    pub created_at: String,
}

/// Per-scene average for a prompt's ratings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRatingSummary {
    pub scene_name: String,
    pub avg_score: f32,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Prompt to converse under; 0 means no prompt.
    pub prompt_id: u64,
    pub question: String,
    /// Model name; empty means the server default.
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub conversation_id: u64,
    pub reply: String,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
    pub latency: i64,
}

/// One page of a listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Per-request overrides for [`ApiClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers; these win over the defaults on conflicting names.
    pub headers: Vec<(String, String)>,
    /// Pre-serialized request body.
    pub body: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    base_path: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            base_path: config.base_path.clone(),
            client: Client::new(),
        }
    }

    /// Combined path for an endpoint under the API base path. `endpoint`
    /// must begin with `/`.
    pub fn api_path(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_path, endpoint)
    }

    /// Full URL for an endpoint under the API base path.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, self.api_path(endpoint))
    }

    /// Issue a request against `path` and decode the JSON body, whatever
    /// the status line says.
    ///
    /// The server reports application failures inside the response
    /// envelope, so status codes are not inspected here. A transport or
    /// decode failure is logged and handed back to the caller unchanged;
    /// there is no retry and no request timeout.
    pub fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let headers = merge_headers(&options.headers)?;

        let mut request = self.client.request(method, url.as_str()).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        match request.send().and_then(|response| response.json::<T>()) {
            Ok(decoded) => Ok(decoded),
            Err(err) => {
                tracing::error!("API request error: {} ({})", err, url);
                Err(err.into())
            }
        }
    }

    pub fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::GET, &self.api_path(endpoint), RequestOptions::default())
    }

    pub fn post<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, payload: &B) -> Result<T> {
        let options = RequestOptions {
            body: Some(serde_json::to_string(payload)?),
            ..RequestOptions::default()
        };
        self.request(Method::POST, &self.api_path(endpoint), options)
    }

    pub fn put<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, payload: &B) -> Result<T> {
        let options = RequestOptions {
            body: Some(serde_json::to_string(payload)?),
            ..RequestOptions::default()
        };
        self.request(Method::PUT, &self.api_path(endpoint), options)
    }

    pub fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::DELETE, &self.api_path(endpoint), RequestOptions::default())
    }

    // Typed calls for the routes the server registers.

    pub fn list_prompts(&self, page: u32, page_size: u32) -> Result<ApiResult<Page<Prompt>>> {
        self.get(&format!("/prompt/?page={}&page_size={}", page, page_size))
    }

    pub fn get_prompt(&self, id: u64) -> Result<ApiResult<Prompt>> {
        self.get(&format!("/prompt/{}", id))
    }

    pub fn create_prompt(&self, name: &str, content: &str) -> Result<ApiResult<Prompt>> {
        self.post(
            "/prompt/",
            &serde_json::json!({ "name": name, "content": content }),
        )
    }

    pub fn update_prompt(&self, id: u64, name: &str, content: &str) -> Result<ApiResult<Prompt>> {
        self.put(
            &format!("/prompt/{}", id),
            &serde_json::json!({ "name": name, "content": content }),
        )
    }

    pub fn delete_prompt(&self, id: u64) -> Result<ApiResult<String>> {
        self.delete(&format!("/prompt/{}", id))
    }

    pub fn add_prompt_rating(
        &self,
        id: u64,
        scene_name: &str,
        score: f32,
        conversation_id: Option<u64>,
    ) -> Result<ApiResult<String>> {
        self.post(
            &format!("/prompt/{}/rating", id),
            &serde_json::json!({
                "scene_name": scene_name,
                "score": score,
                "conversation_id": conversation_id,
            }),
        )
    }

    pub fn prompt_rating_summary(&self, id: u64) -> Result<ApiResult<Vec<PromptRatingSummary>>> {
        self.get(&format!("/prompt/{}/rating/summary", id))
    }

    pub fn list_prompt_ratings(
        &self,
        prompt_id: Option<u64>,
        scene_name: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> Result<ApiResult<Page<PromptRating>>> {
        let mut endpoint = format!("/prompt/rating/list?page={}&page_size={}", page, page_size);
        if let Some(prompt_id) = prompt_id {
            endpoint.push_str(&format!("&prompt_id={}", prompt_id));
        }
        if let Some(scene_name) = scene_name {
            endpoint.push_str(&format!("&scene_name={}", scene_name));
        }
        self.get(&endpoint)
    }

    pub fn chat(&self, request: &ChatRequest) -> Result<ApiResult<ChatResponse>> {
        self.post("/conversation/chat", request)
    }

    pub fn list_conversations(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<ApiResult<Page<Conversation>>> {
        self.get(&format!("/conversation/?page={}&page_size={}", page, page_size))
    }

    pub fn get_conversation(&self, id: u64) -> Result<ApiResult<Conversation>> {
        self.get(&format!("/conversation/{}", id))
    }
}

/// Default headers merged with per-request overrides; an override with the
/// same name replaces the default.
fn merge_headers(overrides: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in overrides {
        let name: HeaderName = name.parse()?;
        let value: HeaderValue = value.parse()?;
        headers.insert(name, value);
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_headers_keeps_the_json_default() {
        let headers = merge_headers(&[]).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn merge_headers_lets_callers_override_the_default() {
        let headers = merge_headers(&[(
            "Content-Type".to_string(),
            "text/plain".to_string(),
        )])
        .unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn merge_headers_adds_extra_headers() {
        let headers = merge_headers(&[(
            "Authorization".to_string(),
            "Bearer token".to_string(),
        )])
        .unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer token");
    }

    #[test]
    fn merge_headers_rejects_invalid_names() {
        assert!(merge_headers(&[("bad name".to_string(), "x".to_string())]).is_err());
    }
}
