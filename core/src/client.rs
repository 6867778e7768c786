//! Stateless HTTP request builder and response parser for the CRUD API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any status in 200..=299 is a success; everything else becomes
//! `ApiError::HttpStatus`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateComment, CreatePost, CreateUser, PostDraft, UpdatePost};

/// Synchronous, stateless client for the posts/users/comments API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_create_post(&self, input: &CreatePost) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/posts".to_string(), input)
    }

    pub fn build_create_user(&self, input: &CreateUser) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/users".to_string(), input)
    }

    pub fn build_create_comment(&self, input: &CreateComment) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/comments".to_string(), input)
    }

    pub fn build_get_post(&self, id: i64) -> HttpRequest {
        self.bare_request(HttpMethod::Get, format!("/posts/{id}"))
    }

    pub fn build_update_post(&self, id: i64, input: &UpdatePost) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, format!("/posts/{id}"), input)
    }

    pub fn build_delete_post(&self, id: i64) -> HttpRequest {
        self.bare_request(HttpMethod::Delete, format!("/posts/{id}"))
    }

    /// Parses the echo of any create call; the body carries the assigned id.
    pub fn parse_created(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Returns the body as sent together with its editable fields.
    pub fn parse_get_post(&self, response: HttpResponse) -> Result<(Value, PostDraft), ApiError> {
        check_status(&response)?;
        let body: Value = decode(&response.body)?;
        let draft = PostDraft::deserialize(&body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok((body, draft))
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Both 200 and 204 are accepted; the body is ignored.
    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn bare_request(&self, method: HttpMethod, endpoint: String) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{endpoint}", self.base_url),
            endpoint,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        endpoint: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url: format!("{}{endpoint}", self.base_url),
            endpoint,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map statuses outside 200..=299 to `ApiError::HttpStatus`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        status_text: response.status_text.clone(),
    })
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
