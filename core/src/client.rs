//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any 2xx status is success; 404 maps to `NotFound`.

use serde::de::DeserializeOwned;

use crate::error::{TransportError, TransportErrorKind};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Post, PostDraft, PostId, Saved};

const JSON: &str = "application/json";

/// Builds requests for, and parses responses from, the posts API rooted at
/// `base_url`. Performs no I/O; pair it with a `Transport`.
#[derive(Debug, Clone)]
pub struct PostClient {
    base_url: String,
}

impl PostClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection(), None)
    }

    pub fn build_get_post(&self, id: &PostId) -> HttpRequest {
        self.request(HttpMethod::Get, self.member(id), None)
    }

    pub fn build_create_post(&self, draft: &PostDraft) -> Result<HttpRequest, TransportError> {
        let body = encode(draft)?;
        Ok(self.request(HttpMethod::Post, self.collection(), Some(body)))
    }

    pub fn build_update_post(
        &self,
        id: &PostId,
        draft: &PostDraft,
    ) -> Result<HttpRequest, TransportError> {
        let body = encode(draft)?;
        Ok(self.request(HttpMethod::Put, self.member(id), Some(body)))
    }

    pub fn build_delete_post(&self, id: &PostId) -> HttpRequest {
        self.request(HttpMethod::Delete, self.member(id), None)
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, TransportError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// An empty or `null` body is treated as "not found".
    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, TransportError> {
        check_status(&response)?;
        let body = response.body.trim();
        if body.is_empty() || body == "null" {
            return Err(TransportErrorKind::NotFound.into());
        }
        decode(body)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Saved, TransportError> {
        check_status(&response)?;
        Ok(Saved::from_body(&response.body))
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<Saved, TransportError> {
        check_status(&response)?;
        Ok(Saved::from_body(&response.body))
    }

    /// Echoes the id back so the caller can evict it from a local list.
    pub fn parse_delete_post(
        &self,
        id: &PostId,
        response: HttpResponse,
    ) -> Result<PostId, TransportError> {
        check_status(&response)?;
        Ok(id.clone())
    }

    fn collection(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn member(&self, id: &PostId) -> String {
        format!("{}/posts/{id}", self.base_url)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("accept".to_string(), JSON.to_string())];
        if body.is_some() {
            headers.push(("content-type".to_string(), JSON.to_string()));
        }
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }
}

fn encode(draft: &PostDraft) -> Result<String, TransportError> {
    serde_json::to_string(draft).map_err(|e| TransportErrorKind::Encode(e.to_string()).into())
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportErrorKind::Decode(e.to_string()).into())
}

/// Map non-success status codes to the appropriate error kind.
fn check_status(response: &HttpResponse) -> Result<(), TransportError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(TransportErrorKind::NotFound.into());
    }
    Err(TransportErrorKind::Status {
        status: response.status,
        body: response.body.clone(),
    }
    .into())
}
