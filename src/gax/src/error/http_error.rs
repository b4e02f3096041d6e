// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use bytes::Bytes;
use http::{HeaderMap, Method};

/// The request and response details of a failed HTTP call.
///
/// The payload is retained in full so applications can inspect the service
/// response. If the payload is a JSON object with a string `message` field,
/// that field is used as the human readable text of the error.
#[derive(Clone, Debug)]
pub struct HttpError {
    method: Method,
    url: String,
    expected: Vec<u16>,
    status_code: u16,
    headers: HeaderMap,
    payload: Bytes,
    service_message: Option<String>,
}

#[derive(serde::Deserialize)]
struct ServiceMessage {
    message: String,
}

impl HttpError {
    /// Creates a new instance.
    ///
    /// `expected` lists the status codes the caller accepted, an empty list
    /// means "any 2xx".
    pub fn new<U: Into<String>>(
        method: Method,
        url: U,
        expected: Vec<u16>,
        status_code: u16,
        headers: HeaderMap,
        payload: Bytes,
    ) -> Self {
        let service_message = serde_json::from_slice::<ServiceMessage>(&payload)
            .ok()
            .map(|m| m.message)
            .filter(|m| !m.is_empty());
        Self {
            method,
            url: url.into(),
            expected,
            status_code,
            headers,
            payload,
            service_message,
        }
    }

    /// The HTTP method of the failed request.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The full URL of the failed request.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The status codes the request accepted. Empty means any 2xx code.
    pub fn expected(&self) -> &[u16] {
        &self.expected
    }

    /// The status code returned by the service.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The full response payload.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// The `message` field of the response payload, if present.
    pub fn service_message(&self) -> Option<&str> {
        self.service_message.as_deref()
    }

    /// A description of the request and the unexpected response.
    pub fn default_message(&self) -> String {
        let expected = if self.expected.is_empty() {
            "[200-299]".to_string()
        } else {
            format!("{:?}", self.expected)
        };
        format!(
            "Expected HTTP response code {expected} when accessing [{} {}], but got {} instead: {}",
            self.method,
            self.url,
            self.status_code,
            String::from_utf8_lossy(&self.payload)
        )
    }

    /// The service message, or the default message if there is none.
    pub fn human_text(&self) -> String {
        self.service_message
            .clone()
            .unwrap_or_else(|| self.default_message())
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.human_text())
    }
}

impl std::error::Error for HttpError {}
