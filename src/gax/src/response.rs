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

//! The response envelope.
//!
//! Calls return a [Response], which pairs the decoded body with the status,
//! the headers, and the method and URL of the request. By the time a
//! [Response] is returned the body has been fully read, so the connection is
//! already released.
//!
//! Tests and mocks can build responses directly:
//!
//! ```
//! # use edgecloud_gax::response::{Parts, Response};
//! let parts = Parts::new()
//!     .set_status(http::StatusCode::ACCEPTED)
//!     .set_method(http::Method::POST)
//!     .set_url("https://api.example.com/cloud/v1/floatingips/42/7");
//! let response = Response::from_parts(parts, vec!["t1".to_string()]);
//! assert_eq!(response.status(), http::StatusCode::ACCEPTED);
//! assert_eq!(response.parts().method, http::Method::POST);
//! ```

/// Represents a service response: the decoded body and the response metadata.
#[derive(Clone, Debug)]
pub struct Response<T> {
    parts: Parts,
    body: T,
}

impl<T> Response<T> {
    /// Creates a response with default metadata.
    pub fn from(body: T) -> Self {
        Self {
            body,
            parts: Parts::default(),
        }
    }

    /// Creates a response from the given parts and body.
    pub fn from_parts(parts: Parts, body: T) -> Self {
        Self { parts, body }
    }

    /// The HTTP status code.
    pub fn status(&self) -> http::StatusCode {
        self.parts.status
    }

    /// The response headers.
    pub fn headers(&self) -> &http::HeaderMap<http::HeaderValue> {
        &self.parts.headers
    }

    /// The response metadata.
    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    /// The decoded body.
    pub fn body(&self) -> &T {
        &self.body
    }

    pub fn into_parts(self) -> (Parts, T) {
        (self.parts, self.body)
    }

    pub fn into_body(self) -> T {
        self.body
    }

    /// Transforms the body, keeping the metadata.
    ///
    /// # Example
    /// ```
    /// # use edgecloud_gax::response::Response;
    /// let response = Response::from(vec![1, 2, 3]).map(|v| v.len());
    /// assert_eq!(response.body(), &3);
    /// ```
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            parts: self.parts,
            body: f(self.body),
        }
    }
}

/// Response metadata: status, headers, and the request that produced it.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct Parts {
    /// The HTTP status code.
    pub status: http::StatusCode,
    /// The HTTP response headers.
    pub headers: http::HeaderMap<http::HeaderValue>,
    /// The request method.
    pub method: http::Method,
    /// The full request URL.
    pub url: String,
}

impl Parts {
    pub fn new() -> Self {
        Parts::default()
    }

    pub fn set_status<V: Into<http::StatusCode>>(mut self, v: V) -> Self {
        self.status = v.into();
        self
    }

    pub fn set_headers<V>(mut self, v: V) -> Self
    where
        V: Into<http::HeaderMap>,
    {
        self.headers = v.into();
        self
    }

    pub fn set_method<V: Into<http::Method>>(mut self, v: V) -> Self {
        self.method = v.into();
        self
    }

    pub fn set_url<V: Into<String>>(mut self, v: V) -> Self {
        self.url = v.into();
        self
    }
}
