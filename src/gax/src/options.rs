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

//! Per request options.
//!
//! Facades build a [RequestOptions] for each call: the acceptable status
//! codes, query parameters, and error overrides for the resource. Applications
//! may add headers, an attempt timeout, or a cancellation token.
//!
//! # Example
//! ```
//! # use edgecloud_gax::options::RequestOptions;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! let mut options = RequestOptions::new();
//! options.set_attempt_timeout(Duration::from_secs(30));
//! options.set_cancellation_token(CancellationToken::new());
//! options.insert_header("x-request-id", "abc123")?;
//! # edgecloud_gax::Result::<()>::Ok(())
//! ```

use crate::Result;
use crate::error::{Error, ErrorOverrides};
use crate::query_parameter::QueryParameters;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Options for a single request.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    ok_codes: Vec<u16>,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    overrides: ErrorOverrides,
    attempt_timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The status codes accepted as success. Empty means any 2xx code.
    pub fn ok_codes(&self) -> &[u16] {
        &self.ok_codes
    }

    /// Restricts the status codes accepted as success.
    pub fn set_ok_codes<I: IntoIterator<Item = u16>>(&mut self, codes: I) {
        self.ok_codes = codes.into_iter().collect();
    }

    /// Returns true if `status` counts as success for this request.
    pub fn is_ok_status(&self, status: u16) -> bool {
        if self.ok_codes.is_empty() {
            return (200..300).contains(&status);
        }
        self.ok_codes.contains(&status)
    }

    /// Extra request headers.
    ///
    /// `Authorization`, `Accept`, and `User-Agent` are set by the client and
    /// cannot be overridden here.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Adds an extra request header.
    pub fn insert_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::try_from(name).map_err(|_| Error::invalid_input("header name", name))?;
        let value = HeaderValue::try_from(value)
            .map_err(|_| Error::invalid_input("header value", name.as_str()))?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// The query pairs for this request.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Appends the query pairs produced by `params`.
    pub fn set_query<Q: QueryParameters + ?Sized>(&mut self, params: &Q) {
        self.query.extend(params.query_pairs());
    }

    /// Appends a single query pair.
    pub fn add_query_pair<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.query.push((key.into(), value.into()));
    }

    /// The error rewriters for this request.
    pub fn error_overrides(&self) -> &ErrorOverrides {
        &self.overrides
    }

    pub fn set_error_overrides(&mut self, v: ErrorOverrides) {
        self.overrides = v;
    }

    /// The maximum time for a single attempt, including reading the response.
    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout
    }

    pub fn set_attempt_timeout<T: Into<Duration>>(&mut self, v: T) {
        self.attempt_timeout = Some(v.into());
    }

    /// The cancellation token for this request, if any.
    pub fn cancellation_token(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    pub fn set_cancellation_token(&mut self, v: CancellationToken) {
        self.cancel = Some(v);
    }
}
