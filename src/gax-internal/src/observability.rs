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

//! Tracing spans for HTTP requests.
//!
//! When tracing is enabled the client wraps each request in a `http_request`
//! span. The response status and the number of replays are recorded once
//! known.

use tracing::{Span, field};

/// Field names recorded on the `http_request` span.
pub mod keys {
    pub const METHOD: &str = "http.request.method";
    pub const URL: &str = "url.full";
    pub const RESEND_COUNT: &str = "http.request.resend_count";
    pub const STATUS_CODE: &str = "http.response.status_code";
}

/// Creates the span for a request, or a disabled span if tracing is off.
pub(crate) fn http_span(enabled: bool, method: &http::Method, url: &str) -> Span {
    if !enabled {
        return Span::none();
    }
    tracing::info_span!(
        "http_request",
        { keys::METHOD } = %method,
        { keys::URL } = url,
        { keys::RESEND_COUNT } = field::Empty,
        { keys::STATUS_CODE } = field::Empty,
    )
}

pub(crate) fn record_status(span: &Span, status: u16) {
    span.record(keys::STATUS_CODE, status);
}

pub(crate) fn record_resend(span: &Span, count: u32) {
    span.record(keys::RESEND_COUNT, count);
}
